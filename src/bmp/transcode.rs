//! Scanline transcoding between the bottom-up, 4-byte-aligned file layout
//! and the top-down [`Bitmap`].
//!
//! Both directions stream one row at a time through a single scratch
//! buffer, so no second copy of the image is ever held.

use std::io::{self, Read, Seek, Write};

use crate::bitmap::Bitmap;
use crate::error::BitmapError;
use crate::pixel::Pixel;

/// Byte geometry of one 24-bit scanline on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RowGeometry {
    /// Pixel bytes in a row (`width * 3`).
    pub pixel_bytes: usize,
    /// Padded row length, a multiple of 4.
    pub stride: usize,
    /// Zero bytes appended after the pixel bytes.
    pub padding: usize,
}

impl RowGeometry {
    pub fn new(width: usize) -> Self {
        let pixel_bytes = width * 3;
        let stride = pixel_bytes.div_ceil(4) * 4;
        Self {
            pixel_bytes,
            stride,
            padding: stride - pixel_bytes,
        }
    }
}

/// Read scanlines from `reader` (positioned at the pixel data) into
/// `bitmap`, whose dimensions come from the validated header.
///
/// Fails with [`BitmapError::SizeMismatch`] if fewer than
/// `width * height * 3` pixel bytes are available.
pub(crate) fn read_pixels<R: Read + Seek>(
    reader: &mut R,
    bitmap: &mut Bitmap,
) -> Result<u64, BitmapError> {
    let geometry = RowGeometry::new(bitmap.width() as usize);
    let padding = geometry.padding as i64;
    let mut scanline = vec![0u8; geometry.pixel_bytes];
    let mut total: u64 = 0;

    // File row 0 is the bottom of the image.
    for y in (0..bitmap.height() as usize).rev() {
        let n = read_up_to(reader, &mut scanline)?;
        total += n as u64;

        for (dst, bgr) in bitmap
            .row_mut(y)
            .iter_mut()
            .zip(scanline[..n].chunks_exact(3))
        {
            *dst = Pixel::from_bgr([bgr[0], bgr[1], bgr[2]]);
        }

        if n < scanline.len() {
            break;
        }
        reader.seek_relative(padding)?;
    }

    let expected = bitmap.size_bytes() as u64;
    if total != expected {
        return Err(BitmapError::SizeMismatch {
            expected,
            actual: total,
        });
    }
    Ok(total)
}

/// Write `bitmap` as bottom-up BGR scanlines, each zero-padded to a
/// 4-byte boundary.
pub(crate) fn write_pixels<W: Write>(writer: &mut W, bitmap: &Bitmap) -> io::Result<()> {
    let geometry = RowGeometry::new(bitmap.width() as usize);
    // The tail past pixel_bytes is never touched, so padding stays zero.
    let mut scanline = vec![0u8; geometry.stride];

    for y in (0..bitmap.height() as usize).rev() {
        for (dst, px) in scanline[..geometry.pixel_bytes]
            .chunks_exact_mut(3)
            .zip(bitmap.row(y))
        {
            dst.copy_from_slice(&px.to_bgr());
        }
        writer.write_all(&scanline)?;
    }
    Ok(())
}

/// Fill as much of `buf` as the reader can supply, stopping early only at
/// end of input.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
