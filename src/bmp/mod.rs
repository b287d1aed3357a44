//! 24-bit uncompressed BMP codec (internal).
//!
//! Use top-level [`crate::read_bmp`], [`crate::write_bmp`], [`crate::DecodeRequest`], etc.

pub(crate) mod header;
mod transcode;

use std::io::{Read, Seek, SeekFrom, Write};

use log::{trace, warn};

use crate::bitmap::Bitmap;
use crate::error::BitmapError;
use crate::limits::Limits;
use header::FileHeader;

/// Validate a parsed header and allocate the bitmap it describes.
///
/// Nothing is allocated when validation fails.
pub(crate) fn prepare(header: &FileHeader, limits: &Limits) -> Result<Bitmap, BitmapError> {
    header.validate(limits)?;
    Bitmap::allocate(i64::from(header.width), i64::from(header.height))
}

/// Seek to the header's data offset and transcode the pixel rows.
///
/// `base` is the stream position of the `BM` magic.
pub(crate) fn read_body<R: Read + Seek>(
    header: &FileHeader,
    reader: &mut R,
    base: u64,
    bitmap: &mut Bitmap,
) -> Result<(), BitmapError> {
    let gap = header.gap_before_data();
    if gap > 0 {
        // Palette or bitfield masks; a 24-bit image does not use them.
        warn!(
            "BMP pixel data starts at {}, skipping {gap} bytes after the {}-byte info header",
            header.data_offset, header.info_size
        );
    }
    reader.seek(SeekFrom::Start(base + u64::from(header.data_offset)))?;
    let n = transcode::read_pixels(reader, bitmap)?;
    trace!("read {n} pixel bytes ({}x{})", bitmap.width(), bitmap.height());
    Ok(())
}

/// Decode a whole BMP from a seekable stream positioned at its start.
pub(crate) fn decode<R: Read + Seek>(
    reader: &mut R,
    limits: &Limits,
) -> Result<Bitmap, BitmapError> {
    let start = reader.stream_position()?;
    let (header, _) = FileHeader::parse(reader)?;
    let mut bitmap = prepare(&header, limits)?;
    read_body(&header, reader, start, &mut bitmap)?;
    Ok(bitmap)
}

/// Write header and pixel rows for `bitmap`.
pub(crate) fn encode<W: Write + Seek>(bitmap: &Bitmap, out: &mut W) -> Result<(), BitmapError> {
    let header = FileHeader::for_dimensions(bitmap.width(), bitmap.height())?;
    let start = out.stream_position()?;
    header.write(out)?;
    out.seek(SeekFrom::Start(start + u64::from(header.data_offset)))?;
    transcode::write_pixels(out, bitmap)?;
    trace!(
        "wrote {}x{} bitmap, {} bytes",
        bitmap.width(),
        bitmap.height(),
        header.file_size
    );
    Ok(())
}
