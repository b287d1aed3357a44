use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use log::trace;

use crate::bitmap::Bitmap;
use crate::bmp;
use crate::error::BitmapError;

/// BMP encode request.
///
/// Output is always a 54-byte header (BITMAPINFOHEADER) followed directly
/// by bottom-up 24-bit scanlines.
///
/// ```no_run
/// use zenbmp::{Bitmap, EncodeRequest, Pixel};
///
/// let mut bitmap = Bitmap::new(4, 4)?;
/// bitmap.fill(Pixel::WHITE);
/// EncodeRequest::new().encode_path(&bitmap, "white.bmp")?;
/// # Ok::<(), zenbmp::BitmapError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct EncodeRequest {}

impl EncodeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `bitmap` to `path`, creating or truncating the file.
    ///
    /// A failure after the file is created leaves whatever was written so
    /// far on disk.
    pub fn encode_path(&self, bitmap: &Bitmap, path: impl AsRef<Path>) -> Result<(), BitmapError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| BitmapError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        trace!("opened {} for writing", path.display());

        let mut out = BufWriter::new(file);
        bmp::encode(bitmap, &mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Encode into a seekable sink, starting at its current position.
    pub fn encode_writer<W: Write + Seek>(
        &self,
        bitmap: &Bitmap,
        out: &mut W,
    ) -> Result<(), BitmapError> {
        bmp::encode(bitmap, out)
    }

    /// Encode into a new byte vector.
    pub fn encode(&self, bitmap: &Bitmap) -> Result<Vec<u8>, BitmapError> {
        let mut out = Cursor::new(Vec::new());
        self.encode_writer(bitmap, &mut out)?;
        Ok(out.into_inner())
    }
}

/// Write `bitmap` to `path` as a 24-bit BMP.
pub fn write_bmp(bitmap: &Bitmap, path: impl AsRef<Path>) -> Result<(), BitmapError> {
    EncodeRequest::new().encode_path(bitmap, path)
}

/// Encode `bitmap` into a new byte vector.
pub fn encode(bitmap: &Bitmap) -> Result<Vec<u8>, BitmapError> {
    EncodeRequest::new().encode(bitmap)
}
