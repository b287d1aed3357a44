use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek};
use std::path::Path;

use log::trace;

use crate::bitmap::Bitmap;
use crate::bmp::{self, header::FileHeader, header::HEADER_LEN};
use crate::error::BitmapError;
use crate::limits::Limits;

/// BMP decode request with optional resource limits.
///
/// ```no_run
/// use zenbmp::{DecodeRequest, Limits};
///
/// let limits = Limits { max_width: Some(8192), ..Default::default() };
/// let bitmap = DecodeRequest::new().with_limits(&limits).decode_path("in.bmp")?;
/// println!("{}x{}", bitmap.width(), bitmap.height());
/// # Ok::<(), zenbmp::BitmapError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct DecodeRequest<'a> {
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode the BMP file at `path`.
    ///
    /// The header is read and validated with the file closed again before
    /// any pixel storage is allocated; the file is then reopened for the
    /// pixel pass.
    pub fn decode_path(&self, path: impl AsRef<Path>) -> Result<Bitmap, BitmapError> {
        let path = path.as_ref();
        let defaults = Limits::default();
        let limits = self.limits.unwrap_or(&defaults);

        let header = {
            let file = open(path)?;
            trace!("opened {} for header probe", path.display());
            let (header, _) =
                FileHeader::parse(&mut BufReader::with_capacity(HEADER_LEN as usize, file))?;
            header
        };

        let mut bitmap = bmp::prepare(&header, limits)?;

        let file = open(path)?;
        trace!("reopened {} for pixel data", path.display());
        bmp::read_body(&header, &mut BufReader::new(file), 0, &mut bitmap)?;
        Ok(bitmap)
    }

    /// Decode a BMP from a seekable stream positioned at the `BM` magic.
    pub fn decode_reader<R: Read + Seek>(&self, reader: &mut R) -> Result<Bitmap, BitmapError> {
        let defaults = Limits::default();
        bmp::decode(reader, self.limits.unwrap_or(&defaults))
    }

    /// Decode a BMP held in memory.
    pub fn decode_bytes(&self, data: &[u8]) -> Result<Bitmap, BitmapError> {
        self.decode_reader(&mut Cursor::new(data))
    }
}

/// Read the BMP file at `path` with default limits.
pub fn read_bmp(path: impl AsRef<Path>) -> Result<Bitmap, BitmapError> {
    DecodeRequest::new().decode_path(path)
}

/// Decode an in-memory BMP with default limits.
pub fn decode(data: &[u8]) -> Result<Bitmap, BitmapError> {
    DecodeRequest::new().decode_bytes(data)
}

pub(crate) fn open(path: &Path) -> Result<File, BitmapError> {
    File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => BitmapError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => BitmapError::FileAccess {
            path: path.to_path_buf(),
            source,
        },
    })
}
