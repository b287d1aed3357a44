use std::path::PathBuf;

/// Errors from BMP decoding and encoding.
///
/// Every variant is terminal for the operation that produced it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bad magic bytes {0:02x?}, expected \"BM\"")]
    BadMagic([u8; 2]),

    #[error("unsupported bit depth: {0} bpp (only 24 is supported)")]
    UnsupportedBitDepth(u16),

    #[error("unsupported compression method: {0}")]
    UnsupportedCompression(u32),

    #[error("unsupported color plane count: {0}")]
    UnsupportedPlanes(u16),

    #[error("bitmap too large: {width}x{height} needs {bytes} bytes, limit is {limit}")]
    BitmapTooLarge {
        width: i64,
        height: i64,
        bytes: u64,
        limit: u64,
    },

    #[error("cannot allocate a {width}x{height} bitmap")]
    AllocationFailure { width: i64, height: i64 },

    #[error("pixel data size mismatch: expected {expected} bytes, read {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
