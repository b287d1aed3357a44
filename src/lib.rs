//! # zenbmp
//!
//! Decoder and encoder for uncompressed 24-bit BMP images.
//!
//! Files are decoded into a [`Bitmap`]: an owned, row-major grid of
//! [`Pixel`]s with the origin at the top-left corner. Pixel accessors clamp
//! out-of-range coordinates to the nearest edge instead of failing, so
//! drawing code near the borders never faults.
//!
//! ## Supported Files
//!
//! - 24 bits per pixel, uncompressed (`BI_RGB`), one color plane
//! - BITMAPINFOHEADER (40 bytes) and larger info headers; the extra fields
//!   and any palette are skipped via the header's data offset
//! - OS/2 BITMAPCOREHEADER (12 bytes) for reading
//!
//! Output always uses a 54-byte header followed directly by pixel data.
//!
//! ## Non-Goals
//!
//! - Palettized, RLE, 16-bit and 32-bit variants
//! - Color management
//! - Streaming or partial decode
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp::{Bitmap, Channel, Pixel};
//!
//! let mut bitmap = Bitmap::new(64, 32)?;
//! bitmap.set_pixel(0, 0, Pixel::rgb(255, 0, 0));
//! zenbmp::write_bmp(&bitmap, "red-corner.bmp")?;
//!
//! let decoded = zenbmp::read_bmp("red-corner.bmp")?;
//! assert_eq!(decoded.pixel(0, 0).channel(Channel::Red), 255);
//! // Out-of-range coordinates clamp to the nearest edge.
//! assert_eq!(decoded.pixel(-10, -10), decoded.pixel(0, 0));
//! # Ok::<(), zenbmp::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod bitmap;
mod bmp;
mod decode;
mod encode;
mod error;
mod info;
mod limits;
mod pixel;

// Re-exports
pub use bitmap::Bitmap;
pub use bmp::header::InfoLayout;
pub use decode::{DecodeRequest, decode, read_bmp};
pub use encode::{EncodeRequest, encode, write_bmp};
pub use error::BitmapError;
pub use info::ImageInfo;
pub use limits::{DEFAULT_MAX_BITMAP_BYTES, Limits};
pub use pixel::{Channel, Pixel};
