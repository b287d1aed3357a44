use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use crate::bmp::header::{FileHeader, HEADER_LEN, InfoLayout};
use crate::decode::open;
use crate::error::BitmapError;

/// Header facts about a BMP, read without decoding any pixels.
///
/// Probing does not validate: an 8-bit or compressed file probes fine and
/// only fails once decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: i32,
    pub height: i32,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub layout: InfoLayout,
    /// Byte offset of the first scanline.
    pub data_offset: u32,
    /// File size as recorded in the header.
    pub file_size: u32,
}

impl ImageInfo {
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, BitmapError> {
        let (header, _) = FileHeader::parse(reader)?;
        Ok(Self {
            width: header.width,
            height: header.height,
            bits_per_pixel: header.bpp,
            compression: header.compression,
            layout: header.layout,
            data_offset: header.data_offset,
            file_size: header.file_size,
        })
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        Self::from_reader(&mut Cursor::new(data))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BitmapError> {
        let file = open(path.as_ref())?;
        Self::from_reader(&mut BufReader::with_capacity(HEADER_LEN as usize, file))
    }
}
