//! BMP file header and DIB info header: parse, validate, synthesize, write.

use std::io::{self, Read, Write};

use log::{debug, warn};

use super::transcode::RowGeometry;
use crate::error::BitmapError;
use crate::limits::Limits;

pub(crate) const MAGIC: [u8; 2] = *b"BM";
pub(crate) const FILE_HEADER_LEN: u32 = 14;
/// Size of BITMAPINFOHEADER, the only info header this crate writes.
pub(crate) const INFO_HEADER_LEN: u32 = 40;
/// File header plus info header; pixel data follows directly on write.
pub(crate) const HEADER_LEN: u32 = FILE_HEADER_LEN + INFO_HEADER_LEN;
/// 300 DPI, written into both resolution fields.
pub(crate) const PIXELS_PER_METER: u32 = 11811;

/// Which info header variant a file carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfoLayout {
    /// Info header smaller than 40 bytes (OS/2 BITMAPCOREHEADER):
    /// 16-bit width and height, no compression field.
    Legacy,
    /// BITMAPINFOHEADER or larger: 32-bit width and height, compression
    /// and the informational fields.
    Modern,
}

/// All header fields, as laid out on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FileHeader {
    pub magic: [u8; 2],
    pub file_size: u32,
    pub reserved: u32,
    pub data_offset: u32,
    pub info_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bpp: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: u32,
    pub y_pixels_per_meter: u32,
    pub colors_used: u32,
    pub important_colors: u32,
    pub layout: InfoLayout,
}

// ── Little-endian field reader ──────────────────────────────────────

struct FieldReader<'r, R> {
    inner: &'r mut R,
    consumed: usize,
}

impl<'r, R: Read> FieldReader<'r, R> {
    fn new(inner: &'r mut R) -> Self {
        Self { inner, consumed: 0 }
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => BitmapError::UnexpectedEof,
            _ => BitmapError::Io(e),
        })?;
        self.consumed += N;
        Ok(buf)
    }

    fn get_u16_le(&mut self) -> Result<u16, BitmapError> {
        self.read_fixed_bytes().map(u16::from_le_bytes)
    }

    fn get_u32_le(&mut self) -> Result<u32, BitmapError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    fn get_i32_le(&mut self) -> Result<i32, BitmapError> {
        self.read_fixed_bytes().map(i32::from_le_bytes)
    }
}

impl FileHeader {
    /// Read the header fields from the start of `reader`.
    ///
    /// Returns the header and the number of bytes consumed. No validation
    /// is performed beyond what the layout branch needs.
    pub fn parse<R: Read>(reader: &mut R) -> Result<(Self, usize), BitmapError> {
        let mut r = FieldReader::new(reader);

        let magic = r.read_fixed_bytes::<2>()?;
        let file_size = r.get_u32_le()?;
        let reserved = r.get_u32_le()?;
        let data_offset = r.get_u32_le()?;
        let info_size = r.get_u32_le()?;

        let mut header = FileHeader {
            magic,
            file_size,
            reserved,
            data_offset,
            info_size,
            width: 0,
            height: 0,
            planes: 0,
            bpp: 0,
            compression: 0,
            image_size: 0,
            x_pixels_per_meter: 0,
            y_pixels_per_meter: 0,
            colors_used: 0,
            important_colors: 0,
            layout: InfoLayout::Modern,
        };

        if info_size >= INFO_HEADER_LEN {
            header.width = r.get_i32_le()?;
            header.height = r.get_i32_le()?;
            header.planes = r.get_u16_le()?;
            header.bpp = r.get_u16_le()?;
            header.compression = r.get_u32_le()?;
            header.image_size = r.get_u32_le()?;
            header.x_pixels_per_meter = r.get_u32_le()?;
            header.y_pixels_per_meter = r.get_u32_le()?;
            header.colors_used = r.get_u32_le()?;
            header.important_colors = r.get_u32_le()?;
        } else {
            header.layout = InfoLayout::Legacy;
            header.width = i32::from(r.get_u16_le()?);
            header.height = i32::from(r.get_u16_le()?);
            header.planes = r.get_u16_le()?;
            header.bpp = r.get_u16_le()?;
        }

        debug!(
            "BMP header: magic={:?} file_size={} offset={} info_size={} {}x{} planes={} bpp={} compression={}",
            header.magic,
            header.file_size,
            header.data_offset,
            header.info_size,
            header.width,
            header.height,
            header.planes,
            header.bpp,
            header.compression,
        );
        if header.layout == InfoLayout::Legacy {
            warn!("legacy {}-byte BMP info header", header.info_size);
        }

        Ok((header, r.consumed))
    }

    /// Check that this header describes a bitmap this crate can decode.
    ///
    /// Checks run in a fixed order so the most basic problem is reported:
    /// magic, bit depth, compression, planes, then size.
    pub fn validate(&self, limits: &Limits) -> Result<(), BitmapError> {
        if self.magic != MAGIC {
            return Err(BitmapError::BadMagic(self.magic));
        }
        if self.bpp != 24 {
            return Err(BitmapError::UnsupportedBitDepth(self.bpp));
        }
        if self.compression != 0 {
            return Err(BitmapError::UnsupportedCompression(self.compression));
        }
        if self.planes != 1 {
            return Err(BitmapError::UnsupportedPlanes(self.planes));
        }
        limits.check(i64::from(self.width), i64::from(self.height))
    }

    /// Bytes between the end of the info header and the pixel data, such as
    /// a palette or bitfield masks.
    pub fn gap_before_data(&self) -> u32 {
        self.data_offset
            .saturating_sub(FILE_HEADER_LEN.saturating_add(self.info_size))
    }

    /// Build the header written in front of a `width`×`height` bitmap.
    pub fn for_dimensions(width: u32, height: u32) -> Result<Self, BitmapError> {
        let too_large = |bytes: u64| BitmapError::BitmapTooLarge {
            width: i64::from(width),
            height: i64::from(height),
            bytes,
            limit: u64::from(u32::MAX),
        };

        let geometry = RowGeometry::new(width as usize);
        let data_len = (geometry.stride as u64).saturating_mul(u64::from(height));
        let file_len = data_len.saturating_add(u64::from(HEADER_LEN));
        let file_size = u32::try_from(file_len).map_err(|_| too_large(file_len))?;
        let image_size = u32::try_from(data_len).map_err(|_| too_large(data_len))?;
        let w = i32::try_from(width).map_err(|_| too_large(file_len))?;
        let h = i32::try_from(height).map_err(|_| too_large(file_len))?;

        Ok(FileHeader {
            magic: MAGIC,
            file_size,
            reserved: 0,
            data_offset: HEADER_LEN,
            info_size: INFO_HEADER_LEN,
            width: w,
            height: h,
            planes: 1,
            bpp: 24,
            compression: 0,
            image_size,
            x_pixels_per_meter: PIXELS_PER_METER,
            y_pixels_per_meter: PIXELS_PER_METER,
            colors_used: 0,
            important_colors: 0,
            layout: InfoLayout::Modern,
        })
    }

    /// Serialize as a 54-byte file header plus BITMAPINFOHEADER, whatever
    /// layout the header was parsed from.
    pub fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut buf = Vec::with_capacity(HEADER_LEN as usize);

        // File header (14 bytes)
        buf.extend_from_slice(&self.magic);
        buf.extend_from_slice(&self.file_size.to_le_bytes());
        buf.extend_from_slice(&self.reserved.to_le_bytes());
        buf.extend_from_slice(&self.data_offset.to_le_bytes());

        // DIB header (BITMAPINFOHEADER, 40 bytes)
        buf.extend_from_slice(&INFO_HEADER_LEN.to_le_bytes());
        buf.extend_from_slice(&self.width.to_le_bytes());
        buf.extend_from_slice(&self.height.to_le_bytes()); // positive = bottom-up
        buf.extend_from_slice(&self.planes.to_le_bytes());
        buf.extend_from_slice(&self.bpp.to_le_bytes());
        buf.extend_from_slice(&self.compression.to_le_bytes());
        buf.extend_from_slice(&self.image_size.to_le_bytes());
        buf.extend_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        buf.extend_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        buf.extend_from_slice(&self.colors_used.to_le_bytes());
        buf.extend_from_slice(&self.important_colors.to_le_bytes());

        out.write_all(&buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn legacy_header(width: u16, height: u16, bpp: u16) -> Vec<u8> {
        let mut v = Vec::new();
        v.extend_from_slice(b"BM");
        v.extend_from_slice(&0u32.to_le_bytes());
        v.extend_from_slice(&0u32.to_le_bytes());
        v.extend_from_slice(&26u32.to_le_bytes());
        v.extend_from_slice(&12u32.to_le_bytes());
        v.extend_from_slice(&width.to_le_bytes());
        v.extend_from_slice(&height.to_le_bytes());
        v.extend_from_slice(&1u16.to_le_bytes());
        v.extend_from_slice(&bpp.to_le_bytes());
        v
    }

    #[test]
    fn synthesized_header_bytes() {
        let header = FileHeader::for_dimensions(5, 2).unwrap();
        let mut out = Vec::new();
        header.write(&mut out).unwrap();

        assert_eq!(out.len(), 54);
        assert_eq!(&out[0..2], b"BM");
        // 5 px → 15 bytes → stride 16; 2 rows
        assert_eq!(u32::from_le_bytes(out[2..6].try_into().unwrap()), 54 + 32);
        assert_eq!(u32::from_le_bytes(out[6..10].try_into().unwrap()), 0);
        assert_eq!(u32::from_le_bytes(out[10..14].try_into().unwrap()), 54);
        assert_eq!(u32::from_le_bytes(out[14..18].try_into().unwrap()), 40);
        assert_eq!(i32::from_le_bytes(out[18..22].try_into().unwrap()), 5);
        assert_eq!(i32::from_le_bytes(out[22..26].try_into().unwrap()), 2);
        assert_eq!(u16::from_le_bytes(out[26..28].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(out[28..30].try_into().unwrap()), 24);
        assert_eq!(u32::from_le_bytes(out[30..34].try_into().unwrap()), 0);
        assert_eq!(u32::from_le_bytes(out[34..38].try_into().unwrap()), 32);
        assert_eq!(u32::from_le_bytes(out[38..42].try_into().unwrap()), 11811);
        assert_eq!(u32::from_le_bytes(out[42..46].try_into().unwrap()), 11811);
        assert_eq!(&out[46..54], &[0u8; 8]);
    }

    #[test]
    fn modern_parse_reads_back_written_header() {
        let header = FileHeader::for_dimensions(7, 3).unwrap();
        let mut out = Vec::new();
        header.write(&mut out).unwrap();

        let (parsed, consumed) = FileHeader::parse(&mut Cursor::new(&out)).unwrap();
        assert_eq!(consumed, 54);
        assert_eq!(parsed, header);
        parsed.validate(&Limits::default()).unwrap();
    }

    #[test]
    fn legacy_layout_uses_16_bit_dimensions() {
        let data = legacy_header(300, 2, 24);
        let (parsed, consumed) = FileHeader::parse(&mut Cursor::new(&data)).unwrap();
        assert_eq!(consumed, 26);
        assert_eq!(parsed.layout, InfoLayout::Legacy);
        assert_eq!((parsed.width, parsed.height), (300, 2));
        assert_eq!(parsed.planes, 1);
        assert_eq!(parsed.bpp, 24);
        assert_eq!(parsed.compression, 0);
        assert_eq!(parsed.data_offset, 26);
        parsed.validate(&Limits::default()).unwrap();
    }

    #[test]
    fn legacy_header_is_rewritten_as_modern() {
        let data = legacy_header(4, 4, 24);
        let (parsed, _) = FileHeader::parse(&mut Cursor::new(&data)).unwrap();
        let mut out = Vec::new();
        parsed.write(&mut out).unwrap();
        assert_eq!(out.len(), 54);
        assert_eq!(u32::from_le_bytes(out[14..18].try_into().unwrap()), 40);
        assert_eq!(i32::from_le_bytes(out[18..22].try_into().unwrap()), 4);
    }

    #[test]
    fn gap_counts_only_bytes_past_the_info_header() {
        let mut h = FileHeader::for_dimensions(2, 2).unwrap();
        assert_eq!(h.gap_before_data(), 0);

        // BITMAPV5HEADER with pixels right after it
        h.info_size = 124;
        h.data_offset = 14 + 124;
        assert_eq!(h.gap_before_data(), 0);

        // 256-entry palette after a V5 header
        h.data_offset = 14 + 124 + 1024;
        assert_eq!(h.gap_before_data(), 1024);

        let (legacy, _) = FileHeader::parse(&mut Cursor::new(legacy_header(1, 1, 24))).unwrap();
        assert_eq!(legacy.gap_before_data(), 0);

        h.data_offset = 0;
        assert_eq!(h.gap_before_data(), 0);
    }

    #[test]
    fn parse_does_not_validate() {
        let mut data = legacy_header(1, 1, 8);
        data[0] = b'X';
        let (parsed, _) = FileHeader::parse(&mut Cursor::new(&data)).unwrap();
        assert_eq!(parsed.magic, *b"XM");
        assert_eq!(parsed.bpp, 8);
    }

    #[test]
    fn truncated_header_is_eof() {
        let data = legacy_header(1, 1, 24);
        let err = FileHeader::parse(&mut Cursor::new(&data[..20])).unwrap_err();
        assert!(matches!(err, BitmapError::UnexpectedEof));
    }

    #[test]
    fn validation_order() {
        let mut h = FileHeader::for_dimensions(2, 2).unwrap();
        h.magic = *b"MB";
        h.bpp = 8;
        assert!(matches!(
            h.validate(&Limits::default()),
            Err(BitmapError::BadMagic([b'M', b'B']))
        ));

        h.magic = MAGIC;
        h.compression = 1;
        assert!(matches!(
            h.validate(&Limits::default()),
            Err(BitmapError::UnsupportedBitDepth(8))
        ));

        h.bpp = 24;
        h.planes = 2;
        assert!(matches!(
            h.validate(&Limits::default()),
            Err(BitmapError::UnsupportedCompression(1))
        ));

        h.compression = 0;
        assert!(matches!(
            h.validate(&Limits::default()),
            Err(BitmapError::UnsupportedPlanes(2))
        ));
    }

    #[test]
    fn oversized_dimensions_rejected() {
        let mut h = FileHeader::for_dimensions(1, 1).unwrap();
        h.width = 20_000;
        h.height = 20_000;
        assert!(matches!(
            h.validate(&Limits::default()),
            Err(BitmapError::BitmapTooLarge {
                bytes: 1_200_000_000,
                ..
            })
        ));
    }
}
