//! Owned pixel buffer with top-left origin and edge-clamped accessors.

use crate::error::BitmapError;
use crate::pixel::Pixel;

/// A 24-bit image held in memory.
///
/// Pixels are stored row-major with row 0 at the top and column 0 at the
/// left, regardless of how the file on disk orders its scanlines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl Bitmap {
    /// Allocate a black `width`×`height` bitmap.
    ///
    /// Fails with [`BitmapError::AllocationFailure`] when either dimension is
    /// zero or the backing store cannot be reserved.
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        Self::allocate(i64::from(width), i64::from(height))
    }

    /// Allocate from signed header dimensions.
    pub(crate) fn allocate(width: i64, height: i64) -> Result<Self, BitmapError> {
        let fail = || BitmapError::AllocationFailure { width, height };
        if width <= 0 || height <= 0 {
            return Err(fail());
        }
        let w = u32::try_from(width).map_err(|_| fail())? as usize;
        let h = u32::try_from(height).map_err(|_| fail())? as usize;
        let count = w.checked_mul(h).ok_or_else(fail)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(count).map_err(|_| fail())?;
        pixels.resize(count, Pixel::BLACK);

        Ok(Self {
            width: w,
            height: h,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    /// Number of pixels.
    pub fn size(&self) -> usize {
        self.pixels.len()
    }

    /// Size of the pixel payload in bytes (3 per pixel, no row padding).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * 3
    }

    /// All pixels, row-major from the top-left corner.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// All pixels, mutable, row-major from the top-left corner.
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Pixel at `(x, y)`. Out-of-range coordinates are clamped to the
    /// nearest edge pixel.
    pub fn pixel(&self, x: i64, y: i64) -> Pixel {
        self.pixels[self.clamped_index(x, y)]
    }

    /// Overwrite the pixel at `(x, y)`, clamping coordinates like [`Self::pixel`].
    pub fn set_pixel(&mut self, x: i64, y: i64, pixel: Pixel) {
        let idx = self.clamped_index(x, y);
        self.pixels[idx] = pixel;
    }

    /// Set every pixel to `pixel`.
    pub fn fill(&mut self, pixel: Pixel) {
        self.pixels.fill(pixel);
    }

    /// Row `y`, counted from the top. `y` must be below `height`.
    pub(crate) fn row(&self, y: usize) -> &[Pixel] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width]
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [Pixel] {
        let start = self.index(0, y);
        let width = self.width;
        &mut self.pixels[start..start + width]
    }

    fn clamped_index(&self, x: i64, y: i64) -> usize {
        let max_x = self.width as i64 - 1;
        let max_y = self.height as i64 - 1;
        self.index(x.clamp(0, max_x) as usize, y.clamp(0, max_y) as usize)
    }

    // The only place a coordinate becomes a buffer offset.
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

#[cfg(feature = "imgref")]
impl Bitmap {
    /// Copy into an [`imgref::ImgVec`] of RGB pixels.
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGB8> {
        let buf = self.pixels.iter().map(|&p| rgb::RGB8::from(p)).collect();
        imgref::ImgVec::new(buf, self.width, self.height)
    }
}

#[cfg(feature = "imgref")]
impl TryFrom<imgref::ImgRef<'_, rgb::RGB8>> for Bitmap {
    type Error = BitmapError;

    fn try_from(img: imgref::ImgRef<'_, rgb::RGB8>) -> Result<Self, Self::Error> {
        let mut bitmap = Bitmap::allocate(img.width() as i64, img.height() as i64)?;
        for (y, src) in img.rows().enumerate() {
            for (dst, &px) in bitmap.row_mut(y).iter_mut().zip(src) {
                *dst = px.into();
            }
        }
        Ok(bitmap)
    }
}
