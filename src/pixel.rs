/// One 24-bit pixel, stored in BMP byte order (blue, green, red).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

/// Color channel selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::rgb(0, 0, 0);
    pub const WHITE: Pixel = Pixel::rgb(255, 255, 255);

    /// Build a pixel from channels in the usual red, green, blue order.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r }
    }

    /// Build a pixel from three bytes in file order.
    pub(crate) const fn from_bgr([b, g, r]: [u8; 3]) -> Self {
        Self { b, g, r }
    }

    /// The pixel's bytes in file order.
    pub(crate) const fn to_bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }

    pub fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    pub fn set_channel(&mut self, channel: Channel, value: u8) {
        match channel {
            Channel::Red => self.r = value,
            Channel::Green => self.g = value,
            Channel::Blue => self.b = value,
        }
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::RGB8 {
    fn from(p: Pixel) -> Self {
        rgb::RGB8::new(p.r, p.g, p.b)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for Pixel {
    fn from(p: rgb::RGB8) -> Self {
        Pixel::rgb(p.r, p.g, p.b)
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::alt::BGR8 {
    fn from(p: Pixel) -> Self {
        rgb::alt::BGR8 {
            b: p.b,
            g: p.g,
            r: p.r,
        }
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::alt::BGR8> for Pixel {
    fn from(p: rgb::alt::BGR8) -> Self {
        Pixel::rgb(p.r, p.g, p.b)
    }
}
