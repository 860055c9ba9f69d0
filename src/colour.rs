use std::fmt;
use std::str::FromStr;

/// An opaque sRGB colour, one byte per channel
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The error returned when a `#RRGGBB` string cannot be parsed
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex colour {0:?}, expected #RRGGBB")]
pub struct ParseColourError(pub String);

impl Colour {
    /// Create a new colour from its red, green, and blue components
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Colour {
        Colour { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb_float(r: f32, g: f32, b: f32) -> Colour {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Colour {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }

    /// Create a grey of the given intensity
    pub const fn new_grey(g: u8) -> Colour {
        Colour { r: g, g, b: g }
    }

    /// Parse a colour written as `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Colour, ParseColourError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColourError(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ParseColourError(hex.to_string()))
        };
        Ok(Colour {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Mix `self` over `background` with the given coverage (0.0 to 1.0), as
    /// anti-aliased glyph edges are composited onto the canvas
    pub fn blend_over(self, background: Colour, coverage: f32) -> Colour {
        let coverage = coverage.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| -> u8 {
            (fg as f32 * coverage + bg as f32 * (1.0 - coverage)).round() as u8
        };
        Colour {
            r: mix(self.r, background.r),
            g: mix(self.g, background.g),
            b: mix(self.b, background.b),
        }
    }
}

impl FromStr for Colour {
    type Err = ParseColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colour::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from(c: (u8, u8, u8)) -> Self {
        Colour {
            r: c.0,
            g: c.1,
            b: c.2,
        }
    }
}

impl From<[u8; 3]> for Colour {
    fn from(c: [u8; 3]) -> Self {
        let [r, g, b] = c;
        Colour { r, g, b }
    }
}

impl From<Colour> for image::Rgba<u8> {
    fn from(c: Colour) -> Self {
        image::Rgba([c.r, c.g, c.b, 0xFF])
    }
}

impl From<image::Rgba<u8>> for Colour {
    fn from(p: image::Rgba<u8>) -> Self {
        let [r, g, b, _] = p.0;
        Colour { r, g, b }
    }
}

/// The warm "stone" palette the story cards are painted with
pub mod colours {
    use super::*;

    /// Paper background
    pub const PAPER: Colour = Colour::new_rgb(0xFA, 0xFA, 0xF9);
    /// The faint horizontal lines laid over the paper
    pub const PAPER_TEXTURE: Colour = Colour::new_rgb(0xF5, 0xF5, 0xF4);
    pub const TITLE: Colour = Colour::new_rgb(0x1C, 0x19, 0x17);
    pub const BODY: Colour = Colour::new_rgb(0x29, 0x25, 0x24);
    pub const WATERMARK: Colour = Colour::new_rgb(0xA8, 0xA2, 0x9E);

    pub const BLACK: Colour = Colour::new_grey(0);
    pub const WHITE: Colour = Colour::new_grey(0xFF);
}
