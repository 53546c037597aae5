//! Color types and the coverage blender.
//!
//! [`Rgba`] is the 8-bit storage format of a canvas. [`Rgb`] carries blend
//! results as unclamped floating-point channels so that the blender stays a
//! pure linear interpolation; quantization happens once, in [`Rgb::to_rgba`].

use crate::error::{Error, Result};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Drop alpha and widen the channels for blending.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        Rgb::new(f32::from(self.r), f32::from(self.g), f32::from(self.b))
    }

    /// Parse a hex color: `#RGB`, `#RRGGBB` or `#RRGGBBAA` (a single leading
    /// `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for any other length or a non-hex digit.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_pixel::color::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#FF0000").unwrap(), Rgba::RED);
    /// assert_eq!(Rgba::from_hex("#fff").unwrap(), Rgba::WHITE);
    /// ```
    pub fn from_hex(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || Error::InvalidColor(s.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        let nibble = |i: usize| {
            u8::from_str_radix(&digits[i..=i], 16)
                .map(|v| v * 17)
                .map_err(|_| invalid())
        };

        match digits.len() {
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// RGB color with unclamped floating-point channels.
///
/// Channels are nominally 0.0-255.0 but nothing enforces it: blend results are
/// passed through as computed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// Create a new color.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Quantize to an opaque [`Rgba`]: round to nearest, then clamp to 0-255.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let q = |c: f32| c.round().clamp(0.0, 255.0) as u8;
        Rgba::rgb(q(self.r), q(self.g), q(self.b))
    }
}

impl From<Rgba> for Rgb {
    fn from(color: Rgba) -> Self {
        color.to_rgb()
    }
}

/// Mix one channel: `a * t + b * (1 - t)`.
#[inline]
#[must_use]
pub fn mix_channel(a: f32, b: f32, t: f32) -> f32 {
    a * t + b * (1.0 - t)
}

/// Mix two colors channel-wise with weight `t` on `a`.
///
/// No gamma correction and no clamping: `t` outside `[0, 1]` or channels
/// outside `[0, 255]` produce out-of-range output rather than an error.
///
/// # Example
///
/// ```
/// use trueno_pixel::color::{mix, Rgb};
///
/// let red = Rgb::new(255.0, 0.0, 0.0);
/// let backdrop = Rgb::new(32.0, 32.0, 32.0);
/// assert_eq!(mix(red, backdrop, 0.5), Rgb::new(143.5, 16.0, 16.0));
/// ```
#[must_use]
pub fn mix(a: Rgb, b: Rgb, t: f32) -> Rgb {
    Rgb::new(
        mix_channel(a.r, b.r, t),
        mix_channel(a.g, b.g, t),
        mix_channel(a.b, b.b, t),
    )
}
