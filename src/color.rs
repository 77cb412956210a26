//! Color value types and CIELAB / LCh conversions
//!
//! Uses the D65-referenced CIELAB transform with the exact constants the
//! candidate pipeline was calibrated against (0.00304 linear cutoff,
//! 7.787037 segment slope). The sector tolerances downstream only keep
//! their meaning if these numbers stay put.

use crate::error::AppError;

// D65 whitepoint
const D65_X: f64 = 0.950470;
const D65_Y: f64 = 1.0;
const D65_Z: f64 = 1.088830;

/// sRGB color with a canonical lower-case `#rrggbb` hex form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color like `#ff8800`, `FF8800`, or `ff8800`.
    pub fn from_hex(hex: &str) -> Result<Self, AppError> {
        let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
        // Exactly 6 hex digits; anything else (including multibyte characters
        // and the signs from_str_radix would tolerate) is malformed
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AppError::MalformedColor(hex.to_string()));
        }
        let parse = |range| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| AppError::MalformedColor(hex.to_string()))
        };
        Ok(Self {
            r: parse(0..2)?,
            g: parse(2..4)?,
            b: parse(4..6)?,
        })
    }

    /// Serialize to canonical lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to CIELAB
    pub fn to_lab(self) -> Lab {
        Lab::from_rgb(self.r, self.g, self.b)
    }

    /// Convert to LCh (polar CIELAB)
    pub fn to_lch(self) -> Lch {
        self.to_lab().to_lch()
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// CIELAB color (D65 reference white)
#[derive(Debug, Clone, Copy)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    /// Convert sRGB byte to linear
    #[inline]
    fn srgb_to_linear(c: u8) -> f64 {
        let c = f64::from(c) / 255.0;
        if c <= 0.00304 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    /// Convert linear to sRGB byte
    #[inline]
    fn linear_to_srgb(c: f64) -> u8 {
        // The 0.00304 cutoff lives in the encoded domain; its linear-domain
        // image is 0.00304 / 12.92
        let c = if c <= 0.00304 / 12.92 {
            c * 12.92
        } else {
            1.055 * c.powf(1.0 / 2.4) - 0.055
        };
        (c * 255.0).round().clamp(0.0, 255.0) as u8
    }

    /// XYZ-to-Lab axis nonlinearity
    #[inline]
    fn f(t: f64) -> f64 {
        if t > 0.008856 {
            t.cbrt()
        } else {
            7.787037 * t + 4.0 / 29.0
        }
    }

    #[inline]
    fn f_inv(t: f64) -> f64 {
        let cubed = t * t * t;
        if cubed > 0.008856 {
            cubed
        } else {
            (t - 4.0 / 29.0) / 7.787037
        }
    }

    /// Convert from sRGB to CIELAB
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = Self::srgb_to_linear(r);
        let g = Self::srgb_to_linear(g);
        let b = Self::srgb_to_linear(b);

        let x = Self::f((0.4124564 * r + 0.3575761 * g + 0.1804375 * b) / D65_X);
        let y = Self::f((0.2126729 * r + 0.7151522 * g + 0.0721750 * b) / D65_Y);
        let z = Self::f((0.0193339 * r + 0.1191920 * g + 0.9503041 * b) / D65_Z);

        Self {
            l: 116.0 * y - 16.0,
            a: 500.0 * (x - y),
            b: 200.0 * (y - z),
        }
    }

    /// Convert from CIELAB back to sRGB
    pub fn to_rgb(&self) -> Rgb {
        let fy = (self.l + 16.0) / 116.0;
        let fx = fy + self.a / 500.0;
        let fz = fy - self.b / 200.0;

        let x = Self::f_inv(fx) * D65_X;
        let y = Self::f_inv(fy) * D65_Y;
        let z = Self::f_inv(fz) * D65_Z;

        let r = 3.2404542 * x - 1.5371385 * y - 0.4985314 * z;
        let g = -0.9692660 * x + 1.8760108 * y + 0.0415560 * z;
        let b = 0.0556434 * x - 0.2040259 * y + 1.0572252 * z;

        Rgb::new(
            Self::linear_to_srgb(r),
            Self::linear_to_srgb(g),
            Self::linear_to_srgb(b),
        )
    }

    /// Convert to polar form
    pub fn to_lch(&self) -> Lch {
        let c = self.a.hypot(self.b);
        let mut h = self.b.atan2(self.a).to_degrees();
        if h < 0.0 {
            h += 360.0;
        }
        Lch { l: self.l, c, h }
    }
}

/// Polar CIELAB: lightness, chroma magnitude, hue angle in degrees [0, 360)
#[derive(Debug, Clone, Copy)]
pub struct Lch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Lch {
    pub fn to_lab(&self) -> Lab {
        let hr = self.h.to_radians();
        Lab {
            l: self.l,
            a: self.c * hr.cos(),
            b: self.c * hr.sin(),
        }
    }
}
