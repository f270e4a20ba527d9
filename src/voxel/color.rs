//! Linear RGBA color used by palettes and impact profiles

use serde::{Deserialize, Serialize};

/// Linear color, channels in [0, 1]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);

    /// Create a color from explicit channels
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from 8-bit channels, rescaled into [0, 1]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Linear interpolation toward `other`
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Quantize to 8-bit channels
    ///
    /// Used as the exact-match key for palette lookup, so colors closer than
    /// one 8-bit step collapse onto one palette entry.
    pub fn quantized(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// Squared distance over the color channels, alpha ignored
    pub fn distance_sq_rgb(self, other: Rgba) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgba::rgb(0.0, 0.5, 1.0);
        let b = Rgba::rgb(1.0, 0.0, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert!(approx_eq(mid.r, 0.5));
        assert!(approx_eq(mid.g, 0.25));
        assert!(approx_eq(mid.b, 0.5));
    }

    #[test]
    fn test_from_rgb8_rescales() {
        let c = Rgba::from_rgb8(255, 128, 0);
        assert!(approx_eq(c.r, 1.0));
        assert!(approx_eq(c.g, 128.0 / 255.0));
        assert!(approx_eq(c.b, 0.0));
        assert!(approx_eq(c.a, 1.0));
    }

    #[test]
    fn test_quantized_key() {
        assert_eq!(Rgba::WHITE.quantized(), [255, 255, 255, 255]);
        assert_eq!(Rgba::rgb(0.0, 0.5, 1.0).quantized(), [0, 128, 255, 255]);
        // Out-of-range channels clamp rather than wrap
        assert_eq!(Rgba::new(1.5, -0.2, 0.0, 1.0).quantized(), [255, 0, 0, 255]);
    }

    #[test]
    fn test_distance_ignores_alpha() {
        let a = Rgba::new(0.2, 0.4, 0.6, 1.0);
        let b = Rgba::new(0.2, 0.4, 0.6, 0.0);
        assert!(approx_eq(a.distance_sq_rgb(b), 0.0));
    }
}
