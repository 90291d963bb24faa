//! RGB color primitives with d3-color semantics.
//!
//! Channels are kept as unclamped `f64` in `0..=255` space so that chained operations
//! (`brighter` followed by interpolation) only clamp once, on output.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DARKER: f64 = 0.7;
const BRIGHTER: f64 = 1.0 / DARKER;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn parse(s: &str) -> Result<Self> {
        parse_hex(s)
            .or_else(|| parse_rgb_fn(s))
            .ok_or_else(|| Error::InvalidColor {
                value: s.to_string(),
            })
    }

    /// `d3.rgb(c).brighter(k)`: scales every channel by `(1 / 0.7)^k`.
    pub fn brighter(self, k: f64) -> Self {
        let f = BRIGHTER.powf(k);
        Self::new(self.r * f, self.g * f, self.b * f)
    }

    /// Channel-wise linear interpolation (`d3.interpolateRgb` with gamma 1).
    pub fn interpolate(self, other: Rgb, t: f64) -> Self {
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        Self::new(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// Channels clamped to `0..=255` and rounded, as emitted.
    pub fn to_u8(self) -> [u8; 3] {
        fn channel(v: f64) -> u8 {
            if !v.is_finite() {
                return 0;
            }
            v.round().clamp(0.0, 255.0) as u8
        }
        [channel(self.r), channel(self.g), channel(self.b)]
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_hex(s: &str) -> Option<Rgb> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let (r, g, b) = match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            (r, g, b)
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            (r, g, b)
        }
        _ => return None,
    };
    Some(Rgb::new(r as f64, g as f64, b as f64))
}

fn parse_rgb_fn(s: &str) -> Option<Rgb> {
    let inner = s
        .trim()
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))?;
    let mut parts = inner.split(',').map(|p| p.trim().parse::<f64>().ok());
    let r = parts.next()??;
    let g = parts.next()??;
    let b = parts.next()??;
    if parts.next().is_some() {
        return None;
    }
    let c = Rgb::new(r, g, b);
    c.is_finite().then_some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Rgb::parse("#ccc").unwrap(), Rgb::new(204.0, 204.0, 204.0));
        assert_eq!(
            Rgb::parse("#946dde").unwrap(),
            Rgb::new(148.0, 109.0, 222.0)
        );
        assert_eq!(
            Rgb::parse("rgb(1, 2, 3)").unwrap(),
            Rgb::new(1.0, 2.0, 3.0)
        );
        assert!(Rgb::parse("946dde").is_err());
        assert!(Rgb::parse("#94").is_err());
    }

    #[test]
    fn brighter_matches_d3_and_clamps_on_output() {
        // d3.rgb("#946dde").brighter(1.5) => rgb(253, 186, 379) before clamping.
        let c = Rgb::parse("#946dde").unwrap().brighter(1.5);
        assert!((c.r - 252.7).abs() < 0.1, "{c:?}");
        assert!(c.b > 255.0);
        assert_eq!(c.to_hex(), "#fdbaff");
    }

    #[test]
    fn interpolation_uses_unclamped_channels() {
        let base = Rgb::parse("#946dde").unwrap();
        let hi = base.brighter(1.5);
        let mid = base.interpolate(hi, 0.5);
        assert!((mid.b - (222.0 + hi.b) / 2.0).abs() < 1e-9);
        assert_eq!(base.interpolate(hi, 0.0).to_hex(), "#946dde");
    }
}
