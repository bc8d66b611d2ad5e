//! Color tokens.
//!
//! The interval engine never computes with colors: a [`ColorValue`]
//! is compared by its token only, so `"white"` and `"#ffffff"` are two
//! different colors as far as a [`Partition`](crate::Partition) is
//! concerned.  An RGB view is offered for renderers that need one.

use std::{collections::HashMap, fmt};
use lazy_static::lazy_static;
use rgb::RGB8;
use serde::{Deserialize, Serialize};

/// Background used by a fresh session and restored by a reset.
pub const DEFAULT_BACKGROUND: &str = "white";

/// Backgrounds offered to the user by default.
pub const BACKGROUND_CHOICES: [&str; 5] =
    ["white", "black", "gray", "lightblue", "lightgreen"];

lazy_static! {
    /// CSS names understood by [`ColorValue::to_rgb8`].
    static ref NAMED: HashMap<&'static str, RGB8> = {
        let mut m = HashMap::new();
        for &(name, r, g, b) in &[
            ("black", 0, 0, 0),
            ("white", 255, 255, 255),
            ("gray", 128, 128, 128),
            ("grey", 128, 128, 128),
            ("lightgray", 211, 211, 211),
            ("darkgray", 169, 169, 169),
            ("red", 255, 0, 0),
            ("darkred", 139, 0, 0),
            ("green", 0, 128, 0),
            ("lightgreen", 144, 238, 144),
            ("darkgreen", 0, 100, 0),
            ("lime", 0, 255, 0),
            ("blue", 0, 0, 255),
            ("lightblue", 173, 216, 230),
            ("darkblue", 0, 0, 139),
            ("navy", 0, 0, 128),
            ("cyan", 0, 255, 255),
            ("magenta", 255, 0, 255),
            ("yellow", 255, 255, 0),
            ("orange", 255, 165, 0),
            ("purple", 128, 0, 128),
            ("pink", 255, 192, 203),
            ("brown", 165, 42, 42),
        ] {
            m.insert(name, RGB8 { r, g, b });
        }
        m
    };
}

/// An opaque color token such as `"red"`, `"#ff8800"` or
/// `"rgb(255, 136, 0)"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorValue(String);

impl ColorValue {
    pub fn new(token: impl Into<String>) -> Self { ColorValue(token.into()) }

    pub fn as_str(&self) -> &str { &self.0 }

    /// The default background token.
    pub fn background() -> Self { ColorValue::new(DEFAULT_BACKGROUND) }

    /// Return the RGB components of the color if the token is a known
    /// CSS name, a `#rgb`/`#rrggbb` hex code or `rgb(r, g, b)`.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use colormap_intervals::ColorValue;
    /// let c = ColorValue::new("rgb(67, 147, 195)");
    /// assert_eq!(c.to_rgb8(), Some(RGB8::new(67, 147, 195)));
    /// ```
    pub fn to_rgb8(&self) -> Option<RGB8> {
        let s = self.0.trim();
        if let Some(hex) = s.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(args) = s.strip_prefix("rgb(")
            .and_then(|s| s.strip_suffix(')')) {
            parse_rgb_args(args)
        } else {
            NAMED.get(s.to_ascii_lowercase().as_str()).copied()
        }
    }

    /// Rewrite `rgb(r, g, b)` tokens as `#rrggbb`.  Other tokens are
    /// returned unchanged.
    pub fn to_hex(&self) -> ColorValue {
        if !self.0.trim_start().starts_with("rgb(") { return self.clone() }
        match self.to_rgb8() {
            Some(c) => ColorValue(css_string(c)),
            None => self.clone(),
        }
    }
}

fn css_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn parse_hex(hex: &str) -> Option<RGB8> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i ..= i)?, 16).ok();
    match hex.len() {
        3 => {
            let (r, g, b) = (digit(0)?, digit(1)?, digit(2)?);
            Some(RGB8 { r: r * 17, g: g * 17, b: b * 17 })
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(hex.get(i .. i + 2)?, 16)
                .ok();
            Some(RGB8 { r: byte(0)?, g: byte(2)?, b: byte(4)? })
        }
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<RGB8> {
    let mut c = [0u8; 3];
    let mut parts = args.split(',');
    for x in c.iter_mut() {
        *x = parts.next()?.trim().parse().ok()?;
    }
    if parts.next().is_some() { return None }
    Some(RGB8 { r: c[0], g: c[1], b: c[2] })
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColorValue {
    fn from(s: &str) -> Self { ColorValue::new(s) }
}

impl From<String> for ColorValue {
    fn from(s: String) -> Self { ColorValue(s) }
}

impl From<RGB8> for ColorValue {
    fn from(c: RGB8) -> Self { ColorValue(css_string(c)) }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_of_tokens() {
        assert_eq!(ColorValue::new("Red").to_rgb8(), Some(RGB8::new(255, 0, 0)));
        assert_eq!(ColorValue::new("#0a0B0c").to_rgb8(),
                   Some(RGB8::new(10, 11, 12)));
        assert_eq!(ColorValue::new("#fff").to_rgb8(),
                   Some(RGB8::new(255, 255, 255)));
        assert_eq!(ColorValue::new("rgb(1,2, 3)").to_rgb8(),
                   Some(RGB8::new(1, 2, 3)));
        assert_eq!(ColorValue::new("rgb(1,2,3,4)").to_rgb8(), None);
        assert_eq!(ColorValue::new("rgb(300,2,3)").to_rgb8(), None);
        assert_eq!(ColorValue::new("#12345").to_rgb8(), None);
        assert_eq!(ColorValue::new("chartreuse-ish").to_rgb8(), None);
    }

    #[test]
    fn hex_conversion() {
        assert_eq!(ColorValue::new("rgb(67,147,195)").to_hex(),
                   ColorValue::new("#4393c3"));
        assert_eq!(ColorValue::new("white").to_hex(), ColorValue::new("white"));
        assert_eq!(ColorValue::from(RGB8::new(0, 0, 0)).as_str(), "#000000");
    }

    #[test]
    fn tokens_are_not_equated_by_appearance() {
        assert_ne!(ColorValue::new("white"), ColorValue::new("#ffffff"));
    }

    #[test]
    fn background_choices_are_known() {
        for c in BACKGROUND_CHOICES {
            assert!(ColorValue::new(c).to_rgb8().is_some(), "{c}");
        }
    }
}
