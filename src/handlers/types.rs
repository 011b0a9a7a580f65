use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::SplitWhitespace;
use thiserror::Error;

/// Unconsumed part of a special command, handed to the owning handler
///
/// Keeps the full command text together with the offset right after the
/// routing prefix, so handlers can read their arguments and still report
/// positions relative to the original special.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remainder<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> Remainder<'a> {
    /// Returns `None` if `offset` is out of bounds or not on a char boundary
    pub fn new(source: &'a str, offset: usize) -> Option<Self> {
        source.get(offset..).map(|_| Self { source, offset })
    }

    pub(crate) fn at(source: &'a str, offset: usize) -> Self {
        debug_assert!(source.is_char_boundary(offset));
        Self { source, offset }
    }

    pub fn as_str(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// Full command text the remainder was cut from
    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_blank(&self) -> bool {
        self.as_str().trim().is_empty()
    }

    pub fn words(&self) -> SplitWhitespace<'a> {
        self.as_str().split_whitespace()
    }
}

impl fmt::Display for Remainder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the handler listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("empty color specification")]
    Empty,
    #[error("unknown color '{0}'")]
    UnknownColor(String),
    #[error("color model '{model}' expects {expected} components, got {found}")]
    ComponentCount {
        model: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("invalid color component '{0}'")]
    InvalidNumber(String),
    #[error("color component {0} out of range [0,1]")]
    OutOfRange(f64),
}

/// RGB color with components in [0,1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

const NAMED_COLORS: &[(&str, [f64; 3])] = &[
    ("black", [0.0, 0.0, 0.0]),
    ("white", [1.0, 1.0, 1.0]),
    ("red", [1.0, 0.0, 0.0]),
    ("green", [0.0, 1.0, 0.0]),
    ("blue", [0.0, 0.0, 1.0]),
    ("cyan", [0.0, 1.0, 1.0]),
    ("magenta", [1.0, 0.0, 1.0]),
    ("yellow", [1.0, 1.0, 0.0]),
    ("gray", [0.5, 0.5, 0.5]),
    ("orange", [1.0, 0.39, 0.13]),
    ("brown", [0.4, 0.0, 0.0]),
];

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn gray(v: f64) -> Self {
        Self::rgb(v, v, v)
    }

    pub fn cmyk(c: f64, m: f64, y: f64, k: f64) -> Self {
        Self::rgb(
            1.0 - (c + k).min(1.0),
            1.0 - (m + k).min(1.0),
            1.0 - (y + k).min(1.0),
        )
    }

    pub fn hsb(h: f64, s: f64, v: f64) -> Self {
        if s == 0.0 {
            return Self::gray(v);
        }
        let h = if h >= 1.0 { 0.0 } else { h * 6.0 };
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match sector as u8 {
            0 => Self::rgb(v, t, p),
            1 => Self::rgb(q, v, p),
            2 => Self::rgb(p, v, t),
            3 => Self::rgb(p, q, v),
            4 => Self::rgb(t, p, v),
            _ => Self::rgb(v, p, q),
        }
    }

    pub fn named(name: &str) -> Option<Self> {
        NAMED_COLORS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, [r, g, b])| Self::rgb(*r, *g, *b))
    }

    /// Parse a dvips style color specification
    ///
    /// Accepts `rgb r g b`, `cmyk c m y k`, `gray g`, `hsb h s b` or a
    /// color name. The model keyword is case-insensitive.
    pub fn parse(spec: &str) -> Result<Self, ColorError> {
        let mut words = spec.split_whitespace();
        let head = words.next().ok_or(ColorError::Empty)?;
        let args: Vec<&str> = words.collect();

        let model = head.to_ascii_lowercase();
        let (model, expected): (&'static str, usize) = match model.as_str() {
            "rgb" => ("rgb", 3),
            "cmyk" => ("cmyk", 4),
            "gray" if !args.is_empty() => ("gray", 1),
            "hsb" => ("hsb", 3),
            _ => {
                if !args.is_empty() {
                    return Err(ColorError::UnknownColor(spec.trim().to_string()));
                }
                return Self::named(head).ok_or_else(|| ColorError::UnknownColor(head.to_string()));
            }
        };

        if args.len() != expected {
            return Err(ColorError::ComponentCount {
                model,
                expected,
                found: args.len(),
            });
        }
        let v = args
            .iter()
            .map(|s| parse_component(s))
            .collect::<Result<Vec<f64>, ColorError>>()?;

        Ok(match model {
            "rgb" => Self::rgb(v[0], v[1], v[2]),
            "cmyk" => Self::cmyk(v[0], v[1], v[2], v[3]),
            "gray" => Self::gray(v[0]),
            _ => Self::hsb(v[0], v[1], v[2]),
        })
    }

    pub fn to_hex(&self) -> String {
        let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn parse_component(s: &str) -> Result<f64, ColorError> {
    let value: f64 = s
        .parse()
        .map_err(|_| ColorError::InvalidNumber(s.to_string()))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ColorError::OutOfRange(value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remainder_views_tail_of_source() {
        let rem = Remainder::new("color red", 5).unwrap();
        assert_eq!(rem.as_str(), " red");
        assert_eq!(rem.source(), "color red");
        assert_eq!(rem.offset(), 5);
        assert_eq!(rem.words().collect::<Vec<_>>(), vec!["red"]);
        assert!(!rem.is_blank());
    }

    #[test]
    fn test_remainder_rejects_bad_offset() {
        assert!(Remainder::new("abc", 4).is_none());
        assert!(Remainder::new("é", 1).is_none());
        assert!(Remainder::new("abc", 3).unwrap().is_blank());
    }

    #[test]
    fn test_parse_color_models() {
        assert_eq!(Color::parse("rgb 1 0 0").unwrap(), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(Color::parse("gray 0").unwrap(), Color::BLACK);
        assert_eq!(Color::parse("cmyk 0 0 0 1").unwrap(), Color::BLACK);
        assert_eq!(Color::parse("cmyk 1 0 0 0").unwrap(), Color::rgb(0.0, 1.0, 1.0));
        assert_eq!(Color::parse("hsb 0 1 1").unwrap(), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(Color::parse("RGB 0 0 1").unwrap().to_hex(), "#0000ff");
    }

    #[test]
    fn test_parse_named_color() {
        assert_eq!(Color::parse("Red").unwrap(), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(Color::parse("  gray ").unwrap(), Color::gray(0.5));
        assert!(matches!(
            Color::parse("Chartreuse"),
            Err(ColorError::UnknownColor(_))
        ));
    }

    #[test]
    fn test_parse_color_errors() {
        assert_eq!(Color::parse("   "), Err(ColorError::Empty));
        assert!(matches!(
            Color::parse("rgb 1 0"),
            Err(ColorError::ComponentCount { model: "rgb", expected: 3, found: 2 })
        ));
        assert!(matches!(
            Color::parse("gray x"),
            Err(ColorError::InvalidNumber(_))
        ));
        assert!(matches!(
            Color::parse("gray 1.5"),
            Err(ColorError::OutOfRange(_))
        ));
    }
}
