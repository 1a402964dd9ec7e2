//! Typed property values and their text-literal codec.
//!
//! The store keeps every property value as a text literal typed by a tag
//! (`"string"`, `"number"`, `"color"`, `"keyword"`, `"boolean"`). This module
//! is the typed side of that contract: a tagged union with one variant per
//! declared type, plus `winnow` parsers for the number and color literals.
//! Everything downstream of the document codec matches on [`PropertyValue`]
//! exhaustively — there are no untyped bags past this point.

use std::fmt;
use winnow::combinator::{alt, opt};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::take_while;

// ─── Property kinds ──────────────────────────────────────────────────────

/// The declared type of a property — the `type` tag on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Freeform text (widget captions, resource references).
    Str,
    /// A number with an optional display unit ("8dp", "1.5").
    Number,
    /// An RGBA color, hex literal on the wire.
    Color,
    /// One of a set of renderer-known tokens (gravity values, scale types).
    Keyword,
    /// "true" / "false".
    Bool,
}

impl PropertyKind {
    /// The wire tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Str => "string",
            PropertyKind::Number => "number",
            PropertyKind::Color => "color",
            PropertyKind::Keyword => "keyword",
            PropertyKind::Bool => "boolean",
        }
    }

    /// Parse a wire tag. Unknown tags are `None` — the document codec
    /// reports them with node context.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(PropertyKind::Str),
            "number" => Some(PropertyKind::Number),
            "color" => Some(PropertyKind::Color),
            "keyword" => Some(PropertyKind::Keyword),
            "boolean" => Some(PropertyKind::Bool),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Numbers with units ──────────────────────────────────────────────────

/// Display unit suffix on a numeric literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Density-independent pixels.
    Dp,
    /// Scale-independent pixels (text sizes).
    Sp,
    /// Raw pixels.
    Px,
    /// Percent of the parent dimension.
    Percent,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Dp => "dp",
            Unit::Sp => "sp",
            Unit::Px => "px",
            Unit::Percent => "%",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric property value: magnitude plus optional unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    pub value: f64,
    pub unit: Option<Unit>,
}

impl Number {
    pub fn new(value: f64, unit: Option<Unit>) -> Self {
        Self { value, unit }
    }

    /// A bare, unitless number.
    pub fn plain(value: f64) -> Self {
        Self { value, unit: None }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Some(unit) => write!(f, "{}{unit}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

// ─── Colors ──────────────────────────────────────────────────────────────

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// RGBA color. Stored as 4 × u8; hex literal on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 | 4 => {
                let r = hex_val(bytes[0])? * 17;
                let g = hex_val(bytes[1])? * 17;
                let b = hex_val(bytes[2])? * 17;
                let a = if bytes.len() == 4 {
                    hex_val(bytes[3])? * 17
                } else {
                    255
                };
                Some(Self::rgba(r, g, b, a))
            }
            6 | 8 => {
                let r = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
                let g = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
                let b = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
                let a = if bytes.len() == 8 {
                    hex_val(bytes[6])? << 4 | hex_val(bytes[7])?
                } else {
                    255
                };
                Some(Self::rgba(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Emit as a hex string, alpha channel only when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ─── Tagged value union ──────────────────────────────────────────────────

/// A property value, tagged by its declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Str(String),
    Number(Number),
    Color(Color),
    Keyword(String),
    Bool(bool),
}

impl PropertyValue {
    /// The declared type of this value.
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Str(_) => PropertyKind::Str,
            PropertyValue::Number(_) => PropertyKind::Number,
            PropertyValue::Color(_) => PropertyKind::Color,
            PropertyValue::Keyword(_) => PropertyKind::Keyword,
            PropertyValue::Bool(_) => PropertyKind::Bool,
        }
    }

    /// Parse a wire text literal under a declared kind.
    ///
    /// String values pass through verbatim (the empty string is a valid
    /// caption); everything else must parse completely.
    pub fn parse(kind: PropertyKind, literal: &str) -> Result<Self, String> {
        match kind {
            PropertyKind::Str => Ok(PropertyValue::Str(literal.to_string())),
            PropertyKind::Number => parse_number_literal
                .parse(literal)
                .map(PropertyValue::Number)
                .map_err(|_| format!("not a number literal: {literal:?}")),
            PropertyKind::Color => parse_color_literal
                .parse(literal)
                .map(PropertyValue::Color)
                .map_err(|_| format!("not a color literal: {literal:?}")),
            PropertyKind::Keyword => {
                let token = literal.trim();
                if token.is_empty() || token.chars().any(char::is_whitespace) {
                    Err(format!("not a keyword token: {literal:?}"))
                } else {
                    Ok(PropertyValue::Keyword(token.to_string()))
                }
            }
            PropertyKind::Bool => match literal {
                "true" => Ok(PropertyValue::Bool(true)),
                "false" => Ok(PropertyValue::Bool(false)),
                _ => Err(format!("not a boolean literal: {literal:?}")),
            },
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Str(s) => f.write_str(s),
            PropertyValue::Number(n) => write!(f, "{n}"),
            PropertyValue::Color(c) => write!(f, "{c}"),
            PropertyValue::Keyword(k) => f.write_str(k),
            PropertyValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

// ─── Literal parsers ─────────────────────────────────────────────────────

fn parse_f64(input: &mut &str) -> ModalResult<f64> {
    let start = *input;
    if input.starts_with('-') {
        *input = &input[1..];
    }
    let _ = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    if input.starts_with('.') {
        *input = &input[1..];
        let _ =
            take_while::<_, _, winnow::error::ErrMode<ContextError>>(1.., |c: char| c.is_ascii_digit())
                .parse_next(input)?;
    }
    let matched = &start[..start.len() - input.len()];
    // A long enough digit string parses to infinity; only finite values are
    // representable on the wire.
    matched
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| winnow::error::ErrMode::Backtrack(ContextError::new()))
}

fn parse_unit(input: &mut &str) -> ModalResult<Unit> {
    alt((
        "dp".value(Unit::Dp),
        "sp".value(Unit::Sp),
        "px".value(Unit::Px),
        "%".value(Unit::Percent),
    ))
    .parse_next(input)
}

fn parse_number_literal(input: &mut &str) -> ModalResult<Number> {
    let value = parse_f64.parse_next(input)?;
    let unit = opt(parse_unit).parse_next(input)?;
    Ok(Number { value, unit })
}

fn parse_color_literal(input: &mut &str) -> ModalResult<Color> {
    let _ = '#'.parse_next(input)?;
    let hex_digits: &str = take_while(3..=8, |c: char| c.is_ascii_hexdigit()).parse_next(input)?;
    Color::from_hex(hex_digits).ok_or_else(|| winnow::error::ErrMode::Backtrack(ContextError::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn number_literal_with_unit() {
        let v = PropertyValue::parse(PropertyKind::Number, "8dp").unwrap();
        assert_eq!(
            v,
            PropertyValue::Number(Number::new(8.0, Some(Unit::Dp)))
        );
        assert_eq!(v.to_string(), "8dp");
    }

    #[test]
    fn number_literal_bare_and_negative() {
        let v = PropertyValue::parse(PropertyKind::Number, "-1.5").unwrap();
        assert_eq!(v, PropertyValue::Number(Number::plain(-1.5)));
        assert_eq!(v.to_string(), "-1.5");
    }

    #[test]
    fn number_literal_rejects_trailing_garbage() {
        assert!(PropertyValue::parse(PropertyKind::Number, "8dpx").is_err());
        assert!(PropertyValue::parse(PropertyKind::Number, "abc").is_err());
    }

    #[test]
    fn number_literal_rejects_overflow_to_infinity() {
        let huge = "9".repeat(400);
        assert!(PropertyValue::parse(PropertyKind::Number, &huge).is_err());
    }

    #[test]
    fn color_hex_roundtrip() {
        let v = PropertyValue::parse(PropertyKind::Color, "#6C5CE7").unwrap();
        assert_eq!(v.to_string(), "#6C5CE7");

        let v = PropertyValue::parse(PropertyKind::Color, "#FF000080").unwrap();
        assert_eq!(
            v,
            PropertyValue::Color(Color::rgba(255, 0, 0, 128))
        );
        assert_eq!(v.to_string(), "#FF000080");
    }

    #[test]
    fn short_hex_expands() {
        let v = PropertyValue::parse(PropertyKind::Color, "#FFF").unwrap();
        assert_eq!(v, PropertyValue::Color(Color::rgba(255, 255, 255, 255)));
    }

    #[test]
    fn boolean_literal() {
        assert_eq!(
            PropertyValue::parse(PropertyKind::Bool, "true").unwrap(),
            PropertyValue::Bool(true)
        );
        assert!(PropertyValue::parse(PropertyKind::Bool, "yes").is_err());
    }

    #[test]
    fn keyword_rejects_whitespace() {
        assert!(PropertyValue::parse(PropertyKind::Keyword, "center vertical").is_err());
        assert_eq!(
            PropertyValue::parse(PropertyKind::Keyword, "center").unwrap(),
            PropertyValue::Keyword("center".to_string())
        );
    }

    #[test]
    fn string_passes_through_verbatim() {
        let v = PropertyValue::parse(PropertyKind::Str, "").unwrap();
        assert_eq!(v, PropertyValue::Str(String::new()));
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            PropertyValue::Keyword("top".into()).kind(),
            PropertyKind::Keyword
        );
        assert_eq!(PropertyKind::from_tag("boolean"), Some(PropertyKind::Bool));
        assert_eq!(PropertyKind::from_tag("float"), None);
    }
}
