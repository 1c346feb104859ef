/// 24-bit RGB colors and their string forms
use std::fmt;
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while_m_n},
    character::complete::{alpha1, multispace0},
    combinator::{all_consuming, map_res},
    sequence::{delimited, preceded},
    IResult,
};

use crate::error::SolidError;

/// An opaque RGB color packed as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

/// CSS keywords accepted by [`Color::parse`].
const NAMED: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("white", 0xffffff),
    ("red", 0xff0000),
    ("green", 0x008000),
    ("lime", 0x00ff00),
    ("blue", 0x0000ff),
    ("yellow", 0xffff00),
    ("cyan", 0x00ffff),
    ("magenta", 0xff00ff),
    ("orange", 0xffa500),
    ("purple", 0x800080),
    ("pink", 0xffc0cb),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("silver", 0xc0c0c0),
    ("teal", 0x008080),
    ("navy", 0x000080),
    ("hotpink", 0xff69b4),
    ("turquoise", 0x40e0d0),
];

impl Color {
    pub const WHITE: Color = Color(0xffffff);
    pub const BLACK: Color = Color(0x000000);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn r(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub fn b(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Channels scaled to `[0, 1]`.
    pub fn to_unit_rgb(self) -> [f32; 3] {
        [
            self.r() as f32 / 255.0,
            self.g() as f32 / 255.0,
            self.b() as f32 / 255.0,
        ]
    }

    /// Resolve an optional material color. Only an absent color falls back to
    /// white; `Some(Color::BLACK)` stays black.
    pub fn or_default(color: Option<Color>) -> Color {
        color.unwrap_or(Color::WHITE)
    }

    /// Parse `#rrggbb`, `#rgb`, `0xrrggbb` or a CSS keyword such as `pink`.
    pub fn parse(input: &str) -> Result<Color, SolidError> {
        match all_consuming(delimited(multispace0, color, multispace0))(input) {
            Ok((_, color)) => Ok(color),
            Err(_) => Err(SolidError::InvalidColor(input.to_string())),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color(value & 0xffffff)
    }
}

impl FromStr for Color {
    type Err = SolidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

fn color(input: &str) -> IResult<&str, Color> {
    alt((long_hex, short_hex, named))(input)
}

fn hex_digits(count: usize) -> impl Fn(&str) -> IResult<&str, &str> {
    move |input| take_while_m_n(count, count, |c: char| c.is_ascii_hexdigit())(input)
}

fn long_hex(input: &str) -> IResult<&str, Color> {
    map_res(
        preceded(alt((tag("#"), tag_no_case("0x"))), hex_digits(6)),
        |digits: &str| u32::from_str_radix(digits, 16).map(Color),
    )(input)
}

fn short_hex(input: &str) -> IResult<&str, Color> {
    map_res(preceded(tag("#"), hex_digits(3)), |digits: &str| {
        let value = u32::from_str_radix(digits, 16)?;
        let (r, g, b) = ((value >> 8) & 0xf, (value >> 4) & 0xf, value & 0xf);
        Ok::<_, std::num::ParseIntError>(Color((r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11))
    })(input)
}

fn named(input: &str) -> IResult<&str, Color> {
    map_res(alpha1, |word: &str| {
        NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(word))
            .map(|&(_, value)| Color(value))
            .ok_or(())
    })(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse("#c0aaaa").unwrap(), Color(0xc0aaaa));
        assert_eq!(Color::parse("0x10E3B1").unwrap(), Color(0x10e3b1));
        assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("#1a2").unwrap(), Color(0x11aa22));
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(Color::parse("pink").unwrap(), Color(0xffc0cb));
        assert_eq!(Color::parse(" Black ").unwrap(), Color::BLACK);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Color::parse("#12345"),
            Err(SolidError::InvalidColor(_))
        ));
        assert!(Color::parse("chartreuse-ish").is_err());
        assert!(Color::parse("").is_err());
    }

    #[test]
    fn test_black_is_not_replaced_by_default() {
        assert_eq!(Color::or_default(Some(Color::BLACK)), Color::BLACK);
        assert_eq!(Color::or_default(None), Color::WHITE);
    }

    #[test]
    fn test_channels_and_display() {
        let c = Color::from_rgb(0x12, 0x34, 0x56);
        assert_eq!((c.r(), c.g(), c.b()), (0x12, 0x34, 0x56));
        assert_eq!(c.to_string(), "#123456");
    }
}
