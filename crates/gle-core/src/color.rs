//! RGBA colors and CSS color text.
//!
//! Property grids edit control colors as CSS strings (`"#336699"`,
//! `"rebeccapurple"`, `"rgb(10 20 30 / 50%)"`). This module turns any of
//! those into a typed [`Color`] and back into canonical `#RRGGBB` text.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Why a CSS color string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("invalid hex color `{0}`")]
    InvalidHex(String),
    #[error("unknown color name `{0}`")]
    UnknownName(String),
    #[error("malformed color function `{0}`")]
    InvalidFunction(String),
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 0–255 channel values.
    pub fn from_ints(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    fn from_packed_rgb(rgb: u32) -> Self {
        Self::from_ints((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 | 4 => {
                let mut ch = [15u8; 4];
                for (slot, byte) in ch.iter_mut().zip(bytes) {
                    *slot = hex_val(*byte)?;
                }
                Some(Self::rgba(
                    (ch[0] * 17) as f32 / 255.0,
                    (ch[1] * 17) as f32 / 255.0,
                    (ch[2] * 17) as f32 / 255.0,
                    (ch[3] * 17) as f32 / 255.0,
                ))
            }
            6 | 8 => {
                let mut ch = [255u8; 4];
                for (slot, pair) in ch.iter_mut().zip(bytes.chunks(2)) {
                    *slot = hex_val(pair[0])? << 4 | hex_val(pair[1])?;
                }
                Some(Self::rgba(
                    ch[0] as f32 / 255.0,
                    ch[1] as f32 / 255.0,
                    ch[2] as f32 / 255.0,
                    ch[3] as f32 / 255.0,
                ))
            }
            _ => None,
        }
    }

    /// 0–255 channel values, rounded.
    pub fn to_ints(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Emit as shortest valid hex string (`#RRGGBB`, or `#RRGGBBAA` when translucent).
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_ints();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// Always `#RRGGBB`, alpha dropped. This is what property grids write back.
    pub fn to_hex_rgb(&self) -> String {
        let [r, g, b, _] = self.to_ints();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Parse any CSS color value: hex, named colors, `rgb()`/`rgba()`,
    /// `hsl()`/`hsla()`. An empty string and `transparent` are transparent black.
    pub fn parse_css(text: &str) -> Result<Self, ColorParseError> {
        let trimmed = text.trim();
        let lower = trimmed.to_ascii_lowercase();

        if lower.is_empty() || lower == "transparent" {
            return Ok(Self::TRANSPARENT);
        }
        if lower.starts_with('#') {
            return Self::from_hex(&lower)
                .ok_or_else(|| ColorParseError::InvalidHex(trimmed.into()));
        }
        if lower.contains('(') {
            let mut rest = lower.as_str();
            return match parse_color_function.parse_next(&mut rest) {
                Ok(color) if rest.trim().is_empty() => Ok(color),
                _ => Err(ColorParseError::InvalidFunction(trimmed.into())),
            };
        }
        named_color(&lower)
            .map(Self::from_packed_rgb)
            .ok_or_else(|| ColorParseError::UnknownName(trimmed.into()))
    }
}

// ─── CSS color functions ──────────────────────────────────────────────────

/// A numeric argument inside `rgb(...)` / `hsl(...)`.
#[derive(Debug, Clone, Copy)]
enum Arg {
    Number(f64),
    Percent(f64),
    /// Hue with an explicit unit, already converted to degrees.
    Degrees(f64),
}

impl Arg {
    /// Resolve an `rgb()` channel to 0.0..=1.0.
    fn rgb_channel(self) -> f64 {
        match self {
            Arg::Number(v) | Arg::Degrees(v) => v / 255.0,
            Arg::Percent(p) => p / 100.0,
        }
        .clamp(0.0, 1.0)
    }

    /// Resolve an alpha value to 0.0..=1.0.
    fn alpha(self) -> f64 {
        match self {
            Arg::Number(v) | Arg::Degrees(v) => v,
            Arg::Percent(p) => p / 100.0,
        }
        .clamp(0.0, 1.0)
    }

    /// Saturation / lightness as a 0.0..=1.0 fraction.
    fn fraction(self) -> f64 {
        match self {
            Arg::Percent(p) => p / 100.0,
            Arg::Number(v) | Arg::Degrees(v) => v / 100.0,
        }
        .clamp(0.0, 1.0)
    }

    fn hue_degrees(self) -> f64 {
        match self {
            Arg::Number(v) | Arg::Degrees(v) | Arg::Percent(v) => v,
        }
    }
}

fn backtrack() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}

fn skip_space(input: &mut &str) {
    *input = input.trim_start();
}

fn parse_color_function(input: &mut &str) -> ModalResult<Color> {
    let name: &str = take_while(1.., |c: char| c.is_ascii_alphabetic()).parse_next(input)?;
    skip_space(input);
    '('.parse_next(input)?;

    let mut args: Vec<Arg> = Vec::with_capacity(4);
    loop {
        skip_space(input);
        if input.starts_with(')') {
            break;
        }
        // Legacy comma syntax and modern `r g b / a` syntax both accepted.
        if !args.is_empty() && (input.starts_with(',') || input.starts_with('/')) {
            *input = &input[1..];
            skip_space(input);
        }
        args.push(parse_arg.parse_next(input)?);
        if args.len() > 4 {
            return Err(backtrack());
        }
    }
    ')'.parse_next(input)?;

    let alpha = args.get(3).map(|a| a.alpha()).unwrap_or(1.0) as f32;
    match (name, args.len()) {
        ("rgb" | "rgba", 3 | 4) => Ok(Color::rgba(
            args[0].rgb_channel() as f32,
            args[1].rgb_channel() as f32,
            args[2].rgb_channel() as f32,
            alpha,
        )),
        ("hsl" | "hsla", 3 | 4) => {
            let (r, g, b) = hsl_to_rgb(
                args[0].hue_degrees(),
                args[1].fraction(),
                args[2].fraction(),
            );
            Ok(Color::rgba(r as f32, g as f32, b as f32, alpha))
        }
        _ => Err(backtrack()),
    }
}

fn parse_arg(input: &mut &str) -> ModalResult<Arg> {
    let value = parse_number.parse_next(input)?;
    if let Some(rest) = input.strip_prefix('%') {
        *input = rest;
        return Ok(Arg::Percent(value));
    }
    for (unit, to_degrees) in [
        ("deg", 1.0),
        ("grad", 0.9),
        ("rad", 180.0 / std::f64::consts::PI),
        ("turn", 360.0),
    ] {
        if let Some(rest) = input.strip_prefix(unit) {
            *input = rest;
            return Ok(Arg::Degrees(value * to_degrees));
        }
    }
    Ok(Arg::Number(value))
}

fn parse_number(input: &mut &str) -> ModalResult<f64> {
    let start = *input;
    if input.starts_with('-') || input.starts_with('+') {
        *input = &input[1..];
    }
    let int_part: &str =
        take_while(0.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    let mut frac_len = 0;
    if input.starts_with('.') {
        *input = &input[1..];
        let frac: &str = take_while(0.., |c: char| c.is_ascii_digit()).parse_next(input)?;
        frac_len = frac.len();
    }
    if int_part.is_empty() && frac_len == 0 {
        *input = start;
        return Err(backtrack());
    }
    let matched = &start[..start.len() - input.len()];
    matched.parse::<f64>().map_err(|_| backtrack())
}

/// HSL (hue in degrees, s/l in 0..=1) to RGB in 0..=1.
fn hsl_to_rgb(hue: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = hue.rem_euclid(360.0) / 360.0;
    if s == 0.0 {
        return (l, l, l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    (channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

// ─── Named colors ─────────────────────────────────────────────────────────

/// CSS named colors as packed `0xRRGGBB`. Expects lowercase input.
fn named_color(name: &str) -> Option<u32> {
    let rgb = match name {
        "aliceblue" => 0xF0F8FF,
        "antiquewhite" => 0xFAEBD7,
        "aqua" | "cyan" => 0x00FFFF,
        "aquamarine" => 0x7FFFD4,
        "azure" => 0xF0FFFF,
        "beige" => 0xF5F5DC,
        "bisque" => 0xFFE4C4,
        "black" => 0x000000,
        "blanchedalmond" => 0xFFEBCD,
        "blue" => 0x0000FF,
        "blueviolet" => 0x8A2BE2,
        "brown" => 0xA52A2A,
        "burlywood" => 0xDEB887,
        "cadetblue" => 0x5F9EA0,
        "chartreuse" => 0x7FFF00,
        "chocolate" => 0xD2691E,
        "coral" => 0xFF7F50,
        "cornflowerblue" => 0x6495ED,
        "cornsilk" => 0xFFF8DC,
        "crimson" => 0xDC143C,
        "darkblue" => 0x00008B,
        "darkcyan" => 0x008B8B,
        "darkgoldenrod" => 0xB8860B,
        "darkgray" | "darkgrey" => 0xA9A9A9,
        "darkgreen" => 0x006400,
        "darkkhaki" => 0xBDB76B,
        "darkmagenta" => 0x8B008B,
        "darkolivegreen" => 0x556B2F,
        "darkorange" => 0xFF8C00,
        "darkorchid" => 0x9932CC,
        "darkred" => 0x8B0000,
        "darksalmon" => 0xE9967A,
        "darkseagreen" => 0x8FBC8F,
        "darkslateblue" => 0x483D8B,
        "darkslategray" | "darkslategrey" => 0x2F4F4F,
        "darkturquoise" => 0x00CED1,
        "darkviolet" => 0x9400D3,
        "deeppink" => 0xFF1493,
        "deepskyblue" => 0x00BFFF,
        "dimgray" | "dimgrey" => 0x696969,
        "dodgerblue" => 0x1E90FF,
        "firebrick" => 0xB22222,
        "floralwhite" => 0xFFFAF0,
        "forestgreen" => 0x228B22,
        "fuchsia" | "magenta" => 0xFF00FF,
        "gainsboro" => 0xDCDCDC,
        "ghostwhite" => 0xF8F8FF,
        "gold" => 0xFFD700,
        "goldenrod" => 0xDAA520,
        "gray" | "grey" => 0x808080,
        "green" => 0x008000,
        "greenyellow" => 0xADFF2F,
        "honeydew" => 0xF0FFF0,
        "hotpink" => 0xFF69B4,
        "indianred" => 0xCD5C5C,
        "indigo" => 0x4B0082,
        "ivory" => 0xFFFFF0,
        "khaki" => 0xF0E68C,
        "lavender" => 0xE6E6FA,
        "lavenderblush" => 0xFFF0F5,
        "lawngreen" => 0x7CFC00,
        "lemonchiffon" => 0xFFFACD,
        "lightblue" => 0xADD8E6,
        "lightcoral" => 0xF08080,
        "lightcyan" => 0xE0FFFF,
        "lightgoldenrodyellow" => 0xFAFAD2,
        "lightgray" | "lightgrey" => 0xD3D3D3,
        "lightgreen" => 0x90EE90,
        "lightpink" => 0xFFB6C1,
        "lightsalmon" => 0xFFA07A,
        "lightseagreen" => 0x20B2AA,
        "lightskyblue" => 0x87CEFA,
        "lightslategray" | "lightslategrey" => 0x778899,
        "lightsteelblue" => 0xB0C4DE,
        "lightyellow" => 0xFFFFE0,
        "lime" => 0x00FF00,
        "limegreen" => 0x32CD32,
        "linen" => 0xFAF0E6,
        "maroon" => 0x800000,
        "mediumaquamarine" => 0x66CDAA,
        "mediumblue" => 0x0000CD,
        "mediumorchid" => 0xBA55D3,
        "mediumpurple" => 0x9370DB,
        "mediumseagreen" => 0x3CB371,
        "mediumslateblue" => 0x7B68EE,
        "mediumspringgreen" => 0x00FA9A,
        "mediumturquoise" => 0x48D1CC,
        "mediumvioletred" => 0xC71585,
        "midnightblue" => 0x191970,
        "mintcream" => 0xF5FFFA,
        "mistyrose" => 0xFFE4E1,
        "moccasin" => 0xFFE4B5,
        "navajowhite" => 0xFFDEAD,
        "navy" => 0x000080,
        "oldlace" => 0xFDF5E6,
        "olive" => 0x808000,
        "olivedrab" => 0x6B8E23,
        "orange" => 0xFFA500,
        "orangered" => 0xFF4500,
        "orchid" => 0xDA70D6,
        "palegoldenrod" => 0xEEE8AA,
        "palegreen" => 0x98FB98,
        "paleturquoise" => 0xAFEEEE,
        "palevioletred" => 0xDB7093,
        "papayawhip" => 0xFFEFD5,
        "peachpuff" => 0xFFDAB9,
        "peru" => 0xCD853F,
        "pink" => 0xFFC0CB,
        "plum" => 0xDDA0DD,
        "powderblue" => 0xB0E0E6,
        "purple" => 0x800080,
        "rebeccapurple" => 0x663399,
        "red" => 0xFF0000,
        "rosybrown" => 0xBC8F8F,
        "royalblue" => 0x4169E1,
        "saddlebrown" => 0x8B4513,
        "salmon" => 0xFA8072,
        "sandybrown" => 0xF4A460,
        "seagreen" => 0x2E8B57,
        "seashell" => 0xFFF5EE,
        "sienna" => 0xA0522D,
        "silver" => 0xC0C0C0,
        "skyblue" => 0x87CEEB,
        "slateblue" => 0x6A5ACD,
        "slategray" | "slategrey" => 0x708090,
        "snow" => 0xFFFAFA,
        "springgreen" => 0x00FF7F,
        "steelblue" => 0x4682B4,
        "tan" => 0xD2B48C,
        "teal" => 0x008080,
        "thistle" => 0xD8BFD8,
        "tomato" => 0xFF6347,
        "turquoise" => 0x40E0D0,
        "violet" => 0xEE82EE,
        "wheat" => 0xF5DEB3,
        "white" => 0xFFFFFF,
        "whitesmoke" => 0xF5F5F5,
        "yellow" => 0xFFFF00,
        "yellowgreen" => 0x9ACD32,
        _ => return None,
    };
    Some(rgb)
}
