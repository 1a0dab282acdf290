//! CSS-style color strings as accepted by a 2D canvas context.
//!
//! Supported forms: a subset of named colors, `#rgb`, `#rgba`, `#rrggbb`,
//! `#rrggbbaa`, `rgb(r, g, b)` and `rgba(r, g, b, a)` with `a` in `0..=1`.

/// A straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

const NAMED: &[(&str, Rgba)] = &[
    ("black", Rgba::rgb(0, 0, 0)),
    ("white", Rgba::rgb(255, 255, 255)),
    ("red", Rgba::rgb(255, 0, 0)),
    ("green", Rgba::rgb(0, 128, 0)),
    ("lime", Rgba::rgb(0, 255, 0)),
    ("blue", Rgba::rgb(0, 0, 255)),
    ("yellow", Rgba::rgb(255, 255, 0)),
    ("cyan", Rgba::rgb(0, 255, 255)),
    ("aqua", Rgba::rgb(0, 255, 255)),
    ("magenta", Rgba::rgb(255, 0, 255)),
    ("fuchsia", Rgba::rgb(255, 0, 255)),
    ("gray", Rgba::rgb(128, 128, 128)),
    ("grey", Rgba::rgb(128, 128, 128)),
    ("darkgray", Rgba::rgb(169, 169, 169)),
    ("darkgrey", Rgba::rgb(169, 169, 169)),
    ("lightgray", Rgba::rgb(211, 211, 211)),
    ("lightgrey", Rgba::rgb(211, 211, 211)),
    ("silver", Rgba::rgb(192, 192, 192)),
    ("maroon", Rgba::rgb(128, 0, 0)),
    ("olive", Rgba::rgb(128, 128, 0)),
    ("teal", Rgba::rgb(0, 128, 128)),
    ("navy", Rgba::rgb(0, 0, 128)),
    ("purple", Rgba::rgb(128, 0, 128)),
    ("orange", Rgba::rgb(255, 165, 0)),
    ("pink", Rgba::rgb(255, 192, 203)),
    ("brown", Rgba::rgb(165, 42, 42)),
    ("transparent", Rgba::TRANSPARENT),
];

/// Parse a color string. Returns `None` for anything unrecognized.
pub fn parse(style: &str) -> Option<Rgba> {
    let s = style.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = s.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
        return parse_functional(args, true);
    }
    if let Some(args) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        return parse_functional(args, false);
    }
    NAMED.iter().find(|(name, _)| *name == s).map(|(_, c)| *c)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_functional(args: &str, with_alpha: bool) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        let v: f64 = s.parse().ok()?;
        v.is_finite().then(|| v.round().clamp(0.0, 255.0) as u8)
    };
    let alpha = if with_alpha {
        let a: f64 = parts[3].parse().ok()?;
        if !a.is_finite() {
            return None;
        }
        (a.clamp(0.0, 1.0) * 255.0).round() as u8
    } else {
        255
    };
    Some(Rgba::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, alpha))
}
