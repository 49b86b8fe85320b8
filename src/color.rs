//! Color values shared by the SGR decoder and the OSC color commands
//!
//! Supports:
//! - 24-bit RGB values
//! - The 16 named palette slots (0-15)
//! - X11 color specifications as accepted by `XParseColor`:
//!   `rgb:r/g/b`, `rgbi:r/g/b`, `#rgb` (and 6, 9, 12 digit forms) and
//!   X11 color names

use serde::{Deserialize, Serialize};

/// Palette color index (0-255)
pub type PaletteIndex = u8;

/// 24-bit RGB color value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Split into `(r, g, b)` components
    pub const fn components(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Parse an X11 color specification.
    ///
    /// Returns `None` for anything `XParseColor` would reject.
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if let Some(rest) = spec.strip_prefix("rgbi:") {
            return parse_rgbi(rest);
        }
        if let Some(rest) = spec.strip_prefix("rgb:") {
            return parse_rgb_scaled(rest);
        }
        if let Some(rest) = spec.strip_prefix('#') {
            return parse_hash(rest);
        }
        x11_named(spec)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

/// The 16 named palette slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Named {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    BrightBlack = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

impl Named {
    const ALL: [Named; 16] = [
        Named::Black,
        Named::Red,
        Named::Green,
        Named::Yellow,
        Named::Blue,
        Named::Magenta,
        Named::Cyan,
        Named::White,
        Named::BrightBlack,
        Named::BrightRed,
        Named::BrightGreen,
        Named::BrightYellow,
        Named::BrightBlue,
        Named::BrightMagenta,
        Named::BrightCyan,
        Named::BrightWhite,
    ];

    /// Look up the named slot for a palette index
    pub fn from_index(index: PaletteIndex) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Palette index of this slot
    pub const fn index(self) -> PaletteIndex {
        self as u8
    }
}

/// `rgb:` channels are 1-4 hex digits, scaled to the full 8-bit range.
fn parse_rgb_scaled(rest: &str) -> Option<Rgb> {
    let mut parts = rest.split('/');
    let r = scaled_channel(parts.next()?)?;
    let g = scaled_channel(parts.next()?)?;
    let b = scaled_channel(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some(Rgb::new(r, g, b))
}

fn scaled_channel(digits: &str) -> Option<u8> {
    if digits.is_empty() || digits.len() > 4 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    let max = (1u32 << (4 * digits.len())) - 1;
    u8::try_from((value * 255 + max / 2) / max).ok()
}

/// `rgbi:` channels are floating point intensities in `0.0..=1.0`.
fn parse_rgbi(rest: &str) -> Option<Rgb> {
    let mut parts = rest.split('/');
    let r = intensity_channel(parts.next()?)?;
    let g = intensity_channel(parts.next()?)?;
    let b = intensity_channel(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some(Rgb::new(r, g, b))
}

fn intensity_channel(text: &str) -> Option<u8> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    let value: f64 = text.parse().ok()?;
    if !(0.0..=1.0).contains(&value) {
        return None;
    }
    // Bounded to 0..=255 by the range check above.
    Some((value * 255.0).round() as u8)
}

/// `#` forms carry the most significant bits of each channel, unscaled.
fn parse_hash(rest: &str) -> Option<Rgb> {
    let width = match rest.len() {
        3 | 6 | 9 | 12 => rest.len() / 3,
        _ => return None,
    };
    if !rest.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| -> Option<u8> {
        let value = u16::from_str_radix(&rest[i * width..(i + 1) * width], 16).ok()?;
        let value = match width {
            1 => value << 4,
            2 => value,
            3 => value >> 4,
            _ => value >> 8,
        };
        u8::try_from(value).ok()
    };
    Some(Rgb::new(channel(0)?, channel(1)?, channel(2)?))
}

/// Look up an X11 color name. Matching ignores case and spaces.
fn x11_named(name: &str) -> Option<Rgb> {
    if name.is_empty() || name.len() > 32 {
        return None;
    }
    let normalized: String = name
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if let Some(level) = normalized
        .strip_prefix("gray")
        .or_else(|| normalized.strip_prefix("grey"))
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
    {
        let level: u32 = level.parse().ok()?;
        if level > 100 {
            return None;
        }
        let v = u8::try_from((level * 255 + 50) / 100).ok()?;
        return Some(Rgb::new(v, v, v));
    }

    X11_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == normalized)
        .map(|(_, (r, g, b))| Rgb::new(*r, *g, *b))
}

/// X11 `rgb.txt` entries (space-free spellings)
const X11_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("aliceblue", (240, 248, 255)),
    ("antiquewhite", (250, 235, 215)),
    ("aqua", (0, 255, 255)),
    ("aquamarine", (127, 255, 212)),
    ("azure", (240, 255, 255)),
    ("beige", (245, 245, 220)),
    ("bisque", (255, 228, 196)),
    ("black", (0, 0, 0)),
    ("blanchedalmond", (255, 235, 205)),
    ("blue", (0, 0, 255)),
    ("blueviolet", (138, 43, 226)),
    ("brown", (165, 42, 42)),
    ("burlywood", (222, 184, 135)),
    ("cadetblue", (95, 158, 160)),
    ("chartreuse", (127, 255, 0)),
    ("chocolate", (210, 105, 30)),
    ("coral", (255, 127, 80)),
    ("cornflowerblue", (100, 149, 237)),
    ("cornsilk", (255, 248, 220)),
    ("crimson", (220, 20, 60)),
    ("cyan", (0, 255, 255)),
    ("darkblue", (0, 0, 139)),
    ("darkcyan", (0, 139, 139)),
    ("darkgoldenrod", (184, 134, 11)),
    ("darkgray", (169, 169, 169)),
    ("darkgreen", (0, 100, 0)),
    ("darkgrey", (169, 169, 169)),
    ("darkkhaki", (189, 183, 107)),
    ("darkmagenta", (139, 0, 139)),
    ("darkolivegreen", (85, 107, 47)),
    ("darkorange", (255, 140, 0)),
    ("darkorchid", (153, 50, 204)),
    ("darkred", (139, 0, 0)),
    ("darksalmon", (233, 150, 122)),
    ("darkseagreen", (143, 188, 143)),
    ("darkslateblue", (72, 61, 139)),
    ("darkslategray", (47, 79, 79)),
    ("darkslategrey", (47, 79, 79)),
    ("darkturquoise", (0, 206, 209)),
    ("darkviolet", (148, 0, 211)),
    ("deeppink", (255, 20, 147)),
    ("deepskyblue", (0, 191, 255)),
    ("dimgray", (105, 105, 105)),
    ("dimgrey", (105, 105, 105)),
    ("dodgerblue", (30, 144, 255)),
    ("firebrick", (178, 34, 34)),
    ("floralwhite", (255, 250, 240)),
    ("forestgreen", (34, 139, 34)),
    ("fuchsia", (255, 0, 255)),
    ("gainsboro", (220, 220, 220)),
    ("ghostwhite", (248, 248, 255)),
    ("gold", (255, 215, 0)),
    ("goldenrod", (218, 165, 32)),
    ("gray", (190, 190, 190)),
    ("green", (0, 255, 0)),
    ("greenyellow", (173, 255, 47)),
    ("grey", (190, 190, 190)),
    ("honeydew", (240, 255, 240)),
    ("hotpink", (255, 105, 180)),
    ("indianred", (205, 92, 92)),
    ("indigo", (75, 0, 130)),
    ("ivory", (255, 255, 240)),
    ("khaki", (240, 230, 140)),
    ("lavender", (230, 230, 250)),
    ("lavenderblush", (255, 240, 245)),
    ("lawngreen", (124, 252, 0)),
    ("lemonchiffon", (255, 250, 205)),
    ("lightblue", (173, 216, 230)),
    ("lightcoral", (240, 128, 128)),
    ("lightcyan", (224, 255, 255)),
    ("lightgoldenrod", (238, 221, 130)),
    ("lightgoldenrodyellow", (250, 250, 210)),
    ("lightgray", (211, 211, 211)),
    ("lightgreen", (144, 238, 144)),
    ("lightgrey", (211, 211, 211)),
    ("lightpink", (255, 182, 193)),
    ("lightsalmon", (255, 160, 122)),
    ("lightseagreen", (32, 178, 170)),
    ("lightskyblue", (135, 206, 250)),
    ("lightslateblue", (132, 112, 255)),
    ("lightslategray", (119, 136, 153)),
    ("lightslategrey", (119, 136, 153)),
    ("lightsteelblue", (176, 196, 222)),
    ("lightyellow", (255, 255, 224)),
    ("lime", (0, 255, 0)),
    ("limegreen", (50, 205, 50)),
    ("linen", (250, 240, 230)),
    ("magenta", (255, 0, 255)),
    ("maroon", (176, 48, 96)),
    ("mediumaquamarine", (102, 205, 170)),
    ("mediumblue", (0, 0, 205)),
    ("mediumorchid", (186, 85, 211)),
    ("mediumpurple", (147, 112, 219)),
    ("mediumseagreen", (60, 179, 113)),
    ("mediumslateblue", (123, 104, 238)),
    ("mediumspringgreen", (0, 250, 154)),
    ("mediumturquoise", (72, 209, 204)),
    ("mediumvioletred", (199, 21, 133)),
    ("midnightblue", (25, 25, 112)),
    ("mintcream", (245, 255, 250)),
    ("mistyrose", (255, 228, 225)),
    ("moccasin", (255, 228, 181)),
    ("navajowhite", (255, 222, 173)),
    ("navy", (0, 0, 128)),
    ("navyblue", (0, 0, 128)),
    ("oldlace", (253, 245, 230)),
    ("olive", (128, 128, 0)),
    ("olivedrab", (107, 142, 35)),
    ("orange", (255, 165, 0)),
    ("orangered", (255, 69, 0)),
    ("orchid", (218, 112, 214)),
    ("palegoldenrod", (238, 232, 170)),
    ("palegreen", (152, 251, 152)),
    ("paleturquoise", (175, 238, 238)),
    ("palevioletred", (219, 112, 147)),
    ("papayawhip", (255, 239, 213)),
    ("peachpuff", (255, 218, 185)),
    ("peru", (205, 133, 63)),
    ("pink", (255, 192, 203)),
    ("plum", (221, 160, 221)),
    ("powderblue", (176, 224, 230)),
    ("purple", (160, 32, 240)),
    ("rebeccapurple", (102, 51, 153)),
    ("red", (255, 0, 0)),
    ("rosybrown", (188, 143, 143)),
    ("royalblue", (65, 105, 225)),
    ("saddlebrown", (139, 69, 19)),
    ("salmon", (250, 128, 114)),
    ("sandybrown", (244, 164, 96)),
    ("seagreen", (46, 139, 87)),
    ("seashell", (255, 245, 238)),
    ("sienna", (160, 82, 45)),
    ("silver", (192, 192, 192)),
    ("skyblue", (135, 206, 235)),
    ("slateblue", (106, 90, 205)),
    ("slategray", (112, 128, 144)),
    ("slategrey", (112, 128, 144)),
    ("snow", (255, 250, 250)),
    ("springgreen", (0, 255, 127)),
    ("steelblue", (70, 130, 180)),
    ("tan", (210, 180, 140)),
    ("teal", (0, 128, 128)),
    ("thistle", (216, 191, 216)),
    ("tomato", (255, 99, 71)),
    ("turquoise", (64, 224, 208)),
    ("violet", (238, 130, 238)),
    ("violetred", (208, 32, 144)),
    ("wheat", (245, 222, 179)),
    ("white", (255, 255, 255)),
    ("whitesmoke", (245, 245, 245)),
    ("yellow", (255, 255, 0)),
    ("yellowgreen", (154, 205, 50)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_components() {
        let color = Rgb::new(255, 128, 64);
        assert_eq!(color.components(), (255, 128, 64));
        assert_eq!(Rgb::from((1, 2, 3)), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_named_indices() {
        assert_eq!(Named::from_index(1), Some(Named::Red));
        assert_eq!(Named::from_index(15), Some(Named::BrightWhite));
        assert_eq!(Named::from_index(16), None);
        assert_eq!(Named::BrightBlack.index(), 8);
    }

    #[test]
    fn test_parse_rgb_scaled() {
        assert_eq!(Rgb::parse("rgb:ff/80/00"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::parse("rgb:f/0/f"), Some(Rgb::new(255, 0, 255)));
        assert_eq!(Rgb::parse("rgb:ffff/0000/8080"), Some(Rgb::new(255, 0, 128)));
        assert_eq!(Rgb::parse("rgb:fff/000/fff"), Some(Rgb::new(255, 0, 255)));
    }

    #[test]
    fn test_parse_rgb_rejects_malformed() {
        assert_eq!(Rgb::parse("rgb:ff/80"), None);
        assert_eq!(Rgb::parse("rgb:ff/80/00/00"), None);
        assert_eq!(Rgb::parse("rgb:fffff/0/0"), None);
        assert_eq!(Rgb::parse("rgb:zz/00/00"), None);
        assert_eq!(Rgb::parse("rgb://"), None);
        assert_eq!(Rgb::parse("rgb:+f/0/0"), None);
        assert_eq!(Rgb::parse("rgb:f/-0/0"), None);
    }

    #[test]
    fn test_parse_rgbi() {
        assert_eq!(Rgb::parse("rgbi:1/0/0.5"), Some(Rgb::new(255, 0, 128)));
        assert_eq!(Rgb::parse("rgbi:1.5/0/0"), None);
        assert_eq!(Rgb::parse("rgbi:+1/0/0"), None);
        assert_eq!(Rgb::parse("rgbi:nan/0/0"), None);
    }

    #[test]
    fn test_parse_hash() {
        assert_eq!(Rgb::parse("#ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::parse("#3a7"), Some(Rgb::new(0x30, 0xa0, 0x70)));
        assert_eq!(Rgb::parse("#fff000fff"), Some(Rgb::new(0xff, 0x00, 0xff)));
        assert_eq!(Rgb::parse("#ffff00008080"), Some(Rgb::new(0xff, 0x00, 0x80)));
        assert_eq!(Rgb::parse("#ff80"), None);
        assert_eq!(Rgb::parse("#gg8000"), None);
    }

    #[test]
    fn test_parse_x11_names() {
        assert_eq!(Rgb::parse("red"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(Rgb::parse("Light Blue"), Some(Rgb::new(173, 216, 230)));
        assert_eq!(Rgb::parse("gray"), Some(Rgb::new(190, 190, 190)));
        assert_eq!(Rgb::parse("grey50"), Some(Rgb::new(128, 128, 128)));
        assert_eq!(Rgb::parse("gray100"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::parse("gray101"), None);
        assert_eq!(Rgb::parse("notacolor"), None);
        assert_eq!(Rgb::parse(""), None);
    }
}
