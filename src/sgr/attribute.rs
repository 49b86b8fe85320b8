//! SGR attribute values

use serde::{Deserialize, Serialize};

use crate::color::{Named, PaletteIndex, Rgb};

/// Underline style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Underline {
    #[default]
    None = 0,
    Single = 1,
    Double = 2,
    Curly = 3,
    Dotted = 4,
    Dashed = 5,
}

impl Underline {
    /// Style selected by the `4:n` sub-parameter. Unrecognized values fall
    /// back to a single underline.
    pub fn from_subparam(value: u16) -> Self {
        match value {
            0 => Underline::None,
            2 => Underline::Double,
            3 => Underline::Curly,
            4 => Underline::Dotted,
            5 => Underline::Dashed,
            _ => Underline::Single,
        }
    }
}

/// A run of parameters that did not match any known grammar.
///
/// `full` holds every parameter of the attempted attribute; `partial` is
/// the prefix that was examined up to and including the parameter where
/// decoding diverged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Unknown<'a> {
    pub(crate) full: &'a [u16],
    pub(crate) partial: &'a [u16],
}

impl<'a> Unknown<'a> {
    pub fn full(&self) -> &'a [u16] {
        self.full
    }

    pub fn partial(&self) -> &'a [u16] {
        self.partial
    }
}

/// A single decoded SGR attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Attribute<'a> {
    /// SGR 0, or an empty parameter list
    Unset,
    Unknown(Unknown<'a>),
    Bold,
    ResetBold,
    Italic,
    ResetItalic,
    Faint,
    Underline(Underline),
    ResetUnderline,
    UnderlineColor(Rgb),
    UnderlineColor256(PaletteIndex),
    ResetUnderlineColor,
    Overline,
    ResetOverline,
    Blink,
    ResetBlink,
    Inverse,
    ResetInverse,
    Invisible,
    ResetInvisible,
    Strikethrough,
    ResetStrikethrough,
    DirectColorFg(Rgb),
    DirectColorBg(Rgb),
    /// SGR 40-47
    Bg8(PaletteIndex),
    /// SGR 30-37
    Fg8(PaletteIndex),
    ResetFg,
    ResetBg,
    /// SGR 100-107, carried as palette index 8-15
    BrightBg8(PaletteIndex),
    /// SGR 90-97, carried as palette index 8-15
    BrightFg8(PaletteIndex),
    Bg256(PaletteIndex),
    Fg256(PaletteIndex),
}

/// Stable numeric identifier for each attribute kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AttributeTag {
    Unset = 0,
    Unknown = 1,
    Bold = 2,
    ResetBold = 3,
    Italic = 4,
    ResetItalic = 5,
    Faint = 6,
    Underline = 7,
    ResetUnderline = 8,
    UnderlineColor = 9,
    UnderlineColor256 = 10,
    ResetUnderlineColor = 11,
    Overline = 12,
    ResetOverline = 13,
    Blink = 14,
    ResetBlink = 15,
    Inverse = 16,
    ResetInverse = 17,
    Invisible = 18,
    ResetInvisible = 19,
    Strikethrough = 20,
    ResetStrikethrough = 21,
    DirectColorFg = 22,
    DirectColorBg = 23,
    Bg8 = 24,
    Fg8 = 25,
    ResetFg = 26,
    ResetBg = 27,
    BrightBg8 = 28,
    BrightFg8 = 29,
    Bg256 = 30,
    Fg256 = 31,
}

impl<'a> Attribute<'a> {
    pub fn tag(&self) -> AttributeTag {
        match self {
            Attribute::Unset => AttributeTag::Unset,
            Attribute::Unknown(_) => AttributeTag::Unknown,
            Attribute::Bold => AttributeTag::Bold,
            Attribute::ResetBold => AttributeTag::ResetBold,
            Attribute::Italic => AttributeTag::Italic,
            Attribute::ResetItalic => AttributeTag::ResetItalic,
            Attribute::Faint => AttributeTag::Faint,
            Attribute::Underline(_) => AttributeTag::Underline,
            Attribute::ResetUnderline => AttributeTag::ResetUnderline,
            Attribute::UnderlineColor(_) => AttributeTag::UnderlineColor,
            Attribute::UnderlineColor256(_) => AttributeTag::UnderlineColor256,
            Attribute::ResetUnderlineColor => AttributeTag::ResetUnderlineColor,
            Attribute::Overline => AttributeTag::Overline,
            Attribute::ResetOverline => AttributeTag::ResetOverline,
            Attribute::Blink => AttributeTag::Blink,
            Attribute::ResetBlink => AttributeTag::ResetBlink,
            Attribute::Inverse => AttributeTag::Inverse,
            Attribute::ResetInverse => AttributeTag::ResetInverse,
            Attribute::Invisible => AttributeTag::Invisible,
            Attribute::ResetInvisible => AttributeTag::ResetInvisible,
            Attribute::Strikethrough => AttributeTag::Strikethrough,
            Attribute::ResetStrikethrough => AttributeTag::ResetStrikethrough,
            Attribute::DirectColorFg(_) => AttributeTag::DirectColorFg,
            Attribute::DirectColorBg(_) => AttributeTag::DirectColorBg,
            Attribute::Bg8(_) => AttributeTag::Bg8,
            Attribute::Fg8(_) => AttributeTag::Fg8,
            Attribute::ResetFg => AttributeTag::ResetFg,
            Attribute::ResetBg => AttributeTag::ResetBg,
            Attribute::BrightBg8(_) => AttributeTag::BrightBg8,
            Attribute::BrightFg8(_) => AttributeTag::BrightFg8,
            Attribute::Bg256(_) => AttributeTag::Bg256,
            Attribute::Fg256(_) => AttributeTag::Fg256,
        }
    }

    /// Named palette slot for the 8-color and bright 8-color forms
    pub fn named(&self) -> Option<Named> {
        match self {
            Attribute::Fg8(idx)
            | Attribute::Bg8(idx)
            | Attribute::BrightFg8(idx)
            | Attribute::BrightBg8(idx) => Named::from_index(*idx),
            _ => None,
        }
    }
}
