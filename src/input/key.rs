//! Physical key codes
//!
//! Keys are identified by their physical position, modeled on the W3C UI
//! Events `code` values. The numeric value of each variant is stable and
//! follows the declaration order below.

use serde::{Deserialize, Serialize};

use super::event::Mods;

/// Physical key, independent of keyboard layout
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(u16)]
pub enum Key {
    #[default]
    Unidentified = 0,

    // Writing system keys
    Backquote,
    Backslash,
    BracketLeft,
    BracketRight,
    Comma,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Equal,
    IntlBackslash,
    IntlRo,
    IntlYen,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Minus,
    Period,
    Quote,
    Semicolon,
    Slash,

    // Functional keys
    AltLeft,
    AltRight,
    Backspace,
    CapsLock,
    ContextMenu,
    ControlLeft,
    ControlRight,
    Enter,
    MetaLeft,
    MetaRight,
    ShiftLeft,
    ShiftRight,
    Space,
    Tab,
    Convert,
    KanaMode,
    NonConvert,

    // Control pad
    Delete,
    End,
    Help,
    Home,
    Insert,
    PageDown,
    PageUp,

    // Arrow pad
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    // Numpad
    NumLock,
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    NumpadAdd,
    NumpadBackspace,
    NumpadClear,
    NumpadClearEntry,
    NumpadComma,
    NumpadDecimal,
    NumpadDivide,
    NumpadEnter,
    NumpadEqual,
    NumpadMemoryAdd,
    NumpadMemoryClear,
    NumpadMemoryRecall,
    NumpadMemoryStore,
    NumpadMemorySubtract,
    NumpadMultiply,
    NumpadParenLeft,
    NumpadParenRight,
    NumpadSubtract,
    NumpadSeparator,
    NumpadUp,
    NumpadDown,
    NumpadRight,
    NumpadLeft,
    NumpadBegin,
    NumpadHome,
    NumpadEnd,
    NumpadInsert,
    NumpadDelete,
    NumpadPageUp,
    NumpadPageDown,

    // Function section
    Escape,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    F25,
    Fn,
    FnLock,
    PrintScreen,
    ScrollLock,
    Pause,

    // Media keys
    BrowserBack,
    BrowserFavorites,
    BrowserForward,
    BrowserHome,
    BrowserRefresh,
    BrowserSearch,
    BrowserStop,
    Eject,
    LaunchApp1,
    LaunchApp2,
    LaunchMail,
    MediaPlayPause,
    MediaSelect,
    MediaStop,
    MediaTrackNext,
    MediaTrackPrevious,
    Power,
    Sleep,
    AudioVolumeDown,
    AudioVolumeMute,
    AudioVolumeUp,
    WakeUp,

    // Legacy and special keys
    Copy,
    Cut,
    Paste,
}

impl Key {
    /// Every key, indexed by numeric value
    pub const ALL: [Key; 176] = [
        Key::Unidentified,
        Key::Backquote,
        Key::Backslash,
        Key::BracketLeft,
        Key::BracketRight,
        Key::Comma,
        Key::Digit0,
        Key::Digit1,
        Key::Digit2,
        Key::Digit3,
        Key::Digit4,
        Key::Digit5,
        Key::Digit6,
        Key::Digit7,
        Key::Digit8,
        Key::Digit9,
        Key::Equal,
        Key::IntlBackslash,
        Key::IntlRo,
        Key::IntlYen,
        Key::A,
        Key::B,
        Key::C,
        Key::D,
        Key::E,
        Key::F,
        Key::G,
        Key::H,
        Key::I,
        Key::J,
        Key::K,
        Key::L,
        Key::M,
        Key::N,
        Key::O,
        Key::P,
        Key::Q,
        Key::R,
        Key::S,
        Key::T,
        Key::U,
        Key::V,
        Key::W,
        Key::X,
        Key::Y,
        Key::Z,
        Key::Minus,
        Key::Period,
        Key::Quote,
        Key::Semicolon,
        Key::Slash,
        Key::AltLeft,
        Key::AltRight,
        Key::Backspace,
        Key::CapsLock,
        Key::ContextMenu,
        Key::ControlLeft,
        Key::ControlRight,
        Key::Enter,
        Key::MetaLeft,
        Key::MetaRight,
        Key::ShiftLeft,
        Key::ShiftRight,
        Key::Space,
        Key::Tab,
        Key::Convert,
        Key::KanaMode,
        Key::NonConvert,
        Key::Delete,
        Key::End,
        Key::Help,
        Key::Home,
        Key::Insert,
        Key::PageDown,
        Key::PageUp,
        Key::ArrowDown,
        Key::ArrowLeft,
        Key::ArrowRight,
        Key::ArrowUp,
        Key::NumLock,
        Key::Numpad0,
        Key::Numpad1,
        Key::Numpad2,
        Key::Numpad3,
        Key::Numpad4,
        Key::Numpad5,
        Key::Numpad6,
        Key::Numpad7,
        Key::Numpad8,
        Key::Numpad9,
        Key::NumpadAdd,
        Key::NumpadBackspace,
        Key::NumpadClear,
        Key::NumpadClearEntry,
        Key::NumpadComma,
        Key::NumpadDecimal,
        Key::NumpadDivide,
        Key::NumpadEnter,
        Key::NumpadEqual,
        Key::NumpadMemoryAdd,
        Key::NumpadMemoryClear,
        Key::NumpadMemoryRecall,
        Key::NumpadMemoryStore,
        Key::NumpadMemorySubtract,
        Key::NumpadMultiply,
        Key::NumpadParenLeft,
        Key::NumpadParenRight,
        Key::NumpadSubtract,
        Key::NumpadSeparator,
        Key::NumpadUp,
        Key::NumpadDown,
        Key::NumpadRight,
        Key::NumpadLeft,
        Key::NumpadBegin,
        Key::NumpadHome,
        Key::NumpadEnd,
        Key::NumpadInsert,
        Key::NumpadDelete,
        Key::NumpadPageUp,
        Key::NumpadPageDown,
        Key::Escape,
        Key::F1,
        Key::F2,
        Key::F3,
        Key::F4,
        Key::F5,
        Key::F6,
        Key::F7,
        Key::F8,
        Key::F9,
        Key::F10,
        Key::F11,
        Key::F12,
        Key::F13,
        Key::F14,
        Key::F15,
        Key::F16,
        Key::F17,
        Key::F18,
        Key::F19,
        Key::F20,
        Key::F21,
        Key::F22,
        Key::F23,
        Key::F24,
        Key::F25,
        Key::Fn,
        Key::FnLock,
        Key::PrintScreen,
        Key::ScrollLock,
        Key::Pause,
        Key::BrowserBack,
        Key::BrowserFavorites,
        Key::BrowserForward,
        Key::BrowserHome,
        Key::BrowserRefresh,
        Key::BrowserSearch,
        Key::BrowserStop,
        Key::Eject,
        Key::LaunchApp1,
        Key::LaunchApp2,
        Key::LaunchMail,
        Key::MediaPlayPause,
        Key::MediaSelect,
        Key::MediaStop,
        Key::MediaTrackNext,
        Key::MediaTrackPrevious,
        Key::Power,
        Key::Sleep,
        Key::AudioVolumeDown,
        Key::AudioVolumeMute,
        Key::AudioVolumeUp,
        Key::WakeUp,
        Key::Copy,
        Key::Cut,
        Key::Paste,
    ];

    /// Look up a key by its numeric value
    pub fn from_raw(raw: u16) -> Option<Self> {
        Self::ALL.get(usize::from(raw)).copied()
    }

    pub const fn raw(self) -> u16 {
        self as u16
    }

    /// Unshifted codepoint this key produces on a US layout.
    ///
    /// Only writing-system keys, space and the printable numpad keys have
    /// one; functional keys return `None`.
    pub fn codepoint(self) -> Option<char> {
        let c = match self {
            Key::Backquote => '`',
            Key::Backslash => '\\',
            Key::BracketLeft => '[',
            Key::BracketRight => ']',
            Key::Comma => ',',
            Key::Digit0 | Key::Numpad0 => '0',
            Key::Digit1 | Key::Numpad1 => '1',
            Key::Digit2 | Key::Numpad2 => '2',
            Key::Digit3 | Key::Numpad3 => '3',
            Key::Digit4 | Key::Numpad4 => '4',
            Key::Digit5 | Key::Numpad5 => '5',
            Key::Digit6 | Key::Numpad6 => '6',
            Key::Digit7 | Key::Numpad7 => '7',
            Key::Digit8 | Key::Numpad8 => '8',
            Key::Digit9 | Key::Numpad9 => '9',
            Key::Equal | Key::NumpadEqual => '=',
            Key::Minus | Key::NumpadSubtract => '-',
            Key::Period | Key::NumpadDecimal => '.',
            Key::Quote => '\'',
            Key::Semicolon => ';',
            Key::Slash | Key::NumpadDivide => '/',
            Key::NumpadAdd => '+',
            Key::NumpadMultiply => '*',
            Key::NumpadComma => ',',
            Key::Space => ' ',
            Key::A => 'a',
            Key::B => 'b',
            Key::C => 'c',
            Key::D => 'd',
            Key::E => 'e',
            Key::F => 'f',
            Key::G => 'g',
            Key::H => 'h',
            Key::I => 'i',
            Key::J => 'j',
            Key::K => 'k',
            Key::L => 'l',
            Key::M => 'm',
            Key::N => 'n',
            Key::O => 'o',
            Key::P => 'p',
            Key::Q => 'q',
            Key::R => 'r',
            Key::S => 's',
            Key::T => 't',
            Key::U => 'u',
            Key::V => 'v',
            Key::W => 'w',
            Key::X => 'x',
            Key::Y => 'y',
            Key::Z => 'z',
            _ => return None,
        };
        Some(c)
    }

    /// Modifier bit this key controls, for the modifier keys themselves
    pub fn modifier(self) -> Option<Mods> {
        match self {
            Key::ShiftLeft | Key::ShiftRight => Some(Mods::SHIFT),
            Key::ControlLeft | Key::ControlRight => Some(Mods::CTRL),
            Key::AltLeft | Key::AltRight => Some(Mods::ALT),
            Key::MetaLeft | Key::MetaRight => Some(Mods::SUPER),
            Key::CapsLock => Some(Mods::CAPS_LOCK),
            Key::NumLock => Some(Mods::NUM_LOCK),
            _ => None,
        }
    }

    pub fn is_modifier(self) -> bool {
        self.modifier().is_some()
    }

    /// Shift, Control, Alt and Meta keys (not the lock keys)
    pub fn is_binding_modifier(self) -> bool {
        matches!(
            self,
            Key::ShiftLeft
                | Key::ShiftRight
                | Key::ControlLeft
                | Key::ControlRight
                | Key::AltLeft
                | Key::AltRight
                | Key::MetaLeft
                | Key::MetaRight
        )
    }

    pub fn is_keypad(self) -> bool {
        (Key::Numpad0..=Key::NumpadPageDown).contains(&self)
    }
}

impl TryFrom<u16> for Key {
    type Error = crate::error::Error;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        Key::from_raw(raw).ok_or(crate::error::Error::InvalidValue("unknown key code"))
    }
}
