//! Key events and modifier state

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::key::Key;

/// Press, release or auto-repeat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum KeyAction {
    Release = 0,
    #[default]
    Press = 1,
    Repeat = 2,
}

bitflags! {
    /// Modifier keys held during a key event.
    ///
    /// The `*_SIDE` bits are only meaningful while the matching modifier is
    /// set: clear means the left key, set means the right key.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Mods: u16 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
        const CAPS_LOCK = 1 << 4;
        const NUM_LOCK = 1 << 5;
        const SHIFT_SIDE = 1 << 6;
        const CTRL_SIDE = 1 << 7;
        const ALT_SIDE = 1 << 8;
        const SUPER_SIDE = 1 << 9;
    }
}

/// Which physical key of a modifier pair is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Mods {
    /// Shift, Ctrl, Alt and Super, without lock or side bits
    pub const BINDING: Mods = Mods::SHIFT
        .union(Mods::CTRL)
        .union(Mods::ALT)
        .union(Mods::SUPER);

    pub fn binding(self) -> Mods {
        self & Mods::BINDING
    }

    pub fn alt_side(self) -> Side {
        if self.contains(Mods::ALT_SIDE) {
            Side::Right
        } else {
            Side::Left
        }
    }

    /// Modifier parameter for xterm-style CSI sequences (`1 + bits`).
    ///
    /// Bit layout: shift 1, alt 2, ctrl 4, super 8.
    pub fn csi_param(self) -> u32 {
        let mut bits = 0;
        if self.contains(Mods::SHIFT) {
            bits |= 1;
        }
        if self.contains(Mods::ALT) {
            bits |= 2;
        }
        if self.contains(Mods::CTRL) {
            bits |= 4;
        }
        if self.contains(Mods::SUPER) {
            bits |= 8;
        }
        1 + bits
    }
}

/// A structured keyboard event.
///
/// `utf8` is text generated by the platform for this event and is borrowed
/// from the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KeyEvent<'a> {
    action: KeyAction,
    key: Key,
    mods: Mods,
    consumed_mods: Mods,
    utf8: &'a str,
    composing: bool,
    unshifted_codepoint: u32,
}

impl<'a> KeyEvent<'a> {
    /// A press of `Key::Unidentified` with no modifiers or text
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(&self) -> KeyAction {
        self.action
    }

    pub fn set_action(&mut self, action: KeyAction) -> &mut Self {
        self.action = action;
        self
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn set_key(&mut self, key: Key) -> &mut Self {
        self.key = key;
        self
    }

    pub fn mods(&self) -> Mods {
        self.mods
    }

    pub fn set_mods(&mut self, mods: Mods) -> &mut Self {
        self.mods = mods;
        self
    }

    /// Modifiers the platform already applied when producing `utf8`
    pub fn consumed_mods(&self) -> Mods {
        self.consumed_mods
    }

    pub fn set_consumed_mods(&mut self, mods: Mods) -> &mut Self {
        self.consumed_mods = mods;
        self
    }

    pub fn utf8(&self) -> &'a str {
        self.utf8
    }

    pub fn set_utf8(&mut self, text: &'a str) -> &mut Self {
        self.utf8 = text;
        self
    }

    /// True while an input method is composing
    pub fn composing(&self) -> bool {
        self.composing
    }

    pub fn set_composing(&mut self, composing: bool) -> &mut Self {
        self.composing = composing;
        self
    }

    /// Codepoint the key produces without shift, or 0 if unknown
    pub fn unshifted_codepoint(&self) -> u32 {
        self.unshifted_codepoint
    }

    pub fn set_unshifted_codepoint(&mut self, codepoint: u32) -> &mut Self {
        self.unshifted_codepoint = codepoint;
        self
    }

    /// Unshifted codepoint, falling back to the key's US layout codepoint
    pub(crate) fn base_codepoint(&self) -> Option<u32> {
        if self.unshifted_codepoint != 0 {
            return Some(self.unshifted_codepoint);
        }
        self.key.codepoint().map(u32::from)
    }

    /// The single codepoint of `utf8`, if it holds exactly one
    pub(crate) fn single_codepoint(&self) -> Option<char> {
        let mut chars = self.utf8.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}
