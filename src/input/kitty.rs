//! Kitty keyboard protocol encoding
//!
//! Sequences have the form
//! `CSI code[:shifted] ; mods[:event] ; text u`, where the trailing fields
//! are present only when the active flags ask for them.

use super::encoder::{EncoderOptions, KittyFlags, Output};
use super::event::{KeyAction, KeyEvent, Mods};
use super::function_keys::{self, KittyEntry};
use super::key::Key;
use super::legacy;

/// Modifier bits as the Kitty protocol numbers them
mod bits {
    pub const SHIFT: u32 = 1;
    pub const ALT: u32 = 2;
    pub const CTRL: u32 = 4;
    pub const SUPER: u32 = 8;
    pub const CAPS_LOCK: u32 = 64;
    pub const NUM_LOCK: u32 = 128;
}

pub(super) fn encode(event: &KeyEvent<'_>, opts: &EncoderOptions, macos: bool, out: &mut Output<'_>) {
    let flags = opts.kitty_flags;
    let action = event.action();
    if action == KeyAction::Release && !flags.contains(KittyFlags::REPORT_EVENTS) {
        return;
    }

    let mods = event.mods();
    let binding = mods.difference(event.consumed_mods()).binding();
    let utf8 = event.utf8();

    let functional = function_keys::kitty(event.key());
    let entry = functional.or_else(|| {
        event
            .base_codepoint()
            .or_else(|| text_codepoint(event))
            .map(|code| KittyEntry { code, final_byte: b'u', modifier: false })
    });

    if event.composing() {
        // Only bare modifier presses get through while composing
        if !entry.is_some_and(|entry| entry.modifier) {
            return;
        }
    } else {
        // Text committed by an input method arrives on Enter
        if event.key() == Key::Enter && !utf8.is_empty() && !is_control_text(utf8) {
            out.bytes(utf8.as_bytes());
            return;
        }

        if !flags.contains(KittyFlags::REPORT_ALL) {
            if binding.is_empty() {
                let legacy: Option<&[u8]> = match event.key() {
                    Key::Enter => Some(b"\r"),
                    Key::Tab => Some(b"\t"),
                    Key::Backspace => Some(b"\x7f"),
                    _ => None,
                };
                if let Some(bytes) = legacy {
                    if action != KeyAction::Release {
                        out.bytes(bytes);
                    }
                    return;
                }
            }

            let text_mods = binding - Mods::SHIFT;
            if !utf8.is_empty()
                && text_mods.is_empty()
                && action != KeyAction::Release
                && !is_control_text(utf8)
            {
                out.bytes(utf8.as_bytes());
                return;
            }
        }
    }

    let Some(entry) = entry else {
        // No key code to report; the text is all that is left
        if action != KeyAction::Release {
            out.bytes(utf8.as_bytes());
        }
        return;
    };
    if entry.modifier && !flags.contains(KittyFlags::REPORT_ALL) {
        return;
    }

    let mut key_mods = modifier_bits(action, event.key(), mods);
    // Lock state is only reported on text keys when every key is reported
    if functional.is_none() && !flags.contains(KittyFlags::REPORT_ALL) {
        key_mods &= !(bits::CAPS_LOCK | bits::NUM_LOCK);
    }

    let event_type = flags.contains(KittyFlags::REPORT_EVENTS).then_some(match action {
        KeyAction::Press => 1,
        KeyAction::Repeat => 2,
        KeyAction::Release => 3,
    });

    let shifted = if flags.contains(KittyFlags::REPORT_ALTERNATES) && binding.contains(Mods::SHIFT) {
        event
            .single_codepoint()
            .filter(|c| !c.is_control())
            .map(u32::from)
            .filter(|&cp| cp != entry.code)
    } else {
        None
    };

    let text = if flags.contains(KittyFlags::REPORT_ASSOCIATED)
        && action != KeyAction::Release
        && !prevents_text(key_mods, legacy::option_acts_as_alt(mods, opts, macos))
    {
        utf8
    } else {
        ""
    };

    write_sequence(out, entry, key_mods, event_type, shifted, text);
}

fn write_sequence(
    out: &mut Output<'_>,
    entry: KittyEntry,
    key_mods: u32,
    event_type: Option<u32>,
    shifted: Option<u32>,
    text: &str,
) {
    let has_mods = key_mods != 0 || event_type.is_some();

    // Letter-final keys keep their legacy form when nothing else is reported
    if entry.final_byte != b'u' && entry.final_byte != b'~' && !has_mods {
        out.csi();
        out.byte(entry.final_byte);
        return;
    }

    out.csi();
    out.num(entry.code);
    if let Some(shifted) = shifted {
        out.byte(b':');
        out.num(shifted);
    }

    if has_mods {
        out.byte(b';');
        out.num(1 + key_mods);
        if let Some(event_type) = event_type {
            out.byte(b':');
            out.num(event_type);
        }
    }

    let mut codepoints = text.chars().filter(|c| !c.is_control()).map(u32::from);
    if let Some(first) = codepoints.next() {
        if !has_mods {
            out.byte(b';');
        }
        out.byte(b';');
        out.num(first);
        for cp in codepoints {
            out.byte(b':');
            out.num(cp);
        }
    }

    out.byte(entry.final_byte);
}

/// Kitty modifier bits, with the key's own modifier applied for
/// modifier keys: set on press, cleared on release.
fn modifier_bits(action: KeyAction, key: Key, mods: Mods) -> u32 {
    let mut mods = mods;
    if let Some(own) = key.modifier() {
        if action == KeyAction::Release {
            mods.remove(own);
        } else {
            mods.insert(own);
        }
    }

    [
        (Mods::SHIFT, bits::SHIFT),
        (Mods::ALT, bits::ALT),
        (Mods::CTRL, bits::CTRL),
        (Mods::SUPER, bits::SUPER),
        (Mods::CAPS_LOCK, bits::CAPS_LOCK),
        (Mods::NUM_LOCK, bits::NUM_LOCK),
    ]
    .iter()
    .filter(|(flag, _)| mods.contains(*flag))
    .fold(0, |acc, (_, bit)| acc | bit)
}

/// Ctrl and Super suppress associated text; Alt does too unless it is
/// acting as the macOS Option key.
fn prevents_text(key_mods: u32, alt_prevents: bool) -> bool {
    key_mods & (bits::CTRL | bits::SUPER) != 0 || (alt_prevents && key_mods & bits::ALT != 0)
}

/// Key code taken from the text when the physical key has none, lowercased
/// the way the protocol reports unshifted keys
fn text_codepoint(event: &KeyEvent<'_>) -> Option<u32> {
    let c = event.single_codepoint().filter(|c| !c.is_control())?;
    let mut lower = c.to_lowercase();
    let c = match (lower.next(), lower.next()) {
        (Some(lower), None) => lower,
        _ => c,
    };
    Some(u32::from(c))
}

fn is_control_text(text: &str) -> bool {
    let mut chars = text.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_control())
}
