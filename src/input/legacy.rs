//! Legacy and xterm modifyOtherKeys encoding

use super::encoder::{EncoderOptions, OptionAsAlt, Output};
use super::event::{KeyAction, KeyEvent, Mods, Side};
use super::function_keys;

pub(super) fn encode(event: &KeyEvent<'_>, opts: &EncoderOptions, macos: bool, out: &mut Output<'_>) {
    if event.action() == KeyAction::Release || event.composing() {
        return;
    }

    let mods = effective_mods(event.mods(), opts, macos);
    let binding = mods.difference(event.consumed_mods()).binding();

    if function_keys::legacy(event.key(), mods, opts, out) {
        return;
    }

    if opts.modify_other_keys_state_2 {
        if let Some(codepoint) = modify_other_codepoint(event, binding) {
            function_keys::modify_other(binding, codepoint, out);
            return;
        }
    }

    if let Some(c0) = control_byte(event, mods) {
        if binding.contains(Mods::ALT) {
            out.byte(0x1b);
        }
        out.byte(c0);
        return;
    }

    if mods.contains(Mods::CTRL) {
        if let Some(codepoint) = fixterms_codepoint(event) {
            out.csi();
            out.num(codepoint);
            out.byte(b';');
            out.num(mods.binding().csi_param());
            out.byte(b'u');
            return;
        }
    }

    if let Some(byte) = alt_prefixed_byte(event, binding, opts) {
        out.byte(0x1b);
        out.byte(byte);
        return;
    }

    out.bytes(event.utf8().as_bytes());
}

/// The character a key stands for: its text if that is a single printable
/// character, else its unshifted codepoint.
fn key_char(event: &KeyEvent<'_>) -> Option<(char, bool)> {
    if let Some(c) = event.single_codepoint().filter(|c| !c.is_control()) {
        return Some((c, true));
    }
    if !event.utf8().is_empty() && event.single_codepoint().is_none() {
        return None;
    }
    let c = char::from_u32(event.base_codepoint()?)?;
    Some((c, false))
}

/// Codepoint for `CSI 27 ; mods ; cp ~`, if this event needs one
fn modify_other_codepoint(event: &KeyEvent<'_>, binding: Mods) -> Option<u32> {
    if binding.is_empty() {
        return None;
    }
    let (c, _) = key_char(event)?;

    // Shift alone only changes the text, except for space
    let only_shift = binding == Mods::SHIFT;
    if only_shift && c != ' ' {
        return None;
    }
    Some(u32::from(c))
}

/// C0 byte for ctrl plus a key, when the remaining modifiers allow it
fn control_byte(event: &KeyEvent<'_>, mods: Mods) -> Option<u8> {
    if !mods.contains(Mods::CTRL) {
        return None;
    }
    let (c, from_text) = key_char(event)?;

    let mut rest = mods.binding() - Mods::CTRL;
    // Shift was already applied to produce a symbol like `@` or `_`
    if rest.contains(Mods::SHIFT) && from_text && !c.is_ascii_alphabetic() {
        rest.remove(Mods::SHIFT);
    }
    if !(rest.is_empty() || rest == Mods::ALT) {
        return None;
    }

    let byte = match c {
        ' ' | '@' | '2' => 0x00,
        'a'..='z' => c as u8 - 0x60,
        'A'..='Z' => c as u8 - 0x40,
        '[' | '3' => 0x1b,
        '\\' | '4' => 0x1c,
        ']' | '5' => 0x1d,
        '^' | '6' => 0x1e,
        '_' | '/' | '7' => 0x1f,
        '?' | '8' => 0x7f,
        _ => return None,
    };
    Some(byte)
}

/// Codepoint for `CSI cp ; mods u` when ctrl has no C0 mapping
fn fixterms_codepoint(event: &KeyEvent<'_>) -> Option<u32> {
    if event.utf8().chars().nth(1).is_some() {
        return None;
    }
    event
        .base_codepoint()
        .or_else(|| event.single_codepoint().map(u32::from))
}

/// Whether a held Alt/Option key acts as Alt. On macOS Option composes
/// characters unless `macos_option_as_alt` enables its physical side.
pub(super) fn option_acts_as_alt(mods: Mods, opts: &EncoderOptions, macos: bool) -> bool {
    if !macos {
        return true;
    }
    match opts.macos_option_as_alt {
        OptionAsAlt::True => true,
        OptionAsAlt::False => false,
        OptionAsAlt::Left => mods.alt_side() == Side::Left,
        OptionAsAlt::Right => mods.alt_side() == Side::Right,
    }
}

/// Event modifiers with Alt removed when Option is not acting as Alt
fn effective_mods(mods: Mods, opts: &EncoderOptions, macos: bool) -> Mods {
    if mods.contains(Mods::ALT) && !option_acts_as_alt(mods, opts, macos) {
        mods - Mods::ALT - Mods::ALT_SIDE
    } else {
        mods
    }
}

/// The byte to send after ESC for an Alt combination
fn alt_prefixed_byte(event: &KeyEvent<'_>, binding: Mods, opts: &EncoderOptions) -> Option<u8> {
    if !binding.contains(Mods::ALT) || !opts.alt_esc_prefix {
        return None;
    }

    let utf8 = event.utf8().as_bytes();
    match utf8 {
        [byte] if byte.is_ascii() => Some(*byte),
        [] => event
            .base_codepoint()
            .and_then(|cp| u8::try_from(cp).ok())
            .filter(u8::is_ascii),
        _ => None,
    }
}
