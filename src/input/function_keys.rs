//! Tables for keys that do not produce text
//!
//! Legacy sequences follow xterm's PC-style function keys. Kitty codes
//! are the functional key numbers from the Kitty keyboard protocol.

use super::encoder::{EncoderOptions, Output};
use super::event::Mods;
use super::key::Key;

/// Write the legacy sequence for a PC-style function key.
///
/// Returns false if `key` is not one, leaving `out` untouched. Enter, Tab,
/// Backspace and Escape are included because their modified forms are
/// fixed sequences rather than text.
pub(super) fn legacy(key: Key, mods: Mods, opts: &EncoderOptions, out: &mut Output<'_>) -> bool {
    let binding = mods.binding();
    let keypad_app = opts.keypad_key_application
        && !(opts.ignore_keypad_with_numlock && mods.contains(Mods::NUM_LOCK));
    let cursor_app = opts.cursor_key_application;

    match key {
        Key::ArrowUp | Key::NumpadUp => cursor(b'A', binding, cursor_app, out),
        Key::ArrowDown | Key::NumpadDown => cursor(b'B', binding, cursor_app, out),
        Key::ArrowRight | Key::NumpadRight => cursor(b'C', binding, cursor_app, out),
        Key::ArrowLeft | Key::NumpadLeft => cursor(b'D', binding, cursor_app, out),
        Key::NumpadBegin => cursor(b'E', binding, cursor_app, out),
        Key::Home | Key::NumpadHome => cursor(b'H', binding, cursor_app, out),
        Key::End | Key::NumpadEnd => cursor(b'F', binding, cursor_app, out),

        Key::Insert | Key::NumpadInsert => tilde(2, binding, out),
        Key::Delete | Key::NumpadDelete => tilde(3, binding, out),
        Key::PageUp | Key::NumpadPageUp => tilde(5, binding, out),
        Key::PageDown | Key::NumpadPageDown => tilde(6, binding, out),

        Key::F1 => pf(b'P', binding, out),
        Key::F2 => pf(b'Q', binding, out),
        Key::F3 => pf(b'R', binding, out),
        Key::F4 => pf(b'S', binding, out),
        Key::F5 => tilde(15, binding, out),
        Key::F6 => tilde(17, binding, out),
        Key::F7 => tilde(18, binding, out),
        Key::F8 => tilde(19, binding, out),
        Key::F9 => tilde(20, binding, out),
        Key::F10 => tilde(21, binding, out),
        Key::F11 => tilde(23, binding, out),
        Key::F12 => tilde(24, binding, out),
        // F13-F24 are shifted F1-F12, F25 is control-F1
        Key::F13 => fixed(1, 2, b'P', out),
        Key::F14 => fixed(1, 2, b'Q', out),
        Key::F15 => fixed(1, 2, b'R', out),
        Key::F16 => fixed(1, 2, b'S', out),
        Key::F17 => fixed(15, 2, b'~', out),
        Key::F18 => fixed(17, 2, b'~', out),
        Key::F19 => fixed(18, 2, b'~', out),
        Key::F20 => fixed(19, 2, b'~', out),
        Key::F21 => fixed(20, 2, b'~', out),
        Key::F22 => fixed(21, 2, b'~', out),
        Key::F23 => fixed(23, 2, b'~', out),
        Key::F24 => fixed(24, 2, b'~', out),
        Key::F25 => fixed(1, 5, b'P', out),

        Key::Enter => enter(binding, opts, out),
        Key::NumpadEnter if keypad_app => out.ss3(b'M'),
        Key::NumpadEnter => enter(binding, opts, out),
        Key::Tab => tab(binding, opts, out),
        Key::Backspace => backspace(binding, opts, out),
        Key::Escape => escape(binding, opts, out),

        _ if keypad_app => match keypad_application_code(key) {
            Some(code) => out.ss3(code),
            None => return false,
        },
        _ => return false,
    }
    true
}

/// Final byte of the SS3 sequence a keypad key sends in application mode
fn keypad_application_code(key: Key) -> Option<u8> {
    let code = match key {
        Key::Numpad0 => b'p',
        Key::Numpad1 => b'q',
        Key::Numpad2 => b'r',
        Key::Numpad3 => b's',
        Key::Numpad4 => b't',
        Key::Numpad5 => b'u',
        Key::Numpad6 => b'v',
        Key::Numpad7 => b'w',
        Key::Numpad8 => b'x',
        Key::Numpad9 => b'y',
        Key::NumpadMultiply => b'j',
        Key::NumpadAdd => b'k',
        Key::NumpadSeparator | Key::NumpadComma => b'l',
        Key::NumpadSubtract => b'm',
        Key::NumpadDecimal => b'n',
        Key::NumpadDivide => b'o',
        Key::NumpadEqual => b'X',
        _ => return None,
    };
    Some(code)
}

/// Arrows, Home, End and Begin
fn cursor(final_byte: u8, mods: Mods, application: bool, out: &mut Output<'_>) {
    if !mods.is_empty() {
        fixed(1, mods.csi_param(), final_byte, out);
    } else if application {
        out.ss3(final_byte);
    } else {
        out.csi();
        out.byte(final_byte);
    }
}

/// `CSI n ~` keys
fn tilde(number: u32, mods: Mods, out: &mut Output<'_>) {
    out.csi();
    out.num(number);
    if !mods.is_empty() {
        out.byte(b';');
        out.num(mods.csi_param());
    }
    out.byte(b'~');
}

/// F1-F4, which use SS3 unless modified
fn pf(final_byte: u8, mods: Mods, out: &mut Output<'_>) {
    if mods.is_empty() {
        out.ss3(final_byte);
    } else {
        fixed(1, mods.csi_param(), final_byte, out);
    }
}

fn fixed(number: u32, param: u32, final_byte: u8, out: &mut Output<'_>) {
    out.csi();
    out.num(number);
    out.byte(b';');
    out.num(param);
    out.byte(final_byte);
}

/// xterm `CSI 27 ; mods ; code ~`
pub(super) fn modify_other(mods: Mods, codepoint: u32, out: &mut Output<'_>) {
    out.csi();
    out.bytes(b"27;");
    out.num(mods.csi_param());
    out.byte(b';');
    out.num(codepoint);
    out.byte(b'~');
}

fn enter(mods: Mods, opts: &EncoderOptions, out: &mut Output<'_>) {
    if opts.modify_other_keys_state_2 && !mods.is_empty() {
        modify_other(mods, 0x0d, out);
    } else if mods.contains(Mods::ALT) {
        out.bytes(b"\x1b\r");
    } else {
        out.byte(b'\r');
    }
}

fn tab(mods: Mods, opts: &EncoderOptions, out: &mut Output<'_>) {
    if mods == Mods::SHIFT || (!opts.modify_other_keys_state_2 && mods.contains(Mods::SHIFT)) {
        out.bytes(b"\x1b[Z");
    } else if opts.modify_other_keys_state_2 && !mods.is_empty() {
        modify_other(mods, 0x09, out);
    } else if mods.contains(Mods::ALT) {
        out.bytes(b"\x1b\t");
    } else {
        out.byte(b'\t');
    }
}

fn backspace(mods: Mods, opts: &EncoderOptions, out: &mut Output<'_>) {
    if opts.modify_other_keys_state_2 && !mods.is_empty() {
        modify_other(mods, 0x7f, out);
        return;
    }
    if mods.contains(Mods::ALT) {
        out.byte(0x1b);
    }
    if mods.contains(Mods::CTRL) {
        out.byte(0x08);
    } else {
        out.byte(0x7f);
    }
}

fn escape(mods: Mods, opts: &EncoderOptions, out: &mut Output<'_>) {
    if opts.modify_other_keys_state_2 && !mods.is_empty() {
        modify_other(mods, 0x1b, out);
    } else if mods.contains(Mods::ALT) {
        out.bytes(b"\x1b\x1b");
    } else {
        out.byte(0x1b);
    }
}

/// How a key is reported under the Kitty keyboard protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct KittyEntry {
    pub code: u32,
    /// `u`, `~`, or a letter for the legacy-compatible keys
    pub final_byte: u8,
    /// Modifier and lock keys are only reported with REPORT_ALL
    pub modifier: bool,
}

impl KittyEntry {
    const fn new(code: u32, final_byte: u8) -> Self {
        Self {
            code,
            final_byte,
            modifier: false,
        }
    }

    const fn modifier(code: u32) -> Self {
        Self {
            code,
            final_byte: b'u',
            modifier: true,
        }
    }
}

/// Kitty functional key code, or `None` for keys reported by codepoint
pub(super) fn kitty(key: Key) -> Option<KittyEntry> {
    let entry = match key {
        Key::Escape => KittyEntry::new(27, b'u'),
        Key::Enter => KittyEntry::new(13, b'u'),
        Key::Tab => KittyEntry::new(9, b'u'),
        Key::Backspace => KittyEntry::new(127, b'u'),
        Key::Insert => KittyEntry::new(2, b'~'),
        Key::Delete => KittyEntry::new(3, b'~'),
        Key::ArrowLeft => KittyEntry::new(1, b'D'),
        Key::ArrowRight => KittyEntry::new(1, b'C'),
        Key::ArrowUp => KittyEntry::new(1, b'A'),
        Key::ArrowDown => KittyEntry::new(1, b'B'),
        Key::PageUp => KittyEntry::new(5, b'~'),
        Key::PageDown => KittyEntry::new(6, b'~'),
        Key::Home => KittyEntry::new(1, b'H'),
        Key::End => KittyEntry::new(1, b'F'),
        Key::CapsLock => KittyEntry::modifier(57358),
        Key::ScrollLock => KittyEntry::new(57359, b'u'),
        Key::NumLock => KittyEntry::modifier(57360),
        Key::PrintScreen => KittyEntry::new(57361, b'u'),
        Key::Pause => KittyEntry::new(57362, b'u'),
        Key::ContextMenu => KittyEntry::new(57363, b'u'),

        Key::F1 => KittyEntry::new(1, b'P'),
        Key::F2 => KittyEntry::new(1, b'Q'),
        Key::F3 => KittyEntry::new(13, b'~'),
        Key::F4 => KittyEntry::new(1, b'S'),
        Key::F5 => KittyEntry::new(15, b'~'),
        Key::F6 => KittyEntry::new(17, b'~'),
        Key::F7 => KittyEntry::new(18, b'~'),
        Key::F8 => KittyEntry::new(19, b'~'),
        Key::F9 => KittyEntry::new(20, b'~'),
        Key::F10 => KittyEntry::new(21, b'~'),
        Key::F11 => KittyEntry::new(23, b'~'),
        Key::F12 => KittyEntry::new(24, b'~'),
        Key::F13 => KittyEntry::new(57376, b'u'),
        Key::F14 => KittyEntry::new(57377, b'u'),
        Key::F15 => KittyEntry::new(57378, b'u'),
        Key::F16 => KittyEntry::new(57379, b'u'),
        Key::F17 => KittyEntry::new(57380, b'u'),
        Key::F18 => KittyEntry::new(57381, b'u'),
        Key::F19 => KittyEntry::new(57382, b'u'),
        Key::F20 => KittyEntry::new(57383, b'u'),
        Key::F21 => KittyEntry::new(57384, b'u'),
        Key::F22 => KittyEntry::new(57385, b'u'),
        Key::F23 => KittyEntry::new(57386, b'u'),
        Key::F24 => KittyEntry::new(57387, b'u'),
        Key::F25 => KittyEntry::new(57388, b'u'),

        Key::Numpad0 => KittyEntry::new(57399, b'u'),
        Key::Numpad1 => KittyEntry::new(57400, b'u'),
        Key::Numpad2 => KittyEntry::new(57401, b'u'),
        Key::Numpad3 => KittyEntry::new(57402, b'u'),
        Key::Numpad4 => KittyEntry::new(57403, b'u'),
        Key::Numpad5 => KittyEntry::new(57404, b'u'),
        Key::Numpad6 => KittyEntry::new(57405, b'u'),
        Key::Numpad7 => KittyEntry::new(57406, b'u'),
        Key::Numpad8 => KittyEntry::new(57407, b'u'),
        Key::Numpad9 => KittyEntry::new(57408, b'u'),
        Key::NumpadDecimal => KittyEntry::new(57409, b'u'),
        Key::NumpadDivide => KittyEntry::new(57410, b'u'),
        Key::NumpadMultiply => KittyEntry::new(57411, b'u'),
        Key::NumpadSubtract => KittyEntry::new(57412, b'u'),
        Key::NumpadAdd => KittyEntry::new(57413, b'u'),
        Key::NumpadEnter => KittyEntry::new(57414, b'u'),
        Key::NumpadEqual => KittyEntry::new(57415, b'u'),
        Key::NumpadSeparator | Key::NumpadComma => KittyEntry::new(57416, b'u'),
        Key::NumpadLeft => KittyEntry::new(57417, b'u'),
        Key::NumpadRight => KittyEntry::new(57418, b'u'),
        Key::NumpadUp => KittyEntry::new(57419, b'u'),
        Key::NumpadDown => KittyEntry::new(57420, b'u'),
        Key::NumpadPageUp => KittyEntry::new(57421, b'u'),
        Key::NumpadPageDown => KittyEntry::new(57422, b'u'),
        Key::NumpadHome => KittyEntry::new(57423, b'u'),
        Key::NumpadEnd => KittyEntry::new(57424, b'u'),
        Key::NumpadInsert => KittyEntry::new(57425, b'u'),
        Key::NumpadDelete => KittyEntry::new(57426, b'u'),
        Key::NumpadBegin => KittyEntry::new(57427, b'u'),

        Key::MediaPlayPause => KittyEntry::new(57430, b'u'),
        Key::MediaStop => KittyEntry::new(57432, b'u'),
        Key::MediaTrackNext => KittyEntry::new(57435, b'u'),
        Key::MediaTrackPrevious => KittyEntry::new(57436, b'u'),
        Key::AudioVolumeDown => KittyEntry::new(57438, b'u'),
        Key::AudioVolumeUp => KittyEntry::new(57439, b'u'),
        Key::AudioVolumeMute => KittyEntry::new(57440, b'u'),

        Key::ShiftLeft => KittyEntry::modifier(57441),
        Key::ControlLeft => KittyEntry::modifier(57442),
        Key::AltLeft => KittyEntry::modifier(57443),
        Key::MetaLeft => KittyEntry::modifier(57444),
        Key::ShiftRight => KittyEntry::modifier(57447),
        Key::ControlRight => KittyEntry::modifier(57448),
        Key::AltRight => KittyEntry::modifier(57449),
        Key::MetaRight => KittyEntry::modifier(57450),
        _ => return None,
    };
    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(key: Key, mods: Mods, opts: &EncoderOptions) -> Option<Vec<u8>> {
        let mut buf = [0u8; 32];
        let mut out = Output::new(&mut buf);
        if !legacy(key, mods, opts, &mut out) {
            return None;
        }
        let len = out.len();
        Some(buf[..len].to_vec())
    }

    #[test]
    fn test_cursor_keys() {
        let normal = EncoderOptions::default();
        let app = EncoderOptions {
            cursor_key_application: true,
            ..Default::default()
        };
        assert_eq!(encode(Key::ArrowUp, Mods::empty(), &normal).unwrap(), b"\x1b[A");
        assert_eq!(encode(Key::ArrowUp, Mods::empty(), &app).unwrap(), b"\x1bOA");
        assert_eq!(encode(Key::ArrowLeft, Mods::CTRL, &app).unwrap(), b"\x1b[1;5D");
        assert_eq!(encode(Key::Home, Mods::empty(), &normal).unwrap(), b"\x1b[H");
        assert_eq!(encode(Key::End, Mods::SHIFT, &normal).unwrap(), b"\x1b[1;2F");
    }

    #[test]
    fn test_tilde_keys() {
        let opts = EncoderOptions::default();
        assert_eq!(encode(Key::Delete, Mods::empty(), &opts).unwrap(), b"\x1b[3~");
        assert_eq!(encode(Key::PageUp, Mods::ALT, &opts).unwrap(), b"\x1b[5;3~");
        assert_eq!(encode(Key::F5, Mods::empty(), &opts).unwrap(), b"\x1b[15~");
        assert_eq!(encode(Key::F12, Mods::CTRL | Mods::SHIFT, &opts).unwrap(), b"\x1b[24;6~");
    }

    #[test]
    fn test_function_keys() {
        let opts = EncoderOptions::default();
        assert_eq!(encode(Key::F1, Mods::empty(), &opts).unwrap(), b"\x1bOP");
        assert_eq!(encode(Key::F4, Mods::CTRL, &opts).unwrap(), b"\x1b[1;5S");
        assert_eq!(encode(Key::F13, Mods::empty(), &opts).unwrap(), b"\x1b[1;2P");
        assert_eq!(encode(Key::F20, Mods::empty(), &opts).unwrap(), b"\x1b[19;2~");
    }

    #[test]
    fn test_editing_keys() {
        let opts = EncoderOptions::default();
        assert_eq!(encode(Key::Backspace, Mods::empty(), &opts).unwrap(), b"\x7f");
        assert_eq!(encode(Key::Backspace, Mods::CTRL, &opts).unwrap(), b"\x08");
        assert_eq!(encode(Key::Backspace, Mods::ALT, &opts).unwrap(), b"\x1b\x7f");
        assert_eq!(encode(Key::Tab, Mods::SHIFT, &opts).unwrap(), b"\x1b[Z");
        assert_eq!(encode(Key::Enter, Mods::ALT, &opts).unwrap(), b"\x1b\r");
        assert_eq!(encode(Key::Escape, Mods::empty(), &opts).unwrap(), b"\x1b");
    }

    #[test]
    fn test_modify_other_keys_editing() {
        let opts = EncoderOptions {
            modify_other_keys_state_2: true,
            ..Default::default()
        };
        assert_eq!(encode(Key::Enter, Mods::CTRL, &opts).unwrap(), b"\x1b[27;5;13~");
        assert_eq!(encode(Key::Tab, Mods::SHIFT, &opts).unwrap(), b"\x1b[Z");
        assert_eq!(encode(Key::Tab, Mods::CTRL, &opts).unwrap(), b"\x1b[27;5;9~");
        assert_eq!(encode(Key::Enter, Mods::empty(), &opts).unwrap(), b"\r");
    }

    #[test]
    fn test_keypad_application_mode() {
        let app = EncoderOptions {
            keypad_key_application: true,
            ..Default::default()
        };
        assert_eq!(encode(Key::Numpad5, Mods::empty(), &app).unwrap(), b"\x1bOu");
        assert_eq!(encode(Key::NumpadEnter, Mods::empty(), &app).unwrap(), b"\x1bOM");
        assert_eq!(encode(Key::Numpad5, Mods::empty(), &EncoderOptions::default()), None);

        let ignore = EncoderOptions {
            ignore_keypad_with_numlock: true,
            ..app
        };
        assert_eq!(encode(Key::Numpad5, Mods::NUM_LOCK, &ignore), None);
        assert_eq!(encode(Key::Numpad5, Mods::empty(), &ignore).unwrap(), b"\x1bOu");
    }

    #[test]
    fn test_text_keys_are_not_function_keys() {
        let opts = EncoderOptions::default();
        assert_eq!(encode(Key::A, Mods::CTRL, &opts), None);
        assert_eq!(encode(Key::Space, Mods::empty(), &opts), None);
    }

    #[test]
    fn test_kitty_entries() {
        assert_eq!(kitty(Key::Escape), Some(KittyEntry::new(27, b'u')));
        assert_eq!(kitty(Key::ArrowUp), Some(KittyEntry::new(1, b'A')));
        assert!(kitty(Key::ShiftLeft).unwrap().modifier);
        assert!(kitty(Key::CapsLock).unwrap().modifier);
        assert!(!kitty(Key::ScrollLock).unwrap().modifier);
        assert_eq!(kitty(Key::A), None);
    }
}
