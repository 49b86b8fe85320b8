//! Key encoder configuration and entry point

use std::any::Any;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::event::KeyEvent;
use super::{kitty, legacy};
use crate::error::{Error, Result};

bitflags! {
    /// Kitty keyboard protocol progressive enhancement flags
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct KittyFlags: u8 {
        const DISAMBIGUATE = 1 << 0;
        const REPORT_EVENTS = 1 << 1;
        const REPORT_ALTERNATES = 1 << 2;
        const REPORT_ALL = 1 << 3;
        const REPORT_ASSOCIATED = 1 << 4;
    }
}

/// Whether the macOS Option key acts as Alt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum OptionAsAlt {
    #[default]
    False = 0,
    True = 1,
    /// Only the left Option key
    Left = 2,
    /// Only the right Option key
    Right = 3,
}

impl OptionAsAlt {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(OptionAsAlt::False),
            1 => Some(OptionAsAlt::True),
            2 => Some(OptionAsAlt::Left),
            3 => Some(OptionAsAlt::Right),
            _ => None,
        }
    }
}

/// Terminal modes and protocol settings that affect key encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    /// DECCKM (mode 1)
    pub cursor_key_application: bool,
    /// DECKPAM (mode 66)
    pub keypad_key_application: bool,
    /// Mode 1035
    pub ignore_keypad_with_numlock: bool,
    /// Mode 1036: Alt sends an ESC prefix
    pub alt_esc_prefix: bool,
    /// xterm modifyOtherKeys level 2
    pub modify_other_keys_state_2: bool,
    pub kitty_flags: KittyFlags,
    pub macos_option_as_alt: OptionAsAlt,
}

/// Option identifiers for [`Encoder::set_option`] and [`Encoder::setopt`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum EncoderOption {
    CursorKeyApplication = 0,
    KeypadKeyApplication = 1,
    IgnoreKeypadWithNumlock = 2,
    AltEscPrefix = 3,
    ModifyOtherKeysState2 = 4,
    KittyFlags = 5,
    MacosOptionAsAlt = 6,
}

impl TryFrom<u32> for EncoderOption {
    type Error = Error;

    fn try_from(raw: u32) -> Result<Self> {
        match raw {
            0 => Ok(EncoderOption::CursorKeyApplication),
            1 => Ok(EncoderOption::KeypadKeyApplication),
            2 => Ok(EncoderOption::IgnoreKeypadWithNumlock),
            3 => Ok(EncoderOption::AltEscPrefix),
            4 => Ok(EncoderOption::ModifyOtherKeysState2),
            5 => Ok(EncoderOption::KittyFlags),
            6 => Ok(EncoderOption::MacosOptionAsAlt),
            _ => Err(Error::InvalidValue("unknown encoder option")),
        }
    }
}

/// Typed value for [`Encoder::set_option`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    KittyFlags(KittyFlags),
    OptionAsAlt(OptionAsAlt),
}

/// Converts key events into the bytes a terminal application expects.
///
/// Encoding is a pure function of the event and the configured options.
#[derive(Debug, Clone)]
pub struct Encoder {
    options: EncoderOptions,
    /// Option-as-alt handling only applies on macOS
    pub(crate) macos: bool,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self::with_options(EncoderOptions::default())
    }

    pub fn with_options(options: EncoderOptions) -> Self {
        Self {
            options,
            macos: cfg!(target_os = "macos"),
        }
    }

    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut EncoderOptions {
        &mut self.options
    }

    /// Set one option. `None` leaves the option unchanged.
    pub fn set_option(&mut self, option: EncoderOption, value: Option<OptionValue>) -> Result<()> {
        let Some(value) = value else {
            return Ok(());
        };

        let opts = &mut self.options;
        match (option, value) {
            (EncoderOption::CursorKeyApplication, OptionValue::Bool(v)) => {
                opts.cursor_key_application = v
            }
            (EncoderOption::KeypadKeyApplication, OptionValue::Bool(v)) => {
                opts.keypad_key_application = v
            }
            (EncoderOption::IgnoreKeypadWithNumlock, OptionValue::Bool(v)) => {
                opts.ignore_keypad_with_numlock = v
            }
            (EncoderOption::AltEscPrefix, OptionValue::Bool(v)) => opts.alt_esc_prefix = v,
            (EncoderOption::ModifyOtherKeysState2, OptionValue::Bool(v)) => {
                opts.modify_other_keys_state_2 = v
            }
            (EncoderOption::KittyFlags, OptionValue::KittyFlags(flags)) => opts.kitty_flags = flags,
            (EncoderOption::MacosOptionAsAlt, OptionValue::OptionAsAlt(v)) => {
                opts.macos_option_as_alt = v
            }
            (option, value) => {
                debug!("Rejected {:?} for encoder option {:?}", value, option);
                return Err(Error::InvalidValue("option value has the wrong type"));
            }
        }
        Ok(())
    }

    /// Set one option from an untyped value.
    ///
    /// Boolean options take `bool`. Kitty flags take [`KittyFlags`] or a raw
    /// `u8` bitmask. Option-as-alt takes [`OptionAsAlt`] or its raw `u8`.
    /// `None` leaves the option unchanged.
    pub fn setopt(&mut self, option: EncoderOption, value: Option<&dyn Any>) -> Result<()> {
        let Some(value) = value else {
            return Ok(());
        };

        let typed = match option {
            EncoderOption::KittyFlags => value
                .downcast_ref::<KittyFlags>()
                .copied()
                .or_else(|| {
                    value
                        .downcast_ref::<u8>()
                        .map(|bits| KittyFlags::from_bits_truncate(*bits))
                })
                .map(OptionValue::KittyFlags),
            EncoderOption::MacosOptionAsAlt => value
                .downcast_ref::<OptionAsAlt>()
                .copied()
                .or_else(|| {
                    value
                        .downcast_ref::<u8>()
                        .and_then(|raw| OptionAsAlt::from_raw(*raw))
                })
                .map(OptionValue::OptionAsAlt),
            _ => value.downcast_ref::<bool>().copied().map(OptionValue::Bool),
        };

        match typed {
            Some(typed) => self.set_option(option, Some(typed)),
            None => {
                debug!("Untyped value for {:?} has the wrong type", option);
                Err(Error::InvalidValue("option value has the wrong type"))
            }
        }
    }

    /// Encode `event` into `buf`, returning the number of bytes written.
    ///
    /// Many events legitimately produce no bytes. If `buf` is too small
    /// the error carries the exact size a retry needs.
    pub fn encode(&self, event: &KeyEvent<'_>, buf: &mut [u8]) -> Result<usize> {
        let mut out = Output::new(buf);
        self.write(event, &mut out);

        let len = out.len();
        if !out.fits() {
            trace!("Key {:?} needs {} bytes, buffer has {}", event.key(), len, out.capacity());
            return Err(Error::BufferTooSmall { required: len });
        }
        trace!("Encoded key {:?} into {} bytes", event.key(), len);
        Ok(len)
    }

    /// Encode `event` and append the bytes to `out`
    pub fn encode_to_vec(&self, event: &KeyEvent<'_>, out: &mut Vec<u8>) -> Result<usize> {
        let mut probe = Output::new(&mut []);
        self.write(event, &mut probe);
        let len = probe.len();

        out.try_reserve(len)?;
        let start = out.len();
        out.resize(start + len, 0);
        self.encode(event, &mut out[start..])
    }

    fn write(&self, event: &KeyEvent<'_>, out: &mut Output<'_>) {
        if self.options.kitty_flags.is_empty() {
            legacy::encode(event, &self.options, self.macos, out);
        } else {
            kitty::encode(event, &self.options, self.macos, out);
        }
    }
}

/// Output cursor over a caller buffer.
///
/// Writes past the end are counted but dropped, so one pass yields both
/// the bytes and the exact length required.
pub(crate) struct Output<'b> {
    buf: &'b mut [u8],
    len: usize,
}

impl<'b> Output<'b> {
    pub(crate) fn new(buf: &'b mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn fits(&self) -> bool {
        self.len <= self.buf.len()
    }

    pub(crate) fn bytes(&mut self, bytes: &[u8]) {
        let end = self.len + bytes.len();
        if let Some(dst) = self.buf.get_mut(self.len..end) {
            dst.copy_from_slice(bytes);
        }
        self.len = end;
    }

    pub(crate) fn byte(&mut self, byte: u8) {
        self.bytes(&[byte]);
    }

    /// Decimal representation of `n`
    pub(crate) fn num(&mut self, n: u32) {
        let mut digits = [0u8; 10];
        let mut i = digits.len();
        let mut n = n;
        loop {
            i -= 1;
            digits[i] = b'0' + (n % 10) as u8;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        self.bytes(&digits[i..]);
    }

    /// `ESC [`
    pub(crate) fn csi(&mut self) {
        self.bytes(b"\x1b[");
    }

    /// `ESC O`
    pub(crate) fn ss3(&mut self, final_byte: u8) {
        self.bytes(&[0x1b, b'O', final_byte]);
    }
}
