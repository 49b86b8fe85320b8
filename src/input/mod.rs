//! Key Encoding Module
//!
//! Translates structured key events into the byte sequences terminal
//! applications expect.
//!
//! # Protocols
//!
//! The encoder picks one protocol per event, in this order:
//! - Kitty keyboard protocol, whenever any Kitty flag is set
//! - xterm modifyOtherKeys level 2 (`CSI 27 ; mods ; code ~`) for modified
//!   text keys
//! - Legacy encoding: PC-style function keys, C0 control characters,
//!   `CSI code ; mods u` for other ctrl combinations, ESC-prefixed Alt,
//!   then plain text
//!
//! Cursor and keypad keys honor DECCKM and DECKPAM.

mod encoder;
mod event;
mod function_keys;
mod key;
mod kitty;
mod legacy;

pub use encoder::{Encoder, EncoderOption, EncoderOptions, KittyFlags, OptionAsAlt, OptionValue};
pub use event::{KeyAction, KeyEvent, Mods, Side};
pub use key::Key;
