//! Mochi VT Library
//!
//! Terminal control-sequence engines, usable without a terminal screen:
//!
//! - `osc`: streaming OSC parser producing structured commands
//! - `sgr`: SGR parameter decoder producing text attributes
//! - `input`: key encoder (legacy, xterm modifyOtherKeys, Kitty protocol)
//! - `paste`: paste safety check
//!
//! Each engine is a plain value owned by the caller. None of them share
//! state, so separate instances may be used from separate threads.

pub mod color;
pub mod config;
pub mod error;
pub mod input;
pub mod osc;
pub mod paste;
pub mod sgr;

pub use color::{Named, PaletteIndex, Rgb};
pub use config::{Config, ConfigError};
pub use error::{Error, Result, ResultCode};
