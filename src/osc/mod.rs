//! OSC (Operating System Command) parser
//!
//! Consumes the body of an `ESC ] ... ST` sequence one byte at a time and
//! produces a single structured [`Command`] when the terminator arrives.
//! The caller strips the leading `ESC ]` and the terminator itself; the
//! terminator byte is passed to [`Parser::end`] so commands that answer
//! with a response know which form to reply with.
//!
//! Supported commands:
//! - 0, 1, 2: window title and icon
//! - 4, 5, 10-19, 104, 105, 110-119: color operations
//! - 7: report working directory
//! - 8: hyperlinks
//! - 9: ConEmu extensions and iTerm2 notifications
//! - 21: Kitty color protocol
//! - 22: mouse shape
//! - 52: clipboard
//! - 133: semantic prompts
//! - 777: desktop notifications

mod command;
mod parser;

pub use command::{
    ColorOp, ColorSource, ColorTarget, Command, CommandType, DynamicColor, KittyColorKey,
    KittyColorOp, ProgressState, PromptKind, SpecialColor, TabTitle, Terminator,
};
pub use parser::{OscConfig, Parser};
