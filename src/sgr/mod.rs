//! SGR (Select Graphic Rendition) attribute decoder
//!
//! Turns the numeric parameter list of a `CSI ... m` sequence into a stream
//! of [`Attribute`] values. The parameters must already be extracted from
//! the escape sequence; for `ESC[1;38:2:255:0:0m` the caller supplies
//! `[1, 38, 2, 255, 0, 0]` along with the separator that followed each
//! parameter.
//!
//! Parameter consumption depends on the grammar:
//! - Simple attributes (bold, italic, ...) consume one parameter
//! - Colon-joined runs (`38:2:r:g:b`, `4:3`) form one compound attribute
//! - Legacy semicolon colors (`38;5;n`, `38;2;r;g;b`) claim a fixed number
//!   of following parameters by position
//!
//! Anything that does not match a known grammar decodes to
//! [`Attribute::Unknown`] and iteration resumes after the offending run.
//! Decoding never fails and never reads past the end of the list.

mod attribute;
mod parser;

pub use attribute::{Attribute, AttributeTag, Underline, Unknown};
pub use parser::{Attributes, Parser, Separator};
