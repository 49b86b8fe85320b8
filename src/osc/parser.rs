//! OSC byte-at-a-time state machine
//!
//! The parser only tracks the numeric command id; everything after the
//! first `;` is buffered and decoded by [`Parser::end`] according to the
//! grammar of that command.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::command::{
    ColorOp, ColorSource, ColorTarget, Command, DynamicColor, KittyColorKey, KittyColorOp,
    ProgressState, PromptKind, SpecialColor, TabTitle, Terminator,
};
use crate::color::Rgb;
use crate::error::Result;

const OSC_CLIPBOARD: u16 = 52;

/// Buffer limits for the OSC parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscConfig {
    /// Maximum body length for every command except clipboard writes
    pub max_bytes: usize,
    /// Maximum body length for OSC 52 clipboard payloads
    pub max_clipboard_bytes: usize,
}

impl Default for OscConfig {
    fn default() -> Self {
        Self {
            max_bytes: 2048,
            max_clipboard_bytes: 1024 * 1024,
        }
    }
}

/// Parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing consumed yet
    Start,
    /// Accumulating the numeric command id
    Prefix,
    /// Buffering the command body
    Body,
    /// Sequence is malformed; remaining bytes are ignored
    Invalid,
}

/// OSC parser
#[derive(Debug)]
pub struct Parser {
    state: State,
    id: u16,
    buf: Vec<u8>,
    config: OscConfig,
    /// Set by `end`; the next byte starts a fresh sequence
    complete: bool,
    color_ops: Vec<ColorOp>,
    kitty_ops: Vec<KittyColorOp>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a parser with the default buffer limits
    pub fn new() -> Self {
        Self::with_config(OscConfig::default())
    }

    pub fn with_config(config: OscConfig) -> Self {
        Self {
            state: State::Start,
            id: 0,
            buf: Vec::new(),
            config,
            complete: false,
            color_ops: Vec::new(),
            kitty_ops: Vec::new(),
        }
    }

    pub fn config(&self) -> &OscConfig {
        &self.config
    }

    /// Return to the initial state without producing a command
    pub fn reset(&mut self) {
        self.state = State::Start;
        self.id = 0;
        self.buf.clear();
        self.complete = false;
        self.color_ops.clear();
        self.kitty_ops.clear();
    }

    /// Consume one byte of the sequence body.
    ///
    /// Malformed input never errors; it moves the parser to a state where
    /// `end` yields `Command::Invalid`. An error is returned only when the
    /// body buffer cannot grow.
    pub fn next(&mut self, byte: u8) -> Result<()> {
        if self.complete {
            self.reset();
        }

        match self.state {
            State::Start => match byte {
                b'0'..=b'9' => {
                    self.id = u16::from(byte - b'0');
                    self.state = State::Prefix;
                }
                _ => self.invalidate(byte),
            },
            State::Prefix => match byte {
                b'0'..=b'9' => {
                    match self
                        .id
                        .checked_mul(10)
                        .and_then(|id| id.checked_add(u16::from(byte - b'0')))
                    {
                        Some(id) => self.id = id,
                        None => self.invalidate(byte),
                    }
                }
                b';' => self.state = State::Body,
                _ => self.invalidate(byte),
            },
            State::Body => return self.push_body(byte),
            State::Invalid => {}
        }
        Ok(())
    }

    /// Convenience wrapper feeding a whole slice through [`Parser::next`]
    pub fn feed(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.next(byte)?;
        }
        Ok(())
    }

    /// Finish the sequence and decode it.
    ///
    /// `terminator` is the byte that ended the sequence: BEL (`0x07`) or
    /// anything else for ST. The returned command borrows the parser's
    /// buffer.
    pub fn end(&mut self, terminator: u8) -> Command<'_> {
        let terminator = Terminator::from(terminator);
        self.complete = true;
        self.color_ops.clear();
        self.kitty_ops.clear();

        let has_body = match self.state {
            State::Prefix => false,
            State::Body => true,
            State::Start | State::Invalid => {
                debug!("OSC sequence ended in state {:?}", self.state);
                return Command::Invalid;
            }
        };

        let body = match std::str::from_utf8(&self.buf) {
            Ok(body) => body,
            Err(_) => {
                debug!("OSC {} body is not valid UTF-8", self.id);
                return Command::Invalid;
            }
        };

        let id = self.id;
        let body = if has_body { Some(body) } else { None };
        match decode(
            id,
            body,
            terminator,
            &mut self.color_ops,
            &mut self.kitty_ops,
        ) {
            Some(command) => command,
            None => {
                debug!("Unrecognized OSC {} sequence", id);
                Command::Invalid
            }
        }
    }

    fn invalidate(&mut self, byte: u8) {
        trace!("OSC rejected byte 0x{:02x} in state {:?}", byte, self.state);
        self.state = State::Invalid;
        self.buf.clear();
    }

    fn push_body(&mut self, byte: u8) -> Result<()> {
        let limit = if self.id == OSC_CLIPBOARD {
            self.config.max_clipboard_bytes
        } else {
            self.config.max_bytes
        };

        if self.buf.len() >= limit {
            warn!("OSC {} body exceeds {} bytes, discarding", self.id, limit);
            self.state = State::Invalid;
            self.buf.clear();
            return Ok(());
        }

        if self.buf.len() == self.buf.capacity() {
            let additional = self.buf.capacity().max(64).min(limit - self.buf.len());
            if let Err(err) = self.buf.try_reserve_exact(additional) {
                self.state = State::Invalid;
                self.buf.clear();
                return Err(err.into());
            }
        }
        self.buf.push(byte);
        Ok(())
    }
}

/// Decode a finished sequence. `body` is `None` when no `;` followed the id.
fn decode<'a>(
    id: u16,
    body: Option<&'a str>,
    terminator: Terminator,
    color_ops: &'a mut Vec<ColorOp>,
    kitty_ops: &'a mut Vec<KittyColorOp>,
) -> Option<Command<'a>> {
    // Resets accept a missing body
    match id {
        104 => return reset_palette(body, terminator, color_ops),
        105 => return reset_special(body, terminator, color_ops),
        110..=119 => return reset_dynamic(id, terminator, color_ops),
        _ => {}
    }

    let body = body?;
    match id {
        0 | 2 => Some(Command::ChangeWindowTitle(body)),
        1 => Some(Command::ChangeWindowIcon(body)),
        4 => set_palette(body, terminator, color_ops),
        5 => set_special(body, terminator, color_ops),
        7 => Some(Command::ReportPwd { value: body }),
        8 => hyperlink(body),
        9 => conemu(body),
        10..=19 => set_dynamic(id, body, terminator, color_ops),
        21 => kitty_color(body, terminator, kitty_ops),
        22 => Some(Command::MouseShape { value: body }),
        OSC_CLIPBOARD => clipboard(body),
        133 => semantic_prompt(body),
        777 => rxvt_extension(body),
        _ => None,
    }
}

fn push_op<T>(ops: &mut Vec<T>, op: T) -> Option<()> {
    ops.try_reserve(1).ok()?;
    ops.push(op);
    Some(())
}

/// `?` asks for a report, anything else must be a color spec
fn color_request(target: ColorTarget, spec: &str) -> Option<ColorOp> {
    if spec == "?" {
        return Some(ColorOp::Report(target));
    }
    match Rgb::parse(spec) {
        Some(color) => Some(ColorOp::Set { target, color }),
        None => {
            trace!("Ignoring unparseable color spec {:?}", spec);
            None
        }
    }
}

/// OSC 4: `index;spec` pairs
fn set_palette<'a>(
    body: &str,
    terminator: Terminator,
    ops: &'a mut Vec<ColorOp>,
) -> Option<Command<'a>> {
    let mut fields = body.split(';');
    while let Some(index) = fields.next() {
        let Some(spec) = fields.next() else {
            trace!("OSC 4 index {:?} without a color", index);
            break;
        };
        let Ok(index) = index.parse::<u8>() else {
            trace!("OSC 4 palette index {:?} out of range", index);
            continue;
        };
        if let Some(op) = color_request(ColorTarget::Palette(index), spec) {
            push_op(ops, op)?;
        }
    }
    Some(Command::ColorOperation {
        source: ColorSource::Palette,
        operations: ops,
        terminator,
    })
}

/// OSC 5: `index;spec` pairs addressing the special colors
fn set_special<'a>(
    body: &str,
    terminator: Terminator,
    ops: &'a mut Vec<ColorOp>,
) -> Option<Command<'a>> {
    let mut fields = body.split(';');
    while let Some(index) = fields.next() {
        let Some(spec) = fields.next() else {
            break;
        };
        let Some(special) = index.parse::<u16>().ok().and_then(SpecialColor::from_index) else {
            trace!("OSC 5 special color {:?} unknown", index);
            continue;
        };
        if let Some(op) = color_request(ColorTarget::Special(special), spec) {
            push_op(ops, op)?;
        }
    }
    Some(Command::ColorOperation {
        source: ColorSource::Special,
        operations: ops,
        terminator,
    })
}

/// OSC 10-19: each field addresses the next dynamic color in turn
fn set_dynamic<'a>(
    id: u16,
    body: &str,
    terminator: Terminator,
    ops: &'a mut Vec<ColorOp>,
) -> Option<Command<'a>> {
    let mut number = id;
    for spec in body.split(';') {
        let Some(dynamic) = DynamicColor::from_osc(number) else {
            break;
        };
        if let Some(op) = color_request(ColorTarget::Dynamic(dynamic), spec) {
            push_op(ops, op)?;
        }
        number += 1;
    }
    Some(Command::ColorOperation {
        source: ColorSource::Dynamic,
        operations: ops,
        terminator,
    })
}

/// OSC 104: reset listed palette entries, or all of them
fn reset_palette<'a>(
    body: Option<&str>,
    terminator: Terminator,
    ops: &'a mut Vec<ColorOp>,
) -> Option<Command<'a>> {
    match body {
        None | Some("") => push_op(ops, ColorOp::ResetAllPalette)?,
        Some(body) => {
            for index in body.split(';') {
                match index.parse::<u8>() {
                    Ok(index) => push_op(ops, ColorOp::Reset(ColorTarget::Palette(index)))?,
                    Err(_) => trace!("OSC 104 palette index {:?} out of range", index),
                }
            }
        }
    }
    Some(Command::ColorOperation {
        source: ColorSource::ResetPalette,
        operations: ops,
        terminator,
    })
}

/// OSC 105: reset listed special colors, or all of them
fn reset_special<'a>(
    body: Option<&str>,
    terminator: Terminator,
    ops: &'a mut Vec<ColorOp>,
) -> Option<Command<'a>> {
    match body {
        None | Some("") => push_op(ops, ColorOp::ResetAllSpecial)?,
        Some(body) => {
            for index in body.split(';') {
                if let Some(special) = index.parse::<u16>().ok().and_then(SpecialColor::from_index) {
                    push_op(ops, ColorOp::Reset(ColorTarget::Special(special)))?;
                }
            }
        }
    }
    Some(Command::ColorOperation {
        source: ColorSource::ResetSpecial,
        operations: ops,
        terminator,
    })
}

/// OSC 110-119: reset one dynamic color; any body is ignored
fn reset_dynamic<'a>(
    id: u16,
    terminator: Terminator,
    ops: &'a mut Vec<ColorOp>,
) -> Option<Command<'a>> {
    let dynamic = DynamicColor::from_osc(id - 100)?;
    push_op(ops, ColorOp::Reset(ColorTarget::Dynamic(dynamic)))?;
    Some(Command::ColorOperation {
        source: ColorSource::ResetDynamic,
        operations: ops,
        terminator,
    })
}

/// OSC 21: `key=value` list. `?` queries, an empty value resets.
fn kitty_color<'a>(
    body: &str,
    terminator: Terminator,
    ops: &'a mut Vec<KittyColorOp>,
) -> Option<Command<'a>> {
    for entry in body.split(';').filter(|entry| !entry.is_empty()) {
        let Some((key, value)) = entry.split_once('=') else {
            trace!("Kitty color entry {:?} has no value", entry);
            continue;
        };
        let Some(key) = KittyColorKey::parse(key) else {
            trace!("Kitty color key {:?} unknown", key);
            continue;
        };
        let op = match value {
            "?" => KittyColorOp::Query(key),
            "" => KittyColorOp::Reset(key),
            spec => match Rgb::parse(spec) {
                Some(color) => KittyColorOp::Set { key, color },
                None => {
                    trace!("Kitty color value {:?} unparseable", spec);
                    continue;
                }
            },
        };
        push_op(ops, op)?;
    }
    Some(Command::KittyColorProtocol {
        operations: ops,
        terminator,
    })
}

/// OSC 8: `params;uri`. An empty uri closes the current link.
fn hyperlink(body: &str) -> Option<Command<'_>> {
    let (params, uri) = body.split_once(';')?;
    if uri.is_empty() {
        return Some(Command::HyperlinkEnd);
    }
    let id = params
        .split(':')
        .find_map(|param| param.strip_prefix("id="))
        .filter(|id| !id.is_empty());
    Some(Command::HyperlinkStart { id, uri })
}

/// OSC 9: ConEmu sub-commands, otherwise an iTerm2 notification
fn conemu(body: &str) -> Option<Command<'_>> {
    let (sub, rest) = match body.split_once(';') {
        Some((sub, rest)) => (sub, Some(rest)),
        None => (body, None),
    };

    match sub {
        "1" => {
            let duration_ms = rest
                .and_then(|ms| ms.parse::<u64>().ok())
                .map_or(100, |ms| ms.min(10_000) as u16);
            Some(Command::ConEmuSleep { duration_ms })
        }
        "2" => rest.map(Command::ConEmuShowMessageBox),
        "3" => Some(Command::ConEmuChangeTabTitle(match rest {
            Some(title) if !title.is_empty() => TabTitle::Set(title),
            _ => TabTitle::Reset,
        })),
        "4" => progress_report(rest.unwrap_or("")),
        "5" => Some(Command::ConEmuWaitInput),
        "6" => rest.map(Command::ConEmuGuiMacro),
        _ => Some(Command::ShowDesktopNotification { title: "", body }),
    }
}

/// OSC 9;4: `state;progress`
fn progress_report(args: &str) -> Option<Command<'static>> {
    let mut fields = args.split(';');
    let state = match fields.next() {
        None | Some("") => ProgressState::Remove,
        Some(code) => ProgressState::from_code(code.parse().ok()?)?,
    };
    let progress = match state {
        ProgressState::Remove | ProgressState::Indeterminate => None,
        _ => fields
            .next()
            .and_then(|p| p.parse::<u16>().ok())
            .map(|p| p.min(100) as u8),
    };
    Some(Command::ConEmuProgressReport { state, progress })
}

/// OSC 52: `kind;data`, kind defaults to the clipboard
fn clipboard(body: &str) -> Option<Command<'_>> {
    let (kind, data) = body.split_once(';')?;
    let kind = kind.bytes().next().unwrap_or(b'c');
    Some(Command::ClipboardContents { kind, data })
}

/// OSC 133: semantic prompt marks
fn semantic_prompt(body: &str) -> Option<Command<'_>> {
    let mut fields = body.split(';');
    match fields.next()? {
        "A" => {
            let mut aid = None;
            let mut kind = PromptKind::default();
            let mut redraw = true;
            for option in fields {
                match option.split_once('=') {
                    Some(("aid", value)) => aid = Some(value),
                    Some(("k", value)) => match PromptKind::parse(value) {
                        Some(k) => kind = k,
                        None => trace!("Unknown prompt kind {:?}", value),
                    },
                    Some(("redraw", "0")) => redraw = false,
                    Some(("redraw", "1")) => redraw = true,
                    _ => trace!("Ignoring prompt option {:?}", option),
                }
            }
            Some(Command::PromptStart { aid, kind, redraw })
        }
        "B" => Some(Command::PromptEnd),
        "C" => Some(Command::EndOfInput),
        "D" => Some(Command::EndOfCommand {
            exit_code: fields.next().and_then(|code| code.parse().ok()),
        }),
        _ => None,
    }
}

/// OSC 777: only `notify;title;body` is recognized
fn rxvt_extension(body: &str) -> Option<Command<'_>> {
    let (extension, rest) = body.split_once(';')?;
    if extension != "notify" {
        return None;
    }
    let (title, body) = rest.split_once(';')?;
    Some(Command::ShowDesktopNotification { title, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(parser: &mut Parser, bytes: &[u8]) {
        parser.feed(bytes).unwrap();
    }

    #[test]
    fn test_window_title() {
        let mut parser = Parser::new();
        feed(&mut parser, b"0;hello world");
        let cmd = parser.end(0x07);
        assert_eq!(cmd, Command::ChangeWindowTitle("hello world"));
        assert_eq!(cmd.title(), Some("hello world"));
        assert_eq!(cmd.terminator(), None);
    }

    #[test]
    fn test_empty_is_invalid() {
        let mut parser = Parser::new();
        assert_eq!(parser.end(0x07), Command::Invalid);
    }

    #[test]
    fn test_non_digit_prefix_is_invalid() {
        let mut parser = Parser::new();
        feed(&mut parser, b"x;title");
        assert_eq!(parser.end(0x07), Command::Invalid);
    }

    #[test]
    fn test_id_overflow_is_invalid() {
        let mut parser = Parser::new();
        feed(&mut parser, b"9999999;x");
        assert_eq!(parser.end(0x07), Command::Invalid);
    }

    #[test]
    fn test_unknown_id_is_invalid() {
        let mut parser = Parser::new();
        feed(&mut parser, b"1337;whatever");
        assert_eq!(parser.end(0x5c), Command::Invalid);
    }

    #[test]
    fn test_title_without_body_is_invalid() {
        let mut parser = Parser::new();
        feed(&mut parser, b"2");
        assert_eq!(parser.end(0x07), Command::Invalid);
    }

    #[test]
    fn test_body_limit() {
        let mut parser = Parser::with_config(OscConfig {
            max_bytes: 8,
            max_clipboard_bytes: 16,
        });
        feed(&mut parser, b"0;123456789");
        assert_eq!(parser.end(0x07), Command::Invalid);

        feed(&mut parser, b"52;c;0123456789");
        assert!(matches!(
            parser.end(0x07),
            Command::ClipboardContents { kind: b'c', .. }
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut parser = Parser::new();
        feed(&mut parser, b"0;\xff\xfe");
        assert_eq!(parser.end(0x07), Command::Invalid);
    }

    #[test]
    fn test_next_after_end_starts_fresh() {
        let mut parser = Parser::new();
        feed(&mut parser, b"0;first");
        assert_eq!(parser.end(0x07), Command::ChangeWindowTitle("first"));
        feed(&mut parser, b"1;second");
        assert_eq!(parser.end(0x07), Command::ChangeWindowIcon("second"));
    }

    #[test]
    fn test_reset_discards_sequence() {
        let mut parser = Parser::new();
        feed(&mut parser, b"0;abandoned");
        parser.reset();
        feed(&mut parser, b"2;kept");
        assert_eq!(parser.end(0x07), Command::ChangeWindowTitle("kept"));
    }

    #[test]
    fn test_color_terminator_retained() {
        let mut parser = Parser::new();
        feed(&mut parser, b"10;?");
        let cmd = parser.end(0x07);
        assert_eq!(cmd.terminator(), Some(Terminator::Bel));
        assert_eq!(
            cmd,
            Command::ColorOperation {
                source: ColorSource::Dynamic,
                operations: &[ColorOp::Report(ColorTarget::Dynamic(
                    DynamicColor::Foreground
                ))],
                terminator: Terminator::Bel,
            }
        );
    }

    #[test]
    fn test_progress_clamps() {
        let mut parser = Parser::new();
        feed(&mut parser, b"9;4;1;250");
        assert_eq!(
            parser.end(0x07),
            Command::ConEmuProgressReport {
                state: ProgressState::Set,
                progress: Some(100),
            }
        );
    }
}
