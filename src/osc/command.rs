//! OSC command values
//!
//! String payloads borrow from the parser that produced them, so a command
//! must be dropped (or copied out) before the parser is used again.

use serde::{Deserialize, Serialize};

use crate::color::{PaletteIndex, Rgb};

/// Sequence terminator. BEL is `0x07`; any other byte is treated as ST.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terminator {
    Bel,
    #[default]
    St,
}

impl Terminator {
    /// Bytes to end a response with
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Terminator::Bel => b"\x07",
            Terminator::St => b"\x1b\\",
        }
    }
}

impl From<u8> for Terminator {
    fn from(byte: u8) -> Self {
        if byte == 0x07 {
            Terminator::Bel
        } else {
            Terminator::St
        }
    }
}

/// `k=` option of a semantic prompt start (OSC 133;A)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromptKind {
    #[default]
    Primary,
    Continuation,
    Secondary,
    Right,
}

impl PromptKind {
    /// Decode the value of a `k=` option
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "i" => Some(PromptKind::Primary),
            "c" => Some(PromptKind::Continuation),
            "s" => Some(PromptKind::Secondary),
            "r" => Some(PromptKind::Right),
            _ => None,
        }
    }
}

/// ConEmu tab title change (OSC 9;3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TabTitle<'a> {
    Set(&'a str),
    Reset,
}

/// ConEmu progress report state (OSC 9;4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ProgressState {
    Remove = 0,
    Set = 1,
    Error = 2,
    Indeterminate = 3,
    Pause = 4,
}

impl ProgressState {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ProgressState::Remove),
            1 => Some(ProgressState::Set),
            2 => Some(ProgressState::Error),
            3 => Some(ProgressState::Indeterminate),
            4 => Some(ProgressState::Pause),
            _ => None,
        }
    }
}

/// Which OSC family produced a color operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSource {
    /// OSC 4
    Palette,
    /// OSC 5
    Special,
    /// OSC 10-19
    Dynamic,
    /// OSC 104
    ResetPalette,
    /// OSC 105
    ResetSpecial,
    /// OSC 110-119
    ResetDynamic,
}

/// xterm special colors addressed by OSC 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SpecialColor {
    Bold = 0,
    Underline = 1,
    Blink = 2,
    Reverse = 3,
    Italic = 4,
}

impl SpecialColor {
    pub fn from_index(index: u16) -> Option<Self> {
        match index {
            0 => Some(SpecialColor::Bold),
            1 => Some(SpecialColor::Underline),
            2 => Some(SpecialColor::Blink),
            3 => Some(SpecialColor::Reverse),
            4 => Some(SpecialColor::Italic),
            _ => None,
        }
    }
}

/// xterm dynamic colors, numbered by the OSC that sets them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DynamicColor {
    Foreground = 10,
    Background = 11,
    Cursor = 12,
    PointerForeground = 13,
    PointerBackground = 14,
    TektronixForeground = 15,
    TektronixBackground = 16,
    HighlightBackground = 17,
    TektronixCursor = 18,
    HighlightForeground = 19,
}

impl DynamicColor {
    pub fn from_osc(number: u16) -> Option<Self> {
        match number {
            10 => Some(DynamicColor::Foreground),
            11 => Some(DynamicColor::Background),
            12 => Some(DynamicColor::Cursor),
            13 => Some(DynamicColor::PointerForeground),
            14 => Some(DynamicColor::PointerBackground),
            15 => Some(DynamicColor::TektronixForeground),
            16 => Some(DynamicColor::TektronixBackground),
            17 => Some(DynamicColor::HighlightBackground),
            18 => Some(DynamicColor::TektronixCursor),
            19 => Some(DynamicColor::HighlightForeground),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTarget {
    Palette(PaletteIndex),
    Special(SpecialColor),
    Dynamic(DynamicColor),
}

/// One request inside an OSC color command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorOp {
    Set { target: ColorTarget, color: Rgb },
    Reset(ColorTarget),
    Report(ColorTarget),
    /// OSC 104 without arguments
    ResetAllPalette,
    /// OSC 105 without arguments
    ResetAllSpecial,
}

/// Key addressed by the Kitty color protocol (OSC 21)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KittyColorKey {
    Palette(PaletteIndex),
    Foreground,
    Background,
    SelectionForeground,
    SelectionBackground,
    Cursor,
    CursorText,
    VisualBell,
}

impl KittyColorKey {
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "foreground" => Some(KittyColorKey::Foreground),
            "background" => Some(KittyColorKey::Background),
            "selection_foreground" => Some(KittyColorKey::SelectionForeground),
            "selection_background" => Some(KittyColorKey::SelectionBackground),
            "cursor" => Some(KittyColorKey::Cursor),
            "cursor_text" => Some(KittyColorKey::CursorText),
            "visual_bell" => Some(KittyColorKey::VisualBell),
            _ => key.parse::<u8>().ok().map(KittyColorKey::Palette),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KittyColorOp {
    Query(KittyColorKey),
    Reset(KittyColorKey),
    Set { key: KittyColorKey, color: Rgb },
}

/// Stable numeric identifier for each command kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CommandType {
    Invalid = 0,
    ChangeWindowTitle = 1,
    ChangeWindowIcon = 2,
    PromptStart = 3,
    PromptEnd = 4,
    EndOfInput = 5,
    EndOfCommand = 6,
    ClipboardContents = 7,
    ReportPwd = 8,
    MouseShape = 9,
    ColorOperation = 10,
    KittyColorProtocol = 11,
    ShowDesktopNotification = 12,
    HyperlinkStart = 13,
    HyperlinkEnd = 14,
    ConEmuSleep = 15,
    ConEmuShowMessageBox = 16,
    ConEmuChangeTabTitle = 17,
    ConEmuProgressReport = 18,
    ConEmuWaitInput = 19,
    ConEmuGuiMacro = 20,
}

/// A parsed OSC command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Command<'a> {
    Invalid,
    ChangeWindowTitle(&'a str),
    ChangeWindowIcon(&'a str),
    PromptStart {
        aid: Option<&'a str>,
        kind: PromptKind,
        redraw: bool,
    },
    PromptEnd,
    EndOfInput,
    EndOfCommand {
        exit_code: Option<u8>,
    },
    ClipboardContents {
        kind: u8,
        data: &'a str,
    },
    ReportPwd {
        value: &'a str,
    },
    MouseShape {
        value: &'a str,
    },
    ColorOperation {
        source: ColorSource,
        operations: &'a [ColorOp],
        terminator: Terminator,
    },
    KittyColorProtocol {
        operations: &'a [KittyColorOp],
        terminator: Terminator,
    },
    ShowDesktopNotification {
        title: &'a str,
        body: &'a str,
    },
    HyperlinkStart {
        id: Option<&'a str>,
        uri: &'a str,
    },
    HyperlinkEnd,
    ConEmuSleep {
        duration_ms: u16,
    },
    ConEmuShowMessageBox(&'a str),
    ConEmuChangeTabTitle(TabTitle<'a>),
    ConEmuProgressReport {
        state: ProgressState,
        progress: Option<u8>,
    },
    ConEmuWaitInput,
    ConEmuGuiMacro(&'a str),
}

impl<'a> Command<'a> {
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Invalid => CommandType::Invalid,
            Command::ChangeWindowTitle(_) => CommandType::ChangeWindowTitle,
            Command::ChangeWindowIcon(_) => CommandType::ChangeWindowIcon,
            Command::PromptStart { .. } => CommandType::PromptStart,
            Command::PromptEnd => CommandType::PromptEnd,
            Command::EndOfInput => CommandType::EndOfInput,
            Command::EndOfCommand { .. } => CommandType::EndOfCommand,
            Command::ClipboardContents { .. } => CommandType::ClipboardContents,
            Command::ReportPwd { .. } => CommandType::ReportPwd,
            Command::MouseShape { .. } => CommandType::MouseShape,
            Command::ColorOperation { .. } => CommandType::ColorOperation,
            Command::KittyColorProtocol { .. } => CommandType::KittyColorProtocol,
            Command::ShowDesktopNotification { .. } => CommandType::ShowDesktopNotification,
            Command::HyperlinkStart { .. } => CommandType::HyperlinkStart,
            Command::HyperlinkEnd => CommandType::HyperlinkEnd,
            Command::ConEmuSleep { .. } => CommandType::ConEmuSleep,
            Command::ConEmuShowMessageBox(_) => CommandType::ConEmuShowMessageBox,
            Command::ConEmuChangeTabTitle(_) => CommandType::ConEmuChangeTabTitle,
            Command::ConEmuProgressReport { .. } => CommandType::ConEmuProgressReport,
            Command::ConEmuWaitInput => CommandType::ConEmuWaitInput,
            Command::ConEmuGuiMacro(_) => CommandType::ConEmuGuiMacro,
        }
    }

    /// Window title carried by a `ChangeWindowTitle` command
    pub fn title(&self) -> Option<&'a str> {
        match self {
            Command::ChangeWindowTitle(title) => Some(title),
            _ => None,
        }
    }

    /// Terminator retained for commands that reply to the application
    pub fn terminator(&self) -> Option<Terminator> {
        match self {
            Command::ColorOperation { terminator, .. }
            | Command::KittyColorProtocol { terminator, .. } => Some(*terminator),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Command::Invalid)
    }
}
