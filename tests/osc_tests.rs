//! OSC conformance tests
//!
//! Each case feeds a sequence body (without `ESC ]` and the terminator)
//! and checks the decoded command.

use mochi_vt::osc::{
    ColorOp, ColorSource, ColorTarget, Command, CommandType, DynamicColor, KittyColorKey,
    KittyColorOp, OscConfig, Parser, ProgressState, PromptKind, SpecialColor, TabTitle,
    Terminator,
};
use mochi_vt::Rgb;

const BEL: u8 = 0x07;
const ESC: u8 = 0x1b;

fn parse<'p>(parser: &'p mut Parser, body: &[u8], terminator: u8) -> Command<'p> {
    parser.reset();
    parser.feed(body).unwrap();
    parser.end(terminator)
}

#[test]
fn test_command_type_table() {
    let cases: &[(&[u8], CommandType)] = &[
        (b"0;title", CommandType::ChangeWindowTitle),
        (b"1;icon", CommandType::ChangeWindowIcon),
        (b"2;title", CommandType::ChangeWindowTitle),
        (b"4;1;?", CommandType::ColorOperation),
        (b"7;file:///home/user", CommandType::ReportPwd),
        (b"8;;http://example.com", CommandType::HyperlinkStart),
        (b"8;;", CommandType::HyperlinkEnd),
        (b"9;1;500", CommandType::ConEmuSleep),
        (b"9;2;hello", CommandType::ConEmuShowMessageBox),
        (b"9;3;tab", CommandType::ConEmuChangeTabTitle),
        (b"9;4;1;50", CommandType::ConEmuProgressReport),
        (b"9;5", CommandType::ConEmuWaitInput),
        (b"9;6;macro", CommandType::ConEmuGuiMacro),
        (b"9;build finished", CommandType::ShowDesktopNotification),
        (b"10;?", CommandType::ColorOperation),
        (b"21;foreground=?", CommandType::KittyColorProtocol),
        (b"22;pointer", CommandType::MouseShape),
        (b"52;c;aGVsbG8=", CommandType::ClipboardContents),
        (b"104", CommandType::ColorOperation),
        (b"110", CommandType::ColorOperation),
        (b"133;A", CommandType::PromptStart),
        (b"133;B", CommandType::PromptEnd),
        (b"133;C", CommandType::EndOfInput),
        (b"133;D;0", CommandType::EndOfCommand),
        (b"777;notify;title;body", CommandType::ShowDesktopNotification),
        (b"", CommandType::Invalid),
        (b"x;title", CommandType::Invalid),
        (b"999;anything", CommandType::Invalid),
        (b"133;Z", CommandType::Invalid),
        (b"777;other;x", CommandType::Invalid),
    ];

    let mut parser = Parser::new();
    for (body, expected) in cases {
        let command = parse(&mut parser, body, BEL);
        assert_eq!(
            command.command_type(),
            *expected,
            "body {:?}",
            String::from_utf8_lossy(body)
        );
    }
}

#[test]
fn test_window_title() {
    let mut parser = Parser::new();
    let command = parse(&mut parser, b"2;hello world", BEL);
    assert_eq!(command.title(), Some("hello world"));

    let command = parse(&mut parser, b"0;", BEL);
    assert_eq!(command, Command::ChangeWindowTitle(""));

    let command = parse(&mut parser, "2;caf\u{e9}".as_bytes(), ESC);
    assert_eq!(command.title(), Some("caf\u{e9}"));
}

#[test]
fn test_title_requires_body() {
    let mut parser = Parser::new();
    assert_eq!(parse(&mut parser, b"2", BEL), Command::Invalid);
}

#[test]
fn test_invalid_utf8_title() {
    let mut parser = Parser::new();
    assert_eq!(parse(&mut parser, b"2;\xff\xfe", BEL), Command::Invalid);
}

#[test]
fn test_palette_operations() {
    let mut parser = Parser::new();
    let command = parse(&mut parser, b"4;1;rgb:ff/00/00;2;?;300;red;3;nonsense", ESC);
    let Command::ColorOperation {
        source,
        operations,
        terminator,
    } = command
    else {
        panic!("expected color operation");
    };
    assert_eq!(source, ColorSource::Palette);
    assert_eq!(terminator, Terminator::St);
    assert_eq!(
        operations,
        &[
            ColorOp::Set {
                target: ColorTarget::Palette(1),
                color: Rgb::new(255, 0, 0),
            },
            ColorOp::Report(ColorTarget::Palette(2)),
        ]
    );
}

#[test]
fn test_special_colors() {
    let mut parser = Parser::new();
    let command = parse(&mut parser, b"5;0;#ffffff;9;?", BEL);
    let Command::ColorOperation { operations, .. } = command else {
        panic!("expected color operation");
    };
    assert_eq!(
        operations,
        &[ColorOp::Set {
            target: ColorTarget::Special(SpecialColor::from_index(0).unwrap()),
            color: Rgb::new(255, 255, 255),
        }]
    );
}

#[test]
fn test_dynamic_colors_advance() {
    let mut parser = Parser::new();
    let command = parse(&mut parser, b"10;?;#000000;?", BEL);
    let Command::ColorOperation {
        source,
        operations,
        terminator,
    } = command
    else {
        panic!("expected color operation");
    };
    assert_eq!(source, ColorSource::Dynamic);
    assert_eq!(terminator, Terminator::Bel);
    let targets: Vec<_> = [10, 11, 12]
        .iter()
        .map(|&n| ColorTarget::Dynamic(DynamicColor::from_osc(n).unwrap()))
        .collect();
    assert_eq!(
        operations,
        &[
            ColorOp::Report(targets[0]),
            ColorOp::Set {
                target: targets[1],
                color: Rgb::new(0, 0, 0),
            },
            ColorOp::Report(targets[2]),
        ]
    );
}

#[test]
fn test_color_resets() {
    let mut parser = Parser::new();

    let command = parse(&mut parser, b"104", BEL);
    let Command::ColorOperation { operations, .. } = command else {
        panic!("expected color operation");
    };
    assert_eq!(operations, &[ColorOp::ResetAllPalette]);

    let command = parse(&mut parser, b"104;1;2", BEL);
    let Command::ColorOperation { source, operations, .. } = command else {
        panic!("expected color operation");
    };
    assert_eq!(source, ColorSource::ResetPalette);
    assert_eq!(
        operations,
        &[
            ColorOp::Reset(ColorTarget::Palette(1)),
            ColorOp::Reset(ColorTarget::Palette(2)),
        ]
    );

    let command = parse(&mut parser, b"105;", BEL);
    let Command::ColorOperation { operations, .. } = command else {
        panic!("expected color operation");
    };
    assert_eq!(operations, &[ColorOp::ResetAllSpecial]);

    let command = parse(&mut parser, b"112", BEL);
    let Command::ColorOperation { source, operations, .. } = command else {
        panic!("expected color operation");
    };
    assert_eq!(source, ColorSource::ResetDynamic);
    assert_eq!(
        operations,
        &[ColorOp::Reset(ColorTarget::Dynamic(
            DynamicColor::from_osc(12).unwrap()
        ))]
    );
}

#[test]
fn test_kitty_color_protocol() {
    let mut parser = Parser::new();
    let command = parse(
        &mut parser,
        b"21;foreground=?;background=;cursor=#ff0000;bogus=1;5=blue",
        ESC,
    );
    let Command::KittyColorProtocol {
        operations,
        terminator,
    } = command
    else {
        panic!("expected kitty color protocol");
    };
    assert_eq!(terminator, Terminator::St);
    assert_eq!(
        operations,
        &[
            KittyColorOp::Query(KittyColorKey::Foreground),
            KittyColorOp::Reset(KittyColorKey::Background),
            KittyColorOp::Set {
                key: KittyColorKey::Cursor,
                color: Rgb::new(255, 0, 0),
            },
            KittyColorOp::Set {
                key: KittyColorKey::Palette(5),
                color: Rgb::new(0, 0, 255),
            },
        ]
    );
}

#[test]
fn test_hyperlinks() {
    let mut parser = Parser::new();
    assert_eq!(
        parse(&mut parser, b"8;id=abc:foo=bar;https://example.com", BEL),
        Command::HyperlinkStart {
            id: Some("abc"),
            uri: "https://example.com",
        }
    );
    assert_eq!(
        parse(&mut parser, b"8;;https://example.com", BEL),
        Command::HyperlinkStart {
            id: None,
            uri: "https://example.com",
        }
    );
    assert_eq!(parse(&mut parser, b"8;id=abc;", BEL), Command::HyperlinkEnd);
    assert_eq!(parse(&mut parser, b"8;no-uri", BEL), Command::Invalid);
}

#[test]
fn test_conemu_sleep() {
    let mut parser = Parser::new();
    assert_eq!(
        parse(&mut parser, b"9;1", BEL),
        Command::ConEmuSleep { duration_ms: 100 }
    );
    assert_eq!(
        parse(&mut parser, b"9;1;250", BEL),
        Command::ConEmuSleep { duration_ms: 250 }
    );
    assert_eq!(
        parse(&mut parser, b"9;1;999999", BEL),
        Command::ConEmuSleep {
            duration_ms: 10_000
        }
    );
}

#[test]
fn test_conemu_tab_title() {
    let mut parser = Parser::new();
    assert_eq!(
        parse(&mut parser, b"9;3;build", BEL),
        Command::ConEmuChangeTabTitle(TabTitle::Set("build"))
    );
    assert_eq!(
        parse(&mut parser, b"9;3;", BEL),
        Command::ConEmuChangeTabTitle(TabTitle::Reset)
    );
    assert_eq!(
        parse(&mut parser, b"9;3", BEL),
        Command::ConEmuChangeTabTitle(TabTitle::Reset)
    );
}

#[test]
fn test_conemu_progress() {
    let mut parser = Parser::new();
    assert_eq!(
        parse(&mut parser, b"9;4;1;42", BEL),
        Command::ConEmuProgressReport {
            state: ProgressState::from_code(1).unwrap(),
            progress: Some(42),
        }
    );
    assert_eq!(
        parse(&mut parser, b"9;4;2;250", BEL),
        Command::ConEmuProgressReport {
            state: ProgressState::from_code(2).unwrap(),
            progress: Some(100),
        }
    );
    assert_eq!(
        parse(&mut parser, b"9;4;0", BEL),
        Command::ConEmuProgressReport {
            state: ProgressState::Remove,
            progress: None,
        }
    );
    assert_eq!(parse(&mut parser, b"9;4;7", BEL), Command::Invalid);
}

#[test]
fn test_desktop_notifications() {
    let mut parser = Parser::new();
    assert_eq!(
        parse(&mut parser, b"9;Build finished", BEL),
        Command::ShowDesktopNotification {
            title: "",
            body: "Build finished",
        }
    );
    assert_eq!(
        parse(&mut parser, b"777;notify;Done;All tests passed", BEL),
        Command::ShowDesktopNotification {
            title: "Done",
            body: "All tests passed",
        }
    );
}

#[test]
fn test_clipboard() {
    let mut parser = Parser::new();
    assert_eq!(
        parse(&mut parser, b"52;p;aGVsbG8=", BEL),
        Command::ClipboardContents {
            kind: b'p',
            data: "aGVsbG8=",
        }
    );
    assert_eq!(
        parse(&mut parser, b"52;;?", BEL),
        Command::ClipboardContents {
            kind: b'c',
            data: "?",
        }
    );
}

#[test]
fn test_clipboard_has_larger_limit() {
    let config = OscConfig {
        max_bytes: 16,
        max_clipboard_bytes: 64,
    };
    let mut parser = Parser::with_config(config);

    let mut body = b"52;c;".to_vec();
    body.extend(std::iter::repeat(b'A').take(40));
    assert_eq!(
        parse(&mut parser, &body, BEL).command_type(),
        CommandType::ClipboardContents
    );

    let mut body = b"2;".to_vec();
    body.extend(std::iter::repeat(b'A').take(40));
    assert_eq!(parse(&mut parser, &body, BEL), Command::Invalid);
}

#[test]
fn test_semantic_prompts() {
    let mut parser = Parser::new();
    assert_eq!(
        parse(&mut parser, b"133;A", BEL),
        Command::PromptStart {
            aid: None,
            kind: PromptKind::Primary,
            redraw: true,
        }
    );
    assert_eq!(
        parse(&mut parser, b"133;A;aid=14;k=c;redraw=0", BEL),
        Command::PromptStart {
            aid: Some("14"),
            kind: PromptKind::Continuation,
            redraw: false,
        }
    );
    assert_eq!(
        parse(&mut parser, b"133;D;1", BEL),
        Command::EndOfCommand { exit_code: Some(1) }
    );
    assert_eq!(
        parse(&mut parser, b"133;D", BEL),
        Command::EndOfCommand { exit_code: None }
    );
}

#[test]
fn test_next_byte_after_end_starts_fresh() {
    let mut parser = Parser::new();
    parser.feed(b"2;first").unwrap();
    assert_eq!(parser.end(BEL).title(), Some("first"));

    // No explicit reset
    parser.feed(b"2;second").unwrap();
    assert_eq!(parser.end(BEL).title(), Some("second"));
}

#[test]
fn test_reset_discards_partial_sequence() {
    let mut parser = Parser::new();
    parser.feed(b"2;partial").unwrap();
    parser.reset();
    parser.feed(b"1;icon").unwrap();
    assert_eq!(parser.end(BEL), Command::ChangeWindowIcon("icon"));
}

#[test]
fn test_id_overflow_is_invalid() {
    let mut parser = Parser::new();
    assert_eq!(parse(&mut parser, b"9999999;x", BEL), Command::Invalid);
}
