//! SGR parameter decoder

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::attribute::{Attribute, Underline, Unknown};
use crate::color::Rgb;
use crate::error::{Error, Result};

/// Separator following a parameter in the CSI parameter list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Separator {
    #[default]
    Semicolon,
    Colon,
}

impl Separator {
    /// Anything other than `:` is treated as `;`
    pub fn from_byte(byte: u8) -> Self {
        if byte == b':' {
            Separator::Colon
        } else {
            Separator::Semicolon
        }
    }
}

/// SGR attribute decoder.
///
/// Holds a private copy of the parameter list plus an iteration cursor.
#[derive(Debug, Default)]
pub struct Parser {
    params: Vec<u16>,
    /// `separators[i]` is the separator that followed `params[i]`
    separators: Vec<Separator>,
    idx: usize,
}

impl Parser {
    /// Create a decoder with an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the parameter list and rewind.
    ///
    /// `separators`, when given, must have one entry per parameter. `None`
    /// means every separator is `;`.
    pub fn set_params(&mut self, params: &[u16], separators: Option<&[u8]>) -> Result<()> {
        self.params.clear();
        self.separators.clear();
        self.idx = 0;

        if let Some(seps) = separators {
            if seps.len() != params.len() {
                debug!(
                    "SGR separator count {} does not match parameter count {}",
                    seps.len(),
                    params.len()
                );
                return Err(Error::InvalidValue(
                    "separator count must match parameter count",
                ));
            }
        }

        self.params.try_reserve(params.len())?;
        self.separators.try_reserve(params.len())?;
        self.params.extend_from_slice(params);
        match separators {
            Some(seps) => self
                .separators
                .extend(seps.iter().map(|&b| Separator::from_byte(b))),
            None => self
                .separators
                .extend(std::iter::repeat(Separator::Semicolon).take(params.len())),
        }
        Ok(())
    }

    /// Decode the next attribute, or `None` once the list is exhausted
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Attribute<'_>> {
        decode(&self.params, &self.separators, &mut self.idx)
    }

    /// Rewind to the first parameter. The parameter list is kept.
    pub fn reset(&mut self) {
        self.idx = 0;
    }

    /// Iterate over every attribute in the list, independent of the
    /// decoder's own cursor
    pub fn attributes(&self) -> Attributes<'_> {
        Attributes {
            params: &self.params,
            separators: &self.separators,
            idx: 0,
        }
    }

    pub fn params(&self) -> &[u16] {
        &self.params
    }
}

/// Iterator over the attributes of a [`Parser`]
#[derive(Debug, Clone)]
pub struct Attributes<'a> {
    params: &'a [u16],
    separators: &'a [Separator],
    idx: usize,
}

impl<'a> Iterator for Attributes<'a> {
    type Item = Attribute<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        decode(self.params, self.separators, &mut self.idx)
    }
}

/// Decode one attribute starting at `*idx`, advancing past everything it
/// consumed. An empty list decodes to a single `Unset`.
fn decode<'a>(params: &'a [u16], seps: &[Separator], idx: &mut usize) -> Option<Attribute<'a>> {
    if params.is_empty() {
        if *idx == 0 {
            *idx = 1;
            return Some(Attribute::Unset);
        }
        return None;
    }

    let start = *idx;
    let head = *params.get(start)?;

    let end = colon_run_end(seps, start, params.len());
    if end - start > 1 {
        *idx = end;
        return Some(decode_colon_run(&params[start..end]));
    }

    *idx = start + 1;
    let attr = match head {
        0 => Attribute::Unset,
        1 => Attribute::Bold,
        2 => Attribute::Faint,
        3 => Attribute::Italic,
        4 => Attribute::Underline(Underline::Single),
        5 | 6 => Attribute::Blink,
        7 => Attribute::Inverse,
        8 => Attribute::Invisible,
        9 => Attribute::Strikethrough,
        21 => Attribute::Underline(Underline::Double),
        22 => Attribute::ResetBold,
        23 => Attribute::ResetItalic,
        24 => Attribute::ResetUnderline,
        25 => Attribute::ResetBlink,
        27 => Attribute::ResetInverse,
        28 => Attribute::ResetInvisible,
        29 => Attribute::ResetStrikethrough,
        30..=37 => Attribute::Fg8((head - 30) as u8),
        38 | 48 | 58 => return Some(decode_legacy_color(params, start, idx)),
        39 => Attribute::ResetFg,
        40..=47 => Attribute::Bg8((head - 40) as u8),
        49 => Attribute::ResetBg,
        53 => Attribute::Overline,
        55 => Attribute::ResetOverline,
        59 => Attribute::ResetUnderlineColor,
        90..=97 => Attribute::BrightFg8((head - 82) as u8),
        100..=107 => Attribute::BrightBg8((head - 92) as u8),
        _ => {
            let run = &params[start..start + 1];
            unknown(run, run)
        }
    };
    Some(attr)
}

/// One past the last parameter of the colon-joined run starting at `start`
fn colon_run_end(seps: &[Separator], start: usize, len: usize) -> usize {
    let mut end = start;
    while end + 1 < len && seps.get(end) == Some(&Separator::Colon) {
        end += 1;
    }
    end + 1
}

/// Decode a colon-joined run of two or more parameters
fn decode_colon_run(run: &[u16]) -> Attribute<'_> {
    match run[0] {
        4 => {
            if run.len() != 2 {
                return unknown(run, &run[..3]);
            }
            match Underline::from_subparam(run[1]) {
                Underline::None => Attribute::ResetUnderline,
                style => Attribute::Underline(style),
            }
        }
        38 | 48 | 58 => match run[1] {
            5 => match run.len() {
                3 => indexed_color(run[0], run[2]),
                2 => unknown(run, run),
                _ => unknown(run, &run[..4]),
            },
            2 => match run.len() {
                5 => direct_color(run[0], run[2], run[3], run[4]),
                // The colorspace id is ignored
                6 => direct_color(run[0], run[3], run[4], run[5]),
                2..=4 => unknown(run, run),
                _ => unknown(run, &run[..7]),
            },
            _ => unknown(run, &run[..2]),
        },
        _ => unknown(run, &run[..1]),
    }
}

/// Legacy `X;5;n` and `X;2;r;g;b` forms, claiming parameters by position
fn decode_legacy_color<'a>(params: &'a [u16], start: usize, idx: &mut usize) -> Attribute<'a> {
    let head = params[start];
    let Some(&selector) = params.get(start + 1) else {
        *idx = params.len();
        let run = &params[start..];
        return unknown(run, run);
    };

    match selector {
        5 => match params.get(start + 2) {
            Some(&value) => {
                *idx = start + 3;
                indexed_color(head, value)
            }
            None => {
                *idx = params.len();
                let run = &params[start..];
                unknown(run, run)
            }
        },
        2 => {
            if params.len() >= start + 5 {
                *idx = start + 5;
                direct_color(
                    head,
                    params[start + 2],
                    params[start + 3],
                    params[start + 4],
                )
            } else {
                *idx = params.len();
                unknown(&params[start..], &params[start..start + 2])
            }
        }
        _ => {
            *idx = start + 2;
            let run = &params[start..start + 2];
            unknown(run, run)
        }
    }
}

fn indexed_color<'a>(head: u16, value: u16) -> Attribute<'a> {
    // Truncated to the low byte
    let index = value as u8;
    match head {
        38 => Attribute::Fg256(index),
        48 => Attribute::Bg256(index),
        _ => Attribute::UnderlineColor256(index),
    }
}

fn direct_color<'a>(head: u16, r: u16, g: u16, b: u16) -> Attribute<'a> {
    let rgb = Rgb::new(r as u8, g as u8, b as u8);
    match head {
        38 => Attribute::DirectColorFg(rgb),
        48 => Attribute::DirectColorBg(rgb),
        _ => Attribute::UnderlineColor(rgb),
    }
}

fn unknown<'a>(full: &'a [u16], partial: &'a [u16]) -> Attribute<'a> {
    debug!("Unknown SGR run: {:?} (diverged at {:?})", full, partial);
    trace!("Unknown SGR run length {}", full.len());
    Attribute::Unknown(Unknown { full, partial })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_decodes(params: &[u16], seps: Option<&[u8]>, expected: &[Attribute<'_>]) {
        let mut parser = Parser::new();
        parser.set_params(params, seps).unwrap();
        let decoded: Vec<_> = parser.attributes().collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_empty_is_unset() {
        let mut parser = Parser::new();
        parser.set_params(&[], None).unwrap();
        assert_eq!(parser.next(), Some(Attribute::Unset));
        assert_eq!(parser.next(), None);
    }

    #[test]
    fn test_simple_attributes() {
        assert_decodes(&[1, 31], None, &[Attribute::Bold, Attribute::Fg8(1)]);
        assert_decodes(
            &[0, 2, 3, 5, 6, 7, 8, 9],
            None,
            &[
                Attribute::Unset,
                Attribute::Faint,
                Attribute::Italic,
                Attribute::Blink,
                Attribute::Blink,
                Attribute::Inverse,
                Attribute::Invisible,
                Attribute::Strikethrough,
            ],
        );
    }

    #[test]
    fn test_resets() {
        assert_decodes(
            &[22, 23, 24, 25, 27, 28, 29, 39, 49, 55, 59],
            None,
            &[
                Attribute::ResetBold,
                Attribute::ResetItalic,
                Attribute::ResetUnderline,
                Attribute::ResetBlink,
                Attribute::ResetInverse,
                Attribute::ResetInvisible,
                Attribute::ResetStrikethrough,
                Attribute::ResetFg,
                Attribute::ResetBg,
                Attribute::ResetOverline,
                Attribute::ResetUnderlineColor,
            ],
        );
    }

    #[test]
    fn test_bright_colors() {
        assert_decodes(
            &[90, 97, 100, 107],
            None,
            &[
                Attribute::BrightFg8(8),
                Attribute::BrightFg8(15),
                Attribute::BrightBg8(8),
                Attribute::BrightBg8(15),
            ],
        );
    }

    #[test]
    fn test_legacy_direct_color() {
        assert_decodes(
            &[38, 2, 255, 0, 0],
            None,
            &[Attribute::DirectColorFg(Rgb::new(255, 0, 0))],
        );
        assert_decodes(
            &[48, 5, 100, 1],
            None,
            &[Attribute::Bg256(100), Attribute::Bold],
        );
    }

    #[test]
    fn test_colon_underline_styles() {
        assert_decodes(
            &[4, 3],
            Some(b"::"),
            &[Attribute::Underline(Underline::Curly)],
        );
        assert_decodes(&[4, 0], Some(b":;"), &[Attribute::ResetUnderline]);
        assert_decodes(
            &[4, 3],
            Some(b";;"),
            &[Attribute::Underline(Underline::Single), Attribute::Italic],
        );
    }

    #[test]
    fn test_colon_direct_color_with_colorspace() {
        assert_decodes(
            &[58, 2, 0, 10, 20, 30],
            Some(b":::::;"),
            &[Attribute::UnderlineColor(Rgb::new(10, 20, 30))],
        );
    }

    #[test]
    fn test_truncates_to_low_byte() {
        assert_decodes(&[38, 5, 300], None, &[Attribute::Fg256(44)]);
    }

    #[test]
    fn test_unknown_split() {
        let mut parser = Parser::new();
        parser.set_params(&[38, 7, 1], None).unwrap();
        match parser.next() {
            Some(Attribute::Unknown(u)) => {
                assert_eq!(u.full(), &[38, 7]);
                assert_eq!(u.partial(), &[38, 7]);
            }
            other => panic!("expected unknown, got {:?}", other),
        }
        assert_eq!(parser.next(), Some(Attribute::Bold));
    }

    #[test]
    fn test_truncated_direct_color() {
        let mut parser = Parser::new();
        parser.set_params(&[38, 2, 1, 2], None).unwrap();
        match parser.next() {
            Some(Attribute::Unknown(u)) => {
                assert_eq!(u.full(), &[38, 2, 1, 2]);
                assert_eq!(u.partial(), &[38, 2]);
            }
            other => panic!("expected unknown, got {:?}", other),
        }
        assert_eq!(parser.next(), None);
    }

    #[test]
    fn test_separator_length_mismatch() {
        let mut parser = Parser::new();
        parser.set_params(&[1], None).unwrap();
        assert_eq!(
            parser.set_params(&[1, 2], Some(b";")),
            Err(Error::InvalidValue("separator count must match parameter count"))
        );
        assert!(parser.params().is_empty());
    }

    #[test]
    fn test_reset_rewinds() {
        let mut parser = Parser::new();
        parser.set_params(&[1, 3], None).unwrap();
        assert_eq!(parser.next(), Some(Attribute::Bold));
        assert_eq!(parser.next(), Some(Attribute::Italic));
        assert_eq!(parser.next(), None);
        parser.reset();
        assert_eq!(parser.next(), Some(Attribute::Bold));
    }
}
