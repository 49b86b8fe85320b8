//! Mochi VT Inspector
//!
//! Scans a byte stream for OSC and SGR sequences and prints what the
//! engines decode them into, one JSON document per line.

use std::io::{self, Read};
use std::process::ExitCode;

use mochi_vt::osc;
use mochi_vt::sgr;
use mochi_vt::Config;

use serde_json::json;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;
/// Final byte of the 7-bit string terminator `ESC \`
const ST: u8 = b'\\';

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut input_file: Option<String> = None;
    let mut config_file: Option<String> = None;
    let mut pretty = false;
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-f" | "--file" => {
                i += 1;
                if i < args.len() {
                    input_file = Some(args[i].clone());
                }
            },
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    config_file = Some(args[i].clone());
                }
            },
            "-p" | "--pretty" => {
                pretty = true;
            },
            "-h" | "--help" => {
                show_help = true;
            },
            _ => {
                // Treat as input file if no flag
                if input_file.is_none() && !args[i].starts_with('-') {
                    input_file = Some(args[i].clone());
                }
            },
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let config = match &config_file {
        Some(path) => match Config::load(std::path::Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => Config::load_or_default(),
    };

    // Read input
    let input_data = match &input_file {
        Some(path) => match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => {
            let mut data = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut data) {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::FAILURE;
            }
            data
        },
    };

    let mut inspector = Inspector::new(config);
    let reports = inspector.scan(&input_data);
    debug!("Found {} sequences in {} bytes", reports.len(), input_data.len());

    for report in reports {
        let line = if pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        match line {
            Ok(line) => println!("{}", line),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                return ExitCode::FAILURE;
            },
        }
    }

    ExitCode::SUCCESS
}

struct Inspector {
    osc: osc::Parser,
    sgr: sgr::Parser,
}

impl Inspector {
    fn new(config: Config) -> Self {
        Self {
            osc: osc::Parser::with_config(config.osc),
            sgr: sgr::Parser::new(),
        }
    }

    fn scan(&mut self, data: &[u8]) -> Vec<serde_json::Value> {
        let mut reports = Vec::new();
        let mut pos = 0;
        while pos < data.len() {
            if data[pos] != ESC {
                pos += 1;
                continue;
            }
            let start = pos;
            pos = match data.get(pos + 1) {
                Some(b']') => self.osc_sequence(data, start, pos + 2, &mut reports),
                Some(b'[') => self.csi_sequence(data, start, pos + 2, &mut reports),
                _ => pos + 1,
            };
        }
        reports
    }

    /// Feed an OSC body to the parser; returns the position after it
    fn osc_sequence(
        &mut self,
        data: &[u8],
        start: usize,
        body: usize,
        reports: &mut Vec<serde_json::Value>,
    ) -> usize {
        self.osc.reset();
        let mut pos = body;
        while pos < data.len() {
            let Some((terminator, len)) = terminator_at(data, pos) else {
                if let Err(e) = self.osc.next(data[pos]) {
                    reports.push(json!({ "offset": start, "error": e.to_string() }));
                    return pos + 1;
                }
                pos += 1;
                continue;
            };
            let command = self.osc.end(terminator);
            reports.push(json!({
                "offset": start,
                "type": format!("{:?}", command.command_type()),
                "osc": command,
            }));
            return pos + len;
        }
        debug!("Unterminated OSC at offset {}", start);
        pos
    }

    /// Decode `CSI ... m`; other CSI sequences are skipped
    fn csi_sequence(
        &mut self,
        data: &[u8],
        start: usize,
        body: usize,
        reports: &mut Vec<serde_json::Value>,
    ) -> usize {
        let mut end = body;
        while end < data.len() && (0x20..=0x3f).contains(&data[end]) {
            end += 1;
        }
        let Some(&final_byte) = data.get(end) else {
            return end;
        };
        let params = &data[body..end];
        if final_byte != b'm' || !params.iter().all(|b| b.is_ascii_digit() || *b == b';' || *b == b':') {
            return end + 1;
        }

        let (values, separators) = split_params(params);
        if let Err(e) = self.sgr.set_params(&values, Some(&separators)) {
            reports.push(json!({ "offset": start, "error": e.to_string() }));
            return end + 1;
        }
        let attributes: Vec<_> = self.sgr.attributes().collect();
        reports.push(json!({ "offset": start, "sgr": attributes }));
        end + 1
    }
}

/// The terminator byte handed to the OSC parser and the length of the
/// terminator on the wire, if one starts at `pos`
fn terminator_at(data: &[u8], pos: usize) -> Option<(u8, usize)> {
    match (data.get(pos)?, data.get(pos + 1)) {
        (&BEL, _) => Some((BEL, 1)),
        (&ESC, Some(b'\\')) => Some((ST, 2)),
        _ => None,
    }
}

/// Split `1;38:2:0:255:0` into values and the separator after each
fn split_params(params: &[u8]) -> (Vec<u16>, Vec<u8>) {
    let mut values = Vec::new();
    let mut separators = Vec::new();
    if params.is_empty() {
        return (values, separators);
    }

    let mut current: u16 = 0;
    for &byte in params {
        match byte {
            b';' | b':' => {
                values.push(current);
                separators.push(byte);
                current = 0;
            },
            digit => {
                current = current
                    .saturating_mul(10)
                    .saturating_add(u16::from(digit - b'0'));
            },
        }
    }
    values.push(current);
    separators.push(b';');
    (values, separators)
}

fn print_help() {
    println!("Mochi VT Inspector");
    println!();
    println!("Usage: mochi-vt-inspect [OPTIONS] [INPUT_FILE]");
    println!();
    println!("Options:");
    println!("  -f, --file <PATH>    Read input from file");
    println!("  -c, --config <PATH>  Load settings (default: ~/.config/mochi/vt.json)");
    println!("  -p, --pretty         Pretty-print each report");
    println!("  -h, --help           Show this help message");
    println!();
    println!("If no input file is specified, reads from stdin.");
    println!();
    println!("Examples:");
    println!("  printf '\\033]2;hello\\007' | mochi-vt-inspect");
    println!("  printf '\\033[1;38:2::255:0:0m' | mochi-vt-inspect --pretty");
}
