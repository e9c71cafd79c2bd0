//! CLI entry point for the CHIP-8 disassembler binary.

use std::env;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use disasm_core::DisasmConfig;
use disassembler::errors::CliError;
use disassembler::pipeline::{run, Options};
use log as _;
#[cfg(test)]
use tempfile as _;
use thiserror as _;

const USAGE_TEXT: &str = "\
Usage: c8dasm <rom> [options]

Disassembles a CHIP-8 ROM, listing reachable words as instructions and
everything else as data.

Options:
  -o, --output <file>  Write the listing to a file (default: stdout)
  -b, --base <hex>     Load address of the ROM (default: 200)
  -q, --quiet          Do not print the reachability report to stderr
  -v, --verbose        Enable debug logging
  -h, --help           Show this help message

Examples:
  c8dasm pong.ch8
  c8dasm pong.ch8 -o pong.asm
  c8dasm eti-game.bin --base 600
";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    options: Options,
    verbose: bool,
}

#[derive(Debug)]
enum ParseResult {
    Run(Args),
    Help,
}

fn parse_address(value: &str) -> Result<u16, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u16::from_str_radix(digits, 16).map_err(|_| format!("invalid hex address: {value}"))
}

#[allow(clippy::while_let_on_iterator)]
fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut rom: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut config = DisasmConfig::default();
    let mut report = true;
    let mut verbose = false;

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "--quiet" || arg == "-q" {
            report = false;
            continue;
        }

        if arg == "--verbose" || arg == "-v" {
            verbose = true;
            continue;
        }

        if arg == "-o" || arg == "--output" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for -o".to_string())?;
            output = Some(PathBuf::from(value));
            continue;
        }

        if arg == "-b" || arg == "--base" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for --base".to_string())?;
            config.load_address = parse_address(&value.to_string_lossy())?;
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if rom.is_some() {
            return Err("multiple rom paths provided".to_string());
        }
        rom = Some(PathBuf::from(arg));
    }

    let rom = rom.ok_or_else(|| "missing rom path".to_string())?;
    Ok(ParseResult::Run(Args {
        options: Options {
            rom,
            output,
            config,
            report,
        },
        verbose,
    }))
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn report_error(error: &CliError) {
    eprintln!("error: {error}");
    if matches!(error, CliError::Usage(_)) {
        eprintln!("{USAGE_TEXT}");
    }
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Run(args)) => {
            init_logging(args.verbose);
            match run(&args.options, io::stderr().lock()) {
                Ok(summary) => {
                    log::info!(
                        "{} of {} words listed as code",
                        summary.reachable,
                        summary.words
                    );
                    0
                }
                Err(error) => {
                    report_error(&error);
                    error.exit_code()
                }
            }
        }
        Err(message) => {
            let error = CliError::Usage(message);
            report_error(&error);
            error.exit_code()
        }
    };

    std::process::exit(exit_code);
}
