// Round-trip CLI for ipv6-parse.
//
// Parses one address, formats it, parses the canonical string again and
// compares both records. Each pipeline stage has its own exit code.

use std::process;

use clap::{ArgAction, Parser};
use log::{debug, info};

use crate::address::{AddressFull, Flags, STRING_SIZE};
use crate::compare::{CompareResult, compare};
use crate::diag::{DiagEvent, DiagInfo, DiagnosticSink};
use crate::format::FormatError;
use crate::parse::parse_with_diagnostics;

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

const EXIT_OK: i32 = 0;
const EXIT_USAGE: i32 = 1;
const EXIT_PARSE: i32 = 2;
const EXIT_FORMAT: i32 = 3;
const EXIT_ROUNDTRIP: i32 = 4;
const EXIT_COMPARE: i32 = 5;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Parse, canonicalize and round-trip an IPv6/IPv4 address.
#[derive(Parser, Debug)]
#[command(
    name = "ipv6-parse",
    version,
    about = "IPv6/IPv4 address parser and RFC 5952 formatter",
    arg_required_else_help = true
)]
struct Cli {
    /// Address to parse, e.g. `[2001:db8::1/64]:443`.
    address: String,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Print the parsed record as JSON to stdout.
    #[arg(long = "json")]
    json_output: bool,

    /// Additionally check the round trip with these dimensions ignored.
    #[arg(long = "ignore", value_parser = parse_ignore, value_name = "DIMS")]
    ignore: Option<Flags>,
}

struct Options {
    address: String,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    ignore: Flags,
}

fn resolve_options(cli: Cli) -> Options {
    Options {
        address: cli.address,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
        ignore: cli.ignore.unwrap_or_default(),
    }
}

/// Parse a comma separated list of `format`, `port`, `mask`.
fn parse_ignore(s: &str) -> Result<Flags, String> {
    let mut flags = Flags::empty();
    for name in s.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        flags |= match name {
            "format" => Flags::FORMAT,
            "port" => Flags::HAS_PORT,
            "mask" => Flags::HAS_MASK,
            other => return Err(format!("unknown dimension: {other}")),
        };
    }
    Ok(flags)
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("ipv6-parse".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let opts = resolve_options(cli);
        let _ = round_trip(opts.address.as_bytes(), opts.ignore);
    }
}

// ---------------------------------------------------------------------------
// Diagnostics capture
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Captured {
    event: DiagEvent,
    position: usize,
}

#[derive(Default)]
struct Capture(Option<Captured>);

impl DiagnosticSink for Capture {
    fn report(&mut self, event: DiagEvent, info: &DiagInfo<'_>) {
        self.0 = Some(Captured {
            event,
            position: info.position,
        });
    }
}

fn parse_captured(input: &[u8]) -> Result<AddressFull, Captured> {
    let mut capture = Capture::default();
    parse_with_diagnostics(input, &mut capture).map_err(|_| {
        capture.0.unwrap_or(Captured {
            event: DiagEvent::InvalidInput,
            position: 0,
        })
    })
}

// ---------------------------------------------------------------------------
// Round trip
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Report {
    record: AddressFull,
    canonical: String,
}

#[derive(Debug)]
enum Failure {
    Parse(Captured),
    Format(FormatError),
    RoundTrip { canonical: String, diag: Captured },
    Compare {
        canonical: String,
        result: CompareResult,
    },
}

impl Failure {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Parse(_) => EXIT_PARSE,
            Self::Format(_) => EXIT_FORMAT,
            Self::RoundTrip { .. } => EXIT_ROUNDTRIP,
            Self::Compare { .. } => EXIT_COMPARE,
        }
    }
}

/// Parse → format → parse → compare.
///
/// The canonical string must reparse to an identical record. With a
/// non-empty `ignore`, the comparison is also repeated under that mask.
fn round_trip(input: &[u8], ignore: Flags) -> Result<Report, Failure> {
    let record = parse_captured(input).map_err(Failure::Parse)?;
    debug!("parsed record: {record:?}");

    let mut buf = [0u8; STRING_SIZE];
    let len = record.format(&mut buf).map_err(Failure::Format)?;
    let canonical = String::from_utf8_lossy(&buf[..len]).into_owned();
    info!("canonical form: {canonical}");

    let again = match parse_captured(&buf[..len]) {
        Ok(rec) => rec,
        Err(diag) => return Err(Failure::RoundTrip { canonical, diag }),
    };

    let result = compare(&record, &again, Flags::empty());
    if !result.is_ok() {
        return Err(Failure::Compare { canonical, result });
    }
    if !ignore.is_empty() {
        let relaxed = compare(&record, &again, ignore);
        debug!("compare ignoring {ignore:?}: {relaxed:?}");
        if !relaxed.is_ok() {
            return Err(Failure::Compare {
                canonical,
                result: relaxed,
            });
        }
    }

    Ok(Report { record, canonical })
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Message line, then the input with a caret under the failing byte.
fn describe(input: &str, diag: &Captured) -> String {
    format!(
        "  {} (offset {})\n  {}\n  {:>width$}",
        diag.event,
        diag.position,
        input,
        "^",
        width = diag.position + 1
    )
}

fn report_json(report: &Report) -> serde_json::Value {
    let rec = &report.record;
    let flags = rec.flags();
    serde_json::json!({
        "canonical": report.canonical,
        "components": rec.components(),
        "flags": flags.bits(),
        "ipv4_embed": flags.contains(Flags::IPV4_EMBED),
        "ipv4_compat": flags.contains(Flags::IPV4_COMPAT),
        "mask": rec.mask,
        "port": rec.port,
    })
}

fn print_failure(input: &str, failure: &Failure) {
    match failure {
        Failure::Parse(diag) => {
            eprintln!("- failed to parse: '{input}'");
            eprintln!("{}", describe(input, diag));
        }
        Failure::Format(err) => {
            eprintln!("- failed to convert: '{input}': {err}");
        }
        Failure::RoundTrip { canonical, diag } => {
            eprintln!("- failed to roundtrip: '{canonical}'");
            eprintln!("{}", describe(canonical, diag));
        }
        Failure::Compare { canonical, result } => {
            eprintln!("- failed to compare: '{input}' != '{canonical}' ({result:?})");
        }
    }
}

fn cmd_round_trip(opts: &Options) -> i32 {
    match round_trip(opts.address.as_bytes(), opts.ignore) {
        Ok(report) => {
            if opts.json_output {
                match serde_json::to_string_pretty(&report_json(&report)) {
                    Ok(json) => println!("{json}"),
                    Err(e) => eprintln!("ipv6-parse: json output failed: {e}"),
                }
            } else if !opts.quiet {
                println!("OK ({})", report.canonical);
            }
            EXIT_OK
        }
        Err(failure) => {
            print_failure(&opts.address, &failure);
            failure.exit_code()
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Main CLI entry point. Parses arguments via clap and runs the round trip.
pub fn run() -> ! {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { EXIT_USAGE } else { EXIT_OK };
            let _ = e.print();
            process::exit(code);
        }
    };
    let opts = resolve_options(cli);

    let filter = default_filter(opts.verbose);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    process::exit(cmd_round_trip(&opts));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
