// Address parsing.
//
// - `scanner`: grammar validation, one forward pass over the input
// - `builder`: `::` expansion and IPv4 placement
//
// Both entry points share the same grammar; `parse_with_diagnostics`
// additionally reports the single fault of a failed parse to a sink.

mod builder;
mod scanner;

use std::str::FromStr;

use log::{debug, trace};

use crate::address::AddressFull;
use crate::diag::{DiagEvent, DiagInfo, DiagnosticSink, NoDiagnostics};

/// Returned when an input is not a valid address.
///
/// Carries no detail; use [`parse_with_diagnostics`] to learn why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid address")]
pub struct ParseError;

/// First grammar violation found by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fault {
    pub(crate) event: DiagEvent,
    pub(crate) position: usize,
}

impl Fault {
    pub(crate) const fn new(event: DiagEvent, position: usize) -> Self {
        Self { event, position }
    }
}

/// Parse an address string.
///
/// ```
/// use ipv6_parse::{Address, parse};
///
/// let rec = parse(b"[::1]:8080").unwrap();
/// assert_eq!(rec.address, Address::LOOPBACK);
/// assert_eq!(rec.port, Some(8080));
/// ```
pub fn parse(input: &[u8]) -> Result<AddressFull, ParseError> {
    parse_with_diagnostics(input, &mut NoDiagnostics)
}

/// Parse an address string, reporting the reason for a failure to `sink`.
///
/// The sink is called exactly once when parsing fails and never when it
/// succeeds.
pub fn parse_with_diagnostics<S>(input: &[u8], sink: &mut S) -> Result<AddressFull, ParseError>
where
    S: DiagnosticSink + ?Sized,
{
    match scanner::scan(input) {
        Ok(rec) => {
            trace!("parsed '{}' as {:?}", input.escape_ascii(), rec);
            Ok(rec)
        }
        Err(fault) => {
            debug!(
                "rejected '{}': {} at offset {}",
                input.escape_ascii(),
                fault.event,
                fault.position
            );
            let info = DiagInfo {
                message: fault.event.message(),
                input,
                position: fault.position,
            };
            sink.report(fault.event, &info);
            Err(ParseError)
        }
    }
}

impl FromStr for AddressFull {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{Address, Flags};

    #[derive(Default)]
    struct Recorder {
        calls: usize,
        last: Option<(DiagEvent, usize)>,
    }

    impl DiagnosticSink for Recorder {
        fn report(&mut self, event: DiagEvent, info: &DiagInfo<'_>) {
            self.calls += 1;
            self.last = Some((event, info.position));
        }
    }

    #[test]
    fn sink_not_called_on_success() {
        let mut rec = Recorder::default();
        assert!(parse_with_diagnostics(b"::1", &mut rec).is_ok());
        assert_eq!(rec.calls, 0);
    }

    #[test]
    fn sink_called_once_on_failure() {
        let mut rec = Recorder::default();
        assert_eq!(
            parse_with_diagnostics(b"1::2::3", &mut rec),
            Err(ParseError)
        );
        assert_eq!(rec.calls, 1);
        assert_eq!(rec.last, Some((DiagEvent::InvalidAbbrev, 4)));
    }

    #[test]
    fn info_carries_input_and_message() {
        let mut got = None;
        let mut sink = |event: DiagEvent, info: &DiagInfo<'_>| {
            got = Some((event, info.message, info.input.to_vec(), info.position));
        };
        let _ = parse_with_diagnostics(b"", &mut sink);
        assert_eq!(
            got,
            Some((DiagEvent::InvalidInput, "invalid input", Vec::new(), 0))
        );
    }

    #[test]
    fn dyn_sink_is_accepted() {
        let mut rec = Recorder::default();
        let sink: &mut dyn DiagnosticSink = &mut rec;
        assert!(parse_with_diagnostics(b"[::1", sink).is_err());
        assert_eq!(rec.last, Some((DiagEvent::InvalidBrackets, 4)));
    }

    #[test]
    fn from_str_matches_parse() {
        let rec: AddressFull = "::ffff:1.2.3.4/96".parse().unwrap();
        assert_eq!(rec.address, Address::ipv4_mapped(0x0102_0304));
        assert_eq!(rec.flags(), Flags::IPV4_EMBED | Flags::HAS_MASK);
        assert_eq!("nope".parse::<AddressFull>(), Err(ParseError));
    }
}
