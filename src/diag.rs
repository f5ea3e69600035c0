// Parse diagnostics.
//
// The parser reports at most one event per call through a caller-supplied
// sink. Sinks are borrowed for the duration of a single parse and are never
// called on success.

use std::fmt;

/// The grammar violation that terminated a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagEvent {
    /// Empty input, empty address, or a dangling separator.
    InvalidInput,
    /// A byte outside the allowed class for its position.
    InvalidInputChar,
    /// Group count is not 8 after `::` expansion.
    V6BadComponentCount,
    /// Repeated `::`, `:::`, or `::` standing for fewer than two groups.
    InvalidAbbrev,
    /// A hex group longer than four digits.
    V6ComponentOutOfRange,
    /// Mask is empty, non-numeric, or above 128.
    InvalidCidrMask,
    /// Unbalanced, nested, reversed, or missing brackets.
    InvalidBrackets,
    /// Port is empty, non-numeric, or above 65535.
    InvalidPort,
    /// A group or separator follows an IPv4 tail.
    Ipv4IncorrectPosition,
    /// Dotted address without exactly four octets.
    V4BadComponentCount,
    /// An octet above 255.
    V4ComponentOutOfRange,
}

impl DiagEvent {
    /// Every event, in declaration order.
    pub const ALL: [DiagEvent; 11] = [
        Self::InvalidInput,
        Self::InvalidInputChar,
        Self::V6BadComponentCount,
        Self::InvalidAbbrev,
        Self::V6ComponentOutOfRange,
        Self::InvalidCidrMask,
        Self::InvalidBrackets,
        Self::InvalidPort,
        Self::Ipv4IncorrectPosition,
        Self::V4BadComponentCount,
        Self::V4ComponentOutOfRange,
    ];

    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid input",
            Self::InvalidInputChar => "invalid character in input",
            Self::V6BadComponentCount => "ipv6 address must have exactly 8 components",
            Self::InvalidAbbrev => "invalid '::' abbreviation",
            Self::V6ComponentOutOfRange => "ipv6 component out of range (max 4 hex digits)",
            Self::InvalidCidrMask => "invalid CIDR mask (expected 0-128)",
            Self::InvalidBrackets => "invalid brackets",
            Self::InvalidPort => "invalid port (expected 0-65535)",
            Self::Ipv4IncorrectPosition => "embedded ipv4 must be the last component",
            Self::V4BadComponentCount => "ipv4 address must have exactly 4 octets",
            Self::V4ComponentOutOfRange => "ipv4 octet out of range (max 255)",
        }
    }
}

impl fmt::Display for DiagEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Detail accompanying a [`DiagEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagInfo<'a> {
    pub message: &'static str,
    /// The full input that was being parsed.
    pub input: &'a [u8],
    /// Byte offset into `input` where the fault was detected.
    pub position: usize,
}

impl fmt::Display for DiagInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at offset {} in '{}'",
            self.message,
            self.position,
            self.input.escape_ascii()
        )
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Receives the diagnostic of a failed parse.
pub trait DiagnosticSink {
    fn report(&mut self, event: DiagEvent, info: &DiagInfo<'_>);
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl DiagnosticSink for NoDiagnostics {
    #[inline]
    fn report(&mut self, _event: DiagEvent, _info: &DiagInfo<'_>) {}
}

impl<F> DiagnosticSink for F
where
    F: FnMut(DiagEvent, &DiagInfo<'_>),
{
    fn report(&mut self, event: DiagEvent, info: &DiagInfo<'_>) {
        self(event, info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_distinct() {
        for (i, a) in DiagEvent::ALL.iter().enumerate() {
            for b in &DiagEvent::ALL[i + 1..] {
                assert_ne!(a.message(), b.message(), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn closure_sink_receives_event() {
        let mut seen = None;
        let mut sink = |event: DiagEvent, info: &DiagInfo<'_>| {
            seen = Some((event, info.position));
        };
        let info = DiagInfo {
            message: DiagEvent::InvalidPort.message(),
            input: b"[::1]:x",
            position: 6,
        };
        sink.report(DiagEvent::InvalidPort, &info);
        assert_eq!(seen, Some((DiagEvent::InvalidPort, 6)));
    }

    #[test]
    fn info_display_escapes_input() {
        let info = DiagInfo {
            message: "invalid character in input",
            input: b"::\xff",
            position: 2,
        };
        assert_eq!(
            info.to_string(),
            "invalid character in input at offset 2 in '::\\xff'"
        );
    }
}
