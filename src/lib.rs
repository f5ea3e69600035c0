//! ipv6-parse: allocation-free IPv6/IPv4 address parsing and RFC 5952
//! formatting.
//!
//! The crate provides:
//! - A single-pass parser with positioned diagnostics (`parse`)
//! - Canonical rendering into caller buffers (`format`)
//! - Record comparison under an ignore mask (`compare`)
//! - An optional round-trip CLI (`cli` feature)
//!
//! Accepted forms include abbreviated IPv6 (`2001:db8::1`), embedded IPv4
//! (`::ffff:1.2.3.4`), plain IPv4 (`1.2.3.4`), a CIDR mask (`/64`) and a
//! port (`[::1]:80`, `1.2.3.4:80`).
//!
//! # Quick Start
//!
//! ```
//! use ipv6_parse::{CompareResult, Flags, STRING_SIZE, compare, parse};
//!
//! let rec = parse(b"[2001:0DB8:0:0:0:0:0:1/64]:443").unwrap();
//! assert_eq!(rec.port, Some(443));
//! assert_eq!(rec.mask, Some(64));
//!
//! let mut buf = [0u8; STRING_SIZE];
//! let n = rec.format(&mut buf).unwrap();
//! assert_eq!(&buf[..n], b"[2001:db8::1/64]:443");
//!
//! let again = parse(&buf[..n]).unwrap();
//! assert_eq!(compare(&rec, &again, Flags::empty()), CompareResult::Ok);
//! ```

pub mod address;
pub mod compare;
pub mod diag;
pub mod format;
pub mod parse;

#[cfg(feature = "cli")]
pub mod cli;

pub use address::{
    Address, AddressFull, Flags, MAX_MASK, MAX_STRING_LEN, NUM_COMPONENTS, STRING_SIZE,
};
pub use compare::{CompareResult, compare};
pub use diag::{DiagEvent, DiagInfo, DiagnosticSink, NoDiagnostics};
pub use format::FormatError;
pub use parse::{ParseError, parse, parse_with_diagnostics};
