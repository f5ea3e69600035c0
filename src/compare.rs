// Record comparison under an ignore mask.

use crate::address::{AddressFull, Flags};

/// Outcome of [`compare`]. The first difference found, in declaration order,
/// wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum CompareResult {
    Ok,
    /// IPv4 representation flags differ.
    FormatMismatch,
    /// The 128-bit values differ.
    AddressMismatch,
    /// Port presence or value differs.
    PortMismatch,
    /// Mask presence or value differs.
    MaskMismatch,
}

impl CompareResult {
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Compare two records.
///
/// Bits set in `ignore` name dimensions that may differ: either
/// [`Flags::FORMAT`] bit ignores the IPv4 representation,
/// [`Flags::HAS_PORT`] the port and [`Flags::HAS_MASK`] the mask. The
/// address value itself is always compared, with compat IPv4 normalized to
/// its mapped value.
///
/// ```
/// use ipv6_parse::{CompareResult, Flags, compare, parse};
///
/// let a = parse(b"[::1]:1").unwrap();
/// let b = parse(b"[::1]:0").unwrap();
/// assert_eq!(compare(&a, &b, Flags::empty()), CompareResult::PortMismatch);
/// assert_eq!(compare(&a, &b, Flags::HAS_PORT), CompareResult::Ok);
/// ```
pub fn compare(a: &AddressFull, b: &AddressFull, ignore: Flags) -> CompareResult {
    if !ignore.intersects(Flags::FORMAT) && a.address.format_flags() != b.address.format_flags() {
        return CompareResult::FormatMismatch;
    }
    if a.to_bits() != b.to_bits() {
        return CompareResult::AddressMismatch;
    }
    if !ignore.contains(Flags::HAS_PORT) && a.port != b.port {
        return CompareResult::PortMismatch;
    }
    if !ignore.contains(Flags::HAS_MASK) && a.mask != b.mask {
        return CompareResult::MaskMismatch;
    }
    CompareResult::Ok
}
