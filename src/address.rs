// Address record types.
//
// `Address` is the canonical 128-bit value in one of its three textual
// representations; `AddressFull` adds the optional CIDR mask and port.
// Both are plain `Copy` values with no heap storage.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use bitflags::bitflags;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of 16-bit groups in an IPv6 address.
pub const NUM_COMPONENTS: usize = 8;

/// Number of octets in an IPv4 address.
pub const NUM_V4_OCTETS: usize = 4;

/// Largest legal CIDR prefix length.
pub const MAX_MASK: u8 = 128;

/// Length of the longest canonical rendering:
/// `[ffff:ffff:ffff:ffff:ffff:ffff:255.255.255.255/128]:65535`.
pub const MAX_STRING_LEN: usize = 57;

/// Buffer size that always fits a canonical rendering plus its terminator.
pub const STRING_SIZE: usize = MAX_STRING_LEN + 1;

/// Group value marking an IPv4-mapped address (`::ffff:a.b.c.d`).
pub const V4_MAPPED_MARKER: u16 = 0xffff;

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

bitflags! {
    /// Presence and representation flags of an [`AddressFull`].
    ///
    /// The same bits are used as the comparator's ignore mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u32 {
        /// A port suffix was present.
        const HAS_PORT = 1 << 0;
        /// A CIDR mask suffix was present.
        const HAS_MASK = 1 << 1;
        /// IPv6 prefix followed by a dotted IPv4 tail.
        const IPV4_EMBED = 1 << 2;
        /// Pure dotted IPv4 with no IPv6 context.
        const IPV4_COMPAT = 1 << 3;

        /// Either IPv4 representation bit.
        const FORMAT = Self::IPV4_EMBED.bits() | Self::IPV4_COMPAT.bits();
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A parsed address value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    /// Plain IPv6, all eight groups written in colon form.
    Ipv6([u16; NUM_COMPONENTS]),
    /// Dotted-decimal IPv4 with no IPv6 context.
    Ipv4Compat(u32),
    /// IPv6 prefix (groups 0..6) followed by an IPv4 tail (groups 6..8).
    Ipv4Embedded { prefix: [u16; 6], ipv4: u32 },
}

impl Address {
    /// IPv6 unspecified address `::`.
    pub const UNSPECIFIED: Self = Self::Ipv6([0; NUM_COMPONENTS]);

    /// IPv6 loopback `::1`.
    pub const LOOPBACK: Self = Self::Ipv6([0, 0, 0, 0, 0, 0, 0, 1]);

    /// IPv4-mapped form of `ipv4` (`::ffff:a.b.c.d`).
    pub const fn ipv4_mapped(ipv4: u32) -> Self {
        Self::Ipv4Embedded {
            prefix: [0, 0, 0, 0, 0, V4_MAPPED_MARKER],
            ipv4,
        }
    }

    /// The eight-group record view.
    ///
    /// `Ipv4Compat` packs its value into groups 0 and 1; the remaining
    /// groups are zero.
    pub const fn components(&self) -> [u16; NUM_COMPONENTS] {
        match *self {
            Self::Ipv6(groups) => groups,
            Self::Ipv4Compat(v4) => [(v4 >> 16) as u16, v4 as u16, 0, 0, 0, 0, 0, 0],
            Self::Ipv4Embedded { prefix, ipv4 } => [
                prefix[0],
                prefix[1],
                prefix[2],
                prefix[3],
                prefix[4],
                prefix[5],
                (ipv4 >> 16) as u16,
                ipv4 as u16,
            ],
        }
    }

    /// Representation flags (`IPV4_EMBED` / `IPV4_COMPAT`) for this value.
    pub const fn format_flags(&self) -> Flags {
        match self {
            Self::Ipv6(_) => Flags::empty(),
            Self::Ipv4Compat(_) => Flags::IPV4_COMPAT,
            Self::Ipv4Embedded { .. } => Flags::IPV4_EMBED,
        }
    }

    /// The 128-bit numeric value.
    ///
    /// A compat address is expanded to its mapped value, so `1.2.3.4` and
    /// `::ffff:1.2.3.4` are numerically equal.
    pub fn to_bits(&self) -> u128 {
        match *self {
            Self::Ipv4Compat(v4) => (u128::from(V4_MAPPED_MARKER) << 32) | u128::from(v4),
            _ => self
                .components()
                .iter()
                .fold(0u128, |acc, &g| (acc << 16) | u128::from(g)),
        }
    }

    /// The IPv4 value, for either IPv4 representation.
    pub const fn ipv4(&self) -> Option<u32> {
        match *self {
            Self::Ipv4Compat(v4) | Self::Ipv4Embedded { ipv4: v4, .. } => Some(v4),
            Self::Ipv6(_) => None,
        }
    }

    /// True for both IPv6 colon forms (plain and embedded).
    pub const fn is_ipv6_form(&self) -> bool {
        !matches!(self, Self::Ipv4Compat(_))
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

impl From<Ipv6Addr> for Address {
    fn from(addr: Ipv6Addr) -> Self {
        Self::Ipv6(addr.segments())
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Self::Ipv4Compat(addr.to_bits())
    }
}

impl From<Address> for IpAddr {
    fn from(addr: Address) -> Self {
        match addr {
            Address::Ipv4Compat(v4) => IpAddr::V4(Ipv4Addr::from_bits(v4)),
            other => IpAddr::V6(Ipv6Addr::from(other.components())),
        }
    }
}

// ---------------------------------------------------------------------------
// AddressFull
// ---------------------------------------------------------------------------

/// An address with its optional CIDR mask and port.
///
/// Presence is carried by the `Option`s; [`flags`](Self::flags) is derived
/// from them, so an absent port never reads as an explicit port 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AddressFull {
    pub address: Address,
    /// CIDR prefix length, `0..=128`.
    pub mask: Option<u8>,
    pub port: Option<u16>,
}

impl AddressFull {
    pub const fn new(address: Address) -> Self {
        Self {
            address,
            mask: None,
            port: None,
        }
    }

    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Attach a CIDR mask, or `None` if `mask` exceeds [`MAX_MASK`].
    pub const fn with_mask(mut self, mask: u8) -> Option<Self> {
        if mask > MAX_MASK {
            return None;
        }
        self.mask = Some(mask);
        Some(self)
    }

    pub const fn components(&self) -> [u16; NUM_COMPONENTS] {
        self.address.components()
    }

    pub fn flags(&self) -> Flags {
        let mut flags = self.address.format_flags();
        flags.set(Flags::HAS_PORT, self.port.is_some());
        flags.set(Flags::HAS_MASK, self.mask.is_some());
        flags
    }

    pub fn port_or_zero(&self) -> u16 {
        self.port.unwrap_or(0)
    }

    pub fn mask_or_zero(&self) -> u8 {
        self.mask.unwrap_or(0)
    }

    pub fn to_bits(&self) -> u128 {
        self.address.to_bits()
    }
}

impl From<Address> for AddressFull {
    fn from(address: Address) -> Self {
        Self::new(address)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
