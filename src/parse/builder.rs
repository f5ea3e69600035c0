// Address builder.
//
// Collects the groups, `::` position and IPv4 tail reported by the scanner
// and turns them into an `Address`, expanding the abbreviation to exactly
// the number of zero groups needed.

use crate::address::{Address, NUM_COMPONENTS};
use crate::diag::DiagEvent;

use super::Fault;

/// Groups available to an IPv6 prefix in front of an IPv4 tail.
const EMBED_PREFIX_LEN: usize = NUM_COMPONENTS - 2;

/// Minimum number of zero groups `::` may stand for.
const MIN_ABBREV_RUN: usize = 2;

#[derive(Debug, Default)]
pub(crate) struct AddressBuilder {
    groups: [u16; NUM_COMPONENTS],
    count: usize,
    /// Group index where `::` was seen, and its byte offset.
    abbrev: Option<(usize, usize)>,
    ipv4: Option<u32>,
}

impl AddressBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// True once any IPv6 syntax (a group or `::`) has been seen.
    pub(crate) fn has_v6_context(&self) -> bool {
        self.count > 0 || self.abbrev.is_some()
    }

    pub(crate) fn push_group(&mut self, value: u16, position: usize) -> Result<(), Fault> {
        if self.count == NUM_COMPONENTS {
            return Err(Fault::new(DiagEvent::V6BadComponentCount, position));
        }
        self.groups[self.count] = value;
        self.count += 1;
        Ok(())
    }

    pub(crate) fn mark_abbrev(&mut self, position: usize) -> Result<(), Fault> {
        if self.abbrev.is_some() {
            return Err(Fault::new(DiagEvent::InvalidAbbrev, position));
        }
        self.abbrev = Some((self.count, position));
        Ok(())
    }

    pub(crate) fn push_ipv4(&mut self, value: u32, position: usize) -> Result<(), Fault> {
        if self.count > EMBED_PREFIX_LEN {
            return Err(Fault::new(DiagEvent::V6BadComponentCount, position));
        }
        self.ipv4 = Some(value);
        Ok(())
    }

    /// Produce the address. `end` is the byte offset just past the address.
    pub(crate) fn finish(self, end: usize) -> Result<Address, Fault> {
        if let Some(v4) = self.ipv4
            && !self.has_v6_context()
        {
            return Ok(Address::Ipv4Compat(v4));
        }
        if self.count == 0 && self.abbrev.is_none() {
            return Err(Fault::new(DiagEvent::InvalidInput, end));
        }

        let slots = if self.ipv4.is_some() {
            EMBED_PREFIX_LEN
        } else {
            NUM_COMPONENTS
        };

        let mut out = [0u16; NUM_COMPONENTS];
        match self.abbrev {
            Some((index, at)) => {
                let zeros = slots - self.count;
                if zeros < MIN_ABBREV_RUN {
                    return Err(Fault::new(DiagEvent::InvalidAbbrev, at));
                }
                out[..index].copy_from_slice(&self.groups[..index]);
                let tail = &self.groups[index..self.count];
                out[index + zeros..index + zeros + tail.len()].copy_from_slice(tail);
            }
            None => {
                if self.count != slots {
                    return Err(Fault::new(DiagEvent::V6BadComponentCount, end));
                }
                out[..slots].copy_from_slice(&self.groups[..slots]);
            }
        }

        Ok(match self.ipv4 {
            Some(ipv4) => {
                let mut prefix = [0u16; EMBED_PREFIX_LEN];
                prefix.copy_from_slice(&out[..EMBED_PREFIX_LEN]);
                Address::Ipv4Embedded { prefix, ipv4 }
            }
            None => Address::Ipv6(out),
        })
    }
}
