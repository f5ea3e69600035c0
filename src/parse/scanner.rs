// Address grammar scanner.
//
//   input   := [ "[" ] address [ "/" mask ] [ "]" ] [ ":" port ]
//   address := ipv6 | ipv4 | ipv6-prefix ":" ipv4
//
// Single forward pass over the bytes, no backtracking and no allocation.
// The first violation aborts the scan with a `Fault` carrying the byte
// offset where it was detected.

use crate::address::{Address, AddressFull, MAX_MASK, NUM_V4_OCTETS};
use crate::diag::DiagEvent;

use super::Fault;
use super::builder::AddressBuilder;

/// Maximum hex digits in one IPv6 group.
const MAX_GROUP_DIGITS: usize = 4;

pub(crate) fn scan(input: &[u8]) -> Result<AddressFull, Fault> {
    Scanner { input, pos: 0 }.run()
}

struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Scanner<'_> {
    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    #[inline]
    fn fault(&self, event: DiagEvent) -> Fault {
        Fault::new(event, self.pos)
    }

    fn run(mut self) -> Result<AddressFull, Fault> {
        if self.input.is_empty() {
            return Err(self.fault(DiagEvent::InvalidInput));
        }

        let bracketed = self.peek() == Some(b'[');
        if bracketed {
            self.pos += 1;
            if self.peek().is_none() {
                return Err(self.fault(DiagEvent::InvalidBrackets));
            }
        }

        let address = self.address()?;

        let mask = if self.peek() == Some(b'/') {
            self.pos += 1;
            Some(self.mask()?)
        } else {
            None
        };

        if bracketed {
            if self.peek() != Some(b']') {
                return Err(self.fault(DiagEvent::InvalidBrackets));
            }
            self.pos += 1;
        }

        let port = match self.peek() {
            None => None,
            Some(b':') => {
                // An IPv6 address is only followed by a port inside brackets.
                if address.is_ipv6_form() && !bracketed {
                    return Err(self.fault(DiagEvent::InvalidBrackets));
                }
                self.pos += 1;
                Some(self.port()?)
            }
            Some(b'[' | b']') => return Err(self.fault(DiagEvent::InvalidBrackets)),
            Some(_) => return Err(self.fault(DiagEvent::InvalidInputChar)),
        };

        Ok(AddressFull {
            address,
            mask,
            port,
        })
    }

    // -----------------------------------------------------------------------
    // Address
    // -----------------------------------------------------------------------

    /// Scan groups, `::` and an optional IPv4 tail.
    ///
    /// Stops in front of `/`, `]`, end of input, or (pure IPv4 only) the
    /// port separator.
    fn address(&mut self) -> Result<Address, Fault> {
        let mut builder = AddressBuilder::new();
        let mut after_abbrev = false;

        if self.peek() == Some(b':') {
            if self.peek_at(1) != Some(b':') {
                return Err(self.fault(DiagEvent::InvalidInput));
            }
            self.abbrev(&mut builder)?;
            after_abbrev = true;
        }

        loop {
            let start = self.pos;
            let (digits, value) = self.hex_word();

            if self.peek() == Some(b'.') {
                self.pos = start;
                let v4 = self.ipv4()?;
                builder.push_ipv4(v4, start)?;
                if self.peek() == Some(b':')
                    && (builder.has_v6_context() || self.peek_at(1) == Some(b':'))
                {
                    return Err(self.fault(DiagEvent::Ipv4IncorrectPosition));
                }
                break;
            }

            if digits == 0 {
                match self.peek() {
                    None | Some(b'/' | b']') if after_abbrev => break,
                    None | Some(b'/') => return Err(self.fault(DiagEvent::InvalidInput)),
                    Some(b'[' | b']') => return Err(self.fault(DiagEvent::InvalidBrackets)),
                    Some(_) => return Err(self.fault(DiagEvent::InvalidInputChar)),
                }
            }
            if digits > MAX_GROUP_DIGITS {
                return Err(Fault::new(DiagEvent::V6ComponentOutOfRange, start));
            }
            builder.push_group(value as u16, start)?;

            match self.peek() {
                Some(b':') if self.peek_at(1) == Some(b':') => {
                    self.abbrev(&mut builder)?;
                    after_abbrev = true;
                }
                Some(b':') => {
                    self.pos += 1;
                    after_abbrev = false;
                }
                None | Some(b'/' | b']') => break,
                Some(b'[') => return Err(self.fault(DiagEvent::InvalidBrackets)),
                Some(_) => return Err(self.fault(DiagEvent::InvalidInputChar)),
            }
        }

        builder.finish(self.pos)
    }

    /// Consume `::`, rejecting a third colon.
    fn abbrev(&mut self, builder: &mut AddressBuilder) -> Result<(), Fault> {
        let at = self.pos;
        self.pos += 2;
        if self.peek() == Some(b':') {
            return Err(self.fault(DiagEvent::InvalidAbbrev));
        }
        builder.mark_abbrev(at)
    }

    /// Consume a run of hex digits. Returns the digit count and the value,
    /// saturated once it no longer fits a group.
    fn hex_word(&mut self) -> (usize, u32) {
        let start = self.pos;
        let mut value = 0u32;
        while let Some(d) = self.peek().and_then(hex_digit) {
            value = value.saturating_mul(16).saturating_add(d);
            self.pos += 1;
        }
        (self.pos - start, value)
    }

    // -----------------------------------------------------------------------
    // IPv4
    // -----------------------------------------------------------------------

    fn ipv4(&mut self) -> Result<u32, Fault> {
        let mut value = 0u32;
        for i in 0..NUM_V4_OCTETS {
            if i > 0 {
                if self.peek() != Some(b'.') {
                    return Err(self.fault(DiagEvent::V4BadComponentCount));
                }
                self.pos += 1;
            }
            value = (value << 8) | self.octet()?;
        }
        if self.peek() == Some(b'.') {
            return Err(self.fault(DiagEvent::V4BadComponentCount));
        }
        Ok(value)
    }

    fn octet(&mut self) -> Result<u32, Fault> {
        let start = self.pos;
        let value = self.decimal();
        match self.peek() {
            Some(c) if c.is_ascii_alphanumeric() => {
                return Err(self.fault(DiagEvent::InvalidInputChar));
            }
            _ if self.pos == start => return Err(self.fault(DiagEvent::V4BadComponentCount)),
            _ => {}
        }
        if value > 255 {
            return Err(Fault::new(DiagEvent::V4ComponentOutOfRange, start));
        }
        Ok(value)
    }

    // -----------------------------------------------------------------------
    // Suffixes
    // -----------------------------------------------------------------------

    fn mask(&mut self) -> Result<u8, Fault> {
        let start = self.pos;
        let value = self.decimal();
        if self.pos == start {
            return Err(self.fault(DiagEvent::InvalidCidrMask));
        }
        if !matches!(self.peek(), None | Some(b']' | b':')) {
            return Err(self.fault(DiagEvent::InvalidCidrMask));
        }
        if value > u32::from(MAX_MASK) {
            return Err(Fault::new(DiagEvent::InvalidCidrMask, start));
        }
        Ok(value as u8)
    }

    fn port(&mut self) -> Result<u16, Fault> {
        let start = self.pos;
        let value = self.decimal();
        if self.pos == start || self.peek().is_some() {
            return Err(self.fault(DiagEvent::InvalidPort));
        }
        u16::try_from(value).map_err(|_| Fault::new(DiagEvent::InvalidPort, start))
    }

    /// Consume a run of decimal digits, saturating on overflow.
    fn decimal(&mut self) -> u32 {
        let mut value = 0u32;
        while let Some(c) = self.peek().filter(u8::is_ascii_digit) {
            value = value.saturating_mul(10).saturating_add(u32::from(c - b'0'));
            self.pos += 1;
        }
        value
    }
}

#[inline]
fn hex_digit(c: u8) -> Option<u32> {
    char::from(c).to_digit(16)
}
