// RFC 5952 canonical rendering.
//
// Rendering goes into a fixed stack buffer first, so a caller buffer is
// either filled with the complete string or left holding an empty one.

use std::fmt::{self, Write};

use log::trace;

use crate::address::{Address, AddressFull, MAX_STRING_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The output buffer has no room at all, not even for the terminator.
    #[error("output buffer is empty")]
    EmptyBuffer,
    /// The rendered string plus terminator does not fit.
    #[error("output buffer too small: need {needed} bytes, have {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },
}

// ---------------------------------------------------------------------------
// Stack buffer
// ---------------------------------------------------------------------------

/// Fixed-capacity `fmt::Write` target.
struct StackBuf<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> StackBuf<N> {
    const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    fn as_str(&self) -> &str {
        // Only `write_str` appends, and it appends whole `&str`s.
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }
}

impl<const N: usize> Write for StackBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > N {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Longest run of zero groups, leftmost on ties. Returns `(start, len)`.
fn longest_zero_run(groups: &[u16]) -> (usize, usize) {
    let mut best = (0, 0);
    let mut current = (0, 0);
    for (i, &g) in groups.iter().enumerate() {
        if g == 0 {
            if current.1 == 0 {
                current.0 = i;
            }
            current.1 += 1;
            if current.1 > best.1 {
                best = current;
            }
        } else {
            current = (0, 0);
        }
    }
    best
}

fn write_groups<W: Write>(w: &mut W, groups: &[u16]) -> fmt::Result {
    if let Some((first, rest)) = groups.split_first() {
        write!(w, "{first:x}")?;
        for g in rest {
            write!(w, ":{g:x}")?;
        }
    }
    Ok(())
}

/// Write `groups` in colon form, collapsing the longest zero run of two or
/// more groups. With `tail` set, the output is terminated so an IPv4 tail
/// can follow directly.
fn write_colon_form<W: Write>(w: &mut W, groups: &[u16], tail: bool) -> fmt::Result {
    let (start, len) = longest_zero_run(groups);
    if len > 1 {
        write_groups(w, &groups[..start])?;
        w.write_str("::")?;
        let rest = &groups[start + len..];
        write_groups(w, rest)?;
        if tail && !rest.is_empty() {
            w.write_char(':')?;
        }
    } else {
        write_groups(w, groups)?;
        if tail {
            w.write_char(':')?;
        }
    }
    Ok(())
}

fn write_ipv4<W: Write>(w: &mut W, v4: u32) -> fmt::Result {
    let [a, b, c, d] = v4.to_be_bytes();
    write!(w, "{a}.{b}.{c}.{d}")
}

fn write_address<W: Write>(w: &mut W, address: &Address) -> fmt::Result {
    match address {
        Address::Ipv6(groups) => write_colon_form(w, groups, false),
        Address::Ipv4Compat(v4) => write_ipv4(w, *v4),
        Address::Ipv4Embedded { prefix, ipv4 } => {
            write_colon_form(w, prefix, true)?;
            write_ipv4(w, *ipv4)
        }
    }
}

fn write_canonical<W: Write>(w: &mut W, rec: &AddressFull) -> fmt::Result {
    let bracketed = rec.port.is_some() && rec.address.is_ipv6_form();
    if bracketed {
        w.write_char('[')?;
    }
    write_address(w, &rec.address)?;
    if let Some(mask) = rec.mask {
        write!(w, "/{mask}")?;
    }
    if bracketed {
        w.write_char(']')?;
    }
    if let Some(port) = rec.port {
        write!(w, ":{port}")?;
    }
    Ok(())
}

fn render(rec: &AddressFull) -> StackBuf<MAX_STRING_LEN> {
    let mut out = StackBuf::new();
    // MAX_STRING_LEN is the longest rendering any record can produce.
    let _ = write_canonical(&mut out, rec);
    out
}

impl AddressFull {
    /// Write the canonical form into `buf`, followed by a NUL terminator.
    ///
    /// Returns the string length, excluding the terminator. When `buf` is
    /// too small nothing partial is written: `buf[0]` is set to NUL and
    /// [`FormatError::BufferTooSmall`] is returned.
    ///
    /// ```
    /// use ipv6_parse::{STRING_SIZE, parse};
    ///
    /// let rec = parse(b"2001:0db8:0:0:0:0:0:1").unwrap();
    /// let mut buf = [0u8; STRING_SIZE];
    /// let n = rec.format(&mut buf).unwrap();
    /// assert_eq!(&buf[..n], b"2001:db8::1");
    /// assert_eq!(buf[n], 0);
    /// ```
    pub fn format(&self, buf: &mut [u8]) -> Result<usize, FormatError> {
        if buf.is_empty() {
            return Err(FormatError::EmptyBuffer);
        }
        let rendered = render(self);
        let text = rendered.as_bytes();
        let needed = text.len() + 1;
        if needed > buf.len() {
            buf[0] = 0;
            return Err(FormatError::BufferTooSmall {
                needed,
                capacity: buf.len(),
            });
        }
        buf[..text.len()].copy_from_slice(text);
        buf[text.len()] = 0;
        trace!("formatted {:?} as '{}'", self, rendered.as_str());
        Ok(text.len())
    }

    /// Length of the canonical form, excluding the terminator.
    pub fn canonical_len(&self) -> usize {
        render(self).len
    }
}

impl fmt::Display for AddressFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(render(self).as_str())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&AddressFull::new(*self), f)
    }
}
