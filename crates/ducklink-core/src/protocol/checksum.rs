//! Fletcher-16 integrity checksum appended to every encoded message.
//!
//! # How it works (for beginners)
//!
//! Two running sums are kept while walking the bytes:
//!
//! ```text
//! a = (a + byte) mod 255        -- plain sum of the bytes
//! b = (b + a)    mod 255        -- sum of the running sums (position-weighted)
//! ```
//!
//! Reducing modulo 255 rather than 256 is the one's-complement "end-around
//! carry": overflow out of the top bit is folded back into the low bits
//! instead of being lost.  Because `b` weights earlier bytes more heavily than
//! later ones, swapping two bytes changes the result even though `a` stays the
//! same.
//!
//! The checksum is `(a << 8) | b` and travels little-endian after the fields.
//! A single flipped bit changes a byte by a power of two, which is never a
//! multiple of 255, so `a` always changes and single-bit corruption is always
//! caught.  No lookup table is needed, which keeps it cheap on 8-bit targets.

/// Number of checksum bytes at the end of every message.
pub const CHECKSUM_LEN: usize = 2;

/// Computes the Fletcher-16 checksum of `bytes`.
///
/// Pure and deterministic.  The empty input yields `0x0000`.
///
/// # Examples
///
/// ```rust
/// use ducklink_core::protocol::checksum::compute_checksum;
///
/// assert_eq!(compute_checksum(&[]), 0x0000);
/// assert_eq!(compute_checksum(&[0x01, 0x02]), 0x0304);
/// ```
pub const fn compute_checksum(bytes: &[u8]) -> u16 {
    let mut a: u16 = 0;
    let mut b: u16 = 0;
    let mut i = 0;
    while i < bytes.len() {
        a = (a + bytes[i] as u16) % 255;
        b = (b + a) % 255;
        i += 1;
    }
    (a << 8) | b
}

// ── Tests ─────────────────────────────────────────────────────────────────────
