//! Fixed-capacity, NUL-terminated byte strings.

use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};

/// A string field stored in exactly `N` bytes.
///
/// The content is at most `N - 1` bytes long and is always followed by at least
/// one NUL byte inside the buffer, mirroring the `char name[N]` arrays of the
/// C peers on the bus.  Unused bytes are zero, so [`raw`](Self::raw) is the
/// exact wire image of the field.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedStr<const N: usize> {
    buf: [u8; N],
}

impl<const N: usize> FixedStr<N> {
    /// Creates an empty string.
    pub const fn new() -> Self {
        Self { buf: [0; N] }
    }

    /// Replaces the content with `src`, truncated to `N - 1` bytes.
    ///
    /// Copying stops at the first NUL in `src`, if any.  Returns `true` when
    /// content was dropped to fit the capacity.
    pub fn set(&mut self, src: impl AsRef<[u8]>) -> bool {
        let src = src.as_ref();
        let content = match src.iter().position(|&b| b == 0) {
            Some(end) => &src[..end],
            None => src,
        };
        let limit = N.saturating_sub(1);
        let len = content.len().min(limit);

        self.buf = [0; N];
        self.buf[..len].copy_from_slice(&content[..len]);
        content.len() > limit
    }

    /// Content length in bytes, terminator excluded.
    pub fn len(&self) -> usize {
        self.buf.iter().position(|&b| b == 0).unwrap_or(N)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Content bytes, terminator excluded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len()]
    }

    /// The full `N`-byte backing array, terminator and zero padding included.
    pub fn raw(&self) -> &[u8; N] {
        &self.buf
    }

    /// The content as `&str`, or `None` if it is not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()).ok()
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedStr<{N}>({:?})", self.to_string_lossy())
    }
}

impl<const N: usize> fmt::Display for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl<const N: usize> Serialize for FixedStr<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_is_empty_and_zeroed() {
        let s = FixedStr::<12>::new();
        assert!(s.is_empty());
        assert_eq!(s.raw(), &[0u8; 12]);
        assert_eq!(s.as_str(), Some(""));
    }

    #[test]
    fn test_set_short_string_fits() {
        let mut s = FixedStr::<12>::new();
        let truncated = s.set("toto");

        assert!(!truncated);
        assert_eq!(s.as_bytes(), b"toto");
        assert_eq!(s.len(), 4);
        assert_eq!(s.raw()[4..], [0u8; 8]);
    }

    #[test]
    fn test_set_long_string_truncates_to_capacity_minus_one() {
        // Arrange
        let mut s = FixedStr::<12>::new();

        // Act
        let truncated = s.set("ThisNameIsWayTooLong");

        // Assert
        assert!(truncated);
        assert_eq!(s.as_bytes(), b"ThisNameIsW");
        assert_eq!(s.len(), 11);
        assert_eq!(s.raw()[11], 0);
    }

    #[test]
    fn test_set_exactly_capacity_minus_one_is_not_truncation() {
        let mut s = FixedStr::<10>::new();
        assert!(!s.set("123456789"));
        assert_eq!(s.as_bytes(), b"123456789");
    }

    #[test]
    fn test_set_stops_at_embedded_nul() {
        let mut s = FixedStr::<10>::new();
        s.set(b"ab\0cd");
        assert_eq!(s.as_bytes(), b"ab");
    }

    #[test]
    fn test_set_clears_previous_longer_content() {
        let mut s = FixedStr::<10>::new();
        s.set("longvalue");
        s.set("ab");
        assert_eq!(s.as_bytes(), b"ab");
        assert_eq!(s.raw()[2..], [0u8; 8]);
    }

    #[test]
    fn test_non_utf8_content_is_kept_as_bytes() {
        let mut s = FixedStr::<4>::new();
        s.set([0xFFu8, 0xFE]);
        assert_eq!(s.as_bytes(), &[0xFF, 0xFE]);
        assert_eq!(s.as_str(), None);
        assert_eq!(s.to_string_lossy(), "\u{FFFD}\u{FFFD}");
    }

    #[test]
    fn test_serializes_as_json_string() {
        let mut s = FixedStr::<10>::new();
        s.set("prout");
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"prout\"");
    }

    proptest! {
        #[test]
        fn prop_set_keeps_a_terminated_prefix(src in proptest::collection::vec(1u8..=255, 0..40)) {
            let mut s = FixedStr::<12>::new();
            let truncated = s.set(&src);

            prop_assert!(s.len() <= 11);
            prop_assert!(src.starts_with(s.as_bytes()));
            prop_assert_eq!(s.raw()[s.len()], 0);
            prop_assert_eq!(truncated, src.len() > 11);
        }
    }
}
