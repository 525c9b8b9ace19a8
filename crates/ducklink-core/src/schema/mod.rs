//! Field schema: bounded scalar fields and fixed-capacity strings.
//!
//! Every field of every Ducklink message is described here twice: once as a
//! concrete Rust type stored inside the message struct, and once as a
//! [`FieldSpec`] entry in the message's static schema table.  The schema table
//! is what fixes the wire layout (field order and width) and what tools use to
//! list, parse and display fields without knowing the concrete message type.
//!
//! # Clamping (for beginners)
//!
//! Messages travel between small microcontrollers that cannot afford to
//! reject a command because a value is slightly out of range.  Instead every
//! setter *clamps* its input into the field's declared range:
//!
//! ```text
//! clamp(lo, v, hi) = lo   if v < lo
//!                    hi   if hi < v
//!                    v    otherwise
//! ```
//!
//! Clamping never fails and never allocates.  Applying it twice gives the same
//! result as applying it once.  A float NaN, which is neither below nor above
//! anything, is replaced by `lo`.

use std::cmp::Ordering;

pub mod field;
pub mod fixed_str;

pub use field::{
    field_offset, payload_len, Bounds, FieldError, FieldSpec, FieldType, FieldValue,
};
pub use fixed_str::FixedStr;

/// Bounds `v` into the inclusive range `[lo, hi]`.
///
/// Works for any partially ordered type.  A value that is unordered against
/// `lo` (a float NaN) yields `lo`, so the result is always inside the range.
///
/// # Examples
///
/// ```rust
/// use ducklink_core::schema::clamp;
///
/// assert_eq!(clamp(0u8, 15, 10), 10);
/// assert_eq!(clamp(-2i16, -7, 10), -2);
/// assert_eq!(clamp(-30.0f32, 12.5, 1000.0), 12.5);
/// assert_eq!(clamp(-30.0f32, f32::NAN, 1000.0), -30.0);
/// ```
pub fn clamp<T: PartialOrd>(lo: T, v: T, hi: T) -> T {
    match v.partial_cmp(&lo) {
        Some(Ordering::Less) | None => lo,
        _ if hi < v => hi,
        _ => v,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
