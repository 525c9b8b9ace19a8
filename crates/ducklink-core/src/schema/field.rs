//! Static field descriptors and dynamically typed field values.
//!
//! A [`FieldSpec`] names one field and its [`FieldType`]; the ordered table of
//! specs for a message kind *is* its wire layout.  [`FieldValue`] carries a
//! single field value when the concrete message type is not known statically
//! (command-line tools, JSON dumps).

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::clamp;

/// Errors raised by name-based field access.
///
/// Clamping and string truncation are never errors; these variants only cover
/// asking for a field that does not exist or handing it the wrong kind of value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    /// The message kind has no field with this name.
    #[error("{kind} has no field named `{field}`")]
    UnknownField { kind: &'static str, field: String },

    /// The value's type does not match the field's declared type.
    #[error("field `{field}` expects {expected}, got {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// The text could not be parsed as the field's type.
    #[error("invalid {expected} value `{value}`: {reason}")]
    InvalidValue {
        expected: &'static str,
        value: String,
        reason: String,
    },
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Inclusive `[min, max]` range of a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T> Bounds<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd + Copy> Bounds<T> {
    /// Clamps `v` into this range.
    pub fn apply(&self, v: T) -> T {
        clamp(self.min, v, self.max)
    }

    /// Whether `v` lies inside the range (NaN never does).
    pub fn contains(&self, v: T) -> bool {
        self.min <= v && v <= self.max
    }
}

impl<T: Copy + Into<i64> + TryFrom<i64>> Bounds<T> {
    /// Clamps an integer of any width into this range and narrows it to `T`.
    pub fn apply_wide(&self, v: i64) -> T {
        let clamped = clamp(self.min.into(), v, self.max.into());
        // In range by construction, so the fallback is never taken.
        T::try_from(clamped).unwrap_or(self.max)
    }
}

// ── Field types ───────────────────────────────────────────────────────────────

/// Wire type and valid range of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldType {
    /// 8-bit two's-complement integer.
    I8(Bounds<i8>),
    /// 16-bit two's-complement integer, little-endian.
    I16(Bounds<i16>),
    /// 8-bit unsigned integer.
    U8(Bounds<u8>),
    /// IEEE-754 single precision float, little-endian.
    F32(Bounds<f32>),
    /// Fixed-capacity, NUL-terminated byte string.  The value is the capacity
    /// in bytes, terminator included.
    Chars(usize),
}

impl FieldType {
    /// Number of bytes this field occupies on the wire.
    pub const fn width(&self) -> usize {
        match self {
            FieldType::I8(_) | FieldType::U8(_) => 1,
            FieldType::I16(_) => 2,
            FieldType::F32(_) => 4,
            FieldType::Chars(capacity) => *capacity,
        }
    }

    /// Short type name as used in schema listings (`"u8"`, `"chars"`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::I8(_) => "i8",
            FieldType::I16(_) => "i16",
            FieldType::U8(_) => "u8",
            FieldType::F32(_) => "f32",
            FieldType::Chars(_) => "chars",
        }
    }

    /// Parses operator-supplied text into a value for this field.
    ///
    /// Integers are parsed at full `i64` width and clamped later by the
    /// message setter, so `"200"` is accepted for a `u8` field bounded to
    /// `[0, 10]` and stored as `10`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidValue`] if the text is not a number of the
    /// right shape.
    pub fn parse(&self, raw: &str) -> Result<FieldValue, FieldError> {
        let text = raw.trim();
        let invalid = |reason: String| FieldError::InvalidValue {
            expected: self.type_name(),
            value: raw.to_string(),
            reason,
        };
        match self {
            FieldType::I8(_) | FieldType::I16(_) | FieldType::U8(_) => text
                .parse::<i64>()
                .map(FieldValue::Int)
                .map_err(|e| invalid(e.to_string())),
            FieldType::F32(_) => text
                .parse::<f32>()
                .map(FieldValue::Float)
                .map_err(|e| invalid(e.to_string())),
            // Strings keep their surrounding whitespace.
            FieldType::Chars(_) => Ok(FieldValue::Chars(raw.to_string())),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::I8(b) => write!(f, "i8 [{}, {}]", b.min, b.max),
            FieldType::I16(b) => write!(f, "i16 [{}, {}]", b.min, b.max),
            FieldType::U8(b) => write!(f, "u8 [{}, {}]", b.min, b.max),
            FieldType::F32(b) => write!(f, "f32 [{}, {}]", Sci(b.min), Sci(b.max)),
            FieldType::Chars(capacity) => write!(f, "chars[{capacity}]"),
        }
    }
}

/// Prints large floats in scientific notation so `f32::MAX` stays readable.
struct Sci(f32);

impl fmt::Display for Sci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.abs() >= 1.0e6 {
            write!(f, "{:e}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// One named field of a message schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
}

impl FieldSpec {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty }
    }
}

// ── Schema arithmetic ─────────────────────────────────────────────────────────

/// Total wire width of all fields, excluding the id byte and checksum.
pub const fn payload_len(fields: &[FieldSpec]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fields.len() {
        total += fields[i].ty.width();
        i += 1;
    }
    total
}

/// Offset of field `index` from the start of the payload (the byte after the id).
///
/// An `index` equal to `fields.len()` yields the payload length.
pub const fn field_offset(fields: &[FieldSpec], index: usize) -> usize {
    let mut offset = 0;
    let mut i = 0;
    while i < index && i < fields.len() {
        offset += fields[i].ty.width();
        i += 1;
    }
    offset
}

// ── Dynamic values ────────────────────────────────────────────────────────────

/// A single field value, detached from any message.
///
/// Integer fields of every width share [`FieldValue::Int`]; the receiving
/// setter clamps and narrows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f32),
    /// String content without the terminator.  Bytes that are not UTF-8 are
    /// replaced when read out of a message.
    Chars(String),
}

impl FieldValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Int(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Chars(_) => "string",
        }
    }

    pub(crate) fn into_int(self, field: &'static str) -> Result<i64, FieldError> {
        match self {
            FieldValue::Int(v) => Ok(v),
            other => Err(other.mismatch(field, "integer")),
        }
    }

    /// Integers are accepted for float fields and converted.
    pub(crate) fn into_float(self, field: &'static str) -> Result<f32, FieldError> {
        match self {
            FieldValue::Float(v) => Ok(v),
            FieldValue::Int(v) => Ok(v as f32),
            other => Err(other.mismatch(field, "float")),
        }
    }

    pub(crate) fn into_chars(self, field: &'static str) -> Result<String, FieldError> {
        match self {
            FieldValue::Chars(v) => Ok(v),
            other => Err(other.mismatch(field, "string")),
        }
    }

    fn mismatch(&self, field: &'static str, expected: &'static str) -> FieldError {
        FieldError::TypeMismatch {
            field,
            expected,
            found: self.type_name(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Chars(v) => write!(f, "{v:?}"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[FieldSpec] = &[
        FieldSpec::new("decimal", FieldType::F32(Bounds::new(-30.0, 1000.0))),
        FieldSpec::new("entier", FieldType::I16(Bounds::new(i16::MIN, i16::MAX))),
        FieldSpec::new("name", FieldType::Chars(12)),
    ];

    #[test]
    fn test_width_matches_wire_types() {
        assert_eq!(FieldType::I8(Bounds::new(-1, 1)).width(), 1);
        assert_eq!(FieldType::U8(Bounds::new(0, 10)).width(), 1);
        assert_eq!(FieldType::I16(Bounds::new(-2, 10)).width(), 2);
        assert_eq!(FieldType::F32(Bounds::new(0.0, 1.0)).width(), 4);
        assert_eq!(FieldType::Chars(10).width(), 10);
    }

    #[test]
    fn test_payload_len_sums_field_widths() {
        assert_eq!(payload_len(SAMPLE), 4 + 2 + 12);
        assert_eq!(payload_len(&[]), 0);
    }

    #[test]
    fn test_field_offset_accumulates_preceding_widths() {
        assert_eq!(field_offset(SAMPLE, 0), 0);
        assert_eq!(field_offset(SAMPLE, 1), 4);
        assert_eq!(field_offset(SAMPLE, 2), 6);
        assert_eq!(field_offset(SAMPLE, 3), payload_len(SAMPLE));
    }

    #[test]
    fn test_bounds_apply_clamps() {
        let b = Bounds::new(-2i16, 10);
        assert_eq!(b.apply(50), 10);
        assert_eq!(b.apply(-50), -2);
        assert_eq!(b.apply(3), 3);
        assert!(b.contains(-2));
        assert!(!b.contains(11));
    }

    #[test]
    fn test_bounds_apply_wide_saturates_to_field_width() {
        let vx = Bounds::new(i8::MIN, i8::MAX);
        assert_eq!(vx.apply_wide(-200), -128);
        assert_eq!(vx.apply_wide(1_000_000), 127);

        let vtheta = Bounds::new(0u8, 10);
        assert_eq!(vtheta.apply_wide(-1), 0);
        assert_eq!(vtheta.apply_wide(15), 10);
        assert_eq!(vtheta.apply_wide(i64::MAX), 10);
    }

    #[test]
    fn test_parse_accepts_out_of_range_integers() {
        let ty = FieldType::U8(Bounds::new(0, 10));
        assert_eq!(ty.parse("200"), Ok(FieldValue::Int(200)));
        let ty = FieldType::I8(Bounds::new(i8::MIN, i8::MAX));
        assert_eq!(ty.parse("-200"), Ok(FieldValue::Int(-200)));
    }

    #[test]
    fn test_parse_rejects_malformed_numbers() {
        let ty = FieldType::I16(Bounds::new(-2, 10));
        let err = ty.parse("ten").unwrap_err();
        assert!(matches!(err, FieldError::InvalidValue { expected: "i16", .. }));

        let ty = FieldType::F32(Bounds::new(-30.0, 1000.0));
        assert!(ty.parse("1.2.3").is_err());
    }

    #[test]
    fn test_parse_float_and_chars() {
        assert_eq!(
            FieldType::F32(Bounds::new(-30.0, 1000.0)).parse(" 12.5 "),
            Ok(FieldValue::Float(12.5))
        );
        assert_eq!(
            FieldType::Chars(12).parse(" padded "),
            Ok(FieldValue::Chars(" padded ".to_string()))
        );
    }

    #[test]
    fn test_value_conversion_reports_type_mismatch() {
        let err = FieldValue::Chars("x".into()).into_int("vy").unwrap_err();
        assert_eq!(
            err,
            FieldError::TypeMismatch {
                field: "vy",
                expected: "integer",
                found: "string"
            }
        );
    }

    #[test]
    fn test_int_value_is_accepted_for_float_field() {
        assert_eq!(FieldValue::Int(5).into_float("decimal"), Ok(5.0));
    }

    #[test]
    fn test_field_type_display() {
        assert_eq!(FieldType::U8(Bounds::new(0, 10)).to_string(), "u8 [0, 10]");
        assert_eq!(FieldType::Chars(12).to_string(), "chars[12]");
        assert_eq!(
            FieldType::F32(Bounds::new(-30.0, 1000.0)).to_string(),
            "f32 [-30, 1000]"
        );
    }
}
