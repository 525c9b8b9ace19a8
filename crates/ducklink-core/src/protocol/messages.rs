//! All Ducklink message kinds.
//!
//! The catalog is closed: four kinds, each with a constant id, a fixed field
//! layout and a fixed wire length.  Adding a kind means editing this file, not
//! registering something at runtime.
//!
//! | Kind            | id | Fields                                                        |
//! |-----------------|----|---------------------------------------------------------------|
//! | `DownToto`      | 0  | decimal: f32, entier: i16, name: chars[12], vx: f32           |
//! | `InterMCUProut` | 1  | odeur: chars[10]                                              |
//! | `UpPlop`        | 2  | decimal: f32 [-30, 1000], entier: i16, name: chars[12]        |
//! | `UpSpeedReport` | 3  | vtheta: u8 [0, 10], vx: i8, vy: i16 [-2, 10]                  |
//!
//! Fields are private and only reachable through clamping setters, so a
//! message never holds an out-of-range value.  Integer setters accept any
//! integer that fits in an `i64` and saturate it into the field's range;
//! float setters clamp in `f32`, which sends infinities to `f32::MIN`/`f32::MAX`
//! on the full-range fields and NaN to the field's lower bound.

use std::fmt;

use crate::protocol::codec::{self, decode_as, serialize_into, wire_len, ProtocolError};
use crate::schema::{Bounds, FieldError, FieldSpec, FieldType, FieldValue, FixedStr};

/// Capacity of the `name` field, terminator included.
pub const NAME_LEN: usize = 12;
/// Capacity of the `odeur` field, terminator included.
pub const ODEUR_LEN: usize = 10;

/// Name field shared by [`DownToto`] and [`UpPlop`].
pub type Name = FixedStr<NAME_LEN>;

/// Single field of [`InterMcuProut`].
pub type Odeur = FixedStr<ODEUR_LEN>;

// ── Message kinds ─────────────────────────────────────────────────────────────

/// Identifier of every kind in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[repr(u8)]
pub enum MessageKind {
    DownToto = 0,
    #[serde(rename = "InterMCUProut")]
    InterMcuProut = 1,
    UpPlop = 2,
    UpSpeedReport = 3,
}

impl MessageKind {
    /// Every kind, in id order.
    pub const ALL: [MessageKind; 4] = [
        MessageKind::DownToto,
        MessageKind::InterMcuProut,
        MessageKind::UpPlop,
        MessageKind::UpSpeedReport,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageKind::DownToto => DownToto::NAME,
            MessageKind::InterMcuProut => InterMcuProut::NAME,
            MessageKind::UpPlop => UpPlop::NAME,
            MessageKind::UpSpeedReport => UpSpeedReport::NAME,
        }
    }

    /// Schema table of this kind, in wire order.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            MessageKind::DownToto => DownToto::FIELDS,
            MessageKind::InterMcuProut => InterMcuProut::FIELDS,
            MessageKind::UpPlop => UpPlop::FIELDS,
            MessageKind::UpSpeedReport => UpSpeedReport::FIELDS,
        }
    }

    pub fn wire_len(self) -> usize {
        match self {
            MessageKind::DownToto => DownToto::WIRE_LEN,
            MessageKind::InterMcuProut => InterMcuProut::WIRE_LEN,
            MessageKind::UpPlop => UpPlop::WIRE_LEN,
            MessageKind::UpSpeedReport => UpSpeedReport::WIRE_LEN,
        }
    }

    /// Looks a kind up by catalog name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// A freshly constructed message of this kind, all fields at default.
    pub fn default_message(self) -> AnyMessage {
        match self {
            MessageKind::DownToto => DownToto::new().into(),
            MessageKind::InterMcuProut => InterMcuProut::new().into(),
            MessageKind::UpPlop => UpPlop::new().into(),
            MessageKind::UpSpeedReport => UpSpeedReport::new().into(),
        }
    }

    /// Decodes a message of this kind from the start of `buf`.
    ///
    /// # Errors
    ///
    /// See [`codec::decode_any`].
    pub fn decode(self, buf: &[u8]) -> Result<AnyMessage, ProtocolError> {
        match self {
            MessageKind::DownToto => decode_as::<DownToto>(buf).map(AnyMessage::DownToto),
            MessageKind::InterMcuProut => {
                decode_as::<InterMcuProut>(buf).map(AnyMessage::InterMcuProut)
            }
            MessageKind::UpPlop => decode_as::<UpPlop>(buf).map(AnyMessage::UpPlop),
            MessageKind::UpSpeedReport => {
                decode_as::<UpSpeedReport>(buf).map(AnyMessage::UpSpeedReport)
            }
        }
    }
}

impl TryFrom<u8> for MessageKind {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, ProtocolError> {
        match value {
            0 => Ok(MessageKind::DownToto),
            1 => Ok(MessageKind::InterMcuProut),
            2 => Ok(MessageKind::UpPlop),
            3 => Ok(MessageKind::UpSpeedReport),
            _ => Err(ProtocolError::UnknownId(value)),
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Message capability ────────────────────────────────────────────────────────

pub(crate) mod sealed {
    use crate::protocol::codec::{FieldReader, FieldWriter};

    /// Per-kind field packing.  Only implementable inside this crate.
    pub trait WireFields: Sized {
        /// Writes every field in schema order.
        fn encode_fields(&self, w: &mut FieldWriter<'_>);
        /// Reads every field in schema order, routing each through its setter.
        fn decode_fields(r: &mut FieldReader<'_>) -> Self;
    }
}

/// Behaviour shared by every message kind: identity and serialization.
pub trait DuckMessage: sealed::WireFields + Copy + Default {
    /// Constant catalog id.
    const ID: u8;
    /// Catalog name.
    const NAME: &'static str;
    /// Field layout, in wire order.
    const FIELDS: &'static [FieldSpec];
    /// Total encoded size: id + fields + checksum.
    const WIRE_LEN: usize = wire_len(Self::FIELDS);

    fn id(&self) -> u8 {
        Self::ID
    }

    /// Writes the wire representation at the start of `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InsufficientBuffer`] if `buf` is shorter than
    /// [`Self::WIRE_LEN`]; `buf` is left untouched in that case.
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, ProtocolError> {
        serialize_into(self, buf)
    }

    /// Returns the wire representation in an exactly sized vector.
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; Self::WIRE_LEN];
        codec::write_frame(self, &mut out);
        out
    }

    /// Decodes a message of this kind from the start of `buf`.
    ///
    /// # Errors
    ///
    /// See [`codec::decode_as`].
    fn decode(buf: &[u8]) -> Result<Self, ProtocolError> {
        decode_as(buf)
    }

    /// Reads a field by schema name.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Writes a field by schema name through its clamping setter.
    ///
    /// # Errors
    ///
    /// [`FieldError::UnknownField`] for a name not in [`Self::FIELDS`],
    /// [`FieldError::TypeMismatch`] for a value of the wrong shape.
    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError>;

    /// All fields as `(name, value)` pairs, in wire order.
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        Self::FIELDS
            .iter()
            .filter_map(|spec| self.field(spec.name).map(|value| (spec.name, value)))
            .collect()
    }
}

fn unknown_field(kind: &'static str, field: &str) -> FieldError {
    FieldError::UnknownField {
        kind,
        field: field.to_string(),
    }
}

// ── DownToto (0) ──────────────────────────────────────────────────────────────

/// DOWN_TOTO (0): downlink test message carrying two floats, an integer and a name.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct DownToto {
    decimal: f32,
    entier: i16,
    name: Name,
    vx: f32,
}

impl DownToto {
    pub const DECIMAL: Bounds<f32> = Bounds::new(f32::MIN, f32::MAX);
    pub const ENTIER: Bounds<i16> = Bounds::new(i16::MIN, i16::MAX);
    pub const VX: Bounds<f32> = Bounds::new(f32::MIN, f32::MAX);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn decimal(&self) -> f32 {
        self.decimal
    }

    pub fn set_decimal(&mut self, decimal: f32) {
        self.decimal = Self::DECIMAL.apply(decimal);
    }

    pub fn entier(&self) -> i16 {
        self.entier
    }

    pub fn set_entier(&mut self, entier: impl Into<i64>) {
        self.entier = Self::ENTIER.apply_wide(entier.into());
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns `true` if `name` was truncated to fit.
    pub fn set_name(&mut self, name: impl AsRef<[u8]>) -> bool {
        self.name.set(name)
    }

    pub fn vx(&self) -> f32 {
        self.vx
    }

    pub fn set_vx(&mut self, vx: f32) {
        self.vx = Self::VX.apply(vx);
    }
}

impl sealed::WireFields for DownToto {
    fn encode_fields(&self, w: &mut codec::FieldWriter<'_>) {
        w.put_f32(self.decimal);
        w.put_i16(self.entier);
        w.put_chars(self.name.raw());
        w.put_f32(self.vx);
    }

    fn decode_fields(r: &mut codec::FieldReader<'_>) -> Self {
        let mut m = Self::new();
        m.set_decimal(r.f32());
        m.set_entier(r.i16());
        m.set_name(r.chars::<NAME_LEN>());
        m.set_vx(r.f32());
        m
    }
}

impl DuckMessage for DownToto {
    const ID: u8 = 0;
    const NAME: &'static str = "DownToto";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("decimal", FieldType::F32(Self::DECIMAL)),
        FieldSpec::new("entier", FieldType::I16(Self::ENTIER)),
        FieldSpec::new("name", FieldType::Chars(NAME_LEN)),
        FieldSpec::new("vx", FieldType::F32(Self::VX)),
    ];

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "decimal" => Some(FieldValue::Float(self.decimal)),
            "entier" => Some(FieldValue::Int(self.entier.into())),
            "name" => Some(FieldValue::Chars(self.name.to_string())),
            "vx" => Some(FieldValue::Float(self.vx)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match name {
            "decimal" => self.set_decimal(value.into_float("decimal")?),
            "entier" => self.set_entier(value.into_int("entier")?),
            "name" => {
                self.set_name(value.into_chars("name")?);
            }
            "vx" => self.set_vx(value.into_float("vx")?),
            _ => return Err(unknown_field(Self::NAME, name)),
        }
        Ok(())
    }
}

// ── InterMCUProut (1) ─────────────────────────────────────────────────────────

/// INTER_MCU_PROUT (1): inter-microcontroller message with a single short string.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct InterMcuProut {
    odeur: Odeur,
}

impl InterMcuProut {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn odeur(&self) -> &Odeur {
        &self.odeur
    }

    /// Returns `true` if `odeur` was truncated to fit.
    pub fn set_odeur(&mut self, odeur: impl AsRef<[u8]>) -> bool {
        self.odeur.set(odeur)
    }
}

impl sealed::WireFields for InterMcuProut {
    fn encode_fields(&self, w: &mut codec::FieldWriter<'_>) {
        w.put_chars(self.odeur.raw());
    }

    fn decode_fields(r: &mut codec::FieldReader<'_>) -> Self {
        let mut m = Self::new();
        m.set_odeur(r.chars::<ODEUR_LEN>());
        m
    }
}

impl DuckMessage for InterMcuProut {
    const ID: u8 = 1;
    const NAME: &'static str = "InterMCUProut";
    const FIELDS: &'static [FieldSpec] =
        &[FieldSpec::new("odeur", FieldType::Chars(ODEUR_LEN))];

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "odeur" => Some(FieldValue::Chars(self.odeur.to_string())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match name {
            "odeur" => {
                self.set_odeur(value.into_chars("odeur")?);
                Ok(())
            }
            _ => Err(unknown_field(Self::NAME, name)),
        }
    }
}

// ── UpPlop (2) ────────────────────────────────────────────────────────────────

/// UP_PLOP (2): uplink message with a bounded float, an integer and a name.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct UpPlop {
    decimal: f32,
    entier: i16,
    name: Name,
}

impl UpPlop {
    pub const DECIMAL: Bounds<f32> = Bounds::new(-30.0, 1000.0);
    pub const ENTIER: Bounds<i16> = Bounds::new(i16::MIN, i16::MAX);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn decimal(&self) -> f32 {
        self.decimal
    }

    pub fn set_decimal(&mut self, decimal: f32) {
        self.decimal = Self::DECIMAL.apply(decimal);
    }

    pub fn entier(&self) -> i16 {
        self.entier
    }

    pub fn set_entier(&mut self, entier: impl Into<i64>) {
        self.entier = Self::ENTIER.apply_wide(entier.into());
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns `true` if `name` was truncated to fit.
    pub fn set_name(&mut self, name: impl AsRef<[u8]>) -> bool {
        self.name.set(name)
    }
}

impl sealed::WireFields for UpPlop {
    fn encode_fields(&self, w: &mut codec::FieldWriter<'_>) {
        w.put_f32(self.decimal);
        w.put_i16(self.entier);
        w.put_chars(self.name.raw());
    }

    fn decode_fields(r: &mut codec::FieldReader<'_>) -> Self {
        let mut m = Self::new();
        m.set_decimal(r.f32());
        m.set_entier(r.i16());
        m.set_name(r.chars::<NAME_LEN>());
        m
    }
}

impl DuckMessage for UpPlop {
    const ID: u8 = 2;
    const NAME: &'static str = "UpPlop";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("decimal", FieldType::F32(Self::DECIMAL)),
        FieldSpec::new("entier", FieldType::I16(Self::ENTIER)),
        FieldSpec::new("name", FieldType::Chars(NAME_LEN)),
    ];

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "decimal" => Some(FieldValue::Float(self.decimal)),
            "entier" => Some(FieldValue::Int(self.entier.into())),
            "name" => Some(FieldValue::Chars(self.name.to_string())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match name {
            "decimal" => self.set_decimal(value.into_float("decimal")?),
            "entier" => self.set_entier(value.into_int("entier")?),
            "name" => {
                self.set_name(value.into_chars("name")?);
            }
            _ => return Err(unknown_field(Self::NAME, name)),
        }
        Ok(())
    }
}

// ── UpSpeedReport (3) ─────────────────────────────────────────────────────────

/// UP_SPEED_REPORT (3): uplink speed report (angular speed, x and y speed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct UpSpeedReport {
    vtheta: u8,
    vx: i8,
    vy: i16,
}

impl UpSpeedReport {
    pub const VTHETA: Bounds<u8> = Bounds::new(0, 10);
    pub const VX: Bounds<i8> = Bounds::new(i8::MIN, i8::MAX);
    pub const VY: Bounds<i16> = Bounds::new(-2, 10);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn vtheta(&self) -> u8 {
        self.vtheta
    }

    pub fn set_vtheta(&mut self, vtheta: impl Into<i64>) {
        self.vtheta = Self::VTHETA.apply_wide(vtheta.into());
    }

    pub fn vx(&self) -> i8 {
        self.vx
    }

    pub fn set_vx(&mut self, vx: impl Into<i64>) {
        self.vx = Self::VX.apply_wide(vx.into());
    }

    pub fn vy(&self) -> i16 {
        self.vy
    }

    pub fn set_vy(&mut self, vy: impl Into<i64>) {
        self.vy = Self::VY.apply_wide(vy.into());
    }
}

impl sealed::WireFields for UpSpeedReport {
    fn encode_fields(&self, w: &mut codec::FieldWriter<'_>) {
        w.put_u8(self.vtheta);
        w.put_i8(self.vx);
        w.put_i16(self.vy);
    }

    fn decode_fields(r: &mut codec::FieldReader<'_>) -> Self {
        let mut m = Self::new();
        m.set_vtheta(r.u8());
        m.set_vx(r.i8());
        m.set_vy(r.i16());
        m
    }
}

impl DuckMessage for UpSpeedReport {
    const ID: u8 = 3;
    const NAME: &'static str = "UpSpeedReport";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("vtheta", FieldType::U8(Self::VTHETA)),
        FieldSpec::new("vx", FieldType::I8(Self::VX)),
        FieldSpec::new("vy", FieldType::I16(Self::VY)),
    ];

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "vtheta" => Some(FieldValue::Int(self.vtheta.into())),
            "vx" => Some(FieldValue::Int(self.vx.into())),
            "vy" => Some(FieldValue::Int(self.vy.into())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        match name {
            "vtheta" => self.set_vtheta(value.into_int("vtheta")?),
            "vx" => self.set_vx(value.into_int("vx")?),
            "vy" => self.set_vy(value.into_int("vy")?),
            _ => return Err(unknown_field(Self::NAME, name)),
        }
        Ok(())
    }
}

// ── Top-level message enum ────────────────────────────────────────────────────

/// Any message in the catalog, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "fields")]
pub enum AnyMessage {
    DownToto(DownToto),
    #[serde(rename = "InterMCUProut")]
    InterMcuProut(InterMcuProut),
    UpPlop(UpPlop),
    UpSpeedReport(UpSpeedReport),
}

/// Runs `$body` with `$m` bound to the concrete message inside an [`AnyMessage`].
macro_rules! with_message {
    ($any:expr, $m:ident => $body:expr) => {
        match $any {
            AnyMessage::DownToto($m) => $body,
            AnyMessage::InterMcuProut($m) => $body,
            AnyMessage::UpPlop($m) => $body,
            AnyMessage::UpSpeedReport($m) => $body,
        }
    };
}

impl AnyMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            AnyMessage::DownToto(_) => MessageKind::DownToto,
            AnyMessage::InterMcuProut(_) => MessageKind::InterMcuProut,
            AnyMessage::UpPlop(_) => MessageKind::UpPlop,
            AnyMessage::UpSpeedReport(_) => MessageKind::UpSpeedReport,
        }
    }

    pub fn id(&self) -> u8 {
        with_message!(self, m => DuckMessage::id(m))
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn wire_len(&self) -> usize {
        self.kind().wire_len()
    }

    /// Writes the wire representation at the start of `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InsufficientBuffer`] if `buf` is too short.
    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize, ProtocolError> {
        with_message!(self, m => DuckMessage::serialize(m, buf))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        with_message!(self, m => DuckMessage::to_bytes(m))
    }

    pub fn field(&self, name: &str) -> Option<FieldValue> {
        with_message!(self, m => DuckMessage::field(m, name))
    }

    /// Writes a field by schema name through its clamping setter.
    ///
    /// # Errors
    ///
    /// See [`DuckMessage::set_field`].
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
        with_message!(self, m => DuckMessage::set_field(m, name, value))
    }

    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        with_message!(self, m => DuckMessage::fields(m))
    }
}

impl From<DownToto> for AnyMessage {
    fn from(m: DownToto) -> Self {
        AnyMessage::DownToto(m)
    }
}

impl From<InterMcuProut> for AnyMessage {
    fn from(m: InterMcuProut) -> Self {
        AnyMessage::InterMcuProut(m)
    }
}

impl From<UpPlop> for AnyMessage {
    fn from(m: UpPlop) -> Self {
        AnyMessage::UpPlop(m)
    }
}

impl From<UpSpeedReport> for AnyMessage {
    fn from(m: UpSpeedReport) -> Self {
        AnyMessage::UpSpeedReport(m)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
