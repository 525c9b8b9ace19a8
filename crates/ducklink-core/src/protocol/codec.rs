//! Binary codec for encoding and decoding Ducklink messages.
//!
//! Wire format:
//! ```text
//! [id:1][field_1][field_2]...[field_n][checksum:2]
//! ```
//! Fields follow the order of the kind's schema table, each at its fixed
//! width.  All multi-byte integers, floats and the checksum are little-endian.
//! Strings occupy their full capacity, zero padded, with no length prefix.
//!
//! Every kind has a fixed wire length, so there is no length field: the id
//! byte alone tells the receiver how many bytes belong to the message.
//!
//! | Kind            | id | Wire length |
//! |-----------------|----|-------------|
//! | `DownToto`      | 0  | 25          |
//! | `InterMCUProut` | 1  | 13          |
//! | `UpPlop`        | 2  | 21          |
//! | `UpSpeedReport` | 3  | 7           |

use thiserror::Error;
use tracing::{debug, trace};

use crate::protocol::checksum::{compute_checksum, CHECKSUM_LEN};
use crate::protocol::messages::{AnyMessage, DuckMessage, MessageKind};
use crate::schema::{payload_len, FieldSpec};

/// Size of the id byte that starts every message.
pub const ID_LEN: usize = 1;

/// Wire length of a message whose fields are described by `fields`.
pub const fn wire_len(fields: &[FieldSpec]) -> usize {
    ID_LEN + payload_len(fields) + CHECKSUM_LEN
}

/// Errors that can occur during message encoding or decoding.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The buffer is shorter than the kind's fixed wire length.
    #[error("insufficient buffer: need {needed} bytes, got {available}")]
    InsufficientBuffer { needed: usize, available: usize },

    /// The id is not part of the message catalog.
    #[error("unknown message id: {0}")]
    UnknownId(u8),

    /// The id byte in the buffer belongs to a different kind than the one requested.
    #[error("message id mismatch: expected {expected}, found {found}")]
    IdMismatch { expected: u8, found: u8 },

    /// The trailing checksum does not match the one recomputed over id + fields.
    #[error("checksum mismatch: computed 0x{computed:04X}, received 0x{received:04X}")]
    ChecksumMismatch { computed: u16, received: u16 },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Writes `msg` at the start of `buf` and returns the number of bytes written.
///
/// Nothing is written unless `buf` can hold the whole message.
///
/// # Errors
///
/// Returns [`ProtocolError::InsufficientBuffer`] if `buf` is shorter than
/// `M::WIRE_LEN`.
pub fn serialize_into<M: DuckMessage>(msg: &M, buf: &mut [u8]) -> Result<usize, ProtocolError> {
    let needed = M::WIRE_LEN;
    if buf.len() < needed {
        return Err(ProtocolError::InsufficientBuffer {
            needed,
            available: buf.len(),
        });
    }
    write_frame(msg, &mut buf[..needed]);
    Ok(needed)
}

/// Encodes any message into a freshly allocated, exactly sized vector.
///
/// # Examples
///
/// ```rust
/// use ducklink_core::protocol::{decode_message, encode_message, AnyMessage, UpSpeedReport};
///
/// let mut report = UpSpeedReport::new();
/// report.set_vtheta(15);
/// let bytes = encode_message(&AnyMessage::from(report));
/// assert_eq!(bytes.len(), 7);
///
/// let decoded = decode_message(&bytes).unwrap();
/// assert_eq!(decoded, AnyMessage::from(report));
/// ```
pub fn encode_message(msg: &AnyMessage) -> Vec<u8> {
    msg.to_bytes()
}

/// Decodes one message of the kind identified by `id` from the start of `buf`.
///
/// The id is checked against the catalog before anything else, so an unknown
/// id is reported whatever the buffer holds.
///
/// # Errors
///
/// - [`ProtocolError::UnknownId`] if `id` is not in the catalog.
/// - [`ProtocolError::InsufficientBuffer`] if `buf` is shorter than the kind's wire length.
/// - [`ProtocolError::ChecksumMismatch`] if the bytes were corrupted.
/// - [`ProtocolError::IdMismatch`] if the id byte in `buf` differs from `id`.
pub fn decode_any(id: u8, buf: &[u8]) -> Result<AnyMessage, ProtocolError> {
    let kind = MessageKind::try_from(id).map_err(|err| {
        debug!(id, "rejecting message with unknown id");
        err
    })?;
    kind.decode(buf)
}

/// Decodes one message, reading its id from the first byte of `buf`.
///
/// # Errors
///
/// Same as [`decode_any`]; an empty buffer yields
/// [`ProtocolError::InsufficientBuffer`].
pub fn decode_message(buf: &[u8]) -> Result<AnyMessage, ProtocolError> {
    let id = *buf.first().ok_or(ProtocolError::InsufficientBuffer {
        needed: ID_LEN,
        available: 0,
    })?;
    decode_any(id, buf)
}

/// Decodes a message of the statically known kind `M` from the start of `buf`.
///
/// The checksum is verified before the id byte is compared, so corruption of
/// the id byte itself is reported as [`ProtocolError::ChecksumMismatch`].
///
/// # Errors
///
/// See [`decode_any`].
pub fn decode_as<M: DuckMessage>(buf: &[u8]) -> Result<M, ProtocolError> {
    let needed = M::WIRE_LEN;
    if buf.len() < needed {
        return Err(ProtocolError::InsufficientBuffer {
            needed,
            available: buf.len(),
        });
    }

    let frame = &buf[..needed];
    let body_end = needed - CHECKSUM_LEN;
    let received = u16::from_le_bytes([frame[body_end], frame[body_end + 1]]);
    let computed = compute_checksum(&frame[..body_end]);
    if received != computed {
        debug!(
            kind = M::NAME,
            computed, received, "rejecting message with bad checksum"
        );
        return Err(ProtocolError::ChecksumMismatch { computed, received });
    }

    if frame[0] != M::ID {
        debug!(kind = M::NAME, found = frame[0], "rejecting message with foreign id");
        return Err(ProtocolError::IdMismatch {
            expected: M::ID,
            found: frame[0],
        });
    }

    let mut reader = FieldReader::new(&frame[..body_end], ID_LEN);
    let msg = M::decode_fields(&mut reader);
    debug_assert_eq!(reader.position(), body_end, "{} schema/decoder drift", M::NAME);
    trace!(kind = M::NAME, bytes = needed, "decoded message");
    Ok(msg)
}

/// Writes the full frame of `msg` into `out`, which must be exactly
/// `M::WIRE_LEN` bytes long.
pub(crate) fn write_frame<M: DuckMessage>(msg: &M, out: &mut [u8]) {
    debug_assert_eq!(out.len(), M::WIRE_LEN);
    let body_end = out.len() - CHECKSUM_LEN;

    out[0] = M::ID;
    {
        let mut writer = FieldWriter::new(&mut out[..body_end], ID_LEN);
        msg.encode_fields(&mut writer);
        debug_assert_eq!(writer.position(), body_end, "{} schema/encoder drift", M::NAME);
    }

    let checksum = compute_checksum(&out[..body_end]);
    out[body_end..].copy_from_slice(&checksum.to_le_bytes());
    trace!(kind = M::NAME, bytes = out.len(), checksum, "encoded message");
}

// ── Field cursors ─────────────────────────────────────────────────────────────

/// Sequential little-endian writer over a pre-sized frame.
///
/// The frame length is validated before a writer is created, so the put
/// methods index directly.
pub struct FieldWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> FieldWriter<'a> {
    pub(crate) fn new(buf: &'a mut [u8], start: usize) -> Self {
        Self { buf, pos: start }
    }

    /// Offset of the next byte to be written.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn put_u8(&mut self, v: u8) {
        self.put_bytes(&[v]);
    }

    pub fn put_i8(&mut self, v: i8) {
        self.put_bytes(&v.to_le_bytes());
    }

    pub fn put_i16(&mut self, v: i16) {
        self.put_bytes(&v.to_le_bytes());
    }

    pub fn put_f32(&mut self, v: f32) {
        self.put_bytes(&v.to_le_bytes());
    }

    /// Writes a string field's full backing array, padding included.
    pub fn put_chars(&mut self, raw: &[u8]) {
        self.put_bytes(raw);
    }

    fn put_bytes(&mut self, bytes: &[u8]) {
        let end = self.pos + bytes.len();
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
    }
}

/// Sequential little-endian reader over a length-checked frame.
pub struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(buf: &'a [u8], start: usize) -> Self {
        Self { buf, pos: start }
    }

    /// Offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn u8(&mut self) -> u8 {
        self.array::<1>()[0]
    }

    pub fn i8(&mut self) -> i8 {
        i8::from_le_bytes(self.array())
    }

    pub fn i16(&mut self) -> i16 {
        i16::from_le_bytes(self.array())
    }

    pub fn f32(&mut self) -> f32 {
        f32::from_le_bytes(self.array())
    }

    /// Reads the `N` bytes of a string field.
    pub fn chars<const N: usize>(&mut self) -> [u8; N] {
        self.array()
    }

    fn array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
