//! # ducklink-core
//!
//! Message catalog and checksummed binary codec for the Ducklink bus, a small
//! link between microcontrollers (and the hosts that talk to them).
//!
//! The crate has no I/O of its own: it turns typed messages into bytes and
//! bytes back into typed messages.  Framing those bytes on a serial line or a
//! socket is the caller's business.
//!
//! # Architecture overview (for beginners)
//!
//! - **`schema`** – Building blocks shared by every message: the `clamp`
//!   rule, bounded numeric ranges, fixed-capacity strings, and the static
//!   field tables that describe each message's layout.
//!
//! - **`protocol`** – The four message kinds themselves, the Fletcher-16
//!   checksum, and the codec that writes
//!   `[id][fields...][checksum]` and validates it on the way back in.
//!
//! A typical round trip:
//!
//! ```rust
//! use ducklink_core::{decode_message, encode_message, AnyMessage, UpSpeedReport};
//!
//! let mut report = UpSpeedReport::new();
//! report.set_vtheta(15); // clamped to 10
//! report.set_vx(-200);   // clamped to -128
//!
//! let bytes = encode_message(&AnyMessage::from(report));
//! let decoded = decode_message(&bytes).unwrap();
//!
//! assert_eq!(decoded, AnyMessage::from(report));
//! ```

pub mod protocol;
pub mod schema;

// Re-export the most-used types at the crate root so callers can write
// `ducklink_core::UpPlop` instead of `ducklink_core::protocol::messages::UpPlop`.
pub use protocol::checksum::compute_checksum;
pub use protocol::codec::{decode_any, decode_message, encode_message, ProtocolError};
pub use protocol::messages::{
    AnyMessage, DownToto, DuckMessage, InterMcuProut, MessageKind, UpPlop, UpSpeedReport,
};
pub use schema::{clamp, FieldError, FieldSpec, FieldType, FieldValue, FixedStr};
