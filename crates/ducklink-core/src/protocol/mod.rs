//! Protocol module containing the message catalog, checksum and binary codec.

pub mod checksum;
pub mod codec;
pub mod messages;

pub use checksum::compute_checksum;
pub use codec::{decode_any, decode_as, decode_message, encode_message, serialize_into, ProtocolError};
pub use messages::*;
