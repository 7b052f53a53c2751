//! ICMPv4 message decoding.
//!
//! Messages are classified by the (type, code) pair. Classified error
//! messages carry their embedded datagram as payload starting at offset
//! 8, honoring the RFC 4884 original-datagram length byte when present.
//! Wholly unrecognized (type, code) pairs decode as `Icmp4Type::Other`
//! with everything past the 4-byte header as payload.

pub mod error;
pub mod layout;
pub mod parser;

pub use parser::{Icmp4, Icmp4Type, decode_icmp4};
