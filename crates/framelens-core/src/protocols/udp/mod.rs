//! UDP datagram decoding.
//!
//! Fixed eight-byte header; whatever follows is the transport payload and
//! is never interpreted further.

pub mod error;
pub mod layout;
pub mod parser;

pub use parser::{Udp, decode_udp};
