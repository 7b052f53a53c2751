//! TCP segment decoding.
//!
//! Fixed-offset header fields plus the six flag booleans. TCP options are
//! deliberately unparsed: bytes between the declared data offset and the
//! reported payload start are not separately modeled, and the payload is
//! everything after the 20-byte fixed header.

pub mod error;
pub mod layout;
pub mod parser;

pub use parser::{Tcp, decode_tcp};
