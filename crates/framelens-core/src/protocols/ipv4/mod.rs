//! IPv4 header decoding and transport dispatch.
//!
//! The header must be at least 20 bytes with an IHL of at least 5 words;
//! anything else is a structural failure. Option bytes between byte 20
//! and the header end are captured raw, never interpreted. Bytes past
//! the declared total length are link-layer padding.

pub mod error;
pub mod layout;
pub mod parser;

pub use parser::{Ipv4, decode_ipv4};
