//! IPv6 fixed-header decoding and transport dispatch.
//!
//! Only the 40-byte fixed header is decoded; extension headers are not
//! traversed, so a next-header value other than TCP, UDP or ICMPv6
//! leaves the payload as unknown residue. Bytes past the declared
//! payload length are link-layer padding.

pub mod error;
pub mod layout;
pub mod parser;

pub use parser::{Ipv6, decode_ipv6};
