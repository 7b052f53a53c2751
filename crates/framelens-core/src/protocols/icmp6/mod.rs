//! ICMPv6 message decoding, including neighbor discovery.
//!
//! Classification is by (type, code). Neighbor solicitation and
//! advertisement and redirect messages carry neighbor-discovery options
//! in 8-byte units after their fixed body; a zero option length
//! terminates the walk with whatever was decoded so far.

pub mod error;
pub mod layout;
pub mod parser;

pub use parser::{Icmp6, Icmp6Option, Icmp6Type, decode_icmp6};
