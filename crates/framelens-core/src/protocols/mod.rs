//! Protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets, ranges and wire constants (source of truth)
//! - `parser`: domain-level decoding (no bare magic numbers)
//! - `error`: explicit, structural failure conditions
//!
//! Parsers are pure and contain no I/O. Every parser follows the same
//! contract: `Result<T, Error>` internally, with a public
//! `decode_x(&[u8]) -> Option<X>` entry point; the enclosing layer maps a
//! failed decode to the `Unknown` variant rather than propagating the
//! error, because malformed network input is routine.

pub mod arp;
pub mod bpdu;
pub mod cdp;
pub mod icmp4;
pub mod icmp6;
pub mod igmp4;
pub mod ipv4;
pub mod ipv6;
pub mod lldp;
pub mod tcp;
pub mod udp;
