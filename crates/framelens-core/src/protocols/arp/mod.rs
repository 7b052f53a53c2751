//! ARP decoding (Ethernet/IPv4 only).
//!
//! Fixed-length, fail-fast: other hardware/protocol combinations are a
//! decode failure, not a distinct variant.

pub mod error;
pub mod layout;
pub mod parser;

pub use parser::{Arp, ArpOperation, decode_arp};
