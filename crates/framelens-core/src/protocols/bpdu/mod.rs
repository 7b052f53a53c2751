//! Spanning-tree BPDU decoding (802.1D / RSTP configuration BPDUs).
//!
//! Timers are IEEE 802.1D fixed-point seconds: a whole byte plus a
//! fractional byte over 256.

pub mod error;
pub mod layout;
pub mod parser;

pub use parser::{Bpdu, decode_bpdu};
