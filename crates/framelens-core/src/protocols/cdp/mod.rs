//! Cisco Discovery Protocol decoding.
//!
//! CDP rides over 802.3/SNAP (org 0x00000c, protocol 0x2000). After a
//! 4-byte header the body is a TLV list: 2-byte type, 2-byte length that
//! INCLUDES the 4-byte TLV header. A declared length of 4 or less, or
//! one that overruns the buffer, aborts the loop and keeps the values
//! decoded so far. Inside the type-2/type-0x16 address TLVs an
//! unrecognized address-protocol marker skips only that record.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{Cdp, CdpType, CdpValue, decode_cdp};
