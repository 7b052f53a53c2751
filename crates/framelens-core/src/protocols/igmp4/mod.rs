//! IGMPv4 decoding (v2 and v3).
//!
//! The version is inferred, not declared: a message is IGMPv3 only when
//! its type is membership-query or membership-report-v3 AND at least 12
//! bytes were captured; anything else is decoded as IGMPv2.
//!
//! IGMPv3 max-response-time and query-interval use an exponential
//! floating-point encoding for raw bytes >= 128; see
//! `parser::exponential_decode`.

pub mod error;
pub mod layout;
pub mod parser;

pub use parser::{GroupRecord, Igmp4, Igmp4Message, Igmp4Type, decode_igmp4};
