//! Link-layer frame classification and dispatch.
//!
//! A captured buffer is classified by the big-endian u16 at bytes
//! [12, 14): above 1500 it is an Ethernet-II EtherType, at or below it
//! is an IEEE 802.3 length with LLC (and possibly SNAP) behind it.
//! Buffers of 17 bytes or fewer cannot hold either shape and decode as
//! invalid framing. Frame decoding never fails: whatever cannot be
//! classified lands in `Layer3::Unknown`.

pub mod layout;
pub mod parser;

pub use parser::{Frame, FrameFormat, decode_frame};
