//! Byte-access primitives shared by every decoder.
//!
//! `reader` provides bounds-checked big-endian extraction with absolute
//! provenance offsets; `hex` provides hex-string fixtures and hexdump
//! rendering. Both are pure functions over byte slices.

pub mod hex;
pub mod reader;

pub use hex::{hexdump, parse_hex};
pub use reader::{ByteReader, WireError};
