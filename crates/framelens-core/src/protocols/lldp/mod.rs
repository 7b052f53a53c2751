//! Link Layer Discovery Protocol decoding.
//!
//! The whole payload is a TLV list with a packed 16-bit header: the top
//! 7 bits are the type, the low 9 bits a length that EXCLUDES the
//! header. Type 0 is the normal end marker. An overrunning length
//! aborts the walk keeping earlier values; a TLV whose body fails to
//! decode is skipped on its own. The type-7 capabilities TLV expands
//! into one value per capability/enabled bit.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{Lldp, LldpCapability, LldpType, LldpValue, decode_lldp};
