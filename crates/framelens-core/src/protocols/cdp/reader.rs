use super::layout;
use crate::wire::{ByteReader, WireError};

/// A CDP TLV header: plain 16-bit type and 16-bit length, where the
/// length counts the 4-byte header itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvHeader {
    pub tlv_type: u16,
    pub length: usize,
}

impl TlvHeader {
    pub fn read(reader: &ByteReader<'_>, offset: usize) -> Result<Self, WireError> {
        Ok(Self {
            tlv_type: reader.u16_be(offset)?,
            length: usize::from(reader.u16_be(offset + 2)?),
        })
    }

    /// A length that cannot cover its own header, or that overruns the
    /// remaining buffer, poisons the rest of the TLV list.
    pub fn is_well_formed(&self, offset: usize, buffer_len: usize) -> bool {
        self.length > layout::TLV_HEADER_LEN && offset + self.length <= buffer_len
    }
}
