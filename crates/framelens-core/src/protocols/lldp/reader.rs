use super::layout;
use crate::wire::{ByteReader, WireError};

/// An LLDP TLV header: one big-endian u16 packing a 7-bit type and a
/// 9-bit length that excludes the header itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvHeader {
    pub tlv_type: u16,
    pub length: usize,
}

impl TlvHeader {
    pub fn read(reader: &ByteReader<'_>, offset: usize) -> Result<Self, WireError> {
        let packed = reader.u16_be(offset)?;
        Ok(Self {
            tlv_type: (packed & layout::TLV_TYPE_MASK) >> layout::TLV_TYPE_SHIFT,
            length: usize::from(packed & layout::TLV_LENGTH_MASK),
        })
    }

    pub fn fits(&self, offset: usize, buffer_len: usize) -> bool {
        offset + layout::TLV_HEADER_LEN + self.length <= buffer_len
    }
}

#[cfg(test)]
mod tests {
    use super::TlvHeader;
    use crate::wire::{ByteReader, parse_hex};

    #[test]
    fn unpacks_type_and_length() {
        // Type 7, length 4: 0b0000111_000000100.
        let data = parse_hex("0e04").unwrap();
        let header = TlvHeader::read(&ByteReader::new(&data), 0).unwrap();
        assert_eq!(header.tlv_type, 7);
        assert_eq!(header.length, 4);
    }

    #[test]
    fn nine_bit_length_reaches_511() {
        let data = parse_hex("03ff").unwrap();
        let header = TlvHeader::read(&ByteReader::new(&data), 0).unwrap();
        assert_eq!(header.tlv_type, 1);
        assert_eq!(header.length, 511);
    }
}
