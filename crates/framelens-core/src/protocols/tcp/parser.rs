use std::fmt;

use serde::Serialize;

use super::error::TcpError;
use super::layout;
use crate::fields::{FieldId, FieldMap};
use crate::wire::ByteReader;

/// Decoded TCP segment.
#[derive(Debug, Clone, Serialize)]
pub struct Tcp {
    pub source_port: u16,
    pub destination_port: u16,
    pub sequence_number: u32,
    pub acknowledgement_number: u32,
    /// Header length in 32-bit words, from the high nibble of byte 12.
    pub data_offset: u8,
    pub urg: bool,
    pub ack: bool,
    pub psh: bool,
    pub rst: bool,
    pub syn: bool,
    pub fin: bool,
    pub window: u16,
    pub checksum: u16,
    pub urgent_pointer: u16,
    pub payload: Vec<u8>,
    #[serde(skip)]
    pub data: Vec<u8>,
    fields: FieldMap,
}

impl Tcp {
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Compact flag string in the original's ordering (S U A P R F).
    pub fn flag_string(&self) -> String {
        let mut output = String::new();
        if self.syn {
            output.push('S');
        }
        if self.urg {
            output.push('U');
        }
        if self.ack {
            output.push('A');
        }
        if self.psh {
            output.push('P');
        }
        if self.rst {
            output.push('R');
        }
        if self.fin {
            output.push('F');
        }
        output
    }

    pub fn verbose_description(&self) -> String {
        format!(
            "TCP {} > {} seq {} ack {} offset {} flags {} window {} checksum 0x{:04x} urgentPtr {} {} bytes",
            self.source_port,
            self.destination_port,
            self.sequence_number,
            self.acknowledgement_number,
            self.data_offset,
            self.flag_string(),
            self.window,
            self.checksum,
            self.urgent_pointer,
            self.payload.len()
        )
    }
}

impl fmt::Display for Tcp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TCP {} > {} flags {} {} bytes",
            self.source_port,
            self.destination_port,
            self.flag_string(),
            self.payload.len()
        )
    }
}

/// Decode a TCP segment from the bytes following the network header.
pub fn decode_tcp(data: &[u8]) -> Option<Tcp> {
    parse_tcp(ByteReader::new(data)).ok()
}

pub(crate) fn parse_tcp(reader: ByteReader<'_>) -> Result<Tcp, TcpError> {
    if reader.len() < layout::MIN_LEN {
        return Err(TcpError::TooShort {
            needed: layout::MIN_LEN,
            actual: reader.len(),
        });
    }

    let mut fields = FieldMap::new();
    let source_port = reader.u16_be(layout::SOURCE_PORT_OFFSET)?;
    fields.insert(FieldId::SourcePort, reader.abs(0..2));
    let destination_port = reader.u16_be(layout::DESTINATION_PORT_OFFSET)?;
    fields.insert(FieldId::DestinationPort, reader.abs(2..4));
    let sequence_number = reader.u32_be(layout::SEQUENCE_OFFSET)?;
    fields.insert(FieldId::SequenceNumber, reader.abs(4..8));
    let acknowledgement_number = reader.u32_be(layout::ACKNOWLEDGEMENT_OFFSET)?;
    fields.insert(FieldId::AcknowledgementNumber, reader.abs(8..12));

    let data_offset = (reader.u8_at(layout::DATA_OFFSET_OFFSET)? & 0xf0) >> 4;
    fields.insert(FieldId::DataOffset, reader.abs(12..13));
    let flags = reader.u8_at(layout::FLAGS_OFFSET)?;
    fields.insert(FieldId::Flags, reader.abs(13..14));

    let window = reader.u16_be(layout::WINDOW_OFFSET)?;
    fields.insert(FieldId::Window, reader.abs(14..16));
    let checksum = reader.u16_be(layout::CHECKSUM_OFFSET)?;
    fields.insert(FieldId::Checksum, reader.abs(16..18));
    let urgent_pointer = reader.u16_be(layout::URGENT_POINTER_OFFSET)?;
    fields.insert(FieldId::UrgentPointer, reader.abs(18..20));

    let payload = reader.tail(layout::PAYLOAD_OFFSET);
    if !payload.is_empty() {
        fields.insert(
            FieldId::Payload,
            reader.abs(layout::PAYLOAD_OFFSET..reader.len()),
        );
    }

    Ok(Tcp {
        source_port,
        destination_port,
        sequence_number,
        acknowledgement_number,
        data_offset,
        urg: flags & layout::FLAG_URG != 0,
        ack: flags & layout::FLAG_ACK != 0,
        psh: flags & layout::FLAG_PSH != 0,
        rst: flags & layout::FLAG_RST != 0,
        syn: flags & layout::FLAG_SYN != 0,
        fin: flags & layout::FLAG_FIN != 0,
        window,
        checksum,
        urgent_pointer,
        payload: payload.to_vec(),
        data: reader.as_slice().to_vec(),
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::decode_tcp;
    use crate::wire::parse_hex;

    // TCP portion of the Ethernet-II IPv4 fixture (frame 30).
    const SEGMENT: &str =
        "c001de7ebc1aa99e868a316380100804203100000101080a872fd3281be79ab6";

    #[test]
    fn decode_ack_segment() {
        let data = parse_hex(SEGMENT).unwrap();
        let tcp = decode_tcp(&data).unwrap();
        assert_eq!(tcp.source_port, 49153);
        assert_eq!(tcp.destination_port, 56958);
        assert_eq!(tcp.sequence_number, 0xbc1a_a99e);
        assert_eq!(tcp.acknowledgement_number, 0x868a_3163);
        assert_eq!(tcp.data_offset, 8);
        assert!(tcp.ack);
        assert!(!tcp.syn && !tcp.fin && !tcp.rst && !tcp.psh && !tcp.urg);
        assert_eq!(tcp.window, 2052);
        assert_eq!(tcp.checksum, 0x2031);
        assert_eq!(tcp.urgent_pointer, 0);
        assert_eq!(tcp.flag_string(), "A");
        // Options are unparsed: the payload starts at the fixed header end.
        assert_eq!(tcp.payload.len(), 12);
    }

    #[test]
    fn short_segment_fails() {
        assert!(decode_tcp(&[0u8; 19]).is_none());
    }
}
