use std::fmt;

use serde::Serialize;

use super::error::UdpError;
use super::layout;
use crate::fields::{FieldId, FieldMap};
use crate::wire::ByteReader;

/// Decoded UDP datagram.
#[derive(Debug, Clone, Serialize)]
pub struct Udp {
    pub source_port: u16,
    pub destination_port: u16,
    pub length: u16,
    pub checksum: u16,
    pub payload: Vec<u8>,
    #[serde(skip)]
    pub data: Vec<u8>,
    fields: FieldMap,
}

impl Udp {
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn verbose_description(&self) -> String {
        format!(
            "UDP {} > {} length {} checksum 0x{:04x}",
            self.source_port, self.destination_port, self.length, self.checksum
        )
    }
}

impl fmt::Display for Udp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UDP {} > {} length {}",
            self.source_port, self.destination_port, self.length
        )
    }
}

/// Decode a UDP datagram from the bytes following the network header.
pub fn decode_udp(data: &[u8]) -> Option<Udp> {
    parse_udp(ByteReader::new(data)).ok()
}

pub(crate) fn parse_udp(reader: ByteReader<'_>) -> Result<Udp, UdpError> {
    if reader.len() < layout::MIN_LEN {
        return Err(UdpError::TooShort {
            needed: layout::MIN_LEN,
            actual: reader.len(),
        });
    }

    let mut fields = FieldMap::new();
    let source_port = reader.u16_be(layout::SOURCE_PORT_OFFSET)?;
    fields.insert(FieldId::SourcePort, reader.abs(0..2));
    let destination_port = reader.u16_be(layout::DESTINATION_PORT_OFFSET)?;
    fields.insert(FieldId::DestinationPort, reader.abs(2..4));
    let length = reader.u16_be(layout::LENGTH_OFFSET)?;
    fields.insert(FieldId::Length, reader.abs(4..6));
    let checksum = reader.u16_be(layout::CHECKSUM_OFFSET)?;
    fields.insert(FieldId::Checksum, reader.abs(6..8));

    let payload = reader.tail(layout::PAYLOAD_OFFSET);
    if !payload.is_empty() {
        fields.insert(
            FieldId::Payload,
            reader.abs(layout::PAYLOAD_OFFSET..reader.len()),
        );
    }

    Ok(Udp {
        source_port,
        destination_port,
        length,
        checksum,
        payload: payload.to_vec(),
        data: reader.as_slice().to_vec(),
        fields,
    })
}
