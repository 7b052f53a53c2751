use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

use super::error::Icmp4Error;
use super::layout;
use crate::fields::{FieldId, FieldMap};
use crate::wire::ByteReader;

/// Classified ICMPv4 message, keyed on the (type, code) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icmp4Type {
    EchoReply {
        identifier: u16,
        sequence: u16,
    },
    EchoRequest {
        identifier: u16,
        sequence: u16,
    },
    NetUnreachable,
    HostUnreachable,
    ProtocolUnreachable,
    PortUnreachable,
    FragmentationNeeded,
    SourceRouteFailed,
    OtherUnreachable {
        code: u8,
    },
    SourceQuench,
    RedirectHost(Ipv4Addr),
    RedirectNetwork(Ipv4Addr),
    RedirectTosHost(Ipv4Addr),
    RedirectTosNetwork(Ipv4Addr),
    TtlExceeded,
    FragmentReassemblyTimeExceeded,
    ParameterProblem {
        pointer: u8,
    },
    TimestampRequest {
        identifier: u16,
        sequence: u16,
        originate: u32,
        receive: u32,
        transmit: u32,
    },
    TimestampReply {
        identifier: u16,
        sequence: u16,
        originate: u32,
        receive: u32,
        transmit: u32,
    },
    InformationRequest {
        identifier: u16,
        sequence: u16,
    },
    InformationReply {
        identifier: u16,
        sequence: u16,
    },
    AddressMaskRequest {
        identifier: u16,
        sequence: u16,
        mask: Ipv4Addr,
    },
    AddressMaskReply {
        identifier: u16,
        sequence: u16,
        mask: Ipv4Addr,
    },
    Other {
        message_type: u8,
        code: u8,
    },
}

impl Icmp4Type {
    pub fn type_name(&self) -> &'static str {
        match self {
            Icmp4Type::EchoReply { .. } => "Echo Reply",
            Icmp4Type::EchoRequest { .. } => "Echo Request",
            Icmp4Type::NetUnreachable => "Net Unreachable",
            Icmp4Type::HostUnreachable => "Host Unreachable",
            Icmp4Type::ProtocolUnreachable => "Protocol Unreachable",
            Icmp4Type::PortUnreachable => "Port Unreachable",
            Icmp4Type::FragmentationNeeded => "Fragmentation Needed But DF Bit Set",
            Icmp4Type::SourceRouteFailed => "Source Route Failed",
            Icmp4Type::OtherUnreachable { .. } => "Unreachable",
            Icmp4Type::SourceQuench => "Source Quench",
            Icmp4Type::RedirectHost(_) => "Redirect Host",
            Icmp4Type::RedirectNetwork(_) => "Redirect Network",
            Icmp4Type::RedirectTosHost(_) => "Redirect Type of Service Host",
            Icmp4Type::RedirectTosNetwork(_) => "Redirect Type of Service Network",
            Icmp4Type::TtlExceeded => "TTL Exceeded",
            Icmp4Type::FragmentReassemblyTimeExceeded => "Fragment Reassembly Time Exceeded",
            Icmp4Type::ParameterProblem { .. } => "Parameter Problem",
            Icmp4Type::TimestampRequest { .. } => "Timestamp Request",
            Icmp4Type::TimestampReply { .. } => "Timestamp Reply",
            Icmp4Type::InformationRequest { .. } => "Information Request",
            Icmp4Type::InformationReply { .. } => "Information Reply",
            Icmp4Type::AddressMaskRequest { .. } => "Address Mask Request",
            Icmp4Type::AddressMaskReply { .. } => "Address Mask Reply",
            Icmp4Type::Other { .. } => "Other",
        }
    }
}

impl fmt::Display for Icmp4Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())?;
        match self {
            Icmp4Type::EchoReply {
                identifier,
                sequence,
            }
            | Icmp4Type::EchoRequest {
                identifier,
                sequence,
            } => write!(f, " id {identifier} sequence {sequence}"),
            Icmp4Type::OtherUnreachable { code } => write!(f, " code {code}"),
            Icmp4Type::RedirectHost(gateway)
            | Icmp4Type::RedirectNetwork(gateway)
            | Icmp4Type::RedirectTosHost(gateway)
            | Icmp4Type::RedirectTosNetwork(gateway) => write!(f, " {gateway}"),
            Icmp4Type::ParameterProblem { pointer } => write!(f, " pointer {pointer}"),
            Icmp4Type::TimestampRequest {
                identifier,
                sequence,
                originate,
                receive,
                transmit,
            }
            | Icmp4Type::TimestampReply {
                identifier,
                sequence,
                originate,
                receive,
                transmit,
            } => write!(
                f,
                " id {identifier} sequence {sequence} originate {originate} receive {receive} transmit {transmit}"
            ),
            Icmp4Type::InformationRequest {
                identifier,
                sequence,
            }
            | Icmp4Type::InformationReply {
                identifier,
                sequence,
            } => write!(f, " id {identifier} sequence {sequence}"),
            Icmp4Type::AddressMaskRequest {
                identifier,
                sequence,
                mask,
            }
            | Icmp4Type::AddressMaskReply {
                identifier,
                sequence,
                mask,
            } => write!(f, " id {identifier} sequence {sequence} mask {mask}"),
            _ => Ok(()),
        }
    }
}

/// Decoded ICMPv4 message.
#[derive(Debug, Clone, Serialize)]
pub struct Icmp4 {
    pub message_type: u8,
    pub code: u8,
    pub checksum: u16,
    pub icmp_type: Icmp4Type,
    /// Embedded-datagram length from RFC 4884; zero when absent.
    pub payload_length: u8,
    pub payload: Vec<u8>,
    #[serde(skip)]
    pub data: Vec<u8>,
    fields: FieldMap,
}

impl Icmp4 {
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn verbose_description(&self) -> String {
        format!(
            "ICMPv4 type {} code {} checksum 0x{:04x} {} PayloadLength {}",
            self.message_type, self.code, self.checksum, self.icmp_type, self.payload_length
        )
    }
}

impl fmt::Display for Icmp4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ICMPv4 {}", self.icmp_type)
    }
}

/// Decode an ICMPv4 message from the bytes following the IPv4 header.
pub fn decode_icmp4(data: &[u8]) -> Option<Icmp4> {
    parse_icmp4(ByteReader::new(data)).ok()
}

pub(crate) fn parse_icmp4(reader: ByteReader<'_>) -> Result<Icmp4, Icmp4Error> {
    if reader.len() < layout::MIN_LEN {
        return Err(Icmp4Error::TooShort {
            needed: layout::MIN_LEN,
            actual: reader.len(),
        });
    }

    let message_type = reader.u8_at(layout::TYPE_OFFSET)?;
    let code = reader.u8_at(layout::CODE_OFFSET)?;
    let checksum = reader.u16_be(layout::CHECKSUM_OFFSET)?;

    let mut fields = FieldMap::new();
    fields.insert(FieldId::Type, reader.abs(0..1));
    fields.insert(FieldId::Code, reader.abs(1..2));
    fields.insert(FieldId::Checksum, reader.abs(2..4));

    let require = |needed: usize| -> Result<(), Icmp4Error> {
        if reader.len() < needed {
            Err(Icmp4Error::TooShort {
                needed,
                actual: reader.len(),
            })
        } else {
            Ok(())
        }
    };

    let mut payload_length = 0u8;
    let mut payload_start = layout::PAYLOAD_OFFSET;
    let mut payload_end = reader.len();

    let icmp_type = match (message_type, code) {
        (0, 0) | (8, 0) => {
            require(layout::MIN_LEN_CLASSIFIED)?;
            let identifier = reader.u16_be(layout::IDENTIFIER_OFFSET)?;
            let sequence = reader.u16_be(layout::SEQUENCE_OFFSET)?;
            fields.insert(FieldId::Identifier, reader.abs(4..6));
            fields.insert(FieldId::Sequence, reader.abs(6..8));
            if message_type == 0 {
                Icmp4Type::EchoReply {
                    identifier,
                    sequence,
                }
            } else {
                Icmp4Type::EchoRequest {
                    identifier,
                    sequence,
                }
            }
        }
        (3, code) => {
            require(layout::MIN_LEN_CLASSIFIED)?;
            payload_length = reader.u8_at(layout::EXT_LENGTH_OFFSET)?;
            payload_end = embedded_end(&reader, payload_length);
            match code {
                0 => Icmp4Type::NetUnreachable,
                1 => Icmp4Type::HostUnreachable,
                2 => Icmp4Type::ProtocolUnreachable,
                3 => Icmp4Type::PortUnreachable,
                4 => Icmp4Type::FragmentationNeeded,
                5 => Icmp4Type::SourceRouteFailed,
                other => Icmp4Type::OtherUnreachable { code: other },
            }
        }
        (4, 0) => {
            require(layout::MIN_LEN_CLASSIFIED)?;
            Icmp4Type::SourceQuench
        }
        (5, 0..=3) => {
            require(layout::MIN_LEN_CLASSIFIED)?;
            let gateway = reader.ipv4(layout::GATEWAY_OFFSET)?;
            fields.insert(FieldId::Gateway, reader.abs(4..8));
            match code {
                0 => Icmp4Type::RedirectHost(gateway),
                1 => Icmp4Type::RedirectNetwork(gateway),
                2 => Icmp4Type::RedirectTosHost(gateway),
                _ => Icmp4Type::RedirectTosNetwork(gateway),
            }
        }
        (11, code) => {
            require(layout::MIN_LEN_CLASSIFIED)?;
            payload_length = reader.u8_at(layout::EXT_LENGTH_OFFSET)?;
            payload_end = embedded_end(&reader, payload_length);
            match code {
                0 => Icmp4Type::TtlExceeded,
                1 => Icmp4Type::FragmentReassemblyTimeExceeded,
                other => Icmp4Type::Other {
                    message_type,
                    code: other,
                },
            }
        }
        (12, 0) => {
            require(layout::MIN_LEN_CLASSIFIED)?;
            payload_length = reader.u8_at(layout::EXT_LENGTH_OFFSET)?;
            payload_end = embedded_end(&reader, payload_length);
            let pointer = reader.u8_at(layout::POINTER_OFFSET)?;
            fields.insert(FieldId::Pointer, reader.abs(4..5));
            Icmp4Type::ParameterProblem { pointer }
        }
        (13, 0) | (14, 0) => {
            require(layout::MIN_LEN_TIMESTAMP)?;
            let identifier = reader.u16_be(layout::IDENTIFIER_OFFSET)?;
            let sequence = reader.u16_be(layout::SEQUENCE_OFFSET)?;
            let originate = reader.u32_be(layout::ORIGINATE_OFFSET)?;
            let receive = reader.u32_be(layout::RECEIVE_OFFSET)?;
            let transmit = reader.u32_be(layout::TRANSMIT_OFFSET)?;
            fields.insert(FieldId::Identifier, reader.abs(4..6));
            fields.insert(FieldId::Sequence, reader.abs(6..8));
            fields.insert(FieldId::OriginateTimestamp, reader.abs(8..12));
            fields.insert(FieldId::ReceiveTimestamp, reader.abs(12..16));
            fields.insert(FieldId::TransmitTimestamp, reader.abs(16..20));
            payload_end = payload_start;
            if message_type == 13 {
                Icmp4Type::TimestampRequest {
                    identifier,
                    sequence,
                    originate,
                    receive,
                    transmit,
                }
            } else {
                Icmp4Type::TimestampReply {
                    identifier,
                    sequence,
                    originate,
                    receive,
                    transmit,
                }
            }
        }
        (15, 0) | (16, 0) => {
            require(layout::MIN_LEN_CLASSIFIED)?;
            let identifier = reader.u16_be(layout::IDENTIFIER_OFFSET)?;
            let sequence = reader.u16_be(layout::SEQUENCE_OFFSET)?;
            fields.insert(FieldId::Identifier, reader.abs(4..6));
            fields.insert(FieldId::Sequence, reader.abs(6..8));
            payload_end = payload_start;
            if message_type == 15 {
                Icmp4Type::InformationRequest {
                    identifier,
                    sequence,
                }
            } else {
                Icmp4Type::InformationReply {
                    identifier,
                    sequence,
                }
            }
        }
        (17, 0) | (18, 0) => {
            require(layout::MIN_LEN_MASK)?;
            let identifier = reader.u16_be(layout::IDENTIFIER_OFFSET)?;
            let sequence = reader.u16_be(layout::SEQUENCE_OFFSET)?;
            let mask = reader.ipv4(layout::MASK_OFFSET)?;
            fields.insert(FieldId::Identifier, reader.abs(4..6));
            fields.insert(FieldId::Sequence, reader.abs(6..8));
            fields.insert(FieldId::Mask, reader.abs(8..12));
            payload_end = payload_start;
            if message_type == 17 {
                Icmp4Type::AddressMaskRequest {
                    identifier,
                    sequence,
                    mask,
                }
            } else {
                Icmp4Type::AddressMaskReply {
                    identifier,
                    sequence,
                    mask,
                }
            }
        }
        (message_type, code) => {
            payload_start = layout::REST_OF_HEADER_OFFSET;
            Icmp4Type::Other { message_type, code }
        }
    };

    if payload_end > payload_start {
        fields.insert(FieldId::Payload, reader.abs(payload_start..payload_end));
    }
    let payload = reader.slice(payload_start..payload_end.max(payload_start))?.to_vec();

    Ok(Icmp4 {
        message_type,
        code,
        checksum,
        icmp_type,
        payload_length,
        payload,
        data: reader.as_slice().to_vec(),
        fields,
    })
}

/// End of the embedded datagram for error messages: the RFC 4884 length
/// byte bounds the payload when nonzero and in range, otherwise the
/// payload runs to the end of the capture.
fn embedded_end(reader: &ByteReader<'_>, payload_length: u8) -> usize {
    let declared = usize::from(payload_length);
    if declared > 0 && reader.len() >= declared + layout::PAYLOAD_OFFSET {
        layout::PAYLOAD_OFFSET + declared
    } else {
        reader.len()
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::{Icmp4Type, decode_icmp4};
    use crate::fields::FieldId;
    use crate::wire::parse_hex;

    #[test]
    fn echo_request() {
        // Type 8 code 0, id 0x1c4a, sequence 1, 8-byte payload.
        let data = parse_hex("0800c9b21c4a00016162636465666768").unwrap();
        let icmp = decode_icmp4(&data).unwrap();
        assert_eq!(
            icmp.icmp_type,
            Icmp4Type::EchoRequest {
                identifier: 0x1c4a,
                sequence: 1,
            }
        );
        assert_eq!(icmp.payload, b"abcdefgh");
        let range = icmp.fields().get(FieldId::Payload).unwrap();
        assert_eq!((range.start, range.end), (8, 16));
    }

    #[test]
    fn port_unreachable_payload_from_offset_8() {
        // Type 3 code 3, no RFC 4884 length, embedded datagram follows.
        let data = parse_hex("0303d0ae00000000450000261ad2000040116594c0a8000ac0a8000b").unwrap();
        let icmp = decode_icmp4(&data).unwrap();
        assert_eq!(icmp.icmp_type, Icmp4Type::PortUnreachable);
        assert_eq!(icmp.payload_length, 0);
        assert_eq!(icmp.payload.len(), data.len() - 8);
        assert_eq!(icmp.payload[0], 0x45);
    }

    #[test]
    fn ttl_exceeded_honors_embedded_length() {
        // RFC 4884 length byte 4 at offset 5 bounds the payload.
        let data = parse_hex("0b00f4ff000400004500002600000000aabbccdd").unwrap();
        let icmp = decode_icmp4(&data).unwrap();
        assert_eq!(icmp.icmp_type, Icmp4Type::TtlExceeded);
        assert_eq!(icmp.payload_length, 4);
        assert_eq!(icmp.payload, parse_hex("45000026").unwrap());
    }

    #[test]
    fn redirect_carries_gateway() {
        let data = parse_hex("0500a8c2c0a80001450000260000000040116594").unwrap();
        let icmp = decode_icmp4(&data).unwrap();
        assert_eq!(
            icmp.icmp_type,
            Icmp4Type::RedirectHost(Ipv4Addr::new(192, 168, 0, 1))
        );
    }

    #[test]
    fn address_mask_reply() {
        let data = parse_hex("1200eefa00010002ffffff00").unwrap();
        let icmp = decode_icmp4(&data).unwrap();
        assert_eq!(
            icmp.icmp_type,
            Icmp4Type::AddressMaskReply {
                identifier: 1,
                sequence: 2,
                mask: Ipv4Addr::new(255, 255, 255, 0),
            }
        );
        assert!(icmp.payload.is_empty());
    }

    #[test]
    fn unrecognized_type_consumes_from_offset_4() {
        let data = parse_hex("2a07beef0102030405060708").unwrap();
        let icmp = decode_icmp4(&data).unwrap();
        assert_eq!(
            icmp.icmp_type,
            Icmp4Type::Other {
                message_type: 0x2a,
                code: 0x07,
            }
        );
        assert_eq!(icmp.payload, parse_hex("0102030405060708").unwrap());
    }

    #[test]
    fn truncated_header_fails() {
        assert!(decode_icmp4(&[0x08, 0x00, 0x00]).is_none());
        // Echo needs 8 bytes.
        assert!(decode_icmp4(&[0x08, 0x00, 0x00, 0x00, 0x00, 0x01]).is_none());
    }
}
