use std::fmt;
use std::net::Ipv6Addr;

use serde::Serialize;

use super::error::Ipv6Error;
use super::layout;
use crate::fields::{FieldId, FieldMap};
use crate::layers::{Layer4, Unknown};
use crate::protocols::{icmp6, tcp, udp};
use crate::wire::ByteReader;

/// Decoded IPv6 fixed header plus its dispatched transport layer.
#[derive(Debug, Clone, Serialize)]
pub struct Ipv6 {
    pub version: u8,
    pub traffic_class: u8,
    pub flow_label: u32,
    pub payload_length: u16,
    pub next_header: u8,
    pub hop_limit: u8,
    pub source: Ipv6Addr,
    pub destination: Ipv6Addr,
    /// Link-layer padding past the declared payload length.
    pub padding: Vec<u8>,
    pub layer4: Layer4,
    #[serde(skip)]
    pub data: Vec<u8>,
    fields: FieldMap,
}

impl Ipv6 {
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn verbose_description(&self) -> String {
        format!(
            "IPv6 version {} trafficClass {} flowLabel 0x{:05x} payloadLength {} nextHeader {} hopLimit {} {} > {}",
            self.version,
            self.traffic_class,
            self.flow_label,
            self.payload_length,
            self.next_header,
            self.hop_limit,
            self.source,
            self.destination
        )
    }
}

impl fmt::Display for Ipv6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > {}", self.source, self.destination)
    }
}

/// Decode an IPv6 datagram, including its transport layer.
pub fn decode_ipv6(data: &[u8]) -> Option<Ipv6> {
    parse_ipv6(ByteReader::new(data)).ok()
}

pub(crate) fn parse_ipv6(reader: ByteReader<'_>) -> Result<Ipv6, Ipv6Error> {
    if reader.len() < layout::HEADER_LEN {
        return Err(Ipv6Error::TooShort {
            needed: layout::HEADER_LEN,
            actual: reader.len(),
        });
    }

    let byte0 = reader.u8_at(layout::VERSION_OFFSET)?;
    let byte1 = reader.u8_at(1)?;
    let version = byte0 >> 4;
    // Traffic class straddles the first two bytes.
    let traffic_class = ((byte0 & 0x0f) << 4) | (byte1 >> 4);
    let flow_label = (u32::from(byte1 & 0x0f) << 16)
        | (u32::from(reader.u8_at(2)?) << 8)
        | u32::from(reader.u8_at(3)?);
    let payload_length = reader.u16_be(layout::PAYLOAD_LENGTH_OFFSET)?;
    let next_header = reader.u8_at(layout::NEXT_HEADER_OFFSET)?;
    let hop_limit = reader.u8_at(layout::HOP_LIMIT_OFFSET)?;
    let source = reader.ipv6(layout::SOURCE_OFFSET)?;
    let destination = reader.ipv6(layout::DESTINATION_OFFSET)?;

    let mut fields = FieldMap::new();
    fields.insert(FieldId::Version, reader.abs(0..1));
    fields.insert(FieldId::TrafficClass, reader.abs(0..2));
    fields.insert(FieldId::FlowLabel, reader.abs(1..4));
    fields.insert(FieldId::PayloadLength, reader.abs(4..6));
    fields.insert(FieldId::NextHeader, reader.abs(6..7));
    fields.insert(FieldId::HopLimit, reader.abs(7..8));
    fields.insert(FieldId::SourceAddress, reader.abs(8..24));
    fields.insert(FieldId::DestinationAddress, reader.abs(24..40));

    let datagram_end = (layout::HEADER_LEN + usize::from(payload_length)).min(reader.len());
    let padding = reader.tail(datagram_end).to_vec();
    if !padding.is_empty() {
        fields.insert(FieldId::Padding, reader.abs(datagram_end..reader.len()));
    }

    let layer4 = if datagram_end <= layout::HEADER_LEN {
        Layer4::Unknown(Unknown::empty())
    } else {
        let payload = reader.sub(layout::HEADER_LEN..datagram_end)?;
        match next_header {
            layout::NEXT_HEADER_TCP => tcp::parser::parse_tcp(payload)
                .map(Layer4::Tcp)
                .unwrap_or_else(|_| Layer4::Unknown(Unknown::new(payload.as_slice()))),
            layout::NEXT_HEADER_UDP => udp::parser::parse_udp(payload)
                .map(Layer4::Udp)
                .unwrap_or_else(|_| Layer4::Unknown(Unknown::new(payload.as_slice()))),
            layout::NEXT_HEADER_ICMP6 => icmp6::parser::parse_icmp6(payload)
                .map(Layer4::Icmp6)
                .unwrap_or_else(|_| Layer4::Unknown(Unknown::new(payload.as_slice()))),
            // Extension headers are not traversed.
            _ => Layer4::Unknown(Unknown::new(payload.as_slice())),
        }
    };

    Ok(Ipv6 {
        version,
        traffic_class,
        flow_label,
        payload_length,
        next_header,
        hop_limit,
        source,
        destination,
        padding,
        layer4,
        data: reader.as_slice().to_vec(),
        fields,
    })
}

#[cfg(test)]
mod tests {
    use std::net::Ipv6Addr;

    use super::decode_ipv6;
    use crate::fields::FieldId;
    use crate::layers::Layer4;
    use crate::protocols::icmp6::Icmp6Type;
    use crate::wire::parse_hex;

    const NS_DATAGRAM: &str = concat!(
        "6e00000000203aff",                 // tc 0xe0, payload 32, nh 58
        "fe800000000000000000000000000001", // source
        "ff0200000000000000000001ff5bad67", // destination
        "8700673c00000000",
        "fe800000000000001867ff5dd25bad67",
        "0101b07fb95d8ed2",
    );

    #[test]
    fn header_fields_and_icmp6_dispatch() {
        let data = parse_hex(NS_DATAGRAM).unwrap();
        let ipv6 = decode_ipv6(&data).unwrap();
        assert_eq!(ipv6.version, 6);
        assert_eq!(ipv6.traffic_class, 0xe0);
        assert_eq!(ipv6.flow_label, 0);
        assert_eq!(ipv6.payload_length, 32);
        assert_eq!(ipv6.next_header, 58);
        assert_eq!(ipv6.hop_limit, 255);
        assert_eq!(ipv6.source, "fe80::1".parse::<Ipv6Addr>().unwrap());
        match &ipv6.layer4 {
            Layer4::Icmp6(icmp6) => {
                let target: Ipv6Addr = "fe80::1867:ff5d:d25b:ad67".parse().unwrap();
                assert_eq!(icmp6.icmp_type, Icmp6Type::NeighborSolicitation { target });
                // Target range indexes the whole datagram buffer.
                let range = icmp6.fields().get(FieldId::Target).unwrap();
                assert_eq!((range.start, range.end), (48, 64));
            }
            other => panic!("unexpected layer4 {other:?}"),
        }
    }

    #[test]
    fn traffic_class_straddles_bytes() {
        // Byte 0 low nibble 0xa, byte 1 high nibble 0xb, flow label 0xcabcd.
        let mut data = parse_hex(NS_DATAGRAM).unwrap();
        data[0] = 0x6a;
        data[1] = 0xbc;
        data[2] = 0xab;
        data[3] = 0xcd;
        let ipv6 = decode_ipv6(&data).unwrap();
        assert_eq!(ipv6.traffic_class, 0xab);
        assert_eq!(ipv6.flow_label, 0xcabcd);
    }

    #[test]
    fn padding_past_payload_length() {
        let mut data = parse_hex(NS_DATAGRAM).unwrap();
        data.extend_from_slice(&[0xaa, 0xbb]);
        let ipv6 = decode_ipv6(&data).unwrap();
        assert_eq!(ipv6.padding, vec![0xaa, 0xbb]);
        let range = ipv6.fields().get(FieldId::Padding).unwrap();
        assert_eq!((range.start, range.end), (72, 74));
    }

    #[test]
    fn unhandled_next_header_is_unknown() {
        // Next header 43 (routing extension header): not traversed.
        let mut data = parse_hex(NS_DATAGRAM).unwrap();
        data[6] = 43;
        let ipv6 = decode_ipv6(&data).unwrap();
        match &ipv6.layer4 {
            Layer4::Unknown(unknown) => assert_eq!(unknown.data.len(), 32),
            other => panic!("unexpected layer4 {other:?}"),
        }
    }

    #[test]
    fn short_header_fails() {
        let data = parse_hex("6e00000000203aff").unwrap();
        assert!(decode_ipv6(&data).is_none());
    }
}
