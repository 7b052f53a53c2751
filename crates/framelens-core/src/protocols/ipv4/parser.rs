use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

use super::error::Ipv4Error;
use super::layout;
use crate::fields::{FieldId, FieldMap};
use crate::layers::{Layer4, Unknown};
use crate::protocols::{icmp4, igmp4, tcp, udp};
use crate::wire::ByteReader;

/// Decoded IPv4 header plus its dispatched transport layer.
#[derive(Debug, Clone, Serialize)]
pub struct Ipv4 {
    pub version: u8,
    pub ihl: u8,
    pub dscp: u8,
    pub ecn: u8,
    pub total_length: u16,
    pub identification: u16,
    pub evil_bit: bool,
    pub dont_fragment: bool,
    pub more_fragments: bool,
    pub fragment_offset: u16,
    pub ttl: u8,
    pub ip_protocol: u8,
    pub header_checksum: u16,
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
    /// Raw option bytes between byte 20 and the header end; never
    /// interpreted.
    pub options: Vec<u8>,
    /// Link-layer padding past the declared total length.
    pub padding: Vec<u8>,
    pub layer4: Layer4,
    #[serde(skip)]
    pub data: Vec<u8>,
    fields: FieldMap,
}

impl Ipv4 {
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn verbose_description(&self) -> String {
        format!(
            "IPv4 version {} ihl {} dscp {} ecn {} totalLength {} id {} DF {} MF {} fragmentOffset {} ttl {} protocol {} checksum 0x{:04x} {} > {}",
            self.version,
            self.ihl,
            self.dscp,
            self.ecn,
            self.total_length,
            self.identification,
            self.dont_fragment,
            self.more_fragments,
            self.fragment_offset,
            self.ttl,
            self.ip_protocol,
            self.header_checksum,
            self.source,
            self.destination
        )
    }
}

impl fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > {}", self.source, self.destination)
    }
}

/// Decode an IPv4 datagram, including its transport layer.
pub fn decode_ipv4(data: &[u8]) -> Option<Ipv4> {
    parse_ipv4(ByteReader::new(data)).ok()
}

pub(crate) fn parse_ipv4(reader: ByteReader<'_>) -> Result<Ipv4, Ipv4Error> {
    if reader.len() < layout::MIN_LEN {
        return Err(Ipv4Error::TooShort {
            needed: layout::MIN_LEN,
            actual: reader.len(),
        });
    }

    let version_ihl = reader.u8_at(layout::VERSION_IHL_OFFSET)?;
    let version = version_ihl >> 4;
    let ihl = version_ihl & 0x0f;
    if ihl < layout::MIN_IHL {
        return Err(Ipv4Error::BadHeaderLength { ihl });
    }
    let header_len = usize::from(ihl) * layout::IHL_WORD;
    if reader.len() < header_len {
        return Err(Ipv4Error::TooShort {
            needed: header_len,
            actual: reader.len(),
        });
    }

    let dscp_ecn = reader.u8_at(layout::DSCP_ECN_OFFSET)?;
    let total_length = reader.u16_be(layout::TOTAL_LENGTH_OFFSET)?;
    let identification = reader.u16_be(layout::IDENTIFICATION_OFFSET)?;
    let flags_fragment = reader.u16_be(layout::FLAGS_FRAGMENT_OFFSET)?;
    let flags = reader.u8_at(layout::FLAGS_FRAGMENT_OFFSET)?;
    let ttl = reader.u8_at(layout::TTL_OFFSET)?;
    let ip_protocol = reader.u8_at(layout::PROTOCOL_OFFSET)?;
    let header_checksum = reader.u16_be(layout::HEADER_CHECKSUM_OFFSET)?;
    let source = reader.ipv4(layout::SOURCE_OFFSET)?;
    let destination = reader.ipv4(layout::DESTINATION_OFFSET)?;

    let mut fields = FieldMap::new();
    fields.insert(FieldId::Version, reader.abs(0..1));
    fields.insert(FieldId::Ihl, reader.abs(0..1));
    fields.insert(FieldId::Dscp, reader.abs(1..2));
    fields.insert(FieldId::Ecn, reader.abs(1..2));
    fields.insert(FieldId::TotalLength, reader.abs(2..4));
    fields.insert(FieldId::Identification, reader.abs(4..6));
    fields.insert(FieldId::FragmentFlags, reader.abs(6..7));
    fields.insert(FieldId::FragmentOffset, reader.abs(6..8));
    fields.insert(FieldId::Ttl, reader.abs(8..9));
    fields.insert(FieldId::IpProtocol, reader.abs(9..10));
    fields.insert(FieldId::HeaderChecksum, reader.abs(10..12));
    fields.insert(FieldId::SourceAddress, reader.abs(12..16));
    fields.insert(FieldId::DestinationAddress, reader.abs(16..20));

    let options = if header_len > layout::OPTIONS_OFFSET {
        fields.insert(FieldId::Options, reader.abs(layout::OPTIONS_OFFSET..header_len));
        reader.slice(layout::OPTIONS_OFFSET..header_len)?.to_vec()
    } else {
        Vec::new()
    };

    // The datagram ends at the declared total length; anything after is
    // link-layer padding. A total length shorter than the header is
    // nonsense and clamps to the header end.
    let datagram_end = usize::from(total_length)
        .clamp(header_len, reader.len());
    let padding = reader.tail(datagram_end).to_vec();
    if !padding.is_empty() {
        fields.insert(FieldId::Padding, reader.abs(datagram_end..reader.len()));
    }

    let layer4 = if datagram_end <= header_len {
        Layer4::Unknown(Unknown::empty())
    } else {
        let payload = reader.sub(header_len..datagram_end)?;
        match ip_protocol {
            layout::PROTOCOL_ICMP => icmp4::parser::parse_icmp4(payload)
                .map(Layer4::Icmp4)
                .unwrap_or_else(|_| Layer4::Unknown(Unknown::new(payload.as_slice()))),
            layout::PROTOCOL_IGMP => igmp4::parser::parse_igmp4(payload)
                .map(Layer4::Igmp4)
                .unwrap_or_else(|_| Layer4::Unknown(Unknown::new(payload.as_slice()))),
            layout::PROTOCOL_TCP => tcp::parser::parse_tcp(payload)
                .map(Layer4::Tcp)
                .unwrap_or_else(|_| Layer4::Unknown(Unknown::new(payload.as_slice()))),
            layout::PROTOCOL_UDP => udp::parser::parse_udp(payload)
                .map(Layer4::Udp)
                .unwrap_or_else(|_| Layer4::Unknown(Unknown::new(payload.as_slice()))),
            // ICMPv6 over IPv4 never happens; everything else is residue.
            _ => Layer4::Unknown(Unknown::new(payload.as_slice())),
        }
    };

    Ok(Ipv4 {
        version,
        ihl,
        dscp: dscp_ecn >> 2,
        ecn: dscp_ecn & 0x03,
        total_length,
        identification,
        evil_bit: flags & layout::EVIL_FLAG != 0,
        dont_fragment: flags & layout::DONT_FRAGMENT_FLAG != 0,
        more_fragments: flags & layout::MORE_FRAGMENTS_FLAG != 0,
        fragment_offset: flags_fragment & layout::FRAGMENT_OFFSET_MASK,
        ttl,
        ip_protocol,
        header_checksum,
        source,
        destination,
        options,
        padding,
        layer4,
        data: reader.as_slice().to_vec(),
        fields,
    })
}
