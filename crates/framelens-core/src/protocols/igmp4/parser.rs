use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

use super::error::Igmp4Error;
use super::layout;
use crate::fields::{FieldId, FieldMap};
use crate::wire::ByteReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Igmp4Type {
    MembershipQuery,
    MembershipQueryGeneral,
    MembershipReportV1,
    MembershipReportV2,
    MembershipReportV3,
    LeaveGroup,
    Unknown(u8),
}

impl fmt::Display for Igmp4Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Igmp4Type::MembershipQuery => f.write_str("Membership Query"),
            Igmp4Type::MembershipQueryGeneral => f.write_str("Membership Query General"),
            Igmp4Type::MembershipReportV1 => f.write_str("Membership Report V1"),
            Igmp4Type::MembershipReportV2 => f.write_str("Membership Report V2"),
            Igmp4Type::MembershipReportV3 => f.write_str("Membership Report V3"),
            Igmp4Type::LeaveGroup => f.write_str("Leave Group"),
            Igmp4Type::Unknown(raw) => write!(f, "Unknown type {raw}"),
        }
    }
}

/// One IGMPv3 membership-report group record.
#[derive(Debug, Clone, Serialize)]
pub struct GroupRecord {
    pub record_type: u8,
    pub aux_data_len: u8,
    pub multicast_address: Ipv4Addr,
    pub sources: Vec<Ipv4Addr>,
}

/// Version-specific payload of an IGMP message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Igmp4Message {
    V2 {
        /// Seconds (the wire value is tenths of seconds).
        max_response_time: f64,
        group_address: Ipv4Addr,
    },
    V3Query {
        /// Seconds, exponentially decoded for raw bytes >= 128.
        max_response_time: f64,
        group_address: Ipv4Addr,
        suppress_router_processing: bool,
        robustness: u8,
        /// Seconds, exponentially decoded for raw bytes >= 128.
        query_interval: f64,
        sources: Vec<Ipv4Addr>,
    },
    V3Report {
        records: Vec<GroupRecord>,
    },
}

/// Decoded IGMPv4 message (v2 or v3, inferred).
#[derive(Debug, Clone, Serialize)]
pub struct Igmp4 {
    pub message_type: u8,
    pub checksum: u16,
    pub kind: Igmp4Type,
    pub message: Igmp4Message,
    #[serde(skip)]
    pub data: Vec<u8>,
    fields: FieldMap,
}

impl Igmp4 {
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn verbose_description(&self) -> String {
        match &self.message {
            Igmp4Message::V2 {
                max_response_time,
                group_address,
            } => format!(
                "IGMP {} group {} MaxResponseTime {} seconds checksum 0x{:04x}",
                self.kind, group_address, max_response_time, self.checksum
            ),
            Igmp4Message::V3Query {
                max_response_time,
                group_address,
                suppress_router_processing,
                robustness,
                query_interval,
                sources,
            } => format!(
                "IGMPv3 {} group {} MaxResponseTime {} seconds suppress {} robustness {} queryInterval {} seconds {} sources checksum 0x{:04x}",
                self.kind,
                group_address,
                max_response_time,
                suppress_router_processing,
                robustness,
                query_interval,
                sources.len(),
                self.checksum
            ),
            Igmp4Message::V3Report { records } => format!(
                "IGMPv3 {} {} group records checksum 0x{:04x}",
                self.kind,
                records.len(),
                self.checksum
            ),
        }
    }
}

impl fmt::Display for Igmp4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IGMP {}", self.kind)
    }
}

/// Decode the IGMPv3 exponential time encoding.
///
/// Raw bytes below 128 are literal; otherwise the low 4 bits are a
/// mantissa and bits 4..6 an exponent: `(mant | 0x10) << (exp + 3)`.
pub(crate) fn exponential_decode(raw: u8) -> u32 {
    if raw < 128 {
        u32::from(raw)
    } else {
        let mantissa = u32::from(raw & 0x0f);
        let exponent = u32::from((raw & 0x70) >> 4);
        (mantissa | 0x10) << (exponent + 3)
    }
}

/// Decode an IGMP message from the bytes following the IPv4 header.
pub fn decode_igmp4(data: &[u8]) -> Option<Igmp4> {
    parse_igmp4(ByteReader::new(data)).ok()
}

pub(crate) fn parse_igmp4(reader: ByteReader<'_>) -> Result<Igmp4, Igmp4Error> {
    if reader.len() < layout::MIN_LEN_V2 {
        return Err(Igmp4Error::TooShort {
            needed: layout::MIN_LEN_V2,
            actual: reader.len(),
        });
    }

    let message_type = reader.u8_at(layout::TYPE_OFFSET)?;
    let v3 = (message_type == layout::TYPE_MEMBERSHIP_QUERY
        || message_type == layout::TYPE_MEMBERSHIP_REPORT_V3)
        && reader.len() >= layout::MIN_LEN_V3;

    if v3 && message_type == layout::TYPE_MEMBERSHIP_REPORT_V3 {
        parse_v3_report(reader, message_type)
    } else if v3 {
        parse_v3_query(reader, message_type)
    } else {
        parse_v2(reader, message_type)
    }
}

fn header_fields(reader: ByteReader<'_>) -> (FieldMap, Result<u16, Igmp4Error>) {
    let mut fields = FieldMap::new();
    fields.insert(FieldId::Type, reader.abs(0..1));
    let checksum = reader
        .u16_be(layout::CHECKSUM_OFFSET)
        .map_err(Igmp4Error::from);
    fields.insert(FieldId::Checksum, reader.abs(2..4));
    (fields, checksum)
}

fn parse_v2(reader: ByteReader<'_>, message_type: u8) -> Result<Igmp4, Igmp4Error> {
    let (mut fields, checksum) = header_fields(reader);
    let checksum = checksum?;

    let max_response_raw = reader.u8_at(layout::MAX_RESPONSE_OFFSET)?;
    fields.insert(FieldId::MaxResponseTime, reader.abs(1..2));
    let group_address = reader.ipv4(layout::GROUP_ADDRESS_OFFSET)?;
    fields.insert(FieldId::GroupAddress, reader.abs(4..8));

    let kind = match message_type {
        layout::TYPE_MEMBERSHIP_QUERY if group_address.is_unspecified() => {
            Igmp4Type::MembershipQueryGeneral
        }
        layout::TYPE_MEMBERSHIP_QUERY => Igmp4Type::MembershipQuery,
        layout::TYPE_MEMBERSHIP_REPORT_V1 => Igmp4Type::MembershipReportV1,
        layout::TYPE_MEMBERSHIP_REPORT_V2 => Igmp4Type::MembershipReportV2,
        layout::TYPE_LEAVE_GROUP => Igmp4Type::LeaveGroup,
        other => Igmp4Type::Unknown(other),
    };

    Ok(Igmp4 {
        message_type,
        checksum,
        kind,
        message: Igmp4Message::V2 {
            max_response_time: f64::from(max_response_raw) / 10.0,
            group_address,
        },
        data: reader.as_slice().to_vec(),
        fields,
    })
}

fn parse_v3_query(reader: ByteReader<'_>, message_type: u8) -> Result<Igmp4, Igmp4Error> {
    let (mut fields, checksum) = header_fields(reader);
    let checksum = checksum?;

    let max_response_raw = reader.u8_at(layout::MAX_RESPONSE_OFFSET)?;
    fields.insert(FieldId::MaxResponseTime, reader.abs(1..2));
    let group_address = reader.ipv4(layout::GROUP_ADDRESS_OFFSET)?;
    fields.insert(FieldId::GroupAddress, reader.abs(4..8));

    let flags = reader.u8_at(layout::V3_FLAGS_OFFSET)?;
    fields.insert(FieldId::Flags, reader.abs(8..9));
    let qqic = reader.u8_at(layout::V3_QQIC_OFFSET)?;
    fields.insert(FieldId::QueryInterval, reader.abs(9..10));
    let declared = usize::from(reader.u16_be(layout::V3_NUM_SOURCES_OFFSET)?);
    fields.insert(FieldId::NumberOfSources, reader.abs(10..12));

    let remaining = reader.len() - layout::V3_SOURCES_OFFSET;
    if declared * layout::IPV4_ADDRESS_LEN > remaining {
        return Err(Igmp4Error::SourceCountOverrun {
            declared,
            remaining,
        });
    }
    let mut sources = Vec::with_capacity(declared);
    for index in 0..declared {
        sources.push(
            reader.ipv4(layout::V3_SOURCES_OFFSET + index * layout::IPV4_ADDRESS_LEN)?,
        );
    }

    let kind = if group_address.is_unspecified() {
        Igmp4Type::MembershipQueryGeneral
    } else {
        Igmp4Type::MembershipQuery
    };

    Ok(Igmp4 {
        message_type,
        checksum,
        kind,
        message: Igmp4Message::V3Query {
            max_response_time: f64::from(exponential_decode(max_response_raw)) / 10.0,
            group_address,
            suppress_router_processing: flags & layout::V3_SUPPRESS_FLAG != 0,
            robustness: flags & layout::V3_ROBUSTNESS_MASK,
            query_interval: f64::from(exponential_decode(qqic)),
            sources,
        },
        data: reader.as_slice().to_vec(),
        fields,
    })
}

fn parse_v3_report(reader: ByteReader<'_>, message_type: u8) -> Result<Igmp4, Igmp4Error> {
    let (mut fields, checksum) = header_fields(reader);
    let checksum = checksum?;

    let declared = usize::from(reader.u16_be(layout::V3_NUM_RECORDS_OFFSET)?);
    fields.insert(FieldId::NumberOfGroupRecords, reader.abs(6..8));

    let mut records = Vec::with_capacity(declared.min(64));
    let mut position = layout::V3_RECORDS_OFFSET;
    for _ in 0..declared {
        if reader.len() < position + layout::V3_RECORD_HEADER_LEN {
            return Err(Igmp4Error::TooShort {
                needed: position + layout::V3_RECORD_HEADER_LEN,
                actual: reader.len(),
            });
        }
        let record_type = reader.u8_at(position)?;
        let aux_data_len = reader.u8_at(position + 1)?;
        let source_count = usize::from(reader.u16_be(position + 2)?);
        let multicast_address = reader.ipv4(position + 4)?;

        let sources_start = position + layout::V3_RECORD_HEADER_LEN;
        let remaining = reader.len().saturating_sub(sources_start);
        if source_count * layout::IPV4_ADDRESS_LEN > remaining {
            return Err(Igmp4Error::SourceCountOverrun {
                declared: source_count,
                remaining,
            });
        }
        let mut sources = Vec::with_capacity(source_count);
        for index in 0..source_count {
            sources.push(reader.ipv4(sources_start + index * layout::IPV4_ADDRESS_LEN)?);
        }

        records.push(GroupRecord {
            record_type,
            aux_data_len,
            multicast_address,
            sources,
        });
        position = sources_start
            + source_count * layout::IPV4_ADDRESS_LEN
            + usize::from(aux_data_len) * 4;
    }

    Ok(Igmp4 {
        message_type,
        checksum,
        kind: Igmp4Type::MembershipReportV3,
        message: Igmp4Message::V3Report { records },
        data: reader.as_slice().to_vec(),
        fields,
    })
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::{Igmp4Message, Igmp4Type, decode_igmp4, exponential_decode};
    use crate::wire::parse_hex;

    #[test]
    fn exponential_encoding_is_bit_exact() {
        // Below 128 the value is literal.
        assert_eq!(exponential_decode(100), 100);
        assert_eq!(exponential_decode(127), 127);
        // 0x80: mant 0, exp 0 -> (0x10) << 3 = 128
        assert_eq!(exponential_decode(0x80), 128);
        // 0xff: mant 0xf, exp 7 -> 0x1f << 10 = 31744
        assert_eq!(exponential_decode(0xff), 31744);
        for raw in 128u16..=255 {
            let raw = raw as u8;
            let expected = u32::from((raw & 0x0f) | 0x10) << (((raw & 0x70) >> 4) + 3);
            assert_eq!(exponential_decode(raw), expected);
        }
    }

    #[test]
    fn v2_membership_report() {
        // Type 0x16, max resp 0, group 239.255.255.250.
        let data = parse_hex("1600fa04effffffa").unwrap();
        let igmp = decode_igmp4(&data).unwrap();
        assert_eq!(igmp.kind, Igmp4Type::MembershipReportV2);
        match igmp.message {
            Igmp4Message::V2 { group_address, .. } => {
                assert_eq!(group_address, Ipv4Addr::new(239, 255, 255, 250));
            }
            _ => panic!("expected v2 message"),
        }
    }

    #[test]
    fn v2_general_query() {
        // Type 0x11 but only 8 bytes: stays v2; group 0.0.0.0 -> general.
        let data = parse_hex("1164ee9b00000000").unwrap();
        let igmp = decode_igmp4(&data).unwrap();
        assert_eq!(igmp.kind, Igmp4Type::MembershipQueryGeneral);
        match igmp.message {
            Igmp4Message::V2 {
                max_response_time, ..
            } => assert_eq!(max_response_time, 10.0),
            _ => panic!("expected v2 message"),
        }
    }

    #[test]
    fn v3_query_with_sources() {
        // Type 0x11, 16 bytes: v3. Max resp 0x80 -> 128 tenths = 12.8s,
        // flags 0x0a (suppress + robustness 2), qqic 125, one source.
        let data = parse_hex("1180ee9be00000fb0a7d0001c0a80001").unwrap();
        let igmp = decode_igmp4(&data).unwrap();
        assert_eq!(igmp.kind, Igmp4Type::MembershipQuery);
        match igmp.message {
            Igmp4Message::V3Query {
                max_response_time,
                group_address,
                suppress_router_processing,
                robustness,
                query_interval,
                sources,
            } => {
                assert_eq!(max_response_time, 12.8);
                assert_eq!(group_address, Ipv4Addr::new(224, 0, 0, 251));
                assert!(suppress_router_processing);
                assert_eq!(robustness, 2);
                assert_eq!(query_interval, 125.0);
                assert_eq!(sources, vec![Ipv4Addr::new(192, 168, 0, 1)]);
            }
            _ => panic!("expected v3 query"),
        }
    }

    #[test]
    fn v3_query_source_count_overrun_fails() {
        // Declares 4 sources but carries only one.
        let data = parse_hex("1180ee9be00000fb0a7d0004c0a80001").unwrap();
        assert!(decode_igmp4(&data).is_none());
    }

    #[test]
    fn v3_report_with_group_records() {
        // Two records: EXCLUDE {} for 239.255.255.250, INCLUDE {10.0.0.1}.
        let data =
            parse_hex("2200f33c0000000204000000effffffa05000001e00000fb0a000001").unwrap();
        let igmp = decode_igmp4(&data).unwrap();
        assert_eq!(igmp.kind, Igmp4Type::MembershipReportV3);
        match igmp.message {
            Igmp4Message::V3Report { records } => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].record_type, 4);
                assert_eq!(
                    records[0].multicast_address,
                    Ipv4Addr::new(239, 255, 255, 250)
                );
                assert!(records[0].sources.is_empty());
                assert_eq!(records[1].sources, vec![Ipv4Addr::new(10, 0, 0, 1)]);
            }
            _ => panic!("expected v3 report"),
        }
    }

    #[test]
    fn short_message_fails() {
        assert!(decode_igmp4(&[0x16, 0x00, 0x00]).is_none());
    }
}
