use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::Serialize;

use super::error::CdpError;
use super::layout;
use super::reader::TlvHeader;
use crate::fields::{FieldId, FieldMap, FieldRange};
use crate::wire::ByteReader;

/// One decoded CDP TLV value. Capability and address TLVs expand into
/// several values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CdpType {
    DeviceId(String),
    Ipv4Address(Ipv4Addr),
    Ipv6Address(Ipv6Addr),
    PortId(String),
    CapabilityRouter,
    CapabilityBridge,
    CapabilitySourceRouteBridge,
    CapabilitySwitch,
    CapabilityHost,
    CapabilityIgmp,
    CapabilityRepeater,
    CapabilityVoip,
    CapabilityRemoteManaged,
    CapabilityVtCamera,
    CapabilityMacRelay,
    SoftwareVersion(String),
    Platform(String),
    TrustBitmap(u8),
    UntrustedCos(u8),
    Duplex(u8),
    NativeVlan(u16),
    SystemName(String),
    Unknown(Vec<u8>),
}

impl fmt::Display for CdpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CdpType::DeviceId(device) => write!(f, "deviceID {device}"),
            CdpType::Ipv4Address(address) => write!(f, "ipv4 {address}"),
            CdpType::Ipv6Address(address) => write!(f, "ipv6 {address}"),
            CdpType::PortId(port) => write!(f, "portID {port}"),
            CdpType::CapabilityRouter => f.write_str("Router"),
            CdpType::CapabilityBridge => f.write_str("Bridge"),
            CdpType::CapabilitySourceRouteBridge => f.write_str("SourceRouteBridge"),
            CdpType::CapabilitySwitch => f.write_str("Switch"),
            CdpType::CapabilityHost => f.write_str("Host"),
            CdpType::CapabilityIgmp => f.write_str("IGMP-Speaker"),
            CdpType::CapabilityRepeater => f.write_str("Repeater"),
            CdpType::CapabilityVoip => f.write_str("VOIP"),
            CdpType::CapabilityRemoteManaged => f.write_str("Remote Managed"),
            CdpType::CapabilityVtCamera => {
                f.write_str("CVTA/STP Dispute Resolution/Cisco VT Camera")
            }
            CdpType::CapabilityMacRelay => f.write_str("Mac Relay"),
            CdpType::SoftwareVersion(version) => write!(f, "Version {version}"),
            CdpType::Platform(platform) => write!(f, "Platform {platform}"),
            CdpType::TrustBitmap(bitmap) => write!(f, "Trust Bitmap 0x{bitmap:x}"),
            CdpType::UntrustedCos(cos) => write!(f, "Untrusted Port CoS 0x{cos:x}"),
            CdpType::Duplex(1) => f.write_str("Duplex Full"),
            CdpType::Duplex(value) => write!(f, "Duplex value {value}"),
            CdpType::NativeVlan(vlan) => write!(f, "NativeVLAN {vlan}"),
            CdpType::SystemName(name) => write!(f, "Device Name {name}"),
            CdpType::Unknown(bytes) => write!(f, "UnknownCdpValue {} bytes", bytes.len()),
        }
    }
}

/// A decoded value plus the byte range it came from, absolute into the
/// original capture buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CdpValue {
    pub cdp_type: CdpType,
    pub range: FieldRange,
}

/// Decoded CDP message.
#[derive(Debug, Clone, Serialize)]
pub struct Cdp {
    pub version: u8,
    pub ttl: u8,
    pub checksum: u16,
    pub values: Vec<CdpValue>,
    #[serde(skip)]
    pub data: Vec<u8>,
    fields: FieldMap,
}

impl Cdp {
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Addresses collected from the type-2 and type-0x16 address TLVs.
    pub fn ipv4_addresses(&self) -> Vec<Ipv4Addr> {
        self.values
            .iter()
            .filter_map(|value| match value.cdp_type {
                CdpType::Ipv4Address(address) => Some(address),
                _ => None,
            })
            .collect()
    }

    pub fn ipv6_addresses(&self) -> Vec<Ipv6Addr> {
        self.values
            .iter()
            .filter_map(|value| match value.cdp_type {
                CdpType::Ipv6Address(address) => Some(address),
                _ => None,
            })
            .collect()
    }

    pub fn verbose_description(&self) -> String {
        let mut description = format!(
            "CDP version {} ttl {} {} values:",
            self.version,
            self.ttl,
            self.values.len()
        );
        for value in &self.values {
            description.push(' ');
            description.push_str(&value.cdp_type.to_string());
        }
        description
    }
}

impl fmt::Display for Cdp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CDP")
    }
}

/// Decode a CDP message from the bytes following the SNAP header.
pub fn decode_cdp(data: &[u8]) -> Option<Cdp> {
    parse_cdp(ByteReader::new(data)).ok()
}

pub(crate) fn parse_cdp(reader: ByteReader<'_>) -> Result<Cdp, CdpError> {
    if reader.len() < layout::MIN_LEN {
        return Err(CdpError::TooShort {
            needed: layout::MIN_LEN,
            actual: reader.len(),
        });
    }

    let version = reader.u8_at(layout::VERSION_OFFSET)?;
    let ttl = reader.u8_at(layout::TTL_OFFSET)?;
    let checksum = reader.u16_be(layout::CHECKSUM_OFFSET)?;

    let mut fields = FieldMap::new();
    fields.insert(FieldId::Version, reader.abs(0..1));
    fields.insert(FieldId::Ttl, reader.abs(1..2));
    fields.insert(FieldId::Checksum, reader.abs(2..4));

    // A malformed TLV poisons the rest of the list; values decoded
    // before it are kept.
    let mut values = Vec::new();
    let mut position = layout::TLV_START;
    while position + layout::TLV_HEADER_LEN <= reader.len() {
        let header = TlvHeader::read(&reader, position)?;
        if !header.is_well_formed(position, reader.len()) {
            break;
        }
        let tlv = reader.sub(position..position + header.length)?;
        match decode_tlv(tlv, header) {
            Ok(mut decoded) => values.append(&mut decoded),
            Err(_) => break,
        }
        position += header.length;
    }

    Ok(Cdp {
        version,
        ttl,
        checksum,
        values,
        data: reader.as_slice().to_vec(),
        fields,
    })
}

fn decode_tlv(tlv: ByteReader<'_>, header: TlvHeader) -> Result<Vec<CdpValue>, CdpError> {
    let length = header.length;
    let value_range = layout::TLV_VALUE_OFFSET..length;

    let single = |cdp_type: CdpType, range: FieldRange| vec![CdpValue { cdp_type, range }];

    match header.tlv_type {
        layout::TYPE_DEVICE_ID => Ok(single(
            CdpType::DeviceId(tlv.utf8(value_range.clone())?),
            tlv.abs(value_range),
        )),
        layout::TYPE_ADDRESSES | layout::TYPE_MANAGEMENT_ADDRESSES => Ok(decode_addresses(tlv)),
        layout::TYPE_PORT_ID => Ok(single(
            CdpType::PortId(tlv.utf8(value_range.clone())?),
            tlv.abs(value_range),
        )),
        layout::TYPE_CAPABILITIES => {
            if length != layout::CAPABILITIES_TLV_LEN {
                return Err(CdpError::BadTlvLength {
                    tlv_type: header.tlv_type,
                    length,
                });
            }
            Ok(decode_capabilities(&tlv)?)
        }
        layout::TYPE_SOFTWARE_VERSION => Ok(single(
            CdpType::SoftwareVersion(tlv.utf8(value_range.clone())?),
            tlv.abs(value_range),
        )),
        layout::TYPE_PLATFORM => Ok(single(
            CdpType::Platform(tlv.utf8(value_range.clone())?),
            tlv.abs(value_range),
        )),
        layout::TYPE_NATIVE_VLAN => {
            if length != layout::NATIVE_VLAN_TLV_LEN {
                return Err(CdpError::BadTlvLength {
                    tlv_type: header.tlv_type,
                    length,
                });
            }
            Ok(single(
                CdpType::NativeVlan(tlv.u16_be(layout::TLV_VALUE_OFFSET)?),
                tlv.abs(4..6),
            ))
        }
        layout::TYPE_DUPLEX | layout::TYPE_TRUST_BITMAP | layout::TYPE_UNTRUSTED_COS => {
            if length != layout::BYTE_TLV_LEN {
                return Err(CdpError::BadTlvLength {
                    tlv_type: header.tlv_type,
                    length,
                });
            }
            let byte = tlv.u8_at(layout::TLV_VALUE_OFFSET)?;
            let cdp_type = match header.tlv_type {
                layout::TYPE_DUPLEX => CdpType::Duplex(byte),
                layout::TYPE_TRUST_BITMAP => CdpType::TrustBitmap(byte),
                _ => CdpType::UntrustedCos(byte),
            };
            Ok(single(cdp_type, tlv.abs(4..5)))
        }
        layout::TYPE_SYSTEM_NAME => Ok(single(
            CdpType::SystemName(tlv.utf8(value_range.clone())?),
            tlv.abs(value_range),
        )),
        _ => Ok(single(
            CdpType::Unknown(tlv.as_slice().to_vec()),
            tlv.abs(0..length),
        )),
    }
}

/// Walk the address records of a type-2/type-0x16 TLV. A record with an
/// unrecognized protocol marker is skipped using its own declared
/// lengths; truncation ends the walk with the records decoded so far.
fn decode_addresses(tlv: ByteReader<'_>) -> Vec<CdpValue> {
    let mut results = Vec::new();
    let Ok(count) = tlv.u32_be(layout::ADDRESS_COUNT_OFFSET) else {
        return results;
    };
    let mut position = layout::ADDRESS_RECORDS_OFFSET;
    for _ in 0..count {
        let Ok(protocol_length) = tlv.u8_at(position + 1) else {
            return results;
        };
        match protocol_length {
            1 => {
                if tlv.len() < position + 9 {
                    return results;
                }
                let Ok(protocol) = tlv.u8_at(position + 2) else {
                    return results;
                };
                let Ok(address_length) = tlv.u16_be(position + 3) else {
                    return results;
                };
                if protocol == layout::PROTOCOL_IPV4 {
                    if let Ok(address) = tlv.ipv4(position + 5) {
                        results.push(CdpValue {
                            cdp_type: CdpType::Ipv4Address(address),
                            range: tlv.abs(position..position + 9),
                        });
                    }
                }
                position += 5 + usize::from(address_length);
            }
            8 => {
                if tlv.len() < position + 28 {
                    return results;
                }
                let Ok(protocol) = tlv.u64_be(position + 2) else {
                    return results;
                };
                let Ok(address_length) = tlv.u16_be(position + 10) else {
                    return results;
                };
                if protocol == layout::PROTOCOL_IPV6 {
                    if let Ok(address) = tlv.ipv6(position + 12) {
                        results.push(CdpValue {
                            cdp_type: CdpType::Ipv6Address(address),
                            range: tlv.abs(position..position + 28),
                        });
                    }
                }
                position += 12 + usize::from(address_length);
            }
            other => {
                let skip = usize::from(other);
                if tlv.len() < position + 4 + skip {
                    return results;
                }
                let Ok(address_length) = tlv.u16_be(position + 2 + skip) else {
                    return results;
                };
                position += 4 + skip + usize::from(address_length);
            }
        }
    }
    results
}

fn decode_capabilities(tlv: &ByteReader<'_>) -> Result<Vec<CdpValue>, CdpError> {
    let octet3 = tlv.u8_at(6)?;
    let octet4 = tlv.u8_at(7)?;
    let low = tlv.abs(7..8);
    let high = tlv.abs(6..7);

    let mut results = Vec::new();
    let low_flags = [
        (0x01, CdpType::CapabilityRouter),
        (0x02, CdpType::CapabilityBridge),
        (0x04, CdpType::CapabilitySourceRouteBridge),
        (0x08, CdpType::CapabilitySwitch),
        (0x10, CdpType::CapabilityHost),
        (0x20, CdpType::CapabilityIgmp),
        (0x40, CdpType::CapabilityRepeater),
        (0x80, CdpType::CapabilityVoip),
    ];
    for (mask, cdp_type) in low_flags {
        if octet4 & mask != 0 {
            results.push(CdpValue {
                cdp_type,
                range: low,
            });
        }
    }
    let high_flags = [
        (0x01, CdpType::CapabilityRemoteManaged),
        (0x02, CdpType::CapabilityVtCamera),
        (0x04, CdpType::CapabilityMacRelay),
    ];
    for (mask, cdp_type) in high_flags {
        if octet3 & mask != 0 {
            results.push(CdpValue {
                cdp_type,
                range: high,
            });
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::{CdpType, decode_cdp};
    use crate::wire::parse_hex;

    const CDP_BODY: &str = concat!(
        "02b4abcd",                         // version 2, ttl 180, checksum
        "00010010346337313063313965333064", // device id "4c710c19e30d"
        "00020011",                         // addresses, length 17
        "00000001",                         // one record
        "0101cc0004c0a80020",               // ipv4 192.168.0.32
        "0004000800000009",                 // capabilities: router + switch
    );

    #[test]
    fn decodes_device_id_addresses_and_capabilities() {
        let data = parse_hex(CDP_BODY).unwrap();
        let cdp = decode_cdp(&data).unwrap();
        assert_eq!(cdp.version, 2);
        assert_eq!(cdp.ttl, 180);
        assert_eq!(cdp.checksum, 0xabcd);
        let types: Vec<_> = cdp.values.iter().map(|v| &v.cdp_type).collect();
        assert_eq!(
            types,
            vec![
                &CdpType::DeviceId("4c710c19e30d".to_string()),
                &CdpType::Ipv4Address(Ipv4Addr::new(192, 168, 0, 32)),
                &CdpType::CapabilityRouter,
                &CdpType::CapabilitySwitch,
            ]
        );
        assert_eq!(
            cdp.ipv4_addresses(),
            vec![Ipv4Addr::new(192, 168, 0, 32)]
        );
    }

    #[test]
    fn address_record_ranges_index_the_buffer() {
        let data = parse_hex(CDP_BODY).unwrap();
        let cdp = decode_cdp(&data).unwrap();
        // Address TLV starts at 20, first record at 28, 9 bytes long.
        let address = &cdp.values[1];
        assert_eq!((address.range.start, address.range.end), (28, 37));
    }

    #[test]
    fn unknown_address_protocol_skips_one_record() {
        // Two records: protocol 0xbb (skipped), then 0xcc (decoded).
        let data = parse_hex(concat!(
            "02b4abcd",
            "0002001a",
            "00000002",
            "0101bb0004dededede",
            "0101cc0004c0a80021",
        ))
        .unwrap();
        let cdp = decode_cdp(&data).unwrap();
        assert_eq!(
            cdp.ipv4_addresses(),
            vec![Ipv4Addr::new(192, 168, 0, 33)]
        );
    }

    #[test]
    fn undersized_tlv_length_aborts_with_partial_values() {
        // Device id TLV, then a TLV whose declared length is 4.
        let data = parse_hex(concat!(
            "02b4abcd",
            "00010010346337313063313965333064",
            "00030004ffffffff",
        ))
        .unwrap();
        let cdp = decode_cdp(&data).unwrap();
        assert_eq!(cdp.values.len(), 1);
        assert!(matches!(cdp.values[0].cdp_type, CdpType::DeviceId(_)));
    }

    #[test]
    fn overrunning_tlv_length_aborts_with_partial_values() {
        let data = parse_hex(concat!(
            "02b4abcd",
            "00010010346337313063313965333064",
            "000500ff61",
        ))
        .unwrap();
        let cdp = decode_cdp(&data).unwrap();
        assert_eq!(cdp.values.len(), 1);
    }

    #[test]
    fn unknown_tlv_type_is_kept_raw() {
        let data = parse_hex("02b4abcd00ff0006beef").unwrap();
        let cdp = decode_cdp(&data).unwrap();
        assert_eq!(cdp.values.len(), 1);
        match &cdp.values[0].cdp_type {
            CdpType::Unknown(bytes) => assert_eq!(bytes.len(), 6),
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn short_message_fails() {
        assert!(decode_cdp(&[0x02, 0xb4]).is_none());
    }
}
