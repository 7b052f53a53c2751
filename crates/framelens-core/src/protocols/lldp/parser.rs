use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::Serialize;

use super::error::LldpError;
use super::layout;
use super::reader::TlvHeader;
use crate::fields::{FieldMap, FieldRange};
use crate::wire::ByteReader;

/// One bit of the type-7 capabilities TLV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LldpCapability {
    Other,
    Repeater,
    MacBridge,
    AccessPoint,
    Router,
    Telephone,
    Docsis,
    StationOnly,
    CVlan,
    SVlan,
    MacRelay,
    Reserved,
}

impl fmt::Display for LldpCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LldpCapability::Other => "Other",
            LldpCapability::Repeater => "Repeater",
            LldpCapability::MacBridge => "MacBridge",
            LldpCapability::AccessPoint => "AccessPoint",
            LldpCapability::Router => "Router",
            LldpCapability::Telephone => "Telephone",
            LldpCapability::Docsis => "DOCSIS",
            LldpCapability::StationOnly => "StationOnly",
            LldpCapability::CVlan => "CVLAN",
            LldpCapability::SVlan => "SVLAN",
            LldpCapability::MacRelay => "MacRelay",
            LldpCapability::Reserved => "Reserved",
        };
        f.write_str(name)
    }
}

const CAPABILITY_BITS: [(u16, LldpCapability); 11] = [
    (0x0001, LldpCapability::Other),
    (0x0002, LldpCapability::Repeater),
    (0x0004, LldpCapability::MacBridge),
    (0x0008, LldpCapability::AccessPoint),
    (0x0010, LldpCapability::Router),
    (0x0020, LldpCapability::Telephone),
    (0x0040, LldpCapability::Docsis),
    (0x0080, LldpCapability::StationOnly),
    (0x0100, LldpCapability::CVlan),
    (0x0200, LldpCapability::SVlan),
    (0x0400, LldpCapability::MacRelay),
];
const CAPABILITY_RESERVED_MASK: u16 = 0xf800;

/// One decoded LLDP TLV value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LldpType {
    EndOfLldp,
    ChassisId {
        subtype: u8,
        id: String,
    },
    PortId {
        subtype: u8,
        id: String,
    },
    Ttl(u16),
    PortDescription(String),
    SystemName(String),
    SystemDescription(String),
    Capability(LldpCapability),
    Enabled(LldpCapability),
    ManagementAddressIpv4 {
        address: Ipv4Addr,
        interface_subtype: u8,
        interface: u32,
        oid: String,
    },
    ManagementAddressIpv6 {
        address: Ipv6Addr,
        interface_subtype: u8,
        interface: u32,
        oid: String,
    },
    OuiSpecific {
        oui: String,
        subtype: u8,
        info: String,
    },
    Unknown(u16),
}

fn chassis_subtype_name(subtype: u8) -> &'static str {
    match subtype {
        1 => "Chassis Component",
        2 => "Interface Alias",
        3 => "Port Component",
        4 => "MAC Address",
        5 => "Network Address",
        6 => "Interface Name",
        7 => "Locally Assigned",
        _ => "Reserved",
    }
}

fn port_subtype_name(subtype: u8) -> &'static str {
    match subtype {
        1 => "Interface Alias",
        2 => "Port Component",
        3 => "MAC Address",
        4 => "Network Address",
        5 => "Interface Name",
        6 => "Agent Circuit ID",
        7 => "Locally Assigned",
        _ => "Reserved",
    }
}

impl fmt::Display for LldpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LldpType::EndOfLldp => f.write_str("End Of LLDP"),
            LldpType::ChassisId { subtype, id } => {
                write!(f, "Chassis Id {} {id}", chassis_subtype_name(*subtype))
            }
            LldpType::PortId { subtype, id } => {
                write!(f, "Port Id {} {id}", port_subtype_name(*subtype))
            }
            LldpType::Ttl(ttl) => write!(f, "TTL {ttl}"),
            LldpType::PortDescription(description) => {
                write!(f, "Port Description {description}")
            }
            LldpType::SystemName(name) => write!(f, "System Name {name}"),
            LldpType::SystemDescription(description) => {
                write!(f, "System Description {description}")
            }
            LldpType::Capability(capability) => write!(f, "capability{capability}"),
            LldpType::Enabled(capability) => write!(f, "enabled{capability}"),
            LldpType::ManagementAddressIpv4 {
                address,
                interface_subtype,
                interface,
                oid,
            } => write!(
                f,
                "ManagementAddress {address} InterfaceSubtype {interface_subtype} interface {interface} oid {oid}"
            ),
            LldpType::ManagementAddressIpv6 {
                address,
                interface_subtype,
                interface,
                oid,
            } => write!(
                f,
                "ManagementAddress {address} InterfaceSubtype {interface_subtype} interface {interface} oid {oid}"
            ),
            LldpType::OuiSpecific { oui, subtype, info } => {
                write!(f, "OUI {oui} subType {subtype} {info}")
            }
            LldpType::Unknown(tlv_type) => write!(f, "Unknown LLDP TLV Type {tlv_type}"),
        }
    }
}

/// A decoded value plus the byte range it came from, absolute into the
/// original capture buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LldpValue {
    pub lldp_type: LldpType,
    pub range: FieldRange,
}

/// Decoded LLDP message.
#[derive(Debug, Clone, Serialize)]
pub struct Lldp {
    pub values: Vec<LldpValue>,
    #[serde(skip)]
    pub data: Vec<u8>,
    fields: FieldMap,
}

impl Lldp {
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn verbose_description(&self) -> String {
        let mut description = String::from("LLDP");
        for value in &self.values {
            description.push(' ');
            description.push_str(&value.lldp_type.to_string());
        }
        description
    }
}

impl fmt::Display for Lldp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LLDP {} TLV values", self.values.len())
    }
}

/// Decode an LLDP message from the bytes following the EtherType.
pub fn decode_lldp(data: &[u8]) -> Option<Lldp> {
    parse_lldp(ByteReader::new(data)).ok()
}

pub(crate) fn parse_lldp(reader: ByteReader<'_>) -> Result<Lldp, LldpError> {
    if reader.len() < layout::MIN_LEN {
        return Err(LldpError::TooShort {
            needed: layout::MIN_LEN,
            actual: reader.len(),
        });
    }

    let mut values = Vec::new();
    let mut position = 0;
    while position + layout::TLV_HEADER_LEN <= reader.len() {
        let header = TlvHeader::read(&reader, position)?;
        // An overrunning length poisons the rest of the list.
        if !header.fits(position, reader.len()) {
            break;
        }
        let end = position + layout::TLV_HEADER_LEN + header.length;
        let tlv = reader.sub(position..end)?;
        if header.tlv_type == layout::TYPE_END {
            values.push(LldpValue {
                lldp_type: LldpType::EndOfLldp,
                range: tlv.abs(0..tlv.len()),
            });
            break;
        }
        if header.tlv_type == layout::TYPE_CAPABILITIES {
            decode_capabilities(&tlv, &mut values);
        } else if let Some(value) = decode_tlv(&tlv, header) {
            // A TLV whose body fails to decode is skipped on its own.
            values.push(value);
        }
        position = end;
    }

    Ok(Lldp {
        values,
        data: reader.as_slice().to_vec(),
        fields: FieldMap::new(),
    })
}

fn decode_tlv(tlv: &ByteReader<'_>, header: TlvHeader) -> Option<LldpValue> {
    let range = tlv.abs(0..tlv.len());
    let lldp_type = match header.tlv_type {
        layout::TYPE_CHASSIS_ID => {
            let subtype = tlv.u8_at(2).ok()?;
            let id = match subtype {
                layout::CHASSIS_SUBTYPE_MAC => tlv.mac(3).ok()?,
                layout::CHASSIS_SUBTYPE_NETWORK => network_address_string(tlv)?,
                _ => tlv.utf8(3..tlv.len()).ok()?,
            };
            LldpType::ChassisId { subtype, id }
        }
        layout::TYPE_PORT_ID => {
            let subtype = tlv.u8_at(2).ok()?;
            let id = match subtype {
                layout::PORT_SUBTYPE_MAC => tlv.mac(3).ok()?,
                layout::PORT_SUBTYPE_NETWORK => network_address_string(tlv)?,
                _ => tlv.utf8(3..tlv.len()).ok()?,
            };
            LldpType::PortId { subtype, id }
        }
        layout::TYPE_TTL => LldpType::Ttl(tlv.u16_be(2).ok()?),
        layout::TYPE_PORT_DESCRIPTION => {
            LldpType::PortDescription(tlv.utf8(2..tlv.len()).ok()?)
        }
        layout::TYPE_SYSTEM_NAME => LldpType::SystemName(tlv.utf8(2..tlv.len()).ok()?),
        layout::TYPE_SYSTEM_DESCRIPTION => {
            LldpType::SystemDescription(tlv.utf8(2..tlv.len()).ok()?)
        }
        layout::TYPE_MANAGEMENT_ADDRESS => decode_management_address(tlv)?,
        layout::TYPE_OUI_SPECIFIC => {
            let oui = tlv.oui(2).ok()?;
            let subtype = tlv.u8_at(5).ok()?;
            let info = tlv.utf8(6..tlv.len()).unwrap_or_default();
            LldpType::OuiSpecific { oui, subtype, info }
        }
        other => LldpType::Unknown(other),
    };
    Some(LldpValue { lldp_type, range })
}

/// Network-address chassis/port IDs render as the address text.
fn network_address_string(tlv: &ByteReader<'_>) -> Option<String> {
    match tlv.u8_at(3).ok()? {
        layout::NETWORK_ADDRESS_IPV4 => Some(tlv.ipv4(4).ok()?.to_string()),
        layout::NETWORK_ADDRESS_IPV6 => Some(tlv.ipv6(4).ok()?.to_string()),
        _ => None,
    }
}

fn decode_management_address(tlv: &ByteReader<'_>) -> Option<LldpType> {
    let address_length = tlv.u8_at(2).ok()?;
    let address_subtype = tlv.u8_at(3).ok()?;
    let after_address = 3 + usize::from(address_length);

    let interface_subtype = tlv.u8_at(after_address).ok()?;
    let interface = tlv.u32_be(after_address + 1).ok()?;
    let oid_length = usize::from(tlv.u8_at(after_address + 5).ok()?);
    let oid = tlv
        .utf8(after_address + 6..after_address + 6 + oid_length)
        .unwrap_or_default();

    match address_subtype {
        layout::NETWORK_ADDRESS_IPV4 if address_length == layout::MGMT_ADDRESS_LEN_IPV4 => {
            Some(LldpType::ManagementAddressIpv4 {
                address: tlv.ipv4(4).ok()?,
                interface_subtype,
                interface,
                oid,
            })
        }
        layout::NETWORK_ADDRESS_IPV6 if address_length == layout::MGMT_ADDRESS_LEN_IPV6 => {
            Some(LldpType::ManagementAddressIpv6 {
                address: tlv.ipv6(4).ok()?,
                interface_subtype,
                interface,
                oid,
            })
        }
        // Unknown address subtype skips just this TLV.
        _ => None,
    }
}

fn decode_capabilities(tlv: &ByteReader<'_>, values: &mut Vec<LldpValue>) {
    let Ok(capabilities) = tlv.u16_be(2) else {
        return;
    };
    let Ok(enabled) = tlv.u16_be(4) else {
        return;
    };
    let capability_range = tlv.abs(2..4);
    let enabled_range = tlv.abs(4..6);

    for (mask, capability) in CAPABILITY_BITS {
        if capabilities & mask != 0 {
            values.push(LldpValue {
                lldp_type: LldpType::Capability(capability),
                range: capability_range,
            });
        }
    }
    if capabilities & CAPABILITY_RESERVED_MASK != 0 {
        values.push(LldpValue {
            lldp_type: LldpType::Capability(LldpCapability::Reserved),
            range: capability_range,
        });
    }
    for (mask, capability) in CAPABILITY_BITS {
        if enabled & mask != 0 {
            values.push(LldpValue {
                lldp_type: LldpType::Enabled(capability),
                range: enabled_range,
            });
        }
    }
    if enabled & CAPABILITY_RESERVED_MASK != 0 {
        values.push(LldpValue {
            lldp_type: LldpType::Enabled(LldpCapability::Reserved),
            range: enabled_range,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::{LldpCapability, LldpType, decode_lldp};
    use crate::wire::parse_hex;

    const LLDP_BODY: &str = concat!(
        "0207044c710c19e30d",           // chassis id, MAC subtype
        "0406074769302f31",             // port id, locally assigned "Gi0/1"
        "06020078",                     // ttl 120
        "0e0400140014",                 // capabilities: mac bridge + router
        "100c0501c0a80001020000000500", // management address 192.168.0.1
        "0000",                         // end of lldpdu
    );

    fn body() -> Vec<u8> {
        parse_hex(LLDP_BODY).unwrap()
    }

    #[test]
    fn decodes_full_tlv_sequence() {
        let lldp = decode_lldp(&body()).unwrap();
        let types: Vec<_> = lldp.values.iter().map(|v| &v.lldp_type).collect();
        assert_eq!(
            types,
            vec![
                &LldpType::ChassisId {
                    subtype: 4,
                    id: "4c:71:0c:19:e3:0d".to_string(),
                },
                &LldpType::PortId {
                    subtype: 7,
                    id: "Gi0/1".to_string(),
                },
                &LldpType::Ttl(120),
                &LldpType::Capability(LldpCapability::MacBridge),
                &LldpType::Capability(LldpCapability::Router),
                &LldpType::Enabled(LldpCapability::MacBridge),
                &LldpType::Enabled(LldpCapability::Router),
                &LldpType::ManagementAddressIpv4 {
                    address: Ipv4Addr::new(192, 168, 0, 1),
                    interface_subtype: 2,
                    interface: 5,
                    oid: String::new(),
                },
                &LldpType::EndOfLldp,
            ]
        );
    }

    #[test]
    fn end_marker_terminates_the_walk() {
        let mut data = body();
        // Anything after the end marker is ignored.
        data.extend_from_slice(&[0xde, 0xad]);
        let lldp = decode_lldp(&data).unwrap();
        assert!(matches!(
            lldp.values.last().unwrap().lldp_type,
            LldpType::EndOfLldp
        ));
        assert_eq!(lldp.values.len(), 9);
    }

    #[test]
    fn overrunning_length_keeps_earlier_values() {
        // Chassis id, then a TLV declaring 100 bytes it does not have.
        let data = parse_hex("0207044c710c19e30d0864ffff").unwrap();
        let lldp = decode_lldp(&data).unwrap();
        assert_eq!(lldp.values.len(), 1);
        assert!(matches!(
            lldp.values[0].lldp_type,
            LldpType::ChassisId { .. }
        ));
    }

    #[test]
    fn undecodable_tlv_is_skipped_alone() {
        // Port id with invalid UTF-8, then a valid ttl.
        let data = parse_hex("040607ff80302f3106020078").unwrap();
        let lldp = decode_lldp(&data).unwrap();
        assert_eq!(lldp.values.len(), 1);
        assert_eq!(lldp.values[0].lldp_type, LldpType::Ttl(120));
    }

    #[test]
    fn value_ranges_index_the_buffer() {
        let lldp = decode_lldp(&body()).unwrap();
        let chassis = &lldp.values[0];
        assert_eq!((chassis.range.start, chassis.range.end), (0, 9));
        let port = &lldp.values[1];
        assert_eq!((port.range.start, port.range.end), (9, 17));
    }

    #[test]
    fn unknown_tlv_type_is_recorded() {
        let data = parse_hex("7e02beef").unwrap();
        let lldp = decode_lldp(&data).unwrap();
        assert_eq!(lldp.values[0].lldp_type, LldpType::Unknown(63));
    }

    #[test]
    fn short_message_fails() {
        assert!(decode_lldp(&[0x02]).is_none());
    }
}
