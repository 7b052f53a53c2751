use std::fmt;
use std::net::Ipv4Addr;

use serde::Serialize;

use super::error::ArpError;
use super::layout;
use crate::fields::{FieldId, FieldMap};
use crate::wire::ByteReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArpOperation {
    Request,
    Reply,
    RarpRequest,
    RarpReply,
}

impl ArpOperation {
    pub(crate) fn from_wire(operation: u16) -> Option<Self> {
        match operation {
            1 => Some(ArpOperation::Request),
            2 => Some(ArpOperation::Reply),
            3 => Some(ArpOperation::RarpRequest),
            4 => Some(ArpOperation::RarpReply),
            _ => None,
        }
    }
}

impl fmt::Display for ArpOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArpOperation::Request => "ARP Request",
            ArpOperation::Reply => "ARP Reply",
            ArpOperation::RarpRequest => "RARP Request",
            ArpOperation::RarpReply => "RARP Reply",
        };
        f.write_str(label)
    }
}

/// Decoded Ethernet/IPv4 ARP packet.
#[derive(Debug, Clone, Serialize)]
pub struct Arp {
    pub hardware_type: u16,
    pub protocol_type: u16,
    pub hardware_size: u8,
    pub protocol_size: u8,
    pub operation: ArpOperation,
    pub sender_ethernet: String,
    pub sender_ip: Ipv4Addr,
    pub target_ethernet: String,
    pub target_ip: Ipv4Addr,
    #[serde(skip)]
    pub data: Vec<u8>,
    fields: FieldMap,
}

impl Arp {
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn verbose_description(&self) -> String {
        format!(
            "{self} hwType {} protType 0x{:04x} hwSize {} protSize {}",
            self.hardware_type, self.protocol_type, self.hardware_size, self.protocol_size
        )
    }
}

impl fmt::Display for Arp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sender {} {} target {} {}",
            self.operation, self.sender_ethernet, self.sender_ip, self.target_ethernet,
            self.target_ip
        )
    }
}

/// Decode an ARP packet from the bytes following the Ethernet header.
pub fn decode_arp(data: &[u8]) -> Option<Arp> {
    parse_arp(ByteReader::new(data)).ok()
}

pub(crate) fn parse_arp(reader: ByteReader<'_>) -> Result<Arp, ArpError> {
    if reader.len() < layout::MIN_LEN {
        return Err(ArpError::TooShort {
            needed: layout::MIN_LEN,
            actual: reader.len(),
        });
    }

    let mut fields = FieldMap::new();
    let hardware_type = reader.u16_be(layout::HARDWARE_TYPE_OFFSET)?;
    fields.insert(FieldId::HardwareType, reader.abs(0..2));
    let protocol_type = reader.u16_be(layout::PROTOCOL_TYPE_OFFSET)?;
    fields.insert(FieldId::ProtocolType, reader.abs(2..4));
    let hardware_size = reader.u8_at(layout::HARDWARE_SIZE_OFFSET)?;
    fields.insert(FieldId::HardwareSize, reader.abs(4..5));
    let protocol_size = reader.u8_at(layout::PROTOCOL_SIZE_OFFSET)?;
    fields.insert(FieldId::ProtocolSize, reader.abs(5..6));

    if hardware_type != layout::HARDWARE_TYPE_ETHERNET
        || protocol_type != layout::PROTOCOL_TYPE_IPV4
        || hardware_size != layout::HARDWARE_SIZE_ETHERNET
        || protocol_size != layout::PROTOCOL_SIZE_IPV4
    {
        return Err(ArpError::NotEthernetIpv4 {
            hardware_type,
            protocol_type,
            hardware_size,
            protocol_size,
        });
    }

    let operation_raw = reader.u16_be(layout::OPERATION_OFFSET)?;
    let operation = ArpOperation::from_wire(operation_raw)
        .ok_or(ArpError::UnsupportedOperation(operation_raw))?;
    fields.insert(FieldId::Operation, reader.abs(6..8));

    let sender_ethernet = reader.mac(layout::SENDER_ETHERNET_OFFSET)?;
    fields.insert(FieldId::SenderEthernet, reader.abs(8..14));
    let sender_ip = reader.ipv4(layout::SENDER_IP_OFFSET)?;
    fields.insert(FieldId::SenderIp, reader.abs(14..18));
    let target_ethernet = reader.mac(layout::TARGET_ETHERNET_OFFSET)?;
    fields.insert(FieldId::TargetEthernet, reader.abs(18..24));
    let target_ip = reader.ipv4(layout::TARGET_IP_OFFSET)?;
    fields.insert(FieldId::TargetIp, reader.abs(24..28));

    Ok(Arp {
        hardware_type,
        protocol_type,
        hardware_size,
        protocol_size,
        operation,
        sender_ethernet,
        sender_ip,
        target_ethernet,
        target_ip,
        data: reader.as_slice().to_vec(),
        fields,
    })
}
