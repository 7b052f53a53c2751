use std::fmt;

use serde::Serialize;

use super::error::BpduError;
use super::layout;
use crate::fields::{FieldId, FieldMap};
use crate::wire::ByteReader;

/// Decoded spanning-tree BPDU.
///
/// Root and bridge IDs are the raw 64-bit composite priority+MAC fields;
/// the display layer renders them as hex.
#[derive(Debug, Clone, Serialize)]
pub struct Bpdu {
    pub protocol_id: u16,
    pub version: u8,
    pub bpdu_type: u8,
    pub flag_topology_change_ack: bool,
    pub flag_agreement: bool,
    pub flag_forwarding: bool,
    pub flag_learning: bool,
    /// 0 = unknown, 1 = alternate, 2 = root, 3 = designated.
    pub port_role: u8,
    pub flag_proposal: bool,
    pub flag_topology_change: bool,
    pub root_id: u64,
    pub root_cost: u32,
    pub bridge_id: u64,
    pub port_id: u16,
    pub age: f64,
    pub max_age: f64,
    pub hello_time: f64,
    pub forward_delay: f64,
    pub v1_length: u8,
    #[serde(skip)]
    pub data: Vec<u8>,
    fields: FieldMap,
}

impl Bpdu {
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn root_id_string(&self) -> String {
        format!("0x{:x}", self.root_id)
    }

    pub fn bridge_id_string(&self) -> String {
        format!("0x{:x}", self.bridge_id)
    }

    pub fn flag_string(&self) -> String {
        let mut flags = String::new();
        if self.flag_topology_change_ack {
            flags.push_str("TCA ");
        }
        if self.flag_agreement {
            flags.push_str("AGR ");
        }
        if self.flag_forwarding {
            flags.push_str("FOR ");
        }
        if self.flag_topology_change {
            flags.push_str("TCH ");
        }
        flags
    }

    pub fn verbose_description(&self) -> String {
        format!(
            "BPDU protocol {} version {} type {} flags {}portRole {} rootID {} rootCost {} bridgeID {} portId {} age {} maxAge {} helloTime {} forwardDelay {} {} bytes",
            self.protocol_id,
            self.version,
            self.bpdu_type,
            self.flag_string(),
            self.port_role,
            self.root_id_string(),
            self.root_cost,
            self.bridge_id_string(),
            self.port_id,
            self.age,
            self.max_age,
            self.hello_time,
            self.forward_delay,
            self.data.len()
        )
    }
}

impl fmt::Display for Bpdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BPDU version {} type {} rootID {} bridgeID {} rootCost {} portId {}",
            self.version,
            self.bpdu_type,
            self.root_id_string(),
            self.bridge_id_string(),
            self.root_cost,
            self.port_id
        )
    }
}

/// Decode a BPDU from the bytes following the 802.2 LLC header.
pub fn decode_bpdu(data: &[u8]) -> Option<Bpdu> {
    parse_bpdu(ByteReader::new(data)).ok()
}

/// 802.1D fixed-point seconds: whole byte plus fractional byte over 256.
fn timer(reader: ByteReader<'_>, offset: usize) -> Result<f64, BpduError> {
    let whole = reader.u8_at(offset)?;
    let fraction = reader.u8_at(offset + 1)?;
    Ok(f64::from(whole) + f64::from(fraction) / 256.0)
}

pub(crate) fn parse_bpdu(reader: ByteReader<'_>) -> Result<Bpdu, BpduError> {
    if reader.len() < layout::MIN_LEN {
        return Err(BpduError::TooShort {
            needed: layout::MIN_LEN,
            actual: reader.len(),
        });
    }

    let mut fields = FieldMap::new();
    let protocol_id = reader.u16_be(layout::PROTOCOL_ID_OFFSET)?;
    fields.insert(FieldId::ProtocolId, reader.abs(0..2));
    let version = reader.u8_at(layout::VERSION_OFFSET)?; // 0 = STP, 2 = RSTP
    fields.insert(FieldId::BpduVersion, reader.abs(2..3));
    let bpdu_type = reader.u8_at(layout::TYPE_OFFSET)?; // 0 = config, 2 = RSTP
    fields.insert(FieldId::BpduType, reader.abs(3..4));

    let flags = reader.u8_at(layout::FLAGS_OFFSET)?;
    fields.insert(FieldId::Flags, reader.abs(4..5));

    let root_id = reader.u64_be(layout::ROOT_ID_OFFSET)?;
    fields.insert(FieldId::RootId, reader.abs(5..13));
    let root_cost = reader.u32_be(layout::ROOT_COST_OFFSET)?;
    fields.insert(FieldId::RootCost, reader.abs(13..17));
    let bridge_id = reader.u64_be(layout::BRIDGE_ID_OFFSET)?;
    fields.insert(FieldId::BridgeId, reader.abs(17..25));
    let port_id = reader.u16_be(layout::PORT_ID_OFFSET)?;
    fields.insert(FieldId::PortId, reader.abs(25..27));

    let age = timer(reader, layout::AGE_OFFSET)?;
    fields.insert(FieldId::Age, reader.abs(27..29));
    let max_age = timer(reader, layout::MAX_AGE_OFFSET)?;
    fields.insert(FieldId::MaxAge, reader.abs(29..31));
    let hello_time = timer(reader, layout::HELLO_TIME_OFFSET)?;
    fields.insert(FieldId::HelloTime, reader.abs(31..33));
    let forward_delay = timer(reader, layout::FORWARD_DELAY_OFFSET)?;
    fields.insert(FieldId::ForwardDelay, reader.abs(33..35));

    let v1_length = reader.u8_at(layout::V1_LENGTH_OFFSET)?;
    fields.insert(FieldId::V1Length, reader.abs(35..36));

    Ok(Bpdu {
        protocol_id,
        version,
        bpdu_type,
        flag_topology_change_ack: flags & layout::FLAG_TOPOLOGY_CHANGE_ACK != 0,
        flag_agreement: flags & layout::FLAG_AGREEMENT != 0,
        flag_forwarding: flags & layout::FLAG_FORWARDING != 0,
        flag_learning: flags & layout::FLAG_LEARNING != 0,
        port_role: (flags & layout::PORT_ROLE_MASK) >> layout::PORT_ROLE_SHIFT,
        flag_proposal: flags & layout::FLAG_PROPOSAL != 0,
        flag_topology_change: flags & layout::FLAG_TOPOLOGY_CHANGE != 0,
        root_id,
        root_cost,
        bridge_id,
        port_id,
        age,
        max_age,
        hello_time,
        forward_delay,
        v1_length,
        data: reader.as_slice().to_vec(),
        fields,
    })
}
