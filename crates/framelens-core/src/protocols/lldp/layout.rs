pub const MIN_LEN: usize = 2;
/// Packed TLV header: type in the top 7 bits, length in the low 9.
pub const TLV_HEADER_LEN: usize = 2;
pub const TLV_LENGTH_MASK: u16 = 0x01ff;
pub const TLV_TYPE_MASK: u16 = 0xfe00;
pub const TLV_TYPE_SHIFT: u16 = 9;

pub const TYPE_END: u16 = 0;
pub const TYPE_CHASSIS_ID: u16 = 1;
pub const TYPE_PORT_ID: u16 = 2;
pub const TYPE_TTL: u16 = 3;
pub const TYPE_PORT_DESCRIPTION: u16 = 4;
pub const TYPE_SYSTEM_NAME: u16 = 5;
pub const TYPE_SYSTEM_DESCRIPTION: u16 = 6;
pub const TYPE_CAPABILITIES: u16 = 7;
pub const TYPE_MANAGEMENT_ADDRESS: u16 = 8;
pub const TYPE_OUI_SPECIFIC: u16 = 127;

pub const CHASSIS_SUBTYPE_MAC: u8 = 4;
pub const CHASSIS_SUBTYPE_NETWORK: u8 = 5;
pub const PORT_SUBTYPE_MAC: u8 = 3;
pub const PORT_SUBTYPE_NETWORK: u8 = 4;

pub const NETWORK_ADDRESS_IPV4: u8 = 1;
pub const NETWORK_ADDRESS_IPV6: u8 = 2;

pub const MGMT_ADDRESS_LEN_IPV4: u8 = 5;
pub const MGMT_ADDRESS_LEN_IPV6: u8 = 17;
