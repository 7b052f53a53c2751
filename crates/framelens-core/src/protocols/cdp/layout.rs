pub const VERSION_OFFSET: usize = 0;
pub const TTL_OFFSET: usize = 1;
pub const CHECKSUM_OFFSET: usize = 2;
pub const TLV_START: usize = 4;

pub const MIN_LEN: usize = 10;
/// TLV header: 2-byte type + 2-byte length, counted inside the length.
pub const TLV_HEADER_LEN: usize = 4;
pub const TLV_VALUE_OFFSET: usize = 4;

pub const TYPE_DEVICE_ID: u16 = 1;
pub const TYPE_ADDRESSES: u16 = 2;
pub const TYPE_PORT_ID: u16 = 3;
pub const TYPE_CAPABILITIES: u16 = 4;
pub const TYPE_SOFTWARE_VERSION: u16 = 5;
pub const TYPE_PLATFORM: u16 = 6;
pub const TYPE_NATIVE_VLAN: u16 = 10;
pub const TYPE_DUPLEX: u16 = 11;
pub const TYPE_TRUST_BITMAP: u16 = 0x12;
pub const TYPE_UNTRUSTED_COS: u16 = 0x13;
pub const TYPE_SYSTEM_NAME: u16 = 0x14;
pub const TYPE_MANAGEMENT_ADDRESSES: u16 = 0x16;

pub const CAPABILITIES_TLV_LEN: usize = 8;
pub const NATIVE_VLAN_TLV_LEN: usize = 6;
pub const BYTE_TLV_LEN: usize = 5;

/// Address-record protocol markers.
pub const PROTOCOL_IPV4: u8 = 0xcc;
pub const PROTOCOL_IPV6: u64 = 0xaaaa0300000086dd;

pub const ADDRESS_COUNT_OFFSET: usize = 4;
pub const ADDRESS_RECORDS_OFFSET: usize = 8;
