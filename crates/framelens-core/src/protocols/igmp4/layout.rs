pub const TYPE_OFFSET: usize = 0;
pub const MAX_RESPONSE_OFFSET: usize = 1;
pub const CHECKSUM_OFFSET: usize = 2;
pub const GROUP_ADDRESS_OFFSET: usize = 4;

// IGMPv3 membership query extension.
pub const V3_FLAGS_OFFSET: usize = 8;
pub const V3_QQIC_OFFSET: usize = 9;
pub const V3_NUM_SOURCES_OFFSET: usize = 10;
pub const V3_SOURCES_OFFSET: usize = 12;

// IGMPv3 membership report.
pub const V3_NUM_RECORDS_OFFSET: usize = 6;
pub const V3_RECORDS_OFFSET: usize = 8;
pub const V3_RECORD_HEADER_LEN: usize = 8;

pub const MIN_LEN_V2: usize = 8;
pub const MIN_LEN_V3: usize = 12;

pub const TYPE_MEMBERSHIP_QUERY: u8 = 0x11;
pub const TYPE_MEMBERSHIP_REPORT_V1: u8 = 0x12;
pub const TYPE_MEMBERSHIP_REPORT_V2: u8 = 0x16;
pub const TYPE_LEAVE_GROUP: u8 = 0x17;
pub const TYPE_MEMBERSHIP_REPORT_V3: u8 = 0x22;

pub const V3_SUPPRESS_FLAG: u8 = 0x08;
pub const V3_ROBUSTNESS_MASK: u8 = 0x07;
pub const IPV4_ADDRESS_LEN: usize = 4;
