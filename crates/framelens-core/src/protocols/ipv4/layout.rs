pub const VERSION_IHL_OFFSET: usize = 0;
pub const DSCP_ECN_OFFSET: usize = 1;
pub const TOTAL_LENGTH_OFFSET: usize = 2;
pub const IDENTIFICATION_OFFSET: usize = 4;
pub const FLAGS_FRAGMENT_OFFSET: usize = 6;
pub const TTL_OFFSET: usize = 8;
pub const PROTOCOL_OFFSET: usize = 9;
pub const HEADER_CHECKSUM_OFFSET: usize = 10;
pub const SOURCE_OFFSET: usize = 12;
pub const DESTINATION_OFFSET: usize = 16;
pub const OPTIONS_OFFSET: usize = 20;

pub const MIN_LEN: usize = 20;
pub const MIN_IHL: u8 = 5;
/// IHL counts 32-bit words.
pub const IHL_WORD: usize = 4;

pub const EVIL_FLAG: u8 = 0b1000_0000;
pub const DONT_FRAGMENT_FLAG: u8 = 0b0100_0000;
pub const MORE_FRAGMENTS_FLAG: u8 = 0b0010_0000;
pub const FRAGMENT_OFFSET_MASK: u16 = 0x1fff;

pub const PROTOCOL_ICMP: u8 = 1;
pub const PROTOCOL_IGMP: u8 = 2;
pub const PROTOCOL_TCP: u8 = 6;
pub const PROTOCOL_UDP: u8 = 17;
