pub const VERSION_OFFSET: usize = 0;
pub const PAYLOAD_LENGTH_OFFSET: usize = 4;
pub const NEXT_HEADER_OFFSET: usize = 6;
pub const HOP_LIMIT_OFFSET: usize = 7;
pub const SOURCE_OFFSET: usize = 8;
pub const DESTINATION_OFFSET: usize = 24;
pub const HEADER_LEN: usize = 40;

pub const NEXT_HEADER_TCP: u8 = 6;
pub const NEXT_HEADER_UDP: u8 = 17;
pub const NEXT_HEADER_ICMP6: u8 = 58;
