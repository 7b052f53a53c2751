pub const SOURCE_PORT_OFFSET: usize = 0;
pub const DESTINATION_PORT_OFFSET: usize = 2;
pub const LENGTH_OFFSET: usize = 4;
pub const CHECKSUM_OFFSET: usize = 6;
pub const PAYLOAD_OFFSET: usize = 8;

pub const MIN_LEN: usize = PAYLOAD_OFFSET;
