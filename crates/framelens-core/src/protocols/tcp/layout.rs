pub const SOURCE_PORT_OFFSET: usize = 0;
pub const DESTINATION_PORT_OFFSET: usize = 2;
pub const SEQUENCE_OFFSET: usize = 4;
pub const ACKNOWLEDGEMENT_OFFSET: usize = 8;
pub const DATA_OFFSET_OFFSET: usize = 12;
pub const FLAGS_OFFSET: usize = 13;
pub const WINDOW_OFFSET: usize = 14;
pub const CHECKSUM_OFFSET: usize = 16;
pub const URGENT_POINTER_OFFSET: usize = 18;
pub const PAYLOAD_OFFSET: usize = 20;

pub const MIN_LEN: usize = PAYLOAD_OFFSET;

pub const FLAG_URG: u8 = 0b0010_0000;
pub const FLAG_ACK: u8 = 0b0001_0000;
pub const FLAG_PSH: u8 = 0b0000_1000;
pub const FLAG_RST: u8 = 0b0000_0100;
pub const FLAG_SYN: u8 = 0b0000_0010;
pub const FLAG_FIN: u8 = 0b0000_0001;
