pub const HARDWARE_TYPE_OFFSET: usize = 0;
pub const PROTOCOL_TYPE_OFFSET: usize = 2;
pub const HARDWARE_SIZE_OFFSET: usize = 4;
pub const PROTOCOL_SIZE_OFFSET: usize = 5;
pub const OPERATION_OFFSET: usize = 6;
pub const SENDER_ETHERNET_OFFSET: usize = 8;
pub const SENDER_IP_OFFSET: usize = 14;
pub const TARGET_ETHERNET_OFFSET: usize = 18;
pub const TARGET_IP_OFFSET: usize = 24;

pub const MIN_LEN: usize = 28;

pub const HARDWARE_TYPE_ETHERNET: u16 = 1;
pub const PROTOCOL_TYPE_IPV4: u16 = 0x0800;
pub const HARDWARE_SIZE_ETHERNET: u8 = 6;
pub const PROTOCOL_SIZE_IPV4: u8 = 4;
