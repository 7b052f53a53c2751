pub const PROTOCOL_ID_OFFSET: usize = 0;
pub const VERSION_OFFSET: usize = 2;
pub const TYPE_OFFSET: usize = 3;
pub const FLAGS_OFFSET: usize = 4;
pub const ROOT_ID_OFFSET: usize = 5;
pub const ROOT_COST_OFFSET: usize = 13;
pub const BRIDGE_ID_OFFSET: usize = 17;
pub const PORT_ID_OFFSET: usize = 25;
pub const AGE_OFFSET: usize = 27;
pub const MAX_AGE_OFFSET: usize = 29;
pub const HELLO_TIME_OFFSET: usize = 31;
pub const FORWARD_DELAY_OFFSET: usize = 33;
pub const V1_LENGTH_OFFSET: usize = 35;

pub const MIN_LEN: usize = 36;

pub const FLAG_TOPOLOGY_CHANGE_ACK: u8 = 0x80;
pub const FLAG_AGREEMENT: u8 = 0x40;
pub const FLAG_FORWARDING: u8 = 0x20;
pub const FLAG_LEARNING: u8 = 0x10;
pub const PORT_ROLE_MASK: u8 = 0x0c;
pub const PORT_ROLE_SHIFT: u32 = 2;
pub const FLAG_PROPOSAL: u8 = 0x02;
pub const FLAG_TOPOLOGY_CHANGE: u8 = 0x01;
