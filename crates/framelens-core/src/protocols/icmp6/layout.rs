pub const TYPE_OFFSET: usize = 0;
pub const CODE_OFFSET: usize = 1;
pub const CHECKSUM_OFFSET: usize = 2;
pub const POINTER_OFFSET: usize = 4;
pub const IDENTIFIER_OFFSET: usize = 4;
pub const SEQUENCE_OFFSET: usize = 6;
pub const ND_FLAGS_OFFSET: usize = 4;
pub const TARGET_OFFSET: usize = 8;
pub const REST_OF_HEADER_OFFSET: usize = 4;
pub const PAYLOAD_OFFSET: usize = 8;
pub const ND_OPTIONS_OFFSET: usize = 24;
pub const REDIRECT_DESTINATION_OFFSET: usize = 24;
pub const REDIRECT_OPTIONS_OFFSET: usize = 40;

pub const MIN_LEN: usize = 8;
pub const MIN_LEN_NEIGHBOR: usize = 24;
pub const MIN_LEN_REDIRECT: usize = 40;

/// Neighbor-discovery option length is in 8-byte units.
pub const OPTION_UNIT: usize = 8;
pub const OPTION_PREFIX_INFO_LEN: usize = 32;
pub const OPTION_REDIRECTED_HEADER_SKIP: usize = 8;

pub const NA_ROUTER_FLAG: u8 = 0b1000_0000;
pub const NA_SOLICITED_FLAG: u8 = 0b0100_0000;
pub const NA_OVERRIDE_FLAG: u8 = 0b0010_0000;

pub const PREFIX_ON_LINK_FLAG: u8 = 0b1000_0000;
pub const PREFIX_AUTOCONFIG_FLAG: u8 = 0b0100_0000;
