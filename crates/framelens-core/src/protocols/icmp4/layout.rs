pub const TYPE_OFFSET: usize = 0;
pub const CODE_OFFSET: usize = 1;
pub const CHECKSUM_OFFSET: usize = 2;
pub const REST_OF_HEADER_OFFSET: usize = 4;
pub const PAYLOAD_OFFSET: usize = 8;

/// RFC 4884 original-datagram length, in 32-bit words on the wire but
/// historically read as a byte count by many dissectors.
pub const EXT_LENGTH_OFFSET: usize = 5;

pub const IDENTIFIER_OFFSET: usize = 4;
pub const SEQUENCE_OFFSET: usize = 6;
pub const GATEWAY_OFFSET: usize = 4;
pub const POINTER_OFFSET: usize = 4;
pub const MASK_OFFSET: usize = 8;
pub const ORIGINATE_OFFSET: usize = 8;
pub const RECEIVE_OFFSET: usize = 12;
pub const TRANSMIT_OFFSET: usize = 16;

pub const MIN_LEN: usize = 4;
pub const MIN_LEN_CLASSIFIED: usize = 8;
pub const MIN_LEN_MASK: usize = 12;
pub const MIN_LEN_TIMESTAMP: usize = 20;
