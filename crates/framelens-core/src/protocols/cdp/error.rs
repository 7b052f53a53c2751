use thiserror::Error;

use crate::wire::WireError;

#[derive(Debug, Error)]
pub enum CdpError {
    #[error("message too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("TLV type {tlv_type} has invalid length {length}")]
    BadTlvLength { tlv_type: u16, length: usize },
    #[error(transparent)]
    Wire(#[from] WireError),
}
