use thiserror::Error;

use crate::wire::WireError;

#[derive(Debug, Error)]
pub enum Ipv4Error {
    #[error("header too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("invalid header length: {ihl} words")]
    BadHeaderLength { ihl: u8 },
    #[error(transparent)]
    Wire(#[from] WireError),
}
