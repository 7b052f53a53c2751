use thiserror::Error;

use crate::wire::WireError;

#[derive(Debug, Error)]
pub enum Icmp6Error {
    #[error("message too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error(transparent)]
    Wire(#[from] WireError),
}
