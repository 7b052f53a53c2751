use thiserror::Error;

use crate::wire::WireError;

#[derive(Debug, Error)]
pub enum Igmp4Error {
    #[error("IGMP message too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("declared source count {declared} exceeds remaining buffer ({remaining} bytes)")]
    SourceCountOverrun { declared: usize, remaining: usize },
    #[error(transparent)]
    Wire(#[from] WireError),
}
