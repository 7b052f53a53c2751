use thiserror::Error;

use crate::wire::WireError;

#[derive(Debug, Error)]
pub enum ArpError {
    #[error("packet too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("unsupported ARP operation {0}")]
    UnsupportedOperation(u16),
    #[error("not an Ethernet/IPv4 ARP: hw {hardware_type}/{hardware_size} proto {protocol_type:#06x}/{protocol_size}")]
    NotEthernetIpv4 {
        hardware_type: u16,
        protocol_type: u16,
        hardware_size: u8,
        protocol_size: u8,
    },
    #[error(transparent)]
    Wire(#[from] WireError),
}
