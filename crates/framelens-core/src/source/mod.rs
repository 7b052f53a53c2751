//! Packet sources.
//!
//! A [`PacketSource`] yields raw capture records one at a time. Each record
//! carries the captured bytes, the link type, the capture timestamp when the
//! container provides one, and the original on-the-wire length (which can
//! exceed the captured length when the capture was truncated by a snap
//! length). File I/O lives here; frame dissection never touches the
//! filesystem.

pub mod pcap;

pub use pcap::PcapFileSource;

use pcap_parser::Linktype;
use thiserror::Error;

/// One captured packet record.
#[derive(Debug, Clone)]
pub struct PacketEvent {
    /// Capture timestamp in seconds since the Unix epoch, when known.
    pub ts: Option<f64>,
    pub linktype: Linktype,
    /// Captured bytes, possibly truncated to the snap length.
    pub data: Vec<u8>,
    /// Length of the packet as seen on the wire.
    pub original_length: u32,
}

pub trait PacketSource {
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PCAP parse error: {0}")]
    Pcap(String),
}

impl From<pcap::error::PcapSourceError> for SourceError {
    fn from(value: pcap::error::PcapSourceError) -> Self {
        match value {
            pcap::error::PcapSourceError::Io(err) => SourceError::Io(err),
            pcap::error::PcapSourceError::Pcap { context, message } => {
                SourceError::Pcap(format!("{context}: {message}"))
            }
        }
    }
}
