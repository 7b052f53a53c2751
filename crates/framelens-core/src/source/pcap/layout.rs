//! Container constants for PCAP/PCAPNG files.

/// Section Header Block magic that opens a PCAPNG file.
pub const PCAPNG_MAGIC: [u8; 4] = [0x0a, 0x0d, 0x0d, 0x0a];

/// Buffer size handed to the streaming readers.
pub const PCAP_READER_BUFFER_SIZE: usize = 64 * 1024;
