use std::net::{Ipv4Addr, Ipv6Addr};
use std::ops::Range;

use thiserror::Error;

use crate::fields::FieldRange;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("buffer too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("invalid UTF-8 in byte range {start}..{end}")]
    InvalidUtf8 { start: usize, end: usize },
}

/// Bounds-checked reader over a byte slice.
///
/// The reader carries the slice's absolute origin in the original capture
/// buffer so field-provenance ranges recorded through [`ByteReader::abs`]
/// always index the buffer handed to `Frame::decode`, not the sub-slice.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    origin: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, origin: 0 }
    }

    pub fn with_origin(data: &'a [u8], origin: usize) -> Self {
        Self { data, origin }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Map a local range to an absolute [`FieldRange`].
    pub fn abs(&self, range: Range<usize>) -> FieldRange {
        FieldRange::new(self.origin + range.start, self.origin + range.end)
    }

    pub fn require(&self, needed: usize) -> Result<(), WireError> {
        if self.data.len() < needed {
            return Err(WireError::TooShort {
                needed,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    pub fn u8_at(&self, offset: usize) -> Result<u8, WireError> {
        self.data.get(offset).copied().ok_or(WireError::TooShort {
            needed: offset + 1,
            actual: self.data.len(),
        })
    }

    pub fn u16_be(&self, offset: usize) -> Result<u16, WireError> {
        let bytes = self.slice(offset..offset + 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn u32_be(&self, offset: usize) -> Result<u32, WireError> {
        let bytes = self.slice(offset..offset + 4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn u64_be(&self, offset: usize) -> Result<u64, WireError> {
        let bytes = self.slice(offset..offset + 8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_be_bytes(raw))
    }

    pub fn slice(&self, range: Range<usize>) -> Result<&'a [u8], WireError> {
        self.data.get(range.clone()).ok_or(WireError::TooShort {
            needed: range.end,
            actual: self.data.len(),
        })
    }

    /// Remaining bytes from `from` to the end; empty when `from` is at or
    /// past the end of the slice.
    pub fn tail(&self, from: usize) -> &'a [u8] {
        self.data.get(from..).unwrap_or(&[])
    }

    /// Sub-reader over `range`, with the origin shifted accordingly.
    pub fn sub(&self, range: Range<usize>) -> Result<ByteReader<'a>, WireError> {
        let origin = self.origin + range.start;
        Ok(ByteReader::with_origin(self.slice(range)?, origin))
    }

    /// Sub-reader over everything from `from` to the end.
    pub fn sub_tail(&self, from: usize) -> ByteReader<'a> {
        ByteReader::with_origin(self.tail(from), self.origin + from)
    }

    /// Six bytes rendered as colon-separated lowercase hex octets.
    pub fn mac(&self, offset: usize) -> Result<String, WireError> {
        let bytes = self.slice(offset..offset + 6)?;
        Ok(format_mac(bytes))
    }

    /// Three-byte OUI rendered as colon-separated lowercase hex octets.
    pub fn oui(&self, offset: usize) -> Result<String, WireError> {
        let bytes = self.slice(offset..offset + 3)?;
        Ok(bytes
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(":"))
    }

    pub fn utf8(&self, range: Range<usize>) -> Result<String, WireError> {
        let start = range.start;
        let end = range.end;
        let bytes = self.slice(range)?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| WireError::InvalidUtf8 {
                start: self.origin + start,
                end: self.origin + end,
            })
    }

    pub fn ipv4(&self, offset: usize) -> Result<Ipv4Addr, WireError> {
        let bytes = self.slice(offset..offset + 4)?;
        Ok(Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3]))
    }

    pub fn ipv6(&self, offset: usize) -> Result<Ipv6Addr, WireError> {
        let bytes = self.slice(offset..offset + 16)?;
        let mut raw = [0u8; 16];
        raw.copy_from_slice(bytes);
        Ok(Ipv6Addr::from(raw))
    }
}

/// Render six bytes as a colon-separated lowercase MAC string.
pub fn format_mac(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Split a NUL-delimited byte region into its UTF-8 substrings.
///
/// Empty segments produced by consecutive NULs are dropped; a segment with
/// invalid UTF-8 drops only that segment.
pub fn split_c_strings(bytes: &[u8]) -> Vec<String> {
    bytes
        .split(|b| *b == 0)
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| std::str::from_utf8(segment).ok().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ByteReader, WireError, format_mac, split_c_strings};

    #[test]
    fn big_endian_extraction() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0];
        let reader = ByteReader::new(&data);
        assert_eq!(reader.u16_be(0).unwrap(), 0x1234);
        assert_eq!(reader.u32_be(0).unwrap(), 0x1234_5678);
        assert_eq!(reader.u64_be(0).unwrap(), 0x1234_5678_9abc_def0);
    }

    #[test]
    fn out_of_bounds_reports_needed() {
        let data = [0u8; 3];
        let reader = ByteReader::new(&data);
        let err = reader.u32_be(0).unwrap_err();
        assert!(matches!(err, WireError::TooShort { needed: 4, actual: 3 }));
    }

    #[test]
    fn mac_rendering() {
        let data = [0x68, 0x5b, 0x35, 0x89, 0x0a, 0x04];
        assert_eq!(format_mac(&data), "68:5b:35:89:0a:04");
        let reader = ByteReader::new(&data);
        assert_eq!(reader.mac(0).unwrap(), "68:5b:35:89:0a:04");
    }

    #[test]
    fn sub_reader_shifts_origin() {
        let data = [0u8; 32];
        let reader = ByteReader::with_origin(&data, 14);
        let sub = reader.sub(4..12).unwrap();
        assert_eq!(sub.origin(), 18);
        assert_eq!(sub.abs(0..2).start, 18);
    }

    #[test]
    fn tail_is_empty_past_end() {
        let data = [1u8, 2, 3];
        let reader = ByteReader::new(&data);
        assert_eq!(reader.tail(2), &[3]);
        assert!(reader.tail(3).is_empty());
        assert!(reader.tail(10).is_empty());
    }

    #[test]
    fn c_string_split() {
        let bytes = b"eth0\0\0lab-switch\0";
        assert_eq!(split_c_strings(bytes), vec!["eth0", "lab-switch"]);
    }
}
