/// Convert a contiguous hex string (e.g. `"685b3589..."`) into bytes.
///
/// Returns `None` on any non-hex character or an odd number of digits.
/// Used by the test suite to build literal packet fixtures.
pub fn parse_hex(stream: &str) -> Option<Vec<u8>> {
    if stream.len() % 2 != 0 {
        return None;
    }
    let digits = stream.as_bytes();
    let mut bytes = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks_exact(2) {
        let high = hex_digit(pair[0])?;
        let low = hex_digit(pair[1])?;
        bytes.push((high << 4) | low);
    }
    Some(bytes)
}

fn hex_digit(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

/// Render bytes as a hexdump: a `0x%04x` offset column every 16 bytes,
/// bytes grouped in pairs.
pub fn hexdump(data: &[u8]) -> String {
    let mut output = String::with_capacity(data.len() * 3);
    for (position, byte) in data.iter().enumerate() {
        if position % 16 == 0 {
            output.push_str(&format!("0x{position:04x} "));
        }
        output.push_str(&format!("{byte:02x}"));
        if position % 16 == 15 {
            output.push('\n');
        } else if position % 2 == 1 {
            output.push(' ');
        }
    }
    if !data.is_empty() && data.len() % 16 != 0 {
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::{hexdump, parse_hex};

    #[test]
    fn parse_hex_round_trip() {
        assert_eq!(
            parse_hex("685b35890a04").unwrap(),
            vec![0x68, 0x5b, 0x35, 0x89, 0x0a, 0x04]
        );
        assert_eq!(parse_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn parse_hex_rejects_non_hex() {
        assert!(parse_hex("68zz").is_none());
        assert!(parse_hex("68 5b").is_none());
    }

    #[test]
    fn parse_hex_rejects_odd_length() {
        assert!(parse_hex("685").is_none());
    }

    #[test]
    fn hexdump_pairs_and_offsets() {
        let data: Vec<u8> = (0u8..18).collect();
        let dump = hexdump(&data);
        let mut lines = dump.lines();
        assert_eq!(
            lines.next().unwrap(),
            "0x0000 0001 0203 0405 0607 0809 0a0b 0c0d 0e0f"
        );
        // A partial final line keeps the pair separator.
        assert_eq!(lines.next().unwrap(), "0x0010 1011 ");
        assert!(lines.next().is_none());
    }

    #[test]
    fn hexdump_empty() {
        assert_eq!(hexdump(&[]), "");
    }
}
