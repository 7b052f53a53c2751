use std::fmt;

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::layout;
use crate::fields::{FieldId, FieldMap};
use crate::layers::{Layer3, Layer4, Unknown};
use crate::protocols::{arp, bpdu, cdp, ipv4, ipv6, lldp};
use crate::wire::ByteReader;

/// How the bytes at [12, 14) classified the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameFormat {
    /// Ethernet-II: [12, 14) is an EtherType.
    Ethernet,
    /// IEEE 802.3: [12, 14) is a length, LLC header follows.
    Ieee8023,
    /// Too short to carry either format.
    Invalid,
}

impl fmt::Display for FrameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameFormat::Ethernet => f.write_str("Ethernet-II"),
            FrameFormat::Ieee8023 => f.write_str("802.3"),
            FrameFormat::Invalid => f.write_str("invalid"),
        }
    }
}

/// One captured link-layer frame and everything decoded from it.
///
/// `number` is a caller-assigned display counter; the decoder never
/// numbers frames itself.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub number: Option<u64>,
    /// Capture timestamp in epoch seconds.
    pub timestamp: Option<f64>,
    /// Length on the wire, which may exceed what was captured.
    pub original_length: u32,
    pub src_mac: String,
    pub dst_mac: String,
    pub frame_format: FrameFormat,
    pub ethertype: Option<u16>,
    pub ieee_length: Option<u16>,
    pub ieee_dsap: Option<u8>,
    pub ieee_ssap: Option<u8>,
    pub ieee_control: Option<u8>,
    pub snap_org: Option<u32>,
    pub snap_type: Option<u16>,
    /// Trailer bytes past the encapsulated datagram's declared length.
    pub padding: Vec<u8>,
    pub layer3: Layer3,
    #[serde(skip)]
    pub data: Vec<u8>,
    fields: FieldMap,
}

impl Frame {
    /// Decode a captured buffer. Never fails: unclassifiable content
    /// lands in `Layer3::Unknown`.
    pub fn decode(
        data: &[u8],
        timestamp: Option<f64>,
        original_length: u32,
        number: Option<u64>,
    ) -> Frame {
        parse_frame(data, timestamp, original_length, number)
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Transport layer of the encapsulated datagram. `NoLayer4` for
    /// content that structurally has none (ARP, BPDU, CDP, LLDP,
    /// unclassified residue).
    pub fn layer4(&self) -> &Layer4 {
        static NO_LAYER4: Layer4 = Layer4::NoLayer4;
        match &self.layer3 {
            Layer3::Ipv4(ipv4) => &ipv4.layer4,
            Layer3::Ipv6(ipv6) => &ipv6.layer4,
            _ => &NO_LAYER4,
        }
    }

    /// RFC 3339 rendering of the capture timestamp.
    pub fn timestamp_string(&self) -> Option<String> {
        let timestamp = self.timestamp?;
        let nanos = (timestamp * 1_000_000_000.0) as i128;
        let datetime = OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()?;
        datetime.format(&Rfc3339).ok()
    }

    pub fn verbose_description(&self) -> String {
        let mut description = match self.frame_format {
            FrameFormat::Ethernet => format!(
                "{} > {} {} ethertype 0x{:04x}",
                self.src_mac,
                self.dst_mac,
                self.frame_format,
                self.ethertype.unwrap_or(0)
            ),
            FrameFormat::Ieee8023 => format!(
                "{} > {} {} length {} dsap 0x{:02x} ssap 0x{:02x}",
                self.src_mac,
                self.dst_mac,
                self.frame_format,
                self.ieee_length.unwrap_or(0),
                self.ieee_dsap.unwrap_or(0),
                self.ieee_ssap.unwrap_or(0)
            ),
            FrameFormat::Invalid => format!("invalid frame {} bytes", self.data.len()),
        };
        description.push(' ');
        description.push_str(&self.layer3.verbose_description());
        description
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} > {} {}",
            self.src_mac, self.dst_mac, self.layer3
        )
    }
}

/// Decode one captured frame.
pub fn decode_frame(
    data: &[u8],
    timestamp: Option<f64>,
    original_length: u32,
    number: Option<u64>,
) -> Frame {
    Frame::decode(data, timestamp, original_length, number)
}

fn parse_frame(
    data: &[u8],
    timestamp: Option<f64>,
    original_length: u32,
    number: Option<u64>,
) -> Frame {
    let reader = ByteReader::new(data);
    let mut fields = FieldMap::new();

    if data.len() < layout::MIN_FRAME_LEN {
        return Frame {
            number,
            timestamp,
            original_length,
            src_mac: "unknown".to_string(),
            dst_mac: "unknown".to_string(),
            frame_format: FrameFormat::Invalid,
            ethertype: None,
            ieee_length: None,
            ieee_dsap: None,
            ieee_ssap: None,
            ieee_control: None,
            snap_org: None,
            snap_type: None,
            padding: Vec::new(),
            layer3: Layer3::Unknown(Unknown::empty()),
            data: data.to_vec(),
            fields,
        };
    }

    // Length checked above; these reads cannot fail.
    let dst_mac = reader.mac(layout::DST_MAC_OFFSET).unwrap_or_default();
    let src_mac = reader.mac(layout::SRC_MAC_OFFSET).unwrap_or_default();
    let type_or_length = reader.u16_be(layout::ETHERTYPE_OFFSET).unwrap_or_default();
    fields.insert(FieldId::DstMac, reader.abs(0..6));
    fields.insert(FieldId::SrcMac, reader.abs(6..12));

    let mut frame = Frame {
        number,
        timestamp,
        original_length,
        src_mac,
        dst_mac,
        frame_format: FrameFormat::Ethernet,
        ethertype: None,
        ieee_length: None,
        ieee_dsap: None,
        ieee_ssap: None,
        ieee_control: None,
        snap_org: None,
        snap_type: None,
        padding: Vec::new(),
        layer3: Layer3::Unknown(Unknown::empty()),
        data: data.to_vec(),
        fields,
    };

    if type_or_length > layout::ETHERTYPE_THRESHOLD {
        frame.ethertype = Some(type_or_length);
        frame.fields.insert(FieldId::EtherType, reader.abs(12..14));
        decode_ethernet(&mut frame, &reader, type_or_length);
    } else {
        frame.frame_format = FrameFormat::Ieee8023;
        frame.ieee_length = Some(type_or_length);
        frame.fields.insert(FieldId::IeeeLength, reader.abs(12..14));
        decode_ieee8023(&mut frame, &reader);
    }

    frame
}

fn decode_ethernet(frame: &mut Frame, reader: &ByteReader<'_>, ethertype: u16) {
    let payload = reader.sub_tail(layout::PAYLOAD_OFFSET);
    frame.layer3 = match ethertype {
        layout::ETHERTYPE_IPV4 => ipv4::parser::parse_ipv4(payload)
            .map(Layer3::Ipv4)
            .unwrap_or_else(|_| Layer3::Unknown(Unknown::new(payload.as_slice()))),
        layout::ETHERTYPE_ARP => arp::parser::parse_arp(payload)
            .map(Layer3::Arp)
            .unwrap_or_else(|_| Layer3::Unknown(Unknown::new(payload.as_slice()))),
        layout::ETHERTYPE_IPV6 => ipv6::parser::parse_ipv6(payload)
            .map(Layer3::Ipv6)
            .unwrap_or_else(|_| Layer3::Unknown(Unknown::new(payload.as_slice()))),
        layout::ETHERTYPE_LLDP => lldp::parser::parse_lldp(payload)
            .map(Layer3::Lldp)
            .unwrap_or_else(|_| Layer3::Unknown(Unknown::new(payload.as_slice()))),
        _ => Layer3::Unknown(Unknown::new(payload.as_slice())),
    };

    // IP datagrams shorter than the frame leave a link-layer trailer;
    // the inner parser already isolated it.
    let padding = match &frame.layer3 {
        Layer3::Ipv4(ipv4) => ipv4.padding.clone(),
        Layer3::Ipv6(ipv6) => ipv6.padding.clone(),
        _ => Vec::new(),
    };
    if !padding.is_empty() {
        let start = reader.len() - padding.len();
        frame
            .fields
            .insert(FieldId::Padding, reader.abs(start..reader.len()));
        frame.padding = padding;
    }
}

fn decode_ieee8023(frame: &mut Frame, reader: &ByteReader<'_>) {
    let Ok(dsap) = reader.u8_at(layout::DSAP_OFFSET) else {
        return;
    };
    let ssap = reader.u8_at(layout::SSAP_OFFSET).unwrap_or_default();
    let control = reader.u8_at(layout::CONTROL_OFFSET).unwrap_or_default();
    frame.ieee_dsap = Some(dsap);
    frame.ieee_ssap = Some(ssap);
    frame.ieee_control = Some(control);
    frame.fields.insert(FieldId::IeeeDsap, reader.abs(14..15));
    frame.fields.insert(FieldId::IeeeSsap, reader.abs(15..16));
    frame.fields.insert(FieldId::IeeeControl, reader.abs(16..17));

    match dsap {
        layout::DSAP_BPDU => {
            let payload = reader.sub_tail(layout::LLC_PAYLOAD_OFFSET);
            frame.layer3 = bpdu::parser::parse_bpdu(payload)
                .map(Layer3::Bpdu)
                .unwrap_or_else(|_| Layer3::Unknown(Unknown::new(payload.as_slice())));
        }
        layout::DSAP_SNAP => decode_snap(frame, reader),
        _ => {
            let payload = reader.sub_tail(layout::LLC_PAYLOAD_OFFSET);
            frame.layer3 = Layer3::Unknown(Unknown::new(payload.as_slice()));
        }
    }
}

fn decode_snap(frame: &mut Frame, reader: &ByteReader<'_>) {
    let (Ok(org_bytes), Ok(snap_type)) = (
        reader.slice(layout::SNAP_ORG_OFFSET..layout::SNAP_TYPE_OFFSET),
        reader.u16_be(layout::SNAP_TYPE_OFFSET),
    ) else {
        let payload = reader.sub_tail(layout::LLC_PAYLOAD_OFFSET);
        frame.layer3 = Layer3::Unknown(Unknown::new(payload.as_slice()));
        return;
    };
    let snap_org =
        (u32::from(org_bytes[0]) << 16) | (u32::from(org_bytes[1]) << 8) | u32::from(org_bytes[2]);
    frame.snap_org = Some(snap_org);
    frame.snap_type = Some(snap_type);
    frame.fields.insert(FieldId::SnapOrg, reader.abs(17..20));
    frame.fields.insert(FieldId::SnapType, reader.abs(20..22));

    let payload = reader.sub_tail(layout::SNAP_PAYLOAD_OFFSET);
    if snap_org == layout::SNAP_ORG_CISCO && snap_type == layout::SNAP_TYPE_CDP {
        frame.layer3 = cdp::parser::parse_cdp(payload)
            .map(Layer3::Cdp)
            .unwrap_or_else(|_| Layer3::Unknown(Unknown::new(payload.as_slice())));
    } else {
        frame.layer3 = Layer3::Unknown(Unknown::new(payload.as_slice()));
    }
}

#[cfg(test)]
mod tests {
    use super::{Frame, FrameFormat};
    use crate::fields::FieldId;
    use crate::layers::{Layer3, Layer4};
    use crate::wire::parse_hex;

    const TCP_FRAME: &str = concat!(
        "685b35890a04b07fb95d8ed20800",     // ethernet-ii, ipv4
        "450000340000400040061234",         // ihl 5, total length 52, tcp
        "c0a8000ac0a8000b",
        "c001de7ebc1aa99e868a316380100804", // tcp header
        "203100000101080a872fd3281be79ab6",
    );

    const BPDU_FRAME: &str = concat!(
        "0180c20000004c710c19e3120027424203", // 802.3 length 0x27, dsap 0x42
        "000002023c80004c710c19e30d00000000",
        "80004c710c19e30d80010000140002000f",
        "0000",
    );

    const CDP_FRAME: &str = concat!(
        "01000ccccccc4c710c19e30d0035",     // 802.3 length 0x35
        "aaaa03",                           // llc snap
        "00000c2000",                       // cisco, cdp
        "02b4abcd",
        "00010010346337313063313965333064",
        "0002001100000001",
        "0101cc0004c0a80020",
        "0004000800000009",
    );

    #[test]
    fn ethernet_ii_tcp_frame() {
        let data = parse_hex(TCP_FRAME).unwrap();
        let frame = Frame::decode(&data, Some(1583020800.5), data.len() as u32, Some(1));
        assert_eq!(frame.frame_format, FrameFormat::Ethernet);
        assert_eq!(frame.src_mac, "b0:7f:b9:5d:8e:d2");
        assert_eq!(frame.dst_mac, "68:5b:35:89:0a:04");
        assert_eq!(frame.ethertype, Some(0x0800));
        let Layer3::Ipv4(ipv4) = &frame.layer3 else {
            panic!("expected ipv4");
        };
        let Layer4::Tcp(tcp) = &ipv4.layer4 else {
            panic!("expected tcp");
        };
        assert_eq!(tcp.source_port, 49153);
        assert_eq!(tcp.destination_port, 56958);
        // Provenance: source port bytes sit at [34, 36) of the frame.
        let range = tcp.fields().get(FieldId::SourcePort).unwrap();
        assert_eq!((range.start, range.end), (34, 36));
        assert_eq!(&data[range.start..range.end], &[0xc0, 0x01]);
    }

    #[test]
    fn ieee_8023_bpdu_frame() {
        let data = parse_hex(BPDU_FRAME).unwrap();
        let frame = Frame::decode(&data, None, data.len() as u32, None);
        assert_eq!(frame.frame_format, FrameFormat::Ieee8023);
        assert_eq!(frame.ieee_length, Some(0x27));
        assert_eq!(frame.ieee_dsap, Some(0x42));
        assert!(matches!(frame.layer3, Layer3::Bpdu(_)));
    }

    #[test]
    fn layer4_accessor_reaches_transport() {
        let data = parse_hex(TCP_FRAME).unwrap();
        let frame = Frame::decode(&data, None, data.len() as u32, None);
        assert!(matches!(frame.layer4(), Layer4::Tcp(_)));

        let data = parse_hex(BPDU_FRAME).unwrap();
        let frame = Frame::decode(&data, None, data.len() as u32, None);
        assert!(matches!(frame.layer4(), Layer4::NoLayer4));
    }

    #[test]
    fn ieee_8023_snap_cdp_frame() {
        let data = parse_hex(CDP_FRAME).unwrap();
        let frame = Frame::decode(&data, None, data.len() as u32, None);
        assert_eq!(frame.frame_format, FrameFormat::Ieee8023);
        assert_eq!(frame.snap_org, Some(0x00000c));
        assert_eq!(frame.snap_type, Some(0x2000));
        let Layer3::Cdp(cdp) = &frame.layer3 else {
            panic!("expected cdp");
        };
        assert_eq!(cdp.version, 2);
        // First TLV value range is absolute into the frame buffer.
        let device = &cdp.values[0];
        assert_eq!(device.range.start, 22 + 8);
    }

    #[test]
    fn short_buffer_is_invalid_framing() {
        let frame = Frame::decode(&[0u8; 17], None, 17, None);
        assert_eq!(frame.frame_format, FrameFormat::Invalid);
        assert_eq!(frame.src_mac, "unknown");
        assert_eq!(frame.dst_mac, "unknown");
        assert!(matches!(frame.layer3, Layer3::Unknown(ref u) if u.data.is_empty()));
    }

    #[test]
    fn eighteen_bytes_is_classified() {
        let mut data = vec![0u8; 18];
        data[12] = 0x08;
        data[13] = 0x00;
        let frame = Frame::decode(&data, None, 18, None);
        assert_eq!(frame.frame_format, FrameFormat::Ethernet);
        // Four payload bytes cannot hold an IPv4 header.
        assert!(matches!(frame.layer3, Layer3::Unknown(ref u) if u.data.len() == 4));
    }

    #[test]
    fn unknown_ethertype_keeps_payload() {
        let data = parse_hex("685b35890a04b07fb95d8ed288b5deadbeefdeadbeef").unwrap();
        let frame = Frame::decode(&data, None, data.len() as u32, None);
        assert_eq!(frame.ethertype, Some(0x88b5));
        assert!(matches!(frame.layer3, Layer3::Unknown(ref u) if u.data.len() == 8));
    }

    #[test]
    fn timestamp_renders_rfc3339() {
        let data = parse_hex(TCP_FRAME).unwrap();
        let frame = Frame::decode(&data, Some(1583020800.0), data.len() as u32, None);
        assert_eq!(
            frame.timestamp_string().unwrap(),
            "2020-03-01T00:00:00Z"
        );
    }
}
