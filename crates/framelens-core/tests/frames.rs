//! Whole-frame dissection scenarios over literal hex captures.

use std::net::Ipv4Addr;

use framelens_core::fields::FieldId;
use framelens_core::layers::{Layer3, Layer4};
use framelens_core::protocols::arp::ArpOperation;
use framelens_core::protocols::cdp::{CdpType, decode_cdp};
use framelens_core::protocols::icmp6::{Icmp6Option, Icmp6Type};
use framelens_core::wire::parse_hex;
use framelens_core::{FrameFormat, decode_frame};

const IPV4_TCP_FRAME: &str = concat!(
    "685b35890a04c869cd2c0d500800",     // ethernet-ii, ipv4
    "45000034000040004006b95f",         // total length 52, ttl 64, tcp
    "c0a80010c0a8000a",
    "c001005000000001000000008002 0804", // data offset 8, syn
    "000000000101080a872fd3281be79ab6",
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
    "00010010346337313063313965333064", // device id "4c710c19e30d"
    "0002001100000001",
    "0101cc0004c0a80020",
    "0004000800000009",                 // router + switch
);

const ARP_REQUEST_FRAME: &str = concat!(
    "ffffffffffff685b35890a040806",
    "0001080006040001",
    "685b35890a04c0a8000a",
    "000000000000c0a8000b",
);

const ICMP6_NS_FRAME: &str = concat!(
    "3333ff5bad67b07fb95d8ed286dd",
    "6000000000203aff",
    "fe800000000000000000000000000001",
    "ff0200000000000000000001ff5bad67",
    "8700673c00000000",
    "fe800000000000001867ff5dd25bad67",
    "0101b07fb95d8ed2",
);

fn frame_bytes(hex: &str) -> Vec<u8> {
    parse_hex(&hex.replace(' ', "")).unwrap()
}

#[test]
fn ethernet_ii_ipv4_tcp() {
    let data = frame_bytes(IPV4_TCP_FRAME);
    assert_eq!(data.len(), 66);
    let frame = decode_frame(&data, None, data.len() as u32, Some(1));

    assert_eq!(frame.frame_format, FrameFormat::Ethernet);
    assert_eq!(frame.dst_mac, "68:5b:35:89:0a:04");
    assert_eq!(frame.src_mac, "c8:69:cd:2c:0d:50");
    assert_eq!(frame.ethertype, Some(0x0800));

    let Layer3::Ipv4(ipv4) = &frame.layer3 else {
        panic!("expected ipv4");
    };
    assert_eq!(ipv4.source, Ipv4Addr::new(192, 168, 0, 16));
    assert_eq!(ipv4.destination, Ipv4Addr::new(192, 168, 0, 10));
    assert_eq!(ipv4.ttl, 64);
    assert_eq!(ipv4.ip_protocol, 6);
    assert_eq!(ipv4.total_length, 52);
    assert!(matches!(ipv4.layer4, Layer4::Tcp(_)));
}

#[test]
fn ieee_8023_bpdu() {
    let data = frame_bytes(BPDU_FRAME);
    let frame = decode_frame(&data, None, data.len() as u32, None);

    assert_eq!(frame.frame_format, FrameFormat::Ieee8023);
    assert_eq!(frame.ieee_dsap, Some(0x42));

    let Layer3::Bpdu(bpdu) = &frame.layer3 else {
        panic!("expected bpdu");
    };
    assert_eq!(bpdu.root_id, 0x80004c710c19e30d);
    assert_eq!(bpdu.bridge_id, 0x80004c710c19e30d);
    assert_eq!(bpdu.port_role, 3);
    assert_eq!(bpdu.max_age, 20.0);
    assert_eq!(bpdu.hello_time, 2.0);
    assert_eq!(bpdu.forward_delay, 15.0);
}

#[test]
fn snap_cdp_capabilities_and_address() {
    let data = frame_bytes(CDP_FRAME);
    let frame = decode_frame(&data, None, data.len() as u32, None);

    assert_eq!(frame.snap_org, Some(0x00000c));
    assert_eq!(frame.snap_type, Some(0x2000));

    let Layer3::Cdp(cdp) = &frame.layer3 else {
        panic!("expected cdp");
    };
    assert!(
        cdp.values
            .iter()
            .any(|v| v.cdp_type == CdpType::DeviceId("4c710c19e30d".to_string()))
    );
    assert_eq!(cdp.ipv4_addresses(), vec![Ipv4Addr::new(192, 168, 0, 32)]);
    assert!(cdp.values.iter().any(|v| v.cdp_type == CdpType::CapabilityRouter));
    assert!(cdp.values.iter().any(|v| v.cdp_type == CdpType::CapabilitySwitch));
    assert!(!cdp.values.iter().any(|v| v.cdp_type == CdpType::CapabilityBridge));
}

#[test]
fn arp_request() {
    let data = frame_bytes(ARP_REQUEST_FRAME);
    let frame = decode_frame(&data, None, data.len() as u32, None);

    assert_eq!(frame.ethertype, Some(0x0806));
    let Layer3::Arp(arp) = &frame.layer3 else {
        panic!("expected arp");
    };
    assert_eq!(arp.operation, ArpOperation::Request);
    assert_eq!(arp.sender_ip, Ipv4Addr::new(192, 168, 0, 10));
    assert_eq!(arp.target_ip, Ipv4Addr::new(192, 168, 0, 11));
}

#[test]
fn ipv6_neighbor_solicitation() {
    let data = frame_bytes(ICMP6_NS_FRAME);
    let frame = decode_frame(&data, None, data.len() as u32, None);

    assert_eq!(frame.ethertype, Some(0x86dd));
    let Layer3::Ipv6(ipv6) = &frame.layer3 else {
        panic!("expected ipv6");
    };
    let Layer4::Icmp6(icmp) = &ipv6.layer4 else {
        panic!("expected icmpv6");
    };
    assert_eq!(icmp.message_type, 135);
    assert_eq!(icmp.code, 0);
    let Icmp6Type::NeighborSolicitation { target } = &icmp.icmp_type else {
        panic!("expected neighbor solicitation");
    };
    assert_eq!(target.to_string(), "fe80::1867:ff5d:d25b:ad67");
    assert_eq!(
        icmp.options,
        vec![Icmp6Option::SourceLinkAddress("b0:7f:b9:5d:8e:d2".to_string())]
    );
}

#[test]
fn decoded_frame_serializes_to_json() {
    let data = frame_bytes(ARP_REQUEST_FRAME);
    let frame = decode_frame(&data, Some(1_583_020_800.0), data.len() as u32, Some(7));

    let json = serde_json::to_value(&frame).unwrap();
    assert_eq!(json["number"], 7);
    assert_eq!(json["frame_format"], "ethernet");
    assert_eq!(json["src_mac"], "68:5b:35:89:0a:04");
    assert_eq!(json["layer3"]["arp"]["operation"], "request");
    assert_eq!(json["layer3"]["arp"]["sender_ip"], "192.168.0.10");
    // Raw capture bytes stay out of the serialized tree.
    assert!(json.get("data").is_none());
}

// Classification hinges on the big-endian u16 at [12, 14): above 1500 is an
// EtherType, at or below it is an 802.3 length.
#[test]
fn classification_threshold_boundary() {
    let mut data = vec![0u8; 60];

    data[12] = 0x05;
    data[13] = 0xdc; // 1500
    let frame = decode_frame(&data, None, 60, None);
    assert_eq!(frame.frame_format, FrameFormat::Ieee8023);

    data[13] = 0xdd; // 1501
    let frame = decode_frame(&data, None, 60, None);
    assert_eq!(frame.frame_format, FrameFormat::Ethernet);
}

// Every recorded field range indexes the original capture buffer, even for
// fields extracted deep inside nested sub-slices.
#[test]
fn field_ranges_reconstruct_source_bytes() {
    let data = frame_bytes(IPV4_TCP_FRAME);
    let frame = decode_frame(&data, None, data.len() as u32, None);

    let ethertype = frame.fields().get(FieldId::EtherType).unwrap();
    assert_eq!(&data[ethertype.start..ethertype.end], &[0x08, 0x00]);

    let Layer3::Ipv4(ipv4) = &frame.layer3 else {
        panic!("expected ipv4");
    };
    let destination = ipv4.fields().get(FieldId::DestinationAddress).unwrap();
    assert_eq!(
        &data[destination.start..destination.end],
        &[0xc0, 0xa8, 0x00, 0x0a]
    );

    let Layer4::Tcp(tcp) = &ipv4.layer4 else {
        panic!("expected tcp");
    };
    let source_port = tcp.fields().get(FieldId::SourcePort).unwrap();
    assert_eq!((source_port.start, source_port.end), (34, 36));
    assert_eq!(&data[source_port.start..source_port.end], &[0xc0, 0x01]);
}

// Truncating a CDP body at a TLV boundary yields a prefix of the full
// value list.
#[test]
fn cdp_truncation_yields_prefix() {
    const BODY: &str = concat!(
        "02b4abcd",
        "00010010346337313063313965333064",
        "0002001100000001",
        "0101cc0004c0a80020",
        "0004000800000009",
    );
    let body = frame_bytes(BODY);
    // Device id, address, and the capabilities TLV expanded per bit.
    let full = decode_cdp(&body).unwrap();
    assert_eq!(full.values.len(), 4);

    // Boundaries after each TLV.
    for (boundary, expected) in [(20, 1), (37, 2), (45, 4)] {
        let partial = decode_cdp(&body[..boundary]).unwrap();
        assert_eq!(partial.values.len(), expected);
        for (a, b) in partial.values.iter().zip(full.values.iter()) {
            assert_eq!(a.cdp_type, b.cdp_type);
        }
    }
}
