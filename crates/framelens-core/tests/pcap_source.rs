use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use framelens_core::{PacketSource, PcapFileSource, SourceError};

fn temp_path(suffix: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("framelens_{unique}_{suffix}"));
    path
}

/// Little-endian legacy pcap: global header plus the given records.
fn legacy_pcap(records: &[(u32, u32, u32, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&0xa1b2c3d4u32.to_le_bytes()); // magic
    out.extend_from_slice(&2u16.to_le_bytes()); // version major
    out.extend_from_slice(&4u16.to_le_bytes()); // version minor
    out.extend_from_slice(&0i32.to_le_bytes()); // thiszone
    out.extend_from_slice(&0u32.to_le_bytes()); // sigfigs
    out.extend_from_slice(&65535u32.to_le_bytes()); // snaplen
    out.extend_from_slice(&1u32.to_le_bytes()); // linktype ethernet
    for (ts_sec, ts_usec, orig_len, data) in records {
        out.extend_from_slice(&ts_sec.to_le_bytes());
        out.extend_from_slice(&ts_usec.to_le_bytes());
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(&orig_len.to_le_bytes());
        out.extend_from_slice(data);
    }
    out
}

#[test]
fn legacy_pcap_yields_packet_events() {
    let frame_a = [0xaau8; 60];
    let frame_b = [0xbbu8; 42];
    let bytes = legacy_pcap(&[
        (1_583_020_800, 500_000, 60, &frame_a),
        (1_583_020_801, 0, 128, &frame_b),
    ]);

    let path = temp_path("legacy.pcap");
    fs::write(&path, &bytes).unwrap();
    let mut source = PcapFileSource::open(&path).unwrap();

    let first = source.next_packet().unwrap().unwrap();
    assert_eq!(first.data, frame_a);
    assert_eq!(first.original_length, 60);
    assert!((first.ts.unwrap() - 1_583_020_800.5).abs() < 1e-6);

    // Truncated capture: original length exceeds the captured bytes.
    let second = source.next_packet().unwrap().unwrap();
    assert_eq!(second.data.len(), 42);
    assert_eq!(second.original_length, 128);

    assert!(source.next_packet().unwrap().is_none());
    let _ = fs::remove_file(&path);
}

#[test]
fn pcap_source_rejects_truncated_file() {
    let path = temp_path("truncated.pcapng");
    fs::write(&path, [0x0a, 0x0d, 0x0d]).unwrap();
    let err = match PcapFileSource::open(&path) {
        Ok(_) => panic!("expected truncated file to be rejected"),
        Err(err) => err,
    };
    let _ = fs::remove_file(&path);

    assert!(matches!(err, SourceError::Io(_)));
}
