pub const DST_MAC_OFFSET: usize = 0;
pub const SRC_MAC_OFFSET: usize = 6;
pub const ETHERTYPE_OFFSET: usize = 12;
pub const DSAP_OFFSET: usize = 14;
pub const SSAP_OFFSET: usize = 15;
pub const CONTROL_OFFSET: usize = 16;
pub const SNAP_ORG_OFFSET: usize = 17;
pub const SNAP_TYPE_OFFSET: usize = 20;

/// Ethernet-II payload, and 802.3 LLC start.
pub const PAYLOAD_OFFSET: usize = 14;
/// 802.3 payload after a one-byte LLC control field.
pub const LLC_PAYLOAD_OFFSET: usize = 17;
/// 802.3/SNAP payload.
pub const SNAP_PAYLOAD_OFFSET: usize = 22;

/// Values at [12, 14) above this are EtherTypes, not 802.3 lengths.
pub const ETHERTYPE_THRESHOLD: u16 = 1500;
/// A frame needs more than this many bytes to carry either format.
pub const MIN_FRAME_LEN: usize = 18;

pub const ETHERTYPE_IPV4: u16 = 0x0800;
pub const ETHERTYPE_ARP: u16 = 0x0806;
pub const ETHERTYPE_IPV6: u16 = 0x86dd;
pub const ETHERTYPE_LLDP: u16 = 0x88cc;

pub const DSAP_BPDU: u8 = 0x42;
pub const DSAP_SNAP: u8 = 0xaa;
pub const SNAP_ORG_CISCO: u32 = 0x00000c;
pub const SNAP_TYPE_CDP: u16 = 0x2000;
