//! Field-provenance bookkeeping.
//!
//! Every decoder records, per logical field, the `[start, end)` byte range
//! in the *original* capture buffer that produced the field's value. The
//! display layer uses these ranges for interactive byte highlighting.
//!
//! Ranges are absolute: a decoder working on a sub-slice carries the
//! slice's origin offset (see `wire::reader::ByteReader`) so recorded
//! ranges always index the buffer handed to `Frame::decode`.

use serde::Serialize;

/// Logical field identifiers across all decoders.
///
/// Identifiers are shared where the concept is shared (ports, checksums,
/// addresses); each decoder keeps its own [`FieldMap`], so reuse across
/// protocols is unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldId {
    // Frame
    DstMac,
    SrcMac,
    EtherType,
    IeeeLength,
    IeeeDsap,
    IeeeSsap,
    IeeeControl,
    SnapOrg,
    SnapType,
    Padding,
    // ARP
    HardwareType,
    ProtocolType,
    HardwareSize,
    ProtocolSize,
    Operation,
    SenderEthernet,
    SenderIp,
    TargetEthernet,
    TargetIp,
    // BPDU
    ProtocolId,
    BpduVersion,
    BpduType,
    Flags,
    RootId,
    RootCost,
    BridgeId,
    PortId,
    Age,
    MaxAge,
    HelloTime,
    ForwardDelay,
    V1Length,
    // IPv4 / IPv6
    Version,
    Ihl,
    Dscp,
    Ecn,
    TotalLength,
    Identification,
    FragmentFlags,
    FragmentOffset,
    Ttl,
    IpProtocol,
    HeaderChecksum,
    SourceAddress,
    DestinationAddress,
    Options,
    TrafficClass,
    FlowLabel,
    PayloadLength,
    NextHeader,
    HopLimit,
    // TCP / UDP
    SourcePort,
    DestinationPort,
    SequenceNumber,
    AcknowledgementNumber,
    DataOffset,
    Window,
    Checksum,
    UrgentPointer,
    Length,
    Payload,
    // ICMP
    Type,
    Code,
    Identifier,
    Sequence,
    Pointer,
    Mask,
    Gateway,
    Target,
    Destination,
    OriginateTimestamp,
    ReceiveTimestamp,
    TransmitTimestamp,
    // IGMP
    MaxResponseTime,
    GroupAddress,
    Robustness,
    QueryInterval,
    NumberOfSources,
    NumberOfGroupRecords,
}

/// Absolute `[start, end)` byte range into the original capture buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldRange {
    pub start: usize,
    pub end: usize,
}

impl FieldRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Insert-once ordered map from [`FieldId`] to [`FieldRange`].
///
/// Populated during construction of a decoded value and never mutated
/// afterwards; lookups are linear over a short fixed list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldMap(Vec<(FieldId, FieldRange)>);

impl FieldMap {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn insert(&mut self, id: FieldId, range: FieldRange) {
        self.0.push((id, range));
    }

    pub fn get(&self, id: FieldId) -> Option<FieldRange> {
        self.0
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, range)| *range)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(FieldId, FieldRange)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
