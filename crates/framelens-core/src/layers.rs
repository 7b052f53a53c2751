//! Closed sum types over the decoder outputs.
//!
//! `Layer3` / `Layer4` give callers one polymorphic surface regardless of
//! which protocol was found; the variant set is fixed and exhaustively
//! matched everywhere. `Unknown` carries undecoded residue and is the
//! uniform substitute whenever a sub-decoder fails — malformed input is a
//! routine condition, never an error at the frame level.

use std::fmt;

use serde::Serialize;

use crate::protocols::arp::Arp;
use crate::protocols::bpdu::Bpdu;
use crate::protocols::cdp::Cdp;
use crate::protocols::icmp4::Icmp4;
use crate::protocols::icmp6::Icmp6;
use crate::protocols::igmp4::Igmp4;
use crate::protocols::ipv4::Ipv4;
use crate::protocols::ipv6::Ipv6;
use crate::protocols::lldp::Lldp;
use crate::protocols::tcp::Tcp;
use crate::protocols::udp::Udp;

/// Undecoded residual bytes.
#[derive(Debug, Clone, Serialize)]
pub struct Unknown {
    pub data: Vec<u8>,
}

impl Unknown {
    pub fn new(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    pub fn empty() -> Self {
        Self { data: Vec::new() }
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} unparsed bytes", self.data.len())
    }
}

/// Everything encapsulated directly in the link-layer frame. Usually
/// network layer (IPv4, IPv6) but also encapsulated layer-2 control
/// protocols (ARP, BPDU, CDP, LLDP).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer3 {
    Ipv4(Ipv4),
    Ipv6(Ipv6),
    Arp(Arp),
    Bpdu(Bpdu),
    Cdp(Cdp),
    Lldp(Lldp),
    Unknown(Unknown),
}

impl Layer3 {
    pub fn verbose_description(&self) -> String {
        match self {
            Layer3::Ipv4(ipv4) => ipv4.verbose_description(),
            Layer3::Ipv6(ipv6) => ipv6.verbose_description(),
            Layer3::Arp(arp) => arp.verbose_description(),
            Layer3::Bpdu(bpdu) => bpdu.verbose_description(),
            Layer3::Cdp(cdp) => cdp.verbose_description(),
            Layer3::Lldp(lldp) => lldp.verbose_description(),
            Layer3::Unknown(unknown) => unknown.to_string(),
        }
    }
}

impl fmt::Display for Layer3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer3::Ipv4(ipv4) => ipv4.fmt(f),
            Layer3::Ipv6(ipv6) => ipv6.fmt(f),
            Layer3::Arp(arp) => arp.fmt(f),
            Layer3::Bpdu(bpdu) => bpdu.fmt(f),
            Layer3::Cdp(cdp) => cdp.fmt(f),
            Layer3::Lldp(lldp) => lldp.fmt(f),
            Layer3::Unknown(unknown) => unknown.fmt(f),
        }
    }
}

/// Transport layer carried inside IPv4/IPv6.
///
/// `NoLayer4` marks protocols that structurally have no transport layer
/// (ARP, BPDU, CDP, LLDP) — a valid terminal state, not an error.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer4 {
    Tcp(Tcp),
    Udp(Udp),
    Icmp4(Icmp4),
    Icmp6(Icmp6),
    Igmp4(Igmp4),
    Unknown(Unknown),
    NoLayer4,
}

impl Layer4 {
    pub fn verbose_description(&self) -> String {
        match self {
            Layer4::Tcp(tcp) => tcp.verbose_description(),
            Layer4::Udp(udp) => udp.verbose_description(),
            Layer4::Icmp4(icmp4) => icmp4.verbose_description(),
            Layer4::Icmp6(icmp6) => icmp6.verbose_description(),
            Layer4::Igmp4(igmp4) => igmp4.verbose_description(),
            Layer4::Unknown(unknown) => unknown.to_string(),
            Layer4::NoLayer4 => String::new(),
        }
    }
}

impl fmt::Display for Layer4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer4::Tcp(tcp) => tcp.fmt(f),
            Layer4::Udp(udp) => udp.fmt(f),
            Layer4::Icmp4(icmp4) => icmp4.fmt(f),
            Layer4::Icmp6(icmp6) => icmp6.fmt(f),
            Layer4::Igmp4(igmp4) => igmp4.fmt(f),
            Layer4::Unknown(unknown) => unknown.fmt(f),
            Layer4::NoLayer4 => Ok(()),
        }
    }
}
