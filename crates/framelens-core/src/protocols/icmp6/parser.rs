use std::fmt;
use std::net::Ipv6Addr;

use serde::Serialize;

use super::error::Icmp6Error;
use super::layout;
use crate::fields::{FieldId, FieldMap};
use crate::wire::ByteReader;

/// A neighbor-discovery option (RFC 4861 section 4.6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icmp6Option {
    SourceLinkAddress(String),
    TargetLinkAddress(String),
    PrefixInfo {
        prefix_length: u8,
        on_link: bool,
        autoconfig: bool,
        valid_lifetime: u32,
        preferred_lifetime: u32,
        prefix: Ipv6Addr,
    },
    RedirectedHeader(Vec<u8>),
    Mtu(u32),
    Other {
        option_type: u8,
        length: usize,
    },
}

impl fmt::Display for Icmp6Option {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Icmp6Option::SourceLinkAddress(mac) => write!(f, "Source Link Address {mac}"),
            Icmp6Option::TargetLinkAddress(mac) => write!(f, "Target Link Address {mac}"),
            Icmp6Option::PrefixInfo {
                prefix_length,
                on_link,
                autoconfig,
                valid_lifetime,
                preferred_lifetime,
                prefix,
            } => write!(
                f,
                "Prefix {prefix}/{prefix_length} onlink:{on_link} autoconfig:{autoconfig} ValidLifetime {valid_lifetime} PreferredLifetime {preferred_lifetime}"
            ),
            Icmp6Option::RedirectedHeader(data) => {
                write!(f, "Redirected Header {} bytes", data.len())
            }
            Icmp6Option::Mtu(mtu) => write!(f, "MTU {mtu}"),
            Icmp6Option::Other {
                option_type,
                length,
            } => write!(f, "Other option type {option_type} length {length}"),
        }
    }
}

/// Classified ICMPv6 message, keyed on the (type, code) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icmp6Type {
    UnreachableNoRoute,
    UnreachableProhibited,
    UnreachableScope,
    UnreachableAddress,
    UnreachablePort,
    UnreachableSource,
    UnreachableRejectRoute,
    PacketTooBig,
    HopLimitExceeded,
    FragmentReassemblyTimeExceeded,
    ParameterProblem {
        code: u8,
        pointer: u32,
    },
    EchoRequest {
        identifier: u16,
        sequence: u16,
    },
    EchoReply {
        identifier: u16,
        sequence: u16,
    },
    NeighborSolicitation {
        target: Ipv6Addr,
    },
    NeighborAdvertisement {
        target: Ipv6Addr,
        router: bool,
        solicited: bool,
        override_flag: bool,
    },
    Redirect {
        target: Ipv6Addr,
        destination: Ipv6Addr,
    },
    Other {
        message_type: u8,
        code: u8,
    },
}

impl Icmp6Type {
    pub fn type_name(&self) -> &'static str {
        match self {
            Icmp6Type::UnreachableNoRoute => "Unreachable No Route",
            Icmp6Type::UnreachableProhibited => "Unreachable Admin Prohibited",
            Icmp6Type::UnreachableScope => "Unreachable Scope",
            Icmp6Type::UnreachableAddress => "Unreachable Address",
            Icmp6Type::UnreachablePort => "Unreachable Port",
            Icmp6Type::UnreachableSource => "Unreachable Source Rejected",
            Icmp6Type::UnreachableRejectRoute => "Unreachable Route Rejected",
            Icmp6Type::PacketTooBig => "Packet Too Big",
            Icmp6Type::HopLimitExceeded => "Hop Limit Exceeded",
            Icmp6Type::FragmentReassemblyTimeExceeded => "Fragment Reassembly Time Exceeded",
            Icmp6Type::ParameterProblem { .. } => "Parameter Problem",
            Icmp6Type::EchoRequest { .. } => "Echo Request",
            Icmp6Type::EchoReply { .. } => "Echo Reply",
            Icmp6Type::NeighborSolicitation { .. } => "Neighbor Solicitation",
            Icmp6Type::NeighborAdvertisement { .. } => "Neighbor Advertisement",
            Icmp6Type::Redirect { .. } => "Redirect",
            Icmp6Type::Other { .. } => "Other",
        }
    }
}

impl fmt::Display for Icmp6Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())?;
        match self {
            Icmp6Type::ParameterProblem { code, pointer } => match code {
                0 => write!(f, " erroneous header field at {pointer}"),
                1 => write!(f, " unrecognized next header at {pointer}"),
                2 => write!(f, " unrecognized IPv6 option at {pointer}"),
                other => write!(f, " code {other} at {pointer}"),
            },
            Icmp6Type::EchoRequest {
                identifier,
                sequence,
            }
            | Icmp6Type::EchoReply {
                identifier,
                sequence,
            } => write!(f, " identifier {identifier} sequence {sequence}"),
            Icmp6Type::NeighborSolicitation { target } => write!(f, " target {target}"),
            Icmp6Type::NeighborAdvertisement {
                target,
                router,
                solicited,
                override_flag,
            } => write!(
                f,
                " target {target} router:{router} solicited:{solicited} override:{override_flag}"
            ),
            Icmp6Type::Redirect {
                target,
                destination,
            } => write!(f, " target {target} destination {destination}"),
            Icmp6Type::Other { message_type, code } => {
                write!(f, " type {message_type} code {code}")
            }
            _ => Ok(()),
        }
    }
}

/// Decoded ICMPv6 message.
#[derive(Debug, Clone, Serialize)]
pub struct Icmp6 {
    pub message_type: u8,
    pub code: u8,
    pub checksum: u16,
    pub icmp_type: Icmp6Type,
    pub options: Vec<Icmp6Option>,
    pub payload: Vec<u8>,
    #[serde(skip)]
    pub data: Vec<u8>,
    fields: FieldMap,
}

impl Icmp6 {
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn verbose_description(&self) -> String {
        format!(
            "ICMPv6 type {} code {} checksum 0x{:04x} {} {} options",
            self.message_type,
            self.code,
            self.checksum,
            self.icmp_type,
            self.options.len()
        )
    }
}

impl fmt::Display for Icmp6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ICMPv6 {}", self.icmp_type)
    }
}

/// Decode an ICMPv6 message from the bytes following the IPv6 header.
pub fn decode_icmp6(data: &[u8]) -> Option<Icmp6> {
    parse_icmp6(ByteReader::new(data)).ok()
}

pub(crate) fn parse_icmp6(reader: ByteReader<'_>) -> Result<Icmp6, Icmp6Error> {
    if reader.len() < layout::MIN_LEN {
        return Err(Icmp6Error::TooShort {
            needed: layout::MIN_LEN,
            actual: reader.len(),
        });
    }

    let message_type = reader.u8_at(layout::TYPE_OFFSET)?;
    let code = reader.u8_at(layout::CODE_OFFSET)?;
    let checksum = reader.u16_be(layout::CHECKSUM_OFFSET)?;

    let mut fields = FieldMap::new();
    fields.insert(FieldId::Type, reader.abs(0..1));
    fields.insert(FieldId::Code, reader.abs(1..2));
    fields.insert(FieldId::Checksum, reader.abs(2..4));

    let require = |needed: usize| -> Result<(), Icmp6Error> {
        if reader.len() < needed {
            Err(Icmp6Error::TooShort {
                needed,
                actual: reader.len(),
            })
        } else {
            Ok(())
        }
    };

    let mut options = Vec::new();
    let mut payload = Vec::new();
    let mut payload_start = layout::PAYLOAD_OFFSET;

    let icmp_type = match (message_type, code) {
        (1, code) => {
            payload = reader.tail(layout::PAYLOAD_OFFSET).to_vec();
            match code {
                0 => Icmp6Type::UnreachableNoRoute,
                1 => Icmp6Type::UnreachableProhibited,
                2 => Icmp6Type::UnreachableScope,
                3 => Icmp6Type::UnreachableAddress,
                4 => Icmp6Type::UnreachablePort,
                5 => Icmp6Type::UnreachableSource,
                6 => Icmp6Type::UnreachableRejectRoute,
                other => Icmp6Type::Other {
                    message_type,
                    code: other,
                },
            }
        }
        (2, _) => {
            payload = reader.tail(layout::PAYLOAD_OFFSET).to_vec();
            Icmp6Type::PacketTooBig
        }
        (3, code) => {
            payload = reader.tail(layout::PAYLOAD_OFFSET).to_vec();
            match code {
                0 => Icmp6Type::HopLimitExceeded,
                1 => Icmp6Type::FragmentReassemblyTimeExceeded,
                other => Icmp6Type::Other {
                    message_type,
                    code: other,
                },
            }
        }
        (4, code) => {
            payload = reader.tail(layout::PAYLOAD_OFFSET).to_vec();
            let pointer = reader.u32_be(layout::POINTER_OFFSET)?;
            fields.insert(FieldId::Pointer, reader.abs(4..8));
            Icmp6Type::ParameterProblem { code, pointer }
        }
        (128, 0) | (129, 0) => {
            payload = reader.tail(layout::PAYLOAD_OFFSET).to_vec();
            let identifier = reader.u16_be(layout::IDENTIFIER_OFFSET)?;
            let sequence = reader.u16_be(layout::SEQUENCE_OFFSET)?;
            fields.insert(FieldId::Identifier, reader.abs(4..6));
            fields.insert(FieldId::Sequence, reader.abs(6..8));
            if message_type == 128 {
                Icmp6Type::EchoRequest {
                    identifier,
                    sequence,
                }
            } else {
                Icmp6Type::EchoReply {
                    identifier,
                    sequence,
                }
            }
        }
        (135, 0) => {
            require(layout::MIN_LEN_NEIGHBOR)?;
            let target = reader.ipv6(layout::TARGET_OFFSET)?;
            fields.insert(FieldId::Target, reader.abs(8..24));
            options = parse_options(reader.sub_tail(layout::ND_OPTIONS_OFFSET));
            if reader.len() > layout::ND_OPTIONS_OFFSET {
                fields.insert(
                    FieldId::Options,
                    reader.abs(layout::ND_OPTIONS_OFFSET..reader.len()),
                );
            }
            Icmp6Type::NeighborSolicitation { target }
        }
        (136, 0) => {
            require(layout::MIN_LEN_NEIGHBOR)?;
            let target = reader.ipv6(layout::TARGET_OFFSET)?;
            fields.insert(FieldId::Target, reader.abs(8..24));
            let flags = reader.u8_at(layout::ND_FLAGS_OFFSET)?;
            fields.insert(FieldId::Flags, reader.abs(4..5));
            options = parse_options(reader.sub_tail(layout::ND_OPTIONS_OFFSET));
            if reader.len() > layout::ND_OPTIONS_OFFSET {
                fields.insert(
                    FieldId::Options,
                    reader.abs(layout::ND_OPTIONS_OFFSET..reader.len()),
                );
            }
            Icmp6Type::NeighborAdvertisement {
                target,
                router: flags & layout::NA_ROUTER_FLAG != 0,
                solicited: flags & layout::NA_SOLICITED_FLAG != 0,
                override_flag: flags & layout::NA_OVERRIDE_FLAG != 0,
            }
        }
        (137, 0) => {
            require(layout::MIN_LEN_REDIRECT)?;
            let target = reader.ipv6(layout::TARGET_OFFSET)?;
            let destination = reader.ipv6(layout::REDIRECT_DESTINATION_OFFSET)?;
            fields.insert(FieldId::Target, reader.abs(8..24));
            fields.insert(FieldId::Destination, reader.abs(24..40));
            options = parse_options(reader.sub_tail(layout::REDIRECT_OPTIONS_OFFSET));
            if reader.len() > layout::REDIRECT_OPTIONS_OFFSET {
                fields.insert(
                    FieldId::Options,
                    reader.abs(layout::REDIRECT_OPTIONS_OFFSET..reader.len()),
                );
            }
            Icmp6Type::Redirect {
                target,
                destination,
            }
        }
        // A wholly unrecognized pair keeps everything past the fixed
        // type/code/checksum header.
        (message_type, code) => {
            payload_start = layout::REST_OF_HEADER_OFFSET;
            payload = reader.tail(layout::REST_OF_HEADER_OFFSET).to_vec();
            Icmp6Type::Other { message_type, code }
        }
    };

    if !payload.is_empty() {
        fields.insert(FieldId::Payload, reader.abs(payload_start..reader.len()));
    }

    Ok(Icmp6 {
        message_type,
        code,
        checksum,
        icmp_type,
        options,
        payload,
        data: reader.as_slice().to_vec(),
        fields,
    })
}

/// Walk neighbor-discovery options in 8-byte units. A zero length byte
/// or a truncated option ends the walk, keeping what decoded cleanly.
fn parse_options(reader: ByteReader<'_>) -> Vec<Icmp6Option> {
    let mut results = Vec::new();
    if reader.len() < layout::OPTION_UNIT {
        return results;
    }
    let mut position = 0;
    while position + layout::OPTION_UNIT <= reader.len() {
        let Ok(option_type) = reader.u8_at(position) else {
            return results;
        };
        let Ok(units) = reader.u8_at(position + 1) else {
            return results;
        };
        let length = layout::OPTION_UNIT * usize::from(units);
        if length == 0 {
            return results;
        }
        match option_type {
            1 | 2 => {
                if let Ok(mac) = reader.mac(position + 2) {
                    if option_type == 1 {
                        results.push(Icmp6Option::SourceLinkAddress(mac));
                    } else {
                        results.push(Icmp6Option::TargetLinkAddress(mac));
                    }
                }
            }
            3 => {
                if length != layout::OPTION_PREFIX_INFO_LEN
                    || reader.len() < position + layout::OPTION_PREFIX_INFO_LEN
                {
                    return results;
                }
                let Ok(prefix_length) = reader.u8_at(position + 2) else {
                    return results;
                };
                let Ok(flags) = reader.u8_at(position + 3) else {
                    return results;
                };
                let Ok(valid_lifetime) = reader.u32_be(position + 4) else {
                    return results;
                };
                let Ok(preferred_lifetime) = reader.u32_be(position + 8) else {
                    return results;
                };
                let Ok(prefix) = reader.ipv6(position + 16) else {
                    return results;
                };
                results.push(Icmp6Option::PrefixInfo {
                    prefix_length,
                    on_link: flags & layout::PREFIX_ON_LINK_FLAG != 0,
                    autoconfig: flags & layout::PREFIX_AUTOCONFIG_FLAG != 0,
                    valid_lifetime,
                    preferred_lifetime,
                    prefix,
                });
            }
            4 => {
                if reader.len() < position + length {
                    return results;
                }
                let Ok(redirected) =
                    reader.slice(position + layout::OPTION_REDIRECTED_HEADER_SKIP..position + length)
                else {
                    return results;
                };
                results.push(Icmp6Option::RedirectedHeader(redirected.to_vec()));
            }
            5 => {
                if length != layout::OPTION_UNIT {
                    return results;
                }
                let Ok(mtu) = reader.u32_be(position + 4) else {
                    return results;
                };
                results.push(Icmp6Option::Mtu(mtu));
            }
            other => {
                results.push(Icmp6Option::Other {
                    option_type: other,
                    length,
                });
            }
        }
        position += length;
    }
    results
}
