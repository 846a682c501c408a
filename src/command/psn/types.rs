//! Argument and parameter types used by Packet Switched Data Services Commands and Responses
use core::str::FromStr;

use atat::atat_derive::{AtatEnum, AtatLen};
use heapless::String;
use no_std_net::Ipv4Addr;
use serde::{Deserialize, Serialize};

/// Capacity of the address text in a `+CGPADDR` reply, large enough for the
/// dotted form of an IPv6 address.
pub const IP_ADDR_MAX_LEN: usize = 64;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, AtatLen)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ContextId(pub u8);

/// Packet data protocol type of a context.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PdpType {
    Ip,
    Ipv6,
    Ipv4v6,
}

impl PdpType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ip => "IP",
            Self::Ipv6 => "IPV6",
            Self::Ipv4v6 => "IPV4V6",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttachState {
    /// • 0: detached
    Detached = 0,
    /// • 1: attached
    Attached = 1,
    /// Missing or malformed `+CGATT: ` line
    Invalid = 255,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PdpContextState {
    /// • 0: deactivated
    Deactivated = 0,
    /// • 1: activated
    Activated = 1,
}

/// Address confirmation for a PDP context.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IpState {
    Active(String<IP_ADDR_MAX_LEN>),
    /// Context defined, but no address assigned
    NotActive,
    Invalid,
}

impl IpState {
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Active(addr) => Some(addr.as_str()),
            _ => None,
        }
    }

    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        self.address().and_then(|a| Ipv4Addr::from_str(a).ok())
    }
}
