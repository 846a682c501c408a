//! ### 18 - Packet Switched Data Services Commands
//!
//! Attaching to the packet switched domain, defining and activating a PDP
//! context and reading back the address the network assigned to it.
pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;
use responses::{GPRSAttached, PdpAddress};
use types::{AttachState, ContextId, IpState, PdpContextState, PdpType};

use super::parse::extract;
use super::{bounded, CommandTooLong, NoResponse};

/// Longest access point name accepted in a context definition.
pub const APN_MAX_LEN: usize = 99;

/// 18.14 Read GPRS attach or detach +CGATT
///
/// Reports `+CGATT: <state>`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGATT?", GPRSAttached, termination = "\r")]
pub struct GetGPRSAttached;

/// 18.14 Set GPRS attach or detach +CGATT
///
/// Register (attach) the MT to, or deregister (detach) the MT from the GPRS
/// service. If the MT is already in the requested state, the command is
/// ignored and OK result code is returned. May take several seconds.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGATT", NoResponse, termination = "\r")]
pub struct SetGPRSAttached {
    #[at_arg(position = 0)]
    pub state: AttachState,
}

/// 18.4 PDP context definition +CGDCONT
///
/// If the command is used only with parameter <cid>, the corresponding PDP
/// context becomes undefined.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGDCONT", NoResponse, termination = "\r")]
pub struct DeletePdpContext {
    #[at_arg(position = 0)]
    pub cid: ContextId,
}

/// 18.4 PDP context definition +CGDCONT
///
/// Defines the connection parameters for a PDP context, identified by the local
/// context identification parameter <cid>.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGDCONT", NoResponse, termination = "\r")]
pub struct SetPdpContextDefinition<'a> {
    #[at_arg(position = 0)]
    pub cid: ContextId,
    #[at_arg(position = 1, len = 6)]
    pub pdp_type: &'a str,
    #[at_arg(position = 2, len = 99)]
    pub apn: &'a str,
}

impl<'a> SetPdpContextDefinition<'a> {
    pub fn new(cid: ContextId, pdp_type: PdpType, apn: &'a str) -> Result<Self, CommandTooLong> {
        Ok(Self {
            cid,
            pdp_type: pdp_type.as_str(),
            apn: bounded(apn, APN_MAX_LEN)?,
        })
    }
}

/// 18.16 PDP context activate or deactivate +CGACT
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGACT", NoResponse, termination = "\r")]
pub struct SetPdpContextState {
    #[at_arg(position = 0)]
    pub state: PdpContextState,
    #[at_arg(position = 1)]
    pub cid: ContextId,
}

/// 18.20 Show PDP address +CGPADDR
///
/// Returns `+CGPADDR: <cid>,<PDP_addr>`; the address is empty while the
/// context is inactive.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGPADDR", PdpAddress, termination = "\r")]
pub struct GetPdpAddress {
    #[at_arg(position = 0)]
    pub cid: ContextId,
}

impl AttachState {
    /// Extract `<state>` from a `+CGATT: <state>` line.
    pub fn parse(response: &[u8]) -> Self {
        extract::<GPRSAttached>(response, "+CGATT: ").map_or(Self::Invalid, |r| r.state)
    }
}

impl IpState {
    /// Extract the address from a `+CGPADDR: <cid>,<addr>` line.
    ///
    /// An absent or empty address means the context is defined but not
    /// active. The address may be quoted.
    pub fn parse(response: &[u8]) -> Self {
        match extract::<PdpAddress>(response, "+CGPADDR: ") {
            Some(PdpAddress {
                ip_addr: Some(addr),
                ..
            }) if !addr.is_empty() => Self::Active(addr),
            Some(_) => Self::NotActive,
            None => Self::Invalid,
        }
    }
}
