//! Responses for Packet Switched Data Services Commands
use super::types::{AttachState, IP_ADDR_MAX_LEN};
use atat::atat_derive::AtatResp;
use heapless::String;

/// 18.14 GPRS attach or detach +CGATT
#[derive(Clone, AtatResp)]
pub struct GPRSAttached {
    #[at_arg(position = 0)]
    pub state: AttachState,
}

/// 18.20 Show PDP address +CGPADDR
#[derive(Clone, AtatResp)]
pub struct PdpAddress {
    #[at_arg(position = 0)]
    pub cid: u8,
    /// Absent or empty while the context is inactive
    #[at_arg(position = 1)]
    pub ip_addr: Option<String<IP_ADDR_MAX_LEN>>,
}
