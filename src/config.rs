use crate::command::psn::types::{ContextId, PdpType};

/// Static parameters of a bring-up.
///
/// Implement on a unit struct and override the constants that differ from the
/// defaults.
pub trait ModemConfig {
    const CONTEXT_ID: ContextId = ContextId(1);
    const PDP_TYPE: PdpType = PdpType::Ip;
    const APN: &'static str = "internet";

    /// Run the HTTP service step of the bring-up
    const HTTP_SERVICE: bool = true;
    const HTTP_CONTENT_TYPE: &'static str = "application/octet-stream";

    const REGISTRATION_ATTEMPTS: u8 = 10;
}

pub struct DefaultConfig;

impl ModemConfig for DefaultConfig {}
