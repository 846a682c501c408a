//! Responses for GNSS Commands
use super::types::{GpsMode, GpsSessionState};
use atat::atat_derive::AtatResp;

/// 22.2.1 Start/Stop GPS session +CGPS
#[derive(Clone, AtatResp)]
pub struct GpsSession {
    #[at_arg(position = 0)]
    pub state: GpsSessionState,
    /// Reported only while the session runs
    #[at_arg(position = 1)]
    pub mode: Option<GpsMode>,
}
