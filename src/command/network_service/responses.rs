//! Responses for Network service Commands
use super::types::RegistrationStat;
use atat::atat_derive::AtatResp;

/// 7.2 Network registration +CREG
#[derive(Clone, AtatResp)]
pub struct NetworkRegistrationStatus {
    #[at_arg(position = 0)]
    pub n: u8,
    #[at_arg(position = 1)]
    pub stat: RegistrationStat,
}

/// 7.3 Signal quality +CSQ
#[derive(Clone, AtatResp)]
pub struct SignalQualityReport {
    #[at_arg(position = 0)]
    pub rssi: u8,
    #[at_arg(position = 1)]
    pub ber: u8,
}
