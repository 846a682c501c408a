//! ### 7 - Network service
pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;
use responses::{NetworkRegistrationStatus, SignalQualityReport};
use types::{Ber, RegistrationStat, Rssi, SignalQuality};

use super::parse::extract;

/// 7.2 Network registration +CREG
///
/// Reports the circuit switched registration state as `+CREG: <n>,<stat>`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CREG?", NetworkRegistrationStatus, termination = "\r")]
pub struct GetNetworkRegistrationStatus;

/// 7.3 Signal quality +CSQ
///
/// Returns `+CSQ: <rssi>,<ber>`, both as raw indexes.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CSQ", SignalQualityReport, termination = "\r")]
pub struct GetSignalQuality;

impl RegistrationStat {
    /// Extract `<stat>` from a `+CREG: <n>,<stat>` line.
    ///
    /// Both fields must convert; otherwise the result is `Invalid`.
    pub fn parse(response: &[u8]) -> Self {
        extract::<NetworkRegistrationStatus>(response, "+CREG: ")
            .map_or(Self::Invalid, |r| r.stat)
    }
}

impl SignalQuality {
    /// Extract and bucket `<rssi>,<ber>` from a `+CSQ: ` line.
    ///
    /// Out of range values still parse; they bucket as `Invalid` and are
    /// rejected by [`SignalQuality::evaluate`].
    pub fn parse(response: &[u8]) -> Option<Self> {
        let report = extract::<SignalQualityReport>(response, "+CSQ: ")?;
        Some(Self {
            raw_rssi: report.rssi,
            raw_ber: report.ber,
            rssi: Rssi::from(report.rssi),
            ber: Ber::from(report.ber),
        })
    }
}
