//! Argument and parameter types used by Network service Commands and Responses
use atat::atat_derive::AtatEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistrationStat {
    /// • 0: not registered, the MT is not currently searching a new operator to register to
    NotRegistered = 0,
    /// • 1: registered, home network
    Home = 1,
    /// • 2: not registered, but the MT is currently searching a new operator to register to
    Searching = 2,
    /// • 3: registration denied
    Denied = 3,
    /// • 4: unknown (e.g. out of coverage)
    Unknown = 4,
    /// • 5: registered, roaming
    Roaming = 5,
    /// Missing or malformed `+CREG: ` line, or a value outside 0..=5
    Invalid = 255,
}

impl RegistrationStat {
    pub fn is_registered(self) -> bool {
        matches!(self, Self::Home | Self::Roaming)
    }

    /// Registration may still complete; keep polling.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::NotRegistered | Self::Searching)
    }
}

/// Received signal strength, bucketed from the `+CSQ` index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rssi {
    /// 20..=31
    Excellent,
    /// 10..=19
    Good,
    /// 2..=9
    Marginal,
    /// 0..=1
    Minimal,
    /// 99, not known or not detectable
    Unknown,
    Invalid,
}

impl From<u8> for Rssi {
    fn from(v: u8) -> Self {
        match v {
            20..=31 => Self::Excellent,
            10..=19 => Self::Good,
            2..=9 => Self::Marginal,
            0..=1 => Self::Minimal,
            99 => Self::Unknown,
            _ => Self::Invalid,
        }
    }
}

/// Channel bit error rate, bucketed from the `+CSQ` RXQUAL index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ber {
    /// 0
    Excellent,
    /// 1..=2
    Good,
    /// 3..=4
    Acceptable,
    /// 5..=7
    Poor,
    /// 99, usual on LTE
    Unknown,
    Invalid,
}

impl From<u8> for Ber {
    fn from(v: u8) -> Self {
        match v {
            0 => Self::Excellent,
            1..=2 => Self::Good,
            3..=4 => Self::Acceptable,
            5..=7 => Self::Poor,
            99 => Self::Unknown,
            _ => Self::Invalid,
        }
    }
}

/// Reason a signal quality report fails the admission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalError {
    RssiUnknown,
    RssiTooWeak(Rssi),
    BerTooHigh(Ber),
}

/// Parsed `+CSQ: <rssi>,<ber>` report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalQuality {
    pub raw_rssi: u8,
    pub raw_ber: u8,
    pub rssi: Rssi,
    pub ber: Ber,
}

impl SignalQuality {
    /// Admission policy for bringing up a data connection.
    ///
    /// RSSI must be good or excellent. BER must be acceptable or better, or
    /// unknown, which LTE reports routinely.
    pub fn evaluate(&self) -> Result<(), SignalError> {
        match self.rssi {
            Rssi::Excellent | Rssi::Good => {}
            Rssi::Unknown => return Err(SignalError::RssiUnknown),
            weak => return Err(SignalError::RssiTooWeak(weak)),
        }
        match self.ber {
            Ber::Excellent | Ber::Good | Ber::Acceptable | Ber::Unknown => Ok(()),
            poor => Err(SignalError::BerTooHigh(poor)),
        }
    }
}
