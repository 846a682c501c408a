//! Argument and parameter types used by GNSS Commands and Responses
use atat::atat_derive::AtatEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpsSessionState {
    /// • 0: stop GPS session
    Off = 0,
    /// • 1: start GPS session
    On = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpsMode {
    /// • 1: standalone mode
    Standalone = 1,
    /// • 2: UE-based mode
    UeBased = 2,
    /// • 3: UE-assisted mode
    UeAssisted = 3,
}

/// GPS engine state, or fix status when read from `+CGPSINFO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpsState {
    Off,
    /// Engine on, standalone mode
    Standalone,
    /// Engine on, UE-based assisted mode
    UeBased,
    /// Engine on, UE-assisted mode
    UeAssisted,
    NoFix,
    FixAvailable,
    Invalid,
}

impl GpsState {
    pub fn is_on(self) -> bool {
        matches!(self, Self::Standalone | Self::UeBased | Self::UeAssisted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Date {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

/// UTC time of day, whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Position fix reported by `+CGPSINFO`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpsFix {
    /// Signed decimal degrees, south negative
    pub latitude: f64,
    /// Signed decimal degrees, west negative
    pub longitude: f64,
    pub date: Date,
    pub time: Time,
    /// Metres above mean sea level
    pub altitude: f32,
    /// Speed over ground in km/h
    pub speed: f32,
}
