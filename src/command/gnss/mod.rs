//! ### 22 - GNSS Commands
pub mod responses;
pub mod types;

use atat::atat_derive::AtatCmd;
use responses::GpsSession;
use types::{Date, GpsFix, GpsMode, GpsSessionState, GpsState, Time};

use super::parse::{extract, find, line};
use super::NoResponse;

/// 22.2.1 Start/Stop GPS session +CGPS
///
/// Reports `+CGPS: <on/off>[,<mode>]`.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGPS?", GpsSession, termination = "\r")]
pub struct GetGpsSession;

/// 22.2.1 Start/Stop GPS session +CGPS
///
/// Without a mode the session starts standalone.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGPS", NoResponse, termination = "\r")]
pub struct SetGpsSession {
    #[at_arg(position = 0)]
    pub state: GpsSessionState,
}

/// 22.2.2 Get GPS fixed position information +CGPSINFO
///
/// Reports `+CGPSINFO: [<lat>],[<N/S>],[<log>],[<E/W>],[<date>],[<UTC time>],[<alt>],[<speed>],[<course>]`,
/// with every field empty while there is no fix.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGPSINFO", NoResponse, termination = "\r")]
pub struct GetGpsInfo;

const INFO_PREFIX: &str = "+CGPSINFO: ";
const NO_FIX: &[u8] = b"+CGPSINFO: ,,,,,,,,";

impl GpsState {
    /// Extract the engine state from a `+CGPS: ` line, or the fix status
    /// from a `+CGPSINFO: ` line.
    pub fn parse(response: &[u8]) -> Self {
        if line(response, "+CGPS: ").is_some() {
            return match extract::<GpsSession>(response, "+CGPS: ") {
                Some(GpsSession {
                    state: GpsSessionState::Off,
                    ..
                }) => Self::Off,
                Some(GpsSession {
                    state: GpsSessionState::On,
                    mode: Some(mode),
                }) => match mode {
                    GpsMode::Standalone => Self::Standalone,
                    GpsMode::UeBased => Self::UeBased,
                    GpsMode::UeAssisted => Self::UeAssisted,
                },
                _ => Self::Invalid,
            };
        }
        let Some(pos) = find(response, INFO_PREFIX.as_bytes()) else {
            return Self::Invalid;
        };
        if find(&response[pos..], NO_FIX).is_some() {
            return Self::NoFix;
        }
        match response.get(pos + INFO_PREFIX.len()) {
            Some(b',' | b'\r' | b'\n') | None => Self::Invalid,
            Some(_) => Self::FixAvailable,
        }
    }
}

impl GpsFix {
    /// Parse the telemetry of a `+CGPSINFO: ` line into a fix.
    ///
    /// Either every field converts and passes its range check, or nothing is
    /// returned.
    pub fn parse(response: &[u8]) -> Option<Self> {
        let info = &line(response, INFO_PREFIX)?[INFO_PREFIX.len()..];
        let mut fields = info.split(|&b| b == b',');

        let mut next = || fields.next().filter(|f| !f.is_empty());
        let lat = number::<f64>(next()?)?;
        let ns = next()?;
        let lon = number::<f64>(next()?)?;
        let ew = next()?;
        let date = Date::parse(next()?)?;
        let time = Time::parse(next()?)?;
        let altitude = number::<f32>(next()?)?;
        let speed = number::<f32>(next()?)?;
        // The speed field must be comma terminated
        fields.next()?;

        let latitude = match ns {
            b"N" => nmea_to_decimal(lat, 90)?,
            b"S" => -nmea_to_decimal(lat, 90)?,
            _ => return None,
        };
        let longitude = match ew {
            b"E" => nmea_to_decimal(lon, 180)?,
            b"W" => -nmea_to_decimal(lon, 180)?,
            _ => return None,
        };
        if !altitude.is_finite() || !speed.is_finite() || speed < 0.0 {
            return None;
        }

        Some(Self {
            latitude,
            longitude,
            date,
            time,
            altitude,
            speed,
        })
    }
}

fn number<T: core::str::FromStr>(field: &[u8]) -> Option<T> {
    core::str::from_utf8(field).ok()?.parse().ok()
}

/// `[d]ddmm.mmmm` to unsigned decimal degrees.
fn nmea_to_decimal(value: f64, max_degrees: i32) -> Option<f64> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let degrees = (value / 100.0) as i32;
    let minutes = value - f64::from(degrees) * 100.0;
    if minutes >= 60.0 {
        return None;
    }
    let decimal = f64::from(degrees) + minutes / 60.0;
    (decimal <= f64::from(max_degrees)).then_some(decimal)
}

/// Two digit fields `aabbcc`, with anything after the sixth digit ignored.
fn two_digit_triplet(field: &[u8]) -> Option<[u8; 3]> {
    let digits = field.get(..6)?;
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let pair = |i: usize| (digits[i] - b'0') * 10 + (digits[i + 1] - b'0');
    Some([pair(0), pair(2), pair(4)])
}

impl Date {
    /// `ddmmyy`
    fn parse(field: &[u8]) -> Option<Self> {
        if field.len() != 6 {
            return None;
        }
        let [day, month, year] = two_digit_triplet(field)?;
        ((1..=31).contains(&day) && (1..=12).contains(&month)).then_some(Self {
            day,
            month,
            year: 2000 + u16::from(year),
        })
    }
}

impl Time {
    /// `hhmmss[.s]` in UTC
    fn parse(field: &[u8]) -> Option<Self> {
        let [hour, minute, second] = two_digit_triplet(field)?;
        match &field[6..] {
            [] => {}
            [b'.', frac @ ..] if frac.iter().all(u8::is_ascii_digit) => {}
            _ => return None,
        }
        (hour < 24 && minute < 60 && second < 60).then_some(Self {
            hour,
            minute,
            second,
        })
    }
}
