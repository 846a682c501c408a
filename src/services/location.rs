use crate::client::AtClient;
use crate::command::gnss::{
    types::{GpsFix, GpsSessionState, GpsState},
    GetGpsInfo, GetGpsSession, SetGpsSession,
};
use crate::config::ModemConfig;
use crate::error::{Error, Reason, Stage};
use crate::module_timing::command;
use crate::runner::Runner;
use crate::status::Status;

impl<A: AtClient, C: ModemConfig> Runner<A, C> {
    /// Make sure the GPS engine is running, starting a standalone session if
    /// it is off.
    pub fn enable_gps(&mut self) -> Result<(), Error> {
        match self.send(Stage::Gnss, &GetGpsSession, command::gps_session())? {
            Status::GpsState => match GpsState::parse(self.at.response()) {
                GpsState::Off => {
                    diag!(self.diagnostics, "GPS is off, enabling");
                    self.require(
                        Stage::Gnss,
                        &SetGpsSession {
                            state: GpsSessionState::On,
                        },
                        command::gps_session(),
                        Status::Ok,
                    )?;
                    diag!(self.diagnostics, "GPS engine enabled");
                    Ok(())
                }
                state if state.is_on() => {
                    diag!(self.diagnostics, "GPS engine already on: {:?}", state);
                    Ok(())
                }
                state => {
                    diag!(self.diagnostics, "[CGPS] unexpected engine state {:?}", state);
                    Err(Error::new(Stage::Gnss, Reason::InvalidResponse))
                }
            },
            other => {
                diag!(self.diagnostics, "[CGPS] query failed: {:?}", other);
                Err(Error::new(Stage::Gnss, Reason::Status(other)))
            }
        }
    }

    /// Read the current position fix.
    pub fn gps_fix(&mut self) -> Result<GpsFix, Error> {
        match self.send(Stage::Gnss, &GetGpsInfo, command::gps_info())? {
            Status::GpsInfo => {}
            other => return Err(Error::new(Stage::Gnss, Reason::Status(other))),
        }
        let response = self.at.response();
        match GpsState::parse(response) {
            GpsState::FixAvailable => {
                let fix = GpsFix::parse(response)
                    .ok_or(Error::new(Stage::Gnss, Reason::InvalidResponse))?;
                diag!(
                    self.diagnostics,
                    "GPS fix: lat {}, lon {}, alt {} m, speed {} km/h",
                    fix.latitude,
                    fix.longitude,
                    fix.altitude,
                    fix.speed
                );
                Ok(fix)
            }
            GpsState::NoFix => Err(Error::new(Stage::Gnss, Reason::NoFix)),
            _ => Err(Error::new(Stage::Gnss, Reason::InvalidResponse)),
        }
    }
}
