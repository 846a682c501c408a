//! Network registration polling and the signal quality gate.

use crate::client::AtClient;
use crate::command::network_service::{
    types::{RegistrationStat, SignalQuality},
    GetNetworkRegistrationStatus, GetSignalQuality,
};
use crate::config::ModemConfig;
use crate::error::{Error, Reason, Stage};
use crate::module_timing::{self, command};
use crate::runner::Runner;
use crate::status::Status;

impl<A: AtClient, C: ModemConfig> Runner<A, C> {
    /// Poll `+CREG?` until the module is registered at home or roaming.
    ///
    /// Transient states and failed queries are retried after the poll
    /// interval. A denied or unknown registration ends polling at once.
    pub(crate) fn register_network(&mut self) -> Result<RegistrationStat, Error> {
        diag!(self.diagnostics, "Attempting network registration");

        for attempt in 0..C::REGISTRATION_ATTEMPTS {
            let timeout = if attempt == 0 {
                module_timing::registration_first_timeout()
            } else {
                module_timing::registration_poll_timeout()
            };

            match self.send(Stage::Registration, &GetNetworkRegistrationStatus, timeout)? {
                Status::Registration => {
                    let stat = RegistrationStat::parse(self.at.response());
                    if stat.is_registered() {
                        diag!(self.diagnostics, "Registered on network: {:?}", stat);
                        self.at.delay(module_timing::step_settle_time());
                        return Ok(stat);
                    }
                    if !stat.is_pending() {
                        diag!(
                            self.diagnostics,
                            "Registration failed or denied: {:?}",
                            stat
                        );
                        return Err(Error::new(
                            Stage::Registration,
                            Reason::RegistrationDenied(stat),
                        ));
                    }
                    diag!(
                        self.diagnostics,
                        "Registration in progress ({:?}), attempt {}",
                        stat,
                        attempt + 1
                    );
                }
                other => {
                    diag!(
                        self.diagnostics,
                        "Waiting for registration, status {:?}",
                        other
                    );
                }
            }
            self.at.delay(module_timing::registration_poll_interval());
        }

        diag!(
            self.diagnostics,
            "Not registered after {} attempts",
            C::REGISTRATION_ATTEMPTS
        );
        Err(Error::new(Stage::Registration, Reason::RegistrationTimeout))
    }

    /// Query and parse the current signal quality.
    pub fn signal_quality(&mut self) -> Result<SignalQuality, Error> {
        match self.send(Stage::SignalQuality, &GetSignalQuality, command::signal_quality())? {
            Status::SignalQuality => SignalQuality::parse(self.at.response())
                .ok_or(Error::new(Stage::SignalQuality, Reason::InvalidResponse)),
            other => Err(Error::new(Stage::SignalQuality, Reason::Status(other))),
        }
    }

    pub(crate) fn check_signal_quality(&mut self) -> Result<(), Error> {
        let sq = self.signal_quality()?;
        if let Err(e) = sq.evaluate() {
            diag!(
                self.diagnostics,
                "Signal quality rejected: {:?} (rssi {}, ber {})",
                e,
                sq.raw_rssi,
                sq.raw_ber
            );
            return Err(Error::new(Stage::SignalQuality, e.into()));
        }
        diag!(
            self.diagnostics,
            "Signal quality passed: rssi {:?} ({}), ber {:?} ({})",
            sq.rssi,
            sq.raw_rssi,
            sq.ber,
            sq.raw_ber
        );
        self.at.delay(module_timing::step_settle_time());
        Ok(())
    }
}
