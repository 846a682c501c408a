//! Bring-up sequencer
//!
//! [`Runner::init`] drives the modem from power-on to a registered, attached
//! data connection with an active PDP context, the HTTP service prepared and
//! the GPS engine running. Steps run strictly in order and the first failure
//! aborts the sequence with the failing [`Stage`].

use core::marker::PhantomData;

use atat::AtatCmd;
use embassy_time::Duration;
use heapless::String;

use crate::client::AtClient;
use crate::command::device_lock::{GetPinStatus, SetPin};
use crate::command::general::types::{Functionality, ResetMode};
use crate::command::general::{SetModuleFunctionality, AT};
use crate::command::{encode, CMD_MAX_LEN};
use crate::config::ModemConfig;
use crate::error::{Error, Reason, Stage};
use crate::module_timing::{self, command};
use crate::status::Status;

pub struct Runner<A: AtClient, C: ModemConfig> {
    pub(crate) at: A,
    pub(crate) diagnostics: bool,
    _config: PhantomData<C>,
}

impl<A: AtClient, C: ModemConfig> Runner<A, C> {
    pub fn new(at: A) -> Self {
        Self {
            at,
            diagnostics: false,
            _config: PhantomData,
        }
    }

    pub fn at(&mut self) -> &mut A {
        &mut self.at
    }

    pub fn release(self) -> A {
        self.at
    }

    /// Bring the modem up.
    ///
    /// `pin` unlocks the SIM if it asks for one, `url` is the target of the
    /// HTTP session. With `diagnostics` set, every command, reply and step
    /// decision is logged at info level.
    pub fn init(&mut self, pin: &str, url: &str, diagnostics: bool) -> Result<(), Error> {
        self.diagnostics = diagnostics;
        self.at.set_diagnostics(diagnostics);

        match self.bring_up(pin, url) {
            Ok(()) => {
                info!("Modem ready");
                Ok(())
            }
            Err(err) => {
                error!(
                    "Bring-up failed at {:?} ({}): {:?}",
                    err.stage,
                    err.code(),
                    err.reason
                );
                Err(err)
            }
        }
    }

    fn bring_up(&mut self, pin: &str, url: &str) -> Result<(), Error> {
        self.reset()?;
        self.check_alive()?;
        self.unlock_sim(pin)?;
        self.register_network()?;
        self.check_signal_quality()?;
        self.attach_network()?;
        self.setup_pdp_context()?;
        self.confirm_ip_address()?;
        if C::HTTP_SERVICE {
            self.setup_http(url)?;
        }
        self.enable_gps()
    }

    /// Serialize `cmd` and run it. A command that does not fit fails the
    /// stage before anything is written.
    pub(crate) fn send<Cmd: AtatCmd>(
        &mut self,
        stage: Stage,
        cmd: &Cmd,
        timeout: Duration,
    ) -> Result<Status, Error> {
        let text: String<CMD_MAX_LEN> = match encode(cmd) {
            Ok(text) => text,
            Err(e) => {
                diag!(
                    self.diagnostics,
                    "[{:?}] command exceeds {} bytes",
                    stage,
                    CMD_MAX_LEN
                );
                return Err(Error::new(stage, e.into()));
            }
        };
        Ok(self.at.send_at(&text, timeout))
    }

    /// Run `cmd` and fail the stage unless the modem answers `expected`.
    pub(crate) fn require<Cmd: AtatCmd>(
        &mut self,
        stage: Stage,
        cmd: &Cmd,
        timeout: Duration,
        expected: Status,
    ) -> Result<(), Error> {
        match self.send(stage, cmd, timeout)? {
            s if s == expected => Ok(()),
            other => {
                diag!(self.diagnostics, "[{:?}] unexpected status {:?}", stage, other);
                Err(Error::new(stage, Reason::Status(other)))
            }
        }
    }

    /// Full functionality reset, then wait for the module to boot.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.require(
            Stage::Reset,
            &SetModuleFunctionality {
                fun: Functionality::Full,
                rst: ResetMode::Reset,
            },
            command::reset(),
            Status::Ok,
        )?;
        let boot = module_timing::boot_time();
        diag!(
            self.diagnostics,
            "Modem is resetting, waiting {} s for boot",
            boot.as_secs()
        );
        self.at.delay(boot);
        self.at.flush_rx();
        Ok(())
    }

    fn check_alive(&mut self) -> Result<(), Error> {
        self.require(Stage::Liveness, &AT, command::at(), Status::Ok)?;
        diag!(self.diagnostics, "Modem is responsive");
        self.at.delay(module_timing::step_settle_time());
        Ok(())
    }

    fn unlock_sim(&mut self, pin: &str) -> Result<(), Error> {
        match self.send(Stage::SimUnlock, &GetPinStatus, command::pin())? {
            Status::SimReady => {
                diag!(self.diagnostics, "SIM already unlocked");
            }
            Status::SimPin => {
                diag!(self.diagnostics, "Unlocking SIM");
                let cmd = SetPin::new(pin).map_err(|e| Error::new(Stage::SimUnlock, e.into()))?;
                self.require(Stage::SimUnlock, &cmd, command::pin(), Status::Ok)?;
                debug!("SIM unlocked");
            }
            Status::SimPuk => {
                diag!(
                    self.diagnostics,
                    "SIM is PUK locked, manual intervention required"
                );
                return Err(Error::new(Stage::SimUnlock, Reason::PukRequired));
            }
            other => {
                diag!(self.diagnostics, "[CPIN] unsupported SIM state {:?}", other);
                return Err(Error::new(Stage::SimUnlock, Reason::Status(other)));
            }
        }
        // The SIM reports SMS DONE / PB DONE while settling
        self.at.delay(module_timing::sim_settle_time());
        self.at.flush_rx();
        Ok(())
    }
}
