use crate::command::network_service::types::{RegistrationStat, SignalError};
use crate::command::CommandTooLong;
use crate::status::Status;

/// Bring-up step, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Stage {
    Reset = 1,
    Liveness = 2,
    SimUnlock = 3,
    Registration = 4,
    SignalQuality = 5,
    Attach = 6,
    PdpContext = 7,
    IpAddress = 8,
    Http = 9,
    Gnss = 10,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reason {
    /// The transaction ended with a status the step does not accept
    Status(Status),
    /// SIM is PUK locked, manual intervention required
    PukRequired,
    /// A formatted command did not fit its transmit buffer
    CommandTooLong,
    RegistrationDenied(RegistrationStat),
    /// Still not registered after the last attempt
    RegistrationTimeout,
    Signal(SignalError),
    /// Informational line missing or malformed
    InvalidResponse,
    /// PDP context defined, but no address assigned
    ContextNotActive,
    NoFix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Error {
    pub stage: Stage,
    pub reason: Reason,
}

impl Error {
    pub fn new(stage: Stage, reason: Reason) -> Self {
        Self { stage, reason }
    }

    /// Negative failure code whose magnitude identifies the failing stage.
    pub fn code(&self) -> i32 {
        -i32::from(self.stage as u8)
    }
}

impl From<CommandTooLong> for Reason {
    fn from(_: CommandTooLong) -> Self {
        Self::CommandTooLong
    }
}

impl From<Status> for Reason {
    fn from(s: Status) -> Self {
        Self::Status(s)
    }
}

impl From<SignalError> for Reason {
    fn from(e: SignalError) -> Self {
        Self::Signal(e)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?} failed: {:?}", self.stage, self.reason)
    }
}
