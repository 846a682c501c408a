//! Argument and parameter types used by General Commands and Responses
use atat::atat_derive::AtatEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Functionality {
    /// • 0: minimum functionality
    Minimum = 0,
    /// • 1: full functionality
    Full = 1,
    /// • 4: disable both transmit and receive RF circuits
    AirplaneMode = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetMode {
    /// • 0: set the functionality without resetting
    DontReset = 0,
    /// • 1: reset the module before setting the functionality
    Reset = 1,
}
