//! ### 4 - General commands
pub mod types;

use atat::atat_derive::AtatCmd;
use types::{Functionality, ResetMode};

use super::NoResponse;

/// 4.1 AT attention
///
/// Liveness check, answered with `OK` once the command interpreter is up.
#[derive(Clone, AtatCmd)]
#[at_cmd("", NoResponse, termination = "\r")]
pub struct AT;

/// 5.6 Set phone functionality +CFUN
///
/// With `rst` set the module answers `OK` before rebooting and stays silent
/// for tens of seconds afterwards.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CFUN", NoResponse, termination = "\r")]
pub struct SetModuleFunctionality {
    #[at_arg(position = 0)]
    pub fun: Functionality,
    #[at_arg(position = 1)]
    pub rst: ResetMode,
}
