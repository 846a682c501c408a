//! AT commands for the SIMCom SIM7600 family
//!
//! Every command is a struct deriving [`atat::AtatCmd`], serialized with
//! `\r` termination into a bounded [`heapless::String`]. A command that would
//! not fit fails with [`CommandTooLong`] instead of being truncated.
//!
//! Each chapter module also carries the typed extractor for its informational
//! response line, deserialized through `atat::serde_at`.

pub mod device_lock;
pub mod general;
pub mod gnss;
pub mod http;
pub mod network_service;
pub mod parse;
pub mod psn;

use atat::atat_derive::AtatResp;
use atat::AtatCmd;
use heapless::String;

/// Capacity of a serialized command, terminator included.
pub const CMD_MAX_LEN: usize = 128;

/// Serialization scratch space. Holds the worst case of every command whose
/// string arguments passed their length check, quote escaping included.
const SCRATCH_LEN: usize = 320;

#[derive(Clone, AtatResp)]
pub struct NoResponse;

/// A command, or one of its arguments, would not fit into its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandTooLong;

/// Reject a string argument longer than `max` bytes.
pub(crate) fn bounded(arg: &str, max: usize) -> Result<&str, CommandTooLong> {
    if arg.len() > max {
        return Err(CommandTooLong);
    }
    Ok(arg)
}

/// Serialize `cmd` into a command string of at most `N` bytes.
pub fn encode<Cmd: AtatCmd, const N: usize>(cmd: &Cmd) -> Result<String<N>, CommandTooLong> {
    if Cmd::MAX_LEN > SCRATCH_LEN {
        return Err(CommandTooLong);
    }
    let mut buf = [0u8; SCRATCH_LEN];
    let len = cmd.write(&mut buf);
    let text = core::str::from_utf8(&buf[..len]).map_err(|_| CommandTooLong)?;
    String::try_from(text).map_err(|_| CommandTooLong)
}
