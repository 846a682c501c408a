//! ### 9 - Device lock

use atat::atat_derive::AtatCmd;

use super::{bounded, CommandTooLong, NoResponse};

/// Longest PIN accepted. Keeps the PIN command within 32 bytes including a
/// terminating NUL, the buffer the module firmware reserves for it.
pub const PIN_MAX_LEN: usize = 20;

/// 9.1 Enter PIN +CPIN
///
/// Read the SIM lock state. The reply is one of the fixed `+CPIN: <code>`
/// strings the classifier recognizes directly.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CPIN?", NoResponse, termination = "\r")]
pub struct GetPinStatus;

/// 9.1 Enter PIN +CPIN
///
/// Enter PIN. If no PIN request is pending, the corresponding error code is
/// returned.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CPIN", NoResponse, termination = "\r")]
pub struct SetPin<'a> {
    #[at_arg(position = 0, len = 20)]
    pub pin: &'a str,
}

impl<'a> SetPin<'a> {
    pub fn new(pin: &'a str) -> Result<Self, CommandTooLong> {
        Ok(Self {
            pin: bounded(pin, PIN_MAX_LEN)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{encode, CMD_MAX_LEN};
    use heapless::String;

    #[test]
    fn pin_is_quoted() {
        let cmd: String<CMD_MAX_LEN> = encode(&SetPin::new("1234").unwrap()).unwrap();
        assert_eq!(cmd.as_str(), "AT+CPIN=\"1234\"\r");

        let query: String<CMD_MAX_LEN> = encode(&GetPinStatus).unwrap();
        assert_eq!(query.as_str(), "AT+CPIN?\r");
    }

    #[test]
    fn oversized_pin_is_rejected() {
        assert!(SetPin::new("0123456789012345678901234").is_err());

        let longest = "1".repeat(PIN_MAX_LEN);
        let cmd: String<32> = encode(&SetPin::new(&longest).unwrap()).unwrap();
        assert_eq!(cmd.len(), 31);
    }
}
