//! ### 16 - HTTP(S) Commands
//!
//! The module keeps a single HTTP session. Parameters are set one at a time
//! with `+HTTPPARA` after the service has been started with `+HTTPINIT`.

use atat::atat_derive::AtatCmd;

use super::{bounded, CommandTooLong, NoResponse, CMD_MAX_LEN};

/// 16.2.2 Stop HTTP service +HTTPTERM
///
/// Answers `ERROR` when no session is open.
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPTERM", NoResponse, termination = "\r")]
pub struct HttpTerminate;

/// 16.2.1 Start HTTP service +HTTPINIT
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPINIT", NoResponse, termination = "\r")]
pub struct HttpInitialize;

/// 16.2.3 Set HTTP(S) parameters value +HTTPPARA
#[derive(Clone, AtatCmd)]
#[at_cmd("+HTTPPARA", NoResponse, termination = "\r")]
pub struct SetHttpParameter<'a> {
    #[at_arg(position = 0, len = 7)]
    pub param: &'a str,
    #[at_arg(position = 1, len = 128)]
    pub value: &'a str,
}

impl<'a> SetHttpParameter<'a> {
    /// Content type of the request body.
    pub fn content_type(value: &'a str) -> Result<Self, CommandTooLong> {
        Self::new("CONTENT", value)
    }

    /// Target URL of the session.
    pub fn url(value: &'a str) -> Result<Self, CommandTooLong> {
        Self::new("URL", value)
    }

    fn new(param: &'a str, value: &'a str) -> Result<Self, CommandTooLong> {
        Ok(Self {
            param,
            value: bounded(value, CMD_MAX_LEN)?,
        })
    }
}
