//! Outcome of a single AT transaction

/// Unsolicited result codes the modem emits without being asked, mostly
/// while booting or right after the SIM is unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Urc {
    /// `RDY`, module finished booting
    ModuleReady,
    /// `SMS DONE`, SMS subsystem initialised
    SmsDone,
    /// `PB DONE`, phonebook initialised
    PhonebookDone,
}

/// Classified status of one transaction.
///
/// Exactly one `Status` is produced per [`send_at`](crate::AtClient::send_at).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    // Final result codes
    Ok,
    Error,
    /// `+CME ERROR:` extended mobile equipment error
    CmeError,
    /// `+CMS ERROR:` extended messaging error
    CmsError,
    NoCarrier,
    Connect,
    /// `DOWNLOAD`, modem waits for payload bytes
    DownloadReady,

    // Informational lines, routed to a field extractor
    /// `+CREG: `
    Registration,
    /// `+CGATT: `
    Attachment,
    /// `+CGPADDR: `
    IpAddress,
    /// `+CGPS: `
    GpsState,
    /// `+CGPSINFO: `
    GpsInfo,
    /// `+CSQ: `
    SignalQuality,
    /// `+HTTPACTION: `
    HttpAction,

    // SIM lock state
    SimReady,
    SimPin,
    SimPuk,
    PhSimPin,
    /// Any other `+CPIN: ` report
    SimStatus,

    Unsolicited(Urc),

    // Local statuses, never sent by the modem
    /// Nothing was received before the receive timeout
    Timeout,
    /// The command could not be written before the transmit timeout
    TxTimeout,
    /// Only part of the command was written
    TxFailure,
    /// Something was received, but no known result code
    Partial,
    InvalidParameter,
    /// The receive buffer filled up without a recognizable result code
    Unparseable,
}

impl Status {
    /// Statuses produced locally by the engine rather than reported by the modem.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Timeout
                | Self::TxTimeout
                | Self::TxFailure
                | Self::Partial
                | Self::InvalidParameter
                | Self::Unparseable
        )
    }

    /// Modem reported errors, generic or extended.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error | Self::CmeError | Self::CmsError)
    }
}
