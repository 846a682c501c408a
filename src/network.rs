//! Packet switched attach, PDP context setup and address confirmation.

use crate::client::AtClient;
use crate::command::psn::{
    types::{AttachState, IpState, PdpContextState},
    DeletePdpContext, GetGPRSAttached, GetPdpAddress, SetGPRSAttached, SetPdpContextDefinition,
    SetPdpContextState,
};
use crate::config::ModemConfig;
use crate::error::{Error, Reason, Stage};
use crate::module_timing::{self, command};
use crate::runner::Runner;
use crate::status::Status;

impl<A: AtClient, C: ModemConfig> Runner<A, C> {
    pub(crate) fn attach_network(&mut self) -> Result<(), Error> {
        match self.send(Stage::Attach, &GetGPRSAttached, command::attach_query())? {
            Status::Attachment => match AttachState::parse(self.at.response()) {
                AttachState::Attached => {
                    diag!(self.diagnostics, "PS domain already attached");
                }
                AttachState::Detached => {
                    diag!(self.diagnostics, "PS domain detached, attaching");
                    self.require(
                        Stage::Attach,
                        &SetGPRSAttached {
                            state: AttachState::Attached,
                        },
                        command::attach(),
                        Status::Ok,
                    )?;
                    diag!(self.diagnostics, "PS domain attached");
                }
                AttachState::Invalid => {
                    diag!(self.diagnostics, "[CGATT] malformed attach state");
                    return Err(Error::new(Stage::Attach, Reason::InvalidResponse));
                }
            },
            other => {
                diag!(self.diagnostics, "[CGATT] query failed: {:?}", other);
                return Err(Error::new(Stage::Attach, Reason::Status(other)));
            }
        }
        self.at.delay(module_timing::step_settle_time());
        Ok(())
    }

    /// Replace any stale context with a fresh definition and activate it.
    pub(crate) fn setup_pdp_context(&mut self) -> Result<(), Error> {
        let cid = C::CONTEXT_ID;

        // Nothing to delete is a valid starting point
        let delete = DeletePdpContext { cid };
        match self.send(Stage::PdpContext, &delete, command::pdp_context())? {
            Status::Ok => debug!("PDP context {} deleted", cid.0),
            other => warn!("Failed to delete PDP context: {:?}, proceeding", other),
        }

        let define = SetPdpContextDefinition::new(cid, C::PDP_TYPE, C::APN)
            .map_err(|e| Error::new(Stage::PdpContext, e.into()))?;
        self.require(Stage::PdpContext, &define, command::pdp_context(), Status::Ok)?;
        diag!(
            self.diagnostics,
            "PDP context set: cid {}, {}, APN {}",
            cid.0,
            define.pdp_type,
            define.apn
        );

        let activate = SetPdpContextState {
            state: PdpContextState::Activated,
            cid,
        };
        self.require(Stage::PdpContext, &activate, command::pdp_context(), Status::Ok)?;
        diag!(self.diagnostics, "PDP context activated");
        Ok(())
    }

    /// Query the address assigned to the configured context.
    pub fn ip_address(&mut self) -> Result<IpState, Error> {
        let cmd = GetPdpAddress { cid: C::CONTEXT_ID };
        match self.send(Stage::IpAddress, &cmd, command::pdp_context())? {
            Status::IpAddress => Ok(IpState::parse(self.at.response())),
            other => Err(Error::new(Stage::IpAddress, Reason::Status(other))),
        }
    }

    pub(crate) fn confirm_ip_address(&mut self) -> Result<IpState, Error> {
        let state = self.ip_address()?;
        match &state {
            IpState::Active(addr) => {
                diag!(self.diagnostics, "Assigned IP address: {}", addr.as_str());
            }
            IpState::NotActive => {
                diag!(
                    self.diagnostics,
                    "[CGPADDR] context defined but not active"
                );
                return Err(Error::new(Stage::IpAddress, Reason::ContextNotActive));
            }
            IpState::Invalid => {
                diag!(self.diagnostics, "[CGPADDR] malformed address line");
                return Err(Error::new(Stage::IpAddress, Reason::InvalidResponse));
            }
        }
        self.at.delay(module_timing::step_settle_time());
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::psn::types::{ContextId, PdpType};
    use crate::config::DefaultConfig;
    use crate::test_helpers::FakeAt;
    use embassy_time::Duration;
    use no_std_net::Ipv4Addr;

    fn runner(at: FakeAt) -> Runner<FakeAt, DefaultConfig> {
        Runner::new(at)
    }

    #[test]
    fn attached_proceeds() {
        let mut runner = runner(FakeAt::new().then(Status::Attachment, "\r\n+CGATT: 1\r\n"));
        assert_eq!(runner.attach_network(), Ok(()));
        let at = runner.release();
        assert_eq!(at.commands(), ["AT+CGATT?\r"]);
        assert_eq!(at.delays, [Duration::from_secs(1)]);
    }

    #[test]
    fn detached_attaches_with_long_timeout() {
        let at = FakeAt::new()
            .then(Status::Attachment, "\r\n+CGATT: 0\r\n")
            .ok();
        let mut runner = runner(at);
        assert_eq!(runner.attach_network(), Ok(()));
        let at = runner.release();
        assert_eq!(at.commands(), ["AT+CGATT?\r", "AT+CGATT=1\r"]);
        assert_eq!(at.timeouts_of("AT+CGATT=1\r"), [Duration::from_secs(5)]);
    }

    #[test]
    fn attach_failures() {
        let at = FakeAt::new()
            .then(Status::Attachment, "\r\n+CGATT: 0\r\n")
            .then(Status::Error, "\r\nERROR\r\n");
        let err = runner(at).attach_network().unwrap_err();
        assert_eq!(err, Error::new(Stage::Attach, Reason::Status(Status::Error)));
        assert_eq!(err.code(), -6);

        let at = FakeAt::new().then(Status::Attachment, "\r\n+CGATT: 7\r\n");
        assert_eq!(
            runner(at).attach_network(),
            Err(Error::new(Stage::Attach, Reason::InvalidResponse))
        );

        assert_eq!(
            runner(FakeAt::new()).attach_network(),
            Err(Error::new(Stage::Attach, Reason::Status(Status::Timeout)))
        );
    }

    #[test]
    fn context_delete_failure_is_tolerated() {
        let at = FakeAt::new()
            .then(Status::Error, "\r\nERROR\r\n")
            .ok()
            .ok();
        let mut runner = runner(at);
        assert_eq!(runner.setup_pdp_context(), Ok(()));
        assert_eq!(
            runner.release().commands(),
            [
                "AT+CGDCONT=1\r",
                "AT+CGDCONT=1,\"IP\",\"internet\"\r",
                "AT+CGACT=1,1\r"
            ]
        );
    }

    #[test]
    fn context_define_and_activate_are_fatal() {
        let at = FakeAt::new().ok().then(Status::CmeError, "\r\n+CME ERROR: 4\r\n");
        let err = runner(at).setup_pdp_context().unwrap_err();
        assert_eq!(
            err,
            Error::new(Stage::PdpContext, Reason::Status(Status::CmeError))
        );
        assert_eq!(err.code(), -7);

        let at = FakeAt::new().ok().ok().then(Status::Error, "\r\nERROR\r\n");
        assert_eq!(
            runner(at).setup_pdp_context(),
            Err(Error::new(Stage::PdpContext, Reason::Status(Status::Error)))
        );
    }

    #[test]
    fn custom_context_configuration() {
        struct Private;
        impl ModemConfig for Private {
            const CONTEXT_ID: ContextId = ContextId(3);
            const PDP_TYPE: PdpType = PdpType::Ipv4v6;
            const APN: &'static str = "m2m.corp";
        }
        let mut runner: Runner<_, Private> = Runner::new(FakeAt::new().ok().ok().ok());
        assert_eq!(runner.setup_pdp_context(), Ok(()));
        assert_eq!(
            runner.release().commands(),
            [
                "AT+CGDCONT=3\r",
                "AT+CGDCONT=3,\"IPV4V6\",\"m2m.corp\"\r",
                "AT+CGACT=1,3\r"
            ]
        );
    }

    #[test]
    fn operator_apn_with_dual_stack_fits() {
        struct Operator;
        impl ModemConfig for Operator {
            const PDP_TYPE: PdpType = PdpType::Ipv4v6;
            const APN: &'static str = "internet.operator.example";
        }
        let mut runner: Runner<_, Operator> = Runner::new(FakeAt::new().ok().ok().ok());
        assert_eq!(runner.setup_pdp_context(), Ok(()));
        assert_eq!(
            runner.release().commands()[1],
            "AT+CGDCONT=1,\"IPV4V6\",\"internet.operator.example\"\r"
        );
    }

    #[test]
    fn apn_too_long_for_command_buffer() {
        struct LongApn;
        impl ModemConfig for LongApn {
            const APN: &'static str = "a.very.long.access.point.name.that.keeps.going.past.the.limit.\
                                       of.ninety.nine.characters.for.any.operator.apn";
        }
        let mut runner: Runner<_, LongApn> = Runner::new(FakeAt::new().ok());
        assert_eq!(
            runner.setup_pdp_context(),
            Err(Error::new(Stage::PdpContext, Reason::CommandTooLong))
        );
        assert_eq!(runner.release().commands(), ["AT+CGDCONT=1\r"]);
    }

    #[test]
    fn active_address() {
        let at = FakeAt::new().then(Status::IpAddress, "\r\n+CGPADDR: 1,10.64.12.7\r\n\r\nOK\r\n");
        let mut runner = runner(at);
        let state = runner.confirm_ip_address().unwrap();
        assert_eq!(state.ipv4(), Some(Ipv4Addr::new(10, 64, 12, 7)));
        assert_eq!(runner.release().delays, [Duration::from_secs(1)]);
    }

    #[test]
    fn inactive_and_malformed_address_are_distinct() {
        let at = FakeAt::new().then(Status::IpAddress, "\r\n+CGPADDR: 1,\r\n\r\nOK\r\n");
        let err = runner(at).confirm_ip_address().unwrap_err();
        assert_eq!(err, Error::new(Stage::IpAddress, Reason::ContextNotActive));
        assert_eq!(err.code(), -8);

        let at = FakeAt::new().then(Status::IpAddress, "\r\n+CGPADDR: x\r\n");
        assert_eq!(
            runner(at).confirm_ip_address(),
            Err(Error::new(Stage::IpAddress, Reason::InvalidResponse))
        );

        assert_eq!(
            runner(FakeAt::new().then(Status::Error, "\r\nERROR\r\n")).ip_address(),
            Err(Error::new(Stage::IpAddress, Reason::Status(Status::Error)))
        );
    }
}
