use crate::client::AtClient;
use crate::command::http::{HttpInitialize, HttpTerminate, SetHttpParameter};
use crate::config::ModemConfig;
use crate::error::{Error, Stage};
use crate::module_timing::{self, command};
use crate::runner::Runner;
use crate::status::Status;

impl<A: AtClient, C: ModemConfig> Runner<A, C> {
    /// Start a clean HTTP session targeting `url`.
    pub(crate) fn setup_http(&mut self, url: &str) -> Result<(), Error> {
        // Best effort, answers ERROR when no session is open
        let status = self.send(Stage::Http, &HttpTerminate, command::http_terminate())?;
        debug!("HTTP terminate: {:?}", status);

        self.require(
            Stage::Http,
            &HttpInitialize,
            command::http_setup(),
            Status::Ok,
        )?;
        diag!(self.diagnostics, "HTTP service initialized");

        let content_type = SetHttpParameter::content_type(C::HTTP_CONTENT_TYPE)
            .map_err(|e| Error::new(Stage::Http, e.into()))?;
        self.require(Stage::Http, &content_type, command::http_setup(), Status::Ok)?;
        diag!(self.diagnostics, "HTTP content type set");

        let url_cmd = match SetHttpParameter::url(url) {
            Ok(cmd) => cmd,
            Err(e) => {
                diag!(self.diagnostics, "[HTTPPARA] URL too long");
                return Err(Error::new(Stage::Http, e.into()));
            }
        };
        self.require(Stage::Http, &url_cmd, command::http_setup(), Status::Ok)?;
        diag!(self.diagnostics, "HTTP URL set");

        self.at.delay(module_timing::step_settle_time());
        Ok(())
    }
}
