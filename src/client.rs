//! Transaction orchestrator
//!
//! One [`AtClient::send_at`] call is one transaction: write the command, read
//! the reply and classify it into exactly one [`Status`].

use embassy_time::Duration;

use crate::classifier::Classifier;
use crate::fmt::text;
use crate::module_timing;
use crate::reader::{self, Frame, Framing, ResponseBuffer};
use crate::status::Status;
use crate::transmit;
use crate::transport::{elapsed, millis, Clock, Transport};

/// Strictly sequential request/reply access to the modem.
pub trait AtClient {
    /// Run one transaction, waiting at most `timeout` for the reply.
    fn send_at(&mut self, cmd: &str, timeout: Duration) -> Status;

    /// Raw reply of the last transaction. Overwritten by the next one.
    fn response(&self) -> &[u8];

    /// Discard anything the modem sent outside of a transaction.
    fn flush_rx(&mut self);

    fn delay(&mut self, duration: Duration);

    fn set_diagnostics(&mut self, _enabled: bool) {}
}

/// [`AtClient`] over a non-blocking serial transport, with a receive buffer
/// of `RX` bytes.
pub struct Client<T, C, const RX: usize = 128> {
    transport: T,
    clock: C,
    classifier: Classifier,
    framing: Framing,
    rx: ResponseBuffer<RX>,
    diagnostics: bool,
}

impl<T, C, const RX: usize> Client<T, C, RX>
where
    T: Transport,
    C: Clock,
{
    pub fn new(transport: T, clock: C) -> Self {
        Self {
            transport,
            clock,
            classifier: Classifier::default(),
            framing: Framing::default(),
            rx: ResponseBuffer::new(),
            diagnostics: false,
        }
    }

    pub fn with_framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    pub fn release(self) -> (T, C) {
        (self.transport, self.clock)
    }

    fn receive(&mut self, timeout: Duration) -> Status {
        let start = self.clock.now();
        let mut remaining = timeout;
        let mut urc = None;
        loop {
            let frame = match reader::read_response(
                &mut self.transport,
                &self.clock,
                &mut self.rx,
                self.framing,
                remaining,
            ) {
                Ok(frame) => frame,
                Err(reader::Error::NoResponse) if self.rx.is_empty() => return Status::Timeout,
                Err(reader::Error::NoResponse) => break,
                Err(reader::Error::InvalidParameter) => return Status::InvalidParameter,
            };

            // Only a completed line may be followed by more of the same reply
            let more = matches!((self.framing, frame), (Framing::Line(_), Frame::Terminated));
            match self.classifier.classify(self.rx.as_bytes()) {
                // A URC line ahead of the reply; keep reading so the reply
                // is not left behind for the next transaction
                Some(status @ Status::Unsolicited(_)) if more => urc = Some(status),
                Some(status) => return status,
                None if more => {}
                None => break,
            }
            remaining = match timeout.checked_sub(elapsed(&self.clock, start)) {
                Some(r) if r.as_ticks() > 0 => r,
                _ => break,
            };
        }

        if let Some(status) = urc {
            status
        } else if self.rx.is_full() {
            Status::Unparseable
        } else {
            Status::Partial
        }
    }
}

impl<T, C, const RX: usize> AtClient for Client<T, C, RX>
where
    T: Transport,
    C: Clock,
{
    fn send_at(&mut self, cmd: &str, timeout: Duration) -> Status {
        if cmd.is_empty() || RX <= 1 {
            return Status::InvalidParameter;
        }
        self.rx.clear();

        diag!(self.diagnostics, ">>> {}", cmd.trim_end());
        let len = cmd.len();
        match transmit::write_command(
            &mut self.transport,
            &self.clock,
            cmd.as_bytes(),
            module_timing::tx_timeout(),
        ) {
            Ok(sent) if sent == len => {}
            Ok(sent) => {
                diag!(self.diagnostics, "TX failure, sent {} of {} bytes", sent, len);
                return Status::TxFailure;
            }
            Err(transmit::Error::Timeout) => {
                diag!(self.diagnostics, "TX timeout");
                return Status::TxTimeout;
            }
        }

        let status = self.receive(timeout);
        diag!(
            self.diagnostics,
            "<<< {:?} {}",
            status,
            text(self.rx.as_bytes()).trim()
        );
        status
    }

    fn response(&self) -> &[u8] {
        self.rx.as_bytes()
    }

    fn flush_rx(&mut self) {
        self.rx.clear();
        let mut drained = 0usize;
        loop {
            match self.transport.read_byte() {
                Ok(_) => drained += 1,
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(_)) => {
                    debug!("Serial read error while flushing");
                    break;
                }
            }
        }
        trace!("Flushed {} stale bytes", drained);
    }

    fn delay(&mut self, duration: Duration) {
        self.clock.delay_ms(millis(duration));
    }

    fn set_diagnostics(&mut self, enabled: bool) {
        self.diagnostics = enabled;
    }
}
