//! Test doubles: a virtual-time serial line driven by scripted modem replies,
//! and a scripted [`AtClient`] for exercising the bring-up sequence.

use core::cell::RefCell;
use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;
use embedded_hal_nb::serial::{self, ErrorKind};
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::sync::Once;
use std::vec::Vec;

use crate::client::AtClient;
use crate::status::Status;
use crate::transport::Clock;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .is_test(true)
            .init();
    });
}

#[derive(Default)]
struct Line {
    now_ms: u64,
    rx: VecDeque<(u64, u8)>,
    replies: VecDeque<Vec<u8>>,
    written: Vec<u8>,
    pending: Vec<u8>,
    commands: Vec<String>,
    delays: Vec<u32>,
    stall_tx: bool,
    fail_tx_after: Option<usize>,
}

impl Line {
    fn schedule(&mut self, at_ms: u64, bytes: &[u8]) {
        let mut at = at_ms;
        for &b in bytes {
            self.rx.push_back((at, b));
            at += 1;
        }
    }
}

/// Serial side of the mock. Every poll costs one millisecond of virtual time.
pub struct MockSerial(Rc<RefCell<Line>>);

/// Clock side of the mock, sharing virtual time with [`MockSerial`].
pub struct MockClock(Rc<RefCell<Line>>);

/// Handle for scripting the modem and inspecting what the engine did.
pub struct Modem(Rc<RefCell<Line>>);

pub fn mock_modem() -> (MockSerial, MockClock, Modem) {
    init_logger();
    let line = Rc::new(RefCell::new(Line::default()));
    (
        MockSerial(line.clone()),
        MockClock(line.clone()),
        Modem(line),
    )
}

impl serial::ErrorType for MockSerial {
    type Error = ErrorKind;
}

impl serial::Write<u8> for MockSerial {
    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        let mut line = self.0.borrow_mut();
        line.now_ms += 1;
        if line.stall_tx {
            return Err(nb::Error::WouldBlock);
        }
        if line.fail_tx_after == Some(line.written.len()) {
            return Err(nb::Error::Other(ErrorKind::Other));
        }
        line.written.push(word);
        line.pending.push(word);
        if word == b'\r' {
            let cmd = core::mem::take(&mut line.pending);
            line.commands
                .push(String::from_utf8_lossy(&cmd).into_owned());
            if let Some(reply) = line.replies.pop_front() {
                let at = line.now_ms + 2;
                line.schedule(at, &reply);
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }
}

impl serial::Read<u8> for MockSerial {
    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        let mut line = self.0.borrow_mut();
        let now = line.now_ms;
        line.now_ms += 1;
        match line.rx.front() {
            Some(&(at, byte)) if at <= now => {
                line.rx.pop_front();
                Ok(byte)
            }
            _ => Err(nb::Error::WouldBlock),
        }
    }
}

impl DelayNs for MockClock {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().now_ms += u64::from(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        let mut line = self.0.borrow_mut();
        line.now_ms += u64::from(ms);
        line.delays.push(ms);
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        Instant::from_millis(self.0.borrow().now_ms)
    }
}

impl Modem {
    /// Queue the reply to the next command, sent starting 2 ms after its
    /// `\r` at one byte per millisecond.
    pub fn reply(&self, text: &str) {
        self.0.borrow_mut().replies.push_back(text.as_bytes().to_vec());
    }

    /// Let the next command go unanswered.
    pub fn no_reply(&self) {
        self.0.borrow_mut().replies.push_back(Vec::new());
    }

    /// Send `bytes` unprompted, starting at `at_ms`.
    pub fn feed_at(&self, at_ms: u64, bytes: &[u8]) {
        self.0.borrow_mut().schedule(at_ms, bytes);
    }

    pub fn stall_tx(&self) {
        self.0.borrow_mut().stall_tx = true;
    }

    /// Fail the write once `n` bytes have gone out.
    pub fn fail_tx_after(&self, n: usize) {
        self.0.borrow_mut().fail_tx_after = Some(n);
    }

    pub fn now_ms(&self) -> u64 {
        self.0.borrow().now_ms
    }

    pub fn written(&self) -> Vec<u8> {
        self.0.borrow().written.clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.0.borrow().commands.clone()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.0.borrow().delays.clone()
    }
}

/// Scripted [`AtClient`] returning one canned `(Status, reply)` per command.
///
/// Once the script runs out every command times out.
#[derive(Default)]
pub struct FakeAt {
    script: VecDeque<(Status, Vec<u8>)>,
    response: Vec<u8>,
    pub sent: Vec<(String, Duration)>,
    pub delays: Vec<Duration>,
    pub flushes: usize,
    pub diagnostics: bool,
}

impl FakeAt {
    pub fn new() -> Self {
        init_logger();
        Self::default()
    }

    pub fn then(mut self, status: Status, reply: &str) -> Self {
        self.script.push_back((status, reply.as_bytes().to_vec()));
        self
    }

    pub fn ok(self) -> Self {
        self.then(Status::Ok, "\r\nOK\r\n")
    }

    pub fn commands(&self) -> Vec<&str> {
        self.sent.iter().map(|(c, _)| c.as_str()).collect()
    }

    pub fn timeouts_of(&self, cmd: &str) -> Vec<Duration> {
        self.sent
            .iter()
            .filter(|(c, _)| c == cmd)
            .map(|&(_, t)| t)
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl AtClient for FakeAt {
    fn send_at(&mut self, cmd: &str, timeout: Duration) -> Status {
        self.sent.push((cmd.into(), timeout));
        match self.script.pop_front() {
            Some((status, reply)) => {
                self.response = reply;
                status
            }
            None => {
                self.response.clear();
                Status::Timeout
            }
        }
    }

    fn response(&self) -> &[u8] {
        &self.response
    }

    fn flush_rx(&mut self) {
        self.flushes += 1;
    }

    fn delay(&mut self, duration: Duration) {
        self.delays.push(duration);
    }

    fn set_diagnostics(&mut self, enabled: bool) {
        self.diagnostics = enabled;
    }
}
