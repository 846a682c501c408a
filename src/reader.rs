//! Response reader
//!
//! Accumulates modem output into a bounded buffer under one of two framing
//! disciplines, polling the transport without backoff against a deadline.

use embassy_time::Duration;

use crate::module_timing;
use crate::transport::{elapsed, Clock, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The buffer cannot hold a single byte plus its terminator
    InvalidParameter,
    /// Nothing arrived before the timeout
    NoResponse,
}

/// How a byte stream is cut into one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Framing {
    /// Stop once the line has been quiet for longer than the given gap,
    /// after at least one byte
    Silence(Duration),
    /// Stop after the given terminator byte
    Line(u8),
}

impl Default for Framing {
    fn default() -> Self {
        Self::Silence(module_timing::inter_char_silence())
    }
}

/// Why a read that received data stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frame {
    /// Inactivity gap observed
    Silence,
    /// Terminator byte received
    Terminated,
    /// Buffer holds `N - 1` bytes
    Full,
    /// Timeout elapsed with framing incomplete
    Expired,
}

/// Receive buffer of capacity `N`, holding at most `N - 1` bytes and always
/// zero terminated.
pub struct ResponseBuffer<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Default for ResponseBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ResponseBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Contents including the zero terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        match N {
            0 => &[],
            _ => &self.buf[..=self.len],
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len + 1 >= N
    }

    pub fn clear(&mut self) {
        self.len = 0;
        if let Some(first) = self.buf.first_mut() {
            *first = 0;
        }
    }

    fn push(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.buf[self.len] = byte;
        self.len += 1;
        self.buf[self.len] = 0;
        true
    }
}

/// Append one response to `buf`.
///
/// Bytes already in `buf` are kept, so terminator framed lines can be
/// accumulated across calls.
pub fn read_response<T: Transport, C: Clock, const N: usize>(
    transport: &mut T,
    clock: &C,
    buf: &mut ResponseBuffer<N>,
    framing: Framing,
    timeout: Duration,
) -> Result<Frame, Error> {
    if N <= 1 {
        return Err(Error::InvalidParameter);
    }
    if buf.is_full() {
        return Ok(Frame::Full);
    }

    let start = clock.now();
    let mut last_rx = start;
    let mut received = 0usize;

    loop {
        match transport.read_byte() {
            Ok(byte) => {
                last_rx = clock.now();
                received += 1;
                buf.push(byte);
                if framing == Framing::Line(byte) {
                    return Ok(Frame::Terminated);
                }
                if buf.is_full() {
                    return Ok(Frame::Full);
                }
            }
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(_)) => {
                debug!("Serial read error, continuing to poll");
            }
        }

        if let Framing::Silence(gap) = framing {
            if received > 0 && elapsed(clock, last_rx) > gap {
                return Ok(Frame::Silence);
            }
        }
        if elapsed(clock, start) >= timeout {
            return match received {
                0 => Err(Error::NoResponse),
                _ => Ok(Frame::Expired),
            };
        }
    }
}
