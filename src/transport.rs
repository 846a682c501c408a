//! Collaborator interfaces consumed by the AT engine.

use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;
use embedded_hal_nb::serial;

/// Non-blocking byte transport to the modem.
///
/// `nb::Error::WouldBlock` means "not ready" when writing and "no data" when
/// reading.
pub trait Transport {
    type Error: serial::Error;

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;
}

impl<S> Transport for S
where
    S: serial::Read<u8> + serial::Write<u8>,
{
    type Error = <S as serial::ErrorType>::Error;

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        serial::Write::write(self, byte)
    }

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        serial::Read::read(self)
    }
}

/// Monotonic millisecond clock with a blocking sleep.
pub trait Clock: DelayNs {
    fn now(&self) -> Instant;
}

/// Time elapsed on `clock` since `since`, saturating at zero.
pub(crate) fn elapsed<C: Clock>(clock: &C, since: Instant) -> Duration {
    clock
        .now()
        .checked_duration_since(since)
        .unwrap_or(Duration::from_ticks(0))
}

pub(crate) fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
