//! Command transmitter

use embassy_time::Duration;

use crate::transport::{elapsed, Clock, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The transport stayed busy past the budget
    Timeout,
}

/// Write `cmd` one byte at a time, retrying "not ready" immediately.
///
/// Returns the number of bytes written, which is short of `cmd.len()` only
/// when the transport reported a hard error.
pub fn write_command<T: Transport, C: Clock>(
    transport: &mut T,
    clock: &C,
    cmd: &[u8],
    timeout: Duration,
) -> Result<usize, Error> {
    let start = clock.now();
    let mut sent = 0;
    while sent < cmd.len() {
        match transport.write_byte(cmd[sent]) {
            Ok(()) => {
                sent += 1;
                continue;
            }
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(_)) => {
                warn!("Serial write failed after {} of {} bytes", sent, cmd.len());
                return Ok(sent);
            }
        }
        if elapsed(clock, start) > timeout {
            debug!("TX timeout after {} of {} bytes", sent, cmd.len());
            return Err(Error::Timeout);
        }
    }
    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::mock_modem;

    #[test]
    fn sends_every_byte() {
        let (mut serial, clock, modem) = mock_modem();
        assert_eq!(
            write_command(&mut serial, &clock, b"AT\r", Duration::from_millis(100)),
            Ok(3)
        );
        assert_eq!(modem.written(), b"AT\r");
    }

    #[test]
    fn stalled_transport_times_out() {
        let (mut serial, clock, modem) = mock_modem();
        modem.stall_tx();
        assert_eq!(
            write_command(&mut serial, &clock, b"AT\r", Duration::from_millis(100)),
            Err(Error::Timeout)
        );
        assert!(modem.written().is_empty());
        assert!(modem.now_ms() > 100);
    }

    #[test]
    fn hard_error_reports_partial_count() {
        let (mut serial, clock, modem) = mock_modem();
        modem.fail_tx_after(2);
        assert_eq!(
            write_command(&mut serial, &clock, b"AT+CSQ\r", Duration::from_millis(100)),
            Ok(2)
        );
        assert_eq!(modem.written(), b"AT");
    }
}
