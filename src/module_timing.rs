use embassy_time::Duration;

/// Budget for writing one command to the UART
pub fn tx_timeout() -> Duration {
    Duration::from_millis(100)
}

/// Quiet time after which a silence framed response is considered complete
pub fn inter_char_silence() -> Duration {
    Duration::from_millis(50)
}

/// Time to wait for module to boot after `+CFUN=1,1`
pub fn boot_time() -> Duration {
    Duration::from_secs(40)
}

/// Time for the SIM to settle after unlocking, while it reports
/// `SMS DONE` / `PB DONE`
pub fn sim_settle_time() -> Duration {
    Duration::from_secs(5)
}

/// Pause between bring-up steps
pub fn step_settle_time() -> Duration {
    Duration::from_secs(1)
}

/// `+CREG?` response timeout on the first registration attempt
pub fn registration_first_timeout() -> Duration {
    Duration::from_secs(5)
}

/// `+CREG?` response timeout on subsequent attempts
pub fn registration_poll_timeout() -> Duration {
    Duration::from_secs(1)
}

/// Pause between registration attempts
pub fn registration_poll_interval() -> Duration {
    Duration::from_secs(3)
}

/// Maximum response time per command.
pub mod command {
    use embassy_time::Duration;

    pub fn reset() -> Duration {
        Duration::from_millis(500)
    }

    pub fn at() -> Duration {
        Duration::from_millis(500)
    }

    /// `+CPIN?` and `+CPIN=<pin>`
    pub fn pin() -> Duration {
        Duration::from_secs(1)
    }

    pub fn signal_quality() -> Duration {
        Duration::from_secs(1)
    }

    pub fn attach_query() -> Duration {
        Duration::from_secs(1)
    }

    /// Attaching to the PS domain may take several seconds
    pub fn attach() -> Duration {
        Duration::from_secs(5)
    }

    /// `+CGDCONT`, `+CGACT` and `+CGPADDR`
    pub fn pdp_context() -> Duration {
        Duration::from_millis(500)
    }

    pub fn http_terminate() -> Duration {
        Duration::from_millis(300)
    }

    /// `+HTTPINIT` and `+HTTPPARA`
    pub fn http_setup() -> Duration {
        Duration::from_millis(500)
    }

    pub fn gps_session() -> Duration {
        Duration::from_millis(500)
    }

    pub fn gps_info() -> Duration {
        Duration::from_secs(1)
    }
}
