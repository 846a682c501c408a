//! Maps an accumulated response buffer to a [`Status`].
//!
//! The pattern table is ordered: the first literal found anywhere in the
//! buffer wins. Broad error markers therefore precede the extended error
//! families that contain the same word, and the bare `OK` sits near the end so
//! that it never masks an informational line earlier in a multi-line reply.

use crate::command::parse::find;
use crate::status::{Status, Urc};

/// One entry of the pattern table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub text: &'static str,
    pub status: Status,
}

impl Pattern {
    pub const fn new(text: &'static str, status: Status) -> Self {
        Self { text, status }
    }
}

/// Default table for SIM7600 family modules.
pub const DEFAULT_PATTERNS: &[Pattern] = &[
    // Must be checked before the extended error families
    Pattern::new("ERROR\r\n", Status::Error),
    Pattern::new("+CME ERROR:", Status::CmeError),
    Pattern::new("+CMS ERROR:", Status::CmsError),
    Pattern::new("+CREG: ", Status::Registration),
    Pattern::new("+CGATT: ", Status::Attachment),
    Pattern::new("+CGPADDR: ", Status::IpAddress),
    Pattern::new("+CGPS: ", Status::GpsState),
    Pattern::new("+CGPSINFO: ", Status::GpsInfo),
    Pattern::new("+CSQ: ", Status::SignalQuality),
    Pattern::new("+HTTPACTION: ", Status::HttpAction),
    Pattern::new("+CPIN: READY", Status::SimReady),
    Pattern::new("+CPIN: SIM PIN", Status::SimPin),
    Pattern::new("+CPIN: SIM PUK", Status::SimPuk),
    Pattern::new("+CPIN: PH-SIM PIN", Status::PhSimPin),
    // Catch-all for the remaining SIM states, below the fixed strings
    Pattern::new("+CPIN: ", Status::SimStatus),
    Pattern::new("NO CARRIER\r\n", Status::NoCarrier),
    Pattern::new("CONNECT\r\n", Status::Connect),
    Pattern::new("DOWNLOAD\r\n", Status::DownloadReady),
    Pattern::new("OK\r\n", Status::Ok),
    Pattern::new("RDY\r\n", Status::Unsolicited(Urc::ModuleReady)),
    Pattern::new("SMS DONE\r\n", Status::Unsolicited(Urc::SmsDone)),
    Pattern::new("PB DONE\r\n", Status::Unsolicited(Urc::PhonebookDone)),
];

/// Response classifier over an immutable, statically constructed pattern table.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    patterns: &'static [Pattern],
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERNS)
    }
}

impl Classifier {
    pub const fn new(patterns: &'static [Pattern]) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &'static [Pattern] {
        self.patterns
    }

    /// Classify `response`.
    ///
    /// Returns `None` when no pattern matches, meaning more data is needed
    /// (or, after a one-shot read, that the reply is unrecognized).
    pub fn classify(&self, response: &[u8]) -> Option<Status> {
        self.patterns
            .iter()
            .find(|p| find(response, p.text.as_bytes()).is_some())
            .map(|p| p.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn every_entry_is_reachable() {
        let classifier = Classifier::default();
        for (i, pattern) in DEFAULT_PATTERNS.iter().enumerate() {
            // Skip entries shadowed by a higher priority literal they contain
            let shadowed = DEFAULT_PATTERNS[..i]
                .iter()
                .any(|p| find(pattern.text.as_bytes(), p.text.as_bytes()).is_some());
            if shadowed {
                continue;
            }
            assert_eq!(
                classifier.classify(pattern.text.as_bytes()),
                Some(pattern.status),
                "{}",
                pattern.text
            );
        }
    }

    #[test]
    fn unsolicited_lines_rank_below_final_results() {
        let patterns = Classifier::default().patterns();
        assert_eq!(patterns, DEFAULT_PATTERNS);
        let ok = patterns
            .iter()
            .position(|p| p.status == Status::Ok)
            .unwrap();
        for (i, pattern) in patterns.iter().enumerate() {
            if matches!(pattern.status, Status::Unsolicited(_)) {
                assert!(i > ok, "{}", pattern.text);
            }
        }
        assert_eq!(
            Classifier::default().classify(b"\r\nPB DONE\r\n\r\nOK\r\n"),
            Some(Status::Ok)
        );
    }

    #[test]
    fn generic_sim_status_is_shadowed_by_fixed_strings() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify(b"\r\n+CPIN: SIM PUK\r\n"),
            Some(Status::SimPuk)
        );
        assert_eq!(
            classifier.classify(b"\r\n+CPIN: SIM PIN2\r\n"),
            Some(Status::SimPin)
        );
        assert_eq!(
            classifier.classify(b"\r\n+CPIN: PH-NET PIN\r\n"),
            Some(Status::SimStatus)
        );
    }

    #[test]
    fn table_without_generic_sim_status() {
        static FIXED_ONLY: &[Pattern] = &[
            Pattern::new("ERROR\r\n", Status::Error),
            Pattern::new("+CPIN: READY", Status::SimReady),
            Pattern::new("OK\r\n", Status::Ok),
        ];
        let classifier = Classifier::new(FIXED_ONLY);
        assert_eq!(classifier.classify(b"+CPIN: PH-NET PIN\r\n"), None);
        assert_eq!(
            classifier.classify(b"+CPIN: PH-NET PIN\r\n\r\nOK\r\n"),
            Some(Status::Ok)
        );
    }

    #[test]
    fn unknown_text_needs_more_data() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify(b""), None);
        assert_eq!(classifier.classify(b"AT+CSQ\r"), None);
        assert_eq!(classifier.classify(b"\r\nO"), None);
        assert_eq!(classifier.classify(b"\r\nOK"), None);
    }

    #[test]
    fn plain_error_wins_over_extended_error() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify(b"\r\n+CME ERROR: 10\r\n\r\nERROR\r\n"),
            Some(Status::Error)
        );
        assert_eq!(
            classifier.classify(b"\r\n+CME ERROR: 10\r\n"),
            Some(Status::CmeError)
        );
    }

    #[test]
    fn informational_line_wins_over_trailing_ok() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify(b"AT+CREG?\r\r\n+CREG: 0,1\r\n\r\nOK\r\n"),
            Some(Status::Registration)
        );
        assert_eq!(
            classifier.classify(b"\r\n+CGPSINFO: ,,,,,,,,\r\n\r\nOK\r\n"),
            Some(Status::GpsInfo)
        );
        assert_eq!(
            classifier.classify(b"\r\n+CGPS: 0,1\r\n\r\nOK\r\n"),
            Some(Status::GpsState)
        );
    }

    #[test]
    fn boot_urcs() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify(b"\r\nRDY\r\n"),
            Some(Status::Unsolicited(Urc::ModuleReady))
        );
        assert_eq!(
            classifier.classify(b"\r\n+CPIN: READY\r\n\r\nSMS DONE\r\n"),
            Some(Status::SimReady)
        );
    }

    proptest! {
        #[test]
        fn classification_is_pure(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
            let classifier = Classifier::default();
            let first = classifier.classify(&bytes);
            prop_assert_eq!(first, classifier.classify(&bytes));
        }

        #[test]
        fn first_match_wins(i in 0usize..DEFAULT_PATTERNS.len(), j in 0usize..DEFAULT_PATTERNS.len()) {
            let classifier = Classifier::default();
            let mut buf = std::vec::Vec::new();
            buf.extend_from_slice(DEFAULT_PATTERNS[j].text.as_bytes());
            buf.extend_from_slice(b"\r\n");
            buf.extend_from_slice(DEFAULT_PATTERNS[i].text.as_bytes());
            let status = classifier.classify(&buf);
            let expected = DEFAULT_PATTERNS
                .iter()
                .find(|p| find(&buf, p.text.as_bytes()).is_some())
                .map(|p| p.status);
            prop_assert_eq!(status, expected);
            prop_assert!(DEFAULT_PATTERNS[..=i.min(j)]
                .iter()
                .any(|p| Some(p.status) == status));
        }
    }
}
