use reqwest::Url;

use super::LongPollError;
use super::constants::{
    LONG_POLL_FAILED_KEY_AND_TS_EXPIRED, LONG_POLL_FAILED_KEY_EXPIRED, LONG_POLL_FAILED_NEW_TS,
};

/// Fresh credentials from `groups.getLongPollServer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredSession {
    pub key: String,
    pub server: Url,
    pub ts: String,
}

/// Long-poll credentials and cursor. Owned by one poll loop; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LongPollSession {
    key: String,
    server: Option<Url>,
    ts: String,
}

impl LongPollSession {
    /// Usable for `a_check` without another `getLongPollServer` call.
    pub fn is_active(&self) -> bool {
        self.server.is_some() && !self.key.is_empty() && !self.ts.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn server(&self) -> Option<&Url> {
        self.server.as_ref()
    }

    pub fn ts(&self) -> &str {
        &self.ts
    }

    /// Installs fresh credentials. A cursor that survived a key-only expiry is kept so
    /// no events between the two servers' cursors are skipped.
    pub fn adopt(&mut self, acquired: AcquiredSession) {
        let previous_ts = std::mem::take(&mut self.ts);
        self.key = acquired.key;
        self.server = Some(acquired.server);
        self.ts = if previous_ts.is_empty() {
            acquired.ts
        } else {
            previous_ts
        };
    }

    /// Advances the cursor after a batch was handed off.
    pub fn commit(&mut self, ts: impl Into<String>) {
        self.ts = ts.into();
    }

    /// Applies a non-zero `failed` code. Codes 1..=3 are recoverable; anything else is
    /// [`LongPollError::UnknownFailure`] and leaves the session unchanged.
    pub fn apply_failure(&mut self, failed: i64, ts: Option<&str>) -> Result<(), LongPollError> {
        match failed {
            LONG_POLL_FAILED_NEW_TS => {
                if let Some(ts) = ts.filter(|ts| !ts.is_empty()) {
                    self.ts = ts.to_string();
                }
                Ok(())
            }
            LONG_POLL_FAILED_KEY_EXPIRED => {
                self.key.clear();
                Ok(())
            }
            LONG_POLL_FAILED_KEY_AND_TS_EXPIRED => {
                self.key.clear();
                self.ts.clear();
                Ok(())
            }
            _ => Err(LongPollError::UnknownFailure(failed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acquired(key: &str, ts: &str) -> AcquiredSession {
        AcquiredSession {
            key: key.to_string(),
            server: Url::parse("https://lp.vk.test/wh1").expect("valid url"),
            ts: ts.to_string(),
        }
    }

    #[test]
    fn fresh_session_takes_acquired_cursor() {
        let mut session = LongPollSession::default();
        assert!(!session.is_active());
        session.adopt(acquired("k1", "10"));
        assert!(session.is_active());
        assert_eq!(session.ts(), "10");
    }

    #[test]
    fn key_expiry_keeps_cursor_across_reacquire() {
        let mut session = LongPollSession::default();
        session.adopt(acquired("k1", "10"));
        session.commit("15");
        session.apply_failure(2, None).expect("code 2 is recoverable");
        assert!(!session.is_active());
        session.adopt(acquired("k2", "40"));
        assert_eq!(session.key(), "k2");
        assert_eq!(session.ts(), "15");
    }

    #[test]
    fn key_and_ts_expiry_resets_cursor() {
        let mut session = LongPollSession::default();
        session.adopt(acquired("k1", "10"));
        session.apply_failure(3, None).expect("code 3 is recoverable");
        session.adopt(acquired("k2", "40"));
        assert_eq!(session.ts(), "40");
    }

    #[test]
    fn new_ts_failure_adopts_returned_cursor() {
        let mut session = LongPollSession::default();
        session.adopt(acquired("k1", "10"));
        session.apply_failure(1, Some("33")).expect("code 1 is recoverable");
        assert_eq!(session.ts(), "33");
        assert!(session.is_active());
    }

    #[test]
    fn unknown_failure_is_rejected_without_mutation() {
        let mut session = LongPollSession::default();
        session.adopt(acquired("k1", "10"));
        let before = session.clone();
        let err = session.apply_failure(4, Some("99")).expect_err("4 is not a known code");
        assert!(matches!(err, LongPollError::UnknownFailure(4)));
        assert_eq!(session, before);
    }
}
