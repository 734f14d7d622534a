pub const DEFAULT_LONG_POLL_WAIT_SECS: u64 = 25;
pub const DEFAULT_ERROR_RETRY_DELAY_MS: u64 = 1_000;

/// Extra time on top of `wait` before the HTTP client gives up on an `a_check` call.
pub(super) const LONG_POLL_REQUEST_TIMEOUT_SLACK_SECS: u64 = 10;

pub(super) const LONG_POLL_FAILED_OK: i64 = 0;
pub(super) const LONG_POLL_FAILED_NEW_TS: i64 = 1;
pub(super) const LONG_POLL_FAILED_KEY_EXPIRED: i64 = 2;
pub(super) const LONG_POLL_FAILED_KEY_AND_TS_EXPIRED: i64 = 3;
