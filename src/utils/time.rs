//! Wall-clock access.

use chrono::Utc;

use crate::models::SignatureError;

/// Current Unix time in whole seconds.
pub fn unix_now() -> Result<u64, SignatureError> {
    let now = Utc::now().timestamp();
    u64::try_from(now)
        .map_err(|_| SignatureError::Clock(format!("system time {now} is before the Unix epoch")))
}
