//! Single source of truth for persisted token material.
//!
//! All local-storage access for credentials goes through this module so
//! sign-out and expiry can purge everything in one place.

use gloo_storage::{LocalStorage, Storage};

pub const TOKEN_KEY: &str = "deeptalk_token";
pub const TOKEN_TIMESTAMP_KEY: &str = "deeptalk_token_timestamp";

// Keys from before the rename; migrated on first read, then removed.
const LEGACY_TOKEN_KEY: &str = "gmail_token";
const LEGACY_TIMESTAMP_KEY: &str = "gmail_token_timestamp";

/// Tokens older than this are purged without contacting the backend.
pub const TOKEN_MAX_AGE_MS: i64 = 7 * 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredToken {
    pub token: String,
    pub timestamp_ms: i64,
}

/// True while the token is inside its 7-day validity window.
pub fn is_fresh(timestamp_ms: i64, now_ms: i64) -> bool {
    now_ms.saturating_sub(timestamp_ms) < TOKEN_MAX_AGE_MS
}

pub fn get() -> Option<StoredToken> {
    migrate_legacy();

    let token: String = LocalStorage::get(TOKEN_KEY).ok()?;
    if token.is_empty() {
        return None;
    }
    let timestamp_ms: i64 = LocalStorage::get(TOKEN_TIMESTAMP_KEY).ok().unwrap_or(0);
    Some(StoredToken {
        token,
        timestamp_ms,
    })
}

pub fn set(token: &str, timestamp_ms: i64) {
    LocalStorage::set(TOKEN_KEY, token).ok();
    LocalStorage::set(TOKEN_TIMESTAMP_KEY, timestamp_ms).ok();
}

/// Removes current and legacy keys. Never fails, so sign-out can always
/// complete locally even when the backend is unreachable.
pub fn clear() {
    LocalStorage::delete(TOKEN_KEY);
    LocalStorage::delete(TOKEN_TIMESTAMP_KEY);
    LocalStorage::delete(LEGACY_TOKEN_KEY);
    LocalStorage::delete(LEGACY_TIMESTAMP_KEY);
}

/// Moves a token stored under the old key names to the current ones.
/// An existing current token wins over a legacy one.
fn migrate_legacy() {
    let legacy: Option<String> = LocalStorage::get(LEGACY_TOKEN_KEY).ok();
    if let Some(legacy_token) = legacy.filter(|t| !t.is_empty()) {
        let current: Option<String> = LocalStorage::get(TOKEN_KEY).ok();
        if current.is_none() {
            let legacy_ts: i64 = LocalStorage::get(LEGACY_TIMESTAMP_KEY).ok().unwrap_or(0);
            set(&legacy_token, legacy_ts);
        }
    }
    LocalStorage::delete(LEGACY_TOKEN_KEY);
    LocalStorage::delete(LEGACY_TIMESTAMP_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    #[test]
    fn test_token_within_window_is_fresh() {
        let now = 1_700_000_000_000;
        assert!(is_fresh(now, now));
        assert!(is_fresh(now - 6 * DAY_MS, now));
        assert!(is_fresh(now - (7 * DAY_MS - 1), now));
    }

    #[test]
    fn test_token_at_exactly_seven_days_is_stale() {
        let now = 1_700_000_000_000;
        assert!(!is_fresh(now - 7 * DAY_MS, now));
        assert_eq!(TOKEN_MAX_AGE_MS, 604_800_000);
    }

    #[test]
    fn test_token_older_than_window_is_stale() {
        let now = 1_700_000_000_000;
        assert!(!is_fresh(now - 8 * DAY_MS, now));
    }

    #[test]
    fn test_missing_timestamp_counts_as_stale() {
        // A zero timestamp (unparsable or absent) is far outside the window.
        let now = 1_700_000_000_000;
        assert!(!is_fresh(0, now));
    }
}
