//! In-memory rate limiter implementation.
//!
//! Uses a fixed-window counter algorithm with an in-memory HashMap.
//! Counters are per process, so a multi-instance deployment grants each
//! instance its own quota. Lapsed windows are swept at most once per
//! window length, so the map only holds keys seen in the last window.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};

/// Fixed-window rate limiter for single-server deployments.
#[derive(Debug, Clone)]
pub struct InMemoryRateLimiter {
    /// Attempts allowed per window.
    limit: u32,
    window_secs: u32,
    windows: Arc<RwLock<Windows>>,
}

#[derive(Debug, Default)]
struct Windows {
    entries: HashMap<String, WindowState>,
    /// Unix seconds at or after which the next sweep runs.
    next_sweep_at: i64,
}

/// State for a single rate limit window.
#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    /// Unix seconds at which the window opened.
    window_start: i64,
}

impl InMemoryRateLimiter {
    pub fn new(limit: u32, window_secs: u32) -> Self {
        Self {
            limit,
            window_secs: window_secs.max(1),
            windows: Arc::new(RwLock::new(Windows::default())),
        }
    }

    fn now_secs() -> i64 {
        Timestamp::now().as_unix_secs()
    }

    fn window_end(&self, state: &WindowState) -> i64 {
        state.window_start + i64::from(self.window_secs)
    }

    #[cfg(test)]
    pub(crate) async fn tracked_keys(&self) -> usize {
        self.windows.read().await.entries.len()
    }

    async fn check_at(&self, key: RateLimitKey, now: i64) -> RateLimitResult {
        let mut windows = self.windows.write().await;
        let window = i64::from(self.window_secs);

        if now >= windows.next_sweep_at {
            windows.entries.retain(|_, state| now < state.window_start + window);
            windows.next_sweep_at = now + window;
        }

        let state = windows
            .entries
            .entry(key.storage_key())
            .or_insert_with(|| WindowState {
                count: 0,
                window_start: now,
            });

        if now >= state.window_start + window {
            state.count = 0;
            state.window_start = now;
        }

        let window_end = self.window_end(state);

        if state.count >= self.limit {
            let retry_after = u32::try_from((window_end - now).max(1)).unwrap_or(u32::MAX);
            return RateLimitResult::Denied(RateLimitDenied {
                limit: self.limit,
                retry_after_secs: retry_after,
                scope: key.scope,
            });
        }

        state.count += 1;
        RateLimitResult::Allowed(RateLimitStatus {
            limit: self.limit,
            remaining: self.limit.saturating_sub(state.count),
            reset_at: Timestamp::from_unix_secs(window_end).unwrap_or_else(Timestamp::now),
        })
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        Ok(self.check_at(key, Self::now_secs()).await)
    }

    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError> {
        self.windows.write().await.entries.remove(&key.storage_key());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_700_000_000;

    #[tokio::test]
    async fn allows_attempts_within_limit() {
        let limiter = InMemoryRateLimiter::new(3, 60);

        for expected_remaining in [2, 1, 0] {
            match limiter.check_at(RateLimitKey::login("ana"), T0).await {
                RateLimitResult::Allowed(status) => {
                    assert_eq!(status.remaining, expected_remaining)
                }
                RateLimitResult::Denied(_) => panic!("should be allowed"),
            }
        }
    }

    #[tokio::test]
    async fn denies_attempts_at_limit() {
        let limiter = InMemoryRateLimiter::new(2, 60);
        limiter.check_at(RateLimitKey::login("ana"), T0).await;
        limiter.check_at(RateLimitKey::login("ana"), T0).await;

        match limiter.check_at(RateLimitKey::login("ana"), T0 + 10).await {
            RateLimitResult::Denied(denied) => assert_eq!(denied.retry_after_secs, 50),
            RateLimitResult::Allowed(_) => panic!("should be denied"),
        }
    }

    #[tokio::test]
    async fn window_expiry_restores_quota() {
        let limiter = InMemoryRateLimiter::new(1, 60);
        limiter.check_at(RateLimitKey::login("ana"), T0).await;
        assert!(limiter.check_at(RateLimitKey::login("ana"), T0 + 59).await.is_denied());

        assert!(limiter.check_at(RateLimitKey::login("ana"), T0 + 60).await.is_allowed());
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let limiter = InMemoryRateLimiter::new(1, 60);
        limiter.check_at(RateLimitKey::login("ana"), T0).await;

        assert!(limiter.check_at(RateLimitKey::login("ben"), T0).await.is_allowed());
    }

    #[tokio::test]
    async fn lapsed_windows_are_evicted() {
        let limiter = InMemoryRateLimiter::new(5, 60);
        for i in 0..10_000 {
            limiter
                .check_at(RateLimitKey::login(&format!("user-{}", i)), T0)
                .await;
        }
        assert_eq!(limiter.tracked_keys().await, 10_000);

        limiter.check_at(RateLimitKey::login("late"), T0 + 3600).await;

        assert_eq!(limiter.tracked_keys().await, 1);
    }

    #[tokio::test]
    async fn sweep_keeps_open_windows() {
        let limiter = InMemoryRateLimiter::new(1, 60);
        limiter.check_at(RateLimitKey::login("old"), T0).await;
        limiter.check_at(RateLimitKey::login("ana"), T0 + 30).await;

        limiter.check_at(RateLimitKey::login("ben"), T0 + 61).await;

        assert_eq!(limiter.tracked_keys().await, 2);
        assert!(limiter.check_at(RateLimitKey::login("ana"), T0 + 61).await.is_denied());
    }

    #[tokio::test]
    async fn reset_clears_counter() {
        let limiter = InMemoryRateLimiter::new(1, 60);
        limiter.check(RateLimitKey::login("ana")).await.unwrap();
        assert!(limiter.check(RateLimitKey::login("ana")).await.unwrap().is_denied());

        limiter.reset(RateLimitKey::login("ana")).await.unwrap();

        assert!(limiter.check(RateLimitKey::login("ana")).await.unwrap().is_allowed());
    }
}
