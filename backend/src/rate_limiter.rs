use std::collections::HashMap;
use std::sync::Mutex;

use time::{Duration, OffsetDateTime};
use tracing::{error, warn};

#[derive(Debug)]
struct Window {
    count: u32,
    resets_at: OffsetDateTime,
}

/// Fixed-window request counter keyed by client address. State lives for the
/// process lifetime; expired windows are evicted as requests come through.
#[derive(Debug)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
    max_requests: u32,
    window: Duration,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(30, Duration::seconds(10))
    }
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_requests,
            window,
        }
    }

    /// Whether this request fits the key's current window. The first request
    /// of a window counts as 1; the request that pushes the count past
    /// `max_requests` is denied.
    pub fn allow(&self, key: &str, now: OffsetDateTime) -> bool {
        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Failed to acquire rate limit lock: {e}");
                return false;
            }
        };

        windows.retain(|_, window| window.resets_at > now);

        match windows.get_mut(key) {
            Some(window) => {
                window.count += 1;
                if window.count > self.max_requests {
                    warn!("Rate limit exceeded for {key}");
                    false
                } else {
                    true
                }
            }
            None => {
                windows.insert(
                    key.to_string(),
                    Window {
                        count: 1,
                        resets_at: now + self.window,
                    },
                );
                true
            }
        }
    }
}
