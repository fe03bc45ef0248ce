use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Traffic class used to pick a rate window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestClass {
    Read,
    Write,
}

impl RequestClass {
    /// GET is a read; every other method mutates and counts as a write.
    pub fn from_method(method: &reqwest::Method) -> Self {
        if method == reqwest::Method::GET {
            RequestClass::Read
        } else {
            RequestClass::Write
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestClass::Read => "read",
            RequestClass::Write => "write",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Maximum requests admitted within `duration`.
    pub capacity: usize,
    pub duration: Duration,
}

#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    pub read: WindowConfig,
    pub write: WindowConfig,
    /// Delay between capacity re-checks while a window is full.
    pub poll_interval: Duration,
}

impl RateLimiterConfig {
    /// Coda's published quotas: 100 reads and 10 writes per 6 seconds.
    pub fn new() -> Self {
        Self {
            read: WindowConfig {
                capacity: 100,
                duration: Duration::from_millis(6000),
            },
            write: WindowConfig {
                capacity: 10,
                duration: Duration::from_millis(6000),
            },
            poll_interval: Duration::from_millis(100),
        }
    }

    pub fn with_read_window(mut self, capacity: usize, duration: Duration) -> Self {
        self.read = WindowConfig { capacity, duration };
        self
    }

    pub fn with_write_window(mut self, capacity: usize, duration: Duration) -> Self {
        self.write = WindowConfig { capacity, duration };
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct WindowSnapshot {
    pub capacity: usize,
    /// Requests recorded within the trailing window.
    pub in_window: usize,
    /// Estimated wait until a slot frees up (ms), if the window is currently full.
    pub estimated_wait_ms: Option<u64>,
}

/// One sliding window. Timestamps are pushed in acquisition order, so the
/// deque is always sorted and expiry is a prefix trim.
#[derive(Debug)]
struct Window {
    cfg: WindowConfig,
    stamps: Mutex<VecDeque<Instant>>,
}

impl Window {
    fn new(cfg: WindowConfig) -> Self {
        Self {
            cfg,
            stamps: Mutex::new(VecDeque::with_capacity(cfg.capacity)),
        }
    }

    fn purge_locked(cfg: &WindowConfig, stamps: &mut VecDeque<Instant>, now: Instant) {
        while let Some(front) = stamps.front() {
            if now.duration_since(*front) > cfg.duration {
                stamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// Check-and-record under one lock so concurrent callers cannot both
    /// take the last slot.
    async fn try_reserve(&self) -> bool {
        let mut stamps = self.stamps.lock().await;
        let now = Instant::now();
        Self::purge_locked(&self.cfg, &mut stamps, now);
        if stamps.len() < self.cfg.capacity {
            stamps.push_back(now);
            true
        } else {
            false
        }
    }

    async fn snapshot(&self) -> WindowSnapshot {
        let mut stamps = self.stamps.lock().await;
        let now = Instant::now();
        Self::purge_locked(&self.cfg, &mut stamps, now);

        let estimated_wait_ms = if stamps.len() >= self.cfg.capacity {
            stamps.front().map(|oldest| {
                let frees_at = *oldest + self.cfg.duration;
                frees_at.saturating_duration_since(now).as_millis() as u64
            })
        } else {
            None
        };

        WindowSnapshot {
            capacity: self.cfg.capacity,
            in_window: stamps.len(),
            estimated_wait_ms,
        }
    }
}

/// Client-side sliding-window rate limiter with independent read and write
/// windows.
///
/// - `acquire` never fails, it only delays
/// - slots are never released explicitly; they age out of the window
pub struct RateLimiter {
    read: Window,
    write: Window,
    poll_interval: Duration,
}

impl RateLimiter {
    pub fn new(cfg: RateLimiterConfig) -> Self {
        Self {
            read: Window::new(cfg.read),
            write: Window::new(cfg.write),
            poll_interval: cfg.poll_interval,
        }
    }

    fn window(&self, class: RequestClass) -> &Window {
        match class {
            RequestClass::Read => &self.read,
            RequestClass::Write => &self.write,
        }
    }

    /// Wait until `class` has a free slot, then record this request in it.
    pub async fn acquire(&self, class: RequestClass) {
        let window = self.window(class);
        let mut waited = false;
        loop {
            if window.try_reserve().await {
                if waited {
                    tracing::debug!(class = class.as_str(), "rate limit slot acquired after wait");
                }
                return;
            }
            if !waited {
                tracing::warn!(
                    class = class.as_str(),
                    capacity = window.cfg.capacity,
                    "rate limit window full, waiting for a free slot"
                );
                waited = true;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Take a slot without waiting, returns true if successful
    pub async fn try_acquire(&self, class: RequestClass) -> bool {
        self.window(class).try_reserve().await
    }

    pub async fn snapshot(&self, class: RequestClass) -> WindowSnapshot {
        self.window(class).snapshot().await
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimiterConfig::default())
    }
}
