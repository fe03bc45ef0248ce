//! Client-side protection against upstream quota violations.
//!
//! Coda enforces separate quotas for reads and writes, so the limiter keeps
//! two independent sliding windows and every outbound request waits for a
//! slot in the window matching its HTTP method.
//!
//! ```rust
//! use coda_mcp::resilience::rate_limiter::{RateLimiter, RateLimiterConfig, RequestClass};
//!
//! # async fn demo() {
//! let limiter = RateLimiter::new(RateLimiterConfig::default());
//! limiter.acquire(RequestClass::Read).await;
//! # }
//! ```

pub mod rate_limiter;

pub use rate_limiter::{RateLimiter, RateLimiterConfig, RequestClass, WindowSnapshot};
