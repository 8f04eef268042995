use std::time::Duration;

use crate::RetryPolicy;

/// Configures timeouts, pooling and retry behavior.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientOptions {
    /// Budget for establishing a connection, in milliseconds.
    pub connect_timeout_ms: u64,
    /// Budget for receiving the full response once connected, in milliseconds.
    pub read_timeout_ms: u64,
    /// Idle connections kept per host in the pool.
    pub pool_max_idle_per_host: usize,
    /// Retry and backoff rules.
    pub retry: RetryPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 3_000,
            read_timeout_ms: 10_000,
            pool_max_idle_per_host: 32,
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientOptions {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Upper bound on how long a single `execute` call can take: every
    /// attempt hitting both timeouts plus every backoff wait.
    pub fn latency_bound(&self) -> Duration {
        let attempts = self.retry.max_attempts().saturating_add(1);
        let per_attempt = self.connect_timeout() + self.read_timeout();
        per_attempt
            .saturating_mul(attempts)
            .saturating_add(self.retry.total_backoff())
    }
}
