use std::collections::HashSet;
use std::time::Duration;

use reqwest::Method;

use crate::{AppSvcError, Result};

/// Retry and backoff rules applied by [`RetryingClient`](crate::RetryingClient).
///
/// The policy is immutable once built: fields are private and the `with_*`
/// methods consume `self`.
///
/// The wait before retry `k` (1-indexed) is
/// `(backoff_factor + 2) * 2^(k-1)` backoff units. With the default factor
/// of 3 and a one second unit this gives 5s, 10s, 20s, 40s, ...
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_factor: f64,
    backoff_unit: Duration,
    retryable_methods: HashSet<Method>,
    retryable_status_codes: HashSet<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            backoff_factor: 3.0,
            backoff_unit: Duration::from_secs(1),
            retryable_methods: HashSet::from([Method::GET, Method::POST]),
            retryable_status_codes: HashSet::from([429]),
        }
    }
}

impl RetryPolicy {
    /// Builds a policy with default method and status sets.
    ///
    /// Fails when `backoff_factor` is not a positive finite number.
    pub fn new(max_attempts: u32, backoff_factor: f64) -> Result<Self> {
        if !backoff_factor.is_finite() || backoff_factor <= 0.0 {
            return Err(AppSvcError::Config(format!(
                "backoff_factor must be positive, got {backoff_factor}"
            )));
        }
        Ok(Self {
            max_attempts,
            backoff_factor,
            ..Self::default()
        })
    }

    /// Replaces the time unit the schedule is expressed in.
    pub fn with_backoff_unit(mut self, unit: Duration) -> Self {
        self.backoff_unit = unit;
        self
    }

    /// Replaces the set of methods that may be retried.
    pub fn with_retryable_methods<I>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = Method>,
    {
        self.retryable_methods = methods.into_iter().collect();
        self
    }

    /// Replaces the set of statuses treated as transient failures.
    pub fn with_retryable_status_codes<I>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = u16>,
    {
        self.retryable_status_codes = codes.into_iter().collect();
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff_factor(&self) -> f64 {
        self.backoff_factor
    }

    pub fn backoff_unit(&self) -> Duration {
        self.backoff_unit
    }

    pub fn retryable_methods(&self) -> &HashSet<Method> {
        &self.retryable_methods
    }

    pub fn retryable_status_codes(&self) -> &HashSet<u16> {
        &self.retryable_status_codes
    }

    /// Whether requests using `method` may be retried at all.
    pub fn allows_method(&self, method: &Method) -> bool {
        self.retryable_methods.contains(method)
    }

    /// Whether a response with `status` counts as a transient failure.
    pub fn retries_status(&self, status: u16) -> bool {
        self.retryable_status_codes.contains(&status)
    }

    /// Wait inserted before retry `retry` (1-indexed).
    pub fn backoff(&self, retry: u32) -> Duration {
        let exp = retry.saturating_sub(1).min(16) as i32;
        let units = (self.backoff_factor + 2.0) * 2f64.powi(exp);
        let nanos = (self.backoff_unit.as_nanos() as f64 * units).round();
        if nanos >= u64::MAX as f64 {
            return Duration::try_from_secs_f64(nanos / 1e9).unwrap_or(Duration::MAX);
        }
        Duration::from_nanos(nanos as u64)
    }

    /// Sum of every backoff wait when all retries are spent.
    pub fn total_backoff(&self) -> Duration {
        (1..=self.max_attempts).fold(Duration::ZERO, |total, retry| {
            total.saturating_add(self.backoff(retry))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::Method;

    use super::RetryPolicy;

    #[test]
    fn defaults_match_reference_deployment() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 0);
        assert_eq!(policy.backoff_factor(), 3.0);
        assert!(policy.allows_method(&Method::GET));
        assert!(policy.allows_method(&Method::POST));
        assert!(!policy.allows_method(&Method::PUT));
        assert!(policy.retries_status(429));
        assert!(!policy.retries_status(503));
        assert_eq!(policy.total_backoff(), Duration::ZERO);
    }

    #[test]
    fn factor_three_schedule_is_five_ten_twenty_forty() {
        let policy = RetryPolicy::new(4, 3.0).unwrap();
        let waits: Vec<_> = (1..=4).map(|k| policy.backoff(k)).collect();
        assert_eq!(
            waits,
            vec![
                Duration::from_secs(5),
                Duration::from_secs(10),
                Duration::from_secs(20),
                Duration::from_secs(40),
            ]
        );
        assert_eq!(policy.total_backoff(), Duration::from_secs(75));
    }

    #[test]
    fn schedule_scales_with_unit() {
        let policy = RetryPolicy::new(2, 3.0)
            .unwrap()
            .with_backoff_unit(Duration::from_millis(10));
        assert_eq!(policy.backoff(1), Duration::from_millis(50));
        assert_eq!(policy.backoff(2), Duration::from_millis(100));
    }

    #[test]
    fn schedule_is_strictly_increasing() {
        let policy = RetryPolicy::new(10, 0.5).unwrap();
        for k in 1..10 {
            assert!(policy.backoff(k) < policy.backoff(k + 1));
        }
    }

    #[test]
    fn total_backoff_saturates_instead_of_overflowing() {
        let policy = RetryPolicy::new(3, 1.0)
            .unwrap()
            .with_backoff_unit(Duration::from_secs(u64::MAX / 4));
        assert_eq!(policy.backoff(3), Duration::MAX);
        assert_eq!(policy.total_backoff(), Duration::MAX);
    }

    #[test]
    fn rejects_non_positive_factor() {
        assert!(RetryPolicy::new(1, 0.0).is_err());
        assert!(RetryPolicy::new(1, -1.0).is_err());
        assert!(RetryPolicy::new(1, f64::NAN).is_err());
    }

    #[test]
    fn custom_sets_replace_defaults() {
        let policy = RetryPolicy::new(1, 1.0)
            .unwrap()
            .with_retryable_methods([Method::PUT])
            .with_retryable_status_codes([502, 503]);
        assert!(policy.allows_method(&Method::PUT));
        assert!(!policy.allows_method(&Method::GET));
        assert!(policy.retries_status(503));
        assert!(!policy.retries_status(429));
    }
}
