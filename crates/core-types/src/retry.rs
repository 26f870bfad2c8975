use std::time::Duration;

use crate::CoreError;

/// Bounded attempt count plus a fixed pause between attempts.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay_ms: u64,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_DELAY_MS: u64 = 1000;

    pub fn new(max_attempts: u32, delay_ms: u64) -> Result<Self, CoreError> {
        if max_attempts == 0 {
            return Err(CoreError::InvalidPolicy(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            max_attempts,
            delay_ms,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            delay_ms: Self::DEFAULT_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.delay_ms(), 1000);
        assert_eq!(policy.delay(), Duration::from_secs(1));
    }

    #[test]
    fn zero_attempts_rejected() {
        assert!(matches!(
            RetryPolicy::new(0, 10),
            Err(CoreError::InvalidPolicy(_))
        ));
        assert_eq!(RetryPolicy::new(5, 0).unwrap().max_attempts(), 5);
    }
}
