//! Bounded retry with a fixed pause between attempts

use std::fmt::Display;
use std::future::Future;

use scenario_core_types::RetryPolicy;
use tokio::time::sleep;
use tracing::{debug, error, warn};

/// Progress of one [`RetryExecution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Idle,
    Attempting,
    Waiting,
    Success,
    Exhausted,
}

impl RetryState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RetryState::Success | RetryState::Exhausted)
    }
}

/// Value produced by a successful retried operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retried<T> {
    pub value: T,
    pub attempts_made: u32,
}

impl<T> Retried<T> {
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Drives an operation through at most `policy.max_attempts()` attempts.
///
/// The pause is taken only between attempts, never after the last one. On
/// exhaustion the error of the final attempt is returned unchanged.
#[derive(Debug, Clone)]
pub struct RetryExecution {
    policy: RetryPolicy,
    state: RetryState,
    attempts_made: u32,
    last_error: Option<String>,
}

impl RetryExecution {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            state: RetryState::Idle,
            attempts_made: 0,
            last_error: None,
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn state(&self) -> RetryState {
        self.state
    }

    pub fn attempts_made(&self) -> u32 {
        self.attempts_made
    }

    /// Message of the most recent failed attempt
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub async fn run<T, E, F, Fut>(&mut self, operation: F) -> Result<Retried<T>, E>
    where
        E: Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.run_if(operation, |_| true).await
    }

    /// Like [`run`](Self::run), but gives up as soon as `should_retry`
    /// rejects an error.
    pub async fn run_if<T, E, F, Fut, P>(
        &mut self,
        mut operation: F,
        should_retry: P,
    ) -> Result<Retried<T>, E>
    where
        E: Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
    {
        let max_attempts = self.policy.max_attempts().max(1);

        loop {
            self.state = RetryState::Attempting;
            self.attempts_made += 1;
            debug!(
                attempt = self.attempts_made,
                max_attempts, "executing attempt"
            );

            match operation().await {
                Ok(value) => {
                    self.state = RetryState::Success;
                    return Ok(Retried {
                        value,
                        attempts_made: self.attempts_made,
                    });
                }
                Err(err) => {
                    self.last_error = Some(err.to_string());
                    if self.attempts_made >= max_attempts || !should_retry(&err) {
                        self.state = RetryState::Exhausted;
                        error!(
                            attempts = self.attempts_made,
                            error = %err,
                            "all attempts failed"
                        );
                        return Err(err);
                    }

                    warn!(
                        attempt = self.attempts_made,
                        max_attempts,
                        delay_ms = self.policy.delay_ms(),
                        error = %err,
                        "attempt failed, retrying"
                    );
                    self.state = RetryState::Waiting;
                    sleep(self.policy.delay()).await;
                }
            }
        }
    }
}

/// Run `operation` under `policy`.
pub async fn retry<T, E, F, Fut>(policy: RetryPolicy, operation: F) -> Result<Retried<T>, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    RetryExecution::new(policy).run(operation).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    fn policy(max_attempts: u32, delay_ms: u64) -> RetryPolicy {
        RetryPolicy::new(max_attempts, delay_ms).unwrap()
    }

    #[tokio::test]
    async fn succeeds_on_third_attempt() {
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let mut execution = RetryExecution::new(policy(3, 10));
        let outcome = execution
            .run(|| async {
                let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if call < 3 {
                    Err(format!("attempt {call} failed"))
                } else {
                    Ok("done")
                }
            })
            .await
            .unwrap();

        assert_eq!(outcome.value, "done");
        assert_eq!(outcome.attempts_made, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(execution.state(), RetryState::Success);
        assert_eq!(execution.last_error(), Some("attempt 2 failed"));
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn exhaustion_returns_last_error() {
        let calls = AtomicU32::new(0);
        let mut execution = RetryExecution::new(policy(2, 5));

        let err = execution
            .run(|| async {
                let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
                Err::<(), _>(format!("failure {call}"))
            })
            .await
            .unwrap_err();

        assert_eq!(err, "failure 2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(execution.attempts_made(), 2);
        assert_eq!(execution.state(), RetryState::Exhausted);
    }

    struct LevelRecorder(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for LevelRecorder {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    #[tokio::test]
    async fn exhaustion_logs_at_error_level() {
        let levels = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(LevelRecorder(levels.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let outcome = retry(policy(2, 1), || async { Err::<(), _>("down") }).await;
        assert!(outcome.is_err());

        let levels = levels.lock().unwrap();
        let count = |level: Level| levels.iter().filter(|l| **l == level).count();
        assert_eq!(count(Level::WARN), 1);
        assert_eq!(count(Level::ERROR), 1);
    }

    #[tokio::test]
    async fn rejected_error_stops_early() {
        let calls = AtomicU32::new(0);
        let mut execution = RetryExecution::new(policy(5, 5));

        let err = execution
            .run_if(
                || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>("fatal")
                },
                |err| *err != "fatal",
            )
            .await
            .unwrap_err();

        assert_eq!(err, "fatal");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(execution.state(), RetryState::Exhausted);
    }

    #[tokio::test]
    async fn single_attempt_never_sleeps() {
        let started = Instant::now();
        let err = retry(policy(1, 5_000), || async { Err::<(), _>("nope") })
            .await
            .unwrap_err();
        assert_eq!(err, "nope");
        assert!(started.elapsed() < Duration::from_millis(1_000));
    }

    #[tokio::test]
    async fn first_success_skips_delay() {
        let outcome = retry(RetryPolicy::default(), || async { Ok::<_, String>(7) })
            .await
            .unwrap();
        assert_eq!(outcome.attempts_made, 1);
        assert_eq!(outcome.into_inner(), 7);
    }

    #[test]
    fn fresh_execution_is_idle() {
        let execution = RetryExecution::new(RetryPolicy::default());
        assert_eq!(execution.state(), RetryState::Idle);
        assert_eq!(execution.attempts_made(), 0);
        assert!(!execution.state().is_terminal());
        assert!(RetryState::Exhausted.is_terminal());
    }
}
