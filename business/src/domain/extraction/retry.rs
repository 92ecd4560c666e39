use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::logger::Logger;

use super::errors::GenerationError;

/// Shortest wait between two attempts, whatever the policy or server says.
pub const MIN_DELAY: Duration = Duration::from_secs(1);

/// Longest wait between two attempts; a larger `cap_delay` is cut to this.
pub const MAX_DELAY: Duration = Duration::from_secs(60);

/// Port for suspending the caller between attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Error classification the retry loop needs.
pub trait RetryableError: std::fmt::Display {
    fn is_retryable(&self) -> bool;
    /// Wait suggested by the server, if any.
    fn retry_after(&self) -> Option<Duration>;
    fn kind(&self) -> &'static str;
}

impl RetryableError for GenerationError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited { .. } | GenerationError::TransientNetwork { .. }
        )
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            GenerationError::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        GenerationError::kind(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub cap_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_secs(2),
            cap_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Wait after the failed `attempt` (1-based).
    ///
    /// A server hint wins over the exponential schedule; both end up in
    /// `[MIN_DELAY, min(cap_delay, MAX_DELAY)]`.
    pub fn delay_for(&self, attempt: u32, server_hint: Option<Duration>) -> Duration {
        let upper = self.cap_delay.min(MAX_DELAY).max(MIN_DELAY);
        let delay = server_hint.unwrap_or_else(|| {
            let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
            self.base_delay.saturating_mul(factor)
        });
        delay.clamp(MIN_DELAY, upper)
    }

    /// State reached after `attempt` failed with `error`.
    pub fn on_failure<E: RetryableError>(&self, attempt: u32, error: &E) -> RetryState {
        if !error.is_retryable() {
            RetryState::Aborted { attempts: attempt }
        } else if attempt >= self.max_attempts.max(1) {
            RetryState::Exhausted { attempts: attempt }
        } else {
            RetryState::Backoff {
                attempt,
                delay: self.delay_for(attempt, error.retry_after()),
            }
        }
    }
}

/// States of one `invoke` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetryState {
    Idle,
    Attempting { attempt: u32 },
    Backoff { attempt: u32, delay: Duration },
    Succeeded { attempts: u32 },
    Exhausted { attempts: u32 },
    Aborted { attempts: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetryOutcome<T> {
    pub value: T,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RetryFailure<E> {
    /// Non-retryable error; no further attempt was made.
    Aborted { attempts: u32, error: E },
    /// Every attempt failed with a retryable error; holds the last one.
    Exhausted { attempts: u32, error: E },
}

impl<E> RetryFailure<E> {
    pub fn attempts(&self) -> u32 {
        match self {
            RetryFailure::Aborted { attempts, .. } | RetryFailure::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn into_error(self) -> E {
        match self {
            RetryFailure::Aborted { error, .. } | RetryFailure::Exhausted { error, .. } => error,
        }
    }
}

/// Runs an operation with bounded exponential backoff.
///
/// Attempts are sequential: the caller is suspended for every backoff and at
/// most one attempt is in flight.
pub struct RetryController {
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
    logger: Arc<dyn Logger>,
}

impl RetryController {
    pub fn new(policy: RetryPolicy, sleeper: Arc<dyn Sleeper>, logger: Arc<dyn Logger>) -> Self {
        Self {
            policy,
            sleeper,
            logger,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn invoke<T, E, F, Fut>(
        &self,
        mut operation: F,
    ) -> Result<RetryOutcome<T>, RetryFailure<E>>
    where
        E: RetryableError,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 0;
        self.trace(RetryState::Idle);

        loop {
            attempt += 1;
            self.trace(RetryState::Attempting { attempt });

            let error = match operation().await {
                Ok(value) => {
                    self.trace(RetryState::Succeeded { attempts: attempt });
                    if attempt > 1 {
                        self.logger
                            .info(&format!("Generation succeeded after {} attempts", attempt));
                    }
                    return Ok(RetryOutcome {
                        value,
                        attempts: attempt,
                    });
                }
                Err(error) => error,
            };

            let next = self.policy.on_failure(attempt, &error);
            self.trace(next);

            match next {
                RetryState::Backoff { delay, .. } => {
                    self.logger.warn(&format!(
                        "Generation attempt {}/{} failed ({}); retrying in {}s",
                        attempt,
                        self.policy.max_attempts,
                        error.kind(),
                        delay.as_secs_f32()
                    ));
                    self.sleeper.sleep(delay).await;
                }
                RetryState::Exhausted { attempts } => {
                    self.logger.error(&format!(
                        "Generation gave up after {} attempts, last error ({}): {}",
                        attempts,
                        error.kind(),
                        error
                    ));
                    return Err(RetryFailure::Exhausted { attempts, error });
                }
                _ => {
                    self.logger.error(&format!(
                        "Generation failed with non-retryable error ({}): {}",
                        error.kind(),
                        error
                    ));
                    return Err(RetryFailure::Aborted {
                        attempts: attempt,
                        error,
                    });
                }
            }
        }
    }

    fn trace(&self, state: RetryState) {
        self.logger.debug(&format!("Retry state: {:?}", state));
    }
}
