//! Pause before each computer decision.
//!
//! The pause is presentational only. Outcomes are identical with
//! [`NoDelay`], which is what tests use.

use std::time::Duration;

use async_trait::async_trait;

/// Cooperative pause inserted by the controller before a computer seat acts.
#[async_trait]
pub trait TurnDelay: Send + Sync {
    async fn pause(&self);
}

/// Returns immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

#[async_trait]
impl TurnDelay for NoDelay {
    async fn pause(&self) {}
}

/// Sleeps a fixed duration on the tokio timer.
#[derive(Clone, Copy, Debug)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }
}

#[async_trait]
impl TurnDelay for FixedDelay {
    async fn pause(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// The delay a config asks for.
#[must_use]
pub fn delay_for(millis: u64) -> Box<dyn TurnDelay> {
    if millis == 0 {
        Box::new(NoDelay)
    } else {
        Box::new(FixedDelay::from_millis(millis))
    }
}
