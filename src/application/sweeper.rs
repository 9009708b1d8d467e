//! Periodic eviction of stale cooldown entries.
//!
//! The recency cache only grows on accepted alerts, so the sweep is cheap.
//! It runs every two cooldown windows and drops entries older than that.

use crate::application::{ports::Clock, ports::RecencyStore, registry::RecencyCache};
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "async")]
use tokio::{sync::oneshot, task::JoinHandle, time::interval};

/// Error returned when sweep configuration validation fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SweepConfigError {
    /// Sweep interval must be greater than zero
    #[error("sweep interval must be greater than 0")]
    ZeroInterval,
}

/// Configuration for the periodic sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    interval: Duration,
}

impl SweepConfig {
    /// Create a sweep config with the given interval.
    ///
    /// # Errors
    /// Returns `SweepConfigError::ZeroInterval` if `interval` is zero.
    pub fn new(interval: Duration) -> Result<Self, SweepConfigError> {
        if interval.is_zero() {
            return Err(SweepConfigError::ZeroInterval);
        }
        Ok(Self { interval })
    }

    /// How often the sweep runs.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Sweeps a recency cache against a clock.
#[derive(Debug, Clone)]
pub struct CacheSweeper<S>
where
    S: RecencyStore + Clone,
{
    cache: RecencyCache<S>,
    clock: Arc<dyn Clock>,
    config: SweepConfig,
}

impl<S> CacheSweeper<S>
where
    S: RecencyStore + Clone,
{
    /// Create a sweeper.
    pub fn new(cache: RecencyCache<S>, clock: Arc<dyn Clock>, config: SweepConfig) -> Self {
        Self {
            cache,
            clock,
            config,
        }
    }

    /// Run one sweep now. Returns the number of entries removed.
    pub fn sweep_once(&self) -> usize {
        self.cache.sweep(self.clock.now())
    }

    /// Get the sweep configuration.
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Spawn a background task that sweeps at the configured interval.
    ///
    /// The task runs until [`SweeperHandle::shutdown`] is called. Dropping the
    /// handle detaches the task; it keeps sweeping until the runtime stops.
    ///
    /// Must be called from within a tokio runtime.
    #[cfg(feature = "async")]
    pub fn start(self) -> SweeperHandle
    where
        S: Send + Sync + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let period = self.config.interval;

        let join = tokio::spawn(async move {
            let mut ticker = interval(period);
            // First tick completes immediately
            ticker.tick().await;

            let mut detached = false;
            loop {
                tokio::select! {
                    signal = &mut shutdown_rx, if !detached => match signal {
                        Ok(()) => {
                            tracing::debug!("recency sweep stopped");
                            break;
                        }
                        Err(_) => {
                            // Sender dropped with the handle
                            detached = true;
                            tracing::debug!("sweeper handle dropped, sweep continues");
                        }
                    },
                    _ = ticker.tick() => {
                        self.sweep_once();
                    }
                }
            }
        });

        SweeperHandle {
            shutdown_tx: Some(shutdown_tx),
            join,
        }
    }
}

/// Error returned when the sweep task does not stop cleanly.
#[derive(Debug, thiserror::Error)]
pub enum ShutdownError {
    /// The task panicked or was cancelled
    #[error("sweep task failed: {0}")]
    TaskFailed(String),
}

/// Handle to a running sweep task.
#[cfg(feature = "async")]
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    join: JoinHandle<()>,
}

#[cfg(feature = "async")]
impl SweeperHandle {
    /// Stop the sweep task and wait for it to finish.
    ///
    /// # Errors
    /// Returns `ShutdownError::TaskFailed` if the task panicked or was aborted.
    pub async fn shutdown(mut self) -> Result<(), ShutdownError> {
        if let Some(tx) = self.shutdown_tx.take() {
            // Receiver gone means the task already ended; join reports why.
            let _ = tx.send(());
        }
        self.join
            .await
            .map_err(|err| ShutdownError::TaskFailed(err.to_string()))
    }

    /// Whether the task has finished.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}
