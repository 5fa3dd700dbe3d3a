//! Background rostering runs.
//!
//! The GA is CPU-bound, so a job runs on tokio's blocking pool against an
//! owned copy of the request. The evolution loop polls a shared stop flag
//! once per generation; [`ScheduleJob::cancel`] and an elapsed timeout both
//! raise it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{info, warn};

use super::{RosterScheduler, ScheduleRequest};
use crate::error::ScheduleError;
use crate::models::RosterSchedule;

/// Handle to a rostering run on the blocking pool.
pub struct ScheduleJob {
    handle: JoinHandle<Result<RosterSchedule, ScheduleError>>,
    is_stopped: Arc<AtomicBool>,
    started: Instant,
    timeout: Option<Duration>,
}

impl ScheduleJob {
    /// Starts a run and returns immediately.
    ///
    /// The timeout is taken from the scheduler's config; override it with
    /// [`with_timeout`](Self::with_timeout). It counts from this call, not
    /// from [`join`](Self::join). Must be called from within a tokio
    /// runtime.
    pub fn spawn(scheduler: RosterScheduler, request: ScheduleRequest) -> Self {
        let is_stopped = Arc::new(AtomicBool::new(false));
        let timeout = scheduler.config().timeout();
        let stop = Arc::clone(&is_stopped);
        let started = Instant::now();

        info!(
            drivers = request.drivers.len(),
            routes = request.routes.len(),
            "spawning roster job"
        );
        let handle = tokio::task::spawn_blocking(move || {
            scheduler.schedule_until(&request, Some(stop.as_ref()))
        });

        Self {
            handle,
            is_stopped,
            started,
            timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Asks the run to stop at the next generation boundary.
    pub fn cancel(&self) {
        self.is_stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.is_stopped.load(Ordering::Relaxed)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the run to end.
    ///
    /// When the timeout elapses first the run is cancelled and
    /// [`ScheduleError::TimedOut`] is returned without waiting for the
    /// worker to notice. A run that already finished is returned even if
    /// the deadline has passed.
    pub async fn join(mut self) -> Result<RosterSchedule, ScheduleError> {
        let joined = match self.timeout {
            Some(timeout) => {
                let deadline = self.started + timeout;
                match tokio::time::timeout_at(deadline, &mut self.handle).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        self.cancel();
                        warn!(timeout_ms = timeout.as_millis() as u64, "roster job timed out");
                        return Err(ScheduleError::TimedOut { timeout });
                    }
                }
            }
            None => (&mut self.handle).await,
        };

        let result = joined.map_err(|e| ScheduleError::Worker(e.to_string()))?;
        if matches!(result, Err(ScheduleError::Cancelled)) {
            warn!("roster job cancelled");
        }
        result
    }
}
