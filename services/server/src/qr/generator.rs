use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::qr::broadcast::CodeBroadcaster;

/// Single authoritative owner of the current code.
///
/// Constructed once at startup and shared via [`Arc`]. The stored code is
/// a UUID v4 behind a read-write lock: readers take a copy, so a rotation
/// concurrent with [`current`](Self::current) yields the old or the new
/// value, never a torn one.
pub struct CodeGenerator {
    current: RwLock<Uuid>,
    timer: Mutex<Option<JoinHandle<()>>>,
    period: Duration,
    broadcaster: Arc<CodeBroadcaster>,
}

impl CodeGenerator {
    /// Seeds the first code immediately. If the OS randomness source is
    /// unavailable this panics, aborting startup before anything
    /// predictable could be served.
    pub fn new(period: Duration, broadcaster: Arc<CodeBroadcaster>) -> Self {
        Self {
            current: RwLock::new(Uuid::new_v4()),
            timer: Mutex::new(None),
            period,
            broadcaster,
        }
    }

    /// The code as of this instant. Never blocks beyond the uncontended
    /// read-lock copy; never fails.
    pub fn current(&self) -> Uuid {
        *self.current.read().expect("code lock poisoned")
    }

    /// Begin periodic rotation. Idempotent: while a timer task is alive,
    /// further calls are no-ops.
    pub fn start(self: &Arc<Self>) {
        let mut timer = self.timer.lock().expect("timer lock poisoned");
        if timer.is_some() {
            return;
        }

        let generator = Arc::clone(self);
        let period = self.period;
        *timer = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // consume the immediate first tick — the stored code is
            // already fresh when rotation starts
            interval.tick().await;
            loop {
                interval.tick().await;
                let code = generator.rotate();
                debug!(%code, "rotated current code");
            }
        }));
        info!(period_secs = self.period.as_secs(), "code rotation started");
    }

    /// Halt periodic rotation. Idempotent; forced rotation stays available.
    pub fn stop(&self) {
        if let Some(task) = self.timer.lock().expect("timer lock poisoned").take() {
            task.abort();
            info!("code rotation stopped");
        }
    }

    /// Replace the current code right now, independent of the timer phase
    /// and of whether rotation is running.
    pub fn force_rotate(&self) -> Uuid {
        self.rotate()
    }

    /// Swap in a fresh code and notify subscribers.
    fn rotate(&self) -> Uuid {
        let code = Uuid::new_v4();
        *self.current.write().expect("code lock poisoned") = code;
        self.broadcaster.broadcast(code);
        code
    }
}
