//! Transient error banner with an auto-clear timer.
//!
//! Every call to [`Notification::show`] cancels the timer left behind by the
//! previous message, so an older timer can never clear a newer message.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

/// How long an error stays visible unless configured otherwise.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
struct Banner {
    message: Option<String>,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct Notification {
    banner: Arc<Mutex<Banner>>,
    timer: Option<JoinHandle<()>>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display `message` and clear it after `ttl`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&mut self, message: impl Into<String>, ttl: Duration) {
        self.cancel_timer();

        let generation = {
            let mut banner = lock(&self.banner);
            banner.generation += 1;
            banner.message = Some(message.into());
            banner.generation
        };

        let banner = Arc::clone(&self.banner);
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut banner = lock(&banner);
            // An abort can race with a timer that already woke up.
            if banner.generation == generation {
                banner.message = None;
            }
        }));
    }

    /// The message currently on screen, if any.
    pub fn current(&self) -> Option<String> {
        lock(&self.banner).message.clone()
    }

    pub fn clear(&mut self) {
        self.cancel_timer();
        let mut banner = lock(&self.banner);
        banner.generation += 1;
        banner.message = None;
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for Notification {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

fn lock(banner: &Mutex<Banner>) -> MutexGuard<'_, Banner> {
    banner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
