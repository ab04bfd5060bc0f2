use chrono::{DateTime, Utc};
use gloo_timers::callback::{Interval, Timeout};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Cancels a scheduled task. Dropping the handle cancels as well, so a
/// component that owns one cleans up simply by letting go of it.
pub struct TaskHandle {
    canceller: Option<Box<dyn FnOnce()>>,
}

impl TaskHandle {
    pub fn new(canceller: impl FnOnce() + 'static) -> Self {
        Self {
            canceller: Some(Box::new(canceller)),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(canceller) = self.canceller.take() {
            canceller();
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Timer seam for everything that waits: the countdown tick and the toast
/// delay. A task may cancel its own handle while it is running.
pub trait Scheduler {
    fn schedule_once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle;
    fn schedule_repeating(&self, period_ms: u32, task: Box<dyn FnMut()>) -> TaskHandle;
}

#[derive(Clone, Copy, Default)]
pub struct BrowserScheduler;

// The JS closure behind a gloo timer must not be freed while it is executing,
// so the actual drop waits for the next microtask.
fn release_later<T: 'static>(timer: Option<T>) {
    if let Some(timer) = timer {
        wasm_bindgen_futures::spawn_local(async move {
            drop(timer);
        });
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule_once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
        let timer = Timeout::new(delay_ms, move || task());
        TaskHandle::new(move || release_later(Some(timer)))
    }

    fn schedule_repeating(&self, period_ms: u32, mut task: Box<dyn FnMut()>) -> TaskHandle {
        let timer = Interval::new(period_ms, move || task());
        TaskHandle::new(move || release_later(Some(timer)))
    }
}
