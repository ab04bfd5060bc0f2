use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use log::debug;

use crate::config;
use crate::scheduler::{Clock, Scheduler, TaskHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountdownSnapshot {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownPhase {
    Computing,
    Ticking(CountdownSnapshot),
    Expired,
}

/// Time left until `target`, or `None` once it has been reached.
pub fn snapshot_between(now: DateTime<Utc>, target: DateTime<Utc>) -> Option<CountdownSnapshot> {
    let delta_ms = (target - now).num_milliseconds();
    if delta_ms <= 0 {
        return None;
    }
    let total_seconds = delta_ms / 1000;
    Some(CountdownSnapshot {
        days: total_seconds / 86_400,
        hours: (total_seconds / 3_600) % 24,
        minutes: (total_seconds / 60) % 60,
        seconds: total_seconds % 60,
    })
}

fn phase_at(now: DateTime<Utc>, target: DateTime<Utc>) -> CountdownPhase {
    match snapshot_between(now, target) {
        Some(snapshot) => CountdownPhase::Ticking(snapshot),
        None => CountdownPhase::Expired,
    }
}

/// A running countdown. Ticks once per second until the target passes, then
/// stops its own interval; `cancel` stops it early.
pub struct CountdownTimer {
    ticker: Rc<RefCell<Option<TaskHandle>>>,
}

impl CountdownTimer {
    pub fn start(
        target: DateTime<Utc>,
        clock: Rc<dyn Clock>,
        scheduler: &dyn Scheduler,
        on_change: Rc<dyn Fn(CountdownPhase)>,
    ) -> Self {
        let ticker = Rc::new(RefCell::new(None::<TaskHandle>));

        let initial = phase_at(clock.now(), target);
        on_change(initial);
        if initial == CountdownPhase::Expired {
            return Self { ticker };
        }

        let tick = {
            let ticker = ticker.clone();
            let mut shown = initial;
            move || {
                let next = phase_at(clock.now(), target);
                if next == shown {
                    return;
                }
                shown = next;
                on_change(next);
                if next == CountdownPhase::Expired {
                    debug!("Countdown reached {}", target);
                    if let Some(mut handle) = ticker.borrow_mut().take() {
                        handle.cancel();
                    }
                }
            }
        };
        let handle = scheduler.schedule_repeating(config::COUNTDOWN_TICK_MS, Box::new(tick));
        *ticker.borrow_mut() = Some(handle);

        Self { ticker }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.ticker.borrow().is_some()
    }

    pub fn cancel(&self) {
        if let Some(mut handle) = self.ticker.borrow_mut().take() {
            handle.cancel();
        }
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
