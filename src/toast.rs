use crate::scheduler::{Scheduler, TaskHandle};

pub const RECRUITING_PATH: &str = "/careers";

pub fn is_destination(path: &str) -> bool {
    path.trim_end_matches('/') == RECRUITING_PATH
}

/// Conditions re-checked on every render.
pub struct ToastConditions<'a> {
    pub enabled: bool,
    pub current_path: &'a str,
    pub consent_prompt_open: bool,
}

/// Session state of the "we're recruiting" toast. Once closed, force-hidden
/// or made pointless by visiting the careers page, it stays gone until the
/// next full page load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecruitingToast {
    delay_elapsed: bool,
    dismissed: bool,
}

impl RecruitingToast {
    pub fn elapse(self) -> Self {
        Self {
            delay_elapsed: true,
            ..self
        }
    }

    pub fn close(self) -> Self {
        Self {
            dismissed: true,
            ..self
        }
    }

    /// Hide on an outside signal, whether or not the toast was showing yet.
    pub fn force_hide(self) -> Self {
        self.close()
    }

    /// The consent prompt takes over the screen; a toast that was already
    /// due is hidden for good rather than popping back afterwards.
    pub fn prompt_opened(self) -> Self {
        if self.delay_elapsed {
            self.force_hide()
        } else {
            self
        }
    }

    pub fn navigated_to(self, path: &str) -> Self {
        if is_destination(path) {
            self.force_hide()
        } else {
            self
        }
    }

    #[cfg(test)]
    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    pub fn is_visible(&self, conditions: &ToastConditions) -> bool {
        self.delay_elapsed
            && !self.dismissed
            && conditions.enabled
            && !conditions.consent_prompt_open
            && !is_destination(conditions.current_path)
    }
}

/// The one-shot delay before the toast may appear.
pub struct ToastTimer {
    handle: Option<TaskHandle>,
}

impl ToastTimer {
    pub fn arm(
        delay_ms: u32,
        scheduler: &dyn Scheduler,
        on_ready: impl FnOnce() + 'static,
    ) -> Self {
        Self {
            handle: Some(scheduler.schedule_once(delay_ms, Box::new(on_ready))),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RECRUITING_TOAST_DELAY_MS;
    use crate::scheduler::manual::ManualScheduler;
    use chrono::{TimeZone, Utc};
    use std::cell::Cell;
    use std::rc::Rc;

    fn home() -> ToastConditions<'static> {
        ToastConditions {
            enabled: true,
            current_path: "/",
            consent_prompt_open: false,
        }
    }

    fn mount(scheduler: &ManualScheduler) -> (Rc<Cell<RecruitingToast>>, ToastTimer) {
        let toast = Rc::new(Cell::new(RecruitingToast::default()));
        let state = toast.clone();
        let timer = ToastTimer::arm(RECRUITING_TOAST_DELAY_MS, scheduler, move || {
            state.set(state.get().elapse())
        });
        (toast, timer)
    }

    fn scheduler() -> ManualScheduler {
        ManualScheduler::new(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn appears_after_delay_and_not_before() {
        let scheduler = scheduler();
        let (toast, _timer) = mount(&scheduler);

        scheduler.advance(2999);
        assert!(!toast.get().is_visible(&home()));
        scheduler.advance(1);
        assert!(toast.get().is_visible(&home()));
    }

    #[test]
    fn forced_hide_before_delay_is_permanent() {
        let scheduler = scheduler();
        let (toast, _timer) = mount(&scheduler);

        scheduler.advance(1000);
        toast.set(toast.get().force_hide());
        scheduler.advance(5000);
        assert!(!toast.get().is_visible(&home()));
    }

    #[test]
    fn consent_prompt_suppresses_while_open() {
        let toast = RecruitingToast::default().elapse();
        let prompt = ToastConditions {
            consent_prompt_open: true,
            ..home()
        };
        assert!(!toast.is_visible(&prompt));
        assert!(toast.is_visible(&home()));
    }

    #[test]
    fn prompt_opening_after_toast_is_due_hides_it_for_good() {
        let early = RecruitingToast::default().prompt_opened().elapse();
        assert!(early.is_visible(&home()));

        let due = RecruitingToast::default().elapse().prompt_opened();
        assert!(due.is_dismissed());
        assert!(!due.is_visible(&home()));
    }

    #[test]
    fn remote_flag_gates_visibility() {
        let toast = RecruitingToast::default().elapse();
        let off = ToastConditions {
            enabled: false,
            ..home()
        };
        assert!(!toast.is_visible(&off));
    }

    #[test]
    fn never_shown_on_the_careers_page() {
        let toast = RecruitingToast::default().elapse();
        let careers = ToastConditions {
            current_path: "/careers/",
            ..home()
        };
        assert!(!toast.is_visible(&careers));
    }

    #[test]
    fn visiting_careers_dismisses_for_the_session() {
        let toast = RecruitingToast::default()
            .navigated_to("/about")
            .elapse();
        assert!(!toast.is_dismissed());

        let toast = toast.navigated_to("/careers").navigated_to("/");
        assert!(toast.is_dismissed());
        assert!(!toast.is_visible(&home()));
    }

    #[test]
    fn close_is_terminal() {
        let toast = RecruitingToast::default().elapse().close().elapse();
        assert!(!toast.is_visible(&home()));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let scheduler = scheduler();
        let (toast, mut timer) = mount(&scheduler);

        timer.cancel();
        scheduler.advance(10_000);
        assert!(!toast.get().is_visible(&home()));
        assert_eq!(scheduler.pending_tasks(), 0);
    }
}
