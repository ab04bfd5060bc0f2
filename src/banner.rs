use chrono::{DateTime, Duration, Utc};
use log::debug;

use crate::cms::models::{EventRecord, SiteSettings};
use crate::scheduler::{Scheduler, TaskHandle};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

// Browsers run longer timeouts immediately instead of waiting.
const MAX_TIMER_DELAY_MS: i64 = i32::MAX as i64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerSurface {
    TopBanner,
    NavBadge,
}

/// Everything besides the operator settings that decides whether an event
/// is announced.
pub struct BannerInputs<'a> {
    pub event: Option<&'a EventRecord>,
    pub now: DateTime<Utc>,
    pub current_path: &'a str,
    pub dismissed: bool,
}

/// The event to announce: the highest-priority eligible event that has not
/// started yet. Ties go to whichever starts first.
pub fn select_banner_event(events: &[EventRecord], now: DateTime<Utc>) -> Option<&EventRecord> {
    events
        .iter()
        .filter(|event| event.banner_eligible && event.is_upcoming(now))
        .min_by(|a, b| {
            b.banner_priority
                .cmp(&a.banner_priority)
                .then(a.start_date.cmp(&b.start_date))
        })
}

/// Whole days until `start`, rounded up, so an event later today is one day out.
pub fn days_until(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let delta_ms = (start - now).num_milliseconds();
    delta_ms.div_euclid(MS_PER_DAY) + i64::from(delta_ms.rem_euclid(MS_PER_DAY) != 0)
}

pub fn is_visible(surface: BannerSurface, settings: &SiteSettings, inputs: &BannerInputs) -> bool {
    let switched_on = match surface {
        BannerSurface::TopBanner => settings.show_event_banner,
        BannerSurface::NavBadge => settings.show_event_badge,
    };
    if !switched_on || inputs.dismissed {
        return false;
    }
    let Some(event) = inputs.event else {
        return false;
    };
    inputs.now < event.start_date
        && days_until(event.start_date, inputs.now) <= settings.banner_days_threshold
        && inputs.current_path.trim_end_matches('/') != event.detail_path()
}

/// The next instant after `now` at which the time-dependent part of the rule
/// can flip for an eligible event: it enters the threshold window, or it
/// starts.
pub fn next_banner_change(
    events: &[EventRecord],
    threshold_days: i64,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    events
        .iter()
        .filter(|event| event.banner_eligible && event.is_upcoming(now))
        .flat_map(|event| {
            let window_opens = Duration::try_days(threshold_days)
                .and_then(|window| event.start_date.checked_sub_signed(window));
            [window_opens, Some(event.start_date)]
        })
        .flatten()
        .filter(|at| *at > now)
        .min()
}

/// One pending wake-up at the next banner change. The owner re-evaluates the
/// banner when `on_wake` runs and arms a fresh wake for the change after.
pub struct BannerWake {
    task: Option<TaskHandle>,
}

impl BannerWake {
    pub fn arm(
        events: &[EventRecord],
        threshold_days: i64,
        now: DateTime<Utc>,
        scheduler: &dyn Scheduler,
        on_wake: impl FnOnce() + 'static,
    ) -> Self {
        let task = next_banner_change(events, threshold_days, now).map(|at| {
            let delay_ms = (at - now).num_milliseconds().clamp(0, MAX_TIMER_DELAY_MS);
            debug!("Re-checking event banner at {}", at);
            scheduler.schedule_once(delay_ms as u32, Box::new(on_wake))
        });
        Self { task }
    }

    pub fn cancel(&mut self) {
        if let Some(mut task) = self.task.take() {
            task.cancel();
        }
    }
}

/// Session-scoped "closed the banner" flag. There is no way back from
/// dismissed; a full reload starts over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BannerDismissal {
    dismissed: bool,
}

impl BannerDismissal {
    pub fn dismiss(self) -> Self {
        Self { dismissed: true }
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::manual::ManualScheduler;
    use crate::scheduler::Clock;
    use chrono::TimeZone;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn event(id: &str, days_out: i64, priority: i32, eligible: bool) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            slug: Some(format!("{}-slug", id)),
            title: format!("Event {}", id),
            start_date: now() + Duration::days(days_out),
            end_date: None,
            location: "Workshop".to_string(),
            registration_url: None,
            banner_eligible: eligible,
            banner_priority: priority,
            summary: None,
        }
    }

    fn settings() -> SiteSettings {
        SiteSettings {
            show_event_banner: true,
            show_event_badge: true,
            banner_days_threshold: 30,
            ..SiteSettings::default()
        }
    }

    fn inputs(event: &EventRecord) -> BannerInputs<'_> {
        BannerInputs {
            event: Some(event),
            now: now(),
            current_path: "/",
            dismissed: false,
        }
    }

    #[test]
    fn shown_when_every_condition_holds() {
        let event = event("a", 20, 0, true);
        assert!(is_visible(BannerSurface::TopBanner, &settings(), &inputs(&event)));
        assert!(is_visible(BannerSurface::NavBadge, &settings(), &inputs(&event)));
    }

    #[test]
    fn hidden_beyond_threshold() {
        let event = event("a", 40, 0, true);
        assert!(!is_visible(BannerSurface::TopBanner, &settings(), &inputs(&event)));
    }

    #[test]
    fn threshold_is_inclusive() {
        let event = event("a", 30, 0, true);
        assert!(is_visible(BannerSurface::TopBanner, &settings(), &inputs(&event)));

        let later = EventRecord {
            start_date: event.start_date + Duration::minutes(1),
            ..event
        };
        assert!(!is_visible(BannerSurface::TopBanner, &settings(), &inputs(&later)));
    }

    #[test]
    fn hidden_when_switched_off() {
        let event = event("a", 20, 0, true);
        let off = SiteSettings {
            show_event_banner: false,
            ..settings()
        };
        assert!(!is_visible(BannerSurface::TopBanner, &off, &inputs(&event)));
        // the badge has its own switch
        assert!(is_visible(BannerSurface::NavBadge, &off, &inputs(&event)));

        let badge_off = SiteSettings {
            show_event_badge: false,
            ..settings()
        };
        assert!(is_visible(BannerSurface::TopBanner, &badge_off, &inputs(&event)));
        assert!(!is_visible(BannerSurface::NavBadge, &badge_off, &inputs(&event)));
    }

    #[test]
    fn hidden_without_event() {
        let inputs = BannerInputs {
            event: None,
            now: now(),
            current_path: "/",
            dismissed: false,
        };
        assert!(!is_visible(BannerSurface::TopBanner, &settings(), &inputs));
    }

    #[test]
    fn hidden_once_event_started() {
        let event = event("a", 0, 0, true);
        assert!(!is_visible(BannerSurface::TopBanner, &settings(), &inputs(&event)));

        let started = event.clone();
        let mut past = inputs(&started);
        past.now = now() + Duration::hours(2);
        assert!(!is_visible(BannerSurface::TopBanner, &settings(), &past));
    }

    #[test]
    fn hidden_on_the_events_own_page() {
        let event = event("a", 10, 0, true);
        let mut on_page = inputs(&event);
        on_page.current_path = "/events/a-slug";
        assert!(!is_visible(BannerSurface::TopBanner, &settings(), &on_page));
        on_page.current_path = "/events/a-slug/";
        assert!(!is_visible(BannerSurface::NavBadge, &settings(), &on_page));
        on_page.current_path = "/events";
        assert!(is_visible(BannerSurface::TopBanner, &settings(), &on_page));
    }

    #[test]
    fn hidden_after_dismissal() {
        let event = event("a", 10, 0, true);
        let dismissal = BannerDismissal::default();
        assert!(!dismissal.is_dismissed());
        let dismissal = dismissal.dismiss().dismiss();

        let mut dismissed = inputs(&event);
        dismissed.dismissed = dismissal.is_dismissed();
        assert!(!is_visible(BannerSurface::TopBanner, &settings(), &dismissed));
    }

    #[test]
    fn selects_highest_priority_upcoming_eligible_event() {
        let events = vec![
            event("past", -3, 9, true),
            event("ineligible", 5, 8, false),
            event("low", 2, 1, true),
            event("high-late", 25, 5, true),
            event("high-early", 12, 5, true),
        ];
        let chosen = select_banner_event(&events, now()).unwrap();
        assert_eq!(chosen.id, "high-early");

        assert!(select_banner_event(&events[..2], now()).is_none());
    }

    #[test]
    fn days_until_rounds_partial_days_up() {
        assert_eq!(days_until(now() + Duration::days(20), now()), 20);
        assert_eq!(days_until(now() + Duration::hours(3), now()), 1);
        assert_eq!(days_until(now() + Duration::days(2) + Duration::seconds(1), now()), 3);
        assert_eq!(days_until(now(), now()), 0);
    }

    #[test]
    fn next_change_is_window_opening_or_start() {
        let far = event("far", 40, 0, true);
        assert_eq!(
            next_banner_change(std::slice::from_ref(&far), 30, now()),
            Some(now() + Duration::days(10))
        );

        let near = event("near", 2, 0, true);
        let events = vec![far, near, event("hidden", 1, 0, false), event("past", -1, 0, true)];
        assert_eq!(next_banner_change(&events, 30, now()), Some(now() + Duration::days(2)));
        assert_eq!(next_banner_change(&events[2..], 30, now()), None);
    }

    // Drives the banner the way the page shell does: every wake re-reads the
    // clock and arms the next wake.
    fn follow_banner(
        scheduler: &ManualScheduler,
        events: Rc<Vec<EventRecord>>,
        shown: Rc<RefCell<Vec<(i64, bool)>>>,
        wake: Rc<RefCell<Option<BannerWake>>>,
    ) {
        let now = scheduler.now();
        let visible = select_banner_event(&events, now).map_or(false, |event| {
            let inputs = BannerInputs {
                event: Some(event),
                now,
                current_path: "/",
                dismissed: false,
            };
            is_visible(BannerSurface::TopBanner, &settings(), &inputs)
        });
        shown.borrow_mut().push((scheduler.elapsed_ms(), visible));

        let next = {
            let scheduler = scheduler.clone();
            let events = events.clone();
            let shown = shown.clone();
            let wake = wake.clone();
            move || follow_banner(&scheduler, events, shown, wake)
        };
        let armed = BannerWake::arm(&events, 30, now, scheduler, next);
        *wake.borrow_mut() = Some(armed);
    }

    #[test]
    fn banner_turns_off_when_event_starts() {
        let scheduler = ManualScheduler::new(now());
        let events = Rc::new(vec![event("a", 1, 0, true)]);
        let shown = Rc::new(RefCell::new(Vec::new()));
        let wake = Rc::new(RefCell::new(None));

        follow_banner(&scheduler, events, shown.clone(), wake.clone());
        assert_eq!(*shown.borrow(), vec![(0, true)]);

        scheduler.advance(MS_PER_DAY - 1);
        assert_eq!(shown.borrow().len(), 1);
        scheduler.advance(1);
        assert_eq!(*shown.borrow(), vec![(0, true), (MS_PER_DAY, false)]);
        assert_eq!(scheduler.pending_tasks(), 0);
    }

    #[test]
    fn banner_appears_when_event_enters_window() {
        let scheduler = ManualScheduler::new(now());
        let events = Rc::new(vec![event("a", 35, 0, true)]);
        let shown = Rc::new(RefCell::new(Vec::new()));
        let wake = Rc::new(RefCell::new(None));

        follow_banner(&scheduler, events, shown.clone(), wake.clone());
        scheduler.advance(5 * MS_PER_DAY);
        assert_eq!(*shown.borrow(), vec![(0, false), (5 * MS_PER_DAY, true)]);
    }

    #[test]
    fn distant_change_is_reached_in_capped_steps() {
        let scheduler = ManualScheduler::new(now());
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let events = vec![event("a", 90, 0, true)];

        let _wake = BannerWake::arm(&events, 30, now(), &scheduler, move || flag.set(true));
        scheduler.advance(MAX_TIMER_DELAY_MS);
        assert!(fired.get());
        assert!(scheduler.now() < now() + Duration::days(60));
    }

    #[test]
    fn cancelled_wake_never_fires() {
        let scheduler = ManualScheduler::new(now());
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let events = vec![event("a", 1, 0, true)];

        let mut wake = BannerWake::arm(&events, 30, now(), &scheduler, move || flag.set(true));
        wake.cancel();
        scheduler.advance(2 * MS_PER_DAY);
        assert!(!fired.get());
    }
}
