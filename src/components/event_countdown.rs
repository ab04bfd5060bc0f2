use std::rc::Rc;

use chrono::{DateTime, Utc};
use yew::prelude::*;

use crate::countdown::{CountdownPhase, CountdownTimer};
use crate::scheduler::{BrowserScheduler, SystemClock};

#[derive(Properties, PartialEq)]
pub struct EventCountdownProps {
    pub target: DateTime<Utc>,
    #[prop_or_default]
    pub on_expired: Callback<()>,
}

#[function_component(EventCountdown)]
pub fn event_countdown(props: &EventCountdownProps) -> Html {
    let phase = use_state(|| CountdownPhase::Computing);

    {
        let setter = phase.setter();
        let on_expired = props.on_expired.clone();
        use_effect_with_deps(
            move |target: &DateTime<Utc>| {
                let timer = CountdownTimer::start(
                    *target,
                    Rc::new(SystemClock),
                    &BrowserScheduler,
                    Rc::new(move |next: CountdownPhase| {
                        setter.set(next);
                        if next == CountdownPhase::Expired {
                            on_expired.emit(());
                        }
                    }),
                );
                move || drop(timer)
            },
            props.target,
        );
    }

    match *phase {
        CountdownPhase::Ticking(left) => html! {
            <span class="event-countdown" aria-label="Time until the event starts">
                <span class="countdown-unit">{format!("{}d", left.days)}</span>
                <span class="countdown-unit">{format!("{:02}h", left.hours)}</span>
                <span class="countdown-unit">{format!("{:02}m", left.minutes)}</span>
                <span class="countdown-unit">{format!("{:02}s", left.seconds)}</span>
            </span>
        },
        CountdownPhase::Computing | CountdownPhase::Expired => html! {},
    }
}
