use serde_json::json;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::cms::models::{format_event_date, EventRecord};
use crate::components::event_countdown::EventCountdown;
use crate::consent::context::ConsentContext;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct EventBannerProps {
    pub event: EventRecord,
    pub on_dismiss: Callback<()>,
}

#[function_component(EventBanner)]
pub fn event_banner(props: &EventBannerProps) -> Html {
    let consent = use_context::<ConsentContext>();
    let event = &props.event;

    let on_close = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };

    let on_register = {
        let consent = consent.clone();
        let event_id = event.id.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(consent) = consent.as_ref() {
                consent
                    .track
                    .emit(("event_banner_click", json!({ "event_id": event_id })));
            }
        })
    };

    html! {
        <div class="event-banner" role="region" aria-label="Upcoming event">
            <div class="event-banner-content">
                <Link<Route> to={Route::EventDetail { slug: event.detail_key().to_string() }} classes="event-banner-title">
                    {&event.title}
                </Link<Route>>
                <span class="event-banner-date">{format_event_date(event.start_date)}</span>
                <EventCountdown target={event.start_date} />
                {
                    if let Some(url) = event.registration_url.as_ref() {
                        html! {
                            <a class="event-banner-register" href={url.clone()} target="_blank" rel="noopener noreferrer" onclick={on_register}>
                                {"Register"}
                            </a>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
            <button class="event-banner-close" aria-label="Dismiss" onclick={on_close}>{"✕"}</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EventBadgeProps {
    pub event: EventRecord,
}

/// Compact pointer to the same event, shown in the navigation bar.
#[function_component(EventBadge)]
pub fn event_badge(props: &EventBadgeProps) -> Html {
    html! {
        <Link<Route> to={Route::EventDetail { slug: props.event.detail_key().to_string() }} classes="nav-event-badge">
            <span class="badge-dot"></span>
            {&props.event.title}
        </Link<Route>>
    }
}
