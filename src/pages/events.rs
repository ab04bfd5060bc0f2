use chrono::{DateTime, Utc};
use serde_json::json;
use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_router::prelude::*;

use crate::cms::client::{use_site_events, Remote};
use crate::cms::models::{format_event_date, EventRecord};
use crate::components::event_countdown::EventCountdown;
use crate::config;
use crate::consent::context::ConsentContext;
use crate::Route;

fn render_event_row(event: &EventRecord) -> Html {
    html! {
        <li class="event-row">
            <Link<Route> to={Route::EventDetail { slug: event.detail_key().to_string() }} classes="event-row-title">
                {&event.title}
            </Link<Route>>
            <span class="event-row-date">{format_event_date(event.start_date)}</span>
            <span class="event-row-location">{&event.location}</span>
        </li>
    }
}

#[function_component(Events)]
pub fn events() -> Html {
    use_title(config::page_title("Events"));
    let events = use_site_events();

    let body = match &events {
        Remote::Loading => html! { <p class="loading">{"Loading events…"}</p> },
        Remote::Failed => html! { <p class="empty">{"The calendar is unavailable right now."}</p> },
        Remote::Ready(events) => {
            let now = Utc::now();
            let (upcoming, mut past): (Vec<&EventRecord>, Vec<&EventRecord>) =
                events.iter().partition(|event| event.is_upcoming(now));
            past.reverse();
            html! {
                <>
                    <section class="event-list">
                        <h2>{"Upcoming"}</h2>
                        {
                            if upcoming.is_empty() {
                                html! { <p class="empty">{"Nothing scheduled yet. Check back soon."}</p> }
                            } else {
                                html! { <ul>{ upcoming.into_iter().map(render_event_row).collect::<Html>() }</ul> }
                            }
                        }
                    </section>
                    {
                        if past.is_empty() {
                            html! {}
                        } else {
                            html! {
                                <section class="event-list past">
                                    <h2>{"Past events"}</h2>
                                    <ul>{ past.into_iter().map(render_event_row).collect::<Html>() }</ul>
                                </section>
                            }
                        }
                    }
                </>
            }
        }
    };

    html! {
        <div class="events-page">
            <section class="page-hero">
                <h1>{"Events"}</h1>
                <p>{"Competitions, open shop nights and demos. Come say hi."}</p>
            </section>
            {body}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EventDetailProps {
    pub slug: String,
}

#[function_component(EventDetail)]
pub fn event_detail(props: &EventDetailProps) -> Html {
    let events = use_site_events();
    let consent = use_context::<ConsentContext>();
    // Start time of the event whose countdown ran out while on this page.
    let started = use_state(|| None::<DateTime<Utc>>);

    let event = events
        .ready()
        .and_then(|events| events.iter().find(|event| event.detail_key() == props.slug))
        .cloned();

    let title = event
        .as_ref()
        .map(|event| config::page_title(&event.title))
        .unwrap_or_else(|| config::page_title("Events"));
    use_title(title);

    let Some(event) = event else {
        return match events {
            Remote::Loading => html! { <p class="loading">{"Loading event…"}</p> },
            _ => html! {
                <section class="page not-found">
                    <h1>{"Event not found"}</h1>
                    <Link<Route> to={Route::Events}>{"See all events"}</Link<Route>>
                </section>
            },
        };
    };

    let on_register = {
        let event_id = event.id.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(consent) = consent.as_ref() {
                consent
                    .track
                    .emit(("event_register_click", json!({ "event_id": event_id })));
            }
        })
    };

    let on_started = {
        let started = started.clone();
        let start_date = event.start_date;
        Callback::from(move |_: ()| started.set(Some(start_date)))
    };
    let open_for_registration = *started != Some(event.start_date) && event.is_upcoming(Utc::now());

    html! {
        <article class="event-detail">
            <h1>{&event.title}</h1>
            <div class="event-meta">
                <span>{format_event_date(event.start_date)}</span>
                {
                    if let Some(end) = event.end_date {
                        html! { <span>{" – "}{format_event_date(end)}</span> }
                    } else {
                        html! {}
                    }
                }
                <span class="event-location">{&event.location}</span>
            </div>
            <EventCountdown target={event.start_date} on_expired={on_started} />
            {
                if let Some(summary) = event.summary.as_ref() {
                    html! { <p class="event-summary">{summary}</p> }
                } else {
                    html! {}
                }
            }
            {
                match event.registration_url.as_ref() {
                    Some(url) if open_for_registration => html! {
                        <a class="event-register" href={url.clone()} target="_blank" rel="noopener noreferrer" onclick={on_register}>
                            {"Register"}
                        </a>
                    },
                    _ => html! {},
                }
            }
        </article>
    }
}
