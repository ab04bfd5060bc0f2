use chrono::Utc;
use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_router::prelude::*;

use crate::cms::client::{use_remote, use_site_events, Remote};
use crate::cms::models::format_event_date;
use crate::config;
use crate::Route;

#[function_component(Home)]
pub fn home() -> Html {
    use_title(config::SITE_NAME.to_string());
    let events = use_site_events();
    let partners = use_remote(|cms| async move { cms.partners().await });

    // Scroll to top only on initial mount
    use_effect_with_deps(
        move |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    let now = Utc::now();
    let upcoming = match &events {
        Remote::Ready(events) => events
            .iter()
            .filter(|event| event.is_upcoming(now))
            .take(3)
            .map(|event| html! {
                <li class="home-event">
                    <Link<Route> to={Route::EventDetail { slug: event.detail_key().to_string() }}>
                        {&event.title}
                    </Link<Route>>
                    <span class="home-event-date">{format_event_date(event.start_date)}</span>
                </li>
            })
            .collect::<Html>(),
        _ => html! {},
    };

    html! {
        <div class="home-page">
            <section class="home-hero">
                <h1>{"Building robots, and the people who build them."}</h1>
                <p>{"A volunteer-run robotics program giving students hands-on engineering experience, free of charge."}</p>
                <div class="home-hero-actions">
                    <Link<Route> to={Route::Projects} classes="hero-button primary">{"See our robots"}</Link<Route>>
                    <Link<Route> to={Route::Careers} classes="hero-button">{"Get involved"}</Link<Route>>
                </div>
            </section>

            <section class="home-events">
                <h2>{"Coming up"}</h2>
                <ul>{upcoming}</ul>
                <Link<Route> to={Route::Events} classes="section-link">{"All events →"}</Link<Route>>
            </section>

            {
                if let Some(partners) = partners.ready().filter(|p| !p.is_empty()) {
                    html! {
                        <section class="home-partners">
                            <h2>{"Supported by"}</h2>
                            <div class="partner-strip">
                                { partners.iter().map(|partner| {
                                    let label = match partner.logo_url.as_ref() {
                                        Some(logo) => html! { <img src={logo.clone()} alt={partner.name.clone()} loading="lazy" /> },
                                        None => html! { <span>{&partner.name}</span> },
                                    };
                                    match partner.website.as_ref() {
                                        Some(site) => html! {
                                            <a class={classes!("partner", partner.tier.clone())} href={site.clone()} target="_blank" rel="noopener noreferrer">{label}</a>
                                        },
                                        None => html! { <div class={classes!("partner", partner.tier.clone())}>{label}</div> },
                                    }
                                }).collect::<Html>() }
                            </div>
                        </section>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
