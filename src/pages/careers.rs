use serde_json::json;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::cms::client::{use_remote, Remote};
use crate::cms::models::Position;
use crate::config;
use crate::consent::context::ConsentContext;

#[derive(Properties, PartialEq)]
struct PositionCardProps {
    position: Position,
}

#[function_component(PositionCard)]
fn position_card(props: &PositionCardProps) -> Html {
    let consent = use_context::<ConsentContext>();
    let position = &props.position;

    let on_apply = {
        let title = position.title.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(consent) = consent.as_ref() {
                consent.track.emit(("apply_click", json!({ "position": title })));
            }
        })
    };

    let apply_href = position.apply_url.clone().unwrap_or_else(|| {
        format!(
            "mailto:{}?subject={}",
            config::CONTACT_EMAIL,
            urlencoding::encode(&format!("Application: {}", position.title))
        )
    });

    html! {
        <article class="position-card">
            <h2>{&position.title}</h2>
            <div class="position-meta">
                { position.team.as_ref().map(|team| html! { <span>{team}</span> }).unwrap_or_default() }
                { position.commitment.as_ref().map(|c| html! { <span>{c}</span> }).unwrap_or_default() }
            </div>
            <p>{&position.description}</p>
            <a class="position-apply" href={apply_href} onclick={on_apply}>{"Apply"}</a>
        </article>
    }
}

#[function_component(Careers)]
pub fn careers() -> Html {
    use_title(config::page_title("Get involved"));
    let positions = use_remote(|cms| async move { cms.positions().await });

    let list = match &positions {
        Remote::Loading => html! { <p class="loading">{"Loading open positions…"}</p> },
        Remote::Ready(positions) if !positions.is_empty() => positions
            .iter()
            .map(|position| html! { <PositionCard position={position.clone()} /> })
            .collect::<Html>(),
        _ => html! {
            <p class="empty">
                {"No open positions right now, but we always welcome mentors. Write to "}
                <a href={format!("mailto:{}", config::CONTACT_EMAIL)}>{config::CONTACT_EMAIL}</a>
            </p>
        },
    };

    html! {
        <div class="careers-page">
            <section class="page-hero">
                <h1>{"Get involved"}</h1>
                <p>{"Mentors, coaches and volunteers keep the lights on in the shop."}</p>
            </section>
            <section class="position-list">{list}</section>
        </div>
    }
}
