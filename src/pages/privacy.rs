use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config;
use crate::consent::context::ConsentContext;
use crate::consent::store::{ConsentAction, ConsentKind, ConsentStatus};

fn describe(status: ConsentStatus) -> &'static str {
    match status {
        ConsentStatus::Granted => "allowed",
        ConsentStatus::Denied => "not allowed",
        ConsentStatus::Pending => "not decided yet",
    }
}

#[function_component(Privacy)]
pub fn privacy() -> Html {
    use_title(config::page_title("Privacy"));
    let consent = use_context::<ConsentContext>();

    let current = consent.as_ref().map(|consent| {
        let open_prompt = {
            let dispatch = consent.dispatch.clone();
            Callback::from(move |_: MouseEvent| dispatch.emit(ConsentAction::OpenPrompt))
        };
        html! {
            <div class="privacy-current">
                <p>{format!("Analytics cookies: {}", describe(consent.committed.status(ConsentKind::Analytics)))}</p>
                <p>{format!("Marketing cookies: {}", describe(consent.committed.status(ConsentKind::Marketing)))}</p>
                <button class="cookie-button" onclick={open_prompt}>{"Change cookie settings"}</button>
            </div>
        }
    });

    html! {
        <div class="privacy-page">
            <section class="page-hero">
                <h1>{"Privacy"}</h1>
            </section>
            <section class="legal-section">
                <h2>{"Cookies we use"}</h2>
                <h3>{"Necessary"}</h3>
                <p>{"One cookie that remembers your cookie choice for a year. It is always on."}</p>
                <h3>{"Analytics"}</h3>
                <p>{"Google Analytics, loaded only after you allow it, counts page views and clicks on event registrations so we know which outreach works."}</p>
                <h3>{"Marketing"}</h3>
                <p>{"Reserved for sponsor campaign attribution. Nothing is set without your permission."}</p>
            </section>
            <section class="legal-section">
                <h2>{"Your choice"}</h2>
                { current.unwrap_or_default() }
            </section>
        </div>
    }
}
