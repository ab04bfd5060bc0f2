use yew::prelude::*;
use yew_router::prelude::*;

use crate::consent::context::ConsentContext;
use crate::consent::store::{ConsentAction, ConsentKind, ConsentStatus};
use crate::Route;

fn toggled(status: ConsentStatus) -> ConsentStatus {
    match status {
        ConsentStatus::Granted => ConsentStatus::Denied,
        ConsentStatus::Denied | ConsentStatus::Pending => ConsentStatus::Granted,
    }
}

/// Actions that close the prompt also leave the customize view, so the next
/// time the prompt opens it starts from the short choice again.
fn ends_customizing(action: ConsentAction) -> bool {
    matches!(
        action,
        ConsentAction::AcceptAll | ConsentAction::RejectAll | ConsentAction::Save
    )
}

#[function_component(CookieConsent)]
pub fn cookie_consent() -> Html {
    let consent = use_context::<ConsentContext>();
    let customizing = use_state(|| false);

    let Some(consent) = consent else {
        return html! {};
    };
    if !consent.prompt_open {
        return html! {};
    }

    let action = |action: ConsentAction| {
        let dispatch = consent.dispatch.clone();
        let customizing = customizing.clone();
        Callback::from(move |_: MouseEvent| {
            if ends_customizing(action) {
                customizing.set(false);
            }
            dispatch.emit(action);
        })
    };
    let toggle = |kind: ConsentKind| {
        let dispatch = consent.dispatch.clone();
        let next = toggled(consent.draft.status(kind));
        Callback::from(move |_: MouseEvent| dispatch.emit(ConsentAction::Update(kind, next)))
    };
    let open_customize = {
        let customizing = customizing.clone();
        Callback::from(move |_: MouseEvent| customizing.set(true))
    };

    html! {
        <div class="cookie-consent" role="dialog" aria-live="polite">
            <p>
                {"We use cookies to keep the site working and, with your permission, to understand how visitors find our events. "}
                <Link<Route> to={Route::Privacy}>{"Privacy policy"}</Link<Route>>
            </p>
            {
                if *customizing {
                    html! {
                        <div class="cookie-consent-options">
                            <label class="cookie-option">
                                <input type="checkbox" checked={true} disabled={true} />
                                {"Necessary"}
                            </label>
                            <label class="cookie-option">
                                <input
                                    type="checkbox"
                                    checked={consent.draft.is_granted(ConsentKind::Analytics)}
                                    onclick={toggle(ConsentKind::Analytics)}
                                />
                                {"Analytics"}
                            </label>
                            <label class="cookie-option">
                                <input
                                    type="checkbox"
                                    checked={consent.draft.is_granted(ConsentKind::Marketing)}
                                    onclick={toggle(ConsentKind::Marketing)}
                                />
                                {"Marketing"}
                            </label>
                            <button class="cookie-button primary" onclick={action(ConsentAction::Save)}>
                                {"Save preferences"}
                            </button>
                        </div>
                    }
                } else {
                    html! {
                        <div class="cookie-consent-actions">
                            <button class="cookie-button primary" onclick={action(ConsentAction::AcceptAll)}>
                                {"Accept all"}
                            </button>
                            <button class="cookie-button" onclick={action(ConsentAction::RejectAll)}>
                                {"Reject all"}
                            </button>
                            <button class="cookie-button link" onclick={open_customize}>
                                {"Customize"}
                            </button>
                        </div>
                    }
                }
            }
            <style>
                {r#"
                .cookie-consent {
                    position: fixed;
                    bottom: 1.5rem;
                    left: 1.5rem;
                    right: 1.5rem;
                    max-width: 560px;
                    padding: 1.25rem 1.5rem;
                    background: rgba(20, 24, 32, 0.96);
                    color: #f2f2f2;
                    border: 1px solid rgba(255, 176, 32, 0.25);
                    border-radius: 12px;
                    z-index: 1000;
                }
                .cookie-consent-actions, .cookie-consent-options {
                    display: flex;
                    flex-wrap: wrap;
                    gap: 0.75rem;
                    align-items: center;
                }
                .cookie-button {
                    padding: 0.5rem 1rem;
                    border-radius: 6px;
                    border: 1px solid #ffb020;
                    background: transparent;
                    color: inherit;
                    cursor: pointer;
                }
                .cookie-button.primary {
                    background: #ffb020;
                    color: #14181f;
                }
                .cookie-button.link {
                    border: none;
                    text-decoration: underline;
                }
                "#}
            </style>
        </div>
    }
}
