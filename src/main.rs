use chrono::{DateTime, Utc};
use log::{info, Level};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;
use yew::prelude::*;
use yew_router::prelude::*;

mod banner;
mod config;
mod countdown;
mod error;
mod scheduler;
mod toast;
mod cms {
    pub mod client;
    pub mod models;
}
mod consent {
    pub mod analytics;
    pub mod context;
    pub mod cookie;
    pub mod store;
}
mod components {
    pub mod cookie_consent;
    pub mod event_banner;
    pub mod event_countdown;
    pub mod recruiting_toast;
}
mod pages {
    pub mod about;
    pub mod blog;
    pub mod careers;
    pub mod contact;
    pub mod events;
    pub mod home;
    pub mod privacy;
    pub mod projects;
}

use banner::{select_banner_event, BannerDismissal, BannerInputs, BannerSurface, BannerWake};
use cms::client::{use_remote, Remote, SiteContent};
use cms::models::EventRecord;
use components::{
    cookie_consent::CookieConsent,
    event_banner::{EventBadge, EventBanner},
    recruiting_toast::{RecruitingToastView, ToastAction},
};
use consent::analytics::page_view;
use consent::context::{ConsentContext, ConsentProvider};
use consent::store::{ConsentAction, ConsentKind};
use pages::{
    about::About,
    blog::Blog,
    careers::Careers,
    contact::Contact,
    events::{EventDetail, Events},
    home::Home,
    privacy::Privacy,
    projects::Projects,
};
use scheduler::BrowserScheduler;
use toast::{RecruitingToast, ToastConditions, ToastTimer};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/about")]
    About,
    #[at("/projects")]
    Projects,
    #[at("/events")]
    Events,
    #[at("/events/:slug")]
    EventDetail { slug: String },
    #[at("/blog")]
    Blog,
    #[at("/careers")]
    Careers,
    #[at("/contact")]
    Contact,
    #[at("/privacy")]
    Privacy,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Home /> },
        Route::About => html! { <About /> },
        Route::Projects => html! { <Projects /> },
        Route::Events => html! { <Events /> },
        Route::EventDetail { slug } => {
            info!("Rendering event page {}", slug);
            html! { <EventDetail {slug} /> }
        }
        Route::Blog => html! { <Blog /> },
        Route::Careers => html! { <Careers /> },
        Route::Contact => html! { <Contact /> },
        Route::Privacy => html! { <Privacy /> },
        Route::NotFound => html! {
            <section class="page not-found">
                <h1>{"Page not found"}</h1>
                <Link<Route> to={Route::Home}>{"Back to the home page"}</Link<Route>>
            </section>
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub badge_event: Option<EventRecord>,
}

#[function_component(Nav)]
pub fn nav(props: &NavProps) -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(
            move |_| {
                let listener = web_sys::window().map(|window| {
                    let scroll_window = window.clone();
                    let scroll_callback = Closure::wrap(Box::new(move || {
                        let offset = scroll_window.scroll_y().unwrap_or(0.0);
                        is_scrolled.set(offset > 80.0);
                    }) as Box<dyn FnMut()>);
                    let _ = window.add_event_listener_with_callback(
                        "scroll",
                        scroll_callback.as_ref().unchecked_ref(),
                    );
                    (window, scroll_callback)
                });

                move || {
                    if let Some((window, scroll_callback)) = listener {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            scroll_callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    let links = [
        (Route::About, "About"),
        (Route::Projects, "Projects"),
        (Route::Events, "Events"),
        (Route::Blog, "Blog"),
        (Route::Careers, "Careers"),
        (Route::Contact, "Contact"),
    ];

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {config::SITE_NAME}
                </Link<Route>>
                {
                    if let Some(event) = props.badge_event.clone() {
                        html! { <EventBadge {event} /> }
                    } else {
                        html! {}
                    }
                }
                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    {
                        links.into_iter().map(|(route, label)| html! {
                            <div onclick={close_menu.clone()}>
                                <Link<Route> to={route} classes="nav-link">{label}</Link<Route>>
                            </div>
                        }).collect::<Html>()
                    }
                </div>
            </div>
        </nav>
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    let consent = use_context::<ConsentContext>();
    let open_settings = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        if let Some(consent) = consent.as_ref() {
            consent.dispatch.emit(ConsentAction::OpenPrompt);
        }
    });

    html! {
        <footer class="site-footer">
            <span>{"Gearhouse Robotics is a 501(c)(3) nonprofit."}</span>
            <Link<Route> to={Route::Privacy} classes="footer-link">{"Privacy"}</Link<Route>>
            <a href="#" class="footer-link" onclick={open_settings}>{"Cookie settings"}</a>
        </footer>
    }
}

/// Everything that sits around the routed page: banner, nav, footer, toast
/// and the consent prompt.
#[function_component(Shell)]
fn shell() -> Html {
    let consent = use_context::<ConsentContext>();
    let location = use_location();
    let settings = use_remote(|cms| async move { cms.site_settings().await });
    let events = use_remote(|cms| async move { cms.events().await });
    let dismissal = use_state(BannerDismissal::default);
    let toast = use_reducer(RecruitingToast::default);
    // Bumped when an event starts or enters the banner window.
    let banner_check = use_state(Utc::now);

    let path = location
        .map(|l| l.path().to_string())
        .unwrap_or_else(|| "/".to_string());
    let prompt_open = consent.as_ref().map_or(false, |c| c.prompt_open);
    let analytics_granted = consent
        .as_ref()
        .map_or(false, |c| c.has_consent(ConsentKind::Analytics));

    {
        let dispatcher = toast.dispatcher();
        use_effect_with_deps(
            move |_| {
                let mut timer = ToastTimer::arm(
                    config::RECRUITING_TOAST_DELAY_MS,
                    &BrowserScheduler,
                    move || dispatcher.dispatch(ToastAction::Elapse),
                );
                move || timer.cancel()
            },
            (),
        );
    }

    {
        let dispatcher = toast.dispatcher();
        let track = consent.as_ref().map(|c| c.track.clone());
        use_effect_with_deps(
            move |(path, analytics_granted): &(String, bool)| {
                dispatcher.dispatch(ToastAction::Navigated(path.clone()));
                if let (Some(track), true) = (track, *analytics_granted) {
                    track.emit(page_view(path));
                }
                || ()
            },
            (path.clone(), analytics_granted),
        );
    }

    {
        let dispatcher = toast.dispatcher();
        use_effect_with_deps(
            move |open: &bool| {
                if *open {
                    dispatcher.dispatch(ToastAction::PromptOpened);
                }
                || ()
            },
            prompt_open,
        );
    }

    let content = SiteContent {
        settings: settings.clone(),
        events: events.clone(),
    };
    let settings = settings.ready().cloned().unwrap_or_default();

    {
        let deps = (events.clone(), settings.banner_days_threshold, *banner_check);
        let banner_check = banner_check.clone();
        use_effect_with_deps(
            move |(events, threshold_days, _): &(Remote<Vec<EventRecord>>, i64, DateTime<Utc>)| {
                let events = events.ready().map(Vec::as_slice).unwrap_or_default();
                let mut wake = BannerWake::arm(
                    events,
                    *threshold_days,
                    Utc::now(),
                    &BrowserScheduler,
                    move || banner_check.set(Utc::now()),
                );
                move || wake.cancel()
            },
            deps,
        );
    }

    let now = Utc::now();
    let event = events
        .ready()
        .and_then(|events| select_banner_event(events, now))
        .cloned();
    let inputs = BannerInputs {
        event: event.as_ref(),
        now,
        current_path: &path,
        dismissed: dismissal.is_dismissed(),
    };
    let show_banner = banner::is_visible(BannerSurface::TopBanner, &settings, &inputs);
    let show_badge = banner::is_visible(BannerSurface::NavBadge, &settings, &inputs);
    let show_toast = toast.is_visible(&ToastConditions {
        enabled: settings.show_recruiting_toast,
        current_path: &path,
        consent_prompt_open: prompt_open,
    });

    let on_dismiss_banner = {
        let dismissal = dismissal.clone();
        Callback::from(move |_: ()| {
            info!("Event banner dismissed for this session");
            dismissal.set((*dismissal).dismiss());
        })
    };
    let on_close_toast = {
        let dispatcher = toast.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(ToastAction::Close))
    };

    html! {
        <ContextProvider<SiteContent> context={content}>
            {
                match event.clone() {
                    Some(event) if show_banner => html! {
                        <EventBanner {event} on_dismiss={on_dismiss_banner} />
                    },
                    _ => html! {},
                }
            }
            <Nav badge_event={if show_badge { event } else { None }} />
            <main class="site-main">
                <Switch<Route> render={switch} />
            </main>
            <Footer />
            {
                if show_toast {
                    html! {
                        <RecruitingToastView
                            message={settings.recruiting_message.clone()}
                            on_close={on_close_toast}
                        />
                    }
                } else {
                    html! {}
                }
            }
            <CookieConsent />
        </ContextProvider<SiteContent>>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <ConsentProvider>
                <Shell />
            </ConsentProvider>
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting site");
    yew::Renderer::<App>::new().render();
}
