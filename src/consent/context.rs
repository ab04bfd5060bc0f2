use log::info;
use serde_json::Value;
use yew::prelude::*;

use crate::consent::analytics::GtagAnalytics;
use crate::consent::cookie::CookieJar;
use crate::consent::store::{
    AnalyticsSink, ConsentAction, ConsentKind, ConsentPersistence, ConsentState, ConsentStore,
};

/// What the rest of the page sees of the consent store. `committed` is the
/// stored decision; `draft` is what the open prompt is showing.
#[derive(Clone, PartialEq)]
pub struct ConsentContext {
    pub committed: ConsentState,
    pub draft: ConsentState,
    pub prompt_open: bool,
    pub dispatch: Callback<ConsentAction>,
    pub track: Callback<(&'static str, Value)>,
}

impl ConsentContext {
    pub fn has_consent(&self, kind: ConsentKind) -> bool {
        self.committed.is_granted(kind)
    }
}

#[derive(Clone, Copy, Default, PartialEq)]
struct Snapshot {
    committed: ConsentState,
    draft: ConsentState,
    prompt_open: bool,
}

impl Snapshot {
    fn of<P: ConsentPersistence, A: AnalyticsSink>(store: &ConsentStore<P, A>) -> Self {
        Self {
            committed: store.committed(),
            draft: store.draft(),
            prompt_open: store.is_prompt_open(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ConsentProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ConsentProvider)]
pub fn consent_provider(props: &ConsentProviderProps) -> Html {
    let store = use_mut_ref(|| ConsentStore::new(CookieJar::consent(), GtagAnalytics::new()));
    let snapshot = use_state(Snapshot::default);

    {
        let store = store.clone();
        let snapshot = snapshot.clone();
        use_effect_with_deps(
            move |_| {
                let mut store = store.borrow_mut();
                if store.load() {
                    info!("No consent decision on record, asking");
                }
                snapshot.set(Snapshot::of(&*store));
                || ()
            },
            (),
        );
    }

    let dispatch = {
        let store = store.clone();
        let setter = snapshot.setter();
        use_callback(
            move |action: ConsentAction, _| {
                let mut store = store.borrow_mut();
                store.apply(action);
                setter.set(Snapshot::of(&*store));
            },
            (),
        )
    };

    let track = {
        let store = store.clone();
        use_callback(
            move |(event, params): (&'static str, Value), _| {
                store.borrow().track(event, &params);
            },
            (),
        )
    };

    let Snapshot {
        committed,
        draft,
        prompt_open,
    } = *snapshot;
    let context = ConsentContext {
        committed,
        draft,
        prompt_open,
        dispatch,
        track,
    };

    html! {
        <ContextProvider<ConsentContext> {context}>
            { for props.children.iter() }
        </ContextProvider<ConsentContext>>
    }
}
