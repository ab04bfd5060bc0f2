use std::rc::Rc;

use yew::prelude::*;
use yew_router::prelude::*;

use crate::toast::RecruitingToast;
use crate::Route;

pub enum ToastAction {
    Elapse,
    Close,
    PromptOpened,
    Navigated(String),
}

impl Reducible for RecruitingToast {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            ToastAction::Elapse => self.elapse(),
            ToastAction::Close => self.close(),
            ToastAction::PromptOpened => self.prompt_opened(),
            ToastAction::Navigated(path) => self.navigated_to(&path),
        };
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct RecruitingToastProps {
    pub message: Option<String>,
    pub on_close: Callback<()>,
}

#[function_component(RecruitingToastView)]
pub fn recruiting_toast_view(props: &RecruitingToastProps) -> Html {
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let message = props
        .message
        .clone()
        .unwrap_or_else(|| "We're recruiting mentors and build-season volunteers.".to_string());

    html! {
        <div class="recruiting-toast" role="status">
            <p>{message}</p>
            <Link<Route> to={Route::Careers} classes="recruiting-toast-link">
                {"See open positions →"}
            </Link<Route>>
            <button class="recruiting-toast-close" aria-label="Close" onclick={on_close}>{"✕"}</button>
        </div>
    }
}
