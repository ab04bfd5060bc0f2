use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config;

#[function_component(Contact)]
pub fn contact() -> Html {
    use_title(config::page_title("Contact"));

    html! {
        <div class="contact-page">
            <section class="page-hero">
                <h1>{"Contact"}</h1>
                <p>{"Questions about joining, sponsoring or bringing a robot demo to your school?"}</p>
            </section>
            <section class="contact-details">
                <div class="contact-item">
                    <h2>{"Email"}</h2>
                    <a href={format!("mailto:{}", config::CONTACT_EMAIL)}>{config::CONTACT_EMAIL}</a>
                </div>
                <div class="contact-item">
                    <h2>{"Shop"}</h2>
                    <p>{"Open shop nights are Tuesdays and Thursdays during build season. See the events page for dates."}</p>
                </div>
                <div class="contact-item">
                    <h2>{"Sponsorship"}</h2>
                    <p>{"We are a registered nonprofit; donations of parts, tools and time are tax deductible."}</p>
                </div>
            </section>
        </div>
    }
}
