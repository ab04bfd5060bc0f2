use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::cms::client::{use_remote, Remote};
use crate::cms::models::TeamMember;
use crate::config;

fn render_member(member: &TeamMember) -> Html {
    html! {
        <div class="team-card">
            {
                if let Some(url) = member.image_url.as_ref() {
                    html! { <img class="team-photo" src={format!("{}?w=320&h=320&fit=crop", url)} alt={member.name.clone()} loading="lazy" /> }
                } else {
                    html! { <div class="team-photo placeholder"></div> }
                }
            }
            <h3>{&member.name}</h3>
            <span class="team-role">{&member.role}</span>
            {
                if let Some(bio) = member.bio.as_ref() {
                    html! { <p class="team-bio">{bio}</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

#[function_component(About)]
pub fn about() -> Html {
    use_title(config::page_title("About"));
    let team = use_remote(|cms| async move { cms.team_members().await });

    let team_section = match &team {
        Remote::Loading => html! { <p class="loading">{"Loading the team…"}</p> },
        Remote::Ready(members) if !members.is_empty() => html! {
            <div class="team-grid">
                { members.iter().map(render_member).collect::<Html>() }
            </div>
        },
        _ => html! {},
    };

    html! {
        <div class="about-page">
            <section class="page-hero">
                <h1>{"About us"}</h1>
                <p>
                    {"We started in a borrowed garage with one donated drivetrain. Today our students design, machine and program competition robots every season, mentored by engineers who volunteer their evenings."}
                </p>
            </section>
            <section class="about-mission">
                <h2>{"Our mission"}</h2>
                <p>{"Make engineering something every student can try: no tuition, no prior experience, no gatekeeping."}</p>
            </section>
            <section class="about-team">
                <h2>{"The team"}</h2>
                {team_section}
            </section>
        </div>
    }
}
