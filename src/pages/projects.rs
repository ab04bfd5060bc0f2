use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::cms::client::{use_remote, Remote};
use crate::config;

#[function_component(Projects)]
pub fn projects() -> Html {
    use_title(config::page_title("Projects"));
    let projects = use_remote(|cms| async move { cms.projects().await });

    let list = match &projects {
        Remote::Loading => html! { <p class="loading">{"Loading projects…"}</p> },
        Remote::Ready(projects) if !projects.is_empty() => projects
            .iter()
            .map(|project| html! {
                <article class="project-card" id={project.slug.clone().unwrap_or_default()}>
                    {
                        if let Some(url) = project.image_url.as_ref() {
                            html! { <img src={format!("{}?w=640&auto=format", url)} alt={project.title.clone()} loading="lazy" /> }
                        } else {
                            html! {}
                        }
                    }
                    <h2>{&project.title}</h2>
                    {
                        if let Some(status) = project.status.as_ref() {
                            html! { <span class="project-status">{status}</span> }
                        } else {
                            html! {}
                        }
                    }
                    <p>{&project.summary}</p>
                </article>
            })
            .collect::<Html>(),
        _ => html! { <p class="empty">{"Project write-ups are on their way."}</p> },
    };

    html! {
        <div class="projects-page">
            <section class="page-hero">
                <h1>{"Projects"}</h1>
                <p>{"Competition robots, outreach builds and the experiments in between."}</p>
            </section>
            <section class="project-grid">{list}</section>
        </div>
    }
}
