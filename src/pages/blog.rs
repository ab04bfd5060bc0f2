use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::cms::client::{use_remote, Remote};
use crate::cms::models::format_post_date;
use crate::config;

#[function_component(Blog)]
pub fn blog() -> Html {
    use_title(config::page_title("Blog"));
    let posts = use_remote(|cms| async move { cms.blog_posts().await });

    let list = match &posts {
        Remote::Loading => html! { <p class="loading">{"Loading posts…"}</p> },
        Remote::Ready(posts) if !posts.is_empty() => posts
            .iter()
            .map(|post| html! {
                <div class="blog-post-preview" id={post.slug.clone()}>
                    <h2>{&post.title}</h2>
                    {
                        if let Some(excerpt) = post.excerpt.as_ref() {
                            html! { <p>{excerpt}</p> }
                        } else {
                            html! {}
                        }
                    }
                    <span class="blog-date">
                        { post.published_at.map(format_post_date).unwrap_or_default() }
                        { post.author.as_ref().map(|author| format!(" · {}", author)).unwrap_or_default() }
                    </span>
                </div>
            })
            .collect::<Html>(),
        _ => html! { <p class="empty">{"No posts yet."}</p> },
    };

    html! {
        <div class="blog-list-page">
            <section class="blog-list-hero">
                <h1>{"Blog"}</h1>
                <p>{"Build logs, competition recaps and notes from the shop floor."}</p>
            </section>
            <section class="blog-list-section">{list}</section>
        </div>
    }
}
