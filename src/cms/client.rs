use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use gloo_net::http::Request;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::cms::models::{
    BlogPost, EventRecord, Partner, Position, Project, SiteSettings, TeamMember,
};
use crate::config;
use crate::error::SiteError;

const SETTINGS_QUERY: &str = r#"*[_type == "siteSettings"][0]{
  showEventBanner, showEventBadge, bannerDaysThreshold,
  showRecruitingToast, recruitingMessage
}"#;

const EVENTS_QUERY: &str = r#"*[_type == "event"] | order(startDate asc){
  _id, "slug": slug.current, title, startDate, endDate, location,
  registrationUrl, bannerEligible, bannerPriority, summary
}"#;

const TEAM_QUERY: &str = r#"*[_type == "teamMember"] | order(order asc){
  name, role, bio, "imageUrl": image.asset->url
}"#;

const PROJECTS_QUERY: &str = r#"*[_type == "project"] | order(_createdAt desc){
  title, "slug": slug.current, summary, status, "imageUrl": image.asset->url
}"#;

const POSITIONS_QUERY: &str = r#"*[_type == "position" && open == true]{
  title, team, commitment, description, applyUrl
}"#;

const POSTS_QUERY: &str = r#"*[_type == "post" && defined(slug.current)] | order(publishedAt desc){
  title, "slug": slug.current, publishedAt, excerpt, "author": author->name
}"#;

const PARTNERS_QUERY: &str = r#"*[_type == "partner"] | order(tier asc){
  name, website, tier, "logoUrl": logo.asset->url
}"#;

#[derive(Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Read-only client for the hosted content API.
#[derive(Clone)]
pub struct CmsClient {
    endpoint: String,
}

impl CmsClient {
    pub fn new() -> Self {
        Self::with_base(config::get_cms_url())
    }

    pub fn with_base(base: &str) -> Self {
        Self {
            endpoint: format!(
                "{}/{}/data/query/{}",
                base.trim_end_matches('/'),
                config::CMS_API_VERSION,
                config::CMS_DATASET
            ),
        }
    }

    pub fn query_url(&self, query: &str) -> String {
        format!("{}?query={}", self.endpoint, urlencoding::encode(query))
    }

    async fn fetch<T: DeserializeOwned>(&self, query: &str) -> Result<T, SiteError> {
        let url = self.query_url(query);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| SiteError::Fetch {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !response.ok() {
            return Err(SiteError::Status {
                url,
                status: response.status(),
            });
        }

        let text = response.text().await.map_err(|e| SiteError::Fetch {
            url: url.clone(),
            message: e.to_string(),
        })?;
        decode_result(&url, &text)
    }

    pub async fn site_settings(&self) -> Result<SiteSettings, SiteError> {
        let settings: Option<SiteSettings> = self.fetch(SETTINGS_QUERY).await?;
        Ok(settings.unwrap_or_default())
    }

    pub async fn events(&self) -> Result<Vec<EventRecord>, SiteError> {
        self.fetch(EVENTS_QUERY).await
    }

    pub async fn team_members(&self) -> Result<Vec<TeamMember>, SiteError> {
        self.fetch(TEAM_QUERY).await
    }

    pub async fn projects(&self) -> Result<Vec<Project>, SiteError> {
        self.fetch(PROJECTS_QUERY).await
    }

    pub async fn positions(&self) -> Result<Vec<Position>, SiteError> {
        self.fetch(POSITIONS_QUERY).await
    }

    pub async fn blog_posts(&self) -> Result<Vec<BlogPost>, SiteError> {
        self.fetch(POSTS_QUERY).await
    }

    pub async fn partners(&self) -> Result<Vec<Partner>, SiteError> {
        self.fetch(PARTNERS_QUERY).await
    }
}

fn decode_result<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, SiteError> {
    serde_json::from_str::<QueryResponse<T>>(body)
        .map(|envelope| envelope.result)
        .map_err(|e| SiteError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
}

#[derive(Clone, PartialEq)]
pub enum Remote<T> {
    Loading,
    Ready(Rc<T>),
    Failed,
}

impl<T> Remote<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Remote::Ready(value) => Some(value.as_ref()),
            _ => None,
        }
    }
}

/// Loads one CMS document on mount. A failed request is logged and reported
/// as `Failed`; a response that lands after unmount is dropped.
#[hook]
pub fn use_remote<T, F, Fut>(load: F) -> Remote<T>
where
    T: 'static,
    F: FnOnce(CmsClient) -> Fut + 'static,
    Fut: Future<Output = Result<T, SiteError>> + 'static,
{
    let data = use_state(|| Remote::<T>::Loading);
    {
        let data = data.clone();
        use_effect_with_deps(
            move |_| {
                let mounted = Rc::new(Cell::new(true));
                let still_mounted = mounted.clone();
                spawn_local(async move {
                    let result = load(CmsClient::new()).await;
                    if !still_mounted.get() {
                        debug!("Dropping CMS response for unmounted component");
                        return;
                    }
                    match result {
                        Ok(value) => data.set(Remote::Ready(Rc::new(value))),
                        Err(e) => {
                            warn!("CMS request failed: {}", e);
                            data.set(Remote::Failed);
                        }
                    }
                });
                move || mounted.set(false)
            },
            (),
        );
    }
    match &*data {
        Remote::Loading => Remote::Loading,
        Remote::Ready(value) => Remote::Ready(value.clone()),
        Remote::Failed => Remote::Failed,
    }
}

/// CMS content loaded once by the page shell and shared with every route.
#[derive(Clone, PartialEq)]
pub struct SiteContent {
    pub settings: Remote<SiteSettings>,
    pub events: Remote<Vec<EventRecord>>,
}

fn shared_events(content: Option<SiteContent>) -> Remote<Vec<EventRecord>> {
    content.map_or(Remote::Loading, |content| content.events)
}

/// The shell's event list. Outside the shell there is nothing to share, so
/// this reports `Loading`.
#[hook]
pub fn use_site_events() -> Remote<Vec<EventRecord>> {
    shared_events(use_context::<SiteContent>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_url_targets_dataset_and_encodes_query() {
        let client = CmsClient::with_base("https://abc.apicdn.sanity.io/");
        let url = client.query_url(r#"*[_type == "event"]"#);

        assert!(url.starts_with(
            "https://abc.apicdn.sanity.io/v2024-01-01/data/query/production?query="
        ));
        assert!(url.ends_with("%2A%5B_type%20%3D%3D%20%22event%22%5D"));
    }

    #[test]
    fn null_settings_document_decodes_as_none() {
        let settings: Option<SiteSettings> =
            decode_result("test", r#"{"ms": 3, "query": "...", "result": null}"#).unwrap();
        assert!(settings.is_none());
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let result = decode_result::<Vec<EventRecord>>("https://cms/test", "<html>busy</html>");
        match result {
            Err(SiteError::Decode { url, .. }) => assert_eq!(url, "https://cms/test"),
            other => panic!("expected decode error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn event_list_decodes_from_envelope() {
        let events: Vec<EventRecord> = decode_result(
            "test",
            r#"{"result": [
                {"_id": "a", "title": "Kickoff", "startDate": "2025-01-04T15:00:00Z"},
                {"_id": "b", "slug": "demo-day", "title": "Demo Day", "startDate": "2025-06-20T18:00:00Z",
                 "bannerEligible": true, "bannerPriority": 1}
            ]}"#,
        )
        .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[1].detail_key(), "demo-day");
    }

    #[test]
    fn pages_reuse_the_shell_event_list() {
        let events = Rc::new(vec![]);
        let content = SiteContent {
            settings: Remote::Failed,
            events: Remote::Ready(events.clone()),
        };
        match shared_events(Some(content)) {
            Remote::Ready(shared) => assert!(Rc::ptr_eq(&shared, &events)),
            _ => panic!("expected the shell's events"),
        }
        assert!(shared_events(None) == Remote::Loading);
    }
}
