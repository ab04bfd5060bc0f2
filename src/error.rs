use thiserror::Error;

/// Failures at the browser and network seams. None of these are fatal to the
/// page; callers log them and hide whatever optional feature depended on them.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("browser API unavailable: {0}")]
    Browser(&'static str),

    #[error("failed to write cookie {name}: {message}")]
    Cookie { name: String, message: String },

    #[error("request to {url} failed: {message}")]
    Fetch { url: String, message: String },

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("analytics unavailable: {0}")]
    Analytics(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SiteError {
    pub(crate) fn from_js(context: &'static str, value: wasm_bindgen::JsValue) -> Self {
        SiteError::Analytics(format!("{}: {:?}", context, value))
    }
}
