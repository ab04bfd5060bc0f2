use wasm_bindgen::JsCast;
use web_sys::{window, HtmlDocument};

use crate::config;
use crate::consent::store::ConsentPersistence;
use crate::error::SiteError;

/// Stores the consent record in a first-party cookie.
pub struct CookieJar {
    name: &'static str,
    max_age_secs: i64,
}

impl CookieJar {
    pub fn consent() -> Self {
        Self {
            name: config::CONSENT_COOKIE_NAME,
            max_age_secs: config::CONSENT_MAX_AGE_SECS,
        }
    }

    fn document() -> Result<HtmlDocument, SiteError> {
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
            .ok_or(SiteError::Browser("document"))
    }
}

/// Finds one cookie in a `document.cookie` string and decodes its value.
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
}

pub fn format_cookie(name: &str, value: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; max-age={}; path=/; SameSite=Lax",
        name,
        urlencoding::encode(value),
        max_age_secs
    )
}

impl ConsentPersistence for CookieJar {
    fn read(&self) -> Option<String> {
        let header = Self::document().ok()?.cookie().ok()?;
        find_cookie(&header, self.name)
    }

    fn write(&self, record: &str) -> Result<(), SiteError> {
        Self::document()?
            .set_cookie(&format_cookie(self.name, record, self.max_age_secs))
            .map_err(|e| SiteError::Cookie {
                name: self.name.to_string(),
                message: format!("{:?}", e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_named_cookie_among_others() {
        let header = "theme=dark; cookie_consent=%7B%22analytics%22%3A%22granted%22%7D; _ga=GA1.1";
        assert_eq!(
            find_cookie(header, "cookie_consent").as_deref(),
            Some("{\"analytics\":\"granted\"}")
        );
        assert_eq!(find_cookie(header, "theme").as_deref(), Some("dark"));
        assert_eq!(find_cookie(header, "missing"), None);
        assert_eq!(find_cookie("", "cookie_consent"), None);
    }

    #[test]
    fn does_not_match_on_name_prefix() {
        let header = "cookie_consent_v0=old";
        assert_eq!(find_cookie(header, "cookie_consent"), None);
    }

    #[test]
    fn formatted_cookie_round_trips_through_lookup() {
        let record = r#"{"necessary":"granted","analytics":"denied","marketing":"denied"}"#;
        let cookie = format_cookie("cookie_consent", record, 31_536_000);

        assert!(cookie.contains("max-age=31536000"));
        assert!(cookie.contains("path=/"));
        let pair = cookie.split(';').next().unwrap();
        assert_eq!(find_cookie(pair, "cookie_consent").as_deref(), Some(record));
    }
}
