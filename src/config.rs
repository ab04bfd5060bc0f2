use chrono_tz::Tz;

#[cfg(debug_assertions)]
pub fn get_cms_url() -> &'static str {
    "https://kz3h1qya.api.sanity.io"  // Uncached API so editors see drafts land quickly
}

#[cfg(not(debug_assertions))]
pub fn get_cms_url() -> &'static str {
    "https://kz3h1qya.apicdn.sanity.io"
}

pub const CMS_DATASET: &str = "production";
pub const CMS_API_VERSION: &str = "v2024-01-01";

pub const ANALYTICS_MEASUREMENT_ID: &str = "G-7QK2R4M1XZ";

pub const CONSENT_COOKIE_NAME: &str = "cookie_consent";
pub const CONSENT_MAX_AGE_SECS: i64 = 365 * 24 * 60 * 60;

pub const RECRUITING_TOAST_DELAY_MS: u32 = 3_000;
pub const DEFAULT_BANNER_DAYS_THRESHOLD: i64 = 30;
pub const COUNTDOWN_TICK_MS: u32 = 1_000;

// Events are announced in the team's local time
pub const SITE_TIMEZONE: Tz = chrono_tz::America::Chicago;

pub const SITE_NAME: &str = "Gearhouse Robotics";
pub const CONTACT_EMAIL: &str = "hello@gearhouserobotics.org";

pub fn page_title(page: &str) -> String {
    format!("{} · {}", page, SITE_NAME)
}
