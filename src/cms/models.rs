use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::config;

// Projections hand back `null` for fields an editor left empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn threshold_or_default<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(config::DEFAULT_BANNER_DAYS_THRESHOLD))
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub slug: Option<String>,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    pub registration_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub banner_eligible: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub banner_priority: i32,
    pub summary: Option<String>,
}

impl EventRecord {
    /// Path segment used by the event's own page.
    pub fn detail_key(&self) -> &str {
        self.slug.as_deref().unwrap_or(&self.id)
    }

    pub fn detail_path(&self) -> String {
        format!("/events/{}", self.detail_key())
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_date > now
    }
}

/// Operator switches for the optional site features. Missing fields leave the
/// feature off.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    #[serde(deserialize_with = "null_as_default")]
    pub show_event_banner: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub show_event_badge: bool,
    #[serde(deserialize_with = "threshold_or_default")]
    pub banner_days_threshold: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub show_recruiting_toast: bool,
    pub recruiting_message: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            show_event_banner: false,
            show_event_badge: false,
            banner_days_threshold: config::DEFAULT_BANNER_DAYS_THRESHOLD,
            show_recruiting_toast: false,
            recruiting_message: None,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    pub status: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub title: String,
    pub team: Option<String>,
    pub commitment: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub apply_url: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,
    pub slug: String,
    pub published_at: Option<DateTime<Utc>>,
    pub excerpt: Option<String>,
    pub author: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub name: String,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub tier: Option<String>,
}

pub fn format_event_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&config::SITE_TIMEZONE)
        .format("%B %-d, %Y · %-I:%M %p %Z")
        .to_string()
}

pub fn format_post_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&config::SITE_TIMEZONE)
        .format("%B %-d, %Y")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn event_decodes_from_cms_projection() {
        let event: EventRecord = serde_json::from_str(
            r#"{
                "_id": "evt-42",
                "slug": "regional-qualifier",
                "title": "Regional Qualifier",
                "startDate": "2025-04-12T14:00:00Z",
                "location": "Field House",
                "bannerEligible": true,
                "bannerPriority": 3
            }"#,
        )
        .unwrap();

        assert_eq!(event.detail_path(), "/events/regional-qualifier");
        assert_eq!(event.start_date, Utc.with_ymd_and_hms(2025, 4, 12, 14, 0, 0).unwrap());
        assert!(event.end_date.is_none());
        assert_eq!(event.banner_priority, 3);
    }

    #[test]
    fn event_without_slug_routes_by_id() {
        let event: EventRecord = serde_json::from_str(
            r#"{"_id": "evt-7", "title": "Open House", "startDate": "2025-05-01T00:00:00Z",
                "location": null, "bannerEligible": null}"#,
        )
        .unwrap();

        assert_eq!(event.detail_path(), "/events/evt-7");
        assert!(!event.banner_eligible);
        assert_eq!(event.location, "");
    }

    #[test]
    fn partial_settings_fall_back_to_defaults() {
        let settings: SiteSettings = serde_json::from_str(
            r#"{"showEventBanner": true, "showEventBadge": null, "bannerDaysThreshold": null}"#,
        )
        .unwrap();

        assert!(settings.show_event_banner);
        assert!(!settings.show_event_badge);
        assert!(!settings.show_recruiting_toast);
        assert_eq!(settings.banner_days_threshold, 30);
    }

    #[test]
    fn event_dates_render_in_site_timezone() {
        let start = Utc.with_ymd_and_hms(2025, 4, 12, 14, 0, 0).unwrap();
        assert_eq!(format_event_date(start), "April 12, 2025 · 9:00 AM CDT");
        assert_eq!(format_post_date(start), "April 12, 2025");
    }
}
