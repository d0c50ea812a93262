//! Pure extraction from raw upstream JSON into the response model.
//!
//! Every function here is deterministic: the same upstream payloads always
//! produce the same model values. All network handling lives in the pipeline.

use crate::domain::model::{CountryInfo, NewsItem, Profile, RateInfo};
use serde_json::Value;

const NOT_AVAILABLE: &str = "N/A";
pub const MAX_NEWS_ITEMS: usize = 5;

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Renders a string or number field as text, empty when absent.
fn text_or_empty(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Formats an RFC 3339 date-of-birth as a short locale-style date, "N/A"
/// when missing or unparseable.
fn format_dob(dob: Option<&Value>) -> String {
    dob.and_then(|v| v.as_str())
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn build_profile(user: &Value) -> Profile {
    let name = user.get("name");
    let first = name.map(|n| str_field(n, "first")).unwrap_or_default();
    let last = name.map(|n| str_field(n, "last")).unwrap_or_default();

    // Prefer the large picture, fall back to medium.
    let picture = user.get("picture");
    let photo = picture
        .and_then(|p| p.get("large"))
        .or_else(|| picture.and_then(|p| p.get("medium")))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    let dob = user.get("dob");
    let age = dob
        .and_then(|d| d.get("age"))
        .cloned()
        .unwrap_or_else(|| Value::String(NOT_AVAILABLE.to_string()));

    let location = user.get("location");
    let street = location.and_then(|l| l.get("street"));
    let address = format!(
        "{} {}, {}, {}",
        text_or_empty(street.and_then(|s| s.get("number"))),
        text_or_empty(street.and_then(|s| s.get("name"))),
        text_or_empty(location.and_then(|l| l.get("city"))),
        text_or_empty(location.and_then(|l| l.get("country"))),
    );

    Profile {
        name: format!("{} {}", first, last),
        gender: str_field(user, "gender"),
        photo,
        age,
        dob: format_dob(dob.and_then(|d| d.get("date"))),
        address,
    }
}

/// First key of the country's currency map, or "USD" when the country
/// reports no currencies at all.
pub fn currency_code(country: &Value) -> String {
    country
        .get("currencies")
        .and_then(|c| c.as_object())
        .and_then(|map| map.keys().next().cloned())
        .unwrap_or_else(|| "USD".to_string())
}

pub fn build_country(country: &Value, fallback_name: &str, currency: &str) -> CountryInfo {
    let name = country
        .get("name")
        .and_then(|n| n.get("common"))
        .and_then(|v| v.as_str())
        .unwrap_or(fallback_name)
        .to_string();

    let capital = country
        .get("capital")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|v| v.as_str())
        .unwrap_or(NOT_AVAILABLE)
        .to_string();

    let languages = country
        .get("languages")
        .and_then(|l| l.as_object())
        .map(|map| {
            map.values()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    // Prefer the vector flag, fall back to raster.
    let flags = country.get("flags");
    let flag = flags
        .and_then(|f| f.get("svg"))
        .or_else(|| flags.and_then(|f| f.get("png")))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    CountryInfo {
        name,
        capital,
        languages,
        currency: currency.to_string(),
        flag,
    }
}

pub fn build_rates(conversion_rates: &Value) -> RateInfo {
    let rate = |target: &str| {
        conversion_rates
            .get(target)
            .cloned()
            .unwrap_or_else(|| Value::String(NOT_AVAILABLE.to_string()))
    };

    RateInfo {
        to_usd: rate("USD"),
        to_kzt: rate("KZT"),
    }
}

pub fn build_news(articles: &[Value]) -> Vec<NewsItem> {
    articles
        .iter()
        .take(MAX_NEWS_ITEMS)
        .map(|art| NewsItem {
            title: art
                .get("title")
                .and_then(|v| v.as_str())
                .unwrap_or("No title")
                .to_string(),
            description: art
                .get("description")
                .and_then(|v| v.as_str())
                .unwrap_or("No description available")
                .to_string(),
            url: art
                .get("url")
                .and_then(|v| v.as_str())
                .unwrap_or("#")
                .to_string(),
            image: str_field(art, "urlToImage"),
        })
        .collect()
}
