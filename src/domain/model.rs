use serde::{Deserialize, Serialize};

/// Normalized view of one random-user record.
///
/// `age` keeps the upstream number when present and the string "N/A"
/// otherwise, so it is carried as a raw JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub gender: String,
    pub photo: String,
    pub age: serde_json::Value,
    pub dob: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    pub name: String,
    pub capital: String,
    /// Comma-joined language names, "N/A" when the country reports none.
    pub languages: String,
    /// Always set; falls back to "USD" when the country has no currency map.
    pub currency: String,
    pub flag: String,
}

/// Conversion rates for 1 unit of [`CountryInfo::currency`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateInfo {
    #[serde(rename = "toUSD")]
    pub to_usd: serde_json::Value,
    #[serde(rename = "toKZT")]
    pub to_kzt: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: String,
}

/// The composite payload handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResponse {
    pub user: Profile,
    pub country: CountryInfo,
    pub rates: RateInfo,
    pub news: Vec<NewsItem>,
}
