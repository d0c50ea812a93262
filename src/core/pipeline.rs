use crate::core::merge;
use crate::domain::model::AggregateResponse;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AggregateError, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Chains the four upstream calls and merges their payloads.
///
/// Steps 1-3 (profile, country, rates) are hard failures: any error aborts
/// the whole request. Step 4 (news) degrades to an empty list instead.
/// Every upstream is called exactly once per run, with no retries.
pub struct AggregationPipeline<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> AggregationPipeline<C> {
    pub fn new(config: C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;
        Ok(Self { config, client })
    }

    /// Runs the full aggregation: profile → country → rates → news → merge.
    pub async fn run(&self) -> Result<AggregateResponse> {
        tracing::info!("=== Step 1: Fetching random user ===");
        let user = self.fetch_profile().await?;

        let country_name = user
            .pointer("/location/country")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                AggregateError::upstream("profile", "user record has no location.country")
            })?;
        tracing::info!("✓ User location: {}", country_name);

        tracing::info!("=== Step 2: Fetching country data for {} ===", country_name);
        let country = self.fetch_country(&country_name).await?;

        if country.get("currencies").and_then(|c| c.as_object()).is_none() {
            tracing::warn!("⚠ No currency data available, using USD as default");
        }
        let currency = merge::currency_code(&country);
        tracing::info!("✓ Currency code: {}", currency);

        tracing::info!("=== Step 3: Fetching exchange rates for {} ===", currency);
        let conversion_rates = self.fetch_rates(&currency).await?;

        tracing::info!("=== Step 4: Fetching news for {} ===", country_name);
        let articles = self.fetch_news(&country_name).await;

        Ok(AggregateResponse {
            user: merge::build_profile(&user),
            country: merge::build_country(&country, &country_name, &currency),
            rates: merge::build_rates(&conversion_rates),
            news: merge::build_news(&articles),
        })
    }

    /// Step 1: first record of the random-user feed.
    pub async fn fetch_profile(&self) -> Result<Value> {
        let url = self.parse_endpoint("profile", self.config.profile_endpoint())?;
        let body = self.get_json("profile", &url).await?;

        body.get("results")
            .and_then(|r| r.as_array())
            .and_then(|arr| arr.first())
            .cloned()
            .ok_or_else(|| {
                AggregateError::upstream_with_body(
                    "profile",
                    "No user data received from Random User API",
                    body,
                    url.as_str(),
                )
            })
    }

    /// Step 2: exact full-text country lookup, first match.
    pub async fn fetch_country(&self, country_name: &str) -> Result<Value> {
        let mut url = self.parse_endpoint("country", self.config.country_endpoint())?;
        url.path_segments_mut()
            .map_err(|_| AggregateError::config("country endpoint cannot take a path"))?
            .push(country_name);
        url.set_query(Some("fullText=true"));

        let body = self.get_json("country", &url).await?;

        body.as_array()
            .and_then(|arr| arr.first())
            .cloned()
            .ok_or_else(|| {
                AggregateError::upstream_with_body(
                    "country",
                    format!("No country data found for {}", country_name),
                    body,
                    url.as_str(),
                )
            })
    }

    /// Step 3: conversion rates for 1 unit of `currency`. Requires the
    /// exchange-rate credential; its absence fails before any call is made.
    pub async fn fetch_rates(&self, currency: &str) -> Result<Value> {
        let key = self
            .config
            .exchange_rate_key()
            .ok_or_else(|| AggregateError::config("EXCHANGE_RATE_KEY is not set"))?;

        let mut url = self.parse_endpoint("rates", self.config.rate_endpoint())?;
        url.path_segments_mut()
            .map_err(|_| AggregateError::config("rate endpoint cannot take a path"))?
            .push(key)
            .push("latest")
            .push(currency);

        let body = self.get_json("rates", &url).await?;

        if body.get("result").and_then(|v| v.as_str()) == Some("error") {
            let error_type = body
                .get("error-type")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string();
            return Err(AggregateError::upstream_with_body(
                "rates",
                format!("Exchange Rate API error: {}", error_type),
                body,
                url.as_str(),
            ));
        }

        Ok(body.get("conversion_rates").cloned().unwrap_or(Value::Null))
    }

    /// Step 4: news articles for the country. Soft-fail: a missing credential
    /// skips the call, and any error yields an empty list with a warning.
    pub async fn fetch_news(&self, country_name: &str) -> Vec<Value> {
        let Some(key) = self.config.news_api_key() else {
            tracing::warn!("⚠ NEWS_API_KEY not set, skipping news");
            return Vec::new();
        };

        match self.try_fetch_news(country_name, key).await {
            Ok(articles) => {
                tracing::info!("✓ News received: {} articles", articles.len());
                articles
            }
            Err(e) => {
                tracing::warn!("⚠ News API failed: {}", e);
                tracing::warn!("⚠ Continuing without news");
                Vec::new()
            }
        }
    }

    async fn try_fetch_news(&self, country_name: &str, key: &str) -> Result<Vec<Value>> {
        let mut url = self.parse_endpoint("news", self.config.news_endpoint())?;
        url.query_pairs_mut()
            .append_pair("q", country_name)
            .append_pair("language", "en")
            .append_pair("pageSize", &merge::MAX_NEWS_ITEMS.to_string())
            .append_pair("apiKey", key);

        let body = self.get_json("news", &url).await?;

        if body.get("status").and_then(|v| v.as_str()) == Some("error") {
            let message = body
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string();
            return Err(AggregateError::upstream_with_body(
                "news",
                format!("News API error: {}", message),
                body,
                url.as_str(),
            ));
        }

        Ok(body
            .get("articles")
            .and_then(|a| a.as_array())
            .cloned()
            .unwrap_or_default())
    }

    fn parse_endpoint(&self, step: &str, endpoint: &str) -> Result<Url> {
        Url::parse(endpoint)
            .map_err(|e| AggregateError::config(format!("invalid {} endpoint: {}", step, e)))
    }

    /// One GET to an upstream; non-2xx responses become upstream errors
    /// carrying whatever body was received.
    async fn get_json(&self, step: &str, url: &Url) -> Result<Value> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("{} API response status: {}", step, status);

        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(AggregateError::upstream_with_body(
                step,
                format!("{} API request failed with status {}", step, status),
                body,
                url.as_str(),
            ));
        }

        Ok(response.json().await?)
    }
}
