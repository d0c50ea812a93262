use clap::Parser;
use geodash::{AggregateError, AggregationPipeline, AppConfig};
use httpmock::prelude::*;
use serde_json::json;

fn test_config(base: &str) -> AppConfig {
    AppConfig::try_parse_from([
        "geodash",
        "--profile-endpoint",
        &format!("{}/profile", base),
        "--country-endpoint",
        &format!("{}/country", base),
        "--rate-endpoint",
        &format!("{}/rate", base),
        "--news-endpoint",
        &format!("{}/news", base),
        "--exchange-rate-key",
        "RATE_KEY",
        "--news-api-key",
        "NEWS_KEY",
    ])
    .unwrap()
}

fn mock_profile<'a>(server: &'a MockServer, country: &str) -> httpmock::Mock<'a> {
    let body = json!({
        "results": [{
            "name": {"first": "Test", "last": "User"},
            "gender": "female",
            "picture": {"large": "https://example.com/photo.jpg"},
            "dob": {"date": "1990-01-15T00:00:00.000Z", "age": 35},
            "location": {
                "street": {"number": 12, "name": "Main Street"},
                "city": "Testville",
                "country": country
            }
        }]
    });
    server.mock(move |when, then| {
        when.method(GET).path("/profile");
        then.status(200).json_body(body.clone());
    })
}

#[tokio::test]
async fn test_end_to_end_testland_scenario() {
    let server = MockServer::start();
    mock_profile(&server, "Testland");

    server.mock(|when, then| {
        when.method(GET)
            .path("/country/Testland")
            .query_param("fullText", "true");
        then.status(200).json_body(json!([{
            "name": {"common": "Testland"},
            "capital": ["Test City"],
            "currencies": {"TST": {}},
            "languages": {"eng": "Testish"},
            "flags": {"svg": "https://example.com/flag.svg"}
        }]));
    });

    server.mock(|when, then| {
        when.method(GET).path("/rate/RATE_KEY/latest/TST");
        then.status(200).json_body(json!({
            "result": "success",
            "conversion_rates": {"USD": 2.5, "KZT": 100}
        }));
    });

    let articles: Vec<serde_json::Value> = (1..=7)
        .map(|i| json!({"title": format!("Headline {}", i), "url": "https://example.com/a"}))
        .collect();
    server.mock(move |when, then| {
        when.method(GET)
            .path("/news")
            .query_param("q", "Testland")
            .query_param("language", "en")
            .query_param("pageSize", "5")
            .query_param("apiKey", "NEWS_KEY");
        then.status(200)
            .json_body(json!({"status": "ok", "articles": articles}));
    });

    let pipeline = AggregationPipeline::new(test_config(&server.base_url())).unwrap();
    let data = pipeline.run().await.unwrap();

    assert_eq!(data.user.name, "Test User");
    assert_eq!(data.user.age, json!(35));
    assert_eq!(data.user.address, "12 Main Street, Testville, Testland");
    assert_eq!(data.country.name, "Testland");
    assert_eq!(data.country.capital, "Test City");
    assert_eq!(data.country.languages, "Testish");
    assert_eq!(data.country.currency, "TST");
    assert_eq!(data.rates.to_usd, json!(2.5));
    assert_eq!(data.rates.to_kzt, json!(100));
    assert_eq!(data.news.len(), 5);
    assert_eq!(data.news[0].title, "Headline 1");
    assert_eq!(data.news[4].title, "Headline 5");
}

#[tokio::test]
async fn test_empty_profile_aborts_before_other_calls() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/profile");
        then.status(200).json_body(json!({"results": []}));
    });
    let country_mock = server.mock(|when, then| {
        when.method(GET).path_contains("/country");
        then.status(200).json_body(json!([]));
    });
    let rate_mock = server.mock(|when, then| {
        when.method(GET).path_contains("/rate");
        then.status(200).json_body(json!({}));
    });
    let news_mock = server.mock(|when, then| {
        when.method(GET).path_contains("/news");
        then.status(200).json_body(json!({}));
    });

    let pipeline = AggregationPipeline::new(test_config(&server.base_url())).unwrap();
    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err, AggregateError::UpstreamError { .. }));
    country_mock.assert_hits(0);
    rate_mock.assert_hits(0);
    news_mock.assert_hits(0);
}

#[tokio::test]
async fn test_missing_currency_map_falls_back_to_usd() {
    let server = MockServer::start();
    mock_profile(&server, "Testland");

    server.mock(|when, then| {
        when.method(GET).path("/country/Testland");
        then.status(200).json_body(json!([{
            "name": {"common": "Testland"},
            "capital": ["Test City"]
        }]));
    });

    let rate_mock = server.mock(|when, then| {
        when.method(GET).path("/rate/RATE_KEY/latest/USD");
        then.status(200).json_body(json!({
            "result": "success",
            "conversion_rates": {"USD": 1.0, "KZT": 450.0}
        }));
    });

    server.mock(|when, then| {
        when.method(GET).path("/news");
        then.status(200).json_body(json!({"status": "ok", "articles": []}));
    });

    let pipeline = AggregationPipeline::new(test_config(&server.base_url())).unwrap();
    let data = pipeline.run().await.unwrap();

    rate_mock.assert();
    assert_eq!(data.country.currency, "USD");
}

#[tokio::test]
async fn test_missing_news_key_yields_empty_news() {
    let server = MockServer::start();
    mock_profile(&server, "Testland");

    server.mock(|when, then| {
        when.method(GET).path("/country/Testland");
        then.status(200).json_body(json!([{
            "name": {"common": "Testland"},
            "currencies": {"TST": {}}
        }]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/rate/RATE_KEY/latest/TST");
        then.status(200)
            .json_body(json!({"result": "success", "conversion_rates": {"USD": 2.0}}));
    });
    let news_mock = server.mock(|when, then| {
        when.method(GET).path("/news");
        then.status(200).json_body(json!({"status": "ok"}));
    });

    let mut config = test_config(&server.base_url());
    config.news_api_key = None;
    let pipeline = AggregationPipeline::new(config).unwrap();
    let data = pipeline.run().await.unwrap();

    news_mock.assert_hits(0);
    assert!(data.news.is_empty());
    assert_eq!(data.rates.to_usd, json!(2.0));
    assert_eq!(data.rates.to_kzt, json!("N/A"));
}

#[tokio::test]
async fn test_news_connection_error_still_succeeds() {
    let server = MockServer::start();
    mock_profile(&server, "Testland");

    server.mock(|when, then| {
        when.method(GET).path("/country/Testland");
        then.status(200).json_body(json!([{
            "name": {"common": "Testland"},
            "currencies": {"TST": {}}
        }]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/rate/RATE_KEY/latest/TST");
        then.status(200)
            .json_body(json!({"result": "success", "conversion_rates": {"USD": 2.0, "KZT": 5.0}}));
    });

    // News endpoint points at a port nothing listens on.
    let mut config = test_config(&server.base_url());
    config.news_endpoint = "http://127.0.0.1:9/news".to_string();
    let pipeline = AggregationPipeline::new(config).unwrap();

    let data = pipeline.run().await.unwrap();
    assert!(data.news.is_empty());
    assert_eq!(data.country.currency, "TST");
}

#[tokio::test]
async fn test_rate_provider_error_aborts_run() {
    let server = MockServer::start();
    mock_profile(&server, "Testland");

    server.mock(|when, then| {
        when.method(GET).path("/country/Testland");
        then.status(200).json_body(json!([{
            "name": {"common": "Testland"},
            "currencies": {"TST": {}}
        }]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/rate/RATE_KEY/latest/TST");
        then.status(200)
            .json_body(json!({"result": "error", "error-type": "unsupported-code"}));
    });
    let news_mock = server.mock(|when, then| {
        when.method(GET).path("/news");
        then.status(200).json_body(json!({"status": "ok", "articles": []}));
    });

    let pipeline = AggregationPipeline::new(test_config(&server.base_url())).unwrap();
    let err = pipeline.run().await.unwrap_err();

    assert!(err.to_string().contains("unsupported-code"));
    news_mock.assert_hits(0);
}

#[tokio::test]
async fn test_merge_is_deterministic_for_fixed_upstreams() {
    let server = MockServer::start();
    mock_profile(&server, "Testland");

    server.mock(|when, then| {
        when.method(GET).path("/country/Testland");
        then.status(200).json_body(json!([{
            "name": {"common": "Testland"},
            "capital": ["Test City"],
            "currencies": {"TST": {}},
            "languages": {"eng": "Testish"}
        }]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/rate/RATE_KEY/latest/TST");
        then.status(200)
            .json_body(json!({"result": "success", "conversion_rates": {"USD": 2.5, "KZT": 100}}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/news");
        then.status(200).json_body(json!({
            "status": "ok",
            "articles": [{"title": "Same headline"}]
        }));
    });

    let pipeline = AggregationPipeline::new(test_config(&server.base_url())).unwrap();
    let first = pipeline.run().await.unwrap();
    let second = pipeline.run().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}
