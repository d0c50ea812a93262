use crate::domain::ports::ConfigProvider;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "geodash")]
#[command(about = "Aggregates profile, country, exchange-rate and news APIs into one payload")]
pub struct AppConfig {
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Hard-required per request; its absence fails the rates step.
    #[arg(long, env = "EXCHANGE_RATE_KEY")]
    pub exchange_rate_key: Option<String>,

    /// Soft-required; absence disables the news section only.
    #[arg(long, env = "NEWS_API_KEY")]
    pub news_api_key: Option<String>,

    #[arg(long, env = "PROFILE_ENDPOINT", default_value = "https://randomuser.me/api/")]
    pub profile_endpoint: String,

    #[arg(
        long,
        env = "COUNTRY_ENDPOINT",
        default_value = "https://restcountries.com/v3.1/name"
    )]
    pub country_endpoint: String,

    #[arg(
        long,
        env = "RATE_ENDPOINT",
        default_value = "https://v6.exchangerate-api.com/v6"
    )]
    pub rate_endpoint: String,

    #[arg(
        long,
        env = "NEWS_ENDPOINT",
        default_value = "https://newsapi.org/v2/everything"
    )]
    pub news_endpoint: String,

    /// Directory served at / for the front-end bundle.
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    pub static_dir: String,

    /// Per-call timeout for outbound requests.
    #[arg(long, default_value = "10")]
    pub timeout_seconds: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for AppConfig {
    fn profile_endpoint(&self) -> &str {
        &self.profile_endpoint
    }

    fn country_endpoint(&self) -> &str {
        &self.country_endpoint
    }

    fn rate_endpoint(&self) -> &str {
        &self.rate_endpoint
    }

    fn news_endpoint(&self) -> &str {
        &self.news_endpoint
    }

    fn exchange_rate_key(&self) -> Option<&str> {
        self.exchange_rate_key.as_deref()
    }

    fn news_api_key(&self) -> Option<&str> {
        self.news_api_key.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}
