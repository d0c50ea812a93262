pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use config::AppConfig;
pub use core::{AggregationPipeline, ConfigProvider};
pub use domain::model::{AggregateResponse, CountryInfo, NewsItem, Profile, RateInfo};
pub use utils::error::{AggregateError, Result};
