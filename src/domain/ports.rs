/// Runtime configuration consumed by the aggregation pipeline.
///
/// Endpoints are overridable so tests can point each upstream at a mock
/// server. Credentials are `Option` because the news key is allowed to be
/// absent (the feature degrades) while the rate key is checked per request.
pub trait ConfigProvider: Send + Sync {
    fn profile_endpoint(&self) -> &str;
    fn country_endpoint(&self) -> &str;
    fn rate_endpoint(&self) -> &str;
    fn news_endpoint(&self) -> &str;
    fn exchange_rate_key(&self) -> Option<&str>;
    fn news_api_key(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
}
