pub mod merge;
pub mod pipeline;

pub use crate::domain::model::AggregateResponse;
pub use crate::domain::ports::ConfigProvider;
pub use crate::utils::error::Result;
pub use pipeline::AggregationPipeline;
