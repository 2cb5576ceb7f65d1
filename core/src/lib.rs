//! Investment dashboard aggregation core.
//!
//! Loads a CSV of per-user investment rows, classifies active users,
//! applies sidebar filters and produces the KPIs, category
//! distributions and monthly series a dashboard view renders.
//!
//! Entry point: [`pipeline::AggregationPipeline`].

pub mod config;
pub mod distribution;
pub mod error;
pub mod filter;
pub mod kpi;
pub mod loader;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod rng;
pub mod sample_data;
pub mod schema;
pub mod series;
pub mod types;
pub mod view;

pub use error::{PipelineError, PipelineResult};
pub use filter::FilterSet;
pub use pipeline::AggregationPipeline;
pub use record::InvestmentRecord;
