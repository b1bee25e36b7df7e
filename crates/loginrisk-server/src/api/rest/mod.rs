//! REST API implementation
//!
//! - types: request/response types and shared state
//! - extractors: JSON extractor with readable rejections
//! - handlers: endpoint handlers
//! - router: router creation and layers

mod extractors;
mod handlers;
mod router;
pub mod types;

pub use extractors::JsonExtractor;
pub use handlers::generate_request_id;
pub use router::create_router;
pub use types::{AppState, HealthResponse, HistogramSummary, MetricsResponse};
