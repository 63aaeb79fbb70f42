//! Signal acquisition for TruthCart.
//!
//! The engine consumes already-fetched community items; this crate is the
//! collaborator that fetches them. One HTTP implementation posts the product
//! query to a configured aggregation endpoint, one static implementation
//! serves a fixed batch for offline runs and tests, and `Disabled` stands in
//! when no endpoint is configured.

pub mod error;
pub mod http;
pub mod source;
pub mod types;

pub use error::SourceError;
pub use http::HttpSignalSource;
pub use source::{SignalSource, StaticSignalSource};
pub use types::{SourceBatch, SourceQuery};
