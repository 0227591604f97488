// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod catalog;
pub mod config;
pub mod fetch;
pub mod metrics;
pub mod text;
pub mod util;

// ---- Re-exports for stable public API ----
pub use crate::catalog::Catalog;
pub use crate::config::{Credentials, FetchConfig};
pub use crate::fetch::error::{FailureKind, FetchError, FetchResult, ShapeError};
pub use crate::fetch::types::{
    CredentialPlacement, EndpointDescriptor, Extractor, Fact, FactSource, Params,
};
pub use crate::fetch::{run_all, BoundEndpoint, FetchOptions, Fetcher, Outcome};
