//! Core types for the chartship CI resource
//!
//! The request/response protocol model, version resolution and range
//! gating, the chart API dialect strategy, and parsers for external tool
//! output. Everything here is pure relative to its inputs; network and
//! subprocess concerns live in the sibling crates.

pub mod chart;
pub mod dialect;
pub mod error;
pub mod request;
pub mod response;
pub mod toolout;
pub mod version;

pub use chart::ChartDefinition;
pub use dialect::ApiDialect;
pub use error::{CoreError, Result};
pub use request::{
    CheckRequest, DependencyRepo, InRequest, OutRequest, PutParams, ResourceVersion, Source,
};
pub use response::{MetadataEntry, OperationResponse};
