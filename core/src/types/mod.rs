//! Data types module - benchmark identities and the persisted result document

mod benchmark;
mod document;

pub use benchmark::{BenchmarkSpec, EndpointRole, Operation, ParseSpecError};
pub use document::{EndpointInfo, EndpointResults, Metadata, ResultDocument};
