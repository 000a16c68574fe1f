//! Delegated build and upload
//!
//! The resolver only decides; this module carries the decision out by
//! running the configured external commands:
//! - `build`: always, unless the action is skip
//! - `upload`: only for publish, with credentials forwarded explicitly

pub mod context;
pub mod credentials;
pub mod executor;
pub mod pipeline;

pub use context::{StepContext, StepKind};
pub use credentials::Credentials;
pub use executor::StepExecutor;
pub use pipeline::{Pipeline, PipelineReport, StepRecord, VersionChange};
