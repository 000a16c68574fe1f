pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod github;
pub mod package;
pub mod publish;
pub mod resolver;
pub mod ui;

pub use error::{ReleaseTriggerError, Result};
pub use resolver::{decide, Decision, Resolver};
