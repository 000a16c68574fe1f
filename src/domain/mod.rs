//! Domain logic - pure trigger rules independent of git, config files and processes

pub mod action;
pub mod branch;
pub mod event;
pub mod paths;
pub mod version;

pub use action::Action;
pub use branch::BranchContext;
pub use event::{ChangedPaths, Event, IncomingEvent, RevisionRange};
pub use paths::{PathFilter, DEFAULT_PATHS_IGNORE};
pub use version::{bump_version, VersionPart};
