//! Theme Update Check
//!
//! Asks a remote metadata endpoint whether a newer theme release exists.
//!
//! Components:
//! - `metadata` - Remote metadata document and fetch errors
//! - `version` - Semantic version ordering
//! - `checker` - HTTP check against the metadata endpoint
//! - `transient` - Host update-transient integration

pub mod metadata;
pub mod version;
pub mod checker;
pub mod transient;

pub use checker::UpdateChecker;
pub use metadata::{RemoteMetadata, UpdateError};
pub use transient::{ThemeUpdate, UpdateTransient};
