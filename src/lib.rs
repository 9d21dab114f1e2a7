//! themereg - Theme registration shim
//!
//! Remote update checks and option storage for a CMS theme. Remote
//! registration is disabled; see [`engine::registration`].

pub mod engine;

pub use engine::config::Config;
pub use engine::options::{OptionStore, OptionValue, SettingsBackend};
pub use engine::registration::{Registration, RegistrationError};
pub use engine::updater::{RemoteMetadata, UpdateChecker, UpdateTransient};
