// themereg Engine - Core module structure
pub mod config;
pub mod options;
pub mod updater;
pub mod registration;
pub mod logging;
pub mod cli;

pub use config::Config;
pub use options::OptionStore;
pub use registration::Registration;
pub use updater::UpdateChecker;
