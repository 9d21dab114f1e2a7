//! Option Storage
//!
//! A named option blob layered over an injected settings backend.
//!
//! Components:
//! - `value` - Closed option value type
//! - `backend` - Settings backend trait and in-memory backend
//! - `sqlite` - SQLite-backed settings table
//! - `store` - Option blob accessor (get/set/delete, errors, notice flag)

pub mod error;
pub mod value;
pub mod backend;
pub mod sqlite;
pub mod store;

pub use backend::{MemorySettings, SettingsBackend};
pub use error::{OptionsError, Result};
pub use sqlite::SqliteSettings;
pub use store::{NoticeVisibility, OptionMap, OptionStore};
pub use value::OptionValue;
