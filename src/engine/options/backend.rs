//! Settings Backend
//!
//! The external collaborator that persists named options. Values are opaque
//! JSON text; the option store owns (de)serialization.

use std::collections::HashMap;

use super::error::{OptionsError, Result};

/// Named-option persistence: get/add/update/delete by name.
pub trait SettingsBackend {
    /// Raw stored value, or `None` if the option does not exist
    fn get(&self, name: &str) -> Result<Option<String>>;

    /// Create the option only if it is absent. Returns `true` if it was added.
    fn add(&mut self, name: &str, value: &str) -> Result<bool>;

    /// Create or overwrite the option
    fn update(&mut self, name: &str, value: &str) -> Result<()>;

    /// Remove the option. Returns `true` if something was deleted.
    fn delete(&mut self, name: &str) -> Result<bool>;

    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.get(name)?.is_some())
    }
}

pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(OptionsError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Process-local backend, used for tests and dry runs
#[derive(Debug, Default, Clone)]
pub struct MemorySettings {
    entries: HashMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsBackend for MemorySettings {
    fn get(&self, name: &str) -> Result<Option<String>> {
        Ok(self.entries.get(name).cloned())
    }

    fn add(&mut self, name: &str, value: &str) -> Result<bool> {
        validate_name(name)?;
        if self.entries.contains_key(name) {
            return Ok(false);
        }
        self.entries.insert(name.to_string(), value.to_string());
        Ok(true)
    }

    fn update(&mut self, name: &str, value: &str) -> Result<()> {
        validate_name(name)?;
        self.entries.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<bool> {
        Ok(self.entries.remove(name).is_some())
    }
}
