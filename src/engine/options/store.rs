//! Option Store
//!
//! Accessor for one named option blob (a JSON object of [`OptionValue`]s)
//! persisted through a [`SettingsBackend`]. Every keyed write is a
//! read-modify-write of the whole blob; callers are single-writer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::backend::SettingsBackend;
use super::error::{OptionsError, Result};
use super::value::{is_truthy_str, OptionValue};

pub type OptionMap = BTreeMap<String, OptionValue>;

/// Blob key holding registration error messages
pub const ERRORS_KEY: &str = "errors";
/// Blob key holding the derived notice flag
pub const SHOW_NOTICE_KEY: &str = "show_notice";

/// Whether the registration warning banner should render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVisibility {
    Hidden,
    Shown,
}

pub struct OptionStore {
    backend: Box<dyn SettingsBackend>,
    option_name: String,
}

impl OptionStore {
    pub fn new(backend: Box<dyn SettingsBackend>, option_name: impl Into<String>) -> Self {
        Self {
            backend,
            option_name: option_name.into(),
        }
    }

    /// Name of the record the blob is stored under
    pub fn option_name(&self) -> &str {
        &self.option_name
    }

    // ========== Whole Blob ==========

    /// The persisted blob, or an empty map if it was never written
    pub fn get_all(&self) -> Result<OptionMap> {
        let Some(raw) = self.backend.get(&self.option_name)? else {
            return Ok(OptionMap::new());
        };

        let value: serde_json::Value = serde_json::from_str(&raw)?;
        if !value.is_object() {
            return Err(OptionsError::NotABlob {
                name: self.option_name.clone(),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn set_all(&mut self, data: &OptionMap) -> Result<()> {
        let raw = serde_json::to_string(data)?;
        self.backend.update(&self.option_name, &raw)
    }

    pub fn delete_all(&mut self) -> Result<()> {
        self.backend.delete(&self.option_name)?;
        Ok(())
    }

    // ========== Single Keys ==========

    pub fn get(&self, key: &str, default: OptionValue) -> Result<OptionValue> {
        Ok(self.get_all()?.remove(key).unwrap_or(default))
    }

    pub fn get_opt(&self, key: &str) -> Result<Option<OptionValue>> {
        Ok(self.get_all()?.remove(key))
    }

    pub fn set(&mut self, key: &str, value: impl Into<OptionValue>) -> Result<()> {
        let mut options = self.get_all()?;
        options.insert(key.to_string(), value.into());
        self.set_all(&options)
    }

    /// Remove `key` from the blob. The blob is written back even if the key
    /// was absent.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        let mut options = self.get_all()?;
        options.remove(key);
        self.set_all(&options)
    }

    // ========== Registration Errors ==========

    /// Store the non-empty messages and raise the notice flag if any remain
    pub fn set_errors<I, S>(&mut self, errors: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let errors: Vec<String> = errors
            .into_iter()
            .map(Into::into)
            .filter(|e| is_truthy_str(e))
            .collect();
        let show_notice = !errors.is_empty();

        let mut options = self.get_all()?;
        options.insert(ERRORS_KEY.to_string(), OptionValue::List(errors));
        options.insert(SHOW_NOTICE_KEY.to_string(), OptionValue::Bool(show_notice));
        self.set_all(&options)
    }

    pub fn get_errors(&self) -> Result<Vec<String>> {
        let errors = match self.get(ERRORS_KEY, OptionValue::List(Vec::new()))? {
            OptionValue::List(items) => items.into_iter().filter(|e| is_truthy_str(e)).collect(),
            OptionValue::String(s) if is_truthy_str(&s) => vec![s],
            _ => Vec::new(),
        };
        Ok(errors)
    }

    pub fn dismiss_notice(&mut self) -> Result<()> {
        self.delete(SHOW_NOTICE_KEY)
    }

    pub fn notice(&self) -> Result<NoticeVisibility> {
        let shown = self
            .get_opt(SHOW_NOTICE_KEY)?
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        Ok(if shown {
            NoticeVisibility::Shown
        } else {
            NoticeVisibility::Hidden
        })
    }

    // ========== Standalone Options ==========
    // Flat named options that live beside the blob in the same backend.

    pub fn standalone(&self, name: &str) -> Result<Option<OptionValue>> {
        match self.backend.get(name)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Create a standalone option unless it already exists
    pub fn add_standalone(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<bool> {
        let raw = serde_json::to_string(&value.into())?;
        self.backend.add(name, &raw)
    }

    pub fn delete_standalone(&mut self, name: &str) -> Result<bool> {
        self.backend.delete(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::options::backend::MemorySettings;

    fn store() -> OptionStore {
        OptionStore::new(Box::new(MemorySettings::new()), "flatsome_registration")
    }

    #[test]
    fn test_get_all_defaults_to_empty() {
        let store = store();
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_set_then_get_ignores_default() {
        let mut store = store();
        store.set("code", "abc").unwrap();

        assert_eq!(
            store.get("code", OptionValue::from("fallback")).unwrap(),
            OptionValue::from("abc")
        );
        assert_eq!(
            store.get("code", OptionValue::Bool(false)).unwrap(),
            OptionValue::from("abc")
        );
    }

    #[test]
    fn test_delete_then_get_returns_default() {
        let mut store = store();
        store.set("code", "abc").unwrap();
        store.delete("code").unwrap();

        assert_eq!(
            store.get("code", OptionValue::Int(7)).unwrap(),
            OptionValue::Int(7)
        );
    }

    #[test]
    fn test_delete_missing_key_writes_blob() {
        let mut store = store();
        store.delete("nope").unwrap();
        assert!(store.backend.exists("flatsome_registration").unwrap());
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_set_all_and_delete_all() {
        let mut store = store();
        let mut data = OptionMap::new();
        data.insert("a".into(), OptionValue::Int(1));
        data.insert("b".into(), OptionValue::Bool(true));
        store.set_all(&data).unwrap();
        assert_eq!(store.get_all().unwrap(), data);

        store.delete_all().unwrap();
        assert!(!store.backend.exists("flatsome_registration").unwrap());
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_errors_are_filtered() {
        let mut store = store();
        store.set_errors(["e1", "", "e2"]).unwrap();
        assert_eq!(store.get_errors().unwrap(), vec!["e1", "e2"]);

        store.set_errors(Vec::<String>::new()).unwrap();
        assert!(store.get_errors().unwrap().is_empty());
    }

    #[test]
    fn test_get_errors_filters_stored_list() {
        let mut store = store();
        store
            .set(ERRORS_KEY, vec!["".to_string(), "0".to_string(), "bad code".to_string()])
            .unwrap();
        assert_eq!(store.get_errors().unwrap(), vec!["bad code"]);
    }

    #[test]
    fn test_notice_state_machine() {
        let mut store = store();
        assert_eq!(store.notice().unwrap(), NoticeVisibility::Hidden);

        store.set_errors(["e1"]).unwrap();
        assert_eq!(store.notice().unwrap(), NoticeVisibility::Shown);
        assert_eq!(
            store.get_opt(SHOW_NOTICE_KEY).unwrap(),
            Some(OptionValue::Bool(true))
        );

        store.dismiss_notice().unwrap();
        assert_eq!(store.get_opt(SHOW_NOTICE_KEY).unwrap(), None);
        assert_eq!(store.notice().unwrap(), NoticeVisibility::Hidden);

        store.set_errors(["e2"]).unwrap();
        store.set_errors(Vec::<String>::new()).unwrap();
        assert_eq!(store.notice().unwrap(), NoticeVisibility::Hidden);
    }

    #[test]
    fn test_non_object_blob_is_an_error() {
        let mut backend = MemorySettings::new();
        backend.update("flatsome_registration", "[1, 2]").unwrap();
        let store = OptionStore::new(Box::new(backend), "flatsome_registration");

        assert!(matches!(store.get_all(), Err(OptionsError::NotABlob { .. })));
    }

    #[test]
    fn test_standalone_options() {
        let mut store = store();
        assert!(store.add_standalone("flatsome_wup_sold_at", 1_700_000_000i64).unwrap());
        assert!(!store.add_standalone("flatsome_wup_sold_at", 1i64).unwrap());
        assert_eq!(
            store.standalone("flatsome_wup_sold_at").unwrap(),
            Some(OptionValue::Int(1_700_000_000))
        );

        assert!(store.delete_standalone("flatsome_wup_sold_at").unwrap());
        assert_eq!(store.standalone("flatsome_wup_sold_at").unwrap(), None);
    }
}
