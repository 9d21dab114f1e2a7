//! Theme Registration
//!
//! Ties the option store and the update checker together behind the
//! lifecycle calls the host invokes: `on_activate` once the theme is set up
//! and `check_for_update` whenever the host refreshes its update transient.
//! Remote registration itself is disabled; those calls always fail with
//! [`RegistrationError::NotAllowed`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use super::config::{ActivationDefaults, Config};
use super::options::{self, NoticeVisibility, OptionStore, OptionValue, SqliteSettings};
use super::updater::{UpdateChecker, UpdateTransient};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Not allowed.")]
    NotAllowed,
}

impl RegistrationError {
    /// Status code reported alongside the message
    pub fn code(&self) -> u16 {
        match self {
            Self::NotAllowed => 500,
        }
    }
}

/// Standalone options defaulted on activation, named `{slug}_{suffix}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationFlag {
    PurchaseCode,
    SupportedUntil,
    Buyer,
    SoldAt,
}

impl ActivationFlag {
    pub const ALL: [ActivationFlag; 4] = [
        Self::PurchaseCode,
        Self::SupportedUntil,
        Self::Buyer,
        Self::SoldAt,
    ];

    fn suffix(&self) -> &'static str {
        match self {
            Self::PurchaseCode => "wup_purchase_code",
            Self::SupportedUntil => "wup_supported_until",
            Self::Buyer => "wup_buyer",
            Self::SoldAt => "wup_sold_at",
        }
    }

    pub fn option_name(&self, slug: &str) -> String {
        format!("{}_{}", slug, self.suffix())
    }
}

/// Options left behind by older releases, removed on activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyOption {
    Errors,
    Updates,
}

impl LegacyOption {
    pub const ALL: [LegacyOption; 2] = [Self::Errors, Self::Updates];

    fn suffix(&self) -> &'static str {
        match self {
            Self::Errors => "wup_errors",
            Self::Updates => "wupdates",
        }
    }

    pub fn option_name(&self, slug: &str) -> String {
        format!("{}_{}", slug, self.suffix())
    }
}

/// What an activation pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivationReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

pub struct Registration {
    options: OptionStore,
    updater: UpdateChecker,
    defaults: ActivationDefaults,
}

impl Registration {
    pub fn new(options: OptionStore, updater: UpdateChecker, defaults: ActivationDefaults) -> Self {
        Self {
            options,
            updater,
            defaults,
        }
    }

    /// Open the SQLite settings store and HTTP checker described by `config`
    pub fn from_config(config: &Config, project_dir: &Path) -> options::Result<Self> {
        let settings = SqliteSettings::new(&config.storage_path(project_dir))?;
        let options = OptionStore::new(Box::new(settings), config.theme.option_name());
        let updater = UpdateChecker::new(
            &config.updates.endpoint,
            &config.theme.slug,
            &config.updates.user_agent,
        );
        Ok(Self::new(options, updater, config.activation.clone()))
    }

    pub fn theme_slug(&self) -> &str {
        self.updater.theme_slug()
    }

    pub fn options(&self) -> &OptionStore {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut OptionStore {
        &mut self.options
    }

    pub fn updater(&self) -> &UpdateChecker {
        &self.updater
    }

    // ========== Lifecycle ==========

    /// Default the standalone flags (never overwriting existing values) and
    /// drop legacy options.
    pub fn on_activate(&mut self) -> options::Result<ActivationReport> {
        let slug = self.theme_slug().to_string();
        let mut report = ActivationReport::default();

        for flag in ActivationFlag::ALL {
            let name = flag.option_name(&slug);
            let value = self.default_value(flag);
            if self.options.add_standalone(&name, value)? {
                info!(option = %name, "defaulted on activation");
                report.added.push(name);
            }
        }

        for legacy in LegacyOption::ALL {
            let name = legacy.option_name(&slug);
            if self.options.delete_standalone(&name)? {
                info!(option = %name, "removed legacy option");
                report.removed.push(name);
            }
        }

        Ok(report)
    }

    fn default_value(&self, flag: ActivationFlag) -> OptionValue {
        match flag {
            ActivationFlag::PurchaseCode => OptionValue::from(self.defaults.purchase_code.clone()),
            ActivationFlag::SupportedUntil => {
                OptionValue::from(self.defaults.supported_until.clone())
            }
            ActivationFlag::Buyer => OptionValue::from(self.defaults.buyer.clone()),
            ActivationFlag::SoldAt => OptionValue::Int(chrono::Utc::now().timestamp()),
        }
    }

    /// Fill in this theme's entry of the host update transient
    pub fn check_for_update(&self, transient: UpdateTransient) -> UpdateTransient {
        self.updater.update_transient(transient)
    }

    // ========== Remote Registration (disabled) ==========

    pub fn register(&self, _code: &str) -> Result<(), RegistrationError> {
        warn!("register called; remote registration is disabled");
        Err(RegistrationError::NotAllowed)
    }

    pub fn unregister(&self) -> Result<(), RegistrationError> {
        warn!("unregister called; remote registration is disabled");
        Err(RegistrationError::NotAllowed)
    }

    pub fn get_latest_version(&self) -> Result<String, RegistrationError> {
        Err(RegistrationError::NotAllowed)
    }

    pub fn get_download_url(&self, _version: &str) -> Result<String, RegistrationError> {
        Err(RegistrationError::NotAllowed)
    }

    pub fn is_registered(&self) -> bool {
        false
    }

    pub fn is_verified(&self) -> bool {
        false
    }

    pub fn is_public(&self) -> bool {
        true
    }

    pub fn get_code(&self) -> String {
        String::new()
    }

    // ========== Option Pass-throughs ==========

    pub fn set_errors<I, S>(&mut self, errors: I) -> options::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.set_errors(errors)
    }

    pub fn get_errors(&self) -> options::Result<Vec<String>> {
        self.options.get_errors()
    }

    pub fn dismiss_notice(&mut self) -> options::Result<()> {
        self.options.dismiss_notice()
    }

    pub fn notice(&self) -> options::Result<NoticeVisibility> {
        self.options.notice()
    }

    /// Current value of every activation flag
    pub fn flags(&self) -> options::Result<BTreeMap<String, Option<OptionValue>>> {
        let slug = self.theme_slug();
        ActivationFlag::ALL
            .iter()
            .map(|flag| -> options::Result<(String, Option<OptionValue>)> {
                let name = flag.option_name(slug);
                let value = self.options.standalone(&name)?;
                Ok((name, value))
            })
            .collect()
    }

    /// Remove every trace of the registration (uninstall)
    pub fn purge(&mut self) -> options::Result<()> {
        let slug = self.theme_slug().to_string();
        for flag in ActivationFlag::ALL {
            self.options.delete_standalone(&flag.option_name(&slug))?;
        }
        for legacy in LegacyOption::ALL {
            self.options.delete_standalone(&legacy.option_name(&slug))?;
        }
        self.options.delete_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::options::{MemorySettings, SettingsBackend};
    use crate::engine::updater::checker::test_server::closed_endpoint;

    fn registration() -> Registration {
        registration_with(MemorySettings::new())
    }

    fn registration_with(settings: MemorySettings) -> Registration {
        let options = OptionStore::new(Box::new(settings), "flatsome_registration");
        let client = reqwest::blocking::Client::builder().no_proxy().build().unwrap();
        let updater = UpdateChecker::with_client(client, &closed_endpoint(), "flatsome");
        let defaults = ActivationDefaults {
            purchase_code: "code-123".into(),
            supported_until: "2099-07-14".into(),
            buyer: "Licensed".into(),
        };
        Registration::new(options, updater, defaults)
    }

    #[test]
    fn test_remote_operations_are_disallowed() {
        let reg = registration();
        for code in ["", "abc", "GWrx-0000"] {
            assert_eq!(reg.register(code), Err(RegistrationError::NotAllowed));
        }
        assert_eq!(reg.unregister(), Err(RegistrationError::NotAllowed));
        assert_eq!(reg.get_latest_version(), Err(RegistrationError::NotAllowed));
        assert_eq!(
            reg.get_download_url("3.19.0"),
            Err(RegistrationError::NotAllowed)
        );

        let err = reg.register("abc").unwrap_err();
        assert_eq!(err.code(), 500);
        assert_eq!(err.to_string(), "Not allowed.");
    }

    #[test]
    fn test_status_predicates() {
        let reg = registration();
        assert!(!reg.is_registered());
        assert!(!reg.is_verified());
        assert!(reg.is_public());
        assert_eq!(reg.get_code(), "");
    }

    #[test]
    fn test_activation_defaults_flags_once() {
        let mut reg = registration();
        let report = reg.on_activate().unwrap();
        assert_eq!(report.added.len(), 4);
        assert!(report.removed.is_empty());

        let flags = reg.flags().unwrap();
        assert_eq!(
            flags["flatsome_wup_purchase_code"],
            Some(OptionValue::from("code-123"))
        );
        assert_eq!(flags["flatsome_wup_buyer"], Some(OptionValue::from("Licensed")));
        assert!(matches!(
            flags["flatsome_wup_sold_at"],
            Some(OptionValue::Int(ts)) if ts > 0
        ));

        // Second activation leaves everything alone
        let report = reg.on_activate().unwrap();
        assert_eq!(report, ActivationReport::default());
    }

    #[test]
    fn test_activation_writes_each_flag_from_its_own_default() {
        let mut reg = registration();
        let report = reg.on_activate().unwrap();

        let expected: Vec<String> = ActivationFlag::ALL
            .iter()
            .map(|flag| flag.option_name("flatsome"))
            .collect();
        assert_eq!(report.added, expected);
        for legacy in LegacyOption::ALL {
            let name = legacy.option_name("flatsome");
            assert!(!report.added.contains(&name));
            assert_eq!(reg.options().standalone(&name).unwrap(), None);
        }

        let flags = reg.flags().unwrap();
        assert_eq!(
            flags["flatsome_wup_supported_until"],
            Some(OptionValue::from("2099-07-14"))
        );
        assert!(matches!(
            flags["flatsome_wup_sold_at"],
            Some(OptionValue::Int(_))
        ));
        assert!(!flags.contains_key("flatsome_wup_errors"));
        assert!(!flags.contains_key("flatsome_wupdates"));
    }

    #[test]
    fn test_activation_keeps_existing_values_and_drops_legacy() {
        let mut settings = MemorySettings::new();
        settings.update("flatsome_wup_buyer", "\"Agency\"").unwrap();
        settings.update("flatsome_wup_errors", "[\"old\"]").unwrap();
        settings.update("flatsome_wupdates", "{}").unwrap();

        let mut reg = registration_with(settings);
        let report = reg.on_activate().unwrap();

        assert!(!report.added.contains(&"flatsome_wup_buyer".to_string()));
        assert_eq!(
            report.removed,
            vec!["flatsome_wup_errors", "flatsome_wupdates"]
        );
        assert_eq!(
            reg.options().standalone("flatsome_wup_buyer").unwrap(),
            Some(OptionValue::from("Agency"))
        );
    }

    #[test]
    fn test_errors_and_notice_pass_through() {
        let mut reg = registration();
        reg.set_errors(["Invalid purchase code", ""]).unwrap();
        assert_eq!(reg.get_errors().unwrap(), vec!["Invalid purchase code"]);
        assert_eq!(reg.notice().unwrap(), NoticeVisibility::Shown);

        reg.dismiss_notice().unwrap();
        assert_eq!(reg.notice().unwrap(), NoticeVisibility::Hidden);
        assert_eq!(reg.get_errors().unwrap(), vec!["Invalid purchase code"]);
    }

    #[test]
    fn test_failed_update_check_leaves_transient_alone() {
        let reg = registration();
        let transient = UpdateTransient::with_installed("flatsome", "3.18.7");
        let result = reg.check_for_update(transient.clone());
        assert_eq!(result, transient);
    }

    #[test]
    fn test_purge() {
        let mut reg = registration();
        reg.on_activate().unwrap();
        reg.set_errors(["e1"]).unwrap();

        reg.purge().unwrap();
        assert!(reg.flags().unwrap().values().all(Option::is_none));
        assert!(reg.options().get_all().unwrap().is_empty());
    }
}
