use serde::{Deserialize, Serialize};

use crate::account::{AccountDescriptor, AccountError};
use crate::admin::Connector;
use crate::feedback::Feedback;
use crate::options::{self, OptionError, OptionStore};
use crate::registry::SizeRegistry;
use crate::sync::{self, SyncError};

/// Option name under which the settings blob is stored.
pub const OPTION_NAME: &str = "cloudinary-images";

pub const INVALID_URL_MSG: &str =
    "Invalid Cloudinary URL. Check Cloudinary account for correct format and parameter values";

pub const INVALID_PRESET_MSG: &str =
    "Preset cannot be found. Check Cloudinary account for correct preset name";

/// Operator settings, persisted as one JSON option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub url: String,
    /// Upload preset name; empty when unused.
    #[serde(default)]
    pub preset: String,
    /// Build or update transformations on save.
    #[serde(default)]
    pub transforms: bool,
    /// Set once a save passed validation.
    #[serde(default)]
    pub configured: bool,
}

/// A settings field the operator has to fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    InvalidUrl,
    InvalidPreset,
}

impl ValidationIssue {
    /// Settings field the issue belongs to.
    pub fn field(self) -> &'static str {
        match self {
            Self::InvalidUrl => "url",
            Self::InvalidPreset => "preset",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidUrl => INVALID_URL_MSG,
            Self::InvalidPreset => INVALID_PRESET_MSG,
        }
    }
}

/// Result of validating settings against Cloudinary.
#[derive(Debug, Clone)]
pub struct Validation {
    /// Present when the URL parsed.
    pub account: Option<AccountDescriptor>,
    pub issues: Vec<ValidationIssue>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.account.is_some() && self.issues.is_empty()
    }
}

/// Outcome of a settings save.
#[derive(Debug, Clone)]
pub struct SaveReport {
    /// Settings as persisted.
    pub settings: Settings,
    pub issues: Vec<ValidationIssue>,
    /// `None` when no sync was attempted.
    pub sync_errors: Option<Vec<SyncError>>,
    pub feedback: Vec<Feedback>,
}

/// Errors that stop a settings operation outright.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Cloudinary account is not configured")]
    NotConfigured,

    #[error("invalid Cloudinary URL: {0}")]
    Account(#[from] AccountError),

    #[error(transparent)]
    Options(#[from] OptionError),
}

/// Normalize operator input before validation and storage.
pub fn sanitize(input: &Settings) -> Settings {
    Settings {
        url: input.url.trim().to_owned(),
        preset: sanitize_text(&input.preset),
        transforms: input.transforms,
        configured: input.configured,
    }
}

fn sanitize_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check the URL format, then the credentials, then the preset.
///
/// Each step only runs when the previous one passed: an unparseable URL
/// makes no remote calls, and rejected credentials skip the preset probe.
pub async fn validate(settings: &Settings, connector: &dyn Connector) -> Validation {
    let account = match AccountDescriptor::parse(&settings.url) {
        Ok(account) => account,
        Err(_) => {
            return Validation {
                account: None,
                issues: vec![ValidationIssue::InvalidUrl],
            };
        }
    };

    let probe = connector.probe(&account);
    let mut issues = Vec::new();

    match probe.check_credentials().await {
        Ok(200) => {}
        Ok(status) => {
            tracing::debug!(status, cloud = account.cloud_name(), "credential probe rejected");
            issues.push(ValidationIssue::InvalidUrl);
        }
        Err(e) => {
            tracing::debug!(error = %e, "credential probe failed");
            issues.push(ValidationIssue::InvalidUrl);
        }
    }

    if issues.is_empty() && !settings.preset.is_empty() {
        match probe.check_preset(&settings.preset).await {
            Ok(200) => {}
            Ok(status) => {
                tracing::debug!(status, preset = %settings.preset, "preset probe rejected");
                issues.push(ValidationIssue::InvalidPreset);
            }
            Err(e) => {
                tracing::debug!(error = %e, "preset probe failed");
                issues.push(ValidationIssue::InvalidPreset);
            }
        }
    }

    Validation {
        account: Some(account),
        issues,
    }
}

/// Load stored settings, if any.
pub fn load(store: &dyn OptionStore) -> Result<Option<Settings>, OptionError> {
    options::get_json(store, OPTION_NAME)
}

/// Sanitize, validate and persist settings, then sync transformations
/// when requested and the account is usable.
///
/// Sanitized input is stored even when validation fails, so the operator
/// can correct it. Only option-store failures are returned as errors.
pub async fn save(
    input: &Settings,
    store: &dyn OptionStore,
    connector: &dyn Connector,
    registry: &dyn SizeRegistry,
) -> Result<SaveReport, OptionError> {
    let mut settings = sanitize(input);
    let validation = validate(&settings, connector).await;

    settings.configured = validation.is_valid();
    options::set_json(store, OPTION_NAME, &settings)?;

    let mut feedback: Vec<Feedback> = validation.issues.iter().map(Feedback::from).collect();
    if validation.is_valid() {
        feedback.push(Feedback::settings_saved());
    }

    let sync_errors = match (&validation.account, settings.transforms) {
        (Some(account), true) if validation.is_valid() => {
            let sizes = registry.sizes()?;
            let admin = connector.admin(account);
            let errors = sync::sync(&sizes, admin.as_ref()).await;
            feedback.extend(errors.iter().map(Feedback::from));
            feedback.push(Feedback::sync_summary(sizes.len(), errors.len()));
            Some(errors)
        }
        (_, true) => {
            feedback.push(Feedback::sync_skipped());
            None
        }
        (_, false) => None,
    };

    Ok(SaveReport {
        settings,
        issues: validation.issues,
        sync_errors,
        feedback,
    })
}

/// Sync transformations using the stored account.
pub async fn sync_stored(
    store: &dyn OptionStore,
    connector: &dyn Connector,
    registry: &dyn SizeRegistry,
) -> Result<Vec<SyncError>, SettingsError> {
    let settings = load(store)?.ok_or(SettingsError::NotConfigured)?;
    let account = AccountDescriptor::parse(&settings.url)?;

    let sizes = registry.sizes()?;
    let admin = connector.admin(&account);
    Ok(sync::sync(&sizes, admin.as_ref()).await)
}

/// Remove everything this crate stored.
pub fn uninstall(store: &dyn OptionStore) -> Result<(), OptionError> {
    tracing::info!(option = OPTION_NAME, "deleting stored settings");
    store.delete_option(OPTION_NAME)
}
