use crate::settings::ValidationIssue;
use crate::sync::SyncError;

/// What `settings::save` has to tell the operator, in the order it happened.
///
/// Validation issues and per-size sync failures become `Error`, a sync
/// that could not start becomes `Warning`, everything else is `Info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Info(String),
    Warning(String),
    Error(String),
}

impl Feedback {
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self::Warning(msg.into())
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error(msg.into())
    }

    pub fn settings_saved() -> Self {
        Self::info("Settings saved.")
    }

    /// Closing line of a sync, e.g. `Synced 3 of 4 transformations.`
    pub fn sync_summary(total: usize, failed: usize) -> Self {
        Self::info(format!(
            "Synced {} of {total} transformations.",
            total.saturating_sub(failed)
        ))
    }

    /// Transforms were requested but the account did not validate.
    pub fn sync_skipped() -> Self {
        Self::warning("transformations not synced: account settings are invalid")
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Info(msg) | Self::Warning(msg) | Self::Error(msg) => msg,
        }
    }
}

impl From<&ValidationIssue> for Feedback {
    fn from(issue: &ValidationIssue) -> Self {
        Self::error(issue.message())
    }
}

impl From<&SyncError> for Feedback {
    fn from(error: &SyncError) -> Self {
        Self::error(error.to_string())
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info(msg) => write!(f, "{msg}"),
            Self::Warning(msg) => write!(f, "warning: {msg}"),
            Self::Error(msg) => write!(f, "error: {msg}"),
        }
    }
}
