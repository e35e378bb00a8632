use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors raised by an option store.
#[derive(Debug, thiserror::Error)]
pub enum OptionError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("invalid value for option {name}: {reason}")]
    Decode { name: String, reason: String },
}

/// Named key-value persistence owned by the host.
///
/// Values are opaque strings; the typed helpers below store JSON.
pub trait OptionStore: Send + Sync {
    fn get_option(&self, name: &str) -> Result<Option<String>, OptionError>;

    fn set_option(&self, name: &str, value: &str) -> Result<(), OptionError>;

    /// Remove an option. Removing a missing option is not an error.
    fn delete_option(&self, name: &str) -> Result<(), OptionError>;
}

impl<T: OptionStore + ?Sized> OptionStore for Arc<T> {
    fn get_option(&self, name: &str) -> Result<Option<String>, OptionError> {
        (**self).get_option(name)
    }

    fn set_option(&self, name: &str, value: &str) -> Result<(), OptionError> {
        (**self).set_option(name, value)
    }

    fn delete_option(&self, name: &str) -> Result<(), OptionError> {
        (**self).delete_option(name)
    }
}

/// Read a JSON-encoded option.
pub fn get_json<T: DeserializeOwned>(
    store: &dyn OptionStore,
    name: &str,
) -> Result<Option<T>, OptionError> {
    let Some(raw) = store.get_option(name)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| OptionError::Decode {
            name: name.to_owned(),
            reason: e.to_string(),
        })
}

/// Write an option as JSON.
pub fn set_json<T: Serialize + ?Sized>(
    store: &dyn OptionStore,
    name: &str,
    value: &T,
) -> Result<(), OptionError> {
    let raw = serde_json::to_string(value).map_err(|e| OptionError::Decode {
        name: name.to_owned(),
        reason: e.to_string(),
    })?;
    store.set_option(name, &raw)
}
