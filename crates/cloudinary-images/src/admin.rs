use std::sync::Arc;

use crate::account::AccountDescriptor;

/// Outcome of a create or update call against the Admin API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub message: String,
}

impl ApiResponse {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Errors that can occur when talking to the Admin API.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// No HTTP response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a status the caller cannot interpret.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
}

impl AdminError {
    /// Status code used when no HTTP response was received.
    pub const NO_RESPONSE: u16 = 0;

    pub fn status(&self) -> u16 {
        match self {
            Self::Network(_) => Self::NO_RESPONSE,
            Self::Status { status, .. } => *status,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Network(msg) => msg.clone(),
            Self::Status { message, .. } => message.clone(),
        }
    }
}

/// Named-transformation endpoints of the Cloudinary Admin API.
#[async_trait::async_trait]
pub trait CloudinaryAdminClient: Send + Sync {
    /// Whether a transformation with exactly this name exists.
    async fn exists(&self, name: &str) -> Result<bool, AdminError>;

    /// Declare a new named transformation.
    async fn create(&self, name: &str, value: &str) -> Result<ApiResponse, AdminError>;

    /// Overwrite an existing named transformation.
    async fn update(&self, name: &str, value: &str) -> Result<ApiResponse, AdminError>;
}

/// Account checks run when the operator saves settings.
/// Both return the HTTP status of the probe.
#[async_trait::async_trait]
pub trait AccountProbe: Send + Sync {
    /// Probe an endpoint that needs valid credentials.
    async fn check_credentials(&self) -> Result<u16, AdminError>;

    /// Probe an upload preset by name.
    async fn check_preset(&self, preset: &str) -> Result<u16, AdminError>;
}

#[async_trait::async_trait]
impl<T: CloudinaryAdminClient + ?Sized> CloudinaryAdminClient for Arc<T> {
    async fn exists(&self, name: &str) -> Result<bool, AdminError> {
        (**self).exists(name).await
    }

    async fn create(&self, name: &str, value: &str) -> Result<ApiResponse, AdminError> {
        (**self).create(name, value).await
    }

    async fn update(&self, name: &str, value: &str) -> Result<ApiResponse, AdminError> {
        (**self).update(name, value).await
    }
}

#[async_trait::async_trait]
impl<T: AccountProbe + ?Sized> AccountProbe for Arc<T> {
    async fn check_credentials(&self) -> Result<u16, AdminError> {
        (**self).check_credentials().await
    }

    async fn check_preset(&self, preset: &str) -> Result<u16, AdminError> {
        (**self).check_preset(preset).await
    }
}

/// Builds API handles for a parsed account.
pub trait Connector: Send + Sync {
    fn admin(&self, account: &AccountDescriptor) -> Arc<dyn CloudinaryAdminClient>;

    fn probe(&self, account: &AccountDescriptor) -> Arc<dyn AccountProbe>;
}
