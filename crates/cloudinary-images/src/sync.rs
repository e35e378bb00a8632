use std::fmt;

use crate::admin::{AdminError, CloudinaryAdminClient};
use crate::size::ImageSizeSpec;
use crate::transformation::{Method, TransformationRequest};

/// A failure recorded for one image size during a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncError {
    pub status: u16,
    pub message: String,
}

impl SyncError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn no_size_info(name: &str) -> Self {
        Self::new(400, format!("{name} has no size information"))
    }

    fn remote(name: &str, status: u16, message: &str) -> Self {
        Self::new(
            status,
            format!("Error creating/updating transformation for {name}: {message}"),
        )
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)
    }
}

/// Make Cloudinary's named transformations match `specs`.
///
/// Each size is handled on its own, in order: probe, then create or update.
/// Failures are collected and returned in input order; one failing size
/// never stops the rest. An empty result means every size was applied.
pub async fn sync(specs: &[ImageSizeSpec], api: &dyn CloudinaryAdminClient) -> Vec<SyncError> {
    let mut errors = Vec::new();
    let mut applied = 0usize;

    for spec in specs {
        match sync_one(spec, api).await {
            Ok(method) => {
                tracing::debug!(name = %spec.name, %method, "transformation applied");
                applied += 1;
            }
            Err(error) => {
                tracing::warn!(name = %spec.name, status = error.status, "{}", error.message);
                errors.push(error);
            }
        }
    }

    tracing::info!(applied, failed = errors.len(), "transformation sync finished");
    errors
}

async fn sync_one(
    spec: &ImageSizeSpec,
    api: &dyn CloudinaryAdminClient,
) -> Result<Method, SyncError> {
    if spec.is_unsized() {
        return Err(SyncError::no_size_info(&spec.name));
    }

    let remote = |e: AdminError| SyncError::remote(&spec.name, e.status(), &e.message());

    let method = if api.exists(&spec.name).await.map_err(remote)? {
        Method::Update
    } else {
        Method::Create
    };

    let request = TransformationRequest::new(spec, method);
    let value = request.value();
    tracing::debug!(name = %request.name, %method, %value, "applying transformation");

    let response = match method {
        Method::Create => api.create(&request.name, &value).await,
        Method::Update => api.update(&request.name, &value).await,
    }
    .map_err(remote)?;

    if !response.is_ok() {
        return Err(SyncError::remote(&spec.name, response.status, &response.message));
    }

    Ok(method)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsized_message_names_the_size() {
        let error = SyncError::no_size_info("empty");
        assert_eq!(error, SyncError::new(400, "empty has no size information"));
    }

    #[test]
    fn remote_message_includes_remote_text() {
        let error = SyncError::remote("medium", 401, "Invalid credentials");
        assert_eq!(error.status, 401);
        assert_eq!(
            error.message,
            "Error creating/updating transformation for medium: Invalid credentials"
        );
    }

    #[test]
    fn display_shows_status_and_message() {
        let error = SyncError::new(500, "boom");
        assert_eq!(error.to_string(), "[500] boom");
    }
}
