pub mod account;
pub mod admin;
pub mod feedback;
pub mod options;
pub mod registry;
pub mod settings;
pub mod size;
pub mod sync;
pub mod transformation;

pub use account::{AccountDescriptor, AccountError, DEFAULT_API_BASE};
pub use admin::{AccountProbe, AdminError, ApiResponse, CloudinaryAdminClient, Connector};
pub use feedback::Feedback;
pub use options::{OptionError, OptionStore};
pub use registry::{OptionSizeRegistry, SizeRegistry};
pub use settings::{SaveReport, Settings, SettingsError, Validation, ValidationIssue};
pub use size::{Crop, HorizontalAnchor, ImageSizeSpec, VerticalAnchor};
pub use sync::{SyncError, sync};
pub use transformation::{Method, TransformationRequest};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
