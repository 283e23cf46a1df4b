mod access_app;
mod access_operation;
mod accessibility_config;
mod missing_source_policy;
pub mod pipeline;

pub use access_app::AccessApp;
pub use access_operation::AccessOperation;
pub use accessibility_config::{AccessibilityConfig, TravelTimeStorageConfig};
pub use missing_source_policy::MissingSourcePolicy;
pub use pipeline::PipelineOutput;
