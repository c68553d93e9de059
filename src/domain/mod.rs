pub mod activity;
pub mod auth;
pub mod category;
pub mod constraints;
pub mod errors;
pub mod failure;
pub mod import;
pub mod insights;
pub mod ports;
pub mod task;
pub mod time;
pub mod toast;
pub mod validation;

pub use errors::{AppError, ErrorAction, ErrorCategory, ErrorSeverity};
pub use failure::{ClientError, StorageError};
pub use validation::{Validate, ValidationIssue};
