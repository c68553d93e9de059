pub mod error_handler;
pub mod error_logger;
pub mod error_parser;
pub mod session;
pub mod stores;
pub mod toaster;
pub mod token_refresh;

#[cfg(test)]
pub(crate) mod test_support;

pub use error_handler::{ErrorHandler, HandleOptions};
pub use error_logger::{ErrorLogger, ErrorLoggerConfig, ErrorLoggerPatch};
pub use error_parser::parse_error;
pub use session::CredentialVault;
pub use toaster::Toaster;
pub use token_refresh::TokenRefreshScheduler;
