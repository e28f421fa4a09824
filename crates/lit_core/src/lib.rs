pub mod config;
pub mod error_handler;
pub mod logging;
pub mod notifications;
pub mod translate;

pub use config::{FundingRules, LitConfig};
pub use error_handler::{
    AppErrorHandler, ClassifiedCategory, ClassifiedError, ErrorCategory, ErrorReporter,
    ErrorSeverity, LitError, classify_error,
};
pub use notifications::{AppNotification, NotificationStore, NotificationType};
pub use translate::{Localizer, Translator, prefixed};
