use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::notifications::{AppNotification, NotificationStore, NotificationType};

/// Top-level error type returned by backend collaborators (pool, lnd, wallet).
#[derive(Error, Debug)]
pub enum LitError {
    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Classification of errors for logging and user display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Error caused by user input (e.g., not enough funds).
    UserError,
    /// Error returned by a backend daemon.
    BackendError,
    /// Network connectivity or timeout issue.
    NetworkError,
    /// Macaroon or TLS failure.
    SecurityError,
    /// Invalid or missing configuration.
    ConfigError,
    /// Anything else.
    SystemError,
}

impl LitError {
    /// Returns the broad error category for routing and display purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Rpc(_) => ErrorCategory::BackendError,
            Self::Network(_) => ErrorCategory::NetworkError,
            Self::Auth(_) => ErrorCategory::SecurityError,
            Self::InsufficientFunds(_) => ErrorCategory::UserError,
            Self::Config(_) => ErrorCategory::ConfigError,
            Self::Internal(_) => ErrorCategory::SystemError,
        }
    }

    /// Returns a user-friendly message (hides internal details).
    pub fn user_message(&self) -> String {
        match self {
            Self::Rpc(msg) => msg.clone(),
            Self::Network(_) => "Network error. Check your connection.".into(),
            Self::Auth(_) => "Authentication failed. Check your macaroons.".into(),
            Self::InsufficientFunds(msg) => format!("Insufficient funds: {msg}"),
            Self::Config(msg) => format!("Configuration issue: {msg}"),
            Self::Internal(_) => "An unexpected error occurred.".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error classification for anyhow::Error (message-pattern based)
// ---------------------------------------------------------------------------

/// Error severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Non-critical, log only.
    Low,
    /// Show to user, recoverable.
    Medium,
    /// Operation failed.
    High,
    /// App may be unstable.
    Critical,
}

/// Fine-grained error category derived from message patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassifiedCategory {
    Network,
    Authentication,
    Funds,
    Configuration,
    Backend,
    Internal,
}

/// Classified error with context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedError {
    pub severity: ErrorSeverity,
    pub category: ClassifiedCategory,
    pub message: String,
    pub user_message: String,
    pub recoverable: bool,
}

/// Classify an `anyhow::Error` into severity, category, and a user-friendly message
/// by inspecting the error message for known patterns.
pub fn classify_error(error: &anyhow::Error) -> ClassifiedError {
    classify_message(&error.to_string())
}

fn classify_message(raw: &str) -> ClassifiedError {
    let msg = raw.to_lowercase();

    let (category, severity, user_msg) = if msg.contains("wallet locked")
        || msg.contains("wallet is locked")
        || msg.contains("not fully synced")
    {
        (
            ClassifiedCategory::Backend,
            ErrorSeverity::Critical,
            "Your node is not ready. Unlock and sync lnd, then restart.",
        )
    } else if msg.contains("context canceled") {
        (
            ClassifiedCategory::Internal,
            ErrorSeverity::Low,
            "The request was cancelled.",
        )
    } else if msg.contains("macaroon")
        || msg.contains("unauthorized")
        || msg.contains("permission denied")
    {
        (
            ClassifiedCategory::Authentication,
            ErrorSeverity::High,
            "Authentication failed. Check your macaroons.",
        )
    } else if msg.contains("insufficient") || msg.contains("not enough") {
        (
            ClassifiedCategory::Funds,
            ErrorSeverity::Medium,
            "Insufficient funds for this request.",
        )
    } else if msg.contains("timeout")
        || msg.contains("connection")
        || msg.contains("unavailable")
    {
        (
            ClassifiedCategory::Network,
            ErrorSeverity::Medium,
            "Network error. Check your connection.",
        )
    } else if msg.contains("config") {
        (
            ClassifiedCategory::Configuration,
            ErrorSeverity::Medium,
            "Configuration error. Check settings.",
        )
    } else if msg.contains("rpc error") || msg.contains("code =") {
        (
            ClassifiedCategory::Backend,
            ErrorSeverity::High,
            "The backend rejected the request.",
        )
    } else {
        (
            ClassifiedCategory::Internal,
            ErrorSeverity::Medium,
            "An unexpected error occurred.",
        )
    };

    ClassifiedError {
        severity,
        category,
        message: raw.to_string(),
        user_message: user_msg.to_string(),
        recoverable: severity != ErrorSeverity::Critical,
    }
}

// ---------------------------------------------------------------------------
// Error reporting sink
// ---------------------------------------------------------------------------

/// Sink for operation failures that should be surfaced to the user.
pub trait ErrorReporter: Send + Sync {
    fn handle_error(&self, error: &LitError, context: &str);
}

/// Default reporter: logs the failure and raises an error toast whose title is
/// the context message and whose body is the error text.
#[derive(Clone, Default)]
pub struct AppErrorHandler {
    notifications: Arc<Mutex<NotificationStore>>,
}

impl AppErrorHandler {
    pub fn new(notifications: Arc<Mutex<NotificationStore>>) -> Self {
        Self { notifications }
    }

    pub fn notifications(&self) -> Arc<Mutex<NotificationStore>> {
        Arc::clone(&self.notifications)
    }
}

impl ErrorReporter for AppErrorHandler {
    fn handle_error(&self, err: &LitError, context: &str) {
        let classified = classify_message(&err.to_string());
        if classified.severity == ErrorSeverity::Low {
            warn!(category = ?err.category(), "{context}: {err}");
        } else {
            error!(
                category = ?err.category(),
                severity = ?classified.severity,
                recoverable = classified.recoverable,
                "{context}: {err}"
            );
        }
        self.notifications.lock().push(
            AppNotification::new(NotificationType::Error, err.user_message()).with_title(context),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_lit_error_category_mapping() {
        assert_eq!(LitError::Rpc("x".into()).category(), ErrorCategory::BackendError);
        assert_eq!(LitError::Network("x".into()).category(), ErrorCategory::NetworkError);
        assert_eq!(LitError::Auth("x".into()).category(), ErrorCategory::SecurityError);
        assert_eq!(
            LitError::InsufficientFunds("x".into()).category(),
            ErrorCategory::UserError
        );
    }

    #[test]
    fn test_lit_error_user_message_hides_internals() {
        let err = LitError::Internal("poisoned channel state".into());
        assert_eq!(err.user_message(), "An unexpected error occurred.");
    }

    #[test]
    fn test_rpc_error_passes_backend_message_through() {
        let err = LitError::Rpc("account amount too small".into());
        assert_eq!(err.user_message(), "account amount too small");
    }

    #[test]
    fn test_classify_macaroon() {
        let classified = classify_error(&anyhow!("verification failed: invalid macaroon"));
        assert_eq!(classified.category, ClassifiedCategory::Authentication);
        assert_eq!(classified.severity, ErrorSeverity::High);
    }

    #[test]
    fn test_classify_insufficient_funds() {
        let classified = classify_error(&anyhow!("insufficient funds available"));
        assert_eq!(classified.category, ClassifiedCategory::Funds);
        assert_eq!(classified.user_message, "Insufficient funds for this request.");
    }

    #[test]
    fn test_classify_network_unavailable() {
        let classified = classify_error(&anyhow!("rpc error: code = Unavailable"));
        assert_eq!(classified.category, ClassifiedCategory::Network);
    }

    #[test]
    fn test_classify_backend_rpc() {
        let classified = classify_error(&anyhow!("rpc error: code = Unknown desc = bad"));
        assert_eq!(classified.category, ClassifiedCategory::Backend);
    }

    #[test]
    fn test_classify_locked_wallet_is_critical() {
        let classified = classify_error(&anyhow!("rpc error: code = Unknown desc = wallet locked"));
        assert_eq!(classified.severity, ErrorSeverity::Critical);
        assert_eq!(classified.category, ClassifiedCategory::Backend);
        assert!(!classified.recoverable);
    }

    #[test]
    fn test_classify_unsynced_node_is_critical() {
        let classified = classify_error(&anyhow!("chain backend is not fully synced"));
        assert_eq!(classified.severity, ErrorSeverity::Critical);
        assert!(!classified.recoverable);
    }

    #[test]
    fn test_classify_context_canceled_is_low() {
        let classified = classify_error(&anyhow!("rpc error: code = Canceled desc = context canceled"));
        assert_eq!(classified.severity, ErrorSeverity::Low);
        assert!(classified.recoverable);
    }

    #[test]
    fn test_classify_internal_fallback() {
        let classified = classify_error(&anyhow!("something totally unexpected happened"));
        assert_eq!(classified.category, ClassifiedCategory::Internal);
        assert!(classified.recoverable);
        assert_eq!(classified.message, "something totally unexpected happened");
    }

    #[test]
    fn test_app_error_handler_pushes_titled_toast() {
        let handler = AppErrorHandler::default();
        handler.handle_error(
            &LitError::Network("dial tcp: timeout".into()),
            "Unable to estimate miner fee",
        );

        let store = handler.notifications();
        let store = store.lock();
        assert_eq!(store.all().len(), 1);
        let toast = &store.all()[0];
        assert_eq!(toast.notification_type, NotificationType::Error);
        assert_eq!(toast.title.as_deref(), Some("Unable to estimate miner fee"));
        assert_eq!(toast.message, "Network error. Check your connection.");
    }
}
