// src/domain/error.rs
use crate::domain::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },
    #[error("Note not found: {0}")]
    NoteNotFound(String),
    #[error("Invalid draft: {0}")]
    Validation(ValidationErrors),
    #[error("Page {requested} is out of range (1..={total})")]
    PageOutOfRange { requested: u32, total: u32 },
    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl DomainError {
    pub fn notice(&self) -> Notice {
        match self {
            DomainError::Network(_) => {
                Notice::error("Could not reach the notes service. Check your connection and try again")
            }
            DomainError::Auth(_) => Notice::error("Authentication failed. Check your NoteHub token"),
            DomainError::Service { .. } => Notice::error("Request failed. Please try again later"),
            DomainError::NoteNotFound(id) => Notice::error(format!("Note {id} does not exist")),
            DomainError::Validation(errors) => Notice::error(format!("Fix the form: {errors}")),
            DomainError::PageOutOfRange { requested, total } => {
                Notice::error(format!("No page {requested}; there are {total} pages"))
            }
            DomainError::Config(msg) => Notice::error(msg.clone()),
        }
    }

    /// Transport failures may succeed if the user tries again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_auth_error_when_building_notice_then_is_error_level() {
        let notice = DomainError::Auth("401".to_string()).notice();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.contains("token"));
    }

    #[test]
    fn given_service_error_when_building_notice_then_message_is_generic() {
        let err = DomainError::Service {
            status: 500,
            message: "stack trace".to_string(),
        };
        assert!(!err.notice().message.contains("stack trace"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn given_network_error_when_checking_then_is_retryable() {
        assert!(DomainError::Network("timeout".to_string()).is_retryable());
    }
}
