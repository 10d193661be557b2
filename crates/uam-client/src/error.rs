use thiserror::Error;
use uam_core::{FormError, SelfActionDenied, UserId};

/// Failure talking to the user-management service
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("User not found: {0}")]
    NotFound(UserId),
    #[error("Service responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid service URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("User id '{0}' cannot be addressed in a request path")]
    UnaddressableId(UserId),
}

/// Why a screen operation did not go through
#[derive(Error, Debug)]
pub enum ScreenError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    SelfAction(#[from] SelfActionDenied),
    #[error("No form is open")]
    NoOpenForm,
    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Env(#[from] envy::Error),
}
