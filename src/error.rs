use thiserror::Error;

pub type Result<T> = std::result::Result<T, RestfulError>;

/// Errors raised while configuring the router or the server
#[derive(Debug, Error)]
pub enum RestfulError {
    #[error("{controller} doesn't implement any REST capability")]
    NoCapabilities { controller: String },

    #[error("Invalid resource path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Invalid configuration value for {key}: `{value}`")]
    InvalidConfig { key: String, value: String },
}

impl RestfulError {
    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        RestfulError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
