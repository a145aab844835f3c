use thiserror::Error;

/// Deltacloud client error types
#[derive(Error, Debug)]
pub enum DeltacloudError {
    #[error("URL parsing failed: {0}")]
    Url(#[from] url::ParseError),

    #[error("GET request failed: {0}")]
    Get(reqwest::Error),

    #[error("POST request failed: {0}")]
    Post(reqwest::Error),

    #[error("DELETE request failed: {0}")]
    Delete(reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to find the link for '{0}'")]
    LinkNotFound(String),

    #[error("Expected {0} data, received nothing")]
    EmptyResponse(String),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Failed to find '{0}' by name")]
    NameNotFound(String),

    #[error("Server reported error: {0}")]
    Server(String),

    #[error("Authentication failed: {0}")]
    Auth(String),
}

/// Result type for Deltacloud operations
pub type DeltacloudResult<T> = Result<T, DeltacloudError>;

impl DeltacloudError {
    /// Create an API error from a status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn auth_error(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create an invalid argument error
    pub fn invalid_arg(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an XML error naming the expected and actual root tags
    pub fn root_mismatch(expected: &str, actual: &str) -> Self {
        Self::Xml(format!(
            "Failed to get expected root element '{}': got '{}'",
            expected, actual
        ))
    }
}
