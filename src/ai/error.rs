use std::fmt;

/// Failure classes of the generation client. The boundary maps these to
/// user-facing errors, so they stay distinguishable rather than collapsing
/// into one opaque error.
#[derive(Debug)]
pub enum AIError {
    Network(String),
    Parse(String),
    Validation(String),
    Authentication(String),
    RateLimit(String),
    Api(String),
}

impl fmt::Display for AIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {}", msg),
            Self::Parse(msg) => write!(f, "parse error: {}", msg),
            Self::Validation(msg) => write!(f, "validation error: {}", msg),
            Self::Authentication(msg) => write!(f, "authentication error: {}", msg),
            Self::RateLimit(msg) => write!(f, "rate limit error: {}", msg),
            Self::Api(msg) => write!(f, "API error: {}", msg),
        }
    }
}

impl std::error::Error for AIError {}

impl From<serde_json::Error> for AIError {
    fn from(error: serde_json::Error) -> Self {
        AIError::Parse(format!("JSON error: {}", error))
    }
}
