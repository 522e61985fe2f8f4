use thiserror::Error;

/// The supplied string is not a recognizable video URL or identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid video URL or identifier \"{input}\": {reason}")]
pub struct InvalidIdentifierError {
    pub input: String,
    pub reason: &'static str,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
