use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    #[error("config error: {0}")]
    Config(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("{0} environment variable not set")]
    MissingToken(String),

    #[error("credentials file not found: {0}")]
    CredentialsNotFound(PathBuf),

    #[error("invalid credentials: {0}")]
    Credentials(String),

    #[error("github error: {0}")]
    GitHub(String),

    #[error("publisher api error ({status}): {body}")]
    Publisher { status: u16, body: String },

    #[error("version code {0} cannot be incremented")]
    VersionOverflow(u64),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("octocrab error: {0}")]
    Octocrab(#[from] octocrab::Error),
}

impl ReleaseError {
    /// Errors raised before any network activity.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ReleaseError::MissingToken(_) | ReleaseError::CredentialsNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ReleaseError>;
