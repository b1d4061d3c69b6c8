use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no catalog API key configured")]
    MissingApiKey,
    #[error("invalid catalog base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("catalog transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("catalog service returned {status}: {message}")]
    Service { status: u16, message: String },
    #[error("malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        // request urls carry the api key
        Self::Transport(err.without_url())
    }
}

impl CatalogError {
    /// Whether the service rejected the credentials rather than the request.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::MissingApiKey => true,
            Self::Service { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }
}
