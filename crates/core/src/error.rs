#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),
    #[error("failed to read fixture {}: {source}", .path.display())]
    FixtureRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse fixture {name}: {source}")]
    FixtureParse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown nurture flow: {0}")]
    UnknownFlow(String),
    #[error("unknown lead: {0}")]
    UnknownLead(String),
    #[error(transparent)]
    UnknownVariant(#[from] api_shared::UnknownVariant),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
