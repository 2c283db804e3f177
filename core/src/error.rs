use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Feil ved lesing/skriving av snapshot og preferanser.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON-feil med sti til feltet som feilet (serde_path_to_error).
    #[error("invalid snapshot JSON at {path}: {message}")]
    Json { path: String, message: String },

    #[error("could not encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("unknown unit preference: {0:?}")]
    UnknownUnit(String),

    /// Lagring avvist (f.eks. full kvote eller skrivebeskyttet lager).
    #[error("store rejected write for key {0}")]
    Rejected(String),
}

impl StoreError {
    pub fn io(key: &str, source: std::io::Error) -> Self {
        StoreError::Io { key: key.to_string(), source }
    }

    pub fn from_path_error(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
        StoreError::Json {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        }
    }
}
