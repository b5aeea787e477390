use std::path::PathBuf;

use thiserror::Error;

/// Fatal problems with a single documentation snippet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocError {
    #[error("title could not be found")]
    MissingTitle,

    #[error("response info found where the title should be: {0:?}")]
    ResponseInTitle(String),

    #[error("endpoint definition was not found")]
    MissingEndpoint,

    #[error("endpoint does not refer to {host}")]
    ForeignHost { host: String },

    #[error("response could not be found")]
    MissingResponse,

    #[error("unsupported HTTP verb: {0}")]
    UnsupportedVerb(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize descriptor: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("template error: {0}")]
    Template(String),

    #[error("generation failed: {0}")]
    Other(String),
}
