/// Error Module
///
/// Typed errors for the library seams. The binary wraps these with `anyhow`.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("indexer returned HTTP {status} for {path}")]
    Status { path: String, status: u16 },

    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown location `{0}`")]
    Unknown(String),

    #[error("malformed id `{0}`, expected `<height>-<index>`")]
    MalformedId(String),

    #[error("malformed block height `{0}`")]
    MalformedHeight(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("invalid API url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
