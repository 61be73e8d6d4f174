//! Error types for the resolution pipeline
//!
//! Every stage returns [`Result`]; nothing is recovered locally. The binary
//! reports the first error and exits.

use thiserror::Error;

/// Failure of any pipeline stage
#[derive(Error, Debug)]
pub enum Error {
    /// Request could not be built, sent, or its body read
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body is not JSON or does not match the expected schema
    #[error("decode error while reading {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The remote API answered with its error envelope instead of data
    #[error("api error {name}: {message}")]
    Api { name: String, message: String },

    /// A lookup predicate matched no record
    #[error("not found: no {what} matching {key:?}")]
    NotFound { what: &'static str, key: String },
}

impl Error {
    /// Short stable label for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Transport { .. } => "transport",
            Error::Decode { .. } => "decode",
            Error::Api { .. } => "api",
            Error::NotFound { .. } => "not-found",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_key() {
        let err = Error::NotFound { what: "workspace", key: "Missing".to_string() };
        assert_eq!(err.kind(), "not-found");
        assert_eq!(err.to_string(), "not found: no workspace matching \"Missing\"");
    }

    #[test]
    fn test_decode_kind() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = Error::Decode { what: "workspaces", source };
        assert_eq!(err.kind(), "decode");
        assert!(err.to_string().starts_with("decode error while reading workspaces"));
    }
}
