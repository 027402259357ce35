use std::path::PathBuf;

/// Bad or missing user input. Raised before any network work where possible.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no access token given")]
    MissingToken,

    #[error("invalid country code {0:?}: expected two letters, e.g. US")]
    InvalidCountryCode(String),

    #[error("unknown country code: {0}")]
    UnknownCountry(String),

    #[error("server limit must be at least 1")]
    ZeroLimit,
}

/// The access token could not be exchanged for a private key.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("access token was rejected")]
    InvalidToken,

    #[error("credential request failed: {0}")]
    RequestFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("catalog request failed: {0}")]
    Request(#[from] nordvpn_api::Error),

    #[error("no servers found")]
    NoServers,

    /// The listing itself failed; shown to the user like an empty listing.
    #[error("no servers found: {0}")]
    ServersUnavailable(nordvpn_api::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no valid servers selected")]
    NoValidSelection,
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
