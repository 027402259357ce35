use nordgen_core::{AuthError, FetchError, OutputError, SelectionError, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Selection(#[from] SelectionError),

    #[error("{0}")]
    Output(#[from] OutputError),

    #[error("failed to set up http client: {0}")]
    Client(nordvpn_api::Error),

    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// What the user can do about it, when there is something to suggest.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::Validation(ValidationError::MissingToken) => {
                Some("pass --token or set NORDVPN_TOKEN")
            }
            AppError::Validation(ValidationError::UnknownCountry(_)) => {
                Some("run with --list-countries to see valid codes")
            }
            AppError::Auth(AuthError::InvalidToken) => Some(
                "create a new access token in Nord Account under \
                 NordVPN > Set up NordVPN manually",
            ),
            AppError::Fetch(FetchError::NoServers | FetchError::ServersUnavailable(_)) => {
                Some("try another country or server group, or raise --limit")
            }
            AppError::Selection(_) => Some("use 'best N', 'all', or positions such as 1,3,5"),
            _ => None,
        }
    }
}
