use thiserror::Error;

/// Shown when either endpoint answers with a non-success status
pub const TRANSPORT_MESSAGE: &str = "Something went wrong with fetching movies";
/// Shown when the catalog reports no match, and for anything unexpected
pub const NOT_FOUND_MESSAGE: &str = "Movie not found!";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// Non-success HTTP status
    #[error("catalog returned HTTP {0}")]
    Status(u16),

    /// Connection, TLS or body read failure
    #[error("catalog request failed: {0}")]
    Transport(String),

    /// The catalog answered `"Response": "False"`
    #[error("catalog reported no match: {0}")]
    NotFound(String),

    /// Body was not the JSON shape the catalog documents
    #[error("could not decode catalog response: {0}")]
    Decode(String),

    /// Superseded by a newer request; never surfaced to the user
    #[error("request superseded")]
    Cancelled,
}

impl CatalogError {
    /// The message the UI shows for this error
    pub fn user_message(&self) -> &'static str {
        match self {
            CatalogError::Status(_) => TRANSPORT_MESSAGE,
            _ => NOT_FOUND_MESSAGE,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, CatalogError::Cancelled)
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => CatalogError::Status(status.as_u16()),
            None => CatalogError::Transport(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(CatalogError::Status(500).user_message(), TRANSPORT_MESSAGE);
        assert_eq!(CatalogError::NotFound("Movie not found!".into()).user_message(), NOT_FOUND_MESSAGE);
        assert_eq!(CatalogError::Decode("eof".into()).user_message(), NOT_FOUND_MESSAGE);
        assert_eq!(CatalogError::Transport("reset".into()).user_message(), NOT_FOUND_MESSAGE);
        assert!(CatalogError::Cancelled.is_cancelled());
        assert!(!CatalogError::Status(404).is_cancelled());
    }
}
