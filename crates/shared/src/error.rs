use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Protocol,
    MalformedPuzzle,
}

/// Failure while obtaining a puzzle from the remote service.
///
/// None of these are fatal: the controller degrades to the placeholder image and shows
/// the message as feedback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleSourceError {
    #[error("{0}")]
    Network(String),
    #[error("HTTP error! status: {status}")]
    Protocol { status: u16 },
    #[error("malformed puzzle: {0}")]
    MalformedPuzzle(String),
}

impl PuzzleSourceError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPuzzle(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Protocol { .. } => ErrorKind::Protocol,
            Self::MalformedPuzzle(_) => ErrorKind::MalformedPuzzle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_reports_status() {
        let err = PuzzleSourceError::Protocol { status: 503 };
        assert_eq!(err.to_string(), "HTTP error! status: 503");
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }
}
