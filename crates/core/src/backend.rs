use crate::snapshot::{ColorChoice, Difficulty, GameSnapshot};
use thiserror::Error;

/// Failure shapes a transport can report. A missing game is not one of
/// them: `query_state` returns `Ok(None)` for that.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("no response from server (timeout or network issue)")]
    NoResponse(String),
    #[error("server error {status}: {}", detail.as_deref().unwrap_or("request rejected"))]
    Rejected { status: u16, detail: Option<String> },
    #[error("malformed server response: {0}")]
    Malformed(String),
}

impl BackendError {
    /// The server-supplied human-readable detail, when there is one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// The remote game server, seen transport-agnostically. One implementation
/// speaks HTTP; tests script responses in memory.
pub trait GameBackend {
    fn start_game(&mut self, difficulty: Difficulty) -> Result<GameSnapshot, BackendError>;

    /// `Ok(None)` means the server has no active game; callers transition
    /// to the no-game state instead of retrying.
    fn query_state(&mut self) -> Result<Option<GameSnapshot>, BackendError>;

    fn play_action(&mut self, action_index: u32) -> Result<GameSnapshot, BackendError>;

    fn choose_color(&mut self, color: ColorChoice) -> Result<GameSnapshot, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_prefers_the_server_detail() {
        let err = BackendError::Rejected {
            status: 400,
            detail: Some("illegal move".to_string()),
        };
        assert_eq!(err.to_string(), "server error 400: illegal move");
        assert_eq!(err.detail(), Some("illegal move"));

        let bare = BackendError::Rejected {
            status: 500,
            detail: None,
        };
        assert_eq!(bare.to_string(), "server error 500: request rejected");
        assert_eq!(bare.detail(), None);
    }

    #[test]
    fn transport_failures_have_no_detail() {
        let err = BackendError::NoResponse("connection refused".to_string());
        assert_eq!(err.detail(), None);
        assert_eq!(
            err.to_string(),
            "no response from server (timeout or network issue)"
        );
    }
}
