//! Lobby error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Why a lobby operation did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LobbyErrorKind {
    /// A player with this name is already seated in the game.
    #[display("player name '{_0}' is already taken")]
    NameTaken(String),
    /// Every seat in the game is occupied.
    #[display("game is full")]
    GameFull,
    /// Every color and coin set has already been handed out once.
    #[display("game has no unassigned seats left")]
    SeatsExhausted,
    /// A game with this name already exists.
    #[display("game name '{_0}' is already taken")]
    GameNameTaken(String),
    /// No game with this name exists.
    #[display("game '{_0}' not found")]
    GameNotFound(String),
    /// No player with this name is seated in the game.
    #[display("player '{_0}' not found")]
    PlayerNotFound(String),
}

impl LobbyErrorKind {
    /// The request broke a precondition (duplicate name, no free seat).
    #[instrument]
    pub fn is_rejected(&self) -> bool {
        matches!(
            self,
            Self::NameTaken(_) | Self::GameFull | Self::SeatsExhausted | Self::GameNameTaken(_)
        )
    }

    /// A lookup by name found nothing.
    #[instrument]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::GameNotFound(_) | Self::PlayerNotFound(_))
    }
}

/// Lobby error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Lobby error: {} at {}:{}", kind, file, line)]
pub struct LobbyError {
    /// What went wrong.
    pub kind: LobbyErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LobbyError {
    /// Creates a new lobby error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: LobbyErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &LobbyErrorKind {
        &self.kind
    }
}

impl From<LobbyErrorKind> for LobbyError {
    #[track_caller]
    fn from(kind: LobbyErrorKind) -> Self {
        Self::new(kind)
    }
}
