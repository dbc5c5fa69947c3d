//! Preconditions for seating a player.
//!
//! A join request is admitted only when every precondition holds; the first
//! one that fails names the reason the request was rejected.

use super::game::Game;
use crate::error::{LobbyError, LobbyErrorKind};
use tracing::{instrument, warn};

/// Precondition: no seated player already uses the requested name.
pub struct NameAvailable;

impl NameAvailable {
    /// Checks the requested name against the roster (case-sensitive).
    #[instrument(skip(game), fields(game = %game.name()))]
    pub fn check(name: &str, game: &Game) -> Result<(), LobbyError> {
        if game.player_exists(name) {
            warn!(player = name, "Name already seated");
            Err(LobbyError::new(LobbyErrorKind::NameTaken(name.to_string())))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the game still has a free seat.
pub struct SeatAvailable;

impl SeatAvailable {
    /// Checks the roster against the game's capacity.
    #[instrument(skip(game), fields(game = %game.name()))]
    pub fn check(game: &Game) -> Result<(), LobbyError> {
        if game.has_capacity() {
            Ok(())
        } else {
            warn!(seated = game.player_count(), "No free seat");
            Err(LobbyError::new(LobbyErrorKind::GameFull))
        }
    }
}

/// Precondition: a color and a coin set remain for a newcomer.
pub struct SeatUnassigned;

impl SeatUnassigned {
    /// Checks the game's allocator and coin pool.
    #[instrument(skip(game), fields(game = %game.name()))]
    pub fn check(game: &Game) -> Result<(), LobbyError> {
        if game.has_unassigned_seat() {
            Ok(())
        } else {
            warn!(remaining_coins = game.remaining_coins(), "Seats already handed out");
            Err(LobbyError::new(LobbyErrorKind::SeatsExhausted))
        }
    }
}

/// Composite precondition: the name is free and so is a seat.
pub struct LegalJoin;

impl LegalJoin {
    /// Validates all preconditions for a join.
    #[instrument(skip(game), fields(game = %game.name()))]
    pub fn check(name: &str, game: &Game) -> Result<(), LobbyError> {
        NameAvailable::check(name, game)?;
        SeatAvailable::check(game)?;
        SeatUnassigned::check(game)?;
        Ok(())
    }
}
