//! Game registry: creates games and looks them up by name.

use crate::error::{LobbyError, LobbyErrorKind};
use crate::games::ludo::{AllocatorFactory, Game, GameDetails, PaletteAllocator, Player};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Manages all games in the process.
///
/// The registry itself does no locking; callers that share it across tasks
/// serialize access (see [`crate::server::AppState`]).
#[derive(Debug)]
pub struct GamesManager {
    games: BTreeMap<String, Game>,
    allocator: AllocatorFactory,
}

impl GamesManager {
    /// Creates an empty registry whose games use the standard palette.
    #[instrument]
    pub fn new() -> Self {
        Self::with_allocator(PaletteAllocator::boxed)
    }

    /// Creates an empty registry whose games draw colors from `allocator`.
    #[instrument(skip(allocator))]
    pub fn with_allocator(allocator: AllocatorFactory) -> Self {
        info!("Creating games manager");
        Self {
            games: BTreeMap::new(),
            allocator,
        }
    }

    /// Creates and registers a new game.
    ///
    /// An existing game is never overwritten; a taken name is rejected.
    #[instrument(skip(self))]
    pub fn create_game(&mut self, name: &str) -> Result<&mut Game, LobbyError> {
        if self.games.contains_key(name) {
            warn!(game = name, "Game already exists");
            return Err(LobbyError::new(LobbyErrorKind::GameNameTaken(
                name.to_string(),
            )));
        }

        let game = Game::new(name.to_string(), (self.allocator)());
        info!(game = name, "Registered new game");
        Ok(self.games.entry(name.to_string()).or_insert(game))
    }

    /// True if a game with this name is registered.
    #[instrument(skip(self))]
    pub fn game_exists(&self, name: &str) -> bool {
        self.games.contains_key(name)
    }

    /// Gets a game by name.
    #[instrument(skip(self))]
    pub fn game(&self, name: &str) -> Option<&Game> {
        let game = self.games.get(name);
        if game.is_none() {
            debug!(game = name, "Game not found");
        }
        game
    }

    /// Gets a game by name for mutation.
    #[instrument(skip(self))]
    pub fn game_mut(&mut self, name: &str) -> Option<&mut Game> {
        self.games.get_mut(name)
    }

    /// Seats a player in the named game; `false` if the game is unknown or
    /// the join is rejected.
    #[instrument(skip(self))]
    pub fn add_player_to(&mut self, game: &str, player: &str) -> bool {
        self.try_add_player_to(game, player).is_ok()
    }

    /// Seats a player in the named game, reporting why a join failed.
    #[instrument(skip(self))]
    pub fn try_add_player_to(&mut self, game: &str, player: &str) -> Result<(), LobbyError> {
        let Some(entry) = self.games.get_mut(game) else {
            warn!(game, player, "Join requested for unknown game");
            return Err(LobbyError::new(LobbyErrorKind::GameNotFound(
                game.to_string(),
            )));
        };
        entry.try_add_player(player)?;
        Ok(())
    }

    /// Removes a player from the named game, dropping the game once nobody
    /// is left in it.
    #[instrument(skip(self))]
    pub fn remove_player_from(&mut self, game: &str, player: &str) -> Result<Player, LobbyError> {
        let Some(entry) = self.games.get_mut(game) else {
            return Err(LobbyError::new(LobbyErrorKind::GameNotFound(
                game.to_string(),
            )));
        };
        let Some(removed) = entry.remove_player(player) else {
            return Err(LobbyError::new(LobbyErrorKind::PlayerNotFound(
                player.to_string(),
            )));
        };
        self.remove_game_if_empty(game);
        Ok(removed)
    }

    /// Drops the named game if nobody is seated in it; returns whether it was
    /// dropped.
    #[instrument(skip(self))]
    pub fn remove_game_if_empty(&mut self, name: &str) -> bool {
        let empty = self.games.get(name).is_some_and(Game::is_empty);
        if empty {
            self.games.remove(name);
            info!(game = name, "Removed empty game");
        }
        empty
    }

    /// Games that have a creator and can still seat someone, by name.
    #[instrument(skip(self))]
    pub fn available_games(&self) -> Vec<GameDetails> {
        let games: Vec<_> = self
            .games
            .values()
            .filter(|game| game.has_capacity() && game.has_unassigned_seat())
            .filter_map(Game::details)
            .collect();
        debug!(count = games.len(), "Listed available games");
        games
    }

    /// Registered game names in order.
    #[instrument(skip(self))]
    pub fn game_names(&self) -> Vec<String> {
        self.games.keys().cloned().collect()
    }

    /// Number of registered games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// True when no game is registered.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl Default for GamesManager {
    fn default() -> Self {
        Self::new()
    }
}
