//! A single ludo game: its seats, coin pool and color allocator.

use super::coin::Coin;
use super::color::{Color, ColorAllocator};
use super::contracts::LegalJoin;
use super::invariants::{InvariantSet, RosterInvariants};
use super::player::{Player, PlayerStatus};
use crate::error::LobbyError;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use tracing::{debug, info, instrument, warn};

/// Seating phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Nobody is seated; the registry discards games in this phase.
    Empty,
    /// Some seats are taken, at least one is free.
    Forming,
    /// Every seat is taken.
    Full,
}

/// Progress snapshot: each seated player's status in join order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameStatus {
    /// Player snapshots in join order.
    players: Vec<PlayerStatus>,
}

/// Which player sits at which color.
///
/// Serializes as a JSON object keyed by color name, in palette order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardStatus(BTreeMap<Color, String>);

impl BoardStatus {
    /// Name of the player seated at `color`, if any.
    pub fn get(&self, color: Color) -> Option<&str> {
        self.0.get(&color).map(String::as_str)
    }

    /// Number of occupied seats.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no seat is occupied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Occupied seats in palette order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &str)> {
        self.0.iter().map(|(color, name)| (*color, name.as_str()))
    }
}

/// Summary shown in game listings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct GameDetails {
    /// Game name.
    name: String,
    /// Seats still open.
    remain: usize,
    /// Longest-seated player.
    #[serde(rename = "createdBy")]
    created_by: String,
}

/// A game session with a bounded set of seats.
#[derive(Debug)]
pub struct Game {
    name: String,
    players: Vec<Player>,
    coins: VecDeque<Coin>,
    allocator: Box<dyn ColorAllocator>,
    status: GameStatus,
}

impl Game {
    /// Seats per game.
    pub const CAPACITY: usize = Color::COUNT;

    /// Creates an empty game with a full coin pool.
    #[instrument(skip(allocator))]
    pub fn new(name: String, allocator: Box<dyn ColorAllocator>) -> Self {
        info!(game = %name, "Creating new game");
        Self {
            name,
            players: Vec::new(),
            coins: Coin::pool().into(),
            allocator,
            status: GameStatus::default(),
        }
    }

    /// Game name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seated players in join order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of seated players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// True when nobody is seated.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Coins not yet handed to any player.
    pub fn remaining_coins(&self) -> usize {
        self.coins.len()
    }

    /// True while at least one seat is free.
    #[instrument(skip(self), fields(game = %self.name))]
    pub fn has_capacity(&self) -> bool {
        self.players.len() < Self::CAPACITY
    }

    /// Seats still free.
    #[instrument(skip(self), fields(game = %self.name))]
    pub fn players_needed(&self) -> usize {
        Self::CAPACITY.saturating_sub(self.players.len())
    }

    /// Current seating phase.
    #[instrument(skip(self), fields(game = %self.name))]
    pub fn phase(&self) -> GamePhase {
        if self.players.is_empty() {
            GamePhase::Empty
        } else if self.has_capacity() {
            GamePhase::Forming
        } else {
            GamePhase::Full
        }
    }

    /// True when a color and a coin set are still available for a newcomer.
    ///
    /// Departed players keep their color and coins, so a game that has
    /// already seated four players never seats a fifth even after a seat
    /// frees up.
    #[instrument(skip(self), fields(game = %self.name))]
    pub fn has_unassigned_seat(&self) -> bool {
        self.allocator.remaining() > 0 && self.coins.len() >= Coin::PER_COLOR
    }

    /// Case-sensitive membership test.
    #[instrument(skip(self), fields(game = %self.name))]
    pub fn player_exists(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name() == name)
    }

    /// Seats a player; returns `false` without changing anything when the
    /// name is taken or no seat is free.
    #[instrument(skip(self), fields(game = %self.name))]
    pub fn add_player(&mut self, name: &str) -> bool {
        self.try_add_player(name).is_ok()
    }

    /// Seats a player, reporting why a rejected join was refused.
    #[instrument(skip(self), fields(game = %self.name))]
    pub fn try_add_player(&mut self, name: &str) -> Result<&Player, LobbyError> {
        LegalJoin::check(name, self)?;

        let color = self.allocator.next_color();
        let coins = self.withdraw_coins(color);
        let seat = self.players.len();
        self.players.push(Player::new(name.to_string(), color, coins));
        self.refresh_status();

        info!(
            player = name,
            %color,
            seated = self.players.len(),
            "Player joined"
        );
        Ok(&self.players[seat])
    }

    /// Removes a player from the roster.
    ///
    /// The player's color and coins are not returned to the game. Returns
    /// `None` and leaves the game untouched when no such player is seated.
    #[instrument(skip(self), fields(game = %self.name))]
    pub fn remove_player(&mut self, name: &str) -> Option<Player> {
        let Some(index) = self.players.iter().position(|p| p.name() == name) else {
            warn!(player = name, "Cannot remove unknown player");
            return None;
        };
        let player = self.players.remove(index);
        self.refresh_status();

        info!(player = name, remaining = self.players.len(), "Player left");
        Some(player)
    }

    /// Looks up a seated player by exact name.
    #[instrument(skip(self), fields(game = %self.name))]
    pub fn player(&self, name: &str) -> Option<&Player> {
        let player = self.players.iter().find(|p| p.name() == name);
        if player.is_none() {
            debug!(player = name, "Player not found in game");
        }
        player
    }

    /// Color-to-player seating, built from the current roster.
    #[instrument(skip(self), fields(game = %self.name))]
    pub fn board_status(&self) -> BoardStatus {
        BoardStatus(
            self.players
                .iter()
                .map(|p| (*p.color(), p.name().clone()))
                .collect(),
        )
    }

    /// Progress snapshot as of the last roster change.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Listing summary; `None` until somebody has joined.
    ///
    /// `created_by` names the longest-seated player, so it moves on to the
    /// next player when the original creator leaves.
    #[instrument(skip(self), fields(game = %self.name))]
    pub fn details(&self) -> Option<GameDetails> {
        let creator = self.players.first()?;
        Some(GameDetails::new(
            self.name.clone(),
            self.players_needed(),
            creator.name().clone(),
        ))
    }

    fn withdraw_coins(&mut self, color: Color) -> Vec<Coin> {
        self.coins
            .drain(..Coin::PER_COLOR)
            .map(|mut coin| {
                coin.assign_color(color);
                coin
            })
            .collect()
    }

    fn refresh_status(&mut self) {
        self.status = GameStatus {
            players: self.players.iter().map(Player::status).collect(),
        };
        debug_assert!(
            RosterInvariants::check_all(self).is_ok(),
            "roster invariants violated in game {}: {:?}",
            self.name,
            RosterInvariants::check_all(self)
        );
    }
}
