//! Seated players.

use super::coin::Coin;
use super::color::Color;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A participant seated in a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Player {
    /// Player name, unique within its game.
    name: String,
    /// Seat color.
    color: Color,
    /// The player's coins, all carrying `color`.
    coins: Vec<Coin>,
}

impl Player {
    /// Seats a player with its coin set.
    ///
    /// # Panics
    ///
    /// Panics unless `coins` holds exactly [`Coin::PER_COLOR`] coins, all
    /// stamped with `color`.
    #[instrument(skip(coins), fields(coin_count = coins.len()))]
    pub fn new(name: String, color: Color, coins: Vec<Coin>) -> Self {
        assert_eq!(
            coins.len(),
            Coin::PER_COLOR,
            "player {name} must own exactly {} coins",
            Coin::PER_COLOR
        );
        assert!(
            coins.iter().all(|coin| *coin.color() == Some(color)),
            "every coin of player {name} must be {color}"
        );
        Self { name, color, coins }
    }

    /// Snapshot used for progress polling.
    #[instrument(skip(self), fields(player = %self.name))]
    pub fn status(&self) -> PlayerStatus {
        PlayerStatus {
            name: self.name.clone(),
            color: self.color,
            coins: self.coins.clone(),
        }
    }
}

/// Point-in-time view of a player.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerStatus {
    /// Player name.
    name: String,
    /// Seat color.
    color: Color,
    /// Coins as seated.
    coins: Vec<Coin>,
}
