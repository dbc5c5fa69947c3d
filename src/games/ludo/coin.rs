//! Coins: the movable tokens each player owns.

use super::color::Color;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A single token on the board.
///
/// A coin starts uncolored in the game's pool and is stamped with a color
/// exactly once, when it is handed to a player.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    /// Coin number within its owner's set (1..=4).
    id: u8,
    /// Home slot on the board; negative and unique across a game's pool.
    home_position: i32,
    /// Owner's color, unset while the coin is still in the pool.
    color: Option<Color>,
}

impl Coin {
    /// Coins per color.
    pub const PER_COLOR: usize = 4;

    /// Size of a full pool (one set per palette color).
    pub const POOL_SIZE: usize = Self::PER_COLOR * Color::COUNT;

    /// Creates an uncolored coin.
    #[instrument]
    pub fn new(id: u8, home_position: i32) -> Self {
        Self {
            id,
            home_position,
            color: None,
        }
    }

    /// Builds the full pool for one game.
    ///
    /// Ids cycle 1..=4 and home positions run -1, -2, ... -16.
    #[instrument]
    pub fn pool() -> Vec<Coin> {
        (0..Self::POOL_SIZE)
            .map(|index| {
                let id = (index % Self::PER_COLOR) as u8 + 1;
                let home = -(index as i32) - 1;
                Coin::new(id, home)
            })
            .collect()
    }

    /// Stamps the coin with its owner's color.
    ///
    /// # Panics
    ///
    /// Panics if the coin already has a color.
    #[instrument(skip(self), fields(id = self.id, home = self.home_position))]
    pub fn assign_color(&mut self, color: Color) {
        assert!(
            self.color.is_none(),
            "coin {} at home {} is already colored",
            self.id,
            self.home_position
        );
        self.color = Some(color);
    }
}
