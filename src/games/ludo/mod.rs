//! Ludo seating: coins, colors, players and the game that owns them.

mod coin;
mod color;
pub mod contracts;
mod game;
pub mod invariants;
mod player;

pub use coin::Coin;
pub use color::{AllocatorFactory, Color, ColorAllocator, PaletteAllocator};
pub use game::{BoardStatus, Game, GameDetails, GamePhase, GameStatus};
pub use player::{Player, PlayerStatus};
