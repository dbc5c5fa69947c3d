//! Ludo Lobby library - game session setup for multiplayer ludo
//!
//! This library manages who sits where before a ludo game starts: it
//! creates named games, seats up to four players, hands each a color and
//! four coins, and reports seating and progress snapshots.
//!
//! # Architecture
//!
//! - **Games**: coins, colors, players and the [`Game`] that owns them
//! - **Session**: the [`GamesManager`] registry of games by name
//! - **Server**: a thin HTTP layer over a shared registry
//!
//! # Example
//!
//! ```
//! use ludo_lobby::{Color, GamesManager};
//!
//! let mut games = GamesManager::new();
//! games.create_game("ludo").unwrap();
//! assert!(games.add_player_to("ludo", "ashish"));
//! assert!(games.add_player_to("ludo", "joy"));
//!
//! let board = games.game("ludo").unwrap().board_status();
//! assert_eq!(board.get(Color::Red), Some("ashish"));
//! assert_eq!(board.get(Color::Green), Some("joy"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod games;
pub mod server;
pub mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Errors
pub use error::{LobbyError, LobbyErrorKind};

// Crate-level exports - Session management
pub use session::GamesManager;

// Crate-level exports - Server
pub use server::{AppState, Identity, router};

// Crate-level exports - Game types (ludo)
pub use games::ludo::{
    AllocatorFactory, BoardStatus, Coin, Color, ColorAllocator, Game, GameDetails, GamePhase,
    GameStatus, PaletteAllocator, Player, PlayerStatus,
};
