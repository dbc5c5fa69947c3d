//! First-class roster invariants.
//!
//! These are the properties every [`Game`] must satisfy between operations.
//! `Game` re-checks them after each mutation in debug builds; they can also
//! be checked directly.

use super::coin::Coin;
use super::game::Game;
use std::collections::HashSet;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>),+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !<$inv as Invariant<S>>::holds(state) {
                        violations.push(InvariantViolation::new(<$inv as Invariant<S>>::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);
impl_invariant_set!(I1, I2, I3, I4, I5);

/// Invariant: the roster never exceeds the game's capacity.
pub struct WithinCapacity;

impl Invariant<Game> for WithinCapacity {
    fn holds(game: &Game) -> bool {
        game.player_count() <= Game::CAPACITY
    }

    fn description() -> &'static str {
        "Seated players never exceed capacity"
    }
}

/// Invariant: no two seated players share a name.
pub struct UniqueNames;

impl Invariant<Game> for UniqueNames {
    fn holds(game: &Game) -> bool {
        let mut seen = HashSet::new();
        game.players().iter().all(|p| seen.insert(p.name().as_str()))
    }

    fn description() -> &'static str {
        "Player names are unique within a game"
    }
}

/// Invariant: no two seated players share a color.
pub struct UniqueColors;

impl Invariant<Game> for UniqueColors {
    fn holds(game: &Game) -> bool {
        let mut seen = HashSet::new();
        game.players().iter().all(|p| seen.insert(*p.color()))
    }

    fn description() -> &'static str {
        "Seat colors are unique within a game"
    }
}

/// Invariant: each player owns a full coin set in its own color.
pub struct CoinsMatchColor;

impl Invariant<Game> for CoinsMatchColor {
    fn holds(game: &Game) -> bool {
        game.players().iter().all(|p| {
            p.coins().len() == Coin::PER_COLOR
                && p.coins().iter().all(|c| *c.color() == Some(*p.color()))
        })
    }

    fn description() -> &'static str {
        "Every player owns exactly four coins of its own color"
    }
}

/// Invariant: the undistributed pool only ever shrinks in whole sets.
///
/// Coins of departed players are not returned, so the pool plus the seated
/// players' coins may fall short of a full pool but never exceed it.
pub struct PoolAccounting;

impl Invariant<Game> for PoolAccounting {
    fn holds(game: &Game) -> bool {
        let remaining = game.remaining_coins();
        let seated = game.player_count() * Coin::PER_COLOR;
        remaining % Coin::PER_COLOR == 0 && remaining + seated <= Coin::POOL_SIZE
    }

    fn description() -> &'static str {
        "Pool shrinks four coins per admitted player and never grows"
    }
}

/// All roster invariants as a composable set.
pub type RosterInvariants = (
    WithinCapacity,
    UniqueNames,
    UniqueColors,
    CoinsMatchColor,
    PoolAccounting,
);
