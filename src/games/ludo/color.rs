//! Board colors and the allocators that hand them out.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt::Debug;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// A seat color on the ludo board.
///
/// Variant order is palette order: red is handed out first, yellow last.
#[derive(
    Debug,
    Display,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Red seat.
    #[display("red")]
    Red,
    /// Green seat.
    #[display("green")]
    Green,
    /// Blue seat.
    #[display("blue")]
    Blue,
    /// Yellow seat.
    #[display("yellow")]
    Yellow,
}

impl Color {
    /// Number of colors in the palette.
    pub const COUNT: usize = 4;

    /// Returns every color in palette order.
    #[instrument]
    pub fn palette() -> Vec<Color> {
        Color::iter().collect()
    }
}

/// Source of seat colors for a single game.
///
/// Each call to [`next_color`](ColorAllocator::next_color) removes a color
/// from the allocator for good. Callers must not ask for more colors than
/// [`remaining`](ColorAllocator::remaining) reports.
pub trait ColorAllocator: Debug + Send {
    /// Takes the next color.
    ///
    /// # Panics
    ///
    /// Panics when the allocator is exhausted.
    fn next_color(&mut self) -> Color;

    /// Number of colors still available.
    fn remaining(&self) -> usize;
}

/// Builds a fresh allocator for each new game.
pub type AllocatorFactory = fn() -> Box<dyn ColorAllocator>;

/// Hands out the palette in order: red, green, blue, yellow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteAllocator {
    colors: VecDeque<Color>,
}

impl PaletteAllocator {
    /// Creates an allocator holding the full palette.
    #[instrument]
    pub fn new() -> Self {
        Self {
            colors: Color::iter().collect(),
        }
    }

    /// Creates a boxed allocator, usable as an [`AllocatorFactory`].
    #[instrument]
    pub fn boxed() -> Box<dyn ColorAllocator> {
        Box::new(Self::new())
    }
}

impl Default for PaletteAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorAllocator for PaletteAllocator {
    #[instrument(skip(self), fields(remaining = self.colors.len()))]
    fn next_color(&mut self) -> Color {
        let Some(color) = self.colors.pop_front() else {
            panic!(
                "color palette exhausted: a game never seats more than {} players",
                Color::COUNT
            );
        };
        debug!(%color, "Allocated color");
        color
    }

    fn remaining(&self) -> usize {
        self.colors.len()
    }
}
