//! Identity colours.
//!
//! [`ColourAllocator`] maps a nickname to a small palette index so that the
//! same person keeps the same colour for the whole session, and across
//! restarts as long as the seed does not change. The free functions wrap text
//! in the matching ANSI escape sequences.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::ColourBoundError;

/// Default palette bound. Produces indices `1..=6`.
pub const DEFAULT_COLOUR_BOUND: u8 = 7;

/// Largest palette bound; indices map onto the eight ANSI foreground colours.
pub const MAX_COLOUR_BOUND: u8 = 8;

const MIN_COLOUR_BOUND: u8 = 2;

const ESC: char = '\x1b';

/// Deterministic, memoizing nickname colour allocator.
///
/// Index 0 is reserved and never handed out. The memo map only grows: the
/// number of distinct nicknames seen in one session is assumed to stay small,
/// so entries are never evicted.
#[derive(Debug, Clone)]
pub struct ColourAllocator {
    seed: i64,
    bound: u8,
    assigned: HashMap<String, u8>,
}

impl ColourAllocator {
    /// Allocator with the default palette bound.
    pub fn new(seed: i64) -> Self {
        Self { seed, bound: DEFAULT_COLOUR_BOUND, assigned: HashMap::new() }
    }

    /// Allocator producing indices in `1..bound`.
    pub fn with_bound(seed: i64, bound: u8) -> Result<Self, ColourBoundError> {
        if !(MIN_COLOUR_BOUND..=MAX_COLOUR_BOUND).contains(&bound) {
            return Err(ColourBoundError { bound });
        }
        Ok(Self { seed, bound, assigned: HashMap::new() })
    }

    /// Colour index for `name`.
    ///
    /// The first call for a name draws the index; later calls return the
    /// memoized value.
    pub fn allocate(&mut self, name: &str) -> u8 {
        if let Some(&index) = self.assigned.get(name) {
            return index;
        }

        let index = self.draw(name);
        self.assigned.insert(name.to_owned(), index);
        index
    }

    fn draw(&self, name: &str) -> u8 {
        let sum = name.chars().fold(0i64, |acc, c| acc.wrapping_add(i64::from(u32::from(c))));
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(sum) as u64);
        rng.gen_range(0..self.bound - 1) + 1
    }

    /// Configured seed.
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Exclusive upper bound of produced indices.
    pub fn bound(&self) -> u8 {
        self.bound
    }

    /// Number of names assigned so far.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    /// No name has been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

/// Wrap `text` in the foreground colour for `index`, followed by a reset.
pub fn paint(index: u8, text: &str) -> String {
    format!("{ESC}[3{index}m{text}{ESC}[0m")
}

/// Black text on the background colour for `index`, followed by a reset.
pub fn highlight(index: u8, text: &str) -> String {
    format!("{ESC}[30;4{index}m{text}{ESC}[0m")
}

/// Bold `text`, followed by a reset.
pub fn bold(text: &str) -> String {
    format!("{ESC}[1m{text}{ESC}[0m")
}
