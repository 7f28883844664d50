//! Arranges a list of words on a grid so that they only meet at single
//! crossing cells agreeing on the letter.
//!
//! Three engines produce candidate layouts, all certified by
//! [`validator::is_valid`]:
//!
//! - [`brute_force`] enumerates every position and direction of every word;
//! - [`permutation`] places words one by one for every ordering and every
//!   assignment of directions;
//! - [`backtrack`] crosses remaining words through letters already on the
//!   grid, depth first, until enough solutions are found.
//!
//! ```
//! use crossword_layout::{backtrack, NoProgress, Parameters, WordList};
//!
//! let words = WordList::new(["BAT", "BIT", "TIE", "TOE"]).unwrap();
//! let solutions = backtrack::find_layouts(&words, &Parameters::new(4, 1), &NoProgress);
//!
//! assert_eq!(solutions.len(), 1);
//! assert_eq!(solutions.as_slice()[0].render(), "BAT\nI I\nTOE\n");
//! ```

pub mod backtrack;
pub mod brute_force;
pub mod error;
pub mod layout;
pub mod odometer;
pub mod permutation;
pub mod placement;
pub mod progress;
pub mod search;
pub mod validator;
pub mod words;

pub use error::CrosswordError;
pub use layout::{BoundingBox, Layout};
pub use placement::{Direction, Placement, Word};
pub use progress::{LogProgress, NoProgress, Progress};
pub use search::{Dedup, Parameters, Solutions, Unanchored};
pub use words::{Entry, WordList};

/// The search engines, selectable at run time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Engine {
    BruteForce,
    Permutation,
    Backtrack,
}

impl Engine {
    pub fn find_layouts<P: Progress + ?Sized>(
        self,
        words: &WordList,
        params: &Parameters,
        progress: &P,
    ) -> Solutions {
        match self {
            Engine::BruteForce => brute_force::find_layouts(words, params, progress),
            Engine::Permutation => permutation::find_layouts(words, params, progress),
            Engine::Backtrack => backtrack::find_layouts(words, params, progress),
        }
    }

    /// Number of iterations the engine would run without stopping early, if
    /// it is known up front.
    pub fn variant_count(self, words: &WordList) -> Option<u128> {
        match self {
            Engine::BruteForce => Some(brute_force::variant_count(words)),
            Engine::Permutation => Some(permutation::variant_count(words)),
            Engine::Backtrack => None,
        }
    }
}
