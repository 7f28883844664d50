//! Depth-first placement anchored on letters already on the grid.
//!
//! A state is a partial layout; a transition crosses one more remaining word
//! through a cell currently covered by a single placement. Word sets only
//! grow, so the search is acyclic. Partial layouts already explored (up to
//! translation and insertion order) are not explored again, and the whole
//! traversal stops as soon as the requested number of solutions is reached.

use log::debug;
use nanorand::{Rng, WyRand};
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    layout::Layout,
    placement::{Direction, Placement},
    progress::Progress,
    search::{anchors, Dedup, Parameters, Search, Solutions},
    validator,
    words::{Entry, WordList},
};

/// Starts every word at the origin in both directions and places the rest
/// around it.
pub fn find_layouts<P: Progress + ?Sized>(
    words: &WordList,
    params: &Parameters,
    progress: &P,
) -> Solutions {
    let search = Search::new(params, progress, Dedup::Translation);

    let mut order = (0..words.len()).collect::<Vec<_>>();
    if let Some(seed) = params.seed {
        WyRand::new_seed(seed).shuffle(&mut order);
    }
    let starts = order
        .iter()
        .flat_map(|index| Direction::ALL.map(|direction| (*index, direction)))
        .collect::<Vec<_>>();
    debug!("backtracking over {} words from {} starts", words.len(), starts.len());

    let run = |&(index, direction): &(usize, Direction)| {
        if search.is_done() {
            return;
        }
        let start = Placement::of(words.get(index).with_direction(direction), 0, 0);
        let remaining = order
            .iter()
            .filter(|i| **i != index)
            .map(|i| words.get(*i))
            .collect::<Vec<_>>();
        descend(&search, Layout::from(start), &remaining, 0);
    };

    if params.parallel {
        starts.par_iter().for_each(run);
    } else {
        starts.iter().for_each(run);
    }

    debug!("backtracking finished after {} validity checks", search.iterations());
    search.into_solutions()
}

/// Completes `layout` with every word of `remaining`. Returns nothing if
/// `layout` is empty or not valid itself.
pub fn place<P: Progress + ?Sized>(
    layout: Layout,
    remaining: &[Entry],
    params: &Parameters,
    progress: &P,
) -> Solutions {
    let search = Search::new(params, progress, Dedup::Translation);
    if !layout.is_empty() && validator::is_valid(&layout) {
        let remaining = remaining.iter().collect::<Vec<_>>();
        descend(&search, layout, &remaining, 0);
    }
    search.into_solutions()
}

fn descend<P: Progress + ?Sized>(
    search: &Search<'_, P>,
    layout: Layout,
    remaining: &[&Entry],
    iteration: u64,
) {
    if search.is_done() || !search.first_visit(&layout) {
        return;
    }
    if remaining.is_empty() {
        search.offer(&layout, iteration);
        return;
    }

    for (k, entry) in remaining.iter().enumerate() {
        let rest = remaining
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != k)
            .map(|(_, e)| *e)
            .collect::<Vec<_>>();

        for placement in anchors(&layout, entry, None) {
            let Some(iteration) = search.iteration() else {
                return;
            };
            let extended = layout.with(placement);
            let valid = validator::is_valid(&extended);
            search.finish_iteration(iteration);

            if valid {
                descend(search, extended, &rest, iteration);
            }
            if search.is_done() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;
    use crate::{
        placement::Direction::{Horizontal, Vertical},
        progress::NoProgress,
    };

    #[derive(Default)]
    struct Counting {
        found: AtomicU64,
        iterations: AtomicU64,
    }

    impl Progress for Counting {
        fn found_solution(&self, _layout: &Layout, _crossings: usize, _iteration: u64) {
            self.found.fetch_add(1, Ordering::Relaxed);
        }

        fn next_iteration(&self, _iteration: u64) {
            self.iterations.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn rectangle_words() -> WordList {
        WordList::new(["BAT", "BIT", "TIE", "TOE"]).unwrap()
    }

    fn hiking_words() -> WordList {
        WordList::new(["MAIWANDERUNG", "NEUN", "SONNE", "RADWEG", "BAZAR"]).unwrap()
    }

    #[test]
    fn finds_the_rectangle() {
        let params = Parameters::new(4, 1);
        let solutions = find_layouts(&rectangle_words(), &params, &NoProgress);

        assert_eq!(solutions.len(), 1);
        let layout = &solutions.as_slice()[0];
        assert!(validator::is_valid(layout));
        assert_eq!(layout.len(), 4);
        assert_eq!(layout.crossing_count(), 4);
    }

    #[test]
    fn finds_a_five_word_layout() {
        let params = Parameters::new(4, 1);
        let solutions = find_layouts(&hiking_words(), &params, &NoProgress);

        assert_eq!(solutions.len(), 1);
        let layout = &solutions.as_slice()[0];
        assert!(validator::is_valid(layout));
        assert_eq!(layout.len(), 5);
        assert!(layout.crossing_count() >= 4);
    }

    #[test]
    fn observer_sees_every_solution() {
        let params = Parameters::new(4, 3);
        let progress = Counting::default();
        let solutions = find_layouts(&rectangle_words(), &params, &progress);

        assert_eq!(progress.found.load(Ordering::Relaxed), solutions.len() as u64);
        assert!(progress.iterations.load(Ordering::Relaxed) > 0);
    }

    #[test]
    fn place_continues_a_partial_layout() {
        let words = WordList::new(["SONNE", "RADWEG", "BAZAR"]).unwrap();
        let partial = Layout::from_iter([
            Placement::new("MAIWANDERUNG", 0, 4, Horizontal),
            Placement::new("NEUN", 10, 4, Vertical),
        ]);
        let params = Parameters::new(4, usize::MAX);
        let solutions = place(partial, words.entries(), &params, &NoProgress);

        assert!(!solutions.is_empty());
        assert!(solutions.contains(&crate::layout::tests::hiking()));
        for layout in &solutions {
            assert_eq!(layout.len(), 5);
            assert!(validator::is_valid(layout));
            assert!(layout.crossing_count() >= 4);
        }
    }

    #[test]
    fn place_rejects_invalid_start() {
        let words = WordList::new(["SUN"]).unwrap();
        let partial = Layout::from_iter([
            Placement::new("AB", 0, 0, Horizontal),
            Placement::new("CD", 0, 1, Horizontal),
        ]);
        let params = Parameters::new(0, usize::MAX);

        assert!(place(partial, words.entries(), &params, &NoProgress).is_empty());
    }

    #[test]
    fn no_remaining_words_returns_the_layout() {
        let layout = crate::layout::tests::hiking();
        let params = Parameters::new(4, usize::MAX);
        let solutions = place(layout.clone(), &[], &params, &NoProgress);

        assert_eq!(solutions.as_slice(), &[layout.normalized()]);
        assert!(place(layout, &[], &Parameters::new(5, 10), &NoProgress).is_empty());
    }

    #[test]
    fn unplaceable_word_yields_nothing() {
        let words = WordList::new(["SUN", "XYZ"]).unwrap();
        let params = Parameters::new(0, usize::MAX);

        assert!(find_layouts(&words, &params, &NoProgress).is_empty());
    }

    #[test]
    fn seeded_order_is_repeatable() {
        let params = Parameters::new(4, 2).with_seed(7);
        let first = find_layouts(&rectangle_words(), &params, &NoProgress);
        let second = find_layouts(&rectangle_words(), &params, &NoProgress);

        assert_eq!(first.as_slice(), second.as_slice());
    }

    #[test]
    fn extending_never_loses_crossings() {
        let words = hiking_words();
        let base = Layout::from(Placement::of(words.get(0).with_direction(Horizontal), 0, 0));
        let mut frontier = vec![(base.clone(), words.entries()[1..].to_vec())];

        for depth in 1..=3 {
            let mut next = Vec::new();
            let mut seen = std::collections::HashSet::new();
            for (layout, remaining) in &frontier {
                for (k, entry) in remaining.iter().enumerate() {
                    for placement in anchors(layout, entry, None) {
                        let extended = layout.with(placement);
                        if !validator::is_valid(&extended) {
                            continue;
                        }
                        assert!(extended.crossing_count() > layout.crossing_count());
                        if seen.insert(extended.normalized()) {
                            let mut rest = remaining.clone();
                            rest.remove(k);
                            next.push((extended, rest));
                        }
                    }
                }
            }
            assert!(!next.is_empty(), "no valid layout at depth {depth}");
            frontier = next;
        }

        let params = Parameters::new(4, 1);
        assert!(!place(base, &words.entries()[1..], &params, &NoProgress).is_empty());
    }
}
