//! Incremental placement driven by every ordering of the words and every
//! assignment of directions.
//!
//! For one ordering the first word sits at the origin; each following word
//! branches over every cell where it can cross an already placed word of the
//! other direction. Branches whose extension fails validation are dropped.

use log::debug;
use rayon::iter::{ParallelBridge, ParallelIterator};

use crate::{
    layout::Layout,
    odometer::{factorial, Odometer, Permutations},
    placement::{Direction, Placement},
    progress::Progress,
    search::{anchors, Dedup, Parameters, Search, Solutions, Unanchored},
    validator,
    words::{Entry, WordList},
};

/// Distinct orderings times direction assignments, saturating. Repeated
/// words only count once per arrangement, as [`Permutations`] skips
/// orderings that merely swap equal words.
pub fn variant_count(words: &WordList) -> u128 {
    let mut entries = words.entries().to_vec();
    entries.sort();
    let orderings = entries
        .chunk_by(|a, b| a == b)
        .fold(factorial(entries.len()), |orderings, run| orderings / factorial(run.len()));
    orderings.saturating_mul(1u128.checked_shl(entries.len() as u32).unwrap_or(u128::MAX))
}

pub fn find_layouts<P: Progress + ?Sized>(
    words: &WordList,
    params: &Parameters,
    progress: &P,
) -> Solutions {
    let search = Search::new(params, progress, Dedup::Translation);
    let n = words.len();
    debug!("permutation search over {} words, {} variants", n, variant_count(words));

    let run = |order: Vec<Entry>| {
        let mut directions = Odometer::uniform(n, 2);
        loop {
            let Some(iteration) = search.iteration() else {
                return;
            };
            let assigned = order
                .iter()
                .zip(directions.digits())
                .map(|(entry, digit)| (entry, Direction::from_digit(*digit)))
                .collect::<Vec<_>>();

            for layout in build(&assigned, search.params().unanchored) {
                search.offer(&layout, iteration);
                if search.is_done() {
                    break;
                }
            }
            search.finish_iteration(iteration);

            if !directions.increment() {
                return;
            }
        }
    };

    let orderings = Permutations::new(words.entries().to_vec()).take_while(|_| !search.is_done());
    if params.parallel {
        orderings.par_bridge().for_each(run);
    } else {
        orderings.for_each(run);
    }

    debug!(
        "permutation search finished after {} iterations",
        search.iterations()
    );
    search.into_solutions()
}

#[derive(Clone, Debug)]
struct Branch<'w> {
    layout: Layout,
    deferred: Vec<(&'w Entry, Direction)>,
}

/// Every complete, valid layout reachable by placing the words in the given
/// order with the given directions.
fn build<'w>(words: &[(&'w Entry, Direction)], unanchored: Unanchored) -> Vec<Layout> {
    let Some(((first, direction), rest)) = words.split_first() else {
        return Vec::new();
    };
    let mut branches = vec![Branch {
        layout: Layout::from(Placement::of(first.with_direction(*direction), 0, 0)),
        deferred: Vec::new(),
    }];

    for (entry, direction) in rest {
        branches = grow(branches, *entry, *direction, unanchored);
        if branches.is_empty() {
            return Vec::new();
        }
    }

    branches.into_iter().flat_map(retry_deferred).collect()
}

fn grow<'w>(
    branches: Vec<Branch<'w>>,
    entry: &'w Entry,
    direction: Direction,
    unanchored: Unanchored,
) -> Vec<Branch<'w>> {
    let mut grown = Vec::new();
    for mut branch in branches {
        let before = grown.len();
        grown.extend(extensions(&branch.layout, entry, direction).map(|layout| Branch {
            layout,
            deferred: branch.deferred.clone(),
        }));
        if grown.len() == before && unanchored == Unanchored::Defer {
            branch.deferred.push((entry, direction));
            grown.push(branch);
        }
    }
    grown
}

fn retry_deferred(branch: Branch<'_>) -> Vec<Layout> {
    let mut layouts = vec![branch.layout];
    for (entry, direction) in branch.deferred {
        layouts = layouts
            .iter()
            .flat_map(|layout| extensions(layout, entry, direction))
            .collect();
    }
    layouts
}

/// Valid layouts extending `layout` by `entry` running in `direction`.
fn extensions<'a>(
    layout: &'a Layout,
    entry: &Entry,
    direction: Direction,
) -> impl Iterator<Item = Layout> + 'a {
    anchors(layout, entry, Some(direction))
        .into_iter()
        .map(move |placement| layout.with(placement))
        .filter(validator::is_valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        placement::Direction::{Horizontal, Vertical},
        progress::NoProgress,
    };

    #[test]
    fn variant_counts() {
        let one = WordList::new(["SUN"]).unwrap();
        let three = WordList::new(["SUN", "NUT", "TUB"]).unwrap();
        assert_eq!(variant_count(&one), 2);
        assert_eq!(variant_count(&three), 48);
    }

    #[test]
    fn repeated_words_count_distinct_orderings() {
        let words = WordList::new(["NUN", "SUN", "NUN", "NUN"]).unwrap();
        // 4! / 3! orderings, 2^4 direction assignments
        assert_eq!(variant_count(&words), 4 * 16);
        assert_eq!(
            Permutations::new(words.entries().to_vec()).count() as u128 * 16,
            variant_count(&words)
        );
    }

    #[test]
    fn build_branches_over_every_anchor() {
        let words = WordList::new(["SONNE", "NEUN"]).unwrap();
        let assigned = [(words.get(0), Horizontal), (words.get(1), Vertical)];

        // either N of NEUN on either N of SONNE, and the E of NEUN on the E
        let layouts = build(&assigned, Unanchored::Discard);
        assert!(layouts.iter().all(|l| validator::is_valid(l) && l.len() == 2));

        let mut anchors = layouts
            .iter()
            .map(|l| (l.get(1).x(), l.get(1).y(), l.get(1).direction()))
            .collect::<Vec<_>>();
        anchors.sort();
        assert_eq!(
            anchors,
            vec![
                (2, -3, Vertical),
                (2, 0, Vertical),
                (3, -3, Vertical),
                (3, 0, Vertical),
                (4, -1, Vertical),
            ]
        );
    }

    #[test]
    fn build_needs_perpendicular_words() {
        let words = WordList::new(["SONNE", "NEUN"]).unwrap();
        let assigned = [(words.get(0), Horizontal), (words.get(1), Horizontal)];

        assert!(build(&assigned, Unanchored::Discard).is_empty());
    }

    #[test]
    fn deferred_words_get_a_second_chance() {
        // ICE can only cross DICE, which comes after it
        let words = WordList::new(["AND", "ICE", "DICE"]).unwrap();
        let assigned = [
            (words.get(0), Horizontal),
            (words.get(1), Horizontal),
            (words.get(2), Vertical),
        ];

        assert!(build(&assigned, Unanchored::Discard).is_empty());

        let layouts = build(&assigned, Unanchored::Defer);
        assert!(!layouts.is_empty());
        assert!(layouts.iter().all(|l| l.len() == 3 && validator::is_valid(l)));
    }

    #[test]
    fn finds_hiking_pattern() {
        let words = WordList::new(["MAIWANDERUNG", "NEUN", "SONNE", "RADWEG", "BAZAR"]).unwrap();
        let params = Parameters::new(4, 1);
        let solutions = find_layouts(&words, &params, &NoProgress);

        assert_eq!(solutions.len(), 1);
        let layout = &solutions.as_slice()[0];
        assert!(validator::is_valid(layout));
        assert!(layout.crossing_count() >= 4);
        assert_eq!(layout, &layout.normalized());
    }

    #[test]
    fn solutions_are_distinct_patterns() {
        let words = WordList::new(["SUN", "NUT", "TUB"]).unwrap();
        let params = Parameters::new(1, usize::MAX);
        let solutions = find_layouts(&words, &params, &NoProgress);

        assert!(!solutions.is_empty());
        let mut normalized = solutions.iter().map(Layout::normalized).collect::<Vec<_>>();
        normalized.sort();
        normalized.dedup();
        assert_eq!(normalized.len(), solutions.len());
    }
}
