//! Exhaustive enumeration of every orientation and position of every word.
//!
//! Coordinates range over `0..=longest` on both axes, so the number of
//! candidates is `(2 * (longest + 1)^2)^words`. Only usable for a handful of
//! short words; serves as ground truth for the other engines.

use log::debug;
use rayon::iter::{ParallelBridge, ParallelIterator};

use crate::{
    layout::Layout,
    odometer::Odometer,
    placement::{Direction, Placement},
    progress::Progress,
    search::{Dedup, Parameters, Search, Solutions},
    validator,
    words::WordList,
};

/// One digit per word for its direction, then one per word for x, then one
/// per word for y. Directions turn fastest.
pub fn odometer(words: &WordList) -> Odometer {
    let n = words.len();
    let range = words.longest() + 1;
    let mut radices = vec![2; n];
    radices.extend(std::iter::repeat(range).take(2 * n));
    Odometer::new(radices)
}

/// Total number of candidates enumerated for `words`.
pub fn variant_count(words: &WordList) -> u128 {
    odometer(words).combinations()
}

/// Builds the candidate an odometer reading stands for.
pub fn layout_for(words: &WordList, digits: &[usize]) -> Layout {
    let n = words.len();
    let (directions, coordinates) = digits.split_at(n);
    let (xs, ys) = coordinates.split_at(n);

    words
        .iter()
        .zip(directions)
        .zip(xs.iter().zip(ys))
        .map(|((entry, direction), (x, y))| {
            Placement::of(
                entry.with_direction(Direction::from_digit(*direction)),
                *x as i32,
                *y as i32,
            )
        })
        .collect()
}

pub fn find_layouts<P: Progress + ?Sized>(
    words: &WordList,
    params: &Parameters,
    progress: &P,
) -> Solutions {
    let search = Search::new(params, progress, Dedup::Exact);
    debug!(
        "brute force over {} words, {} variants",
        words.len(),
        variant_count(words)
    );

    let evaluate = |digits: Vec<usize>| {
        let Some(iteration) = search.iteration() else {
            return;
        };
        let layout = layout_for(words, &digits);
        if validator::is_valid(&layout) {
            search.offer(&layout, iteration);
        }
        search.finish_iteration(iteration);
    };

    let readings = odometer(words)
        .readings()
        .take_while(|_| !search.is_done());
    if params.parallel {
        readings.par_bridge().for_each(evaluate);
    } else {
        readings.for_each(evaluate);
    }

    debug!("brute force finished after {} iterations", search.iterations());
    search.into_solutions()
}
