use std::{
    collections::HashSet,
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
};

use parking_lot::Mutex;

use crate::{
    layout::Layout,
    placement::{Direction, Placement},
    progress::Progress,
    words::Entry,
};

/// What the permutation search does with a word that cannot be anchored on
/// the partial layout built so far.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Unanchored {
    /// Abandon the partial layout.
    #[default]
    Discard,
    /// Keep the partial layout and try the word once more after every other
    /// word of the ordering has been placed.
    Defer,
}

#[derive(Clone, Debug)]
pub struct Parameters {
    pub min_crossings: usize,
    pub max_solutions: usize,
    /// Stop after this many iterations even if fewer solutions were found.
    pub max_iterations: Option<u64>,
    pub unanchored: Unanchored,
    /// Spread the outermost loop of an engine over the rayon thread pool.
    pub parallel: bool,
    /// Shuffles the start words of the backtracking placer.
    pub seed: Option<u64>,
}

impl Parameters {
    pub fn new(min_crossings: usize, max_solutions: usize) -> Self {
        Self {
            min_crossings,
            max_solutions,
            max_iterations: None,
            unanchored: Unanchored::Discard,
            parallel: false,
            seed: None,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_unanchored(mut self, unanchored: Unanchored) -> Self {
        self.unanchored = unanchored;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

/// When two accepted layouts count as the same solution.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Dedup {
    /// Same placements at the same coordinates, in any order.
    Exact,
    /// Same pattern anywhere on the grid. Accepted layouts are stored normalized.
    Translation,
}

/// Accepted layouts in the order they were found.
#[derive(Clone, Debug)]
pub struct Solutions {
    dedup: Dedup,
    layouts: Vec<Layout>,
    seen: HashSet<Layout>,
}

impl Solutions {
    pub fn new(dedup: Dedup) -> Self {
        Self {
            dedup,
            layouts: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn dedup(&self) -> Dedup {
        self.dedup
    }

    fn key(&self, layout: &Layout) -> Layout {
        match self.dedup {
            Dedup::Exact => layout.canonical(),
            Dedup::Translation => layout.normalized(),
        }
    }

    /// Returns false if an equal layout was already accepted.
    pub fn insert(&mut self, layout: &Layout) -> bool {
        let key = self.key(layout);
        if !self.seen.insert(key.clone()) {
            return false;
        }
        self.layouts.push(match self.dedup {
            Dedup::Exact => layout.clone(),
            Dedup::Translation => key,
        });
        true
    }

    pub fn contains(&self, layout: &Layout) -> bool {
        self.seen.contains(&self.key(layout))
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layout> {
        self.layouts.iter()
    }

    pub fn as_slice(&self) -> &[Layout] {
        &self.layouts
    }

    pub fn into_vec(self) -> Vec<Layout> {
        self.layouts
    }
}

impl IntoIterator for Solutions {
    type Item = Layout;
    type IntoIter = std::vec::IntoIter<Layout>;

    fn into_iter(self) -> Self::IntoIter {
        self.layouts.into_iter()
    }
}

impl<'a> IntoIterator for &'a Solutions {
    type Item = &'a Layout;
    type IntoIter = std::slice::Iter<'a, Layout>;

    fn into_iter(self) -> Self::IntoIter {
        self.layouts.iter()
    }
}

/// State shared by every branch of one engine run: the solutions found so
/// far, the iteration counter and the stop flag.
pub(crate) struct Search<'a, P: ?Sized> {
    params: &'a Parameters,
    progress: &'a P,
    solutions: Mutex<Solutions>,
    visited: Mutex<HashSet<Layout>>,
    iterations: AtomicU64,
    done: AtomicBool,
}

impl<'a, P: Progress + ?Sized> Search<'a, P> {
    pub(crate) fn new(params: &'a Parameters, progress: &'a P, dedup: Dedup) -> Self {
        Self {
            params,
            progress,
            solutions: Mutex::new(Solutions::new(dedup)),
            visited: Mutex::new(HashSet::new()),
            iterations: AtomicU64::new(0),
            done: AtomicBool::new(params.max_solutions == 0),
        }
    }

    pub(crate) fn params(&self) -> &Parameters {
        self.params
    }

    pub(crate) fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Claims the next iteration index, or `None` once the quota or the
    /// iteration budget is used up.
    pub(crate) fn iteration(&self) -> Option<u64> {
        if self.is_done() {
            return None;
        }
        let iteration = self.iterations.fetch_add(1, Ordering::Relaxed);
        if let Some(max) = self.params.max_iterations {
            if iteration >= max {
                self.done.store(true, Ordering::Relaxed);
                return None;
            }
        }
        Some(iteration)
    }

    pub(crate) fn finish_iteration(&self, iteration: u64) {
        self.progress.next_iteration(iteration);
    }

    /// Accepts an already validated layout if it has enough crossings and is
    /// new. Raises the stop flag once the quota is reached.
    pub(crate) fn offer(&self, layout: &Layout, iteration: u64) -> bool {
        let crossings = layout.crossing_count();
        if crossings < self.params.min_crossings {
            return false;
        }

        let mut solutions = self.solutions.lock();
        if solutions.len() >= self.params.max_solutions || !solutions.insert(layout) {
            return false;
        }
        self.progress.found_solution(layout, crossings, iteration);
        if solutions.len() >= self.params.max_solutions {
            self.done.store(true, Ordering::Relaxed);
        }
        true
    }

    /// Returns true the first time a layout, up to translation and order, is seen.
    pub(crate) fn first_visit(&self, layout: &Layout) -> bool {
        self.visited.lock().insert(layout.normalized())
    }

    pub(crate) fn iterations(&self) -> u64 {
        self.iterations.load(Ordering::Relaxed)
    }

    pub(crate) fn into_solutions(self) -> Solutions {
        self.solutions.into_inner()
    }
}

/// Every placement of `entry` that crosses an existing placement at a cell
/// currently covered by that placement alone and holding a letter of
/// `entry`. The new word always runs perpendicular to the one it crosses;
/// `direction` restricts it to one orientation. Candidates are not validated.
pub(crate) fn anchors(layout: &Layout, entry: &Entry, direction: Option<Direction>) -> Vec<Placement> {
    let mut anchors = Vec::new();
    for crossed in layout.placements() {
        let along = crossed.direction().other();
        if direction.is_some_and(|d| d != along) {
            continue;
        }
        for (x, y) in crossed.cells() {
            let covers = layout.characters_at(x, y);
            let [cover] = covers.as_slice() else {
                continue;
            };
            anchors.extend(
                entry
                    .positions_of(cover.letter)
                    .map(|index| Placement::through(entry.with_direction(along), index, x, y)),
            );
        }
    }
    anchors
}
