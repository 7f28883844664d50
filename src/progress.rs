use log::info;

use crate::layout::Layout;

/// Observer of a running search. Purely informational: nothing it does feeds
/// back into the engine.
pub trait Progress: Sync {
    fn found_solution(&self, layout: &Layout, crossings: usize, iteration: u64);

    fn next_iteration(&self, iteration: u64);
}

/// Ignores everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn found_solution(&self, _layout: &Layout, _crossings: usize, _iteration: u64) {}

    fn next_iteration(&self, _iteration: u64) {}
}

/// Reports through the `log` facade.
#[derive(Clone, Debug)]
pub struct LogProgress {
    total: Option<u128>,
    every: u64,
}

impl LogProgress {
    pub fn new(total: Option<u128>) -> Self {
        Self { total, every: 100 }
    }

    /// Logs every `every` iterations instead of every 100.
    pub fn every(mut self, every: u64) -> Self {
        self.every = every.max(1);
        self
    }
}

impl Progress for LogProgress {
    fn found_solution(&self, layout: &Layout, crossings: usize, iteration: u64) {
        info!(
            "Found solution ({} crosses, iterations={}):\n===============\n{}===============",
            crossings, iteration, layout
        );
    }

    fn next_iteration(&self, iteration: u64) {
        if iteration == 0 || iteration % self.every != 0 {
            return;
        }
        match self.total {
            Some(total) => info!("Searched {} of {} variants.", iteration, total),
            None => info!("Searched {} variants.", iteration),
        }
    }
}
