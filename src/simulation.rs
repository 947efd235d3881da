use std::mem;

use crate::grid::Grid;
use crate::rule_set::B3S23;
use crate::rule_set::RuleSet;
use crate::step;

/// A running simulation: the current generation plus a spare buffer of the same side.
///
/// Each step writes the successor into the spare buffer and swaps the two, so a long run
/// allocates exactly two grids. The grid being read is never the one being written.
#[derive(Debug, Clone)]
pub struct Simulation {
    current: Grid,
    spare: Grid,
    rules: RuleSet,
    parallel: bool,
    generation: u64,

    /// Whether the last step left the grid unchanged
    stable: bool,
}

impl Simulation {
    /// Start a Conway simulation from `grid`, which becomes generation 0.
    pub fn new(grid: Grid) -> Self {
        Self::with_rule(grid, B3S23)
    }

    pub fn with_rule(grid: Grid, rules: RuleSet) -> Self {
        let spare = grid.dead_like();

        Self {
            current: grid,
            spare,
            rules,
            parallel: false,
            generation: 0,
            stable: false,
        }
    }

    /// Compute each generation on the rayon thread pool
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    /// `true` once a step produced the same grid it started from: a still life, or nothing
    /// left alive.
    pub fn is_stable(&self) -> bool {
        self.stable
    }

    /// Advance by one generation
    pub fn step(&mut self) -> &Grid {
        step::advance(&self.current, &self.rules, &mut self.spare, self.parallel);
        mem::swap(&mut self.current, &mut self.spare);

        self.generation += 1;
        self.stable = self.current == self.spare;

        &self.current
    }

    /// Advance by `n` generations
    pub fn advance(&mut self, n: u64) -> &Grid {
        for _ in 0..n {
            self.step();
        }

        &self.current
    }

    /// The generation sequence, starting with the current grid. The iterator never ends on its
    /// own, bound it with [`Iterator::take`].
    pub fn generations(self) -> Generations {
        Generations {
            sim: self,
            started: false,
        }
    }
}

pub struct Generations {
    sim: Simulation,
    started: bool,
}

impl Iterator for Generations {
    type Item = Grid;

    fn next(&mut self) -> Option<Grid> {
        if self.started {
            self.sim.step();
        }

        self.started = true;

        Some(self.sim.current.clone())
    }
}
