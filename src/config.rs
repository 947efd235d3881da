use std::time::Duration;

use crate::render::Style;
use crate::rule_set::B3S23;
use crate::rule_set::RuleSet;

/// Everything the driver needs to run a simulation once the first grid exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Number of generations to display, including the first. `0` runs until interrupted.
    pub generations: u64,

    /// Pause between two displayed generations
    pub delay: Duration,

    pub style: Style,
    pub rule: RuleSet,

    /// Compute generations on the rayon thread pool
    pub parallel: bool,

    /// Redraw in place on a cleared screen instead of printing frames one after another
    pub clear: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            generations: 10,
            delay: Duration::from_secs(1),
            style: Style::default(),
            rule: B3S23,
            parallel: false,
            clear: true,
        }
    }
}

impl SimulationConfig {
    /// Whether `generation` is the last one to display.
    pub fn is_last(&self, generation: u64) -> bool {
        self.generations != 0 && generation.saturating_add(1) >= self.generations
    }
}
