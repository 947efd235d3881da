use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::cell::Cell;
use crate::grid::Grid;
use crate::grid::GridError;
use crate::grid::cell_count;

/// How to build a random first generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedConfig {
    /// Side of the square grid
    pub side: usize,

    /// Probability for each cell, independently, to start alive
    pub density: f64,

    /// Fixed RNG seed. `None` draws one from the OS, so every run differs.
    pub seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            side: 10,
            density: 0.5,
            seed: None,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SeedError {
    #[error("Grid side must be at least 1")]
    ZeroSide,

    #[error("Density must be within [0, 1], got {0}")]
    Density(f64),

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl SeedConfig {
    pub fn validate(&self) -> Result<(), SeedError> {
        if self.side == 0 {
            return Err(SeedError::ZeroSide);
        }

        // also rejects NaN
        if !(0.0..=1.0).contains(&self.density) {
            return Err(SeedError::Density(self.density));
        }

        Ok(())
    }
}

/// Build a random grid from `config`.
pub fn random_grid(config: &SeedConfig) -> Result<Grid, SeedError> {
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    random_grid_with(config.side, config.density, &mut rng)
}

/// Build a random grid, drawing from a caller-owned RNG.
pub fn random_grid_with<R>(side: usize, density: f64, rng: &mut R) -> Result<Grid, SeedError>
where
    R: Rng + ?Sized,
{
    SeedConfig {
        side,
        density,
        seed: None,
    }
    .validate()?;

    let cells = (0..cell_count(side)?)
        .map(|_| Cell::from(rng.random_bool(density)))
        .collect();

    Ok(Grid::from_cells(side, cells)?)
}
