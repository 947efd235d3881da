use std::fs;
use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use clap::ValueEnum;
use tracing::debug;
use tracing::info;

use torlife::config::SimulationConfig;
use torlife::grid::Grid;
use torlife::pattern;
use torlife::render::Renderer;
use torlife::render::Style;
use torlife::rule_set::RuleSet;
use torlife::seed;
use torlife::seed::SeedConfig;
use torlife::simulation::Simulation;

use events::Event;
use term::Screen;

mod events;
mod logging;
mod term;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    /// `O` for live cells, `.` for dead ones
    Glyphs,
    /// `1` and `0`
    Digits,
    /// Braille dots, 2x4 cells per character
    Braille,
}

impl From<StyleArg> for Style {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Glyphs => Style::default(),
            StyleArg::Digits => Style::Digits,
            StyleArg::Braille => Style::Braille,
        }
    }
}

/// Conway's Game of Life on a toroidal grid
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Side of the square grid
    #[arg(short = 'n', long, default_value_t = 10)]
    size: usize,

    /// Probability for each cell to start alive
    #[arg(short, long, default_value_t = 0.5)]
    density: f64,

    /// Seed for the random first generation
    #[arg(long)]
    seed: Option<u64>,

    /// Generations to display, including the first. 0 runs until interrupted
    #[arg(short, long, default_value_t = 10)]
    generations: u64,

    /// Pause between generations, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Start from an RLE (or plaintext `.cells`) pattern instead of a random grid
    #[arg(short, long)]
    pattern: Option<PathBuf>,

    /// Rulestring such as B3/S23. Defaults to the pattern's rule, then to Conway's
    #[arg(short, long)]
    rule: Option<RuleSet>,

    #[arg(short, long, value_enum, default_value_t = StyleArg::Glyphs)]
    style: StyleArg,

    /// Compute each generation on all cores
    #[arg(long)]
    parallel: bool,

    /// Print frames one after another instead of redrawing the screen
    #[arg(long)]
    no_clear: bool,
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let args = Args::parse();
    let (grid, pattern_rule) = initial_grid(&args)?;

    let config = SimulationConfig {
        generations: args.generations,
        delay: Duration::from_millis(args.delay_ms),
        style: args.style.into(),
        rule: args.rule.or(pattern_rule).unwrap_or_default(),
        parallel: args.parallel,
        clear: !args.no_clear,
    };

    info!(
        side = grid.side(),
        population = grid.population(),
        rule = %config.rule,
        generations = config.generations,
        "Starting simulation"
    );

    let sim = Simulation::with_rule(grid, config.rule).parallel(config.parallel);

    if config.clear {
        run_screen(sim, &config)
    } else {
        run_plain(sim, &config)
    }
}

/// The first generation, and the rule named by the pattern file if there is one
fn initial_grid(args: &Args) -> anyhow::Result<(Grid, Option<RuleSet>)> {
    let Some(path) = &args.pattern else {
        let config = SeedConfig {
            side: args.size,
            density: args.density,
            seed: args.seed,
        };

        let grid = seed::random_grid(&config).context("Failed to seed the first generation")?;

        return Ok((grid, None));
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pattern {}", path.display()))?;

    let pattern = if path.extension().is_some_and(|ext| ext == "cells") {
        pattern::read_plaintext(&text)
    } else {
        pattern::read_rle(&text)
    }
    .with_context(|| format!("Failed to parse pattern {}", path.display()))?;

    info!(
        name = pattern.name.as_deref().unwrap_or("unnamed"),
        width = pattern.width,
        height = pattern.height,
        "Loaded pattern"
    );

    let grid = pattern
        .centered(args.size)
        .context("Failed to place pattern")?;

    Ok((grid, pattern.rule))
}

fn status(sim: &Simulation, paused: bool) -> String {
    let mut line = format!(
        "generation {}, population {}, rule {}",
        sim.generation(),
        sim.current().population(),
        sim.rules()
    );

    if sim.is_stable() {
        line.push_str(", stable");
    }

    if paused {
        line.push_str(" (paused)");
    }

    line
}

fn step(sim: &mut Simulation) {
    let population = sim.step().population();
    debug!(generation = sim.generation(), population, "Stepped");
}

/// Step on request while paused, unless the last generation is already showing.
fn step_by_hand(sim: &mut Simulation, config: &SimulationConfig, paused: bool) -> bool {
    if !paused || config.is_last(sim.generation()) {
        return false;
    }

    step(sim);
    true
}

/// Redraw in place. `q` quits, space pauses, `n` steps while paused.
fn run_screen(mut sim: Simulation, config: &SimulationConfig) -> anyhow::Result<()> {
    let mut renderer = Renderer::new(config.style);
    let mut screen = Screen::enter().context("Failed to set up the terminal")?;
    let mut paused = false;

    loop {
        screen.draw(&status(&sim, paused), renderer.render(sim.current()))?;

        match term::wait(config.delay)? {
            Some(Event::Quit) => break,
            Some(Event::TogglePause) => {
                paused = !paused;
                continue;
            }
            Some(Event::Step) => {
                step_by_hand(&mut sim, config, paused);
                continue;
            }
            None => {}
        }

        if paused {
            continue;
        }

        if config.is_last(sim.generation()) {
            break;
        }

        step(&mut sim);
    }

    Ok(())
}

/// Print each generation below the previous one
fn run_plain(mut sim: Simulation, config: &SimulationConfig) -> anyhow::Result<()> {
    let mut renderer = Renderer::new(config.style);
    let mut stdout = io::stdout().lock();

    loop {
        writeln!(stdout, "{}", status(&sim, false))?;
        writeln!(stdout, "{}", renderer.render(sim.current()))?;
        stdout.flush()?;

        if config.is_last(sim.generation()) {
            break;
        }

        thread::sleep(config.delay);
        step(&mut sim);
    }

    Ok(())
}
