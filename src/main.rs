use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;

use crossfill::errors::GridError;
use crossfill::grid::Grid;
use crossfill::puzzle::Puzzle;
use crossfill::render;
use crossfill::solver::{SolveStatus, Solver};
use crossfill::word_list::WordList;

/// Crossword grid filler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the structure file ('_' marks a fillable cell, one row per line)
    structure: String,

    /// Path to the word list file (one word per line)
    words: String,

    /// Give up after this many seconds of search
    #[arg(short, long)]
    time_limit: Option<u64>,
}

/// Entry point of the crossfill CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them in a
/// user-friendly way before exiting with a nonzero code.
fn main() -> ExitCode {
    // Set up logging
    let debug_enabled = std::env::var("CROSSFILL_DEBUG").is_ok();
    crossfill::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        // Grid errors carry codes and help text; print those in full.
        if let Some(grid_err) = e.downcast_ref::<GridError>() {
            eprintln!("Error: {}", grid_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic for the crossfill CLI.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Load the structure file and derive the puzzle geometry.
/// 3. Load and normalize the word list.
/// 4. Solve, with an optional wall-clock budget.
/// 5. Print the filled grid on stdout, or "No solution.".
/// 6. Print performance metrics (timings, counts) on stderr.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let t_load = Instant::now();
    let grid = Grid::load_from_path(&cli.structure)?;
    let puzzle = Puzzle::from_grid(grid);
    let words = WordList::load_from_path(&cli.words)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    log::info!(
        "{} slots, {} candidate words",
        puzzle.slots().len(),
        words.len()
    );

    let budget = cli.time_limit.map(Duration::from_secs);
    let t_solve = Instant::now();
    let result = Solver::new(&puzzle, &words).solve_with_budget(budget);
    let solve_secs = t_solve.elapsed().as_secs_f64();

    match result.status {
        SolveStatus::Solved => {
            if let Some(solution) = &result.solution {
                print!("{}", render::to_text(&puzzle, solution));
            }
        }
        SolveStatus::Unsatisfiable => {
            println!("No solution.");
        }
        SolveStatus::TimedOut { elapsed } => {
            println!("No solution.");
            eprintln!(
                "⚠️  Gave up after {:.1}s; a longer --time-limit may find a fill",
                elapsed.as_secs_f64()
            );
        }
    }

    eprintln!(
        "Loaded {} words in {load_secs:.3}s; searched {} frames in {solve_secs:.3}s \
         ({} candidates pruned by propagation).",
        words.len(),
        result.stats.nodes_expanded,
        result.stats.pruned_by_length + result.stats.pruned_by_arcs,
    );

    Ok(())
}
