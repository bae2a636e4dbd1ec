//! Terminal demo: a random barrier field solved by all three algorithms.
//!
//! Run: cargo run --bin maze [seed]

use rand::SeedableRng;
use rand::rngs::StdRng;
use waygrid_core::Grid;
use waygrid_demos::{render, scatter_field};
use waygrid_search::{Algorithm, SearchEngine};

const ROWS: i32 = 15;
const PIXEL_WIDTH: i32 = 600;
const DENSITY: f64 = 0.2;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let seed = match std::env::args().nth(1) {
        Some(raw) => raw.parse::<u64>()?,
        None => 42,
    };

    let grid = Grid::new(ROWS, PIXEL_WIDTH)?;
    let mut rng = StdRng::seed_from_u64(seed);
    scatter_field(&grid, &mut rng, DENSITY)?;

    println!("{ROWS}x{ROWS} field, seed {seed}:\n{}", render(&grid));

    let mut engine = SearchEngine::new(ROWS);
    for algorithm in Algorithm::ALL {
        let mut steps = 0u64;
        let result = engine.run_marked(&grid, algorithm, || steps += 1)?;
        println!("{algorithm}: {result} ({steps} callback steps)");
        println!("{}", render(&grid));
    }
    Ok(())
}
