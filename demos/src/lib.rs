//! Shared helpers for the demo binaries: random field generation and a
//! plain-text renderer over the grid iterator.

use rand::{Rng, RngExt};
use waygrid_core::{CellState, Grid, GridError, Pos};

/// One glyph per cell state.
pub fn glyph(state: CellState) -> char {
    match state {
        CellState::Empty => '.',
        CellState::Barrier => '#',
        CellState::Start => 'A',
        CellState::End => 'B',
        CellState::Frontier => '+',
        CellState::Visited => 'o',
        CellState::Path => '*',
    }
}

/// Render the whole grid as text, one row per line.
pub fn render(grid: &Grid) -> String {
    let rows = grid.rows() as usize;
    let mut out = String::with_capacity(rows * (rows + 1));
    for (pos, state) in grid.iter() {
        out.push(glyph(state));
        if pos.col == grid.rows() - 1 {
            out.push('\n');
        }
    }
    out
}

/// Scatter barriers at `density`, place the start marker in the top-left
/// corner and the end marker in the bottom-right one, and recompute
/// adjacency so the field is immediately runnable.
pub fn scatter_field(grid: &Grid, rng: &mut impl Rng, density: f64) -> Result<(), GridError> {
    let last = grid.rows() - 1;
    let start = Pos::ZERO;
    let end = Pos::new(last, last);

    for row in 0..grid.rows() {
        for col in 0..grid.rows() {
            let pos = Pos::new(row, col);
            if pos == start || pos == end {
                continue;
            }
            if rng.random_bool(density) {
                grid.set_barrier(pos)?;
            }
        }
    }
    grid.set_start(start)?;
    grid.set_end(end)?;
    grid.update_neighbors();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use waygrid_search::{Algorithm, SearchEngine};

    #[test]
    fn scatter_leaves_the_corners_runnable() {
        let grid = Grid::new(12, 480).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        scatter_field(&grid, &mut rng, 0.3).unwrap();
        assert_eq!(grid.start(), Some(Pos::ZERO));
        assert_eq!(grid.end(), Some(Pos::new(11, 11)));
        assert!(!grid.has_stale_neighbors());
    }

    #[test]
    fn scattered_field_runs_end_to_end() {
        let grid = Grid::new(12, 480).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        scatter_field(&grid, &mut rng, 0.3).unwrap();

        let mut engine = SearchEngine::new(grid.rows());
        let bfs = engine.run_marked(&grid, Algorithm::Bfs, || {}).unwrap();
        let astar = engine.run_marked(&grid, Algorithm::AStar, || {}).unwrap();
        assert_eq!(astar.found, bfs.found);
        assert_eq!(astar.path_length, bfs.path_length);

        let frame = render(&grid);
        assert_eq!(frame.lines().count(), 12);
        assert!(frame.contains('A'));
        assert!(frame.contains('B'));
    }

    #[test]
    fn render_shows_one_line_per_row() {
        let grid = Grid::new(3, 30).unwrap();
        grid.set_barrier(Pos::new(1, 1)).unwrap();
        grid.set_start(Pos::new(0, 0)).unwrap();
        grid.set_end(Pos::new(2, 2)).unwrap();
        assert_eq!(render(&grid), "A..\n.#.\n..B\n");
    }
}
