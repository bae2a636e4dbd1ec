//! The [`Grid`] type: a square grid of cells with shared-buffer views.
//!
//! A `Grid` is a *view* into shared backing storage. Cloning yields another
//! view of the **same** buffer, which is what lets a per-step render callback
//! hold its own handle while a search paints cell marks. `Rc` keeps the type
//! off other threads entirely, so the no-concurrent-mutation contract holds
//! by construction.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cell::{Cell, CellState, NeighborList};
use crate::error::GridError;
use crate::pos::Pos;

// ---------------------------------------------------------------------------
// Internal shared buffer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct GridBuffer {
    cells: Vec<Cell>,
    rows: usize,
    start: Option<Pos>,
    end: Option<Pos>,
    /// Set by barrier edits, cleared by an adjacency recompute. A search
    /// refuses to start while this is set.
    stale_neighbors: bool,
}

impl GridBuffer {
    fn new(rows: usize) -> Self {
        Self {
            cells: vec![Cell::default(); rows * rows],
            rows,
            start: None,
            end: None,
            stale_neighbors: false,
        }
    }

    #[inline]
    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.rows
            && (pos.col as usize) < self.rows
        {
            Some((pos.row as usize) * self.rows + (pos.col as usize))
        } else {
            None
        }
    }

    fn recompute_neighbors(&mut self) {
        for i in 0..self.cells.len() {
            let pos = Pos::new((i / self.rows) as i32, (i % self.rows) as i32);
            let mut list = NeighborList::default();
            for n in pos.neighbors_4() {
                if let Some(ni) = self.index(n) {
                    if self.cells[ni].state.is_traversable() {
                        list.push(n);
                    }
                }
            }
            self.cells[i].neighbors = list;
        }
        self.stale_neighbors = false;
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A square `rows x rows` grid of cells backed by shared storage.
///
/// Cloning produces another view into the same buffer (slice semantics), so
/// all edits go through `&self`. Every edit is validated and a failed edit
/// leaves the grid untouched; see [`GridError`] for the rejection rules.
#[derive(Debug, Clone)]
pub struct Grid {
    buffer: Rc<RefCell<GridBuffer>>,
    rows: i32,
    pixel_width: i32,
    tile_size: i32,
}

impl Grid {
    /// Create a `rows x rows` grid of empty cells with adjacency precomputed.
    ///
    /// `pixel_width` is the width of the square rendering area the grid maps
    /// onto; it feeds [`tile_size`](Grid::tile_size) and
    /// [`pos_at_pixel`](Grid::pos_at_pixel) and nothing else. Fails when
    /// either dimension is non-positive.
    pub fn new(rows: i32, pixel_width: i32) -> Result<Self, GridError> {
        if rows <= 0 || pixel_width <= 0 {
            return Err(GridError::InvalidDimensions { rows, pixel_width });
        }
        let mut buf = GridBuffer::new(rows as usize);
        buf.recompute_neighbors();
        Ok(Self {
            buffer: Rc::new(RefCell::new(buf)),
            rows,
            pixel_width,
            tile_size: pixel_width / rows,
        })
    }

    /// Number of rows (and of columns).
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Width in pixels of the rendering area the grid maps onto.
    #[inline]
    pub fn pixel_width(&self) -> i32 {
        self.pixel_width
    }

    /// Side length of one cell in pixels (`pixel_width / rows`, truncated).
    #[inline]
    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Whether `pos` is inside the grid.
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.rows
    }

    // -----------------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------------

    /// Read the state at `pos`. `None` outside the grid.
    pub fn state(&self, pos: Pos) -> Option<CellState> {
        let buf = self.buffer.borrow();
        buf.index(pos).map(|i| buf.cells[i].state)
    }

    /// The cached traversable neighbours of `pos`, copied out of the shared
    /// buffer (in enumeration order, clockwise from north). Empty for
    /// out-of-bounds positions.
    pub fn neighbors(&self, pos: Pos) -> NeighborList {
        let buf = self.buffer.borrow();
        buf.index(pos)
            .map(|i| buf.cells[i].neighbors)
            .unwrap_or_default()
    }

    /// Position of the start marker, if placed.
    pub fn start(&self) -> Option<Pos> {
        self.buffer.borrow().start
    }

    /// Position of the end marker, if placed.
    pub fn end(&self) -> Option<Pos> {
        self.buffer.borrow().end
    }

    /// Whether a barrier edit has invalidated the adjacency cache since the
    /// last [`update_neighbors`](Grid::update_neighbors).
    pub fn has_stale_neighbors(&self) -> bool {
        self.buffer.borrow().stale_neighbors
    }

    /// Map a pixel coordinate to the cell underneath it.
    ///
    /// `px` counts right and `py` counts down from the grid's top-left
    /// corner. Returns `None` outside the tiled area, including the trailing
    /// remainder band when `pixel_width` is not a multiple of `rows`, and
    /// always when the tile size is zero.
    pub fn pos_at_pixel(&self, px: i32, py: i32) -> Option<Pos> {
        if self.tile_size == 0 || px < 0 || py < 0 {
            return None;
        }
        let pos = Pos::new(py / self.tile_size, px / self.tile_size);
        if self.contains(pos) { Some(pos) } else { None }
    }

    // -----------------------------------------------------------------------
    // Edit surface
    // -----------------------------------------------------------------------

    /// Place a barrier at `pos`.
    ///
    /// Idempotent on a cell already holding a barrier. Rejects the endpoint
    /// markers; everything else (including old search marks) is overwritten.
    /// Flags the adjacency cache stale.
    pub fn set_barrier(&self, pos: Pos) -> Result<(), GridError> {
        let mut buf = self.buffer.borrow_mut();
        let i = self.checked_index(&buf, pos)?;
        match buf.cells[i].state {
            CellState::Barrier => Ok(()),
            occupied if occupied.is_endpoint() => Err(GridError::MarkerConflict { pos, occupied }),
            _ => {
                buf.cells[i].state = CellState::Barrier;
                buf.stale_neighbors = true;
                Ok(())
            }
        }
    }

    /// Place the start marker at `pos`.
    ///
    /// Re-asserting the current start cell succeeds; a second start anywhere
    /// else is rejected, as is placing the marker over the end or a barrier.
    pub fn set_start(&self, pos: Pos) -> Result<(), GridError> {
        let mut buf = self.buffer.borrow_mut();
        let i = self.checked_index(&buf, pos)?;
        if let Some(at) = buf.start {
            if at == pos {
                return Ok(());
            }
            return Err(GridError::StartTaken { at });
        }
        let occupied = buf.cells[i].state;
        if occupied == CellState::End || occupied == CellState::Barrier {
            return Err(GridError::MarkerConflict { pos, occupied });
        }
        buf.cells[i].state = CellState::Start;
        buf.start = Some(pos);
        Ok(())
    }

    /// Place the end marker at `pos`. Same rules as
    /// [`set_start`](Grid::set_start), mirrored.
    pub fn set_end(&self, pos: Pos) -> Result<(), GridError> {
        let mut buf = self.buffer.borrow_mut();
        let i = self.checked_index(&buf, pos)?;
        if let Some(at) = buf.end {
            if at == pos {
                return Ok(());
            }
            return Err(GridError::EndTaken { at });
        }
        let occupied = buf.cells[i].state;
        if occupied == CellState::Start || occupied == CellState::Barrier {
            return Err(GridError::MarkerConflict { pos, occupied });
        }
        buf.cells[i].state = CellState::End;
        buf.end = Some(pos);
        Ok(())
    }

    /// Reset the cell at `pos` to `Empty`, releasing its marker registration
    /// if it held one. Idempotent on an already-empty cell.
    pub fn clear(&self, pos: Pos) -> Result<(), GridError> {
        let mut buf = self.buffer.borrow_mut();
        let i = self.checked_index(&buf, pos)?;
        match buf.cells[i].state {
            CellState::Empty => return Ok(()),
            CellState::Barrier => buf.stale_neighbors = true,
            CellState::Start => buf.start = None,
            CellState::End => buf.end = None,
            _ => {}
        }
        buf.cells[i].state = CellState::Empty;
        Ok(())
    }

    /// Recompute every cell's traversable-neighbour cache.
    ///
    /// Pure function of the current barrier layout, O(rows²). Barrier edits
    /// only flip the stale flag, so callers can batch many edits and pay for
    /// one recompute.
    pub fn update_neighbors(&self) {
        self.buffer.borrow_mut().recompute_neighbors();
    }

    /// Return every cell to `Empty` and drop both endpoint registrations.
    ///
    /// When `clear_barriers` is false, barrier cells are left in place.
    /// Adjacency is recomputed eagerly, so a reset grid is immediately
    /// runnable.
    pub fn reset(&self, clear_barriers: bool) {
        let mut buf = self.buffer.borrow_mut();
        for cell in buf.cells.iter_mut() {
            if clear_barriers || cell.state != CellState::Barrier {
                cell.state = CellState::Empty;
            }
        }
        buf.start = None;
        buf.end = None;
        buf.recompute_neighbors();
    }

    /// Remove the transient `Frontier` / `Visited` / `Path` marks, leaving
    /// `Start`, `End` and `Barrier` cells untouched.
    pub fn clear_search_marks(&self) {
        let mut buf = self.buffer.borrow_mut();
        for cell in buf.cells.iter_mut() {
            if cell.state.is_search_mark() {
                cell.state = CellState::Empty;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Mark surface (written by a running search)
    // -----------------------------------------------------------------------

    /// Mark a discovered cell as [`CellState::Frontier`].
    pub fn mark_frontier(&self, pos: Pos) {
        self.apply_mark(pos, CellState::Frontier);
    }

    /// Mark an expanded cell as [`CellState::Visited`].
    pub fn mark_visited(&self, pos: Pos) {
        self.apply_mark(pos, CellState::Visited);
    }

    /// Mark a cell on the reconstructed route as [`CellState::Path`].
    pub fn mark_path(&self, pos: Pos) {
        self.apply_mark(pos, CellState::Path);
    }

    /// Marks only ever replace `Empty` or another mark, so `Start`, `End`
    /// and `Barrier` cells cannot be clobbered by a run. Out-of-bounds
    /// positions are ignored.
    fn apply_mark(&self, pos: Pos, mark: CellState) {
        let mut buf = self.buffer.borrow_mut();
        if let Some(i) = buf.index(pos) {
            let state = buf.cells[i].state;
            if state == CellState::Empty || state.is_search_mark() {
                buf.cells[i].state = mark;
            }
        }
    }

    /// Row-major iterator over `(Pos, CellState)` pairs, the surface a
    /// renderer draws from.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter { grid: self, cur: 0 }
    }

    #[inline]
    fn checked_index(&self, buf: &GridBuffer, pos: Pos) -> Result<usize, GridError> {
        buf.index(pos).ok_or(GridError::OutOfBounds {
            pos,
            rows: self.rows,
        })
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over `(Pos, CellState)` pairs in a [`Grid`].
pub struct GridIter<'a> {
    grid: &'a Grid,
    cur: usize,
}

impl Iterator for GridIter<'_> {
    type Item = (Pos, CellState);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let rows = self.grid.rows as usize;
        if self.cur >= rows * rows {
            return None;
        }
        let i = self.cur;
        self.cur += 1;
        let pos = Pos::new((i / rows) as i32, (i % rows) as i32);
        let state = self.grid.buffer.borrow().cells[i].state;
        Some((pos, state))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = (self.grid.rows as usize) * (self.grid.rows as usize);
        let remaining = total.saturating_sub(self.cur);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_rejects_non_positive_dimensions() {
        assert!(matches!(
            Grid::new(0, 800),
            Err(GridError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Grid::new(10, -1),
            Err(GridError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn fresh_grid_is_empty_and_runnable() {
        let g = Grid::new(4, 80).unwrap();
        assert!(!g.has_stale_neighbors());
        assert!(g.iter().all(|(_, s)| s == CellState::Empty));
        assert_eq!(g.iter().len(), 16);
        // Interior cell starts with all four cardinals cached.
        assert_eq!(g.neighbors(Pos::new(1, 1)).len(), 4);
    }

    #[test]
    fn neighbor_order_is_clockwise_from_north() {
        let g = Grid::new(3, 30).unwrap();
        assert_eq!(
            g.neighbors(Pos::new(1, 1)).as_slice(),
            &[
                Pos::new(0, 1),
                Pos::new(1, 2),
                Pos::new(2, 1),
                Pos::new(1, 0)
            ]
        );
        // Corner keeps the same relative order, minus the out-of-bounds ones.
        assert_eq!(
            g.neighbors(Pos::new(0, 0)).as_slice(),
            &[Pos::new(0, 1), Pos::new(1, 0)]
        );
    }

    #[test]
    fn barriers_drop_out_of_neighbor_lists() {
        let g = Grid::new(3, 30).unwrap();
        g.set_barrier(Pos::new(1, 1)).unwrap();
        assert!(g.has_stale_neighbors());
        g.update_neighbors();
        assert!(!g.has_stale_neighbors());
        assert_eq!(
            g.neighbors(Pos::new(0, 1)).as_slice(),
            &[Pos::new(0, 2), Pos::new(0, 0)]
        );
        assert_eq!(
            g.neighbors(Pos::new(2, 1)).as_slice(),
            &[Pos::new(2, 2), Pos::new(2, 0)]
        );
    }

    #[test]
    fn clearing_a_barrier_flags_stale_again() {
        let g = Grid::new(3, 30).unwrap();
        g.set_barrier(Pos::new(1, 1)).unwrap();
        g.update_neighbors();
        g.clear(Pos::new(1, 1)).unwrap();
        assert!(g.has_stale_neighbors());
        g.update_neighbors();
        assert_eq!(g.neighbors(Pos::new(0, 1)).len(), 3);
    }

    #[test]
    fn barrier_edits_are_idempotent() {
        let g = Grid::new(3, 30).unwrap();
        g.set_barrier(Pos::new(0, 0)).unwrap();
        g.update_neighbors();
        // Re-asserting an existing barrier does not re-flag the cache.
        g.set_barrier(Pos::new(0, 0)).unwrap();
        assert!(!g.has_stale_neighbors());
        // Clearing an already-empty cell is fine too.
        g.clear(Pos::new(2, 2)).unwrap();
        assert!(!g.has_stale_neighbors());
    }

    #[test]
    fn second_start_is_rejected() {
        let g = Grid::new(3, 30).unwrap();
        g.set_start(Pos::new(0, 0)).unwrap();
        // Same cell again: fine.
        g.set_start(Pos::new(0, 0)).unwrap();
        assert_eq!(
            g.set_start(Pos::new(1, 1)),
            Err(GridError::StartTaken { at: Pos::new(0, 0) })
        );
        assert_eq!(g.start(), Some(Pos::new(0, 0)));
    }

    #[test]
    fn second_end_is_rejected() {
        let g = Grid::new(3, 30).unwrap();
        g.set_end(Pos::new(2, 2)).unwrap();
        assert_eq!(
            g.set_end(Pos::new(1, 1)),
            Err(GridError::EndTaken { at: Pos::new(2, 2) })
        );
    }

    #[test]
    fn marker_conflicts_are_rejected() {
        let g = Grid::new(3, 30).unwrap();
        g.set_start(Pos::new(0, 0)).unwrap();
        g.set_barrier(Pos::new(1, 1)).unwrap();
        assert!(matches!(
            g.set_end(Pos::new(0, 0)),
            Err(GridError::MarkerConflict { .. })
        ));
        assert!(matches!(
            g.set_barrier(Pos::new(0, 0)),
            Err(GridError::MarkerConflict { .. })
        ));
        assert!(matches!(
            g.set_start(Pos::new(1, 1)),
            Err(GridError::MarkerConflict { .. })
        ));
    }

    #[test]
    fn clear_releases_the_marker_registration() {
        let g = Grid::new(3, 30).unwrap();
        g.set_start(Pos::new(0, 0)).unwrap();
        g.clear(Pos::new(0, 0)).unwrap();
        assert_eq!(g.start(), None);
        // The slot is free again.
        g.set_start(Pos::new(1, 1)).unwrap();
        assert_eq!(g.start(), Some(Pos::new(1, 1)));
    }

    #[test]
    fn out_of_bounds_edits_error() {
        let g = Grid::new(3, 30).unwrap();
        let oob = Pos::new(3, 0);
        assert!(matches!(
            g.set_barrier(oob),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(matches!(g.clear(oob), Err(GridError::OutOfBounds { .. })));
        assert_eq!(g.state(oob), None);
    }

    #[test]
    fn reset_keeps_barriers_when_asked() {
        let g = Grid::new(3, 30).unwrap();
        g.set_barrier(Pos::new(1, 1)).unwrap();
        g.set_start(Pos::new(0, 0)).unwrap();
        g.set_end(Pos::new(2, 2)).unwrap();

        g.reset(false);
        assert_eq!(g.state(Pos::new(1, 1)), Some(CellState::Barrier));
        assert_eq!(g.state(Pos::new(0, 0)), Some(CellState::Empty));
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
        assert!(!g.has_stale_neighbors());

        g.reset(true);
        assert_eq!(g.state(Pos::new(1, 1)), Some(CellState::Empty));
        assert_eq!(g.neighbors(Pos::new(0, 1)).len(), 3);
    }

    #[test]
    fn clear_search_marks_preserves_structure() {
        let g = Grid::new(3, 30).unwrap();
        g.set_barrier(Pos::new(1, 1)).unwrap();
        g.set_start(Pos::new(0, 0)).unwrap();
        g.set_end(Pos::new(2, 2)).unwrap();
        g.mark_frontier(Pos::new(0, 1));
        g.mark_visited(Pos::new(1, 0));
        g.mark_path(Pos::new(2, 1));

        g.clear_search_marks();
        assert_eq!(g.state(Pos::new(0, 1)), Some(CellState::Empty));
        assert_eq!(g.state(Pos::new(1, 0)), Some(CellState::Empty));
        assert_eq!(g.state(Pos::new(2, 1)), Some(CellState::Empty));
        assert_eq!(g.state(Pos::new(0, 0)), Some(CellState::Start));
        assert_eq!(g.state(Pos::new(2, 2)), Some(CellState::End));
        assert_eq!(g.state(Pos::new(1, 1)), Some(CellState::Barrier));
    }

    #[test]
    fn marks_never_clobber_structure() {
        let g = Grid::new(3, 30).unwrap();
        g.set_start(Pos::new(0, 0)).unwrap();
        g.set_barrier(Pos::new(1, 1)).unwrap();
        g.mark_visited(Pos::new(0, 0));
        g.mark_frontier(Pos::new(1, 1));
        g.mark_path(Pos::new(9, 9)); // out of bounds: ignored
        assert_eq!(g.state(Pos::new(0, 0)), Some(CellState::Start));
        assert_eq!(g.state(Pos::new(1, 1)), Some(CellState::Barrier));
        // Marks replace each other freely.
        g.mark_frontier(Pos::new(2, 2));
        g.mark_visited(Pos::new(2, 2));
        assert_eq!(g.state(Pos::new(2, 2)), Some(CellState::Visited));
    }

    #[test]
    fn clones_share_the_buffer() {
        let g = Grid::new(3, 30).unwrap();
        let view = g.clone();
        g.set_barrier(Pos::new(1, 1)).unwrap();
        assert_eq!(view.state(Pos::new(1, 1)), Some(CellState::Barrier));
        assert!(view.has_stale_neighbors());
    }

    #[test]
    fn pixel_hit_testing() {
        let g = Grid::new(5, 100).unwrap(); // tile_size = 20
        assert_eq!(g.tile_size(), 20);
        assert_eq!(g.pos_at_pixel(0, 0), Some(Pos::new(0, 0)));
        assert_eq!(g.pos_at_pixel(99, 99), Some(Pos::new(4, 4)));
        // px picks the column, py the row.
        assert_eq!(g.pos_at_pixel(25, 47), Some(Pos::new(2, 1)));
        assert_eq!(g.pos_at_pixel(100, 0), None);
        assert_eq!(g.pos_at_pixel(-1, 10), None);
    }

    #[test]
    fn pixel_hit_testing_remainder_band() {
        // 103 / 5 = 20 with 3 trailing pixels that belong to no cell.
        let g = Grid::new(5, 103).unwrap();
        assert_eq!(g.pos_at_pixel(99, 0), Some(Pos::new(0, 4)));
        assert_eq!(g.pos_at_pixel(101, 0), None);
        // Degenerate: more rows than pixels, no tiles to hit.
        let tiny = Grid::new(10, 5).unwrap();
        assert_eq!(tiny.tile_size(), 0);
        assert_eq!(tiny.pos_at_pixel(0, 0), None);
    }

    #[test]
    fn iter_is_row_major() {
        let g = Grid::new(2, 20).unwrap();
        g.set_barrier(Pos::new(1, 0)).unwrap();
        let cells: Vec<_> = g.iter().collect();
        assert_eq!(
            cells,
            vec![
                (Pos::new(0, 0), CellState::Empty),
                (Pos::new(0, 1), CellState::Empty),
                (Pos::new(1, 0), CellState::Barrier),
                (Pos::new(1, 1), CellState::Empty),
            ]
        );
    }
}
