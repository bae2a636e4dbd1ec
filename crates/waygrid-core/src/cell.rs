//! Cell state: [`CellState`] and the inline [`NeighborList`].

use crate::pos::Pos;

// ---------------------------------------------------------------------------
// CellState
// ---------------------------------------------------------------------------

/// The state of a single grid cell.
///
/// `Empty`, `Barrier`, `Start` and `End` are edit states set by the caller;
/// `Frontier`, `Visited` and `Path` are transient search marks painted by a
/// run and removed by [`Grid::clear_search_marks`](crate::Grid::clear_search_marks).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Unvisited, traversable.
    #[default]
    Empty,
    /// Impassable obstacle.
    Barrier,
    /// The source endpoint (at most one per grid).
    Start,
    /// The goal endpoint (at most one per grid).
    End,
    /// Discovered but not yet expanded.
    Frontier,
    /// Expanded by the search.
    Visited,
    /// On the reconstructed route.
    Path,
}

impl CellState {
    /// Whether a search may pass through a cell in this state.
    #[inline]
    pub const fn is_traversable(self) -> bool {
        !matches!(self, CellState::Barrier)
    }

    /// Whether this state is a transient search annotation.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, CellState::Frontier | CellState::Visited | CellState::Path)
    }

    /// Whether this state is one of the two endpoint markers.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, CellState::Start | CellState::End)
    }
}

// ---------------------------------------------------------------------------
// NeighborList
// ---------------------------------------------------------------------------

/// Cached traversable neighbours of one cell (at most the four cardinals).
///
/// Stored inline so the grid's adjacency cache is a single flat allocation.
#[derive(Copy, Clone, Debug, Default)]
pub struct NeighborList {
    slots: [Pos; 4],
    len: u8,
}

impl NeighborList {
    pub(crate) fn push(&mut self, p: Pos) {
        self.slots[self.len as usize] = p;
        self.len += 1;
    }

    /// The neighbours as a slice, in enumeration order (clockwise from north).
    #[inline]
    pub fn as_slice(&self) -> &[Pos] {
        &self.slots[..self.len as usize]
    }

    /// Number of cached neighbours.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the cell has no traversable neighbours.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl IntoIterator for NeighborList {
    type Item = Pos;
    type IntoIter = std::iter::Take<std::array::IntoIter<Pos, 4>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter().take(self.len as usize)
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// Buffer storage record: one cell's state plus its cached traversable
/// neighbours. Reads go through [`Grid::state`](crate::Grid::state) and
/// [`Grid::neighbors`](crate::Grid::neighbors).
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Cell {
    pub(crate) state: CellState,
    pub(crate) neighbors: NeighborList,
}
