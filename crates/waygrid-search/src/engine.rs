//! The [`SearchEngine`]: reusable caches and the uniform run contract shared
//! by all three algorithms.

use std::fmt;
use std::time::Instant;

use waygrid_core::{CancelToken, CellState, Grid, Pos};

use crate::distance::manhattan;
use crate::error::SearchError;
use crate::frontier::{FifoFrontier, PriorityFrontier};
use crate::result::SearchResult;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// Selects the strategy a run uses.
///
/// A closed set dispatched by `match`: all three strategies share the
/// engine's caches, validation and callback contract, and differ only in
/// their frontier discipline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Breadth-first search: strict FIFO frontier, no cost bookkeeping.
    Bfs,
    /// Uniform-cost search over a cost-ordered frontier.
    Dijkstra,
    /// Dijkstra guided by the Manhattan heuristic.
    AStar,
}

impl Algorithm {
    /// All algorithms, in presentation order.
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dijkstra, Algorithm::AStar];

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::AStar => "A*",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Internal per-cell search node
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    /// Best known cost from the start (weighted searches only).
    pub(crate) g: i32,
    /// Priority this node was last pushed with (`g` plus heuristic). A
    /// popped entry whose recorded cost differs from this was superseded by
    /// a cheaper push and is discarded.
    pub(crate) f: i32,
    /// Predecessor index on the best known route; `usize::MAX` for none.
    pub(crate) parent: usize,
    /// Run stamp. A node whose stamp differs from the current run's is
    /// absent (cost +infinity), which is how a generation bump empties the
    /// whole array in O(1).
    pub(crate) generation: u32,
    /// Whether the node currently sits in the open frontier.
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            f: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// What an algorithm loop reports back to the dispatcher.
pub(crate) struct RunStats {
    pub(crate) goal_reached: bool,
    pub(crate) expanded: u64,
    pub(crate) stale_skips: u64,
}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

/// Runs searches over a [`Grid`], owning all per-run state.
///
/// The node array, both frontiers and the tie-break counter are reused
/// across runs (invalidated lazily by the generation stamp), so a warm
/// engine allocates nothing per run. One engine serves grids of any size:
/// caches grow on demand and are kept when the grid shrinks.
pub struct SearchEngine {
    pub(crate) rows: i32,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) open: PriorityFrontier,
    pub(crate) fifo: FifoFrontier,
}

impl SearchEngine {
    /// Create an engine pre-sized for `rows x rows` grids.
    pub fn new(rows: i32) -> Self {
        let side = rows.max(0) as usize;
        Self {
            rows: rows.max(0),
            nodes: vec![Node::default(); side * side],
            generation: 0,
            open: PriorityFrontier::new(),
            fifo: FifoFrontier::new(),
        }
    }

    /// Run `algorithm` from `start` to `end` over `grid`.
    ///
    /// `on_step` fires synchronously once per expansion, after that
    /// expansion's frontier and visited marks have been painted; a caller
    /// that renders holds its own clone of `grid` and reads through it
    /// inside the callback. The callback must not edit the grid. The goal's
    /// own dequeue ends the run before any marking or callback.
    ///
    /// Previous search marks are cleared first, and `Start`, `End` and
    /// `Barrier` cells are never repainted. An unreachable goal is a normal
    /// outcome (`found == false`), not an error.
    pub fn run(
        &mut self,
        grid: &Grid,
        algorithm: Algorithm,
        start: Pos,
        end: Pos,
        on_step: impl FnMut(),
    ) -> Result<SearchResult, SearchError> {
        self.run_with_cancel(grid, algorithm, start, end, &CancelToken::new(), on_step)
    }

    /// Like [`run`](SearchEngine::run), polling a cooperative cancellation
    /// token at the top of every expansion. A fired token aborts the run
    /// with [`SearchError::Canceled`].
    pub fn run_with_cancel(
        &mut self,
        grid: &Grid,
        algorithm: Algorithm,
        start: Pos,
        end: Pos,
        cancel: &CancelToken,
        mut on_step: impl FnMut(),
    ) -> Result<SearchResult, SearchError> {
        self.validate(grid, start, end)?;
        self.fit_to(grid.rows());
        grid.clear_search_marks();

        let started = Instant::now();
        if start == end {
            return Ok(SearchResult {
                found: true,
                elapsed: started.elapsed(),
                nodes_expanded: 0,
                path_length: Some(0),
                path: vec![start],
            });
        }

        let stats = match algorithm {
            Algorithm::Bfs => self.bfs_run(grid, start, end, cancel, &mut on_step),
            Algorithm::Dijkstra => {
                self.weighted_run(grid, start, end, cancel, &mut on_step, |_, _| 0)
            }
            Algorithm::AStar => {
                self.weighted_run(grid, start, end, cancel, &mut on_step, manhattan)
            }
        }?;
        let elapsed = started.elapsed();

        let (path, path_length) = if stats.goal_reached {
            let path = self.reconstruct(self.idx(end));
            for &p in &path[1..path.len() - 1] {
                grid.mark_path(p);
            }
            let length = (path.len() - 1) as u64;
            (path, Some(length))
        } else {
            (Vec::new(), None)
        };

        log::debug!(
            "{algorithm} finished: found={}, expanded={}, stale_skips={}, elapsed={elapsed:?}",
            stats.goal_reached,
            stats.expanded,
            stats.stale_skips,
        );

        Ok(SearchResult {
            found: stats.goal_reached,
            elapsed,
            nodes_expanded: stats.expanded,
            path_length,
            path,
        })
    }

    /// Run using the grid's own start/end markers, the way an interactive
    /// caller does after placing both endpoints.
    pub fn run_marked(
        &mut self,
        grid: &Grid,
        algorithm: Algorithm,
        on_step: impl FnMut(),
    ) -> Result<SearchResult, SearchError> {
        let start = grid.start().ok_or(SearchError::MissingStart)?;
        let end = grid.end().ok_or(SearchError::MissingEnd)?;
        self.run(grid, algorithm, start, end, on_step)
    }

    // -----------------------------------------------------------------------
    // Shared run plumbing
    // -----------------------------------------------------------------------

    fn validate(&self, grid: &Grid, start: Pos, end: Pos) -> Result<(), SearchError> {
        if grid.has_stale_neighbors() {
            return Err(SearchError::StaleNeighbors);
        }
        for pos in [start, end] {
            match grid.state(pos) {
                None => return Err(SearchError::OutOfBounds { pos }),
                Some(CellState::Barrier) => return Err(SearchError::BlockedEndpoint { pos }),
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Adapt the caches to the grid's size. A grid that fits within existing
    /// capacity keeps the allocation; a larger one reallocates. Either way
    /// the next generation bump invalidates every node.
    fn fit_to(&mut self, rows: i32) {
        let new_len = (rows as usize) * (rows as usize);
        self.rows = rows;
        if new_len <= self.nodes.len() {
            return;
        }
        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.generation = 0;
    }

    /// Start a fresh run: bump the generation stamp (lazily invalidating the
    /// node array) and reset both frontiers and the tie-break counter.
    pub(crate) fn begin_run(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.open.clear();
        self.fifo.clear();
        self.generation
    }

    /// Flat index of an in-bounds position.
    #[inline]
    pub(crate) fn idx(&self, p: Pos) -> usize {
        (p.row as usize) * (self.rows as usize) + (p.col as usize)
    }

    /// Position of a flat index.
    #[inline]
    pub(crate) fn pos(&self, idx: usize) -> Pos {
        let rows = self.rows as usize;
        Pos::new((idx / rows) as i32, (idx % rows) as i32)
    }
}
