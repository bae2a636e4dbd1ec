//! Search outcome: the [`SearchResult`] record and route reconstruction.

use std::fmt;
use std::time::Duration;

use waygrid_core::Pos;

use crate::engine::SearchEngine;

/// The outcome of one search run.
///
/// An unreachable goal is reported here (`found == false`, empty path), not
/// as an error; see [`SearchError`](crate::SearchError) for the conditions
/// that prevent a run from starting at all.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Whether a route from start to end exists.
    pub found: bool,
    /// Wall-clock time spent inside the search loop.
    pub elapsed: Duration,
    /// Frontier dequeues that became expansions, the goal's final dequeue
    /// included; stale entries are not counted.
    pub nodes_expanded: u64,
    /// Edge count of the route (`path.len() - 1`); `None` when no route.
    pub path_length: Option<u64>,
    /// The route from start to end, both endpoints included; empty when no
    /// route.
    pub path: Vec<Pos>,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path_length {
            Some(len) => write!(
                f,
                "path length {len}, {} nodes expanded in {:?}",
                self.nodes_expanded, self.elapsed
            ),
            None => write!(
                f,
                "no path, {} nodes expanded in {:?}",
                self.nodes_expanded, self.elapsed
            ),
        }
    }
}

impl SearchEngine {
    /// Walk predecessor links back from the goal and return the route in
    /// start-to-end order, both endpoints included.
    pub(crate) fn reconstruct(&self, goal_idx: usize) -> Vec<Pos> {
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            path.push(self.pos(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }
}
