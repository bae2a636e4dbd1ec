//! Typed search errors.
//!
//! `SearchError` covers run preconditions and cooperative cancellation.
//! An exhausted frontier is *not* an error: a search that finds no route
//! returns `Ok` with [`SearchResult::found`](crate::SearchResult::found)
//! set to false.

use waygrid_core::Pos;

/// Typed failure for starting or aborting a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The grid has no start marker (marker-driven runs only).
    MissingStart,
    /// The grid has no end marker (marker-driven runs only).
    MissingEnd,
    /// An endpoint lies outside the grid.
    OutOfBounds { pos: Pos },
    /// An endpoint sits on a barrier cell.
    BlockedEndpoint { pos: Pos },
    /// A barrier was edited after the last adjacency recompute; call
    /// `Grid::update_neighbors` before running.
    StaleNeighbors,
    /// The cancellation token fired before the goal was dequeued.
    Canceled,
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingStart => write!(f, "no start marker placed on the grid"),
            Self::MissingEnd => write!(f, "no end marker placed on the grid"),
            Self::OutOfBounds { pos } => write!(f, "endpoint {pos} outside the grid"),
            Self::BlockedEndpoint { pos } => write!(f, "endpoint {pos} is a barrier"),
            Self::StaleNeighbors => {
                write!(f, "adjacency cache is stale; run update_neighbors first")
            }
            Self::Canceled => write!(f, "search canceled"),
        }
    }
}

impl std::error::Error for SearchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            SearchError::BlockedEndpoint { pos: Pos::new(2, 3) }.to_string(),
            "endpoint (2, 3) is a barrier"
        );
        assert_eq!(SearchError::Canceled.to_string(), "search canceled");
        assert_eq!(
            SearchError::StaleNeighbors.to_string(),
            "adjacency cache is stale; run update_neighbors first"
        );
    }
}
