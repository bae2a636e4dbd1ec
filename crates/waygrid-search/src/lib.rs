//! **waygrid-search**: deterministic shortest-path search over waygrid grids.
//!
//! Three interchangeable algorithms run through one engine and one contract:
//!
//! - **BFS** strict FIFO expansion ([`Algorithm::Bfs`])
//! - **Dijkstra** uniform-cost priority expansion ([`Algorithm::Dijkstra`])
//! - **A\*** Manhattan-guided priority expansion ([`Algorithm::AStar`])
//!
//! All three run via [`SearchEngine::run`] (or its cancellable and
//! marker-driven variants), which owns and reuses internal caches so that
//! repeated searches incur no allocations after warm-up. Runs are
//! deterministic: the grid's neighbour enumeration order plus the frontier's
//! insertion-order tie-break fix the expansion order, so identical inputs
//! give identical paths, metrics and callback sequences.

mod bfs;
mod distance;
mod engine;
mod error;
mod frontier;
mod result;
mod weighted;

pub use distance::manhattan;
pub use engine::{Algorithm, SearchEngine};
pub use error::SearchError;
pub use result::SearchResult;
