//! **waygrid-core**: grid substrate for the waygrid search engine.
//!
//! This crate provides the types a search runs over: integer grid positions,
//! per-cell visitation/edit states, the shared-buffer [`Grid`] with its
//! adjacency cache and validation rules, and the cooperative [`CancelToken`].

pub mod cancel;
pub mod cell;
pub mod error;
pub mod grid;
pub mod pos;

pub use cancel::CancelToken;
pub use cell::{CellState, NeighborList};
pub use error::GridError;
pub use grid::Grid;
pub use pos::Pos;
