//! Typed grid-edit errors.
//!
//! Every failed edit is surfaced as a [`GridError`]; no edit is ever
//! silently ignored. Idempotent re-assertions (setting a barrier on a
//! barrier, re-setting the current start) succeed.

use crate::cell::CellState;
use crate::pos::Pos;

/// Typed failure for grid construction and cell edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Grid construction with a non-positive row count or pixel width.
    InvalidDimensions { rows: i32, pixel_width: i32 },
    /// The position lies outside the grid.
    OutOfBounds { pos: Pos, rows: i32 },
    /// A different cell already holds the start marker.
    StartTaken { at: Pos },
    /// A different cell already holds the end marker.
    EndTaken { at: Pos },
    /// The edit would overwrite an endpoint marker or a barrier at this
    /// position; callers move markers by clearing the cell first.
    MarkerConflict { pos: Pos, occupied: CellState },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimensions { rows, pixel_width } => {
                write!(
                    f,
                    "grid dimensions must be positive: rows = {rows}, pixel width = {pixel_width}"
                )
            }
            Self::OutOfBounds { pos, rows } => {
                write!(f, "position {pos} outside {rows}x{rows} grid")
            }
            Self::StartTaken { at } => {
                write!(f, "start marker already placed at {at}")
            }
            Self::EndTaken { at } => {
                write!(f, "end marker already placed at {at}")
            }
            Self::MarkerConflict { pos, occupied } => {
                write!(f, "cell {pos} holds {occupied:?}; clear it first")
            }
        }
    }
}

impl std::error::Error for GridError {}
