use waygrid_core::Pos;

/// Manhattan (L1) distance between two positions.
///
/// Admissible and consistent for 4-directional unit-cost movement, which is
/// what makes it the A* heuristic here.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}
