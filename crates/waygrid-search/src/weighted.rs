//! Cost-ordered search: Dijkstra and A* share one loop, parameterised by
//! the heuristic. Dijkstra passes the zero heuristic, which collapses the
//! priority to the plain path cost.

use waygrid_core::{CancelToken, Grid, Pos};

use crate::engine::{RunStats, SearchEngine};
use crate::error::SearchError;

impl SearchEngine {
    /// Best-first expansion ordered by `g + heuristic`, ties broken FIFO by
    /// the frontier's insertion counter.
    ///
    /// Improvements re-push instead of decreasing a key, so the heap can
    /// hold several entries for one cell; a popped entry whose recorded
    /// priority no longer matches the node's is a superseded duplicate and
    /// is skipped without counting as an expansion.
    pub(crate) fn weighted_run(
        &mut self,
        grid: &Grid,
        start: Pos,
        end: Pos,
        cancel: &CancelToken,
        on_step: &mut impl FnMut(),
        heuristic: impl Fn(Pos, Pos) -> i32,
    ) -> Result<RunStats, SearchError> {
        let cur_gen = self.begin_run();
        let start_idx = self.idx(start);
        let goal_idx = self.idx(end);

        let start_f = heuristic(start, end);
        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.f = start_f;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }
        self.open.push(start_idx, start_f);

        let mut expanded = 0u64;
        let mut stale_skips = 0u64;

        let goal_reached = loop {
            if cancel.is_canceled() {
                return Err(SearchError::Canceled);
            }
            let Some(entry) = self.open.pop() else {
                break false;
            };
            let ci = entry.idx;

            {
                let n = &self.nodes[ci];
                if n.generation != cur_gen || !n.open || entry.cost != n.f {
                    stale_skips += 1;
                    continue;
                }
            }

            expanded += 1;
            if ci == goal_idx {
                break true;
            }

            self.nodes[ci].open = false;
            let current_g = self.nodes[ci].g;
            let cp = self.pos(ci);

            for np in grid.neighbors(cp) {
                let ni = self.idx(np);
                let tentative = current_g + 1;

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue; // no improvement over the known route
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative;
                n.f = tentative + heuristic(np, end);
                n.parent = ci;
                n.open = true;
                let nf = n.f;
                self.open.push(ni, nf);
                if np != start && np != end {
                    grid.mark_frontier(np);
                }
            }

            if ci != start_idx {
                grid.mark_visited(cp);
            }
            on_step();
        };

        Ok(RunStats {
            goal_reached,
            expanded,
            stale_skips,
        })
    }
}
