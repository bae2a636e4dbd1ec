//! Breadth-first search: strict FIFO expansion, no cost bookkeeping.

use waygrid_core::{CancelToken, Grid, Pos};

use crate::engine::{RunStats, SearchEngine};
use crate::error::SearchError;

impl SearchEngine {
    /// FIFO wavefront from `start`. On a unit-cost grid the first discovery
    /// of a cell is already along a shortest route, so each cell is enqueued
    /// at most once and nothing is ever relaxed. Only the parent link and
    /// the generation stamp are written.
    pub(crate) fn bfs_run(
        &mut self,
        grid: &Grid,
        start: Pos,
        end: Pos,
        cancel: &CancelToken,
        on_step: &mut impl FnMut(),
    ) -> Result<RunStats, SearchError> {
        let cur_gen = self.begin_run();
        let start_idx = self.idx(start);
        let goal_idx = self.idx(end);

        {
            let node = &mut self.nodes[start_idx];
            node.parent = usize::MAX;
            node.generation = cur_gen;
        }
        self.fifo.push(start_idx);

        let mut expanded = 0u64;
        let goal_reached = loop {
            if cancel.is_canceled() {
                return Err(SearchError::Canceled);
            }
            let Some(ci) = self.fifo.pop() else {
                break false;
            };

            expanded += 1;
            if ci == goal_idx {
                break true;
            }
            let cp = self.pos(ci);

            for np in grid.neighbors(cp) {
                let ni = self.idx(np);
                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    continue; // already discovered this run
                }
                n.generation = cur_gen;
                n.parent = ci;
                self.fifo.push(ni);
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
            stale_skips: 0,
        })
    }
}
