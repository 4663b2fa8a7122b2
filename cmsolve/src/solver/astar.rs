use std::{cmp::Ordering, collections::BinaryHeap, time::Instant};

use super::{check_endpoints, reconstruct_path, ExpansionCounting, SearchResult, SolveError, Solver};
use crate::{dims::Coord, grid::Grid, HashMap, HashSet};

/// Heap entry, ordered so that [`BinaryHeap`] pops the lowest `f` first and, among equal `f`,
/// the entry pushed earliest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    f: usize,
    seq: usize,
    g: usize,
    pos: Coord,
    parent: Option<Coord>,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* with unit step cost and Manhattan distance heuristic.
///
/// Cells are closed when popped, not when pushed, so a cell can sit in the heap several times.
/// [`ExpansionCounting`] decides whether those stale pops count as expansions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar {
    counting: ExpansionCounting,
}

impl AStar {
    pub fn new(counting: ExpansionCounting) -> Self {
        Self { counting }
    }
}

impl Solver for AStar {
    fn name(&self) -> &'static str {
        "A*"
    }

    fn solve(&self, grid: &Grid, start: Coord, end: Coord) -> Result<SearchResult, SolveError> {
        let started = Instant::now();
        let mut nodes_expanded = 0;
        let endpoints_open = check_endpoints(grid, start, end)?;

        let mut heap = BinaryHeap::new();
        let mut closed = HashSet::new();
        let mut parents = HashMap::new();
        let mut seq = 0;

        heap.push(Entry {
            f: start.manhattan(end),
            seq,
            g: 0,
            pos: start,
            parent: None,
        });

        while let Some(Entry { g, pos, parent, .. }) = heap.pop() {
            let fresh = !closed.contains(&pos);
            if fresh || self.counting == ExpansionCounting::EveryPop {
                nodes_expanded += 1;
            }
            if !fresh {
                continue;
            }

            closed.insert(pos);
            if let Some(parent) = parent {
                parents.insert(pos, parent);
            }

            if endpoints_open && pos == end {
                return Ok(SearchResult {
                    path: Some(reconstruct_path(&parents, start, end)),
                    nodes_expanded,
                    elapsed: started.elapsed(),
                });
            }

            for next in grid.neighbors(pos) {
                if closed.contains(&next) {
                    continue;
                }

                seq += 1;
                heap.push(Entry {
                    f: g + 1 + next.manhattan(end),
                    seq,
                    g: g + 1,
                    pos: next,
                    parent: Some(pos),
                });
            }
        }

        Ok(SearchResult {
            path: None,
            nodes_expanded,
            elapsed: started.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_prefers_low_f_then_insertion_order() {
        let mut heap = BinaryHeap::new();
        for (f, seq) in [(5, 0), (3, 1), (3, 2), (4, 3)] {
            heap.push(Entry {
                f,
                seq,
                g: 0,
                pos: Coord(0, 0),
                parent: None,
            });
        }

        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|e| (e.f, e.seq))).collect();
        assert_eq!(order, vec![(3, 1), (3, 2), (4, 3), (5, 0)]);
    }

    #[test]
    fn straight_corridor_expands_only_the_path() {
        let grid = Grid::new(1, 6);
        let result = AStar::default().solve(&grid, grid.start(), grid.end()).unwrap();
        assert_eq!(result.path_len(), Some(6));
        assert_eq!(result.nodes_expanded, 6);
    }

    #[test]
    fn open_grid_path_is_shortest() {
        let grid = Grid::new(6, 6);
        let result = AStar::default().solve(&grid, grid.start(), grid.end()).unwrap();
        assert_eq!(result.path_len(), Some(11));
        assert!(grid.is_valid_path(result.path.as_ref().unwrap()));
    }

    #[test]
    fn every_pop_counts_stale_entries() {
        // Both (0,1) and (1,0) push (1,1) before it's closed, so one stale entry gets popped
        // before the goal is reached.
        let grid: Grid = "
            0 0 1
            0 0 1
            1 0 0
        "
        .parse()
        .unwrap();

        let unique = AStar::new(ExpansionCounting::Unique)
            .solve(&grid, grid.start(), grid.end())
            .unwrap();
        let every = AStar::new(ExpansionCounting::EveryPop)
            .solve(&grid, grid.start(), grid.end())
            .unwrap();

        assert_eq!(unique.path, every.path);
        assert_eq!(unique.path_len(), Some(5));
        assert!(every.nodes_expanded > unique.nodes_expanded);
    }
}
