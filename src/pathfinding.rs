//! Dijkstra's single-source shortest paths over a [`Graph`]
//!
//! The driver creates one heap entry per vertex, keyed by its tentative
//! distance, and keeps the vertex-to-handle table so that relaxing an edge is a
//! `decrease_key` on the right entry. The heap is the [`FibonacciHeap`] by
//! default; any [`DecreaseKeyHeap`] can be substituted through
//! [`ShortestPathBuilder::run_with`].
//!
//! Unreached vertices start at [`Distance::Infinite`], which orders above every
//! finite distance, so no magic "large" cost value is needed.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_sssp::graph::Graph;
//! use fibonacci_sssp::pathfinding::shortest_paths;
//!
//! let graph = Graph::undirected(4, [(0, 1, 2u32), (1, 2, 2), (0, 2, 5)]).unwrap();
//! let paths = shortest_paths(&graph, 0).unwrap();
//!
//! assert_eq!(paths.distance(2), Some(4));
//! assert_eq!(paths.path_to(2), Some(vec![0, 1, 2]));
//! assert!(!paths.is_reachable(3));
//! ```

use crate::fibonacci::FibonacciHeap;
use crate::graph::{Graph, GraphError, VertexId};
use crate::traits::{DecreaseKeyHeap, HeapError};
use ordered_float::OrderedFloat;
use std::ops::Add;
use thiserror::Error;

/// Trait for types that can be used as edge weights and path costs.
///
/// This requires the type to be orderable, copyable, and support addition.
/// `Default` supplies the zero distance of the source. Floating point weights
/// go through `OrderedFloat<f64>`.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {
    /// Sum of two costs, or `None` if it is not representable
    fn checked_add(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_cost_for_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl Cost for $t {
                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }
            }
        )*
    };
}

impl_cost_for_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

// Float sums saturate at infinity, which still orders correctly.
impl Cost for OrderedFloat<f32> {
    #[inline]
    fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(self + rhs)
    }
}

impl Cost for OrderedFloat<f64> {
    #[inline]
    fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(self + rhs)
    }
}

/// Errors raised by a shortest-path run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShortestPathError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The heap refused a relaxation, so its contents no longer match the
    /// tentative distances
    #[error(transparent)]
    Heap(#[from] HeapError),
    /// Every path found to `vertex` has a length the cost type cannot hold
    #[error("every path to vertex {vertex} overflows the cost type")]
    DistanceOverflow { vertex: VertexId },
}

/// Tentative distance used as the heap priority
///
/// Every `Finite` value orders below `Infinite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance<C> {
    Finite(C),
    Infinite,
}

impl<C: Copy> Distance<C> {
    pub fn finite(self) -> Option<C> {
        match self {
            Distance::Finite(cost) => Some(cost),
            Distance::Infinite => None,
        }
    }
}

/// Shortest-path record of one reachable vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathEntry<C> {
    /// Previous vertex on a shortest path; `None` only for the source
    pub predecessor: Option<VertexId>,
    /// Length of the shortest path from the source
    pub distance: C,
}

/// Result of a single-source shortest-path run
///
/// Holds one entry per vertex: `None` if the vertex is unreachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths<C> {
    source: VertexId,
    entries: Vec<Option<PathEntry<C>>>,
}

impl<C: Copy> ShortestPaths<C> {
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Number of vertices covered (the graph's vertex count)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for `vertex`, or `None` if it is unreachable or out of range
    pub fn get(&self, vertex: VertexId) -> Option<PathEntry<C>> {
        self.entries.get(vertex).copied().flatten()
    }

    pub fn distance(&self, vertex: VertexId) -> Option<C> {
        self.get(vertex).map(|entry| entry.distance)
    }

    pub fn predecessor(&self, vertex: VertexId) -> Option<VertexId> {
        self.get(vertex).and_then(|entry| entry.predecessor)
    }

    pub fn is_reachable(&self, vertex: VertexId) -> bool {
        self.get(vertex).is_some()
    }

    /// Number of reachable vertices, the source included
    pub fn reachable_count(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    /// Vertices of a shortest path from the source to `vertex`, both inclusive
    pub fn path_to(&self, vertex: VertexId) -> Option<Vec<VertexId>> {
        let mut current = self.get(vertex)?;
        let mut path = vec![vertex];
        while let Some(previous) = current.predecessor {
            path.push(previous);
            current = self.get(previous)?;
        }
        path.reverse();
        Some(path)
    }

    /// `(vertex, entry)` pairs for every vertex, in vertex order
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, Option<PathEntry<C>>)> + '_ {
        self.entries.iter().copied().enumerate()
    }
}

/// Builder for shortest-path queries.
///
/// Provides a fluent API for configuring and running a search.
pub struct ShortestPathBuilder<C> {
    source: VertexId,
    max_distance: Option<C>,
}

impl<C: Cost> ShortestPathBuilder<C> {
    /// Creates a new builder searching from `source`.
    pub fn new(source: VertexId) -> Self {
        ShortestPathBuilder {
            source,
            max_distance: None,
        }
    }

    /// Treats vertices farther than `cost` as unreachable and stops early.
    pub fn max_distance(mut self, cost: C) -> Self {
        self.max_distance = Some(cost);
        self
    }

    /// Runs Dijkstra's algorithm on a [`FibonacciHeap`].
    pub fn run(self, graph: &Graph<C>) -> Result<ShortestPaths<C>, ShortestPathError> {
        self.run_with::<FibonacciHeap<VertexId, Distance<C>>>(graph)
    }

    /// Runs Dijkstra's algorithm on the heap type `H`.
    ///
    /// A relaxation whose sum overflows `C` is skipped, since it cannot beat
    /// any representable distance.
    ///
    /// # Errors
    /// - [`ShortestPathError::Graph`] if the source is not a vertex of `graph`
    /// - [`ShortestPathError::Heap`] if `H` rejects a `decrease_key`
    /// - [`ShortestPathError::DistanceOverflow`] if, without a distance limit,
    ///   a vertex is reachable only through overflowing paths
    pub fn run_with<H>(self, graph: &Graph<C>) -> Result<ShortestPaths<C>, ShortestPathError>
    where
        H: DecreaseKeyHeap<VertexId, Distance<C>>,
    {
        let source = self.source;
        graph.check_vertex(source)?;
        let vertex_count = graph.vertex_count();
        tracing::debug!(source, vertex_count, "computing shortest paths");

        let mut distance = vec![Distance::Infinite; vertex_count];
        let mut predecessor: Vec<Option<VertexId>> = vec![None; vertex_count];
        let mut settled = vec![false; vertex_count];
        let mut overflowed = vec![false; vertex_count];
        distance[source] = Distance::Finite(C::default());

        let mut heap = H::new();
        let handles: Vec<H::Handle> = (0..vertex_count)
            .map(|vertex| heap.push_with_handle(distance[vertex], vertex))
            .collect();

        while let Some((priority, u)) = heap.pop() {
            let Distance::Finite(du) = priority else {
                // Everything left is unreachable.
                break;
            };
            if self.max_distance.is_some_and(|limit| du > limit) {
                break;
            }
            settled[u] = true;
            tracing::trace!(vertex = u, "settled vertex");

            for edge in graph.edges_from(u) {
                let v = edge.to;
                if settled[v] {
                    continue;
                }
                let Some(sum) = du.checked_add(edge.weight) else {
                    tracing::trace!(from = u, to = v, "skipped overflowing relaxation");
                    overflowed[v] = true;
                    continue;
                };
                let candidate = Distance::Finite(sum);
                if candidate < distance[v] {
                    // Unsettled vertices are still in the heap.
                    heap.decrease_key(&handles[v], candidate)?;
                    distance[v] = candidate;
                    predecessor[v] = Some(u);
                }
            }
        }

        if self.max_distance.is_none() {
            let lost = (0..vertex_count).find(|&v| overflowed[v] && !settled[v]);
            if let Some(vertex) = lost {
                tracing::warn!(vertex, "vertex reachable only through overflowing paths");
                return Err(ShortestPathError::DistanceOverflow { vertex });
            }
        }

        let entries: Vec<Option<PathEntry<C>>> = (0..vertex_count)
            .map(|vertex| {
                let cost = distance[vertex].finite().filter(|_| settled[vertex])?;
                Some(PathEntry {
                    predecessor: predecessor[vertex],
                    distance: cost,
                })
            })
            .collect();

        let paths = ShortestPaths { source, entries };
        tracing::debug!(
            source,
            reachable = paths.reachable_count(),
            "shortest paths complete"
        );
        Ok(paths)
    }
}

/// Computes shortest paths from `source` to every vertex of `graph`.
///
/// The source's entry has distance zero and no predecessor. Edge weights must
/// be non-negative; with negative weights the result is unspecified.
///
/// # Errors
/// - [`ShortestPathError::Graph`] if `source >= graph.vertex_count()`
/// - [`ShortestPathError::DistanceOverflow`] if some vertex is reachable only
///   through paths whose length overflows `C`
pub fn shortest_paths<C: Cost>(
    graph: &Graph<C>,
    source: VertexId,
) -> Result<ShortestPaths<C>, ShortestPathError> {
    ShortestPathBuilder::new(source).run(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_graph() -> Graph<OrderedFloat<f64>> {
        let edges = [
            (0, 1, 3.0),
            (0, 2, 1.0),
            (1, 2, 7.0),
            (1, 3, 5.0),
            (1, 4, 1.0),
            (2, 3, 2.0),
            (3, 4, 7.0),
        ];
        Graph::undirected(5, edges.map(|(u, v, w)| (u, v, OrderedFloat(w)))).unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let paths = shortest_paths(&reference_graph(), 2).unwrap();

        let distances: Vec<f64> = (0..5).map(|v| paths.distance(v).unwrap().0).collect();
        assert_eq!(distances, vec![1.0, 4.0, 0.0, 2.0, 5.0]);

        let predecessors: Vec<Option<usize>> = (0..5).map(|v| paths.predecessor(v)).collect();
        assert_eq!(predecessors, vec![Some(2), Some(0), None, Some(2), Some(1)]);
    }

    #[test]
    fn test_source_entry() {
        let paths = shortest_paths(&reference_graph(), 2).unwrap();
        assert_eq!(
            paths.get(2),
            Some(PathEntry {
                predecessor: None,
                distance: OrderedFloat(0.0)
            })
        );
        assert_eq!(paths.path_to(2), Some(vec![2]));
        assert_eq!(paths.path_to(4), Some(vec![2, 0, 1, 4]));
    }

    #[test]
    fn test_isolated_vertex_unreachable() {
        let graph = Graph::undirected(3, [(0, 1, 1u32)]).unwrap();
        let paths = shortest_paths(&graph, 0).unwrap();
        assert!(!paths.is_reachable(2));
        assert_eq!(paths.get(2), None);
        assert_eq!(paths.path_to(2), None);
        assert_eq!(paths.reachable_count(), 2);
    }

    #[test]
    fn test_directed_edges_are_one_way() {
        let graph = Graph::directed(3, [(0, 1, 1u32), (2, 1, 1)]).unwrap();
        let paths = shortest_paths(&graph, 1).unwrap();
        assert_eq!(paths.reachable_count(), 1);
        assert!(!paths.is_reachable(0));
    }

    #[test]
    fn test_source_out_of_range() {
        let graph = Graph::undirected(2, [(0, 1, 1u32)]).unwrap();
        assert_eq!(
            shortest_paths(&graph, 2).unwrap_err(),
            ShortestPathError::Graph(GraphError::VertexOutOfRange {
                vertex: 2,
                vertex_count: 2
            })
        );
    }

    #[test]
    fn test_overflowing_path_is_an_error() {
        let graph = Graph::directed(3, [(0, 1, u32::MAX - 1), (1, 2, 5)]).unwrap();
        assert_eq!(
            shortest_paths(&graph, 0).unwrap_err(),
            ShortestPathError::DistanceOverflow { vertex: 2 }
        );
    }

    #[test]
    fn test_overflowing_relaxation_is_skipped() {
        let graph =
            Graph::directed(3, [(0, 1, u32::MAX - 1), (0, 2, u32::MAX), (1, 2, 5)]).unwrap();
        let paths = shortest_paths(&graph, 0).unwrap();
        assert_eq!(paths.distance(1), Some(u32::MAX - 1));
        assert_eq!(paths.distance(2), Some(u32::MAX));
        assert_eq!(paths.predecessor(2), Some(0));
    }

    #[test]
    fn test_overflow_beyond_limit_is_unreachable() {
        let graph = Graph::directed(3, [(0, 1, u32::MAX - 1), (1, 2, 5)]).unwrap();
        let paths = ShortestPathBuilder::new(0)
            .max_distance(u32::MAX - 1)
            .run(&graph)
            .unwrap();
        assert!(!paths.is_reachable(2));
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(Cost::checked_add(u8::MAX, 1), None);
        assert_eq!(Cost::checked_add(2u64, 3), Some(5));
        assert_eq!(
            Cost::checked_add(OrderedFloat(f64::MAX), OrderedFloat(f64::MAX)),
            Some(OrderedFloat(f64::INFINITY))
        );
    }

    #[test]
    fn test_decrease_key_finds_cheaper_route() {
        //   0 --10-> 1 --1-> 3
        //   |        ^
        //   1        5
        //   v        |
        //   2 -------+
        let graph = Graph::directed(4, [(0, 1, 10u32), (0, 2, 1), (1, 3, 1), (2, 1, 5)]).unwrap();
        let paths = shortest_paths(&graph, 0).unwrap();
        assert_eq!(paths.distance(3), Some(7));
        assert_eq!(paths.path_to(3), Some(vec![0, 2, 1, 3]));
    }

    #[test]
    fn test_max_distance_cutoff() {
        let graph = Graph::directed(4, [(0, 1, 1u32), (1, 2, 1), (2, 3, 1)]).unwrap();
        let paths = ShortestPathBuilder::new(0)
            .max_distance(2)
            .run(&graph)
            .unwrap();
        assert_eq!(paths.distance(2), Some(2));
        assert!(!paths.is_reachable(3));
    }

    #[test]
    fn test_distance_ordering() {
        assert!(Distance::Finite(u32::MAX) < Distance::Infinite);
        assert!(Distance::Finite(1) < Distance::Finite(2));
        assert_eq!(Distance::<u32>::Infinite.finite(), None);
    }
}
