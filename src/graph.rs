//! Static weighted graphs stored as adjacency lists
//!
//! Vertices are the integers `0..vertex_count`. A graph is built once from an
//! edge list and never mutated afterwards. Undirected graphs store every edge
//! in both directions; directed graphs store only the forward arc.
//!
//! Duplicate edges, self-loops and negative weights are accepted as given.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_sssp::graph::{Direction, Graph};
//!
//! let graph = Graph::new(3, [(0, 1, 4u32), (1, 2, 1)], Direction::Undirected).unwrap();
//! assert_eq!(graph.vertex_count(), 3);
//! assert_eq!(graph.adjacency(1).unwrap().len(), 2);
//! ```

use thiserror::Error;

/// Vertex identifier, in `0..vertex_count`
pub type VertexId = usize;

/// Errors raised when building or querying a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex id is not below the graph's vertex count
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange {
        vertex: VertexId,
        vertex_count: usize,
    },
}

/// Whether edges are one-way arcs or two-way connections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Directed,
    Undirected,
}

/// Outgoing edge in an adjacency list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<W> {
    pub to: VertexId,
    pub weight: W,
}

/// Immutable adjacency-list graph
#[derive(Debug, Clone)]
pub struct Graph<W> {
    adjacency: Vec<Vec<Edge<W>>>,
    direction: Direction,
    edge_count: usize,
}

impl<W: Copy> Graph<W> {
    /// Builds a graph from `(from, to, weight)` triples
    ///
    /// # Errors
    /// [`GraphError::VertexOutOfRange`] if any endpoint is `>= vertex_count`.
    ///
    /// # Time Complexity
    /// O(V + E)
    pub fn new<I>(vertex_count: usize, edges: I, direction: Direction) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (VertexId, VertexId, W)>,
    {
        let mut adjacency = vec![Vec::new(); vertex_count];
        let mut edge_count = 0;

        for (from, to, weight) in edges {
            for vertex in [from, to] {
                if vertex >= vertex_count {
                    return Err(GraphError::VertexOutOfRange {
                        vertex,
                        vertex_count,
                    });
                }
            }
            adjacency[from].push(Edge { to, weight });
            if direction == Direction::Undirected {
                adjacency[to].push(Edge { to: from, weight });
            }
            edge_count += 1;
        }

        Ok(Graph {
            adjacency,
            direction,
            edge_count,
        })
    }

    /// Builds a directed graph
    pub fn directed<I>(vertex_count: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (VertexId, VertexId, W)>,
    {
        Self::new(vertex_count, edges, Direction::Directed)
    }

    /// Builds an undirected graph
    pub fn undirected<I>(vertex_count: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (VertexId, VertexId, W)>,
    {
        Self::new(vertex_count, edges, Direction::Undirected)
    }
}

impl<W> Graph<W> {
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges supplied at construction (an undirected edge counts once)
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Outgoing edges of `vertex`, in insertion order
    ///
    /// # Errors
    /// [`GraphError::VertexOutOfRange`] if `vertex >= vertex_count()`.
    pub fn adjacency(&self, vertex: VertexId) -> Result<&[Edge<W>], GraphError> {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .ok_or(GraphError::VertexOutOfRange {
                vertex,
                vertex_count: self.vertex_count(),
            })
    }

    /// Returns `Ok(())` if `vertex` is a vertex of this graph
    pub fn check_vertex(&self, vertex: VertexId) -> Result<(), GraphError> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }

    pub(crate) fn edges_from(&self, vertex: VertexId) -> &[Edge<W>] {
        &self.adjacency[vertex]
    }
}
