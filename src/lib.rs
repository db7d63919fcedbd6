//! Fibonacci heap and Dijkstra shortest paths for Rust
//!
//! This crate provides a Fibonacci heap with handle-based `decrease_key` and
//! `remove`, and uses it as the relaxation engine of Dijkstra's single-source
//! shortest-path algorithm over static weighted graphs.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) insert and peek; O(1) amortized decrease_key;
//!   O(log n) amortized extract-min and remove
//! - **Safe handles**: nodes live in an arena; handles are generational keys
//!   that report stale or foreign use as errors
//! - **Step tracing**: optional observers for links, cuts and marks
//! - **Shortest paths**: distances, predecessors and path reconstruction from
//!   a single source, over any [`pathfinding::Cost`] weight type
//!
//! # Example
//!
//! ```rust
//! use fibonacci_sssp::fibonacci::FibonacciHeap;
//! use fibonacci_sssp::graph::Graph;
//! use fibonacci_sssp::pathfinding::shortest_paths;
//! use fibonacci_sssp::OrderedFloat;
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.insert(5, "item1");
//! heap.insert(3, "item2");
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.peek_min(), Some((&1, &"item1")));
//!
//! let graph = Graph::undirected(
//!     3,
//!     [(0, 1, OrderedFloat(1.5)), (1, 2, OrderedFloat(2.0))],
//! ).unwrap();
//! let paths = shortest_paths(&graph, 0).unwrap();
//! assert_eq!(paths.distance(2), Some(OrderedFloat(3.5)));
//! ```

pub mod fibonacci;
pub mod graph;
pub mod observer;
pub mod pathfinding;
pub mod rank;
pub mod traits;

// Re-export the main traits for convenience
pub use traits::{DecreaseKeyHeap, Handle, Heap, HeapError};

pub use ordered_float::OrderedFloat;
