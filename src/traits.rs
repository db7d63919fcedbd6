//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for priority queues:
//!
//! - [`Heap`]: Base trait for simple heaps without handle support
//! - [`DecreaseKeyHeap`]: Extended trait adding `decrease_key`, `remove` and
//!   handle-based insertion
//!
//! The shortest-path driver in [`crate::pathfinding`] is written against
//! [`DecreaseKeyHeap`], so any backend implementing it can be substituted.

use thiserror::Error;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The new priority is greater than the current priority
    #[error("new priority is greater than the current priority")]
    PriorityNotDecreased,
    /// The handle is no longer valid (element was extracted or removed)
    #[error("handle is no longer valid (element was extracted or removed)")]
    InvalidHandle,
    /// The handle was issued by a different heap
    #[error("handle belongs to a different heap")]
    ForeignHandle,
}

/// A handle to an element in the heap, used for `decrease_key` and `remove`
///
/// This is an opaque type that identifies a specific element in the heap.
/// It never exposes the heap's internal links.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element (returns `()`)
/// - `pop` removes and returns the minimum
/// - `peek` returns the minimum without removing it
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these heaps
/// store (priority, item) pairs to separate the ordering key from the data.
///
/// # Example
///
/// ```rust
/// use fibonacci_sssp::Heap;
/// use fibonacci_sssp::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    fn pop(&mut self) -> Option<(P, T)>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with `decrease_key` and `remove` support
///
/// These operations are essential for algorithms like Dijkstra's shortest path
/// that need to update priorities of elements already in the heap.
///
/// # Example
///
/// ```rust
/// use fibonacci_sssp::{DecreaseKeyHeap, Heap};
/// use fibonacci_sssp::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push_with_handle(10, "item");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// The handle type for this heap
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    ///
    /// # Time Complexity
    /// Fibonacci Heap: O(1)
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Lowers the priority of the element identified by the handle
    ///
    /// Setting the priority to its current value is allowed and changes nothing.
    ///
    /// # Errors
    /// - `HeapError::PriorityNotDecreased` if `new_priority` is greater than
    ///   the current priority
    /// - `HeapError::InvalidHandle` / `HeapError::ForeignHandle` if the handle
    ///   does not name a live element of this heap
    ///
    /// # Time Complexity
    /// Fibonacci Heap: O(1) amortized
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;

    /// Removes the element identified by the handle, wherever it sits
    ///
    /// # Time Complexity
    /// Fibonacci Heap: O(log n) amortized
    fn remove(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError>;
}
