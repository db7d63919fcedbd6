//! Optional step tracing for heap internals
//!
//! The heap never prints anything on its own. Callers that want to watch the
//! structural work a Fibonacci heap does (links during consolidation, cuts,
//! marks, min-pointer moves) install a [`HeapObserver`]. Any
//! `FnMut(HeapEvent)` closure is an observer; [`TracingObserver`] forwards
//! every event to `tracing` at trace level.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_sssp::fibonacci::FibonacciHeap;
//! use fibonacci_sssp::observer::HeapEvent;
//! use std::sync::{Arc, Mutex};
//!
//! let links = Arc::new(Mutex::new(0));
//! let counter = Arc::clone(&links);
//! let mut heap = FibonacciHeap::new().with_observer(move |event: HeapEvent| {
//!     if let HeapEvent::Linked { .. } = event {
//!         *counter.lock().unwrap() += 1;
//!     }
//! });
//!
//! for i in 0..5 {
//!     heap.insert(i, ());
//! }
//! heap.extract_min();
//! // four singleton roots consolidate into one tree of degree 2
//! assert_eq!(*links.lock().unwrap(), 3);
//! ```

use crate::fibonacci::FibonacciHandle;

/// A structural step taken by the heap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapEvent {
    /// `child` was made a child of `parent` during consolidation
    Linked {
        parent: FibonacciHandle,
        child: FibonacciHandle,
    },
    /// `node` was detached from `parent` and moved to the root ring
    Cut {
        node: FibonacciHandle,
        parent: FibonacciHandle,
    },
    /// `node` lost its first child since becoming a non-root
    Marked { node: FibonacciHandle },
    /// The min pointer moved to `node`
    MinChanged { node: FibonacciHandle },
    /// Consolidation finished with `roots` trees of pairwise distinct degree
    Consolidated { roots: usize },
}

/// Receiver of [`HeapEvent`]s
pub trait HeapObserver {
    fn on_event(&mut self, event: HeapEvent);
}

impl<F> HeapObserver for F
where
    F: FnMut(HeapEvent),
{
    fn on_event(&mut self, event: HeapEvent) {
        self(event)
    }
}

/// Observer that logs every event with `tracing::trace!`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl HeapObserver for TracingObserver {
    fn on_event(&mut self, event: HeapEvent) {
        match event {
            HeapEvent::Linked { parent, child } => {
                tracing::trace!(?parent, ?child, "linked trees");
            }
            HeapEvent::Cut { node, parent } => {
                tracing::trace!(?node, ?parent, "cut node to root ring");
            }
            HeapEvent::Marked { node } => {
                tracing::trace!(?node, "marked node");
            }
            HeapEvent::MinChanged { node } => {
                tracing::trace!(?node, "min pointer moved");
            }
            HeapEvent::Consolidated { roots } => {
                tracing::trace!(roots, "consolidated root ring");
            }
        }
    }
}
