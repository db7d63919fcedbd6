//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) insert, peek and decrease_key (decrease_key amortized)
//! - O(log n) amortized extract_min and remove
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list (the root ring), and the children of every
//! node form a ring of their own. The heap maintains the minimum root.
//!
//! # Storage
//!
//! All nodes live in a `slotmap` arena owned by the heap. Parent, child and
//! sibling links are arena keys, never references, so the cyclic rings carry no
//! ownership and need no `unsafe`. Callers receive a [`FibonacciHandle`]: the
//! arena key plus the id of the issuing heap. Generational keys make a handle
//! to an extracted node detectably stale, and the heap id rejects handles from
//! other heaps.

use crate::observer::{HeapEvent, HeapObserver};
use crate::rank::{checked_increment, max_degree_bound, saturating_decrement, Rank};
use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

new_key_type! {
    /// Arena key of a heap node
    struct NodeKey;
}

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

/// Handle to an element in a Fibonacci heap
///
/// A handle stays valid until its element is extracted or removed. Using it
/// afterwards, or with a different heap, yields an error instead of touching
/// another element.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    heap: u64,
    node: NodeKey,
}

impl Handle for FibonacciHandle {}

struct Node<T, P> {
    item: T,
    priority: P,
    parent: Option<NodeKey>,
    child: Option<NodeKey>,
    left: NodeKey,
    right: NodeKey,
    degree: Rank,
    marked: bool,
}

/// Structural defect reported by [`FibonacciHeap::check_invariants`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("heap holds nodes but has no min pointer")]
    MissingMin,
    #[error("min pointer references a node that is not in the heap")]
    DanglingMin,
    #[error("min pointer references a non-root node")]
    MinNotRoot,
    #[error("root {node:?} has a smaller priority than the min root")]
    MinNotMinimal { node: FibonacciHandle },
    #[error("sibling ring through {node:?} is not a consistent circular list")]
    BrokenRing { node: FibonacciHandle },
    #[error("node {node:?} has the wrong parent link")]
    WrongParent { node: FibonacciHandle },
    #[error("node {node:?} has a smaller priority than its parent")]
    HeapOrder { node: FibonacciHandle },
    #[error("node {node:?} records degree {recorded} but has {actual} children")]
    DegreeMismatch {
        node: FibonacciHandle,
        recorded: Rank,
        actual: usize,
    },
    #[error("root {node:?} is marked")]
    MarkedRoot { node: FibonacciHandle },
    #[error("{reachable} nodes reachable from the root ring but heap holds {len}")]
    CountMismatch { reachable: usize, len: usize },
}

type Ring = SmallVec<[NodeKey; 16]>;

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use fibonacci_sssp::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5, "item");
/// heap.insert(3, "other");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.peek_min(), Some((&1, &"item")));
/// assert_eq!(heap.extract_min(), Some((1, "item")));
/// ```
pub struct FibonacciHeap<T, P: Ord> {
    nodes: SlotMap<NodeKey, Node<T, P>>,
    min: Option<NodeKey>,
    id: u64,
    observer: Option<Box<dyn HeapObserver + Send>>,
}

impl<T, P: Ord> FibonacciHeap<T, P> {
    /// Creates an empty heap
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty heap with room for `capacity` nodes before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        FibonacciHeap {
            nodes: SlotMap::with_capacity_and_key(capacity),
            min: None,
            id: NEXT_HEAP_ID.fetch_add(1, Ordering::Relaxed),
            observer: None,
        }
    }

    /// Installs an observer that receives every [`HeapEvent`]
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: HeapObserver + Send + 'static,
    {
        self.set_observer(observer);
        self
    }

    /// Installs an observer, replacing any previous one
    pub fn set_observer<O>(&mut self, observer: O)
    where
        O: HeapObserver + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    /// Removes the installed observer, if any
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Inserts an element as a singleton tree in the root ring
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, priority: P, item: T) -> FibonacciHandle {
        let key = self.nodes.insert_with_key(|key| Node {
            item,
            priority,
            parent: None,
            child: None,
            left: key,
            right: key,
            degree: 0,
            marked: false,
        });
        self.add_root(key);
        self.handle(key)
    }

    /// Returns the minimum priority and its item without removing them
    pub fn peek_min(&self) -> Option<(&P, &T)> {
        self.min.map(|key| {
            let node = &self.nodes[key];
            (&node.priority, &node.item)
        })
    }

    /// Removes and returns the minimum priority and its item
    ///
    /// The children of the extracted node join the root ring, then trees of
    /// equal degree are linked until every root degree is distinct.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_min(&mut self) -> Option<(P, T)> {
        let min = self.min?;
        self.extract_root(min)
    }

    /// Lowers the priority of the element behind `handle`
    ///
    /// A root only needs the min pointer refreshed. A child whose new priority
    /// drops below its parent's is cut to the root ring, followed by a
    /// cascading cut up through marked ancestors.
    ///
    /// # Errors
    /// - [`HeapError::PriorityNotDecreased`] if `new_priority` is greater than the
    ///   current priority (equal is accepted)
    /// - [`HeapError::InvalidHandle`] if the element is no longer in the heap
    /// - [`HeapError::ForeignHandle`] if the handle came from another heap
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key(
        &mut self,
        handle: &FibonacciHandle,
        new_priority: P,
    ) -> Result<(), HeapError> {
        let key = self.resolve(handle)?;
        if new_priority > self.nodes[key].priority {
            return Err(HeapError::PriorityNotDecreased);
        }
        self.nodes[key].priority = new_priority;

        match self.nodes[key].parent {
            None => {
                if self.is_below_min(key) {
                    self.set_min(key);
                }
            }
            Some(parent) => {
                if self.nodes[key].priority < self.nodes[parent].priority {
                    self.cut(key, parent);
                    self.cascading_cut(parent);
                }
            }
        }
        Ok(())
    }

    /// Removes the element behind `handle` and returns it
    ///
    /// The node is cut to the root ring (cascading as for `decrease_key`), then
    /// taken out of the ring the same way `extract_min` takes out the minimum.
    /// No sentinel priority value is required, and the min pointer only moves
    /// if the removed node was the minimum.
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] or [`HeapError::ForeignHandle`] as for
    /// [`decrease_key`](Self::decrease_key).
    pub fn remove(&mut self, handle: &FibonacciHandle) -> Result<(P, T), HeapError> {
        let key = self.resolve(handle)?;
        if let Some(parent) = self.nodes[key].parent {
            self.cut(key, parent);
            self.cascading_cut(parent);
        }
        self.extract_root(key).ok_or(HeapError::InvalidHandle)
    }

    /// Moves every element of `other` into this heap
    ///
    /// Handles issued by this heap stay valid. Handles issued by `other` are
    /// reported as [`HeapError::ForeignHandle`] afterwards.
    ///
    /// # Time Complexity
    /// O(other.len())
    pub fn merge(&mut self, other: Self) {
        self.absorb(other);
    }

    /// Returns the priority and item behind `handle`, if it is still in the heap
    pub fn get(&self, handle: &FibonacciHandle) -> Option<(&P, &T)> {
        let key = self.resolve(handle).ok()?;
        let node = &self.nodes[key];
        Some((&node.priority, &node.item))
    }

    /// Returns true if `handle` names an element currently in this heap
    pub fn contains(&self, handle: &FibonacciHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Removes every element; all outstanding handles become invalid
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.min = None;
    }

    /// Degrees of the trees in the root ring, starting at the minimum
    pub fn root_degrees(&self) -> Vec<Rank> {
        match self.min {
            Some(min) => self
                .ring(min)
                .into_iter()
                .map(|key| self.nodes[key].degree)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Walks the whole forest and verifies every structural invariant
    ///
    /// Intended for tests and debugging; runs in O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let Some(min) = self.min else {
            return if self.nodes.is_empty() {
                Ok(())
            } else {
                Err(InvariantViolation::MissingMin)
            };
        };
        let min_node = self.nodes.get(min).ok_or(InvariantViolation::DanglingMin)?;
        if min_node.parent.is_some() {
            return Err(InvariantViolation::MinNotRoot);
        }

        let mut stack = Vec::new();
        for root in self.checked_ring(min)? {
            let node = &self.nodes[root];
            if node.parent.is_some() {
                return Err(InvariantViolation::WrongParent {
                    node: self.handle(root),
                });
            }
            if node.marked {
                return Err(InvariantViolation::MarkedRoot {
                    node: self.handle(root),
                });
            }
            if node.priority < min_node.priority {
                return Err(InvariantViolation::MinNotMinimal {
                    node: self.handle(root),
                });
            }
            stack.push(root);
        }

        let mut reachable = 0;
        while let Some(key) = stack.pop() {
            reachable += 1;
            let node = &self.nodes[key];
            let children = match node.child {
                Some(first) => self.checked_ring(first)?,
                None => Vec::new(),
            };
            if children.len() != node.degree as usize {
                return Err(InvariantViolation::DegreeMismatch {
                    node: self.handle(key),
                    recorded: node.degree,
                    actual: children.len(),
                });
            }
            for child in children {
                let child_node = &self.nodes[child];
                if child_node.parent != Some(key) {
                    return Err(InvariantViolation::WrongParent {
                        node: self.handle(child),
                    });
                }
                if child_node.priority < node.priority {
                    return Err(InvariantViolation::HeapOrder {
                        node: self.handle(child),
                    });
                }
                stack.push(child);
            }
        }

        if reachable != self.nodes.len() {
            return Err(InvariantViolation::CountMismatch {
                reachable,
                len: self.nodes.len(),
            });
        }
        Ok(())
    }

    /// Removes root `key`, promotes its children to roots, finds the minimum
    /// of the remaining ring and consolidates.
    fn extract_root(&mut self, key: NodeKey) -> Option<(P, T)> {
        if let Some(first) = self.nodes[key].child.take() {
            for child in self.ring(first) {
                self.unlink(child);
                let node = &mut self.nodes[child];
                node.parent = None;
                node.marked = false;
                self.splice_before(key, child);
            }
            self.nodes[key].degree = 0;
        }

        let next = self.unlink(key);
        let node = self.nodes.remove(key)?;

        match next {
            None => self.min = None,
            Some(start) => {
                let mut best = start;
                let mut current = self.nodes[start].right;
                while current != start {
                    if self.nodes[current].priority < self.nodes[best].priority {
                        best = current;
                    }
                    current = self.nodes[current].right;
                }
                self.set_min(best);
                self.consolidate(best);
            }
        }

        Some((node.priority, node.item))
    }

    fn handle(&self, node: NodeKey) -> FibonacciHandle {
        FibonacciHandle {
            heap: self.id,
            node,
        }
    }

    fn resolve(&self, handle: &FibonacciHandle) -> Result<NodeKey, HeapError> {
        if handle.heap != self.id {
            Err(HeapError::ForeignHandle)
        } else if self.nodes.contains_key(handle.node) {
            Ok(handle.node)
        } else {
            Err(HeapError::InvalidHandle)
        }
    }

    fn notify(&mut self, event: HeapEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(event);
        }
    }

    fn set_min(&mut self, key: NodeKey) {
        if self.min != Some(key) {
            self.min = Some(key);
            let node = self.handle(key);
            self.notify(HeapEvent::MinChanged { node });
        }
    }

    fn is_below_min(&self, key: NodeKey) -> bool {
        match self.min {
            Some(min) => self.nodes[key].priority < self.nodes[min].priority,
            None => true,
        }
    }

    /// Collects the ring containing `start`, walking rightwards from it.
    fn ring(&self, start: NodeKey) -> Ring {
        let mut keys = Ring::new();
        let mut current = start;
        loop {
            keys.push(current);
            current = self.nodes[current].right;
            if current == start {
                return keys;
            }
        }
    }

    /// Like `ring`, but bounded and checking that left/right links agree.
    fn checked_ring(&self, start: NodeKey) -> Result<Vec<NodeKey>, InvariantViolation> {
        let broken = InvariantViolation::BrokenRing {
            node: self.handle(start),
        };
        let mut keys = Vec::new();
        let mut current = start;
        loop {
            let node = self.nodes.get(current).ok_or(broken)?;
            let right = self.nodes.get(node.right).ok_or(broken)?;
            if right.left != current || keys.len() >= self.nodes.len() {
                return Err(broken);
            }
            keys.push(current);
            current = node.right;
            if current == start {
                return Ok(keys);
            }
        }
    }

    /// Inserts the singleton ring `key` immediately left of `anchor`.
    fn splice_before(&mut self, anchor: NodeKey, key: NodeKey) {
        let left = self.nodes[anchor].left;
        let node = &mut self.nodes[key];
        node.left = left;
        node.right = anchor;
        self.nodes[left].right = key;
        self.nodes[anchor].left = key;
    }

    /// Detaches `key` from its ring, leaving it a singleton ring.
    ///
    /// Returns the former right neighbour, or `None` if `key` was alone.
    fn unlink(&mut self, key: NodeKey) -> Option<NodeKey> {
        let (left, right) = {
            let node = &self.nodes[key];
            (node.left, node.right)
        };
        if right == key {
            return None;
        }
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        let node = &mut self.nodes[key];
        node.left = key;
        node.right = key;
        Some(right)
    }

    /// Splices a detached singleton into the root ring and refreshes the min.
    fn add_root(&mut self, key: NodeKey) {
        match self.min {
            None => self.set_min(key),
            Some(min) => {
                self.splice_before(min, key);
                if self.nodes[key].priority < self.nodes[min].priority {
                    self.set_min(key);
                }
            }
        }
    }

    /// Links trees until no two roots share a degree.
    ///
    /// Roots are visited in ring order. A root whose degree slot is taken is
    /// linked with the occupant and the survivor is looked up again at its new
    /// degree before the walk moves on.
    fn consolidate(&mut self, start: NodeKey) {
        let mut table: SmallVec<[Option<NodeKey>; 64]> =
            SmallVec::from_elem(None, max_degree_bound(self.len()));

        for root in self.ring(start) {
            let mut current = root;
            loop {
                let degree = self.nodes[current].degree as usize;
                if degree >= table.len() {
                    table.resize(degree + 1, None);
                }
                match table[degree].take() {
                    None => {
                        table[degree] = Some(current);
                        break;
                    }
                    // On equal priorities the root seen later becomes the child.
                    Some(seen) => {
                        if self.nodes[current].priority < self.nodes[seen].priority {
                            self.link(seen, current);
                        } else {
                            self.link(current, seen);
                            current = seen;
                        }
                    }
                }
            }
        }

        let roots = table.iter().flatten().count();
        self.notify(HeapEvent::Consolidated { roots });
    }

    /// Makes root `child` a child of root `parent`.
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        self.unlink(child);
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.marked = false;

        match self.nodes[parent].child {
            Some(first) => self.splice_before(first, child),
            None => self.nodes[parent].child = Some(child),
        }
        let parent_node = &mut self.nodes[parent];
        parent_node.degree = checked_increment(parent_node.degree);

        if self.min == Some(child) {
            self.set_min(parent);
        }
        let event = HeapEvent::Linked {
            parent: self.handle(parent),
            child: self.handle(child),
        };
        self.notify(event);
    }

    /// Detaches `key` from `parent` and moves it to the root ring.
    fn cut(&mut self, key: NodeKey, parent: NodeKey) {
        let next = self.unlink(key);
        let parent_node = &mut self.nodes[parent];
        if parent_node.child == Some(key) {
            parent_node.child = next;
        }
        parent_node.degree = saturating_decrement(parent_node.degree);

        let node = &mut self.nodes[key];
        node.parent = None;
        node.marked = false;

        let event = HeapEvent::Cut {
            node: self.handle(key),
            parent: self.handle(parent),
        };
        self.notify(event);
        self.add_root(key);
    }

    /// Walks up from `key`, cutting marked non-roots and marking the first
    /// unmarked one.
    fn cascading_cut(&mut self, mut key: NodeKey) {
        while let Some(parent) = self.nodes[key].parent {
            if !self.nodes[key].marked {
                self.nodes[key].marked = true;
                let node = self.handle(key);
                self.notify(HeapEvent::Marked { node });
                return;
            }
            self.cut(key, parent);
            key = parent;
        }
    }

    fn absorb(&mut self, mut other: Self) {
        let Some(other_min) = other.min.take() else {
            return;
        };

        let mut remap: FxHashMap<NodeKey, NodeKey> =
            FxHashMap::with_capacity_and_hasher(other.nodes.len(), Default::default());
        for (old, node) in other.nodes.drain() {
            let new = self.nodes.insert(node);
            remap.insert(old, new);
        }
        for &new in remap.values() {
            let node = &mut self.nodes[new];
            node.left = remap[&node.left];
            node.right = remap[&node.right];
            node.parent = node.parent.map(|key| remap[&key]);
            node.child = node.child.map(|key| remap[&key]);
        }

        let incoming = remap[&other_min];
        match self.min {
            None => self.set_min(incoming),
            Some(min) => {
                let min_left = self.nodes[min].left;
                let incoming_left = self.nodes[incoming].left;
                self.nodes[min_left].right = incoming;
                self.nodes[incoming].left = min_left;
                self.nodes[incoming_left].right = min;
                self.nodes[min].left = incoming_left;
                if self.nodes[incoming].priority < self.nodes[min].priority {
                    self.set_min(incoming);
                }
            }
        }
    }
}

impl<T, P: Ord> Default for FibonacciHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord + fmt::Debug> fmt::Debug for FibonacciHeap<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len())
            .field("min", &self.peek_min().map(|(priority, _)| priority))
            .field("roots", &self.root_degrees().len())
            .finish()
    }
}

impl<T, P: Ord> Extend<(P, T)> for FibonacciHeap<T, P> {
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        for (priority, item) in iter {
            self.insert(priority, item);
        }
    }
}

impl<T, P: Ord> FromIterator<(P, T)> for FibonacciHeap<T, P> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<T, P: Ord> Heap<T, P> for FibonacciHeap<T, P> {
    fn new() -> Self {
        FibonacciHeap::with_capacity(0)
    }

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, priority: P, item: T) {
        let _ = self.insert(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.peek_min()
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.extract_min()
    }

    fn merge(&mut self, other: Self) {
        self.absorb(other);
    }
}

impl<T, P: Ord> DecreaseKeyHeap<T, P> for FibonacciHeap<T, P> {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        self.insert(priority, item)
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, handle, new_priority)
    }

    fn remove(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError> {
        FibonacciHeap::remove(self, handle)
    }
}
