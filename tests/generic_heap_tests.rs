//! Generic tests for `DecreaseKeyHeap` implementations
//!
//! The helpers work with any heap implementing the trait interface; each is
//! instantiated for `FibonacciHeap` at the bottom of the file.

use fibonacci_sssp::fibonacci::FibonacciHeap;
use fibonacci_sssp::{DecreaseKeyHeap, Heap, HeapError};

/// Test that empty heap behaves correctly
fn test_empty_heap<H: Heap<String, i32>>() {
    let mut heap = H::new();
    assert!(heap.is_empty());
    assert_eq!(heap.len(), 0);
    assert_eq!(heap.peek(), None);
    assert_eq!(heap.pop(), None);
}

/// Inserting [5, 3, 8, 1, 9, 2] and draining yields sorted order
fn test_sorted_drain<H: Heap<(), i32>>() {
    let mut heap = H::new();
    for key in [5, 3, 8, 1, 9, 2] {
        heap.push(key, ());
    }

    let drained: Vec<i32> = std::iter::from_fn(|| heap.pop().map(|(key, _)| key)).collect();
    assert_eq!(drained, vec![1, 2, 3, 5, 8, 9]);
    assert!(heap.is_empty());
}

/// Decreasing the node holding 30 to 1 makes it the minimum
fn test_decrease_to_new_min<H: DecreaseKeyHeap<&'static str, i32>>() {
    let mut heap = H::new();
    heap.push_with_handle(10, "ten");
    heap.push_with_handle(20, "twenty");
    let thirty = heap.push_with_handle(30, "thirty");

    heap.decrease_key(&thirty, 1).unwrap();
    assert_eq!(heap.peek(), Some((&1, &"thirty")));
}

/// Removing the node holding 2 leaves [4, 7]
fn test_remove_current_min<H: DecreaseKeyHeap<(), i32>>() {
    let mut heap = H::new();
    heap.push_with_handle(4, ());
    let two = heap.push_with_handle(2, ());
    heap.push_with_handle(7, ());

    assert_eq!(heap.remove(&two), Ok((2, ())));
    assert_eq!(heap.pop(), Some((4, ())));
    assert_eq!(heap.pop(), Some((7, ())));
    assert_eq!(heap.pop(), None);
}

/// Peeking twice without mutation returns the same value
fn test_peek_idempotent<H: Heap<u8, i32>>() {
    let mut heap = H::new();
    heap.push(3, 0);
    heap.push(1, 1);
    let first = heap.peek().map(|(p, i)| (*p, *i));
    let second = heap.peek().map(|(p, i)| (*p, *i));
    assert_eq!(first, second);
    assert_eq!(heap.len(), 2);
}

/// Test decrease_key operations extensively
fn test_decrease_key_operations<H: DecreaseKeyHeap<i32, i32>>() {
    let mut heap = H::new();

    let _h1 = heap.push_with_handle(100, 1);
    let h2 = heap.push_with_handle(200, 2);
    let _h3 = heap.push_with_handle(300, 3);
    let h4 = heap.push_with_handle(400, 4);

    assert_eq!(heap.peek(), Some((&100, &1)));

    // Decrease key of element not at min
    heap.decrease_key(&h2, 50).unwrap();
    assert_eq!(heap.peek(), Some((&50, &2)));

    // Decrease key to become new min
    heap.decrease_key(&h4, 25).unwrap();
    assert_eq!(heap.peek(), Some((&25, &4)));

    // Decrease key of current min even more
    heap.decrease_key(&h4, 1).unwrap();
    assert_eq!(heap.peek(), Some((&1, &4)));

    assert_eq!(heap.pop(), Some((1, 4)));
    assert_eq!(heap.pop(), Some((50, 2)));
    assert_eq!(heap.pop(), Some((100, 1)));
    assert_eq!(heap.pop(), Some((300, 3)));
}

/// Decrease keys after a pop, when the survivors sit inside trees
fn test_decrease_key_inside_trees<H: DecreaseKeyHeap<i32, i32>>() {
    let mut heap = H::new();
    let mut handles = Vec::new();

    for i in 0..20 {
        handles.push(heap.push_with_handle((i + 1) * 100, i));
    }
    assert_eq!(heap.pop(), Some((100, 0)));

    // Reverse the order of everything left.
    for (i, handle) in handles.iter().enumerate().skip(1) {
        heap.decrease_key(handle, 20 - i as i32).unwrap();
    }

    for i in (1..20).rev() {
        assert_eq!(heap.pop(), Some((20 - i, i)));
    }
    assert!(heap.is_empty());
}

/// Increasing a key is rejected and leaves the heap untouched
fn test_increase_rejected<H: DecreaseKeyHeap<char, i32>>() {
    let mut heap = H::new();
    let handle = heap.push_with_handle(5, 'a');
    heap.push_with_handle(6, 'b');

    assert_eq!(
        heap.decrease_key(&handle, 9),
        Err(HeapError::PriorityNotDecreased)
    );
    assert_eq!(heap.pop(), Some((5, 'a')));
    assert_eq!(heap.pop(), Some((6, 'b')));
}

/// Handles die with their element
fn test_handle_after_pop<H: DecreaseKeyHeap<char, i32>>() {
    let mut heap = H::new();
    let handle = heap.push_with_handle(1, 'a');
    heap.push_with_handle(2, 'b');
    heap.pop();

    assert_eq!(heap.decrease_key(&handle, 0), Err(HeapError::InvalidHandle));
    assert_eq!(heap.remove(&handle), Err(HeapError::InvalidHandle));
    assert_eq!(heap.len(), 1);
}

/// Test merge operations
fn test_merge_operations<H: Heap<&'static str, i32>>() {
    let mut heap1 = H::new();
    heap1.push(5, "five");
    heap1.push(1, "one");

    let mut heap2 = H::new();
    heap2.push(10, "ten");
    heap2.push(0, "zero");

    heap1.merge(heap2);
    assert_eq!(heap1.len(), 4);
    assert_eq!(heap1.pop(), Some((0, "zero")));
    assert_eq!(heap1.pop(), Some((1, "one")));
    assert_eq!(heap1.pop(), Some((5, "five")));
    assert_eq!(heap1.pop(), Some((10, "ten")));
}

/// Duplicate priorities come out the right number of times
fn test_duplicate_priorities<H: Heap<usize, i32>>() {
    let mut heap = H::new();
    for i in 0..10 {
        heap.push(i as i32 % 3, i);
    }
    let keys: Vec<i32> = std::iter::from_fn(|| heap.pop().map(|(key, _)| key)).collect();
    assert_eq!(keys, vec![0, 0, 0, 0, 1, 1, 1, 2, 2, 2]);
}

#[test]
fn test_fibonacci_empty_heap() {
    test_empty_heap::<FibonacciHeap<String, i32>>();
}

#[test]
fn test_fibonacci_sorted_drain() {
    test_sorted_drain::<FibonacciHeap<(), i32>>();
}

#[test]
fn test_fibonacci_decrease_to_new_min() {
    test_decrease_to_new_min::<FibonacciHeap<&'static str, i32>>();
}

#[test]
fn test_fibonacci_remove_current_min() {
    test_remove_current_min::<FibonacciHeap<(), i32>>();
}

#[test]
fn test_fibonacci_peek_idempotent() {
    test_peek_idempotent::<FibonacciHeap<u8, i32>>();
}

#[test]
fn test_fibonacci_decrease_key_operations() {
    test_decrease_key_operations::<FibonacciHeap<i32, i32>>();
}

#[test]
fn test_fibonacci_decrease_key_inside_trees() {
    test_decrease_key_inside_trees::<FibonacciHeap<i32, i32>>();
}

#[test]
fn test_fibonacci_increase_rejected() {
    test_increase_rejected::<FibonacciHeap<char, i32>>();
}

#[test]
fn test_fibonacci_handle_after_pop() {
    test_handle_after_pop::<FibonacciHeap<char, i32>>();
}

#[test]
fn test_fibonacci_merge_operations() {
    test_merge_operations::<FibonacciHeap<&'static str, i32>>();
}

#[test]
fn test_fibonacci_duplicate_priorities() {
    test_duplicate_priorities::<FibonacciHeap<usize, i32>>();
}
