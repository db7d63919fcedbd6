//! Degree type and utilities for Fibonacci heap nodes.
//!
//! # Why u8?
//!
//! The degree of a node in a Fibonacci heap is its number of children. A node
//! of degree `d` roots a subtree holding at least `F(d + 2) >= φ^d` nodes
//! (φ is the golden ratio), so the maximum degree in a heap of `n` nodes is
//! bounded by `log_φ(n)`.
//!
//! - 2⁶⁴ nodes → max degree ~92
//! - `u8::MAX` (255) → heaps far larger than could ever fit in memory
//!
//! Using `u8` instead of `usize` saves 7 bytes per node on 64-bit systems.
//!
//! # Runtime Checks
//!
//! The [`checked_increment`] function panics if the theoretical limit is
//! exceeded, which would indicate a bug since it is mathematically impossible
//! with valid heap operations.

/// Type alias for node degree (number of children).
pub type Rank = u8;

/// Maximum valid degree value.
pub const MAX_RANK: Rank = u8::MAX;

/// The golden ratio φ = (1 + √5) / 2.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Safely increment a degree, panicking on overflow.
///
/// # Panics
///
/// Panics if `rank == MAX_RANK`. This cannot happen for a well-formed heap.
///
/// # Example
///
/// ```rust
/// use fibonacci_sssp::rank::{checked_increment, Rank};
///
/// let rank: Rank = 5;
/// assert_eq!(checked_increment(rank), 6);
/// ```
#[inline]
pub fn checked_increment(rank: Rank) -> Rank {
    rank.checked_add(1).expect(
        "rank overflow: this should be impossible since max degree is log_φ(n) \
         and u8::MAX (255) covers any heap that fits in memory",
    )
}

/// Decrement a degree, returning 0 if already at minimum.
///
/// # Example
///
/// ```rust
/// use fibonacci_sssp::rank::{saturating_decrement, Rank};
///
/// let rank: Rank = 5;
/// assert_eq!(saturating_decrement(rank), 4);
///
/// let zero: Rank = 0;
/// assert_eq!(saturating_decrement(zero), 0);
/// ```
#[inline]
pub fn saturating_decrement(rank: Rank) -> Rank {
    rank.saturating_sub(1)
}

/// Upper bound on the degree of any node in a heap of `len` nodes, plus one.
///
/// This is `⌈log_φ(len)⌉ + 1`, the number of slots the consolidation degree
/// table needs. Returns 1 for an empty or single-node heap.
///
/// # Example
///
/// ```rust
/// use fibonacci_sssp::rank::max_degree_bound;
///
/// assert_eq!(max_degree_bound(1), 1);
/// assert_eq!(max_degree_bound(2), 3);
/// assert!(max_degree_bound(1_000_000) <= 30);
/// ```
pub fn max_degree_bound(len: usize) -> usize {
    if len <= 1 {
        return 1;
    }
    let log_phi = (len as f64).ln() / GOLDEN_RATIO.ln();
    log_phi.ceil() as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_increment() {
        assert_eq!(checked_increment(0), 1);
        assert_eq!(checked_increment(127), 128);
        assert_eq!(checked_increment(254), 255);
    }

    #[test]
    #[should_panic(expected = "rank overflow")]
    fn test_checked_increment_overflow() {
        checked_increment(255);
    }

    #[test]
    fn test_saturating_decrement() {
        assert_eq!(saturating_decrement(5), 4);
        assert_eq!(saturating_decrement(1), 0);
        assert_eq!(saturating_decrement(0), 0);
    }

    #[test]
    fn test_max_degree_bound_small_heaps() {
        assert_eq!(max_degree_bound(0), 1);
        assert_eq!(max_degree_bound(1), 1);
        // log_φ(2) ≈ 1.44
        assert_eq!(max_degree_bound(2), 3);
        // log_φ(3) ≈ 2.28
        assert_eq!(max_degree_bound(3), 4);
    }

    #[test]
    fn test_max_degree_bound_covers_binomial_trees() {
        // A binomial tree of order k has 2^k nodes and root degree k, the
        // densest shape consolidation can produce.
        for k in 1..20 {
            let len = 1usize << k;
            assert!(max_degree_bound(len) > k, "bound too small for 2^{k}");
        }
    }

    #[test]
    fn test_max_degree_bound_fits_rank() {
        assert!(max_degree_bound(usize::MAX) < MAX_RANK as usize);
    }
}
