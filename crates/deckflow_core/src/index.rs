//! Circular index arithmetic
//!
//! All index math funnels through these helpers so a value outside `[0, N)`
//! never reaches slot classification.

/// Normalize a signed index into `[0, len)`
///
/// `len` must be non-zero.
pub fn wrap_index(index: i64, len: usize) -> usize {
    debug_assert!(len > 0, "wrap_index called with an empty deck");
    index.rem_euclid(len.max(1) as i64) as usize
}

/// Move `current` by `delta` steps around a deck of `len` items
pub fn step_index(current: usize, delta: i64, len: usize) -> usize {
    wrap_index(current as i64 + delta, len)
}

/// Position of `item` relative to the active index: `(item - current + N) mod N`
pub fn relative_position(item: usize, current: usize, len: usize) -> usize {
    wrap_index(item as i64 - current as i64, len)
}

/// Validate an index that arithmetic elsewhere claims is in range
///
/// Panics in debug builds. Release builds clamp to the last valid index and
/// log a warning.
pub fn checked_index(index: usize, len: usize) -> usize {
    debug_assert!(
        index < len,
        "index {} out of range for deck of {} items",
        index,
        len
    );
    if index >= len {
        tracing::warn!("index {} out of range for {} items, clamping", index, len);
        return len.saturating_sub(1);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_negative() {
        assert_eq!(wrap_index(-1, 6), 5);
        assert_eq!(wrap_index(-7, 6), 5);
        assert_eq!(wrap_index(6, 6), 0);
        assert_eq!(wrap_index(0, 1), 0);
    }

    #[test]
    fn test_step_round_trip() {
        for len in 2..10 {
            for current in 0..len {
                let forward = step_index(current, 1, len);
                assert_eq!(step_index(forward, -1, len), current);
            }
        }
    }

    #[test]
    fn test_relative_position() {
        assert_eq!(relative_position(0, 0, 6), 0);
        assert_eq!(relative_position(0, 1, 6), 5);
        assert_eq!(relative_position(2, 1, 6), 1);
        assert_eq!(relative_position(4, 0, 6), 4);
    }

    #[test]
    fn test_checked_index_in_range() {
        assert_eq!(checked_index(3, 4), 3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn test_checked_index_panics_in_debug() {
        checked_index(4, 4);
    }
}
