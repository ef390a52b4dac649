//! Trial batching for parallel Monte Carlo execution.
//!
//! Trials are identified by index (the index also derives the dice seed),
//! so distributing them is a matter of slicing `0..total` into contiguous
//! ranges: results stay in trial order and batch boundaries cannot change
//! any trial's outcome.

/// Split `total` trials into up to `num_batches` ranges `[start, end)`,
/// as evenly as possible; later ranges may be one trial shorter.
pub fn trial_ranges(total: usize, num_batches: usize) -> Vec<(usize, usize)> {
    if total == 0 || num_batches == 0 {
        return Vec::new();
    }
    let num_batches = num_batches.min(total);
    let base = total / num_batches;
    let remainder = total % num_batches;
    let mut ranges = Vec::with_capacity(num_batches);
    let mut start = 0;
    for i in 0..num_batches {
        let size = base + usize::from(i < remainder);
        let end = start + size;
        ranges.push((start, end));
        start = end;
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_split() {
        assert_eq!(
            trial_ranges(1000, 4),
            vec![(0, 250), (250, 500), (500, 750), (750, 1000)]
        );
    }

    #[test]
    fn remainder_goes_to_leading_ranges() {
        assert_eq!(trial_ranges(10, 3), vec![(0, 4), (4, 7), (7, 10)]);
    }

    #[test]
    fn more_batches_than_trials() {
        assert_eq!(trial_ranges(3, 10), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn ranges_cover_every_trial_exactly_once() {
        let ranges = trial_ranges(1234, 7);
        let mut expected = 0;
        for (start, end) in ranges {
            assert_eq!(start, expected);
            assert!(end > start);
            expected = end;
        }
        assert_eq!(expected, 1234);
    }

    #[test]
    fn degenerate_inputs_yield_no_ranges() {
        assert!(trial_ranges(0, 5).is_empty());
        assert!(trial_ranges(10, 0).is_empty());
    }
}
