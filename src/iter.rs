//! Small iterator utilities shared across the arrival, demand, and
//! analysis modules.

use itertools::Itertools;

/// Merge any number of already-sorted, non-decreasing iterators into a
/// single sorted iterator with adjacent duplicates removed.
///
/// Used throughout the crate to combine the individual step sequences of
/// several tasks (or several interfering sources of demand) into one
/// combined sequence of points of interest.
pub fn merge_sorted_unique<T, I>(iters: impl IntoIterator<Item = I>) -> impl Iterator<Item = T>
where
    T: Ord + Clone,
    I: Iterator<Item = T>,
{
    iters.into_iter().kmerge().dedup()
}

/// A slow, naive oracle that finds every point at which `f` "steps"
/// (increases), for use as a cross-check against the hand-optimized
/// `steps_iter()` implementations found throughout this crate.
///
/// With `yield_succ = false` (the default convention used internally),
/// the function yields the *predecessor* of each jump, i.e., the largest
/// `delta` for which `f(delta)` still has the old value. With
/// `yield_succ = true`, it yields the jump point itself.
#[cfg(test)]
pub fn brute_force_steps<F>(f: F, limit: u64, yield_succ: bool) -> Vec<u64>
where
    F: Fn(u64) -> u64,
{
    let mut result = Vec::new();
    let mut prev = f(0);
    for delta in 1..=limit {
        let cur = f(delta);
        if cur != prev {
            result.push(if yield_succ { delta } else { delta - 1 });
        }
        prev = cur;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_and_dedups() {
        let a = vec![1, 3, 5, 7].into_iter();
        let b = vec![2, 3, 4, 6, 8].into_iter();
        let c = vec![1, 5, 8].into_iter();
        let merged: Vec<_> = merge_sorted_unique(vec![a, b, c]).collect();
        assert_eq!(merged, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn brute_force_default_yields_predecessor() {
        assert_eq!(brute_force_steps(|delta| delta / 3, 9, false), vec![2, 5, 8]);
    }

    #[test]
    fn brute_force_succ_yields_jump_point() {
        assert_eq!(brute_force_steps(|delta| delta / 4, 10, true), vec![4, 8]);
    }
}
