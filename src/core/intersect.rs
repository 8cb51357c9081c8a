use crate::ops::RangeExclusive;

impl<T> Intersect for T where T: ?Sized {}

pub trait Intersect {
    /// Intersect all the ranges: the latest start and the earliest end.
    ///
    /// Returns [`None`] when the intersection is empty. With no ranges at all, nothing constrains
    /// the result and `unconstrained` is returned as is (provided it is non-empty).
    fn intersect_or<T>(self, unconstrained: RangeExclusive<T>) -> Option<RangeExclusive<T>>
    where
        Self: Sized + IntoIterator<Item = RangeExclusive<T>>,
        T: Copy + Ord,
    {
        let (start, end) = self
            .into_iter()
            .map(|range| (range.start, range.end))
            .reduce(|(start, end), (other_start, other_end)| {
                (start.max(other_start), end.min(other_end))
            })
            .unwrap_or((unconstrained.start, unconstrained.end));
        RangeExclusive::non_empty(start, end)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn range(start: i32, end: i32) -> RangeExclusive<i32> {
        RangeExclusive::from_std(start..end)
    }

    #[test]
    fn test_intersect_many() {
        let ranges = [range(0, 10), range(2, 12), range(-5, 7)];
        assert_eq!(ranges.intersect_or(range(i32::MIN, i32::MAX)), Some(range(2, 7)));
    }

    #[test]
    fn test_disjoint() {
        let ranges = [range(0, 3), range(5, 12), range(1, 7)];
        assert_eq!(ranges.intersect_or(range(i32::MIN, i32::MAX)), None);
    }

    #[test]
    fn test_touching_is_empty() {
        assert_eq!([range(0, 3), range(3, 5)].intersect_or(range(0, 5)), None);
    }

    #[test]
    fn test_empty_input_is_unconstrained() {
        let ranges: [RangeExclusive<i32>; 0] = [];
        assert_eq!(ranges.intersect_or(range(-1, 1)), Some(range(-1, 1)));
    }

    #[test]
    fn test_single() {
        assert_eq!([range(4, 9)].intersect_or(range(0, 1)), Some(range(4, 9)));
    }

    #[test]
    fn test_commutative() {
        let ranges = [range(0, 10), range(2, 12), range(-5, 7), range(1, 20)];
        let expected = ranges.intersect_or(range(i32::MIN, i32::MAX));
        for permutation in ranges.into_iter().permutations(ranges.len()) {
            assert_eq!(permutation.intersect_or(range(i32::MIN, i32::MAX)), expected);
        }
    }

    #[test]
    fn test_associative() {
        let unconstrained = range(i32::MIN, i32::MAX);
        let samples = [range(0, 10), range(2, 12), range(-5, 7), range(8, 9), range(11, 15)];
        for (a, b, c) in samples.into_iter().tuple_combinations() {
            let left = [a, b]
                .intersect_or(unconstrained)
                .and_then(|ab| [ab, c].intersect_or(unconstrained));
            let right = [b, c]
                .intersect_or(unconstrained)
                .and_then(|bc| [a, bc].intersect_or(unconstrained));
            assert_eq!(left, right, "{a:?} {b:?} {c:?}");
            assert_eq!(left, [a, b, c].intersect_or(unconstrained));
        }
    }
}
