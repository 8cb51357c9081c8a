use std::{
    fmt::{Debug, Display, Formatter},
    ops::Sub,
};

#[must_use]
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct RangeExclusive<T> {
    /// Inclusive.
    pub start: T,

    /// Exclusive.
    pub end: T,
}

impl<T: Debug> Debug for RangeExclusive<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl<T: Display> Display for RangeExclusive<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} … {}", self.start, self.end)
    }
}

impl<T: Copy> RangeExclusive<T> {
    pub const fn from_std(range: std::ops::Range<T>) -> Self {
        Self { start: range.start, end: range.end }
    }
}

impl<T: Copy + Sub> RangeExclusive<T> {
    #[must_use]
    pub fn len(self) -> <T as Sub>::Output {
        self.end - self.start
    }
}

impl<T: Copy + Ord> RangeExclusive<T> {
    /// Build the range only if it is non-empty.
    pub fn non_empty(start: T, end: T) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    #[must_use]
    pub fn contains(self, other: T) -> bool {
        (self.start <= other) && (other < self.end)
    }

    /// Intersect the two ranges, [`None`] when they do not overlap.
    pub fn intersect(self, other: Self) -> Option<Self> {
        Self::non_empty(self.start.max(other.start), self.end.min(other.end))
    }
}

/// Half-open range which may be unbounded on either side.
#[must_use]
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct OpenRange<T> {
    /// Inclusive, [`None`] means unbounded.
    pub start: Option<T>,

    /// Exclusive, [`None`] means unbounded.
    pub end: Option<T>,
}

impl<T: Debug> Debug for OpenRange<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.start {
            Some(start) => write!(f, "{start:?}..")?,
            None => write!(f, "..")?,
        }
        match &self.end {
            Some(end) => write!(f, "{end:?}"),
            None => Ok(()),
        }
    }
}

impl<T: Copy> OpenRange<T> {
    pub const UNBOUNDED: Self = Self { start: None, end: None };

    pub const fn new(start: Option<T>, end: Option<T>) -> Self {
        Self { start, end }
    }

    pub const fn since(start: T) -> Self {
        Self { start: Some(start), end: None }
    }
}

impl<T: Copy> From<RangeExclusive<T>> for OpenRange<T> {
    fn from(range: RangeExclusive<T>) -> Self {
        Self { start: Some(range.start), end: Some(range.end) }
    }
}

impl<T: Copy + Ord> OpenRange<T> {
    /// Replace the unbounded sides with the `fallback` sides.
    ///
    /// Intersecting the result with `fallback` gives the same answer as intersecting
    /// `fallback` with the open range itself.
    pub fn fill(self, fallback: RangeExclusive<T>) -> RangeExclusive<T> {
        RangeExclusive {
            start: self.start.unwrap_or(fallback.start),
            end: self.end.unwrap_or(fallback.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_overlapping() {
        let lhs = RangeExclusive::from_std(1..5);
        let rhs = RangeExclusive::from_std(3..8);
        assert_eq!(lhs.intersect(rhs), Some(RangeExclusive::from_std(3..5)));
    }

    #[test]
    fn test_intersect_touching_is_empty() {
        let lhs = RangeExclusive::from_std(1..3);
        let rhs = RangeExclusive::from_std(3..8);
        assert_eq!(lhs.intersect(rhs), None);
    }

    #[test]
    fn test_non_empty() {
        assert!(RangeExclusive::non_empty(2, 2).is_none());
        assert!(RangeExclusive::non_empty(3, 2).is_none());
        assert_eq!(RangeExclusive::non_empty(1, 2), Some(RangeExclusive::from_std(1..2)));
    }

    #[test]
    fn test_open_range_fill() {
        let fallback = RangeExclusive::from_std(0..10);
        assert_eq!(OpenRange::since(4).fill(fallback), RangeExclusive::from_std(4..10));
        assert_eq!(OpenRange::UNBOUNDED.fill(fallback), fallback);
        assert_eq!(OpenRange::new(None, Some(7)).fill(fallback), RangeExclusive::from_std(0..7));
    }
}
