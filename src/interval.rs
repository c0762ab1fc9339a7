// src/interval.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::{Time, maximum, minimum};

/// Closed interval `[start, end]` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(bound = "T: Time")]
pub struct Interval<T> {
    pub start: T,
    pub end: T,
}

impl<T: Time> Interval<T> {
    pub fn new(start: T, end: T) -> Self {
        debug_assert!(start <= end, "interval start {start} exceeds end {end}");
        Self { start, end }
    }

    /// Build an interval only if it is well-formed.
    pub fn try_new(start: T, end: T) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn point(t: T) -> Self {
        Self { start: t, end: t }
    }

    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end
    }

    pub fn from(&self) -> T {
        self.start
    }

    pub fn until(&self) -> T {
        self.end
    }

    pub fn length(&self) -> T {
        self.end.saturating_sub(self.start)
    }

    /// Smallest interval containing both `self` and `other`.
    pub fn widen(&self, other: &Interval<T>) -> Interval<T> {
        Interval {
            start: minimum(self.start, other.start),
            end: maximum(self.end, other.end),
        }
    }

    pub fn intersects(&self, other: &Interval<T>) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Interval<T>) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn contains_time(&self, t: T) -> bool {
        self.start <= t && t <= self.end
    }

    /// An endpoint of `other` falls inside `self`.
    pub fn overlaps(&self, other: &Interval<T>) -> bool {
        self.contains_time(other.start) || self.contains_time(other.end)
    }
}

impl<T: Time> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I[{},{}]", self.start, self.end)
    }
}
