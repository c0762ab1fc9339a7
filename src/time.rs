// src/time.rs

//! Scalar time domains.
//!
//! Every bound the analysis computes is a [`Time`]. Two instantiations exist:
//! `i64` for the discrete model and `f64` for the dense model. All arithmetic
//! goes through the saturating helpers so that [`Time::INFINITY`] absorbs
//! additions instead of overflowing.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::types::TimeModel;

pub trait Time:
    Copy
    + Default
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    const ZERO: Self;
    /// Largest representable time; used as "no such event".
    const INFINITY: Self;
    /// Smallest positive increment; turns `t < x` into `t <= x - EPSILON`.
    const EPSILON: Self;
    /// Finish times may exceed a deadline by this much before it counts as a miss.
    const DEADLINE_MISS_TOLERANCE: Self;
    const MODEL: TimeModel;

    fn saturating_add(self, rhs: Self) -> Self;
    fn saturating_sub(self, rhs: Self) -> Self;
    fn total_cmp(&self, other: &Self) -> Ordering;
    fn parse_time(s: &str) -> Option<Self>;

    fn is_infinite(self) -> bool {
        self == Self::INFINITY
    }
}

impl Time for i64 {
    const ZERO: Self = 0;
    const INFINITY: Self = i64::MAX;
    const EPSILON: Self = 1;
    const DEADLINE_MISS_TOLERANCE: Self = 0;
    const MODEL: TimeModel = TimeModel::Discrete;

    fn saturating_add(self, rhs: Self) -> Self {
        i64::saturating_add(self, rhs)
    }

    fn saturating_sub(self, rhs: Self) -> Self {
        if self == i64::MAX {
            return self;
        }
        i64::saturating_sub(self, rhs)
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn parse_time(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(v) = s.parse::<i64>() {
            return Some(v);
        }
        let v = s.parse::<f64>().ok().filter(|v| v.is_finite())?;
        let truncated = v.trunc() as i64;
        if v.fract() != 0.0 {
            warn!(value = s, truncated, "fractional time in discrete model, truncating");
        }
        Some(truncated)
    }
}

impl Time for f64 {
    const ZERO: Self = 0.0;
    const INFINITY: Self = f64::MAX;
    // vanishes against any time above ~1e-292, so `t - EPSILON` is not strict here
    const EPSILON: Self = f64::MIN_POSITIVE;
    const DEADLINE_MISS_TOLERANCE: Self = 1e-6;
    const MODEL: TimeModel = TimeModel::Dense;

    fn saturating_add(self, rhs: Self) -> Self {
        (self + rhs).min(f64::MAX)
    }

    fn saturating_sub(self, rhs: Self) -> Self {
        if self == f64::MAX {
            return self;
        }
        (self - rhs).max(f64::MIN)
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        f64::total_cmp(self, other)
    }

    fn parse_time(s: &str) -> Option<Self> {
        s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

pub fn maximum<T: Time>(a: T, b: T) -> T {
    if a.total_cmp(&b) == Ordering::Less { b } else { a }
}

pub fn minimum<T: Time>(a: T, b: T) -> T {
    if b.total_cmp(&a) == Ordering::Less { b } else { a }
}

/// Render a time for labels, spelling out infinity.
pub fn display<T: Time>(t: T) -> String {
    if t.is_infinite() {
        "Inf".to_string()
    } else {
        t.to_string()
    }
}
