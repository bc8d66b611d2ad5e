//! Colored intervals and the partitions they form.

use serde::{Deserialize, Serialize};
use crate::{color::ColorValue, error::{Error, Result}};

/// A colored half-open sub-range `[min, max)`.
///
/// Invariant: `min < max`, both finite.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub color: ColorValue,
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create an interval, rejecting empty, inverted or non-finite
    /// ranges with [`Error::InvalidRange`].
    pub fn new(color: impl Into<ColorValue>, min: f64, max: f64)
               -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(Error::InvalidRange { min, max })
        }
        Ok(Interval { color: color.into(), min, max })
    }

    /// Says whether `x` lies in `[min, max)`.
    #[inline]
    pub fn contains(&self, x: f64) -> bool { self.min <= x && x < self.max }

    #[inline]
    pub fn width(&self) -> f64 { self.max - self.min }
}

/// The domain `[min, max)` a [`Partition`] spans.
///
/// Invariant: `min < max`, both finite.  Deserialization re-checks it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct Bounds {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawBounds { min: f64, max: f64 }

impl TryFrom<RawBounds> for Bounds {
    type Error = Error;
    fn try_from(b: RawBounds) -> Result<Self> { Bounds::new(b.min, b.max) }
}

impl Default for Bounds {
    fn default() -> Self { Bounds { min: 0., max: 100. } }
}

impl Bounds {
    /// Create bounds, rejecting `min >= max` (and non-finite values)
    /// with [`Error::DegenerateBounds`].
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(Error::DegenerateBounds { min, max })
        }
        Ok(Bounds { min, max })
    }

    #[inline]
    pub fn min(&self) -> f64 { self.min }

    #[inline]
    pub fn max(&self) -> f64 { self.max }

    #[inline]
    pub fn width(&self) -> f64 { self.max - self.min }

    /// Map `x` to its position in \[0, 1\] (not clamped).
    #[inline]
    pub fn normalize(&self, x: f64) -> f64 { (x - self.min) / self.width() }

    /// Inverse of [`Bounds::normalize`].
    #[inline]
    pub fn denormalize(&self, t: f64) -> f64 { self.min + t * self.width() }

    #[inline]
    pub fn contains(&self, x: f64) -> bool { self.min <= x && x < self.max }

    /// Symmetric bounds `[-m, m)` where `m` is the largest absolute
    /// value of the current bounds.  Useful for diverging data.
    pub fn centered_on_zero(&self) -> Result<Self> {
        let m = self.min.abs().max(self.max.abs());
        Bounds::new(-m, m)
    }
}

/// An ordered, gap-free, non-overlapping sequence of [`Interval`]s
/// covering exactly its [`Bounds`].
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    intervals: Vec<Interval>, // Invariant: tiles `bounds`, sorted by min
    bounds: Bounds,
}

impl Partition {
    /// Check that `intervals` tile `bounds` and wrap them.
    ///
    /// The intervals must already be sorted; adjacent intervals must
    /// share their boundary exactly.
    pub fn new(intervals: Vec<Interval>, bounds: Bounds) -> Result<Self> {
        let (first, last) = match (intervals.first(), intervals.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(Error::InvalidPartition(
                "no interval".to_string())),
        };
        if let Some(i) = intervals.iter()
            .find(|i| !(i.min.is_finite() && i.max.is_finite()
                        && i.min < i.max)) {
            return Err(Error::InvalidPartition(format!(
                "empty interval [{}, {})", i.min, i.max)))
        }
        if first.min != bounds.min || last.max != bounds.max {
            return Err(Error::InvalidPartition(format!(
                "covers [{}, {}) instead of [{}, {})",
                first.min, last.max, bounds.min, bounds.max)))
        }
        if let Some(w) = intervals.windows(2).find(|w| w[0].max != w[1].min) {
            let kind = if w[0].max < w[1].min { "gap" } else { "overlap" };
            return Err(Error::InvalidPartition(format!(
                "{kind} between {} and {}", w[0].max, w[1].min)))
        }
        Ok(Partition { intervals, bounds })
    }

    /// The single-interval partition of `bounds`.
    pub fn uniform(color: impl Into<ColorValue>, bounds: Bounds) -> Self {
        Partition {
            intervals: vec![Interval { color: color.into(),
                                       min: bounds.min, max: bounds.max }],
            bounds,
        }
    }

    #[inline]
    pub fn intervals(&self) -> &[Interval] { &self.intervals }

    #[inline]
    pub fn bounds(&self) -> Bounds { self.bounds }

    /// Number of intervals; a partition holds at least one.
    #[inline]
    pub fn len(&self) -> usize { self.intervals.len() }

    pub fn into_intervals(self) -> Vec<Interval> { self.intervals }

    /// The color at `x`.  Values outside the bounds give `None`.
    ///
    /// Intervals are half-open `[min, max)`, so a shared boundary
    /// belongs to the interval starting there, never to the one ending
    /// there.  The global max is the one exception: it belongs to the
    /// last interval.
    pub fn color_at(&self, x: f64) -> Option<&ColorValue> {
        if x == self.bounds.max {
            return self.intervals.last().map(|i| &i.color)
        }
        if !self.bounds.contains(x) { return None }
        let k = self.intervals.partition_point(|i| i.max <= x);
        self.intervals.get(k).map(|i| &i.color)
    }

    /// Same boundaries, with every interval colored `from` recolored `to`.
    pub fn recolor(&self, from: &ColorValue, to: &ColorValue) -> Partition {
        let intervals = self.intervals.iter().map(|i| {
            let color = if &i.color == from { to.clone() }
                        else { i.color.clone() };
            Interval { color, ..*i }
        }).collect();
        Partition { intervals, bounds: self.bounds }
    }

    /// Every boundary of the partition, in increasing order.
    pub fn boundaries(&self) -> impl Iterator<Item = f64> + '_ {
        std::iter::once(self.bounds.min)
            .chain(self.intervals.iter().map(|i| i.max))
    }
}
