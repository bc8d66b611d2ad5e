//! Normalized color ramps for renderers.
//!
//! A renderer colors scalar data with a function on \[0, 1\]; a
//! [`Ramp`] is the piecewise-constant such function derived from a
//! [`Partition`], together with the tick marks needed to label it in
//! absolute values.

use serde::Serialize;
use crate::{ColorRange,
            color::ColorValue,
            error::{Error, Result},
            interval::{Bounds, Interval, Partition}};

/// An interval expressed in normalized coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NormalizedInterval {
    pub color: ColorValue,
    pub min: f64,
    pub max: f64,
}

/// A color stop of the ramp.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RampStop {
    /// Position in \[0, 1\].
    pub position: f64,
    pub color: ColorValue,
}

/// A labelled mark along the ramp.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tick {
    /// Position in \[0, 1\].
    pub position: f64,
    /// Absolute value at `position`.
    pub value: f64,
    pub label: String,
}

/// Express `intervals` relative to `bounds`, each endpoint mapped to
/// `(x - min) / (max - min)` and clamped to \[0, 1\].
///
/// [`Bounds`] can only be built non-degenerate, so the division is
/// always defined.
pub fn normalize(intervals: &[Interval], bounds: Bounds)
                 -> Vec<NormalizedInterval> {
    let t = |x: f64| bounds.normalize(x).clamp(0., 1.);
    intervals.iter()
        .map(|i| NormalizedInterval { color: i.color.clone(),
                                      min: t(i.min), max: t(i.max) })
        .collect()
}

/// Default number of decimals of tick labels.
pub const TICK_PRECISION: usize = 2;

/// Default width of the stripes of [`Ramp::with_stripes`], in
/// normalized units.
pub const STRIPE_WIDTH: f64 = 0.01;

/// Piecewise-constant color function on \[0, 1\].
#[derive(Clone, Debug, PartialEq)]
pub struct Ramp {
    bounds: Bounds,
    bands: Vec<NormalizedInterval>, // Invariant: non-empty, sorted
    precision: usize,
}

impl Ramp {
    /// The ramp of `partition` over its own bounds.
    pub fn new(partition: &Partition) -> Self {
        Ramp::with_precision(partition, TICK_PRECISION)
    }

    /// Same as [`Ramp::new`] with labels printed with `precision`
    /// decimals.
    pub fn with_precision(partition: &Partition, precision: usize) -> Self {
        let bounds = partition.bounds();
        Ramp { bounds, bands: normalize(partition.intervals(), bounds),
               precision }
    }

    /// Build a ramp from possibly unchecked `intervals`, normalizing
    /// against the span from the first interval's `min` to the last
    /// interval's `max`.  This is how stand-alone colormaps (e.g.
    /// imported from files) are displayed.
    pub fn from_span(intervals: &[Interval]) -> Result<Self> {
        let (first, last) = match (intervals.first(), intervals.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(Error::InvalidPartition(
                "no interval".to_string())),
        };
        let bounds = Bounds::new(first.min, last.max)?;
        let mut bands = normalize(intervals, bounds);
        bands.sort_by(|a, b| a.min.total_cmp(&b.min));
        Ok(Ramp { bounds, bands, precision: TICK_PRECISION })
    }

    #[inline]
    pub fn bounds(&self) -> Bounds { self.bounds }

    /// Absolute value mapped to position 0.
    #[inline]
    pub fn scale_min(&self) -> f64 { self.bounds.min() }

    /// Absolute value mapped to position 1.
    #[inline]
    pub fn scale_max(&self) -> f64 { self.bounds.max() }

    #[inline]
    pub fn bands(&self) -> &[NormalizedInterval] { &self.bands }

    /// Two stops per interval, at its normalized min and max, both
    /// holding the interval color.  Interpolating between consecutive
    /// stops thus yields a step function.
    pub fn stops(&self) -> Vec<RampStop> {
        self.bands.iter()
            .flat_map(|b| [RampStop { position: b.min, color: b.color.clone() },
                           RampStop { position: b.max, color: b.color.clone() }])
            .collect()
    }

    /// The stops as `(position, color)` pairs, the usual "colorscale"
    /// input of plotting libraries.
    pub fn colorscale(&self) -> Vec<(f64, ColorValue)> {
        self.stops().into_iter().map(|s| (s.position, s.color)).collect()
    }

    fn tick(&self, position: f64) -> Tick {
        let value = self.bounds.denormalize(position);
        Tick { position, value, label: format!("{:.*}", self.precision, value) }
    }

    /// One tick at every interval boundary, in increasing order and
    /// without duplicates.
    pub fn ticks(&self) -> Vec<Tick> {
        let mut pos: Vec<f64> = self.bands.iter()
            .flat_map(|b| [b.min, b.max])
            .collect();
        pos.sort_by(f64::total_cmp);
        pos.dedup();
        pos.into_iter().map(|t| self.tick(t)).collect()
    }

    /// The stops of [`Ramp::stops`] with a band of `color`, `width` wide,
    /// laid at the start of every `len / n`-th interval (every interval
    /// when `n` exceeds their number).  A stripe never extends past its
    /// interval, nor past 1.  `n == 0` or a non-positive `width` gives
    /// the plain stops.
    pub fn with_stripes(&self, n: usize, width: f64, color: &ColorValue)
                        -> Vec<RampStop> {
        if n == 0 || !(width > 0.) { return self.stops() }
        let every = (self.bands.len() / n).max(1);
        let stop = |position: f64, color: &ColorValue| {
            RampStop { position, color: color.clone() }
        };
        let mut stops = Vec::with_capacity(4 * self.bands.len());
        for (i, b) in self.bands.iter().enumerate() {
            let mut start = b.min;
            if i % every == 0 {
                let end = (b.min + width).min(b.max).min(1.);
                stops.push(stop(b.min, color));
                stops.push(stop(end, color));
                start = end;
            }
            if start < b.max {
                stops.push(stop(start, &b.color));
                stops.push(stop(b.max, &b.color));
            }
        }
        stops
    }

    /// `n` evenly spaced labelled marks from the scale min to the
    /// scale max (both included), e.g. for a range slider.
    pub fn marks(&self, n: usize) -> Vec<Tick> {
        self.range(0., 1., n).map(|(t, _)| self.tick(t)).collect()
    }
}

impl ColorRange<ColorValue> for Ramp {
    /// Returns the color of the band containing `t` (clamped to
    /// \[0, 1\]); `t == 1.` gives the color of the last band.
    ///
    /// Bands are half-open, so a position shared by two bands takes the
    /// color of the band starting there, as in [`Partition::color_at`].
    /// The earlier band does not own its upper end.
    fn color(&self, t: f64) -> ColorValue {
        let t = t.clamp(0., 1.);
        let k = self.bands.partition_point(|b| b.max <= t);
        let band = self.bands.get(k).or_else(|| self.bands.last());
        match band {
            Some(b) => b.color.clone(),
            None => ColorValue::background(), // Unreachable: bands ≠ ∅
        }
    }
}
