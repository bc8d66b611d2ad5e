//! Algorithms editing a partition.
//!
//! Every function here is pure: it reads the current intervals and
//! returns a complete replacement, leaving the caller to commit it (see
//! [`Session`](crate::Session)).  A failing edit therefore never leaves
//! a half-modified partition behind.

use log::debug;
use crate::{color::ColorValue,
            error::Result,
            interval::{Bounds, Interval, Partition}};

/// Paint `[min, max)` with `color`, overwriting what was there.
///
/// Intervals entirely outside the new range are kept, overlapping ones
/// are cut down to the parts left of `min` and right of `max` (keeping
/// their color), and the new interval is added.  The result is sorted
/// by `min` but may stick out of (or fall short of) the original
/// bounds; [`trim_and_expand`] closes it again.
///
/// An empty or inverted range is rejected with
/// [`Error::InvalidRange`](crate::Error::InvalidRange) and nothing is
/// computed.
pub fn insert(intervals: &[Interval], color: ColorValue,
              min: f64, max: f64) -> Result<Vec<Interval>> {
    let new = Interval::new(color, min, max)?;
    let mut out = Vec::with_capacity(intervals.len() + 2);
    for e in intervals {
        if e.max <= min || e.min >= max {
            out.push(e.clone());
            continue
        }
        if e.min < min {
            out.push(Interval { color: e.color.clone(), min: e.min, max: min });
        }
        if e.max > max {
            out.push(Interval { color: e.color.clone(), min: max, max: e.max });
        }
    }
    debug!("insert {} over [{min}, {max})", new.color);
    out.push(new);
    out.sort_by(|a, b| a.min.total_cmp(&b.min));
    Ok(out)
}

/// Reconcile `intervals` with `bounds`: drop what lies outside, clip
/// what crosses a bound, fill every uncovered stretch with `background`
/// and merge neighbours of identical color.
///
/// The result always tiles `bounds`.  Applying it twice with the same
/// bounds gives the same partition as applying it once.
pub fn trim_and_expand(intervals: &[Interval], bounds: Bounds,
                       background: &ColorValue) -> Result<Partition> {
    let (lo, hi) = (bounds.min(), bounds.max());
    let mut sorted: Vec<&Interval> = intervals.iter().collect();
    sorted.sort_by(|a, b| a.min.total_cmp(&b.min));

    let mut tiles: Vec<Interval> = Vec::with_capacity(sorted.len() + 2);
    for e in sorted {
        // Half-open: touching a bound at a single point is outside.
        if e.max <= lo || e.min >= hi { continue }
        let cursor = tiles.last().map_or(lo, |t| t.max);
        let min = e.min.max(cursor);
        let max = e.max.min(hi);
        if min >= max { continue }
        if min > cursor {
            tiles.push(Interval { color: background.clone(),
                                  min: cursor, max: min });
        }
        tiles.push(Interval { color: e.color.clone(), min, max });
    }
    let cursor = tiles.last().map_or(lo, |t| t.max);
    if cursor < hi {
        tiles.push(Interval { color: background.clone(), min: cursor, max: hi });
    }
    let merged = merge(tiles);
    debug!("trim and expand to [{lo}, {hi}): {} intervals", merged.len());
    Partition::new(merged, bounds)
}

/// Join contiguous intervals sharing the same color.
pub fn merge(intervals: Vec<Interval>) -> Vec<Interval> {
    let mut out: Vec<Interval> = Vec::with_capacity(intervals.len());
    for i in intervals {
        match out.last_mut() {
            Some(l) if l.color == i.color && l.max == i.min => l.max = i.max,
            _ => out.push(i),
        }
    }
    out
}

/// Recolor every interval painted with the `old` background to `new`.
/// Boundaries are untouched.
pub fn replace_background_color(partition: &Partition, old: &ColorValue,
                                new: &ColorValue) -> Partition {
    if old == new { return partition.clone() }
    debug!("background {old} -> {new}");
    partition.recolor(old, new)
}

/// The partition a reset goes back to.
pub fn reset(background: &ColorValue, bounds: Bounds) -> Partition {
    debug!("reset to {background} over [{}, {})", bounds.min(), bounds.max());
    Partition::uniform(background.clone(), bounds)
}
