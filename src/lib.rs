//! Piecewise-constant colormaps built from colored value intervals.
//!
//! - [`Partition`]: colored intervals tiling a value range
//! - [`editor`]: insert, trim/expand, background substitution, reset
//! - [`Ramp`]: the normalized step function handed to renderers
//! - [`Repository`]: named snapshots of partitions
//!
//! A [`Session`] ties these together for one editing client.
//!
//! # Example
//!
//! ```
//! use colormap_intervals::{Session, ColorRange};
//! let mut s = Session::default();
//! s.insert("red", 20., 40.)?;
//! s.trim_and_expand(10., 90.)?;
//! let ramp = s.ramp();
//! assert_eq!(ramp.color(0.2).as_str(), "red");
//! # Ok::<(), colormap_intervals::Error>(())
//! ```

use std::marker::PhantomData;

mod color;
mod config;
pub mod editor;
mod error;
mod interval;
mod ramp;
mod repository;
mod session;
mod store;

pub use color::{ColorValue, BACKGROUND_CHOICES, DEFAULT_BACKGROUND};
pub use config::{ConfigLoader, EditorConfig};
pub use error::{Error, Result};
pub use interval::{Bounds, Interval, Partition};
pub use ramp::{normalize, NormalizedInterval, Ramp, RampStop, Tick,
               STRIPE_WIDTH, TICK_PRECISION};
pub use repository::{import_legacy_dir, JsonRepository, MemoryRepository,
                     Repository, SavedPartition};
pub use session::Session;
pub use store::IntervalStore;

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange<Color> {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\].
    fn color(&self, t: f64) -> Color;

    /// Return an iterator yielding uniform sampling of `n` points
    /// between `a` and `b` (with the bounds `a` and `b` included in
    /// the list of points) together with colors.  It is not required
    /// that `a <= b`.
    fn range(&self, mut a: f64, mut b: f64, n: usize) -> Range<'_, Self, Color>
    where Self: Sized {
        if a == f64::INFINITY { a = f64::MAX; }
        else if a == f64::NEG_INFINITY { a = f64::MIN };
        if b == f64::NEG_INFINITY { b = f64::MIN; }
        else if b == f64::INFINITY { b = f64::MAX };
        // `a` or `b` NaN will give an iterator yielding NaN.
        if n == 0 {
            Range { range: self, color: PhantomData,
                    a, b, flast: 0., last: 0,
                    i: 1, j: 0 } // Empty iterator
        } else {
            Range { range: self, color: PhantomData,
                    a, b, flast: (n - 1) as f64,
                    last: n - 1, i: 0, j: n - 1 }
        }
    }
}

/// An iterator yielding `f64` in a given range together with colors.
///
/// Created by [`ColorRange::range`].
pub struct Range<'a, R, Color> {
    range: &'a R,
    color: PhantomData<Color>,
    a: f64, // finite or NaN
    b: f64, // finite or NaN
    flast: f64, // `last` as a floating-point number
    last: usize,
    i: usize, // first position to be consumed (i ≤ j)
    j: usize, // last position to be consumed
}

impl<'a, R, Color> Range<'a, R, Color> where R: ColorRange<Color> {
    /// Return the float and color of the position `k` (assuming it is
    /// in the range `0 ..= self.last`).
    fn sample(&self, k: usize) -> (f64, Color) {
        if k == 0 {
            (self.a, self.range.color(0.))
        } else if k == self.last {
            (self.b, self.range.color(1.))
        } else {
            let alpha = (self.last - k) as f64;
            let beta = k as f64;
            let t = beta / self.flast;
            let mut x = (alpha * self.a + beta * self.b) / self.flast;
            if x.is_infinite() {
                x = (1. - t) * self.a + t * self.b;
            }
            (x, self.range.color(t))
        }
    }
}

impl<'a, R, Color> Iterator for Range<'a, R, Color>
where R: ColorRange<Color> {
    type Item = (f64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.sample(self.i);
            self.i += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<'a, R, Color> ExactSizeIterator for Range<'a, R, Color>
where R: ColorRange<Color> {
    fn len(&self) -> usize { (self.j + 1).saturating_sub(self.i) }
}

impl<'a, R, Color> DoubleEndedIterator for Range<'a, R, Color>
where R: ColorRange<Color> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.sample(self.j);
            if self.j == 0 {
                self.i = 1
            } else {
                self.j -= 1;
            }
            Some(item)
        } else {
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Ramp {
        let b = Bounds::new(0., 1.).unwrap();
        let p = editor::trim_and_expand(
            &editor::insert(Partition::uniform("white", b).intervals(),
                            "red".into(), 0.5, 1.).unwrap(),
            b, &"white".into()).unwrap();
        Ramp::new(&p)
    }

    #[test]
    fn sampled_range() {
        let r = ramp();
        for (i, (x, c)) in r.range(0., 1., 11).enumerate() {
            assert!((x - 0.1 * i as f64).abs() <= 1e-15,
                    "{} ≉ {}", x, 0.1 * i as f64);
            assert_eq!(r.color(x), c);
        }
    }

    #[test]
    fn range_is_double_ended() {
        let r = ramp();
        let mut it = r.range(-2., 2., 3);
        assert_eq!(it.len(), 3);
        assert_eq!(it.next_back(), Some((2., "red".into())));
        assert_eq!(it.next(), Some((-2., "white".into())));
        assert_eq!(it.next(), Some((0., "red".into())));
        assert_eq!(it.next(), None);
        assert_eq!(r.range(0., 1., 0).count(), 0);
    }
}
