//! The live partition of one editing context.

use log::trace;
use crate::{color::ColorValue, interval::{Bounds, Partition}};

/// Owner of the live [`Partition`] and of the background color.
///
/// The store never mutates a partition piecemeal: editors compute a
/// complete replacement and hand it to [`IntervalStore::replace`].
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalStore {
    partition: Partition,
    background: ColorValue,
}

impl IntervalStore {
    /// A store holding a single `background` interval over `bounds`.
    pub fn new(background: ColorValue, bounds: Bounds) -> Self {
        IntervalStore {
            partition: Partition::uniform(background.clone(), bounds),
            background,
        }
    }

    /// Read-only view of the live partition, ordered by `min`.
    #[inline]
    pub fn current_partition(&self) -> &Partition { &self.partition }

    #[inline]
    pub fn bounds(&self) -> Bounds { self.partition.bounds() }

    #[inline]
    pub fn background(&self) -> &ColorValue { &self.background }

    /// Swap the live partition (and thus its bounds) in one step.
    pub fn replace(&mut self, partition: Partition) {
        trace!("store: {} intervals over [{}, {})", partition.len(),
               partition.bounds().min(), partition.bounds().max());
        self.partition = partition;
    }

    /// Swap both the partition and the background color in one step.
    pub fn replace_all(&mut self, partition: Partition,
                       background: ColorValue) {
        self.replace(partition);
        self.background = background;
    }
}

impl Default for IntervalStore {
    fn default() -> Self {
        IntervalStore::new(ColorValue::background(), Bounds::default())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;

    #[test]
    fn default_store() {
        let s = IntervalStore::default();
        assert_eq!(s.current_partition().intervals(),
                   &[Interval::new("white", 0., 100.).unwrap()]);
        assert_eq!(s.background().as_str(), "white");
    }

    #[test]
    fn replace_swaps_bounds_too() {
        let mut s = IntervalStore::default();
        let b = Bounds::new(-1., 1.).unwrap();
        s.replace(Partition::uniform("red", b));
        assert_eq!(s.bounds(), b);
        assert_eq!(s.background().as_str(), "white");
    }
}
