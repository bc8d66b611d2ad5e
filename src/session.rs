//! One editing client: configuration, live partition and persistence.

use log::{debug, info};
use crate::{color::ColorValue,
            config::EditorConfig,
            editor,
            error::Result,
            interval::{Bounds, Partition},
            ramp::Ramp,
            repository::{JsonRepository, MemoryRepository, Repository},
            store::IntervalStore};

/// The editing state of one client.
///
/// Each operation computes a complete new partition before committing
/// it to the [`IntervalStore`]; when it fails, the session is left as
/// it was.  A session is meant to be driven by one client at a time.
#[derive(Clone, Debug)]
pub struct Session {
    store: IntervalStore,
    config: EditorConfig,
}

impl Default for Session {
    fn default() -> Self { Session::new(EditorConfig::default()) }
}

impl Session {
    pub fn new(config: EditorConfig) -> Self {
        let store = IntervalStore::new(config.default_background.clone(),
                                       config.default_bounds);
        Session { store, config }
    }

    #[inline]
    pub fn config(&self) -> &EditorConfig { &self.config }

    #[inline]
    pub fn store(&self) -> &IntervalStore { &self.store }

    #[inline]
    pub fn current_partition(&self) -> &Partition {
        self.store.current_partition()
    }

    #[inline]
    pub fn bounds(&self) -> Bounds { self.store.bounds() }

    #[inline]
    pub fn background(&self) -> &ColorValue { self.store.background() }

    /// Paint `[min, max)` with `color`.  The part of the range outside
    /// the current bounds is dropped.
    pub fn insert(&mut self, color: impl Into<ColorValue>,
                  min: f64, max: f64) -> Result<()> {
        let painted = editor::insert(self.current_partition().intervals(),
                                     color.into(), min, max)?;
        let p = editor::trim_and_expand(&painted, self.bounds(),
                                        self.background())?;
        self.store.replace(p);
        Ok(())
    }

    /// Move the bounds to `[min, max)`, clipping or filling with the
    /// background color as needed.
    pub fn trim_and_expand(&mut self, min: f64, max: f64) -> Result<()> {
        let bounds = Bounds::new(min, max)?;
        let p = editor::trim_and_expand(self.current_partition().intervals(),
                                        bounds, self.background())?;
        self.store.replace(p);
        Ok(())
    }

    /// Recolor every background interval with `color`, which becomes
    /// the new background.
    pub fn replace_background_color(&mut self, color: impl Into<ColorValue>) {
        let color = color.into();
        let p = editor::replace_background_color(
            self.current_partition(), self.background(), &color);
        self.store.replace_all(p, color);
    }

    /// Go back to the configured default colormap.
    pub fn reset(&mut self) {
        let bg = self.config.default_background.clone();
        let p = editor::reset(&bg, self.config.default_bounds);
        self.store.replace_all(p, bg);
    }

    /// The renderable ramp of the current partition.
    pub fn ramp(&self) -> Ramp {
        Ramp::with_precision(self.current_partition(),
                             self.config.tick_precision)
    }

    /// Save the current partition in `repo` and return its name.
    pub fn save<R>(&self, repo: &mut R) -> Result<String>
    where R: Repository + ?Sized {
        repo.save(self.current_partition())
    }

    /// Replace the current partition (and bounds) with the one saved
    /// as `name`.  The background color is kept.
    pub fn load<R>(&mut self, repo: &R, name: &str) -> Result<()>
    where R: Repository + ?Sized {
        let p = repo.load(name)?;
        debug!("session now spans [{}, {})", p.bounds().min(), p.bounds().max());
        self.store.replace(p);
        Ok(())
    }

    /// Open the catalog configured for this session: the JSON file at
    /// `store_path`, or an in-memory catalog.
    pub fn open_repository(&self) -> Result<Box<dyn Repository>> {
        match &self.config.store_path {
            Some(path) => Ok(Box::new(JsonRepository::open(path.clone())?)),
            None => {
                info!("no store path configured, saving in memory");
                Ok(Box::new(MemoryRepository::new()))
            }
        }
    }

    /// One human-readable line per interval.
    pub fn describe(&self) -> Vec<String> {
        self.current_partition().intervals().iter()
            .map(|i| format!("Color: {}, Range: [{}, {}]", i.color, i.min, i.max))
            .collect()
    }

    /// Backgrounds to offer the user, including the current one.
    pub fn background_options(&self) -> Vec<ColorValue> {
        self.config.background_options(self.background())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn failed_edit_leaves_session_unchanged() {
        let mut s = Session::default();
        s.insert("red", 20., 40.).unwrap();
        let before = s.current_partition().clone();
        assert!(matches!(s.insert("blue", 50., 50.),
                         Err(Error::InvalidRange { .. })));
        assert!(matches!(s.trim_and_expand(90., 10.),
                         Err(Error::DegenerateBounds { .. })));
        assert_eq!(s.current_partition(), &before);
    }

    #[test]
    fn insert_is_clipped_to_bounds() {
        let mut s = Session::default();
        s.insert("red", 90., 120.).unwrap();
        assert_eq!(s.bounds(), Bounds::default());
        assert_eq!(s.describe(), ["Color: white, Range: [0, 90]",
                                  "Color: red, Range: [90, 100]"]);
        s.insert("blue", 150., 200.).unwrap();
        assert_eq!(s.current_partition().len(), 2);
    }

    #[test]
    fn reset_uses_configuration() {
        let config = EditorConfig { default_background: "black".into(),
                                    default_bounds: Bounds::new(-1., 1.)
                                        .unwrap(),
                                    ..EditorConfig::default() };
        let mut s = Session::new(config);
        s.replace_background_color("gray");
        s.trim_and_expand(0., 5.).unwrap();
        s.reset();
        assert_eq!(s.background().as_str(), "black");
        assert_eq!(s.describe(), ["Color: black, Range: [-1, 1]"]);
    }

    #[test]
    fn background_options_follow_background() {
        let mut s = Session::default();
        s.replace_background_color("pink");
        assert!(s.background_options().contains(&"pink".into()));
    }

    #[test]
    fn in_memory_repository_by_default() {
        let mut s = Session::default();
        let mut repo = s.open_repository().unwrap();
        let name = s.save(repo.as_mut()).unwrap();
        s.insert("red", 0., 50.).unwrap();
        s.load(repo.as_ref(), &name).unwrap();
        assert_eq!(s.current_partition().len(), 1);
    }
}
