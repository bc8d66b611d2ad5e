//! Named snapshots of partitions.
//!
//! Snapshots are named `colormap_01`, `colormap_02`,… in order of
//! creation and are never overwritten nor deleted.

use std::{collections::BTreeSet,
          fs,
          io::{self, BufWriter, Write},
          path::{Path, PathBuf}};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use crate::{color::ColorValue,
            editor,
            error::{Error, Result},
            interval::{Bounds, Interval, Partition}};

/// A partition saved under a name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedPartition {
    pub name: String,
    pub intervals: Vec<Interval>,
    pub bounds: Bounds,
}

impl SavedPartition {
    pub fn new(name: impl Into<String>, partition: &Partition) -> Self {
        SavedPartition { name: name.into(),
                         intervals: partition.intervals().to_vec(),
                         bounds: partition.bounds() }
    }

    /// Rebuild the partition, checking that the stored intervals still
    /// tile the stored bounds.
    pub fn partition(&self) -> Result<Partition> {
        Partition::new(self.intervals.clone(), self.bounds)
    }
}

/// Name given to the snapshot saved after `count` others: the first
/// free name among `colormap_{count+1:02}`, `colormap_{count+2:02}`,…
fn next_name(count: usize, taken: impl Fn(&str) -> bool) -> String {
    let mut k = count + 1;
    loop {
        let name = format!("colormap_{k:02}");
        if !taken(&name) { return name }
        k += 1;
    }
}

/// An append-only catalog of [`SavedPartition`]s.
pub trait Repository {
    /// All snapshots, in order of insertion.
    fn entries(&self) -> &[SavedPartition];

    /// Append `saved` to the catalog.  The name must be free.
    fn append(&mut self, saved: SavedPartition) -> Result<()>;

    /// Save `partition` under a fresh name and return that name.
    fn save(&mut self, partition: &Partition) -> Result<String> {
        let name = next_name(self.len(), |n| self.contains(n));
        self.append(SavedPartition::new(name.clone(), partition))?;
        info!("saved {name} ({} intervals)", partition.len());
        Ok(name)
    }

    /// Return the partition saved as `name`.
    fn load(&self, name: &str) -> Result<Partition> {
        let saved = self.entries().iter().find(|s| s.name == name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        info!("loaded {name}");
        saved.partition()
    }

    /// Names of all saved partitions.
    fn list(&self) -> BTreeSet<String> {
        self.entries().iter().map(|s| s.name.clone()).collect()
    }

    fn contains(&self, name: &str) -> bool {
        self.entries().iter().any(|s| s.name == name)
    }

    fn len(&self) -> usize { self.entries().len() }

    fn is_empty(&self) -> bool { self.entries().is_empty() }

    /// Add an externally produced snapshot unless its name is already
    /// taken.  Returns whether it was added.
    fn import(&mut self, saved: SavedPartition) -> Result<bool> {
        if self.contains(&saved.name) {
            warn!("not importing {}: name already used", saved.name);
            return Ok(false)
        }
        self.append(saved)?;
        Ok(true)
    }
}

/// A catalog living in memory only.
#[derive(Clone, Debug, Default)]
pub struct MemoryRepository {
    entries: Vec<SavedPartition>,
}

impl MemoryRepository {
    pub fn new() -> Self { Self::default() }
}

impl Repository for MemoryRepository {
    fn entries(&self) -> &[SavedPartition] { &self.entries }

    fn append(&mut self, saved: SavedPartition) -> Result<()> {
        self.entries.push(saved);
        Ok(())
    }
}

/// On-disk layout of a [`JsonRepository`].
#[derive(Deserialize)]
struct Catalog {
    colormaps: Vec<SavedPartition>,
}

/// A catalog stored as a single JSON document.
///
/// The whole document is rewritten on every save, through a temporary
/// file renamed over the previous one.
#[derive(Debug)]
pub struct JsonRepository {
    path: PathBuf,
    entries: Vec<SavedPartition>,
}

impl JsonRepository {
    /// Open the catalog at `path`, starting empty if the file does not
    /// exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(s) => {
                let c: Catalog = serde_json::from_str(&s).map_err(
                    |source| Error::Corrupt { path: path.clone(), source })?;
                c.colormaps
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{} does not exist, starting empty", path.display());
                vec![]
            }
            Err(source) => return Err(Error::Persistence { path, source }),
        };
        info!("opened {} ({} colormaps)", path.display(), entries.len());
        Ok(JsonRepository { path, entries })
    }

    pub fn path(&self) -> &Path { &self.path }

    fn write(&self, entries: &[SavedPartition]) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let fh = fs::File::create(&tmp)
            .map_err(|source| Error::Persistence { path: tmp.clone(), source })?;
        let written = Self::write_to(BufWriter::new(fh), &tmp, entries)
            .and_then(|()| fs::rename(&tmp, &self.path).map_err(
                |source| Error::Persistence { path: self.path.clone(), source }));
        if written.is_err() {
            // The error being returned is the one that matters.
            let _ = fs::remove_file(&tmp);
        }
        written
    }

    fn write_to(mut fh: BufWriter<fs::File>, tmp: &Path,
                entries: &[SavedPartition]) -> Result<()> {
        #[derive(Serialize)]
        struct CatalogRef<'a> { colormaps: &'a [SavedPartition] }
        serde_json::to_writer_pretty(&mut fh, &CatalogRef { colormaps: entries })
            .map_err(|source| Error::Corrupt { path: tmp.to_path_buf(), source })?;
        fh.flush()
            .map_err(|source| Error::Persistence { path: tmp.to_path_buf(), source })
    }
}

impl Repository for JsonRepository {
    fn entries(&self) -> &[SavedPartition] { &self.entries }

    fn append(&mut self, saved: SavedPartition) -> Result<()> {
        let mut entries = self.entries.clone();
        entries.push(saved);
        self.write(&entries)?;
        self.entries = entries;
        Ok(())
    }
}

/// A colormap saved one-per-file by earlier versions of the editor.
#[derive(Deserialize)]
struct LegacyRecord {
    data: Vec<Interval>,
    mincolormap: f64,
    maxcolormap: f64,
}

/// Fit legacy intervals to their bounds.  Earlier versions kept
/// intervals touching a new bound and never clipped inserted ranges,
/// so records may overflow or fall short of the bounds they carry.
fn legacy_partition(data: Vec<Interval>, bounds: Bounds,
                    background: &ColorValue) -> Result<Partition> {
    let data: Vec<Interval> = data.into_iter()
        .filter(|i| i.min.is_finite() && i.max.is_finite() && i.min < i.max)
        .collect();
    if data.is_empty() {
        return Err(Error::InvalidPartition("no interval".to_string()))
    }
    editor::trim_and_expand(&data, bounds, background)
}

/// Read every `*.json` file of `dir` written in the one-file-per-save
/// format and return them as snapshots named after the file stem.
/// Records are fitted to their bounds, filling uncovered stretches with
/// `background`.  Files that cannot be read, parsed or fitted are
/// skipped with a warning.
pub fn import_legacy_dir(dir: impl AsRef<Path>, background: &ColorValue)
                         -> Result<Vec<SavedPartition>> {
    let dir = dir.as_ref();
    let persistence = |source| Error::Persistence { path: dir.to_path_buf(),
                                                    source };
    let mut paths: Vec<PathBuf> = fs::read_dir(dir).map_err(persistence)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().map_or(false, |x| x == "json"))
        .collect();
    paths.sort();
    let mut saved = Vec::with_capacity(paths.len());
    for path in paths {
        let name = match path.file_stem().and_then(|s| s.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };
        let record = fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|s| serde_json::from_str::<LegacyRecord>(&s)
                      .map_err(|e| e.to_string()))
            .and_then(|r| {
                let bounds = Bounds::new(r.mincolormap, r.maxcolormap)
                    .map_err(|e| e.to_string())?;
                legacy_partition(r.data, bounds, background)
                    .map(|p| SavedPartition::new(name, &p))
                    .map_err(|e| e.to_string())
            });
        match record {
            Ok(r) => {
                debug!("read {}", path.display());
                saved.push(r)
            }
            Err(e) => warn!("skipping {}: {e}", path.display()),
        }
    }
    Ok(saved)
}
