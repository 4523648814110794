use super::{Snapshot, SnapshotStore};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, error, info, warn};

/// Snapshots older than this, by file modification time, are not reused.
pub const MAX_SNAPSHOT_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Stores the snapshot as a single JSON file.
///
/// The file is not locked. Two processes refreshing at the same time may
/// overwrite each other's snapshot.
pub struct DiskStore {
    path: PathBuf,
    max_age: Duration,
}

impl DiskStore {
    /// Creates the store, creating the file's parent directory if missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = create_cache_dir(parent)
        {
            warn!(
                "Failed to create cache directory {}: {}",
                parent.display(),
                e
            );
        }
        Self {
            path,
            max_age: MAX_SNAPSHOT_AGE,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_fresh(&self) -> Result<Option<Snapshot>> {
        let modified = fs::metadata(&self.path)?.modified()?;
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or_default();
        debug!("Cache file age: {:.1} hours", age.as_secs_f64() / 3600.0);
        if age > self.max_age {
            info!("Cache file is older than 24 hours");
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read cache file: {}", self.path.display()))?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).context("Invalid cache file structure")?;
        Ok(Some(snapshot))
    }

    fn write(&self, snapshot: &Snapshot) -> Result<()> {
        let json = serde_json::to_vec(snapshot).context("Failed to serialize snapshot")?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            anyhow::anyhow!("Failed to move snapshot into {}: {}", self.path.display(), e)
        })
    }
}

fn create_cache_dir(dir: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(dir)
}

impl SnapshotStore for DiskStore {
    fn load(&self) -> Option<Snapshot> {
        if !self.path.exists() {
            debug!("Cache file does not exist");
            return None;
        }

        match self.read_fresh() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Error loading cache from disk: {:#}", e);
                None
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) {
        match self.write(snapshot) {
            Ok(()) => info!("Cache saved to disk: {}", self.path.display()),
            Err(e) => error!("Error saving cache to disk: {:#}", e),
        }
    }
}
