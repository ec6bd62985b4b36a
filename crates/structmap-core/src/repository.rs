//! File-system repository for persisting type map snapshots.
//!
//! Snapshots are stored as JSON files named `{source}_{destination}.json`
//! (with `_{name}` appended for named maps), so a reviewed mapping
//! configuration can be reloaded across runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::typemap::{TypeMap, TypeMapSnapshot};

/// Directory-based store of serialized [`TypeMapSnapshot`]s.
#[derive(Debug, Clone)]
pub struct TypeMapRepository {
    base_dir: PathBuf,
}

/// Summary of one stored snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub source: String,
    pub destination: String,
    pub name: Option<String>,
    pub file_path: PathBuf,
    pub mapping_count: usize,
    pub unmapped_count: usize,
}

impl TypeMapRepository {
    /// Opens a repository at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).with_context(|| {
            format!("failed to create snapshot repository: {}", base_dir.display())
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn save(&self, map: &TypeMap) -> Result<PathBuf> {
        self.save_snapshot(&map.snapshot())
    }

    pub fn save_snapshot(&self, snapshot: &TypeMapSnapshot) -> Result<PathBuf> {
        let filename = snapshot_filename(
            &snapshot.source,
            &snapshot.destination,
            snapshot.name.as_deref(),
        );
        let path = self.base_dir.join(&filename);
        let json = serde_json::to_string_pretty(snapshot)
            .with_context(|| format!("failed to serialize snapshot {filename}"))?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
        Ok(path)
    }

    /// Loads the snapshot for a type pair; `None` when absent.
    pub fn load(
        &self,
        source: &str,
        destination: &str,
        name: Option<&str>,
    ) -> Result<Option<TypeMapSnapshot>> {
        let path = self
            .base_dir
            .join(snapshot_filename(source, destination, name));
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
        let snapshot: TypeMapSnapshot = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse snapshot from {}", path.display()))?;
        Ok(Some(snapshot))
    }

    /// All snapshots keyed by filename stem, for bulk reload.
    pub fn load_all(&self) -> Result<BTreeMap<String, TypeMapSnapshot>> {
        let mut snapshots = BTreeMap::new();
        for entry in fs::read_dir(&self.base_dir)
            .with_context(|| format!("failed to read repository: {}", self.base_dir.display()))?
        {
            let path = entry?.path();
            if !is_snapshot_file(&path) {
                continue;
            }
            let contents = fs::read_to_string(&path)?;
            if let Ok(snapshot) = serde_json::from_str::<TypeMapSnapshot>(&contents) {
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default()
                    .to_string();
                snapshots.insert(stem, snapshot);
            }
        }
        Ok(snapshots)
    }

    pub fn list(&self) -> Result<Vec<SnapshotMetadata>> {
        let mut metadata = Vec::new();
        for entry in fs::read_dir(&self.base_dir)
            .with_context(|| format!("failed to read repository: {}", self.base_dir.display()))?
        {
            let path = entry?.path();
            if !is_snapshot_file(&path) {
                continue;
            }
            let contents = fs::read_to_string(&path)?;
            if let Ok(snapshot) = serde_json::from_str::<TypeMapSnapshot>(&contents) {
                let unmapped = snapshot
                    .mappings
                    .iter()
                    .filter(|m| !m.is_mapped())
                    .count();
                metadata.push(SnapshotMetadata {
                    source: snapshot.source,
                    destination: snapshot.destination,
                    name: snapshot.name,
                    file_path: path,
                    mapping_count: snapshot.mappings.len(),
                    unmapped_count: unmapped,
                });
            }
        }
        metadata.sort_by(|a, b| {
            a.source
                .cmp(&b.source)
                .then_with(|| a.destination.cmp(&b.destination))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(metadata)
    }

    pub fn delete(&self, source: &str, destination: &str, name: Option<&str>) -> Result<bool> {
        let path = self
            .base_dir
            .join(snapshot_filename(source, destination, name));
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("failed to delete snapshot: {}", path.display()))?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn exists(&self, source: &str, destination: &str, name: Option<&str>) -> bool {
        self.base_dir
            .join(snapshot_filename(source, destination, name))
            .exists()
    }
}

fn is_snapshot_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "json")
}

fn snapshot_filename(source: &str, destination: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => format!(
            "{}_{}_{}.json",
            normalize_id(source),
            normalize_id(destination),
            normalize_id(name)
        ),
        None => format!("{}_{}.json", normalize_id(source), normalize_id(destination)),
    }
}

/// Normalizes an identifier for use in filenames.
fn normalize_id(id: &str) -> String {
    id.trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_are_normalized() {
        assert_eq!(snapshot_filename("Order", "OrderDTO", None), "Order_OrderDTO.json");
        assert_eq!(
            snapshot_filename("a.b.Order", "OrderDTO", Some("loose")),
            "a_b_Order_OrderDTO_loose.json"
        );
    }
}
