use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::LoadedLeaderboard;
use crate::{ImporterError, Result};
use crate::traits::LeaderboardSource;

/// Reads and normalizes one exported leaderboard file.
///
/// The file stem becomes the leaderboard id.
pub fn load_file(path: &Path) -> Result<LoadedLeaderboard> {
    let content = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&content)?;
    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let loaded = LoadedLeaderboard::from_document(id, &document)?;
    debug!(
        "Loaded {} ({} entries) from {}",
        loaded.id,
        loaded.entries.len(),
        path.display()
    );
    Ok(loaded)
}

/// Every `*.json` file in `directory` and its direct subdirectories, sorted.
pub fn discover_json_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut json_files = Vec::new();

    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if path.is_dir() {
            for sub_entry in fs::read_dir(&path)? {
                let sub_path = sub_entry?.path();
                if is_json(&sub_path) {
                    json_files.push(sub_path);
                }
            }
        } else if is_json(&path) {
            json_files.push(path);
        }
    }

    json_files.sort();
    Ok(json_files)
}

fn is_json(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "json")
}

/// A single export file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LeaderboardSource for FileSource {
    fn load(&self) -> Result<Vec<LoadedLeaderboard>> {
        Ok(vec![load_file(&self.path)?])
    }
}

/// A directory of export files. Files that fail to load are skipped.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    directory: PathBuf,
}

impl DirectorySource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl LeaderboardSource for DirectorySource {
    fn load(&self) -> Result<Vec<LoadedLeaderboard>> {
        let files = discover_json_files(&self.directory)?;
        if files.is_empty() {
            warn!("No JSON files found in {}", self.directory.display());
        }

        let mut loaded = Vec::with_capacity(files.len());
        for path in &files {
            match load_file(path) {
                Ok(leaderboard) => loaded.push(leaderboard),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        if loaded.is_empty() && !files.is_empty() {
            return Err(ImporterError::ImportError(format!(
                "none of the {} file(s) in {} could be loaded",
                files.len(),
                self.directory.display()
            )));
        }

        info!(
            "Loaded {} of {} leaderboard file(s) from {}",
            loaded.len(),
            files.len(),
            self.directory.display()
        );
        Ok(loaded)
    }
}
