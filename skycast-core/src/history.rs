//! Most-recent-first list of city names that were looked up successfully.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::project_dirs;

pub const MAX_RECENT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSearches {
    entries: Vec<String>,
}

impl RecentSearches {
    /// Move `city` to the front, dropping an exact duplicate and anything past the cap.
    pub fn record(&mut self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            return;
        }

        self.entries.retain(|existing| existing != city);
        self.entries.insert(0, city.to_string());
        self.entries.truncate(MAX_RECENT);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::file_path()?)
    }

    /// Missing files load as empty; oversized lists are cut to the cap.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read search history: {}", path.display()))?;

        let mut history: RecentSearches = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse search history: {}", path.display()))?;
        history.entries.truncate(MAX_RECENT);

        Ok(history)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize search history")?;

        fs::write(path, json)
            .with_context(|| format!("Failed to write search history: {}", path.display()))?;

        Ok(())
    }

    pub fn file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.data_dir().join("recent_searches.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first() {
        let mut recent = RecentSearches::default();
        recent.record("Ilorin");
        recent.record("Lagos");

        assert_eq!(recent.entries(), ["Lagos", "Ilorin"]);
    }

    #[test]
    fn duplicates_move_to_front() {
        let mut recent = RecentSearches::default();
        for city in ["Ilorin", "Lagos", "Abuja", "Ilorin"] {
            recent.record(city);
        }

        assert_eq!(recent.entries(), ["Ilorin", "Abuja", "Lagos"]);
    }

    #[test]
    fn dedup_is_exact_match_only() {
        let mut recent = RecentSearches::default();
        recent.record("lagos");
        recent.record("Lagos");

        assert_eq!(recent.entries(), ["Lagos", "lagos"]);
    }

    #[test]
    fn capped_at_five() {
        let mut recent = RecentSearches::default();
        for city in ["A", "B", "C", "D", "E", "F", "G"] {
            recent.record(city);
        }

        assert_eq!(recent.entries(), ["G", "F", "E", "D", "C"]);
    }

    #[test]
    fn blank_names_are_ignored() {
        let mut recent = RecentSearches::default();
        recent.record("   ");
        assert!(recent.is_empty());
    }

    #[test]
    fn persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("recent_searches.json");

        let mut recent = RecentSearches::default();
        recent.record("Ilorin");
        recent.record("Oslo");
        recent.save_to(&path).unwrap();

        assert_eq!(RecentSearches::load_from(&path).unwrap(), recent);

        recent.clear();
        recent.save_to(&path).unwrap();
        assert!(RecentSearches::load_from(&path).unwrap().is_empty());
    }

    #[test]
    fn loading_truncates_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent_searches.json");
        fs::write(&path, r#"{"entries": ["a", "b", "c", "d", "e", "f", "g"]}"#).unwrap();

        let recent = RecentSearches::load_from(&path).unwrap();
        assert_eq!(recent.entries().len(), MAX_RECENT);
        assert_eq!(recent.entries()[0], "a");
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let recent = RecentSearches::load_from(&dir.path().join("none.json")).unwrap();
        assert!(recent.is_empty());
    }
}
