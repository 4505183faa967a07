//! Files under the data directory: `settings.toml` and `highscores.json`.
//!
//! A missing file is not an error, loaders return `None` and callers fall back to defaults.

use anyhow::{Context, Result};
use minesweeper_core::HighScores;
use std::fs;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::settings::Settings;

const SETTINGS_FILE: &str = "settings.toml";
const SCORES_FILE: &str = "highscores.json";

/// Where the CLI keeps its state.
#[derive(Clone, Debug)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: PathBuf) -> Self {
        log::debug!("data directory: {root:?}");
        Self { root }
    }

    /// Platform data directory, e.g. `~/.local/share/minesweeper` on Linux.
    pub fn platform() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "minesweeper")
            .context("could not determine a home directory")?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn load_settings(&self) -> Result<Option<Settings>> {
        let path = self.root.join(SETTINGS_FILE);
        let Some(raw) = read_optional(&path)? else {
            return Ok(None);
        };
        let settings =
            toml::from_str(&raw).with_context(|| format!("invalid settings in {path:?}"))?;
        Ok(Some(settings))
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let path = self.root.join(SETTINGS_FILE);
        let raw = toml::to_string_pretty(settings).context("could not encode settings")?;
        self.ensure_root()?;
        fs::write(&path, raw).with_context(|| format!("could not write {path:?}"))
    }

    pub fn load_scores(&self) -> Result<Option<HighScores>> {
        let path = self.root.join(SCORES_FILE);
        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err).with_context(|| format!("could not open {path:?}")),
        };
        let scores = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("invalid high scores in {path:?}"))?;
        Ok(Some(scores))
    }

    pub fn save_scores(&self, scores: &HighScores) -> Result<()> {
        let path = self.root.join(SCORES_FILE);
        self.ensure_root()?;
        let file = fs::File::create(&path).with_context(|| format!("could not create {path:?}"))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, scores).context("could not encode scores")?;
        writer.flush()?;
        Ok(())
    }

    fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).with_context(|| format!("could not create {:?}", self.root))
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("could not read {path:?}")),
    }
}

/// Loads a file through `load`, using the default when it is missing or unreadable.
pub fn load_or_default<T: Default>(what: &str, load: impl FnOnce() -> Result<Option<T>>) -> T {
    match load() {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(err) => {
            log::warn!("ignoring {what}: {err:#}");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use minesweeper_core::{ChordPolicy, Difficulty};

    #[test]
    fn missing_files_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path().join("nested"));

        assert!(data.load_settings().unwrap().is_none());
        assert!(data.load_scores().unwrap().is_none());
    }

    #[test]
    fn settings_survive_a_save_load_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path().join("nested"));
        let settings = Settings {
            difficulty: Difficulty::Hard,
            chord_policy: ChordPolicy::MatchFlags,
        };

        data.save_settings(&settings).unwrap();

        assert_eq!(data.load_settings().unwrap(), Some(settings));
    }

    #[test]
    fn scores_survive_a_save_load_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path().to_path_buf());
        let mut scores = HighScores::default();
        scores.record(
            Difficulty::Medium,
            123,
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        );

        data.save_scores(&scores).unwrap();

        assert_eq!(data.load_scores().unwrap(), Some(scores));
    }

    #[test]
    fn corrupt_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path().to_path_buf());
        fs::write(dir.path().join(SCORES_FILE), "{ not json").unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "difficulty = 3").unwrap();

        assert!(data.load_scores().is_err());
        assert_eq!(
            load_or_default("scores", || data.load_scores()),
            HighScores::default()
        );
        assert_eq!(
            load_or_default("settings", || data.load_settings()),
            Settings::default()
        );
    }
}
