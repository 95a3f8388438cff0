//! Reads and writes the JSON save file under `~/.estate/`.

use super::game::SaveGame;
use crate::core::constants::{SAVE_DIR_NAME, SAVE_FILE_NAME};
use crate::core::error::{EstateError, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Save manager for `~/.estate/save.json`, creating the directory if needed.
    pub fn new() -> Result<Self> {
        let home_dir = dirs::home_dir().ok_or(EstateError::NoHomeDirectory)?;
        let dir = home_dir.join(SAVE_DIR_NAME);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            save_path: dir.join(SAVE_FILE_NAME),
        })
    }

    pub fn with_path(save_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
        }
    }

    /// Save manager in a unique temporary directory.
    #[cfg(test)]
    fn new_for_test() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "estate-test-{}-{}",
            std::process::id(),
            test_id
        ));
        fs::create_dir_all(&temp_dir)?;
        Ok(Self::with_path(temp_dir.join(SAVE_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    pub fn exists(&self) -> bool {
        self.save_path.exists()
    }

    /// Writes the save as pretty-printed JSON.
    pub fn save(&self, game: &SaveGame) -> Result<()> {
        let json = serde_json::to_string_pretty(game)?;
        fs::write(&self.save_path, json)?;
        info!(
            "progress saved for {} to {}",
            game.investor.name,
            self.save_path.display()
        );
        Ok(())
    }

    /// Loads the save, or `None` when there is no save file.
    ///
    /// Malformed content is an error; nothing is silently defaulted.
    pub fn load(&self) -> Result<Option<SaveGame>> {
        if !self.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.save_path)?;
        let game: SaveGame = serde_json::from_str(&json)?;
        game.validate()?;
        info!(
            "loaded save for {} (year {}, month {})",
            game.investor.name, game.investor.calendar.year, game.investor.calendar.month
        );
        Ok(Some(game))
    }

    pub fn delete(&self) -> Result<()> {
        if self.exists() {
            fs::remove_file(&self.save_path)?;
        }
        Ok(())
    }
}
