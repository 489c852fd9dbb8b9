//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::{GameState, SaveCode};

use super::{RepositoryError, Result, StateRepository, decode, encode};

const FILE_PREFIX: &str = "rpg_save_";
const FILE_SUFFIX: &str = ".json";

/// File-based implementation of StateRepository.
///
/// # File Format
///
/// Each slot is stored as `rpg_save_{code}.json` holding the pretty-printed
/// snapshot. Writes go to a temporary file first and are renamed into place,
/// so a crash mid-write never leaves a truncated save behind.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    /// Create a new file-based state repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a save file.
    pub fn save_path(&self, code: &SaveCode) -> PathBuf {
        self.base_dir
            .join(format!("{FILE_PREFIX}{}{FILE_SUFFIX}", code.as_str()))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, code: &SaveCode, state: &GameState) -> Result<()> {
        let path = self.save_path(code);
        let temp_path = path.with_extension("json.tmp");

        let text = encode(state)?;
        fs::write(&temp_path, text)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved '{}' to {}", code, path.display());

        Ok(())
    }

    fn load(&self, code: &SaveCode) -> Result<Option<GameState>> {
        let path = self.save_path(code);

        if !path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => RepositoryError::CorruptedData(format!(
                "save '{code}' is not valid UTF-8"
            )),
            _ => RepositoryError::Io(e),
        })?;
        let state = decode(code, &text)?;

        tracing::debug!("Loaded '{}' from {}", code, path.display());

        Ok(Some(state))
    }

    fn exists(&self, code: &SaveCode) -> bool {
        self.save_path(code).exists()
    }

    fn delete(&self, code: &SaveCode) -> Result<()> {
        let path = self.save_path(code);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted '{}'", code);
        }

        Ok(())
    }

    fn list_codes(&self) -> Result<Vec<SaveCode>> {
        let mut codes = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(raw) = filename
                    .strip_prefix(FILE_PREFIX)
                    .and_then(|s| s.strip_suffix(FILE_SUFFIX))
                && let Ok(code) = SaveCode::parse(raw)
            {
                codes.push(code);
            }
        }

        codes.sort_unstable();
        Ok(codes)
    }
}
