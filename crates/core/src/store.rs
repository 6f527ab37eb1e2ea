//! Best-score persistence contract.
//!
//! The engines only hand out a number to persist; hosts decide where it
//! lives. Two stores ship with the crate: an in-process scalar and a JSON
//! document on disk keyed by name (e.g. `2048_bestScore`).

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Read/write access to one persisted best score
pub trait BestScoreStore {
    fn load(&self) -> Result<u32>;
    fn save(&mut self, score: u32) -> Result<()>;
}

/// In-process store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStore {
    value: u32,
}

impl MemoryStore {
    pub fn new(value: u32) -> Self {
        Self { value }
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> Result<u32> {
        Ok(self.value)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.value = score;
        Ok(())
    }
}

/// One named score inside a JSON object file
///
/// Other keys in the same file are preserved on save. A missing file or key
/// reads as 0.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    key: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, u32>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).with_context(|| format!("parsing {}", self.path.display()))
    }
}

impl BestScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32> {
        Ok(self.read_all()?.get(&self.key).copied().unwrap_or(0))
    }

    fn save(&mut self, score: u32) -> Result<()> {
        let mut all = self.read_all()?;
        all.insert(self.key.clone(), score);
        let text = serde_json::to_string_pretty(&all)?;
        fs::write(&self.path, text)
            .with_context(|| format!("writing {}", self.path.display()))?;
        log::debug!("saved best score {} under {}", score, self.key);
        Ok(())
    }
}
