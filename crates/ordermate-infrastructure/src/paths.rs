//! Unified path management for OrderMate files.
//!
//! All OrderMate configuration and conversation data lives under one
//! per-user directory so the CLI, the generator config, and the transcript
//! store agree on locations.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/ordermate/         # Base directory
//! ├── config.toml              # Generator configuration
//! ├── orders.json              # Sales order table (optional default)
//! └── conversation/            # One transcript file per session
//!     └── chat_YYYYMMDD_HHMMSS.txt
//! ```

use ordermate_core::{OrdermateError, Result};
use std::path::PathBuf;

/// Path resolution for OrderMate's on-disk layout.
///
/// The default base is the platform config directory; tests and the CLI's
/// `--storage-dir` flag substitute an explicit base.
#[derive(Debug, Clone)]
pub struct OrdermatePaths {
    base_dir: PathBuf,
}

impl OrdermatePaths {
    /// Uses an explicit base directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolves the per-user default base directory
    /// (`~/.config/ordermate`).
    ///
    /// # Errors
    ///
    /// Fails if the home directory cannot be determined.
    pub fn default_location() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| OrdermateError::config("Could not determine home directory"))?;
        Ok(Self::new(home.join(".config").join("ordermate")))
    }

    /// The base directory.
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// The directory holding one transcript file per session.
    pub fn conversation_dir(&self) -> PathBuf {
        self.base_dir.join("conversation")
    }

    /// The generator configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.toml")
    }

    /// The default location of the order table file.
    pub fn orders_file(&self) -> PathBuf {
        self.base_dir.join("orders.json")
    }
}
