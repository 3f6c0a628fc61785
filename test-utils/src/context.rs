use std::path::PathBuf;
use tempfile::TempDir;

use crate::error::TestError;

/// Test context owning a temporary directory with the bot's data files.
///
/// The directory and everything in it is deleted when the context is dropped, so keep
/// the context alive for the whole test.
pub struct TestContext {
    /// Temporary directory holding the fixture files.
    pub dir: TempDir,

    /// Path of the config file (`config.json`).
    ///
    /// Only exists on disk if the builder was given a config document.
    pub config_path: PathBuf,

    /// Path of the nation catalog file (`nations.json`).
    pub nations_path: PathBuf,
}

impl TestContext {
    /// Creates a context around a fresh, empty temporary directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with paths pointing into the new directory
    /// - `Err(TestError::Io)` - The temporary directory could not be created
    pub fn new() -> Result<Self, TestError> {
        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join("config.json");
        let nations_path = dir.path().join("nations.json");

        Ok(Self {
            dir,
            config_path,
            nations_path,
        })
    }

    /// Reads the config file back as a JSON value.
    ///
    /// # Returns
    /// - `Ok(serde_json::Value)` - Parsed config document
    /// - `Err(TestError)` - The file is missing or not valid JSON
    pub fn read_config(&self) -> Result<serde_json::Value, TestError> {
        let contents = std::fs::read_to_string(&self.config_path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
