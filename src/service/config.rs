use crate::{error::AppError, state::AppState};

/// Persists the guild cache to the config file.
pub struct ConfigService<'a> {
    state: &'a AppState,
}

impl<'a> ConfigService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Rewrites the config file from the current cache contents.
    ///
    /// Quarantined guild records are written back unchanged alongside the active
    /// guilds.
    ///
    /// # Returns
    /// - `Ok(())` - The file was rewritten
    /// - `Err(AppError::IoErr)` - The file could not be written
    /// - `Err(AppError::JsonErr)` - The snapshot could not be serialized
    pub async fn save(&self) -> Result<(), AppError> {
        let snapshot = self.state.cache.snapshot(&self.state.file_token).await;

        self.state.config_repo.save(&snapshot).await
    }
}
