use serde_json::{Map, Value};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable data files.
///
/// Collects catalog entries and guild records, then writes `nations.json` and
/// `config.json` into a fresh temporary directory on `build()`.
///
/// # Example
///
/// ```rust,ignore
/// let test = TestBuilder::new()
///     .with_nation("France", "🇫🇷")
///     .with_nation("Japan", "🇯🇵")
///     .with_guild(100, fixture::guild_record(1, 2, 3, 4))
///     .build()?;
/// ```
pub struct TestBuilder {
    /// Catalog entries written to `nations.json`, in insertion order.
    nations: Vec<(String, String)>,

    /// Token stored in `config.json`.
    token: String,

    /// Guild records keyed by guild ID.
    ///
    /// When empty and `write_config` is false, no config file is created.
    guilds: Map<String, Value>,

    /// Whether to write `config.json` at all.
    write_config: bool,
}

impl TestBuilder {
    /// Creates a new builder with an empty catalog and no config file.
    pub fn new() -> Self {
        Self {
            nations: Vec::new(),
            token: "test-token".to_string(),
            guilds: Map::new(),
            write_config: false,
        }
    }

    /// Adds a nation to the catalog file.
    ///
    /// # Arguments
    /// - `name` - Nation name as it should appear in the file
    /// - `emoji` - Display emoji
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_nation(mut self, name: &str, emoji: &str) -> Self {
        self.nations.push((name.to_string(), emoji.to_string()));
        self
    }

    /// Adds the standard test catalog from [`crate::fixture::catalog`].
    pub fn with_default_catalog(mut self) -> Self {
        for (name, emoji) in crate::fixture::catalog() {
            self.nations.push((name.to_string(), emoji.to_string()));
        }
        self
    }

    /// Sets the token written to the config file and makes sure the file is written.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = token.to_string();
        self.write_config = true;
        self
    }

    /// Adds a guild record to the config file.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `record` - Guild record, typically built with [`crate::fixture::guild_record`]
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_guild(mut self, guild_id: u64, record: Value) -> Self {
        self.guilds.insert(guild_id.to_string(), record);
        self.write_config = true;
        self
    }

    /// Writes the configured files and returns the test context.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context whose paths point at the written files
    /// - `Err(TestError)` - Directory creation, serialization or writing failed
    pub fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new()?;

        let mut nations = Map::new();
        for (name, emoji) in self.nations {
            nations.insert(name, Value::String(emoji));
        }
        std::fs::write(
            &context.nations_path,
            serde_json::to_string_pretty(&Value::Object(nations))?,
        )?;

        if self.write_config {
            let config = serde_json::json!({
                "token": self.token,
                "guilds": Value::Object(self.guilds),
            });
            std::fs::write(&context.config_path, serde_json::to_string_pretty(&config)?)?;
        }

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
