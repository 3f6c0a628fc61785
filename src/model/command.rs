//! Command invocation and response models.
//!
//! These types decouple the command registry from Serenity's interaction payloads:
//! the bot layer parses an interaction into a [`CommandInvocation`], the registry
//! runs the matching handler, and the resulting [`CommandResponse`] is rendered back
//! as an ephemeral follow-up.

use std::collections::BTreeMap;

use crate::error::AppError;

/// A parsed slash-command or autocomplete interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Space-separated command path, e.g. `"nation join"`.
    pub path: String,
    /// String arguments keyed by option name.
    pub args: CommandArgs,
    /// Option currently being typed, for autocomplete interactions: `(name, partial value)`.
    pub focused: Option<(String, String)>,
}

/// String arguments of a command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    values: BTreeMap<String, String>,
}

impl CommandArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an argument, returning the updated set for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns a required argument.
    ///
    /// # Returns
    /// - `Ok(&str)` - The argument value
    /// - `Err(AppError::BadRequest)` - The argument was not supplied
    pub fn required(&self, name: &str) -> Result<&str, AppError> {
        self.values
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| AppError::BadRequest(format!("Missing required option `{}`", name)))
    }
}

/// Message sent back to the member who ran a command. Always ephemeral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    pub content: String,
}

impl CommandResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
