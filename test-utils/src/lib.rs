//! Nation Wars Test Utils
//!
//! Provides shared testing utilities for the Nation Wars bot. This crate offers a builder
//! pattern for creating test contexts backed by a temporary directory holding a nation
//! catalog file and a config file.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for configuring the files a test starts from
//! - **TestContext**: Test environment owning the temporary directory and file paths
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, fixture};
//!
//! #[tokio::test]
//! async fn loads_guilds() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_nation("France", "🇫🇷")
//!         .with_guild(100, fixture::guild_record(1, 2, 3, 4))
//!         .build()?;
//!
//!     let config = std::fs::read_to_string(&test.config_path)?;
//!     // ...
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod fixture;
