//! Data layer: the nation catalog, the config file and the in-memory guild cache.
//!
//! Nothing in this layer talks to Discord. The catalog and config repository read and
//! write JSON files; the guild cache is the in-memory projection that services read
//! and mutate before asking the config service to persist it.

pub mod cache;
pub mod catalog;
pub mod config;

#[cfg(test)]
mod test;
