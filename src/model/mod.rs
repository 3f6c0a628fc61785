//! Domain models shared by the service, data and bot layers.
//!
//! Models hold plain platform IDs rather than live platform objects. Anything that
//! needs the current state of a role, channel or member goes through the
//! [`Platform`](crate::platform::Platform) port instead.

pub mod command;
pub mod config;
pub mod guild;
pub mod member;
pub mod nation;
