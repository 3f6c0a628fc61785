//! Service layer for the bot's business logic.
//!
//! Services sit between the event handlers and the data layer. Each service is a
//! short-lived struct borrowing the shared [`AppState`](crate::state::AppState) and,
//! where it causes side effects, a [`Platform`](crate::platform::Platform):
//!
//! - **Nation lifecycle**: resolving, provisioning and removing nations, and member
//!   joins and leaves
//! - **Guild management**: bootstrapping new guilds, rehydrating known ones on
//!   startup and managing the welcome message
//! - **Autocomplete**: ranking nation suggestions for a member
//! - **Nickname sync**: keeping nation emojis in front of member names
//!
//! Every mutation of the guild cache is followed by a config save through
//! [`config::ConfigService`].

pub mod autocomplete;
pub mod config;
pub mod guild;
pub mod nation;
pub mod nickname;

#[cfg(test)]
mod test;
