//! Exploration layer for Sternenwanderer.
//!
//! A [`Session`] wraps an opened universe store together with its persisted
//! parameters and exposes the lookups an interface needs. An [`Explorer`]
//! keeps a current location and turns one line of player input at a time
//! into the text to show.

/// Text command parsing.
pub mod command;
/// Error types for exploration.
pub mod error;
/// The explorer command loop.
pub mod explorer;
/// Universe sessions.
pub mod session;

pub use command::{Command, parse_command};
pub use error::{ExploreError, ExploreResult};
pub use explorer::{Explorer, NEARBY_RADIUS, START_LOCATION};
pub use session::Session;
