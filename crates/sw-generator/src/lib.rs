//! Procedural universe generation for Sternenwanderer.
//!
//! Stars are drawn one at a time from a seeded [`rand::rngs::StdRng`]:
//! uniform coordinates in `[0, universe_size)`, a uniform stellar class, the
//! next id from a caller-supplied [`sw_core::IdAllocator`], and a Gaussian
//! planet count. [`UniverseGenerator`] yields them lazily so a bulk writer can
//! stream millions of stars without collecting them first.

/// Configuration for a generation run.
pub mod config;
/// Error types for the generator crate.
pub mod error;
/// Star generation and the streaming generator.
pub mod generation;

/// Re-export of [`config::UniverseConfig`].
pub use config::UniverseConfig;
/// Re-exports of [`error::GenError`] and [`error::GenResult`].
pub use error::{GenError, GenResult};
/// Re-exports of the generation entry points.
pub use generation::{UniverseGenerator, generate_star, generate_universe};
