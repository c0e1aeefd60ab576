//! Core types for Sternenwanderer: stars, planets, and the id allocator.
//!
//! This crate defines the entity model that the generator produces and the
//! store persists. It knows nothing about storage: a [`Star`] is either drawn
//! fresh from a random source ([`Star::new_random`]) or rebuilt from values
//! read back elsewhere ([`Star::from_persisted`]).

/// Star and planet types with their generation rules.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Monotonic star identity allocation.
pub mod ids;
/// Random sampling helpers for generation.
pub mod sampling;

/// Re-export core entity types.
pub use entity::{MAX_PLANET_SIZE, Planet, PlanetKind, Star, StarId, StarKind};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the id allocator.
pub use ids::IdAllocator;
