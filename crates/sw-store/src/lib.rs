//! Persistent universe store and spatial queries for Sternenwanderer.
//!
//! A [`Store`] is an LMDB environment (via `heed`) holding a `stars` table,
//! a `planets` table, a coordinate index, and universe metadata. Writes go
//! through [`Store::insert_star`] or one of the batch paths; reads go through
//! the spatial query methods, which rebuild [`sw_core::Star`] values from rows.
//!
//! The persisted universe is write-once, read-many: there is no update or
//! delete path.

/// Bulk generate-and-persist.
pub mod bulk;
/// Store configuration.
pub mod config;
/// Error types for the store.
pub mod error;
/// Table layout, key encodings, and row types.
pub mod schema;
/// Bounding-box and point queries.
pub mod spatial;
/// The store handle and its write path.
pub mod store;

/// Re-export of [`config::StoreConfig`].
pub use config::StoreConfig;
/// Re-exports of [`error::StoreError`] and [`error::StoreResult`].
pub use error::{StoreError, StoreResult};
/// Re-export of [`schema::UniverseMeta`].
pub use schema::{GenerationRun, UniverseMeta};
/// Re-exports of the spatial query types.
pub use spatial::{BoundingBox, STAR_AT_TOLERANCE};
/// Re-exports of [`store::Store`] and [`store::BatchSummary`].
pub use store::{BatchSummary, Store};
