//! Universe sessions.

use std::path::Path;

use sw_core::{Star, StarId};
use sw_store::{Store, StoreError, UniverseMeta};

use crate::error::ExploreResult;

/// An opened universe and the parameters it was generated with.
#[derive(Debug)]
pub struct Session {
    store: Store,
    meta: UniverseMeta,
}

impl Session {
    /// Open the universe stored at `path`.
    ///
    /// Fails with [`StoreError::NotGenerated`] if nothing was generated there.
    pub fn open(path: impl AsRef<Path>) -> ExploreResult<Self> {
        Self::new(Store::open(path)?)
    }

    /// Start a session over an already opened store.
    pub fn new(store: Store) -> ExploreResult<Self> {
        let meta = store.universe_meta()?.ok_or(StoreError::NotGenerated)?;
        tracing::debug!(
            path = %store.path().display(),
            stars = meta.star_count,
            universe_size = meta.universe_size,
            "session opened"
        );
        Ok(Self { store, meta })
    }

    /// The underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The persisted universe parameters.
    pub fn meta(&self) -> &UniverseMeta {
        &self.meta
    }

    /// World extent per axis.
    pub fn universe_size(&self) -> f64 {
        self.meta.universe_size
    }

    /// Number of stars generated into the universe.
    pub fn star_count(&self) -> u64 {
        self.meta.star_count
    }

    /// Stars strictly inside the square of half-width `radius` around `(x, y)`.
    pub fn stars_within(&self, x: f64, y: f64, radius: f64) -> ExploreResult<Vec<Star>> {
        Ok(self.store.stars_within(x, y, radius)?)
    }

    /// The star at `(x, y)`, if one lies close enough.
    pub fn star_at(&self, x: f64, y: f64) -> ExploreResult<Option<Star>> {
        Ok(self.store.star_at(x, y)?)
    }

    /// The star with this id.
    pub fn get_star(&self, id: StarId) -> ExploreResult<Star> {
        Ok(self.store.get_star(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_generator::UniverseConfig;
    use tempfile::TempDir;

    fn generated(dir: &TempDir) {
        let store = Store::open(dir.path()).unwrap();
        let config = UniverseConfig::default()
            .with_seed(7)
            .with_star_count(5)
            .with_universe_size(100.0);
        store.generate_and_persist(&config).unwrap();
    }

    #[test]
    fn open_reads_universe_parameters() {
        let dir = TempDir::new().unwrap();
        generated(&dir);
        let session = Session::open(dir.path()).unwrap();
        assert_eq!(session.star_count(), 5);
        assert!((session.universe_size() - 100.0).abs() < f64::EPSILON);
        assert_eq!(session.meta().seed, 7);
    }

    #[test]
    fn open_empty_store_fails() {
        let dir = TempDir::new().unwrap();
        let err = Session::open(dir.path()).unwrap_err();
        assert!(err.is_not_generated());
    }

    #[test]
    fn lookups_delegate_to_store() {
        let dir = TempDir::new().unwrap();
        generated(&dir);
        let session = Session::open(dir.path()).unwrap();

        assert_eq!(session.stars_within(50.0, 50.0, 200.0).unwrap().len(), 5);
        let star = session.get_star(StarId(3)).unwrap();
        let found = session.star_at(star.x, star.y).unwrap().unwrap();
        assert!((found.x - star.x).abs() < 0.1);
        assert!(session.get_star(StarId(5)).is_err());
    }
}
