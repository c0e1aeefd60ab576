use std::ops::Bound;
use std::path::{Path, PathBuf};

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions, RoTxn, RwTxn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sw_core::{IdAllocator, Star, StarId};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::schema::{
    self, COORD_KEY_LEN, META_INDEXED, META_UNIVERSE, PlanetRow, StarRow, UniverseMeta, coord_key,
    planet_key, star_key,
};

const EMPTY: &[u8] = &[];

/// Number of stars read per step while rebuilding the coordinate index.
pub const INDEX_CHUNK: usize = 10_000;

/// What a batch write put into the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of star rows written.
    pub stars: u64,
    /// Number of planet rows written.
    pub planets: u64,
    /// Id of the first star written, if any.
    pub first_id: Option<StarId>,
    /// Id of the last star written, if any.
    pub last_id: Option<StarId>,
}

/// A universe persisted in an LMDB environment.
///
/// The store exclusively owns the persisted rows. Every operation runs in its
/// own transaction; a write transaction that is dropped before committing
/// (including on any error path) leaves the store unchanged.
pub struct Store {
    path: PathBuf,
    pub(crate) env: Env,
    pub(crate) stars: Database<Bytes, Bytes>,
    pub(crate) planets: Database<Bytes, Bytes>,
    pub(crate) coords: Database<Bytes, Bytes>,
    meta: Database<Bytes, Bytes>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("path", &self.path).finish()
    }
}

impl Store {
    /// Open or create a store at the given directory with default settings.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with(path, StoreConfig::default())
    }

    /// Open or create a store at the given directory.
    ///
    /// # Safety
    /// Uses unsafe to call heed's open method, which requires that the same
    /// environment is not opened twice with different options in one process.
    #[allow(unsafe_code)]
    pub fn open_with(path: impl AsRef<Path>, config: StoreConfig) -> StoreResult<Self> {
        let path = path.as_ref();
        std::fs::create_dir_all(path)?;

        // SAFETY: every Store opens its environment with the same options.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(config.map_size)
                .max_dbs(schema::TABLE_COUNT)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let stars = env.create_database(&mut wtxn, Some(schema::STARS))?;
        let planets = env.create_database(&mut wtxn, Some(schema::PLANETS))?;
        let coords = env.create_database(&mut wtxn, Some(schema::STAR_COORDS))?;
        let meta = env.create_database(&mut wtxn, Some(schema::META))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), "opened universe store");
        Ok(Self {
            path: path.to_path_buf(),
            env,
            stars,
            planets,
            coords,
            meta,
        })
    }

    /// The directory this store lives in.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of persisted stars.
    pub fn star_count(&self) -> StoreResult<u64> {
        let rtxn = self.env.read_txn()?;
        Ok(self.stars.len(&rtxn)?)
    }

    /// The persisted universe parameters, if a universe has been generated.
    pub fn universe_meta(&self) -> StoreResult<Option<UniverseMeta>> {
        let rtxn = self.env.read_txn()?;
        self.read_meta(&rtxn, META_UNIVERSE)
    }

    /// Returns true if the coordinate index reflects every persisted star.
    pub fn is_indexed(&self) -> StoreResult<bool> {
        let rtxn = self.env.read_txn()?;
        self.indexed(&rtxn)
    }

    /// An allocator whose first id follows the highest persisted id.
    pub fn id_allocator(&self) -> StoreResult<IdAllocator> {
        let rtxn = self.env.read_txn()?;
        self.allocator_in(&rtxn)
    }

    /// Write one star and its planets as a single committed unit.
    ///
    /// Fails with [`StoreError::DuplicateStar`] without writing anything if
    /// the id is already taken. Keeps the coordinate index current if it has
    /// been built.
    pub fn insert_star(&self, star: &Star) -> StoreResult<()> {
        let mut wtxn = self.env.write_txn()?;
        let indexed = self.indexed(&wtxn)?;
        self.write_star(&mut wtxn, star, indexed)?;
        wtxn.commit()?;
        tracing::trace!(id = %star.id, planets = star.planets.len(), "inserted star");
        Ok(())
    }

    /// Write a batch of stars in one transaction with a single commit.
    ///
    /// All or nothing: if any star fails (for example on a duplicate id) the
    /// whole batch is discarded. The coordinate index is marked stale; call
    /// [`build_indexes`](Self::build_indexes) afterwards.
    pub fn persist_stars<I>(&self, stars: I) -> StoreResult<BatchSummary>
    where
        I: IntoIterator<Item = Star>,
    {
        let mut wtxn = self.env.write_txn()?;
        let summary = self.write_stars(&mut wtxn, stars)?;
        wtxn.commit()?;
        tracing::info!(stars = summary.stars, planets = summary.planets, "committed star batch");
        Ok(summary)
    }

    /// Rebuild the coordinate index from the `stars` table.
    ///
    /// Idempotent. The `planets(star_id)` index is the key order of the
    /// `planets` table and needs no build step. Stars are read in chunks of
    /// [`INDEX_CHUNK`] so memory use does not grow with the universe. The
    /// rebuild commits once. Returns the number of entries in the rebuilt
    /// index.
    pub fn build_indexes(&self) -> StoreResult<u64> {
        let mut wtxn = self.env.write_txn()?;
        self.coords.clear(&mut wtxn)?;

        let mut entries = 0u64;
        let mut after = None;
        loop {
            let chunk = self.coord_chunk(&wtxn, after)?;
            let Some(&(last, _)) = chunk.last() else {
                break;
            };
            for (_, key) in &chunk {
                self.coords.put(&mut wtxn, &key[..], EMPTY)?;
            }
            entries += chunk.len() as u64;
            after = Some(last);
        }
        self.write_meta(&mut wtxn, META_INDEXED, &true)?;
        wtxn.commit()?;

        tracing::debug!(
            entries,
            "built indexes {} and {}(star_id)",
            schema::STAR_COORDS,
            schema::PLANETS
        );
        Ok(entries)
    }

    /// Coordinate keys of up to [`INDEX_CHUNK`] stars whose id follows `after`.
    fn coord_chunk(
        &self,
        txn: &RoTxn<'_>,
        after: Option<StarId>,
    ) -> StoreResult<Vec<(StarId, [u8; COORD_KEY_LEN])>> {
        let start = after.map(star_key);
        let lower = match &start {
            Some(key) => Bound::Excluded(&key[..]),
            None => Bound::Unbounded,
        };
        let range: (Bound<&[u8]>, Bound<&[u8]>) = (lower, Bound::Unbounded);

        let mut chunk = Vec::with_capacity(INDEX_CHUNK);
        for item in self.stars.range(txn, &range)?.take(INDEX_CHUNK) {
            let (key, value) = item?;
            let id = schema::decode_star_key(key)?;
            let row: StarRow = bincode::deserialize(value)?;
            chunk.push((id, coord_key(row.x, row.y, id)));
        }
        Ok(chunk)
    }

    pub(crate) fn write_stars<I>(&self, wtxn: &mut RwTxn<'_>, stars: I) -> StoreResult<BatchSummary>
    where
        I: IntoIterator<Item = Star>,
    {
        if self.indexed(wtxn)? {
            self.write_meta(wtxn, META_INDEXED, &false)?;
        }

        let mut summary = BatchSummary::default();
        for star in stars {
            if summary.stars % 100 == 0 {
                tracing::debug!(star = summary.stars, "writing star");
            }
            self.write_star(wtxn, &star, false)?;
            summary.stars += 1;
            summary.planets += star.planets.len() as u64;
            if summary.first_id.is_none() {
                summary.first_id = Some(star.id);
            }
            summary.last_id = Some(star.id);
        }
        Ok(summary)
    }

    fn write_star(&self, wtxn: &mut RwTxn<'_>, star: &Star, indexed: bool) -> StoreResult<()> {
        let key = star_key(star.id);
        if self.stars.get(wtxn, &key[..])?.is_some() {
            return Err(StoreError::DuplicateStar(star.id));
        }

        let row = StarRow {
            x: star.x,
            y: star.y,
            kind: star.kind.label().to_string(),
        };
        self.stars.put(wtxn, &key[..], &bincode::serialize(&row)?[..])?;

        for (position, planet) in (1u32..).zip(&star.planets) {
            let row = PlanetRow {
                kind: planet.kind.label().to_string(),
            };
            let key = planet_key(star.id, position);
            self.planets.put(wtxn, &key[..], &bincode::serialize(&row)?[..])?;
        }

        if indexed {
            let key = coord_key(star.x, star.y, star.id);
            self.coords.put(wtxn, &key[..], EMPTY)?;
        }
        Ok(())
    }

    pub(crate) fn allocator_in(&self, txn: &RoTxn<'_>) -> StoreResult<IdAllocator> {
        let last = match self.stars.last(txn)? {
            Some((key, _)) => Some(schema::decode_star_key(key)?),
            None => None,
        };
        Ok(IdAllocator::after(last))
    }

    pub(crate) fn indexed(&self, txn: &RoTxn<'_>) -> StoreResult<bool> {
        Ok(self.read_meta(txn, META_INDEXED)?.unwrap_or(false))
    }

    pub(crate) fn read_meta<T: DeserializeOwned>(
        &self,
        txn: &RoTxn<'_>,
        name: &str,
    ) -> StoreResult<Option<T>> {
        match self.meta.get(txn, name.as_bytes())? {
            Some(bytes) => Ok(Some(bincode::deserialize(bytes)?)),
            None => Ok(None),
        }
    }

    pub(crate) fn write_meta<T: Serialize>(
        &self,
        wtxn: &mut RwTxn<'_>,
        name: &str,
        value: &T,
    ) -> StoreResult<()> {
        self.meta.put(wtxn, name.as_bytes(), &bincode::serialize(value)?[..])?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use sw_core::{Planet, PlanetKind, StarKind};
    use tempfile::TempDir;

    pub(crate) fn temp_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store =
            Store::open_with(dir.path(), StoreConfig::default().with_map_size(64 << 20)).unwrap();
        (dir, store)
    }

    pub(crate) fn star(id: u64, x: f64, y: f64, planets: &[PlanetKind]) -> Star {
        Star::from_persisted(
            StarId(id),
            x,
            y,
            StarKind::RedDwarf,
            planets.iter().map(|&k| Planet::new(k, 5)).collect(),
        )
    }

    #[test]
    fn new_store_is_empty() {
        let (_dir, store) = temp_store();
        assert_eq!(store.star_count().unwrap(), 0);
        assert!(store.universe_meta().unwrap().is_none());
        assert!(!store.is_indexed().unwrap());
        assert_eq!(store.id_allocator().unwrap().peek(), StarId(0));
    }

    #[test]
    fn insert_counts_rows() {
        let (_dir, store) = temp_store();
        store
            .insert_star(&star(0, 1.0, 1.0, &[PlanetKind::Ice, PlanetKind::Desert]))
            .unwrap();
        store.insert_star(&star(1, 2.0, 2.0, &[])).unwrap();
        assert_eq!(store.star_count().unwrap(), 2);

        let rtxn = store.env.read_txn().unwrap();
        assert_eq!(store.planets.len(&rtxn).unwrap(), 2);
    }

    #[test]
    fn duplicate_id_is_an_integrity_violation() {
        let (_dir, store) = temp_store();
        store
            .insert_star(&star(3, 10.0, 10.0, &[PlanetKind::Terran, PlanetKind::Ice]))
            .unwrap();

        let err = store
            .insert_star(&star(3, 50.0, 50.0, &[PlanetKind::Inferno; 4]))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateStar(StarId(3))));

        // Exactly the first set of planet rows survives.
        let rtxn = store.env.read_txn().unwrap();
        assert_eq!(store.planets.len(&rtxn).unwrap(), 2);
        assert_eq!(store.stars.len(&rtxn).unwrap(), 1);
    }

    #[test]
    fn batch_is_all_or_nothing() {
        let (_dir, store) = temp_store();
        store.insert_star(&star(2, 5.0, 5.0, &[])).unwrap();

        let batch = vec![
            star(0, 1.0, 1.0, &[PlanetKind::Ice]),
            star(1, 2.0, 2.0, &[PlanetKind::Ice]),
            star(2, 3.0, 3.0, &[PlanetKind::Ice]),
        ];
        let err = store.persist_stars(batch).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateStar(StarId(2))));
        assert_eq!(store.star_count().unwrap(), 1);

        let rtxn = store.env.read_txn().unwrap();
        assert_eq!(store.planets.len(&rtxn).unwrap(), 0);
    }

    #[test]
    fn batch_summary_reports_written_rows() {
        let (_dir, store) = temp_store();
        let summary = store
            .persist_stars(vec![
                star(0, 1.0, 1.0, &[PlanetKind::Ice, PlanetKind::Terran]),
                star(1, 2.0, 2.0, &[PlanetKind::Desert]),
            ])
            .unwrap();
        assert_eq!(
            summary,
            BatchSummary {
                stars: 2,
                planets: 3,
                first_id: Some(StarId(0)),
                last_id: Some(StarId(1)),
            }
        );
    }

    #[test]
    fn allocator_continues_after_highest_id() {
        let (_dir, store) = temp_store();
        store
            .persist_stars(vec![star(0, 1.0, 1.0, &[]), star(7, 2.0, 2.0, &[])])
            .unwrap();
        assert_eq!(store.id_allocator().unwrap().peek(), StarId(8));
    }

    #[test]
    fn index_build_is_idempotent() {
        let (_dir, store) = temp_store();
        store
            .persist_stars(vec![star(0, 1.0, 1.0, &[]), star(1, 2.0, 2.0, &[])])
            .unwrap();
        assert!(!store.is_indexed().unwrap());
        assert_eq!(store.build_indexes().unwrap(), 2);
        assert_eq!(store.build_indexes().unwrap(), 2);
        assert!(store.is_indexed().unwrap());

        let rtxn = store.env.read_txn().unwrap();
        assert_eq!(store.coords.len(&rtxn).unwrap(), 2);
    }

    #[test]
    fn insert_maintains_built_index() {
        let (_dir, store) = temp_store();
        store.insert_star(&star(0, 1.0, 1.0, &[])).unwrap();
        store.build_indexes().unwrap();
        store.insert_star(&star(1, 2.0, 2.0, &[])).unwrap();

        assert!(store.is_indexed().unwrap());
        let rtxn = store.env.read_txn().unwrap();
        assert_eq!(store.coords.len(&rtxn).unwrap(), 2);
    }

    #[test]
    fn batch_marks_index_stale() {
        let (_dir, store) = temp_store();
        store.insert_star(&star(0, 1.0, 1.0, &[])).unwrap();
        store.build_indexes().unwrap();
        store.persist_stars(vec![star(1, 2.0, 2.0, &[])]).unwrap();
        assert!(!store.is_indexed().unwrap());
    }

    #[test]
    fn rows_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::default().with_map_size(64 << 20);
        {
            let store = Store::open_with(dir.path(), config.clone()).unwrap();
            store.insert_star(&star(0, 1.0, 1.0, &[PlanetKind::Ice])).unwrap();
        }
        let store = Store::open_with(dir.path(), config).unwrap();
        assert_eq!(store.star_count().unwrap(), 1);
        assert_eq!(store.id_allocator().unwrap().peek(), StarId(1));
    }

    #[test]
    fn open_on_a_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("universe.db");
        std::fs::write(&file, b"not a directory").unwrap();

        let err = Store::open(&file).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(err.to_string().starts_with("storage unavailable"));
    }

    #[test]
    fn full_map_aborts_batch() {
        let dir = TempDir::new().unwrap();
        let store =
            Store::open_with(dir.path(), StoreConfig::default().with_map_size(1 << 20)).unwrap();
        let config = sw_generator::UniverseConfig::default()
            .with_seed(3)
            .with_star_count(50_000);
        let stars = sw_generator::generate_universe(&config, &mut IdAllocator::new()).unwrap();

        let err = store.persist_stars(stars).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert_eq!(store.star_count().unwrap(), 0);
    }

    #[test]
    fn index_build_spans_chunks() {
        let (_dir, store) = temp_store();
        let total = INDEX_CHUNK as u64 + 50;
        let stars = (0..total).map(|id| star(id, id as f64 * 0.5, 1.0, &[]));
        store.persist_stars(stars).unwrap();

        assert_eq!(store.build_indexes().unwrap(), total);
        let rtxn = store.env.read_txn().unwrap();
        assert_eq!(store.coords.len(&rtxn).unwrap(), total);
        drop(rtxn);

        // Stars past the first chunk sit at x = 5000.0, 5000.5, ... 5024.5.
        let tail = store.stars_within(5012.25, 1.0, 12.5).unwrap();
        assert_eq!(tail.len(), 50);
        assert_eq!(tail[0].id, StarId(INDEX_CHUNK as u64));
    }
}
