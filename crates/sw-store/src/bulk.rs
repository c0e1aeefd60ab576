use chrono::Utc;
use sw_generator::{UniverseConfig, UniverseGenerator};

use crate::error::{StoreError, StoreResult};
use crate::schema::{GenerationRun, META_UNIVERSE, UniverseMeta};
use crate::store::{BatchSummary, Store};

impl Store {
    /// Generate `config.star_count` stars and persist them with one commit.
    ///
    /// Ids continue after the highest id already in the store, so repeated
    /// runs append rather than collide. An appending run draws from its own
    /// random stream (see [`UniverseConfig::run_seed`]) and is recorded in
    /// [`UniverseMeta::runs`]. The universe parameters are recorded
    /// in the same transaction. Once the batch has committed the coordinate
    /// index is built, once, over the whole table.
    ///
    /// An interrupted run leaves none of its stars behind.
    pub fn generate_and_persist(&self, config: &UniverseConfig) -> StoreResult<BatchSummary> {
        config.validate()?;

        let mut wtxn = self.env.write_txn()?;
        let existing: Option<UniverseMeta> = self.read_meta(&wtxn, META_UNIVERSE)?;
        if let Some(meta) = &existing {
            if meta.universe_size.to_bits() != config.universe_size.to_bits() {
                return Err(StoreError::UniverseMismatch {
                    stored: meta.universe_size,
                    requested: config.universe_size,
                });
            }
        }

        let mut ids = self.allocator_in(&wtxn)?;
        let first_id = ids.peek();
        let generator = UniverseGenerator::new(config, &mut ids)?;
        tracing::info!(
            stars = generator.remaining(),
            universe_size = config.universe_size,
            seed = config.seed,
            first_id = %first_id,
            "generating universe"
        );
        let summary = self.write_stars(&mut wtxn, generator)?;

        let run = GenerationRun {
            seed: config.seed,
            first_id,
            stars: summary.stars,
        };
        let meta = match existing {
            Some(mut meta) => {
                meta.star_count += summary.stars;
                meta.runs.push(run);
                meta
            }
            None => UniverseMeta {
                universe_size: config.universe_size,
                star_count: summary.stars,
                seed: config.seed,
                created_at: Utc::now(),
                runs: vec![run],
            },
        };
        self.write_meta(&mut wtxn, META_UNIVERSE, &meta)?;
        wtxn.commit()?;

        tracing::info!(
            stars = summary.stars,
            planets = summary.planets,
            "committed generated universe"
        );

        self.build_indexes()?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use sw_core::StarId;

    use super::*;
    use crate::store::tests::temp_store;

    fn config() -> UniverseConfig {
        UniverseConfig::default()
            .with_seed(99)
            .with_star_count(25)
            .with_universe_size(100.0)
    }

    #[test]
    fn records_universe_meta() {
        let (_dir, store) = temp_store();
        let summary = store.generate_and_persist(&config()).unwrap();
        assert_eq!(summary.stars, 25);
        assert_eq!(summary.first_id, Some(StarId(0)));
        assert_eq!(summary.last_id, Some(StarId(24)));

        let meta = store.universe_meta().unwrap().unwrap();
        assert_eq!(meta.star_count, 25);
        assert_eq!(meta.seed, 99);
        assert!((meta.universe_size - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn builds_index_after_commit() {
        let (_dir, store) = temp_store();
        store.generate_and_persist(&config()).unwrap();
        assert!(store.is_indexed().unwrap());
        assert_eq!(store.star_count().unwrap(), 25);
    }

    #[test]
    fn second_run_appends_with_fresh_ids() {
        let (_dir, store) = temp_store();
        store.generate_and_persist(&config()).unwrap();
        let summary = store
            .generate_and_persist(&config().with_seed(5).with_star_count(10))
            .unwrap();
        assert_eq!(summary.first_id, Some(StarId(25)));
        assert_eq!(summary.last_id, Some(StarId(34)));
        assert_eq!(store.star_count().unwrap(), 35);

        let meta = store.universe_meta().unwrap().unwrap();
        assert_eq!(meta.star_count, 35);
        assert_eq!(meta.seed, 99);
        assert_eq!(meta.runs.len(), 2);
        assert_eq!(meta.runs[1].first_id, StarId(25));
        assert_eq!(meta.runs[1].seed, 5);
        assert_eq!(meta.runs[1].stars, 10);
    }

    #[test]
    fn repeated_config_appends_distinct_stars() {
        let config = config().with_star_count(5);
        let (_dir, store) = temp_store();
        store.generate_and_persist(&config).unwrap();
        store.generate_and_persist(&config).unwrap();

        for id in 0..5 {
            let first = store.get_star(StarId(id)).unwrap();
            let appended = store.get_star(StarId(id + 5)).unwrap();
            assert!(
                first.x.to_bits() != appended.x.to_bits()
                    || first.y.to_bits() != appended.y.to_bits(),
                "star {} repeats star {id}",
                appended.id
            );
        }

        let meta = store.universe_meta().unwrap().unwrap();
        let first_ids: Vec<StarId> = meta.runs.iter().map(|r| r.first_id).collect();
        assert_eq!(first_ids, vec![StarId(0), StarId(5)]);
        assert!(meta.runs.iter().all(|r| r.seed == 99));
    }

    #[test]
    fn mismatched_universe_size_is_rejected() {
        let (_dir, store) = temp_store();
        store.generate_and_persist(&config()).unwrap();
        let err = store
            .generate_and_persist(&config().with_universe_size(500.0))
            .unwrap_err();
        assert!(matches!(err, StoreError::UniverseMismatch { .. }));
        assert_eq!(store.star_count().unwrap(), 25);
    }

    #[test]
    fn invalid_config_writes_nothing() {
        let (_dir, store) = temp_store();
        let err = store
            .generate_and_persist(&config().with_universe_size(-1.0))
            .unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
        assert_eq!(store.star_count().unwrap(), 0);
        assert!(store.universe_meta().unwrap().is_none());
    }
}
