//! On-disk layout: table names, key encodings, and row types.
//!
//! | table         | key                                   | value             |
//! |---------------|---------------------------------------|-------------------|
//! | `stars`       | star id (u64 BE)                      | [`StarRow`]       |
//! | `planets`     | star id (u64 BE) ‖ position (u32 BE)  | [`PlanetRow`]     |
//! | `star_coords` | x (ordered f64) ‖ y (ordered f64) ‖ id | empty            |
//! | `meta`        | UTF-8 name                            | bincode value     |
//!
//! The `stars` key is the uniqueness constraint. The `planets` key sorts
//! rows by star and then by position, so a prefix range over one star id
//! is the `planets(star_id)` index. `star_coords` is the `stars(x, y)` index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sw_core::{Planet, PlanetKind, StarId, StarKind};

use crate::error::{StoreError, StoreResult};

/// Table holding one row per star.
pub const STARS: &str = "stars";
/// Table holding one row per planet.
pub const PLANETS: &str = "planets";
/// Secondary index over star coordinates.
pub const STAR_COORDS: &str = "star_coords";
/// Table holding universe metadata.
pub const META: &str = "meta";

/// Meta key of the [`UniverseMeta`] record.
pub const META_UNIVERSE: &str = "universe";
/// Meta key of the flag telling whether `star_coords` is current.
pub const META_INDEXED: &str = "indexed";

/// Number of named databases in the environment.
pub const TABLE_COUNT: u32 = 4;

/// Length of a `stars` key.
pub const STAR_KEY_LEN: usize = 8;
/// Length of a `planets` key.
pub const PLANET_KEY_LEN: usize = 12;
/// Length of a `star_coords` key.
pub const COORD_KEY_LEN: usize = 24;

/// A persisted star. The id lives in the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarRow {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// Stellar class label.
    pub kind: String,
}

impl StarRow {
    /// Parse the stored class label.
    pub fn star_kind(&self) -> StoreResult<StarKind> {
        Ok(self.kind.parse()?)
    }
}

/// A persisted planet. Star id and position live in the key; size is not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRow {
    /// Planet class label.
    pub kind: String,
}

impl PlanetRow {
    /// Rebuild the planet this row describes.
    pub fn to_planet(&self) -> StoreResult<Planet> {
        let kind: PlanetKind = self.kind.parse()?;
        Ok(Planet::from_persisted(kind))
    }
}

/// Parameters of the universe held by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseMeta {
    /// World extent per axis.
    pub universe_size: f64,
    /// Total number of stars generated into the store.
    pub star_count: u64,
    /// Seed of the first generation run.
    pub seed: u64,
    /// When the first generation run committed.
    pub created_at: DateTime<Utc>,
    /// Every generation run, oldest first.
    pub runs: Vec<GenerationRun>,
}

/// One committed generation run.
///
/// `seed` and `first_id` together reproduce the run's random stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRun {
    /// Seed the run was configured with.
    pub seed: u64,
    /// Id of the first star the run wrote.
    pub first_id: StarId,
    /// Number of stars the run wrote.
    pub stars: u64,
}

/// Encode a star id as a `stars` key.
pub fn star_key(id: StarId) -> [u8; STAR_KEY_LEN] {
    id.0.to_be_bytes()
}

/// Decode a `stars` key.
pub fn decode_star_key(key: &[u8]) -> StoreResult<StarId> {
    let bytes: [u8; STAR_KEY_LEN] = key.try_into().map_err(|_| StoreError::MalformedKey {
        table: STARS,
        expected: STAR_KEY_LEN,
        found: key.len(),
    })?;
    Ok(StarId(u64::from_be_bytes(bytes)))
}

/// Encode a `planets` key for the planet at 1-based `position`.
pub fn planet_key(star: StarId, position: u32) -> [u8; PLANET_KEY_LEN] {
    let mut key = [0u8; PLANET_KEY_LEN];
    key[..8].copy_from_slice(&star.0.to_be_bytes());
    key[8..].copy_from_slice(&position.to_be_bytes());
    key
}

/// Map an `f64` to bytes whose lexicographic order matches numeric order.
pub fn ordered_f64(value: f64) -> [u8; 8] {
    let bits = value.to_bits();
    let bits = if bits >> 63 == 1 {
        !bits
    } else {
        bits | (1 << 63)
    };
    bits.to_be_bytes()
}

/// Inverse of [`ordered_f64`].
pub fn decode_ordered_f64(bytes: [u8; 8]) -> f64 {
    let bits = u64::from_be_bytes(bytes);
    let bits = if bits >> 63 == 1 {
        bits & !(1 << 63)
    } else {
        !bits
    };
    f64::from_bits(bits)
}

/// Encode a `star_coords` key.
pub fn coord_key(x: f64, y: f64, id: StarId) -> [u8; COORD_KEY_LEN] {
    let mut key = [0u8; COORD_KEY_LEN];
    key[..8].copy_from_slice(&ordered_f64(x));
    key[8..16].copy_from_slice(&ordered_f64(y));
    key[16..].copy_from_slice(&id.0.to_be_bytes());
    key
}

/// Decode a `star_coords` key into `(x, y, id)`.
pub fn decode_coord_key(key: &[u8]) -> StoreResult<(f64, f64, StarId)> {
    let bytes: [u8; COORD_KEY_LEN] = key.try_into().map_err(|_| StoreError::MalformedKey {
        table: STAR_COORDS,
        expected: COORD_KEY_LEN,
        found: key.len(),
    })?;
    let mut x = [0u8; 8];
    let mut y = [0u8; 8];
    let mut id = [0u8; 8];
    x.copy_from_slice(&bytes[..8]);
    y.copy_from_slice(&bytes[8..16]);
    id.copy_from_slice(&bytes[16..]);
    Ok((
        decode_ordered_f64(x),
        decode_ordered_f64(y),
        StarId(u64::from_be_bytes(id)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_f64_preserves_order() {
        let values = [-1.0e9, -3.5, -0.25, 0.0, 1.0e-12, 0.1, 1.0, 99.9, 1.0e9];
        for pair in values.windows(2) {
            assert!(ordered_f64(pair[0]) < ordered_f64(pair[1]), "{pair:?}");
        }
    }

    #[test]
    fn ordered_f64_decodes() {
        for v in [-7.25, 0.0, 0.1, 512.0, f64::MAX] {
            assert_eq!(decode_ordered_f64(ordered_f64(v)).to_bits(), v.to_bits());
        }
    }

    #[test]
    fn planet_keys_sort_by_star_then_position() {
        assert!(planet_key(StarId(1), 9) < planet_key(StarId(1), 10));
        assert!(planet_key(StarId(1), 300) < planet_key(StarId(2), 1));
        assert!(planet_key(StarId(5), u32::MAX) < planet_key(StarId(6), 0));
    }

    #[test]
    fn coord_keys_sort_by_x_first() {
        assert!(coord_key(1.0, 900.0, StarId(9)) < coord_key(2.0, 0.0, StarId(0)));
        let (x, y, id) = decode_coord_key(&coord_key(12.5, 7.75, StarId(42))).unwrap();
        assert!((x - 12.5).abs() < f64::EPSILON);
        assert!((y - 7.75).abs() < f64::EPSILON);
        assert_eq!(id, StarId(42));
    }

    #[test]
    fn short_keys_are_rejected() {
        assert!(matches!(
            decode_star_key(&[0, 1, 2]),
            Err(StoreError::MalformedKey { table: STARS, .. })
        ));
        assert!(decode_coord_key(&[0; 8]).is_err());
    }

    #[test]
    fn rows_rebuild_entities() {
        let row = StarRow {
            x: 1.0,
            y: 2.0,
            kind: "White dwarf".to_string(),
        };
        assert_eq!(row.star_kind().unwrap(), StarKind::WhiteDwarf);

        let planet = PlanetRow {
            kind: "Gas giant".to_string(),
        }
        .to_planet()
        .unwrap();
        assert_eq!(planet.kind, PlanetKind::GasGiant);
        assert!(planet.size.is_none());

        let bad = PlanetRow {
            kind: "Lava".to_string(),
        };
        assert!(matches!(bad.to_planet(), Err(StoreError::InvalidRow(_))));
    }
}
