//! Bounding-box and point queries against the store.
//!
//! Every multi-row query resolves in two phases inside one read transaction:
//! first the ids of matching `stars` rows, then for each id the star row and
//! its `planets` rows, joined into a [`Star`]. Returned stars are independent
//! copies with no link back to storage.

use std::ops::Bound;

use heed::RoTxn;
use sw_core::{Planet, Star, StarId};

use crate::error::{StoreError, StoreResult};
use crate::schema::{self, StarRow, ordered_f64, planet_key, star_key};
use crate::store::Store;

/// Half-width of the square searched by [`Store::star_at`].
pub const STAR_AT_TOLERANCE: f64 = 0.1;

/// An axis-aligned rectangle with exclusive bounds on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Exclusive lower x bound.
    pub min_x: f64,
    /// Exclusive upper x bound.
    pub max_x: f64,
    /// Exclusive lower y bound.
    pub min_y: f64,
    /// Exclusive upper y bound.
    pub max_y: f64,
}

impl BoundingBox {
    /// The open square of half-width `half_width` centred on `(x, y)`.
    pub fn around(x: f64, y: f64, half_width: f64) -> Self {
        Self {
            min_x: x - half_width,
            max_x: x + half_width,
            min_y: y - half_width,
            max_y: y + half_width,
        }
    }

    /// Returns true if `(x, y)` lies strictly inside the box.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x > self.min_x && x < self.max_x && y > self.min_y && y < self.max_y
    }

    /// Returns true if no point can lie inside the box.
    pub fn is_empty(&self) -> bool {
        !(self.min_x < self.max_x && self.min_y < self.max_y)
    }
}

impl Store {
    /// Every star with `x-d < sx < x+d` and `y-d < sy < y+d`, fully resolved.
    ///
    /// With the coordinate index built, results come in ascending x order;
    /// before that, in id order.
    pub fn stars_within(&self, x: f64, y: f64, d: f64) -> StoreResult<Vec<Star>> {
        self.stars_in(&BoundingBox::around(x, y, d))
    }

    /// Every star strictly inside `area`, fully resolved.
    pub fn stars_in(&self, area: &BoundingBox) -> StoreResult<Vec<Star>> {
        let rtxn = self.env.read_txn()?;
        let ids = self.ids_in(&rtxn, area)?;
        tracing::trace!(?area, matches = ids.len(), "bounding-box query");
        ids.into_iter()
            .map(|id| self.resolve_star(&rtxn, id))
            .collect()
    }

    /// The first star inside the [`STAR_AT_TOLERANCE`] square around `(x, y)`.
    ///
    /// This is not a nearest-neighbour search: a closer star just outside
    /// the square is not found.
    pub fn star_at(&self, x: f64, y: f64) -> StoreResult<Option<Star>> {
        let rtxn = self.env.read_txn()?;
        let area = BoundingBox::around(x, y, STAR_AT_TOLERANCE);
        match self.ids_in(&rtxn, &area)?.first() {
            Some(&id) => Ok(Some(self.resolve_star(&rtxn, id)?)),
            None => Ok(None),
        }
    }

    /// The star with this id and its ordered planets.
    pub fn get_star(&self, id: StarId) -> StoreResult<Star> {
        let rtxn = self.env.read_txn()?;
        self.resolve_star(&rtxn, id)
    }

    /// The planets of a star in ascending position order.
    ///
    /// Planet sizes are not persisted, so every returned planet has `size: None`.
    pub fn planets_for_star(&self, id: StarId) -> StoreResult<Vec<Planet>> {
        let rtxn = self.env.read_txn()?;
        self.fetch_planets(&rtxn, id)
    }

    fn ids_in(&self, txn: &RoTxn<'_>, area: &BoundingBox) -> StoreResult<Vec<StarId>> {
        if area.is_empty() {
            return Ok(Vec::new());
        }
        if self.indexed(txn)? {
            self.index_scan(txn, area)
        } else {
            self.table_scan(txn, area)
        }
    }

    /// Walk the x slice of the coordinate index, filtering on the decoded key.
    fn index_scan(&self, txn: &RoTxn<'_>, area: &BoundingBox) -> StoreResult<Vec<StarId>> {
        let start = ordered_f64(area.min_x);
        let end = ordered_f64(area.max_x);
        // An 8-byte bound sorts before every 24-byte key sharing its prefix.
        let range = (Bound::Included(&start[..]), Bound::Excluded(&end[..]));

        let mut ids = Vec::new();
        for item in self.coords.range(txn, &range)? {
            let (key, _) = item?;
            let (x, y, id) = schema::decode_coord_key(key)?;
            if area.contains(x, y) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    fn table_scan(&self, txn: &RoTxn<'_>, area: &BoundingBox) -> StoreResult<Vec<StarId>> {
        let mut ids = Vec::new();
        for item in self.stars.iter(txn)? {
            let (key, value) = item?;
            let row: StarRow = bincode::deserialize(value)?;
            if area.contains(row.x, row.y) {
                ids.push(schema::decode_star_key(key)?);
            }
        }
        Ok(ids)
    }

    fn resolve_star(&self, txn: &RoTxn<'_>, id: StarId) -> StoreResult<Star> {
        let key = star_key(id);
        let bytes = self
            .stars
            .get(txn, &key[..])?
            .ok_or(StoreError::StarNotFound(id))?;
        let row: StarRow = bincode::deserialize(bytes)?;
        let kind = row.star_kind()?;
        let planets = self.fetch_planets(txn, id)?;
        Ok(Star::from_persisted(id, row.x, row.y, kind, planets))
    }

    fn fetch_planets(&self, txn: &RoTxn<'_>, id: StarId) -> StoreResult<Vec<Planet>> {
        let start = planet_key(id, 0);
        let end = planet_key(id, u32::MAX);
        let range = (Bound::Included(&start[..]), Bound::Included(&end[..]));

        let mut planets = Vec::new();
        for item in self.planets.range(txn, &range)? {
            let (_, value) = item?;
            let row: schema::PlanetRow = bincode::deserialize(value)?;
            planets.push(row.to_planet()?);
        }
        Ok(planets)
    }
}
