use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ids::IdAllocator;
use crate::sampling::sample_planet_count;

/// Largest size a generated planet can have. Sizes are drawn from `1..=MAX_PLANET_SIZE`.
pub const MAX_PLANET_SIZE: u8 = 10;

/// Unique identifier of a star. Doubles as its storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarId(pub u64);

impl fmt::Display for StarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The stellar class of a star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarKind {
    /// A failed star too light to fuse hydrogen.
    BrownDwarf,
    /// A small, cool main-sequence star.
    RedDwarf,
    /// A K-type main-sequence star.
    OrangeDwarf,
    /// A sun-like main-sequence star.
    YellowDwarf,
    /// A massive, hot giant.
    BlueGiant,
    /// A bright white giant.
    WhiteGiant,
    /// An exceptionally luminous white supergiant.
    WhiteSupergiant,
    /// The dense remnant of a sun-like star.
    WhiteDwarf,
    /// A neutron star.
    Neutron,
    /// A black hole.
    BlackHole,
    /// A glowing cloud of gas and dust.
    Nebula,
}

impl StarKind {
    /// Every stellar class, each drawn with equal probability.
    pub const ALL: [Self; 11] = [
        Self::BrownDwarf,
        Self::RedDwarf,
        Self::OrangeDwarf,
        Self::YellowDwarf,
        Self::BlueGiant,
        Self::WhiteGiant,
        Self::WhiteSupergiant,
        Self::WhiteDwarf,
        Self::Neutron,
        Self::BlackHole,
        Self::Nebula,
    ];

    /// Human-readable label. This is also the persisted text form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BrownDwarf => "Brown dwarf",
            Self::RedDwarf => "Red dwarf",
            Self::OrangeDwarf => "Orange dwarf",
            Self::YellowDwarf => "Yellow dwarf",
            Self::BlueGiant => "Blue giant",
            Self::WhiteGiant => "White giant",
            Self::WhiteSupergiant => "White supergiant",
            Self::WhiteDwarf => "White dwarf",
            Self::Neutron => "Neutron",
            Self::BlackHole => "Black hole",
            Self::Nebula => "Nebula",
        }
    }

    /// Draw a stellar class uniformly.
    pub fn random(rng: &mut StdRng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for StarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StarKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| CoreError::UnknownStarKind(s.to_string()))
    }
}

/// The class of a planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanetKind {
    /// A frozen world.
    Ice,
    /// An arid world.
    Desert,
    /// An earth-like world.
    Terran,
    /// A scorching world.
    Inferno,
    /// A gas giant.
    GasGiant,
}

impl PlanetKind {
    /// Every planet class.
    pub const ALL: [Self; 5] = [
        Self::Ice,
        Self::Desert,
        Self::Terran,
        Self::Inferno,
        Self::GasGiant,
    ];

    /// The table planet classes are drawn from. Desert appears twice, so it
    /// is selected twice as often as any other class.
    pub const SELECTION_TABLE: [Self; 6] = [
        Self::Ice,
        Self::Desert,
        Self::Terran,
        Self::Desert,
        Self::Inferno,
        Self::GasGiant,
    ];

    /// Human-readable label. This is also the persisted text form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ice => "Ice",
            Self::Desert => "Desert",
            Self::Terran => "Terran",
            Self::Inferno => "Inferno",
            Self::GasGiant => "Gas giant",
        }
    }

    /// Draw a planet class uniformly from [`SELECTION_TABLE`](Self::SELECTION_TABLE).
    pub fn random(rng: &mut StdRng) -> Self {
        Self::SELECTION_TABLE[rng.random_range(0..Self::SELECTION_TABLE.len())]
    }
}

impl fmt::Display for PlanetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlanetKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| CoreError::UnknownPlanetKind(s.to_string()))
    }
}

/// A planet orbiting a star. Has no identity of its own: it is addressed by
/// its parent star and its 1-based position in that star's planet list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    /// The planet class.
    pub kind: PlanetKind,
    /// Size in `1..=MAX_PLANET_SIZE`, or `None` when the planet was rebuilt
    /// from storage. Size is not part of the persisted schema.
    pub size: Option<u8>,
}

impl Planet {
    /// Create a planet with an explicit class and size, used verbatim.
    pub fn new(kind: PlanetKind, size: u8) -> Self {
        Self {
            kind,
            size: Some(size),
        }
    }

    /// Draw a fresh planet: class from the weighted table, size uniform in `1..=10`.
    pub fn new_random(rng: &mut StdRng) -> Self {
        let kind = PlanetKind::random(rng);
        let size = rng.random_range(1..=MAX_PLANET_SIZE);
        Self::new(kind, size)
    }

    /// Rebuild a planet from its persisted class. The size is unknown.
    pub fn from_persisted(kind: PlanetKind) -> Self {
        Self { kind, size: None }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.size {
            Some(size) => write!(f, "Planet: Size {size} {} world", self.kind),
            None => write!(f, "Planet: {} world (size unknown)", self.kind),
        }
    }
}

/// A star system: a position in the plane, a class, and an ordered list of planets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    /// Unique id, assigned in creation order.
    pub id: StarId,
    /// Horizontal coordinate in `[0, universe_size)`.
    pub x: f64,
    /// Vertical coordinate in `[0, universe_size)`.
    pub y: f64,
    /// The stellar class.
    pub kind: StarKind,
    /// Planets in orbital order; element `i` is at position `i + 1`.
    pub planets: Vec<Planet>,
}

impl Star {
    /// Draw a fresh star at `(x, y)`: a uniform stellar class, the next id
    /// from `ids`, and a Gaussian-sized planet list.
    pub fn new_random(rng: &mut StdRng, ids: &mut IdAllocator, x: f64, y: f64) -> Self {
        let kind = StarKind::random(rng);
        let id = ids.allocate();
        let planets = Self::random_planets(rng);
        Self {
            id,
            x,
            y,
            kind,
            planets,
        }
    }

    /// Rebuild a star from persisted values, used verbatim.
    pub fn from_persisted(
        id: StarId,
        x: f64,
        y: f64,
        kind: StarKind,
        planets: Vec<Planet>,
    ) -> Self {
        Self {
            id,
            x,
            y,
            kind,
            planets,
        }
    }

    /// Draw a planet list whose length is `max(0, floor(N(7, 5)))`.
    pub fn random_planets(rng: &mut StdRng) -> Vec<Planet> {
        let count = sample_planet_count(rng);
        (0..count).map(|_| Planet::new_random(rng)).collect()
    }

    /// Squared Euclidean distance to another star.
    pub fn distance_squared_to(&self, other: &Star) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another star.
    pub fn distance_to(&self, other: &Star) -> f64 {
        self.distance_squared_to(other).sqrt()
    }
}

impl fmt::Display for Star {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} star at <{:.1},{:.1}>", self.kind, self.x, self.y)
    }
}
