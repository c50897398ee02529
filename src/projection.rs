//! Deterministic placement of entities on the logical map plane.
//!
//! An entity's position depends on nothing but its id: the id is hashed with
//! 64-bit FNV-1a, the hash picks a whole-degree angle and a radius, and the
//! point is laid out around the plane's origin at `(50, 50)`.

use crate::Entity;
use crate::constants::{ANGLE_BUCKETS, MIN_RADIUS, ORIGIN, RADIUS_BUCKETS};
use crate::error::ViewportError;
use std::collections::{HashMap, HashSet};

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// A point on the `[0, 100] x [0, 100]` logical plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// The fixed centre of the plane.
    pub const ORIGIN: Self = Self {
        x: ORIGIN,
        y: ORIGIN,
    };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `(50, 50)`.
    pub fn distance_from_origin(self) -> f64 {
        (self.x - ORIGIN).hypot(self.y - ORIGIN)
    }
}

/// Derived positions keyed by entity id.
pub type Coordinates = HashMap<String, Coordinate>;

/// 64-bit FNV-1a over the UTF-8 bytes of `id`.
pub fn id_hash(id: &str) -> u64 {
    id.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Places a single id on the plane.
pub fn project_id(id: &str) -> Coordinate {
    let hash = id_hash(id);
    let angle = ((hash % ANGLE_BUCKETS) as f64).to_radians();
    let distance = MIN_RADIUS + (hash % RADIUS_BUCKETS) as f64;
    let (sin, cos) = angle.sin_cos();

    Coordinate {
        x: ORIGIN + cos * distance,
        y: ORIGIN + sin * distance,
    }
}

/// Places every entity on the plane.
///
/// Ids are expected to be unique. A repeated id keeps a single entry (its
/// position is the same either way) and is reported with a warning.
pub fn derive_coordinates<E: Entity>(entities: &[E]) -> Coordinates {
    let mut coordinates = HashMap::with_capacity(entities.len());
    for entity in entities {
        let id = entity.id();
        if coordinates.insert(id.to_owned(), project_id(id)).is_some() {
            log::warn!("Duplicate entity id {id:?}; ids must be unique within a collection");
        }
    }
    coordinates
}

/// Fails on the first id that appears more than once.
pub fn check_unique_ids<E: Entity>(entities: &[E]) -> Result<(), ViewportError> {
    let mut seen = HashSet::with_capacity(entities.len());
    for entity in entities {
        if !seen.insert(entity.id()) {
            return Err(ViewportError::DuplicateId(entity.id().to_owned()));
        }
    }
    Ok(())
}

/// Memoizes [`derive_coordinates`] by the ordered list of ids it was last run on.
///
/// Pan and zoom never move the underlying coordinates, so a viewport can
/// recheck visibility on every command without re-hashing anything until the
/// entity list itself changes.
#[derive(Debug, Default)]
pub struct CoordinateCache {
    ids: Vec<String>,
    coordinates: Coordinates,
}

impl CoordinateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cached coordinates were derived from exactly these ids, in this order.
    pub fn is_current<E: Entity>(&self, entities: &[E]) -> bool {
        self.ids.len() == entities.len()
            && self
                .ids
                .iter()
                .zip(entities)
                .all(|(cached, entity)| cached == entity.id())
    }

    /// Returns coordinates for `entities`, re-deriving only if the id list changed.
    pub fn coordinates<E: Entity>(&mut self, entities: &[E]) -> &Coordinates {
        if !self.is_current(entities) {
            log::debug!(
                "Entity list changed, deriving coordinates for {} entities",
                entities.len()
            );
            self.ids = entities.iter().map(|e| e.id().to_owned()).collect();
            self.coordinates = derive_coordinates(entities);
        }
        &self.coordinates
    }

    /// Forgets the cached ids so the next lookup re-derives.
    pub fn invalidate(&mut self) {
        self.ids.clear();
        self.coordinates.clear();
    }
}
