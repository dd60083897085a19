//! Committed feature collection and the host-facing feature envelope.

use indexmap::IndexMap;
use log::warn;
use serde_json::{Value, json};
use thiserror::Error;
use uuid::Uuid;

use crate::geom::Geometry;

/// Opaque feature identifier assigned by the session at commit time.
pub type FeatureId = String;

/// Errors from the peripheral GeoJSON ingest.
///
/// Interactive gesture handling never surfaces errors; this is the only
/// typed failure in the crate, reported when external data cannot be parsed
/// at all. Individual malformed geometries inside a well-formed document are
/// skipped with a warning instead.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to parse GeoJSON document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("expected a FeatureCollection, found {0:?}")]
    NotAFeatureCollection(String),
}

/// In-memory mapping from identifier to committed geometry.
///
/// Insertion order is preserved so repeated source resyncs produce stable
/// render diffs. The store is purely in-memory and lost on session teardown.
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    records: IndexMap<FeatureId, Geometry>,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: FeatureId, geometry: Geometry) {
        self.records.insert(id, geometry);
    }

    pub fn get(&self, id: &str) -> Option<&Geometry> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Replaces the geometry of an existing feature. Returns `false` when the
    /// identifier is unknown, leaving the store untouched.
    pub fn replace(&mut self, id: &str, geometry: Geometry) -> bool {
        match self.records.get_mut(id) {
            Some(slot) => {
                *slot = geometry;
                true
            }
            None => false,
        }
    }

    /// Removes a feature, preserving the order of the remaining entries.
    pub fn remove(&mut self, id: &str) -> Option<Geometry> {
        self.records.shift_remove(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&FeatureId, &Geometry)> {
        self.records.iter()
    }

    /// Loads features from a GeoJSON FeatureCollection document.
    ///
    /// Features without an `id` get a fresh UUID. Entries whose geometry does
    /// not deserialize are skipped with a warning. Returns the number of
    /// features loaded.
    pub fn load_geojson(&mut self, data: &str) -> Result<usize, DataError> {
        let document: Value = serde_json::from_str(data)?;
        let kind = document
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if kind != "FeatureCollection" {
            return Err(DataError::NotAFeatureCollection(kind.to_string()));
        }

        let features = document
            .get("features")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut loaded = 0;
        for feature in features {
            let geometry = feature.get("geometry").cloned().unwrap_or(Value::Null);
            match serde_json::from_value::<Geometry>(geometry) {
                Ok(geometry) => {
                    let id = feature
                        .get("id")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| Uuid::new_v4().to_string());
                    self.insert(id, geometry);
                    loaded += 1;
                }
                Err(err) => {
                    warn!("skipping feature with malformed geometry: {err}");
                }
            }
        }

        Ok(loaded)
    }
}

/// A feature handed to the host render source.
///
/// Committed features carry their identifier (promoted to the feature `id`
/// for hit testing); preview features carry the `active` marker the default
/// layers can style on.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<FeatureId>,
    pub geometry: Geometry,
    pub active: bool,
}

impl Feature {
    pub fn committed(id: FeatureId, geometry: Geometry) -> Self {
        Self {
            id: Some(id),
            geometry,
            active: false,
        }
    }

    pub fn preview(geometry: Geometry) -> Self {
        Self {
            id: None,
            geometry,
            active: true,
        }
    }

    /// Serializes to a GeoJSON Feature object.
    pub fn to_geojson(&self) -> Value {
        let mut properties = json!({ "active": self.active });
        if let Some(id) = &self.id {
            properties["id"] = json!(id);
        }
        let mut feature = json!({
            "type": "Feature",
            "properties": properties,
            "geometry": self.geometry,
        });
        if let Some(id) = &self.id {
            feature["id"] = json!(id);
        }
        feature
    }
}

/// Serializes a feature list to a GeoJSON FeatureCollection, the shape host
/// engines expect as source data.
pub fn feature_collection(features: &[Feature]) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": features.iter().map(Feature::to_geojson).collect::<Vec<_>>(),
    })
}
