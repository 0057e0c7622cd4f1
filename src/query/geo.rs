//! Geographical types used by geo clauses and geo aggregations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::{DevToolsError, Result};
use crate::util::{Extra, merge_extra, put};

/// A geographical point with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in degrees (-180 to 180)
    pub lon: f64,
}

impl GeoPoint {
    /// Create a new geographical point.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DevToolsError::invalid_argument(format!(
                "Invalid latitude: {lat} (must be between -90 and 90)"
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(DevToolsError::invalid_argument(format!(
                "Invalid longitude: {lon} (must be between -180 and 180)"
            )));
        }

        Ok(GeoPoint { lat, lon })
    }

    /// Serialize as `{"lat": .., "lon": ..}`.
    pub fn to_value(&self) -> Value {
        json!({"lat": self.lat, "lon": self.lon})
    }
}

/// A geographical bounding box defined by its top-left and bottom-right corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoBoundingBox {
    /// Top-left corner
    pub top_left: GeoPoint,
    /// Bottom-right corner
    pub bottom_right: GeoPoint,
}

impl GeoBoundingBox {
    /// Create a new bounding box.
    pub fn new(top_left: GeoPoint, bottom_right: GeoPoint) -> Result<Self> {
        if top_left.lat < bottom_right.lat {
            return Err(DevToolsError::invalid_argument(
                "Top-left latitude must be greater than bottom-right latitude",
            ));
        }

        Ok(GeoBoundingBox {
            top_left,
            bottom_right,
        })
    }

    pub(crate) fn to_value(&self) -> Value {
        json!({
            "top_left": self.top_left.to_value(),
            "bottom_right": self.bottom_right.to_value(),
        })
    }
}

/// How distances are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceType {
    /// Great-circle distance.
    Arc,
    /// Faster, less accurate planar distance.
    Plane,
}

impl DistanceType {
    /// Wire name of the distance type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceType::Arc => "arc",
            DistanceType::Plane => "plane",
        }
    }
}

/// Options shared by geo_bounding_box, geo_distance and geo_polygon clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoOptions {
    /// Distance computation (geo_distance only).
    pub distance_type: Option<DistanceType>,
    /// `STRICT`, `IGNORE_MALFORMED` or `COERCE`.
    pub validation_method: Option<String>,
    /// Do not fail on unmapped fields.
    pub ignore_unmapped: Option<bool>,
    /// Engine-specific extras.
    pub extra: Extra,
}

impl GeoOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the distance computation.
    pub fn with_distance_type(mut self, distance_type: DistanceType) -> Self {
        self.distance_type = Some(distance_type);
        self
    }

    /// Set the validation method.
    pub fn with_validation_method<S: Into<String>>(mut self, method: S) -> Self {
        self.validation_method = Some(method.into());
        self
    }

    /// Ignore unmapped fields.
    pub fn with_ignore_unmapped(mut self, ignore: bool) -> Self {
        self.ignore_unmapped = Some(ignore);
        self
    }

    pub(crate) fn write_into(&self, map: &mut Map<String, Value>) {
        put(map, "distance_type", self.distance_type.map(|d| d.as_str()));
        put(map, "validation_method", self.validation_method.clone());
        put(map, "ignore_unmapped", self.ignore_unmapped);
        merge_extra(map, &self.extra);
    }
}

/// GeoJSON shape types understood by geo_shape clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoShapeType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    Envelope,
    Circle,
}

impl GeoShapeType {
    /// Wire name of the shape type.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoShapeType::Point => "point",
            GeoShapeType::LineString => "linestring",
            GeoShapeType::Polygon => "polygon",
            GeoShapeType::MultiPoint => "multipoint",
            GeoShapeType::MultiLineString => "multilinestring",
            GeoShapeType::MultiPolygon => "multipolygon",
            GeoShapeType::Envelope => "envelope",
            GeoShapeType::Circle => "circle",
        }
    }
}

/// Spatial relation between the indexed shape and the query shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpatialRelation {
    Intersects,
    Disjoint,
    Within,
    Contains,
}

impl SpatialRelation {
    /// Wire name of the relation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpatialRelation::Intersects => "intersects",
            SpatialRelation::Disjoint => "disjoint",
            SpatialRelation::Within => "within",
            SpatialRelation::Contains => "contains",
        }
    }
}

/// A GeoJSON-like shape for geo_shape clauses.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoShape {
    /// The shape type.
    pub shape_type: GeoShapeType,
    /// Coordinates in GeoJSON order (`[lon, lat]`).
    pub coordinates: Value,
    /// Spatial relation, defaults to the engine's `intersects`.
    pub relation: Option<SpatialRelation>,
    /// Engine-specific extras placed next to `shape`.
    pub extra: Extra,
}

impl GeoShape {
    /// Create a new shape.
    pub fn new<V: Into<Value>>(shape_type: GeoShapeType, coordinates: V) -> Self {
        GeoShape {
            shape_type,
            coordinates: coordinates.into(),
            relation: None,
            extra: Extra::new(),
        }
    }

    /// Set the spatial relation.
    pub fn with_relation(mut self, relation: SpatialRelation) -> Self {
        self.relation = Some(relation);
        self
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "shape".to_string(),
            json!({
                "type": self.shape_type.as_str(),
                "coordinates": self.coordinates.clone(),
            }),
        );
        put(&mut map, "relation", self.relation.map(|r| r.as_str()));
        merge_extra(&mut map, &self.extra);
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_validation() {
        assert!(GeoPoint::new(40.71, -74.0).is_ok());
        assert!(GeoPoint::new(91.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_bounding_box_validation() {
        let top_left = GeoPoint::new(40.73, -74.1).unwrap();
        let bottom_right = GeoPoint::new(40.01, -71.12).unwrap();

        assert!(GeoBoundingBox::new(top_left, bottom_right).is_ok());
        assert!(GeoBoundingBox::new(bottom_right, top_left).is_err());
    }

    #[test]
    fn test_geo_shape_serialization() {
        let shape = GeoShape::new(GeoShapeType::Envelope, json!([[13.0, 53.0], [14.0, 52.0]]))
            .with_relation(SpatialRelation::Within);

        assert_eq!(
            shape.to_value(),
            json!({
                "shape": {"type": "envelope", "coordinates": [[13.0, 53.0], [14.0, 52.0]]},
                "relation": "within"
            })
        );
    }
}
