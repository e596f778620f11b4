//! Operational boundary polygon
//!
//! Vertices are `[longitude, latitude]` pairs. Order is significant: the
//! containment test walks the edges in sequence, closing back to vertex 0.

use crate::{GeofenceError, Result};
use base64::{engine::general_purpose, Engine as _};
use geojson::{Feature, Geometry, JsonObject, Value};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Packaged boundary: base64 of `{"polygon": [[lon, lat], ...]}`
const EMBEDDED_BOUNDARY: &str = concat!(
    "eyJwb2x5Z29uIjpbWy0xMjQuNzMzMTc0LDI1Ljg5ODY5N10sWy0xMjQuNzMzMTc0LDQ5LjM4NDM1OF0s",
    "Wy05NS4xNTMzODksNDkuMzg0MzU4XSxbLTY2Ljk0OTg5NSw0Ny40NTk2ODZdLFstODAuMDMxMzYyLDI2",
    "LjEyNTI4OV0sWy05Ny4xNDYsMjUuOTU2XV19",
);

/// Literal boundary used when the packaged payload cannot be decoded
pub const FALLBACK_POLYGON: [[f64; 2]; 6] = [
    [-124.733174, 25.898697], // SW corner
    [-124.733174, 49.384358], // NW corner
    [-95.153389, 49.384358],  // Northern border
    [-66.949895, 47.459686],  // NE corner (Maine)
    [-80.031362, 26.125289],  // Florida
    [-97.146000, 25.956000],  // South Texas
];

/// Minimum number of vertices for a closed region
const MIN_VERTICES: usize = 3;

#[derive(Debug, Deserialize)]
struct RawBoundary {
    polygon: Vec<[f64; 2]>,
}

/// Operational boundary polygon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Boundary {
    polygon: Vec<[f64; 2]>,
}

impl Boundary {
    /// Decode the packaged boundary, falling back to the literal polygon
    pub fn embedded() -> Self {
        match Self::decode(EMBEDDED_BOUNDARY) {
            Ok(boundary) => {
                debug!("Loaded packaged boundary ({} vertices)", boundary.polygon.len());
                boundary
            }
            Err(e) => {
                warn!("Packaged boundary unusable ({}), using literal fallback", e);
                Self::fallback()
            }
        }
    }

    pub fn fallback() -> Self {
        Self {
            polygon: FALLBACK_POLYGON.to_vec(),
        }
    }

    /// Decode a base64-encoded boundary JSON document
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = general_purpose::STANDARD.decode(encoded.trim())?;
        let raw: RawBoundary = serde_json::from_slice(&bytes)?;
        Self::from_vertices(raw.polygon)
    }

    /// Parse a plain boundary JSON document (`{"polygon": [[lon, lat], ...]}`)
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawBoundary = serde_json::from_str(json)?;
        Self::from_vertices(raw.polygon)
    }

    pub fn from_vertices(polygon: Vec<[f64; 2]>) -> Result<Self> {
        if polygon.len() < MIN_VERTICES {
            return Err(GeofenceError::InvalidPolygon(format!(
                "need at least {} vertices, got {}",
                MIN_VERTICES,
                polygon.len()
            )));
        }

        for (i, [lon, lat]) in polygon.iter().enumerate() {
            if !(-180.0..=180.0).contains(lon) || !(-90.0..=90.0).contains(lat) {
                return Err(GeofenceError::InvalidPolygon(format!(
                    "vertex {} out of range: [{}, {}]",
                    i, lon, lat
                )));
            }
        }

        Ok(Self { polygon })
    }

    pub fn vertices(&self) -> &[[f64; 2]] {
        &self.polygon
    }

    /// Ray-casting containment test (x = longitude, y = latitude)
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        let (x, y) = (longitude, latitude);
        let n = self.polygon.len();
        let Some(&[mut p1x, mut p1y]) = self.polygon.first() else {
            return false;
        };

        let mut inside = false;
        for i in 1..=n {
            let [p2x, p2y] = self.polygon[i % n];
            if y > p1y.min(p2y) && y <= p1y.max(p2y) && x <= p1x.max(p2x) && p1y != p2y {
                let x_intersect = (y - p1y) * (p2x - p1x) / (p2y - p1y) + p1x;
                if p1x == p2x || x <= x_intersect {
                    inside = !inside;
                }
            }
            p1x = p2x;
            p1y = p2y;
        }

        inside
    }

    /// Export as a GeoJSON polygon feature (ring closed back to the first vertex)
    pub fn to_geojson(&self) -> Feature {
        let mut ring: Vec<Vec<f64>> = self
            .polygon
            .iter()
            .map(|[lon, lat]| vec![*lon, *lat])
            .collect();
        if let Some(first) = ring.first().cloned() {
            ring.push(first);
        }

        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), "operational-boundary".into());
        properties.insert("vertices".to_string(), self.polygon.len().into());

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self::embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_matches_fallback() {
        assert_eq!(Boundary::embedded(), Boundary::fallback());
        assert_eq!(Boundary::embedded().vertices().len(), 6);
    }

    #[test]
    fn test_decode_garbage_is_error() {
        assert!(matches!(
            Boundary::decode("!!not-base64!!"),
            Err(GeofenceError::Encoding(_))
        ));
        // Valid base64, invalid JSON ("hello")
        assert!(matches!(
            Boundary::decode("aGVsbG8="),
            Err(GeofenceError::Json(_))
        ));
    }

    #[test]
    fn test_continental_interior_inside() {
        let boundary = Boundary::fallback();
        assert!(boundary.contains(39.0, -98.0));
        assert!(boundary.contains(40.015, -74.006)); // New Jersey
        assert!(boundary.contains(37.7749, -122.4194)); // San Francisco
    }

    #[test]
    fn test_outside_points() {
        let boundary = Boundary::fallback();
        assert!(!boundary.contains(0.0, 0.0));
        assert!(!boundary.contains(51.5074, -0.1278)); // London
        assert!(!boundary.contains(60.0, -150.0)); // Alaska
        assert!(!boundary.contains(30.0, -125.0)); // Pacific, west of the SW corner
    }

    #[test]
    fn test_sw_corner_vertex_outside() {
        let boundary = Boundary::fallback();
        let [lon, lat] = FALLBACK_POLYGON[0];
        assert!(!boundary.contains(lat, lon));
    }

    #[test]
    fn test_from_vertices_rejects_degenerate() {
        assert!(Boundary::from_vertices(vec![[0.0, 0.0], [1.0, 1.0]]).is_err());
        assert!(Boundary::from_vertices(vec![[0.0, 0.0], [1.0, 1.0], [200.0, 0.0]]).is_err());
        assert!(Boundary::from_vertices(vec![[0.0, 0.0], [f64::NAN, 1.0], [1.0, 0.0]]).is_err());
    }

    #[test]
    fn test_from_json_square() {
        let boundary =
            Boundary::from_json(r#"{"polygon": [[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]]}"#)
                .unwrap();
        assert!(boundary.contains(5.0, 5.0));
        assert!(!boundary.contains(15.0, 5.0));
    }

    #[test]
    fn test_geojson_ring_closed() {
        let feature = Boundary::fallback().to_geojson();
        let Some(Geometry {
            value: Value::Polygon(rings),
            ..
        }) = feature.geometry
        else {
            panic!("expected polygon geometry");
        };
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 7);
        assert_eq!(rings[0].first(), rings[0].last());
    }
}
