//! Terrain profile along the planned route

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum clearance above the highest terrain (feet)
pub const TERRAIN_CLEARANCE_FT: f64 = 200.0;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Waypoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Feet MSL
    pub altitude: f64,
}

impl Waypoint {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Obstacle {
    pub location: Waypoint,
    /// Feet AGL
    pub height: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TerrainProfile {
    /// Feet MSL
    pub max_terrain_elevation: f64,
    pub obstacles: Vec<Obstacle>,
    /// Feet MSL
    pub minimum_safe_altitude: f64,
    pub terrain_clearance: bool,
}

impl TerrainProfile {
    /// Profile for a route over terrain no higher than `max_terrain_elevation`
    pub fn over(path: &[Waypoint], max_terrain_elevation: f64, obstacles: Vec<Obstacle>) -> Self {
        Self {
            max_terrain_elevation,
            obstacles,
            minimum_safe_altitude: max_terrain_elevation + TERRAIN_CLEARANCE_FT,
            terrain_clearance: check_terrain_clearance(path, max_terrain_elevation),
        }
    }
}

/// True when every waypoint clears the terrain by the required margin.
/// An empty route has nothing to verify and does not pass.
pub fn check_terrain_clearance(path: &[Waypoint], max_terrain: f64) -> bool {
    let lowest = path.iter().map(|wp| wp.altitude).reduce(f64::min);
    match lowest {
        Some(altitude) => altitude >= max_terrain + TERRAIN_CLEARANCE_FT,
        None => false,
    }
}

/// Terrain data provider interface
pub trait TerrainSource: Send + Sync {
    fn profile(&self, path: &[Waypoint]) -> TerrainProfile;
}

/// Flat terrain with a single tree line, for planning without elevation data
#[derive(Debug, Clone)]
pub struct SimulatedTerrain {
    /// Feet MSL
    pub max_elevation: f64,
    /// Waypoint index the tree line sits at
    pub obstacle_index: usize,
    /// Feet AGL
    pub obstacle_height: f64,
}

impl Default for SimulatedTerrain {
    fn default() -> Self {
        Self {
            max_elevation: 500.0,
            obstacle_index: 2,
            obstacle_height: 200.0,
        }
    }
}

impl SimulatedTerrain {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TerrainSource for SimulatedTerrain {
    fn profile(&self, path: &[Waypoint]) -> TerrainProfile {
        let obstacles: Vec<Obstacle> = path
            .get(self.obstacle_index)
            .map(|wp| Obstacle {
                location: *wp,
                height: self.obstacle_height,
                kind: "tree_line".to_string(),
            })
            .into_iter()
            .collect();

        debug!(
            "Terrain profile: {} waypoints, {} obstacles, max elevation {}ft",
            path.len(),
            obstacles.len(),
            self.max_elevation
        );

        TerrainProfile::over(path, self.max_elevation, obstacles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(altitudes: &[f64]) -> Vec<Waypoint> {
        altitudes
            .iter()
            .enumerate()
            .map(|(i, alt)| Waypoint::new(37.77 + i as f64 * 0.001, -122.41, *alt))
            .collect()
    }

    #[test]
    fn test_clearance_threshold_inclusive() {
        assert!(check_terrain_clearance(&route(&[700.0, 800.0]), 500.0));
        assert!(!check_terrain_clearance(&route(&[699.9, 800.0]), 500.0));
    }

    #[test]
    fn test_empty_route_fails_clearance() {
        assert!(!check_terrain_clearance(&[], 500.0));
    }

    #[test]
    fn test_simulated_profile() {
        let path = route(&[750.0, 760.0, 770.0, 780.0]);
        let profile = SimulatedTerrain::new().profile(&path);
        assert_eq!(profile.max_terrain_elevation, 500.0);
        assert_eq!(profile.minimum_safe_altitude, 700.0);
        assert!(profile.terrain_clearance);
        assert_eq!(profile.obstacles.len(), 1);
        assert_eq!(profile.obstacles[0].location, path[2]);
        assert_eq!(profile.obstacles[0].kind, "tree_line");
    }

    #[test]
    fn test_short_route_has_no_obstacle() {
        let profile = SimulatedTerrain::new().profile(&route(&[750.0, 760.0]));
        assert!(profile.obstacles.is_empty());
    }
}
