//! Fundamental input and position types.

use serde::{Deserialize, Serialize};

use crate::constants::METERS_PER_KM;

/// Geographic coordinates of a point on the route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
}

/// Partner position: distance along the route plus coordinates when known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Route distance in meters.
    pub distance_m: f64,
    /// Coordinates, absent when no route geometry is available.
    pub geo: Option<GeoPoint>,
}

impl Position {
    pub fn new(distance_m: f64, geo: Option<GeoPoint>) -> Self {
        Self { distance_m, geo }
    }
}

/// One telemetry sample pushed by the session driver (about 1 Hz).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    /// Athlete's instantaneous power (W).
    pub power_w: f64,
    /// Athlete's route distance (km). Route distance follows skips.
    pub route_distance_km: f64,
    /// Signed distance partner minus athlete (m). Positive = partner ahead.
    #[serde(default)]
    pub separation_m: f64,
    /// Session time (ms).
    pub elapsed_ms: u64,
}

impl Telemetry {
    /// Athlete's route distance in meters.
    pub fn distance_m(&self) -> f64 {
        self.route_distance_km * METERS_PER_KM
    }

    /// Partner's route distance in meters.
    pub fn partner_distance_m(&self) -> f64 {
        self.distance_m() + self.separation_m
    }
}
