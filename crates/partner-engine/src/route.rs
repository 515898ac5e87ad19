//! Route geometry: maps a route distance onto coordinates.

use serde::{Deserialize, Serialize};

use partner_core::error::SourceError;
use partner_core::types::GeoPoint;

/// Supplied by the host's workout/route provider.
pub trait RouteGeometry {
    /// Coordinates at `distance_m` along the route, if the route has any.
    fn locate(&self, distance_m: f64) -> Option<GeoPoint>;
}

/// A route point at a known cumulative distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub distance_m: f64,
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
}

impl RoutePoint {
    fn geo(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lon: self.lon,
            alt: self.alt,
        }
    }
}

/// Piecewise-linear route, clamped at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineRoute {
    points: Vec<RoutePoint>,
}

impl PolylineRoute {
    pub fn new(points: Vec<RoutePoint>) -> Result<Self, SourceError> {
        if points.is_empty() {
            return Err(SourceError::Empty);
        }
        if points.windows(2).any(|w| w[1].distance_m < w[0].distance_m) {
            return Err(SourceError::Unsorted);
        }
        Ok(Self { points })
    }

    pub fn length_m(&self) -> f64 {
        self.points
            .last()
            .map(|p| p.distance_m)
            .unwrap_or_default()
    }
}

impl RouteGeometry for PolylineRoute {
    fn locate(&self, distance_m: f64) -> Option<GeoPoint> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if distance_m <= first.distance_m {
            return Some(first.geo());
        }
        if distance_m >= last.distance_m {
            return Some(last.geo());
        }

        let upper = self.points.partition_point(|p| p.distance_m <= distance_m);
        let a = &self.points[upper - 1];
        let b = &self.points[upper];
        let span = b.distance_m - a.distance_m;
        if span <= 0.0 {
            return Some(a.geo());
        }
        let t = (distance_m - a.distance_m) / span;
        Some(GeoPoint {
            lat: a.lat + (b.lat - a.lat) * t,
            lon: a.lon + (b.lon - a.lon) * t,
            alt: a.alt + (b.alt - a.alt) * t,
        })
    }
}
