//! Opening file-based sources.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use partner_core::error::SourceError;

use crate::route::{PolylineRoute, RoutePoint};
use crate::sources::{ErgCurve, ErgPoint, PowerCurve, RecordedRide, RideSample};

/// Opens the sources named in the engine configuration.
///
/// The host normally provides its own implementation backed by its
/// workout and ride-file readers.
pub trait SourceLoader {
    fn load_erg(&self, path: &Path) -> Result<Box<dyn PowerCurve>, SourceError>;
    fn load_ride(&self, path: &Path) -> Result<RecordedRide, SourceError>;
}

/// Reads sources from JSON documents.
///
/// ERG profiles are arrays of `{ms, watts}`; rides are arrays of
/// `{secs, km, lat, lon, alt, watts?}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSourceLoader;

impl SourceLoader for JsonSourceLoader {
    fn load_erg(&self, path: &Path) -> Result<Box<dyn PowerCurve>, SourceError> {
        let points: Vec<ErgPoint> = read_json(path)?;
        Ok(Box::new(ErgCurve::new(points)?))
    }

    fn load_ride(&self, path: &Path) -> Result<RecordedRide, SourceError> {
        let samples: Vec<RideSample> = read_json(path)?;
        RecordedRide::new(samples)
    }
}

/// Load a polyline route from a JSON array of `{distance_m, lat, lon, alt}`.
pub fn load_route(path: &Path) -> Result<PolylineRoute, SourceError> {
    let points: Vec<RoutePoint> = read_json(path)?;
    PolylineRoute::new(points)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
