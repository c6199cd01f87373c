// src/geos.rs

use thiserror::Error;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("centroid requires at least one coordinate")]
pub struct EmptyInputError;

/// Great-circle distance between two points in kilometers, via the
/// haversine formula on a spherical Earth.
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Arithmetic mean of a set of (lat, lon) pairs, in degrees.
///
/// This is a display-grade approximation, not a geodesic center.
pub fn compute_centroid(coords: &[(f64, f64)]) -> Result<(f64, f64), EmptyInputError> {
    if coords.is_empty() {
        return Err(EmptyInputError);
    }

    let mut total_lat = 0.0;
    let mut total_lon = 0.0;
    for (lat, lon) in coords {
        total_lat += lat;
        total_lon += lon;
    }

    let n = coords.len() as f64;
    Ok((total_lat / n, total_lon / n))
}
