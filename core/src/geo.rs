//! Great-circle geometry for vehicle positions.
//!
//! # Coordinate System
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Distance: meters, on a sphere of radius `EARTH_RADIUS_M`

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Calculate the great-circle distance between two positions.
///
/// Uses the haversine formula. The result is symmetric in its arguments and
/// zero for identical positions.
///
/// # Example
///
/// ```
/// use vehicle_core::geo::{haversine_distance, Coordinates};
///
/// let moscow = Coordinates { latitude: 55.7558, longitude: 37.6173 };
/// let spb = Coordinates { latitude: 59.9343, longitude: 30.3351 };
/// let meters = haversine_distance(moscow, spb);
/// assert!((meters - 634_000.0).abs() < 5_000.0);
/// ```
pub fn haversine_distance(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Pick the candidate closest to `target`.
///
/// Returns the index into `candidates` and the distance in meters. Ties go to
/// the earliest candidate. Returns `None` for an empty iterator.
pub fn nearest<I>(target: Coordinates, candidates: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = Coordinates>,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in candidates.into_iter().enumerate() {
        let distance = haversine_distance(target, candidate);
        match best {
            Some((_, min)) if distance >= min => {}
            _ => best = Some((index, distance)),
        }
    }
    best
}
