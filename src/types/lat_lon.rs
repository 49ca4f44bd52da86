use serde::Serialize;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use clima::LatLon;
///
/// let amecameca = LatLon(19.1238, -98.7664);
/// assert_eq!(amecameca.0, 19.1238); // Latitude
/// assert_eq!(amecameca.1, -98.7664); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon(pub f64, pub f64);
