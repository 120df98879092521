use crate::airport::Airport;

/// Mean Earth radius in km (IUGG)
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Distance between two airports in km.
/// Implementations must be symmetric, non-negative and zero only for
/// identical coordinates.
pub trait DistanceService {
    fn distance(&self, a: &Airport, b: &Airport) -> f64;
}

/// Haversine great-circle distance on a spherical Earth
#[derive(Clone, Copy, Debug, Default)]
pub struct GreatCircle;

impl DistanceService for GreatCircle {
    fn distance(&self, a: &Airport, b: &Airport) -> f64 {
        let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (b.lon - a.lon).to_radians();

        let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
    }
}

impl<F> DistanceService for F
where
    F: Fn(&Airport, &Airport) -> f64,
{
    fn distance(&self, a: &Airport, b: &Airport) -> f64 {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airport(code: &str, lat: f64, lon: f64) -> Airport {
        Airport::new(code, code, lat, lon)
    }

    #[test]
    fn test_same_point_is_zero() {
        let hel = airport("EFHK", 60.3172, 24.9633);
        assert_eq!(GreatCircle.distance(&hel, &hel), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let hel = airport("EFHK", 60.3172, 24.9633);
        let cdg = airport("LFPG", 49.0097, 2.5479);
        let there = GreatCircle.distance(&hel, &cdg);
        let back = GreatCircle.distance(&cdg, &hel);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_known_distance() {
        // Helsinki-Vantaa to Paris CDG is roughly 1900 km
        let hel = airport("EFHK", 60.3172, 24.9633);
        let cdg = airport("LFPG", 49.0097, 2.5479);
        let d = GreatCircle.distance(&hel, &cdg);
        assert!((1880.0..1930.0).contains(&d), "got {d}");
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = airport("A", 0.0, 0.0);
        let b = airport("B", 1.0, 0.0);
        let d = GreatCircle.distance(&a, &b);
        assert!((d - 111.19).abs() < 0.05, "got {d}");
    }

    #[test]
    fn test_closure_as_service() {
        let flat = |_: &Airport, _: &Airport| 42.0;
        let a = airport("A", 0.0, 0.0);
        assert_eq!(flat.distance(&a, &a), 42.0);
    }
}
