//! Great-circle distance on a spherical Earth.

use parkmap_core::Coordinate;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates, in kilometres.
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::new(latitude, longitude).unwrap()
    }

    #[test]
    fn same_point_is_zero() {
        let p = at(51.0447, -114.0719);
        assert!(haversine_km(p, p).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = at(51.05, -114.05);
        let b = at(51.08, -114.13);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn berlin_to_paris_is_about_878_km() {
        let berlin = at(52.5200, 13.4050);
        let paris = at(48.8566, 2.3522);
        let d = haversine_km(berlin, paris);
        assert!((d - 878.0).abs() < 2.0, "got {d}");
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = haversine_km(at(51.0, -114.0), at(52.0, -114.0));
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = haversine_km(at(0.0, 0.0), at(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }
}
