//! Geographic coordinates and great-circle distance.
//!
//! Provides the validated [`Coordinate`] value type and the haversine
//! [`distance_meters`] function used to decide whether a position sample
//! falls inside an alarm radius.

mod types;

pub use types::{CoordError, Coordinate, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Mean Earth radius in meters used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in meters.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_METERS`].
/// The result is symmetric and exactly `0.0` when both coordinates are equal.
///
/// No validation is performed here. Out-of-range degrees are folded by the
/// trigonometry, and a NaN component produces a NaN distance rather than a
/// panic. Callers comparing against a radius therefore never trigger on NaN,
/// since every comparison with NaN is false.
#[inline]
pub fn distance_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }

    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let d_lat = (b.latitude() - a.latitude()).to_radians();
    let d_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push h a hair above 1.0 for antipodal points
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let paris = coord(48.8566, 2.3522);
        assert_eq!(distance_meters(&paris, &paris), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // One degree along a meridian is R * pi / 180
        let expected = EARTH_RADIUS_METERS * std::f64::consts::PI / 180.0;
        let d = distance_meters(&coord(0.0, 0.0), &coord(1.0, 0.0));
        assert!((d - expected).abs() < 1e-6, "got {}, expected {}", d, expected);
    }

    #[test]
    fn test_boundary_samples_around_one_kilometre() {
        let target = coord(0.0, 0.0);

        let inside = distance_meters(&target, &coord(0.008983, 0.0));
        assert!(inside <= 1000.0, "0.008983 deg should be within 1000m, got {}", inside);

        let outside = distance_meters(&target, &coord(0.0090, 0.0));
        assert!(outside > 1000.0, "0.0090 deg should exceed 1000m, got {}", outside);
        assert!((outside - 1000.75).abs() < 1.0);
    }

    #[test]
    fn test_known_city_pair() {
        // London to Paris is roughly 343.5 km on the haversine sphere
        let london = coord(51.5074, -0.1278);
        let paris = coord(48.8566, 2.3522);
        let d = distance_meters(&london, &paris);
        assert!((d - 343_500.0).abs() < 1_000.0, "got {}", d);
    }

    #[test]
    fn test_across_antimeridian_is_short() {
        let west = coord(0.0, 179.9995);
        let east = coord(0.0, -179.9995);
        let d = distance_meters(&west, &east);
        assert!(d < 200.0, "antimeridian neighbours should be close, got {}", d);
    }

    #[test]
    fn test_antipodal_points_do_not_produce_nan() {
        let d = distance_meters(&coord(0.0, 0.0), &coord(0.0, 180.0));
        assert!(d.is_finite());
        let half_circumference = EARTH_RADIUS_METERS * std::f64::consts::PI;
        assert!((d - half_circumference).abs() < 1.0);
    }

    #[test]
    fn test_nan_propagates_without_panicking() {
        let a = Coordinate::new_unchecked(f64::NAN, 0.0);
        let b = coord(10.0, 10.0);
        assert!(distance_meters(&a, &b).is_nan());
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_distance_to_self_property(
                lat in -90.0..=90.0_f64,
                lon in -180.0..=180.0_f64,
            ) {
                let a = Coordinate::new(lat, lon)?;
                prop_assert_eq!(distance_meters(&a, &a), 0.0);
            }

            #[test]
            fn test_symmetry_property(
                lat1 in -90.0..=90.0_f64,
                lon1 in -180.0..=180.0_f64,
                lat2 in -90.0..=90.0_f64,
                lon2 in -180.0..=180.0_f64,
            ) {
                let a = Coordinate::new(lat1, lon1)?;
                let b = Coordinate::new(lat2, lon2)?;
                prop_assert_eq!(distance_meters(&a, &b), distance_meters(&b, &a));
            }

            #[test]
            fn test_distance_bounded_property(
                lat1 in -90.0..=90.0_f64,
                lon1 in -180.0..=180.0_f64,
                lat2 in -90.0..=90.0_f64,
                lon2 in -180.0..=180.0_f64,
            ) {
                let a = Coordinate::new(lat1, lon1)?;
                let b = Coordinate::new(lat2, lon2)?;
                let d = distance_meters(&a, &b);
                let max = EARTH_RADIUS_METERS * std::f64::consts::PI;
                prop_assert!(d >= 0.0, "negative distance {}", d);
                prop_assert!(d <= max + 1e-6, "distance {} exceeds half circumference", d);
            }

            #[test]
            fn test_monotonic_along_meridian_property(
                lat in -80.0..80.0_f64,
                lon in -180.0..=180.0_f64,
                step in 1e-5..0.01_f64,
            ) {
                let origin = Coordinate::new(lat, lon)?;
                let near = Coordinate::new(lat + step, lon)?;
                let far = Coordinate::new(lat + 2.0 * step, lon)?;
                prop_assert!(distance_meters(&origin, &near) < distance_meters(&origin, &far));
            }
        }
    }
}
