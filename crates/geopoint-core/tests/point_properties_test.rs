//! Property tests for point validation and distance math

use geopoint_core::models::{haversine_m, Point, PointSet};
use proptest::prelude::*;

proptest! {
    #[test]
    fn valid_coordinates_always_construct(lon in -180.0f64..=180.0, lat in -90.0f64..=90.0) {
        let point = Point::new("p", lon, lat, None, None).unwrap();
        prop_assert_eq!(point.to_tuple(), (lon, lat));
    }

    #[test]
    fn longitude_outside_domain_is_rejected(
        lon in prop_oneof![-1.0e6f64..-180.000001, 180.000001f64..1.0e6],
        lat in -90.0f64..=90.0,
    ) {
        prop_assert!(Point::new("p", lon, lat, None, None).is_err());
    }

    #[test]
    fn latitude_outside_domain_is_rejected(
        lon in -180.0f64..=180.0,
        lat in prop_oneof![-1.0e6f64..-90.000001, 90.000001f64..1.0e6],
    ) {
        prop_assert!(Point::new("p", lon, lat, None, None).is_err());
    }

    #[test]
    fn haversine_is_symmetric(
        lon1 in -180.0f64..=180.0, lat1 in -90.0f64..=90.0,
        lon2 in -180.0f64..=180.0, lat2 in -90.0f64..=90.0,
    ) {
        let ab = haversine_m(lon1, lat1, lon2, lat2);
        let ba = haversine_m(lon2, lat2, lon1, lat1);
        prop_assert!((ab - ba).abs() < 1e-6);
        prop_assert!(ab >= 0.0);
        // never longer than half the circumference
        prop_assert!(ab <= std::f64::consts::PI * 6_371_000.0 + 1e-6);
    }

    #[test]
    fn distance_to_self_is_zero(lon in -180.0f64..=180.0, lat in -90.0f64..=90.0) {
        let point = Point::new("p", lon, lat, None, None).unwrap();
        prop_assert_eq!(point.distance_to(&point), 0.0);
    }

    #[test]
    fn bbox_contains_every_point(coords in prop::collection::vec((-180.0f64..=180.0, -90.0f64..=90.0), 1..50)) {
        let set: PointSet = coords
            .iter()
            .enumerate()
            .map(|(i, (lon, lat))| Point::new(i.to_string(), *lon, *lat, None, None).unwrap())
            .collect();
        let bbox = set.bbox().unwrap();

        for point in set.iter() {
            prop_assert!(bbox.min_lon <= point.lon() && point.lon() <= bbox.max_lon);
            prop_assert!(bbox.min_lat <= point.lat() && point.lat() <= bbox.max_lat);
        }
    }
}
