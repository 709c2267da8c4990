//! Great-circle distance between coordinates.

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two latitude/longitude pairs.
#[must_use]
pub fn calculate_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let haversine = (delta_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (delta_lon / 2.0).sin().powi(2);
    let central_angle = 2.0 * haversine.sqrt().atan2((1.0 - haversine).sqrt());

    EARTH_RADIUS_KM * central_angle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero_apart() {
        let distance = calculate_distance(44.837_789, -0.579_18, 44.837_789, -0.579_18);
        assert!(distance == 0.0, "expected exactly zero, got {distance}");
    }

    #[test]
    fn bordeaux_to_merignac_is_a_few_kilometres() {
        let distance = calculate_distance(44.837_789, -0.579_18, 44.8635, -0.6442);
        assert!((5.0..6.5).contains(&distance), "unexpected distance {distance}");
    }

    #[test]
    fn distance_is_symmetric() {
        let there = calculate_distance(44.8, -0.6, 48.85, 2.35);
        let back = calculate_distance(48.85, 2.35, 44.8, -0.6);
        assert!((there - back).abs() < 1e-9, "{there} != {back}");
    }

    #[test]
    fn quarter_meridian_matches_earth_radius() {
        let distance = calculate_distance(0.0, 0.0, 90.0, 0.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2;
        assert!((distance - expected).abs() < 1e-6, "{distance} != {expected}");
    }
}
