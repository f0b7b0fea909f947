//! UTM ⇄ geographic conversion (Redfearn/Krüger series)

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::ellipsoid::{Ellipsoid, FALSE_EASTING, FALSE_NORTHING_SOUTH, UTM_SCALE_FACTOR};
use crate::error::CalcError;

/// Supported southern-hemisphere UTM zones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UtmZone {
    /// Zone 18 South, central meridian 75°W
    #[default]
    Zone18S,
    /// Zone 19 South, central meridian 69°W
    Zone19S,
}

impl UtmZone {
    /// Longitude of the zone's central meridian (decimal degrees)
    pub fn central_meridian(&self) -> f64 {
        match self {
            UtmZone::Zone18S => -75.0,
            UtmZone::Zone19S => -69.0,
        }
    }

    /// Zone number
    pub fn number(&self) -> u8 {
        match self {
            UtmZone::Zone18S => 18,
            UtmZone::Zone19S => 19,
        }
    }
}

impl TryFrom<u8> for UtmZone {
    type Error = CalcError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            18 => Ok(UtmZone::Zone18S),
            19 => Ok(UtmZone::Zone19S),
            other => Err(CalcError::invalid(
                "zone",
                format!("unsupported UTM zone {}, expected 18 or 19", other),
            )),
        }
    }
}

impl fmt::Display for UtmZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}S", self.number())
    }
}

/// Planar UTM coordinate in a southern-hemisphere zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtmPoint {
    /// Easting (meters)
    pub easting: f64,
    /// Northing (meters, southern false origin)
    pub northing: f64,
    pub zone: UtmZone,
}

impl UtmPoint {
    pub fn new(easting: f64, northing: f64, zone: UtmZone) -> Self {
        Self { easting, northing, zone }
    }
}

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Convert a UTM coordinate to WGS84 latitude/longitude
///
/// The series is evaluated unconditionally: coordinates far outside the zone
/// produce a finite but meaningless result, and NaN input propagates to NaN
/// output. Callers validate parsed values before converting.
pub fn convert(point: &UtmPoint) -> GeoPoint {
    let ellipsoid = Ellipsoid::WGS84;
    let a = ellipsoid.semi_major_axis;
    let k0 = UTM_SCALE_FACTOR;
    let e2 = ellipsoid.eccentricity_squared();
    let ep2 = ellipsoid.second_eccentricity_squared();

    let x = point.easting - FALSE_EASTING;
    let y = point.northing - FALSE_NORTHING_SOUTH;

    // Footpoint latitude from the rectifying latitude
    let m = y / k0;
    let mu = m / (a * ellipsoid.meridian_arc_factor());

    let e1 = ellipsoid.footpoint_e1();
    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin();

    let c1 = ep2 * phi1.cos().powi(2);
    let t1 = phi1.tan().powi(2);
    let n1 = ellipsoid.prime_vertical_radius(phi1);
    let r1 = ellipsoid.meridional_radius(phi1);
    let d = x / (n1 * k0);

    let latitude = phi1
        - (n1 * phi1.tan() / r1)
            * (d.powi(2) / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1.powi(2) - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1.powi(2) - 252.0 * ep2 - 3.0 * c1.powi(2))
                    * d.powi(6)
                    / 720.0);

    let longitude_offset = (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
        + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1.powi(2) + 8.0 * ep2 + 24.0 * t1.powi(2)) * d.powi(5)
            / 120.0)
        / phi1.cos();

    let geo = GeoPoint {
        latitude: latitude.to_degrees(),
        longitude: point.zone.central_meridian() + longitude_offset.to_degrees(),
    };

    debug!(
        "UTM {} E={} N={} -> lat={:.6} lon={:.6}",
        point.zone, point.easting, point.northing, geo.latitude, geo.longitude
    );

    geo
}

/// Project a geographic coordinate into the given southern UTM zone
///
/// Forward counterpart of [`convert`]; round-tripping a point inside the zone
/// recovers the original easting/northing to well under a centimeter.
pub fn to_utm(point: &GeoPoint, zone: UtmZone) -> UtmPoint {
    let ellipsoid = Ellipsoid::WGS84;
    let k0 = UTM_SCALE_FACTOR;
    let ep2 = ellipsoid.second_eccentricity_squared();

    let phi = point.latitude.to_radians();
    let lambda = (point.longitude - zone.central_meridian()).to_radians();

    let n = ellipsoid.prime_vertical_radius(phi);
    let t = phi.tan().powi(2);
    let c = ep2 * phi.cos().powi(2);
    let a = phi.cos() * lambda;
    let m = ellipsoid.meridian_arc(phi);

    let x = k0
        * n
        * (a + (1.0 - t + c) * a.powi(3) / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a.powi(5) / 120.0);

    let y = k0
        * (m + n
            * phi.tan()
            * (a * a / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a.powi(4) / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a.powi(6) / 720.0));

    UtmPoint {
        easting: x + FALSE_EASTING,
        northing: y + FALSE_NORTHING_SOUTH,
        zone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_santiago_zone_19() {
        let geo = convert(&UtmPoint::new(346_000.0, 6_300_000.0, UtmZone::Zone19S));
        assert_abs_diff_eq!(geo.latitude, -33.428331, epsilon = 1e-6);
        assert_abs_diff_eq!(geo.longitude, -70.656502, epsilon = 1e-6);
    }

    #[test]
    fn test_zone_18_point() {
        let geo = convert(&UtmPoint::new(650_000.0, 5_500_000.0, UtmZone::Zone18S));
        assert_abs_diff_eq!(geo.latitude, -40.637231, epsilon = 1e-6);
        assert_abs_diff_eq!(geo.longitude, -73.226175, epsilon = 1e-6);
    }

    #[test]
    fn test_central_meridian_has_zone_longitude() {
        for zone in [UtmZone::Zone18S, UtmZone::Zone19S] {
            let geo = convert(&UtmPoint::new(FALSE_EASTING, 6_300_000.0, zone));
            assert_eq!(geo.longitude, zone.central_meridian());
            assert_abs_diff_eq!(geo.latitude, -33.439395, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_false_origin_maps_to_equator() {
        let geo = convert(&UtmPoint::new(FALSE_EASTING, FALSE_NORTHING_SOUTH, UtmZone::Zone18S));
        assert_abs_diff_eq!(geo.latitude, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(geo.longitude, -75.0, epsilon = 1e-12);
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let point = UtmPoint::new(280_000.0, 7_400_000.0, UtmZone::Zone19S);
        let first = convert(&point);
        let second = convert(&point);
        assert_eq!(first.latitude.to_bits(), second.latitude.to_bits());
        assert_eq!(first.longitude.to_bits(), second.longitude.to_bits());
    }

    #[test]
    fn test_round_trip_within_a_centimeter() {
        let samples = [
            (346_000.0, 6_300_000.0, UtmZone::Zone19S),
            (280_000.0, 7_400_000.0, UtmZone::Zone19S),
            (650_000.0, 5_500_000.0, UtmZone::Zone18S),
            (410_500.0, 4_100_000.0, UtmZone::Zone18S),
        ];

        for (easting, northing, zone) in samples {
            let geo = convert(&UtmPoint::new(easting, northing, zone));
            let back = to_utm(&geo, zone);
            assert_eq!(back.zone, zone);
            assert_abs_diff_eq!(back.easting, easting, epsilon = 0.01);
            assert_abs_diff_eq!(back.northing, northing, epsilon = 0.01);
        }
    }

    #[test]
    fn test_nan_propagates() {
        let geo = convert(&UtmPoint::new(f64::NAN, 6_300_000.0, UtmZone::Zone19S));
        assert!(geo.longitude.is_nan());
    }

    #[test]
    fn test_zone_from_number() {
        assert_eq!(UtmZone::try_from(18).unwrap(), UtmZone::Zone18S);
        assert_eq!(UtmZone::try_from(19).unwrap(), UtmZone::Zone19S);
        assert!(matches!(
            UtmZone::try_from(20),
            Err(CalcError::InvalidInput { field: "zone", .. })
        ));
        assert_eq!(UtmZone::Zone19S.to_string(), "19S");
        assert_eq!(UtmZone::default(), UtmZone::Zone18S);
    }
}
