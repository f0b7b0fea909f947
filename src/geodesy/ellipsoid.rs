//! Reference ellipsoid and UTM projection constants

use serde::{Deserialize, Serialize};

/// UTM central scale factor
pub const UTM_SCALE_FACTOR: f64 = 0.9996;

/// False easting applied to every UTM zone (meters)
pub const FALSE_EASTING: f64 = 500_000.0;

/// False northing for the southern hemisphere (meters)
pub const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Reference ellipsoid defined by semi-major axis and flattening
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    /// Semi-major axis (meters)
    pub semi_major_axis: f64,

    /// Flattening
    pub flattening: f64,
}

impl Ellipsoid {
    /// WGS84 ellipsoid
    pub const WGS84: Ellipsoid = Ellipsoid {
        semi_major_axis: 6_378_137.0,
        flattening: 1.0 / 298.257223563,
    };

    /// First eccentricity squared: e² = 2f - f²
    pub fn eccentricity_squared(&self) -> f64 {
        let f = self.flattening;
        2.0 * f - f * f
    }

    /// Second eccentricity squared: e'² = e² / (1 - e²)
    pub fn second_eccentricity_squared(&self) -> f64 {
        let e2 = self.eccentricity_squared();
        e2 / (1.0 - e2)
    }

    /// e1 = (1 - sqrt(1 - e²)) / (1 + sqrt(1 - e²)), used by the footpoint latitude series
    pub fn footpoint_e1(&self) -> f64 {
        let root = (1.0 - self.eccentricity_squared()).sqrt();
        (1.0 - root) / (1.0 + root)
    }

    /// Leading coefficient of the meridian arc series: 1 - e²/4 - 3e⁴/64 - 5e⁶/256
    pub fn meridian_arc_factor(&self) -> f64 {
        let e2 = self.eccentricity_squared();
        1.0 - e2 / 4.0 - (3.0 * e2 * e2) / 64.0 - (5.0 * e2.powi(3)) / 256.0
    }

    /// Meridian arc length from the equator to latitude `phi` (radians)
    pub fn meridian_arc(&self, phi: f64) -> f64 {
        let e2 = self.eccentricity_squared();
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        self.semi_major_axis
            * (self.meridian_arc_factor() * phi
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
    }

    /// Radius of curvature in the prime vertical at latitude `phi`
    pub fn prime_vertical_radius(&self, phi: f64) -> f64 {
        self.semi_major_axis / (1.0 - self.eccentricity_squared() * phi.sin().powi(2)).sqrt()
    }

    /// Radius of curvature in the meridian at latitude `phi`
    pub fn meridional_radius(&self, phi: f64) -> f64 {
        let e2 = self.eccentricity_squared();
        (self.semi_major_axis * (1.0 - e2)) / (1.0 - e2 * phi.sin().powi(2)).powf(1.5)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}
