//! Pluggable solar event calculation.
//!
//! The engine talks to its calculator through [`SolarEventCalculator`], so
//! alternate algorithms (for example a NOAA-based one) can be swapped in
//! without touching any of the calendar arithmetic.

use chrono::NaiveDate;

use crate::geolocation::GeoLocation;

/// 90° below the vertical: the geometric horizon.
pub const GEOMETRIC_ZENITH: f64 = 90.0;

/// Sun's zenith at civil twilight (96°).
pub const CIVIL_ZENITH: f64 = 96.0;

/// Sun's zenith at nautical twilight (102°).
pub const NAUTICAL_ZENITH: f64 = 102.0;

/// Sun's zenith at astronomical twilight (108°).
pub const ASTRONOMICAL_ZENITH: f64 = 108.0;

/// Earth radius used for the elevation dip, in km.
const EARTH_RADIUS_KM: f64 = 6356.9;

/// Apparent solar semidiameter in minutes of arc.
const SOLAR_RADIUS_ARCMIN: f64 = 16.0;

/// Atmospheric refraction at the horizon in minutes of arc.
const REFRACTION_ARCMIN: f64 = 34.0;

/// A sunrise/sunset calculation algorithm.
///
/// Inputs are a civil date, an observer location, and a zenith angle in
/// degrees (any positive real; larger values put the sun deeper below the
/// horizon and make the event rarer at high latitudes). The result is the
/// fractional UTC hour of the event in [0, 24), or NaN when the sun never
/// crosses that zenith on that date — an expected condition near the poles,
/// not an error.
pub trait SolarEventCalculator {
    /// Descriptive name of the algorithm.
    fn name(&self) -> &'static str;

    /// Fractional UTC hour of sunrise at the given zenith, or NaN.
    ///
    /// When `adjust_for_elevation` is set, the location's elevation deepens
    /// the effective zenith (the visible horizon dips when viewed from
    /// altitude); otherwise the calculation is the sea-level variant.
    fn utc_sunrise(
        &self,
        date: NaiveDate,
        location: &GeoLocation,
        zenith: f64,
        adjust_for_elevation: bool,
    ) -> f64;

    /// Fractional UTC hour of sunset at the given zenith, or NaN.
    fn utc_sunset(
        &self,
        date: NaiveDate,
        location: &GeoLocation,
        zenith: f64,
        adjust_for_elevation: bool,
    ) -> f64;
}

/// Horizon dip in degrees seen from `elevation_m` meters above sea level:
/// `acos(r / (r + elevation))` with r the Earth radius.
pub(crate) fn elevation_adjustment_degrees(elevation_m: f64) -> f64 {
    (EARTH_RADIUS_KM / (EARTH_RADIUS_KM + elevation_m / 1000.0))
        .acos()
        .to_degrees()
}

/// Adjust a requested zenith for refraction, solar radius, and elevation.
///
/// The adjustment only applies to the exactly-geometric 90° zenith: true
/// rise/set needs the sun's upper limb at the refracted horizon, so 50′
/// (16′ solar radius + 34′ refraction) plus the elevation dip are added.
/// Twilight zeniths, already defined as dips below the horizon, are used
/// unmodified — which is also why degree-based dawn/dusk times are
/// insensitive to elevation.
pub(crate) fn adjust_zenith(zenith: f64, elevation_m: f64) -> f64 {
    if zenith == GEOMETRIC_ZENITH {
        zenith
            + (SOLAR_RADIUS_ARCMIN + REFRACTION_ARCMIN) / 60.0
            + elevation_adjustment_degrees(elevation_m)
    } else {
        zenith
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevation_adjustment_zero_at_sea_level() {
        assert_eq!(elevation_adjustment_degrees(0.0), 0.0);
    }

    #[test]
    fn elevation_adjustment_grows_with_altitude() {
        let low = elevation_adjustment_degrees(20.0);
        let high = elevation_adjustment_degrees(800.0);
        assert!(low > 0.0);
        assert!(high > low);
        // ~0.9 deg at 800 m
        assert!((high - 0.9).abs() < 0.1, "800 m dip = {high}");
    }

    #[test]
    fn geometric_zenith_gains_refraction_and_radius() {
        let adjusted = adjust_zenith(GEOMETRIC_ZENITH, 0.0);
        assert!((adjusted - (90.0 + 50.0 / 60.0)).abs() < 1e-12);
    }

    #[test]
    fn twilight_zeniths_pass_through_unmodified() {
        assert_eq!(adjust_zenith(CIVIL_ZENITH, 500.0), CIVIL_ZENITH);
        assert_eq!(adjust_zenith(16.1 + 90.0, 500.0), 106.1);
    }
}
