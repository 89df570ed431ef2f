//! US Naval Almanac sunrise/sunset algorithm.
//!
//! Low-precision closed-form solar ephemeris from the Naval Observatory's
//! "Almanac for Computers". Accuracy is a minute or two at mid latitudes,
//! which is the published behavior downstream consumers depend on — the
//! constants below are deliberately kept as-is rather than replaced with a
//! precise Julian-date ephemeris.

use chrono::{Datelike, NaiveDate};

use crate::calculator::{adjust_zenith, SolarEventCalculator};
use crate::geolocation::GeoLocation;

/// Degrees of longitude per hour of Earth rotation.
const DEG_PER_HOUR: f64 = 360.0 / 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Sunrise,
    Sunset,
}

/// Solar event calculator implementing the US Naval Almanac approximation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SunTimesCalculator;

impl SolarEventCalculator for SunTimesCalculator {
    fn name(&self) -> &'static str {
        "US Naval Almanac Algorithm"
    }

    fn utc_sunrise(
        &self,
        date: NaiveDate,
        location: &GeoLocation,
        zenith: f64,
        adjust_for_elevation: bool,
    ) -> f64 {
        let elevation = if adjust_for_elevation {
            location.elevation()
        } else {
            0.0
        };
        utc_event_hour(
            date,
            location.longitude(),
            location.latitude(),
            adjust_zenith(zenith, elevation),
            Event::Sunrise,
        )
    }

    fn utc_sunset(
        &self,
        date: NaiveDate,
        location: &GeoLocation,
        zenith: f64,
        adjust_for_elevation: bool,
    ) -> f64 {
        let elevation = if adjust_for_elevation {
            location.elevation()
        } else {
            0.0
        };
        utc_event_hour(
            date,
            location.longitude(),
            location.latitude(),
            adjust_zenith(zenith, elevation),
            Event::Sunset,
        )
    }
}

fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

fn tan_deg(deg: f64) -> f64 {
    deg.to_radians().tan()
}

fn acos_deg(x: f64) -> f64 {
    x.acos().to_degrees()
}

fn asin_deg(x: f64) -> f64 {
    x.asin().to_degrees()
}

/// Closed-form day of year, Jan 1st = 1.
///
/// Integer arithmetic is intentional: the truncating divisions encode the
/// leap-year correction.
fn day_of_year(year: i32, month: i32, day: i32) -> i32 {
    let n1 = 275 * month / 9;
    let n2 = (month + 9) / 12;
    let n3 = 1 + (year - 4 * (year / 4) + 2) / 3;
    n1 - (n2 * n3) + day - 30
}

/// Time difference between the location's longitude and the prime meridian,
/// in hours. West of the meridian is negative.
fn hours_from_meridian(longitude: f64) -> f64 {
    longitude / DEG_PER_HOUR
}

/// Approximate event time in days since Jan 1st midnight, assuming 6am for
/// sunrise and 6pm for sunset. Feeds the mean anomaly.
fn approx_time_days(day_of_year: i32, hours_from_meridian: f64, event: Event) -> f64 {
    match event {
        Event::Sunrise => f64::from(day_of_year) + (6.0 - hours_from_meridian) / 24.0,
        Event::Sunset => f64::from(day_of_year) + (18.0 - hours_from_meridian) / 24.0,
    }
}

/// Sun's mean anomaly in degrees at the approximate event time.
fn mean_anomaly(day_of_year: i32, longitude: f64, event: Event) -> f64 {
    0.9856 * approx_time_days(day_of_year, hours_from_meridian(longitude), event) - 3.289
}

/// Sun's true ecliptic longitude in degrees, normalized into [0, 360).
fn sun_true_longitude(mean_anomaly: f64) -> f64 {
    let mut l =
        mean_anomaly + 1.916 * sin_deg(mean_anomaly) + 0.020 * sin_deg(2.0 * mean_anomaly)
            + 282.634;
    if l >= 360.0 {
        l -= 360.0;
    }
    if l < 0.0 {
        l += 360.0;
    }
    l
}

/// Sun's right ascension in hours for a given true longitude in degrees.
///
/// The raw arctangent is pulled into the same 90° quadrant as the true
/// longitude: RA and ecliptic longitude always sit in the same quadrant,
/// and skipping this correction puts events off by up to several hours.
fn sun_right_ascension_hours(true_longitude: f64) -> f64 {
    let a = 0.91764 * tan_deg(true_longitude);
    let mut ra = a.atan().to_degrees();

    let l_quadrant = (true_longitude / 90.0).floor() * 90.0;
    let ra_quadrant = (ra / 90.0).floor() * 90.0;
    ra += l_quadrant - ra_quadrant;

    ra / DEG_PER_HOUR
}

/// Cosine of the sun's local hour angle at the requested zenith.
///
/// Values outside [-1, 1] mean the sun never reaches that zenith on this
/// date at this latitude; the subsequent `acos` yields NaN, which is the
/// no-event sentinel and propagates unimpeded.
fn cos_local_hour_angle(true_longitude: f64, latitude: f64, zenith: f64) -> f64 {
    let sin_dec = 0.39782 * sin_deg(true_longitude);
    let cos_dec = cos_deg(asin_deg(sin_dec));
    (cos_deg(zenith) - sin_dec * sin_deg(latitude)) / (cos_dec * cos_deg(latitude))
}

/// Local mean time of the event as fractional hours since midnight.
fn local_mean_time(local_hour: f64, right_ascension_hours: f64, approx_time_days: f64) -> f64 {
    local_hour + right_ascension_hours - 0.06571 * approx_time_days - 6.622
}

/// Fractional UTC hour of the event, or NaN when it does not occur.
fn utc_event_hour(date: NaiveDate, longitude: f64, latitude: f64, zenith: f64, event: Event) -> f64 {
    let year = date.year();
    let month = date.month() as i32;
    let day = date.day() as i32;

    let n = day_of_year(year, month, day);
    let anomaly = mean_anomaly(n, longitude, event);
    let true_long = sun_true_longitude(anomaly);
    let ra_hours = sun_right_ascension_hours(true_long);
    let cos_h = cos_local_hour_angle(true_long, latitude, zenith);

    // acos of an out-of-range cosine is NaN; sunrise uses the reflected
    // branch because the sun rises through the angle from the far side of
    // local noon.
    let local_hour = match event {
        Event::Sunrise => (360.0 - acos_deg(cos_h)) / DEG_PER_HOUR,
        Event::Sunset => acos_deg(cos_h) / DEG_PER_HOUR,
    };

    let mean = local_mean_time(
        local_hour,
        ra_hours,
        approx_time_days(n, hours_from_meridian(longitude), event),
    );
    let mut utc = mean - hours_from_meridian(longitude);
    while utc < 0.0 {
        utc += 24.0;
    }
    while utc >= 24.0 {
        utc -= 24.0;
    }
    utc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::GEOMETRIC_ZENITH;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_of_year_regular_year() {
        assert_eq!(day_of_year(2023, 1, 1), 1);
        assert_eq!(day_of_year(2023, 2, 8), 39);
        assert_eq!(day_of_year(2023, 3, 1), 60);
        assert_eq!(day_of_year(2023, 12, 31), 365);
    }

    #[test]
    fn day_of_year_leap_year() {
        assert_eq!(day_of_year(2024, 2, 29), 60);
        assert_eq!(day_of_year(2024, 3, 1), 61);
        assert_eq!(day_of_year(2024, 12, 31), 366);
    }

    #[test]
    fn true_longitude_normalized() {
        for m in [-400.0, -10.0, 0.0, 77.0, 359.0, 720.0] {
            let l = sun_true_longitude(m);
            assert!((0.0..360.0).contains(&l), "true longitude {l} for anomaly {m}");
        }
    }

    #[test]
    fn right_ascension_tracks_longitude_quadrant() {
        // RA in hours * 15 must sit in the same 90-degree quadrant as L.
        for l in [10.0, 100.0, 190.0, 280.0, 355.0] {
            let ra_deg = sun_right_ascension_hours(l) * DEG_PER_HOUR;
            assert_eq!(
                (l / 90.0).floor(),
                (ra_deg / 90.0).floor(),
                "L = {l}, RA = {ra_deg}"
            );
        }
    }

    #[test]
    fn greenwich_equinox_sunrise_near_six() {
        let calc = SunTimesCalculator;
        let loc = GeoLocation::at_sea_level(None, 51.4769, 0.0, chrono_tz::UTC).unwrap();
        let sunrise = calc.utc_sunrise(date(2023, 3, 20), &loc, GEOMETRIC_ZENITH, false);
        // Equinox sunrise at Greenwich is close to 06:00 UT.
        assert!((sunrise - 6.0).abs() < 0.3, "sunrise = {sunrise}");
    }

    #[test]
    fn sunrise_precedes_sunset_at_mid_latitude() {
        let calc = SunTimesCalculator;
        let loc = GeoLocation::at_sea_level(None, 40.0, -74.0, chrono_tz::UTC).unwrap();
        let sunrise = calc.utc_sunrise(date(2023, 6, 1), &loc, GEOMETRIC_ZENITH, false);
        let sunset = calc.utc_sunset(date(2023, 6, 1), &loc, GEOMETRIC_ZENITH, false);
        assert!(sunrise.is_finite());
        assert!(sunset.is_finite());
        // Local times ~5:30 and ~20:15 EDT map to ~9:30 and ~00:15 UTC;
        // both are valid fractional UTC hours.
        assert!((0.0..24.0).contains(&sunrise));
        assert!((0.0..24.0).contains(&sunset));
    }

    #[test]
    fn polar_midsummer_returns_nan() {
        let calc = SunTimesCalculator;
        let loc = GeoLocation::at_sea_level(None, 78.0, 15.0, chrono_tz::UTC).unwrap();
        let sunrise = calc.utc_sunrise(date(2023, 6, 21), &loc, GEOMETRIC_ZENITH, false);
        let sunset = calc.utc_sunset(date(2023, 6, 21), &loc, GEOMETRIC_ZENITH, false);
        assert!(sunrise.is_nan(), "sunrise = {sunrise}");
        assert!(sunset.is_nan(), "sunset = {sunset}");
    }

    #[test]
    fn deep_twilight_zenith_rarer_than_geometric() {
        // London midsummer: the sun rises, but never dips 18 deg below the
        // horizon, so astronomical dawn does not occur.
        let calc = SunTimesCalculator;
        let loc = GeoLocation::at_sea_level(None, 51.5, 0.0, chrono_tz::UTC).unwrap();
        let d = date(2023, 6, 21);
        assert!(calc.utc_sunrise(d, &loc, GEOMETRIC_ZENITH, false).is_finite());
        assert!(calc.utc_sunrise(d, &loc, 108.0, false).is_nan());
    }

    #[test]
    fn idempotent_for_identical_inputs() {
        let calc = SunTimesCalculator;
        let loc = GeoLocation::new(None, 40.0828, -74.2094, 20.0, chrono_tz::UTC).unwrap();
        let d = date(2023, 2, 8);
        let a = calc.utc_sunrise(d, &loc, GEOMETRIC_ZENITH, true);
        let b = calc.utc_sunrise(d, &loc, GEOMETRIC_ZENITH, true);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn elevation_adjustment_never_delays_sunrise() {
        let calc = SunTimesCalculator;
        let loc = GeoLocation::new(None, 40.0828, -74.2094, 300.0, chrono_tz::UTC).unwrap();
        let d = date(2023, 2, 8);
        let adjusted = calc.utc_sunrise(d, &loc, GEOMETRIC_ZENITH, true);
        let sea_level = calc.utc_sunrise(d, &loc, GEOMETRIC_ZENITH, false);
        assert!(adjusted <= sea_level, "adjusted = {adjusted}, sea level = {sea_level}");
    }
}
