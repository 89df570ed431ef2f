//! Observer location: coordinates, elevation, and timezone identity.

use chrono::{LocalResult, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::{OffsetComponents, Tz};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// WGS-84 semi-major axis in meters.
const WGS84_MAJOR_M: f64 = 6_378_137.0;
/// WGS-84 semi-minor axis in meters.
const WGS84_MINOR_M: f64 = 6_356_752.3142;
/// WGS-84 flattening.
const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// A geographic location used for astronomical calculations.
///
/// Latitude and longitude are in degrees (north and east positive),
/// elevation in meters above sea level. The timezone identity carries both
/// the standard UTC offset and the DST rule, so a civil date at this
/// location resolves to a concrete UTC offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    name: Option<String>,
    latitude: f64,
    longitude: f64,
    elevation: f64,
    timezone: Tz,
}

impl GeoLocation {
    /// Create a location, validating coordinate and elevation ranges.
    pub fn new(
        name: Option<&str>,
        latitude: f64,
        longitude: f64,
        elevation: f64,
        timezone: Tz,
    ) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidLongitude(longitude));
        }
        if !elevation.is_finite() || elevation < 0.0 {
            return Err(Error::InvalidElevation(elevation));
        }
        Ok(Self {
            name: name.map(str::to_owned),
            latitude,
            longitude,
            elevation,
            timezone,
        })
    }

    /// Create a sea-level location.
    pub fn at_sea_level(
        name: Option<&str>,
        latitude: f64,
        longitude: f64,
        timezone: Tz,
    ) -> Result<Self> {
        Self::new(name, latitude, longitude, 0.0, timezone)
    }

    /// Optional human-readable location name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Latitude in degrees, north positive.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, east positive.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Elevation in meters above sea level.
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    /// The location's timezone.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// UTC offset in fractional hours for a given civil date, standard
    /// offset plus the DST delta when the date falls inside the zone's
    /// daylight-saving period.
    ///
    /// Resolved at local noon: no real zone transitions across midday, so
    /// the date-level DST question has an unambiguous answer there.
    pub fn utc_offset_hours(&self, date: NaiveDate) -> f64 {
        let offset = self.zone_offset(date);
        (offset.base_utc_offset() + offset.dst_offset()).num_milliseconds() as f64 / 3_600_000.0
    }

    /// Standard (non-DST) UTC offset in fractional hours for a given civil
    /// date: the zone's base offset with any daylight saving stripped.
    pub fn standard_utc_offset_hours(&self, date: NaiveDate) -> f64 {
        self.zone_offset(date).base_utc_offset().num_milliseconds() as f64 / 3_600_000.0
    }

    /// Whether the given civil date falls inside the zone's DST period.
    pub fn is_dst(&self, date: NaiveDate) -> bool {
        !self.zone_offset(date).dst_offset().is_zero()
    }

    /// The difference, in minutes, between this location's longitude-implied
    /// solar ("local mean") time and its political timezone's standard
    /// meridian. Positive when local mean time runs ahead of zone time.
    ///
    /// One degree of longitude is four minutes of time; DST is ignored since
    /// solar time knows nothing of it.
    pub fn local_mean_time_offset_minutes(&self, date: NaiveDate) -> f64 {
        let standard_minutes =
            self.zone_offset(date).base_utc_offset().num_milliseconds() as f64 / 60_000.0;
        self.longitude * 4.0 - standard_minutes
    }

    fn zone_offset(&self, date: NaiveDate) -> <Tz as TimeZone>::Offset {
        let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());
        match self.timezone.offset_from_local_datetime(&noon) {
            LocalResult::Single(offset) | LocalResult::Ambiguous(offset, _) => offset,
            // A gap at local noon cannot happen for real zones; interpreting
            // the naive time as UTC still yields the correct offset rule.
            LocalResult::None => self.timezone.offset_from_utc_datetime(&noon),
        }
    }

    /// Geodesic distance in meters to another location (Vincenty inverse
    /// formula, WGS-84). Returns NaN if the iteration fails to converge
    /// (nearly antipodal points).
    pub fn geodesic_distance(&self, other: &GeoLocation) -> f64 {
        self.vincenty_inverse(other).distance_m
    }

    /// Geodesic initial bearing in degrees to another location.
    pub fn geodesic_initial_bearing(&self, other: &GeoLocation) -> f64 {
        self.vincenty_inverse(other).initial_bearing_deg
    }

    /// Geodesic final bearing in degrees to another location.
    pub fn geodesic_final_bearing(&self, other: &GeoLocation) -> f64 {
        self.vincenty_inverse(other).final_bearing_deg
    }

    /// Rhumb-line (constant-compass-course) bearing in degrees to another
    /// location.
    pub fn rhumb_line_bearing(&self, other: &GeoLocation) -> f64 {
        let mut d_lon = (other.longitude - self.longitude).to_radians();
        let d_phi = ((other.latitude.to_radians() / 2.0 + std::f64::consts::FRAC_PI_4).tan()
            / (self.latitude.to_radians() / 2.0 + std::f64::consts::FRAC_PI_4).tan())
        .ln();
        if d_lon.abs() > std::f64::consts::PI {
            d_lon = if d_lon > 0.0 {
                -(2.0 * std::f64::consts::PI - d_lon)
            } else {
                2.0 * std::f64::consts::PI + d_lon
            };
        }
        d_lon.atan2(d_phi).to_degrees()
    }

    /// Rhumb-line distance in meters to another location.
    pub fn rhumb_line_distance(&self, other: &GeoLocation) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let mut d_lon = (other.longitude - self.longitude).to_radians().abs();
        let d_phi = ((other.latitude.to_radians() / 2.0 + std::f64::consts::FRAC_PI_4).tan()
            / (self.latitude.to_radians() / 2.0 + std::f64::consts::FRAC_PI_4).tan())
        .ln();
        // On an east-west course d_phi vanishes; fall back to the parallel's
        // circumference factor.
        let q = if d_lat.abs() > 1e-10 {
            d_lat / d_phi
        } else {
            self.latitude.to_radians().cos()
        };
        if d_lon > std::f64::consts::PI {
            d_lon = 2.0 * std::f64::consts::PI - d_lon;
        }
        (d_lat * d_lat + q * q * d_lon * d_lon).sqrt() * WGS84_MAJOR_M
    }

    fn vincenty_inverse(&self, other: &GeoLocation) -> Geodesic {
        let a = WGS84_MAJOR_M;
        let b = WGS84_MINOR_M;
        let f = WGS84_FLATTENING;

        let l = (other.longitude - self.longitude).to_radians();
        let u1 = ((1.0 - f) * self.latitude.to_radians().tan()).atan();
        let u2 = ((1.0 - f) * other.latitude.to_radians().tan()).atan();
        let (sin_u1, cos_u1) = u1.sin_cos();
        let (sin_u2, cos_u2) = u2.sin_cos();

        let mut lambda = l;
        let mut lambda_prev = 2.0 * std::f64::consts::PI;
        let mut iterations = 20;

        let mut sin_lambda = 0.0;
        let mut cos_lambda = 0.0;
        let mut sin_sigma = 0.0;
        let mut cos_sigma = 0.0;
        let mut sigma = 0.0;
        let mut cos_sq_alpha = 0.0;
        let mut cos_2sigma_m = 0.0;

        while (lambda - lambda_prev).abs() > 1e-12 {
            iterations -= 1;
            if iterations == 0 {
                return Geodesic {
                    distance_m: f64::NAN,
                    initial_bearing_deg: f64::NAN,
                    final_bearing_deg: f64::NAN,
                };
            }
            sin_lambda = lambda.sin();
            cos_lambda = lambda.cos();
            sin_sigma = ((cos_u2 * sin_lambda).powi(2)
                + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
            .sqrt();
            if sin_sigma == 0.0 {
                // coincident points
                return Geodesic {
                    distance_m: 0.0,
                    initial_bearing_deg: 0.0,
                    final_bearing_deg: 0.0,
                };
            }
            cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            sigma = sin_sigma.atan2(cos_sigma);
            let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
            cos_2sigma_m = cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha;
            if cos_2sigma_m.is_nan() {
                // equatorial line
                cos_2sigma_m = 0.0;
            }
            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
            lambda_prev = lambda;
            lambda = l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m
                                + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));
        }

        let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
        let big_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
        let delta_sigma = big_b
            * sin_sigma
            * (cos_2sigma_m
                + big_b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                        - big_b / 6.0
                            * cos_2sigma_m
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));

        Geodesic {
            distance_m: b * big_a * (sigma - delta_sigma),
            initial_bearing_deg: (cos_u2 * sin_lambda)
                .atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda)
                .to_degrees(),
            final_bearing_deg: (cos_u1 * sin_lambda)
                .atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda)
                .to_degrees(),
        }
    }
}

struct Geodesic {
    distance_m: f64,
    initial_bearing_deg: f64,
    final_bearing_deg: f64,
}
