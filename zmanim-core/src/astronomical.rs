//! Astronomical calendar: absolute local sunrise/sunset times and the
//! arithmetic primitives the zmanim catalogue composes from.
//!
//! Holds a location and a working civil date, delegates the spherical
//! astronomy to a [`SolarEventCalculator`], and converts the calculator's
//! fractional UTC hours into `DateTime<Tz>` values in the location's zone.
//! "The sun never reaches that zenith today" is modeled as `None` and
//! absorbs through every downstream operation.

use chrono::{DateTime, Days, Duration, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use log::debug;

use crate::calculator::{
    SolarEventCalculator, ASTRONOMICAL_ZENITH, CIVIL_ZENITH, GEOMETRIC_ZENITH, NAUTICAL_ZENITH,
};
use crate::geolocation::GeoLocation;
use crate::sun_times::SunTimesCalculator;

/// Milliseconds in a minute.
pub const MINUTE_MILLIS: i64 = 60 * 1000;

/// Milliseconds in an hour.
pub const HOUR_MILLIS: i64 = MINUTE_MILLIS * 60;

/// Fixed increment for the solar-dip search, in degrees.
const SOLAR_DIP_INCREMENT: f64 = 0.0001;

/// A calendar of astronomical events for one location.
///
/// The location and date are mutable configuration set between queries; no
/// operation mutates them internally, so every query is a pure function of
/// the current configuration. Give each logical calculation its own
/// instance rather than sharing one across threads.
pub struct AstronomicalCalendar {
    location: GeoLocation,
    date: NaiveDate,
    calculator: Box<dyn SolarEventCalculator>,
}

impl std::fmt::Debug for AstronomicalCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AstronomicalCalendar")
            .field("location", &self.location)
            .field("date", &self.date)
            .field("calculator", &self.calculator.name())
            .finish()
    }
}

impl AstronomicalCalendar {
    /// Create a calendar for a location, dated today in that location's
    /// timezone, using the US Naval Almanac calculator.
    pub fn new(location: GeoLocation) -> Self {
        let today = Utc::now().with_timezone(&location.timezone()).date_naive();
        Self::for_date(location, today)
    }

    /// Create a calendar for a location and an explicit civil date.
    pub fn for_date(location: GeoLocation, date: NaiveDate) -> Self {
        Self {
            location,
            date,
            calculator: Box::new(SunTimesCalculator),
        }
    }

    /// The configured location.
    pub fn location(&self) -> &GeoLocation {
        &self.location
    }

    /// Replace the configured location.
    pub fn set_location(&mut self, location: GeoLocation) {
        self.location = location;
    }

    /// The configured civil date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Replace the configured civil date.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Swap in a different solar event calculator.
    pub fn set_calculator(&mut self, calculator: Box<dyn SolarEventCalculator>) {
        self.calculator = calculator;
    }

    /// Name of the active solar event calculator.
    pub fn calculator_name(&self) -> &'static str {
        self.calculator.name()
    }

    /// Elevation-adjusted sunrise at the geometric zenith.
    pub fn sunrise(&self) -> Option<DateTime<Tz>> {
        self.date_time_from_utc_hour(self.utc_sunrise(GEOMETRIC_ZENITH))
    }

    /// Sunrise without the elevation correction. Dawn calculations build on
    /// this: visible-light thresholds do not care about observer altitude.
    pub fn sea_level_sunrise(&self) -> Option<DateTime<Tz>> {
        self.date_time_from_utc_hour(self.utc_sea_level_sunrise(GEOMETRIC_ZENITH))
    }

    /// Elevation-adjusted sunset at the geometric zenith, rolled to the
    /// next day when it lands before sunrise.
    pub fn sunset(&self) -> Option<DateTime<Tz>> {
        let sunset = self.date_time_from_utc_hour(self.utc_sunset(GEOMETRIC_ZENITH));
        self.adjusted_sunset(sunset, self.sunrise())
    }

    /// Sunset without the elevation correction, rollover-corrected against
    /// sea-level sunrise.
    pub fn sea_level_sunset(&self) -> Option<DateTime<Tz>> {
        let sunset = self.date_time_from_utc_hour(self.utc_sea_level_sunset(GEOMETRIC_ZENITH));
        self.adjusted_sunset(sunset, self.sea_level_sunrise())
    }

    /// Beginning of civil twilight (dawn) at 96°.
    pub fn begin_civil_twilight(&self) -> Option<DateTime<Tz>> {
        self.sunrise_offset_by_degrees(CIVIL_ZENITH)
    }

    /// End of civil twilight (dusk) at 96°.
    pub fn end_civil_twilight(&self) -> Option<DateTime<Tz>> {
        self.sunset_offset_by_degrees(CIVIL_ZENITH)
    }

    /// Beginning of nautical twilight at 102°.
    pub fn begin_nautical_twilight(&self) -> Option<DateTime<Tz>> {
        self.sunrise_offset_by_degrees(NAUTICAL_ZENITH)
    }

    /// End of nautical twilight at 102°.
    pub fn end_nautical_twilight(&self) -> Option<DateTime<Tz>> {
        self.sunset_offset_by_degrees(NAUTICAL_ZENITH)
    }

    /// Beginning of astronomical twilight at 108°.
    pub fn begin_astronomical_twilight(&self) -> Option<DateTime<Tz>> {
        self.sunrise_offset_by_degrees(ASTRONOMICAL_ZENITH)
    }

    /// End of astronomical twilight at 108°.
    pub fn end_astronomical_twilight(&self) -> Option<DateTime<Tz>> {
        self.sunset_offset_by_degrees(ASTRONOMICAL_ZENITH)
    }

    /// Time of the sun crossing an arbitrary zenith on the rising side.
    /// This is the generic hook every "dawn N degrees below the horizon"
    /// opinion is expressed through.
    pub fn sunrise_offset_by_degrees(&self, zenith: f64) -> Option<DateTime<Tz>> {
        self.date_time_from_utc_hour(self.utc_sunrise(zenith))
    }

    /// Time of the sun crossing an arbitrary zenith on the setting side,
    /// rollover-corrected against the same-zenith rising time.
    pub fn sunset_offset_by_degrees(&self, zenith: f64) -> Option<DateTime<Tz>> {
        let sunset = self.date_time_from_utc_hour(self.utc_sunset(zenith));
        self.adjusted_sunset(sunset, self.sunrise_offset_by_degrees(zenith))
    }

    /// Raw fractional UTC hour of elevation-adjusted sunrise, NaN for none.
    pub fn utc_sunrise(&self, zenith: f64) -> f64 {
        self.calculator
            .utc_sunrise(self.date, &self.location, zenith, true)
    }

    /// Raw fractional UTC hour of sea-level sunrise, NaN for none.
    pub fn utc_sea_level_sunrise(&self, zenith: f64) -> f64 {
        self.calculator
            .utc_sunrise(self.date, &self.location, zenith, false)
    }

    /// Raw fractional UTC hour of elevation-adjusted sunset, NaN for none.
    pub fn utc_sunset(&self, zenith: f64) -> f64 {
        self.calculator
            .utc_sunset(self.date, &self.location, zenith, true)
    }

    /// Raw fractional UTC hour of sea-level sunset, NaN for none.
    pub fn utc_sea_level_sunset(&self, zenith: f64) -> f64 {
        self.calculator
            .utc_sunset(self.date, &self.location, zenith, false)
    }

    /// Shift a time by a signed number of milliseconds; `None` absorbs.
    pub fn time_offset(time: Option<DateTime<Tz>>, offset_millis: i64) -> Option<DateTime<Tz>> {
        Some(time? + Duration::milliseconds(offset_millis))
    }

    /// Length of a temporal (solar) hour in milliseconds: the sunrise to
    /// sunset interval split into twelve parts.
    pub fn temporal_hour(&self) -> Option<i64> {
        Self::temporal_hour_between(self.sunrise(), self.sunset())
    }

    /// Temporal hour for an arbitrary day-start/day-end pair. Truncates to
    /// whole milliseconds; sub-millisecond precision is dropped by design.
    pub fn temporal_hour_between(
        start: Option<DateTime<Tz>>,
        end: Option<DateTime<Tz>>,
    ) -> Option<i64> {
        let (start, end) = (start?, end?);
        Some((end.timestamp_millis() - start.timestamp_millis()) / 12)
    }

    /// Solar transit (midday): sunrise plus six temporal hours. Halfway
    /// between rise and set, which can sit slightly off the true meridian
    /// crossing as the day lengthens or shortens.
    pub fn sun_transit(&self) -> Option<DateTime<Tz>> {
        Self::time_offset(self.sunrise(), self.temporal_hour()? * 6)
    }

    /// Degrees below the geometric horizon whose rising time matches a
    /// fixed-minute offset before sea-level sunrise.
    ///
    /// Linear scan in 0.0001° steps, restarting the full calculation each
    /// step — very slow by construction; never call in a loop. Returns
    /// `None` when sea-level sunrise itself is unknown or no dip up to 180°
    /// reaches the target.
    pub fn sunrise_solar_dip_from_offset(&self, minutes: f64) -> Option<f64> {
        let target = Self::time_offset(
            self.sea_level_sunrise(),
            -((minutes * MINUTE_MILLIS as f64) as i64),
        )?;

        let mut degrees = 0.0_f64;
        let mut offset_by_degrees = self.sea_level_sunrise();
        while offset_by_degrees.is_none() || offset_by_degrees.is_some_and(|t| t > target) {
            degrees += SOLAR_DIP_INCREMENT;
            if degrees > 180.0 {
                debug!("sunrise solar dip search exhausted for {minutes} min offset");
                return None;
            }
            offset_by_degrees = self.sunrise_offset_by_degrees(GEOMETRIC_ZENITH + degrees);
        }
        debug!("sunrise solar dip for {minutes} min offset: {degrees} deg");
        Some(degrees)
    }

    /// Degrees below the geometric horizon whose setting time matches a
    /// fixed-minute offset after sea-level sunset. Same contract and same
    /// deliberate slowness as [`Self::sunrise_solar_dip_from_offset`].
    pub fn sunset_solar_dip_from_offset(&self, minutes: f64) -> Option<f64> {
        let target = Self::time_offset(
            self.sea_level_sunset(),
            (minutes * MINUTE_MILLIS as f64) as i64,
        )?;

        let mut degrees = 0.0_f64;
        let mut offset_by_degrees = self.sea_level_sunset();
        while offset_by_degrees.is_none() || offset_by_degrees.is_some_and(|t| t < target) {
            degrees += SOLAR_DIP_INCREMENT;
            if degrees > 180.0 {
                debug!("sunset solar dip search exhausted for {minutes} min offset");
                return None;
            }
            offset_by_degrees = self.sunset_offset_by_degrees(GEOMETRIC_ZENITH + degrees);
        }
        debug!("sunset solar dip for {minutes} min offset: {degrees} deg");
        Some(degrees)
    }

    /// Turn a fractional UTC hour into an absolute date-time in the
    /// location's zone on the configured civil date.
    ///
    /// The raw hour may emerge slightly negative or past 24 from the
    /// approximation; adding 240 before the mod keeps the normalization a
    /// single expression without losing fractional precision.
    pub fn date_time_from_utc_hour(&self, hour: f64) -> Option<DateTime<Tz>> {
        if hour.is_nan() {
            return None;
        }
        let mut time = hour + self.location.utc_offset_hours(self.date);
        time = (time + 240.0) % 24.0;

        let hours = time.trunc();
        time = (time - hours) * 60.0;
        let minutes = time.trunc();
        time = (time - minutes) * 60.0;
        let seconds = time.trunc();
        let millis = ((time - seconds) * 1000.0) as u32;

        let naive = self.date.and_hms_milli_opt(
            hours as u32,
            minutes as u32,
            seconds as u32,
            millis,
        )?;
        match self.location.timezone().from_local_datetime(&naive) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt),
            // Spring-forward gap: the wall-clock time does not exist; the
            // instant one hour later does.
            LocalResult::None => self
                .location
                .timezone()
                .from_local_datetime(&(naive + Duration::hours(1)))
                .earliest(),
        }
    }

    /// Roll a sunset forward one day when it lands at or before the
    /// matching sunrise, which happens when the configured timezone is far
    /// from the location's natural one (a US sunset viewed from UTC).
    /// Equality rolls over. Never applied to sunrise.
    fn adjusted_sunset(
        &self,
        sunset: Option<DateTime<Tz>>,
        sunrise: Option<DateTime<Tz>>,
    ) -> Option<DateTime<Tz>> {
        match (sunset, sunrise) {
            (Some(set), Some(rise)) if rise >= set => set.checked_add_days(Days::new(1)),
            (set, _) => set,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn lakewood_feb8() -> AstronomicalCalendar {
        let loc = GeoLocation::new(
            Some("Lakewood, NJ"),
            40.0828,
            -74.2094,
            20.0,
            chrono_tz::America::New_York,
        )
        .unwrap();
        AstronomicalCalendar::for_date(loc, NaiveDate::from_ymd_opt(2023, 2, 8).unwrap())
    }

    #[test]
    fn date_time_from_nan_is_none() {
        assert!(lakewood_feb8().date_time_from_utc_hour(f64::NAN).is_none());
    }

    #[test]
    fn date_time_lands_on_configured_date() {
        let cal = lakewood_feb8();
        let dt = cal.date_time_from_utc_hour(11.5).unwrap();
        assert_eq!(dt.date_naive(), cal.date());
        assert_eq!((dt.hour(), dt.minute()), (6, 30));
    }

    #[test]
    fn date_time_normalizes_negative_hours() {
        let cal = lakewood_feb8();
        // -0.5 UTC with a -5 offset wraps to 18:30 local
        let dt = cal.date_time_from_utc_hour(-0.5).unwrap();
        assert_eq!((dt.hour(), dt.minute()), (18, 30));
    }

    #[test]
    fn time_offset_absorbs_none() {
        assert!(AstronomicalCalendar::time_offset(None, 1000).is_none());
    }

    #[test]
    fn time_offset_shifts_signed() {
        let cal = lakewood_feb8();
        let base = cal.sunrise().unwrap();
        let later = AstronomicalCalendar::time_offset(Some(base), 90 * MINUTE_MILLIS).unwrap();
        let earlier = AstronomicalCalendar::time_offset(Some(base), -90 * MINUTE_MILLIS).unwrap();
        assert_eq!((later - base).num_minutes(), 90);
        assert_eq!((base - earlier).num_minutes(), 90);
    }

    #[test]
    fn temporal_hour_absorbs_unknown_endpoints() {
        let cal = lakewood_feb8();
        assert!(AstronomicalCalendar::temporal_hour_between(None, cal.sunset()).is_none());
        assert!(AstronomicalCalendar::temporal_hour_between(cal.sunrise(), None).is_none());
    }

    #[test]
    fn temporal_hour_times_twelve_recovers_day_length() {
        let cal = lakewood_feb8();
        let th = cal.temporal_hour().unwrap();
        let day_millis = cal.sunset().unwrap().timestamp_millis()
            - cal.sunrise().unwrap().timestamp_millis();
        let diff = day_millis - th * 12;
        assert!((0..12).contains(&diff), "truncation residue = {diff}");
    }

    #[test]
    fn rollover_equality_triggers_advance() {
        let cal = lakewood_feb8();
        let t = cal.sunrise().unwrap();
        let rolled = cal.adjusted_sunset(Some(t), Some(t)).unwrap();
        assert_eq!((rolled - t).num_hours(), 24);
    }

    #[test]
    fn rollover_leaves_ordinary_days_alone() {
        let cal = lakewood_feb8();
        let sunset = cal.date_time_from_utc_hour(cal.utc_sunset(GEOMETRIC_ZENITH));
        let adjusted = cal.adjusted_sunset(sunset, cal.sunrise());
        assert_eq!(adjusted, sunset);
    }

    #[test]
    fn rollover_absorbs_unknown_sunrise() {
        let cal = lakewood_feb8();
        let sunset = cal.sunset();
        assert_eq!(cal.adjusted_sunset(sunset, None), sunset);
        assert_eq!(cal.adjusted_sunset(None, cal.sunrise()), None);
    }

    #[test]
    fn utc_timezone_forces_sunset_rollover() {
        // A US west coast location configured for a UTC zone: sunset in UTC
        // lands on the next civil date's early hours, before that date's
        // sunrise, so the rollover advances it.
        let loc = GeoLocation::at_sea_level(None, 34.05, -118.24, chrono_tz::UTC).unwrap();
        let cal =
            AstronomicalCalendar::for_date(loc, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        let sunrise = cal.sunrise().unwrap();
        let sunset = cal.sunset().unwrap();
        assert!(
            sunset > sunrise,
            "rollover must keep sunset after sunrise: {sunrise} vs {sunset}"
        );
        assert_eq!(sunset.date_naive(), cal.date() + Days::new(1));
    }

    #[test]
    fn calculator_is_swappable() {
        let mut cal = lakewood_feb8();
        assert_eq!(cal.calculator_name(), "US Naval Almanac Algorithm");
        cal.set_calculator(Box::new(SunTimesCalculator));
        assert_eq!(cal.calculator_name(), "US Naval Almanac Algorithm");
    }
}
