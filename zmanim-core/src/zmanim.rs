//! Halachic time-point (zman) catalogue.
//!
//! The classic API surface for these times is a long flat family of
//! near-identical named methods — "alos 72 minutes", "alos 16.1 degrees",
//! "sof zman shma MGA 90 minutes zmanis", and so on. Each one is a plain
//! parameterization over three primitives: an event at a zenith dip, a
//! fixed or day-scaled minute offset from a sea-level event, and a count of
//! temporal hours into an opinion's day. This module keeps the names as
//! lookup keys but stores the catalogue as data.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::astronomical::{AstronomicalCalendar, MINUTE_MILLIS};
use crate::calculator::GEOMETRIC_ZENITH;
use crate::error::{Error, Result};

/// One boundary of an opinion's "day".
///
/// Degree edges are expressed as the dip below the geometric horizon (so
/// `Dawn { degrees: 16.1 }` is the sun at a 106.1° zenith, rising side).
/// Minute offsets are signed, positive toward later times, and anchored on
/// the sea-level event; `Zmanis` offsets scale with the sea-level
/// sunrise-to-sunset day (60 zmanis minutes = one twelfth of that day).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayEdge {
    /// Elevation-adjusted sunrise.
    Sunrise,
    /// Elevation-adjusted sunset.
    Sunset,
    /// Sea-level sunrise.
    SeaLevelSunrise,
    /// Sea-level sunset.
    SeaLevelSunset,
    /// Sun rising through a dip of `degrees` below the geometric horizon.
    Dawn { degrees: f64 },
    /// Sun setting through a dip of `degrees` below the geometric horizon.
    Dusk { degrees: f64 },
    /// Fixed minute offset from sea-level sunrise.
    SunriseOffset { minutes: f64 },
    /// Fixed minute offset from sea-level sunset.
    SunsetOffset { minutes: f64 },
    /// Day-scaled minute offset from sea-level sunrise.
    SunriseOffsetZmanis { minutes: f64 },
    /// Day-scaled minute offset from sea-level sunset.
    SunsetOffsetZmanis { minutes: f64 },
}

/// An opinion's day: the pair of boundaries its temporal hours divide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Day {
    pub start: DayEdge,
    pub end: DayEdge,
}

impl Day {
    pub const fn new(start: DayEdge, end: DayEdge) -> Self {
        Self { start, end }
    }
}

/// How a named zman is computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Formula {
    /// The day-edge event itself (alos, tzais, misheyakir, candle lighting).
    Edge(DayEdge),
    /// `hours` temporal hours after the start of `day`.
    TemporalHours { day: Day, hours: f64 },
    /// Fixed local chatzos — noon of the location's standard meridian —
    /// shifted earlier by a fixed number of minutes.
    BeforeFixedLocalChatzos { minutes: f64 },
}

/// The GRA day: sea-level sunrise to sea-level sunset.
pub const DAY_GRA: Day = Day::new(DayEdge::SeaLevelSunrise, DayEdge::SeaLevelSunset);

/// The default MGA day: 72 fixed minutes before sunrise to 72 after sunset.
pub const DAY_MGA: Day = Day::new(
    DayEdge::SunriseOffset { minutes: -72.0 },
    DayEdge::SunsetOffset { minutes: 72.0 },
);

const fn fixed_day(minutes: f64) -> Day {
    Day::new(
        DayEdge::SunriseOffset { minutes: -minutes },
        DayEdge::SunsetOffset { minutes },
    )
}

const fn zmanis_day(minutes: f64) -> Day {
    Day::new(
        DayEdge::SunriseOffsetZmanis { minutes: -minutes },
        DayEdge::SunsetOffsetZmanis { minutes },
    )
}

const fn degrees_day(degrees: f64) -> Day {
    Day::new(DayEdge::Dawn { degrees }, DayEdge::Dusk { degrees })
}

/// Named opinion days usable for temporal-hour (shaah zmanis) queries.
pub const SHAAH_ZMANIS_DAYS: &[(&str, Day)] = &[
    ("shaah_zmanis_gra", DAY_GRA),
    ("shaah_zmanis_mga", DAY_MGA),
    ("shaah_zmanis_16_point_1_degrees", degrees_day(16.1)),
    ("shaah_zmanis_18_degrees", degrees_day(18.0)),
    ("shaah_zmanis_19_point_8_degrees", degrees_day(19.8)),
    ("shaah_zmanis_26_degrees", degrees_day(26.0)),
    ("shaah_zmanis_60_minutes", fixed_day(60.0)),
    ("shaah_zmanis_72_minutes", fixed_day(72.0)),
    ("shaah_zmanis_72_minutes_zmanis", zmanis_day(72.0)),
    ("shaah_zmanis_90_minutes", fixed_day(90.0)),
    ("shaah_zmanis_90_minutes_zmanis", zmanis_day(90.0)),
    ("shaah_zmanis_96_minutes", fixed_day(96.0)),
    ("shaah_zmanis_96_minutes_zmanis", zmanis_day(96.0)),
    ("shaah_zmanis_120_minutes", fixed_day(120.0)),
    ("shaah_zmanis_120_minutes_zmanis", zmanis_day(120.0)),
];

/// The named zman catalogue. Keys are the snake_case names of the classic
/// method set; formulas are the parameterizations those methods hand-coded.
pub const OPINIONS: &[(&str, Formula)] = &[
    // dawn (alos) family
    ("alos_60", Formula::Edge(DayEdge::SunriseOffset { minutes: -60.0 })),
    ("alos_72", Formula::Edge(DayEdge::SunriseOffset { minutes: -72.0 })),
    ("alos_90", Formula::Edge(DayEdge::SunriseOffset { minutes: -90.0 })),
    ("alos_96", Formula::Edge(DayEdge::SunriseOffset { minutes: -96.0 })),
    ("alos_120", Formula::Edge(DayEdge::SunriseOffset { minutes: -120.0 })),
    ("alos_72_zmanis", Formula::Edge(DayEdge::SunriseOffsetZmanis { minutes: -72.0 })),
    ("alos_90_zmanis", Formula::Edge(DayEdge::SunriseOffsetZmanis { minutes: -90.0 })),
    ("alos_96_zmanis", Formula::Edge(DayEdge::SunriseOffsetZmanis { minutes: -96.0 })),
    ("alos_120_zmanis", Formula::Edge(DayEdge::SunriseOffsetZmanis { minutes: -120.0 })),
    ("alos_16_point_1_degrees", Formula::Edge(DayEdge::Dawn { degrees: 16.1 })),
    ("alos_18_degrees", Formula::Edge(DayEdge::Dawn { degrees: 18.0 })),
    ("alos_19_point_8_degrees", Formula::Edge(DayEdge::Dawn { degrees: 19.8 })),
    ("alos_26_degrees", Formula::Edge(DayEdge::Dawn { degrees: 26.0 })),
    // earliest tallis/tefillin (misheyakir)
    ("misheyakir_10_point_2_degrees", Formula::Edge(DayEdge::Dawn { degrees: 10.2 })),
    ("misheyakir_11_degrees", Formula::Edge(DayEdge::Dawn { degrees: 11.0 })),
    ("misheyakir_11_point_5_degrees", Formula::Edge(DayEdge::Dawn { degrees: 11.5 })),
    // latest shema
    ("sof_zman_shma_gra", Formula::TemporalHours { day: DAY_GRA, hours: 3.0 }),
    ("sof_zman_shma_mga", Formula::TemporalHours { day: DAY_MGA, hours: 3.0 }),
    ("sof_zman_shma_mga_16_point_1_degrees", Formula::TemporalHours { day: degrees_day(16.1), hours: 3.0 }),
    ("sof_zman_shma_mga_19_point_8_degrees", Formula::TemporalHours { day: degrees_day(19.8), hours: 3.0 }),
    ("sof_zman_shma_mga_72_minutes", Formula::TemporalHours { day: fixed_day(72.0), hours: 3.0 }),
    ("sof_zman_shma_mga_72_minutes_zmanis", Formula::TemporalHours { day: zmanis_day(72.0), hours: 3.0 }),
    ("sof_zman_shma_mga_90_minutes", Formula::TemporalHours { day: fixed_day(90.0), hours: 3.0 }),
    ("sof_zman_shma_mga_90_minutes_zmanis", Formula::TemporalHours { day: zmanis_day(90.0), hours: 3.0 }),
    ("sof_zman_shma_mga_96_minutes", Formula::TemporalHours { day: fixed_day(96.0), hours: 3.0 }),
    ("sof_zman_shma_mga_96_minutes_zmanis", Formula::TemporalHours { day: zmanis_day(96.0), hours: 3.0 }),
    ("sof_zman_shma_mga_120_minutes", Formula::TemporalHours { day: fixed_day(120.0), hours: 3.0 }),
    ("sof_zman_shma_fixed_local", Formula::BeforeFixedLocalChatzos { minutes: 180.0 }),
    // latest morning prayers
    ("sof_zman_tfila_gra", Formula::TemporalHours { day: DAY_GRA, hours: 4.0 }),
    ("sof_zman_tfila_mga", Formula::TemporalHours { day: DAY_MGA, hours: 4.0 }),
    ("sof_zman_tfila_mga_16_point_1_degrees", Formula::TemporalHours { day: degrees_day(16.1), hours: 4.0 }),
    ("sof_zman_tfila_mga_19_point_8_degrees", Formula::TemporalHours { day: degrees_day(19.8), hours: 4.0 }),
    ("sof_zman_tfila_mga_72_minutes", Formula::TemporalHours { day: fixed_day(72.0), hours: 4.0 }),
    ("sof_zman_tfila_mga_72_minutes_zmanis", Formula::TemporalHours { day: zmanis_day(72.0), hours: 4.0 }),
    ("sof_zman_tfila_mga_90_minutes", Formula::TemporalHours { day: fixed_day(90.0), hours: 4.0 }),
    ("sof_zman_tfila_mga_90_minutes_zmanis", Formula::TemporalHours { day: zmanis_day(90.0), hours: 4.0 }),
    ("sof_zman_tfila_mga_96_minutes", Formula::TemporalHours { day: fixed_day(96.0), hours: 4.0 }),
    ("sof_zman_tfila_mga_96_minutes_zmanis", Formula::TemporalHours { day: zmanis_day(96.0), hours: 4.0 }),
    ("sof_zman_tfila_mga_120_minutes", Formula::TemporalHours { day: fixed_day(120.0), hours: 4.0 }),
    ("sof_zman_tfila_fixed_local", Formula::BeforeFixedLocalChatzos { minutes: 120.0 }),
    // midday
    ("chatzos", Formula::TemporalHours { day: Day::new(DayEdge::Sunrise, DayEdge::Sunset), hours: 6.0 }),
    ("fixed_local_chatzos", Formula::BeforeFixedLocalChatzos { minutes: 0.0 }),
    // afternoon
    ("mincha_gedola", Formula::TemporalHours { day: DAY_GRA, hours: 6.5 }),
    ("mincha_gedola_72_minutes", Formula::TemporalHours { day: fixed_day(72.0), hours: 6.5 }),
    ("mincha_gedola_16_point_1_degrees", Formula::TemporalHours { day: degrees_day(16.1), hours: 6.5 }),
    ("mincha_ketana", Formula::TemporalHours { day: DAY_GRA, hours: 9.5 }),
    ("mincha_ketana_72_minutes", Formula::TemporalHours { day: fixed_day(72.0), hours: 9.5 }),
    ("mincha_ketana_16_point_1_degrees", Formula::TemporalHours { day: degrees_day(16.1), hours: 9.5 }),
    ("plag_hamincha", Formula::TemporalHours { day: DAY_GRA, hours: 10.75 }),
    ("plag_hamincha_60_minutes", Formula::TemporalHours { day: fixed_day(60.0), hours: 10.75 }),
    ("plag_hamincha_72_minutes", Formula::TemporalHours { day: fixed_day(72.0), hours: 10.75 }),
    ("plag_hamincha_72_minutes_zmanis", Formula::TemporalHours { day: zmanis_day(72.0), hours: 10.75 }),
    ("plag_hamincha_90_minutes", Formula::TemporalHours { day: fixed_day(90.0), hours: 10.75 }),
    ("plag_hamincha_90_minutes_zmanis", Formula::TemporalHours { day: zmanis_day(90.0), hours: 10.75 }),
    ("plag_hamincha_96_minutes", Formula::TemporalHours { day: fixed_day(96.0), hours: 10.75 }),
    ("plag_hamincha_96_minutes_zmanis", Formula::TemporalHours { day: zmanis_day(96.0), hours: 10.75 }),
    ("plag_hamincha_120_minutes", Formula::TemporalHours { day: fixed_day(120.0), hours: 10.75 }),
    ("plag_hamincha_16_point_1_degrees", Formula::TemporalHours { day: degrees_day(16.1), hours: 10.75 }),
    ("plag_hamincha_18_degrees", Formula::TemporalHours { day: degrees_day(18.0), hours: 10.75 }),
    ("plag_hamincha_19_point_8_degrees", Formula::TemporalHours { day: degrees_day(19.8), hours: 10.75 }),
    ("plag_hamincha_26_degrees", Formula::TemporalHours { day: degrees_day(26.0), hours: 10.75 }),
    // candle lighting: 18 minutes before sea-level sunset
    ("candle_lighting", Formula::Edge(DayEdge::SunsetOffset { minutes: -18.0 })),
    // twilight between sunset and nightfall
    ("bain_hashmashos_rt_13_degrees", Formula::Edge(DayEdge::Dusk { degrees: 13.0 })),
    ("bain_hashmashos_rt_58_point_5_minutes", Formula::Edge(DayEdge::SunsetOffset { minutes: 58.5 })),
    // nightfall (tzais) family
    ("tzais", Formula::Edge(DayEdge::Dusk { degrees: 8.5 })),
    ("tzais_geonim_3_point_65_degrees", Formula::Edge(DayEdge::Dusk { degrees: 3.65 })),
    ("tzais_geonim_3_point_7_degrees", Formula::Edge(DayEdge::Dusk { degrees: 3.7 })),
    ("tzais_geonim_4_point_37_degrees", Formula::Edge(DayEdge::Dusk { degrees: 4.37 })),
    ("tzais_geonim_4_point_61_degrees", Formula::Edge(DayEdge::Dusk { degrees: 4.61 })),
    ("tzais_geonim_4_point_8_degrees", Formula::Edge(DayEdge::Dusk { degrees: 4.8 })),
    ("tzais_geonim_5_point_88_degrees", Formula::Edge(DayEdge::Dusk { degrees: 5.88 })),
    ("tzais_geonim_5_point_95_degrees", Formula::Edge(DayEdge::Dusk { degrees: 5.95 })),
    ("tzais_geonim_7_point_083_degrees", Formula::Edge(DayEdge::Dusk { degrees: 7.083 })),
    ("tzais_geonim_8_point_5_degrees", Formula::Edge(DayEdge::Dusk { degrees: 8.5 })),
    ("tzais_16_point_1_degrees", Formula::Edge(DayEdge::Dusk { degrees: 16.1 })),
    ("tzais_18_degrees", Formula::Edge(DayEdge::Dusk { degrees: 18.0 })),
    ("tzais_19_point_8_degrees", Formula::Edge(DayEdge::Dusk { degrees: 19.8 })),
    ("tzais_26_degrees", Formula::Edge(DayEdge::Dusk { degrees: 26.0 })),
    ("tzais_60", Formula::Edge(DayEdge::SunsetOffset { minutes: 60.0 })),
    ("tzais_72", Formula::Edge(DayEdge::SunsetOffset { minutes: 72.0 })),
    ("tzais_90", Formula::Edge(DayEdge::SunsetOffset { minutes: 90.0 })),
    ("tzais_96", Formula::Edge(DayEdge::SunsetOffset { minutes: 96.0 })),
    ("tzais_120", Formula::Edge(DayEdge::SunsetOffset { minutes: 120.0 })),
    ("tzais_72_zmanis", Formula::Edge(DayEdge::SunsetOffsetZmanis { minutes: 72.0 })),
    ("tzais_90_zmanis", Formula::Edge(DayEdge::SunsetOffsetZmanis { minutes: 90.0 })),
    ("tzais_96_zmanis", Formula::Edge(DayEdge::SunsetOffsetZmanis { minutes: 96.0 })),
    ("tzais_120_zmanis", Formula::Edge(DayEdge::SunsetOffsetZmanis { minutes: 120.0 })),
];

/// Zmanim calculations for one location and date.
///
/// Wraps an [`AstronomicalCalendar`] (composition, not inheritance) and
/// evaluates catalogue formulas against it. An unknown *event* — polar
/// day/night at the requested dip — evaluates to `Ok(None)`; an unknown
/// *key* is an error.
#[derive(Debug)]
pub struct ZmanimCalendar {
    calendar: AstronomicalCalendar,
}

impl ZmanimCalendar {
    pub fn new(calendar: AstronomicalCalendar) -> Self {
        Self { calendar }
    }

    /// The wrapped astronomical calendar.
    pub fn astronomical(&self) -> &AstronomicalCalendar {
        &self.calendar
    }

    /// Mutable access to the wrapped calendar, for date/location changes.
    pub fn astronomical_mut(&mut self) -> &mut AstronomicalCalendar {
        &mut self.calendar
    }

    /// All registered opinion keys, in catalogue order.
    pub fn opinion_keys() -> impl Iterator<Item = &'static str> {
        OPINIONS.iter().map(|(key, _)| *key)
    }

    /// Evaluate a named zman. `Ok(None)` means the underlying solar event
    /// does not occur on this date at this location.
    pub fn zman(&self, key: &str) -> Result<Option<DateTime<Tz>>> {
        let formula = OPINIONS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, f)| *f)
            .ok_or_else(|| Error::UnknownOpinion(key.to_owned()))?;
        Ok(self.eval(formula))
    }

    /// Length of the named opinion's temporal hour in milliseconds.
    pub fn shaah_zmanis(&self, key: &str) -> Result<Option<i64>> {
        let day = SHAAH_ZMANIS_DAYS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, d)| *d)
            .ok_or_else(|| Error::UnknownOpinion(key.to_owned()))?;
        Ok(self.shaah_zmanis_for(day))
    }

    /// Temporal hour of an arbitrary day definition.
    pub fn shaah_zmanis_for(&self, day: Day) -> Option<i64> {
        AstronomicalCalendar::temporal_hour_between(self.edge(day.start), self.edge(day.end))
    }

    /// Evaluate an arbitrary formula, not only registered ones.
    pub fn eval(&self, formula: Formula) -> Option<DateTime<Tz>> {
        match formula {
            Formula::Edge(edge) => self.edge(edge),
            Formula::TemporalHours { day, hours } => {
                let shaah = self.shaah_zmanis_for(day)?;
                AstronomicalCalendar::time_offset(
                    self.edge(day.start),
                    (shaah as f64 * hours) as i64,
                )
            }
            Formula::BeforeFixedLocalChatzos { minutes } => AstronomicalCalendar::time_offset(
                self.fixed_local_chatzos(),
                -((minutes * MINUTE_MILLIS as f64) as i64),
            ),
        }
    }

    /// Noon of the location's standard meridian shifted to its true
    /// longitude: local mean midday, independent of the solar calculation.
    pub fn fixed_local_chatzos(&self) -> Option<DateTime<Tz>> {
        let location = self.calendar.location();
        let date = self.calendar.date();
        let noon = self
            .calendar
            .date_time_from_utc_hour(12.0 - location.standard_utc_offset_hours(date));
        AstronomicalCalendar::time_offset(
            noon,
            -((location.local_mean_time_offset_minutes(date) * MINUTE_MILLIS as f64) as i64),
        )
    }

    fn edge(&self, edge: DayEdge) -> Option<DateTime<Tz>> {
        let cal = &self.calendar;
        match edge {
            DayEdge::Sunrise => cal.sunrise(),
            DayEdge::Sunset => cal.sunset(),
            DayEdge::SeaLevelSunrise => cal.sea_level_sunrise(),
            DayEdge::SeaLevelSunset => cal.sea_level_sunset(),
            DayEdge::Dawn { degrees } => {
                cal.sunrise_offset_by_degrees(GEOMETRIC_ZENITH + degrees)
            }
            DayEdge::Dusk { degrees } => {
                cal.sunset_offset_by_degrees(GEOMETRIC_ZENITH + degrees)
            }
            DayEdge::SunriseOffset { minutes } => AstronomicalCalendar::time_offset(
                cal.sea_level_sunrise(),
                (minutes * MINUTE_MILLIS as f64) as i64,
            ),
            DayEdge::SunsetOffset { minutes } => AstronomicalCalendar::time_offset(
                cal.sea_level_sunset(),
                (minutes * MINUTE_MILLIS as f64) as i64,
            ),
            DayEdge::SunriseOffsetZmanis { minutes } => {
                let shaah = self.shaah_zmanis_for(DAY_GRA)?;
                AstronomicalCalendar::time_offset(
                    cal.sea_level_sunrise(),
                    (shaah as f64 * minutes / 60.0) as i64,
                )
            }
            DayEdge::SunsetOffsetZmanis { minutes } => {
                let shaah = self.shaah_zmanis_for(DAY_GRA)?;
                AstronomicalCalendar::time_offset(
                    cal.sea_level_sunset(),
                    (shaah as f64 * minutes / 60.0) as i64,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geolocation::GeoLocation;
    use chrono::NaiveDate;

    fn lakewood_feb8() -> ZmanimCalendar {
        let loc = GeoLocation::new(
            Some("Lakewood, NJ"),
            40.0828,
            -74.2094,
            20.0,
            chrono_tz::America::New_York,
        )
        .unwrap();
        ZmanimCalendar::new(AstronomicalCalendar::for_date(
            loc,
            NaiveDate::from_ymd_opt(2023, 2, 8).unwrap(),
        ))
    }

    #[test]
    fn unknown_key_is_an_error() {
        let err = lakewood_feb8().zman("no_such_zman").unwrap_err();
        assert_eq!(err, Error::UnknownOpinion("no_such_zman".into()));
    }

    #[test]
    fn catalogue_keys_are_unique() {
        let mut keys: Vec<_> = ZmanimCalendar::opinion_keys().collect();
        keys.sort_unstable();
        let before = keys.len();
        keys.dedup();
        assert_eq!(before, keys.len(), "duplicate opinion keys");
    }

    #[test]
    fn alos_72_is_72_minutes_before_sea_level_sunrise() {
        let cal = lakewood_feb8();
        let alos = cal.zman("alos_72").unwrap().unwrap();
        let sunrise = cal.astronomical().sea_level_sunrise().unwrap();
        assert_eq!((sunrise - alos).num_minutes(), 72);
    }

    #[test]
    fn tzais_72_is_72_minutes_after_sea_level_sunset() {
        let cal = lakewood_feb8();
        let tzais = cal.zman("tzais_72").unwrap().unwrap();
        let sunset = cal.astronomical().sea_level_sunset().unwrap();
        assert_eq!((tzais - sunset).num_minutes(), 72);
    }

    #[test]
    fn alos_degrees_precedes_alos_fixed_in_winter() {
        // At this latitude in February, 16.1 deg of dip takes longer than
        // 72 minutes of clock time.
        let cal = lakewood_feb8();
        let by_degrees = cal.zman("alos_16_point_1_degrees").unwrap().unwrap();
        let fixed = cal.zman("alos_72").unwrap().unwrap();
        assert!(by_degrees < fixed, "{by_degrees} vs {fixed}");
    }

    #[test]
    fn shma_ordering_mga_before_gra() {
        let cal = lakewood_feb8();
        let mga = cal.zman("sof_zman_shma_mga").unwrap().unwrap();
        let gra = cal.zman("sof_zman_shma_gra").unwrap().unwrap();
        assert!(mga < gra);
    }

    #[test]
    fn daily_zman_ordering() {
        let cal = lakewood_feb8();
        let order = [
            "alos_72",
            "misheyakir_11_point_5_degrees",
            "sof_zman_shma_gra",
            "sof_zman_tfila_gra",
            "chatzos",
            "mincha_gedola",
            "mincha_ketana",
            "plag_hamincha",
            "candle_lighting",
            "tzais",
            "tzais_72",
        ];
        let times: Vec<_> = order
            .iter()
            .map(|k| cal.zman(k).unwrap().unwrap_or_else(|| panic!("{k} unknown")))
            .collect();
        for pair in times.windows(2) {
            assert!(pair[0] < pair[1], "ordering violated: {:?}", pair);
        }
    }

    #[test]
    fn zmanis_day_scales_with_gra_hour() {
        let cal = lakewood_feb8();
        let shaah_gra = cal.shaah_zmanis("shaah_zmanis_gra").unwrap().unwrap();
        let alos_z = cal.zman("alos_72_zmanis").unwrap().unwrap();
        let sunrise = cal.astronomical().sea_level_sunrise().unwrap();
        let expected = (shaah_gra as f64 * 1.2) as i64;
        assert_eq!(
            (sunrise.timestamp_millis() - alos_z.timestamp_millis()),
            expected
        );
    }

    #[test]
    fn shaah_zmanis_mga_longer_than_gra() {
        let cal = lakewood_feb8();
        let gra = cal.shaah_zmanis("shaah_zmanis_gra").unwrap().unwrap();
        let mga = cal.shaah_zmanis("shaah_zmanis_mga").unwrap().unwrap();
        assert_eq!(mga - gra, 12 * MINUTE_MILLIS); // 144 extra minutes / 12
    }

    #[test]
    fn deep_dip_opinions_vanish_in_polar_summer() {
        let loc = GeoLocation::at_sea_level(None, 78.0, 15.0, chrono_tz::UTC).unwrap();
        let cal = ZmanimCalendar::new(AstronomicalCalendar::for_date(
            loc,
            NaiveDate::from_ymd_opt(2023, 6, 21).unwrap(),
        ));
        assert_eq!(cal.zman("alos_16_point_1_degrees").unwrap(), None);
        assert_eq!(cal.zman("sof_zman_shma_gra").unwrap(), None);
        assert_eq!(cal.shaah_zmanis("shaah_zmanis_gra").unwrap(), None);
    }

    #[test]
    fn fixed_local_chatzos_tracks_longitude() {
        let cal = lakewood_feb8();
        let chatzos = cal.zman("fixed_local_chatzos").unwrap().unwrap();
        // Lakewood's mean solar noon is ~3.2 minutes before 12:00 EST.
        use chrono::Timelike;
        assert_eq!(chatzos.hour(), 11);
        assert_eq!(chatzos.minute(), 56);
    }

    #[test]
    fn fixed_local_chatzos_uses_the_zone_standard_offset() {
        // Lord Howe Island shifts its clock by half an hour in summer
        // (UTC+10:30 standard, UTC+11 DST), so an assumed one-hour DST
        // delta would land this 30 minutes off.
        use chrono::Timelike;
        let loc = GeoLocation::at_sea_level(
            Some("Lord Howe Island"),
            -31.55,
            159.08,
            chrono_tz::Australia::Lord_Howe,
        )
        .unwrap();
        // 159.08 deg * 4 min/deg - 630 min = 6.32 min ahead of zone time.
        let summer = ZmanimCalendar::new(AstronomicalCalendar::for_date(
            loc.clone(),
            NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
        ));
        let chatzos = summer.zman("fixed_local_chatzos").unwrap().unwrap();
        assert_eq!((chatzos.hour(), chatzos.minute()), (12, 23));

        let winter = ZmanimCalendar::new(AstronomicalCalendar::for_date(
            loc,
            NaiveDate::from_ymd_opt(2023, 7, 15).unwrap(),
        ));
        let chatzos = winter.zman("fixed_local_chatzos").unwrap().unwrap();
        assert_eq!((chatzos.hour(), chatzos.minute()), (11, 53));
    }

    #[test]
    fn fixed_local_zmanim_are_clock_offsets() {
        let cal = lakewood_feb8();
        let chatzos = cal.zman("fixed_local_chatzos").unwrap().unwrap();
        let shma = cal.zman("sof_zman_shma_fixed_local").unwrap().unwrap();
        assert_eq!((chatzos - shma).num_minutes(), 180);
    }
}
