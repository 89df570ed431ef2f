//! # zmanim-core
//!
//! Sunrise, sunset, twilight and halachic time (zmanim) calculations for an
//! arbitrary location, date and IANA timezone.
//!
//! Solar events come from the low-precision Naval Almanac algorithm, with
//! the classic 50 arcminute refraction + solar radius correction and an
//! optional elevation dip. On top of that sit temporal ("seasonal") hours
//! and a data-driven catalogue of rabbinic opinions — dawn and nightfall at
//! various solar dips or clock offsets, latest shema, midday, the mincha
//! times and more.
//!
//! Events that do not occur (polar day and night, deep twilight dips at
//! high latitude) surface as `None`, never as an error.
//!
//! ## Example
//!
//! ```rust,ignore
//! use chrono::NaiveDate;
//! use zmanim_core::{AstronomicalCalendar, GeoLocation, ZmanimCalendar};
//!
//! let lakewood = GeoLocation::new(
//!     Some("Lakewood, NJ"),
//!     40.0828,
//!     -74.2094,
//!     20.0,
//!     chrono_tz::America::New_York,
//! )?;
//! let date = NaiveDate::from_ymd_opt(2023, 2, 8).unwrap();
//! let cal = ZmanimCalendar::new(AstronomicalCalendar::for_date(lakewood, date));
//!
//! if let Some(sunrise) = cal.astronomical().sunrise() {
//!     println!("sunrise: {sunrise}");
//! }
//! if let Some(shma) = cal.zman("sof_zman_shma_gra")? {
//!     println!("latest shema (GRA): {shma}");
//! }
//! ```

mod astronomical;
mod calculator;
mod error;
mod geolocation;
mod sun_times;
mod zmanim;

pub use astronomical::{AstronomicalCalendar, HOUR_MILLIS, MINUTE_MILLIS};
pub use calculator::{
    SolarEventCalculator, ASTRONOMICAL_ZENITH, CIVIL_ZENITH, GEOMETRIC_ZENITH, NAUTICAL_ZENITH,
};
pub use error::{Error, Result};
pub use geolocation::GeoLocation;
pub use sun_times::SunTimesCalculator;
pub use zmanim::{Day, DayEdge, Formula, ZmanimCalendar, DAY_GRA, DAY_MGA, OPINIONS, SHAAH_ZMANIS_DAYS};
