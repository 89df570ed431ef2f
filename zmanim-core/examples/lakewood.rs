//! Print a day's solar events and common zmanim for Lakewood, NJ.
//!
//! Run with `cargo run --example lakewood`.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use zmanim_core::{AstronomicalCalendar, GeoLocation, Result, ZmanimCalendar};

fn fmt(time: Option<DateTime<Tz>>) -> String {
    match time {
        Some(t) => t.format("%H:%M:%S %Z").to_string(),
        None => "does not occur".to_owned(),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let lakewood = GeoLocation::new(
        Some("Lakewood, NJ"),
        40.0828,
        -74.2094,
        20.0,
        chrono_tz::America::New_York,
    )?;
    let date = NaiveDate::from_ymd_opt(2023, 2, 8).unwrap();
    let cal = ZmanimCalendar::new(AstronomicalCalendar::for_date(lakewood, date));
    let astro = cal.astronomical();

    println!("{} — {date}", astro.location().name().unwrap_or("?"));
    println!();
    println!("first light (16.1°)     {}", fmt(cal.zman("alos_16_point_1_degrees")?));
    println!("dawn (72 min)           {}", fmt(cal.zman("alos_72")?));
    println!("sunrise                 {}", fmt(astro.sunrise()));
    println!("latest shema (MGA)      {}", fmt(cal.zman("sof_zman_shma_mga")?));
    println!("latest shema (GRA)      {}", fmt(cal.zman("sof_zman_shma_gra")?));
    println!("midday                  {}", fmt(cal.zman("chatzos")?));
    println!("mincha gedola           {}", fmt(cal.zman("mincha_gedola")?));
    println!("plag hamincha           {}", fmt(cal.zman("plag_hamincha")?));
    println!("candle lighting         {}", fmt(cal.zman("candle_lighting")?));
    println!("sunset                  {}", fmt(astro.sunset()));
    println!("nightfall (8.5°)        {}", fmt(cal.zman("tzais")?));
    println!("nightfall (72 min)      {}", fmt(cal.zman("tzais_72")?));

    if let Some(shaah) = cal.shaah_zmanis("shaah_zmanis_gra")? {
        let minutes = shaah as f64 / 60_000.0;
        println!();
        println!("seasonal hour (GRA)     {minutes:.2} min");
    }

    Ok(())
}
