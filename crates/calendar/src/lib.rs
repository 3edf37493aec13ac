//! Indian holiday calendar.
//!
//! Hand-maintained holiday tables used both by the forecast fallback
//! (holiday flag per future timestamp) and by the holiday listing endpoint.
//! Fixed-date national holidays are generated for any year; observance-based
//! holidays follow a per-year table, currently covering 2017 (the year of the
//! shipped training data). State holidays are layered on top of the national
//! set per [`Region`].

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Holiday scope for a calendar query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// National holidays only.
    National,
    /// National holidays plus Jharkhand state holidays.
    Jharkhand,
}

/// True when the date falls on Saturday or Sunday (Monday-indexed week).
pub fn is_weekend(date: NaiveDate) -> bool {
    date.weekday().num_days_from_monday() >= 5
}

/// Holidays for one year and region, keyed by date.
///
/// The `BTreeMap` key gives ascending date order and collapses any
/// same-date overlap between the national and state tables.
pub fn holidays_for(year: i32, region: Region) -> BTreeMap<NaiveDate, String> {
    let mut holidays = BTreeMap::new();

    // Fixed-date national holidays, valid for any year.
    insert(&mut holidays, year, 1, 26, "Republic Day");
    insert(&mut holidays, year, 8, 15, "Independence Day");
    insert(&mut holidays, year, 10, 2, "Gandhi Jayanti");
    insert(&mut holidays, year, 12, 25, "Christmas Day");

    // Observance-based holidays move year to year; dates are tabulated
    // per supported year rather than computed astronomically.
    if year == 2017 {
        insert(&mut holidays, year, 3, 13, "Holi");
        insert(&mut holidays, year, 4, 9, "Mahavir Jayanti");
        insert(&mut holidays, year, 4, 14, "Good Friday");
        insert(&mut holidays, year, 5, 10, "Buddha Purnima");
        insert(&mut holidays, year, 6, 26, "Eid ul-Fitr");
        insert(&mut holidays, year, 9, 2, "Eid ul-Adha");
        insert(&mut holidays, year, 9, 30, "Dussehra");
        insert(&mut holidays, year, 10, 1, "Muharram");
        insert(&mut holidays, year, 10, 19, "Diwali");
        insert(&mut holidays, year, 11, 4, "Guru Nanak Jayanti");
        insert(&mut holidays, year, 12, 1, "Milad-un-Nabi");
    }

    if region == Region::Jharkhand {
        insert(&mut holidays, year, 11, 15, "Jharkhand Formation Day");
        if year == 2017 {
            insert(&mut holidays, year, 3, 30, "Sarhul");
            insert(&mut holidays, year, 9, 1, "Karma Puja");
        }
    }

    holidays
}

fn insert(map: &mut BTreeMap<NaiveDate, String>, year: i32, month: u32, day: u32, name: &str) {
    if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
        map.insert(date, name.to_string());
    }
}
