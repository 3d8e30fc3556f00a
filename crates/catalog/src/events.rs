use anyhow::Result;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, Row};

use denuo_core::{Event, Stored};

use crate::query::{language, stored, Select};

static WRITTEN_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})\s+(\p{L}+)\.?\s+(\d{4})$").expect("written date regex")
});
static NUMERIC_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("numeric date regex"));

const MONTHS: &[(&str, u32)] = &[
    ("januari", 1),
    ("janvier", 1),
    ("january", 1),
    ("jan", 1),
    ("februari", 2),
    ("février", 2),
    ("fevrier", 2),
    ("february", 2),
    ("feb", 2),
    ("maart", 3),
    ("mars", 3),
    ("march", 3),
    ("mrt", 3),
    ("april", 4),
    ("avril", 4),
    ("apr", 4),
    ("mei", 5),
    ("mai", 5),
    ("may", 5),
    ("juni", 6),
    ("juin", 6),
    ("june", 6),
    ("jun", 6),
    ("juli", 7),
    ("juillet", 7),
    ("july", 7),
    ("jul", 7),
    ("augustus", 8),
    ("août", 8),
    ("aout", 8),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("septembre", 9),
    ("sep", 9),
    ("sept", 9),
    ("oktober", 10),
    ("octobre", 10),
    ("october", 10),
    ("okt", 10),
    ("oct", 10),
    ("november", 11),
    ("novembre", 11),
    ("nov", 11),
    ("december", 12),
    ("décembre", 12),
    ("decembre", 12),
    ("dec", 12),
];

fn month_number(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MONTHS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, month)| *month)
}

/// Interprets a scraped event date ("12 maart 2025", "3 avril 2025",
/// "3/4/2025" as day/month/year). Returns `None` for anything else.
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some(caps) = NUMERIC_DATE_RE.captures(raw) {
        return NaiveDate::from_ymd_opt(
            caps[3].parse().ok()?,
            caps[2].parse().ok()?,
            caps[1].parse().ok()?,
        );
    }
    let caps = WRITTEN_DATE_RE.captures(raw)?;
    NaiveDate::from_ymd_opt(
        caps[3].parse().ok()?,
        month_number(&caps[2])?,
        caps[1].parse().ok()?,
    )
}

fn decode(row: &Row<'_>) -> rusqlite::Result<Stored<Event>> {
    let record = Event {
        title: row.get("title")?,
        description: row.get("description")?,
        event_type: row.get("event_type")?,
        event_date: row.get("event_date")?,
        event_time: row.get("event_time")?,
        location_name: row.get("location_name")?,
        location_address: row.get("location_address")?,
        url: row.get("url")?,
        language: language(row, "language")?,
    };
    stored(row, record)
}

fn dated(conn: &Connection) -> Result<Vec<(Option<NaiveDate>, Stored<Event>)>> {
    let events = Select::from("events")
        .order_by("id ASC")
        .fetch(conn, decode)?;
    let mut dated: Vec<_> = events
        .into_iter()
        .map(|event| {
            let date = event.event_date.as_deref().and_then(parse_event_date);
            (date, event)
        })
        .collect();
    // Stable sort keeps insertion order among equal dates; undated last.
    dated.sort_by_key(|(date, _)| (date.is_none(), *date));
    Ok(dated)
}

/// Events dated on or after `today`, soonest first.
pub fn get_upcoming_events(
    conn: &Connection,
    today: NaiveDate,
    limit: u32,
) -> Result<Vec<Stored<Event>>> {
    Ok(dated(conn)?
        .into_iter()
        .filter(|(date, _)| date.is_some_and(|date| date >= today))
        .map(|(_, event)| event)
        .take(limit as usize)
        .collect())
}

pub fn get_all_events(conn: &Connection, limit: u32) -> Result<Vec<Stored<Event>>> {
    Ok(dated(conn)?
        .into_iter()
        .map(|(_, event)| event)
        .take(limit as usize)
        .collect())
}
