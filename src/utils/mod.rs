//! Some utility functions

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer};

use crate::calendar::CalendarGrid;
use crate::timestamp::Timestamp;

/// Parse a timestamp into an instant, reading the ones without an offset as UTC.
///
/// To keep those as wall-clock times instead, use [`Timestamp::parse`].
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    Timestamp::parse(text).map(|t| t.to_utc_in(&Utc))
}

/// Format a timestamp the way the API expects it, e.g. `2024-03-12T14:00:00.000Z`
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde support for instants sent to the API
pub mod timestamp {
    use super::*;
    use serde::Serializer;

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(dt))
    }
}

/// Serde support for optional timestamps. Empty strings and `null` are `None`
pub mod optional_timestamp {
    use super::*;
    use serde::{Serialize, Serializer};

    pub fn serialize<S>(ts: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ts {
            Some(ts) => ts.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match Option::<String>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(t) if t.trim().is_empty() => return Ok(None),
            Some(t) => t,
        };
        Timestamp::parse(&text)
            .map(Some)
            .map_err(|err| serde::de::Error::custom(format!("invalid timestamp {:?}: {}", text, err)))
    }
}

/// Identifiers may come as JSON strings or numbers. This reads both as a string
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(i) => i.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}


/// Lock a mutex, even if a thread panicked while holding it (the data it protects is always left consistent)
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// A debug utility that pretty-prints a month grid
pub fn print_grid(grid: &CalendarGrid) {
    println!("{}", grid.month());
    println!("  Mon   Tue   Wed   Thu   Fri   Sat   Sun");
    for week in grid.weeks() {
        let line: Vec<String> = week.iter()
            .map(|cell| {
                let marker = if cell.events().is_empty() { ' ' } else { '*' };
                if cell.in_month() {
                    format!("  {:>2}{} ", cell.date().format("%d"), marker)
                } else {
                    format!(" ({:>2}){}", cell.date().format("%d"), marker)
                }
            })
            .collect();
        println!("{}", line.join(""));
    }
    for cell in grid.cells() {
        for event in cell.events() {
            println!("    {}  {}\t{}", cell.date(), event.title(), event.id());
        }
    }
}
