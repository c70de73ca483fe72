//! Points in time, as sent by the API
//!
//! The API sends either RFC 3339 timestamps (with an offset), or "floating" local times such as `2024-03-05T14:00`.
//! A floating time means the same wall-clock time wherever it is displayed: it only becomes an instant
//! once a timezone is chosen (see [`Timestamp::in_timezone`]).

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::format_timestamp;

/// A local time may not exist on a given day (e.g. during a DST change). How far it can be pushed forward to find one that does
const MAX_GAP_HOURS: u32 = 24;

/// The formats accepted for timestamps without an offset
const FLOATING_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];
/// How floating times are written back
const FLOATING_OUTPUT: &str = "%Y-%m-%dT%H:%M:%S%.3f";


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Timestamp {
    /// An instant
    Fixed(DateTime<Utc>),
    /// A wall-clock time, in whatever timezone it is looked at
    Floating(NaiveDateTime),
}

impl Timestamp {
    /// Parse a timestamp sent by the API.
    ///
    /// RFC 3339 strings are [`Fixed`](Self::Fixed). Strings without an offset (`2024-03-05T14:00`, with optional seconds and fraction) are [`Floating`](Self::Floating).
    pub fn parse(text: &str) -> Result<Self, chrono::ParseError> {
        let text = text.trim();
        match DateTime::parse_from_rfc3339(text) {
            Ok(dt) => Ok(Self::Fixed(dt.with_timezone(&Utc))),
            Err(err) => {
                for format in &FLOATING_FORMATS {
                    if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                        return Ok(Self::Floating(naive));
                    }
                }
                Err(err)
            }
        }
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, Self::Floating(_))
    }

    /// This timestamp, seen from `tz`.
    ///
    /// A floating time that does not exist in `tz` (it falls in a DST gap) is moved to the first one that does.
    /// An ambiguous one takes the earliest instant.
    pub fn in_timezone<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        match self {
            Self::Fixed(dt) => dt.with_timezone(tz),
            Self::Floating(naive) => resolve_local(tz, *naive)
                .unwrap_or_else(|| tz.from_utc_datetime(naive)),
        }
    }

    /// The instant this timestamp stands for, when it is seen from `tz`
    pub fn to_utc_in<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Utc> {
        self.in_timezone(tz).with_timezone(&Utc)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Fixed(dt)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(naive: NaiveDateTime) -> Self {
        Self::Floating(naive)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(dt) => write!(f, "{}", format_timestamp(dt)),
            Self::Floating(naive) => write!(f, "{}", naive.format(FLOATING_OUTPUT)),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(|err| serde::de::Error::custom(format!("invalid timestamp {:?}: {}", text, err)))
    }
}


/// The first instant at or after this local time that actually exists in `tz`
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    let mut candidate = local;
    for _ in 0..=MAX_GAP_HOURS {
        if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
            return Some(dt);
        }
        candidate = candidate + Duration::hours(1);
    }
    None
}
