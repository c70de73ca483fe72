//! The month view of the agenda
//!
//! A month is displayed as 6 full weeks starting on a Monday (see [`build_grid`]).
//! Events can be moved to another day of the grid (see [`reschedule`]), typically by dragging them (see [`drag`]).

pub mod drag;
mod reschedule;
pub use reschedule::{reschedule, EventUpdate, RescheduleIntent};

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, TimeZone};

use crate::event::Event;
use crate::BoxError;

/// The number of days in a grid: 6 weeks
pub const GRID_CELLS: usize = 42;
/// The number of days in a row of the grid
pub const WEEK_LENGTH: usize = 7;

/// The years that can be displayed
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;


/// A calendar month of a given year
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns `None` if `month` is not in `1..=12`, or if the year is out of the supported range (1 to 9999)
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if year < MIN_YEAR || year > MAX_YEAR || month < 1 || month > 12 {
            return None;
        }
        Some(Self { year, month })
    }

    /// The month a date belongs to, e.g. the default reference month is the one containing today
    pub fn containing(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    pub fn year(&self) -> i32  { self.year }
    pub fn month(&self) -> u32 { self.month }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap(/* cannot fail, the year and month have been checked at construction */)
    }

    pub fn last_day(&self) -> NaiveDate {
        match self.succ() {
            Some(next) => next.first_day() - Duration::days(1),
            None => NaiveDate::from_ymd_opt(self.year, 12, 31).unwrap(/* the year has been checked at construction */),
        }
    }

    pub fn num_days(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The next month, if it is still in the supported range
    pub fn succ(&self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// The previous month, if it is still in the supported range
    pub fn pred(&self) -> Option<Self> {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = BoxError;

    /// Parse a `YYYY-MM` string
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(2, '-');
        let year = parts.next().unwrap_or_default();
        let month = match parts.next() {
            None => return Err(format!("Expected a YYYY-MM month, got {:?}", s).into()),
            Some(m) => m,
        };
        let year: i32 = year.parse()?;
        let month: u32 = month.parse()?;
        match Self::new(year, month) {
            None => Err(format!("Invalid month {:?}", s).into()),
            Some(ym) => Ok(ym),
        }
    }
}


/// A day of the grid, and the events that start on that day
#[derive(Clone, Debug, PartialEq)]
pub struct DayCell<'a> {
    date: NaiveDate,
    in_month: bool,
    events: Vec<&'a Event>,
}

impl<'a> DayCell<'a> {
    pub fn date(&self) -> NaiveDate       { self.date }
    /// Whether this day belongs to the displayed month (the other ones are leading or trailing days)
    pub fn in_month(&self) -> bool        { self.in_month }
    /// Events starting on this day, in the order they have been given to [`build_grid`]
    pub fn events(&self) -> &[&'a Event]  { &self.events }
}


/// A month as 6 weeks of 7 days, always starting on a Monday
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarGrid<'a> {
    month: YearMonth,
    cells: Vec<DayCell<'a>>,
}

impl<'a> CalendarGrid<'a> {
    pub fn month(&self) -> YearMonth       { self.month }
    /// The [`GRID_CELLS`] days, in chronological order
    pub fn cells(&self) -> &[DayCell<'a>]  { &self.cells }

    /// The rows of the grid, each from Monday to Sunday
    pub fn weeks(&self) -> std::slice::Chunks<'_, DayCell<'a>> {
        self.cells.chunks(WEEK_LENGTH)
    }

    pub fn first_day(&self) -> NaiveDate {
        self.cells[0].date
    }

    pub fn last_day(&self) -> NaiveDate {
        self.cells[GRID_CELLS - 1].date
    }

    /// The cell of a given date, if it is displayed
    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell<'a>> {
        cell_index(self.first_day(), date).map(|i| &self.cells[i])
    }
}

fn cell_index(first_day: NaiveDate, date: NaiveDate) -> Option<usize> {
    let offset = (date - first_day).num_days();
    if offset < 0 || offset >= GRID_CELLS as i64 {
        None
    } else {
        Some(offset as usize)
    }
}

/// The first day of the grid of a month: the Monday on or before the 1st
pub fn grid_start(month: YearMonth) -> NaiveDate {
    let first = month.first_day();
    // Monday is 1, Sunday is 7
    let days_since_monday = first.weekday().number_from_monday() - 1;
    first - Duration::days(days_since_monday as i64)
}

/// Lay out `events` in the 6-week grid of `month`.
///
/// An event is placed on the day its start falls on, in the `viewer` timezone. Its end does not matter.
/// A start without an offset is a wall-clock time of `viewer`, it is placed on its own date.
/// Events that start outside of the grid are not displayed.
///
/// The 1st of a month is at most the 7th cell, and a month has at most 31 days: the grid always shows the whole month.
pub fn build_grid<'a, Tz: TimeZone>(events: &'a [Event], month: YearMonth, viewer: &Tz) -> CalendarGrid<'a> {
    let first_day = grid_start(month);

    let mut cells: Vec<DayCell<'a>> = (0..GRID_CELLS)
        .map(|offset| {
            let date = first_day + Duration::days(offset as i64);
            DayCell { date, in_month: month.contains(date), events: Vec::new() }
        })
        .collect();

    for event in events {
        let start_date = event.start_in(viewer).date_naive();
        if let Some(i) = cell_index(first_day, start_date) {
            cells[i].events.push(event);
        }
    }

    CalendarGrid { month, cells }
}
