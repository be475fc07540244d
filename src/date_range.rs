//! Date-shortcut resolution — "this week" and friends as concrete ranges.
//!
//! A shortcut never becomes an active field of its own: the filter set
//! normalizes it into the canonical `created_between` range field so the
//! panel never shows two representations of the same "created between"
//! filter. `resolve` is a pure mapping with `today` injected, so every
//! range is unit-testable against fixed dates.
//!
//! Calendar semantics: weeks run Monday–Sunday; `this-*` spans the whole
//! current calendar unit, `last-*` the whole previous one. "Last 2 weeks"
//! is a rolling 14-day window ending today.

use time::{Date, Duration, Month};

use crate::types::FieldValue;

/// A recognized preset date convenience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateShortcut {
    Today,
    ThisWeek,
    LastWeek,
    Last2Weeks,
    ThisMonth,
    LastMonth,
    ThisYear,
    LastYear,
}

/// A shortcut resolved against a concrete `today`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRange {
    pub start: Date,
    pub end: Date,
    pub label: &'static str,
}

impl ResolvedRange {
    /// The range as a filter-set value for `created_between`.
    pub fn into_value(self) -> FieldValue {
        FieldValue::Range {
            start: iso_date(self.start),
            end: iso_date(self.end),
            label: Some(self.label.to_string()),
        }
    }
}

impl DateShortcut {
    /// All shortcuts, in panel-menu order.
    pub const ALL: [DateShortcut; 8] = [
        Self::Today,
        Self::ThisWeek,
        Self::LastWeek,
        Self::Last2Weeks,
        Self::ThisMonth,
        Self::LastMonth,
        Self::ThisYear,
        Self::LastYear,
    ];

    /// Map a catalog field id to its shortcut, if it is one.
    pub fn from_field_id(id: &str) -> Option<Self> {
        match id {
            "created_today" => Some(Self::Today),
            "created_this_week" => Some(Self::ThisWeek),
            "created_last_week" => Some(Self::LastWeek),
            "created_last_2_weeks" => Some(Self::Last2Weeks),
            "created_this_month" => Some(Self::ThisMonth),
            "created_last_month" => Some(Self::LastMonth),
            "created_this_year" => Some(Self::ThisYear),
            "created_last_year" => Some(Self::LastYear),
            _ => None,
        }
    }

    pub fn field_id(self) -> &'static str {
        match self {
            Self::Today => "created_today",
            Self::ThisWeek => "created_this_week",
            Self::LastWeek => "created_last_week",
            Self::Last2Weeks => "created_last_2_weeks",
            Self::ThisMonth => "created_this_month",
            Self::LastMonth => "created_last_month",
            Self::ThisYear => "created_this_year",
            Self::LastYear => "created_last_year",
        }
    }

    /// The label carried into the resolved range value.
    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "Created Today",
            Self::ThisWeek => "Created This Week",
            Self::LastWeek => "Created Last Week",
            Self::Last2Weeks => "Created Last 2 Weeks",
            Self::ThisMonth => "Created This Month",
            Self::LastMonth => "Created Last Month",
            Self::ThisYear => "Created This Year",
            Self::LastYear => "Created Last Year",
        }
    }

    /// Resolve the shortcut into a concrete inclusive date range.
    pub fn resolve(self, today: Date) -> ResolvedRange {
        let (start, end) = match self {
            Self::Today => (today, today),
            Self::ThisWeek => {
                let monday = week_start(today);
                (monday, monday + Duration::days(6))
            }
            Self::LastWeek => {
                let monday = week_start(today) - Duration::days(7);
                (monday, monday + Duration::days(6))
            }
            Self::Last2Weeks => (today - Duration::days(14), today),
            Self::ThisMonth => month_span(today.year(), today.month()),
            Self::LastMonth => {
                let (year, month) = match today.month() {
                    Month::January => (today.year() - 1, Month::December),
                    m => (today.year(), m.previous()),
                };
                month_span(year, month)
            }
            Self::ThisYear => year_span(today.year()),
            Self::LastYear => year_span(today.year() - 1),
        };
        ResolvedRange {
            start,
            end,
            label: self.label(),
        }
    }
}

/// The Monday of the week containing `date`.
fn week_start(date: Date) -> Date {
    date - Duration::days(i64::from(date.weekday().number_days_from_monday()))
}

fn month_span(year: i32, month: Month) -> (Date, Date) {
    let first = Date::from_calendar_date(year, month, 1).expect("day 1 always valid");
    let last = Date::from_calendar_date(year, month, time::util::days_in_month(month, year))
        .expect("last day of month valid");
    (first, last)
}

fn year_span(year: i32) -> (Date, Date) {
    (
        Date::from_calendar_date(year, Month::January, 1).expect("jan 1 valid"),
        Date::from_calendar_date(year, Month::December, 31).expect("dec 31 valid"),
    )
}

/// ISO `yyyy-mm-dd` rendering.
pub fn iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Today's date (UTC). Mutation paths that need determinism take a `Date`
/// argument instead of calling this.
pub fn today_utc() -> Date {
    time::OffsetDateTime::now_utc().date()
}
