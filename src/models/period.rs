//! Report period representation
//!
//! A period is the time granularity of a rollup: a single day, a week
//! bucket inside a month, a calendar month, or a calendar year.
//!
//! Weeks are not ISO weeks. Every month is cut into four buckets: days 1-7,
//! 8-14, 15-21, and 22 to the end of the month, so the last bucket holds
//! between 7 and 10 days and a bucket never straddles two months.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of week buckets in every month
pub const WEEKS_PER_MONTH: u32 = 4;

/// Granularity of a period, without its position in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Day,
    Week,
    Month,
    Year,
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        };
        f.write_str(name)
    }
}

/// Represents a report period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ReportPeriod {
    /// A single day (e.g., "2025-01-15")
    Day { date: NaiveDate },

    /// A week bucket inside a month (e.g., "2025-01-W2")
    Week { year: i32, month: u32, index: u32 },

    /// A calendar month (e.g., "2025-01")
    Month { year: i32, month: u32 },

    /// A calendar year (e.g., "2025")
    Year { year: i32 },
}

impl ReportPeriod {
    /// Create a day period
    pub fn day(date: NaiveDate) -> Self {
        Self::Day { date }
    }

    /// Create a week bucket period
    ///
    /// Returns `None` if the year, month or bucket index is out of range.
    pub fn week(year: i32, month: u32, index: u32) -> Option<Self> {
        if !is_valid_year(year)
            || !(1..=12).contains(&month)
            || !(1..=WEEKS_PER_MONTH).contains(&index)
        {
            return None;
        }
        Some(Self::Week { year, month, index })
    }

    /// Create a monthly period
    ///
    /// Returns `None` if the year or month is out of range.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        if !is_valid_year(year) || !(1..=12).contains(&month) {
            return None;
        }
        Some(Self::Month { year, month })
    }

    /// Create a yearly period
    ///
    /// Returns `None` unless every day of the year is a representable date.
    pub fn year(year: i32) -> Option<Self> {
        is_valid_year(year).then_some(Self::Year { year })
    }

    /// The week bucket containing a date
    pub fn week_of(date: NaiveDate) -> Self {
        let index = ((date.day() - 1) / 7 + 1).min(WEEKS_PER_MONTH);
        Self::Week {
            year: date.year(),
            month: date.month(),
            index,
        }
    }

    /// The month containing a date
    pub fn month_of(date: NaiveDate) -> Self {
        Self::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Today as a day period
    pub fn today() -> Self {
        Self::day(chrono::Local::now().date_naive())
    }

    /// The current week bucket
    pub fn current_week() -> Self {
        Self::week_of(chrono::Local::now().date_naive())
    }

    /// The current month
    pub fn current_month() -> Self {
        Self::month_of(chrono::Local::now().date_naive())
    }

    /// The current year
    pub fn current_year() -> Self {
        Self::Year {
            year: chrono::Local::now().date_naive().year(),
        }
    }

    /// The granularity of this period
    pub fn kind(&self) -> PeriodKind {
        match self {
            Self::Day { .. } => PeriodKind::Day,
            Self::Week { .. } => PeriodKind::Week,
            Self::Month { .. } => PeriodKind::Month,
            Self::Year { .. } => PeriodKind::Year,
        }
    }

    /// Get the start date of this period
    pub fn start_date(&self) -> NaiveDate {
        match self {
            Self::Day { date } => *date,
            Self::Week { year, month, index } => first_of_month(*year, *month)
                .checked_add_signed(Duration::days(i64::from(index.saturating_sub(1)) * 7))
                .unwrap_or(NaiveDate::MIN),
            Self::Month { year, month } => first_of_month(*year, *month),
            Self::Year { year } => first_of_month(*year, 1),
        }
    }

    /// Get the end date of this period (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        match self {
            Self::Day { date } => *date,
            Self::Week { year, month, index } => {
                if *index >= WEEKS_PER_MONTH {
                    last_of_month(*year, *month)
                } else {
                    self.start_date() + Duration::days(6)
                }
            }
            Self::Month { year, month } => last_of_month(*year, *month),
            Self::Year { year } => last_of_month(*year, 12),
        }
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Every day of this period, in order
    pub fn days(&self) -> Vec<NaiveDate> {
        let end = self.end_date();
        std::iter::successors(Some(self.start_date()), |d| d.succ_opt())
            .take_while(|d| *d <= end)
            .collect()
    }

    /// The sub-periods this period rolls up from
    ///
    /// Years split into months, months into week buckets, week buckets into
    /// days. A day has no children.
    pub fn children(&self) -> Vec<ReportPeriod> {
        match self {
            Self::Day { .. } => Vec::new(),
            Self::Week { .. } => self.days().into_iter().map(Self::day).collect(),
            Self::Month { year, month } => (1..=WEEKS_PER_MONTH)
                .map(|index| Self::Week {
                    year: *year,
                    month: *month,
                    index,
                })
                .collect(),
            Self::Year { year } => (1..=12)
                .map(|month| Self::Month { year: *year, month })
                .collect(),
        }
    }

    /// Get the next period of the same kind
    ///
    /// Returns `None` past the last representable date.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Day { date } => date.succ_opt().map(Self::day),
            Self::Week { year, month, index } => {
                if *index < WEEKS_PER_MONTH {
                    Self::week(*year, *month, index + 1)
                } else {
                    let (year, month) = next_month(*year, *month)?;
                    Self::week(year, month, 1)
                }
            }
            Self::Month { year, month } => {
                let (year, month) = next_month(*year, *month)?;
                Self::month(year, month)
            }
            Self::Year { year } => Self::year(year.checked_add(1)?),
        }
    }

    /// Get the previous period of the same kind
    ///
    /// Returns `None` before the first representable date.
    pub fn prev(&self) -> Option<Self> {
        match self {
            Self::Day { date } => date.pred_opt().map(Self::day),
            Self::Week { year, month, index } => {
                if *index > 1 {
                    Self::week(*year, *month, index - 1)
                } else {
                    let (year, month) = prev_month(*year, *month)?;
                    Self::week(year, month, WEEKS_PER_MONTH)
                }
            }
            Self::Month { year, month } => {
                let (year, month) = prev_month(*year, *month)?;
                Self::month(year, month)
            }
            Self::Year { year } => Self::year(year.checked_sub(1)?),
        }
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Day: "2025-01-15"
    /// - Week bucket: "2025-01-W2"
    /// - Month: "2025-01"
    /// - Year: "2025"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        let parts: Vec<&str> = s.split('-').collect();
        match parts.as_slice() {
            [year] => {
                let year = parse_year(year, s)?;
                Ok(Self::Year { year })
            }
            [year, month] => {
                let year = parse_year(year, s)?;
                let month: u32 = month.parse().map_err(|_| invalid())?;
                Self::month(year, month).ok_or(PeriodParseError::InvalidMonth(month))
            }
            [year, month, third] => {
                if let Some(week) = third.strip_prefix(['W', 'w']) {
                    let year = parse_year(year, s)?;
                    let month: u32 = month.parse().map_err(|_| invalid())?;
                    let index: u32 = week.parse().map_err(|_| invalid())?;
                    if !(1..=12).contains(&month) {
                        return Err(PeriodParseError::InvalidMonth(month));
                    }
                    return Self::week(year, month, index)
                        .ok_or(PeriodParseError::InvalidWeek(index));
                }
                let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())?;
                Ok(Self::day(date))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day { date } => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Week { year, month, index } => {
                write!(f, "{:04}-{:02}-W{}", year, month, index)
            }
            Self::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Year { year } => write!(f, "{:04}", year),
        }
    }
}

impl Ord for ReportPeriod {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start_date()
            .cmp(&other.start_date())
            .then_with(|| self.end_date().cmp(&other.end_date()))
    }
}

impl PartialOrd for ReportPeriod {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Whether every day of `year` is a date chrono can represent
fn is_valid_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 1, 1).is_some() && NaiveDate::from_ymd_opt(year, 12, 31).is_some()
}

fn parse_year(year: &str, input: &str) -> Result<i32, PeriodParseError> {
    if year.is_empty() || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PeriodParseError::InvalidFormat(input.to_string()));
    }
    match year.parse::<i32>() {
        Ok(value) if is_valid_year(value) => Ok(value),
        _ => Err(PeriodParseError::InvalidYear(year.to_string())),
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

fn last_of_month(year: i32, month: u32) -> NaiveDate {
    if month >= 12 {
        return NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX);
    }
    first_of_month(year, month + 1)
        .pred_opt()
        .unwrap_or(NaiveDate::MAX)
}

fn next_month(year: i32, month: u32) -> Option<(i32, u32)> {
    if month >= 12 {
        Some((year.checked_add(1)?, 1))
    } else {
        Some((year, month + 1))
    }
}

fn prev_month(year: i32, month: u32) -> Option<(i32, u32)> {
    if month <= 1 {
        Some((year.checked_sub(1)?, 12))
    } else {
        Some((year, month - 1))
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidYear(String),
    InvalidMonth(u32),
    InvalidWeek(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidYear(y) => write!(f, "Year out of range: {}", y),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::InvalidWeek(w) => {
                write!(f, "Invalid week: {} (expected 1-{})", w, WEEKS_PER_MONTH)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_period() {
        let period = ReportPeriod::month(2025, 2).unwrap();
        assert_eq!(period.start_date(), date(2025, 2, 1));
        assert_eq!(period.end_date(), date(2025, 2, 28));
        assert_eq!(period.days().len(), 28);
    }

    #[test]
    fn test_week_buckets() {
        let w1 = ReportPeriod::week(2025, 1, 1).unwrap();
        assert_eq!(w1.start_date(), date(2025, 1, 1));
        assert_eq!(w1.end_date(), date(2025, 1, 7));

        let w3 = ReportPeriod::week(2025, 1, 3).unwrap();
        assert_eq!(w3.start_date(), date(2025, 1, 15));
        assert_eq!(w3.end_date(), date(2025, 1, 21));
    }

    #[test]
    fn test_last_week_bucket_extends_to_month_end() {
        let jan = ReportPeriod::week(2025, 1, 4).unwrap();
        assert_eq!(jan.start_date(), date(2025, 1, 22));
        assert_eq!(jan.end_date(), date(2025, 1, 31));
        assert_eq!(jan.days().len(), 10);

        let feb = ReportPeriod::week(2025, 2, 4).unwrap();
        assert_eq!(feb.end_date(), date(2025, 2, 28));
        assert_eq!(feb.days().len(), 7);

        let leap = ReportPeriod::week(2024, 2, 4).unwrap();
        assert_eq!(leap.end_date(), date(2024, 2, 29));
    }

    #[test]
    fn test_week_buckets_cover_month_exactly_once() {
        for month in 1..=12 {
            let period = ReportPeriod::month(2024, month).unwrap();
            let mut covered: Vec<NaiveDate> = period
                .children()
                .iter()
                .flat_map(|w| w.days())
                .collect();
            covered.sort();
            assert_eq!(covered, period.days(), "month {}", month);
        }
    }

    #[test]
    fn test_week_of() {
        assert_eq!(
            ReportPeriod::week_of(date(2025, 3, 7)),
            ReportPeriod::week(2025, 3, 1).unwrap()
        );
        assert_eq!(
            ReportPeriod::week_of(date(2025, 3, 8)),
            ReportPeriod::week(2025, 3, 2).unwrap()
        );
        assert_eq!(
            ReportPeriod::week_of(date(2025, 3, 31)),
            ReportPeriod::week(2025, 3, 4).unwrap()
        );
    }

    #[test]
    fn test_invalid_constructors() {
        assert!(ReportPeriod::month(2025, 13).is_none());
        assert!(ReportPeriod::week(2025, 1, 5).is_none());
        assert!(ReportPeriod::week(2025, 0, 1).is_none());
    }

    #[test]
    fn test_year_children() {
        let children = ReportPeriod::year(2025).unwrap().children();
        assert_eq!(children.len(), 12);
        assert_eq!(children[0], ReportPeriod::month(2025, 1).unwrap());
        assert_eq!(children[11], ReportPeriod::month(2025, 12).unwrap());
        assert!(ReportPeriod::day(date(2025, 1, 1)).children().is_empty());
    }

    #[test]
    fn test_navigation() {
        let dec = ReportPeriod::month(2024, 12).unwrap();
        let jan = dec.next().unwrap();
        assert_eq!(jan, ReportPeriod::month(2025, 1).unwrap());
        assert_eq!(jan.prev(), Some(dec));

        let last_week = ReportPeriod::week(2025, 1, 4).unwrap();
        assert_eq!(last_week.next(), ReportPeriod::week(2025, 2, 1));
        assert_eq!(
            ReportPeriod::week(2025, 1, 1).unwrap().prev(),
            ReportPeriod::week(2024, 12, 4)
        );

        let day = ReportPeriod::day(date(2025, 2, 28));
        assert_eq!(day.next(), Some(ReportPeriod::day(date(2025, 3, 1))));
        assert_eq!(
            ReportPeriod::year(2025).unwrap().prev(),
            ReportPeriod::year(2024)
        );
    }

    #[test]
    fn test_navigation_stops_at_calendar_limits() {
        let last_year = NaiveDate::MAX.year();
        let first_year = NaiveDate::MIN.year();

        assert_eq!(ReportPeriod::year(last_year).unwrap().next(), None);
        assert_eq!(ReportPeriod::month(last_year, 12).unwrap().next(), None);
        assert_eq!(ReportPeriod::week(last_year, 12, 4).unwrap().next(), None);
        assert_eq!(ReportPeriod::day(NaiveDate::MAX).next(), None);
        assert_eq!(ReportPeriod::year(first_year).unwrap().prev(), None);
        assert_eq!(ReportPeriod::week(first_year, 1, 1).unwrap().prev(), None);

        let dec = ReportPeriod::month(last_year, 12).unwrap();
        assert_eq!(dec.end_date(), NaiveDate::MAX);
        assert_eq!(dec.days().len(), 31);
    }

    #[test]
    fn test_out_of_range_years() {
        assert!(ReportPeriod::year(300_000).is_none());
        assert!(ReportPeriod::year(i32::MAX).is_none());
        assert!(ReportPeriod::month(i32::MIN, 1).is_none());
        assert!(ReportPeriod::week(300_000, 1, 1).is_none());

        assert_eq!(
            ReportPeriod::parse("300000"),
            Err(PeriodParseError::InvalidYear("300000".into()))
        );
        assert_eq!(
            ReportPeriod::parse("2147483647"),
            Err(PeriodParseError::InvalidYear("2147483647".into()))
        );
        assert_eq!(
            ReportPeriod::parse("99999999999"),
            Err(PeriodParseError::InvalidYear("99999999999".into()))
        );
        assert!(matches!(
            ReportPeriod::parse("300000-01"),
            Err(PeriodParseError::InvalidYear(_))
        ));
        assert!(matches!(
            ReportPeriod::parse("300000-01-W1"),
            Err(PeriodParseError::InvalidYear(_))
        ));
        assert!(matches!(
            ReportPeriod::parse("+2025"),
            Err(PeriodParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_contains() {
        let jan = ReportPeriod::month(2025, 1).unwrap();
        assert!(jan.contains(date(2025, 1, 15)));
        assert!(!jan.contains(date(2025, 2, 1)));

        let year = ReportPeriod::year(2025).unwrap();
        assert!(year.contains(date(2025, 12, 31)));
        assert!(!year.contains(date(2024, 12, 31)));
    }

    #[test]
    fn test_parse() {
        assert_eq!(ReportPeriod::parse("2025").unwrap(), ReportPeriod::year(2025).unwrap());
        assert_eq!(
            ReportPeriod::parse("2025-01").unwrap(),
            ReportPeriod::month(2025, 1).unwrap()
        );
        assert_eq!(
            ReportPeriod::parse("2025-01-W2").unwrap(),
            ReportPeriod::week(2025, 1, 2).unwrap()
        );
        assert_eq!(
            ReportPeriod::parse(" 2025-01-15 ").unwrap(),
            ReportPeriod::day(date(2025, 1, 15))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            ReportPeriod::parse("2025-13"),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert_eq!(
            ReportPeriod::parse("2025-01-W5"),
            Err(PeriodParseError::InvalidWeek(5))
        );
        assert!(ReportPeriod::parse("2025-02-30").is_err());
        assert!(ReportPeriod::parse("last month").is_err());
        assert!(ReportPeriod::parse("").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let periods = [
            ReportPeriod::year(2025).unwrap(),
            ReportPeriod::month(2025, 3).unwrap(),
            ReportPeriod::week(2025, 3, 4).unwrap(),
            ReportPeriod::day(date(2025, 3, 9)),
        ];
        for period in periods {
            assert_eq!(ReportPeriod::parse(&period.to_string()).unwrap(), period);
        }
        assert_eq!(ReportPeriod::week(2025, 3, 4).unwrap().to_string(), "2025-03-W4");
    }

    #[test]
    fn test_ordering() {
        let mut periods = vec![
            ReportPeriod::month(2025, 2).unwrap(),
            ReportPeriod::day(date(2025, 1, 3)),
            ReportPeriod::month(2025, 1).unwrap(),
        ];
        periods.sort();
        assert_eq!(periods[0], ReportPeriod::month(2025, 1).unwrap());
        assert_eq!(periods[1], ReportPeriod::day(date(2025, 1, 3)));
    }
}
