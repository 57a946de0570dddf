use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::format::format_date;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PeriodError {
    #[error("Start date {start} is after end date {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
    #[error("A period must span at least one day")]
    NoDays,
    #[error("Local time {0} does not exist in the configured timezone")]
    NonexistentLocalTime(NaiveDateTime),
    #[error("Date out of range")]
    OutOfRange,
}

/// Dashboard period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    /// Monday through Sunday of the current week.
    ThisWeek,
    ThisMonth,
    /// The last `n` days, today included.
    LastDays(u32),
    Custom { start: NaiveDate, end: NaiveDate },
}

/// An inclusive range of instants in the store's timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

fn localize(tz: Tz, at: NaiveDateTime) -> Result<DateTime<Tz>, PeriodError> {
    tz.from_local_datetime(&at)
        .earliest()
        .ok_or(PeriodError::NonexistentLocalTime(at))
}

fn sub_days(date: NaiveDate, days: u64) -> Result<NaiveDate, PeriodError> {
    date.checked_sub_days(Days::new(days)).ok_or(PeriodError::OutOfRange)
}

fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate, PeriodError> {
    date.checked_add_days(Days::new(days)).ok_or(PeriodError::OutOfRange)
}

impl DateRange {
    /// From the start of `first` to the last millisecond of `last`.
    pub fn days(first: NaiveDate, last: NaiveDate, tz: Tz) -> Result<Self, PeriodError> {
        if first > last {
            return Err(PeriodError::StartAfterEnd { start: first, end: last });
        }
        Ok(Self {
            start: localize(tz, first.and_time(NaiveTime::MIN))?,
            end: localize(tz, last.and_time(end_of_day()))?,
        })
    }

    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        *at >= self.start.with_timezone(&Utc) && *at <= self.end.with_timezone(&Utc)
    }

    /// Whole days covered, rounding a partial day up.
    pub fn day_count(&self) -> u64 {
        let millis = (self.end - self.start).num_milliseconds().max(0) as u64;
        millis.div_ceil(86_400_000)
    }

    /// The range of the same length immediately before this one, for the
    /// period comparison.
    pub fn previous(&self) -> Result<Self, PeriodError> {
        let days = self.day_count();
        let tz = self.start.timezone();
        let shift = |at: &DateTime<Tz>| -> Result<DateTime<Tz>, PeriodError> {
            let local = at.naive_local();
            localize(tz, sub_days(local.date(), days)?.and_time(local.time()))
        };
        Ok(Self {
            start: shift(&self.start)?,
            end: shift(&self.end)?,
        })
    }
}

impl Period {
    /// Resolves the period against `today` in the store timezone.
    pub fn range(&self, today: NaiveDate, tz: Tz) -> Result<DateRange, PeriodError> {
        match *self {
            Period::Today => DateRange::days(today, today, tz),
            Period::ThisWeek => {
                let monday = sub_days(today, u64::from(today.weekday().num_days_from_monday()))?;
                DateRange::days(monday, add_days(monday, 6)?, tz)
            }
            Period::ThisMonth => {
                let first = today.with_day(1).ok_or(PeriodError::OutOfRange)?;
                let next_month = first
                    .checked_add_months(chrono::Months::new(1))
                    .ok_or(PeriodError::OutOfRange)?;
                DateRange::days(first, sub_days(next_month, 1)?, tz)
            }
            Period::LastDays(0) => Err(PeriodError::NoDays),
            Period::LastDays(n) => DateRange::days(sub_days(today, u64::from(n - 1))?, today, tz),
            Period::Custom { start, end } => DateRange::days(start, end, tz),
        }
    }

    /// Heading shown above the dashboard.
    pub fn label(&self, range: &DateRange) -> String {
        let from = format_date(&range.start);
        let to = format_date(&range.end);
        match self {
            Period::Today => format!("Hoje - {}", from),
            Period::ThisWeek => format!("Esta Semana - {} a {}", from, to),
            Period::ThisMonth => format!("Este Mês - {} a {}", from, to),
            Period::LastDays(n) => format!("Últimos {} Dias - {} a {}", n, from, to),
            Period::Custom { .. } => format!("{} a {}", from, to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Sao_Paulo;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_starts_on_monday() {
        // 2024-05-05 is a Sunday.
        let range = Period::ThisWeek.range(date(2024, 5, 5), Sao_Paulo).unwrap();
        assert_eq!(range.start.date_naive(), date(2024, 4, 29));
        assert_eq!(range.end.date_naive(), date(2024, 5, 5));
        assert_eq!(Period::ThisWeek.label(&range), "Esta Semana - 29/04/2024 a 05/05/2024");
    }

    #[test]
    fn month_covers_every_day() {
        let range = Period::ThisMonth.range(date(2024, 2, 14), Sao_Paulo).unwrap();
        assert_eq!(range.start.date_naive(), date(2024, 2, 1));
        assert_eq!(range.end.date_naive(), date(2024, 2, 29));
        assert_eq!(range.end.time(), end_of_day());
    }

    #[test]
    fn last_days_includes_today() {
        let range = Period::LastDays(7).range(date(2024, 5, 10), Sao_Paulo).unwrap();
        assert_eq!(range.start.date_naive(), date(2024, 5, 4));
        assert_eq!(range.day_count(), 7);
        assert_eq!(Period::LastDays(0).range(date(2024, 5, 10), Sao_Paulo), Err(PeriodError::NoDays));
    }

    #[test]
    fn custom_range_is_checked_and_extended() {
        let period = Period::Custom {
            start: date(2024, 1, 10),
            end: date(2024, 1, 12),
        };
        let range = period.range(date(2024, 6, 1), Sao_Paulo).unwrap();
        assert_eq!(range.end.time(), end_of_day());
        assert_eq!(period.label(&range), "10/01/2024 a 12/01/2024");

        let reversed = Period::Custom {
            start: date(2024, 1, 12),
            end: date(2024, 1, 10),
        };
        assert!(matches!(
            reversed.range(date(2024, 6, 1), Sao_Paulo),
            Err(PeriodError::StartAfterEnd { .. })
        ));
    }

    #[test]
    fn previous_range_has_the_same_length() {
        let today = Period::Today.range(date(2024, 5, 10), Sao_Paulo).unwrap();
        let yesterday = today.previous().unwrap();
        assert_eq!(yesterday.start.date_naive(), date(2024, 5, 9));
        assert_eq!(yesterday.end.date_naive(), date(2024, 5, 9));

        let week = Period::ThisWeek.range(date(2024, 5, 8), Sao_Paulo).unwrap();
        let before = week.previous().unwrap();
        assert_eq!(before.start.date_naive(), date(2024, 4, 29));
        assert_eq!(before.end.date_naive(), date(2024, 5, 5));
    }

    #[test]
    fn contains_is_inclusive_and_timezone_aware() {
        let range = Period::Today.range(date(2024, 5, 10), Sao_Paulo).unwrap();
        // Midnight in São Paulo is 03:00 UTC.
        let start = Utc.with_ymd_and_hms(2024, 5, 10, 3, 0, 0).unwrap();
        assert!(range.contains(&start));
        assert!(!range.contains(&(start - chrono::Duration::seconds(1))));
    }
}
