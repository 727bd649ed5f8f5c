//! Calendar period partitioning.
//!
//! Splits an inclusive date range into ordered, contiguous periods aligned to
//! calendar weeks (Monday to Sunday) or months. The first period contains the
//! range start, the last contains the range end, and each period starts the
//! day after the previous one ends.
//!
//! Dates whose week or month runs past either end of chrono's calendar yield
//! [`SyncError::OutOfCalendar`].

use chrono::{Datelike, Days, NaiveDate};

use super::period::{first_day_of_month, last_day_of_month, Period, PeriodKind};
use crate::error::{SyncError, SyncResult};

/// Partition `[start, end]` into calendar periods of `kind`.
pub fn partition(start: NaiveDate, end: NaiveDate, kind: PeriodKind) -> SyncResult<Vec<Period>> {
    match kind {
        PeriodKind::Weekly => weekly_periods(start, end),
        PeriodKind::Monthly => monthly_periods(start, end),
    }
}

/// Same as [`partition`], with the kind given by name (`"weekly"`, `"monthly"`).
///
/// The range is checked before the kind.
pub fn partition_named(start: NaiveDate, end: NaiveDate, kind: &str) -> SyncResult<Vec<Period>> {
    ensure_ordered(start, end)?;
    partition(start, end, kind.parse()?)
}

pub fn weekly_periods(start: NaiveDate, end: NaiveDate) -> SyncResult<Vec<Period>> {
    ensure_ordered(start, end)?;
    walk(start, end, week_period_of)
}

/// Monthly periods from `start` through the month containing `end`.
///
/// When `start` and `end` are in different calendar months, `end` is first
/// rounded up to the last day of its month so the final period closes out
/// a full month.
pub fn monthly_periods(start: NaiveDate, end: NaiveDate) -> SyncResult<Vec<Period>> {
    ensure_ordered(start, end)?;

    let end = if (start.year(), start.month()) != (end.year(), end.month()) {
        last_day_of_month(end).ok_or(SyncError::OutOfCalendar { date: end })?
    } else {
        end
    };

    walk(start, end, month_period_of)
}

/// The Monday-to-Sunday week containing `date`.
pub fn week_period_of(date: NaiveDate) -> SyncResult<Period> {
    let offset = Days::new(u64::from(date.weekday().num_days_from_monday()));
    date.checked_sub_days(offset)
        .and_then(|start| Some(Period::new(start, start.checked_add_days(Days::new(6))?)))
        .ok_or(SyncError::OutOfCalendar { date })
}

/// The calendar month containing `date`.
pub fn month_period_of(date: NaiveDate) -> SyncResult<Period> {
    last_day_of_month(date)
        .map(|end| Period::new(first_day_of_month(date), end))
        .ok_or(SyncError::OutOfCalendar { date })
}

fn ensure_ordered(start: NaiveDate, end: NaiveDate) -> SyncResult<()> {
    if start > end {
        return Err(SyncError::Range { start, end });
    }
    Ok(())
}

fn walk(
    start: NaiveDate,
    end: NaiveDate,
    period_of: fn(NaiveDate) -> SyncResult<Period>,
) -> SyncResult<Vec<Period>> {
    let mut periods = Vec::new();
    let mut cursor = Some(start);

    while let Some(day) = cursor.filter(|day| *day <= end) {
        let period = period_of(day)?;
        periods.push(period);
        cursor = period.end.succ_opt();
    }

    Ok(periods)
}
