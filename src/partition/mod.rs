//! # Date Period Partitioning
//!
//! Pure functions that turn an inclusive date range into calendar-aligned
//! windows for incremental delivery.

mod partitioner;
mod period;

pub use partitioner::{
    month_period_of, monthly_periods, partition, partition_named, week_period_of, weekly_periods,
};
pub use period::{
    days_in_month, first_day_of_month, last_day_of_month, parse_date_str, Period,
    PeriodKind,
};
