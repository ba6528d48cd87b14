use chrono::{DateTime, NaiveDate, Utc};

/// Whole days elapsed from `start` to `end`. Negative spans clamp to zero.
pub fn days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_days().max(0)
}

/// Calendar date (UTC) of an instant.
pub fn calendar_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}
