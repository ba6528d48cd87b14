use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::trend_model::Trend;
use crate::errors::{Result, ValidationError};

/// Rejects estimator parameters that cannot produce a comparison.
pub fn validate_trend_parameters(depth: usize, smooth_avg: usize) -> Result<()> {
    if depth < 2 {
        return Err(ValidationError::invalid_parameter("depth", "must be at least 2").into());
    }
    if smooth_avg < 1 {
        return Err(ValidationError::invalid_parameter("smoothAvg", "must be at least 1").into());
    }
    Ok(())
}

/// Sums same-date values and returns them in ascending date order.
pub fn daily_series(values: &[(NaiveDate, Decimal)]) -> Vec<(NaiveDate, Decimal)> {
    let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for (date, value) in values {
        *by_date.entry(*date).or_insert(Decimal::ZERO) += *value;
    }
    by_date.into_iter().collect()
}

/// Classifies the most recent `depth + smooth_avg - 1` dated values.
///
/// The values are smoothed with a moving average of `smooth_avg`, the last
/// `depth` averages are accumulated, and each cumulative value is compared to
/// the previous one. The last comparison decides the trend.
pub fn estimate_trend(
    values: &[(NaiveDate, Decimal)],
    depth: usize,
    smooth_avg: usize,
) -> Result<Trend> {
    validate_trend_parameters(depth, smooth_avg)?;

    let series = daily_series(values);
    let required = depth + smooth_avg - 1;
    if series.len() < required {
        debug!(
            "Trend unknown: {} distinct date(s), {} required",
            series.len(),
            required
        );
        return Ok(Trend::Unknown);
    }

    let recent: Vec<Decimal> = series[series.len() - required..]
        .iter()
        .map(|(_, value)| *value)
        .collect();
    let window = Decimal::from(smooth_avg);
    let averages: Vec<Decimal> = recent
        .windows(smooth_avg)
        .map(|w| w.iter().copied().sum::<Decimal>() / window)
        .collect();

    let mut trend = Trend::Stable;
    let mut cumulative = Decimal::ZERO;
    let mut previous: Option<Decimal> = None;
    for average in averages.iter().skip(averages.len().saturating_sub(depth)) {
        cumulative += *average;
        if let Some(prev) = previous {
            trend = match cumulative.cmp(&prev) {
                Ordering::Greater => Trend::Up,
                Ordering::Less => Trend::Down,
                Ordering::Equal => Trend::Stable,
            };
        }
        previous = Some(cumulative);
    }

    Ok(trend)
}
