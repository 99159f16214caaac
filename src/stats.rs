use crate::window::BucketMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateError {
    #[error("division by zero")]
    DivisionByZero,
}

pub fn sum(map: &BucketMap) -> u64 {
    map.iter()
        .fold(0u64, |total, (_, count)| total.saturating_add(count))
}

/// Mean per day over the whole window; empty days count toward the
/// denominator.
pub fn average(map: &BucketMap, window_days: u64) -> Result<f64, AggregateError> {
    if window_days == 0 {
        return Err(AggregateError::DivisionByZero);
    }
    Ok(sum(map) as f64 / window_days as f64)
}

pub fn ratio(numerator: &BucketMap, denominator: &BucketMap) -> Result<f64, AggregateError> {
    let denom = sum(denominator);
    if denom == 0 {
        return Err(AggregateError::DivisionByZero);
    }
    Ok(sum(numerator) as f64 / denom as f64)
}
