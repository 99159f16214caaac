use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// A contiguous run of calendar days starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub range_days: i64,
}

impl DateWindow {
    pub fn new(start: NaiveDate, range_days: i64) -> Self {
        Self { start, range_days }
    }

    /// Stops early if the window runs past the last representable date.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.range_days.max(0) as u64)
            .map_while(move |offset| start.checked_add_days(Days::new(offset)))
    }

    /// Last day inside the window, `None` when the window is empty or ends
    /// past the last representable date.
    pub fn end(&self) -> Option<NaiveDate> {
        let last = u64::try_from(self.range_days.checked_sub(1)?).ok()?;
        self.start.checked_add_days(Days::new(last))
    }
}

/// Per-day counters for one category. Keys are ISO dates, so the map's
/// ordering is chronological.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketMap {
    buckets: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

impl BucketMap {
    pub fn for_window(window: &DateWindow) -> Self {
        let buckets = window.days().map(|day| (date_key(day), 0)).collect();
        Self { buckets }
    }

    /// Adds one to the bucket for `date`. Returns `false` when the date lies
    /// outside the window.
    pub fn increment(&mut self, date: NaiveDate) -> bool {
        match self.buckets.get_mut(&date_key(date)) {
            Some(count) => {
                *count = count.saturating_add(1);
                true
            }
            None => false,
        }
    }

    pub fn set(&mut self, date: NaiveDate, value: u64) -> bool {
        match self.buckets.get_mut(&date_key(date)) {
            Some(count) => {
                *count = value;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.buckets.get(key).copied()
    }

    pub fn labels(&self) -> Vec<String> {
        self.buckets.keys().cloned().collect()
    }

    pub fn values(&self) -> Vec<u64> {
        self.buckets.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.buckets.iter().map(|(key, count)| (key.as_str(), *count))
    }

    pub fn to_series(&self) -> ChartSeries {
        ChartSeries {
            labels: self.labels(),
            data: self.values(),
        }
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
