use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucket {
    /// Interval boundary, aligned to the Unix epoch
    pub start: DateTime<Utc>,
    pub count: u64,
    /// Sum of the values carried by the points; `None` if none carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
}

/// Floor each timestamp to an `interval` boundary and accumulate per bucket.
///
/// Buckets come back sorted ascending by start. A non-positive interval
/// yields no buckets.
pub fn time_buckets<I>(points: I, interval: TimeDelta) -> Vec<TimeBucket>
where
    I: IntoIterator<Item = (DateTime<Utc>, Option<f64>)>,
{
    let step = interval.num_milliseconds();
    if step <= 0 {
        return Vec::new();
    }

    let mut buckets: BTreeMap<i64, TimeBucket> = BTreeMap::new();
    for (timestamp, value) in points {
        let floored = timestamp.timestamp_millis().div_euclid(step) * step;
        let Some(start) = DateTime::from_timestamp_millis(floored) else {
            continue;
        };
        let bucket = buckets.entry(floored).or_insert(TimeBucket {
            start,
            count: 0,
            sum: None,
        });
        bucket.count += 1;
        if let Some(value) = value {
            bucket.sum = Some(bucket.sum.unwrap_or(0.0) + value);
        }
    }

    buckets.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 12, h, m, s).unwrap()
    }

    #[test]
    fn test_buckets_floor_and_sort() {
        let points = vec![
            (at(14, 23, 40), Some(2.0)),
            (at(14, 22, 5), None),
            (at(14, 23, 1), Some(3.0)),
            (at(14, 22, 59), None),
        ];
        let buckets = time_buckets(points, TimeDelta::minutes(1));

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].start, at(14, 22, 0));
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[0].sum, None);
        assert_eq!(buckets[1].start, at(14, 23, 0));
        assert_eq!(buckets[1].count, 2);
        assert_eq!(buckets[1].sum, Some(5.0));
    }

    #[test]
    fn test_zero_interval() {
        let points = vec![(at(14, 0, 0), None)];
        assert!(time_buckets(points, TimeDelta::zero()).is_empty());
    }
}
