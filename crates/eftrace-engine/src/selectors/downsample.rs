use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Largest-Triangle-Three-Buckets.
///
/// Keeps the first and last point, splits the rest into `max_points - 2`
/// buckets and from each keeps the point spanning the largest triangle with
/// the previously kept point and the next bucket's centroid. Returns `data`
/// unchanged when it already fits. With `max_points < 3` only the endpoints
/// can be kept, first one first.
pub fn downsample(data: &[DataPoint], max_points: usize) -> Vec<DataPoint> {
    let len = data.len();
    if len <= max_points {
        return data.to_vec();
    }
    let first = data[0];
    let last = data[len - 1];
    if max_points < 3 {
        return [first, last][..max_points].to_vec();
    }

    let bucket_size = (len - 2) as f64 / (max_points - 2) as f64;
    let buckets = max_points - 2;
    let bucket_edge = |i: usize| {
        if i >= buckets {
            return len - 1;
        }
        ((i as f64 * bucket_size).floor() as usize + 1).min(len - 1)
    };

    let mut sampled = Vec::with_capacity(max_points);
    sampled.push(first);
    let mut anchor = first;

    for i in 0..buckets {
        let (start, end) = (bucket_edge(i), bucket_edge(i + 1));
        let next = &data[end..bucket_edge(i + 2).max(end)];
        let centroid = centroid(next).unwrap_or(last);

        let mut best = data[start];
        let mut best_area = -1.0;
        for point in &data[start..end] {
            let area = triangle_area(anchor, *point, centroid);
            if area > best_area {
                best_area = area;
                best = *point;
            }
        }

        sampled.push(best);
        anchor = best;
    }

    sampled.push(last);
    sampled
}

fn centroid(points: &[DataPoint]) -> Option<DataPoint> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(DataPoint::new(sx / n, sy / n))
}

fn triangle_area(a: DataPoint, b: DataPoint, c: DataPoint) -> f64 {
    ((a.x - c.x) * (b.y - a.y) - (a.x - b.x) * (c.y - a.y)).abs() * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> Vec<DataPoint> {
        (0..n)
            .map(|i| DataPoint::new(i as f64, ((i * 7) % 11) as f64))
            .collect()
    }

    #[test]
    fn test_noop_when_small() {
        let data = series(5);
        assert_eq!(downsample(&data, 5), data);
        assert_eq!(downsample(&data, 50), data);
    }

    #[test]
    fn test_keeps_endpoints_and_budget() {
        let data = series(1000);
        for max in [3, 4, 10, 99, 999] {
            let out = downsample(&data, max);
            assert_eq!(out.len(), max);
            assert_eq!(out[0], data[0]);
            assert_eq!(out[max - 1], data[999]);
            assert!(out.windows(2).all(|w| w[0].x < w[1].x));
        }
    }

    #[test]
    fn test_keeps_spike() {
        let mut data: Vec<DataPoint> = (0..100).map(|i| DataPoint::new(i as f64, 0.0)).collect();
        data[50].y = 100.0;
        let out = downsample(&data, 10);
        assert!(out.iter().any(|p| p.y == 100.0));
    }

    #[test]
    fn test_tiny_budget() {
        let data = series(10);
        assert!(downsample(&data, 0).is_empty());
        assert_eq!(downsample(&data, 1), vec![data[0]]);
        assert_eq!(downsample(&data, 2), vec![data[0], data[9]]);
    }
}
