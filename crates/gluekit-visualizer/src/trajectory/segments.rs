use gluekit_core::{PixelPoint, PositionSample};

/// Split a trail snapshot into connected segments.
///
/// A new segment begins at every break-start sample except the first one.
/// Segments with a single point cannot be drawn and are dropped.
pub fn split_segments(samples: &[PositionSample]) -> Vec<Vec<PixelPoint>> {
    let mut segments = Vec::new();
    let mut current: Vec<PixelPoint> = Vec::new();

    for sample in samples {
        if sample.is_break_start && !current.is_empty() {
            let finished = std::mem::take(&mut current);
            if finished.len() > 1 {
                segments.push(finished);
            }
        }
        current.push(sample.position);
    }

    if current.len() > 1 {
        segments.push(current);
    }

    segments
}

/// Causal moving average over `window` points.
///
/// Each output point is the mean of the input points ending at the same
/// index (fewer at the start), truncated to whole pixels.
pub fn smooth_points(points: &[PixelPoint], window: usize) -> Vec<PixelPoint> {
    let window = window.max(1);
    (0..points.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let slice = &points[start..=i];
            let n = slice.len() as f64;
            let (sx, sy) = slice.iter().fold((0.0, 0.0), |(sx, sy), p| {
                (sx + f64::from(p.x), sy + f64::from(p.y))
            });
            PixelPoint::new((sx / n) as i32, (sy / n) as i32)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(points: &[(i32, bool)]) -> Vec<PositionSample> {
        points
            .iter()
            .map(|&(x, brk)| PositionSample::with_timestamp(PixelPoint::new(x, 0), 0.0, brk))
            .collect()
    }

    #[test]
    fn test_leading_break_does_not_split() {
        let segments = split_segments(&samples(&[(0, true), (1, false), (2, false)]));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 3);
    }

    #[test]
    fn test_break_splits_segments() {
        let segments = split_segments(&samples(&[
            (0, true),
            (1, false),
            (10, true),
            (11, false),
            (12, false),
        ]));
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].iter().map(|p| p.x).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(segments[1].iter().map(|p| p.x).collect::<Vec<_>>(), vec![10, 11, 12]);
    }

    #[test]
    fn test_single_point_segments_dropped() {
        let segments = split_segments(&samples(&[(0, true), (5, true), (6, false), (9, true)]));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0][0].x, 5);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(split_segments(&[]).is_empty());
        assert!(split_segments(&samples(&[(3, true)])).is_empty());
    }

    #[test]
    fn test_smoothing_window() {
        let points: Vec<PixelPoint> = [0, 3, 6, 9, 30]
            .iter()
            .map(|&x| PixelPoint::new(x, x))
            .collect();
        let smoothed = smooth_points(&points, 3);

        assert_eq!(smoothed.len(), points.len());
        let xs: Vec<i32> = smoothed.iter().map(|p| p.x).collect();
        // 0, (0+3)/2, (0+3+6)/3, (3+6+9)/3, (6+9+30)/3
        assert_eq!(xs, vec![0, 1, 3, 6, 15]);
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let points = vec![PixelPoint::new(4, 7), PixelPoint::new(-2, 9)];
        assert_eq!(smooth_points(&points, 1), points);
        assert_eq!(smooth_points(&points, 0), points);
    }
}
