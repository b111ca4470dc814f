// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use super::{Polygon, Projector};
use crate::messages::{XyztData, TRAJECTORY_SIZE};
use nalgebra::{Point2, Vector3};

/// Largest index `i` such that all samples up to `i` are at most `path_height` ahead
///
/// Scans linearly from index 1 and stops at the first sample not within `path_height`.
/// Index 0 is returned when not even the second sample qualifies. NaN never qualifies.
pub fn get_path_length_idx(line: &XyztData, path_height: f32) -> usize {
    (1..line.len())
        .take_while(|&i| line.x[i] <= path_height)
        .last()
        .unwrap_or(0)
}

/// Build the outline of a band of half-width `y_off` around `line`, lifted by `z_off`
///
/// Uses samples `0..=max_idx`. The result in `out` is the left edge by increasing distance
/// followed by the right edge by decreasing distance. A sample is kept only if both of its
/// edge points are visible. Samples behind the car are skipped.
///
/// With `allow_invert` false a sample whose left point lies lower on the screen than the
/// previous kept left point is dropped. This keeps wide bands from folding over hill crests.
pub fn update_line_data(
    projector: &Projector,
    line: &XyztData,
    y_off: f32,
    z_off: f32,
    out: &mut Polygon,
    max_idx: usize,
    allow_invert: bool,
) {
    out.clear();
    if line.is_empty() {
        return;
    }

    let mut right_points = [Point2::origin(); TRAJECTORY_SIZE];
    let mut num_right = 0;

    for i in 0..=max_idx.min(line.len() - 1) {
        // Negative x projects above the frame and flickers
        if line.x[i] < 0.0 {
            continue;
        }
        let (x, y, z) = (line.x[i], line.y[i], line.z[i]);
        let left = projector.calib_frame_to_full_frame(Vector3::new(x, y - y_off, z + z_off));
        let right = projector.calib_frame_to_full_frame(Vector3::new(x, y + y_off, z + z_off));

        if let (Some(left), Some(right)) = (left, right) {
            if !allow_invert && out.last().is_some_and(|prev| left.y > prev.y) {
                continue;
            }
            out.push(left);
            right_points[num_right] = right;
            num_right += 1;
        }
    }

    for right in right_points[..num_right].iter().rev() {
        out.push(*right);
    }
}

#[cfg(test)]
mod test {
    use super::{get_path_length_idx, update_line_data};
    use crate::geometry::{Calibration, Polygon, Projector, ScreenTransform};
    use crate::messages::XyztData;
    use nalgebra::Vector3;

    fn projector() -> Projector {
        Projector::new(
            &Calibration::default(),
            false,
            ScreenTransform::default(),
            1928.0,
            1208.0,
        )
    }

    fn straight_line(step: f32, z: impl Fn(f32) -> f32) -> XyztData {
        XyztData::from_points((0..33).map(|i| {
            let x = i as f32 * step;
            Vector3::new(x, 0.0, z(x))
        }))
    }

    #[test]
    fn path_length_idx_is_last_sample_in_range() {
        let line = straight_line(10.0, |_| 0.0);
        assert_eq!(get_path_length_idx(&line, 90.0), 9);
        assert_eq!(get_path_length_idx(&line, 95.0), 9);
        assert_eq!(get_path_length_idx(&line, 5.0), 0);
        assert_eq!(get_path_length_idx(&line, 1000.0), 32);
    }

    #[test]
    fn path_length_idx_is_monotonic() {
        let line = straight_line(7.5, |_| 0.0);
        let mut previous = 0;
        for target in 0..300 {
            let idx = get_path_length_idx(&line, target as f32);
            assert!(idx >= previous);
            assert!(line.x[idx] <= target as f32 || idx == 0);
            previous = idx;
        }
    }

    #[test]
    fn path_length_idx_stops_at_first_sample_out_of_range() {
        let mut line = straight_line(10.0, |_| 0.0);
        line.x[3] = 500.0;
        assert_eq!(get_path_length_idx(&line, 100.0), 2);
    }

    #[test]
    fn path_length_idx_stops_at_nan() {
        let mut line = straight_line(10.0, |_| 0.0);
        assert_eq!(get_path_length_idx(&line, f32::NAN), 0);

        line.x[3] = f32::NAN;
        assert_eq!(get_path_length_idx(&line, 100.0), 2);
    }

    #[test]
    fn ring_has_both_edges() {
        let line = straight_line(10.0, |_| 1.22);
        let mut polygon = Polygon::default();
        update_line_data(&projector(), &line, 0.5, 0.0, &mut polygon, 9, true);

        // Sample 0 is at x = 0 and therefore behind the image plane
        let kept = 9;
        assert_eq!(polygon.len(), 2 * kept);

        let points = polygon.as_slice();
        let (left, right) = points.split_at(kept);
        let right_ascending: Vec<_> = right.iter().rev().collect();
        for (l, r) in left.iter().zip(right_ascending) {
            // Mirror images around the centre column, same row
            assert!(l.x < r.x);
            assert!((l.y - r.y).abs() < 1e-3);
        }
        // Left edge goes up the screen with distance
        assert!(left.windows(2).all(|w| w[1].y < w[0].y));
    }

    #[test]
    fn negative_distance_is_skipped() {
        let mut line = straight_line(10.0, |_| 1.0);
        line.x[1] = -3.0;
        let mut polygon = Polygon::default();
        update_line_data(&projector(), &line, 0.5, 0.0, &mut polygon, 4, true);
        // Samples 2, 3 and 4 remain
        assert_eq!(polygon.len(), 6);
    }

    #[test]
    fn monotonic_band_is_not_suppressed() {
        let line = straight_line(10.0, |_| 1.22);
        let mut inverted = Polygon::default();
        let mut suppressed = Polygon::default();
        update_line_data(&projector(), &line, 0.9, 0.0, &mut inverted, 20, true);
        update_line_data(&projector(), &line, 0.9, 0.0, &mut suppressed, 20, false);
        assert_eq!(inverted, suppressed);
    }

    #[test]
    fn crest_is_suppressed() {
        // Road climbs (z down is positive) then drops away behind a crest
        let line = straight_line(10.0, |x| if x < 50.0 { 1.22 - 0.05 * x } else { 8.0 });
        let mut inverted = Polygon::default();
        let mut suppressed = Polygon::default();
        update_line_data(&projector(), &line, 0.9, 0.0, &mut inverted, 10, true);
        update_line_data(&projector(), &line, 0.9, 0.0, &mut suppressed, 10, false);
        assert!(suppressed.len() < inverted.len());
        assert_eq!(suppressed.len() % 2, 0);
    }

    #[test]
    fn empty_line_gives_empty_polygon() {
        let mut polygon = Polygon::default();
        polygon.push(nalgebra::Point2::new(1.0, 1.0));
        update_line_data(
            &projector(),
            &XyztData::default(),
            0.5,
            0.0,
            &mut polygon,
            5,
            true,
        );
        assert!(polygon.is_empty());
    }
}
