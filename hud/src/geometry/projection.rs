// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use crate::messages::{CalibrationStatus, LiveCalibration};
use nalgebra::{Affine2, Matrix3, Point2, Rotation3, Vector2, Vector3};

/// Points this far outside the frame still count as visible, in screen pixels
pub const CLIP_MARGIN: f32 = 500.0;

/// Row-major calibration used until the first liveCalibration arrives
pub const DEFAULT_CALIBRATION: [f32; 9] = [0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0];

/// Row-major axis swap from device frame (x fwd, y right, z down) to camera view frame
pub const VIEW_FROM_DEVICE: [f32; 9] = [0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0];

/// Row-major intrinsics of the narrow road camera (1928x1208)
pub const FCAM_INTRINSIC_MATRIX: [f32; 9] = [2648.0, 0.0, 964.0, 0.0, 2648.0, 604.0, 0.0, 0.0, 1.0];

/// Row-major intrinsics of the wide road camera (1928x1208)
pub const ECAM_INTRINSIC_MATRIX: [f32; 9] = [567.0, 0.0, 964.0, 0.0, 567.0, 604.0, 0.0, 0.0, 1.0];

/// Rotation from roll, pitch, yaw: `Rz(yaw) * Ry(pitch) * Rx(roll)`
pub fn euler_to_rot(rpy: [f32; 3]) -> Matrix3<f32> {
    let [roll, pitch, yaw] = rpy.map(f64::from);
    Rotation3::from_euler_angles(roll, pitch, yaw)
        .into_inner()
        .cast::<f32>()
}

fn angles(list: &[f32]) -> [f32; 3] {
    match list {
        [roll, pitch, yaw] => [*roll, *pitch, *yaw],
        _ => [0.0; 3],
    }
}

/// Camera calibration state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub view_from_calib: Matrix3<f32>,
    pub view_from_wide_calib: Matrix3<f32>,
    /// A calibrated status has been observed
    pub valid: bool,
    /// The wide camera extrinsics were provided
    pub wide_valid: bool,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            view_from_calib: Matrix3::from_row_slice(&DEFAULT_CALIBRATION),
            view_from_wide_calib: Matrix3::from_row_slice(&DEFAULT_CALIBRATION),
            valid: false,
            wide_valid: false,
        }
    }
}

impl Calibration {
    /// Recompute the view matrices from a liveCalibration message
    pub fn update(&mut self, msg: &LiveCalibration) {
        let device_from_calib = euler_to_rot(angles(&msg.rpy_calib));
        let wide_from_device = euler_to_rot(angles(&msg.wide_from_device_euler));
        let view_from_device = Matrix3::from_row_slice(&VIEW_FROM_DEVICE);

        self.view_from_calib = view_from_device * device_from_calib;
        self.view_from_wide_calib = view_from_device * wide_from_device * device_from_calib;
        self.valid = msg.cal_status == CalibrationStatus::Calibrated;
        self.wide_valid = msg.wide_from_device_euler.len() == 3;
    }

    /// View matrix of the selected camera
    pub fn view(&self, wide_cam: bool) -> &Matrix3<f32> {
        if wide_cam {
            &self.view_from_wide_calib
        } else {
            &self.view_from_calib
        }
    }
}

/// Intrinsics of the selected camera
pub fn intrinsics(wide_cam: bool) -> Matrix3<f32> {
    if wide_cam {
        Matrix3::from_row_slice(&ECAM_INTRINSIC_MATRIX)
    } else {
        Matrix3::from_row_slice(&FCAM_INTRINSIC_MATRIX)
    }
}

/// Affine map from image pixels to screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform(Affine2<f32>);

impl Default for ScreenTransform {
    fn default() -> Self {
        Self(Affine2::identity())
    }
}

impl ScreenTransform {
    pub fn from_matrix(matrix: Matrix3<f32>) -> Self {
        Self(Affine2::from_matrix_unchecked(matrix))
    }

    /// Zoomed view of a camera centred on the vanishing point
    ///
    /// The offset is clamped so the zoomed image always covers a `width` x `height` frame.
    pub fn for_camera(width: f32, height: f32, calibration: &Calibration, wide_cam: bool) -> Self {
        let zoom = if wide_cam { 2.0 } else { 1.1 };
        let intrinsic = intrinsics(wide_cam);
        let (cx, cy) = (intrinsic[(0, 2)], intrinsic[(1, 2)]);

        let kep = intrinsic * calibration.view(wide_cam) * Vector3::new(1000.0, 0.0, 0.0);
        let (x_offset, y_offset) = if kep.z > 0.0 {
            ((kep.x / kep.z - cx) * zoom, (kep.y / kep.z - cy) * zoom)
        } else {
            (0.0, 0.0)
        };
        let max_x_offset = (cx * zoom - width / 2.0 - 5.0).max(0.0);
        let max_y_offset = (cy * zoom - height / 2.0 - 5.0).max(0.0);
        let x_offset = x_offset.clamp(-max_x_offset, max_x_offset);
        let y_offset = y_offset.clamp(-max_y_offset, max_y_offset);

        let matrix = Matrix3::new_translation(&Vector2::new(
            width / 2.0 - x_offset,
            height / 2.0 - y_offset,
        )) * Matrix3::new_nonuniform_scaling(&Vector2::new(zoom, zoom))
            * Matrix3::new_translation(&Vector2::new(-cx, -cy));
        Self::from_matrix(matrix)
    }

    pub fn map(&self, point: &Point2<f32>) -> Point2<f32> {
        self.0.transform_point(point)
    }
}

/// Projects car-frame points to screen pixels for one camera
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    view_from_calib: Matrix3<f32>,
    intrinsic: Matrix3<f32>,
    transform: ScreenTransform,
    width: f32,
    height: f32,
}

impl Projector {
    pub fn new(
        calibration: &Calibration,
        wide_cam: bool,
        transform: ScreenTransform,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            view_from_calib: *calibration.view(wide_cam),
            intrinsic: intrinsics(wide_cam),
            transform,
            width,
            height,
        }
    }

    /// Project a point of the calibrated car frame to the screen
    ///
    /// Returns `None` when the point lies behind the camera, the projection is not finite,
    /// or the result is more than [CLIP_MARGIN] outside the frame.
    pub fn calib_frame_to_full_frame(&self, point: Vector3<f32>) -> Option<Point2<f32>> {
        let kep = self.intrinsic * (self.view_from_calib * point);
        if kep.z <= 0.0 {
            return None;
        }

        let projected = self
            .transform
            .map(&Point2::new(kep.x / kep.z, kep.y / kep.z));
        let visible = projected.x.is_finite()
            && projected.y.is_finite()
            && (-CLIP_MARGIN..=self.width + CLIP_MARGIN).contains(&projected.x)
            && (-CLIP_MARGIN..=self.height + CLIP_MARGIN).contains(&projected.y);
        visible.then_some(projected)
    }
}

#[cfg(test)]
mod test {
    use super::{
        euler_to_rot, Calibration, Projector, ScreenTransform, ECAM_INTRINSIC_MATRIX,
        FCAM_INTRINSIC_MATRIX, VIEW_FROM_DEVICE,
    };
    use crate::messages::{CalibrationStatus, LiveCalibration};
    use nalgebra::{Matrix3, Point2, Vector3};

    const EPS: f32 = 1e-3;

    fn narrow_projector() -> Projector {
        Projector::new(
            &Calibration::default(),
            false,
            ScreenTransform::default(),
            1928.0,
            1208.0,
        )
    }

    #[test]
    fn straight_ahead_hits_principal_point() {
        let p = narrow_projector()
            .calib_frame_to_full_frame(Vector3::new(20.0, 0.0, 0.0))
            .unwrap();
        assert!((p.x - FCAM_INTRINSIC_MATRIX[2]).abs() < EPS);
        assert!((p.y - FCAM_INTRINSIC_MATRIX[5]).abs() < EPS);
    }

    #[test]
    fn lateral_and_height_offsets_move_the_point() {
        let proj = narrow_projector();
        let center = proj
            .calib_frame_to_full_frame(Vector3::new(20.0, 0.0, 0.0))
            .unwrap();
        // Positive y is to the right in the default calibration, positive z is down
        let right = proj
            .calib_frame_to_full_frame(Vector3::new(20.0, 1.0, 0.0))
            .unwrap();
        let below = proj
            .calib_frame_to_full_frame(Vector3::new(20.0, 0.0, 1.0))
            .unwrap();
        assert!((right.x - (center.x + 2648.0 / 20.0)).abs() < EPS);
        assert!((below.y - (center.y + 2648.0 / 20.0)).abs() < EPS);
    }

    #[test]
    fn behind_camera_is_not_visible() {
        let proj = narrow_projector();
        assert!(proj
            .calib_frame_to_full_frame(Vector3::new(0.0, 1.0, 1.0))
            .is_none());
        assert!(proj
            .calib_frame_to_full_frame(Vector3::new(-5.0, 0.0, 0.0))
            .is_none());
    }

    #[test]
    fn margin_bounds_visibility() {
        let proj = narrow_projector();
        // 964 + 2648 * y / 1 must stay within 1928 + 500
        assert!(proj
            .calib_frame_to_full_frame(Vector3::new(1.0, 0.55, 0.0))
            .is_some());
        assert!(proj
            .calib_frame_to_full_frame(Vector3::new(1.0, 0.6, 0.0))
            .is_none());
    }

    #[test]
    fn zero_angles_give_identity_rotation() {
        let r = euler_to_rot([0.0; 3]);
        assert!((r - Matrix3::identity()).norm() < EPS);
    }

    #[test]
    fn calibration_validity() {
        let mut calibration = Calibration::default();
        calibration.update(&LiveCalibration {
            cal_status: CalibrationStatus::Calibrated,
            rpy_calib: vec![0.0, 0.0, 0.0],
            wide_from_device_euler: vec![0.0, 0.0],
        });
        assert!(calibration.valid);
        assert!(!calibration.wide_valid);
        assert_eq!(calibration, {
            let mut expected = Calibration::default();
            expected.valid = true;
            expected
        });
    }

    #[test]
    fn camera_transform_centres_vanishing_point() {
        let calibration = Calibration::default();
        let transform = ScreenTransform::for_camera(2160.0, 1080.0, &calibration, false);
        let center = transform.map(&Point2::new(964.0, 604.0));
        assert!((center.x - 1080.0).abs() < EPS);
        assert!((center.y - 540.0).abs() < EPS);
    }

    fn rx(a: f32) -> Matrix3<f32> {
        let (s, c) = a.sin_cos();
        Matrix3::new(1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c)
    }

    fn ry(a: f32) -> Matrix3<f32> {
        let (s, c) = a.sin_cos();
        Matrix3::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c)
    }

    fn rz(a: f32) -> Matrix3<f32> {
        let (s, c) = a.sin_cos();
        Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0)
    }

    #[test]
    fn euler_angles_compose_yaw_pitch_roll() {
        let (roll, pitch, yaw) = (0.1, 0.2, 0.3);
        let r = euler_to_rot([roll, pitch, yaw]);
        assert!((r - rz(yaw) * ry(pitch) * rx(roll)).norm() < EPS);
        assert!((r - rx(roll) * ry(pitch) * rz(yaw)).norm() > 10.0 * EPS);

        // Yaw turns forward to the right, pitch turns forward upwards
        let forward = Vector3::new(1.0, 0.0, 0.0);
        let yawed = euler_to_rot([0.0, 0.0, 0.5]) * forward;
        assert!((yawed - Vector3::new(0.5f32.cos(), 0.5f32.sin(), 0.0)).norm() < EPS);
        let pitched = euler_to_rot([0.0, 0.5, 0.0]) * forward;
        assert!((pitched - Vector3::new(0.5f32.cos(), 0.0, -0.5f32.sin())).norm() < EPS);
    }

    #[test]
    fn wide_calibration_chains_extrinsics() {
        let mut calibration = Calibration::default();
        calibration.update(&LiveCalibration {
            cal_status: CalibrationStatus::Calibrated,
            rpy_calib: vec![0.0, 0.3, 0.0],
            wide_from_device_euler: vec![0.0, 0.0, 0.5],
        });
        let view_from_device = Matrix3::from_row_slice(&VIEW_FROM_DEVICE);

        assert!(calibration.wide_valid);
        assert!((calibration.view_from_calib - view_from_device * ry(0.3)).norm() < EPS);
        let expected = view_from_device * rz(0.5) * ry(0.3);
        assert!((calibration.view_from_wide_calib - expected).norm() < EPS);
        let reordered = view_from_device * ry(0.3) * rz(0.5);
        assert!((calibration.view_from_wide_calib - reordered).norm() > 10.0 * EPS);
        assert_eq!(calibration.view(true), &calibration.view_from_wide_calib);
    }

    #[test]
    fn wide_camera_zooms_around_principal_point() {
        let calibration = Calibration::default();
        let transform = ScreenTransform::for_camera(2160.0, 1080.0, &calibration, true);
        let center = transform.map(&Point2::new(964.0, 604.0));
        assert!((center.x - 1080.0).abs() < EPS);
        assert!((center.y - 540.0).abs() < EPS);

        let proj = Projector::new(&calibration, true, transform, 2160.0, 1080.0);
        let p = proj
            .calib_frame_to_full_frame(Vector3::new(20.0, 1.0, 0.0))
            .unwrap();
        // One metre at 20 m is 567 / 20 image pixels, doubled by the zoom
        let focal = ECAM_INTRINSIC_MATRIX[0];
        assert!((p.x - (1080.0 + 2.0 * focal / 20.0)).abs() < EPS);
        assert!((p.y - 540.0).abs() < EPS);
    }
}
