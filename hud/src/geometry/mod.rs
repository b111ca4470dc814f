// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Scene geometry
//!
//! Projection of car-frame points to screen pixels and construction of the polygons the
//! renderer fills for lane lines, road edges and the driving path.

mod line;
mod model;
mod polygon;
mod projection;

pub use line::{get_path_length_idx, update_line_data};
pub use model::{
    update_leads, update_model, DrawDistance, ModelGeometry, LANE_LINE_HALF_WIDTH,
    MAX_DRAW_DISTANCE, MIN_DRAW_DISTANCE, PATH_HALF_WIDTH, PATH_HEIGHT,
};
pub use polygon::{Polygon, POLYGON_CAPACITY};
pub use projection::{
    euler_to_rot, Calibration, Projector, ScreenTransform, CLIP_MARGIN, DEFAULT_CALIBRATION,
    ECAM_INTRINSIC_MATRIX, FCAM_INTRINSIC_MATRIX, VIEW_FROM_DEVICE,
};
