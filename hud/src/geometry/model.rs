// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use super::{get_path_length_idx, update_line_data, Polygon, Projector};
use crate::messages::{ModelV2, RadarState, UiPlan, XyztData, TRAJECTORY_SIZE};
use nalgebra::{Point2, Vector3};

/// Shortest drawn path in m
pub const MIN_DRAW_DISTANCE: f32 = 10.0;
/// Longest drawn path in m
pub const MAX_DRAW_DISTANCE: f32 = 100.0;
/// Half-width of the driving path band in m
pub const PATH_HALF_WIDTH: f32 = 0.9;
/// Height of the road camera above ground in m
pub const PATH_HEIGHT: f32 = 1.22;
/// Half-width of a fully confident lane line in m
pub const LANE_LINE_HALF_WIDTH: f32 = 0.025;

/// Bounds of the drawn path length in m
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawDistance {
    pub min: f32,
    pub max: f32,
}

impl Default for DrawDistance {
    fn default() -> Self {
        Self {
            min: MIN_DRAW_DISTANCE,
            max: MAX_DRAW_DISTANCE,
        }
    }
}

impl DrawDistance {
    fn clamp(&self, distance: f32) -> f32 {
        distance.max(self.min).min(self.max)
    }
}

/// Screen-space geometry derived from the model each tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelGeometry {
    pub lane_line_probs: [f32; 4],
    pub road_edge_stds: [f32; 2],
    pub track_vertices: Polygon,
    pub lane_line_vertices: [Polygon; 4],
    pub road_edge_vertices: [Polygon; 2],
    /// Screen position of each lead, `None` until first projected
    pub lead_vertices: [Option<Point2<f32>>; 2],
    /// Length of the drawn path in m after lead foreshortening
    pub path_distance: f32,
}

/// Rebuild lane line, road edge and path polygons
///
/// The plan path is used when it carries all [TRAJECTORY_SIZE] samples, otherwise the
/// model's own path. A valid lead one shortens the drawn path.
pub fn update_model(
    geometry: &mut ModelGeometry,
    projector: &Projector,
    model: &ModelV2,
    plan: &UiPlan,
    radar: &RadarState,
    limits: &DrawDistance,
) {
    let path = if plan.position.len() < TRAJECTORY_SIZE {
        &model.position
    } else {
        &plan.position
    };
    let mut max_distance = limits.clamp(path.last_x());

    let max_idx = get_path_length_idx(&model.lane_lines[0], max_distance);
    for (i, line) in model.lane_lines.iter().enumerate() {
        let prob = model.lane_line_probs[i];
        geometry.lane_line_probs[i] = prob;
        update_line_data(
            projector,
            line,
            LANE_LINE_HALF_WIDTH * prob,
            0.0,
            &mut geometry.lane_line_vertices[i],
            max_idx,
            true,
        );
    }

    for (i, edge) in model.road_edges.iter().enumerate() {
        geometry.road_edge_stds[i] = model.road_edge_stds[i];
        update_line_data(
            projector,
            edge,
            LANE_LINE_HALF_WIDTH,
            0.0,
            &mut geometry.road_edge_vertices[i],
            max_idx,
            true,
        );
    }

    let lead_one = &radar.lead_one;
    if lead_one.status {
        let lead_d = lead_one.d_rel * 2.0;
        max_distance = (lead_d - (lead_d * 0.35).min(10.0))
            .max(0.0)
            .min(max_distance);
    }
    geometry.path_distance = max_distance;

    let max_idx = get_path_length_idx(path, max_distance);
    update_line_data(
        projector,
        path,
        PATH_HALF_WIDTH,
        PATH_HEIGHT,
        &mut geometry.track_vertices,
        max_idx,
        false,
    );
}

/// Project valid leads onto the road surface of `line`
///
/// A lead that is not visible keeps its previous screen position.
pub fn update_leads(
    geometry: &mut ModelGeometry,
    projector: &Projector,
    radar: &RadarState,
    line: &XyztData,
) {
    for (vertex, lead) in geometry.lead_vertices.iter_mut().zip(radar.leads()) {
        if !lead.status {
            continue;
        }
        let z = line.z[get_path_length_idx(line, lead.d_rel)];
        let point = Vector3::new(lead.d_rel, -lead.y_rel, z + PATH_HEIGHT);
        if let Some(p) = projector.calib_frame_to_full_frame(point) {
            *vertex = Some(p);
        }
    }
}

#[cfg(test)]
mod test {
    use super::{update_leads, update_model, DrawDistance, ModelGeometry, MAX_DRAW_DISTANCE};
    use crate::geometry::{Calibration, Projector, ScreenTransform};
    use crate::messages::{LeadData, ModelV2, RadarState, UiPlan, XyztData};
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

    fn trajectory(y: f32) -> XyztData {
        XyztData::from_points((0..33).map(|i| Vector3::new(i as f32 * 10.0, y, 0.0)))
    }

    fn model() -> ModelV2 {
        ModelV2 {
            position: trajectory(0.0),
            lane_lines: [
                trajectory(-3.0),
                trajectory(-1.0),
                trajectory(1.0),
                trajectory(3.0),
            ],
            lane_line_probs: [0.2, 0.9, 0.8, 0.0],
            road_edges: [trajectory(-5.0), trajectory(5.0)],
            road_edge_stds: [0.3, 0.4],
        }
    }

    fn lead(d_rel: f32, y_rel: f32) -> LeadData {
        LeadData {
            d_rel,
            y_rel,
            v_rel: 0.0,
            status: true,
        }
    }

    #[test]
    fn free_road_uses_full_draw_distance() {
        let mut geometry = ModelGeometry::default();
        let plan = UiPlan {
            position: trajectory(0.0),
        };
        update_model(
            &mut geometry,
            &projector(),
            &model(),
            &plan,
            &RadarState::default(),
            &DrawDistance::default(),
        );

        assert_eq!(geometry.path_distance, MAX_DRAW_DISTANCE);
        // Samples 1..=10, sample 0 is at the camera
        assert_eq!(geometry.track_vertices.len(), 20);
        assert_eq!(geometry.lane_line_probs, [0.2, 0.9, 0.8, 0.0]);
        assert_eq!(geometry.road_edge_stds, [0.3, 0.4]);
        assert_eq!(geometry.road_edge_vertices[0].len(), 20);
    }

    #[test]
    fn lead_foreshortens_path() {
        let mut geometry = ModelGeometry::default();
        let plan = UiPlan {
            position: trajectory(0.0),
        };
        let radar = RadarState {
            lead_one: lead(50.0, 0.0),
            ..Default::default()
        };
        update_model(
            &mut geometry,
            &projector(),
            &model(),
            &plan,
            &radar,
            &DrawDistance::default(),
        );

        assert_eq!(geometry.path_distance, 90.0);
        // Samples 1..=9
        assert_eq!(geometry.track_vertices.len(), 18);
        // Lane lines keep the unshortened distance
        assert_eq!(geometry.lane_line_vertices[1].len(), 20);
    }

    #[test]
    fn close_lead_reduces_path_to_nothing() {
        let mut geometry = ModelGeometry::default();
        let radar = RadarState {
            lead_one: lead(0.0, 0.0),
            ..Default::default()
        };
        update_model(
            &mut geometry,
            &projector(),
            &model(),
            &UiPlan::default(),
            &radar,
            &DrawDistance::default(),
        );
        assert_eq!(geometry.path_distance, 0.0);
        // Only sample 0 which is not visible
        assert!(geometry.track_vertices.is_empty());
    }

    #[test]
    fn short_plan_falls_back_to_model_path() {
        let mut geometry = ModelGeometry::default();
        let plan = UiPlan {
            position: XyztData::from_points((0..5).map(|i| Vector3::new(i as f32, 0.0, 0.0))),
        };
        let mut model = model();
        model.position =
            XyztData::from_points((0..33).map(|i| Vector3::new(i as f32 * 2.0, 0.0, 0.0)));
        update_model(
            &mut geometry,
            &projector(),
            &model,
            &plan,
            &RadarState::default(),
            &DrawDistance::default(),
        );
        // Model path ends at 64 m. Samples closer than 3 m fall below the frame margin.
        assert_eq!(geometry.path_distance, 64.0);
        assert_eq!(geometry.track_vertices.len(), 62);
    }

    #[test]
    fn short_path_is_extended_to_minimum() {
        let mut geometry = ModelGeometry::default();
        let mut model = model();
        model.position =
            XyztData::from_points((0..33).map(|i| Vector3::new(i as f32 * 0.1, 0.0, 0.0)));
        update_model(
            &mut geometry,
            &projector(),
            &model,
            &UiPlan::default(),
            &RadarState::default(),
            &DrawDistance::default(),
        );
        assert_eq!(geometry.path_distance, 10.0);
    }

    #[test]
    fn empty_lane_line_gives_empty_polygon() {
        let mut geometry = ModelGeometry::default();
        let mut model = model();
        model.lane_lines[2] = XyztData::default();
        update_model(
            &mut geometry,
            &projector(),
            &model,
            &UiPlan::default(),
            &RadarState::default(),
            &DrawDistance::default(),
        );
        assert!(geometry.lane_line_vertices[2].is_empty());
        assert!(!geometry.lane_line_vertices[1].is_empty());
    }

    #[test]
    fn leads_are_projected_on_the_road() {
        let mut geometry = ModelGeometry::default();
        let radar = RadarState {
            lead_one: lead(20.0, 1.0),
            lead_two: LeadData::default(),
        };
        update_leads(&mut geometry, &projector(), &radar, &trajectory(0.0));

        let vertex = geometry.lead_vertices[0].unwrap();
        // Left of centre, below the horizon at camera height
        assert!((vertex.x - (964.0 - 2648.0 / 20.0)).abs() < 1e-2);
        assert!((vertex.y - (604.0 + 2648.0 * 1.22 / 20.0)).abs() < 1e-2);
        assert!(geometry.lead_vertices[1].is_none());
    }

    #[test]
    fn invisible_lead_keeps_previous_vertex() {
        let mut geometry = ModelGeometry::default();
        let line = trajectory(0.0);
        let radar = RadarState {
            lead_one: lead(20.0, 0.0),
            ..Default::default()
        };
        update_leads(&mut geometry, &projector(), &radar, &line);
        let previous = geometry.lead_vertices[0];
        assert!(previous.is_some());

        let radar = RadarState {
            lead_one: lead(-1.0, 0.0),
            ..Default::default()
        };
        update_leads(&mut geometry, &projector(), &radar, &line);
        assert_eq!(geometry.lead_vertices[0], previous);
    }
}
