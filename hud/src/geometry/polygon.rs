// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use crate::messages::TRAJECTORY_SIZE;
use nalgebra::Point2;

/// A closed outline needs at most two points per trajectory sample
pub const POLYGON_CAPACITY: usize = 2 * TRAJECTORY_SIZE;

/// Fixed-capacity screen-space polygon
///
/// Rebuilt in place every tick; never reallocates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polygon {
    points: [Point2<f32>; POLYGON_CAPACITY],
    len: usize,
}

impl Default for Polygon {
    fn default() -> Self {
        Self {
            points: [Point2::origin(); POLYGON_CAPACITY],
            len: 0,
        }
    }
}

impl Polygon {
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append a vertex. Returns false if the polygon is full.
    pub fn push(&mut self, point: Point2<f32>) -> bool {
        if self.len == POLYGON_CAPACITY {
            return false;
        }
        self.points[self.len] = point;
        self.len += 1;
        true
    }

    pub fn last(&self) -> Option<&Point2<f32>> {
        self.as_slice().last()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[Point2<f32>] {
        &self.points[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point2<f32>> {
        self.as_slice().iter()
    }
}
