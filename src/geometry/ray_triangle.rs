// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use crate::geometry::vector::Vector3;
use crate::kernel::orient2d;

/// Axis permutation of a ray: `kz` is the axis where the direction is largest in
/// magnitude, `kx` and `ky` follow it cyclically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayDimensions {
    pub kx: usize,
    pub ky: usize,
    pub kz: usize,
}

impl RayDimensions {
    pub fn new(direction: &Vector3) -> Self {
        let kz = direction.max_abs_axis();
        let kx = (kz + 1) % 3;
        let ky = (kx + 1) % 3;
        Self { kx, ky, kz }
    }
}

/// Shear constants mapping the ray direction onto the permuted `+z` axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayShear {
    pub sx: f64,
    pub sy: f64,
    pub sz: f64,
}

impl RayShear {
    pub fn new(k: &RayDimensions, direction: &Vector3) -> Self {
        Self {
            sx: direction[k.kx] / direction[k.kz],
            sy: direction[k.ky] / direction[k.kz],
            sz: 1.0 / direction[k.kz],
        }
    }
}

/// A ray prepared once for many watertight triangle tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatertightRay {
    pub origin: Vector3,
    pub direction: Vector3,
    pub k: RayDimensions,
    pub s: RayShear,
}

impl WatertightRay {
    /// `direction` should be a unit vector; the hit distance is measured in its units.
    pub fn new(origin: Vector3, direction: Vector3) -> Self {
        let k = RayDimensions::new(&direction);
        let s = RayShear::new(&k, &direction);
        Self {
            origin,
            direction,
            k,
            s,
        }
    }

    pub fn point_at(&self, distance: f64) -> Vector3 {
        self.origin + self.direction * distance
    }
}

/// Barycentric weights of `a`, `b`, `c` (in that order) and the distance along the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    pub u: f64,
    pub v: f64,
    pub w: f64,
    pub distance: f64,
}

/// Watertight ray/triangle intersection (Woop, Benthin, Wald 2013).
///
/// Rays hitting a shared edge or vertex of adjacent triangles hit at least one of
/// them. No backface culling is done. A ray parallel to the triangle plane never hits,
/// even when it lies inside that plane.
pub fn ray_triangle_intersection(
    a: &Vector3,
    b: &Vector3,
    c: &Vector3,
    ray: &WatertightRay,
) -> Option<TriangleHit> {
    let WatertightRay { origin, k, s, .. } = ray;

    let a_local = *a - *origin;
    let b_local = *b - *origin;
    let c_local = *c - *origin;

    // shear and scale into ray space
    let ax = a_local[k.kx] - s.sx * a_local[k.kz];
    let ay = a_local[k.ky] - s.sy * a_local[k.kz];
    let bx = b_local[k.kx] - s.sx * b_local[k.kz];
    let by = b_local[k.ky] - s.sy * b_local[k.kz];
    let cx = c_local[k.kx] - s.sx * c_local[k.kz];
    let cy = c_local[k.ky] - s.sy * c_local[k.kz];

    // scaled barycentric coordinates
    let u = orient2d(cx, cy, bx, by);
    let v = orient2d(ax, ay, cx, cy);
    let w = orient2d(bx, by, ax, ay);

    if (u < 0.0 || v < 0.0 || w < 0.0) && (u > 0.0 || v > 0.0 || w > 0.0) {
        return None;
    }

    let det = u + v + w;
    if det == 0.0 || !det.is_finite() {
        return None;
    }

    let az = s.sz * a_local[k.kz];
    let bz = s.sz * b_local[k.kz];
    let cz = s.sz * c_local[k.kz];
    let t = u * az + v * bz + w * cz;

    // behind the origin
    if t * 1.0_f64.copysign(det) < 0.0 || !t.is_finite() {
        return None;
    }

    let inv_det = 1.0 / det;
    Some(TriangleHit {
        u: u * inv_det,
        v: v * inv_det,
        w: w * inv_det,
        distance: t * inv_det,
    })
}
