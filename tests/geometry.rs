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

use approx::assert_abs_diff_eq;
use linccd::geometry::{
    Matrix3, Matrix4, Quaternion, RayDimensions, RayShear, Vector3, VectorOps, WatertightRay,
    ray_patch_intersection, ray_triangle_intersection, util::lerp,
};

fn ray(origin: [f64; 3], direction: [f64; 3]) -> WatertightRay {
    WatertightRay::new(origin.into(), Vector3::from(direction).normalized())
}

fn triangle() -> [Vector3; 3] {
    [
        Vector3::new(0.0, -1.0, -1.0),
        Vector3::new(0.0, 1.0, -1.0),
        Vector3::new(0.0, 1.0, 1.0),
    ]
}

fn planar_quad() -> [Vector3; 4] {
    [
        Vector3::new(0.0, -1.0, -1.0),
        Vector3::new(0.0, -1.0, 1.0),
        Vector3::new(0.0, 1.0, -1.0),
        Vector3::new(0.0, 1.0, 1.0),
    ]
}

fn patch(
    q: &[Vector3; 4],
    origin: [f64; 3],
    direction: [f64; 3],
    max_distance: f64,
) -> Option<linccd::geometry::PatchHit> {
    ray_patch_intersection(
        &q[0],
        &q[1],
        &q[2],
        &q[3],
        &origin.into(),
        &Vector3::from(direction).normalized(),
        max_distance,
    )
}

#[test]
fn test_ray_dimensions_pick_largest_axis() {
    let k = RayDimensions::new(&Vector3::new(2.0, 14.0, 16.0));
    assert_eq!((k.kx, k.ky, k.kz), (0, 1, 2));

    // magnitude only, sign does not matter
    let k = RayDimensions::new(&Vector3::new(2.0, 14.0, -16.0));
    assert_eq!((k.kx, k.ky, k.kz), (0, 1, 2));

    let k = RayDimensions::new(&Vector3::new(0.0, 14.0, 0.0));
    assert_eq!((k.kx, k.ky, k.kz), (2, 0, 1));
}

#[test]
fn test_ray_shear_axis_aligned() {
    let d = Vector3::unit_x();
    let k = RayDimensions::new(&d);
    let s = RayShear::new(&k, &d);
    assert_eq!((s.sx, s.sy, s.sz), (0.0, 0.0, 1.0));
}

#[test]
fn test_ray_triangle_facing_away() {
    let [a, b, c] = triangle();
    assert!(ray_triangle_intersection(&a, &b, &c, &ray([1.0, 0.0, 0.0], [1.0, 0.0, 0.0])).is_none());
}

#[test]
fn test_ray_triangle_facing_towards() {
    let [a, b, c] = triangle();
    let hit = ray_triangle_intersection(&a, &b, &c, &ray([1.0, 0.5, -0.5], [-1.0, 0.0, 0.0]))
        .expect("ray should hit the triangle");
    assert_abs_diff_eq!(hit.distance, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(hit.u + hit.v + hit.w, 1.0, epsilon = 1e-12);
}

#[test]
fn test_ray_triangle_parallel_misses() {
    let [a, b, c] = triangle();
    // offset from the plane
    assert!(ray_triangle_intersection(&a, &b, &c, &ray([1.0, 0.0, 0.0], [0.0, 1.0, 0.0])).is_none());
    // inside the plane
    assert!(ray_triangle_intersection(&a, &b, &c, &ray([0.0, 0.0, 0.0], [0.0, 1.0, 0.0])).is_none());
}

#[test]
fn test_ray_triangle_passing_above() {
    let [a, b, c] = triangle();
    assert!(ray_triangle_intersection(&a, &b, &c, &ray([1.0, 2.0, -0.5], [-1.0, 0.0, 0.0])).is_none());
}

#[test]
fn test_ray_triangle_glancing_hit() {
    let [a, b, c] = triangle();
    let r = ray([0.5, 0.5, -0.5], [-1.0, 0.9, 0.9]);
    let hit = ray_triangle_intersection(&a, &b, &c, &r).expect("glancing ray should hit");
    let p = r.point_at(hit.distance);
    assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
}

#[test]
fn test_ray_triangle_vertex_hit() {
    let [a, b, c] = triangle();
    let hit = ray_triangle_intersection(&a, &b, &c, &ray([1.0, 1.0, 1.0], [-1.0, 0.0, 0.0]))
        .expect("ray through a vertex should hit");
    assert_eq!(hit.u, 0.0);
    assert_eq!(hit.v, 0.0);
    assert_eq!(hit.w, 1.0);
    assert_abs_diff_eq!(hit.distance, 1.0, epsilon = 1e-12);
}

#[test]
fn test_ray_triangle_shared_edge_is_watertight() {
    // two triangles of a unit square in z = 0, split along the diagonal
    let p0 = Vector3::new(0.0, 0.0, 0.0);
    let p1 = Vector3::new(1.0, 0.0, 0.0);
    let p2 = Vector3::new(1.0, 1.0, 0.0);
    let p3 = Vector3::new(0.0, 1.0, 0.0);
    let r = ray([0.3, 0.3, 1.0], [0.0, 0.0, -1.0]);
    let first = ray_triangle_intersection(&p0, &p1, &p2, &r);
    let second = ray_triangle_intersection(&p0, &p2, &p3, &r);
    assert!(first.is_some() || second.is_some());
}

#[test]
fn test_ray_patch_facing_away() {
    assert!(patch(&planar_quad(), [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], 100.0).is_none());
}

#[test]
fn test_ray_patch_planar_hit_both_sides() {
    for (origin, direction) in [([1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]), ([-1.0, 0.0, 0.0], [1.0, 0.0, 0.0])] {
        let hit = patch(&planar_quad(), origin, direction, 100.0).expect("ray should hit the quad");
        assert_abs_diff_eq!(hit.distance, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hit.u, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(hit.v, 0.5, epsilon = 1e-12);
    }
}

#[test]
fn test_ray_patch_planar_miss() {
    assert!(patch(&planar_quad(), [1.0, 2.0, 0.0], [-1.0, 0.0, 0.0], 100.0).is_none());
}

#[test]
fn test_ray_patch_beyond_max_distance() {
    assert!(patch(&planar_quad(), [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], 0.5).is_none());
}

#[test]
fn test_ray_patch_non_planar_hit() {
    let q = [
        Vector3::new(-1.0, -1.0, -1.0),
        Vector3::new(0.0, -1.0, 1.0),
        Vector3::new(0.0, 2.0, -1.0),
        Vector3::new(0.0, 1.0, 1.0),
    ];
    let hit = patch(&q, [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], 100.0).expect("ray should hit the patch");
    assert_abs_diff_eq!(hit.u, 0.4, epsilon = 1e-9);
    assert_abs_diff_eq!(hit.v, 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(hit.distance, 1.3, epsilon = 1e-9);
}

#[test]
fn test_ray_patch_glancing_non_planar_hit() {
    let q = [
        Vector3::new(-1.0, -1.0, -1.0),
        Vector3::new(0.0, -1.0, 2.0),
        Vector3::new(0.0, 2.0, -1.0),
        Vector3::new(0.0, 1.0, 1.0),
    ];
    let hit = patch(&q, [1.0, 1.0, 1.0], [-1.0, -1.0, 0.0], 100.0).expect("glancing ray should hit");
    assert!((0.0..=1.0).contains(&hit.u));
    assert!((0.0..=1.0).contains(&hit.v));
    assert!(hit.distance > 0.0);
}

#[test]
fn test_ray_patch_twisted() {
    let q = [
        Vector3::new(0.2, -1.0, 1.0),
        Vector3::new(-0.2, -1.0, -1.0),
        Vector3::new(0.0, 1.0, -1.0),
        Vector3::new(0.0, 1.0, 1.0),
    ];
    // the ray runs exactly along the line where the twisted patch crosses itself
    assert!(patch(&q, [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], 100.0).is_none());

    let hit = patch(&q, [1.0, 0.1, 0.0], [-1.0, 0.0, 0.0], 100.0).expect("ray should hit off center");
    assert_abs_diff_eq!(hit.distance, 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(hit.v, 0.5, epsilon = 1e-9);
}

#[test]
fn test_lerp() {
    let r = lerp(&Vector3::new(0.2, 0.3, 0.1), &Vector3::new(-0.3, 1.0, 3.0), 0.7);
    assert_abs_diff_eq!(r.x, -0.15, epsilon = 1e-12);
    assert_abs_diff_eq!(r.y, 0.79, epsilon = 1e-12);
    assert_abs_diff_eq!(r.z, 2.13, epsilon = 1e-12);
}

#[test]
fn test_quaternion_rotation() {
    let q = Quaternion::from_axis_angle(&Vector3::unit_z(), std::f64::consts::FRAC_PI_2);
    let v = q.rotate_vector(&Vector3::unit_x());
    assert!(v.approx_eq(&Vector3::unit_y(), 1e-12));

    let m = Matrix4::from_rotation(&q);
    assert!(m.transform_point(&Vector3::unit_x()).approx_eq(&Vector3::unit_y(), 1e-12));
}

#[test]
fn test_quaternion_integration_stays_unit() {
    let mut q = Quaternion::identity();
    for _ in 0..100 {
        q = q.integrate(&Vector3::new(0.3, -2.0, 1.1), 0.01);
    }
    assert_abs_diff_eq!(q.norm(), 1.0, epsilon = 1e-12);
    assert_eq!(Quaternion::identity().integrate(&Vector3::zero(), 1.0), Quaternion::identity());
}

#[test]
fn test_matrix_inverse() {
    let m = Matrix3::new([[2.0, 0.0, 1.0], [1.0, 3.0, 0.0], [0.0, 1.0, 4.0]]);
    let inv = m.inverse().expect("matrix is invertible");
    assert!((m * inv).approx_eq(&Matrix3::identity(), 1e-12));
    assert_abs_diff_eq!(m.determinant(), 25.0, epsilon = 1e-12);
}
