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
use linccd::{
    ccd::{CcdConfig, CcdHit, HitAccumulator, combine_close_points, linear_ccd},
    geometry::{Matrix4, Quaternion, Vector3},
    mesh::Mesh,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn unit_cube() -> Mesh {
    Mesh::cuboid(Vector3::zero(), Vector3::splat(1.0))
}

fn translation(x: f64, y: f64, z: f64) -> Matrix4 {
    Matrix4::from_translation(&Vector3::new(x, y, z))
}

fn assert_top_face_hits(hits: &[CcdHit], max_xy: f64) {
    for hit in hits {
        assert_abs_diff_eq!(hit.time, 0.4, epsilon = 1e-9);
        assert_abs_diff_eq!(hit.point.z, 1.0, epsilon = 1e-9);
        assert!((-1e-9..=max_xy + 1e-9).contains(&hit.point.x));
        assert!((-1e-9..=max_xy + 1e-9).contains(&hit.point.y));
        assert!(hit.normal.approx_eq(&Vector3::new(0.0, 0.0, -1.0), 1e-9));
    }
}

#[test]
fn test_cube_swept_through_cube() {
    let cube = unit_cube();
    let fixed = Matrix4::identity();
    let hits = linear_ccd(
        &cube,
        &cube,
        &translation(0.0, 0.0, 5.0),
        &fixed,
        &translation(0.0, 0.0, -5.0),
        &fixed,
        &CcdConfig::default(),
    );
    // one hit per corner of the moving cube's bottom face
    assert_eq!(hits.len(), 4);
    assert_top_face_hits(&hits, 1.0);
}

#[test]
fn test_scaled_cube_keeps_time_of_impact() {
    let cube = unit_cube();
    let fixed = Matrix4::identity();
    let half = Matrix4::from_uniform_scale(0.5);
    let hits = linear_ccd(
        &cube,
        &cube,
        &(translation(0.0, 0.0, 5.0) * half),
        &fixed,
        &(translation(0.0, 0.0, -5.0) * half),
        &fixed,
        &CcdConfig::default(),
    );
    assert_eq!(hits.len(), 4);
    assert_top_face_hits(&hits, 0.5);
}

#[test]
fn test_normals_point_from_a_to_b() {
    // B rises into A from below, so A -> B is downward
    let cube = unit_cube();
    let fixed = Matrix4::identity();
    let hits = linear_ccd(
        &cube,
        &cube,
        &fixed,
        &translation(0.0, 0.0, -5.0),
        &fixed,
        &translation(0.0, 0.0, 5.0),
        &CcdConfig::default(),
    );
    assert!(!hits.is_empty());
    for hit in &hits {
        assert_abs_diff_eq!(hit.time, 0.4, epsilon = 1e-9);
        assert_abs_diff_eq!(hit.point.z, 0.0, epsilon = 1e-9);
        assert!(hit.normal.approx_eq(&Vector3::new(0.0, 0.0, -1.0), 1e-9));
    }
}

#[test]
fn test_passing_beside_reports_nothing() {
    let cube = unit_cube();
    let fixed = Matrix4::identity();
    let hits = linear_ccd(
        &cube,
        &cube,
        &translation(3.0, 0.0, 5.0),
        &fixed,
        &translation(3.0, 0.0, -5.0),
        &fixed,
        &CcdConfig::default(),
    );
    assert!(hits.is_empty());
}

#[test]
fn test_identical_transforms_report_nothing() {
    let cube = unit_cube();
    let config = CcdConfig::default();
    let poses = [
        Matrix4::identity(),
        translation(0.25, 0.5, 0.0),
        Matrix4::from_translation_rotation(
            &Vector3::new(0.2, -0.1, 0.3),
            &Quaternion::from_axis_angle(&Vector3::new(1.0, 1.0, 0.0), 0.6),
        ),
    ];
    for a in &poses {
        for b in &poses {
            // overlapping or not, nothing moves
            assert!(linear_ccd(&cube, &cube, a, b, a, b, &config).is_empty());
        }
    }
}

#[test]
fn test_equal_velocities_report_nothing() {
    let cube = unit_cube();
    let config = CcdConfig::default();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..25 {
        let mut sample = || {
            Vector3::new(
                rng.random_range(-5.0..5.0),
                rng.random_range(-5.0..5.0),
                rng.random_range(-5.0..5.0),
            )
        };
        let velocity = sample();
        let a0 = sample();
        let b0 = sample();
        let hits = linear_ccd(
            &cube,
            &cube,
            &Matrix4::from_translation(&a0),
            &Matrix4::from_translation(&b0),
            &Matrix4::from_translation(&(a0 + velocity)),
            &Matrix4::from_translation(&(b0 + velocity)),
            &config,
        );
        assert!(hits.is_empty(), "hits for shared velocity {velocity:?}");
    }
}

#[test]
fn test_singular_transform_reports_nothing() {
    let cube = unit_cube();
    let hits = linear_ccd(
        &cube,
        &cube,
        &Matrix4::from_uniform_scale(0.0),
        &Matrix4::identity(),
        &translation(0.0, 0.0, -5.0),
        &Matrix4::identity(),
        &CcdConfig::default(),
    );
    assert!(hits.is_empty());
}

#[test]
fn test_combine_close_points() {
    let up = CcdHit {
        time: 0.5,
        point: Vector3::zero(),
        normal: Vector3::unit_z(),
    };
    let side = CcdHit {
        time: 0.4,
        point: Vector3::new(0.0005, 0.0, 0.0),
        normal: Vector3::unit_x(),
    };
    let far = CcdHit {
        time: 0.5,
        point: Vector3::new(1.0, 0.0, 0.0),
        normal: Vector3::unit_z(),
    };

    let merged = combine_close_points(&[up, side, far], 1e-3);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].point, up.point);
    assert_eq!(merged[0].time, 0.4);
    let expected = Vector3::new(1.0, 0.0, 1.0) / 2.0_f64.sqrt();
    assert!(merged[0].normal.approx_eq(&expected, 1e-12));
    assert_eq!(merged[1], far);
}

#[test]
fn test_accumulator_keeps_earliest_ties() {
    let at = |time: f64, x: f64| CcdHit {
        time,
        point: Vector3::new(x, 0.0, 0.0),
        normal: Vector3::unit_z(),
    };
    let mut acc = HitAccumulator::new(1e-6);
    acc.extend([at(0.7, 0.0), at(0.3, 1.0), at(0.3 + 5e-7, 2.0), at(0.9, 3.0), at(f64::NAN, 4.0)]);
    assert_eq!(acc.earliest(), Some(0.3));
    assert_eq!(acc.len(), 2);
    assert_eq!(acc.hits()[1].point.x, 2.0);
}
