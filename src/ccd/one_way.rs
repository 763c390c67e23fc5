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

use crate::{
    ccd::{CcdConfig, CcdHit, HitAccumulator},
    geometry::{
        Matrix4, Vector3, VectorOps, WatertightRay, ray_patch_intersection,
        ray_triangle_intersection,
        util::{edge_edge_normal, facing_against, triangle_normal},
    },
    mesh::Mesh,
};

/// Sweep `moving` against a fixed `stationary` mesh.
///
/// Everything happens in the stationary mesh's local frame: `moving_initial` and
/// `moving_final` carry the moving mesh there at the start and end of the step, and each
/// moving vertex travels on the straight line between the two. Every moving vertex is
/// tested against every stationary triangle and, with `test_edges`, every stationary edge
/// against the patch swept by every moving edge.
///
/// The result holds only the hits tied for the earliest time, with points and normals
/// in the stationary frame. Normals oppose the moving side's motion.
pub fn linear_ccd_one_way(
    stationary: &Mesh,
    moving: &Mesh,
    moving_initial: &Matrix4,
    moving_final: &Matrix4,
    test_edges: bool,
    config: &CcdConfig,
) -> HitAccumulator {
    let mut acc = HitAccumulator::new(config.time_delta);

    let swept: Vec<(Vector3, Vector3)> = moving
        .vertices()
        .iter()
        .map(|p| {
            (
                moving_initial.transform_point(p),
                moving_final.transform_point(p),
            )
        })
        .collect();

    point_face_pass(stationary, &swept, config, &mut acc);
    let point_hits = acc.len();

    if test_edges {
        edge_edge_pass(stationary, moving, &swept, config, &mut acc);
    }

    tracing::trace!(
        point_hits,
        total_hits = acc.len(),
        earliest = acc.earliest(),
        "one-way sweep"
    );
    acc
}

fn point_face_pass(
    stationary: &Mesh,
    swept: &[(Vector3, Vector3)],
    config: &CcdConfig,
    acc: &mut HitAccumulator,
) {
    for &(start, end) in swept {
        let travel_vec = end - start;
        let travel = travel_vec.norm();
        if !(travel >= config.min_travel) {
            continue;
        }
        let direction = travel_vec / travel;
        let ray = WatertightRay::new(start, direction);

        for [a, b, c] in stationary.triangles() {
            let Some(hit) = ray_triangle_intersection(&a, &b, &c, &ray) else {
                continue;
            };
            let time = hit.distance / travel;
            if time > 1.0 {
                continue;
            }
            let Some(normal) = triangle_normal(&a, &b, &c) else {
                continue;
            };
            acc.offer(CcdHit {
                time,
                point: ray.point_at(hit.distance),
                normal: facing_against(normal, &direction),
            });
        }
    }
}

fn edge_edge_pass(
    stationary: &Mesh,
    moving: &Mesh,
    swept: &[(Vector3, Vector3)],
    config: &CcdConfig,
    acc: &mut HitAccumulator,
) {
    let moving_edges: Vec<[(Vector3, Vector3); 2]> = moving
        .edge_indices()
        .chunks_exact(2)
        .map(|e| [swept[e[0] as usize], swept[e[1] as usize]])
        .collect();

    for [s0, s1] in stationary.edges() {
        let edge = s1 - s0;
        let length = edge.norm();
        let Some(edge_dir) = edge.try_normalized() else {
            continue;
        };

        for &[(m0_start, m0_end), (m1_start, m1_end)] in &moving_edges {
            let Some(hit) = ray_patch_intersection(
                &m0_start, &m0_end, &m1_start, &m1_end, &s0, &edge_dir, length,
            ) else {
                continue;
            };
            let time = hit.v;

            let moving_length =
                (m1_start.lerp(&m1_end, time) - m0_start.lerp(&m0_end, time)).norm();
            let along_moving = hit.u.min(1.0 - hit.u) * moving_length;
            let along_stationary = hit.distance.min(length - hit.distance);
            if along_moving <= config.endpoint_margin || along_stationary <= config.endpoint_margin
            {
                // a vertex touching an edge
                continue;
            }

            // displacement of the moving edge point that touched the stationary edge
            let displacement =
                m0_end.lerp(&m1_end, hit.u) - m0_start.lerp(&m1_start, hit.u);

            let sample = (time - config.normal_rollback).max(0.0);
            let moving_dir = m1_start.lerp(&m1_end, sample) - m0_start.lerp(&m0_end, sample);
            let normal = match edge_edge_normal(&edge_dir, &moving_dir, config.parallel_tolerance) {
                Some(n) => facing_against(n, &displacement),
                None => match (-displacement).try_normalized() {
                    Some(n) => n,
                    None => continue,
                },
            };

            acc.offer(CcdHit {
                time,
                point: s0 + edge_dir * hit.distance,
                normal,
            });
        }
    }
}
