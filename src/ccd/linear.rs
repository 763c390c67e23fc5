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
    ccd::{CcdConfig, CcdHit, HitAccumulator, linear_ccd_one_way},
    geometry::{Matrix3, Matrix4, Vector3, VectorOps},
    mesh::Mesh,
};

/// Entry tolerance for "the relative transform did not change".
const RELATIVE_MOTION_EPSILON: f64 = 1e-12;

/// Earliest contacts of two meshes moving linearly over one step.
///
/// Each mesh moves from its `*_initial` to its `*_final` transform. The returned hits all
/// share (within `config.time_delta`) the earliest time of impact, carry global points,
/// and have unit normals pointing from `a` toward `b`. Hits closer than
/// `config.combine_delta` are merged. An empty result means no contact during the step.
pub fn linear_ccd(
    a: &Mesh,
    b: &Mesh,
    a_initial: &Matrix4,
    b_initial: &Matrix4,
    a_final: &Matrix4,
    b_final: &Matrix4,
    config: &CcdConfig,
) -> Vec<CcdHit> {
    let Some(frames) = Frames::new(a_initial, b_initial, a_final, b_final) else {
        tracing::warn!("singular mesh transform, skipping collision query");
        return Vec::new();
    };

    if frames.b_in_a_initial.approx_eq(&frames.b_in_a_final, RELATIVE_MOTION_EPSILON) {
        return Vec::new();
    }

    // A fixed, B moving; edges are only swept in this direction
    let b_moving = linear_ccd_one_way(
        a,
        b,
        &frames.b_in_a_initial,
        &frames.b_in_a_final,
        true,
        config,
    );
    // B fixed, A moving
    let a_moving = linear_ccd_one_way(
        b,
        a,
        &frames.a_in_b_initial,
        &frames.a_in_b_final,
        false,
        config,
    );

    let from_b_moving = to_global(b_moving, a_initial, a_final, &frames.a_normal, false);
    let from_a_moving = to_global(a_moving, b_initial, b_final, &frames.b_normal, true);

    let hits = match (from_b_moving, from_a_moving) {
        (None, None) => return Vec::new(),
        (Some((_, hits)), None) | (None, Some((_, hits))) => hits,
        (Some((t1, mut h1)), Some((t2, h2))) => {
            if (t1 - t2).abs() <= config.time_delta {
                h1.extend(h2);
                h1
            } else if t1 < t2 {
                h1
            } else {
                h2
            }
        }
    };

    combine_close_points(&hits, config.combine_delta)
}

/// Merge hits whose points lie within `combine_delta` of an earlier hit.
///
/// Hits are clustered greedily in input order around the first point of each cluster.
/// A cluster keeps that first point and its minimum time, and its normal is the
/// renormalized sum of the members' normals (the first normal if the sum vanishes).
pub fn combine_close_points(hits: &[CcdHit], combine_delta: f64) -> Vec<CcdHit> {
    let mut clusters: Vec<(CcdHit, Vector3)> = Vec::with_capacity(hits.len());

    'hits: for hit in hits {
        for (merged, normal_sum) in clusters.iter_mut() {
            // the cluster point is never moved, so this is the distance to its first hit
            if merged.point.distance(&hit.point) < combine_delta {
                merged.time = merged.time.min(hit.time);
                *normal_sum += hit.normal;
                continue 'hits;
            }
        }
        clusters.push((*hit, hit.normal));
    }

    clusters
        .into_iter()
        .map(|(mut hit, normal_sum)| {
            if let Some(n) = normal_sum.try_normalized() {
                hit.normal = n;
            }
            hit
        })
        .collect()
}

/// Everything `linear_ccd` needs about the two frames.
struct Frames {
    b_in_a_initial: Matrix4,
    b_in_a_final: Matrix4,
    a_in_b_initial: Matrix4,
    a_in_b_final: Matrix4,
    /// Normal matrices of A at the start and end of the step.
    a_normal: (Matrix3, Matrix3),
    b_normal: (Matrix3, Matrix3),
}

impl Frames {
    fn new(
        a_initial: &Matrix4,
        b_initial: &Matrix4,
        a_final: &Matrix4,
        b_final: &Matrix4,
    ) -> Option<Self> {
        let a_initial_inv = a_initial.affine_inverse()?;
        let a_final_inv = a_final.affine_inverse()?;
        let b_initial_inv = b_initial.affine_inverse()?;
        let b_final_inv = b_final.affine_inverse()?;

        Some(Self {
            b_in_a_initial: a_initial_inv * *b_initial,
            b_in_a_final: a_final_inv * *b_final,
            a_in_b_initial: b_initial_inv * *a_initial,
            a_in_b_final: b_final_inv * *a_final,
            a_normal: (a_initial.normal_matrix()?, a_final.normal_matrix()?),
            b_normal: (b_initial.normal_matrix()?, b_final.normal_matrix()?),
        })
    }
}

/// Carry one direction's hits from the stationary mesh's frame to global space at each
/// hit's own time. Returns the earliest time with the hits.
fn to_global(
    acc: HitAccumulator,
    initial: &Matrix4,
    fin: &Matrix4,
    normal: &(Matrix3, Matrix3),
    flip: bool,
) -> Option<(f64, Vec<CcdHit>)> {
    let earliest = acc.earliest()?;
    let hits = acc
        .into_hits()
        .into_iter()
        .filter_map(|hit| {
            let point = initial
                .transform_point(&hit.point)
                .lerp(&fin.transform_point(&hit.point), hit.time);
            let n = (normal.0 * hit.normal)
                .lerp(&(normal.1 * hit.normal), hit.time)
                .try_normalized()?;
            Some(CcdHit {
                time: hit.time,
                point,
                normal: if flip { -n } else { n },
            })
        })
        .collect::<Vec<_>>();
    if hits.is_empty() {
        None
    } else {
        Some((earliest, hits))
    }
}
