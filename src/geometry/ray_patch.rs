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

use crate::geometry::vector::{Vector3, VectorOps};

/// Patch parameters and ray distance of a ray/bilinear patch hit.
///
/// `u` runs along `q00 → q10` (and `q01 → q11`), `v` along `q00 → q01`
/// (and `q10 → q11`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchHit {
    pub u: f64,
    pub v: f64,
    pub distance: f64,
}

/// Intersect a ray with the bilinear patch spanned by `q00, q01, q10, q11`
/// (Reshetov, "Cool Patches", Ray Tracing Gems ch. 8).
///
/// Returns the nearest hit with `u, v ∈ [0, 1]` and `distance ∈ (0, max_distance)`.
/// Both faces of the patch can be hit. Degenerate patches and rays lying inside a
/// planar patch report no hit.
pub fn ray_patch_intersection(
    q00: &Vector3,
    q01: &Vector3,
    q10: &Vector3,
    q11: &Vector3,
    origin: &Vector3,
    direction: &Vector3,
    max_distance: f64,
) -> Option<PatchHit> {
    let e10 = *q10 - *q00;
    let e11 = *q11 - *q10;
    let e00 = *q01 - *q00;
    let qn = e10.cross(&(*q01 - *q11));

    let p00 = *q00 - *origin;
    let p10 = *q10 - *origin;

    // a + b·u + c·u² = 0
    let a = p00.cross(direction).dot(&e00);
    let c = qn.dot(direction);
    let b = p10.cross(direction).dot(&e11) - (a + c);

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 || disc.is_nan() {
        return None;
    }
    let disc = disc.sqrt();

    let (u1, u2) = if c == 0.0 {
        // trapezoid: the quadratic collapses to a line
        (-a / b, -1.0)
    } else {
        let q = 0.5 * (-b - disc.copysign(b));
        // Viète: u1·u2 = a / c
        (q / c, a / q)
    };

    let mut best: Option<PatchHit> = None;
    for u in [u1, u2] {
        if !(0.0..=1.0).contains(&u) {
            continue;
        }
        let Some(candidate) = closest_approach(&p00, &p10, &e00, &e11, direction, u) else {
            continue;
        };
        if candidate.distance <= 0.0 || candidate.distance >= max_distance {
            continue;
        }
        if best.is_none_or(|b| candidate.distance < b.distance) {
            best = Some(candidate);
        }
    }
    best
}

/// `v` and ray distance where the ray meets the patch's `u`-isoline, the segment
/// from `lerp(p00, p10, u)` along `lerp(e00, e11, u)`.
fn closest_approach(
    p00: &Vector3,
    p10: &Vector3,
    e00: &Vector3,
    e11: &Vector3,
    direction: &Vector3,
    u: f64,
) -> Option<PatchHit> {
    let pa = p00.lerp(p10, u);
    let pb = e00.lerp(e11, u);
    let n = direction.cross(&pb);
    let det = n.dot(&n);
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    let n = n.cross(&pa);
    let distance = n.dot(&pb) / det;
    let v = n.dot(direction) / det;
    if !(0.0..=1.0).contains(&v) || !distance.is_finite() {
        return None;
    }
    Some(PatchHit { u, v, distance })
}
