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

/// Point on the segment `a → b` at parameter `t`.
#[inline(always)]
pub fn lerp(a: &Vector3, b: &Vector3, t: f64) -> Vector3 {
    a.lerp(b, t)
}

/// Unit normal of triangle `abc` (right-handed winding), `None` if degenerate.
pub fn triangle_normal(a: &Vector3, b: &Vector3, c: &Vector3) -> Option<Vector3> {
    (*b - *a).cross(&(*c - *a)).try_normalized()
}

/// Unit vector perpendicular to both edge directions.
///
/// `None` when the sine of the angle between them is at most `parallel_tolerance`: the
/// cross product of nearly parallel edges points anywhere around them.
pub fn edge_edge_normal(d0: &Vector3, d1: &Vector3, parallel_tolerance: f64) -> Option<Vector3> {
    let cross = d0.cross(d1);
    let scale = d0.norm() * d1.norm();
    if cross.norm() <= parallel_tolerance * scale {
        return None;
    }
    cross.try_normalized()
}

/// `normal`, flipped if needed so that it does not point along `direction`.
#[inline(always)]
pub fn facing_against(normal: Vector3, direction: &Vector3) -> Vector3 {
    if normal.dot(direction) > 0.0 { -normal } else { normal }
}
