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

use std::collections::HashMap;

use crate::geometry::Vector3;

/// Uniform grid over vertex positions, used to weld vertices closer than a radius.
#[derive(Debug, Clone)]
pub struct VertexGrid {
    radius: f64,
    hash_inv: f64,
    cells: HashMap<(i64, i64, i64), Vec<u32>>,
}

impl VertexGrid {
    /// Grid whose cells are `radius` wide; neighbours within `radius` are then always
    /// in adjacent cells.
    pub fn new(radius: f64) -> Self {
        let mut cell = radius.max(1e-12); // clamp to avoid INF
        if !cell.is_finite() {
            cell = 1e-3;
        }
        Self {
            radius,
            hash_inv: 1.0 / cell,
            cells: HashMap::new(),
        }
    }

    #[inline(always)]
    fn floor_sat_i64(x: f64) -> i64 {
        if !x.is_finite() {
            return if x.is_sign_positive() { i64::MAX } else { i64::MIN };
        }
        let i = x as i64;
        i - ((i as f64 > x) as i64)
    }

    #[inline(always)]
    pub fn position_to_hash_key(&self, pos: &Vector3) -> (i64, i64, i64) {
        (
            Self::floor_sat_i64(pos.x * self.hash_inv),
            Self::floor_sat_i64(pos.y * self.hash_inv),
            Self::floor_sat_i64(pos.z * self.hash_inv),
        )
    }

    pub fn insert(&mut self, pos: &Vector3, index: u32) {
        let key = self.position_to_hash_key(pos);
        self.cells.entry(key).or_default().push(index);
    }

    /// Lowest-indexed stored vertex strictly closer than the radius to `pos`.
    pub fn find_close(&self, pos: &Vector3, vertices: &[Vector3]) -> Option<u32> {
        let (kx, ky, kz) = self.position_to_hash_key(pos);
        let mut best: Option<u32> = None;
        for dx in -1..=1_i64 {
            for dy in -1..=1_i64 {
                for dz in -1..=1_i64 {
                    let key = (
                        kx.saturating_add(dx),
                        ky.saturating_add(dy),
                        kz.saturating_add(dz),
                    );
                    let Some(bucket) = self.cells.get(&key) else {
                        continue;
                    };
                    for &idx in bucket {
                        if vertices[idx as usize].distance(pos) < self.radius
                            && best.is_none_or(|b| idx < b)
                        {
                            best = Some(idx);
                        }
                    }
                }
            }
        }
        best
    }
}
