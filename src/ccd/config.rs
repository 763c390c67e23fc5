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

/// Tolerances of the linear CCD query.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CcdConfig {
    /// Hits whose times differ by at most this much are simultaneous.
    pub time_delta: f64,
    /// Hits whose global points are closer than this are merged.
    pub combine_delta: f64,
    /// How far back in time edge directions are sampled for an edge/edge normal.
    pub normal_rollback: f64,
    /// Vertices travelling less than this are not swept.
    pub min_travel: f64,
    /// Edges whose directions differ by a sine at most this much count as parallel.
    pub parallel_tolerance: f64,
    /// Edge/edge hits closer than this to an end of either edge are left to the vertex
    /// tests, which give the contact a face normal.
    pub endpoint_margin: f64,
}

impl Default for CcdConfig {
    fn default() -> Self {
        Self {
            time_delta: 1e-6,
            combine_delta: 1e-3,
            normal_rollback: 1e-3,
            min_travel: 1e-6,
            parallel_tolerance: 1e-6,
            endpoint_margin: 1e-6,
        }
    }
}
