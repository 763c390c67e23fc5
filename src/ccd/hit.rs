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

use crate::geometry::Vector3;

/// One contact of a sweep.
///
/// `time` is the fraction of the step in `[0, 1]` at which the contact happens. Results
/// of [`linear_ccd`](crate::ccd::linear_ccd) carry a global `point` and a unit `normal`
/// pointing from mesh A toward mesh B.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CcdHit {
    pub time: f64,
    pub point: Vector3,
    pub normal: Vector3,
}

/// Keeps every hit tied for the earliest time seen so far.
///
/// A hit earlier than the current best by more than `time_delta` replaces the whole set,
/// one within `time_delta` of it joins the set, and anything later is dropped. The best
/// time only moves on replacement.
#[derive(Debug, Clone)]
pub struct HitAccumulator {
    time_delta: f64,
    earliest: f64,
    hits: Vec<CcdHit>,
}

impl HitAccumulator {
    pub fn new(time_delta: f64) -> Self {
        Self {
            time_delta,
            earliest: f64::INFINITY,
            hits: Vec::new(),
        }
    }

    pub fn offer(&mut self, hit: CcdHit) {
        if !hit.time.is_finite() {
            return;
        }
        if hit.time < self.earliest - self.time_delta {
            self.hits.clear();
            self.earliest = hit.time;
            self.hits.push(hit);
        } else if (hit.time - self.earliest).abs() <= self.time_delta {
            self.hits.push(hit);
        }
    }

    /// Best time so far, `None` until a hit has been offered.
    pub fn earliest(&self) -> Option<f64> {
        if self.hits.is_empty() {
            None
        } else {
            Some(self.earliest)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn hits(&self) -> &[CcdHit] {
        &self.hits
    }

    pub fn into_hits(self) -> Vec<CcdHit> {
        self.hits
    }
}

impl Extend<CcdHit> for HitAccumulator {
    fn extend<I: IntoIterator<Item = CcdHit>>(&mut self, iter: I) {
        for hit in iter {
            self.offer(hit);
        }
    }
}
