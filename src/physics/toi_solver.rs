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

use tracing::{debug, trace, warn};

use crate::{
    ccd::{CcdConfig, CcdHit, linear_ccd},
    error::SolverError,
    geometry::{Vector3, VectorOps},
    physics::RigidBody,
};

/// Index of a body inside a [`ToiSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(usize);

impl BodyHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SolverConfig {
    pub gravity: Vector3,
    /// Cap on resolve/rollback rounds within one step.
    pub max_iterations: usize,
    /// Velocity passes over a set of simultaneous contacts.
    pub relaxation_iterations: usize,
    /// Fraction of the remaining time kept back before each impact.
    pub rollback_fraction: f64,
    /// Normal speed every resolved contact is left separating at, so that resting bodies
    /// keep a gap the next sweep can see.
    pub separation_speed: f64,
    pub ccd: CcdConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            gravity: Vector3::new(0.0, -9.8, 0.0),
            max_iterations: 256,
            relaxation_iterations: 8,
            rollback_fraction: 0.01,
            separation_speed: 1e-3,
            ccd: CcdConfig::default(),
        }
    }
}

/// How a [`ToiSolver::step`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Every contact was resolved.
    Converged { iterations: usize },
    /// The iteration cap was hit with `unresolved` contacts still pending. Bodies were
    /// only moved up to the earliest of them; the rest of the step was dropped.
    ExceededIterationCap { iterations: usize, unresolved: usize },
}

impl StepOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, StepOutcome::Converged { .. })
    }

    pub fn iterations(&self) -> usize {
        match *self {
            StepOutcome::Converged { iterations }
            | StepOutcome::ExceededIterationCap { iterations, .. } => iterations,
        }
    }
}

/// A contact between two bodies; `hit.time` is a fraction of the time remaining in the
/// step when it was found, and `hit.normal` points from `a` to `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactHit {
    pub a: BodyHandle,
    pub b: BodyHandle,
    pub hit: CcdHit,
}

/// Time-of-impact rigid body solver.
///
/// Each step sweeps every body pair, moves everything to just before the earliest
/// contacts, stops the approaching motion there and sweeps again over what is left of the
/// step, until the step runs out or nothing collides. Contacts found during a step are
/// kept and resolved together every round, so a stack settles instead of trading
/// impulses between its layers.
#[derive(Debug, Clone, Default)]
pub struct ToiSolver {
    config: SolverConfig,
    bodies: Vec<RigidBody>,
}

impl ToiSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            bodies: Vec::new(),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() - 1)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.0)
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Advance the world by `dt` seconds.
    pub fn step(&mut self, dt: f64) -> Result<StepOutcome, SolverError> {
        if !(dt >= 0.0) || !dt.is_finite() {
            return Err(SolverError::InvalidTimeStep(dt));
        }

        let gravity = self.config.gravity;
        for body in &mut self.bodies {
            if body.dynamic {
                body.velocity += (gravity + body.force / body.mass) * dt;
            }
            body.force = Vector3::zero();
        }

        let mut remaining = dt;
        let mut iterations = 0;
        let mut manifold: Vec<ContactHit> = Vec::new();
        let mut contacts = self.find_contacts(remaining);

        let outcome = loop {
            let Some(first) = contacts.first() else {
                break StepOutcome::Converged { iterations };
            };
            let toi = first.hit.time;
            // only motion that was just swept is executed
            let advance = (toi - self.config.rollback_fraction).max(0.0) * remaining;

            if iterations >= self.config.max_iterations {
                warn!(
                    iterations,
                    unresolved = contacts.len(),
                    "collision resolution hit the iteration cap"
                );
                for body in &mut self.bodies {
                    body.advance(advance);
                }
                remaining = 0.0;
                break StepOutcome::ExceededIterationCap {
                    iterations,
                    unresolved: contacts.len(),
                };
            }
            iterations += 1;

            let window = self.config.rollback_fraction + self.config.ccd.time_delta;
            let imminent = contacts
                .iter()
                .take_while(|c| c.hit.time - toi <= window)
                .count();
            merge_contacts(&mut manifold, &contacts[..imminent], self.config.ccd.combine_delta);

            for body in &mut self.bodies {
                body.advance(advance);
            }
            self.resolve(&manifold);
            debug!(
                iteration = iterations,
                toi,
                found = imminent,
                resolved = manifold.len(),
                advance,
                "rolled back and resolved contacts"
            );
            remaining -= advance;
            if remaining <= 0.0 {
                remaining = 0.0;
                break StepOutcome::Converged { iterations };
            }

            contacts = self.find_contacts(remaining);
        };

        for body in &mut self.bodies {
            body.advance(remaining);
        }
        Ok(outcome)
    }

    /// Sweep every pair over `remaining` seconds and return the approaching contacts
    /// ordered by time.
    fn find_contacts(&self, remaining: f64) -> Vec<ContactHit> {
        let poses: Vec<_> = self
            .bodies
            .iter()
            .map(|b| (b.transform(), b.integrated_transform(remaining)))
            .collect();

        let mut contacts = Vec::new();
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (a, b) = (&self.bodies[i], &self.bodies[j]);
                if !a.dynamic && !b.dynamic {
                    continue;
                }
                let hits = linear_ccd(
                    &a.collider,
                    &b.collider,
                    &poses[i].0,
                    &poses[j].0,
                    &poses[i].1,
                    &poses[j].1,
                    &self.config.ccd,
                );
                for hit in hits {
                    if hit.time >= 1.0 {
                        continue;
                    }
                    // a separating contact cannot be fixed by an impulse
                    if relative_normal_velocity(a, b, &hit) >= 0.0 {
                        trace!(time = hit.time, "skipping separating contact");
                        continue;
                    }
                    contacts.push(ContactHit {
                        a: BodyHandle(i),
                        b: BodyHandle(j),
                        hit,
                    });
                }
            }
        }
        contacts.sort_by(|x, y| x.hit.time.total_cmp(&y.hit.time));
        contacts
    }

    /// Push the two bodies of each contact apart with impulses until they separate at
    /// `separation_speed` along its normal.
    ///
    /// The contacts are swept `relaxation_iterations` times. Each contact keeps the total
    /// impulse applied to it so far, which may only push the bodies apart; a later pass can
    /// take back part of an earlier one when neighbouring contacts already did the work.
    fn resolve(&mut self, contacts: &[ContactHit]) {
        let mut accumulated = vec![0.0; contacts.len()];
        for _ in 0..self.config.relaxation_iterations {
            for (contact, total) in contacts.iter().zip(accumulated.iter_mut()) {
                let Some((a, b)) = pair_mut(&mut self.bodies, contact.a.0, contact.b.0) else {
                    continue;
                };
                let CcdHit { point, normal, .. } = contact.hit;

                let ra = point - a.position;
                let rb = point - b.position;
                let angular_a = (a.inverse_inertia_world() * ra.cross(&normal)).cross(&ra);
                let angular_b = (b.inverse_inertia_world() * rb.cross(&normal)).cross(&rb);
                let effective = a.inverse_mass()
                    + b.inverse_mass()
                    + (angular_a + angular_b).dot(&normal);
                if !(effective > 0.0) || !effective.is_finite() {
                    continue;
                }

                let vn = relative_normal_velocity(a, b, &contact.hit);
                let clamped = (*total + (self.config.separation_speed - vn) / effective).max(0.0);
                let delta = clamped - *total;
                *total = clamped;
                if delta == 0.0 {
                    continue;
                }

                let impulse = normal * delta;
                a.apply_impulse_at_point(&(-impulse), &point);
                b.apply_impulse_at_point(&impulse, &point);
            }
        }
    }
}

/// Normal speed of `b` relative to `a` at the contact; negative while they approach.
fn relative_normal_velocity(a: &RigidBody, b: &RigidBody, hit: &CcdHit) -> f64 {
    (b.velocity_at_point(&hit.point) - a.velocity_at_point(&hit.point)).dot(&hit.normal)
}

/// Add `found` to the contacts kept for this step. A contact on the same pair within
/// `combine_delta` of a kept one replaces it.
fn merge_contacts(manifold: &mut Vec<ContactHit>, found: &[ContactHit], combine_delta: f64) {
    for contact in found {
        let same = manifold.iter_mut().find(|kept| {
            kept.a == contact.a
                && kept.b == contact.b
                && (kept.hit.point - contact.hit.point).norm() < combine_delta
        });
        match same {
            Some(kept) => *kept = *contact,
            None => manifold.push(*contact),
        }
    }
}

fn pair_mut(bodies: &mut [RigidBody], i: usize, j: usize) -> Option<(&mut RigidBody, &mut RigidBody)> {
    if i < j && j < bodies.len() {
        let (lo, hi) = bodies.split_at_mut(j);
        Some((&mut lo[i], &mut hi[0]))
    } else {
        None
    }
}
