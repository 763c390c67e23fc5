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

use std::sync::Arc;

use crate::{
    error::BodyError,
    geometry::{Matrix, Matrix3, Matrix4, Quaternion, Vector3, VectorOps},
    mesh::Mesh,
};

/// Rigid body with a shared mesh collider.
///
/// `position` is the world position of the center of mass; `local_center_of_mass` is the
/// same point in the collider's own frame, so the collider is placed in the world by
/// [`RigidBody::transform`].
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub position: Vector3,
    pub orientation: Quaternion,
    pub velocity: Vector3,
    pub angular_velocity: Vector3,
    pub collider: Arc<Mesh>,
    pub local_center_of_mass: Vector3,
    pub mass: f64,
    /// Body-frame inertia tensor about the center of mass.
    pub inertia: Matrix3,
    /// Force accumulated for the next step.
    pub force: Vector3,
    /// Dynamic bodies feel gravity and respond to contacts; others never move on their own.
    pub dynamic: bool,
}

impl RigidBody {
    /// Mass properties of the collider treated as a hollow shell of panels with the given
    /// `density` (mass per unit volume) and `thickness`.
    ///
    /// Each triangle weighs `area · density · thickness`, split evenly between its three
    /// corners for the inertia tensor. The body starts where the collider was authored.
    pub fn from_mesh(collider: Arc<Mesh>, density: f64, thickness: f64) -> Result<Self, BodyError> {
        let mut mass = 0.0;
        let mut weighted_center = Vector3::zero();
        for [a, b, c] in collider.triangles() {
            let m = triangle_area(&a, &b, &c) * density * thickness;
            mass += m;
            weighted_center += (a + b + c) * (m / 3.0);
        }
        if collider.is_empty() {
            return Err(BodyError::EmptyCollider);
        }
        if !(mass > 0.0) || !mass.is_finite() {
            return Err(BodyError::InvalidMass(mass));
        }
        let center = weighted_center / mass;

        let mut inertia = Matrix3::zero();
        for [a, b, c] in collider.triangles() {
            let corner_mass = triangle_area(&a, &b, &c) * density * thickness / 3.0;
            for p in [a, b, c] {
                inertia = inertia + point_inertia(&(p - center), corner_mass);
            }
        }

        Self::with_mass_properties(collider, mass, center, inertia)
    }

    /// Dynamic body with explicit mass properties, initially at rest where the collider
    /// was authored.
    pub fn with_mass_properties(
        collider: Arc<Mesh>,
        mass: f64,
        center_of_mass: Vector3,
        inertia: Matrix3,
    ) -> Result<Self, BodyError> {
        if !(mass > 0.0) || !mass.is_finite() {
            return Err(BodyError::InvalidMass(mass));
        }
        Ok(Self {
            position: center_of_mass,
            orientation: Quaternion::identity(),
            velocity: Vector3::zero(),
            angular_velocity: Vector3::zero(),
            collider,
            local_center_of_mass: center_of_mass,
            mass,
            inertia,
            force: Vector3::zero(),
            dynamic: true,
        })
    }

    /// Solid box of the given full `dimensions` centred on the collider's local origin.
    pub fn solid_box(collider: Arc<Mesh>, mass: f64, dimensions: Vector3) -> Result<Self, BodyError> {
        let x2 = dimensions.x * dimensions.x;
        let y2 = dimensions.y * dimensions.y;
        let z2 = dimensions.z * dimensions.z;
        let inertia = Matrix3::from_diagonal([
            mass / 12.0 * (y2 + z2),
            mass / 12.0 * (x2 + z2),
            mass / 12.0 * (x2 + y2),
        ]);
        Self::with_mass_properties(collider, mass, Vector3::zero(), inertia)
    }

    /// Immovable body placed with the collider's local origin at the world origin.
    pub fn fixed(collider: Arc<Mesh>) -> Self {
        Self {
            position: Vector3::zero(),
            orientation: Quaternion::identity(),
            velocity: Vector3::zero(),
            angular_velocity: Vector3::zero(),
            collider,
            local_center_of_mass: Vector3::zero(),
            mass: f64::INFINITY,
            inertia: Matrix3::identity(),
            force: Vector3::zero(),
            dynamic: false,
        }
    }

    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }

    pub fn with_orientation(mut self, orientation: Quaternion) -> Self {
        self.orientation = orientation.normalized();
        self
    }

    pub fn with_velocity(mut self, velocity: Vector3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: Vector3) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Collider-to-world transform `T(position) · R(orientation) · T(-local_center_of_mass)`.
    pub fn transform(&self) -> Matrix4 {
        pose_transform(&self.position, &self.orientation, &self.local_center_of_mass)
    }

    /// Transform the body would have after moving freely for `dt`.
    pub fn integrated_transform(&self, dt: f64) -> Matrix4 {
        let (position, orientation) = self.pose_after(dt);
        pose_transform(&position, &orientation, &self.local_center_of_mass)
    }

    /// Move freely for `dt` at the current velocities.
    pub fn advance(&mut self, dt: f64) {
        let (position, orientation) = self.pose_after(dt);
        self.position = position;
        self.orientation = orientation;
    }

    fn pose_after(&self, dt: f64) -> (Vector3, Quaternion) {
        (
            self.position + self.velocity * dt,
            self.orientation.integrate(&self.angular_velocity, dt),
        )
    }

    /// World velocity of the body-fixed point currently at `point`.
    pub fn velocity_at_point(&self, point: &Vector3) -> Vector3 {
        self.velocity + self.angular_velocity.cross(&(*point - self.position))
    }

    pub fn inverse_mass(&self) -> f64 {
        if self.dynamic && self.mass.is_finite() {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    /// World-space inverse inertia `R · I⁻¹ · Rᵀ`; zero for non-dynamic bodies and
    /// singular tensors.
    pub fn inverse_inertia_world(&self) -> Matrix3 {
        if !self.dynamic {
            return Matrix3::zero();
        }
        match self.inertia.inverse() {
            Some(inv) => {
                let r = self.orientation.to_matrix3();
                r * inv * r.transpose()
            }
            None => Matrix3::zero(),
        }
    }

    /// Apply `impulse` at the world `point`, changing both linear and angular velocity.
    pub fn apply_impulse_at_point(&mut self, impulse: &Vector3, point: &Vector3) {
        if !self.dynamic {
            return;
        }
        self.velocity += impulse.scale(self.inverse_mass());
        let torque = (*point - self.position).cross(impulse);
        self.angular_velocity += self.inverse_inertia_world() * torque;
    }

    /// Accumulate a force, consumed by the next solver step.
    pub fn apply_force(&mut self, force: Vector3) {
        self.force += force;
    }
}

fn pose_transform(position: &Vector3, orientation: &Quaternion, center: &Vector3) -> Matrix4 {
    Matrix4::from_translation_rotation(position, orientation) * Matrix4::from_translation(&(-*center))
}

fn triangle_area(a: &Vector3, b: &Vector3, c: &Vector3) -> f64 {
    0.5 * (*b - *a).cross(&(*c - *a)).norm()
}

/// Inertia tensor of a point mass at offset `r`.
fn point_inertia(r: &Vector3, mass: f64) -> Matrix3 {
    Matrix([
        [r.y * r.y + r.z * r.z, -r.x * r.y, -r.x * r.z],
        [-r.x * r.y, r.x * r.x + r.z * r.z, -r.y * r.z],
        [-r.x * r.z, -r.y * r.z, r.x * r.x + r.y * r.y],
    ])
    .scale(mass)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_inertia_is_symmetric() {
        let i = point_inertia(&Vector3::new(1.0, 2.0, 3.0), 2.0);
        assert_eq!(i, i.transpose());
        assert_eq!(i[0][0], 26.0);
    }

    #[test]
    fn fixed_body_ignores_impulses() {
        let mesh = Arc::new(Mesh::cuboid(Vector3::zero(), Vector3::splat(1.0)));
        let mut body = RigidBody::fixed(mesh);
        body.apply_impulse_at_point(&Vector3::new(0.0, 5.0, 0.0), &Vector3::splat(1.0));
        assert_eq!(body.velocity, Vector3::zero());
        assert_eq!(body.angular_velocity, Vector3::zero());
        assert_eq!(body.inverse_mass(), 0.0);
    }
}
