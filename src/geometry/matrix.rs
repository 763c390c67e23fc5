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

use std::{
    array,
    ops::{Add, Index, IndexMut, Mul, Sub},
};

use crate::geometry::{quaternion::Quaternion, vector::Vector3};
use crate::numeric::{approx_eq, lerp};

/// Generic row-major matrix R x C
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix<const R: usize, const C: usize>(pub [[f64; C]; R]);

pub type Matrix3 = Matrix<3, 3>;
pub type Matrix4 = Matrix<4, 4>;

// ---------- Basics ----------
impl<const R: usize, const C: usize> Matrix<R, C> {
    #[inline]
    pub fn new(data: [[f64; C]; R]) -> Self {
        Matrix(data)
    }

    #[inline]
    pub fn zero() -> Self {
        Matrix([[0.0; C]; R])
    }

    /// Transpose into C x R.
    #[inline]
    pub fn transpose(&self) -> Matrix<C, R> {
        Matrix(array::from_fn(|j| array::from_fn(|i| self.0[i][j])))
    }

    /// Scale all entries by `s`.
    #[inline]
    pub fn scale(&self, s: f64) -> Self {
        Matrix(array::from_fn(|i| array::from_fn(|j| self.0[i][j] * s)))
    }

    /// Linear interpolation (element-wise): (1-u)*A + u*B
    #[inline]
    pub fn lerp(&self, other: &Self, u: f64) -> Self {
        Matrix(array::from_fn(|i| {
            array::from_fn(|j| lerp(self.0[i][j], other.0[i][j], u))
        }))
    }

    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| a.iter().zip(b.iter()).all(|(x, y)| approx_eq(*x, *y, eps)))
    }
}

impl<const N: usize> Matrix<N, N> {
    #[inline]
    pub fn identity() -> Self {
        Matrix(array::from_fn(|i| {
            array::from_fn(|j| if i == j { 1.0 } else { 0.0 })
        }))
    }

    pub fn from_diagonal(diag: [f64; N]) -> Self {
        let mut m = Self::zero();
        for (i, d) in diag.into_iter().enumerate() {
            m.0[i][i] = d;
        }
        m
    }
}

// ---------- 3x3 ----------
impl Matrix3 {
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Cofactor inverse; `None` when the matrix is singular.
    pub fn inverse(&self) -> Option<Matrix3> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let m = &self.0;
        let inv_det = 1.0 / det;
        Some(Matrix([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
            ],
        ]))
    }

    pub fn mul_vector(&self, v: &Vector3) -> Vector3 {
        let m = &self.0;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }
}

// ---------- 4x4 affine transforms ----------
impl Matrix4 {
    /// Affine transform with the given linear part and translation.
    pub fn from_linear_translation(linear: &Matrix3, translation: &Vector3) -> Self {
        let l = &linear.0;
        Matrix([
            [l[0][0], l[0][1], l[0][2], translation.x],
            [l[1][0], l[1][1], l[1][2], translation.y],
            [l[2][0], l[2][1], l[2][2], translation.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn from_translation(t: &Vector3) -> Self {
        Self::from_linear_translation(&Matrix3::identity(), t)
    }

    pub fn from_scale(s: &Vector3) -> Self {
        Self::from_linear_translation(&Matrix3::from_diagonal([s.x, s.y, s.z]), &Vector3::zero())
    }

    pub fn from_uniform_scale(s: f64) -> Self {
        Self::from_scale(&Vector3::splat(s))
    }

    pub fn from_rotation(q: &Quaternion) -> Self {
        Self::from_linear_translation(&q.to_matrix3(), &Vector3::zero())
    }

    /// `T(translation) · R(rotation)`.
    pub fn from_translation_rotation(translation: &Vector3, rotation: &Quaternion) -> Self {
        Self::from_linear_translation(&rotation.to_matrix3(), translation)
    }

    pub fn linear_part(&self) -> Matrix3 {
        Matrix(array::from_fn(|i| array::from_fn(|j| self.0[i][j])))
    }

    pub fn translation(&self) -> Vector3 {
        Vector3::new(self.0[0][3], self.0[1][3], self.0[2][3])
    }

    /// Apply to a point (w = 1).
    pub fn transform_point(&self, p: &Vector3) -> Vector3 {
        self.linear_part().mul_vector(p) + self.translation()
    }

    /// Apply to a direction (w = 0).
    pub fn transform_vector(&self, v: &Vector3) -> Vector3 {
        self.linear_part().mul_vector(v)
    }

    /// Inverse of an affine transform; `None` when the linear part is singular.
    pub fn affine_inverse(&self) -> Option<Matrix4> {
        let inv_linear = self.linear_part().inverse()?;
        let t = inv_linear.mul_vector(&self.translation());
        Some(Self::from_linear_translation(&inv_linear, &(-t)))
    }

    /// Inverse transpose of the linear part, used to carry surface normals.
    pub fn normal_matrix(&self) -> Option<Matrix3> {
        self.linear_part().inverse().map(|m| m.transpose())
    }
}

// ---------- Indexing ----------
impl<const R: usize, const C: usize> Index<usize> for Matrix<R, C> {
    type Output = [f64; C];
    #[inline]
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}
impl<const R: usize, const C: usize> IndexMut<usize> for Matrix<R, C> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.0[i]
    }
}

// ---------- Add / Sub / Mul ----------
impl<const R: usize, const C: usize> Add for Matrix<R, C> {
    type Output = Matrix<R, C>;
    #[inline]
    fn add(self, rhs: Matrix<R, C>) -> Self::Output {
        Matrix(array::from_fn(|i| array::from_fn(|j| self.0[i][j] + rhs.0[i][j])))
    }
}

impl<const R: usize, const C: usize> Sub for Matrix<R, C> {
    type Output = Matrix<R, C>;
    #[inline]
    fn sub(self, rhs: Matrix<R, C>) -> Self::Output {
        Matrix(array::from_fn(|i| array::from_fn(|j| self.0[i][j] - rhs.0[i][j])))
    }
}

impl<const R: usize, const K: usize, const C: usize> Mul<Matrix<K, C>> for Matrix<R, K> {
    type Output = Matrix<R, C>;
    #[inline]
    fn mul(self, rhs: Matrix<K, C>) -> Self::Output {
        Matrix(array::from_fn(|i| {
            array::from_fn(|j| (0..K).map(|k| self.0[i][k] * rhs.0[k][j]).sum())
        }))
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;
    #[inline]
    fn mul(self, v: Vector3) -> Vector3 {
        self.mul_vector(&v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affine_inverse_round_trips() {
        let q = Quaternion::from_axis_angle(&Vector3::new(1.0, 2.0, 3.0), 0.7);
        let m = Matrix4::from_translation_rotation(&Vector3::new(4.0, -1.0, 2.5), &q)
            * Matrix4::from_scale(&Vector3::new(2.0, 0.5, 1.5));
        let inv = m.affine_inverse().unwrap();
        assert!((m * inv).approx_eq(&Matrix4::identity(), 1e-12));
        assert!((inv * m).approx_eq(&Matrix4::identity(), 1e-12));
    }

    #[test]
    fn singular_matrices_have_no_inverse() {
        assert!(Matrix3::zero().inverse().is_none());
        assert!(Matrix4::from_uniform_scale(0.0).affine_inverse().is_none());
    }

    #[test]
    fn normal_matrix_keeps_normals_perpendicular() {
        let m = Matrix4::from_scale(&Vector3::new(4.0, 1.0, 1.0));
        // plane x = y has normal (1, -1, 0) and tangent (1, 1, 0)
        let tangent = m.transform_vector(&Vector3::new(1.0, 1.0, 0.0));
        let normal = m.normal_matrix().unwrap() * Vector3::new(1.0, -1.0, 0.0);
        use crate::geometry::vector::VectorOps;
        assert!(tangent.dot(&normal).abs() < 1e-12);
    }
}
