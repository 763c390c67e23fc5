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

//! Linear continuous collision detection between rigid triangle meshes, and a
//! time-of-impact rigid body solver built on top of it.
//!
//! Motion over a step is the straight-line interpolation of every vertex between
//! its initial and final transformed position. [`ccd::linear_ccd`] reports the
//! earliest contacts of two meshes under that motion; [`physics::ToiSolver`]
//! uses those contacts to advance bodies without letting them interpenetrate.

pub mod ccd;
pub mod error;
pub mod geometry;
pub mod io;
pub mod kernel;
pub mod mesh;
pub mod numeric;
pub mod physics;

pub use ccd::{CcdConfig, CcdHit, combine_close_points, linear_ccd};
pub use error::{BodyError, MeshError, ObjError, SolverError};
pub use geometry::{Matrix3, Matrix4, Quaternion, Vector3};
pub use mesh::Mesh;
pub use physics::{BodyHandle, RigidBody, SolverConfig, StepOutcome, ToiSolver};
