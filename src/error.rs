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

use thiserror::Error;

/// Violations of the [`Mesh`](crate::mesh::Mesh) invariants, raised at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    #[error("triangle index count {0} is not a multiple of 3")]
    TriangleIndexCount(usize),
    #[error("edge index count {0} is not a multiple of 2")]
    EdgeIndexCount(usize),
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("vertex {0} has a non-finite coordinate")]
    NonFiniteVertex(usize),
    #[error("edge ({a}, {b}) is listed more than once or joins a vertex to itself")]
    InvalidEdge { a: u32, b: u32 },
    #[error("edge ({a}, {b}) is not a side of any triangle")]
    StrayEdge { a: u32, b: u32 },
}

#[derive(Debug, Error)]
pub enum ObjError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("invalid mesh: {0}")]
    Mesh(#[from] MeshError),
}

/// Invalid mass properties handed to a [`RigidBody`](crate::physics::RigidBody) constructor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BodyError {
    #[error("mass must be finite and positive, got {0}")]
    InvalidMass(f64),
    #[error("collider has no surface to derive mass from")]
    EmptyCollider,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("time step must be finite and non-negative, got {0}")]
    InvalidTimeStep(f64),
}
