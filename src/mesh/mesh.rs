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

use std::collections::HashSet;

use crate::{
    error::MeshError,
    geometry::Vector3,
    mesh::{canonical_edge::CanonicalEdge, spatial_hash::VertexGrid},
};

/// Radius under which [`Mesh::reduce`] treats two vertices as the same point.
pub const DEFAULT_COMBINE_DELTA: f64 = 1e-3;

/// Immutable triangle mesh in its own local frame.
///
/// `triangle_indices` holds three vertex indices per triangle and `edge_indices` two
/// per edge. Every index is in range, every vertex is finite, and every edge is a side
/// of some triangle, listed once.
///
/// With the `serde` feature a mesh is (de)serialized through [`MeshParts`], so
/// deserialized data goes through the same checks as [`Mesh::from_parts`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "MeshParts", into = "MeshParts")
)]
pub struct Mesh {
    vertices: Vec<Vector3>,
    triangle_indices: Vec<u32>,
    edge_indices: Vec<u32>,
}

/// The unchecked buffers of a [`Mesh`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshParts {
    pub vertices: Vec<Vector3>,
    pub triangle_indices: Vec<u32>,
    pub edge_indices: Vec<u32>,
}

impl TryFrom<MeshParts> for Mesh {
    type Error = MeshError;

    fn try_from(parts: MeshParts) -> Result<Self, Self::Error> {
        Mesh::from_parts(parts.vertices, parts.triangle_indices, parts.edge_indices)
    }
}

impl From<Mesh> for MeshParts {
    fn from(mesh: Mesh) -> Self {
        Self {
            vertices: mesh.vertices,
            triangle_indices: mesh.triangle_indices,
            edge_indices: mesh.edge_indices,
        }
    }
}

impl Mesh {
    /// Mesh whose edge list is derived from its triangles.
    pub fn new(vertices: Vec<Vector3>, triangle_indices: Vec<u32>) -> Result<Self, MeshError> {
        validate_vertices(&vertices)?;
        validate_indices(&triangle_indices, 3, vertices.len())?;
        let edge_indices = derive_edges(&triangle_indices);
        Ok(Self {
            vertices,
            triangle_indices,
            edge_indices,
        })
    }

    /// Mesh with an explicit edge list.
    pub fn from_parts(
        vertices: Vec<Vector3>,
        triangle_indices: Vec<u32>,
        edge_indices: Vec<u32>,
    ) -> Result<Self, MeshError> {
        validate_vertices(&vertices)?;
        validate_indices(&triangle_indices, 3, vertices.len())?;
        validate_indices(&edge_indices, 2, vertices.len())?;

        let sides: HashSet<CanonicalEdge> = triangle_indices
            .chunks_exact(3)
            .flat_map(|t| {
                [
                    CanonicalEdge::new(t[0], t[1]),
                    CanonicalEdge::new(t[1], t[2]),
                    CanonicalEdge::new(t[2], t[0]),
                ]
            })
            .collect();
        let mut seen = HashSet::with_capacity(edge_indices.len() / 2);
        for pair in edge_indices.chunks_exact(2) {
            let (a, b) = (pair[0], pair[1]);
            let key = CanonicalEdge::new(a, b);
            if key.is_degenerate() || !seen.insert(key) {
                return Err(MeshError::InvalidEdge { a, b });
            }
            if !sides.contains(&key) {
                return Err(MeshError::StrayEdge { a, b });
            }
        }

        Ok(Self {
            vertices,
            triangle_indices,
            edge_indices,
        })
    }

    /// Weld vertices closer than `combine_delta`, remap the triangles and derive edges.
    ///
    /// Vertices are visited in order and the first one seen at a location is kept, so
    /// output order follows first occurrence. Triangles that collapse onto a repeated
    /// vertex are dropped. A non-positive `combine_delta` welds nothing.
    pub fn reduce(
        vertices: &[Vector3],
        triangle_indices: &[u32],
        combine_delta: f64,
    ) -> Result<Self, MeshError> {
        validate_vertices(vertices)?;
        validate_indices(triangle_indices, 3, vertices.len())?;

        let mut kept: Vec<Vector3> = Vec::with_capacity(vertices.len());
        let mut remap: Vec<u32> = Vec::with_capacity(vertices.len());

        if combine_delta > 0.0 {
            let mut grid = VertexGrid::new(combine_delta);
            for v in vertices {
                match grid.find_close(v, &kept) {
                    Some(existing) => remap.push(existing),
                    None => {
                        let idx = kept.len() as u32;
                        grid.insert(v, idx);
                        kept.push(*v);
                        remap.push(idx);
                    }
                }
            }
        } else {
            kept.extend_from_slice(vertices);
            remap.extend(0..vertices.len() as u32);
        }

        let mut triangles = Vec::with_capacity(triangle_indices.len());
        for tri in triangle_indices.chunks_exact(3) {
            let t = [
                remap[tri[0] as usize],
                remap[tri[1] as usize],
                remap[tri[2] as usize],
            ];
            if t[0] == t[1] || t[1] == t[2] || t[2] == t[0] {
                continue;
            }
            triangles.extend_from_slice(&t);
        }

        tracing::debug!(
            input = vertices.len(),
            output = kept.len(),
            triangles = triangles.len() / 3,
            "welded mesh vertices"
        );

        let edge_indices = derive_edges(&triangles);
        Ok(Self {
            vertices: kept,
            triangle_indices: triangles,
            edge_indices,
        })
    }

    /// Axis-aligned box between `min` and `max`: 8 corners, 12 outward-wound
    /// triangles and 18 edges (the 12 box edges plus one diagonal per face).
    ///
    /// Corner `i` sits at `x = bit 0`, `y = bit 1`, `z = bit 2` of `i`.
    pub fn cuboid(min: Vector3, max: Vector3) -> Self {
        let vertices = (0..8)
            .map(|i| {
                Vector3::new(
                    if i & 1 == 0 { min.x } else { max.x },
                    if i & 2 == 0 { min.y } else { max.y },
                    if i & 4 == 0 { min.z } else { max.z },
                )
            })
            .collect();

        #[rustfmt::skip]
        let triangle_indices = vec![
            0, 2, 3,  0, 3, 1, // z = min
            4, 5, 7,  4, 7, 6, // z = max
            0, 1, 5,  0, 5, 4, // y = min
            2, 6, 7,  2, 7, 3, // y = max
            0, 4, 6,  0, 6, 2, // x = min
            1, 3, 7,  1, 7, 5, // x = max
        ];
        let edge_indices = derive_edges(&triangle_indices);

        Self {
            vertices,
            triangle_indices,
            edge_indices,
        }
    }

    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    pub fn triangle_indices(&self) -> &[u32] {
        &self.triangle_indices
    }

    pub fn edge_indices(&self) -> &[u32] {
        &self.edge_indices
    }

    pub fn triangle_count(&self) -> usize {
        self.triangle_indices.len() / 3
    }

    pub fn edge_count(&self) -> usize {
        self.edge_indices.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.triangle_indices.is_empty()
    }

    /// Corner positions of each triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [Vector3; 3]> + '_ {
        self.triangle_indices.chunks_exact(3).map(|t| {
            [
                self.vertices[t[0] as usize],
                self.vertices[t[1] as usize],
                self.vertices[t[2] as usize],
            ]
        })
    }

    /// End points of each edge.
    pub fn edges(&self) -> impl Iterator<Item = [Vector3; 2]> + '_ {
        self.edge_indices
            .chunks_exact(2)
            .map(|e| [self.vertices[e[0] as usize], self.vertices[e[1] as usize]])
    }
}

fn validate_vertices(vertices: &[Vector3]) -> Result<(), MeshError> {
    match vertices.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(MeshError::NonFiniteVertex(i)),
        None => Ok(()),
    }
}

fn validate_indices(indices: &[u32], arity: usize, vertex_count: usize) -> Result<(), MeshError> {
    if indices.len() % arity != 0 {
        return Err(match arity {
            2 => MeshError::EdgeIndexCount(indices.len()),
            _ => MeshError::TriangleIndexCount(indices.len()),
        });
    }
    if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(MeshError::IndexOutOfRange {
            index,
            vertex_count,
        });
    }
    Ok(())
}

/// Unique undirected edges of the triangles, in first-seen order, stored low index first.
fn derive_edges(triangle_indices: &[u32]) -> Vec<u32> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    for tri in triangle_indices.chunks_exact(3) {
        for (p, q) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let key = CanonicalEdge::new(p, q);
            if !key.is_degenerate() && seen.insert(key) {
                edges.push(key.a);
                edges.push(key.b);
            }
        }
    }
    edges
}
