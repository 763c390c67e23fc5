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
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    error::ObjError,
    geometry::Vector3,
    mesh::{DEFAULT_COMBINE_DELTA, Mesh},
};

/// Write a mesh as a Wavefront OBJ file (`v` and `f` records only).
pub fn write_obj<P: AsRef<Path>>(mesh: &Mesh, path: P) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    for v in mesh.vertices() {
        writeln!(out, "v {:?} {:?} {:?}", v.x, v.y, v.z)?;
    }

    // OBJ is 1-based
    for t in mesh.triangle_indices().chunks_exact(3) {
        writeln!(out, "f {} {} {}", t[0] + 1, t[1] + 1, t[2] + 1)?;
    }

    out.flush()
}

/// Read a mesh from a Wavefront OBJ file. See [`parse_obj`].
pub fn read_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, ObjError> {
    let file = File::open(path)?;
    parse_obj(BufReader::new(file))
}

/// Parse OBJ text into a welded [`Mesh`].
///
/// Only `v x y z` and `f ...` lines are read; everything else is ignored. Polygon faces
/// are fan-triangulated, `i/j/k` tokens use the position index, and negative indices
/// count back from the last vertex read.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<Mesh, ObjError> {
    let mut vertices = Vec::new();
    let mut triangles: Vec<u32> = Vec::new();

    for (n, line) in reader.lines().enumerate() {
        let l = line?;
        let line_no = n + 1;
        let mut parts = l.split_whitespace();
        match parts.next() {
            Some("v") => {
                let mut coord = || -> Result<f64, ObjError> {
                    let token = parts
                        .next()
                        .ok_or_else(|| parse_error(line_no, "vertex needs three coordinates"))?;
                    token
                        .parse()
                        .map_err(|_| parse_error(line_no, format!("bad coordinate `{token}`")))
                };
                let x = coord()?;
                let y = coord()?;
                let z = coord()?;
                vertices.push(Vector3::new(x, y, z));
            }
            Some("f") => {
                let face = parts
                    .map(|token| resolve_index(token, vertices.len(), line_no))
                    .collect::<Result<Vec<u32>, _>>()?;
                if face.len() < 3 {
                    return Err(parse_error(line_no, "face needs at least three vertices"));
                }
                for i in 1..face.len() - 1 {
                    triangles.extend_from_slice(&[face[0], face[i], face[i + 1]]);
                }
            }
            _ => {
                // comments, normals, groups...
            }
        }
    }

    tracing::debug!(
        vertices = vertices.len(),
        triangles = triangles.len() / 3,
        "parsed obj"
    );
    Ok(Mesh::reduce(&vertices, &triangles, DEFAULT_COMBINE_DELTA)?)
}

fn resolve_index(token: &str, vertex_count: usize, line: usize) -> Result<u32, ObjError> {
    let position = token.split('/').next().unwrap_or(token);
    let raw: i64 = position
        .parse()
        .map_err(|_| parse_error(line, format!("bad face index `{token}`")))?;
    let resolved = match raw {
        0 => None,
        r if r > 0 => Some(r - 1),
        r => Some(vertex_count as i64 + r),
    };
    match resolved {
        Some(i) if i >= 0 && (i as usize) < vertex_count => Ok(i as u32),
        _ => Err(parse_error(
            line,
            format!("face index `{token}` does not name a vertex"),
        )),
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> ObjError {
    ObjError::Parse {
        line,
        message: message.into(),
    }
}
