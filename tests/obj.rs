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

use std::io::Cursor;

use linccd::{
    error::ObjError,
    geometry::Vector3,
    io::{parse_obj, read_obj, write_obj},
    mesh::Mesh,
};

const CUBE: &str = "\
# unit cube
o cube
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
v 1.0 1.0 0.0
v 0.0 0.0 1.0
v 1.0 0.0 1.0
v 0.0 1.0 1.0
v 1.0 1.0 1.0
vn 0.0 0.0 -1.0
vt 0.0 0.0
s off
f 1/1/1 3/1/1 4/1/1 2/1/1
f 5//1 6//1 8//1 7//1
f 1 2 6 5
f 3 7 8 4
f 1 5 7 3
f 2 4 8 6
";

#[test]
fn test_parse_cube() {
    let mesh = parse_obj(Cursor::new(CUBE)).unwrap();
    assert_eq!(mesh.vertices().len(), 8);
    assert_eq!(mesh.triangle_count(), 12);
    assert_eq!(mesh.edge_count(), 18);
    // quads are fanned from their first corner
    assert_eq!(&mesh.triangle_indices()[..6], &[0, 2, 3, 0, 3, 1]);
}

#[test]
fn test_parse_welds_split_corners() {
    // each triangle carries its own copy of the shared corners
    let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3
f 4 5 6
";
    let mesh = parse_obj(Cursor::new(text)).unwrap();
    assert_eq!(mesh.vertices().len(), 4);
    assert_eq!(mesh.triangle_indices(), &[0, 1, 2, 1, 3, 2]);
}

#[test]
fn test_parse_negative_indices() {
    let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
    let mesh = parse_obj(Cursor::new(text)).unwrap();
    assert_eq!(mesh.triangle_indices(), &[0, 1, 2]);
}

#[test]
fn test_parse_errors_name_the_line() {
    let cases = [
        "v 0 0 0\nv 1 0\n",
        "v 0 0 0\nv 1 zero 0\n",
        "v 0 0 0\nf 1 1\n",
        "v 0 0 0\nf 0 1 1\n",
        "v 0 0 0\nf 1 1 4\n",
        "v 0 0 0\nf 1 1 -2\n",
    ];
    for text in cases {
        match parse_obj(Cursor::new(text)) {
            Err(ObjError::Parse { line, .. }) => assert_eq!(line, 2, "{text:?}"),
            other => panic!("expected a parse error for {text:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_write_then_read() {
    let mesh = Mesh::cuboid(Vector3::new(-0.5, 0.0, 0.25), Vector3::new(0.1, 2.0, 3.0));
    let path = std::env::temp_dir().join(format!("linccd_obj_{}.obj", std::process::id()));

    write_obj(&mesh, &path).unwrap();
    let read = read_obj(&path);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(read.unwrap(), mesh);
}

#[test]
fn test_read_missing_file() {
    let path = std::env::temp_dir().join("linccd_does_not_exist.obj");
    assert!(matches!(read_obj(path), Err(ObjError::Io(_))));
}
