//! Definition of various test shapes.

use crate::grid::{TriangleMesh, TriangleMeshBuilder};
use crate::helpers::norm3;
use crate::types::RwgResult;
use std::collections::HashMap;

/// Create a square mesh with triangle cells
///
/// Create a mesh of the square \[0,1\]^2 in the plane z = 0. The input ncells is the number of
/// cells along each side of the square; each square cell is split into two triangles along
/// its diagonal.
///
/// # Panics
///
/// Panics if `ncells` is zero.
pub fn screen_triangles(ncells: usize) -> RwgResult<TriangleMesh> {
    if ncells == 0 {
        panic!("Cannot create a mesh with 0 cells");
    }
    let mut b =
        TriangleMeshBuilder::new_with_capacity((ncells + 1) * (ncells + 1), 2 * ncells * ncells);

    let n = ncells as f64;
    for y in 0..ncells + 1 {
        for x in 0..ncells + 1 {
            b.add_point(y * (ncells + 1) + x, [x as f64 / n, y as f64 / n, 0.0]);
        }
    }
    for y in 0..ncells {
        for x in 0..ncells {
            b.add_cell(
                2 * y * ncells + 2 * x,
                [
                    y * (ncells + 1) + x,
                    y * (ncells + 1) + x + 1,
                    y * (ncells + 1) + x + ncells + 2,
                ],
            );
            b.add_cell(
                2 * y * ncells + 2 * x + 1,
                [
                    y * (ncells + 1) + x,
                    y * (ncells + 1) + x + ncells + 2,
                    y * (ncells + 1) + x + ncells + 1,
                ],
            );
        }
    }

    b.create_mesh()
}

/// Create a regular sphere
///
/// A regular sphere is created by starting with a regular octahedron. The shape is then refined `refinement_level` times.
/// Each time the mesh is refined, each triangle is split into four triangles (by adding lines connecting the midpoints of
/// each edge). The new points are then scaled so that they are a distance of 1 from the origin.
pub fn regular_sphere(refinement_level: u32) -> RwgResult<TriangleMesh> {
    let mut points = vec![
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, -1.0],
    ];
    points.reserve(usize::pow(4, refinement_level + 1) - 4);

    let mut cells = vec![
        [0, 1, 2],
        [0, 2, 3],
        [0, 3, 4],
        [0, 4, 1],
        [5, 2, 1],
        [5, 3, 2],
        [5, 4, 3],
        [5, 1, 4],
    ];

    for _ in 0..refinement_level {
        let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
        let mut refined = Vec::with_capacity(4 * cells.len());
        for [a, b, c] in cells {
            let mut midpoint = |i: usize, j: usize| {
                let key = (i.min(j), i.max(j));
                *midpoints.entry(key).or_insert_with(|| {
                    let mid = [0, 1, 2].map(|k| 0.5 * (points[i][k] + points[j][k]));
                    let size = norm3(&mid);
                    points.push(mid.map(|x| x / size));
                    points.len() - 1
                })
            };
            let ab = midpoint(a, b);
            let bc = midpoint(b, c);
            let ca = midpoint(c, a);
            refined.extend([[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
        }
        cells = refined;
    }

    TriangleMesh::new(points, cells)
}
