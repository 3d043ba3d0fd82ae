use crate::math::{Point, Real};
use crate::shape::{Face, PolygonMesh};
use crate::utils::SortedPair;
use hashbrown::HashMap;

/// Cuts every edge of `mesh` into `cuts + 1` segments of equal length.
///
/// The new edge vertices are shared by all the faces using the same edge. Then:
/// - each triangle becomes a grid of `(cuts + 1)²` triangles;
/// - each quad becomes a grid of `(cuts + 1)²` quads;
/// - any other polygon stays a single face with the edge vertices inserted along its boundary.
///
/// The original vertices keep their indices and every face keeps its winding. New vertices are
/// appended in face order, so the result only depends on the input. `cuts == 0` returns a copy
/// of `mesh`.
pub fn subdivide(mesh: &PolygonMesh, cuts: u32) -> PolygonMesh {
    if cuts == 0 || mesh.is_empty() {
        return mesh.clone();
    }

    let mut builder = GridBuilder {
        vertices: mesh.vertices().to_vec(),
        faces: Vec::with_capacity(mesh.faces().len() * (cuts as usize + 1).pow(2)),
        edges: HashMap::new(),
        segments: cuts + 1,
    };

    for face in mesh.faces() {
        match face.len() {
            3 => builder.split_triangle([face[0], face[1], face[2]]),
            4 => builder.split_quad([face[0], face[1], face[2], face[3]]),
            _ => builder.split_polygon(face),
        }
    }

    PolygonMesh::new_unchecked(builder.vertices, builder.faces)
}

struct GridBuilder {
    vertices: Vec<Point<Real>>,
    faces: Vec<Face>,
    // Index of the first interior vertex of each edge, listed from its smallest endpoint.
    edges: HashMap<SortedPair<u32>, u32>,
    segments: u32,
}

impl GridBuilder {
    #[inline]
    fn param(&self, k: u32) -> Real {
        k as Real / self.segments as Real
    }

    fn push_vertex(&mut self, pt: Point<Real>) -> u32 {
        self.vertices.push(pt);
        self.vertices.len() as u32 - 1
    }

    /// The `k`-th vertex along the edge going from `a` to `b`, `0 <= k <= segments`.
    fn edge_vertex(&mut self, a: u32, b: u32, k: u32) -> u32 {
        if k == 0 {
            return a;
        } else if k == self.segments {
            return b;
        }

        let key = SortedPair::new(a, b);
        let first = match self.edges.get(&key).copied() {
            Some(first) => first,
            None => {
                let (lo, hi) = key.into_tuple();
                let first = self.vertices.len() as u32;
                for t in 1..self.segments {
                    let (p_lo, p_hi) = (self.vertices[lo as usize], self.vertices[hi as usize]);
                    let pt = p_lo.lerp(&p_hi, self.param(t));
                    let _ = self.push_vertex(pt);
                }
                let _ = self.edges.insert(key, first);
                first
            }
        };

        if a < b {
            first + k - 1
        } else {
            first + self.segments - k - 1
        }
    }

    fn split_triangle(&mut self, [v0, v1, v2]: [u32; 3]) {
        let n = self.segments;
        let [p0, p1, p2] = [v0, v1, v2].map(|vid| self.vertices[vid as usize]);

        // grid[i][j] with i + j <= n is the vertex at p0 + i/n (p1 - p0) + j/n (p2 - p0).
        let mut grid: Vec<Vec<u32>> = Vec::with_capacity(n as usize + 1);
        for i in 0..=n {
            let mut row = Vec::with_capacity((n - i) as usize + 1);
            for j in 0..=n - i {
                let vid = if j == 0 {
                    self.edge_vertex(v0, v1, i)
                } else if i == 0 {
                    self.edge_vertex(v0, v2, j)
                } else if i + j == n {
                    self.edge_vertex(v1, v2, j)
                } else {
                    let pt = p0 + (p1 - p0) * self.param(i) + (p2 - p0) * self.param(j);
                    self.push_vertex(pt)
                };
                row.push(vid);
            }
            grid.push(row);
        }

        for i in 0..n as usize {
            for j in 0..n as usize - i {
                self.faces
                    .push(Face::from_slice(&[grid[i][j], grid[i + 1][j], grid[i][j + 1]]));
                if i + j + 1 < n as usize {
                    self.faces.push(Face::from_slice(&[
                        grid[i + 1][j],
                        grid[i + 1][j + 1],
                        grid[i][j + 1],
                    ]));
                }
            }
        }
    }

    fn split_quad(&mut self, [v0, v1, v2, v3]: [u32; 4]) {
        let n = self.segments;
        let [p0, p1, p2, p3] = [v0, v1, v2, v3].map(|vid| self.vertices[vid as usize]);

        // grid[j][i] is the bilinear interpolation at (i/n, j/n), with v0 at (0, 0) and v2 at (1, 1).
        let mut grid: Vec<Vec<u32>> = Vec::with_capacity(n as usize + 1);
        for j in 0..=n {
            let mut row = Vec::with_capacity(n as usize + 1);
            for i in 0..=n {
                let vid = if j == 0 {
                    self.edge_vertex(v0, v1, i)
                } else if j == n {
                    self.edge_vertex(v3, v2, i)
                } else if i == 0 {
                    self.edge_vertex(v0, v3, j)
                } else if i == n {
                    self.edge_vertex(v1, v2, j)
                } else {
                    let (u, w) = (self.param(i), self.param(j));
                    let pt = p0.lerp(&p1, u).lerp(&p3.lerp(&p2, u), w);
                    self.push_vertex(pt)
                };
                row.push(vid);
            }
            grid.push(row);
        }

        for j in 0..n as usize {
            for i in 0..n as usize {
                self.faces.push(Face::from_slice(&[
                    grid[j][i],
                    grid[j][i + 1],
                    grid[j + 1][i + 1],
                    grid[j + 1][i],
                ]));
            }
        }
    }

    fn split_polygon(&mut self, face: &Face) {
        let mut new_face = Face::with_capacity(face.len() * self.segments as usize);
        for (k, &a) in face.iter().enumerate() {
            let b = face[(k + 1) % face.len()];
            new_face.push(a);
            for t in 1..self.segments {
                new_face.push(self.edge_vertex(a, b, t));
            }
        }
        self.faces.push(new_face);
    }
}
