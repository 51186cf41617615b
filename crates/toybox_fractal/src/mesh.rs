//! Subdivided tetrahedron mesh
//!
//! The mesh starts as a tetrahedron and grows by repeated midpoint subdivision.
//! Midpoints are projected onto the unit sphere and shared between faces through
//! a cache keyed by the unordered vertex pair, so an edge is only ever split once.

use std::collections::HashMap;
use toybox_math::Vec3;

/// Corners of the starting tetrahedron
pub const BASE_TETRAHEDRON: [[f32; 3]; 4] = [
    [1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
];

/// Faces of the starting tetrahedron
pub const BASE_FACES: [[u32; 3]; 4] = [
    [0, 1, 2],
    [0, 1, 3],
    [0, 2, 3],
    [1, 2, 3],
];

/// A triangle defined by vertex indices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Face {
    /// Indices into the mesh's vertex array
    pub indices: [u32; 3],
}

impl Face {
    /// Create a new face with the given vertex indices
    #[inline]
    pub fn new(indices: [u32; 3]) -> Self {
        Self { indices }
    }

    /// The three edges as `(start, end)` pairs, in winding order
    #[inline]
    pub fn edges(&self) -> [(u32, u32); 3] {
        let [a, b, c] = self.indices;
        [(a, b), (b, c), (c, a)]
    }
}

/// Growing triangle mesh with a midpoint cache
///
/// Vertices are append-only: growth never moves or removes an existing vertex,
/// which is what lets the GPU index buffer be rebuilt without touching indices
/// that were already valid.
#[derive(Clone, Debug)]
pub struct FractalMesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    /// (smaller index, larger index) -> midpoint vertex index
    midpoints: HashMap<(u32, u32), u32>,
}

impl FractalMesh {
    /// The base tetrahedron with an empty midpoint cache
    pub fn tetrahedron() -> Self {
        Self {
            vertices: BASE_TETRAHEDRON.iter().copied().map(Vec3::from_array).collect(),
            faces: BASE_FACES.iter().copied().map(Face::new).collect(),
            midpoints: HashMap::new(),
        }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of cached midpoints
    #[inline]
    pub fn midpoint_count(&self) -> usize {
        self.midpoints.len()
    }

    /// Index of the midpoint between two vertices, creating it on first use
    ///
    /// The argument order does not matter. A new midpoint is the normalized sum
    /// of the two endpoints, i.e. the edge midpoint pushed out onto the unit sphere.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn midpoint(&mut self, a: u32, b: u32) -> u32 {
        let key = (a.min(b), a.max(b));
        if let Some(&idx) = self.midpoints.get(&key) {
            return idx;
        }

        let sum = self.vertices[a as usize] + self.vertices[b as usize];
        let idx = self.vertices.len() as u32;
        self.vertices.push(sum.normalized());
        self.midpoints.insert(key, idx);
        idx
    }

    /// Subdivide `faces` recursively `depth` times and return the resulting faces
    ///
    /// Each level splits every face at its edge midpoints `a`, `b`, `c`. The
    /// centre face `(a, b, c)` is always kept; the three corner faces are only
    /// kept when `(depth + cycle) % 4 <= 1`, so the pattern alternates between
    /// a full split and a hollowed-out one as depth and cycle change.
    pub fn subdivide(&mut self, faces: &[Face], depth: u32, cycle: u32) -> Vec<Face> {
        if depth == 0 {
            return faces.to_vec();
        }

        let keep_corners = (depth + cycle) % 4 <= 1;
        let mut next = Vec::with_capacity(faces.len() * if keep_corners { 4 } else { 1 });

        for face in faces {
            let [v0, v1, v2] = face.indices;
            let a = self.midpoint(v0, v1);
            let b = self.midpoint(v1, v2);
            let c = self.midpoint(v2, v0);

            if keep_corners {
                next.push(Face::new([v0, a, c]));
                next.push(Face::new([a, v1, b]));
                next.push(Face::new([c, b, v2]));
            }
            next.push(Face::new([a, b, c]));
        }

        self.subdivide(&next, depth - 1, cycle)
    }

    /// Subdivide every current face and append the result to the face list
    ///
    /// Faces accumulate: the coarser faces stay in place and the refined ones
    /// are drawn on top of them. A depth of zero leaves the mesh unchanged.
    /// Returns the number of line indices the mesh now produces.
    pub fn grow(&mut self, depth: u32, cycle: u32) -> usize {
        if depth > 0 {
            let current = self.faces.clone();
            let new_faces = self.subdivide(&current, depth, cycle);
            log::debug!(
                "Subdivided {} faces at depth {} into {} faces",
                current.len(),
                depth,
                new_faces.len()
            );
            self.faces.extend(new_faces);
        }
        self.line_index_count()
    }

    /// Number of indices [`line_indices`](Self::line_indices) returns
    #[inline]
    pub fn line_index_count(&self) -> usize {
        self.faces.len() * 6
    }

    /// Flat index list for line-list drawing: three edges per face
    pub fn line_indices(&self) -> Vec<u32> {
        self.faces
            .iter()
            .flat_map(|face| face.edges())
            .flat_map(|(start, end)| [start, end])
            .collect()
    }

    /// Vertex positions as plain arrays (for GPU upload)
    pub fn vertex_positions(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(|v| v.to_array()).collect()
    }
}

impl Default for FractalMesh {
    fn default() -> Self {
        Self::tetrahedron()
    }
}
