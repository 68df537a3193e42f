use std::f32::consts::PI;

/// Whether the polygon sits inside the unit circle or around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Vertices lie on the circle.
    #[default]
    Inscribed,
    /// Edges are tangent to the circle.
    Circumscribed,
}

impl Mode {
    /// Outer radius multiplier for a polygon with `sides` sides.
    pub fn radius_multiplier(self, sides: u32) -> f32 {
        match self {
            Mode::Inscribed => 1.0,
            Mode::Circumscribed => 1.0 / (PI / sides as f32).cos(),
        }
    }
}

/// Everything needed to build one outline mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonDescriptor {
    pub side_count: u32,
    pub scale: f32,
    pub thickness: f32,
    pub mode: Mode,
}

/// A closed band of triangles tracing a regular polygon.
///
/// Vertices come in `(outer, inner)` pairs, one pair per side, in increasing
/// angular order. Every side contributes two triangles joining its pair to the
/// next side's pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlineMesh {
    pub vertices: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl OutlineMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Iterates over the triangles as resolved vertex positions.
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 2]; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Overwrites this mesh with the outline described by `desc` and returns
    /// the number of indices to draw.
    ///
    /// `desc.side_count` must be at least 3.
    pub fn rebuild(&mut self, desc: &PolygonDescriptor) -> usize {
        let n = desc.side_count;
        let vertex_total = n * 2;

        self.vertices.clear();
        self.indices.clear();
        self.vertices.reserve(vertex_total as usize);
        self.indices.reserve(n as usize * 6);

        let m = desc.mode.radius_multiplier(n);
        let inner = 1.0 - desc.thickness;
        let step = 2.0 * PI / n as f32;

        for side in 0..n {
            let (sin, cos) = (step * side as f32).sin_cos();
            let x = m * cos;
            let y = m * sin;

            self.vertices.push([x * desc.scale, y * desc.scale]);
            self.vertices.push([x * inner * desc.scale, y * inner * desc.scale]);

            let outer = side * 2;
            let next = (outer + 2) % vertex_total;
            self.indices
                .extend_from_slice(&[outer, next + 1, next, outer, outer + 1, next + 1]);
        }

        self.indices.len()
    }
}

/// Builds a fresh outline mesh for `desc`.
pub fn generate(desc: &PolygonDescriptor) -> OutlineMesh {
    let mut mesh = OutlineMesh::default();
    mesh.rebuild(desc);
    mesh
}
