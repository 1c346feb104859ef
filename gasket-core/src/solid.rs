/// Immutable mesh descriptions handed to a renderer
use std::fmt;

use nalgebra::Matrix4;

use crate::color::Color;
use crate::transform::{Transform, Vec3};

/// Index triple into a solid's vertex list.
pub type Face = [usize; 3];

const BOX_FACES: [Face; 12] = [
    [0, 2, 1],
    [0, 3, 2],
    [4, 5, 6],
    [4, 6, 7],
    [0, 1, 5],
    [0, 5, 4],
    [2, 3, 7],
    [2, 7, 6],
    [3, 0, 4],
    [3, 4, 7],
    [1, 2, 6],
    [1, 6, 5],
];

const TETRAHEDRON_FACES: [Face; 4] = [[0, 1, 2], [1, 3, 2], [0, 2, 3], [0, 3, 1]];

const PYRAMID_FACES: [Face; 6] = [
    [0, 1, 2],
    [1, 3, 4],
    [0, 4, 3],
    [1, 0, 4],
    [0, 3, 2],
    [1, 2, 3],
];

/// The solid shapes the builder knows how to connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolidKind {
    Box,
    Tetrahedron,
    Pyramid,
}

impl SolidKind {
    /// Number of vertices a solid of this kind carries.
    pub fn arity(self) -> usize {
        match self {
            SolidKind::Box => 8,
            SolidKind::Tetrahedron => 4,
            SolidKind::Pyramid => 5,
        }
    }

    /// Fixed triangle connectivity for this kind.
    pub fn faces(self) -> &'static [Face] {
        match self {
            SolidKind::Box => &BOX_FACES,
            SolidKind::Tetrahedron => &TETRAHEDRON_FACES,
            SolidKind::Pyramid => &PYRAMID_FACES,
        }
    }

    /// Material model the lessons pair with each kind.
    pub fn default_shading(self) -> Shading {
        match self {
            SolidKind::Box | SolidKind::Tetrahedron => Shading::Lambert,
            SolidKind::Pyramid => Shading::Basic,
        }
    }
}

impl fmt::Display for SolidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolidKind::Box => "box",
            SolidKind::Tetrahedron => "tetrahedron",
            SolidKind::Pyramid => "pyramid",
        };
        f.write_str(name)
    }
}

/// Lighting model requested from the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Diffuse, lit by scene lights.
    Lambert,
    /// Flat color, ignores lights.
    Basic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub wireframe: bool,
    pub shading: Shading,
}

/// A triangle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Unit face normal, or zero for a degenerate triangle.
    pub fn normal(&self) -> Vec3 {
        let [v0, v1, v2] = self.vertices;
        (v1 - v0)
            .cross(&(v2 - v0))
            .try_normalize(1e-12)
            .unwrap_or_else(Vec3::zeros)
    }
}

/// A finished solid: local vertices, connectivity, material and placement.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidSpec {
    kind: SolidKind,
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    material: Material,
    transform: Transform,
}

impl SolidSpec {
    /// Assemble a solid whose vertex count is already known to match `kind`.
    pub(crate) fn assemble(
        kind: SolidKind,
        vertices: Vec<Vec3>,
        color: Option<Color>,
        wireframe: bool,
        transform: Transform,
    ) -> Self {
        debug_assert_eq!(vertices.len(), kind.arity());
        Self {
            kind,
            vertices,
            faces: kind.faces().to_vec(),
            material: Material {
                color: Color::or_default(color),
                wireframe,
                shading: kind.default_shading(),
            },
            transform,
        }
    }

    pub fn kind(&self) -> SolidKind {
        self.kind
    }

    /// Vertices in the solid's local frame.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.transform.matrix()
    }

    /// Vertices with the solid's transform applied.
    pub fn world_vertices(&self) -> Vec<Vec3> {
        let model = self.model_matrix();
        self.vertices
            .iter()
            .map(|v| model.transform_point(&(*v).into()).coords)
            .collect()
    }

    /// World-space triangles in face order.
    pub fn triangles(&self) -> Vec<Triangle> {
        let world = self.world_vertices();
        self.faces
            .iter()
            .map(|&[a, b, c]| Triangle::new(world[a], world[b], world[c]))
            .collect()
    }

    /// Unique undirected edges, for wireframe drawing.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .faces
            .iter()
            .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
            .map(|(a, b)| (a.min(b), a.max(b)))
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }
}
