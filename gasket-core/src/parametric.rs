/// Parametric surfaces sampled on a (u, v) grid
use crate::error::SolidError;
use crate::solid::{Face, Triangle};
use crate::transform::Vec3;

/// Hyperbolic paraboloid over a square of side `r`, centered on the origin.
pub fn saddle(u: f32, v: f32, r: f32) -> Vec3 {
    let x = (u - 0.5) * r;
    let z = (v - 0.5) * r;
    let y = x * z / r;
    Vec3::new(x, y, z)
}

/// An open triangle grid produced by [`sample`].
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
    pub slices: usize,
    pub stacks: usize,
}

impl SurfaceMesh {
    pub fn triangles(&self) -> Vec<Triangle> {
        self.faces
            .iter()
            .map(|&[a, b, c]| Triangle::new(self.vertices[a], self.vertices[b], self.vertices[c]))
            .collect()
    }
}

/// Sample `f` over `u, v` in `[0, 1]` with `slices` steps along u and `stacks`
/// along v. Vertices are laid out row by row in v, two triangles per cell.
pub fn sample<F>(f: F, slices: usize, stacks: usize) -> Result<SurfaceMesh, SolidError>
where
    F: Fn(f32, f32) -> Vec3,
{
    if slices == 0 || stacks == 0 {
        return Err(SolidError::InvalidResolution { slices, stacks });
    }

    let row = slices + 1;
    let mut vertices = Vec::with_capacity(row * (stacks + 1));
    for i in 0..=stacks {
        let v = i as f32 / stacks as f32;
        for j in 0..=slices {
            let u = j as f32 / slices as f32;
            vertices.push(f(u, v));
        }
    }

    let mut faces = Vec::with_capacity(2 * slices * stacks);
    for i in 0..stacks {
        for j in 0..slices {
            let a = i * row + j;
            let b = i * row + j + 1;
            let c = (i + 1) * row + j + 1;
            let d = (i + 1) * row + j;
            faces.push([a, b, d]);
            faces.push([b, c, d]);
        }
    }

    Ok(SurfaceMesh {
        vertices,
        faces,
        slices,
        stacks,
    })
}
