/// Construction of boxes, tetrahedra and five-point pyramids
///
/// Every builder is a pure function: identical inputs produce structurally
/// equal [`SolidSpec`] values.
use log::trace;

use crate::color::Color;
use crate::error::SolidError;
use crate::solid::{SolidKind, SolidSpec};
use crate::transform::{Transform, Vec3};

/// A box dimension of zero or NaN falls back to one.
fn box_extent(value: f32) -> f32 {
    if value == 0.0 || value.is_nan() {
        1.0
    } else {
        value
    }
}

/// Build an axis-aligned box centered at the origin.
///
/// A box must always be placed: `transform` is required and a missing one is
/// reported as [`SolidError::MissingTransform`].
pub fn build_box(
    dims: Vec3,
    color: Option<Color>,
    wireframe: bool,
    transform: Option<&Transform>,
) -> Result<SolidSpec, SolidError> {
    let transform = transform.ok_or(SolidError::MissingTransform)?;
    let half = Vec3::new(box_extent(dims.x), box_extent(dims.y), box_extent(dims.z)) / 2.0;
    trace!("building box with half extents {:?}", half);

    // 0-3 on the -z side counter-clockwise from (-x,-y), 4-7 the same on +z
    let vertices = vec![
        Vec3::new(-half.x, -half.y, -half.z),
        Vec3::new(half.x, -half.y, -half.z),
        Vec3::new(half.x, half.y, -half.z),
        Vec3::new(-half.x, half.y, -half.z),
        Vec3::new(-half.x, -half.y, half.z),
        Vec3::new(half.x, -half.y, half.z),
        Vec3::new(half.x, half.y, half.z),
        Vec3::new(-half.x, half.y, half.z),
    ];

    Ok(SolidSpec::assemble(
        SolidKind::Box,
        vertices,
        color,
        wireframe,
        *transform,
    ))
}

/// Build a tetrahedron from four vertices. An absent transform is identity.
pub fn build_tetrahedron(
    vertices: &[Vec3],
    color: Option<Color>,
    wireframe: bool,
    transform: Option<&Transform>,
) -> Result<SolidSpec, SolidError> {
    build_from_points(SolidKind::Tetrahedron, vertices, color, wireframe, transform)
}

/// Build the five-point pyramid used as the gasket's leaf cell.
pub fn build_pyramid(
    vertices: &[Vec3],
    color: Option<Color>,
    wireframe: bool,
    transform: Option<&Transform>,
) -> Result<SolidSpec, SolidError> {
    build_from_points(SolidKind::Pyramid, vertices, color, wireframe, transform)
}

fn build_from_points(
    kind: SolidKind,
    vertices: &[Vec3],
    color: Option<Color>,
    wireframe: bool,
    transform: Option<&Transform>,
) -> Result<SolidSpec, SolidError> {
    if vertices.len() != kind.arity() {
        return Err(SolidError::InvalidVertexCount {
            kind,
            expected: kind.arity(),
            actual: vertices.len(),
        });
    }

    Ok(SolidSpec::assemble(
        kind,
        vertices.to_vec(),
        color,
        wireframe,
        transform.copied().unwrap_or_default(),
    ))
}
