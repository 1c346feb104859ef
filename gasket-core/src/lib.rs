/// Gasket Core - solid builders and fractal subdivision
///
/// Pure, renderer-agnostic construction of mesh descriptions: boxes,
/// tetrahedra and five-point pyramids with their transforms and materials,
/// plus the recursive gasket subdivision that emits pyramid leaves. Renderers
/// consume the resulting [`SolidSpec`] values or their STL export.

pub mod builder;
pub mod color;
pub mod error;
pub mod fractal;
pub mod parametric;
pub mod solid;
pub mod stl;
pub mod transform;

// Re-export commonly used types
pub use builder::{build_box, build_pyramid, build_tetrahedron};
pub use color::Color;
pub use error::{SolidError, StlError};
pub use fractal::{leaf_count, subdivide, subdivide_par, subdivide_with, Cell};
pub use solid::{Face, Material, Shading, SolidKind, SolidSpec, Triangle};
pub use transform::{deg_to_rad, lerp, midpoint, Transform, Vec3};
