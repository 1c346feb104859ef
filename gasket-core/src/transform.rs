/// Placement of a solid: position, per-axis scale and Euler rotation in degrees
use nalgebra::{Matrix4, Point3, Vector3};

/// Three-component `f32` vector used for all control points and vertices.
pub type Vec3 = Vector3<f32>;

/// Linear interpolation `a + (b - a) * t`.
pub fn lerp(a: &Vec3, b: &Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

pub fn midpoint(a: &Vec3, b: &Vec3) -> Vec3 {
    lerp(a, b, 0.5)
}

/// Convert degrees to radians. `None`, `0` and `NaN` all read as zero degrees.
pub fn deg_to_rad(degrees: Option<f32>) -> f32 {
    match degrees {
        Some(d) if d != 0.0 && !d.is_nan() => d.to_radians(),
        _ => 0.0,
    }
}

/// A scale component of zero or NaN falls back to one.
fn scale_component(value: f32) -> f32 {
    if value == 0.0 || value.is_nan() {
        1.0
    } else {
        value
    }
}

/// Position, optional scale and optional rotation (degrees) of a solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Option<Vec3>,
    pub rotation_deg: Option<Vec3>,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            scale: None,
            rotation_deg: None,
        }
    }

    pub fn identity() -> Self {
        Self::at(Vec3::zeros())
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_rotation_deg(mut self, rotation: Vec3) -> Self {
        self.rotation_deg = Some(rotation);
        self
    }

    /// Scale with absent or falsy components replaced by one.
    pub fn effective_scale(&self) -> Vec3 {
        match self.scale {
            Some(s) => Vec3::new(
                scale_component(s.x),
                scale_component(s.y),
                scale_component(s.z),
            ),
            None => Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Rotation angles in radians, with absent or falsy components as zero.
    pub fn rotation_rad(&self) -> Vec3 {
        match self.rotation_deg {
            Some(r) => Vec3::new(
                deg_to_rad(Some(r.x)),
                deg_to_rad(Some(r.y)),
                deg_to_rad(Some(r.z)),
            ),
            None => Vec3::zeros(),
        }
    }

    /// Model matrix `T * Rx * Ry * Rz * S`.
    pub fn matrix(&self) -> Matrix4<f32> {
        let s = self.effective_scale();
        translation_matrix(&self.position)
            * rotation_matrix(&self.rotation_rad())
            * Matrix4::new_nonuniform_scaling(&s)
    }

    pub fn apply(&self, point: &Vec3) -> Vec3 {
        self.matrix()
            .transform_point(&Point3::from(*point))
            .coords
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rotation matrix for Euler angles in radians, intrinsic order X, Y, Z.
pub fn rotation_matrix(angles: &Vec3) -> Matrix4<f32> {
    let rx = Matrix4::new_rotation(Vector3::new(angles.x, 0.0, 0.0));
    let ry = Matrix4::new_rotation(Vector3::new(0.0, angles.y, 0.0));
    let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, angles.z));

    rx * ry * rz
}

pub fn translation_matrix(offset: &Vec3) -> Matrix4<f32> {
    Matrix4::new_translation(offset)
}
