/// Orbiting camera and projection to terminal cells
use nalgebra::{Matrix4, Point3, Vector3};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera orbiting `target` at `distance`, angles in radians.
#[derive(Debug, Clone)]
pub struct Camera {
    pub target: Point3<f32>,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 0.5;

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            target: Point3::origin(),
            distance: 40.0,
            yaw: 0.3,
            pitch: 0.45,
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height.max(1) as f32 * CELL_ASPECT,
            near: 0.1,
            far: 1000.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Frame a scene whose points all lie within `radius` of `target`.
    pub fn fit(&mut self, radius: f32) {
        let half_fov = self.fov / 2.0;
        self.distance = (radius / half_fov.sin()).max(self.near * 2.0) * 1.1;
        self.far = self.distance + radius * 4.0;
    }

    /// Tilt the orbit; pitch stays short of the poles.
    pub fn orbit(&mut self, dyaw: f32, dpitch: f32) {
        let limit = std::f32::consts::FRAC_PI_2 - 0.05;
        self.yaw += dyaw;
        self.pitch = (self.pitch + dpitch).clamp(-limit, limit);
    }

    pub fn toggle_projection(&mut self) {
        self.mode = match self.mode {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        };
    }

    pub fn position(&self) -> Point3<f32> {
        let offset = Vector3::new(
            self.distance * self.pitch.cos() * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            self.distance * self.pitch.cos() * self.yaw.cos(),
        );
        self.target + offset
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position(), &self.target, &Vector3::y())
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = self.distance;
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world-space point through `view_projection` to cell
    /// coordinates plus NDC depth. `None` when the point is behind the
    /// camera or outside the depth range.
    pub fn project_to_screen(
        view_projection: &Matrix4<f32>,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = view_projection * point.to_homogeneous();

        // Behind the eye, or too close to divide by
        if clip.w < 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(80, 40);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = Camera::new(80, 40);
        let vp = camera.view_projection();
        let (x, y, depth) = Camera::project_to_screen(&vp, &Point3::origin(), 80, 40).unwrap();
        assert_relative_eq!(x, 40.0, epsilon = 1e-3);
        assert_relative_eq!(y, 20.0, epsilon = 1e-3);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_point_behind_camera_is_rejected() {
        let camera = Camera::new(80, 40);
        let vp = camera.view_projection();
        let behind = camera.position() + (camera.position() - camera.target);
        assert!(Camera::project_to_screen(&vp, &behind, 80, 40).is_none());
    }

    #[test]
    fn test_orthographic_ignores_depth() {
        let mut camera = Camera::new(80, 40);
        camera.yaw = 0.0;
        camera.pitch = 0.0;
        camera.toggle_projection();
        assert_eq!(camera.mode, ProjectionMode::Orthographic);
        let vp = camera.view_projection();

        let (cx, cy, _) = Camera::project_to_screen(&vp, &Point3::origin(), 80, 40).unwrap();
        assert_relative_eq!(cx, 40.0, epsilon = 1e-3);
        assert_relative_eq!(cy, 20.0, epsilon = 1e-3);

        // Same x offset at two depths lands on the same column.
        let near = Camera::project_to_screen(&vp, &Point3::new(2.0, 0.0, 5.0), 80, 40).unwrap();
        let far = Camera::project_to_screen(&vp, &Point3::new(2.0, 0.0, -5.0), 80, 40).unwrap();
        assert_relative_eq!(near.0, far.0, epsilon = 1e-3);
        assert!(near.0 > cx);
        assert!(near.2 < far.2);

        camera.toggle_projection();
        let vp = camera.view_projection();
        let near = Camera::project_to_screen(&vp, &Point3::new(2.0, 0.0, 5.0), 80, 40).unwrap();
        let far = Camera::project_to_screen(&vp, &Point3::new(2.0, 0.0, -5.0), 80, 40).unwrap();
        assert!(near.0 > far.0);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut camera = Camera::default();
        camera.orbit(0.0, 10.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        assert!(camera.position().y > 0.0);
    }

    #[test]
    fn test_fit_moves_camera_out() {
        let mut camera = Camera::default();
        camera.fit(100.0);
        assert!(camera.distance > 100.0);
        assert!(camera.far > camera.distance);
    }
}
