/// Terminal front end: renders core solids as colored ASCII and animates them
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::{debug, info};
use nalgebra::{Matrix4, Vector3};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod camera;
pub mod cli;
pub mod renderer;
pub mod scene;

pub use camera::{Camera, ProjectionMode};
pub use renderer::{AsciiRenderer, RenderOptions};
pub use scene::{Scene, SceneItem};

const MAX_ROTATION_SPEED: f32 = 0.05;
const SPEED_STEP: f32 = 0.005;
const ORBIT_STEP: f32 = 0.1;

/// Knobs the user can change while the scene runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    /// Scene spin about Y, in radians per frame.
    pub rotation_speed: f32,
    pub force_wireframe: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            rotation_speed: 0.01,
            force_wireframe: false,
        }
    }
}

impl Controls {
    pub fn adjust_speed(&mut self, delta: f32) {
        self.rotation_speed = (self.rotation_speed + delta).clamp(0.0, MAX_ROTATION_SPEED);
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            force_wireframe: self.force_wireframe,
        }
    }
}

/// Scene rotation for a frame: `frame * speed` radians about Y.
pub fn scene_rotation(frame: u64, controls: &Controls) -> Matrix4<f32> {
    let angle = frame as f32 * controls.rotation_speed;
    Matrix4::new_rotation(Vector3::new(0.0, angle, 0.0))
}

/// Apply one key press to the controls and camera. Returns `false` when the
/// key asks to quit.
pub fn apply_key(code: KeyCode, controls: &mut Controls, camera: &mut Camera) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return false,
        KeyCode::Char('+') | KeyCode::Char('=') => controls.adjust_speed(SPEED_STEP),
        KeyCode::Char('-') => controls.adjust_speed(-SPEED_STEP),
        KeyCode::Char('f') => {
            controls.force_wireframe = !controls.force_wireframe;
            debug!("force wireframe: {}", controls.force_wireframe);
        }
        KeyCode::Char('o') => {
            camera.toggle_projection();
            debug!("projection: {:?}", camera.mode);
        }
        KeyCode::Char('w') | KeyCode::Up => camera.orbit(0.0, ORBIT_STEP),
        KeyCode::Char('s') | KeyCode::Down => camera.orbit(0.0, -ORBIT_STEP),
        KeyCode::Char('a') | KeyCode::Left => camera.orbit(-ORBIT_STEP, 0.0),
        KeyCode::Char('d') | KeyCode::Right => camera.orbit(ORBIT_STEP, 0.0),
        _ => {}
    }
    true
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    controls: Controls,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    frame: u64,
    last_fps_sample: Instant,
    frames_since_sample: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene, controls: Controls) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        // Top row is the status bar
        let height = height.saturating_sub(1).max(1);

        let mut camera = Camera::new(width as u32, height as u32);
        camera.fit(scene.bounding_radius().max(1.0));
        debug!(
            "terminal {}x{}, camera distance {:.1}",
            width, height, camera.distance
        );

        Ok(Self {
            scene,
            controls,
            camera,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            frame: 0,
            last_fps_sample: Instant::now(),
            frames_since_sample: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        info!("rendered {} frames", self.frame);
        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.render()?;
            self.frame += 1;

            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            self.frames_since_sample += 1;
            let since = self.last_fps_sample.elapsed();
            if since.as_secs() >= 1 {
                self.fps = self.frames_since_sample as f32 / since.as_secs_f32();
                self.frames_since_sample = 0;
                self.last_fps_sample = Instant::now();
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            self.running = apply_key(code, &mut self.controls, &mut self.camera);
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let rotation = scene_rotation(self.frame, &self.controls);
        let options = self.controls.render_options();

        self.renderer.clear();
        for item in &self.scene.items {
            self.renderer
                .render_item(item, &rotation, &self.camera, options);
        }

        let mut stdout = stdout();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "gasket | {} items | FPS: {:.1} | speed {:.3} | +/- speed  f wireframe  o projection  WASD/arrows orbit  q quit",
                self.scene.items.len(),
                self.fps,
                self.controls.rotation_speed
            )),
            terminal::Clear(terminal::ClearType::UntilNewLine),
            ResetColor,
            cursor::MoveTo(0, 1)
        )?;

        self.renderer.draw(&mut stdout)?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_speed_is_clamped() {
        let mut controls = Controls::default();
        controls.adjust_speed(1.0);
        assert_eq!(controls.rotation_speed, MAX_ROTATION_SPEED);
        controls.adjust_speed(-1.0);
        assert_eq!(controls.rotation_speed, 0.0);
    }

    #[test]
    fn test_scene_rotation_follows_frame_count() {
        let controls = Controls {
            rotation_speed: std::f32::consts::FRAC_PI_2 / 10.0,
            force_wireframe: false,
        };
        let m = scene_rotation(10, &controls);
        let p = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(0.0, 0.0, -1.0), epsilon = 1e-5);

        assert_relative_eq!(scene_rotation(0, &controls), Matrix4::identity());
    }

    #[test]
    fn test_quit_keys() {
        let mut controls = Controls::default();
        let mut camera = Camera::default();
        assert!(!apply_key(KeyCode::Char('q'), &mut controls, &mut camera));
        assert!(!apply_key(KeyCode::Esc, &mut controls, &mut camera));
        assert!(apply_key(KeyCode::Char('x'), &mut controls, &mut camera));
        assert_eq!(controls, Controls::default());
    }

    #[test]
    fn test_speed_keys() {
        let mut controls = Controls::default();
        let mut camera = Camera::default();
        assert!(apply_key(KeyCode::Char('+'), &mut controls, &mut camera));
        assert_relative_eq!(controls.rotation_speed, 0.015, epsilon = 1e-6);
        apply_key(KeyCode::Char('='), &mut controls, &mut camera);
        assert_relative_eq!(controls.rotation_speed, 0.02, epsilon = 1e-6);
        apply_key(KeyCode::Char('-'), &mut controls, &mut camera);
        assert_relative_eq!(controls.rotation_speed, 0.015, epsilon = 1e-6);
    }

    #[test]
    fn test_wireframe_and_projection_toggles() {
        let mut controls = Controls::default();
        let mut camera = Camera::default();
        apply_key(KeyCode::Char('f'), &mut controls, &mut camera);
        assert!(controls.force_wireframe);
        apply_key(KeyCode::Char('f'), &mut controls, &mut camera);
        assert!(!controls.force_wireframe);

        apply_key(KeyCode::Char('o'), &mut controls, &mut camera);
        assert_eq!(camera.mode, ProjectionMode::Orthographic);
        apply_key(KeyCode::Char('o'), &mut controls, &mut camera);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
    }

    #[test]
    fn test_orbit_keys() {
        let mut controls = Controls::default();
        let mut camera = Camera::default();
        let (yaw, pitch) = (camera.yaw, camera.pitch);

        for code in [KeyCode::Char('w'), KeyCode::Up] {
            apply_key(code, &mut controls, &mut camera);
        }
        assert_relative_eq!(camera.pitch, pitch + 2.0 * ORBIT_STEP, epsilon = 1e-6);
        for code in [KeyCode::Char('s'), KeyCode::Down] {
            apply_key(code, &mut controls, &mut camera);
        }
        assert_relative_eq!(camera.pitch, pitch, epsilon = 1e-6);

        for code in [KeyCode::Char('d'), KeyCode::Right] {
            apply_key(code, &mut controls, &mut camera);
        }
        assert_relative_eq!(camera.yaw, yaw + 2.0 * ORBIT_STEP, epsilon = 1e-6);
        for code in [KeyCode::Char('a'), KeyCode::Left] {
            apply_key(code, &mut controls, &mut camera);
        }
        assert_relative_eq!(camera.yaw, yaw, epsilon = 1e-6);
    }

    #[test]
    fn test_render_options_carry_wireframe() {
        let controls = Controls {
            rotation_speed: 0.0,
            force_wireframe: true,
        };
        assert!(controls.render_options().force_wireframe);
    }
}
