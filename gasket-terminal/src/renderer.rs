/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use gasket_core::{Material, Shading, Triangle, Vec3};
use nalgebra::{Matrix4, Point3};
use std::io::Write;

use crate::camera::Camera;
use crate::scene::SceneItem;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Fixed light used for Lambert shading, pointing from the viewer's upper left.
const LIGHT_DIR: [f32; 3] = [-0.4, 0.8, 0.45];

/// Floor so faces turned away from the light stay visible.
const AMBIENT: f32 = 0.15;

/// Per-frame rendering switches, owned by the app.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Draw every item as wireframe regardless of its material.
    pub force_wireframe: bool,
}

/// ASCII renderer that converts solids to colored terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Option<(u8, u8, u8)>>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![None; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(None);
    }

    /// Character at a cell, for inspection.
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    /// Number of cells that received a fragment this frame.
    pub fn covered_cells(&self) -> usize {
        self.color_buffer.iter().filter(|c| c.is_some()).count()
    }

    /// Render one scene item under `scene_rotation` (applied after the item's
    /// own transform).
    pub fn render_item(
        &mut self,
        item: &SceneItem,
        scene_rotation: &Matrix4<f32>,
        camera: &Camera,
        options: RenderOptions,
    ) {
        let material = item.material();
        let view_projection = camera.view_projection() * scene_rotation;

        if material.wireframe || options.force_wireframe {
            let rgb = shade(material, 1.0);
            for (a, b) in item.edges() {
                self.render_segment(&a, &b, &view_projection, rgb);
            }
        } else {
            for triangle in item.triangles() {
                self.render_triangle(&triangle, material, scene_rotation, &view_projection);
            }
        }
    }

    fn project(&self, view_projection: &Matrix4<f32>, point: &Vec3) -> Option<(f32, f32, f32)> {
        Camera::project_to_screen(
            view_projection,
            &Point3::from(*point),
            self.width as u32,
            self.height as u32,
        )
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        material: &Material,
        scene_rotation: &Matrix4<f32>,
        view_projection: &Matrix4<f32>,
    ) {
        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(triangle.vertices.iter()) {
            match self.project(view_projection, vertex) {
                Some(coords) => *slot = coords,
                None => return, // Triangle is clipped
            }
        }

        let brightness = match material.shading {
            Shading::Basic => 1.0,
            Shading::Lambert => {
                let normal = scene_rotation.transform_vector(&triangle.normal());
                let light = Vec3::from(LIGHT_DIR).normalize();
                // Open surfaces are lit from both sides
                AMBIENT + (1.0 - AMBIENT) * normal.dot(&light).abs()
            }
        };

        // Map brightness to character
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let character = LUMINOSITY_RAMP[char_index.clamp(1, LUMINOSITY_RAMP.len() - 1)];

        self.rasterize_triangle(&screen_coords, character, shade(material, brightness));
    }

    fn rasterize_triangle(
        &mut self,
        coords: &[(f32, f32, f32); 3],
        character: char,
        rgb: (u8, u8, u8),
    ) {
        let [v0, v1, v2] = *coords;

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        self.plot(x as usize, y as usize, depth, character, rgb);
                    }
                }
            }
        }
    }

    fn render_segment(
        &mut self,
        a: &Vec3,
        b: &Vec3,
        view_projection: &Matrix4<f32>,
        rgb: (u8, u8, u8),
    ) {
        let (Some(p0), Some(p1)) = (
            self.project(view_projection, a),
            self.project(view_projection, b),
        ) else {
            return;
        };

        let steps = (p1.0 - p0.0).abs().max((p1.1 - p0.1).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = p0.0 + (p1.0 - p0.0) * t;
            let y = p0.1 + (p1.1 - p0.1) * t;
            if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
                continue;
            }
            let depth = p0.2 + (p1.2 - p0.2) * t;
            // Slight bias so edges win over coplanar fills
            self.plot(x as usize, y as usize, depth - 1e-4, '#', rgb);
        }
    }

    fn plot(&mut self, x: usize, y: usize, depth: f32, character: char, rgb: (u8, u8, u8)) {
        let idx = y * self.width + x;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
            self.color_buffer[idx] = Some(rgb);
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let c = self.char_buffer[idx];

                let color = match self.color_buffer[idx] {
                    Some((r, g, b)) => Color::Rgb { r, g, b },
                    None => Color::DarkGrey,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Material color scaled by `brightness`.
fn shade(material: &Material, brightness: f32) -> (u8, u8, u8) {
    let [r, g, b] = material.color.to_unit_rgb();
    let scale = |c: f32| (c * brightness.clamp(0.0, 1.0) * 255.0).round() as u8;
    (scale(r), scale(g), scale(b))
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use gasket_core::Color as SolidColor;

    fn camera_for(scene: &Scene, width: u32, height: u32) -> Camera {
        let mut camera = Camera::new(width, height);
        camera.fit(scene.bounding_radius());
        camera
    }

    #[test]
    fn test_barycentric_center() {
        let (w0, w1, w2) =
            barycentric((0.0, 0.0), (3.0, 0.0), (0.0, 3.0), (1.0, 1.0)).unwrap();
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-6);
        assert!(w0 > 0.0 && w1 > 0.0 && w2 > 0.0);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 1.0)).is_none());
    }

    #[test]
    fn test_filled_box_covers_center() {
        let scene = Scene::single_box(
            Vec3::new(10.0, 10.0, 10.0),
            Some(SolidColor(0xff0000)),
            false,
            None,
        )
        .unwrap();
        let camera = camera_for(&scene, 40, 20);
        let mut renderer = AsciiRenderer::new(40, 20);
        for item in &scene.items {
            renderer.render_item(item, &Matrix4::identity(), &camera, RenderOptions::default());
        }
        assert_ne!(renderer.cell(20, 10), Some(' '));
        assert!(renderer.covered_cells() > 20);
    }

    fn drawn_chars(renderer: &AsciiRenderer) -> Vec<char> {
        (0..renderer.height())
            .flat_map(|y| (0..renderer.width()).map(move |x| (x, y)))
            .filter_map(|(x, y)| renderer.cell(x, y))
            .filter(|c| *c != ' ')
            .collect()
    }

    #[test]
    fn test_basic_fill_and_wireframe_glyphs() {
        let scene = Scene::gasket(2, None, false);
        let camera = camera_for(&scene, 60, 30);

        let mut filled = AsciiRenderer::new(60, 30);
        let mut wire = AsciiRenderer::new(60, 30);
        for item in &scene.items {
            filled.render_item(item, &Matrix4::identity(), &camera, RenderOptions::default());
            wire.render_item(
                item,
                &Matrix4::identity(),
                &camera,
                RenderOptions {
                    force_wireframe: true,
                },
            );
        }

        // pyramid leaves are unlit, so every fragment is full brightness
        let fill = drawn_chars(&filled);
        assert!(!fill.is_empty());
        assert!(fill.iter().all(|c| *c == '@'));

        let edges = drawn_chars(&wire);
        assert!(!edges.is_empty());
        assert!(edges.iter().all(|c| *c == '#'));
    }

    #[test]
    fn test_clear_resets_buffers() {
        let scene = Scene::gasket(1, None, false);
        let camera = camera_for(&scene, 30, 15);
        let mut renderer = AsciiRenderer::new(30, 15);
        renderer.render_item(
            &scene.items[0],
            &Matrix4::identity(),
            &camera,
            RenderOptions::default(),
        );
        assert!(renderer.covered_cells() > 0);
        renderer.clear();
        assert_eq!(renderer.covered_cells(), 0);
    }

    #[test]
    fn test_draw_emits_every_row() {
        let renderer = AsciiRenderer::new(4, 3);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches("\r\n").count(), 2);
    }

    #[test]
    fn test_shade_scales_color() {
        let material = Material {
            color: SolidColor(0xff8000),
            wireframe: false,
            shading: Shading::Basic,
        };
        assert_eq!(shade(&material, 1.0), (255, 128, 0));
        assert_eq!(shade(&material, 0.0), (0, 0, 0));
    }
}
