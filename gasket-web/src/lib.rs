/// Gasket Web - WASM bindings that hand solids to a browser renderer
///
/// Solids are flattened into typed buffers a WebGL scene graph can upload
/// directly: positions `[x, y, z, ...]` in world space, triangle indices, and
/// per-vertex RGB colors in `[0, 1]`.
///
/// ```javascript
/// const mesh = build_gasket(4, "pink");
/// const geometry = new THREE.BufferGeometry();
/// geometry.setAttribute("position", new THREE.BufferAttribute(mesh.positions(), 3));
/// geometry.setAttribute("color", new THREE.BufferAttribute(mesh.colors(), 3));
/// geometry.setIndex(new THREE.BufferAttribute(mesh.indices(), 1));
/// ```

use gasket_core::{fractal, Cell, Color, SolidError, SolidSpec, Transform, Vec3};
use log::debug;
use wasm_bindgen::prelude::*;

/// Flattened geometry for one or more solids.
#[wasm_bindgen]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    positions: Vec<f32>,
    indices: Vec<u32>,
    colors: Vec<f32>,
    wireframe: bool,
}

#[wasm_bindgen]
impl MeshBuffers {
    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> u32 {
        (self.positions.len() / 3) as u32
    }

    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> u32 {
        (self.indices.len() / 3) as u32
    }

    /// True when every solid asked for wireframe drawing.
    #[wasm_bindgen(getter)]
    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn positions(&self) -> Vec<f32> {
        self.positions.clone()
    }

    pub fn indices(&self) -> Vec<u32> {
        self.indices.clone()
    }

    pub fn colors(&self) -> Vec<f32> {
        self.colors.clone()
    }
}

impl MeshBuffers {
    /// Flatten `solids` into one buffer set, each solid's indices offset past
    /// the vertices of the solids before it.
    pub fn from_solids<'a>(solids: impl IntoIterator<Item = &'a SolidSpec>) -> Self {
        let mut buffers = MeshBuffers {
            wireframe: true,
            ..Default::default()
        };
        let mut any = false;
        for solid in solids {
            any = true;
            let base = buffers.vertex_count();
            let rgb = solid.material().color.to_unit_rgb();
            for v in solid.world_vertices() {
                buffers.positions.extend_from_slice(&[v.x, v.y, v.z]);
                buffers.colors.extend_from_slice(&rgb);
            }
            buffers.indices.extend(
                solid
                    .faces()
                    .iter()
                    .flatten()
                    .map(|&i| base + i as u32),
            );
            buffers.wireframe &= solid.material().wireframe;
        }
        buffers.wireframe &= any;
        buffers
    }
}

fn to_js(e: SolidError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_color(color: Option<String>) -> Result<Option<Color>, JsValue> {
    color.as_deref().map(Color::parse).transpose().map_err(to_js)
}

/// Number of pyramids `build_gasket` produces for `depth`, as a JS number.
/// Exact while the count stays below 2^53.
#[wasm_bindgen]
pub fn leaf_count(depth: i32) -> f64 {
    match fractal::leaf_count(depth) {
        Some(n) => n as f64,
        None => 5f64.powi(depth.max(1) - 1),
    }
}

/// Subdivide the lesson's square pyramid down to `depth` levels.
#[wasm_bindgen]
pub fn build_gasket(depth: i32, color: Option<String>) -> Result<MeshBuffers, JsValue> {
    let color = parse_color(color)?;
    let leaves = fractal::subdivide(&Cell::square_pyramid(10.0), depth, color);
    debug!("gasket depth {} -> {} leaves", depth, leaves.len());
    Ok(MeshBuffers::from_solids(&leaves))
}

/// Box of `dx * dy * dz` placed at `position`, rotated by Euler degrees.
#[wasm_bindgen]
pub fn build_box(
    dx: f32,
    dy: f32,
    dz: f32,
    position: Vec<f32>,
    rotation_deg: Option<Vec<f32>>,
    color: Option<String>,
    wireframe: bool,
) -> Result<MeshBuffers, JsValue> {
    let color = parse_color(color)?;
    let transform = match position.as_slice() {
        [x, y, z] => {
            let mut t = Transform::at(Vec3::new(*x, *y, *z));
            t.rotation_deg = match rotation_deg.as_deref() {
                Some([rx, ry, rz]) => Some(Vec3::new(*rx, *ry, *rz)),
                Some(_) => return Err(JsValue::from_str("rotation must have 3 components")),
                None => None,
            };
            Some(t)
        }
        // An empty position means no transform, which a box rejects.
        [] => None,
        _ => return Err(JsValue::from_str("position must have 3 components")),
    };
    let solid =
        gasket_core::build_box(Vec3::new(dx, dy, dz), color, wireframe, transform.as_ref())
            .map_err(to_js)?;
    Ok(MeshBuffers::from_solids([&solid]))
}

/// Forward Rust panics to the browser console.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    Ok(())
}
