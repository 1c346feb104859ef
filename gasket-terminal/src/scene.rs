/// Scenes assembled from core solids for the terminal renderer
use gasket_core::{
    build_box, build_tetrahedron, fractal, parametric, Cell, Color, Material, Shading, SolidError,
    SolidSpec, Transform, Triangle, Vec3,
};
use log::info;

/// Something the renderer can draw.
#[derive(Debug, Clone)]
pub enum SceneItem {
    Solid(SolidSpec),
    /// Loose world-space triangles, e.g. a sampled surface or an STL import.
    Soup {
        triangles: Vec<Triangle>,
        material: Material,
    },
}

impl SceneItem {
    pub fn material(&self) -> &Material {
        match self {
            SceneItem::Solid(solid) => solid.material(),
            SceneItem::Soup { material, .. } => material,
        }
    }

    pub fn triangles(&self) -> Vec<Triangle> {
        match self {
            SceneItem::Solid(solid) => solid.triangles(),
            SceneItem::Soup { triangles, .. } => triangles.clone(),
        }
    }

    /// World-space segments for wireframe drawing.
    pub fn edges(&self) -> Vec<(Vec3, Vec3)> {
        match self {
            SceneItem::Solid(solid) => {
                let world = solid.world_vertices();
                solid
                    .edges()
                    .into_iter()
                    .map(|(a, b)| (world[a], world[b]))
                    .collect()
            }
            SceneItem::Soup { triangles, .. } => triangles
                .iter()
                .flat_map(|t| {
                    let [a, b, c] = t.vertices;
                    [(a, b), (b, c), (c, a)]
                })
                .collect(),
        }
    }
}

/// Half-width of the gasket's root pyramid.
pub const GASKET_SIZE: f32 = 10.0;

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub items: Vec<SceneItem>,
}

impl Scene {
    pub fn from_solids(solids: impl IntoIterator<Item = SolidSpec>) -> Self {
        Self {
            items: solids.into_iter().map(SceneItem::Solid).collect(),
        }
    }

    pub fn gasket(depth: i32, color: Option<Color>, parallel: bool) -> Self {
        let cell = Cell::square_pyramid(GASKET_SIZE);
        let leaves = if parallel {
            fractal::subdivide_par(&cell, depth, color)
        } else {
            fractal::subdivide(&cell, depth, color)
        };
        info!("gasket depth {} produced {} leaves", depth, leaves.len());
        Self::from_solids(leaves)
    }

    pub fn single_box(
        dims: Vec3,
        color: Option<Color>,
        wireframe: bool,
        rotation_deg: Option<Vec3>,
    ) -> Result<Self, SolidError> {
        let mut transform = Transform::identity();
        transform.rotation_deg = rotation_deg;
        let solid = build_box(dims, color, wireframe, Some(&transform))?;
        Ok(Self::from_solids([solid]))
    }

    /// Ten unit tetrahedra spread on a ring, each turned differently.
    pub fn tetrahedra(color: Option<Color>, wireframe: bool) -> Result<Self, SolidError> {
        let vertices = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        let solids = (0..10)
            .map(|i| {
                let angle = i as f32 * 36.0;
                let (sin, cos) = angle.to_radians().sin_cos();
                let transform = Transform::at(Vec3::new(8.0 * cos, (i % 3) as f32 - 1.0, 8.0 * sin))
                    .with_scale(Vec3::new(2.0, 2.0, 2.0))
                    .with_rotation_deg(Vec3::new(angle, angle * 2.0, 0.0));
                build_tetrahedron(&vertices, color, wireframe, Some(&transform))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_solids(solids))
    }

    pub fn saddle(
        slices: usize,
        stacks: usize,
        radius: f32,
        color: Option<Color>,
        wireframe: bool,
    ) -> Result<Self, SolidError> {
        let mesh = parametric::sample(|u, v| parametric::saddle(u, v, radius), slices, stacks)?;
        Ok(Self::from_triangles(
            mesh.triangles(),
            Material {
                color: Color::or_default(color),
                wireframe,
                shading: Shading::Lambert,
            },
        ))
    }

    pub fn from_triangles(triangles: Vec<Triangle>, material: Material) -> Self {
        Self {
            items: vec![SceneItem::Soup {
                triangles,
                material,
            }],
        }
    }

    /// All world-space triangles, item by item.
    pub fn triangles(&self) -> Vec<Triangle> {
        self.items.iter().flat_map(|item| item.triangles()).collect()
    }

    /// Largest distance from the origin of any drawn vertex.
    pub fn bounding_radius(&self) -> f32 {
        self.triangles()
            .iter()
            .flat_map(|t| t.vertices)
            .map(|v| v.norm())
            .fold(0.0, f32::max)
    }
}
