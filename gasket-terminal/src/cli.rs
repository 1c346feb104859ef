// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gasket_core::{Color, Vec3};

#[derive(Parser, Debug, Clone)]
#[command(name = "gasket-terminal")]
#[command(about = "Build solids and gaskets and spin them in the terminal", long_about = None)]
pub struct Cli {
    /// Write the scene as ASCII STL to this path and exit instead of rendering
    #[arg(long, global = true)]
    pub export: Option<PathBuf>,

    /// Initial scene spin in radians per frame
    #[arg(long, global = true, default_value_t = 0.01)]
    pub rotation_speed: f32,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Recursive five-point gasket
    Gasket {
        #[arg(long, default_value_t = 4)]
        depth: i32,
        #[arg(long, value_parser = parse_color, default_value = "pink")]
        color: Color,
        /// Subdivide the top-level branches in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// A single box centered at the origin
    #[command(name = "box")]
    Cuboid {
        #[arg(long, value_parser = parse_vec3, default_value = "10,10,10")]
        dims: Vec3,
        #[arg(long, value_parser = parse_color)]
        color: Option<Color>,
        #[arg(long)]
        wireframe: bool,
        /// Euler rotation in degrees, applied X then Y then Z
        #[arg(long, value_parser = parse_vec3)]
        rotate: Option<Vec3>,
    },
    /// A ring of unit tetrahedra
    Tetrahedra {
        #[arg(long, value_parser = parse_color, default_value = "#10e3b1")]
        color: Color,
        #[arg(long)]
        wireframe: bool,
    },
    /// Sampled saddle surface
    Saddle {
        #[arg(long, default_value_t = 16)]
        slices: usize,
        #[arg(long, default_value_t = 16)]
        stacks: usize,
        #[arg(long, default_value_t = 20.0)]
        radius: f32,
        #[arg(long, value_parser = parse_color)]
        color: Option<Color>,
        #[arg(long)]
        wireframe: bool,
    },
    /// Load and display an STL file
    View { path: PathBuf },
}

impl Command {
    /// Solid name for STL export: the subcommand, or the file stem for `view`.
    pub fn solid_name(&self) -> String {
        match self {
            Command::Gasket { .. } => "gasket".to_string(),
            Command::Cuboid { .. } => "box".to_string(),
            Command::Tetrahedra { .. } => "tetrahedra".to_string(),
            Command::Saddle { .. } => "saddle".to_string(),
            Command::View { path } => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "view".to_string()),
        }
    }
}

fn parse_color(s: &str) -> Result<Color, String> {
    Color::parse(s).map_err(|e| e.to_string())
}

/// Parse `x,y,z`.
fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("{:?}: {}", p, e)))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z, got {:?}", s)),
    }
}
