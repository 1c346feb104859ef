/// Gasket Terminal - builds a scene from the command line and spins it
///
/// Controls:
///   - +/-: Rotation speed
///   - f: Toggle wireframe
///   - o: Toggle perspective/orthographic
///   - WASD / Arrow Keys: Orbit the camera
///   - Q/ESC: Quit

use std::fs;
use std::io;

use clap::Parser;
use gasket_core::{stl, Color, Material, Shading, SolidError};
use gasket_terminal::cli::{Cli, Command};
use gasket_terminal::{Controls, Scene, TerminalApp};
use log::info;

fn invalid_input(e: SolidError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, e)
}

fn build_scene(command: &Command) -> io::Result<Scene> {
    let scene = match command {
        Command::Gasket {
            depth,
            color,
            parallel,
        } => Scene::gasket(*depth, Some(*color), *parallel),
        Command::Cuboid {
            dims,
            color,
            wireframe,
            rotate,
        } => Scene::single_box(*dims, *color, *wireframe, *rotate).map_err(invalid_input)?,
        Command::Tetrahedra { color, wireframe } => {
            Scene::tetrahedra(Some(*color), *wireframe).map_err(invalid_input)?
        }
        Command::Saddle {
            slices,
            stacks,
            radius,
            color,
            wireframe,
        } => Scene::saddle(*slices, *stacks, *radius, *color, *wireframe)
            .map_err(invalid_input)?,
        Command::View { path } => {
            let triangles = stl::read_file(path)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            info!("loaded {} triangles from {}", triangles.len(), path.display());
            Scene::from_triangles(
                triangles,
                Material {
                    color: Color::WHITE,
                    wireframe: false,
                    shading: Shading::Lambert,
                },
            )
        }
    };
    Ok(scene)
}

fn main() -> io::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let scene = build_scene(&cli.command)?;

    if let Some(path) = &cli.export {
        let text = stl::write_triangles(&cli.command.solid_name(), scene.triangles());
        fs::write(path, text)?;
        println!("Wrote {} triangles to {}", scene.triangles().len(), path.display());
        return Ok(());
    }

    let controls = Controls {
        rotation_speed: cli.rotation_speed,
        ..Controls::default()
    };

    let mut app = TerminalApp::new(scene, controls)?;
    app.run()
}
