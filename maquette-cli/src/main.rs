/// Maquette CLI - building mesh generator and terminal previewer
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use maquette_cli::{building_filename, TerminalApp};
use maquette_core::obj::{parse_obj, to_obj_string};
use maquette_core::{Frustum, ProjectionMode};

#[derive(Parser)]
#[command(name = "maquette")]
#[command(about = "Generate building meshes and preview them in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a closed N-sided building mesh as an OBJ file
    Generate {
        /// Number of side panels (3 to 36)
        #[arg(default_value_t = 8)]
        sides: u32,

        /// Building height
        #[arg(default_value_t = 6.0)]
        height: f32,

        /// Radius of the bottom ring
        #[arg(default_value_t = 1.0)]
        bottom_radius: f32,

        /// Radius of the top ring
        #[arg(default_value_t = 0.8)]
        top_radius: f32,

        /// Output file (defaults to building_<params>.obj)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the generated mesh in the terminal viewer
        #[arg(long)]
        preview: bool,
    },

    /// Preview an OBJ file in the terminal
    Preview {
        /// Path to the OBJ file
        file: PathBuf,

        /// Use an orthographic projection
        #[arg(long)]
        ortho: bool,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Commands::Generate {
            sides,
            height,
            bottom_radius,
            top_radius,
            output,
            preview,
        } => {
            let mesh = Frustum::new(sides, height, bottom_radius, top_radius)?.mesh()?;
            let path = output.unwrap_or_else(|| {
                PathBuf::from(building_filename(sides, height, bottom_radius, top_radius))
            });

            fs::write(&path, to_obj_string(&mesh))
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "Wrote {} ({} vertices, {} normals, {} faces)",
                path.display(),
                mesh.vertex_count(),
                mesh.normal_count(),
                mesh.face_count()
            );

            if preview {
                TerminalApp::new(mesh)?.run()?;
            }
            Ok(())
        }

        Commands::Preview { file, ortho } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let mesh = parse_obj(&text)?;
            println!("Loaded {} faces, starting preview...", mesh.face_count());

            let mut app = TerminalApp::new(mesh)?;
            if ortho {
                app.set_projection(ProjectionMode::Orthographic);
            }
            app.run()?;
            Ok(())
        }
    }
}
