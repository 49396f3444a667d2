#![deny(unsafe_code)]
//! CLI for inspecting the camera-quad renderer without a GPU.
//!
//! Subcommands:
//! - `geometry` — print the quad built for a viewport size
//! - `shaders` — print the vertex and fragment sources
//! - `config` — print the resolved configuration

mod error;

use camera_quad_core::geometry::{TEX_COORD_OFFSET, VERTEX_STRIDE};
use camera_quad_core::shader::{fragment_source, QUAD_VERTEX_SHADER};
use camera_quad_core::{CameraQuadConfig, QuadMesh};
use clap::{Parser, Subcommand};
use error::CliError;
use std::process;

#[derive(Parser)]
#[command(name = "camera-quad", about = "Camera quad renderer inspection CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Settings as a JSON string: {"quad": {...}, "feed": {...}}.
    #[arg(long, global = true, default_value = "{}")]
    params: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the quad for a viewport and print its vertices and indices.
    Geometry {
        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = 1920)]
        width: u32,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = 1080)]
        height: u32,
    },
    /// Print the shader sources.
    Shaders {
        /// Use the external-OES camera fragment variant.
        #[arg(long)]
        external: bool,
    },
    /// Print the resolved configuration.
    Config,
}

/// Logger driven by `env`, showing warnings and errors when it sets no filter.
fn logger_builder(env: env_logger::Env<'_>) -> env_logger::Builder {
    env_logger::Builder::from_env(env.default_filter_or("warn"))
}

fn run(cli: Cli) -> Result<(), CliError> {
    let params: serde_json::Value = serde_json::from_str(&cli.params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let config = CameraQuadConfig::from_json(&params);
    log::debug!("resolved config: {config:?}");

    match cli.command {
        Command::Geometry { width, height } => {
            let mesh = QuadMesh::build(&config.quad, width, height)?;
            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "half_width": config.quad.half_width,
                    "half_height": mesh.half_height(),
                    "depth": config.quad.depth,
                    "stride": VERTEX_STRIDE,
                    "tex_coord_offset": TEX_COORD_OFFSET,
                    "vertex_bytes": mesh.vertex_bytes().len(),
                    "index_bytes": mesh.index_bytes().len(),
                    "mesh": mesh,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "quad for {width}x{height}: half extents {} x {}, depth {}",
                    config.quad.half_width,
                    mesh.half_height(),
                    config.quad.depth
                );
                println!("vertices (x, y, z, u, v):");
                for v in &mesh.vertices {
                    let [x, y, z] = v.position;
                    let [s, t] = v.tex_coord;
                    println!("  {x:>9.3} {y:>9.3} {z:>9.3}  {s:.1} {t:.1}");
                }
                println!("indices: {:?}", mesh.indices);
                println!(
                    "buffers: {} vertex bytes (stride {VERTEX_STRIDE}), {} index bytes",
                    mesh.vertex_bytes().len(),
                    mesh.index_bytes().len()
                );
            }
        }
        Command::Shaders { external } => {
            let fragment = fragment_source(external);
            if cli.json {
                let info = serde_json::json!({
                    "external": external,
                    "vertex": QUAD_VERTEX_SHADER,
                    "fragment": fragment,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("// vertex\n{QUAD_VERTEX_SHADER}");
                println!("// fragment\n{fragment}");
            }
        }
        Command::Config => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("{config:#?}");
            }
        }
    }

    Ok(())
}

fn main() {
    logger_builder(env_logger::Env::default()).init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
