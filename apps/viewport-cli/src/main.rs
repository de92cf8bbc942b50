use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use viewport_common::{Color, SurfaceSize, ViewportConfig};
use viewport_input::{InputEvent, Key};
use viewport_kernel::{Scene, SceneDescription};
use viewport_render::{DebugTextRenderer, FrameDriver, Renderer, SvgSink};
use viewport_tools::SceneInspector;

#[derive(Parser)]
#[command(name = "viewport-cli", about = "Headless driver for the 3D viewport")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON config file (defaults are used for missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the scene tree and a summary
    Inspect {
        /// Scene description (JSON); the demo scene if omitted
        #[arg(short, long)]
        scene: Option<PathBuf>,
    },
    /// Simulate frames and write the last one as SVG
    Render {
        /// Scene description (JSON); the demo scene if omitted
        #[arg(short, long)]
        scene: Option<PathBuf>,
        /// Number of frames to simulate
        #[arg(short, long, default_value = "1")]
        frames: u32,
        /// Key codes held for the whole run, e.g. KeyW,Space
        #[arg(long, value_delimiter = ',')]
        hold: Vec<String>,
        /// Logical surface width
        #[arg(long, default_value = "800")]
        width: f32,
        /// Logical surface height
        #[arg(long, default_value = "600")]
        height: f32,
        /// Device pixel ratio
        #[arg(long, default_value = "1")]
        pixel_ratio: f32,
        /// Background colour used to clear each frame
        #[arg(long, default_value = "#000000")]
        background: String,
        /// Where to write the SVG; only the frame summary is printed if omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn load_scene(path: Option<&Path>) -> anyhow::Result<Scene> {
    let description = match path {
        Some(path) => SceneDescription::load(path)?,
        None => SceneDescription::demo(),
    };
    Ok(description.build()?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => ViewportConfig::load(path)?,
        None => ViewportConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("viewport-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", viewport_kernel::crate_info());
            println!("input: {}", viewport_input::crate_info());
            println!("render: {}", viewport_render::crate_info());
            println!("tools: {}", viewport_tools::crate_info());
            println!(
                "config: fov={} gravity={} move_speed={}",
                config.fov_degrees, config.movement.gravity, config.movement.move_speed
            );
        }
        Commands::Inspect { scene } => {
            let scene = load_scene(scene.as_deref())?;
            print!("{}", SceneInspector::tree(&scene));
            println!("{}", SceneInspector::summary(&scene));
            for (id, _) in scene.workspace_parts() {
                if let Some(info) = SceneInspector::inspect_part(&scene, id) {
                    println!("  {info}");
                }
            }
        }
        Commands::Render {
            scene,
            frames,
            hold,
            width,
            height,
            pixel_ratio,
            background,
            out,
        } => {
            let scene = load_scene(scene.as_deref())?;
            let surface = SurfaceSize::new(width, height, pixel_ratio);
            let mut driver = FrameDriver::new(scene, &config, surface);
            let mut sink = SvgSink::new(surface).with_background(Color::new(background));

            for code in &hold {
                match Key::from_code(code) {
                    Some(key) => driver.push_input(InputEvent::KeyDown(key)),
                    None => tracing::warn!(code = %code, "ignoring unknown key code"),
                }
            }

            let mut last = None;
            for _ in 0..frames.max(1) {
                let Some(stats) = driver.tick(&mut sink, None) else {
                    break;
                };
                tracing::debug!(
                    frame = stats.frame,
                    faces = stats.faces_drawn,
                    culled = stats.faces_culled,
                    jumped = stats.step.jumped,
                    "frame"
                );
                last = Some(stats);
            }

            print!("{}", DebugTextRenderer::new().render(driver.scene(), &driver.view()));
            if let Some(stats) = last {
                println!(
                    "Simulated {} frame(s): {} faces drawn, {} culled",
                    stats.frame, stats.faces_drawn, stats.faces_culled
                );
            }

            if let Some(out) = out {
                std::fs::write(&out, sink.document())
                    .with_context(|| format!("failed to write {}", out.display()))?;
                println!("Wrote {} ({} paths)", out.display(), sink.path_count());
            }
        }
    }

    Ok(())
}
