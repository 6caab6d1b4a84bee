use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use glint_renderer::{demo, render, PpmFormat, RenderConfig, Scene};

/// Which scene to render
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SceneKind {
    /// Built-in spheres, boxes, and prism
    Simple,
    /// An OFF model from the models directory
    Mesh,
    /// A scene description file (see --file)
    File,
}

#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "Recursive ray tracer with Blinn-Phong shading", long_about = None)]
struct Args {
    /// Output image; `.png` writes PNG, anything else PPM
    #[arg(short, long, default_value = "render.ppm")]
    output: PathBuf,

    #[arg(short, long, value_enum, default_value_t = SceneKind::Simple)]
    scene: SceneKind,

    /// Model name for the mesh scene, loaded from models/<NAME>.off
    #[arg(short, long, default_value = "1grm")]
    model: String,

    /// Scene description file for the file scene
    #[arg(short, long)]
    file: Option<PathBuf>,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Override the scene's reflection setting
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    reflections: Option<bool>,

    /// Override the scene's maximum reflection depth (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_depth: Option<u32>,

    /// Write ASCII (P3) PPM instead of binary
    #[arg(long)]
    ascii: bool,
}

fn load_scene(args: &Args) -> Result<Scene> {
    match args.scene {
        SceneKind::Simple => Ok(demo::simple_scene()),
        SceneKind::Mesh => {
            let path = PathBuf::from("models").join(format!("{}.off", args.model));
            demo::mesh_scene(&path)
                .with_context(|| format!("Failed to set up mesh scene from {:?}", path))
        }
        SceneKind::File => {
            let Some(path) = &args.file else {
                bail!("--scene file requires --file <PATH>");
            };
            let scene = Scene::load(path)
                .with_context(|| format!("Failed to load scene from {:?}", path))?;
            log::info!("Scene loaded from {:?}", path);
            Ok(scene)
        }
    }
}

/// Scene settings first, then command-line overrides.
fn build_config(args: &Args, scene: &Scene) -> Result<RenderConfig> {
    if args.width == 0 || args.height == 0 {
        bail!("Image size must be positive, got {}x{}", args.width, args.height);
    }

    let mut config = RenderConfig::from_defaults(args.width, args.height, scene.defaults());
    if let Some(reflections) = args.reflections {
        config.reflections = reflections;
    }
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let scene = load_scene(&args)?;
    let config = build_config(&args, &scene)?;

    log::info!(
        "Rendering scene to {:?} at {}x{} resolution...",
        args.output,
        config.width,
        config.height
    );

    let start = Instant::now();
    let image = render(&scene, &config);

    let saved = if args.ascii {
        image.save_ppm(&args.output, PpmFormat::Ascii)
    } else {
        image.save(&args.output)
    };
    saved.with_context(|| format!("Failed to save image to {:?}", args.output))?;

    log::info!("Rendering completed in {:.3} seconds", start.elapsed().as_secs_f64());
    log::info!("Image saved to {:?}", args.output);

    Ok(())
}
