//! Renders a spinning mesh into a sequence of PNG frames.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use softraster::texture::Texture;
use softraster::{Engine, Mesh, RenderConfig};

#[derive(Parser)]
#[command(name = "softraster", about = "Render a mesh to PNG frames on the CPU")]
struct Args {
    /// OBJ file to render. The built-in unit cube is used when omitted.
    mesh: Option<PathBuf>,

    /// Number of frames to render.
    #[arg(short, long, default_value_t = 1)]
    frames: u32,

    /// RON render config; defaults are used for anything it leaves out.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image to map onto the mesh instead of the checkerboard.
    #[arg(short, long)]
    texture: Option<PathBuf>,

    /// Directory the frames are written to.
    #[arg(short, long, default_value = "frames")]
    out: PathBuf,

    /// Distance from the camera to the mesh centre.
    #[arg(long, default_value_t = 3.0)]
    distance: f32,

    /// Rotation per frame in radians.
    #[arg(long, default_value_t = 0.05)]
    spin: f32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    let mut engine = Engine::new(&config).context("create engine")?;

    let mesh = match &args.mesh {
        Some(path) => {
            Mesh::from_obj(path).with_context(|| format!("load mesh {}", path.display()))?
        }
        None => Mesh::unit_cube(),
    };
    engine.set_mesh(mesh.centered());

    if let Some(path) = &args.texture {
        let texture = Texture::from_file(path)
            .with_context(|| format!("load texture {}", path.display()))?
            .with_wrap(config.wrap_mode);
        engine.set_texture(texture);
    }

    engine.transform_mut().set_position_xyz(0.0, 0.0, args.distance);

    fs::create_dir_all(&args.out)
        .with_context(|| format!("create output directory {}", args.out.display()))?;

    info!(
        mesh = engine.mesh().name(),
        triangles = engine.mesh().len(),
        width = config.width,
        height = config.height,
        frames = args.frames,
        "rendering"
    );

    for frame in 0..args.frames {
        engine
            .transform_mut()
            .rotate_y(args.spin)
            .rotate_x(args.spin * 0.5);
        engine.update();
        engine.render();

        let path = args.out.join(format!("frame_{frame:04}.png"));
        engine
            .renderer()
            .to_image()
            .save(&path)
            .with_context(|| format!("write {}", path.display()))?;
    }

    info!(out = %args.out.display(), "done");
    Ok(())
}
