use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use shutterbox::{Canvas, IllustrationKind, IllustrationRenderer, Script, Surface};

#[derive(Parser, Debug)]
#[command(name = "shutterbox", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence covering a time span.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Illustration to draw (`orbit` or `motion-blur`); unrecognized values
    /// fall back to the default view.
    #[arg(long, default_value = "orbit")]
    asset: String,

    /// Time point in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Replace the built-in slideshow script with one loaded from JSON.
    #[arg(long)]
    script: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Illustration to draw (`orbit` or `motion-blur`); unrecognized values
    /// fall back to the default view.
    #[arg(long, default_value = "motion-blur")]
    asset: String,

    /// Length of the rendered sequence in seconds.
    #[arg(long, default_value_t = 25.5)]
    duration: f64,

    /// Frames per second of the sequence.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Output directory for the PNG sequence.
    #[arg(long)]
    out_dir: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Replace the built-in slideshow script with one loaded from JSON.
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn resolve_asset(selector: &str) -> IllustrationKind {
    IllustrationKind::from_selector(selector).unwrap_or_else(|| {
        eprintln!("unrecognized asset '{selector}', falling back to the default view");
        IllustrationKind::default()
    })
}

fn load_script(path: Option<&Path>) -> anyhow::Result<Script> {
    let Some(path) = path else {
        return Ok(Script::motion_blur_explainer());
    };
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let r = BufReader::new(f);
    let script: Script =
        serde_json::from_reader(r).with_context(|| format!("parse script '{}'", path.display()))?;
    Ok(script)
}

fn write_png(surface: &Surface, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let canvas = surface.canvas();
    image::save_buffer_with_format(
        out,
        &surface.to_straight_rgba8(),
        canvas.width,
        canvas.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let kind = resolve_asset(&args.asset);
    let script = load_script(args.script.as_deref())?;
    let renderer = IllustrationRenderer::new(Canvas::new(args.width, args.height))?;

    let at = Duration::try_from_secs_f64(args.time.max(0.0))
        .with_context(|| format!("invalid time {}", args.time))?;
    let frame = renderer.render_illustration(kind, &script, at)?;

    write_png(&frame, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("fps must be > 0");
    }
    if !args.duration.is_finite() || args.duration <= 0.0 {
        anyhow::bail!("duration must be finite and > 0");
    }

    let kind = resolve_asset(&args.asset);
    let script = load_script(args.script.as_deref())?;
    let renderer = IllustrationRenderer::new(Canvas::new(args.width, args.height))?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let frame_count = (args.duration * f64::from(args.fps)).ceil() as u64;
    let mut last_caption: Option<String> = None;

    for i in 0..frame_count {
        let at = Duration::from_secs_f64(i as f64 / f64::from(args.fps));
        let frame = renderer.render_illustration(kind, &script, at)?;

        if kind == IllustrationKind::MotionBlur {
            let (index, _) = script.locate(at);
            let caption = script.steps()[index].content.caption().map(str::to_owned);
            if caption != last_caption {
                if let Some(text) = &caption {
                    eprintln!("[{:7.3}s] {text}", at.as_secs_f64());
                }
                last_caption = caption;
            }
        }

        let out = args.out_dir.join(format!("frame_{i:05}.png"));
        write_png(&frame, &out)?;
    }

    eprintln!(
        "wrote {frame_count} frames to {}",
        args.out_dir.display()
    );
    Ok(())
}
