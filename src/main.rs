use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;

use vidgen::config::{resolve_config, Overrides, FPS};
use vidgen::prompt::parse_prompt;
use vidgen::render_job::{
    dispatch, render_args, stage_media, RemotionCli, RenderPlan, DEFAULT_LAUNCHER,
};

const AFTER_HELP: &str = r#"PROMPT KEYWORDS:
  Position:   "top", "center", "bottom" (default)
  Style:      "minimal", "elegant", "bold" (default)
  Animation:  "fade" (default), "slide", "zoom", "static"
  Format:     "landscape" (default), "portrait/story/tiktok", "square/instagram"
  Duration:   "X seconds" (e.g., "5 seconds", "10s")

EXAMPLES:
  # Basic video with title
  vidgen -m photo.jpg -p "title: Welcome to Our Store"

  # Instagram story with zoom effect
  vidgen -m promo.mp4 -p "portrait zoom title: 'Summer Sale' subtitle: 'Up to 50% off'"

  # Clean minimal style
  vidgen -m hero.jpg -p "minimal center 'Company Name' 10 seconds"
"#;

#[derive(Debug, Parser)]
#[command(name = "vidgen")]
#[command(about = "Create videos from prompts and media files")]
#[command(version = version_string())]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Path to the source image or video file
    #[arg(short = 'm', long = "media")]
    media: PathBuf,

    /// Free-text prompt describing the video
    #[arg(short = 'p', long = "prompt")]
    prompt: String,

    /// Where to write the rendered video
    #[arg(short = 'o', long = "output", default_value = "out/output.mp4")]
    output: PathBuf,

    /// Title text (overrides prompt parsing)
    #[arg(short = 't', long = "title")]
    title: Option<String>,

    /// Subtitle text (overrides prompt parsing)
    #[arg(short = 's', long = "subtitle")]
    subtitle: Option<String>,

    /// Render project directory holding the compositions
    #[arg(long = "project", default_value = ".")]
    project: PathBuf,

    /// Launcher used to start the render engine
    #[arg(long = "renderer", default_value = DEFAULT_LAUNCHER)]
    renderer: String,

    /// Resolve and print the render plan without staging or rendering
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// With --dry-run, print the plan as JSON
    #[arg(long = "json", requires = "dry_run")]
    json: bool,

    /// Suppress [vidgen] diagnostics on stderr
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn version_string() -> String {
    match option_env!("VIDGEN_GIT_HASH") {
        Some(hash) => format!("{} ({hash})", env!("CARGO_PKG_VERSION")),
        None => env!("CARGO_PKG_VERSION").to_owned(),
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            // Help and version requests are not failures; every real
            // argument problem exits 1.
            let code = match error.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = error.print();
            return ExitCode::from(code);
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("vidgen: {error:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let launch_cwd = env::current_dir().context("failed to read current directory")?;

    let parsed = parse_prompt(&cli.prompt);
    let overrides = Overrides {
        title: cli.title,
        subtitle: cli.subtitle,
    };
    let config = resolve_config(&cli.media, parsed, overrides)?;
    let plan = RenderPlan::new(&config, &cli.media, &cli.output, &cli.project, &launch_cwd);

    if cli.dry_run {
        return print_plan(&plan, &cli.renderer, cli.json);
    }

    let staged = stage_media(&plan)?;
    if !cli.quiet {
        eprintln!("[vidgen] Copied media to: {}", staged.display());
        eprintln!("[vidgen] Generating video with config:");
        let pretty =
            serde_json::to_string_pretty(&plan.props).context("failed to serialize render props")?;
        for line in pretty.lines() {
            eprintln!("[vidgen]   {line}");
        }
        let (width, height) = plan.composition.dimensions_px();
        eprintln!(
            "[vidgen] Composition: {} ({width}x{height})",
            plan.composition.as_str()
        );
        eprintln!(
            "[vidgen] Duration: {} seconds ({} frames)",
            plan.duration_secs, plan.duration_in_frames
        );
        eprintln!("[vidgen] Output: {}", plan.output.display());
        eprintln!("[vidgen] Running render...");
    }

    let engine = RemotionCli::new(cli.renderer, launch_cwd.join(&cli.project));
    dispatch(&plan, &engine)?;

    println!("Wrote {}", plan.output.display());
    Ok(())
}

fn print_plan(plan: &RenderPlan, launcher: &str, as_json: bool) -> Result<()> {
    if as_json {
        let json =
            serde_json::to_string_pretty(plan).context("failed to serialize render plan")?;
        println!("{json}");
        return Ok(());
    }

    let props_json = plan.props.to_json()?;
    let args = render_args(plan.composition, &plan.output, &props_json, plan.frame_range);
    let (width, height) = plan.composition.dimensions_px();
    println!("Render plan:");
    println!(
        "  composition: {} ({width}x{height})",
        plan.composition.as_str()
    );
    println!(
        "  frames: {} ({} seconds at {FPS} fps)",
        plan.frame_range, plan.duration_secs
    );
    println!("  media_source: {}", plan.media_source.display());
    println!("  staged_media: {}", plan.staged_media_path().display());
    println!("  output: {}", plan.output.display());
    println!("  props: {props_json}");
    println!("[dry-run] {launcher} {}", args.join(" "));
    Ok(())
}
