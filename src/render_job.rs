use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use crate::composition::CompositionId;
use crate::config::{Animation, MediaType, RenderConfig, TextPosition, TextStyle};
use crate::error::CodedError;

pub const DEFAULT_LAUNCHER: &str = "npx";
/// Directory inside the render project that compositions load assets from.
pub const STAGING_DIR_NAME: &str = "public";

/// The prop subset compositions actually read. Serialized key names and
/// order are part of the contract with the render project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderProps {
    pub media_path: String,
    pub media_type: MediaType,
    pub title: String,
    pub subtitle: String,
    pub text_position: TextPosition,
    pub text_style: TextStyle,
    pub animation: Animation,
}

impl RenderProps {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            media_path: config.media_path.clone(),
            media_type: config.media_type,
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            text_position: config.text_position,
            text_style: config.text_style,
            animation: config.animation,
        }
    }

    /// Compact JSON, passed to the engine as a single argument. No quoting
    /// is applied; the command spawns without a shell.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("failed to serialize render props")
    }
}

/// Inclusive frame span, rendered as `start-end` on the engine command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameRange {
    pub start: u32,
    pub end: u32,
}

impl FrameRange {
    pub fn for_frame_count(frames: u32) -> Self {
        Self {
            start: 0,
            end: frames.saturating_sub(1),
        }
    }
}

impl fmt::Display for FrameRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Everything one render needs, resolved ahead of any side effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPlan {
    pub composition: CompositionId,
    pub output: PathBuf,
    pub props: RenderProps,
    pub frame_range: FrameRange,
    pub staging_dir: PathBuf,
    pub media_source: PathBuf,
    pub duration_secs: u32,
    pub duration_in_frames: u32,
}

impl RenderPlan {
    /// Relative paths resolve against `launch_cwd`; the engine itself runs
    /// with the project directory as its working directory.
    pub fn new(
        config: &RenderConfig,
        media_source: &Path,
        output: &Path,
        project_dir: &Path,
        launch_cwd: &Path,
    ) -> Self {
        let frames = config.duration_in_frames();
        Self {
            composition: CompositionId::for_format(config.format),
            output: launch_cwd.join(output),
            props: RenderProps::from_config(config),
            frame_range: FrameRange::for_frame_count(frames),
            staging_dir: launch_cwd.join(project_dir).join(STAGING_DIR_NAME),
            media_source: launch_cwd.join(media_source),
            duration_secs: config.duration_secs,
            duration_in_frames: frames,
        }
    }

    pub fn staged_media_path(&self) -> PathBuf {
        self.staging_dir.join(&self.props.media_path)
    }
}

/// Copies the source media into the staging directory, creating the
/// directory if needed. An existing file with the same name is overwritten.
pub fn stage_media(plan: &RenderPlan) -> Result<PathBuf> {
    fs::create_dir_all(&plan.staging_dir).with_context(|| {
        format!(
            "failed to create staging directory {}",
            plan.staging_dir.display()
        )
    })?;
    let staged = plan.staged_media_path();
    fs::copy(&plan.media_source, &staged).with_context(|| {
        format!(
            "failed to copy '{}' to '{}'",
            plan.media_source.display(),
            staged.display()
        )
    })?;
    Ok(staged)
}

/// Narrow seam to the external render engine, so tests can substitute a
/// recording fake for the real child process.
pub trait RenderEngine {
    fn execute(
        &self,
        composition: CompositionId,
        output: &Path,
        props_json: &str,
        frame_range: FrameRange,
    ) -> Result<ExitStatus>;
}

/// Invokes the render engine through its package launcher, one synchronous
/// child process per render, with stdio inherited so engine progress shows
/// up directly in the terminal.
pub struct RemotionCli {
    launcher: String,
    project_dir: PathBuf,
}

impl RemotionCli {
    pub fn new(launcher: impl Into<String>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            launcher: launcher.into(),
            project_dir: project_dir.into(),
        }
    }
}

impl RenderEngine for RemotionCli {
    fn execute(
        &self,
        composition: CompositionId,
        output: &Path,
        props_json: &str,
        frame_range: FrameRange,
    ) -> Result<ExitStatus> {
        let args = render_args(composition, output, props_json, frame_range);
        let mut command = Command::new(&self.launcher);
        command
            .args(args.iter().map(String::as_str))
            .current_dir(&self.project_dir);
        command.status().map_err(|error| {
            if error.kind() == ErrorKind::NotFound {
                anyhow!(
                    "render launcher '{}' not found on PATH. Install Node.js or point --renderer at another launcher.",
                    self.launcher
                )
            } else {
                anyhow!(
                    "failed to spawn render command '{} {}': {error}",
                    self.launcher,
                    args.join(" ")
                )
            }
        })
    }
}

pub fn render_args(
    composition: CompositionId,
    output: &Path,
    props_json: &str,
    frame_range: FrameRange,
) -> Vec<String> {
    vec![
        "remotion".to_owned(),
        "render".to_owned(),
        composition.as_str().to_owned(),
        output.to_string_lossy().into_owned(),
        "--props".to_owned(),
        props_json.to_owned(),
        format!("--frames={frame_range}"),
    ]
}

/// Runs the plan against an engine. The output directory is created first;
/// a non-zero engine exit becomes a `RENDER_FAILED` error.
pub fn dispatch(plan: &RenderPlan, engine: &dyn RenderEngine) -> Result<()> {
    if let Some(parent) = plan.output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }
    let props_json = plan.props.to_json()?;
    let status = engine.execute(plan.composition, &plan.output, &props_json, plan.frame_range)?;
    if !status.success() {
        let code = status.code().unwrap_or(1);
        return Err(anyhow!(CodedError::render(
            "RENDER_FAILED",
            format!("render engine exited with status {code}"),
        )));
    }
    Ok(())
}
