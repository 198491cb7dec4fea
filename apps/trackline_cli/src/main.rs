use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use trackline_captions::{
    caption_overlay, captions_from_script, parse_srt_file, to_srt, ScriptTiming,
};
use trackline_core::positioning::RowPreference;
use trackline_core::project::preset_by_name;
use trackline_core::{Caption, OverlayId, OverlayKind, Project};
use trackline_render::to_render_config;

#[derive(Parser)]
#[command(name = "trackline", version, about = "Overlay timeline project tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an empty project file.
    New {
        path: PathBuf,
        #[arg(long, default_value = "Untitled")]
        name: String,
        /// One of 1080p, shorts, 720p, 4k, 1080p60.
        #[arg(long, default_value = "1080p")]
        preset: String,
    },
    /// Parse an SRT file and add it as a caption overlay.
    ImportSrt {
        project: PathBuf,
        srt: PathBuf,
        #[command(flatten)]
        place: Placement,
    },
    /// Generate captions from a plain-text script and add them as an overlay.
    Script {
        project: PathBuf,
        script: PathBuf,
        #[arg(long, default_value_t = 160)]
        wpm: u32,
        #[arg(long, default_value_t = 500)]
        gap_ms: u64,
        #[command(flatten)]
        place: Placement,
    },
    /// Write the captions of a caption overlay as SRT.
    ExportSrt {
        project: PathBuf,
        id: OverlayId,
        /// Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the render configuration of a project as JSON.
    RenderConfig {
        project: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate an SRT file and print a diagnostic summary.
    Report {
        srt: PathBuf,
        /// Emit the full report as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct Placement {
    /// Playhead position to insert at.
    #[arg(long, default_value_t = 0)]
    at_frame: u32,
    /// Insert on the top row, pushing other rows down.
    #[arg(long)]
    top: bool,
}

impl Placement {
    fn preference(&self) -> RowPreference {
        if self.top {
            RowPreference::Top
        } else {
            RowPreference::FirstFree
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::New { path, name, preset } => {
            let settings = preset_by_name(&preset)
                .with_context(|| format!("unknown preset '{preset}'"))?;
            Project::new(name, settings)
                .save_to_file(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), preset = %preset, "created project");
        }
        Command::ImportSrt { project, srt, place } => {
            let report = parse_srt_file(&srt)
                .with_context(|| format!("failed to read {}", srt.display()))?;
            if report.has_issues() {
                eprintln!("{}", report.render_summary());
            }
            if !report.success {
                bail!("{} has no usable subtitles", srt.display());
            }
            add_captions(&project, report.captions().to_vec(), &place)?;
        }
        Command::Script {
            project,
            script,
            wpm,
            gap_ms,
            place,
        } => {
            let text = std::fs::read_to_string(&script)
                .with_context(|| format!("failed to read {}", script.display()))?;
            let timing = ScriptTiming {
                words_per_minute: wpm,
                sentence_gap_ms: gap_ms,
            };
            let captions = captions_from_script(&text, &timing)?;
            add_captions(&project, captions, &place)?;
        }
        Command::ExportSrt {
            project,
            id,
            output,
        } => {
            let project = load_project(&project)?;
            let overlay = project
                .overlays
                .iter()
                .find(|o| o.id == id)
                .with_context(|| format!("no overlay with id {id}"))?;
            let OverlayKind::Caption(captions) = &overlay.kind else {
                bail!("overlay {id} is a {} overlay, not captions", overlay.kind);
            };
            write_output(output.as_deref(), &to_srt(&captions.captions))?;
        }
        Command::RenderConfig { project, output } => {
            let project = load_project(&project)?;
            let config = to_render_config(&project.overlays, &project.settings);
            write_output(output.as_deref(), &config.to_json_pretty()?)?;
        }
        Command::Report { srt, json } => {
            let report = parse_srt_file(&srt)
                .with_context(|| format!("failed to read {}", srt.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.render_summary());
            }
            if !report.success {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

fn load_project(path: &Path) -> Result<Project> {
    Project::load_from_file(path).with_context(|| format!("failed to load {}", path.display()))
}

fn add_captions(path: &Path, captions: Vec<Caption>, place: &Placement) -> Result<()> {
    let mut project = load_project(path)?;
    let count = captions.len();
    let overlay = caption_overlay(captions, &project.settings);

    let mut store = project.to_store();
    store.set_current_frame(place.at_frame);
    let id = store.add_at_playhead(overlay, Some(place.preference()));
    project.sync_from_store(&store);

    project
        .save_to_file(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    if let Some(overlay) = store.get(id) {
        tracing::info!(
            id,
            row = overlay.row,
            from = overlay.from,
            frames = overlay.duration_in_frames,
            captions = count,
            "added caption overlay"
        );
    }
    Ok(())
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            print!("{contents}");
            Ok(())
        }
    }
}
