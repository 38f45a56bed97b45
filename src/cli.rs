//! Headless command-line front end.
//!
//! Every subcommand reads a project document, runs one operation of the
//! designer crate and writes the result to a file (or to stdout for `info`).

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use floorkit_core::{format_length, Units};
use floorkit_designer::export::{
    export_glb, export_gltf, export_stl, export_svg, preview_html, SolidOptions, SvgOptions,
};
use floorkit_designer::{load_project, project_to_json, FloorId, Project};
use floorkit_settings::EditorConfig;
use tracing::info;

/// Command-line arguments for floorkit.
#[derive(Debug, Clone, Parser)]
#[command(name = "floorkit")]
#[command(about = "Inspect and export parametric floorplan projects")]
#[command(version)]
pub struct Cli {
    /// Editor config file (TOML or JSON); defaults to the user config
    #[arg(long, global = true, env = "FLOORKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print floors, walls and openings of a project
    Info {
        /// Project document
        project: PathBuf,
    },
    /// Write an empty single-floor project
    New {
        /// Output document
        #[arg(short, long)]
        output: PathBuf,
        /// Use metric units instead of the configured default
        #[arg(long)]
        metric: bool,
    },
    /// Export one floor as SVG
    ExportSvg {
        project: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Floor id or name; defaults to the active floor
        #[arg(long)]
        floor: Option<String>,
    },
    /// Export all floors as glTF
    ExportGltf {
        project: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Write a binary GLB container
        #[arg(long)]
        binary: bool,
    },
    /// Export all floors as binary STL
    ExportStl {
        project: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Write a standalone HTML 3D preview
    Preview {
        project: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Page title; defaults to the project file name
        #[arg(long)]
        title: Option<String>,
    },
}

/// Loads the config named on the command line, or the user config.
pub fn load_config(cli: &Cli) -> anyhow::Result<EditorConfig> {
    let config = match &cli.config {
        Some(path) => EditorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EditorConfig::load_or_default().context("Failed to load user config")?,
    };
    Ok(config)
}

/// Runs a parsed command. Human-readable output goes to `out`.
pub fn run(cli: &Cli, config: &EditorConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let solid = SolidOptions {
        fallback_floor_height: config.export.fallback_floor_height,
    };

    match &cli.command {
        Command::Info { project } => {
            let project = load_project(project)?;
            print_info(&project, out)?;
        }
        Command::New { output, metric } => {
            let mut project = Project::with_floor_height(config.defaults.floor_height);
            project.set_units(if *metric {
                Units::Metric
            } else {
                config.defaults.units
            });
            write_output(output, project_to_json(&project)?.as_bytes())?;
        }
        Command::ExportSvg {
            project,
            output,
            floor,
        } => {
            let project = load_project(project)?;
            let floor_id = resolve_floor(&project, floor.as_deref())?;
            let options = SvgOptions {
                scale: config.export.svg_scale,
                padding: config.export.svg_padding,
            };
            write_output(output, export_svg(&project, &floor_id, &options)?.as_bytes())?;
        }
        Command::ExportGltf {
            project,
            output,
            binary,
        } => {
            let project = load_project(project)?;
            if *binary || config.export.binary_gltf {
                write_output(output, &export_glb(&project, &solid)?)?;
            } else {
                write_output(output, export_gltf(&project, &solid)?.as_bytes())?;
            }
        }
        Command::ExportStl { project, output } => {
            let project = load_project(project)?;
            write_output(output, &export_stl(&project, &solid)?)?;
        }
        Command::Preview {
            project: path,
            output,
            title,
        } => {
            let project = load_project(path)?;
            let title = title.clone().unwrap_or_else(|| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "Floorplan".to_string())
            });
            write_output(output, preview_html(&project, &solid, &title)?.as_bytes())?;
        }
    }
    Ok(())
}

/// Finds a floor by id, then by name. `None` means the active floor.
fn resolve_floor(project: &Project, query: Option<&str>) -> anyhow::Result<FloorId> {
    let Some(query) = query else {
        return Ok(project.active_floor_id().clone());
    };
    project
        .floors()
        .iter()
        .find(|f| f.id.as_str() == query)
        .or_else(|| project.floors().iter().find(|f| f.name == query))
        .map(|f| f.id.clone())
        .ok_or_else(|| anyhow!("No floor with id or name '{}'", query))
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn print_info(project: &Project, out: &mut impl Write) -> anyhow::Result<()> {
    let units = project.units();
    writeln!(
        out,
        "{} floors, {} walls, {} openings ({})",
        project.floors().len(),
        project.walls().len(),
        project.openings().len(),
        units
    )?;
    for floor in project.floors() {
        let marker = if &floor.id == project.active_floor_id() {
            "*"
        } else {
            " "
        };
        writeln!(
            out,
            "{} {} [{}] elevation {}, height {}, {} walls, {} of wall",
            marker,
            floor.name,
            floor.id,
            format_length(floor.elevation, units),
            format_length(floor.height, units),
            project.walls_on_floor(&floor.id).count(),
            format_length(project.total_wall_length(&floor.id), units),
        )?;
        for (wall, opening) in project.openings_on_floor(&floor.id) {
            writeln!(
                out,
                "    {} {} on {} at {}, {} wide",
                opening.kind,
                opening.id,
                wall.id,
                format_length(opening.offset, units),
                format_length(opening.width, units),
            )?;
        }
    }
    Ok(())
}
