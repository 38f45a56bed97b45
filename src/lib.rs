//! # Floorkit
//!
//! A parametric 2D/3D floorplan editor core:
//! - multi-floor projects of walls with hosted doors and windows
//! - an interaction controller driven by plain pointer/keyboard events
//! - snapshot undo/redo
//! - SVG, glTF/GLB and STL export plus a browser preview
//!
//! ## Architecture
//!
//! Floorkit is organized as a workspace:
//!
//! 1. **floorkit-core** - errors, units, editor event bus
//! 2. **floorkit-designer** - model, geometry, history, `EditorState`, exporters
//! 3. **floorkit-settings** - editor configuration and local project storage
//! 4. **floorkit** - this crate: logging setup and the command-line front end

pub mod cli;

pub use floorkit_core as core;
pub use floorkit_designer as designer;
pub use floorkit_settings as settings;

pub use floorkit_core::{DocumentError, EditorEvent, Error, ExportError, ModelError, Result, Units};
pub use floorkit_designer::{EditorState, Project};
pub use floorkit_settings::{EditorConfig, LocalStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging
///
/// Sets up structured logging with:
/// - RUST_LOG environment variable support (default `info`, `debug` when
///   `verbose` is set)
/// - stderr output, so command output on stdout stays clean
/// - JSON lines instead of human-readable text when `json` is set
pub fn init_logging(verbose: bool, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(false);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
