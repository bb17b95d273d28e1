//! surfview CLI - Camera and color computation for brain-surface rendering.
//!
//! Resolves anatomical views to camera settings, computes colorbar ticks and
//! renders JSON scene requests to JSON or CSV scene files.
#![allow(clippy::uninlined_format_args)]

use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};

use serde_json::json;
use std::path::PathBuf;
use std::time::Instant;
use surfview_algorithms::camera::{resolve_angles, resolve_pose};
use surfview_algorithms::{compute_ticks, format_tick, SceneSink};
use surfview_core::{Hemisphere, ViewSpec};
use surfview_io::{SceneWriter, SurfaceRequest};
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    SurfviewIo(#[from] surfview_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] surfview_core::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rendering engine selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum EngineArg {
    /// Rotating camera (elevation, azimuth)
    Matplotlib,
    /// Ray camera (eye, up, center)
    Plotly,
}

/// Camera and color computation for brain-surface rendering.
#[derive(Parser)]
#[command(name = "surfview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a hemisphere and view to camera settings
    View {
        /// Hemisphere (left or right)
        #[arg(long, default_value = "left")]
        hemi: String,

        /// View name, or ELEV,AZIM in degrees
        #[arg(long, default_value = "lateral", allow_hyphen_values = true)]
        view: String,

        /// Camera convention
        #[arg(short, long, value_enum, default_value = "matplotlib")]
        engine: EngineArg,
    },

    /// Compute colorbar ticks and labels
    Ticks {
        /// Lower bound
        #[arg(long, allow_hyphen_values = true)]
        vmin: f64,

        /// Upper bound
        #[arg(long, allow_hyphen_values = true)]
        vmax: f64,

        /// printf-style tick format
        #[arg(short, long, default_value = "%.2g")]
        format: String,

        /// Display threshold
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Render a JSON scene request
    Render {
        /// Input request file
        input: PathBuf,

        /// Output file (.json or .csv)
        #[arg(short, long)]
        output: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn view_json(hemi: &str, view: &str, engine: EngineArg) -> Result<serde_json::Value> {
    let hemi = hemi.parse::<Hemisphere>()?;
    let view = view.parse::<ViewSpec>()?;
    let value = match engine {
        EngineArg::Matplotlib => serde_json::to_value(resolve_angles(hemi, view))?,
        EngineArg::Plotly => serde_json::to_value(resolve_pose(hemi, view))?,
    };
    Ok(value)
}

fn ticks_json(vmin: f64, vmax: f64, format: &str, threshold: Option<f64>) -> serde_json::Value {
    let ticks = compute_ticks(vmin, vmax, format, threshold);
    let labels: Vec<String> = ticks.iter().map(|&t| format_tick(t, format)).collect();
    json!({ "ticks": ticks, "labels": labels })
}

/// Log filter used when `RUST_LOG` is unset.
fn default_log_filter(command: &Commands) -> &'static str {
    match command {
        Commands::Render { verbose: true, .. } => "info",
        _ => "warn",
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(&cli.command)),
    )
    .init();

    match cli.command {
        Commands::View { hemi, view, engine } => {
            let value = view_json(&hemi, &view, engine)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }

        Commands::Ticks {
            vmin,
            vmax,
            format,
            threshold,
        } => {
            let value = ticks_json(vmin, vmax, &format, threshold);
            println!("{}", serde_json::to_string_pretty(&value)?);
        }

        Commands::Render {
            input,
            output,
            verbose: _,
        } => {
            let start = Instant::now();
            info!("Reading: {}", input.display());

            // The scene is fully computed before the output file is created.
            let request = SurfaceRequest::from_path(&input)?;
            let scene = request.render()?;

            let mut writer = SceneWriter::create(&output)?;
            writer.write_scene(&scene)?;

            info!("Hemisphere: {}", scene.hemisphere);
            info!("Engine: {}", scene.engine);
            match scene.range {
                Some((vmin, vmax)) => info!("Color range: [{}, {}]", vmin, vmax),
                None => warn!("No finite data value, only the background was rendered"),
            }

            println!(
                "Rendered {} faces to {} in {:.2}s",
                scene.face_colors.len(),
                output.display(),
                start.elapsed().as_secs_f64()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_view_command() {
        let cli = Cli::try_parse_from([
            "surfview", "view", "--hemi", "right", "--view", "-30,45", "-e", "plotly",
        ])
        .unwrap();
        match cli.command {
            Commands::View { hemi, view, engine } => {
                assert_eq!(hemi, "right");
                assert_eq!(view, "-30,45");
                assert!(matches!(engine, EngineArg::Plotly));
            }
            _ => panic!("expected view command"),
        }
    }

    #[test]
    fn test_parse_ticks_negative_bounds() {
        let cli =
            Cli::try_parse_from(["surfview", "ticks", "--vmin", "-4", "--vmax", "4"]).unwrap();
        assert!(matches!(cli.command, Commands::Ticks { vmin, .. } if vmin < 0.0));
    }

    #[test]
    fn test_verbose_render_raises_log_level() {
        let cli = Cli::try_parse_from(["surfview", "render", "in.json", "-o", "out.csv", "-v"])
            .unwrap();
        assert_eq!(default_log_filter(&cli.command), "info");

        let cli = Cli::try_parse_from(["surfview", "render", "in.json", "-o", "out.csv"]).unwrap();
        assert_eq!(default_log_filter(&cli.command), "warn");

        let cli = Cli::try_parse_from(["surfview", "ticks", "--vmin", "0", "--vmax", "1"]).unwrap();
        assert_eq!(default_log_filter(&cli.command), "warn");
    }

    #[test]
    fn test_view_json() {
        let value = view_json("left", "lateral", EngineArg::Matplotlib).unwrap();
        assert_eq!(value, json!({ "elevation": 0.0, "azimuth": 180.0 }));

        let value = view_json("right", "lateral", EngineArg::Plotly).unwrap();
        assert_eq!(value["eye"]["x"], 1.5);

        assert!(matches!(
            view_json("both", "nope", EngineArg::Plotly),
            Err(CliError::Core(surfview_core::Error::InvalidHemisphere { .. }))
        ));
    }

    #[test]
    fn test_ticks_json() {
        let value = ticks_json(0.0, 3.0, "%i", None);
        assert_eq!(value["ticks"], json!([0.0, 1.0, 2.0, 3.0]));
        assert_eq!(value["labels"], json!(["0", "1", "2", "3"]));
    }
}
