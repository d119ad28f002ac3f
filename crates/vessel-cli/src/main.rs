//! vessel CLI - profile import and inspection
//!
//! Imports vector drawings, raw path data or editor drawings and prints the
//! normalized (radius, height) profile.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vessel_editor::{to_path_data, Anchor};
use vessel_kernel_math::Point2;
use vessel_path::PipelineConfig;
use vessel_profile::{
    import_file, import_path_data, profile_from_editor_path, ImportReport, Profile,
    VesselDimensions,
};

#[derive(Parser)]
#[command(name = "vessel")]
#[command(about = "Revolved vessel profile tools", long_about = None)]
struct Cli {
    /// Log pipeline stages (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import the best profile candidate from an SVG document
    Import {
        /// Input .svg file
        file: PathBuf,
        /// Use the reduced sampling preset for heavy drawings
        #[arg(long)]
        safe: bool,
        /// Print profile and report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Import a single path data string
    Path {
        /// Path data, e.g. "M0,0 L50,0 L50,100"
        d: String,
        /// Use the preset for hand-drawn editor output
        #[arg(long)]
        drawn: bool,
        /// Print profile and report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply an editor drawing saved as a JSON anchor list
    Draw {
        /// JSON file with [{"x":..,"y":..,"c1":[..],"c2":[..]}, ...]
        file: PathBuf,
        /// Print the profile as JSON
        #[arg(long)]
        json: bool,
    },
    /// Solve vessel dimensions from the default 1 L cylinder
    Dims {
        /// Target volume in mL
        #[arg(long, conflicts_with_all = ["height", "diameter"])]
        volume: Option<f64>,
        /// Target height in mm, keeping the volume
        #[arg(long, conflicts_with = "diameter")]
        height: Option<f64>,
        /// Target diameter in mm, keeping the volume
        #[arg(long)]
        diameter: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Import { file, safe, json } => {
            let config = if safe {
                PipelineConfig::safe()
            } else {
                PipelineConfig::default()
            };
            let imported = import_file(&file, &config)
                .with_context(|| format!("Failed to import {}", file.display()))?;
            print_import(&imported.profile, &imported.report, json)?;
        }
        Commands::Path { d, drawn, json } => {
            let config = if drawn {
                PipelineConfig::drawn()
            } else {
                PipelineConfig::default()
            };
            let imported = import_path_data(&d, &config)?;
            print_import(&imported.profile, &imported.report, json)?;
        }
        Commands::Draw { file, json } => {
            draw_file(&file, json)?;
        }
        Commands::Dims {
            volume,
            height,
            diameter,
        } => {
            let base = VesselDimensions::default();
            let dims = match (volume, height, diameter) {
                (Some(v), _, _) => base.with_volume(v)?,
                (_, Some(h), _) => base.with_height(h)?,
                (_, _, Some(d)) => base.with_diameter(d)?,
                _ => base,
            };
            println!("{}", serde_json::to_string_pretty(&dims)?);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn draw_file(file: &Path, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let anchors: Vec<Anchor> = serde_json::from_str(&text)?;
    if anchors.len() < vessel_editor::MIN_APPLY_ANCHORS {
        anyhow::bail!("Drawing needs at least two anchors, found {}", anchors.len());
    }

    let d = to_path_data(&anchors);
    tracing::debug!(path = %d, "serialized drawing");
    let profile = profile_from_editor_path(&d)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!("Path: {}", d);
        print_points(profile.points());
    }
    Ok(())
}

fn print_import(profile: &Profile, report: &ImportReport, json: bool) -> Result<()> {
    if json {
        let out = serde_json::json!({
            "profile": profile,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "Source: {} #{} ({} raw, {} cleaned, {} final points)",
        report.source_kind,
        report.source_index,
        report.raw_points,
        report.cleaned_points,
        report.final_points
    );
    println!(
        "Extent: {:.1} wide x {:.1} tall",
        report.x_range, report.y_range
    );
    if report.truncated {
        println!("Warning: path was truncated by the sampling budget");
    }
    if report.relaxed {
        println!("Note: relaxed dedupe was needed to keep enough points");
    }
    if report.padded {
        println!("Note: profile was padded to the minimum point count");
    }
    println!(
        "Max radius {:.2}, height {:.2}, volume {:.1}",
        profile.max_radius(),
        profile.height(),
        profile.enclosed_volume()
    );
    print_points(profile.points());
    Ok(())
}

fn print_points(points: &[Point2]) {
    for (i, p) in points.iter().enumerate() {
        println!("{:>4}  {:>10.3} {:>10.3}", i, p.x, p.y);
    }
}
