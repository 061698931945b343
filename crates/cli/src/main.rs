//! texturefeat CLI - Texture descriptors for gray map images

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use texturefeat_algorithms::texture::{
    glcm_features, glcm_features_all_directions, lbp_features, GlcmParams, HaralickFeature,
    LbpConfig, LbpParams, LbpVariant,
};
use texturefeat_core::io::{append_record, read_pgm, TableFormat};
use texturefeat_core::raster::{Direction, GrayscaleMatrix};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "texturefeat")]
#[command(author, version, about = "Texture descriptors for gray map images", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where and how to store the feature vector
#[derive(clap::Args)]
struct ExportArgs {
    /// Append the feature vector to this table
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Class label written at the start of the record
    #[arg(long)]
    label: Option<i64>,
    /// Record layout: dense or sparse
    #[arg(short, long, default_value = "dense")]
    format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a gray map
    Info {
        /// Input PGM file
        input: PathBuf,
    },
    /// Haralick descriptors of the gray-level co-occurrence matrix
    Glcm {
        /// Input PGM file
        input: PathBuf,
        /// Co-occurrence distance in pixels
        #[arg(short, long, default_value = "1")]
        distance: usize,
        /// Offset angle in degrees: 0, 45, 90, 135, or "all"
        #[arg(short, long, default_value = "0")]
        angle: String,
        /// Quantize to this many gray levels first
        #[arg(short, long)]
        levels: Option<u32>,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Local binary pattern descriptors
    Lbp {
        /// Input PGM file
        input: PathBuf,
        /// Variant: basic, rotation-min, riu2, completed, coalbp, riv
        #[arg(long, default_value = "basic")]
        variant: String,
        /// Neighbor radius in pixels
        #[arg(short, long, default_value = "1")]
        radius: usize,
        /// Number of neighbors on the circle
        #[arg(short, long, default_value = "8")]
        points: usize,
        /// Sampling phase in radians (riv only)
        #[arg(long, default_value = "0.0")]
        phase: f64,
        /// Co-occurrence distance for the code map
        #[arg(short, long, default_value = "1")]
        distance: usize,
        /// Co-occurrence angle for the code map: 0, 45, 90, 135
        #[arg(short, long, default_value = "0")]
        angle: u32,
        /// Quantize to this many gray levels first
        #[arg(short, long)]
        levels: Option<u32>,
        #[command(flatten)]
        export: ExportArgs,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_image(path: &Path, levels: Option<u32>) -> Result<GrayscaleMatrix> {
    let pb = spinner("Reading gray map...");
    let image = read_pgm(path)
        .with_context(|| format!("Failed to read gray map {}", path.display()))?;
    pb.finish_and_clear();
    info!(
        "Input: {} x {}, {} gray levels",
        image.width(),
        image.height(),
        image.max_gray()
    );

    match levels {
        Some(levels) => {
            let quantized = image.quantize(levels).context("Failed to quantize")?;
            info!("Quantized to {} levels", levels);
            Ok(quantized)
        }
        None => Ok(image),
    }
}

fn parse_direction(degrees: u32) -> Result<Direction> {
    Direction::try_from(degrees).with_context(|| format!("Invalid angle: {}", degrees))
}

fn print_features(names: &[String], values: &[f64]) {
    for (name, value) in names.iter().zip(values) {
        println!("  {:<28} {:.6}", name, value);
    }
}

/// `prefix.feature` names for each 13-value block
fn block_names(prefixes: &[String]) -> Vec<String> {
    prefixes
        .iter()
        .flat_map(|prefix| {
            HaralickFeature::ALL
                .into_iter()
                .map(move |f| format!("{}.{}", prefix, f.name()))
        })
        .collect()
}

fn export(args: &ExportArgs, values: &[f64]) -> Result<()> {
    let Some(path) = &args.output else {
        return Ok(());
    };
    let format: TableFormat = args.format.parse()?;
    append_record(path, args.label, values, format)
        .with_context(|| format!("Failed to append to {}", path.display()))?;
    println!("Record appended to: {}", path.display());
    Ok(())
}

fn done(name: &str, count: usize, elapsed: std::time::Duration) {
    println!("{}: {} features", name, count);
    println!("  Processing time: {:.2?}", elapsed);
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let image = read_image(&input, None)?;
            let stats = image.pixels().statistics();

            println!("File: {}", input.display());
            println!(
                "Dimensions: {} x {} ({} pixels)",
                image.width(),
                image.height(),
                image.pixels().len()
            );
            println!("Gray levels: {}", image.max_gray());
            println!("\nStatistics:");
            if let Some(min) = stats.min {
                println!("  Min: {}", min);
            }
            if let Some(max) = stats.max {
                println!("  Max: {}", max);
            }
            println!("  Mean: {:.4}", image.mean_intensity());
        }

        // ── GLCM ─────────────────────────────────────────────────────
        Commands::Glcm {
            input,
            distance,
            angle,
            levels,
            export: out,
        } => {
            let image = read_image(&input, levels)?;
            let pb = spinner("Computing co-occurrence features...");
            let start = Instant::now();

            let (names, values) = if angle.eq_ignore_ascii_case("all") {
                let values = glcm_features_all_directions(&image, distance)
                    .context("Failed to compute GLCM features")?;
                let prefixes: Vec<String> =
                    Direction::ALL.iter().map(|d| d.degrees().to_string()).collect();
                (block_names(&prefixes), values)
            } else {
                let degrees: u32 = angle
                    .parse()
                    .with_context(|| format!("Invalid angle: {}", angle))?;
                let direction = parse_direction(degrees)?;
                let features = glcm_features(&image, GlcmParams { distance, direction })
                    .context("Failed to compute GLCM features")?;
                (block_names(&[degrees.to_string()]), features.into_vec())
            };

            let elapsed = start.elapsed();
            pb.finish_and_clear();
            print_features(&names, &values);
            done("GLCM", values.len(), elapsed);
            export(&out, &values)?;
        }

        // ── LBP ──────────────────────────────────────────────────────
        Commands::Lbp {
            input,
            variant,
            radius,
            points,
            phase,
            distance,
            angle,
            levels,
            export: out,
        } => {
            let variant = match variant.parse::<LbpVariant>()? {
                LbpVariant::Riv { .. } => LbpVariant::Riv { phase },
                other => other,
            };
            let config = LbpConfig {
                params: LbpParams { radius, points },
                variant,
                glcm: GlcmParams {
                    distance,
                    direction: parse_direction(angle)?,
                },
            };

            let image = read_image(&input, levels)?;
            let pb = spinner("Computing LBP features...");
            let start = Instant::now();
            let values = lbp_features(&image, config).context("Failed to compute LBP features")?;
            let elapsed = start.elapsed();
            pb.finish_and_clear();

            let prefixes: Vec<String> = match variant {
                LbpVariant::Completed => ["sign", "magnitude", "center"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                _ => vec!["lbp".to_string()],
            };
            print_features(&block_names(&prefixes), &values);
            done("LBP", values.len(), elapsed);
            export(&out, &values)?;
        }
    }

    Ok(())
}
