use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use image_compressor_rust::batch::{check_output_collisions, compress_path, FileReport};
use image_compressor_rust::stats::format_megabytes;
use image_compressor_rust::{ResampleFilter, SizeStats, TranscodeOptions};
use rayon::prelude::*;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Filter {
    Nearest,
    /// Bilinear
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<Filter> for ResampleFilter {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => ResampleFilter::Nearest,
            Filter::Triangle => ResampleFilter::Triangle,
            Filter::CatmullRom => ResampleFilter::CatmullRom,
            Filter::Gaussian => ResampleFilter::Gaussian,
            Filter::Lanczos3 => ResampleFilter::Lanczos3,
        }
    }
}

/// Simple image compressor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for the compressed files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// JPEG quality (0.0-1.0)
    #[arg(long, default_value_t = 0.6)]
    quality: f32,

    /// Max image dimension (longer side)
    #[arg(long, default_value_t = 1280)]
    max_dim: u32,

    /// Resampling filter used when downscaling
    #[arg(long, value_enum, default_value_t = Filter::Lanczos3)]
    filter: Filter,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    check_output_collisions(&args.inputs, &args.output_dir)?;

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create {}", args.output_dir.display()))?;

    let options = TranscodeOptions::default()
        .with_max_dimension(args.max_dim)
        .with_quality(args.quality)
        .with_filter(args.filter.into());

    let start = Instant::now();
    let failures = AtomicUsize::new(0);

    let reports: Vec<FileReport> = args
        .inputs
        .par_iter()
        .filter_map(|input| match compress_path(input, &args.output_dir, &options) {
            Ok(report) => Some(report),
            Err(e) => {
                eprintln!("Failed to compress {}: {:#}", input.display(), e);
                failures.fetch_add(1, Ordering::Relaxed);
                None
            }
        })
        .collect();

    for report in &reports {
        println!(
            "{} -> {} ({}x{}): {}",
            report.input.display(),
            report.output.display(),
            report.width,
            report.height,
            report.stats
        );
    }

    let total: SizeStats = reports.iter().map(|r| r.stats).sum();
    println!("Compressed {} images in {:.2?}.", reports.len(), start.elapsed());
    println!("Original size: {} MB", format_megabytes(total.original_bytes));
    println!("New size:      {} MB", format_megabytes(total.compressed_bytes));

    let failed = failures.load(Ordering::Relaxed);
    if failed > 0 {
        bail!("{} of {} images failed", failed, args.inputs.len());
    }

    Ok(())
}
