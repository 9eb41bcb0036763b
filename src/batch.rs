//! File-system wrapper around [`transcode`] for the command line tool.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::info;

use crate::filename::compressed_file_name;
use crate::media_type::media_type_for_path;
use crate::stats::SizeStats;
use crate::transcode::{transcode, SourceImage, TranscodeOptions};

#[derive(Debug, Clone)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub stats: SizeStats,
    pub width: u32,
    pub height: u32,
}

fn input_file_name(input: &Path) -> String {
    input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Where [`compress_path`] writes the compressed copy of `input`.
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(compressed_file_name(&input_file_name(input)))
}

/// Fails if two inputs would be written to the same output file, e.g.
/// `shot.png` and `shot.bmp`, or `a/x.png` and `b/x.png`.
pub fn check_output_collisions(inputs: &[PathBuf], output_dir: &Path) -> Result<()> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
    for input in inputs {
        let output = output_path(input, output_dir);
        if let Some(previous) = seen.get(&output) {
            bail!(
                "{} and {} would both be written to {}",
                previous.display(),
                input.display(),
                output.display()
            );
        }
        seen.insert(output, input);
    }
    Ok(())
}

/// Compresses `input` and writes `compressed_<name>.jpg` into `output_dir`.
pub fn compress_path(
    input: &Path,
    output_dir: &Path,
    options: &TranscodeOptions,
) -> Result<FileReport> {
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let file_name = input_file_name(input);

    let source = SourceImage::new(&bytes, media_type_for_path(input), &file_name);
    let compressed = transcode(&source, options)
        .with_context(|| format!("Failed to compress {}", input.display()))?;

    let output = output_dir.join(&compressed.file_name);
    std::fs::write(&output, &compressed.bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let stats = SizeStats::new(bytes.len() as u64, compressed.bytes.len() as u64);
    info!("{} -> {}: {}", input.display(), output.display(), stats);

    Ok(FileReport {
        input: input.to_path_buf(),
        output,
        stats,
        width: compressed.width,
        height: compressed.height,
    })
}
