//! pagemark CLI - layout annotation extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pagemark::{annotate_dir, AnnotateOptions, Annotator, RawDocument};

#[derive(Parser)]
#[command(name = "pagemark")]
#[command(version)]
#[command(about = "Extract layout annotation records from page geometry dumps", long_about = None)]
struct Cli {
    /// Input layout dump (JSON file) or directory of dumps
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory for annotation records
    #[arg(short, long, value_name = "DIR", default_value = "json")]
    output: PathBuf,

    /// Target raster DPI of the training images
    #[arg(long, default_value = "300")]
    dpi: f32,

    /// Directory component used in record image paths
    #[arg(long, default_value = "image")]
    image_dir: String,

    /// Emit compact JSON records
    #[arg(long)]
    compact: bool,

    /// Process pages sequentially instead of in parallel
    #[arg(long)]
    sequential: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let mut options = AnnotateOptions::new()
        .with_dpi(cli.dpi)
        .with_image_dir(cli.image_dir.clone());
    if cli.compact {
        options = options.compact();
    }
    if cli.sequential {
        options = options.sequential();
    }

    let result = if cli.input.is_dir() {
        cmd_batch(&cli.input, &cli.output, options)
    } else {
        cmd_single(&cli.input, &cli.output, options)
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Annotate every layout dump in a directory.
fn cmd_batch(
    input: &Path,
    output: &Path,
    options: AnnotateOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = annotate_dir(input, output, options)?;
    println!(
        "{} {} documents, {} records written, {} pages skipped",
        "Done:".green().bold(),
        summary.documents,
        summary.pages,
        summary.skipped
    );
    Ok(())
}

/// Annotate one layout dump with per-page progress.
fn cmd_single(
    input: &Path,
    output: &Path,
    options: AnnotateOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output)?;
    let pretty = options.pretty;
    let annotator = Annotator::new(options)?;

    let document: RawDocument = serde_json::from_str(&fs::read_to_string(input)?)?;
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string());

    let pb = ProgressBar::new(document.pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut written = 0usize;
    let mut skipped = 0usize;
    for (i, result) in annotator.annotate_document(&document, &stem).into_iter().enumerate() {
        let page_number = i + 1;
        pb.set_message(format!("page {}", page_number));
        match result {
            Ok(record) => {
                let path = output.join(format!("{}_page_{}.json", stem, page_number));
                let json = if pretty {
                    serde_json::to_string_pretty(&record)?
                } else {
                    serde_json::to_string(&record)?
                };
                fs::write(&path, json)?;
                written += 1;
            }
            Err(e) => {
                log::warn!("page {}: {}", page_number, e);
                skipped += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "{} {} records written to {}, {} pages skipped",
        "Done:".green().bold(),
        written,
        output.display(),
        skipped
    );
    Ok(())
}
