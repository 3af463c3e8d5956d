//! Main entry point for the thumbzip CLI application.
//!
//! Loads an archive from a local path or HTTP URL, pulls out its embedded
//! thumbnail and either saves it or reports its dimensions.

use anyhow::{Context, Result};
use clap::Parser;
use image::ImageFormat;
use std::process::ExitCode;
use tokio::io::AsyncWriteExt;

use thumbzip::{
    ArchiveSource, Cli, ExtractConfig, HttpSource, LocalFileSource, extract_thumbnail,
    zip::extract_named_entry_with_limits,
};

/// Exit status when the archive is fine but carries no thumbnail.
const EXIT_NO_THUMBNAIL: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let config = cli.to_config();
    let archive = load_archive(&cli, &config).await?;

    let found = if cli.raw {
        write_raw(&archive, &config, &cli).await?
    } else {
        write_thumbnail(&archive, &config, &cli)?
    };

    if found {
        Ok(ExitCode::SUCCESS)
    } else {
        if !cli.is_very_quiet() {
            eprintln!("{}: no thumbnail available", cli.file);
        }
        Ok(ExitCode::from(EXIT_NO_THUMBNAIL))
    }
}

/// Read the whole archive from wherever `cli.file` points.
async fn load_archive(cli: &Cli, config: &ExtractConfig) -> Result<Vec<u8>> {
    let max_size = config.limits.max_archive_size;

    if cli.is_http_url() {
        let source = HttpSource::new(cli.file.clone(), max_size)?;
        let archive = source
            .load()
            .await
            .with_context(|| format!("cannot load {}", source.describe()))?;

        // Display network transfer statistics for HTTP sources
        if !cli.is_quiet() {
            eprintln!(
                "Total bytes transferred: {}",
                format_size(source.transferred_bytes())
            );
        }
        Ok(archive)
    } else {
        let source = LocalFileSource::new(&cli.file, max_size);
        source
            .load()
            .await
            .with_context(|| format!("cannot load {}", source.describe()))
    }
}

/// Decode the thumbnail and save it, or print its size.
///
/// Returns `Ok(false)` when none of the candidate entries exist.
fn write_thumbnail(archive: &[u8], config: &ExtractConfig, cli: &Cli) -> Result<bool> {
    let image = match extract_thumbnail(archive, config) {
        Ok(image) => image,
        Err(e) if e.is_missing_entry() => return Ok(false),
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("cannot extract thumbnail from {}", cli.file)));
        }
    };

    match &cli.output {
        Some(path) => {
            image
                .save_with_format(path, ImageFormat::Png)
                .with_context(|| format!("cannot write {}", path.display()))?;
            if !cli.is_quiet() {
                println!(
                    "  saved: {} ({}x{})",
                    path.display(),
                    image.width(),
                    image.height()
                );
            }
        }
        None => println!("{}: {}x{}", cli.file, image.width(), image.height()),
    }

    Ok(true)
}

/// Write the matched entry's bytes untouched, to `-o` or stdout.
///
/// Returns `Ok(false)` when none of the candidate entries exist.
async fn write_raw(archive: &[u8], config: &ExtractConfig, cli: &Cli) -> Result<bool> {
    let data = match extract_named_entry_with_limits(archive, &config.candidates, &config.limits) {
        Ok(data) => data,
        Err(e) if e.is_missing_entry() => return Ok(false),
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("cannot extract entry from {}", cli.file)));
        }
    };

    match &cli.output {
        Some(path) => tokio::fs::write(path, &data)
            .await
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&data).await?;
            stdout.flush().await?;
        }
    }

    Ok(true)
}

/// Format a byte size into a human-readable string.
///
/// Automatically selects the appropriate unit (bytes, KB, MB, GB)
/// based on the size magnitude.
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
