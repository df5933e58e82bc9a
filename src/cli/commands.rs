use crate::archive::{ArchiveFetcher, ArchiveStore, DatasetComposition, RegionCombiner, RegionExtractor};
use crate::cli::args::{Cli, Commands};
use crate::config::AppConfig;
use crate::error::{ProcessingError, Result};
use crate::utils::filename::generate_default_output_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::{CsvWriter, OutputFormat, ParquetWriter};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` overrides the level.
pub fn init_tracing(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gsod_processor={}", level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Fetch {
            archive_dir,
            years,
            base_url,
        } => {
            let mut settings = config.fetch_settings();
            if let Some(dir) = archive_dir {
                settings = settings.with_target_dir(dir);
            }
            if let Some(url) = base_url {
                settings.base_url = url;
            }

            println!("Archive source: {}", settings.normalized_base_url());
            println!("Target directory: {}", settings.target_dir.display());

            let fetcher = ArchiveFetcher::new(settings)?;
            let years = if years.is_empty() {
                let spinner = ProgressReporter::new_spinner("Reading archive listing...", false);
                let discovered = fetcher.discover_years().await?;
                spinner.finish_with_message(&format!("Found {} archive years", discovered.len()));
                discovered
            } else {
                years
            };

            if years.is_empty() {
                println!("No archive years found");
                return Ok(());
            }

            let progress = ProgressReporter::new(years.len() as u64, "Downloading archives...", false);
            let report = fetcher.fetch_years(&years, Some(&progress)).await?;
            progress.finish_with_message("Download complete");

            println!("\n{}", report.summary());
        }

        Commands::Years { count, archive_dir } => {
            let archive_dir = archive_dir.unwrap_or(config.archive_dir);
            let selection = ArchiveStore::new(&archive_dir).latest(count)?;

            println!("Latest {} archives in {}:", selection.len(), archive_dir.display());
            for (year, file) in selection.iter() {
                println!("  {}  {}", year, file);
            }
        }

        Commands::Extract {
            regions,
            years,
            files,
            archive_dir,
            station_dir,
            output_file,
            compression,
            max_workers,
            chunk_size,
        } => {
            let archive_dir = archive_dir.unwrap_or(config.archive_dir);
            let station_dir = station_dir.unwrap_or(config.station_dir);
            let max_workers = max_workers.unwrap_or(config.max_workers);

            let files = match years {
                Some(count) => {
                    let selection = ArchiveStore::new(&archive_dir).latest(count)?;
                    info!(years = ?selection.years, "Selected archive years");
                    selection.files
                }
                None if !files.is_empty() => files,
                None => {
                    return Err(ProcessingError::Config(
                        "Specify archives with --years or --file".to_string(),
                    ))
                }
            };

            println!("Regions: {}", regions.join(", "));
            println!("Archives: {}", files.join(", "));
            println!("Workers: {}, Chunk size: {}", max_workers, chunk_size);

            let extractor = RegionExtractor::new(archive_dir, station_dir).with_max_workers(max_workers);
            let combiner = RegionCombiner::new(extractor);

            let progress = ProgressReporter::new(regions.len() as u64, "Extracting regions...", false);
            let records = combiner.combine_with_progress(&regions, &files, Some(&progress))?;
            progress.finish_with_message(&format!("Extracted {} region-days", records.len()));

            println!("\n{}", DatasetComposition::from_records(&records).summary());

            if records.is_empty() {
                println!("No records to write");
                return Ok(());
            }

            let output_file = output_file.unwrap_or_else(generate_default_output_filename);
            if let Some(parent) = output_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            println!("Writing {} records to {}...", records.len(), output_file.display());
            match OutputFormat::from_path(&output_file) {
                OutputFormat::Parquet => {
                    let writer = ParquetWriter::new().with_compression(&compression)?;
                    writer.write_records_batched(&records, &output_file, chunk_size)?;

                    let file_info = writer.get_file_info(&output_file)?;
                    println!("\n{}", file_info.summary());
                }
                OutputFormat::Csv => {
                    CsvWriter::new().write_records(&records, &output_file)?;
                }
            }

            println!("Processing complete!");
        }
    }

    Ok(())
}
