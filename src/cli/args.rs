use crate::utils::constants::DEFAULT_CHUNK_SIZE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gsod-processor")]
#[command(about = "Regional daily weather series from NOAA GSOD bulk archives")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Configuration file [default: gsod.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download yearly GSOD archives into the archive directory
    Fetch {
        #[arg(short, long, help = "Directory to download archives into")]
        archive_dir: Option<PathBuf>,

        #[arg(
            short,
            long = "year",
            help = "Only download these years (repeatable) [default: every listed year]"
        )]
        years: Vec<i32>,

        #[arg(long, help = "Archive listing URL")]
        base_url: Option<String>,
    },

    /// List the most recent archives in the archive directory
    Years {
        #[arg(short = 'n', long, help = "Number of years to select")]
        count: usize,

        #[arg(short, long, help = "Directory holding yearly archives")]
        archive_dir: Option<PathBuf>,
    },

    /// Build the per-region daily table from local archives
    Extract {
        #[arg(
            short,
            long = "region",
            required = true,
            help = "Region name with a {region}_stations.csv allowlist (repeatable)"
        )]
        regions: Vec<String>,

        #[arg(
            short = 'n',
            long,
            conflicts_with = "files",
            help = "Use the most recent N archives"
        )]
        years: Option<usize>,

        #[arg(
            short,
            long = "file",
            help = "Archive file names inside the archive directory (repeatable)"
        )]
        files: Vec<String>,

        #[arg(short, long, help = "Directory holding yearly archives")]
        archive_dir: Option<PathBuf>,

        #[arg(short, long, help = "Directory holding station allowlists")]
        station_dir: Option<PathBuf>,

        #[arg(
            short,
            long = "output",
            help = "Output file, .csv or .parquet [default: output/gsod-regions-{YYMMDD}.parquet]"
        )]
        output_file: Option<PathBuf>,

        #[arg(short, long, default_value = "snappy")]
        compression: String,

        #[arg(long, help = "Archives processed in parallel [default: number of CPUs]")]
        max_workers: Option<usize>,

        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },
}
