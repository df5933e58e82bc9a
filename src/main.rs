use clap::Parser;
use gsod_processor::cli::{init_tracing, run, Cli};
use gsod_processor::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_file.as_deref())?;
    run(cli).await
}
