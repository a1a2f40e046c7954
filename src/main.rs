//! pagewright - headless page-layout editor
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;

/// pagewright - edit record page layouts over NDJSON
#[derive(Parser, Debug)]
#[command(name = "pagewright")]
#[command(about = "Headless page-layout editor driven by NDJSON on stdin", long_about = None)]
struct Args {
    /// Project directory holding `.pagewright/`
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Layout store file (overrides `[store] path` from config)
    #[arg(long, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Object to select on startup
    #[arg(long, value_name = "KEY")]
    object: Option<String>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    pagewright_core::logging::init()?;

    let project_path = args
        .path
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    pagewright::run_headless(&project_path, args.store, args.object).await?;
    Ok(())
}
