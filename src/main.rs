//! # Image Shrinker - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Creazione della configurazione e avvio del processor
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (paths, reshrink, workers, timeout, etc.)
//! 2. Configura il logging (INFO o DEBUG a seconda del flag verbose)
//! 3. Carica la configurazione da file se richiesto, poi applica gli override
//! 4. Istanzia ShrinkProcessor e avvia il run
//!
//! ## Esempio di utilizzo:
//! ```bash
//! shrink /path/to/photos vacation.jpg --reshrink --workers 8
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use image_shrinker::{Config, ImageMagickShrinker, ShrinkProcessor};

#[derive(Parser)]
#[command(name = "shrink", version)]
#[command(about = "Shrink image file(s) with ImageMagick")]
struct Args {
    /// Files or directories containing images to shrink
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Allow reshrinking of already shrunk images
    #[arg(long)]
    reshrink: bool,

    /// Number of parallel workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Timeout for a single convert invocation, in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Load defaults from a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // File-based defaults first, CLI flags override
    let mut config = match args.config {
        Some(ref path) => Config::from_file(path).await?,
        None => Config::default(),
    };

    config.reshrink = config.reshrink || args.reshrink;
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }

    let processor = ShrinkProcessor::new(ImageMagickShrinker::new(), config)?;
    processor.run(&args.paths).await?;

    Ok(())
}
