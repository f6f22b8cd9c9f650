//! # Image Shrinker Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom per diverse operazioni
//! - `file_manager`: Operazioni sui file e discovery dei candidati
//! - `shrinker`: Invocazione ImageMagick e whitelist formati
//! - `stats`: Accumulatore thread-safe delle statistiche di run
//! - `report`: Rendering tabellare per-file e blocco aggregato
//! - `optimizer`: Orchestratore principale del processo
//! - `progress`: Progress bar per feedback real-time
//! - `platform`: Risoluzione cross-platform dei comandi esterni
//!
//! ## Utilizzo:
//! ```rust
//! use image_shrinker::{Config, ImageMagickShrinker, ShrinkProcessor};
//! use std::path::PathBuf;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::default();
//! let processor = ShrinkProcessor::new(ImageMagickShrinker::new(), config)?;
//! let stats = processor.run(&[PathBuf::from("photos")]).await?;
//! println!("{}", stats.format_summary());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod file_manager;
pub mod optimizer;
pub mod platform;
pub mod progress;
pub mod report;
pub mod shrinker;
pub mod stats;

pub use config::Config;
pub use error::ShrinkError;
pub use optimizer::ShrinkProcessor;
pub use report::ReportWriter;
pub use shrinker::{ImageMagickShrinker, ImageShrinker, ShrinkOutcome};
pub use stats::{RunStatistics, StatsAccumulator};
