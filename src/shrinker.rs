//! # Image Shrinking Module
//!
//! Questo modulo gestisce la trasformazione vera e propria delle immagini
//! utilizzando esclusivamente ImageMagick come tool esterno.
//!
//! ## Architettura
//!
//! A differenza di altri processori di immagini che usano librerie Rust come
//! `image`, questo modulo delega tutto il lavoro sui pixel a `convert`:
//!
//! - **Vantaggi**:
//!   - Nessuna dipendenza pesante da librerie di imaging Rust
//!   - Utilizza un tool maturo e altamente ottimizzato
//!   - Performance native dello strumento specializzato
//!
//! - **Svantaggi**:
//!   - Richiede ImageMagick installato nel sistema
//!   - Overhead di process spawning per ogni immagine
//!
//! ## Formati Supportati
//!
//! JPG, JPEG, PNG, GIF (case-insensitive sull'estensione). Il controllo del
//! formato avviene PRIMA di qualunque invocazione esterna.
//!
//! ## Pipeline di trasformazione
//!
//! 1. **Whitelist check**: Estensione file contro la whitelist
//! 2. **Calcolo path output**: Stessa directory, prefisso `shrunk_`
//! 3. **Invocazione**: `convert <input> -resize 50% -quality 60 <output>`
//! 4. **Size probe**: Dimensioni di input e output via metadata
//!
//! La policy (resize 50%, quality 60) è fissa: non è configurabile a runtime.
//!
//! ## Capability interface
//!
//! Il trait `ImageShrinker` modella la trasformazione come black box, così il
//! meccanismo subprocess è sostituibile nei test senza toccare
//! l'orchestrazione.

use crate::error::ShrinkError;
use crate::file_manager::FileManager;
use crate::platform::PlatformCommands;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Prefix applied to shrunk output files; also the marker the eligibility
/// policy checks to detect already-processed files.
pub const SHRUNK_PREFIX: &str = "shrunk_";

/// Fixed resize factor passed to convert
const RESIZE_FACTOR: &str = "50%";

/// Fixed quality level passed to convert
const QUALITY: &str = "60";

/// Result of a successful shrink
#[derive(Debug, Clone)]
pub struct ShrinkOutcome {
    /// Path of the transformed file, alongside the original
    pub output_path: PathBuf,
    /// Size of the input file in bytes
    pub original_size: u64,
    /// Size of the transformed file in bytes
    pub new_size: u64,
}

/// Capability interface for the image transformation step
pub trait ImageShrinker: Send + Sync {
    /// Transform a single input file and report the before/after sizes
    fn shrink(
        &self,
        input: &Path,
    ) -> impl Future<Output = Result<ShrinkOutcome, ShrinkError>> + Send;

    /// Verify the external tooling this shrinker needs is available
    fn check_dependencies(&self) -> impl Future<Output = Result<(), ShrinkError>> + Send;
}

/// Shrinks images by invoking ImageMagick's convert as a subprocess
#[derive(Debug, Default, Clone)]
pub struct ImageMagickShrinker;

impl ImageMagickShrinker {
    pub fn new() -> Self {
        Self
    }

    /// Check if a file extension is on the supported whitelist
    pub fn is_supported_format(path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            matches!(ext_lower.as_str(), "jpg" | "jpeg" | "png" | "gif")
        } else {
            false
        }
    }

    /// Derive the output path: same directory, shrunk_ prefix on the base name
    pub fn output_path_for(input: &Path) -> Result<PathBuf, ShrinkError> {
        let file_name = input
            .file_name()
            .ok_or_else(|| ShrinkError::Validation(format!("Invalid file name: {}", input.display())))?
            .to_string_lossy();

        Ok(input.with_file_name(format!("{}{}", SHRUNK_PREFIX, file_name)))
    }
}

impl ImageShrinker for ImageMagickShrinker {
    async fn shrink(&self, input: &Path) -> Result<ShrinkOutcome, ShrinkError> {
        if !Self::is_supported_format(input) {
            let ext = input
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default();
            return Err(ShrinkError::UnsupportedFormat(ext));
        }

        let output_path = Self::output_path_for(input)?;

        let platform = PlatformCommands::instance();
        let convert = platform.get_command("convert");

        debug!(
            "Running {} {} -resize {} -quality {} {}",
            convert,
            input.display(),
            RESIZE_FACTOR,
            QUALITY,
            output_path.display()
        );

        // Only the exit status matters; stderr is not interpreted
        let output = Command::new(convert)
            .arg(input)
            .arg("-resize")
            .arg(RESIZE_FACTOR)
            .arg("-quality")
            .arg(QUALITY)
            .arg(&output_path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ShrinkError::ConvertFailed(format!("failed to start convert: {}", e)))?;

        if !output.status.success() {
            return Err(ShrinkError::ConvertFailed(format!(
                "convert exited with {} for {}",
                output.status,
                input.display()
            )));
        }

        // The transformed file now exists on disk; a probe failure here is a
        // failure for this file's statistics only.
        let original_size = FileManager::file_size(input).await?;
        let new_size = FileManager::file_size(&output_path).await?;

        Ok(ShrinkOutcome {
            output_path,
            original_size,
            new_size,
        })
    }

    async fn check_dependencies(&self) -> Result<(), ShrinkError> {
        let platform = PlatformCommands::instance();
        if !platform.is_command_available("convert").await {
            return Err(ShrinkError::MissingDependency(
                "convert is required for image shrinking. Please install ImageMagick.".to_string(),
            ));
        }
        Ok(())
    }
}
