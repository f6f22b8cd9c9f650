//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `ShrinkError` enum per categorizzare tutti gli errori possibili
//! - Fornisce messaggi di errore descrittivi e strutturati
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (file non trovati, permessi, etc.)
//! - `UnsupportedFormat`: Estensione file fuori dalla whitelist
//! - `ConvertFailed`: Invocazione ImageMagick fallita
//! - `Timeout`: Invocazione esterna oltre il limite di tempo
//! - `SizeQuery`: Lettura dimensione file fallita dopo la conversione
//! - `MissingDependency`: Tool esterno mancante (convert)
//! - `Validation`: Errori di validazione configurazione
//!
//! Gli errori per singolo file sono gestiti localmente dall'orchestratore e
//! non interrompono mai il run; solo `MissingDependency` e `Validation`
//! sono fatali prima dell'avvio.

use std::path::PathBuf;

/// Custom error types for image shrinking
#[derive(thiserror::Error, Debug)]
pub enum ShrinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("ImageMagick convert failed: {0}")]
    ConvertFailed(String),

    #[error("Shrink timed out after {0}s")]
    Timeout(u64),

    #[error("Failed to read size of {path}: {source}")]
    SizeQuery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dependency missing: {0}")]
    MissingDependency(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
