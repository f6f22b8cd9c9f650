//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri del run
//! - Fornisce validazione robusta dei parametri di input
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `reshrink`: Riprocessa anche i file già marcati `shrunk_` (default: false)
//! - `workers`: Numero di worker paralleli (default: 4)
//! - `timeout_secs`: Timeout per singola invocazione di convert (default: 120)
//!
//! La policy di trasformazione (resize 50%, quality 60) è fissa e non fa
//! parte della configurazione runtime.
//!
//! ## Esempio:
//! ```rust
//! use image_shrinker::Config;
//!
//! let config = Config {
//!     workers: 8,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a shrink run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Reprocess files already carrying the shrunk_ prefix
    pub reshrink: bool,
    /// Number of parallel workers
    pub workers: usize,
    /// Timeout for a single convert invocation, in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reshrink: false,
            workers: 4,
            timeout_secs: 120,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(anyhow::anyhow!("Number of workers must be greater than 0"));
        }

        if self.timeout_secs == 0 {
            return Err(anyhow::anyhow!("Timeout must be greater than 0 seconds"));
        }

        Ok(())
    }

    /// Load configuration from file
    pub async fn from_file(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.workers = 0;
        assert!(config.validate().is_err());

        config.workers = 4;
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.reshrink);
        assert_eq!(config.workers, 4);
        assert_eq!(config.timeout_secs, 120);
    }

    #[tokio::test]
    async fn test_config_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let original_config = Config {
            reshrink: true,
            workers: 8,
            timeout_secs: 30,
        };

        // Save config
        original_config.save_to_file(&config_path).await.unwrap();

        // Load config
        let loaded_config = Config::from_file(&config_path).await.unwrap();

        assert!(loaded_config.reshrink);
        assert_eq!(loaded_config.workers, 8);
        assert_eq!(loaded_config.timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_config_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("absent.json");

        let loaded = Config::from_file(&config_path).await.unwrap();
        assert_eq!(loaded.workers, Config::default().workers);
    }
}
