//! # File Management Module
//!
//! Questo modulo gestisce tutte le operazioni sui file e la discovery dei candidati.
//!
//! ## Responsabilità:
//! - Discovery ricorsiva dei file regolari in una directory
//! - Query della dimensione file (size probe)
//! - Formattazione human-readable delle dimensioni
//! - Calcolo percentuale di riduzione
//!
//! ## Operazioni sui file:
//! - `collect_candidates()`: Trova tutti i file regolari in un subtree
//! - `file_size()`: Ottiene la dimensione in byte di un path
//! - `format_size()`: Converte bytes in formato leggibile (KB, MB, GB)
//! - `calculate_reduction()`: Calcola percentuale di riduzione
//!
//! ## Tolleranza errori:
//! - Un errore su una singola entry durante il walk viene loggato e la entry
//!   viene saltata; le entry sorelle continuano
//! - L'ordine di visita è ordinato per file name, quindi deterministico per
//!   un dato snapshot del filesystem

use crate::error::ShrinkError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;
use walkdir::WalkDir;

/// Manages file operations and candidate discovery
pub struct FileManager;

impl FileManager {
    /// Get the size in bytes of a file
    pub async fn file_size(path: &Path) -> Result<u64, ShrinkError> {
        let metadata = fs::metadata(path).await.map_err(|e| ShrinkError::SizeQuery {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(metadata.len())
    }

    /// Collect every regular file beneath a directory, in deterministic order.
    ///
    /// Walk errors on individual entries are logged and skipped; they never
    /// abort the traversal of sibling entries. Directories themselves are
    /// never candidates.
    pub fn collect_candidates(dir: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() {
                        files.push(entry.path().to_path_buf());
                    }
                }
                Err(e) => {
                    warn!("Error accessing entry during walk: {}", e);
                }
            }
        }

        files
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Calculate percentage reduction
    pub fn calculate_reduction(original_size: u64, new_size: u64) -> f64 {
        if original_size == 0 {
            0.0
        } else {
            ((original_size as f64 - new_size as f64) / original_size as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_size() {
        assert_eq!(FileManager::format_size(512), "512 B");
        assert_eq!(FileManager::format_size(2048), "2.00 KB");
        assert_eq!(FileManager::format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_calculate_reduction() {
        assert_eq!(FileManager::calculate_reduction(1000, 500), 50.0);
        assert_eq!(FileManager::calculate_reduction(0, 500), 0.0);
        // Growth yields a negative reduction
        assert!(FileManager::calculate_reduction(500, 1000) < 0.0);
    }

    #[test]
    fn test_collect_candidates_recursive_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        std::fs::create_dir(root.join("sub")).unwrap();
        std::fs::write(root.join("b.jpg"), b"b").unwrap();
        std::fs::write(root.join("a.jpg"), b"a").unwrap();
        std::fs::write(root.join("sub").join("c.png"), b"c").unwrap();

        let files = FileManager::collect_candidates(root);

        assert_eq!(files.len(), 3);
        assert_eq!(files[0], root.join("a.jpg"));
        assert_eq!(files[1], root.join("b.jpg"));
        assert_eq!(files[2], root.join("sub").join("c.png"));
        // Directories are never candidates
        assert!(files.iter().all(|f| f.is_file()));
    }

    #[tokio::test]
    async fn test_file_size() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.jpg");
        std::fs::write(&path, vec![0u8; 1234]).unwrap();

        assert_eq!(FileManager::file_size(&path).await.unwrap(), 1234);

        let missing = temp_dir.path().join("missing.jpg");
        assert!(matches!(
            FileManager::file_size(&missing).await,
            Err(ShrinkError::SizeQuery { .. })
        ));
    }
}
