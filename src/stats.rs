//! # Run Statistics Module
//!
//! Questo modulo gestisce le statistiche cumulative di un run.
//!
//! ## Responsabilità:
//! - `StatsAccumulator`: accumulatore thread-safe condiviso fra i worker
//! - `RunStatistics`: snapshot finale letto una sola volta per il report
//!
//! ## Modello di concorrenza:
//! - Un singolo `Mutex` protegge TUTTI i contatori, così l'incremento di un
//!   contatore e l'aggiornamento dei byte totali associati avvengono
//!   atomicamente insieme; un aggiornamento parziale non è mai osservabile
//! - L'accumulatore è l'unico punto di sincronizzazione del sistema: viene
//!   passato per `Arc` a ogni task e nessun altro stato è condiviso

use std::sync::Mutex;

/// Snapshot of the counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Total bytes of the originals that were shrunk successfully
    pub original_size_total: u64,
    /// Total bytes of the shrunk outputs
    pub shrunk_size_total: u64,
    /// Files transformed successfully
    pub files_processed: usize,
    /// Files skipped (already shrunk, or unsupported format)
    pub files_skipped: usize,
    /// Files that failed to transform (exec failure, timeout, size probe)
    pub errors: usize,
}

/// Thread-safe accumulator for run statistics
#[derive(Debug, Default)]
pub struct StatsAccumulator {
    totals: Mutex<RunStatistics>,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful shrink: byte totals and the processed counter
    /// move together under the same lock.
    pub fn add_shrunk(&self, original_size: u64, new_size: u64) {
        let mut totals = self.totals.lock().unwrap();
        totals.original_size_total += original_size;
        totals.shrunk_size_total += new_size;
        totals.files_processed += 1;
    }

    /// Record a deliberate skip
    pub fn add_skipped(&self) {
        let mut totals = self.totals.lock().unwrap();
        totals.files_skipped += 1;
    }

    /// Record a per-file failure; contributes to no other tally
    pub fn add_error(&self) {
        let mut totals = self.totals.lock().unwrap();
        totals.errors += 1;
    }

    /// Read the final counters. Called once, after every task has completed.
    pub fn summarize(&self) -> RunStatistics {
        *self.totals.lock().unwrap()
    }
}

impl RunStatistics {
    /// Overall reduction across the run as a percentage of the original bytes
    pub fn overall_reduction_percent(&self) -> f64 {
        if self.original_size_total > 0 {
            let saved = self.original_size_total as f64 - self.shrunk_size_total as f64;
            (saved / self.original_size_total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// One-line summary used as the final progress message
    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {} | Skipped: {} | Errors: {} | Total reduction: {:.2}%",
            self.files_processed,
            self.files_skipped,
            self.errors,
            self.overall_reduction_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_accumulation() {
        let stats = StatsAccumulator::new();
        stats.add_shrunk(10_000, 4_000);
        stats.add_shrunk(2_000, 3_000);
        stats.add_skipped();
        stats.add_error();

        let totals = stats.summarize();
        assert_eq!(totals.files_processed, 2);
        assert_eq!(totals.files_skipped, 1);
        assert_eq!(totals.errors, 1);
        assert_eq!(totals.original_size_total, 12_000);
        assert_eq!(totals.shrunk_size_total, 7_000);
    }

    #[test]
    fn test_reduction_percent() {
        let stats = StatsAccumulator::new();
        stats.add_shrunk(1_000, 250);
        assert_eq!(stats.summarize().overall_reduction_percent(), 75.0);

        // No processed files must not divide by zero
        let empty = StatsAccumulator::new();
        assert_eq!(empty.summarize().overall_reduction_percent(), 0.0);
    }

    #[tokio::test]
    async fn test_concurrent_updates_never_lose_counts() {
        let stats = Arc::new(StatsAccumulator::new());
        let n = 64;

        let mut tasks = Vec::new();
        for i in 0..n {
            let stats = Arc::clone(&stats);
            tasks.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    stats.add_shrunk(100, 40);
                } else {
                    stats.add_skipped();
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let totals = stats.summarize();
        assert_eq!(totals.files_processed, n / 2);
        assert_eq!(totals.files_skipped, n / 2);
        assert_eq!(totals.original_size_total, (n as u64 / 2) * 100);
        assert_eq!(totals.shrunk_size_total, (n as u64 / 2) * 40);
    }
}
