//! # Report Rendering Module
//!
//! Questo modulo produce l'output leggibile del run: una tabella
//! before/after per ogni file trasformato e il blocco aggregato finale.
//!
//! Il sink di output è iniettabile (default: stdout) e protetto da un mutex,
//! così le righe per-file emesse da worker concorrenti non si mescolano.
//! La scrittura sul sink è l'unico errore fatale a livello di run.

use crate::file_manager::FileManager;
use crate::stats::RunStatistics;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

/// Renders per-file tables and the final aggregate block to one sink
pub struct ReportWriter {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl ReportWriter {
    /// Report to standard output
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Report to an arbitrary sink
    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        Self { sink: Mutex::new(sink) }
    }

    /// Render the before/after table for one transformed file
    pub fn file_entry(
        &self,
        input: &Path,
        output: &Path,
        original_size: u64,
        new_size: u64,
    ) -> io::Result<()> {
        let symbol = if new_size > original_size { "+" } else { "-" };
        let diff = original_size.abs_diff(new_size);

        let mut sink = self.sink.lock().unwrap();
        writeln!(sink, "Metric             Before   After    Change")?;
        writeln!(sink, "------             ------   -----    ------")?;
        writeln!(
            sink,
            "{:<18} {:<8} {:<8} {}{}",
            "File Size",
            FileManager::format_size(original_size),
            FileManager::format_size(new_size),
            symbol,
            FileManager::format_size(diff)
        )?;
        writeln!(sink, "{:<18} {} -> {}", "File Path", input.display(), output.display())?;
        writeln!(
            sink,
            "Reduction: {:.2}%",
            FileManager::calculate_reduction(original_size, new_size)
        )?;
        writeln!(sink)?;
        sink.flush()
    }

    /// Render the final aggregate block
    pub fn aggregate(&self, totals: &RunStatistics) -> io::Result<()> {
        let symbol = if totals.shrunk_size_total > totals.original_size_total {
            "+"
        } else {
            "-"
        };
        let diff = totals.original_size_total.abs_diff(totals.shrunk_size_total);

        let mut sink = self.sink.lock().unwrap();
        writeln!(sink)?;
        writeln!(sink, "Aggregate Statistics:")?;
        writeln!(sink, "Total files processed: {}", totals.files_processed)?;
        writeln!(sink, "Total files skipped: {}", totals.files_skipped)?;
        writeln!(sink, "Total errors: {}", totals.errors)?;
        writeln!(
            sink,
            "Total original size: {}",
            FileManager::format_size(totals.original_size_total)
        )?;
        writeln!(
            sink,
            "Total shrunk size: {}",
            FileManager::format_size(totals.shrunk_size_total)
        )?;
        writeln!(
            sink,
            "Total size reduction: {}{} ({:.2}%)",
            symbol,
            FileManager::format_size(diff),
            totals.overall_reduction_percent()
        )?;
        sink.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Test sink capturing everything written through the report
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_file_entry_shows_reduction() {
        let buffer = SharedBuffer::default();
        let report = ReportWriter::new(Box::new(buffer.clone()));

        report
            .file_entry(
                Path::new("photo.jpg"),
                Path::new("shrunk_photo.jpg"),
                10_000,
                5_000,
            )
            .unwrap();

        let out = buffer.contents();
        assert!(out.contains("File Size"));
        assert!(out.contains("shrunk_photo.jpg"));
        assert!(out.contains("Reduction: 50.00%"));
        assert!(out.contains("-4.88 KB"));
    }

    #[test]
    fn test_file_entry_shows_growth() {
        let buffer = SharedBuffer::default();
        let report = ReportWriter::new(Box::new(buffer.clone()));

        report
            .file_entry(Path::new("a.gif"), Path::new("shrunk_a.gif"), 100, 150)
            .unwrap();

        let out = buffer.contents();
        assert!(out.contains("+50 B"));
        assert!(out.contains("Reduction: -50.00%"));
    }

    #[test]
    fn test_aggregate_with_zero_counters() {
        let buffer = SharedBuffer::default();
        let report = ReportWriter::new(Box::new(buffer.clone()));

        report.aggregate(&RunStatistics::default()).unwrap();

        let out = buffer.contents();
        assert!(out.contains("Total files processed: 0"));
        assert!(out.contains("Total files skipped: 0"));
        assert!(out.contains("(0.00%)"));
    }

    #[test]
    fn test_aggregate_totals() {
        let buffer = SharedBuffer::default();
        let report = ReportWriter::new(Box::new(buffer.clone()));

        let totals = RunStatistics {
            original_size_total: 20_000,
            shrunk_size_total: 5_000,
            files_processed: 2,
            files_skipped: 1,
            errors: 0,
        };
        report.aggregate(&totals).unwrap();

        let out = buffer.contents();
        assert!(out.contains("Total files processed: 2"));
        assert!(out.contains("Total files skipped: 1"));
        assert!(out.contains("(75.00%)"));
    }
}
