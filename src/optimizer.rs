//! # Main Orchestrator Module
//!
//! Questo è il modulo principale che orchestra tutto il processo di shrink.
//!
//! ## Responsabilità:
//! - Risoluzione dei target (file singolo vs. subtree di directory)
//! - Applicazione della policy di eligibility per ogni candidato
//! - Gestione concorrenza e parallelizzazione con worker pool
//! - Routing dei risultati verso l'accumulatore e il report
//! - Report aggregato finale dopo il join di tutti i task
//!
//! ## Architettura:
//! - `ShrinkProcessor`: Orchestratore principale (single instance)
//! - `TaskShrinker`: Worker per processing parallelo (una instance per file)
//!
//! ## Flusso di esecuzione:
//! 1. **Dependency check**: Verifica che convert sia disponibile
//! 2. **Target resolution**: Ogni target diventa file singolo o walk ricorsivo
//! 3. **Parallel processing**: Distribuisce i candidati su worker pool
//! 4. **Progress tracking**: Aggiorna progress bar per ogni file
//! 5. **Join barrier**: Attende il completamento di OGNI task
//! 6. **Reporting**: Summarize una sola volta e rendering del blocco aggregato
//!
//! ## Gestione concorrenza:
//! - Semaforo per limitare i worker concorrenti (default: 4)
//! - L'unico stato condiviso è `StatsAccumulator`, serializzato dal suo lock
//! - Timeout per singolo file, così una convert appesa non blocca il run
//!
//! ## Error handling:
//! - Un target che non si risolve viene abbandonato, il run continua
//! - Errori per singoli file non bloccano mai l'operazione e finiscono nel
//!   tally `errors`, distinto dagli skip deliberati
//! - `UnsupportedFormat` è una condizione attesa: conta come skip
//! - Solo la scrittura del report sul sink è fatale a livello di run

use crate::{
    config::Config,
    error::ShrinkError,
    file_manager::FileManager,
    progress::ProgressManager,
    report::ReportWriter,
    shrinker::{ImageShrinker, SHRUNK_PREFIX},
    stats::{RunStatistics, StatsAccumulator},
};
use anyhow::Result;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

/// Outcome of the eligibility policy for one candidate file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Hand the file to the shrinker
    Process,
    /// Already carries the shrunk_ prefix and reshrink is off
    SkipAlreadyShrunk,
}

/// Decide whether a candidate file should be shrunk.
///
/// Pure function of the base file name and the reshrink flag. The
/// unsupported-format skip is not decided here: it surfaces from the
/// shrinker at invocation time.
pub fn eligibility(path: &Path, reshrink: bool) -> Eligibility {
    if !reshrink {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.starts_with(SHRUNK_PREFIX) {
                return Eligibility::SkipAlreadyShrunk;
            }
        }
    }
    Eligibility::Process
}

/// Main shrink orchestrator
pub struct ShrinkProcessor<S> {
    config: Config,
    shrinker: Arc<S>,
    report: Arc<ReportWriter>,
}

impl<S: ImageShrinker + 'static> ShrinkProcessor<S> {
    /// Create a new processor reporting to standard output
    pub fn new(shrinker: S, config: Config) -> Result<Self> {
        Self::with_report(shrinker, config, ReportWriter::stdout())
    }

    /// Create a new processor with an injected report sink
    pub fn with_report(shrinker: S, config: Config, report: ReportWriter) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            shrinker: Arc::new(shrinker),
            report: Arc::new(report),
        })
    }

    /// Run the shrink process over the given targets.
    ///
    /// Per-target and per-file failures never abort the run: the aggregate
    /// report always renders. The error case is reserved for pre-run
    /// failures, a report sink that cannot be written, and the policy that
    /// a run where not a single target resolved exits nonzero.
    pub async fn run(&self, targets: &[PathBuf]) -> Result<RunStatistics> {
        info!("Starting shrink over {} target(s)", targets.len());

        if self.config.reshrink {
            info!("🔄 Reshrink mode: already shrunk files are processed again");
        }
        info!(
            "⚙️  Workers: {}, per-file timeout: {}s",
            self.config.workers, self.config.timeout_secs
        );

        // Check dependencies
        self.shrinker.check_dependencies().await?;

        // Resolve every target, in the order given
        let mut candidates = Vec::new();
        let mut resolved_targets = 0usize;

        for target in targets {
            match tokio::fs::metadata(target).await {
                Ok(metadata) => {
                    resolved_targets += 1;
                    if metadata.is_dir() {
                        candidates.extend(FileManager::collect_candidates(target));
                    } else {
                        candidates.push(target.clone());
                    }
                }
                Err(e) => {
                    error!("Failed to resolve target {}: {}", target.display(), e);
                }
            }
        }

        info!("Found {} candidate file(s) to examine", candidates.len());

        let progress = ProgressManager::new(candidates.len() as u64);
        let stats = Arc::new(StatsAccumulator::new());

        // Process candidates with controlled concurrency
        let semaphore = Arc::new(Semaphore::new(self.config.workers));
        let mut tasks = Vec::new();

        for file_path in candidates {
            let permit = semaphore.clone().acquire_owned().await?;
            let task_shrinker = TaskShrinker {
                shrinker: Arc::clone(&self.shrinker),
                stats: Arc::clone(&stats),
                report: Arc::clone(&self.report),
                reshrink: self.config.reshrink,
                timeout: Duration::from_secs(self.config.timeout_secs),
            };
            let progress_clone = progress.clone();

            let task = tokio::spawn(async move {
                let _permit = permit; // Keep permit alive

                let message = task_shrinker.process_candidate(&file_path).await?;
                progress_clone.update(&message);
                Ok::<(), anyhow::Error>(())
            });

            tasks.push(task);
        }

        // Join barrier: the report must only render after every task has
        // reported its outcome to the accumulator.
        for result in join_all(tasks).await {
            result??;
        }

        let totals = stats.summarize();
        progress.finish(&totals.format_summary());

        self.report.aggregate(&totals)?;

        if resolved_targets == 0 && !targets.is_empty() {
            return Err(anyhow::anyhow!("none of the given targets could be resolved"));
        }

        Ok(totals)
    }
}

/// Per-file worker
struct TaskShrinker<S> {
    shrinker: Arc<S>,
    stats: Arc<StatsAccumulator>,
    report: Arc<ReportWriter>,
    reshrink: bool,
    timeout: Duration,
}

impl<S: ImageShrinker> TaskShrinker<S> {
    /// Apply the eligibility policy, invoke the shrinker, and route the
    /// outcome. Returns the progress message for this file; the only error
    /// it propagates is a report sink that cannot be written.
    async fn process_candidate(&self, file_path: &Path) -> Result<String> {
        let file_name = file_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();

        if eligibility(file_path, self.reshrink) == Eligibility::SkipAlreadyShrunk {
            info!("Skipping already shrunk image: {}", file_path.display());
            self.stats.add_skipped();
            return Ok(format!("⏩ {}: already shrunk", file_name));
        }

        debug!("Attempting to shrink image: {}", file_path.display());

        let result = match tokio::time::timeout(self.timeout, self.shrinker.shrink(file_path)).await
        {
            Ok(result) => result,
            Err(_) => Err(ShrinkError::Timeout(self.timeout.as_secs())),
        };

        match result {
            Ok(outcome) => {
                self.report.file_entry(
                    file_path,
                    &outcome.output_path,
                    outcome.original_size,
                    outcome.new_size,
                )?;
                self.stats
                    .add_shrunk(outcome.original_size, outcome.new_size);
                Ok(format!(
                    "✅ {}: {:.1}% saved",
                    file_name,
                    FileManager::calculate_reduction(outcome.original_size, outcome.new_size)
                ))
            }
            Err(ShrinkError::UnsupportedFormat(_)) => {
                info!("Skipping unsupported file: {}", file_path.display());
                self.stats.add_skipped();
                Ok(format!("⏩ {}: unsupported format", file_name))
            }
            Err(e) => {
                error!("Failed to shrink {}: {}", file_path.display(), e);
                self.stats.add_error();
                Ok(format!("❌ {}: error", file_name))
            }
        }
    }
}
