//! Batch Runner: the at-least-once OCR processing loop.
//!
//! One run loads the progress checkpoint, snapshots the eligible images
//! under the input directory, dispatches the unprocessed ones to a
//! bounded worker pool, and persists progress as completions arrive.
//!
//! Persistence is funneled through a single writer task: workers send
//! completed file names over a channel instead of rewriting the
//! checkpoint themselves, so concurrent completions can never drop each
//! other's entries. Externally the checkpoint behaves exactly like a
//! last-successful-full-snapshot: reruns skip whatever the file contains.
//!
//! Per-item failures are logged and recorded in the returned
//! [`BatchSummary`]; they never abort the batch or propagate to the
//! caller. Only pre-flight failures (corrupt checkpoint, unreadable
//! input directory) and worker panics abort the run.

use std::collections::BTreeSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;

use crate::core::config::BatchConfig;
use crate::core::io::{collect_image_files, file_name_of};
use crate::core::writer::write_result_record;
use crate::ocr::OcrBackend;
use crate::progress::ProgressStore;
use crate::types::{BatchItemOutcome, BatchSummary};
use crate::{DocuscanError, Result};

/// Global Tokio runtime for the synchronous wrapper.
///
/// Lazily initialized on first use and shared across all sync calls.
/// Runtime creation only fails on system resource exhaustion, at which
/// point nothing else would work either, so the `.expect()` fails fast.
static GLOBAL_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create global Tokio runtime - system may be out of resources")
});

/// Run the batch pipeline over `config.input_dir`.
///
/// # Errors
///
/// Returns an error before any processing starts if the checkpoint is
/// malformed or the input directory cannot be enumerated, and during the
/// run only if a worker task panics. Individual OCR or write failures are
/// reported through the summary instead.
pub async fn run_batch(
    config: &BatchConfig,
    backend: Arc<dyn OcrBackend>,
    store: Arc<dyn ProgressStore>,
) -> Result<BatchSummary> {
    // Corrupt checkpoint aborts here, before any item is dispatched
    let processed = store.load()?;

    std::fs::create_dir_all(&config.output_dir).map_err(DocuscanError::Io)?;

    let images = collect_image_files(&config.input_dir)?;
    let discovered = images.len();

    let (pending, skipped): (Vec<_>, Vec<_>) = images
        .into_iter()
        .partition(|path| !processed.contains(&file_name_of(path)));

    tracing::info!(
        backend = backend.name(),
        discovered,
        skipped = skipped.len(),
        workers = config.effective_worker_count(),
        "starting batch run"
    );

    let (completion_tx, completion_rx) = mpsc::unbounded_channel::<String>();
    let persister = spawn_persister(Arc::clone(&store), processed, config.persist_every.max(1), completion_rx);

    let semaphore = Arc::new(Semaphore::new(config.effective_worker_count()));
    let params = config.ocr_params();
    let mut tasks = JoinSet::new();

    for path in pending {
        let backend = Arc::clone(&backend);
        let semaphore = Arc::clone(&semaphore);
        let completion_tx = completion_tx.clone();
        let params = params.clone();
        let output_dir = config.output_dir.clone();

        tasks.spawn(async move {
            let _permit = semaphore
                .acquire()
                .await
                .expect("worker semaphore closed while tasks are pending");

            let file_name = file_name_of(&path);
            tracing::info!(file = %file_name, "processing");

            let lines = match backend.read_text(&path, &params).await {
                Ok(lines) => lines,
                Err(e) => {
                    tracing::error!(file = %file_name, error = %e, "ocr failed");
                    return BatchItemOutcome {
                        file_name,
                        output_path: None,
                        error: Some(e.to_string()),
                    };
                }
            };

            match write_result_record(&file_name, &lines, &output_dir) {
                Ok(output_path) => {
                    // Receiver only closes after every sender is gone, so this cannot fail here
                    let _ = completion_tx.send(file_name.clone());
                    tracing::info!(file = %file_name, output = %output_path.display(), "processed");
                    BatchItemOutcome {
                        file_name,
                        output_path: Some(output_path),
                        error: None,
                    }
                }
                Err(e) => {
                    tracing::error!(file = %file_name, error = %e, "failed to write result record");
                    BatchItemOutcome {
                        file_name,
                        output_path: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        });
    }
    drop(completion_tx);

    let mut outcomes = Vec::with_capacity(tasks.len());
    while let Some(task_result) = tasks.join_next().await {
        match task_result {
            Ok(outcome) => outcomes.push(outcome),
            Err(join_err) => {
                return Err(DocuscanError::Other(format!("Batch task panicked: {}", join_err)));
            }
        }
    }

    persister
        .await
        .map_err(|e| DocuscanError::Other(format!("Progress persistence task panicked: {}", e)))?;

    // Keep outcome order aligned with the enumeration snapshot
    outcomes.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    let summary = BatchSummary {
        discovered,
        skipped: skipped.len(),
        outcomes,
    };

    tracing::info!(
        succeeded = summary.succeeded(),
        failed = summary.failed(),
        skipped = summary.skipped,
        "batch run finished"
    );

    Ok(summary)
}

/// Single-writer persistence task.
///
/// Owns the in-memory progress set for the duration of the run: inserts
/// each completion, rewrites the checkpoint every `persist_every`
/// completions, and flushes once the channel drains. Save failures are
/// logged and do not stop the run; the affected items simply get
/// reprocessed next time.
fn spawn_persister(
    store: Arc<dyn ProgressStore>,
    mut set: BTreeSet<String>,
    persist_every: usize,
    mut completions: mpsc::UnboundedReceiver<String>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut unsaved = 0usize;

        while let Some(file_name) = completions.recv().await {
            set.insert(file_name);
            unsaved += 1;

            if unsaved >= persist_every {
                if let Err(e) = store.save(&set) {
                    tracing::error!(error = %e, "failed to persist progress checkpoint");
                } else {
                    unsaved = 0;
                }
            }
        }

        if unsaved > 0 {
            if let Err(e) = store.save(&set) {
                tracing::error!(error = %e, "failed to persist final progress checkpoint");
            }
        }
    })
}

/// Synchronous wrapper for [`run_batch`].
///
/// Blocks the current thread on the shared global runtime. For async
/// code, use `run_batch` directly.
pub fn run_batch_sync(
    config: &BatchConfig,
    backend: Arc<dyn OcrBackend>,
    store: Arc<dyn ProgressStore>,
) -> Result<BatchSummary> {
    GLOBAL_RUNTIME.block_on(run_batch(config, backend, store))
}
