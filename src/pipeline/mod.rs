//! Bounded-concurrency batch conversion.
//!
//! Items are dispatched in list order with at most `concurrency` running at
//! once. Each item succeeds or fails on its own; nothing is retried, rolled
//! back, or cancelled because a sibling failed.

mod gate;
mod worker;

pub use gate::{CompletionGate, GateTicket};
pub use worker::{process_triple, ItemError};

use std::path::PathBuf;
use std::sync::Arc;

use avmeta_common::FileTriple;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::artwork::ArtworkFetcher;
use crate::config::{ArtworkConfig, Config};

/// Shared, read-only state every worker sees.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub concurrency: usize,
    pub artwork: ArtworkConfig,
    /// `None` disables downloads; local artwork is still embedded.
    pub fetcher: Option<ArtworkFetcher>,
}

impl PipelineContext {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let fetcher = if config.artwork.enabled {
            Some(ArtworkFetcher::new(&config.artwork)?)
        } else {
            None
        };

        Ok(Self {
            concurrency: config.convert.concurrency,
            artwork: config.artwork.clone(),
            fetcher,
        })
    }
}

/// Result for one dispatched triple.
#[derive(Debug)]
pub struct ItemOutcome {
    pub triple: FileTriple,
    /// Path of the written sidecar.
    pub result: Result<PathBuf, ItemError>,
}

/// Summary of one batch run. `succeeded + failed == discovered`.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub discovered: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// In dispatch order.
    pub outcomes: Vec<ItemOutcome>,
}

pub struct Pipeline {
    ctx: Arc<PipelineContext>,
}

impl Pipeline {
    pub fn new(ctx: PipelineContext) -> Self {
        Self { ctx: Arc::new(ctx) }
    }

    /// Convert every triple and wait for all of them to finish.
    pub async fn run(&self, triples: Vec<FileTriple>) -> BatchReport {
        let discovered = triples.len();
        info!("discovered {} metadata files", discovered);

        let gate = Arc::new(CompletionGate::new());
        let semaphore = Arc::new(Semaphore::new(self.ctx.concurrency.max(1)));
        let mut handles = Vec::with_capacity(discovered);

        for triple in triples {
            // The semaphore is never closed.
            let Ok(permit) = semaphore.clone().acquire_owned().await else {
                break;
            };
            let ticket = gate.dispatch();
            let ctx = self.ctx.clone();
            let task_triple = triple.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let result = process_triple(&ctx, &task_triple).await;
                match &result {
                    Ok(_) => ticket.succeed(),
                    Err(e) => {
                        error!(source = %task_triple.nfo_name(), "Conversion failed: {}", e);
                        ticket.fail();
                    }
                }
                result
            });
            handles.push((triple, handle));
        }

        gate.wait().await;

        let mut outcomes = Vec::with_capacity(handles.len());
        for (triple, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    error!(source = %triple.nfo_name(), "Conversion task failed: {}", e);
                    Err(ItemError::Panicked(e.to_string()))
                }
            };
            outcomes.push(ItemOutcome { triple, result });
        }

        let report = BatchReport {
            discovered,
            succeeded: gate.succeeded(),
            failed: gate.failed(),
            outcomes,
        };
        info!(
            discovered = report.discovered,
            succeeded = report.succeeded,
            failed = report.failed,
            "Batch finished"
        );
        report
    }
}
