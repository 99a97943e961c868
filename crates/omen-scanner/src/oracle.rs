use chrono::{DateTime, Utc};
use futures::StreamExt;
use omen_core::{traits::ChainClient, utils::to_checksum_address, Address};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::aggregator::{InteractionAggregator, KnownSendersBaseline, Summary};
use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use crate::observer::{NoopObserver, ScanObserver, SkippedBlock};
use crate::range::{compute_range, BlockRange};
use crate::scanner::{BlockOutcome, BlockRangeScanner};

/// Janela padrão, em blocos
pub const DEFAULT_WINDOW: u64 = 1000;

/// Indica se todos os blocos da janela foram observados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completeness {
    Complete,
    /// Leitura interrompida; o resumo cobre apenas os blocos emitidos
    Partial,
}

/// Resultado de uma leitura: resumo, blocos pulados e cobertura
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub target: Address,
    pub range: BlockRange,
    pub summary: Summary,
    pub skipped: Vec<SkippedBlock>,
    pub blocks_scanned: u64,
    pub completeness: Completeness,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ScanReport {
    pub fn is_partial(&self) -> bool {
        self.completeness == Completeness::Partial
    }

    /// Blocos lidos mais blocos pulados
    pub fn blocks_observed(&self) -> u64 {
        self.blocks_scanned + self.skipped.len() as u64
    }

    pub fn skipped_heights(&self) -> Vec<u64> {
        self.skipped.iter().map(|s| s.height).collect()
    }
}

/// Ponto de entrada: normaliza o alvo, calcula a janela, varre e agrega
pub struct Oracle<C: ?Sized> {
    client: Arc<C>,
    config: ScanConfig,
    observer: Arc<dyn ScanObserver>,
}

impl<C> Oracle<C>
where
    C: ChainClient + ?Sized + 'static,
{
    pub fn new(client: Arc<C>, config: ScanConfig) -> Self {
        Self {
            client,
            config,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub async fn run(
        &self,
        target_raw: &str,
        window: u64,
        baseline: &KnownSendersBaseline,
    ) -> Result<ScanReport> {
        self.run_with_cancellation(target_raw, window, baseline, CancellationToken::new())
            .await
    }

    /// Como [`run`](Self::run), mas interrompe a varredura quando `cancel` for
    /// acionado. O relatório resultante é marcado como [`Completeness::Partial`].
    pub async fn run_with_cancellation(
        &self,
        target_raw: &str,
        window: u64,
        baseline: &KnownSendersBaseline,
        cancel: CancellationToken,
    ) -> Result<ScanReport> {
        let target = self
            .client
            .normalize_address(target_raw)
            .map_err(ScanError::InvalidTarget)?;
        if window == 0 {
            return Err(ScanError::InvalidWindow);
        }

        let head = self.client.current_height().await.map_err(ScanError::Head)?;
        let range = compute_range(head, window)?;
        let started_at = Utc::now();
        info!(
            focus = %to_checksum_address(&target),
            start = range.start,
            end = range.end,
            window,
            "iniciando leitura da janela"
        );

        self.observer.on_scan_started(&range);

        let scanner = BlockRangeScanner::new(Arc::clone(&self.client), self.config.clone())
            .with_observer(Arc::clone(&self.observer))
            .with_cancellation(cancel);
        let mut blocks = scanner.scan_blocks(range, target);

        let mut aggregator = InteractionAggregator::new();
        let mut skipped = Vec::new();
        let mut blocks_scanned = 0u64;
        while let Some(outcome) = blocks.next().await {
            match outcome {
                BlockOutcome::Scanned { matches, .. } => {
                    blocks_scanned += 1;
                    aggregator.extend(matches);
                }
                BlockOutcome::Skipped(block) => skipped.push(block),
            }
        }

        let observed = blocks_scanned + skipped.len() as u64;
        let completeness = if observed < range.block_count() {
            warn!(observed, expected = range.block_count(), "leitura interrompida, resultado parcial");
            Completeness::Partial
        } else {
            Completeness::Complete
        };

        let summary = aggregator.finish(baseline);
        info!(
            total = summary.total_interactions,
            unique = summary.unique_count(),
            score = summary.foresight_score,
            skipped = skipped.len(),
            "leitura concluída"
        );

        Ok(ScanReport {
            target,
            range,
            summary,
            skipped,
            blocks_scanned,
            completeness,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

/// Executa uma leitura com a configuração padrão
pub async fn run<C>(
    client: Arc<C>,
    target_raw: &str,
    window: u64,
    baseline: &KnownSendersBaseline,
) -> Result<ScanReport>
where
    C: ChainClient + ?Sized + 'static,
{
    Oracle::new(client, ScanConfig::default())
        .run(target_raw, window, baseline)
        .await
}
