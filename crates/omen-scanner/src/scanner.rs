use futures::stream::{self, BoxStream, StreamExt};
use omen_core::{
    error::Error,
    traits::ChainClient,
    utils::to_checksum_address,
    Address, TransactionHash,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::ScanConfig;
use crate::observer::{NoopObserver, ScanObserver, SkippedBlock};
use crate::range::BlockRange;

/// Transação enviada ao endereço alvo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedTransaction {
    pub sender: Address,
    pub block_number: u64,
    pub hash: TransactionHash,
}

/// Resultado da leitura de um bloco
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    Scanned {
        height: u64,
        matches: Vec<MatchedTransaction>,
    },
    Skipped(SkippedBlock),
}

impl BlockOutcome {
    pub fn height(&self) -> u64 {
        match self {
            BlockOutcome::Scanned { height, .. } => *height,
            BlockOutcome::Skipped(skipped) => skipped.height,
        }
    }

    /// Transações ao alvo; vazio para blocos pulados
    pub fn into_matches(self) -> Vec<MatchedTransaction> {
        match self {
            BlockOutcome::Scanned { matches, .. } => matches,
            BlockOutcome::Skipped(_) => Vec::new(),
        }
    }
}

/// Percorre uma faixa de blocos e emite as transações enviadas ao alvo.
///
/// Cada chamada a [`scan`](Self::scan) ou [`scan_blocks`](Self::scan_blocks)
/// refaz todas as requisições. A emissão é sempre em ordem crescente de
/// altura, mesmo com `concurrency > 1`; falhas de um bloco viram
/// [`SkippedBlock`] e não interrompem a varredura.
pub struct BlockRangeScanner<C: ?Sized> {
    client: Arc<C>,
    config: ScanConfig,
    observer: Arc<dyn ScanObserver>,
    cancel: CancellationToken,
}

impl<C> BlockRangeScanner<C>
where
    C: ChainClient + ?Sized + 'static,
{
    pub fn new(client: Arc<C>, config: ScanConfig) -> Self {
        Self {
            client,
            config,
            observer: Arc::new(NoopObserver),
            cancel: CancellationToken::new(),
        }
    }

    /// Define o observador de progresso e falhas
    pub fn with_observer(mut self, observer: Arc<dyn ScanObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Interrompe a emissão quando o token for cancelado
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Emite um [`BlockOutcome`] por bloco, em ordem crescente de altura.
    ///
    /// Até `concurrency` blocos ficam em voo; os resultados são reordenados
    /// antes da emissão. Após o cancelamento nenhum outro bloco é emitido e as
    /// requisições pendentes são abandonadas.
    pub fn scan_blocks(&self, range: BlockRange, target: Address) -> BoxStream<'static, BlockOutcome> {
        let client = Arc::clone(&self.client);
        let observer = Arc::clone(&self.observer);
        let block_timeout = self.config.block_timeout;

        stream::iter(range.heights())
            .map(move |height| {
                let client = Arc::clone(&client);
                async move { read_block(&*client, height, &target, block_timeout).await }
            })
            .buffered(self.config.concurrency.max(1))
            .take_until(self.cancel.clone().cancelled_owned())
            .inspect(move |outcome| report(&*observer, outcome))
            .boxed()
    }

    /// Sequência preguiçosa das transações enviadas ao alvo
    pub fn scan(&self, range: BlockRange, target: Address) -> BoxStream<'static, MatchedTransaction> {
        self.scan_blocks(range, target)
            .flat_map(|outcome| stream::iter(outcome.into_matches()))
            .boxed()
    }
}

async fn read_block<C>(client: &C, height: u64, target: &Address, block_timeout: Duration) -> BlockOutcome
where
    C: ChainClient + ?Sized,
{
    let result = match tokio::time::timeout(block_timeout, client.get_block_with_transactions(height)).await {
        Ok(result) => result,
        Err(_) => Err(Error::TimeoutError(format!("bloco {} excedeu {:?}", height, block_timeout))),
    };

    match result {
        Ok(block) => {
            let matches = block
                .transactions_to(target)
                .map(|tx| MatchedTransaction {
                    sender: tx.from,
                    block_number: height,
                    hash: tx.hash,
                })
                .collect();
            BlockOutcome::Scanned { height, matches }
        }
        Err(e) => BlockOutcome::Skipped(SkippedBlock {
            height,
            reason: e.to_string(),
        }),
    }
}

fn report(observer: &dyn ScanObserver, outcome: &BlockOutcome) {
    match outcome {
        BlockOutcome::Scanned { height, matches } => {
            if !matches.is_empty() {
                debug!(
                    height,
                    matches = matches.len(),
                    first_sender = %to_checksum_address(&matches[0].sender),
                    "interações encontradas"
                );
            }
            observer.on_block_scanned(*height, matches.len());
        }
        BlockOutcome::Skipped(skipped) => {
            warn!(height = skipped.height, reason = %skipped.reason, "interferência ao ler bloco, pulando");
            observer.on_block_skipped(skipped);
        }
    }
}
