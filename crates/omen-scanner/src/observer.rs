use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::range::BlockRange;

/// Bloco cuja leitura falhou e foi pulado
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedBlock {
    pub height: u64,
    pub reason: String,
}

/// Canal lateral de progresso e falhas da varredura.
///
/// As chamadas seguem a ordem de emissão dos blocos.
pub trait ScanObserver: Send + Sync {
    /// Faixa efetivamente lida, já limitada ao bloco gênesis
    fn on_scan_started(&self, _range: &BlockRange) {}

    /// Bloco lido com sucesso, com a quantidade de transações ao alvo
    fn on_block_scanned(&self, _height: u64, _matches: usize) {}

    /// Bloco pulado por falha de leitura
    fn on_block_skipped(&self, _skipped: &SkippedBlock) {}
}

/// Observador que ignora todos os eventos
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// Coleta os blocos pulados
#[derive(Debug, Default)]
pub struct SkipLog {
    skipped: Mutex<Vec<SkippedBlock>>,
}

impl SkipLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cópia dos blocos pulados até o momento
    pub fn snapshot(&self) -> Vec<SkippedBlock> {
        self.skipped.lock().clone()
    }

    pub fn heights(&self) -> Vec<u64> {
        self.skipped.lock().iter().map(|s| s.height).collect()
    }

    pub fn len(&self) -> usize {
        self.skipped.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.skipped.lock().is_empty()
    }
}

impl ScanObserver for SkipLog {
    fn on_block_skipped(&self, skipped: &SkippedBlock) {
        self.skipped.lock().push(skipped.clone());
    }
}
