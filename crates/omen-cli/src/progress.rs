use omen_scanner::{BlockRange, ScanObserver, SkippedBlock};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Registra o andamento da leitura a cada `every` blocos e ao fim da faixa
pub struct ProgressLogger {
    every: u64,
    total: AtomicU64,
    observed: AtomicU64,
    matches: AtomicU64,
}

impl ProgressLogger {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            total: AtomicU64::new(0),
            observed: AtomicU64::new(0),
            matches: AtomicU64::new(0),
        }
    }

    pub fn observed(&self) -> u64 {
        self.observed.load(Ordering::Relaxed)
    }

    fn is_due(&self, observed: u64) -> bool {
        observed % self.every == 0 || observed == self.total.load(Ordering::Relaxed)
    }

    fn tick(&self, height: u64) {
        let observed = self.observed.fetch_add(1, Ordering::Relaxed) + 1;
        if self.is_due(observed) {
            info!(
                height,
                observed,
                total = self.total.load(Ordering::Relaxed),
                matches = self.matches.load(Ordering::Relaxed),
                "progresso da leitura"
            );
        }
    }
}

impl ScanObserver for ProgressLogger {
    fn on_scan_started(&self, range: &BlockRange) {
        self.total.store(range.block_count(), Ordering::Relaxed);
    }

    fn on_block_scanned(&self, height: u64, matches: usize) {
        self.matches.fetch_add(matches as u64, Ordering::Relaxed);
        self.tick(height);
    }

    fn on_block_skipped(&self, skipped: &SkippedBlock) {
        self.tick(skipped.height);
    }
}
