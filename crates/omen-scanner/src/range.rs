use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{Result, ScanError};

/// Intervalo fechado de alturas `[start, end]`, com `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRange {
    pub start: u64,
    pub end: u64,
}

impl BlockRange {
    /// Retorna `None` quando `start > end`
    pub fn new(start: u64, end: u64) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Quantidade de blocos no intervalo
    pub fn block_count(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Alturas em ordem crescente
    pub fn heights(&self) -> RangeInclusive<u64> {
        self.start..=self.end
    }

    pub fn contains(&self, height: u64) -> bool {
        self.heights().contains(&height)
    }
}

impl fmt::Display for BlockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Calcula a janela que termina na altura `head`.
///
/// Janelas maiores que a própria chain começam no bloco 0.
pub fn compute_range(head: u64, window: u64) -> Result<BlockRange> {
    if window == 0 {
        return Err(ScanError::InvalidWindow);
    }
    Ok(BlockRange {
        start: head.saturating_sub(window - 1),
        end: head,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_ends_at_head() {
        let range = compute_range(5000, 1000).unwrap();
        assert_eq!(range, BlockRange { start: 4001, end: 5000 });
        assert_eq!(range.block_count(), 1000);
    }

    #[test]
    fn window_larger_than_chain_is_clamped() {
        assert_eq!(compute_range(500, 1000).unwrap(), BlockRange { start: 0, end: 500 });
        assert_eq!(compute_range(0, 1).unwrap(), BlockRange { start: 0, end: 0 });
        assert_eq!(compute_range(0, u64::MAX).unwrap(), BlockRange { start: 0, end: 0 });
    }

    #[test]
    fn exact_fit_starts_at_genesis() {
        assert_eq!(compute_range(999, 1000).unwrap(), BlockRange { start: 0, end: 999 });
    }

    #[test]
    fn single_block_window() {
        let range = compute_range(100, 1).unwrap();
        assert_eq!(range, BlockRange { start: 100, end: 100 });
        assert_eq!(range.heights().collect::<Vec<_>>(), vec![100]);
    }

    #[test]
    fn zero_window_is_rejected() {
        assert!(matches!(compute_range(100, 0), Err(ScanError::InvalidWindow)));
    }

    #[test]
    fn new_enforces_ordering() {
        assert!(BlockRange::new(5, 4).is_none());
        let range = BlockRange::new(4, 5).unwrap();
        assert!(range.contains(4) && range.contains(5) && !range.contains(6));
        assert_eq!(range.to_string(), "4..=5");
    }
}
