#![allow(dead_code)]

use async_trait::async_trait;
use omen_core::{
    error::{Error, Result},
    traits::ChainClient,
    Address, ObservedBlock, ObservedTransaction, H256,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Chain em memória com falhas e atrasos configuráveis por altura
#[derive(Default)]
pub struct MockChain {
    pub head: u64,
    pub blocks: HashMap<u64, Vec<ObservedTransaction>>,
    pub failing: HashSet<u64>,
    pub delays: HashMap<u64, Duration>,
    /// Alturas que nunca respondem
    pub hanging: HashSet<u64>,
    pub block_calls: Arc<AtomicUsize>,
    pub head_calls: Arc<AtomicUsize>,
}

impl MockChain {
    pub fn with_head(head: u64) -> Self {
        Self { head, ..Default::default() }
    }

    pub fn push_tx(&mut self, height: u64, from: Address, to: Option<Address>) {
        let txs = self.blocks.entry(height).or_default();
        let idx = txs.len() as u64;
        txs.push(ObservedTransaction {
            hash: H256::from_low_u64_be(height * 1_000 + idx),
            block_number: height,
            from,
            to,
        });
    }

    pub fn fail_at(mut self, height: u64) -> Self {
        self.failing.insert(height);
        self
    }

    pub fn delay_at(mut self, height: u64, delay: Duration) -> Self {
        self.delays.insert(height, delay);
        self
    }

    pub fn hang_at(mut self, height: u64) -> Self {
        self.hanging.insert(height);
        self
    }

    pub fn calls(&self) -> usize {
        self.block_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn current_height(&self) -> Result<u64> {
        self.head_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.head)
    }

    async fn get_block_with_transactions(&self, height: u64) -> Result<ObservedBlock> {
        self.block_calls.fetch_add(1, Ordering::SeqCst);
        if self.hanging.contains(&height) {
            futures::future::pending::<()>().await;
        }
        if let Some(delay) = self.delays.get(&height) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&height) {
            return Err(Error::RpcError(format!("bloco {} indisponível", height)));
        }
        let transactions = self.blocks.get(&height).cloned().unwrap_or_default();
        Ok(ObservedBlock::new(height, transactions))
    }
}

pub fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

/// Alvo usado nos testes, em grafia minúscula
pub const TARGET_RAW: &str = "0xabcabcabcabcabcabcabcabcabcabcabcabcabca";

pub fn target() -> Address {
    omen_core::utils::normalize_address(TARGET_RAW).unwrap()
}
