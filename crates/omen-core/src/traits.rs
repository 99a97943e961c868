/*!
 * Omen Traits
 * 
 * Capacidade de acesso à chain consumida pelo scanner
 */

use async_trait::async_trait;
use crate::error::Result;
use crate::types::{Address, ObservedBlock};
use crate::utils;

/// Cliente de chain usado pelo scanner.
///
/// O scanner depende apenas desta superfície, nunca de um protocolo de rede específico.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Obtém a altura atual da chain
    async fn current_height(&self) -> Result<u64>;

    /// Obtém um bloco com os corpos completos das transações
    async fn get_block_with_transactions(&self, height: u64) -> Result<ObservedBlock>;

    /// Normaliza um endereço textual para sua forma canônica
    fn normalize_address(&self, raw: &str) -> Result<Address> {
        utils::normalize_address(raw)
    }
}

#[async_trait]
impl<C: ChainClient + ?Sized> ChainClient for std::sync::Arc<C> {
    async fn current_height(&self) -> Result<u64> {
        (**self).current_height().await
    }

    async fn get_block_with_transactions(&self, height: u64) -> Result<ObservedBlock> {
        (**self).get_block_with_transactions(height).await
    }

    fn normalize_address(&self, raw: &str) -> Result<Address> {
        (**self).normalize_address(raw)
    }
}
