/*!
 * Omen Types
 * 
 * Tipos comuns usados em toda a workspace Omen
 */

use serde::{Deserialize, Serialize};

pub use ethereum_types::{Address, H256};

/// Alias para hash de transação
pub type TransactionHash = H256;

/// Transação de nível superior, como lida de um bloco completo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedTransaction {
    pub hash: TransactionHash,
    pub block_number: u64,
    pub from: Address,
    /// `None` em transações de criação de contrato
    pub to: Option<Address>,
}

impl ObservedTransaction {
    /// Verifica se a transação foi enviada diretamente ao endereço informado.
    ///
    /// Criações de contrato (`to` ausente) nunca correspondem.
    pub fn is_sent_to(&self, target: &Address) -> bool {
        self.to.as_ref() == Some(target)
    }

    /// Verifica se a transação cria um contrato
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}

/// Bloco com os corpos das transações, na ordem nativa do bloco
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedBlock {
    pub number: u64,
    pub transactions: Vec<ObservedTransaction>,
}

impl ObservedBlock {
    pub fn new(number: u64, transactions: Vec<ObservedTransaction>) -> Self {
        Self { number, transactions }
    }

    /// Itera sobre as transações enviadas ao endereço alvo, preservando a ordem do bloco
    pub fn transactions_to<'a>(&'a self, target: &'a Address) -> impl Iterator<Item = &'a ObservedTransaction> + 'a {
        self.transactions.iter().filter(move |tx| tx.is_sent_to(target))
    }
}
