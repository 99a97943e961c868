use futures::{Stream, StreamExt};
use omen_core::Address;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::scanner::MatchedTransaction;

/// Remetentes já conhecidos de leituras anteriores.
///
/// Fornecido pelo chamador; a agregação nunca o altera nem o persiste.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnownSendersBaseline {
    senders: HashSet<Address>,
}

impl KnownSendersBaseline {
    /// Base vazia: todo remetente observado é considerado novo
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.senders.contains(address)
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.senders.iter()
    }
}

impl FromIterator<Address> for KnownSendersBaseline {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        Self {
            senders: iter.into_iter().collect(),
        }
    }
}

/// Resumo de interações de uma janela
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Transações ao alvo, incluindo remetentes repetidos
    pub total_interactions: u64,
    pub unique_senders: BTreeSet<Address>,
    /// `unique_senders` menos a base de conhecidos
    pub new_senders: BTreeSet<Address>,
    /// Percentual de remetentes novos, em `[0, 100]`
    pub foresight_score: f64,
}

impl Summary {
    pub fn unique_count(&self) -> usize {
        self.unique_senders.len()
    }

    pub fn new_count(&self) -> usize {
        self.new_senders.len()
    }
}

/// Percentual de remetentes novos; zero quando não há remetentes
pub fn foresight_score(new_senders: usize, unique_senders: usize) -> f64 {
    if unique_senders == 0 {
        return 0.0;
    }
    100.0 * new_senders as f64 / unique_senders as f64
}

/// Acumula total de interações e remetentes únicos de uma varredura.
///
/// Agregados parciais (um por worker) podem ser combinados com [`merge`](Self::merge).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionAggregator {
    total: u64,
    unique: BTreeSet<Address>,
}

impl InteractionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tx: &MatchedTransaction) {
        self.record_sender(tx.sender);
    }

    pub fn record_sender(&mut self, sender: Address) {
        self.total += 1;
        self.unique.insert(sender);
    }

    /// União dos remetentes e soma dos totais
    pub fn merge(&mut self, other: InteractionAggregator) {
        self.total += other.total;
        self.unique.extend(other.unique);
    }

    pub fn total_interactions(&self) -> u64 {
        self.total
    }

    pub fn unique_senders(&self) -> &BTreeSet<Address> {
        &self.unique
    }

    /// Fecha a agregação comparando os remetentes com a base de conhecidos
    pub fn finish(self, baseline: &KnownSendersBaseline) -> Summary {
        let new_senders: BTreeSet<Address> = self
            .unique
            .iter()
            .filter(|sender| !baseline.contains(sender))
            .copied()
            .collect();
        let foresight_score = foresight_score(new_senders.len(), self.unique.len());

        Summary {
            total_interactions: self.total,
            unique_senders: self.unique,
            new_senders,
            foresight_score,
        }
    }
}

impl Extend<MatchedTransaction> for InteractionAggregator {
    fn extend<I: IntoIterator<Item = MatchedTransaction>>(&mut self, iter: I) {
        for tx in iter {
            self.record(&tx);
        }
    }
}

/// Consome a sequência de transações uma única vez e produz o resumo
pub async fn aggregate<S>(transactions: S, baseline: &KnownSendersBaseline) -> Summary
where
    S: Stream<Item = MatchedTransaction>,
{
    transactions
        .fold(InteractionAggregator::new(), |mut aggregator, tx| async move {
            aggregator.record(&tx);
            aggregator
        })
        .await
        .finish(baseline)
}

/// Versão síncrona de [`aggregate`]
pub fn aggregate_iter<I>(transactions: I, baseline: &KnownSendersBaseline) -> Summary
where
    I: IntoIterator<Item = MatchedTransaction>,
{
    let mut aggregator = InteractionAggregator::new();
    aggregator.extend(transactions);
    aggregator.finish(baseline)
}
