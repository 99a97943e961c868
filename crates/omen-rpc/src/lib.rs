/*!
 * Omen RPC
 *
 * Cliente JSON-RPC que implementa `ChainClient` sobre nodes Ethereum
 */

use async_trait::async_trait;
use omen_core::{
    error::{Error, Result},
    traits::ChainClient,
    Address, ObservedBlock, ObservedTransaction, H256,
};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};
use web3::{
    transports::{Http, WebSocket},
    types::{Block, BlockId, BlockNumber, Transaction, U64},
    Web3,
};

/// Valor de exemplo que não deve ser aceito como chave da Infura
pub const INFURA_PLACEHOLDER: &str = "YOUR_INFURA_PROJECT_ID_HERE";

/// Configuração do cliente RPC
#[derive(Debug, Clone)]
pub struct RpcConfig {
    pub endpoint: String,
    /// Tempo máximo de cada chamada individual
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8545".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
        }
    }
}

impl RpcConfig {
    /// Cria uma configuração para o endpoint informado
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Configuração para a mainnet via Infura
    pub fn infura(project_id: &str) -> Result<Self> {
        let project_id = project_id.trim();
        if project_id.is_empty() || project_id == INFURA_PLACEHOLDER {
            return Err(Error::ValidationError(
                "chave de projeto da Infura ausente ou não configurada".to_string(),
            ));
        }
        Ok(Self::new(format!("https://mainnet.infura.io/v3/{}", project_id)))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    /// Tempo total que uma requisição pode levar somando todas as tentativas e
    /// as esperas entre elas. Um limite externo menor que este corta as novas tentativas.
    pub fn attempt_budget(&self) -> Duration {
        self.timeout * (self.max_retries + 1) + self.retry_delay * self.max_retries
    }
}

/// Enum para diferentes tipos de transporte
pub enum TransportType {
    Http(Web3<Http>),
    WebSocket(Web3<WebSocket>),
}

/// Cliente de chain sobre JSON-RPC
pub struct Web3ChainClient {
    transport: TransportType,
    config: RpcConfig,
}

impl Web3ChainClient {
    /// Cria um novo cliente RPC HTTP
    pub async fn new_http(config: RpcConfig) -> Result<Self> {
        let transport = Http::new(&config.endpoint)
            .map_err(|e| Error::ConnectionError(format!("Falha ao conectar via HTTP: {}", e)))?;

        let client = Self {
            transport: TransportType::Http(Web3::new(transport)),
            config,
        };
        client.verify_connection().await?;
        Ok(client)
    }

    /// Cria um novo cliente RPC WebSocket
    pub async fn new_websocket(config: RpcConfig) -> Result<Self> {
        let transport = WebSocket::new(&config.endpoint)
            .await
            .map_err(|e| Error::ConnectionError(format!("Falha ao conectar via WebSocket: {}", e)))?;

        let client = Self {
            transport: TransportType::WebSocket(Web3::new(transport)),
            config,
        };
        client.verify_connection().await?;
        Ok(client)
    }

    /// Cria um novo cliente baseado na URL
    pub async fn connect(config: RpcConfig) -> Result<Self> {
        if config.endpoint.starts_with("ws") {
            Self::new_websocket(config).await
        } else {
            Self::new_http(config).await
        }
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    async fn verify_connection(&self) -> Result<()> {
        let height = tokio::time::timeout(self.config.timeout, self.fetch_block_number())
            .await
            .map_err(|_| Error::ConnectionError("O node não respondeu a tempo".to_string()))?
            .map_err(|e| Error::ConnectionError(format!("Falha ao conectar ao node Ethereum: {}", e)))?;
        debug!(height, "conexão com o node verificada");
        Ok(())
    }

    async fn fetch_block_number(&self) -> Result<u64> {
        let block_number = match &self.transport {
            TransportType::Http(web3) => {
                web3.eth().block_number()
                    .await
                    .map_err(|e| Error::RpcError(format!("Falha ao obter número do bloco: {}", e)))?
            },
            TransportType::WebSocket(web3) => {
                web3.eth().block_number()
                    .await
                    .map_err(|e| Error::RpcError(format!("Falha ao obter número do bloco: {}", e)))?
            }
        };

        Ok(block_number.as_u64())
    }

    async fn fetch_block(&self, height: u64) -> Result<ObservedBlock> {
        let id = BlockId::Number(BlockNumber::Number(U64::from(height)));
        let block = match &self.transport {
            TransportType::Http(web3) => {
                web3.eth().block_with_txs(id)
                    .await
                    .map_err(|e| Error::RpcError(format!("Falha ao obter bloco {}: {}", height, e)))?
            },
            TransportType::WebSocket(web3) => {
                web3.eth().block_with_txs(id)
                    .await
                    .map_err(|e| Error::RpcError(format!("Falha ao obter bloco {}: {}", height, e)))?
            }
        };

        let block = block.ok_or_else(|| Error::NotFound(format!("Bloco {} não encontrado", height)))?;
        convert_block(height, block)
    }

    /// Executa a operação com timeout por tentativa e novas tentativas com atraso fixo.
    ///
    /// `NotFound` não é repetido: o node respondeu, apenas não tem o dado.
    async fn with_retries<T, F, Fut>(&self, what: &str, op: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            let err = match tokio::time::timeout(self.config.timeout, op()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e @ Error::NotFound(_))) => return Err(e),
                Ok(Err(e)) => e,
                Err(_) => Error::TimeoutError(format!("{} excedeu {:?}", what, self.config.timeout)),
            };

            if attempt >= self.config.max_retries {
                return Err(err);
            }
            attempt += 1;
            warn!(attempt, max = self.config.max_retries, error = %err, "{} falhou, tentando novamente", what);
            tokio::time::sleep(self.config.retry_delay).await;
        }
    }
}

/// Converte o bloco do web3 no formato consumido pelo scanner
fn convert_block(height: u64, block: Block<Transaction>) -> Result<ObservedBlock> {
    let transactions = block
        .transactions
        .into_iter()
        .map(|tx| {
            let from = tx.from.ok_or_else(|| {
                Error::DecodeError(format!("Transação 0x{:x} sem remetente no bloco {}", tx.hash, height))
            })?;
            Ok(ObservedTransaction {
                hash: H256::from_slice(tx.hash.as_bytes()),
                block_number: height,
                from: Address::from_slice(from.as_bytes()),
                to: tx.to.map(|to| Address::from_slice(to.as_bytes())),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ObservedBlock::new(height, transactions))
}

#[async_trait]
impl ChainClient for Web3ChainClient {
    async fn current_height(&self) -> Result<u64> {
        self.with_retries("eth_blockNumber", || self.fetch_block_number()).await
    }

    async fn get_block_with_transactions(&self, height: u64) -> Result<ObservedBlock> {
        self.with_retries("eth_getBlockByNumber", || self.fetch_block(height)).await
    }
}
