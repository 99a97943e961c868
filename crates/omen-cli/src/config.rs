use anyhow::{bail, Context, Result};
use clap::Parser;
use omen_core::utils::normalize_address;
use omen_rpc::RpcConfig;
use omen_scanner::{KnownSendersBaseline, ScanConfig, DEFAULT_WINDOW};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "omen",
    author,
    version,
    about = "Lê os sinais on-chain de um endereço e calcula o índice de previsão"
)]
pub struct Args {
    /// Endereço (contrato) observado
    pub focus: String,

    /// Janela em blocos, terminando no bloco atual
    #[arg(short, long, default_value_t = DEFAULT_WINDOW, value_parser = clap::value_parser!(u64).range(1..))]
    pub window: u64,

    /// Endpoint JSON-RPC (http, https, ws ou wss)
    #[arg(long, env = "OMEN_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Chave de projeto da Infura, usada quando nenhum endpoint é informado
    #[arg(long, env = "INFURA_PROJECT_ID", hide_env_values = true)]
    pub infura_project_id: Option<String>,

    /// Requisições de bloco simultâneas
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Tempo máximo de cada tentativa RPC, em milissegundos
    #[arg(long, default_value_t = 10_000)]
    pub rpc_timeout_ms: u64,

    /// Tempo máximo por bloco, em milissegundos.
    /// Por padrão cobre todas as tentativas RPC do bloco.
    #[arg(long)]
    pub block_timeout_ms: Option<u64>,

    /// Novas tentativas por requisição RPC
    #[arg(long, default_value_t = 3)]
    pub max_retries: u32,

    /// Arquivo JSON com a lista de remetentes já conhecidos
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    /// Imprime o relatório em JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn rpc_config(&self) -> Result<RpcConfig> {
        let config = match (&self.rpc_url, &self.infura_project_id) {
            (Some(url), _) => RpcConfig::new(url.clone()),
            (None, Some(project_id)) => RpcConfig::infura(project_id)?,
            (None, None) => bail!(
                "nenhum endpoint configurado: informe --rpc-url (OMEN_RPC_URL) ou --infura-project-id (INFURA_PROJECT_ID)"
            ),
        };
        let retry_delay = config.retry_delay;
        Ok(config
            .with_timeout(Duration::from_millis(self.rpc_timeout_ms))
            .with_retries(self.max_retries, retry_delay))
    }

    pub fn scan_config(&self, rpc: &RpcConfig) -> ScanConfig {
        let block_timeout = self
            .block_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| rpc.attempt_budget());
        ScanConfig::default()
            .with_block_timeout(block_timeout)
            .with_concurrency(self.concurrency)
    }
}

/// Lê a base de remetentes conhecidos: um array JSON de endereços
pub fn load_baseline(path: &Path) -> Result<KnownSendersBaseline> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("falha ao ler a base de conhecidos em {}", path.display()))?;
    let entries: Vec<String> = serde_json::from_str(&raw)
        .with_context(|| format!("{} não contém um array JSON de endereços", path.display()))?;

    entries
        .iter()
        .map(|entry| {
            normalize_address(entry).with_context(|| format!("endereço inválido na base: {}", entry))
        })
        .collect()
}
