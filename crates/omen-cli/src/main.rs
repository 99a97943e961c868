/*!
 * Omen CLI
 *
 * Lê a janela de blocos recentes de um endereço e imprime o índice de
 * previsão com o veredito correspondente.
 */

mod config;
mod progress;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use omen_rpc::Web3ChainClient;
use omen_scanner::{CancellationToken, KnownSendersBaseline, Oracle};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{load_baseline, Args};
use crate::progress::ProgressLogger;
use crate::render::render_report;

/// Intervalo, em blocos, entre mensagens de progresso
const PROGRESS_EVERY: u64 = 100;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let rpc_config = args.rpc_config()?;
    let scan_config = args.scan_config(&rpc_config);
    let baseline = match &args.baseline {
        Some(path) => load_baseline(path)?,
        None => KnownSendersBaseline::empty(),
    };
    info!(known = baseline.len(), "base de remetentes conhecidos carregada");

    let client = Web3ChainClient::connect(rpc_config)
        .await
        .context("não foi possível conectar ao node Ethereum")?;
    info!("conectado ao node Ethereum");

    let cancel = CancellationToken::new();
    watch_ctrl_c(cancel.clone());

    let oracle = Oracle::new(Arc::new(client), scan_config)
        .with_observer(Arc::new(ProgressLogger::new(PROGRESS_EVERY)));
    let report = oracle
        .run_with_cancellation(&args.focus, args.window, &baseline, cancel)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report)?);
    }
    Ok(())
}

/// Logs vão para stderr; stdout fica reservado ao relatório
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn watch_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupção recebida, encerrando a leitura");
            cancel.cancel();
        }
    });
}
