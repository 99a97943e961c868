/*!
 * Omen Scanner
 *
 * Lê uma janela de blocos recentes, filtra as transações enviadas a um
 * endereço alvo e agrega remetentes únicos no resumo final.
 */

mod aggregator;
mod config;
mod error;
mod observer;
mod oracle;
mod range;
mod scanner;

pub use aggregator::*;
pub use config::*;
pub use error::*;
pub use observer::*;
pub use oracle::*;
pub use range::*;
pub use scanner::*;

pub use tokio_util::sync::CancellationToken;
