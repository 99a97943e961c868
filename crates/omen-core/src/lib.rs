/*!
 * Omen Core
 * 
 * Tipos, erros e a capacidade `ChainClient` compartilhados pela workspace Omen
 */

pub mod types;
pub mod traits;
pub mod utils;
pub mod error;

// Re-exportações públicas
pub use error::{Error, Result};
pub use traits::ChainClient;
pub use types::*;
