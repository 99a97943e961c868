use thiserror::Error;

/// Erros que interrompem uma leitura antes do início da varredura
#[derive(Debug, Error)]
pub enum ScanError {
    /// Endereço alvo não pôde ser normalizado
    #[error("alvo inválido: {0}")]
    InvalidTarget(#[source] omen_core::Error),

    /// Janela de zero blocos
    #[error("janela inválida: deve conter ao menos um bloco")]
    InvalidWindow,

    /// Altura atual da chain indisponível
    #[error("falha ao obter a altura atual da chain: {0}")]
    Head(#[source] omen_core::Error),
}

/// Resultado padrão da crate
pub type Result<T> = std::result::Result<T, ScanError>;
