use thiserror::Error;

/// Erros comuns da biblioteca Omen
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Erro de comunicação com o node Ethereum
    #[error("Erro de RPC: {0}")]
    RpcError(String),
    
    /// Falha ao estabelecer a conexão com o node
    #[error("Erro de conexão: {0}")]
    ConnectionError(String),
    
    /// Erro de decodificação de dados
    #[error("Erro de decodificação: {0}")]
    DecodeError(String),
    
    /// Endereço em formato inválido
    #[error("Endereço inválido: {0}")]
    InvalidAddress(String),
    
    /// Erro de validação
    #[error("Erro de validação: {0}")]
    ValidationError(String),
    
    /// Erro de timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),
    
    /// Recurso não encontrado
    #[error("Não encontrado: {0}")]
    NotFound(String),
}

/// Tipo de resultado usado em toda a biblioteca
pub type Result<T> = std::result::Result<T, Error>;
