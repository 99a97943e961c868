use std::time::Duration;

/// Configuração da varredura de blocos
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Tempo máximo de espera por um bloco; ao expirar o bloco é pulado
    pub block_timeout: Duration,
    /// Requisições de bloco simultâneas (1 = sequencial)
    pub concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            block_timeout: Duration::from_secs(30),
            concurrency: 1,
        }
    }
}

impl ScanConfig {
    pub fn with_block_timeout(mut self, timeout: Duration) -> Self {
        self.block_timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}
