use std::future::Future;
use std::time::Duration;

use tokio::net::TcpStream;

/// Answers "is there an active, connected network"
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Connectivity: Send + Sync {
    async fn is_network_available(&self) -> bool;
}

/// Connectivity check that opens a TCP connection to a known host
///
/// Any resolution error, refused connection or timeout counts as offline.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
        }
    }

    /// Bounds `connect` by the probe timeout
    async fn check<F, T>(&self, connect: F) -> bool
    where
        F: Future<Output = std::io::Result<T>>,
    {
        match tokio::time::timeout(self.timeout, connect).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                tracing::debug!(addr = %self.addr, error = %e, "Connectivity probe failed");
                false
            }
            Err(_) => {
                tracing::debug!(
                    addr = %self.addr,
                    timeout = ?self.timeout,
                    "Connectivity probe timed out"
                );
                false
            }
        }
    }
}

#[async_trait::async_trait]
impl Connectivity for TcpProbe {
    async fn is_network_available(&self) -> bool {
        self.check(TcpStream::connect(&self.addr)).await
    }
}
