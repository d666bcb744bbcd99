use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tcpdemo::tcp::config_socket::{SocketOptimizationProfile, TcpSocketConfig};
use tcpdemo::{TcpDemoClient, TcpDemoClientConfig};

#[derive(Debug, Clone)]
pub struct TcpClientFactory {
    pub server_addr: SocketAddr,
    pub profile: SocketOptimizationProfile,
    pub read_timeout: Option<Duration>,
}

impl TcpClientFactory {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self {
            server_addr,
            profile: SocketOptimizationProfile::default(),
            read_timeout: None,
        }
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = Some(read_timeout);
        self
    }

    pub fn with_profile(mut self, profile: SocketOptimizationProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn create_client(&self) -> TcpDemoClient {
        let mut socket_config = TcpSocketConfig::from_profile(self.profile);
        if let Some(read_timeout) = self.read_timeout {
            socket_config.read_timeout = read_timeout;
        }

        let config = TcpDemoClientConfig {
            host: self.server_addr.ip().to_string(),
            port: self.server_addr.port(),
            socket_config,
            ..TcpDemoClientConfig::default()
        };

        TcpDemoClient::create(Arc::new(config)).unwrap_or_else(|e| {
            panic!(
                "Failed to create TcpDemoClient for server address {}, error: {:?}",
                self.server_addr, e
            )
        })
    }
}
