use crate::error::TcpDemoError;
use crate::tcp::config_socket::TcpSocketConfig;
use bytes::Bytes;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 9000;
/// Payload kept byte-for-byte compatible with the existing demo echo servers.
pub const DEFAULT_PAYLOAD: &str = "Hello from Java TCP";
pub const DEFAULT_READ_BUFFER_CAPACITY: usize = 1024;
/// Upper bound for the response buffer, allocated up front for every exchange.
pub const MAX_READ_BUFFER_CAPACITY: usize = 16 * 1024 * 1024; // 16 MiB

/// Configuration for the TCP demo client.
#[derive(Debug, Clone)]
pub struct TcpDemoClientConfig {
    /// Host name or IP address of the server.
    pub host: String,
    /// TCP port of the server.
    pub port: u16,
    /// Bytes sent to the server in a single write.
    pub payload: Bytes,
    /// Capacity of the buffer used for the single read.
    pub read_buffer_capacity: usize,
    /// Optional bound on establishing the connection, the OS default applies when `None`.
    pub connect_timeout: Option<Duration>,
    /// Optional bound on delivering the payload, the write may block indefinitely when `None`.
    pub write_timeout: Option<Duration>,
    /// Socket options applied before the exchange.
    pub socket_config: TcpSocketConfig,
}

impl Default for TcpDemoClientConfig {
    fn default() -> TcpDemoClientConfig {
        TcpDemoClientConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            payload: Bytes::from_static(DEFAULT_PAYLOAD.as_bytes()),
            read_buffer_capacity: DEFAULT_READ_BUFFER_CAPACITY,
            connect_timeout: None,
            write_timeout: None,
            socket_config: TcpSocketConfig::default(),
        }
    }
}

/// Formats `host:port`, wrapping IPv6 literals in brackets.
pub fn format_server_address(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

impl TcpDemoClientConfig {
    /// The `host:port` pair used in logs and errors.
    pub fn server_address(&self) -> String {
        format_server_address(&self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), TcpDemoError> {
        if self.host.trim().is_empty() {
            return Err(TcpDemoError::InvalidConfiguration(
                "server host cannot be empty".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(TcpDemoError::InvalidConfiguration(
                "server port must be in range 1..=65535".to_string(),
            ));
        }
        if self.read_buffer_capacity == 0 || self.read_buffer_capacity > MAX_READ_BUFFER_CAPACITY {
            return Err(TcpDemoError::InvalidConfiguration(format!(
                "read buffer capacity must be in range 1..={MAX_READ_BUFFER_CAPACITY}, got {}",
                self.read_buffer_capacity
            )));
        }
        if self.connect_timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(TcpDemoError::InvalidConfiguration(
                "connect timeout must be greater than zero".to_string(),
            ));
        }
        if self.write_timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(TcpDemoError::InvalidConfiguration(
                "write timeout must be greater than zero".to_string(),
            ));
        }
        self.socket_config
            .validate()
            .map_err(TcpDemoError::InvalidConfiguration)
    }
}
