use crate::tcp::config_socket::SocketOption;
use std::io;
use std::time::Duration;
use strum::IntoStaticStr;
use thiserror::Error;

/// Errors surfaced by the TCP demo client.
///
/// Every variant maps to a stable numeric code (see [`TcpDemoError::as_code`])
/// and a snake_case name (see [`TcpDemoError::as_string`]).
#[derive(Debug, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum TcpDemoError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Cannot establish connection to {address}: {source}")]
    CannotEstablishConnection {
        address: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to set socket option {option} to {value}: {source}")]
    SocketConfig {
        option: SocketOption,
        value: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write {length} bytes to the TCP connection: {source}")]
    WriteFailed {
        length: usize,
        #[source]
        source: io::Error,
    },
    #[error("Timed out writing to the TCP connection after {timeout:?}")]
    WriteTimeout { timeout: Duration },
    #[error("Timed out waiting for server response after {timeout:?}")]
    ReadTimeout { timeout: Duration },
    #[error("Failed to read from the TCP connection: {source}")]
    ReadFailed {
        #[source]
        source: io::Error,
    },
    #[error("Failed to shutdown the TCP connection: {source}")]
    ShutdownFailed {
        #[source]
        source: io::Error,
    },
}

impl TcpDemoError {
    pub fn as_code(&self) -> u32 {
        match self {
            TcpDemoError::InvalidConfiguration(_) => 1,
            TcpDemoError::CannotEstablishConnection { .. } => 10,
            TcpDemoError::SocketConfig { .. } => 20,
            TcpDemoError::WriteFailed { .. } => 30,
            TcpDemoError::WriteTimeout { .. } => 31,
            TcpDemoError::ReadTimeout { .. } => 40,
            TcpDemoError::ReadFailed { .. } => 41,
            TcpDemoError::ShutdownFailed { .. } => 50,
        }
    }

    pub fn as_string(&self) -> &'static str {
        self.into()
    }

    /// Returns true when the failure happened before any byte was exchanged
    /// with the server.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, TcpDemoError::CannotEstablishConnection { .. })
    }
}
