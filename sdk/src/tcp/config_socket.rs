use std::time::Duration;
use strum::{Display, EnumString};

/// Default size of the socket send buffer hint (SO_SNDBUF), 8 KB.
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 8 * 1024;
/// Default size of the socket receive buffer hint (SO_RCVBUF), 8 KB.
pub const DEFAULT_RECEIVE_BUFFER_SIZE: usize = 8 * 1024;
/// Default bound on the blocking read, 5000 ms.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(5000);

/// Largest buffer hint the socket API accepts, the kernel takes a C int.
pub const MAX_SOCKET_BUFFER_SIZE: usize = i32::MAX as usize;

const BALANCED_BUFFER_SIZE: usize = 4 * 1024 * 1024; // 4 MB
const THROUGHPUT_BUFFER_SIZE: usize = 8 * 1024 * 1024; // 8 MB

/// The socket options applied to every connection, used for logging and errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum SocketOption {
    #[strum(serialize = "TCP_NODELAY")]
    NoDelay,
    #[strum(serialize = "SO_SNDBUF")]
    SendBufferSize,
    #[strum(serialize = "SO_RCVBUF")]
    ReceiveBufferSize,
    /// Enforced by the client around each read, not a kernel option.
    #[strum(serialize = "read_timeout")]
    ReadTimeout,
}

/// Socket optimization profile for different workload types
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum SocketOptimizationProfile {
    /// Optimize for lowest latency (small buffers, Nagle's algorithm disabled)
    #[default]
    LowestLatency,
    /// Balance between latency and throughput
    Balanced,
    /// Optimize for highest throughput (larger buffers, packet coalescing allowed)
    HighestThroughput,
}

/// TCP socket options applied right after the connection is established.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TcpSocketConfig {
    /// Enable/disable TCP_NODELAY to disable Nagle's algorithm
    /// Default: true (enabled) so small writes leave immediately
    pub nodelay: bool,

    /// Size of the socket send buffer in bytes (SO_SNDBUF)
    /// Default: 8 KB
    pub send_buffer_size: usize,

    /// Size of the socket receive buffer in bytes (SO_RCVBUF)
    /// Default: 8 KB
    pub receive_buffer_size: usize,

    /// Upper bound for a single read from the socket
    /// Default: 5000 ms
    pub read_timeout: Duration,
}

impl TcpSocketConfig {
    pub fn new(
        nodelay: bool,
        send_buffer_size: usize,
        receive_buffer_size: usize,
        read_timeout: Duration,
    ) -> Self {
        Self {
            nodelay,
            send_buffer_size,
            receive_buffer_size,
            read_timeout,
        }
    }

    /// Create a new configuration optimized for lowest latency
    pub fn for_lowest_latency() -> Self {
        Self::default()
    }

    /// Create a new configuration balancing latency and throughput
    pub fn balanced() -> Self {
        Self {
            send_buffer_size: BALANCED_BUFFER_SIZE,
            receive_buffer_size: BALANCED_BUFFER_SIZE,
            ..Self::default()
        }
    }

    /// Create a new configuration optimized for highest throughput
    pub fn for_highest_throughput() -> Self {
        Self {
            // Enable Nagle's algorithm for better packet coalescing
            nodelay: false,
            send_buffer_size: THROUGHPUT_BUFFER_SIZE,
            receive_buffer_size: THROUGHPUT_BUFFER_SIZE,
            ..Self::default()
        }
    }

    pub fn from_profile(profile: SocketOptimizationProfile) -> Self {
        match profile {
            SocketOptimizationProfile::LowestLatency => Self::for_lowest_latency(),
            SocketOptimizationProfile::Balanced => Self::balanced(),
            SocketOptimizationProfile::HighestThroughput => Self::for_highest_throughput(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.send_buffer_size == 0 || self.send_buffer_size > MAX_SOCKET_BUFFER_SIZE {
            return Err(format!(
                "send buffer size must be in range 1..={MAX_SOCKET_BUFFER_SIZE}, got {}",
                self.send_buffer_size
            ));
        }
        if self.receive_buffer_size == 0 || self.receive_buffer_size > MAX_SOCKET_BUFFER_SIZE {
            return Err(format!(
                "receive buffer size must be in range 1..={MAX_SOCKET_BUFFER_SIZE}, got {}",
                self.receive_buffer_size
            ));
        }
        if self.read_timeout.is_zero() {
            return Err("read timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl Default for TcpSocketConfig {
    fn default() -> Self {
        Self {
            nodelay: true,
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            receive_buffer_size: DEFAULT_RECEIVE_BUFFER_SIZE,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}
