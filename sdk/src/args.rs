use crate::tcp::config_client::{
    TcpDemoClientConfig, DEFAULT_HOST, DEFAULT_PAYLOAD, DEFAULT_PORT, DEFAULT_READ_BUFFER_CAPACITY,
};
use crate::tcp::config_socket::{SocketOptimizationProfile, TcpSocketConfig};
use byte_unit::Byte;
use bytes::Bytes;
use std::str::FromStr;
use std::time::Duration;

/// Command line arguments describing the server and the socket tuning.
#[derive(Debug, Clone, clap::Args)]
pub struct ClientArgs {
    /// The server host name or IP address
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// The server TCP port
    #[arg(long, default_value_t = DEFAULT_PORT, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// The message sent to the server
    #[arg(long, default_value = DEFAULT_PAYLOAD)]
    pub message: String,

    /// Socket tuning profile: lowest-latency, balanced or highest-throughput
    #[arg(long, default_value_t = SocketOptimizationProfile::LowestLatency)]
    pub profile: SocketOptimizationProfile,

    /// Override TCP_NODELAY from the profile
    #[arg(long)]
    pub nodelay: Option<bool>,

    /// Override SO_SNDBUF from the profile, e.g. "8192" or "8KiB"
    #[arg(long, value_parser = parse_byte_size)]
    pub send_buffer_size: Option<usize>,

    /// Override SO_RCVBUF from the profile, e.g. "8192" or "8KiB"
    #[arg(long, value_parser = parse_byte_size)]
    pub receive_buffer_size: Option<usize>,

    /// Override the read timeout from the profile, e.g. "5s" or "5000ms"
    #[arg(long, value_parser = humantime::parse_duration)]
    pub read_timeout: Option<Duration>,

    /// Bound on establishing the connection, e.g. "3s"
    #[arg(long, value_parser = humantime::parse_duration)]
    pub connect_timeout: Option<Duration>,

    /// Bound on delivering the message, e.g. "2s"
    #[arg(long, value_parser = humantime::parse_duration)]
    pub write_timeout: Option<Duration>,

    /// Capacity of the response buffer
    #[arg(long, default_value_t = DEFAULT_READ_BUFFER_CAPACITY, value_parser = parse_byte_size)]
    pub read_buffer_capacity: usize,
}

impl From<ClientArgs> for TcpDemoClientConfig {
    fn from(args: ClientArgs) -> Self {
        let mut socket_config = TcpSocketConfig::from_profile(args.profile);
        if let Some(nodelay) = args.nodelay {
            socket_config.nodelay = nodelay;
        }
        if let Some(send_buffer_size) = args.send_buffer_size {
            socket_config.send_buffer_size = send_buffer_size;
        }
        if let Some(receive_buffer_size) = args.receive_buffer_size {
            socket_config.receive_buffer_size = receive_buffer_size;
        }
        if let Some(read_timeout) = args.read_timeout {
            socket_config.read_timeout = read_timeout;
        }

        TcpDemoClientConfig {
            host: args.host,
            port: args.port,
            payload: Bytes::from(args.message),
            read_buffer_capacity: args.read_buffer_capacity,
            connect_timeout: args.connect_timeout,
            write_timeout: args.write_timeout,
            socket_config,
        }
    }
}

fn parse_byte_size(value: &str) -> Result<usize, String> {
    let bytes = Byte::from_str(value).map_err(|error| format!("invalid size {value}: {error}"))?;
    usize::try_from(bytes.as_u64()).map_err(|_| format!("size {value} is too large"))
}
