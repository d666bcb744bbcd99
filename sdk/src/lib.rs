//! Single-exchange TCP client with latency-oriented socket tuning.
//!
//! The client connects, disables Nagle's algorithm, sets the send and receive
//! buffer hints, bounds the read with a timeout, writes one payload, reads one
//! response and closes the connection.

pub mod args;
pub mod error;
pub mod tcp;

pub use error::TcpDemoError;
pub use tcp::config_client::TcpDemoClientConfig;
pub use tcp::config_socket::{SocketOptimizationProfile, TcpSocketConfig};
pub use tcp::exchange_outcome::ExchangeOutcome;
pub use tcp::tcp_client::TcpDemoClient;
pub use tcp::tcp_client_state::ClientState;
