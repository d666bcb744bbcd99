use crate::error::TcpDemoError;
use crate::tcp::config_socket::{SocketOption, TcpSocketConfig};
use crate::tcp::tcp_client_connection_stream::ConnectionStream;
use std::io;
use tracing::{debug, error, trace};

/// Socket optimizer trait for applying socket options to a connection
pub trait SocketOptimizer {
    /// Apply socket options to a stream based on the provided configuration
    fn apply_socket_options<S: ConnectionStream + ?Sized>(
        stream: &mut S,
        config: &TcpSocketConfig,
    ) -> Result<(), TcpDemoError>;
}

/// Default implementation of SocketOptimizer that works on all platforms
pub struct DefaultSocketOptimizer;

impl SocketOptimizer for DefaultSocketOptimizer {
    fn apply_socket_options<S: ConnectionStream + ?Sized>(
        stream: &mut S,
        config: &TcpSocketConfig,
    ) -> Result<(), TcpDemoError> {
        // Set TCP_NODELAY (disable Nagle's algorithm)
        let nodelay = config.nodelay;
        check(SocketOption::NoDelay, nodelay, stream.set_nodelay(nodelay))?;

        let send_buf_size = config.send_buffer_size;
        check(
            SocketOption::SendBufferSize,
            send_buf_size,
            stream.set_send_buffer_size(send_buf_size),
        )?;

        let recv_buf_size = config.receive_buffer_size;
        check(
            SocketOption::ReceiveBufferSize,
            recv_buf_size,
            stream.set_receive_buffer_size(recv_buf_size),
        )?;

        let read_timeout = config.read_timeout;
        check(
            SocketOption::ReadTimeout,
            humantime::format_duration(read_timeout),
            stream.set_read_timeout(read_timeout),
        )?;

        debug!(
            "Applied socket options: nodelay={}, send_buffer={}, recv_buffer={}, read_timeout={}",
            nodelay,
            send_buf_size,
            recv_buf_size,
            humantime::format_duration(read_timeout)
        );

        // The buffer sizes are hints, the kernel may round or double them
        if let Some((send, receive)) = stream.effective_buffer_sizes() {
            debug!("Effective socket buffers: send_buffer={send}, recv_buffer={receive}");
        }

        Ok(())
    }
}

fn check<V: ToString>(
    option: SocketOption,
    value: V,
    result: io::Result<()>,
) -> Result<(), TcpDemoError> {
    let value = value.to_string();
    match result {
        Ok(()) => {
            trace!("Applied {option}={value}");
            Ok(())
        }
        Err(error) => {
            error!("Failed to set {option} to {value}: {error}");
            Err(TcpDemoError::SocketConfig {
                option,
                value,
                source: error,
            })
        }
    }
}

/// Public function to optimize a stream based on the provided configuration
pub fn optimize_tcp_stream<S: ConnectionStream + ?Sized>(
    stream: &mut S,
    config: &TcpSocketConfig,
) -> Result<(), TcpDemoError> {
    trace!("Optimizing TCP stream with config: {config:?}");
    DefaultSocketOptimizer::apply_socket_options(stream, config)
}
