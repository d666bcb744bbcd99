use crate::error::TcpDemoError;
use crate::tcp::config_socket::MAX_SOCKET_BUFFER_SIZE;
use crate::tcp::tcp_client_connection_stream::ConnectionStream;
use async_trait::async_trait;
use socket2::SockRef;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::error;

#[derive(Debug)]
pub struct TcpConnectionStream {
    client_address: SocketAddr,
    stream: TcpStream,
    read_timeout: Option<Duration>,
}

impl TcpConnectionStream {
    pub fn new(client_address: SocketAddr, stream: TcpStream) -> Self {
        Self {
            client_address,
            stream,
            read_timeout: None,
        }
    }
}

// socket2 narrows the size to a C int, larger values would wrap.
fn check_buffer_size(size: usize) -> io::Result<usize> {
    if size == 0 || size > MAX_SOCKET_BUFFER_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("buffer size must be in range 1..={MAX_SOCKET_BUFFER_SIZE}, got {size}"),
        ));
    }
    Ok(size)
}

#[async_trait]
impl ConnectionStream for TcpConnectionStream {
    fn set_nodelay(&mut self, nodelay: bool) -> io::Result<()> {
        self.stream.set_nodelay(nodelay)
    }

    fn set_send_buffer_size(&mut self, size: usize) -> io::Result<()> {
        SockRef::from(&self.stream).set_send_buffer_size(check_buffer_size(size)?)
    }

    fn set_receive_buffer_size(&mut self, size: usize) -> io::Result<()> {
        SockRef::from(&self.stream).set_recv_buffer_size(check_buffer_size(size)?)
    }

    fn set_read_timeout(&mut self, read_timeout: Duration) -> io::Result<()> {
        if read_timeout.is_zero() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "read timeout must be greater than zero",
            ));
        }
        self.read_timeout = Some(read_timeout);
        Ok(())
    }

    fn effective_buffer_sizes(&self) -> Option<(usize, usize)> {
        let socket = SockRef::from(&self.stream);
        let send = socket.send_buffer_size().ok()?;
        let receive = socket.recv_buffer_size().ok()?;
        Some((send, receive))
    }

    fn local_address(&self) -> Option<SocketAddr> {
        Some(self.client_address)
    }

    async fn write(&mut self, buf: &[u8]) -> Result<(), TcpDemoError> {
        let result = match self.stream.write_all(buf).await {
            Ok(()) => self.stream.flush().await,
            Err(error) => Err(error),
        };
        result.map_err(|error| {
            error!(
                "Failed to write data by client: {} to the TCP connection: {error}",
                self.client_address
            );
            TcpDemoError::WriteFailed {
                length: buf.len(),
                source: error,
            }
        })
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, TcpDemoError> {
        let result = match self.read_timeout {
            Some(read_timeout) => match timeout(read_timeout, self.stream.read(buf)).await {
                Ok(result) => result,
                Err(_) => {
                    error!(
                        "Client: {} did not receive data within {read_timeout:?}",
                        self.client_address
                    );
                    return Err(TcpDemoError::ReadTimeout {
                        timeout: read_timeout,
                    });
                }
            },
            None => self.stream.read(buf).await,
        };
        result.map_err(|error| {
            error!(
                "Failed to read data by client: {} from the TCP connection: {error}",
                self.client_address
            );
            TcpDemoError::ReadFailed { source: error }
        })
    }

    async fn shutdown(&mut self) -> Result<(), TcpDemoError> {
        self.stream.shutdown().await.map_err(|error| {
            error!(
                "Failed to shutdown the TCP connection by client: {} to the TCP connection: {error}",
                self.client_address
            );
            TcpDemoError::ShutdownFailed { source: error }
        })
    }
}
