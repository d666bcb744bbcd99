use crate::error::TcpDemoError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

/// A connected byte stream the client performs its single exchange on.
///
/// The option setters return the raw I/O error so the caller can attach the
/// option name and value to the reported failure.
#[async_trait]
pub trait ConnectionStream: Debug + Send {
    fn set_nodelay(&mut self, nodelay: bool) -> io::Result<()>;
    fn set_send_buffer_size(&mut self, size: usize) -> io::Result<()>;
    fn set_receive_buffer_size(&mut self, size: usize) -> io::Result<()>;
    /// Bounds every subsequent [`ConnectionStream::read`].
    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()>;

    /// Buffer sizes granted by the OS as `(send, receive)`, if the stream can tell.
    fn effective_buffer_sizes(&self) -> Option<(usize, usize)> {
        None
    }

    fn local_address(&self) -> Option<SocketAddr> {
        None
    }

    /// Writes the whole buffer and flushes it.
    async fn write(&mut self, buf: &[u8]) -> Result<(), TcpDemoError>;
    /// Performs one read, returning `Ok(0)` on end of stream.
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, TcpDemoError>;
    async fn shutdown(&mut self) -> Result<(), TcpDemoError>;
}

/// Opens connections for the client.
#[async_trait]
pub trait Connector: Debug + Send + Sync {
    type Stream: ConnectionStream;

    async fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Option<Duration>,
    ) -> Result<Self::Stream, TcpDemoError>;
}
