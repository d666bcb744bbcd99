use crate::error::TcpDemoError;
use crate::tcp::config_client::format_server_address;
use crate::tcp::config_socket::SocketOption;
use crate::tcp::tcp_client_connection_stream::{ConnectionStream, Connector};
use async_trait::async_trait;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Connect(String),
    SetNodelay(bool),
    SetSendBufferSize(usize),
    SetReceiveBufferSize(usize),
    SetReadTimeout(Duration),
    Write(Vec<u8>),
    Read(usize),
    Shutdown,
}

#[derive(Debug, Clone)]
pub(crate) enum ReadBehavior {
    /// Fills the whole buffer with `fill` and reports `data.len()` bytes.
    Respond { data: Vec<u8>, fill: u8 },
    Eof,
    TimeOut,
    Fail,
}

/// In-memory stream recording every call made on it.
#[derive(Debug, Clone)]
pub(crate) struct FakeStream {
    calls: Arc<Mutex<Vec<Call>>>,
    read: ReadBehavior,
    rejected_option: Option<SocketOption>,
    fail_write: bool,
    stall_write: bool,
    fail_shutdown: bool,
    read_timeout: Option<Duration>,
}

impl Default for FakeStream {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            read: ReadBehavior::Eof,
            rejected_option: None,
            fail_write: false,
            stall_write: false,
            fail_shutdown: false,
            read_timeout: None,
        }
    }
}

impl FakeStream {
    pub fn responding(data: &[u8]) -> Self {
        Self::default().with_read(ReadBehavior::Respond {
            data: data.to_vec(),
            fill: b'#',
        })
    }

    pub fn with_read(mut self, read: ReadBehavior) -> Self {
        self.read = read;
        self
    }

    pub fn reject(mut self, option: SocketOption) -> Self {
        self.rejected_option = Some(option);
        self
    }

    pub fn fail_write(mut self) -> Self {
        self.fail_write = true;
        self
    }

    /// The write never completes, as with a peer that stopped reading.
    pub fn stall_write(mut self) -> Self {
        self.stall_write = true;
        self
    }

    pub fn fail_shutdown(mut self) -> Self {
        self.fail_shutdown = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn apply(&self, option: SocketOption, call: Call) -> io::Result<()> {
        self.record(call);
        if self.rejected_option == Some(option) {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "rejected"));
        }
        Ok(())
    }
}

#[async_trait]
impl ConnectionStream for FakeStream {
    fn set_nodelay(&mut self, nodelay: bool) -> io::Result<()> {
        self.apply(SocketOption::NoDelay, Call::SetNodelay(nodelay))
    }

    fn set_send_buffer_size(&mut self, size: usize) -> io::Result<()> {
        self.apply(SocketOption::SendBufferSize, Call::SetSendBufferSize(size))
    }

    fn set_receive_buffer_size(&mut self, size: usize) -> io::Result<()> {
        self.apply(
            SocketOption::ReceiveBufferSize,
            Call::SetReceiveBufferSize(size),
        )
    }

    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        self.apply(SocketOption::ReadTimeout, Call::SetReadTimeout(timeout))?;
        self.read_timeout = Some(timeout);
        Ok(())
    }

    async fn write(&mut self, buf: &[u8]) -> Result<(), TcpDemoError> {
        self.record(Call::Write(buf.to_vec()));
        if self.stall_write {
            std::future::pending::<()>().await;
        }
        if self.fail_write {
            return Err(TcpDemoError::WriteFailed {
                length: buf.len(),
                source: io::Error::from(io::ErrorKind::BrokenPipe),
            });
        }
        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, TcpDemoError> {
        self.record(Call::Read(buf.len()));
        match &self.read {
            ReadBehavior::Respond { data, fill } => {
                buf.fill(*fill);
                let length = data.len().min(buf.len());
                buf[..length].copy_from_slice(&data[..length]);
                Ok(length)
            }
            ReadBehavior::Eof => Ok(0),
            ReadBehavior::TimeOut => Err(TcpDemoError::ReadTimeout {
                timeout: self.read_timeout.unwrap_or_default(),
            }),
            ReadBehavior::Fail => Err(TcpDemoError::ReadFailed {
                source: io::Error::from(io::ErrorKind::ConnectionReset),
            }),
        }
    }

    async fn shutdown(&mut self) -> Result<(), TcpDemoError> {
        self.record(Call::Shutdown);
        if self.fail_shutdown {
            return Err(TcpDemoError::ShutdownFailed {
                source: io::Error::from(io::ErrorKind::NotConnected),
            });
        }
        Ok(())
    }
}

/// Hands out clones of a template stream, or refuses every connection.
#[derive(Debug, Clone)]
pub(crate) struct FakeConnector {
    stream: FakeStream,
    refuse: bool,
}

impl FakeConnector {
    pub fn new(stream: FakeStream) -> Self {
        Self {
            stream,
            refuse: false,
        }
    }

    pub fn refusing() -> Self {
        Self {
            stream: FakeStream::default(),
            refuse: true,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.stream.calls()
    }
}

#[async_trait]
impl Connector for FakeConnector {
    type Stream = FakeStream;

    async fn connect(
        &self,
        host: &str,
        port: u16,
        _timeout: Option<Duration>,
    ) -> Result<FakeStream, TcpDemoError> {
        let address = format_server_address(host, port);
        self.stream.record(Call::Connect(address.clone()));
        if self.refuse {
            return Err(TcpDemoError::CannotEstablishConnection {
                address,
                source: io::Error::from(io::ErrorKind::ConnectionRefused),
            });
        }
        Ok(self.stream.clone())
    }
}
