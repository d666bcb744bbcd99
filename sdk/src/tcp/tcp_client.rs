use crate::error::TcpDemoError;
use crate::tcp::config_client::TcpDemoClientConfig;
use crate::tcp::exchange_outcome::ExchangeOutcome;
use crate::tcp::tcp_client_connection_stream::Connector;
use crate::tcp::tcp_client_state::ClientState;
use crate::tcp::tcp_connector::TcpConnector;
use crossbeam_utils::atomic::AtomicCell;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::instrument;

/// TCP client performing a single request/response exchange with a server.
///
/// Every [`TcpDemoClient::run`] opens a fresh connection, tunes it, writes the
/// configured payload, performs one bounded read and closes the connection
/// again, whatever the outcome.
#[derive(Debug)]
pub struct TcpDemoClient<C: Connector = TcpConnector> {
    // TcpDemoClientConfig is immutable thus no need for a lock
    pub(crate) config: Arc<TcpDemoClientConfig>,
    pub(crate) connector: C,
    pub(crate) state: AtomicU8,
    pub(crate) client_address: AtomicCell<Option<SocketAddr>>,
}

impl TcpDemoClient {
    /// Create a new TCP client for the provided server host and port.
    pub fn new(host: &str, port: u16) -> Result<Self, TcpDemoError> {
        Self::create(Arc::new(TcpDemoClientConfig {
            host: host.to_string(),
            port,
            ..Default::default()
        }))
    }

    /// Create a new TCP client based on the provided configuration.
    pub fn create(config: Arc<TcpDemoClientConfig>) -> Result<Self, TcpDemoError> {
        Self::with_connector(config, TcpConnector)
    }
}

impl<C: Connector> TcpDemoClient<C> {
    /// Create a new client opening its connections through `connector`.
    pub fn with_connector(
        config: Arc<TcpDemoClientConfig>,
        connector: C,
    ) -> Result<Self, TcpDemoError> {
        config.validate()?;
        Ok(Self {
            config,
            connector,
            state: AtomicU8::new(ClientState::Disconnected as u8),
            client_address: AtomicCell::new(None),
        })
    }

    pub fn config(&self) -> &TcpDemoClientConfig {
        &self.config
    }

    pub fn state(&self) -> ClientState {
        ClientState::from(self.state.load(Ordering::Acquire))
    }

    pub(crate) fn set_state(&self, state: ClientState) {
        self.state.store(state.into(), Ordering::Release);
    }

    /// Local address of the most recent connection.
    pub fn client_address(&self) -> Option<SocketAddr> {
        self.client_address.load()
    }

    pub(crate) fn get_client_address_value(&self) -> String {
        if let Some(client_address) = self.client_address.load() {
            client_address.to_string()
        } else {
            String::from("Unknown")
        }
    }

    /// Connects, applies the socket options, sends the payload and reads one response.
    ///
    /// The connection is closed before returning on every path that got past
    /// the connect step. A failure to close is logged and does not replace the
    /// outcome of the exchange.
    #[instrument(skip(self), fields(server_address = %self.config.server_address()))]
    pub async fn run(&self) -> Result<ExchangeOutcome, TcpDemoError> {
        let mut stream = self.connect().await?;
        let result = self.exchange(&mut stream).await;
        self.close(stream).await;
        result
    }

    async fn exchange(&self, stream: &mut C::Stream) -> Result<ExchangeOutcome, TcpDemoError> {
        self.configure(stream)?;
        self.send(stream).await?;
        self.receive(stream).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tcp::config_socket::{SocketOption, TcpSocketConfig};
    use crate::tcp::test_support::{Call, FakeConnector, FakeStream, ReadBehavior};
    use bytes::Bytes;
    use std::time::Duration;

    fn client(stream: FakeStream) -> TcpDemoClient<FakeConnector> {
        TcpDemoClient::with_connector(
            Arc::new(TcpDemoClientConfig::default()),
            FakeConnector::new(stream),
        )
        .unwrap()
    }

    fn shutdowns(calls: &[Call]) -> usize {
        calls.iter().filter(|call| **call == Call::Shutdown).count()
    }

    #[tokio::test]
    async fn run_should_configure_before_write_and_close_once() {
        let client = client(FakeStream::responding(b"Hello from Java TCP"));

        let outcome = client.run().await.unwrap();

        assert_eq!(outcome.to_string(), "Server response: Hello from Java TCP");
        assert_eq!(
            client.connector.calls(),
            vec![
                Call::Connect("127.0.0.1:9000".to_string()),
                Call::SetNodelay(true),
                Call::SetSendBufferSize(8192),
                Call::SetReceiveBufferSize(8192),
                Call::SetReadTimeout(Duration::from_millis(5000)),
                Call::Write(b"Hello from Java TCP".to_vec()),
                Call::Read(1024),
                Call::Shutdown,
            ]
        );
        assert_eq!(client.state(), ClientState::Closed);
    }

    #[tokio::test]
    async fn response_should_be_decoded_using_only_the_read_count() {
        let client = client(FakeStream::responding(b"hi"));

        let outcome = client.run().await.unwrap();

        assert_eq!(outcome, ExchangeOutcome::Received(Bytes::from_static(b"hi")));
        assert_eq!(outcome.text().unwrap(), "hi");
    }

    #[tokio::test]
    async fn zero_bytes_should_be_reported_as_empty_response() {
        let client = client(FakeStream::default().with_read(ReadBehavior::Eof));

        let outcome = client.run().await.unwrap();

        assert_eq!(outcome, ExchangeOutcome::EmptyResponse);
        assert_eq!(outcome.to_string(), "No response or connection closed");
        assert_eq!(shutdowns(&client.connector.calls()), 1);
    }

    #[tokio::test]
    async fn read_timeout_should_fail_and_still_close() {
        let client = client(FakeStream::default().with_read(ReadBehavior::TimeOut));

        let error = client.run().await.unwrap_err();

        assert!(matches!(
            error,
            TcpDemoError::ReadTimeout { timeout } if timeout == Duration::from_millis(5000)
        ));
        assert_eq!(shutdowns(&client.connector.calls()), 1);
        assert_eq!(client.state(), ClientState::Closed);
    }

    #[tokio::test]
    async fn read_failure_should_fail_and_still_close() {
        let client = client(FakeStream::default().with_read(ReadBehavior::Fail));

        let error = client.run().await.unwrap_err();

        assert!(matches!(error, TcpDemoError::ReadFailed { .. }));
        assert_eq!(shutdowns(&client.connector.calls()), 1);
    }

    #[tokio::test]
    async fn rejected_socket_option_should_skip_io_and_close() {
        let client = client(FakeStream::default().reject(SocketOption::ReceiveBufferSize));

        let error = client.run().await.unwrap_err();

        assert!(matches!(
            error,
            TcpDemoError::SocketConfig {
                option: SocketOption::ReceiveBufferSize,
                ..
            }
        ));
        let calls = client.connector.calls();
        assert!(!calls.iter().any(|call| matches!(call, Call::Write(_) | Call::Read(_))));
        assert_eq!(calls.last(), Some(&Call::Shutdown));
        assert_eq!(shutdowns(&calls), 1);
    }

    #[tokio::test]
    async fn write_failure_should_skip_read_and_close() {
        let client = client(FakeStream::responding(b"unused").fail_write());

        let error = client.run().await.unwrap_err();

        assert!(matches!(error, TcpDemoError::WriteFailed { length: 19, .. }));
        let calls = client.connector.calls();
        assert!(!calls.iter().any(|call| matches!(call, Call::Read(_))));
        assert_eq!(shutdowns(&calls), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_write_should_time_out_skip_read_and_close() {
        let config = TcpDemoClientConfig {
            write_timeout: Some(Duration::from_millis(500)),
            ..Default::default()
        };
        let client = TcpDemoClient::with_connector(
            Arc::new(config),
            FakeConnector::new(FakeStream::responding(b"unused").stall_write()),
        )
        .unwrap();

        let error = client.run().await.unwrap_err();

        assert!(matches!(
            error,
            TcpDemoError::WriteTimeout { timeout } if timeout == Duration::from_millis(500)
        ));
        let calls = client.connector.calls();
        assert!(!calls.iter().any(|call| matches!(call, Call::Read(_))));
        assert_eq!(calls.last(), Some(&Call::Shutdown));
        assert_eq!(shutdowns(&calls), 1);
        assert_eq!(client.state(), ClientState::Closed);
    }

    #[tokio::test]
    async fn refused_connection_should_not_attempt_io() {
        let client = TcpDemoClient::with_connector(
            Arc::new(TcpDemoClientConfig::default()),
            FakeConnector::refusing(),
        )
        .unwrap();

        let error = client.run().await.unwrap_err();

        assert!(error.is_connection_error());
        assert_eq!(
            client.connector.calls(),
            vec![Call::Connect("127.0.0.1:9000".to_string())]
        );
        assert_eq!(client.state(), ClientState::Disconnected);
        assert!(client.client_address().is_none());
    }

    #[tokio::test]
    async fn close_failure_should_not_mask_the_response() {
        let client = client(FakeStream::responding(b"pong").fail_shutdown());

        let outcome = client.run().await.unwrap();

        assert_eq!(outcome.text().unwrap(), "pong");
        assert_eq!(client.state(), ClientState::Closed);
    }

    #[tokio::test]
    async fn repeated_runs_should_yield_the_same_outcome_class() {
        let client = client(FakeStream::default());

        let first = client.run().await.unwrap();
        let second = client.run().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(shutdowns(&client.connector.calls()), 2);
    }

    #[tokio::test]
    async fn custom_config_should_drive_every_step() {
        let config = TcpDemoClientConfig {
            host: "localhost".to_string(),
            port: 7000,
            payload: Bytes::from_static(b"ping"),
            read_buffer_capacity: 16,
            connect_timeout: Some(Duration::from_secs(1)),
            write_timeout: Some(Duration::from_secs(1)),
            socket_config: TcpSocketConfig::new(false, 4096, 2048, Duration::from_millis(250)),
        };
        let client = TcpDemoClient::with_connector(
            Arc::new(config),
            FakeConnector::new(FakeStream::responding(b"pong")),
        )
        .unwrap();

        client.run().await.unwrap();

        assert_eq!(
            client.connector.calls(),
            vec![
                Call::Connect("localhost:7000".to_string()),
                Call::SetNodelay(false),
                Call::SetSendBufferSize(4096),
                Call::SetReceiveBufferSize(2048),
                Call::SetReadTimeout(Duration::from_millis(250)),
                Call::Write(b"ping".to_vec()),
                Call::Read(16),
                Call::Shutdown,
            ]
        );
    }

    #[test]
    fn create_should_reject_invalid_config() {
        let result = TcpDemoClient::new("", 9000);
        assert!(matches!(result, Err(TcpDemoError::InvalidConfiguration(_))));

        let result = TcpDemoClient::new("127.0.0.1", 0);
        assert!(matches!(result, Err(TcpDemoError::InvalidConfiguration(_))));

        let client = TcpDemoClient::new("127.0.0.1", 9000).unwrap();
        assert_eq!(client.state(), ClientState::Disconnected);
        assert_eq!(client.config().server_address(), "127.0.0.1:9000");
    }
}
