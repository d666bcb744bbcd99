use crate::error::TcpDemoError;
use crate::tcp::exchange_outcome::ExchangeOutcome;
use crate::tcp::tcp_client::TcpDemoClient;
use crate::tcp::tcp_client_connection_stream::{ConnectionStream, Connector};
use crate::tcp::tcp_client_fields::NAME;
use bytes::BytesMut;
use tracing::{debug, info, instrument, warn};

impl<C: Connector> TcpDemoClient<C> {
    /// Performs the single bounded read that follows the payload.
    #[instrument(skip_all, level = "trace")]
    pub(crate) async fn receive(
        &self,
        stream: &mut C::Stream,
    ) -> Result<ExchangeOutcome, TcpDemoError> {
        let mut buffer = BytesMut::zeroed(self.config.read_buffer_capacity);
        let read_bytes = match stream.read(&mut buffer).await {
            Ok(read_bytes) => read_bytes,
            Err(error) => {
                warn!(
                    "{NAME} client: {} did not receive a response: {error}",
                    self.get_client_address_value()
                );
                return Err(error);
            }
        };

        if read_bytes == 0 {
            info!(
                "Server: {} closed the connection without a response.",
                self.config.server_address()
            );
            return Ok(ExchangeOutcome::EmptyResponse);
        }

        // Bytes past the reported count are stale and must not be decoded
        buffer.truncate(read_bytes);
        debug!(
            "{NAME} client: {} received {read_bytes} bytes.",
            self.get_client_address_value()
        );
        Ok(ExchangeOutcome::Received(buffer.freeze()))
    }
}
