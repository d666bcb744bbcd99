use crate::error::TcpDemoError;
use crate::tcp::tcp_client::TcpDemoClient;
use crate::tcp::tcp_client_connection_stream::{ConnectionStream, Connector};
use crate::tcp::tcp_client_fields::NAME;
use crate::tcp::tcp_client_state::ClientState;
use tokio::time::timeout;
use tracing::{error, info, trace};

impl<C: Connector> TcpDemoClient<C> {
    /// Writes the whole payload in one logical write, a short write is never reported as success.
    pub(crate) async fn send(&self, stream: &mut C::Stream) -> Result<(), TcpDemoError> {
        let payload = &self.config.payload;
        if tracing::enabled!(tracing::Level::TRACE) {
            trace!("Sending a TCP payload of size: {}", payload.len());
        }

        match self.config.write_timeout {
            Some(write_timeout) => match timeout(write_timeout, stream.write(payload)).await {
                Ok(result) => result?,
                Err(_) => {
                    error!(
                        "{NAME} client: {} could not write {} bytes within {write_timeout:?}",
                        self.get_client_address_value(),
                        payload.len()
                    );
                    return Err(TcpDemoError::WriteTimeout {
                        timeout: write_timeout,
                    });
                }
            },
            None => stream.write(payload).await?,
        }
        self.set_state(ClientState::Sent);
        info!(
            "{NAME} client: {} has sent {} bytes to server: {}",
            self.get_client_address_value(),
            payload.len(),
            self.config.server_address()
        );
        Ok(())
    }
}
