use crate::error::TcpDemoError;
use crate::tcp::socket_optimizer::optimize_tcp_stream;
use crate::tcp::tcp_client::TcpDemoClient;
use crate::tcp::tcp_client_connection_stream::{ConnectionStream, Connector};
use crate::tcp::tcp_client_fields::NAME;
use crate::tcp::tcp_client_state::ClientState;
use tracing::{info, trace};

impl<C: Connector> TcpDemoClient<C> {
    pub(crate) async fn connect(&self) -> Result<C::Stream, TcpDemoError> {
        let server_address = self.config.server_address();
        self.set_state(ClientState::Connecting);
        info!("{NAME} client is connecting to server: {server_address}...");

        let stream = match self
            .connector
            .connect(
                &self.config.host,
                self.config.port,
                self.config.connect_timeout,
            )
            .await
        {
            Ok(stream) => stream,
            Err(error) => {
                self.set_state(ClientState::Disconnected);
                return Err(error);
            }
        };

        self.client_address.store(stream.local_address());
        self.set_state(ClientState::Connected);
        let client_address = self.get_client_address_value();
        info!("{NAME} client: {client_address} has connected to server: {server_address}");
        Ok(stream)
    }

    /// Applies every socket option before the stream is used for I/O.
    pub(crate) fn configure(&self, stream: &mut C::Stream) -> Result<(), TcpDemoError> {
        optimize_tcp_stream(stream, &self.config.socket_config)?;
        self.set_state(ClientState::Configured);
        trace!(
            "{NAME} client: {} applied socket options",
            self.get_client_address_value()
        );
        Ok(())
    }
}
