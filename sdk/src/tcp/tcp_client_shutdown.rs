use crate::tcp::tcp_client::TcpDemoClient;
use crate::tcp::tcp_client_connection_stream::{ConnectionStream, Connector};
use crate::tcp::tcp_client_fields::NAME;
use crate::tcp::tcp_client_state::ClientState;
use tracing::{info, warn};

impl<C: Connector> TcpDemoClient<C> {
    /// Closes the connection. Takes the stream by value so it is closed once.
    pub(crate) async fn close(&self, mut stream: C::Stream) {
        let client_address = self.get_client_address_value();
        info!("Closing the {NAME} TCP connection: {client_address}");
        if let Err(error) = stream.shutdown().await {
            warn!("{NAME} client: {client_address} could not shutdown the connection cleanly: {error}");
        }
        drop(stream);
        self.set_state(ClientState::Closed);
        info!("{NAME} TCP connection: {client_address} has been closed.");
    }
}
