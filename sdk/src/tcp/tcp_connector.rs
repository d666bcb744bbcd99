use crate::error::TcpDemoError;
use crate::tcp::config_client::format_server_address;
use crate::tcp::tcp_client_connection_stream::Connector;
use crate::tcp::tcp_connection_stream::TcpConnectionStream;
use async_trait::async_trait;
use std::io;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{error, trace};

/// Connects over plain TCP, resolving host names through the system resolver.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

#[async_trait]
impl Connector for TcpConnector {
    type Stream = TcpConnectionStream;

    async fn connect(
        &self,
        host: &str,
        port: u16,
        connect_timeout: Option<Duration>,
    ) -> Result<TcpConnectionStream, TcpDemoError> {
        let address = format_server_address(host, port);
        let connection = match connect_timeout {
            Some(connect_timeout) => {
                match timeout(connect_timeout, TcpStream::connect((host, port))).await {
                    Ok(connection) => connection,
                    Err(_) => Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("connection not established within {connect_timeout:?}"),
                    )),
                }
            }
            None => TcpStream::connect((host, port)).await,
        };

        let stream = match connection {
            Ok(stream) => stream,
            Err(error) => {
                error!("Failed to establish TCP connection to the server: {address}. {error}");
                return Err(TcpDemoError::CannotEstablishConnection {
                    address,
                    source: error,
                });
            }
        };
        let client_address = match stream.local_addr() {
            Ok(client_address) => client_address,
            Err(error) => {
                error!("Failed to get the local address of the client: {error}");
                return Err(TcpDemoError::CannotEstablishConnection {
                    address,
                    source: error,
                });
            }
        };
        trace!("Client: {client_address} opened a TCP connection to: {address}");
        Ok(TcpConnectionStream::new(client_address, stream))
    }
}
