use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// How the scripted peer treats the one connection it accepts.
#[derive(Debug, Clone, Copy)]
pub enum PeerBehavior {
    /// Reads the request and writes it back before closing.
    Echo,
    /// Reads the request and closes without replying.
    CloseSilently,
    /// Reads the request and stays silent for the given time.
    Stall(Duration),
}

/// What the peer observed on the accepted connection.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PeerReport {
    pub request: Vec<u8>,
    /// True when the client closed its side while the peer was stalling.
    pub client_closed: bool,
}

/// Single-connection TCP peer bound to an ephemeral loopback port.
#[derive(Debug)]
pub struct TestServer {
    address: SocketAddr,
    report: oneshot::Receiver<PeerReport>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(behavior: PeerBehavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind the test server");
        let address = listener
            .local_addr()
            .expect("Failed to get the test server address");
        let (sender, report) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let (stream, client_address) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(error) => {
                    warn!("Test server failed to accept a connection: {error}");
                    return;
                }
            };
            info!("Test server accepted client: {client_address}, behavior: {behavior:?}");
            let report = serve(stream, behavior).await;
            let _ = sender.send(report);
        });
        Self {
            address,
            report,
            handle,
        }
    }

    /// An address nothing listens on.
    pub async fn unused_address() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind a probe listener");
        listener
            .local_addr()
            .expect("Failed to get the probe listener address")
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// Waits for the peer to finish with its connection.
    pub async fn report(self) -> PeerReport {
        let report = self.report.await.unwrap_or_default();
        let _ = self.handle.await;
        report
    }
}

async fn serve(mut stream: TcpStream, behavior: PeerBehavior) -> PeerReport {
    let mut buffer = vec![0u8; 1024];
    let read_bytes = stream.read(&mut buffer).await.unwrap_or(0);
    let mut report = PeerReport {
        request: buffer[..read_bytes].to_vec(),
        client_closed: false,
    };

    match behavior {
        PeerBehavior::Echo => {
            let _ = stream.write_all(&report.request).await;
            let _ = stream.shutdown().await;
        }
        PeerBehavior::CloseSilently => {
            let _ = stream.shutdown().await;
        }
        PeerBehavior::Stall(duration) => {
            // A zero-byte read means the client sent FIN while we kept silent
            let mut probe = [0u8; 16];
            report.client_closed = matches!(
                tokio::time::timeout(duration, stream.read(&mut probe)).await,
                Ok(Ok(0)) | Ok(Err(_))
            );
        }
    }
    report
}
