use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tcpdemo::args::ClientArgs;
use tcpdemo::{TcpDemoClient, TcpDemoClientConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "tcpdemo",
    version,
    about = "Send one message over a tuned TCP connection and print the reply"
)]
struct Cli {
    #[command(flatten)]
    client: ClientArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries the outcome line
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = TcpDemoClientConfig::from(cli.client);
    debug!("Client configuration: {config:?}");

    let client = TcpDemoClient::create(Arc::new(config))?;
    let outcome = client.run().await?;
    println!("{outcome}");
    Ok(())
}
