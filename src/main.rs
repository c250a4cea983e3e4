use anyhow::Result;
use tracing::info;

use reversi_proto::ReversiEngine;

fn main() -> Result<()> {
    // stdout carries the protocol, so diagnostics go to stderr.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    info!("reversi starting");
    ReversiEngine::new().run()?;
    Ok(())
}
