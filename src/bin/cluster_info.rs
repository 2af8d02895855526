//! Query general cluster state: slot, block time, slot leader, block size.

use solbox::config::ClientConfig;
use solbox::{rpc, SolboxClient};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run().await {
        error!("Cluster query failed: {e}");
        std::process::exit(-1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let client = SolboxClient::connect(ClientConfig::load()?)?;
    let info = rpc::cluster_info(client.rpc())?;
    info!("Cluster snapshot: {info:?}");
    Ok(())
}
