use anyhow::Result;
use clap::Args;
use showscout_lib::types::NetworkID;
use showscout_lib::ShowClient;

use crate::output::{print_genres, print_network, OutputFormat};

#[derive(Args)]
pub struct NetworkArgs {
    /// Network ID (e.g. 213 for Netflix)
    pub id: NetworkID,
}

pub async fn run_genres(client: &ShowClient, format: &OutputFormat) -> Result<()> {
    let genres = client.genres().await?;
    print_genres(&genres, format)
}

pub async fn run_network(args: &NetworkArgs, client: &ShowClient, format: &OutputFormat) -> Result<()> {
    let network = client.network(args.id).await?;
    print_network(&network, format)
}
