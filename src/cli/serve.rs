//! Run the HTTP API.

use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::server::App;

/// `kamoes serve`
#[derive(Args)]
pub struct ServeCommand {
    /// Port to listen on (overrides config and `KAMOES_PORT`)
    #[arg(short, long)]
    port: Option<u16>,
}

impl ServeCommand {
    pub async fn execute(self, mut config: Config) -> Result<()> {
        if let Some(port) = self.port {
            config.port = port;
        }
        App::init(config).await?.serve().await
    }
}
