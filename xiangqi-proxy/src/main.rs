use std::{error::Error, net::IpAddr, path::PathBuf, time::Duration};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use xiangqi_proxy::{server, ProxyConfig, ProxyRule, DEFAULT_PORT, DEFAULT_PREFIX, DEFAULT_TARGET};

/// Serves the board UI and forwards its API calls to the backend.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Opt {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,
    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Backend that receives the forwarded requests
    #[arg(long, default_value = DEFAULT_TARGET)]
    target: String,
    /// Requests whose path starts with this prefix are forwarded
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,
    /// Keep the Host and Origin headers of the browser
    #[arg(long)]
    no_change_origin: bool,
    /// Remove the prefix before forwarding
    #[arg(long)]
    strip_prefix: bool,
    /// Directory with the built board UI
    #[arg(long)]
    static_dir: Option<PathBuf>,
    /// Give up on the backend after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl Opt {
    fn into_config(self) -> Result<ProxyConfig, Box<dyn Error>> {
        let rule = ProxyRule::new(&self.prefix, &self.target)?
            .with_change_origin(!self.no_change_origin)
            .with_strip_prefix(self.strip_prefix);

        Ok(ProxyConfig {
            host: self.host,
            port: self.port,
            rules: vec![rule],
            static_dir: self.static_dir,
            timeout: self.timeout_secs.map(Duration::from_secs),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Opt::parse().into_config()?;
    for rule in &config.rules {
        info!(prefix = rule.prefix(), target = %rule.target(), "proxying");
    }

    let (_, serving) = server::bind(config, async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("shutting down"),
            Err(err) => {
                warn!(%err, "cannot listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        }
    })?;
    serving.await;
    Ok(())
}
