//! CertFlow CLI — one-shot polls and chain operations from the terminal.
//!
//! # Commands
//! ```
//! certflow height  --rpc <url>
//! certflow balance --rpc <url> <address>
//! certflow gas     --rpc <url>
//! certflow poll    --rpc <url> [--explorer <url>] [--address <addr>]
//!                  [--contract <addr>] [--threshold <native>] [--lookback <n>] <kind>
//! certflow info
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use certflow_core::cursor::PollCursor;
use certflow_core::event::TriggerKind;
use certflow_core::filter::FilterConfig;
use certflow_poller::Poller;
use certflow_rpc::{ExplorerClient, NodeClient};

#[derive(Parser)]
#[command(
    name = "certflow",
    about = "Certificate-registry chain integration — CertFlow CLI",
    version
)]
struct Cli {
    /// Chain node JSON-RPC URL (falls back to CERTFLOW_RPC_URL)
    #[arg(long, global = true)]
    rpc: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current chain height
    Height,

    /// Native balance of an address
    Balance {
        address: String,
    },

    /// Current gas price
    Gas,

    /// Run one poll cycle for a trigger kind and print the events as JSON
    Poll {
        /// One of: certificateIssued, certificateTransferred, didCreated,
        /// didUpdated, assetRegistered, largeTransfer
        kind: String,
        /// Explorer API URL, required for assetRegistered
        #[arg(long)]
        explorer: Option<String>,
        /// Only emit events involving this address
        #[arg(long)]
        address: Option<String>,
        /// Restrict log queries to this contract
        #[arg(long)]
        contract: Option<String>,
        /// Minimum transfer value in native units (largeTransfer only)
        #[arg(long)]
        threshold: Option<String>,
        /// Blocks behind the head to start from
        #[arg(long, default_value_t = 100)]
        lookback: u64,
    },

    /// Show build and trigger-catalogue info
    Info,
}

fn node_client(rpc: Option<String>) -> Result<NodeClient> {
    let url = rpc
        .or_else(|| std::env::var("CERTFLOW_RPC_URL").ok())
        .context("no RPC URL: pass --rpc or set CERTFLOW_RPC_URL")?;
    Ok(NodeClient::default_for(url))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Height => {
            let node = node_client(cli.rpc)?;
            let height = certflow_ops::account::height(&node).await?;
            println!("{height}");
        }

        Commands::Balance { address } => {
            let node = node_client(cli.rpc)?;
            let balance = certflow_ops::account::balance(&node, &address).await?;
            println!("{}", serde_json::to_string_pretty(&balance)?);
        }

        Commands::Gas => {
            let node = node_client(cli.rpc)?;
            let price = certflow_ops::account::gas_price(&node).await?;
            println!("{}", serde_json::to_string_pretty(&price)?);
        }

        Commands::Poll {
            kind,
            explorer,
            address,
            contract,
            threshold,
            lookback,
        } => {
            let kind: TriggerKind = kind
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            let node = node_client(cli.rpc)?;

            let mut poller = Poller::new(Arc::new(node));
            if let Some(url) = explorer {
                poller = poller.with_indexer(Arc::new(ExplorerClient::new(url)));
            }

            let config = FilterConfig {
                filter_address: address,
                transfer_threshold: threshold,
                lookback_blocks: lookback,
                contract_address: contract,
                ..Default::default()
            };

            let outcome = poller.poll(kind, &PollCursor::new(), &config).await?;
            if let Some((from, to)) = outcome.window {
                tracing::info!(from, to, skipped = outcome.skipped_blocks, "scanned window");
            }
            if let Some(source) = outcome.degraded {
                tracing::warn!(source, "secondary source unavailable");
            }
            println!("{}", serde_json::to_string_pretty(&outcome.events)?);
        }

        Commands::Info => {
            println!("CertFlow v{}", env!("CARGO_PKG_VERSION"));
            println!("  Trigger kinds:");
            for kind in TriggerKind::ALL {
                println!("    {kind}");
            }
            println!("  Dedup window: trailing 1000 transaction hashes");
            println!("  Default lookback: 100 blocks");
            println!("  Block scan batch: 10 blocks/fetch");
        }
    }

    Ok(())
}
