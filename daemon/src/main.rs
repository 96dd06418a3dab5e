//! nano-mcp daemon: exposes a Nano node to tool-calling clients over HTTP or stdio.

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use nano_mcp_gateway::{HttpGateway, NodeClient};
use nano_mcp_rpc::{http, stdio, Dispatcher, RpcMetrics};
use nano_mcp_types::RawAmount;
use nano_mcp_utils::{init_tracing, LogFormat};
use nano_mcp_wallet::{Wallet, WorkSource};

use crate::config::{McpConfig, Transport};

#[derive(Parser, Debug)]
#[command(name = "nano-mcp", version, about = "Nano ledger bridge for tool-calling clients")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "NANO_MCP_CONFIG")]
    config: Option<PathBuf>,

    /// Node RPC endpoint.
    #[arg(long, env = "NANO_MCP_NODE_URL")]
    node_url: Option<String>,

    /// Value for the Authorization header on node calls.
    #[arg(long, env = "NANO_MCP_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Node connect timeout in seconds.
    #[arg(long, env = "NANO_MCP_CONNECT_TIMEOUT_SECS")]
    connect_timeout_secs: Option<u64>,

    /// "http" or "stdio".
    #[arg(long, env = "NANO_MCP_TRANSPORT")]
    transport: Option<Transport>,

    /// Bind address for the HTTP transport.
    #[arg(long, env = "NANO_MCP_LISTEN_ADDR")]
    listen_addr: Option<SocketAddr>,

    /// "human" or "json".
    #[arg(long, env = "NANO_MCP_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "NANO_MCP_LOG_LEVEL")]
    log_level: Option<String>,

    /// Open-block work difficulty, hex.
    #[arg(long, env = "NANO_MCP_OPEN_DIFFICULTY")]
    open_difficulty: Option<String>,

    /// Receive/send work difficulty, hex.
    #[arg(long, env = "NANO_MCP_SECURED_DIFFICULTY")]
    secured_difficulty: Option<String>,

    /// Pending blocks fetched per receive pass.
    #[arg(long, env = "NANO_MCP_PENDING_COUNT")]
    pending_count: Option<u64>,

    /// Smallest pending amount, in raw, worth receiving.
    #[arg(long, env = "NANO_MCP_PENDING_THRESHOLD")]
    pending_threshold: Option<RawAmount>,

    /// "node" or "local".
    #[arg(long, env = "NANO_MCP_WORK_SOURCE")]
    work_source: Option<WorkSource>,

    /// Disable generateWallet, send and receiveAll.
    #[arg(long, env = "NANO_MCP_READ_ONLY")]
    read_only: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Serve requests on the configured transport (default).
    Serve,
    /// Print the effective configuration as TOML and exit.
    PrintConfig,
}

impl Cli {
    /// Layer flags and env vars over `base`.
    fn apply(self, base: McpConfig) -> McpConfig {
        McpConfig {
            node_url: self.node_url.unwrap_or(base.node_url),
            api_key: self.api_key.or(base.api_key),
            connect_timeout_secs: self
                .connect_timeout_secs
                .unwrap_or(base.connect_timeout_secs),
            transport: self.transport.unwrap_or(base.transport),
            listen_addr: self.listen_addr.unwrap_or(base.listen_addr),
            log_format: self.log_format.unwrap_or(base.log_format),
            log_level: self.log_level.unwrap_or(base.log_level),
            open_difficulty: self.open_difficulty.unwrap_or(base.open_difficulty),
            secured_difficulty: self.secured_difficulty.unwrap_or(base.secured_difficulty),
            pending_count: self.pending_count.unwrap_or(base.pending_count),
            pending_threshold: self.pending_threshold.unwrap_or(base.pending_threshold),
            work_source: self.work_source.unwrap_or(base.work_source),
            read_only: self.read_only || base.read_only,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Command::Serve);

    let base = match &cli.config {
        Some(path) => McpConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => McpConfig::default(),
    };
    let config = cli.apply(base);

    if command == Command::PrintConfig {
        print!("{}", config.redacted().to_toml_string()?);
        return Ok(());
    }

    init_tracing(config.log_format, &config.log_level)
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    let engine_config = config.engine_config()?;
    let gateway = HttpGateway::new(config.gateway_config())?;
    let wallet = Wallet::new(NodeClient::new(Arc::new(gateway)), engine_config);
    let metrics = Arc::new(RpcMetrics::new()?);
    let dispatcher = Arc::new(Dispatcher::new(wallet, config.read_only, metrics));

    tracing::info!(
        node = %config.node_url,
        transport = ?config.transport,
        read_only = config.read_only,
        work_source = ?config.work_source,
        "starting nano-mcp"
    );

    match config.transport {
        Transport::Http => {
            http::serve(dispatcher, config.listen_addr, shutdown_signal()).await?;
        }
        Transport::Stdio => {
            stdio::serve_stdio(&dispatcher).await?;
        }
    }

    tracing::info!("nano-mcp exited cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
