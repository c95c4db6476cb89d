//! YouTube MCP Server - exposes YouTube Data API lookups to MCP clients.
//!
//! Main entry point: configuration, logging and transport selection.

mod config;
mod error;
mod icons;
mod server;
mod tools;
mod youtube;

use anyhow::{Context, Result};
use clap::Parser;
use config::{API_KEY_ENV, Config};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::StreamableHttpService;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use server::YouTubeMcpServer;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "yt-mcp")]
#[command(about = "MCP server for searching YouTube videos and channels", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/yt-mcp/config.jsonc)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Serve streamable HTTP instead of stdio
    #[arg(long)]
    http: bool,

    /// Listen address for --http (overrides the config file)
    #[arg(long)]
    bind: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

const DEFAULT_LOG: &str = "yt_mcp=info";

/// Filter directives: `-v` flags first, then `RUST_LOG`, then the default.
fn log_directives(verbose: u8, rust_log: Option<String>) -> String {
    match verbose {
        0 => rust_log
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG.to_string()),
        1 => "yt_mcp=debug".to_string(),
        _ => "yt_mcp=trace,rmcp=debug".to_string(),
    }
}

fn init_tracing(verbose: u8) {
    let directives = log_directives(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG));

    // stdout carries the stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Main application entry point.
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Layers configuration (file, `.env`, environment, CLI), then serves MCP
/// over stdio or streamable HTTP until the client disconnects or Ctrl-C.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Before tracing so RUST_LOG may come from .env; a missing file is normal
    dotenv::dotenv().ok();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env_api_key(std::env::var(API_KEY_ENV).ok());
    if let Some(bind) = cli.bind {
        config.http_bind = bind;
    }

    tracing::debug!("yt-mcp v{} starting...", env!("CARGO_PKG_VERSION"));
    let server = YouTubeMcpServer::new(&config);

    if cli.http {
        serve_http(server, &config.http_bind).await
    } else {
        serve_stdio(server).await
    }
}

async fn serve_stdio(server: YouTubeMcpServer) -> Result<()> {
    tracing::info!("Starting YouTube MCP server on stdio");
    let service = server
        .serve(stdio())
        .await
        .context("Failed to start stdio transport")?;
    service.waiting().await?;
    tracing::info!("YouTube MCP server stopped");
    Ok(())
}

async fn serve_http(server: YouTubeMcpServer, bind: &str) -> Result<()> {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );
    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    tracing::info!("Starting YouTube MCP server on http://{}/mcp", bind);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await
        .context("HTTP server error")?;
    tracing::info!("YouTube MCP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_log_directives() {
        assert_eq!(log_directives(0, None), "yt_mcp=info");
        assert_eq!(log_directives(0, Some(" ".to_string())), "yt_mcp=info");
        assert_eq!(log_directives(0, Some("rmcp=warn".to_string())), "rmcp=warn");
        assert_eq!(log_directives(1, Some("rmcp=warn".to_string())), "yt_mcp=debug");
        assert_eq!(log_directives(2, None), "yt_mcp=trace,rmcp=debug");
    }

    #[test]
    fn test_rust_log_from_dotenv_file() {
        let temp_dir = TempDir::new().unwrap();
        let env_path = temp_dir.path().join(".env");
        fs::write(&env_path, "YOUTUBE_API_KEY=abc\nRUST_LOG=yt_mcp=debug\n").unwrap();

        let rust_log = dotenv::from_path_iter(&env_path)
            .unwrap()
            .filter_map(|pair| pair.ok())
            .find(|(key, _)| key == EnvFilter::DEFAULT_ENV)
            .map(|(_, value)| value);

        let directives = log_directives(0, rust_log);
        assert_eq!(directives, "yt_mcp=debug");
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}
