use anyhow::Context as _;
use clap::Parser;
use std::io::IsTerminal;
use tokio::net::TcpListener;
use tower_fault_responder::{app, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let config = Config::parse();
    let identity = config.identity()?;

    match identity.fault_headers() {
        Some(headers) => tracing::info!(
            name = identity.name(),
            delay_header = headers.delay.as_str(),
            error_header = headers.error.as_str(),
            "fault injection enabled"
        ),
        None => tracing::info!("no service name, fault injection disabled"),
    }

    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app(identity))
        .with_graceful_shutdown(shutdown())
        .await?;

    Ok(())
}

async fn shutdown() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
