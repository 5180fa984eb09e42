//! Actions Gateway CLI entry point.

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use actions_gateway::config::loader::load_config;
use actions_gateway::{GatewayConfig, GatewayServer, Shutdown};

#[derive(Parser, Debug)]
#[command(name = "actions-gateway")]
#[command(
    author,
    version,
    about = "Gateway adapting GraphQL action-dispatch webhooks for plain HTTP handlers"
)]
struct Args {
    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Validate configuration and exit.
    #[arg(long)]
    validate: bool,

    /// Print example configuration and exit.
    #[arg(long)]
    example_config: bool,
}

fn print_example_config() {
    let example = r#"# Actions Gateway Configuration Example

[listener]
bind_address = "0.0.0.0:8080"

[actions]
# Rewrite envelopes arriving on this path. Disabled by default.
enabled = true
path = "/actions"
# Maximum envelope size buffered for rewriting (bytes)
max_body_size = 1048576

# Action handlers, one per action name. Requests are forwarded to
# http://<address><path> (path defaults to "<actions.path>/<action>").
[[handlers]]
action = "upload"
address = "127.0.0.1:9000"

[[handlers]]
action = "startTask"
address = "127.0.0.1:9001"
path = "/tasks/start"

# Optional default upstream for traffic that is not an action call.
[upstream]
address = "127.0.0.1:9000"

[timeouts]
request_secs = 30

[observability]
metrics_enabled = false
metrics_address = "0.0.0.0:9090"
"#;
    println!("{}", example);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.example_config {
        print_example_config();
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "actions_gateway={},tower_http=info",
                    args.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    if args.validate {
        tracing::info!("Configuration is valid");
        return Ok(());
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        actions_enabled = config.actions.enabled,
        actions_path = %config.actions.path,
        handlers = config.handlers.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => actions_gateway::observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = GatewayServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
