use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cloudlab_client::channel::RemoteChannel;
use cloudlab_client::config::RunConfig;
use cloudlab_client::features::dispatch::controller::Dispatcher;
use cloudlab_client::report;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cloudlab_client=info,info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = RunConfig::resolve_path(std::env::args().nth(1));
    let config = RunConfig::load(&config_path)?;

    info!(
        endpoint = %config.endpoint,
        operation = %config.operation,
        "Starting cloudlab dispatch"
    );

    let channel = RemoteChannel::open(&config.endpoint)?;
    let dispatcher = Dispatcher::new(&channel, config.call_timeout());

    let outcome = dispatcher
        .dispatch(&config.operation, &config.parameters)
        .await;

    println!("{}", report::render(&outcome));

    // The channel is released on every exit path, bounded by the configured
    // shutdown timeout; a drain overrun is logged inside close, never
    // surfaced as a dispatch failure.
    let succeeded = outcome.is_success();
    channel.close(config.shutdown_timeout()).await;

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
