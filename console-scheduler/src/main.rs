use console_core::{AvailabilityClient, Config, Result, logging};
use tracing::info;

mod scheduler;

use scheduler::{ConsoleScheduler, LogSink};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();
    info!("starting client");

    let config = Config::load()?;
    info!("Starting Console Scheduler with config: {:?}", config);

    let checker = AvailabilityClient::new(&config.console.server)?;
    info!(
        "Checking availability at {}:{}",
        config.console.server.hostname, config.console.server.port
    );

    let mut scheduler =
        ConsoleScheduler::new(checker, LogSink, config.console.names.clone(), &config.schedule).await?;

    scheduler.start().await?;

    info!("Console scheduler is running. Press Ctrl+C to stop.");

    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received");
    scheduler.stop().await?;

    Ok(())
}
