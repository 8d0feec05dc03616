use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use pixvault::application::services::CleanupWorker;
use pixvault::application::{ImageOperations, ImageStore, LocalImageCache};
use pixvault::infrastructure::{
    AppConfig, CliArgs, ConfigManager, JsonImageRepository, LocalFileSystem, PicsumClient,
};
use pixvault::presentation::CommandRunner;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(version = pixvault::VERSION, "Starting {}", pixvault::NAME);

    let data_dir = config
        .effective_data_dir()
        .ok_or_else(|| eyre!("could not determine a data directory, pass --data-dir"))?;

    let fs = LocalFileSystem::detect(Some(data_dir.clone()), config.remote.timeout_secs).await;
    let cache = Arc::new(LocalImageCache::with_dir_name(
        fs,
        config.storage.images_dir_name.clone(),
    ));
    let repository = Arc::new(JsonImageRepository::new(&data_dir));
    let remote = Arc::new(PicsumClient::with_base_url(
        config.remote.base_url.clone(),
        config.remote.timeout_secs,
    )?);

    let (worker, cleanup) = CleanupWorker::new(cache.clone());
    let worker = worker.spawn();

    let ops = ImageOperations::new(
        Arc::new(ImageStore::new()),
        repository,
        cache,
        remote,
        cleanup,
    );

    if let Err(e) = ops.list().await {
        warn!(error = %e, "Starting with an empty saved set");
    }

    let runner = CommandRunner::new(ops, config.remote.page_size);
    let result = runner.run(args.command, &mut std::io::stdout().lock()).await;

    drop(runner);
    if let Err(e) = worker.await {
        warn!(error = %e, "Cleanup worker stopped abnormally");
    }

    result
}
