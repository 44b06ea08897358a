//! Album Backup - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use album_backup::{
    api::{CollectionApi, ConfigCredentialProvider, CredentialProvider, RestCollectionApi, TransportClient},
    cli::Args,
    config::{validate_config, Config},
    download::{AssetFetcher, Pipeline, RetryPolicy},
    error::{exit_codes, Error, Result},
    output::{
        create_spinner, print_banner, print_config_summary, print_error, print_info,
        print_run_summary, print_success, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let strict_exit = args.strict_exit;

    match run(args).await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        // Nothing to back up is not a failure.
        Err(e @ Error::NoAlbums { .. }) => {
            print_warning(&format!("{}. Are there that many albums?", e));
            ExitCode::from(e.exit_code(strict_exit) as u8)
        }
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(e.exit_code(strict_exit) as u8)
        }
    }
}

async fn run(args: Args) -> Result<()> {
    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let save_config = args.save_config;
    let strict_exit = args.strict_exit;
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    args.merge_into_config(&mut config);
    validate_config(&config)?;

    if save_config {
        config.save(&config_path)?;
        print_success(&format!("Saved configuration to {}", config_path.display()));
    }

    let backup_dir = config.backup_directory();
    print_config_summary(
        config.options.page,
        config.options.albums_per_run,
        config.options.max_concurrent_downloads,
        &backup_dir,
    );

    // Credential and API client
    let credential = ConfigCredentialProvider::new(config.account.clone()).current_credential()?;
    let transport = TransportClient::new(
        config.request_timeout(),
        config.options.transport_retries,
        Duration::from_millis(config.options.transport_backoff_ms),
    )?;
    let api: Arc<dyn CollectionApi> = Arc::new(RestCollectionApi::new(
        transport.clone(),
        config.options.api_base.clone(),
        config.account.api_key.clone(),
        credential,
    ));

    // Validate credential
    let user = api.login().await?;
    print_success(&format!(
        "Logged in as {} [{}]",
        user.id, user.username.content
    ));
    let user_id = config.account.user_id.clone().unwrap_or(user.id);

    // Fetch one page of albums
    let page = config.options.page;
    let per_page = config.options.albums_per_run;
    print_info(&format!("Backing up {} albums, page {}", per_page, page));

    let spinner = create_spinner("Fetching albums...");
    let albums = api.list_albums(&user_id, page, per_page).await;
    spinner.finish_and_clear();
    let albums = albums?;

    if albums.is_empty() {
        return Err(Error::NoAlbums { page, per_page });
    }

    // Run the pipeline
    let retry = RetryPolicy::new(config.options.max_attempts).with_delay(config.retry_delay());
    let fetcher = AssetFetcher::new(Arc::clone(&api), transport, backup_dir, retry);
    let pipeline = Pipeline::new(api, fetcher, config.options.max_concurrent_downloads);

    if let Some(deadline) = config.run_deadline() {
        pipeline.cancel_after(deadline);
    }

    let cancel = pipeline.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        print_warning("Interrupted, cancelling remaining downloads (press Ctrl-C again to quit)...");
        cancel.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            print_error("Interrupted again, exiting");
            let code = if strict_exit {
                exit_codes::INTERRUPTED
            } else {
                exit_codes::SUCCESS
            };
            std::process::exit(code);
        }
    });

    let summary = pipeline.run(albums, config.options.show_progress).await;
    print_run_summary(&summary);

    // Download errors are reported, not fatal.
    Ok(())
}
