//! CLI entry point for the screenshot tool.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use screenshot_api::{Client, ClientParams};
use tracing::{debug, info};

mod app_config;
mod cli;

use app_config::{API_KEY_ENV, load_default_file_config, resolve_api_key};
use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // stdout may carry the screenshot itself
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let file_config = load_default_file_config()?;
    debug!(?file_config, "Loaded file config");

    let env_key = std::env::var(API_KEY_ENV).ok();
    let Some(api_key) = resolve_api_key(args.api_key.as_deref(), env_key.as_deref(), &file_config)
    else {
        bail!("No API key provided: use --api-key, {API_KEY_ENV} or the config file");
    };

    let mut params = ClientParams::default();
    if let Some(base_url) = args.base_url.as_deref().or(file_config.base_url.as_deref()) {
        params.base_url = base_url
            .parse()
            .with_context(|| format!("Invalid base URL '{base_url}'"))?;
    }
    if let Some(secs) = file_config.connect_timeout_secs {
        params.connect_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = file_config.read_timeout_secs {
        params.read_timeout = Duration::from_secs(secs);
    }

    let options = args.capture_options()?;
    let client = Client::new(api_key, params);
    debug!(?client, options = options.len(), "Client ready");

    if let Some(output) = &args.output {
        client
            .get(&args.url, output, &options)
            .await
            .with_context(|| format!("Failed to capture '{}'", args.url))?;
        info!(path = %output.display(), "Screenshot saved");
    } else {
        let response = client
            .get_raw(&args.url, &options)
            .await
            .with_context(|| format!("Failed to capture '{}'", args.url))?;
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(&response.body)
            .context("Failed to write response to stdout")?;
        stdout.flush()?;
        info!(bytes = response.body.len(), "Screenshot written to stdout");
    }

    Ok(())
}
