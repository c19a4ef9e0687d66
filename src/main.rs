// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AniList export CLI
//!
//! Fetches a user's AniList media list and list activity and writes them as a
//! GDPR-style JSON archive.

use anilist_export::{
    config::Config,
    services::{AniListClient, ExportOptions, Exporter},
};
use anyhow::Context;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Export an AniList user's lists and list activity to a JSON archive.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// AniList username to export.
    #[arg(long, value_name = "NAME")]
    username: Option<String>,

    /// AniList API token, needed for private lists.
    /// Falls back to $ANILIST_TOKEN.
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,

    /// Resume from the existing archive at the output path and merge into it.
    #[arg(long)]
    update_data: bool,

    /// Archive path.
    #[arg(short, long, value_name = "PATH", default_value = "data-export.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(username) = cli.username.clone().filter(|name| !name.trim().is_empty()) else {
        eprintln!("{}", Cli::command().render_usage());
        return ExitCode::FAILURE;
    };

    match run(cli, username).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Export failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, username: String) -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_logging(config.log_json);

    tracing::info!(
        username = %username,
        output = %cli.output.display(),
        update_data = cli.update_data,
        "Starting AniList export"
    );

    let options = ExportOptions {
        username,
        token: cli.token.or_else(|| config.token.clone()),
        update_data: cli.update_data,
        output: cli.output,
    };

    let exporter = Exporter::new(AniListClient::new(config.api_url.clone()), &config);
    let summary = exporter.run(&options).await.context("Export run failed")?;

    println!(
        "Wrote {} lists and {} activity items to {}",
        summary.lists,
        summary.activity,
        summary.output.display()
    );
    Ok(())
}

/// Initialize logging to stderr; `LOG_FORMAT=json` gives structured JSON lines.
fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("anilist_export=info,warn"));

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_current_span(true)
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
