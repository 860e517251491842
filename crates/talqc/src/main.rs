pub(crate) mod cli;

use clap::Parser;
use dotenv::dotenv;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

use core_config::RemoteConfig;
use core_db::{PgQueryExecutor, QueryExecutor};
use qc_reports::{ReportContext, run_reports};

const TARGETS: [&str; 5] = [
    "talqc",
    "qc_reports",
    "core_db",
    "core_report",
    "core_config",
];

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let opts = cli::CliOpts::parse();
    setup_tracing(&opts);

    match run(opts).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(opts: cli::CliOpts) -> Result<(), Box<dyn std::error::Error>> {
    let reports = opts.reports();

    let executor = Arc::new(PgQueryExecutor::connect(&opts.database_url).await?);

    let links = match &opts.config_url {
        Some(url) => Some(RemoteConfig::fetch(url).await?),
        None => None,
    };

    let mut ctx = ReportContext::new(executor.clone(), opts.rpt_dir);
    if let Some(logical_db) = opts.project_logical_db {
        ctx = ctx.with_project_logical_db(logical_db);
    }
    if let Some(links) = links {
        ctx = ctx.with_links(links);
    }

    let outcome = run_reports(&reports, &ctx).await;
    // release the connection on every exit path
    executor.close().await;
    outcome?;
    Ok(())
}

fn setup_tracing(opts: &cli::CliOpts) {
    let level: LevelFilter = opts.tracing_level.clone().into();
    let targets = TARGETS
        .iter()
        .fold(Targets::new(), |targets, name| {
            targets.with_target(*name, level)
        });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(targets))
        .init();
}
