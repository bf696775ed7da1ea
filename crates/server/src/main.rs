mod backend;
mod config;
mod refresh;
mod routes;
mod scheduler;

#[cfg(test)]
mod fake;

use std::panic::PanicHookInfo;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::FilterFn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::backend::{Backend, HttpFetcher};
use crate::config::Args;
use crate::refresh::{MapState, RefreshCycle};
use crate::routes::AppState;
use crate::scheduler::RefreshScheduler;

fn setup_logging(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let filter = FilterFn::new(|metadata| {
        metadata
            .module_path()
            .unwrap_or_default()
            .starts_with("railwatch")
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(filter)
        .with(level)
        .init();
    std::panic::set_hook(Box::new(panic_hook));
}

fn panic_hook(info: &PanicHookInfo) {
    tracing::error!("{info}")
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let backend = Arc::new(Backend::new(HttpFetcher::new(args.backend_url.clone())?));
    let map = Arc::new(MapState::new(args.engine_options()));
    let cycle = Arc::new(RefreshCycle::new(backend.clone(), map.clone()));
    let scheduler = Arc::new(RefreshScheduler::new(cycle));

    let period = backend.refresh_period().await;
    info!(backend = %args.backend_url, seconds = period.seconds(), "starting refresh");
    scheduler.start(period).await;

    let app = routes::create_router(AppState {
        map,
        scheduler: scheduler.clone(),
        backend,
    });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port)).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    scheduler.stop().await;
    info!("shut down");
    Ok(())
}
