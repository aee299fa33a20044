use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;

use interviewbot_core::InterviewController;
use interviewbot_logging::{LogEvent, Logger};

use crate::api::{self, SessionStore};
use crate::config::Settings;

/// Serve the interview page and API until Ctrl+C
pub async fn run(
    settings: &Settings,
    controller: Arc<InterviewController>,
    logger: Arc<Logger>,
    open_browser: bool,
) -> Result<()> {
    let store = Arc::new(SessionStore::new());
    tokio::spawn(evict_idle_sessions(
        store.clone(),
        settings.session_idle_timeout,
        logger.clone(),
    ));
    let provider = controller.service().provider_type();
    let router = api::create_router(store, controller, logger.clone());

    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind server to {}", addr))?;
    let local_addr = listener
        .local_addr()
        .context("Failed to read listener address")?;

    logger.log(&LogEvent::ServerStarted {
        addr: local_addr.to_string(),
        provider: provider.to_string(),
        model: settings.completion.model.clone(),
    });

    let url = format!("http://{}", local_addr);
    eprintln!();
    eprintln!("  {} {}", "->".bright_green(), format!("Open {}", url).bold());
    eprintln!("  {} Press {} to stop", "->".dimmed(), "Ctrl+C".bold());
    eprintln!();

    if open_browser {
        if let Err(e) = open::that(&url) {
            eprintln!("Failed to open browser: {} (open {} manually)", e, url);
        }
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

/// Periodically discard sessions whose page went away without deleting them
async fn evict_idle_sessions(store: Arc<SessionStore>, max_idle: Duration, logger: Arc<Logger>) {
    let period = (max_idle / 4).max(Duration::from_secs(1));
    let mut interval = tokio::time::interval(period);
    interval.tick().await;

    loop {
        interval.tick().await;
        let count = store.evict_idle(max_idle);
        if count > 0 {
            logger.log(&LogEvent::SessionsEvicted {
                count,
                idle_secs: max_idle.as_secs(),
            });
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    eprintln!("\nShutting down...");
}
