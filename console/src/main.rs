//! Fitware Console
//!
//! Navigates to a console path, loads that page's data from the API and
//! prints the resulting page state as JSON.
//!
//! ```text
//! fitware-console [PATH] [--pdf]
//! ```
//!
//! `--pdf` on `/reportes` also downloads the report document into
//! `reports.output_dir`.

use anyhow::Result;
use fitware_console::config::ConsoleConfig;
use fitware_console::error::ConsoleResult;
use fitware_console::pages::{
    ClientProgressPage, ClientsPage, DashboardPage, ExercisesPage, ReportsPage, RoutinesPage,
    SessionsPage,
};
use fitware_console::routes::{self, Route};
use fitware_console::state::ConsoleState;
use serde_json::json;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = ConsoleConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if ConsoleConfig::is_production() { "production" } else { "development" },
        base_url = %config.api.base_url,
        "Starting Fitware console"
    );

    if ConsoleConfig::is_production() {
        if let Err(e) = config.validate_production() {
            error!("Configuration error: {}", e);
            anyhow::bail!("Invalid production configuration");
        }
    }

    let state = ConsoleState::new(config)?;

    let mut path = String::from("/");
    let mut download_pdf = false;
    for arg in std::env::args().skip(1) {
        if arg == "--pdf" {
            download_pdf = true;
        } else {
            path = arg;
        }
    }

    let route = routes::navigate(&path);
    info!(path = %path, route = %route, "Opening page");

    let output = render(&state, route, download_pdf).await?;
    println!("{}", output);
    Ok(())
}

/// Load the page behind `route` and serialize its state
async fn render(state: &ConsoleState, route: Route, download_pdf: bool) -> Result<String> {
    let api = state.api().clone();

    let value = match route {
        Route::Login => json!({
            "page": "login",
            "apiBaseUrl": api.base_url().as_str(),
        }),
        Route::Dashboard | Route::Home => serde_json::to_value(DashboardPage::new())?,
        Route::Exercises => {
            let mut page = ExercisesPage::new(api);
            report(page.load().await);
            serde_json::to_value(&page)?
        }
        Route::Clients => {
            let mut page = ClientsPage::new(api);
            report(page.load().await);
            serde_json::to_value(&page)?
        }
        Route::ClientProgress(cedula) => match ClientProgressPage::open(api.clone(), &cedula) {
            Ok(mut page) => {
                report(page.load().await);
                serde_json::to_value(&page)?
            }
            Err(redirect) => {
                info!(to = %redirect, "Missing client identifier, redirecting");
                let mut page = ClientsPage::new(api);
                report(page.load().await);
                serde_json::to_value(&page)?
            }
        },
        Route::Routines => {
            let mut page = RoutinesPage::new(api);
            report(page.load_routines().await);
            serde_json::to_value(&page)?
        }
        Route::Sessions => {
            let mut page = SessionsPage::new(api);
            report(page.load_sessions().await);
            serde_json::to_value(&page)?
        }
        Route::Reports => {
            let mut page = ReportsPage::new(api, state.config().reports.output_dir.clone());
            report(page.query().await);
            if download_pdf {
                if let Some(path) = report(page.download().await).flatten() {
                    info!(path = %path.display(), "Report PDF written");
                }
            }
            serde_json::to_value(&page)?
        }
        Route::NotFound => json!({ "page": "not-found" }),
    };

    Ok(serde_json::to_string_pretty(&value)?)
}

/// Log a failed page action; the page keeps its error banner
fn report<T>(result: ConsoleResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, status = ?e.status(), "Page action failed");
            None
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if ConsoleConfig::is_production() {
            "fitware_console=info".into()
        } else {
            "fitware_console=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if ConsoleConfig::is_production() {
        // JSON logging for production
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
