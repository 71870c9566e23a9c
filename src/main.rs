//! company-research: concurrent web search for company research agents
//!
//! With query arguments, runs one search batch and prints the ranked results
//! as JSON. Without arguments, serves the research tools over HTTP.

use anyhow::Result;
use company_research::{
    config::{self, Settings},
    providers::TavilyProvider,
    report::{ConsoleReporter, ReporterSet, TracingReporter},
    research::TargetSearchOutput,
    web::{create_router, AppState},
    Search, SearchProvider,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("-h" | "--help") => {
            print_usage();
            return Ok(());
        }
        Some("-V" | "--version") => {
            println!("company-research {}", company_research::VERSION);
            return Ok(());
        }
        _ => {}
    }

    // Initialize logging; the level is revisited once settings are loaded
    let (filter, filter_handle) = reload::Layer::new(env_filter("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = config::load()?;
    if settings.general.debug {
        filter_handle.reload(env_filter("debug"))?;
    }

    info!("Starting company-research v{}", company_research::VERSION);

    let provider: Arc<dyn SearchProvider> = Arc::new(TavilyProvider::from_settings(&settings.provider)?);
    info!("Search provider initialized");

    if args.is_empty() {
        serve(settings, provider).await
    } else {
        run_batch(&settings, provider, &args).await
    }
}

/// `RUST_LOG` when set, otherwise `default_level`
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Run one batch over `queries` and print the results
async fn run_batch(settings: &Settings, provider: Arc<dyn SearchProvider>, queries: &[String]) -> Result<()> {
    let reporter = ReporterSet::new()
        .with(Arc::new(ConsoleReporter::new()))
        .with(Arc::new(TracingReporter));
    let search = Search::from_settings(settings, provider, Some(Arc::new(reporter)));

    print!("{}", ConsoleReporter::format_query_list(queries));
    let results = search.execute(queries).await;

    let output = TargetSearchOutput::from(results);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Serve the HTTP API until the process is stopped
async fn serve(settings: Settings, provider: Arc<dyn SearchProvider>) -> Result<()> {
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    // Create application state
    let state = AppState::new(settings, provider);
    info!("Loaded configuration for instance: {}", state.instance_name());

    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
company-research v{}
Concurrent web search aggregation for company research agents

USAGE:
    company-research [QUERY]...

With one or more queries, searches them and prints the top results as JSON.
Without arguments, starts the HTTP API.

OPTIONS:
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    RESEARCH_SETTINGS_PATH  Path to settings.yml
    RESEARCH_DEBUG          Enable debug logging (true/false)
    RESEARCH_PORT           Server port
    RESEARCH_BIND_ADDRESS   Bind address
    TAVILY_API_KEY          Search provider API key
"#,
        company_research::VERSION
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_filter_reload_raises_level() {
        let (filter, handle) = reload::Layer::new(EnvFilter::new("info"));
        let subscriber = tracing_subscriber::registry().with(filter);

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(Level::INFO));
            assert!(!tracing::enabled!(Level::DEBUG));
            handle.reload(EnvFilter::new("debug")).unwrap();
            assert!(tracing::enabled!(Level::DEBUG));
        });
    }
}
