//! Application state shared across handlers

use crate::config::Settings;
use crate::metrics::SearchMetrics;
use crate::providers::SearchProvider;
use crate::report::{ReporterSet, TracingReporter};
use crate::research::ResearchTools;
use crate::search::Search;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Research tools over the search pipeline
    pub tools: ResearchTools,
    /// Counters fed by every batch
    pub metrics: Arc<SearchMetrics>,
}

impl AppState {
    /// Create new application state around `provider`
    pub fn new(settings: Settings, provider: Arc<dyn SearchProvider>) -> Self {
        let metrics = Arc::new(SearchMetrics::new());
        let reporter = ReporterSet::new()
            .with(Arc::new(TracingReporter))
            .with(metrics.clone());

        let search = Arc::new(Search::from_settings(&settings, provider, Some(Arc::new(reporter))));
        let tools = ResearchTools::new(search);

        Self {
            settings: Arc::new(settings),
            tools,
            metrics,
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
