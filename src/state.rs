use std::path::PathBuf;

use crate::config::Theme;
use crate::engine::queue::OrderDispatcher;
use crate::observability::metrics::Metrics;

/// Everything a request may touch. Built once before the listener binds;
/// nothing in here is mutated per request apart from metric counters.
pub struct AppState {
    pub dispatcher: OrderDispatcher,
    pub theme: Theme,
    pub public_dir: PathBuf,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(dispatcher: OrderDispatcher, theme: Theme, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            dispatcher,
            theme,
            public_dir: public_dir.into(),
            metrics: Metrics::new(),
        }
    }
}
