//! Application state management

use anyhow::Result;
use std::sync::Arc;

use crate::config::Config;
use crate::glb_fetch::GlbFetcher;

/// Shared application state
pub struct AppState {
    /// Room model fetcher
    pub glb: GlbFetcher,
    /// Configuration
    pub config: Config,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let glb = GlbFetcher::new(&config.asset)?;
        Ok(Arc::new(Self { glb, config }))
    }
}
