use std::sync::Arc;

use chrono::Duration;

use crate::config::Config;
use crate::ingest::fetch::{PageReader, ReaderProxy};
use crate::llm_client::LlmInvoker;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: LlmInvoker,
    /// Pluggable page reader. Default: ReaderProxy over the configured reader base URL.
    pub reader: Arc<dyn PageReader>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let llm = LlmInvoker::from_config(&config)?;
        let reader = Arc::new(ReaderProxy::from_config(&config)?);
        Ok(Self::new(config, llm, reader))
    }

    pub fn new(config: Config, llm: LlmInvoker, reader: Arc<dyn PageReader>) -> Self {
        // Range-checked in Config::from_env.
        let sessions = SessionStore::new(Duration::minutes(config.session_ttl_minutes));
        Self {
            config,
            llm,
            reader,
            sessions,
        }
    }
}
