//! Shared per-invocation context.

use anyhow::{Context as _, Result};
use roster_business::{ApiConfig, Http};

use crate::output::Output;
use crate::session_file::FileSessionStore;

/// Everything a command needs: endpoint config, the HTTP client, the
/// session store, and the output helper. Built once per invocation.
pub struct CliContext {
    pub config: ApiConfig,
    pub http: Http,
    pub store: FileSessionStore,
    pub out: Output,
}

impl CliContext {
    pub fn new(api_url: Option<String>) -> Result<Self> {
        let config = match api_url {
            Some(base_url) => ApiConfig::new(base_url),
            None => ApiConfig::default(),
        };

        let store =
            FileSessionStore::open_default().context("Failed to locate the session store")?;

        Ok(Self {
            config,
            http: Http::new(),
            store,
            out: Output::new(),
        })
    }
}
