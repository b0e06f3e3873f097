//! Fetch-based script host
//!
//! Used where there is no DOM to inject into (mobile bridges, server-side
//! prefetch). A 2xx response is the load signal; the body is kept so the
//! embedding runtime can evaluate it.

use crate::scripts::host::{ScriptHost, ScriptTag};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use reqwest::Client;
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct LoadedScript {
    pub source: String,
    pub nonce: Option<String>,
    pub loaded_at: DateTime<Utc>,
}

pub struct HttpScriptHost {
    client: Client,
    scripts: RwLock<HashMap<String, LoadedScript>>,
}

impl HttpScriptHost {
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("africa-pay-core/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            scripts: RwLock::new(HashMap::new()),
        }
    }

    pub fn script_source(&self, src: &str) -> Option<String> {
        self.scripts.read().get(src).map(|s| s.source.clone())
    }

    pub fn loaded(&self, src: &str) -> Option<LoadedScript> {
        self.scripts.read().get(src).cloned()
    }

    pub fn loaded_count(&self) -> usize {
        self.scripts.read().len()
    }
}

#[async_trait]
impl ScriptHost for HttpScriptHost {
    fn exists(&self, src: &str) -> bool {
        self.scripts.read().contains_key(src)
    }

    async fn inject(&self, tag: &ScriptTag) -> Result<(), String> {
        debug!("Fetching script: {}", tag.src);

        let response = self
            .client
            .get(&tag.src)
            .send()
            .await
            .map_err(|e| format!("Request error: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Script fetch returned HTTP {}: {}", status, tag.src);
            return Err(format!("HTTP {} for {}", status, tag.src));
        }

        let source = response
            .text()
            .await
            .map_err(|e| format!("Failed to read script body: {}", e))?;

        self.scripts.write().insert(
            tag.src.clone(),
            LoadedScript {
                source,
                nonce: tag.nonce.clone(),
                loaded_at: Utc::now(),
            },
        );

        Ok(())
    }

    fn remove(&self, src: &str) {
        if self.scripts.write().remove(src).is_some() {
            debug!("Script removed: {}", src);
        }
    }
}
