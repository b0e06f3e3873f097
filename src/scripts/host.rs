//! Host capability trait
//!
//! A browser build implements this over the DOM (script tag + load/error
//! events), a mobile build over its module loader.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Script element to be injected into the host environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTag {
    pub src: String,
    /// CSP nonce forwarded verbatim
    pub nonce: Option<String>,
    pub async_load: bool,
}

impl ScriptTag {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            nonce: None,
            async_load: true,
        }
    }

    pub fn with_nonce(mut self, nonce: Option<String>) -> Self {
        self.nonce = nonce.filter(|n| !n.is_empty());
        self
    }
}

#[async_trait]
pub trait ScriptHost: Send + Sync + 'static {
    /// Whether a script with this source is already present.
    fn exists(&self, src: &str) -> bool;

    /// Inject the script and wait for its load or error signal.
    ///
    /// `Ok(())` is the load signal; `Err(message)` is the error signal. The
    /// loader drops this future when the attempt times out.
    async fn inject(&self, tag: &ScriptTag) -> Result<(), String>;

    /// Remove a partially loaded or failed script.
    fn remove(&self, src: &str);
}
