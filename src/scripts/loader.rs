//! Script loader with timeout, exponential backoff and per-URL dedup
//!
//! Each URL gets at most one attempt sequence. The sequence runs on its own
//! tokio task and its result is cached as a shared future, so concurrent and
//! later callers all observe the same outcome until the cache is cleared.

use crate::config::{backoff_delay, LoaderConfig, MAX_ALLOWED_RETRIES};
use crate::error::{AttemptFailure, ScriptLoadError, ScriptLoadResult};
use crate::sanitize::redact_sensitive_data;
use crate::scripts::host::{ScriptHost, ScriptTag};
use crate::scripts::transport::check_transport;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

type SharedLoad = Shared<BoxFuture<'static, ScriptLoadResult<()>>>;

/// Per-call overrides. Only the call that starts an attempt sequence gets to
/// apply them; callers joining an existing sequence share its settings.
/// `retries` is capped at [`MAX_ALLOWED_RETRIES`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub nonce: Option<String>,
    pub timeout: Option<Duration>,
    pub retries: Option<u32>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }
}

/// Lifecycle of one URL inside a loader's cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    NotStarted,
    InFlight,
    Loaded,
    Failed(ScriptLoadError),
}

pub struct ScriptLoader<H: ScriptHost> {
    host: Arc<H>,
    config: LoaderConfig,
    scripts: Mutex<HashMap<String, SharedLoad>>,
}

impl<H: ScriptHost> ScriptLoader<H> {
    pub fn new(host: H, config: LoaderConfig) -> Self {
        Self::with_shared_host(Arc::new(host), config)
    }

    pub fn with_shared_host(host: Arc<H>, config: LoaderConfig) -> Self {
        info!(
            "Script loader initialized: timeout={}ms, max_retries={}, base_delay={}ms",
            config.timeout.as_millis(),
            config.max_retries,
            config.base_delay.as_millis()
        );

        Self {
            host,
            config,
            scripts: Mutex::new(HashMap::new()),
        }
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load `src` once, retrying with exponential backoff on failure.
    ///
    /// The URL is validated before anything touches the host. If a sequence
    /// for `src` is already running or has settled, its outcome is returned
    /// and `options` are ignored.
    pub async fn load(&self, src: &str, options: LoadOptions) -> ScriptLoadResult<()> {
        check_transport(src, &self.config.dev_hosts)?;

        let pending = self.pending_or_start(src, options);
        pending.await
    }

    fn pending_or_start(&self, src: &str, options: LoadOptions) -> SharedLoad {
        let mut scripts = self.scripts.lock();

        if let Some(existing) = scripts.get(src) {
            debug!("Script already requested, sharing outcome: {}", src);
            return existing.clone();
        }

        let max_retries = match options.retries {
            Some(retries) if retries > MAX_ALLOWED_RETRIES => {
                warn!(
                    "Requested {} retries for {}, capping at {}",
                    retries, src, MAX_ALLOWED_RETRIES
                );
                MAX_ALLOWED_RETRIES
            }
            Some(retries) => retries,
            None => self.config.max_retries,
        };

        let sequence = AttemptSequence {
            host: Arc::clone(&self.host),
            tag: ScriptTag::new(src).with_nonce(options.nonce),
            timeout: options
                .timeout
                .filter(|t| !t.is_zero())
                .unwrap_or(self.config.timeout),
            max_retries,
            base_delay: self.config.base_delay,
        };

        let url = src.to_string();
        let task = tokio::spawn(sequence.run());
        let shared = async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Script load task for {} failed: {}", url, e);
                    Err(ScriptLoadError::aborted(url))
                }
            }
        }
        .boxed()
        .shared();

        scripts.insert(src.to_string(), shared.clone());
        shared
    }

    pub fn state(&self, src: &str) -> LoadState {
        let pending = match self.scripts.lock().get(src) {
            Some(pending) => pending.clone(),
            None => return LoadState::NotStarted,
        };

        match pending.now_or_never() {
            None => LoadState::InFlight,
            Some(Ok(())) => LoadState::Loaded,
            Some(Err(e)) => LoadState::Failed(e),
        }
    }

    pub fn is_cached(&self, src: &str) -> bool {
        self.scripts.lock().contains_key(src)
    }

    pub fn cached_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.scripts.lock().keys().cloned().collect();
        urls.sort();
        urls
    }

    /// Drop the entry for one URL so the next `load` starts fresh.
    pub fn forget(&self, src: &str) -> bool {
        let removed = self.scripts.lock().remove(src).is_some();
        if removed {
            debug!("Script cache entry removed: {}", src);
        }
        removed
    }

    /// Drop every entry. Running sequences are not cancelled; callers already
    /// awaiting them still get their outcome.
    pub fn clear_cache(&self) {
        let mut scripts = self.scripts.lock();
        let count = scripts.len();
        scripts.clear();
        info!("Script cache cleared ({} entries)", count);
    }
}

struct AttemptSequence<H: ScriptHost> {
    host: Arc<H>,
    tag: ScriptTag,
    timeout: Duration,
    max_retries: u32,
    base_delay: Duration,
}

impl<H: ScriptHost> AttemptSequence<H> {
    async fn run(self) -> ScriptLoadResult<()> {
        let src = self.tag.src.as_str();
        let mut attempt: u32 = 0;

        loop {
            if self.host.exists(src) {
                debug!("Script already present in host: {}", src);
                return Ok(());
            }

            let failure = match timeout(self.timeout, self.host.inject(&self.tag)).await {
                Ok(Ok(())) => {
                    info!("Script loaded: {} (attempt {})", src, attempt + 1);
                    return Ok(());
                }
                Ok(Err(message)) => AttemptFailure::host(message),
                Err(_) => AttemptFailure::timeout(self.timeout.as_millis() as u64),
            };

            self.host.remove(src);

            if attempt >= self.max_retries {
                error!(
                    "Script load failed after {} attempts: {}: {}",
                    attempt + 1,
                    src,
                    redact_sensitive_data(&failure.to_string())
                );
                return Err(ScriptLoadError::load_failed(src, attempt + 1, failure));
            }

            let delay = backoff_delay(self.base_delay, attempt);
            warn!(
                "Script load failed, retrying in {}ms (attempt {}/{}): {}",
                delay.as_millis(),
                attempt + 1,
                self.max_retries,
                redact_sensitive_data(&failure.to_string())
            );
            sleep(delay).await;
            attempt += 1;
        }
    }
}
