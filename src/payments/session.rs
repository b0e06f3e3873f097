//! Checkout session state machine
//!
//! `Idle -> Loading -> Succeeded | Closed | Failed`. Validation and
//! sanitization run before any script is requested, so a rejected config never
//! causes network activity.

use crate::payments::error::{PaymentError, PaymentResult};
use crate::payments::providers;
use crate::payments::traits::CheckoutSdk;
use crate::payments::types::{PaymentConfig, PaymentOutcome, PaymentResponse};
use crate::payments::validation::prepare_checkout;
use crate::scripts::{LoadOptions, ScriptHost, ScriptLoader};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Succeeded(PaymentResponse),
    Closed,
    Failed(PaymentError),
}

/// One checkout flow, driven by a loader shared across the application.
///
/// The state lives behind a lock so a UI can poll `is_loading()` or `state()`
/// from another task while `initialize_payment` is running. Clones share the
/// same state.
pub struct PaymentSession<H: ScriptHost> {
    loader: Arc<ScriptLoader<H>>,
    state: Arc<RwLock<SessionState>>,
}

impl<H: ScriptHost> Clone for PaymentSession<H> {
    fn clone(&self) -> Self {
        Self {
            loader: Arc::clone(&self.loader),
            state: Arc::clone(&self.state),
        }
    }
}

impl<H: ScriptHost> PaymentSession<H> {
    pub fn new(loader: Arc<ScriptLoader<H>>) -> Self {
        Self {
            loader,
            state: Arc::new(RwLock::new(SessionState::Idle)),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.state.read(), SessionState::Loading)
    }

    pub fn error(&self) -> Option<PaymentError> {
        match &*self.state.read() {
            SessionState::Failed(e) => Some(e.clone()),
            _ => None,
        }
    }

    pub fn response(&self) -> Option<PaymentResponse> {
        match &*self.state.read() {
            SessionState::Succeeded(r) => Some(r.clone()),
            _ => None,
        }
    }

    /// Return to `Idle`. Has no effect on a checkout that is still running;
    /// it settles the state when it finishes.
    pub fn reset(&self) {
        *self.state.write() = SessionState::Idle;
    }

    /// Run one checkout to completion and return the settled state.
    ///
    /// Only one checkout runs per session at a time. A call made while another
    /// is loading returns a `Failed` state and leaves the running one alone.
    pub async fn initialize_payment<S>(&self, sdk: &S, config: PaymentConfig) -> SessionState
    where
        S: CheckoutSdk + ?Sized,
    {
        {
            let mut state = self.state.write();
            if matches!(*state, SessionState::Loading) {
                warn!(
                    "Checkout already in progress, ignoring new request: provider={}, reference={}",
                    config.provider, config.reference
                );
                return SessionState::Failed(
                    PaymentError::validation(
                        "A payment is already in progress",
                        "Wait for the current checkout to finish before starting another",
                    )
                    .with_provider(config.provider),
                );
            }
            *state = SessionState::Loading;
        }
        let mut guard = LoadingGuard {
            state: &self.state,
            armed: true,
        };

        let settled = match self.checkout(sdk, &config).await {
            Ok(PaymentOutcome::Succeeded(response)) => {
                info!(
                    "Payment succeeded: provider={}, reference={}",
                    response.provider, response.reference
                );
                SessionState::Succeeded(response)
            }
            Ok(PaymentOutcome::Closed) => {
                info!(
                    "Payment window closed: provider={}, reference={}",
                    config.provider, config.reference
                );
                SessionState::Closed
            }
            Ok(PaymentOutcome::Failed(e)) | Err(e) => {
                // Display output is already redacted
                error!(
                    "Payment failed: provider={}, code={}: {}",
                    config.provider,
                    e.code(),
                    e
                );
                SessionState::Failed(e)
            }
        };

        *self.state.write() = settled.clone();
        guard.armed = false;
        settled
    }

    async fn checkout<S>(&self, sdk: &S, config: &PaymentConfig) -> PaymentResult<PaymentOutcome>
    where
        S: CheckoutSdk + ?Sized,
    {
        let provider = config.provider;

        if sdk.provider() != provider {
            return Err(PaymentError::validation(
                format!(
                    "Checkout SDK for {} cannot process a {} payment",
                    sdk.provider(),
                    provider
                ),
                "Pass the SDK binding that matches the configured provider",
            )
            .with_provider(provider));
        }

        let request = prepare_checkout(config)?;

        let mut options = LoadOptions::new();
        options.nonce = config.nonce.clone();
        self.loader
            .load(sdk.script_url(), options)
            .await
            .map_err(|e| {
                warn!("Checkout script unavailable for {}: {}", provider, e);
                PaymentError::from(e).with_provider(provider)
            })?;

        let event = sdk
            .open(&request)
            .await
            .map_err(|e| e.with_provider(provider))?;

        Ok(providers::normalize(&request, event))
    }
}

/// Puts a session back to `Idle` when its checkout future is dropped before
/// settling, so a cancelled flow does not block the next one.
struct LoadingGuard<'a> {
    state: &'a RwLock<SessionState>,
    armed: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.write();
        if matches!(*state, SessionState::Loading) {
            warn!("Checkout cancelled before settling");
            *state = SessionState::Idle;
        }
    }
}
