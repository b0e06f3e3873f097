//! End-to-end checkout flow over a scripted host and fake vendor widgets

mod common;

use africa_pay_core::config::LoaderConfig;
use africa_pay_core::payments::{
    CheckoutEvent, CheckoutRequest, CheckoutSdk, Customer, PaymentConfig, PaymentError,
    PaymentProvider, PaymentSession, SessionState,
};
use africa_pay_core::payments::error::PaymentResult;
use africa_pay_core::scripts::ScriptLoader;
use async_trait::async_trait;
use common::{Behavior, ScriptedHost};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Widget that replies with a canned event and records what it was given.
struct FakeWidget {
    provider: PaymentProvider,
    reply: PaymentResult<CheckoutEvent>,
    opened: Mutex<Vec<CheckoutRequest>>,
}

impl FakeWidget {
    fn new(provider: PaymentProvider, reply: PaymentResult<CheckoutEvent>) -> Self {
        Self {
            provider,
            reply,
            opened: Mutex::new(Vec::new()),
        }
    }

    fn completes_with(provider: PaymentProvider, payload: serde_json::Value) -> Self {
        Self::new(provider, Ok(CheckoutEvent::Completed(payload)))
    }

    fn opened(&self) -> Vec<CheckoutRequest> {
        self.opened.lock().clone()
    }
}

#[async_trait]
impl CheckoutSdk for FakeWidget {
    fn provider(&self) -> PaymentProvider {
        self.provider
    }

    async fn open(&self, request: &CheckoutRequest) -> PaymentResult<CheckoutEvent> {
        self.opened.lock().push(request.clone());
        self.reply.clone()
    }
}

/// Widget that stays open until the test releases it.
struct GatedWidget {
    release: Mutex<Option<oneshot::Receiver<CheckoutEvent>>>,
    opened: Mutex<Option<oneshot::Sender<()>>>,
}

/// Returns the widget, a receiver fired once `open` is entered and the
/// sender that completes the checkout.
fn gated_widget() -> (
    GatedWidget,
    oneshot::Receiver<()>,
    oneshot::Sender<CheckoutEvent>,
) {
    let (release_tx, release_rx) = oneshot::channel();
    let (opened_tx, opened_rx) = oneshot::channel();
    let widget = GatedWidget {
        release: Mutex::new(Some(release_rx)),
        opened: Mutex::new(Some(opened_tx)),
    };
    (widget, opened_rx, release_tx)
}

#[async_trait]
impl CheckoutSdk for GatedWidget {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Paystack
    }

    async fn open(&self, _request: &CheckoutRequest) -> PaymentResult<CheckoutEvent> {
        let release = self.release.lock().take();
        let release = match release {
            Some(release) => release,
            None => return Err(PaymentError::sdk("widget already opened")),
        };
        if let Some(opened) = self.opened.lock().take() {
            opened.send(()).ok();
        }
        release
            .await
            .map_err(|_| PaymentError::sdk("widget dropped"))
    }
}

fn session(host: ScriptedHost) -> PaymentSession<ScriptedHost> {
    PaymentSession::new(Arc::new(ScriptLoader::new(host, LoaderConfig::default())))
}

fn paystack_config() -> PaymentConfig {
    PaymentConfig::new(
        PaymentProvider::Paystack,
        "pk_test_xxx",
        500_000,
        "ngn",
        "PAYSTACK_1700000000",
        Customer::new(" <i>Customer</i>@Example.com ").with_name("John <b>Doe</b>"),
    )
}

#[tokio::test]
async fn test_paystack_checkout_succeeds() {
    let loader = Arc::new(ScriptLoader::new(
        ScriptedHost::always_loads(),
        LoaderConfig::default(),
    ));
    let session = PaymentSession::new(Arc::clone(&loader));
    let widget = FakeWidget::completes_with(
        PaymentProvider::Paystack,
        json!({ "reference": "PAYSTACK_1700000000", "trans": "4099260516", "status": "success" }),
    );

    let config = paystack_config().with_metadata(json!({
        "order id": "A-1",
        "note": "<script>alert(1)</script>thanks"
    }));
    let state = session.initialize_payment(&widget, config).await;

    let response = match state {
        SessionState::Succeeded(response) => response,
        other => panic!("unexpected state: {:?}", other),
    };
    assert_eq!(response.reference, "PAYSTACK_1700000000");
    assert_eq!(response.transaction_id.as_deref(), Some("4099260516"));
    assert_eq!(response.currency, "NGN");
    assert_eq!(response.message, "Payment completed successfully");
    assert_eq!(response.customer.email, "customer@example.com");
    assert_eq!(response.metadata["orderid"], json!("A-1"));
    assert_eq!(response.metadata["note"], json!("thanks"));
    assert_eq!(session.response(), Some(response.clone()));
    assert!(!session.is_loading());

    let opened = widget.opened();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].customer.name.as_deref(), Some("John Doe"));

    assert_eq!(
        loader.cached_urls(),
        vec![PaymentProvider::Paystack.script_url().to_string()]
    );
}

#[tokio::test]
async fn test_closed_widget_settles_as_closed() {
    let session = session(ScriptedHost::always_loads());
    let widget = FakeWidget::new(PaymentProvider::Paystack, Ok(CheckoutEvent::Closed));

    let state = session.initialize_payment(&widget, paystack_config()).await;

    assert_eq!(state, SessionState::Closed);
    assert!(session.error().is_none());
    assert!(session.response().is_none());
}

#[tokio::test]
async fn test_validation_failure_skips_script_load() {
    let loader = Arc::new(ScriptLoader::new(
        ScriptedHost::always_loads(),
        LoaderConfig::default(),
    ));
    let session = PaymentSession::new(Arc::clone(&loader));
    let widget = FakeWidget::completes_with(PaymentProvider::Flutterwave, json!({}));

    // Flutterwave needs a phone number
    let config = PaymentConfig::new(
        PaymentProvider::Flutterwave,
        "FLWPUBK_TEST-xxx",
        500_000,
        "NGN",
        "FLW_1",
        Customer::new("customer@example.com"),
    );
    session.initialize_payment(&widget, config).await;

    let err = session.error().unwrap();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert_eq!(err.provider, Some(PaymentProvider::Flutterwave));
    assert!(err.to_string().contains("Phone number is required for Flutterwave"));
    assert_eq!(loader.host().injection_count(), 0);
    assert!(widget.opened().is_empty());
}

#[tokio::test]
async fn test_sanitization_failure_is_reported() {
    let loader = Arc::new(ScriptLoader::new(
        ScriptedHost::always_loads(),
        LoaderConfig::default(),
    ));
    let session = PaymentSession::new(Arc::clone(&loader));
    let widget = FakeWidget::completes_with(PaymentProvider::Paystack, json!({}));

    let mut config = paystack_config();
    config.reference = "###".to_string();
    session.initialize_payment(&widget, config).await;

    assert_eq!(session.error().unwrap().code(), "SANITIZATION_FAILED");
    assert_eq!(loader.host().injection_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_script_load_failure_surfaces_as_payment_error() {
    let loader = Arc::new(ScriptLoader::new(
        ScriptedHost::always_fails(),
        LoaderConfig::default(),
    ));
    let session = PaymentSession::new(Arc::clone(&loader));
    let widget = FakeWidget::completes_with(PaymentProvider::Paystack, json!({}));

    session.initialize_payment(&widget, paystack_config()).await;

    let err = session.error().unwrap();
    assert_eq!(err.code(), "SCRIPT_LOAD_FAILED");
    assert_eq!(err.provider, Some(PaymentProvider::Paystack));
    assert!(err.is_retryable());
    assert_eq!(loader.host().injection_count(), 4);
    assert!(widget.opened().is_empty());
}

#[tokio::test]
async fn test_nonce_reaches_script_tag() {
    let loader = Arc::new(ScriptLoader::new(
        ScriptedHost::always_loads(),
        LoaderConfig::default(),
    ));
    let session = PaymentSession::new(Arc::clone(&loader));
    let widget = FakeWidget::new(PaymentProvider::Paystack, Ok(CheckoutEvent::Closed));

    session
        .initialize_payment(&widget, paystack_config().with_nonce("csp-nonce"))
        .await;

    let tags = loader.host().injected_tags();
    assert_eq!(tags[0].src, PaymentProvider::Paystack.script_url());
    assert_eq!(tags[0].nonce.as_deref(), Some("csp-nonce"));
}

#[tokio::test]
async fn test_provider_mismatch_is_rejected() {
    let session = session(ScriptedHost::always_loads());
    let widget = FakeWidget::completes_with(PaymentProvider::Monnify, json!({}));

    session.initialize_payment(&widget, paystack_config()).await;

    let err = session.error().unwrap();
    assert!(err.is_validation());
    assert!(widget.opened().is_empty());
}

#[tokio::test]
async fn test_monnify_declined_payment_fails() {
    let session = session(ScriptedHost::always_loads());
    let widget = FakeWidget::completes_with(
        PaymentProvider::Monnify,
        json!({ "paymentStatus": "FAILED", "paymentDescription": "Card declined" }),
    );

    let config = PaymentConfig::new(
        PaymentProvider::Monnify,
        "MK_TEST_xxx",
        250_000,
        "NGN",
        "MNFY_1",
        Customer::new("customer@example.com").with_name("Amaka Obi"),
    )
    .with_contract_code("1234567890");
    session.initialize_payment(&widget, config).await;

    let err = session.error().unwrap();
    assert_eq!(err.code(), "PAYMENT_FAILED");
    assert!(err.to_string().contains("Card declined"));
}

#[tokio::test]
async fn test_sdk_error_is_tagged_with_provider() {
    let session = session(ScriptedHost::always_loads());
    let widget = FakeWidget::new(
        PaymentProvider::Paystack,
        Err(PaymentError::sdk("PaystackPop is not defined")),
    );

    session.initialize_payment(&widget, paystack_config()).await;

    let err = session.error().unwrap();
    assert_eq!(err.code(), "SDK_ERROR");
    assert_eq!(err.provider, Some(PaymentProvider::Paystack));
}

#[tokio::test]
async fn test_reset_returns_to_idle() {
    let session = session(ScriptedHost::new(Behavior::Load));
    let widget = FakeWidget::new(PaymentProvider::Paystack, Ok(CheckoutEvent::Closed));

    session.initialize_payment(&widget, paystack_config()).await;
    assert_eq!(session.state(), SessionState::Closed);

    session.reset();
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_loading_is_observable_during_checkout() {
    let session = session(ScriptedHost::always_loads());
    let observer = session.clone();
    let (widget, opened, release) = gated_widget();
    assert_eq!(session.state(), SessionState::Idle);

    let watch = async move {
        opened.await.unwrap();
        assert!(observer.is_loading());
        assert_eq!(observer.state(), SessionState::Loading);
        assert!(observer.error().is_none());
        release.send(CheckoutEvent::Closed).unwrap();
    };
    let (settled, ()) = tokio::join!(
        session.initialize_payment(&widget, paystack_config()),
        watch
    );

    assert_eq!(settled, SessionState::Closed);
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_second_checkout_rejected_while_loading() {
    let session = session(ScriptedHost::always_loads());
    let (widget, opened, release) = gated_widget();
    let other = FakeWidget::new(PaymentProvider::Paystack, Ok(CheckoutEvent::Closed));

    let second = async {
        opened.await.unwrap();
        let rejected = session.initialize_payment(&other, paystack_config()).await;
        release.send(CheckoutEvent::Closed).unwrap();
        rejected
    };
    let (first, rejected) = tokio::join!(
        session.initialize_payment(&widget, paystack_config()),
        second
    );

    match rejected {
        SessionState::Failed(err) => assert!(err.is_validation()),
        other => panic!("unexpected state: {:?}", other),
    }
    assert!(other.opened().is_empty());
    assert_eq!(first, SessionState::Closed);
    assert_eq!(session.state(), SessionState::Closed);
}

#[tokio::test]
async fn test_cancelled_checkout_returns_to_idle() {
    let session = session(ScriptedHost::always_loads());
    let (widget, opened, _release) = gated_widget();

    {
        let checkout = session.initialize_payment(&widget, paystack_config());
        tokio::pin!(checkout);
        tokio::select! {
            _ = &mut checkout => panic!("checkout settled without release"),
            _ = opened => {}
        }
        assert!(session.is_loading());
    }

    assert_eq!(session.state(), SessionState::Idle);
}
