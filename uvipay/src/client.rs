//! The Uvipay API client.
//!
//! [`UvipayClient`] pairs a validated [`PrivateKey`] with a [`Transport`].
//! Each operation builds a flat parameter set, adds the protocol fields,
//! posts it and normalizes whatever comes back into an [`Envelope`].
//!
//! Operations never fail: network problems and unusable replies both come
//! back as [`Envelope::default_error`]. Callers check
//! [`Envelope::status`] or [`Envelope::error`].

use std::fmt;

use url::form_urlencoded;

use crate::constants::{
    API_SUBVERSION, API_SUBVERSION_FIELD, API_VERSION, API_VERSION_FIELD, LIVE_FIELD, paths,
};
use crate::envelope::Envelope;
use crate::error::ConfigError;
use crate::key::PrivateKey;
use crate::params::{Lead, Params};
use crate::response::{RawResponse, TransportError, normalize};
use crate::transport::Transport;

#[cfg(feature = "telemetry")]
use tracing::instrument;

/// Client for the Uvipay payment API.
///
/// Cheap to share: all operations take `&self` and the only state is the
/// key, fixed at construction.
///
/// # Example
///
/// ```rust,ignore
/// use uvipay::{Charge, Params, UvipayClient};
///
/// let client = UvipayClient::new("sk_test_f45349e0dc5c6a7927fd", transport)?;
/// let charged = client.charge(Charge::new("0c66b09933685b7258d5bfa1971b_779", 1000)).await;
/// if charged.is_success() {
///     let id = charged.get("id").and_then(|v| v.as_str()).unwrap_or_default();
///     let refunded = client.refund(id, Params::new().with("amount", 1000)).await;
///     println!("{refunded:?}");
/// }
/// ```
#[derive(Clone)]
pub struct UvipayClient<T> {
    key: PrivateKey,
    transport: T,
}

impl<T> fmt::Debug for UvipayClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UvipayClient")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> UvipayClient<T> {
    /// Creates a client from a raw private key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the key is missing, too short or lacks the
    /// `sk_` prefix.
    pub fn new(key: &str, transport: T) -> Result<Self, ConfigError> {
        Ok(Self::from_key(PrivateKey::new(key)?, transport))
    }

    /// Creates a client from an already validated key.
    #[must_use]
    pub const fn from_key(key: PrivateKey, transport: T) -> Self {
        Self { key, transport }
    }

    /// Returns the key this client authenticates with.
    #[must_use]
    pub const fn key(&self) -> &PrivateKey {
        &self.key
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns `true` if the client talks to the live environment.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.key.is_live()
    }

    /// POSTs `params` to `path` and normalizes the reply.
    ///
    /// The protocol fields (`api_version`, `api_subversion`, `isLive`) are
    /// added to `params`, replacing caller values of the same name.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "uvipay.request", skip_all, fields(path = %path))
    )]
    pub async fn request(&self, path: &str, params: Params) -> Envelope {
        let params = self.with_protocol_fields(params);
        let outcome = self.transport.post_form(path, &params, &self.key).await;
        record_outcome(&outcome);
        let envelope = normalize(outcome);
        record_envelope(&envelope);
        envelope
    }

    /// Charges a payment token. `POST /charges`.
    pub async fn charge(&self, params: impl Into<Params>) -> Envelope {
        self.request(paths::CHARGES, params.into()).await
    }

    /// Refunds a charge. `POST /refunds`.
    ///
    /// `lead` is either the charge id or a field set carrying `charge_id`;
    /// both forms produce the same request.
    pub async fn refund(&self, lead: impl Into<Lead>, params: Params) -> Envelope {
        let params = lead.into().apply("charge_id", params);
        self.request(paths::REFUNDS, params).await
    }

    /// Reads the account balance. `POST /balance`.
    pub async fn get_balance(&self, params: Params) -> Envelope {
        self.request(paths::BALANCE, params).await
    }

    /// Cancels a subscription. `POST /subscriptions/{id}?action=delete`.
    pub async fn cancel_subscription(&self, subscription_id: &str, params: Params) -> Envelope {
        let path = format!(
            "{}/{}?action=delete",
            paths::SUBSCRIPTIONS,
            encode_path_segment(subscription_id)
        );
        self.request(&path, params).await
    }

    /// Reserves an amount behind a redemption link.
    /// `POST /transfers?action=create_paylink`.
    ///
    /// `lead` is either the amount or a field set.
    pub async fn create_paylink(&self, lead: impl Into<Lead>, params: Params) -> Envelope {
        let params = lead.into().apply("amount", params);
        self.request(paths::CREATE_PAYLINK, params).await
    }

    /// Sends a payment to a recipient.
    /// `POST /transfers?action=send_payment`.
    ///
    /// `lead` is either the amount or a field set.
    pub async fn send_payment(&self, lead: impl Into<Lead>, params: Params) -> Envelope {
        let params = lead.into().apply("amount", params);
        self.request(paths::SEND_PAYMENT, params).await
    }

    /// Takes back a previously sent payment.
    /// `POST /transfers?action=take_payment_back`.
    pub async fn reverse_payment(&self, params: Params) -> Envelope {
        self.request(paths::TAKE_PAYMENT_BACK, params).await
    }

    /// Asks the API whether a webhook delivery is genuine.
    /// `POST /webhooks/?action=verify&request_id={id}`.
    ///
    /// A field set is sent as is; a bare value is sent as `verify_for`.
    pub async fn verify_webhook(&self, request_id: &str, data: impl Into<Lead>) -> Envelope {
        let params = match data.into() {
            Lead::Fields(fields) => fields,
            Lead::Value(value) => Params::new().with("verify_for", value),
        };
        let path = format!("{}{}", paths::VERIFY_WEBHOOK, encode_query_value(request_id));
        self.request(&path, params).await
    }

    fn with_protocol_fields(&self, params: Params) -> Params {
        params
            .with(API_VERSION_FIELD, API_VERSION)
            .with(API_SUBVERSION_FIELD, API_SUBVERSION)
            .with(LIVE_FIELD, self.key.is_live())
    }
}

fn encode_query_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Percent-encodes one path segment. A literal `+` is already escaped as
/// `%2B`, so every remaining `+` stands for a space.
fn encode_path_segment(segment: &str) -> String {
    encode_query_value(segment).replace('+', "%20")
}

/// Logs how the exchange ended.
#[cfg(feature = "telemetry")]
fn record_outcome(outcome: &Result<RawResponse, TransportError>) {
    match outcome {
        Ok(response) => tracing::debug!(status = response.status, "response received"),
        Err(err) => tracing::warn!(error = %err, "request did not complete"),
    }
}

/// Logs how the exchange ended. Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_outcome(_outcome: &Result<RawResponse, TransportError>) {}

/// Flags replies that had to be replaced by the default error envelope.
#[cfg(feature = "telemetry")]
fn record_envelope(envelope: &Envelope) {
    if *envelope == Envelope::default_error() {
        tracing::warn!("no usable envelope in reply, using default error");
    }
}

/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_envelope(_envelope: &Envelope) {}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use super::*;
    use crate::params::ParamValue;
    use crate::requests::{Charge, Refund, SendPayment};

    const TEST_KEY: &str = "sk_test_f45349e0dc5c6a7927fd75c19c00f448";

    /// Records every call and replays queued outcomes, defaulting to a
    /// successful empty envelope.
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, Params, String)>>,
        replies: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    }

    impl Recorder {
        fn replying(reply: Result<RawResponse, TransportError>) -> Self {
            let recorder = Self::default();
            recorder.replies.lock().unwrap().push_back(reply);
            recorder
        }

        fn last_call(&self) -> (String, Params, String) {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn post_form(
            &self,
            path: &str,
            params: &Params,
            key: &PrivateKey,
        ) -> Result<RawResponse, TransportError> {
            self.calls.lock().unwrap().push((
                path.to_owned(),
                params.clone(),
                key.expose_secret().to_owned(),
            ));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(RawResponse::text(200, r#"{"status":true}"#)))
        }
    }

    fn client() -> UvipayClient<Arc<Recorder>> {
        UvipayClient::new(TEST_KEY, Arc::new(Recorder::default())).unwrap()
    }

    fn without_protocol_fields(mut params: Params) -> Params {
        params.remove(API_VERSION_FIELD);
        params.remove(API_SUBVERSION_FIELD);
        params.remove(LIVE_FIELD);
        params
    }

    #[test]
    fn construction_validates_key() {
        assert!(UvipayClient::new(TEST_KEY, Recorder::default()).is_ok());
        assert_eq!(
            UvipayClient::new("sk_short", Recorder::default()).unwrap_err(),
            ConfigError::KeyTooShort { len: 8, min: 20 }
        );
        assert_eq!(
            UvipayClient::new("pk_test_f45349e0dc5c6a7927fd", Recorder::default()).unwrap_err(),
            ConfigError::InvalidPrefix
        );
    }

    #[test]
    fn debug_redacts_key() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains(TEST_KEY));
    }

    #[tokio::test]
    async fn request_adds_protocol_fields() {
        let client = client();
        client
            .request("/charges", Params::new().with("isLive", true).with("a", 1))
            .await;

        let (path, params, key) = client.transport().last_call();
        assert_eq!(path, "/charges");
        assert_eq!(key, TEST_KEY);
        assert_eq!(
            params,
            Params::new()
                .with("a", 1)
                .with("api_version", "v2")
                .with("api_subversion", "1")
                .with("isLive", false)
        );
    }

    #[tokio::test]
    async fn live_keys_send_is_live() {
        let recorder = Arc::new(Recorder::default());
        let client = UvipayClient::new("sk_live_0123456789abcdef", Arc::clone(&recorder)).unwrap();
        assert!(client.is_live());
        client.get_balance(Params::new()).await;
        let (_, params, _) = recorder.last_call();
        assert_eq!(params.get("isLive"), Some(&ParamValue::Bool(true)));
    }

    #[tokio::test]
    async fn request_returns_server_envelope_verbatim() {
        let body = r#"{"status":true,"data":{"id":"ch_1"},"link_code":"x"}"#;
        let client =
            UvipayClient::new(TEST_KEY, Recorder::replying(Ok(RawResponse::text(200, body))))
                .unwrap();
        let envelope = client.request("/charges", Params::new()).await;
        assert_eq!(
            Value::from(envelope),
            json!({"status": true, "data": {"id": "ch_1"}, "link_code": "x"})
        );
    }

    #[tokio::test]
    async fn request_never_fails() {
        let outcomes = [
            Err(TransportError::new("connection refused")),
            Ok(RawResponse::text(502, "<html>Bad Gateway</html>")),
            Ok(RawResponse::json(200, json!({"ok": true}))),
            Ok(RawResponse::empty(500)),
        ];
        for outcome in outcomes {
            let client = UvipayClient::new(TEST_KEY, Recorder::replying(outcome)).unwrap();
            assert_eq!(
                client.request("/balance", Params::new()).await,
                Envelope::default_error()
            );
        }
    }

    #[tokio::test]
    async fn refund_lead_forms_are_equivalent() {
        let client = client();

        client
            .refund(
                Params::new().with("charge_id", "c1").with("amount", 5),
                Params::new(),
            )
            .await;
        let (path_a, from_fields, _) = client.transport().last_call();

        client
            .refund("c1", Params::new().with("amount", 5))
            .await;
        let (path_b, from_value, _) = client.transport().last_call();

        client.refund(Refund::new("c1"), Params::new().with("amount", 5)).await;
        let (_, from_builder, _) = client.transport().last_call();

        assert_eq!(path_a, "/refunds");
        assert_eq!(path_a, path_b);
        assert_eq!(from_fields, from_value);
        assert_eq!(from_fields, from_builder);
        assert_eq!(
            without_protocol_fields(from_fields),
            Params::new().with("charge_id", "c1").with("amount", 5)
        );
    }

    #[tokio::test]
    async fn pass_through_operations_use_fixed_paths() {
        let client = client();

        client.charge(Charge::new("tok_1", 1000)).await;
        let (path, params, _) = client.transport().last_call();
        assert_eq!(path, "/charges");
        assert_eq!(
            without_protocol_fields(params),
            Params::new().with("UvibaToken", "tok_1").with("amount", 1000_u64)
        );

        client.get_balance(Params::new()).await;
        assert_eq!(client.transport().last_call().0, "/balance");

        client
            .reverse_payment(Params::new().with("send_id", "snd_1"))
            .await;
        let (path, params, _) = client.transport().last_call();
        assert_eq!(path, "/transfers?action=take_payment_back");
        assert_eq!(
            without_protocol_fields(params),
            Params::new().with("send_id", "snd_1")
        );
    }

    #[tokio::test]
    async fn cancel_subscription_encodes_id() {
        let client = client();
        client.cancel_subscription("sub_1", Params::new()).await;
        assert_eq!(
            client.transport().last_call().0,
            "/subscriptions/sub_1?action=delete"
        );

        client.cancel_subscription("a/b c", Params::new()).await;
        assert_eq!(
            client.transport().last_call().0,
            "/subscriptions/a%2Fb%20c?action=delete"
        );

        client.cancel_subscription("a+b", Params::new()).await;
        assert_eq!(
            client.transport().last_call().0,
            "/subscriptions/a%2Bb?action=delete"
        );
    }

    #[tokio::test]
    async fn paylink_and_send_payment_merge_amount() {
        let client = client();

        client.create_paylink(1500, Params::new()).await;
        let (path, params, _) = client.transport().last_call();
        assert_eq!(path, "/transfers?action=create_paylink");
        assert_eq!(
            without_protocol_fields(params),
            Params::new().with("amount", 1500)
        );

        client
            .send_payment(
                SendPayment::new(200).email("a@example.com"),
                Params::new().with("message_to_receiver", "hi"),
            )
            .await;
        let (path, params, _) = client.transport().last_call();
        assert_eq!(path, "/transfers?action=send_payment");
        assert_eq!(
            without_protocol_fields(params),
            Params::new()
                .with("amount", 200_u64)
                .with("destination", "email")
                .with("destination_address", "a@example.com")
                .with("message_to_receiver", "hi")
        );

        client
            .send_payment(200, Params::new().with("paylink_code", "lc_9"))
            .await;
        let (_, params, _) = client.transport().last_call();
        assert_eq!(
            without_protocol_fields(params),
            Params::new().with("amount", 200).with("paylink_code", "lc_9")
        );
    }

    #[tokio::test]
    async fn verify_webhook_wraps_scalars() {
        let client = client();

        client.verify_webhook("req_1", "payload-body").await;
        let (path, params, _) = client.transport().last_call();
        assert_eq!(path, "/webhooks/?action=verify&request_id=req_1");
        assert_eq!(
            without_protocol_fields(params),
            Params::new().with("verify_for", "payload-body")
        );

        client
            .verify_webhook("req_2", Params::new().with("event", "charge.succeeded"))
            .await;
        let (path, params, _) = client.transport().last_call();
        assert_eq!(path, "/webhooks/?action=verify&request_id=req_2");
        assert_eq!(
            without_protocol_fields(params),
            Params::new().with("event", "charge.succeeded")
        );
    }

    #[tokio::test]
    async fn borrowed_transport_forwards_calls() {
        let recorder = Recorder::replying(Ok(RawResponse::text(200, r#"{"status":false}"#)));
        {
            let client = UvipayClient::new(TEST_KEY, &recorder).unwrap();
            assert!(!client.refund("c1", Params::new()).await.status());
        }
        let (path, params, key) = recorder.last_call();
        assert_eq!(path, "/refunds");
        assert_eq!(key, TEST_KEY);
        assert_eq!(
            without_protocol_fields(params),
            Params::new().with("charge_id", "c1")
        );
    }

    #[tokio::test]
    async fn boxed_transport_forwards_calls() {
        let client = UvipayClient::new(TEST_KEY, Box::new(Recorder::default())).unwrap();
        assert!(client.get_balance(Params::new()).await.status());
        let (path, _, key) = client.transport().last_call();
        assert_eq!(path, "/balance");
        assert_eq!(key, TEST_KEY);
    }

    #[tokio::test]
    async fn concurrent_calls_are_independent() {
        let client = client();
        let (a, b, c) = tokio::join!(
            client.charge(Params::new().with("n", 1)),
            client.get_balance(Params::new()),
            client.reverse_payment(Params::new()),
        );
        assert!(a.status() && b.status() && c.status());
        assert_eq!(client.transport().calls.lock().unwrap().len(), 3);
    }
}
