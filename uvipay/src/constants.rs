//! Protocol constants for the Uvipay API.

/// Minimum accepted length of a private key.
pub const MIN_KEY_LENGTH: usize = 20;

/// Prefix every private key starts with.
pub const KEY_PREFIX: &str = "sk_";

/// Prefix of private keys bound to the live environment.
pub const LIVE_KEY_PREFIX: &str = "sk_live_";

/// Value sent in the `api_version` field of every request.
pub const API_VERSION: &str = "v2";

/// Value sent in the `api_subversion` field of every request.
pub const API_SUBVERSION: &str = "1";

/// Protocol field carrying [`API_VERSION`].
pub const API_VERSION_FIELD: &str = "api_version";

/// Protocol field carrying [`API_SUBVERSION`].
pub const API_SUBVERSION_FIELD: &str = "api_subversion";

/// Protocol field telling the API whether the key is a live key.
pub const LIVE_FIELD: &str = "isLive";

/// Message of the locally synthesized error envelope.
pub const DEFAULT_ERROR_MESSAGE: &str = "Sorry, some error happend";

/// Code of the locally synthesized error envelope.
pub const DEFAULT_ERROR_CODE: &str = "server_response";

/// Type of the locally synthesized error envelope.
pub const DEFAULT_ERROR_TYPE: &str = "request";

/// Endpoint paths, relative to the API base URL.
pub mod paths {
    /// `POST /charges`
    pub const CHARGES: &str = "/charges";
    /// `POST /refunds`
    pub const REFUNDS: &str = "/refunds";
    /// `POST /balance`
    pub const BALANCE: &str = "/balance";
    /// `POST /subscriptions/{id}?action=delete`, without the id.
    pub const SUBSCRIPTIONS: &str = "/subscriptions";
    /// `POST /transfers?action=create_paylink`
    pub const CREATE_PAYLINK: &str = "/transfers?action=create_paylink";
    /// `POST /transfers?action=send_payment`
    pub const SEND_PAYMENT: &str = "/transfers?action=send_payment";
    /// `POST /transfers?action=take_payment_back`
    pub const TAKE_PAYMENT_BACK: &str = "/transfers?action=take_payment_back";
    /// `POST /webhooks/?action=verify&request_id={id}`, without the id.
    pub const VERIFY_WEBHOOK: &str = "/webhooks/?action=verify&request_id=";
}
