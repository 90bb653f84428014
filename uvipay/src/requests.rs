//! Typed builders for the common request shapes.
//!
//! All of these lower to [`Params`], so they can be passed anywhere a raw
//! parameter set is accepted.

use crate::params::{Lead, Params};

/// Parameters of a charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charge {
    token: String,
    amount: u64,
    subscription: Option<bool>,
}

impl Charge {
    /// Charges `amount` (minor units, `100` = 1.00) against a payment token
    /// issued to the buyer's browser.
    #[must_use]
    pub fn new(token: impl Into<String>, amount: u64) -> Self {
        Self {
            token: token.into(),
            amount,
            subscription: None,
        }
    }

    /// Marks the charge as the first payment of a subscription.
    #[must_use]
    pub const fn subscription(mut self, subscription: bool) -> Self {
        self.subscription = Some(subscription);
        self
    }
}

impl From<Charge> for Params {
    fn from(charge: Charge) -> Self {
        let mut params = Self::new()
            .with("UvibaToken", charge.token)
            .with("amount", charge.amount);
        if let Some(subscription) = charge.subscription {
            params.insert("subscription", subscription);
        }
        params
    }
}

/// Parameters of a refund.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refund {
    charge_id: String,
    amount: Option<u64>,
}

impl Refund {
    /// Refunds the given charge, in full unless [`Refund::amount`] is set.
    #[must_use]
    pub fn new(charge_id: impl Into<String>) -> Self {
        Self {
            charge_id: charge_id.into(),
            amount: None,
        }
    }

    /// Refunds only part of the charge.
    #[must_use]
    pub const fn amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }
}

impl From<Refund> for Params {
    fn from(refund: Refund) -> Self {
        let mut params = Self::new().with("charge_id", refund.charge_id);
        if let Some(amount) = refund.amount {
            params.insert("amount", amount);
        }
        params
    }
}

/// Parameters of a paylink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paylink {
    amount: u64,
}

impl Paylink {
    /// Reserves `amount` behind a new redemption link.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self { amount }
    }
}

impl From<Paylink> for Params {
    fn from(paylink: Paylink) -> Self {
        Self::new().with("amount", paylink.amount)
    }
}

/// Parameters of a payment sent to a third party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendPayment {
    amount: u64,
    destination: Option<String>,
    email: Option<String>,
    message: Option<String>,
    paylink_code: Option<String>,
}

impl SendPayment {
    /// Sends `amount` to a recipient.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self {
            amount,
            destination: None,
            email: None,
            message: None,
            paylink_code: None,
        }
    }

    /// Sets the delivery channel, passed through as is.
    #[must_use]
    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Sets the recipient's email address. Implies the `email` destination
    /// unless one was set explicitly.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets a note shown to the recipient.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Pays out an existing paylink instead of reserving a new amount.
    #[must_use]
    pub fn paylink_code(mut self, code: impl Into<String>) -> Self {
        self.paylink_code = Some(code.into());
        self
    }
}

impl From<SendPayment> for Params {
    fn from(send: SendPayment) -> Self {
        let mut params = Self::new().with("amount", send.amount);
        let destination = send
            .destination
            .or_else(|| send.email.as_ref().map(|_| "email".to_owned()));
        if let Some(destination) = destination {
            params.insert("destination", destination);
        }
        if let Some(email) = send.email {
            params.insert("destination_address", email);
        }
        if let Some(message) = send.message {
            params.insert("message_to_receiver", message);
        }
        if let Some(code) = send.paylink_code {
            params.insert("paylink_code", code);
        }
        params
    }
}

macro_rules! impl_lead_from_request {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Lead {
                fn from(request: $ty) -> Self {
                    Self::Fields(request.into())
                }
            }
        )*
    };
}

impl_lead_from_request!(Charge, Refund, Paylink, SendPayment);
