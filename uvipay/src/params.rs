//! Flat request parameters.
//!
//! Every Uvipay endpoint takes a flat form of string keys to scalar values.
//! [`Params`] is that form; [`Lead`] models the first argument of operations
//! that accept either a single identifying value or a whole field set.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde::Serialize;

/// A scalar parameter value.
///
/// Equality follows the encoded form for integers: `Int(5)` equals
/// `UInt(5)`, since both are written as `5`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Text value.
    Str(String),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Boolean, encoded as `true` / `false`.
    Bool(bool),
}

impl ParamValue {
    /// Returns the string slice if this is a [`ParamValue::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for ParamValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Int(a), Self::UInt(b)) | (Self::UInt(b), Self::Int(a)) => {
                i128::from(*a) == i128::from(*b)
            }
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            _ => false,
        }
    }
}

/// Renders the value the way it is written into a form body.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

macro_rules! impl_param_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }

            impl From<$ty> for Lead {
                fn from(value: $ty) -> Self {
                    Self::Value(ParamValue::from(value))
                }
            }
        )*
    };
}

impl_param_value_from! {
    String => Str,
    &str => Str,
    &String => Str,
    i32 => Int,
    i64 => Int,
    u32 => UInt,
    u64 => UInt,
    f64 => Float,
    bool => Bool,
}

/// An ordered, flat set of request parameters.
///
/// Keys are kept sorted so the encoded body is deterministic.
///
/// # Example
///
/// ```rust
/// use uvipay::Params;
///
/// let params = Params::new().with("amount", 500).with("currency", "usd");
/// assert_eq!(params.len(), 2);
/// assert_eq!(params.get("currency").and_then(|v| v.as_str()), Some("usd"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any previous value for `key`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a field, returning the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes a field.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.remove(key)
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Returns `true` if the field is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over fields in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
        self.0.iter()
    }

    /// Merges `other` into `self`. Fields of `other` win on conflict.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Consuming variant of [`Params::merge`].
    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        self.merge(other);
        self
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<ParamValue>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for Params {
    type Item = (String, ParamValue);
    type IntoIter = btree_map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Leading argument of an operation: a bare value or a full field set.
///
/// Operations such as [`refund`](crate::UvipayClient::refund) accept either
/// the identifying value (`"ch_123"`) or a [`Params`] that already carries it.
#[derive(Debug, Clone, PartialEq)]
pub enum Lead {
    /// A single value, stored under the operation's key.
    Value(ParamValue),
    /// A field set merged into the operation's parameters.
    Fields(Params),
}

impl Lead {
    /// Folds this lead into `params`.
    ///
    /// A [`Lead::Value`] is inserted under `key`; [`Lead::Fields`] are merged
    /// and override existing fields.
    #[must_use]
    pub fn apply(self, key: &str, mut params: Params) -> Params {
        match self {
            Self::Value(value) => {
                params.insert(key, value);
            }
            Self::Fields(fields) => params.merge(fields),
        }
        params
    }
}

impl From<ParamValue> for Lead {
    fn from(value: ParamValue) -> Self {
        Self::Value(value)
    }
}

impl From<Params> for Lead {
    fn from(params: Params) -> Self {
        Self::Fields(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_form_encoding() {
        assert_eq!(ParamValue::from("abc").to_string(), "abc");
        assert_eq!(ParamValue::from(-5_i64).to_string(), "-5");
        assert_eq!(ParamValue::from(1000_u64).to_string(), "1000");
        assert_eq!(ParamValue::from(12.5).to_string(), "12.5");
        assert_eq!(ParamValue::from(false).to_string(), "false");
    }

    #[test]
    fn integers_compare_by_value_across_signedness() {
        assert_eq!(ParamValue::from(5_u64), ParamValue::from(5));
        assert_eq!(ParamValue::from(5), ParamValue::from(5_u32));
        assert_ne!(ParamValue::from(-1), ParamValue::from(u64::MAX));
        assert_ne!(ParamValue::from(5), ParamValue::from("5"));
        assert_ne!(ParamValue::from(5), ParamValue::from(5.0));
        assert_eq!(
            Params::new().with("amount", 1000_u64),
            Params::new().with("amount", 1000)
        );
    }

    #[test]
    fn merge_overrides_existing_fields() {
        let mut base = Params::new().with("amount", 5).with("charge_id", "old");
        base.merge(Params::new().with("charge_id", "new"));
        assert_eq!(base.get("charge_id"), Some(&ParamValue::from("new")));
        assert_eq!(base.get("amount"), Some(&ParamValue::Int(5)));
    }

    #[test]
    fn value_lead_inserts_under_key() {
        let params = Lead::from("c1").apply("charge_id", Params::new().with("amount", 5));
        assert_eq!(params, Params::new().with("charge_id", "c1").with("amount", 5));
    }

    #[test]
    fn fields_lead_merges_and_overrides() {
        let lead = Lead::from(Params::new().with("amount", 10));
        let params = lead.apply("charge_id", Params::new().with("amount", 5));
        assert_eq!(params, Params::new().with("amount", 10));
    }

    #[test]
    fn iterates_in_key_order() {
        let params: Params = [("b", 2), ("a", 1), ("c", 3)].into_iter().collect();
        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }
}
