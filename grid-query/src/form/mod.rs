//! Form-value source for the decoder.
//!
//! The decoder consumes `(key, value)` pairs. Callers whose HTTP layer
//! already parsed the form can pass those pairs directly; callers holding a
//! raw `application/x-www-form-urlencoded` body or query string can use
//! [`FormValues::parse_urlencoded`].

mod parsing;

pub use parsing::{DecodeError, url_decode};

use crate::constants::{MAX_URL_DECODED_LEN, max_form_fields};
use crate::log;
use std::collections::HashMap;

/// Form fields keyed by name, each holding every value received for it.
///
/// The grid protocol never repeats a key, so only the first value of each
/// list is meaningful to the decoder.
///
/// # Example
///
/// ```
/// use grid_query::FormValues;
///
/// let form = FormValues::parse_urlencoded("draw=3&search%5Bvalue%5D=bob+smith");
/// assert_eq!(form.first("draw"), Some("3"));
/// assert_eq!(form.first("search[value]"), Some("bob smith"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    fields: HashMap<String, Vec<String>>,
}

impl FormValues {
    /// Create an empty set of form values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a form-urlencoded body or query string (without the leading `?`).
    ///
    /// Fields past the configured field limit, and fields whose key or
    /// value fail to decode, are dropped and reported at warn level.
    #[must_use]
    pub fn parse_urlencoded(body: &str) -> Self {
        let limit = max_form_fields();
        let mut form = Self::new();
        let mut truncated = false;
        let mut decode_failures = 0u32;

        for pair in body.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            match (url_decode(raw_key), url_decode(raw_value)) {
                (Ok(key), Ok(value)) => {
                    if form.fields.len() >= limit && !form.fields.contains_key(&key) {
                        truncated = true;
                        break;
                    }
                    form.insert(key, value);
                },
                _ => decode_failures += 1,
            }
        }

        if truncated {
            log::log!(warn, "form field limit exceeded, remaining fields dropped", kept: limit);
        }
        if decode_failures > 0 {
            log::log!(
                warn,
                "form field decode failed, fields dropped",
                dropped: decode_failures,
                max_decoded_len: MAX_URL_DECODED_LEN,
            );
        }

        form
    }

    /// Append a value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(key.into()).or_default().push(value.into());
    }

    /// First value received for `key`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Every value received for `key`, in arrival order.
    pub fn all(&self, key: &str) -> &[String] {
        self.fields.get(key).map_or(&[][..], Vec::as_slice)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no keys are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(key, effective value)` pairs in unspecified order.
    ///
    /// A key whose value list is empty yields `""`.
    pub fn effective_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| {
            (
                k.as_str(),
                v.first().map_or("", String::as_str),
            )
        })
    }
}

impl From<HashMap<String, Vec<String>>> for FormValues {
    fn from(fields: HashMap<String, Vec<String>>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        for (k, v) in iter {
            form.insert(k, v);
        }
        form
    }
}
