//! Webhook payload decoding.
//!
//! Bodies are decoded like a streaming JSON reader would: only the first value
//! counts, anything after it is ignored, and the Content-Type header is never
//! consulted. Object keys match `message` without regard to ASCII case, and the
//! last matching key wins.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::DecodeError;

const MESSAGE_KEY: &str = "message";

/// JSON body accepted by the `/webhook` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookPayload {
    /// Free-form text; absent or `null` becomes an empty string.
    pub message: String,
}

impl WebhookPayload {
    /// Decode the first JSON value in `body`.
    ///
    /// A top-level `null` yields an empty payload. Any other non-object value
    /// is rejected.
    pub fn from_slice(body: &[u8]) -> Result<Self, DecodeError> {
        let payload = serde_json::Deserializer::from_slice(body)
            .into_iter::<Option<WebhookPayload>>()
            .next()
            .ok_or(DecodeError::Empty)??;

        Ok(payload.unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for WebhookPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PayloadVisitor)
    }
}

struct PayloadVisitor;

impl<'de> Visitor<'de> for PayloadVisitor {
    type Value = WebhookPayload;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut message = String::new();

        while let Some(LossyString(key)) = map.next_key()? {
            if key.eq_ignore_ascii_case(MESSAGE_KEY) {
                // null leaves whatever an earlier key set
                if let Some(LossyString(value)) = map.next_value()? {
                    message = value;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(WebhookPayload { message })
    }
}

/// JSON string decoded as raw bytes, with invalid UTF-8 replaced by U+FFFD.
struct LossyString(String);

impl<'de> Deserialize<'de> for LossyString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_bytes(LossyStringVisitor)
    }
}

struct LossyStringVisitor;

impl<'de> Visitor<'de> for LossyStringVisitor {
    type Value = LossyString;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(LossyString(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(LossyString(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        Ok(LossyString(String::from_utf8_lossy(v).into_owned()))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Self::Value, E> {
        Ok(LossyString(match String::from_utf8(v) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }))
    }
}
