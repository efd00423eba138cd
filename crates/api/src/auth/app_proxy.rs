//! App proxy request signatures.
//!
//! Requests forwarded through the shop's app proxy carry a `signature`
//! query parameter: the hex HMAC-SHA256, keyed by the app's API secret, of
//! every other query parameter rendered as `key=value` (repeated keys joined
//! with `,`), sorted and concatenated with no separator.

use std::collections::BTreeMap;

use countdown_core::error::CoreError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Query parameter holding the proxy signature.
pub const SIGNATURE_PARAM: &str = "signature";

/// Query parameter holding the requesting shop.
pub const SHOP_PARAM: &str = "shop";

/// The string the proxy signs for `params`. The signature itself is skipped.
pub fn signing_message(params: &[(String, String)]) -> String {
    let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (key, value) in params {
        if key == SIGNATURE_PARAM {
            continue;
        }
        grouped.entry(key).or_default().push(value);
    }

    let mut pairs: Vec<String> = grouped
        .into_iter()
        .map(|(key, values)| format!("{key}={}", values.join(",")))
        .collect();
    pairs.sort();
    pairs.concat()
}

fn keyed_mac(secret: &str, params: &[(String, String)]) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(signing_message(params).as_bytes());
    mac
}

/// Hex signature the proxy would attach to `params`.
pub fn sign_app_proxy(params: &[(String, String)], secret: &str) -> String {
    hex::encode(keyed_mac(secret, params).finalize().into_bytes())
}

/// Verify a proxied request's signature and return its shop.
///
/// Fails with [`CoreError::Unauthorized`] when the signature is missing,
/// malformed or wrong, or when the signed parameters name no shop.
pub fn verify_app_proxy(params: &[(String, String)], secret: &str) -> Result<String, CoreError> {
    let signature = params
        .iter()
        .find(|(key, _)| key == SIGNATURE_PARAM)
        .map(|(_, value)| value.as_str())
        .ok_or_else(|| CoreError::Unauthorized("Missing app proxy signature".into()))?;

    let expected = hex::decode(signature)
        .ok_or_else(|| CoreError::Unauthorized("Malformed app proxy signature".into()))?;

    keyed_mac(secret, params)
        .verify_slice(&expected)
        .map_err(|_| CoreError::Unauthorized("Invalid app proxy signature".into()))?;

    params
        .iter()
        .find(|(key, _)| key == SHOP_PARAM)
        .map(|(_, value)| value.trim())
        .filter(|shop| !shop.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CoreError::Unauthorized("App proxy request has no shop".into()))
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// `None` for odd lengths or non-hex digits.
    pub fn decode(text: &str) -> Option<Vec<u8>> {
        if text.len() % 2 != 0 {
            return None;
        }
        (0..text.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(text.get(i..i + 2)?, 16).ok())
            .collect()
    }
}
