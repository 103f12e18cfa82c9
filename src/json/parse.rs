//! Purpose: Provide the internal runtime JSON decode entrypoints.
//! Exports: `from_str`, `from_slice`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Invariants: Inputs are decoded as-is; no lossy coercion or recovery.
//! Notes: Error mapping is done by callsites so domain context stays explicit.

use serde::de::DeserializeOwned;

pub(crate) fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(input)
}

pub(crate) fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(input)
}
