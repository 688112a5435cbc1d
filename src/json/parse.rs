//! Purpose: Provide the internal runtime JSON decode entrypoint.
//! Exports: `from_str`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Notes: Error mapping is done by callsites so domain context stays explicit.

use serde::de::DeserializeOwned;

pub(crate) fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(input)
}
