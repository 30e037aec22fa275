use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// The full short_code -> target URL mapping.
///
/// Serialized as a plain JSON object, which is both the snapshot file format
/// and the `GET /links` response body. Every key and value is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, String>);

impl Links {
    /// Look up the target URL stored for `short_code`.
    pub fn get(&self, short_code: &str) -> Option<&str> {
        self.0.get(short_code).map(String::as_str)
    }

    /// Add a new pair. Existing codes are never overwritten.
    pub fn insert(
        &mut self,
        short_code: impl Into<String>,
        target_url: impl Into<String>,
    ) -> StoreResult<()> {
        let short_code = short_code.into();
        let target_url = target_url.into();

        if short_code.is_empty() {
            return Err(StoreError::InvalidLink("Short code must not be empty"));
        }
        if target_url.is_empty() {
            return Err(StoreError::InvalidLink("URL is required"));
        }
        if self.0.contains_key(&short_code) {
            return Err(StoreError::DuplicateCode(short_code));
        }

        self.0.insert(short_code, target_url);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first pair breaking the non-empty key/value invariant, if any.
    /// Used to reject snapshots that were edited by hand.
    pub fn first_invalid(&self) -> Option<(&str, &str)> {
        self.0
            .iter()
            .find(|(code, url)| code.is_empty() || url.is_empty())
            .map(|(code, url)| (code.as_str(), url.as_str()))
    }
}

/// Body of `POST /shorten`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub short_code: Option<String>,
}

impl ShortenRequest {
    /// The target URL, if one was supplied and is non-empty.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    /// The caller-chosen code. An empty string counts as "not supplied".
    pub fn short_code(&self) -> Option<&str> {
        self.short_code.as_deref().filter(|c| !c.is_empty())
    }
}

/// Successful `POST /shorten` response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub success: bool,
    pub short_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_rejects_duplicates_and_keeps_first() {
        let mut links = Links::default();
        links.insert("abc", "https://a.com").unwrap();

        let err = links.insert("abc", "https://b.com").unwrap_err();
        assert!(matches!(err, StoreError::DuplicateCode(code) if code == "abc"));
        assert_eq!(links.get("abc"), Some("https://a.com"));
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn insert_rejects_empty_parts() {
        let mut links = Links::default();
        assert!(matches!(
            links.insert("", "https://a.com"),
            Err(StoreError::InvalidLink(_))
        ));
        assert!(matches!(
            links.insert("abc", ""),
            Err(StoreError::InvalidLink("URL is required"))
        ));
        assert!(links.is_empty());
    }

    #[test]
    fn links_serialize_as_plain_object() {
        let mut links = Links::default();
        links.insert("abc", "https://a.com").unwrap();
        assert_eq!(
            serde_json::to_string(&links).unwrap(),
            r#"{"abc":"https://a.com"}"#
        );

        let parsed: Links = serde_json::from_str(r#"{"x":"https://x.io"}"#).unwrap();
        assert_eq!(parsed.get("x"), Some("https://x.io"));
    }

    #[test]
    fn first_invalid_spots_empty_values() {
        let parsed: Links = serde_json::from_str(r#"{"ok":"https://x.io","bad":""}"#).unwrap();
        assert_eq!(parsed.first_invalid(), Some(("bad", "")));
    }

    #[test]
    fn shorten_request_treats_empty_fields_as_absent() {
        let req: ShortenRequest = serde_json::from_str(r#"{"url":"","shortCode":""}"#).unwrap();
        assert_eq!(req.url(), None);
        assert_eq!(req.short_code(), None);

        let req: ShortenRequest =
            serde_json::from_str(r#"{"url":"https://a.com","shortCode":"abc"}"#).unwrap();
        assert_eq!(req.url(), Some("https://a.com"));
        assert_eq!(req.short_code(), Some("abc"));
    }
}
