use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whole link table as persisted, keyed by slug.
pub type Links = BTreeMap<String, LinkRecord>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub url: String,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default)]
    pub hits: u64,
    #[serde(default)]
    pub last_access: Option<i64>,
}

impl LinkRecord {
    pub fn new(url: String, now: i64) -> Self {
        Self {
            url,
            created_at: now,
            updated_at: now,
            hits: 0,
            last_access: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Slug,
    Hits,
    LastAccess,
}

impl SortOrder {
    /// Unknown or missing values fall back to ordering by slug.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("hits") => SortOrder::Hits,
            Some("last") => SortOrder::LastAccess,
            _ => SortOrder::Slug,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Slug => "slug",
            SortOrder::Hits => "hits",
            SortOrder::LastAccess => "last",
        }
    }
}

/// Read-only ordered view of the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub entries: Vec<(String, LinkRecord)>,
    pub total_hits: u64,
}

#[derive(Deserialize)]
pub struct AdminQuery {
    pub order: Option<String>,
}

#[derive(Deserialize)]
pub struct LinkForm {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub target: String,
    pub order: Option<String>,
}

#[derive(Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub slug: String,
    pub order: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_order_falls_back_to_slug() {
        assert_eq!(SortOrder::parse(Some("hits")), SortOrder::Hits);
        assert_eq!(SortOrder::parse(Some("last")), SortOrder::LastAccess);
        assert_eq!(SortOrder::parse(Some("bogus")), SortOrder::Slug);
        assert_eq!(SortOrder::parse(None), SortOrder::Slug);
    }

    #[test]
    fn record_uses_camel_case_and_null_last_access() {
        let record = LinkRecord::new("https://emol.com/".into(), 1_700_000_000_000);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "url": "https://emol.com/",
                "createdAt": 1_700_000_000_000i64,
                "updatedAt": 1_700_000_000_000i64,
                "hits": 0,
                "lastAccess": null
            })
        );
    }

    #[test]
    fn missing_statistics_default() {
        let record: LinkRecord =
            serde_json::from_str(r#"{"url":"https://a.io/","createdAt":1,"updatedAt":2}"#).unwrap();
        assert_eq!(record.hits, 0);
        assert_eq!(record.last_access, None);
    }
}
