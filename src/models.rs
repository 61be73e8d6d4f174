//! Wire models of the collection-management API
//!
//! Decoding is tolerant: absent scalars default, `null` lists become empty,
//! and URLs or requests given as bare strings are accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `"a"` becomes `["a"]`; list entries that are not strings use their `value` or JSON text
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let segment = |value: Value| match value {
        Value::String(s) => s,
        other => other
            .get("value")
            .and_then(|v| v.as_str())
            .map(String::from)
            .unwrap_or_else(|| other.to_string()),
    };

    Ok(match Option::<Value>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Value::Array(items)) => items.into_iter().map(segment).collect(),
        Some(other) => vec![segment(other)],
    })
}

/// Key/value list given as an array of objects or as `Key: Value` lines; bad entries are skipped
fn lenient_pairs<'de, D>(deserializer: D) -> Result<Vec<KeyValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Some(Value::String(text)) => text
            .lines()
            .filter_map(|line| {
                let (key, value) = line.split_once(':')?;
                Some(KeyValue {
                    key: Some(key.trim().to_string()),
                    value: Some(value.trim().to_string()),
                    disabled: false,
                })
            })
            .collect(),
        _ => Vec::new(),
    })
}

// ============================================================================
// Workspaces
// ============================================================================

/// A named container of collections
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub visibility: String,
}

/// `GET /workspaces`
#[derive(Clone, Debug, Deserialize)]
pub struct WorkspaceList {
    #[serde(deserialize_with = "null_as_empty")]
    pub workspaces: Vec<Workspace>,
}

// ============================================================================
// Collections
// ============================================================================

/// Fork metadata of a forked collection
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fork {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub from: String,
}

/// One entry of the collection listing
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fork: Option<Fork>,
    #[serde(default)]
    pub is_public: bool,
}

impl CollectionSummary {
    /// Fork label, empty when the collection is not a fork
    pub fn fork_label(&self) -> &str {
        self.fork.as_ref().map(|f| f.label.as_str()).unwrap_or("")
    }
}

/// `GET /collections?workspace=<id>`
#[derive(Clone, Debug, Deserialize)]
pub struct CollectionList {
    #[serde(deserialize_with = "null_as_empty")]
    pub collections: Vec<CollectionSummary>,
}

/// Header block of a full collection
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionInfo {
    #[serde(default, rename = "_postman_id", alias = "postmanId")]
    pub postman_id: String,
    #[serde(default)]
    pub name: String,
    /// Either a plain string or a `{content, type}` object
    #[serde(default)]
    pub description: Option<serde_json::Value>,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub fork: Option<Fork>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Full nested structure of one collection
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionDetail {
    #[serde(default)]
    pub info: CollectionInfo,
    #[serde(default, rename = "item", deserialize_with = "null_as_empty")]
    pub items: Vec<CollectionItem>,
}

/// `GET /collections/<uid>`
#[derive(Clone, Debug, Deserialize)]
pub struct CollectionEnvelope {
    pub collection: CollectionDetail,
}

// ============================================================================
// Collection tree
// ============================================================================

/// A node of the collection tree: a folder when it has children, else a request leaf
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
    /// Absent, `null` and `[]` all decode to an empty list
    #[serde(default, rename = "item", deserialize_with = "null_as_empty")]
    pub children: Vec<CollectionItem>,
    /// Folders may carry no request or `null`
    #[serde(default, deserialize_with = "null_as_default")]
    pub request: ItemRequest,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub response: Vec<serde_json::Value>,
    #[serde(default)]
    pub protocol_profile_behavior: Option<serde_json::Value>,
}

impl CollectionItem {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Raw URL string of this node's request
    pub fn url(&self) -> &str {
        &self.request.url.raw
    }
}

/// Key/value pair used for headers and query entries
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

/// Request definition attached to a collection item
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRequest")]
pub struct ItemRequest {
    pub method: String,
    pub headers: Vec<KeyValue>,
    pub url: RequestUrl,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRequest {
    Plain(String),
    Full {
        #[serde(default, deserialize_with = "null_as_default")]
        method: String,
        #[serde(default, alias = "header", deserialize_with = "lenient_pairs")]
        headers: Vec<KeyValue>,
        #[serde(default, deserialize_with = "null_as_default")]
        url: RequestUrl,
    },
}

impl From<RawRequest> for ItemRequest {
    fn from(raw: RawRequest) -> Self {
        match raw {
            RawRequest::Plain(url) => ItemRequest {
                method: "GET".to_string(),
                headers: Vec::new(),
                url: RequestUrl::from(RawUrl::Plain(url)),
            },
            RawRequest::Full { method, headers, url } => ItemRequest { method, headers, url },
        }
    }
}

/// URL of a request; `raw` is the authoritative string
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawUrl")]
pub struct RequestUrl {
    pub raw: String,
    pub protocol: Option<String>,
    pub host: Vec<String>,
    pub path: Vec<String>,
    pub query: Vec<KeyValue>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUrl {
    Plain(String),
    Parsed {
        #[serde(default, deserialize_with = "null_as_default")]
        raw: String,
        #[serde(default)]
        protocol: Option<Value>,
        #[serde(default, deserialize_with = "string_or_list")]
        host: Vec<String>,
        #[serde(default, deserialize_with = "string_or_list")]
        path: Vec<String>,
        #[serde(default, deserialize_with = "lenient_pairs")]
        query: Vec<KeyValue>,
    },
}

impl From<RawUrl> for RequestUrl {
    fn from(raw: RawUrl) -> Self {
        match raw {
            RawUrl::Plain(raw) => RequestUrl { raw, ..Default::default() },
            RawUrl::Parsed { raw, protocol, host, path, query } => RequestUrl {
                raw,
                protocol: protocol.and_then(|p| p.as_str().map(String::from)),
                host,
                path,
                query,
            },
        }
    }
}

// ============================================================================
// Remote errors
// ============================================================================

/// Error body returned by the API, e.g. for a missing or invalid key
#[derive(Clone, Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}
