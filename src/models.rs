/// Data Models Module
///
/// This module defines the records returned by the chain indexing API.
/// The API shape is not guaranteed field-by-field, so every field is optional
/// and missing keys deserialize to `None` instead of failing the whole record.
use serde::{Deserialize, Deserializer, Serialize};

/// Envelope wrapping every API response
///
/// `result` is absent when the indexer has nothing for the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub result: Option<T>,
}

impl<T> Envelope<T> {
    pub fn empty() -> Self {
        Self { result: None }
    }
}

/// One page of a list endpoint
///
/// `total` counts matching records across all pages, not just `items`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResult<T> {
    #[serde(default)]
    pub items: Option<Vec<T>>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Position of an event, call or extrinsic inside the chain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Indexer {
    pub block_height: Option<u64>,
    pub block_hash: Option<String>,
    /// Milliseconds since the Unix epoch
    pub block_time: Option<i64>,
    pub extrinsic_index: Option<u32>,
    pub event_index: Option<u32>,
    pub call_index: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    pub indexer: Option<Indexer>,
    pub section: Option<String>,
    pub method: Option<String>,
    pub args: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Block {
    pub height: Option<u64>,
    /// Milliseconds since the Unix epoch
    pub time: Option<i64>,
    pub hash: Option<String>,
    pub parent_hash: Option<String>,
    pub state_root: Option<String>,
    pub extrinsics_root: Option<String>,
    pub validator: Option<String>,
    pub is_finalized: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Account {
    pub address: Option<String>,
    pub data: Option<AccountData>,
    pub nonce: Option<u64>,
}

/// Balances in the chain's smallest unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountData {
    #[serde(deserialize_with = "deserialize_amount")]
    pub total: Option<u128>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub free: Option<u128>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub reserved: Option<u128>,
    /// Never sent by the indexer; the "Reversed" tooltip still reads it.
    #[serde(deserialize_with = "deserialize_amount")]
    pub reversed: Option<u128>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Call {
    pub indexer: Option<Indexer>,
    pub section: Option<String>,
    pub method: Option<String>,
    pub args: Option<serde_json::Value>,
}

/// The section/method pair an extrinsic dispatches
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CallRef {
    pub section: Option<String>,
    pub method: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Extrinsic {
    pub indexer: Option<Indexer>,
    /// Mortality window as `[birth, death]` block heights
    pub lifetime: Option<[u64; 2]>,
    pub hash: Option<String>,
    pub call: Option<CallRef>,
    pub is_signed: Option<bool>,
    pub signer: Option<String>,
    pub nonce: Option<u64>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub tip: Option<u128>,
    pub is_finalized: Option<bool>,
}

impl Event {
    pub fn indexer(&self) -> &Indexer {
        self.indexer.as_ref().unwrap_or(&EMPTY_INDEXER)
    }
}

impl Call {
    pub fn indexer(&self) -> &Indexer {
        self.indexer.as_ref().unwrap_or(&EMPTY_INDEXER)
    }
}

impl Extrinsic {
    pub fn indexer(&self) -> &Indexer {
        self.indexer.as_ref().unwrap_or(&EMPTY_INDEXER)
    }
}

static EMPTY_INDEXER: Indexer = Indexer {
    block_height: None,
    block_hash: None,
    block_time: None,
    extrinsic_index: None,
    event_index: None,
    call_index: None,
};

/// Accept balances encoded either as JSON numbers or decimal strings
///
/// Large balances exceed `u64` and f64 precision, so indexers usually send
/// them as strings. Unparseable values become `None`.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<u128>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s.trim().parse::<u128>().ok(),
        Some(serde_json::Value::Number(n)) => n.as_u64().map(u128::from),
        _ => None,
    })
}
