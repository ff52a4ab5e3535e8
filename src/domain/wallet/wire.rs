//! Wire types for wallet endpoints (REST).
//!
//! Field names follow the BitGo API exactly (camelCase on the wire).

use serde::{Deserialize, Serialize};

use crate::shared::serde_util::null_default;
use crate::shared::QueryParams;

/// Response of the `consolidateunspents` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxInfo {
    /// Id of the transaction.
    #[serde(deserialize_with = "null_default::deserialize")]
    pub txid: String,
    /// The serialized transaction.
    #[serde(deserialize_with = "null_default::deserialize")]
    pub tx: String,
    /// Whether the transaction was signed (`"signed"`) or is pending approval.
    #[serde(deserialize_with = "null_default::deserialize")]
    pub status: String,
}

/// Body of a consolidation request. Unset fields are left out of the JSON
/// entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidateParams {
    /// Passphrase to decrypt the wallet's private key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_passphrase: Option<String>,
    /// Number of outputs created by the consolidation transaction (server default 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_unspents_to_make: Option<u32>,
    /// Number of unspents to select (server default 25, max 200).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Ignore unspents smaller than this many satoshis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,
    /// Ignore unspents larger than this many satoshis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
    /// Minimum block height of unspents to use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<u64>,
    /// Desired fee rate in satoshis/KB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_rate: Option<u64>,
    /// Pick the fee rate by targeting confirmation within this many blocks.
    /// BTC only; `fee_rate` wins if both are set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_tx_confirm_target: Option<u32>,
    /// Maximum percentage of an unspent's value spent on fees. Cannot be
    /// combined with `min_value`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee_percentage: Option<u32>,
    /// Required confirmations for each transaction input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_confirms: Option<u32>,
    /// Apply `min_confirms` to change outputs too.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce_min_confirms_for_change: Option<bool>,
}

/// An unspent transaction output (UTXO).
///
/// Fields the API reports as `null` (an unconfirmed unspent has no block
/// height, most have no `fromWallet`) decode to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Unspent {
    /// Outpoint of the unspent (`txid:vout`).
    #[serde(deserialize_with = "null_default::deserialize")]
    pub id: String,
    /// Address that owns this unspent.
    #[serde(deserialize_with = "null_default::deserialize")]
    pub address: String,
    /// Value in satoshis.
    #[serde(deserialize_with = "null_default::deserialize")]
    pub value: i64,
    /// Height of the block that created this unspent.
    #[serde(deserialize_with = "null_default::deserialize")]
    pub block_height: i64,
    #[serde(deserialize_with = "null_default::deserialize")]
    pub date: String,
    /// Wallet the unspent is in.
    #[serde(deserialize_with = "null_default::deserialize")]
    pub wallet: String,
    /// Wallet the unspent came from, when sent from a BitGo wallet you are a member of.
    #[serde(deserialize_with = "null_default::deserialize")]
    pub from_wallet: String,
    /// Address type and derivation chain
    /// (0 normal, 1 change, 10 segwit, 11 segwit change).
    #[serde(deserialize_with = "null_default::deserialize")]
    pub chain: u32,
    /// Position of the address in the chain's derivation path.
    #[serde(deserialize_with = "null_default::deserialize")]
    pub index: u32,
    #[serde(deserialize_with = "null_default::deserialize")]
    pub redeem_script: String,
    #[serde(deserialize_with = "null_default::deserialize")]
    pub is_segwit: bool,
}

/// Pagination metadata shared by list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListMeta {
    /// Cursor of the next batch. Empty or `null` on the last page.
    #[serde(deserialize_with = "null_default::deserialize")]
    pub next_batch_prev_id: String,
    /// Coin of the listed items.
    #[serde(deserialize_with = "null_default::deserialize")]
    pub coin: String,
}

/// One page of the `unspents` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnspentList {
    #[serde(flatten)]
    pub meta: ListMeta,
    #[serde(deserialize_with = "null_default::deserialize")]
    pub unspents: Vec<Unspent>,
}

impl UnspentList {
    /// Cursor of the next page, `None` when this page is the last one.
    pub fn next_cursor(&self) -> Option<&str> {
        Some(self.meta.next_batch_prev_id.as_str()).filter(|c| !c.is_empty())
    }

    /// Sum of unspent values in satoshis, saturating at the `i64` bounds.
    pub fn total_value(&self) -> i64 {
        self.unspents
            .iter()
            .fold(0i64, |total, u| total.saturating_add(u.value))
    }
}

/// Typed filters for the `unspents` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnspentsFilter {
    /// Start after this cursor (`nextBatchPrevId` of an earlier page).
    pub prev_id: Option<String>,
    /// Ignore unspents smaller than this many satoshis.
    pub min_value: Option<i64>,
    /// Ignore unspents larger than this many satoshis.
    pub max_value: Option<i64>,
    /// Ignore unspents confirmed below this block height.
    pub min_height: Option<u64>,
    /// Ignore unspents with fewer confirmations.
    pub min_confirms: Option<u32>,
}

impl UnspentsFilter {
    pub fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        if let Some(v) = &self.prev_id {
            q.set(PREV_ID_PARAM, v.as_str());
        }
        if let Some(v) = self.min_value {
            q.set("minValue", v.to_string());
        }
        if let Some(v) = self.max_value {
            q.set("maxValue", v.to_string());
        }
        if let Some(v) = self.min_height {
            q.set("minHeight", v.to_string());
        }
        if let Some(v) = self.min_confirms {
            q.set("minConfirms", v.to_string());
        }
        q
    }
}

impl From<&UnspentsFilter> for QueryParams {
    fn from(filter: &UnspentsFilter) -> Self {
        filter.to_query()
    }
}

/// Query key carrying the pagination cursor.
pub const PREV_ID_PARAM: &str = "prevId";
